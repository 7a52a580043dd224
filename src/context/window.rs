use std::ptr;
use paste::paste;

use crate::{
    log,
    ffi,
    marshal,
    handle::{Monitor, Window},
    callbacks::{self, trampolines, *},
};

use super::Glfw;

// ----------------------------------------------
// Window creation
// ----------------------------------------------

impl Glfw {
    // Creates a window (and its context) using the current window hints.
    // Some(monitor) makes it full screen on that monitor; `share` names a
    // window whose context objects are shared with the new one.
    // None on failure; the reason goes to the error callback / get_error.
    pub fn create_window(&self,
                         width: i32,
                         height: i32,
                         title: &str,
                         monitor: Option<Monitor>,
                         share: Option<Window>) -> Option<Window> {
        let c_title = marshal::to_c_string(title);
        let window = unsafe {
            Window::from_raw(ffi::glfwCreateWindow(
                width,
                height,
                c_title.as_ptr(),
                monitor.map_or(ptr::null_mut(), Monitor::as_raw),
                share.map_or(ptr::null_mut(), Window::as_raw),
            ))
        };

        match window {
            Some(_) => log::verbose!(log::channel!("glfw"), "Created window '{title}' ({width}x{height})."),
            None => log::error!(log::channel!("glfw"), "Failed to create window '{title}' ({width}x{height})."),
        }

        window
    }

    // Destroys the window and drops every closure registered for it.
    pub fn destroy_window(&self, window: Window) {
        let record = self.registry.borrow_mut().remove_window(window);
        unsafe { ffi::glfwDestroyWindow(window.as_raw()) };
        drop(record);
    }
}

// ----------------------------------------------
// Per-window callback setters
// ----------------------------------------------

// Generates `set_<kind>_callback(window, Option<closure>) -> previous` for
// every per-window event kind. Some(closure) installs the native
// trampoline; None uninstalls it so the event no longer crosses the
// native boundary.
macro_rules! window_callback_setters {
    ($($kind:ident),+ $(,)?) => {
        paste! {
            impl Glfw {
                $(
                    pub fn [<set_ $kind _callback>](&self,
                                                    window: Window,
                                                    callback: Option<[<$kind:camel Callback>]>)
                                                    -> Option<[<$kind:camel Callback>]> {
                        let installed = callback.is_some();
                        let previous = self.registry
                            .borrow_mut()
                            .set_window_callback(window, |record| &mut record.$kind, callback);
                        unsafe {
                            if installed {
                                ffi::[<glfwSet $kind:camel Callback>](window.as_raw(), Some(trampolines::$kind));
                            } else {
                                ffi::[<glfwSet $kind:camel Callback>](window.as_raw(), None);
                            }
                        }
                        previous
                    }
                )+
            }
        }
    };
}

callbacks::for_each_window_callback!(window_callback_setters);
