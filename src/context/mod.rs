use std::cell::RefCell;
use std::ptr;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use libc::{c_char, c_int};

use crate::{
    log,
    ffi,
    marshal,
    handle::Monitor,
    error::{Error, ErrorCode},
    consts::{self, Hint, InitHint, StringHint},
    callbacks::{self, trampolines, CallbackRegistry, ErrorCallback, MonitorCallback},
    utils::to_glfw_bool,
};

mod window;
mod input;
mod gl;

#[cfg(all(test, not(feature = "native")))]
mod tests;

// ----------------------------------------------
// Version
// ----------------------------------------------

// Version of the linked native library. Needs no initialization.
pub fn get_version() -> (i32, i32, i32) {
    let (mut major, mut minor, mut rev): (c_int, c_int, c_int) = (0, 0, 0);
    unsafe { ffi::glfwGetVersion(&mut major, &mut minor, &mut rev) };
    (major, minor, rev)
}

// Compile-time configuration string of the native library.
pub fn get_version_string() -> String {
    unsafe { marshal::string_from_raw(ffi::glfwGetVersionString()) }.unwrap_or_default()
}

// Takes (and clears) the last error of the calling thread.
fn take_last_error() -> Option<Error> {
    let mut description: *const c_char = ptr::null();
    let code = unsafe { ffi::glfwGetError(&mut description) };
    if code == i32::from(ErrorCode::NoError) {
        return None;
    }
    let description = unsafe { marshal::string_from_raw(description) }.unwrap_or_default();
    Some(Error::new(code, description))
}

// ----------------------------------------------
// Glfw
// ----------------------------------------------

// The native library is process-wide, so only one Glfw may own it at a
// time, whichever thread created it. The null platform keeps separate
// state per thread and needs no such claim.
#[cfg(feature = "native")]
static NATIVE_LIBRARY_CLAIMED: AtomicBool = AtomicBool::new(false);

#[cfg_attr(not(feature = "native"), allow(dead_code))]
fn try_claim(claimed: &AtomicBool) -> bool {
    claimed.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).is_ok()
}

#[cfg_attr(not(feature = "native"), allow(dead_code))]
fn release_claim(claimed: &AtomicBool) {
    claimed.store(false, Ordering::Release);
}

// The initialized library. Everything that needs initialization goes
// through this. It is neither Send nor Sync: the native library must be
// driven from the thread that initialized it (the main thread on most
// platforms), and so must every callback registered here.
//
// With the native library a second Glfw is refused while one is alive,
// even on another thread.
//
// Dropping it terminates the library; every Window, Monitor and Cursor
// handle obtained from it becomes invalid.
pub struct Glfw {
    registry: Rc<RefCell<CallbackRegistry>>,
    terminated: bool,
}

impl Glfw {
    // Fails if a context is already live on this thread, or with the
    // native error if the platform cannot be initialized.
    pub fn init() -> Result<Self, Error> {
        if callbacks::is_active() {
            return Err(Error::from_code(ErrorCode::PlatformError,
                                        "A Glfw context is already active on this thread"));
        }

        #[cfg(feature = "native")]
        if !try_claim(&NATIVE_LIBRARY_CLAIMED) {
            return Err(Error::from_code(ErrorCode::PlatformError,
                                        "GLFW is already initialized by another thread"));
        }

        if unsafe { ffi::glfwInit() } == consts::FALSE {
            let error = take_last_error().unwrap_or_else(|| {
                Error::from_code(ErrorCode::PlatformError, "Initialization failed")
            });
            log::error!(log::channel!("glfw"), "Failed to initialize: {error}");
            #[cfg(feature = "native")]
            release_claim(&NATIVE_LIBRARY_CLAIMED);
            return Err(error);
        }

        let registry = Rc::new(RefCell::new(CallbackRegistry::new()));
        callbacks::activate(&registry);

        log::info!(log::channel!("glfw"), "Initialized GLFW {}", get_version_string());
        Ok(Self { registry, terminated: false })
    }

    // Only honored before `init`.
    pub fn init_hint(hint: InitHint, value: bool) {
        unsafe { ffi::glfwInitHint(hint.into(), to_glfw_bool(value)) };
    }

    // Destroys all remaining windows and cursors and drops every
    // registered closure.
    pub fn terminate(mut self) {
        self.terminate_internal();
    }

    fn terminate_internal(&mut self) {
        if self.terminated {
            return;
        }
        self.terminated = true;

        unsafe {
            ffi::glfwTerminate();
            ffi::glfwSetErrorCallback(None);
        }
        callbacks::deactivate();

        #[cfg(feature = "native")]
        release_claim(&NATIVE_LIBRARY_CLAIMED);

        // Closures are dropped after the registry borrow ends.
        let registered = std::mem::take(&mut *self.registry.borrow_mut());
        drop(registered);

        log::info!(log::channel!("glfw"), "Terminated.");
    }

    #[cfg(test)]
    pub(crate) fn registry(&self) -> &RefCell<CallbackRegistry> {
        &self.registry
    }

    // ----------------------
    // Errors:
    // ----------------------

    // Last error reported on this thread, if any. Clears it.
    pub fn get_error(&self) -> Option<Error> {
        take_last_error()
    }

    // Returns the previously registered closure.
    pub fn set_error_callback(&self, callback: Option<ErrorCallback>) -> Option<ErrorCallback> {
        let installed = callback.is_some();
        let previous = self.registry.borrow_mut().set_callback(|r| &mut r.error, callback);
        unsafe {
            if installed {
                ffi::glfwSetErrorCallback(Some(trampolines::error));
            } else {
                ffi::glfwSetErrorCallback(None);
            }
        }
        previous
    }

    // ----------------------
    // Monitors:
    // ----------------------

    // Primary monitor first.
    pub fn monitors(&self) -> Vec<Monitor> {
        let mut count: c_int = 0;
        let monitors = unsafe { ffi::glfwGetMonitors(&mut count) };
        unsafe { marshal::slice_from_raw(monitors, count) }
            .iter()
            .filter_map(|&monitor| unsafe { Monitor::from_raw(monitor) })
            .collect()
    }

    pub fn primary_monitor(&self) -> Option<Monitor> {
        unsafe { Monitor::from_raw(ffi::glfwGetPrimaryMonitor()) }
    }

    pub fn set_monitor_callback(&self, callback: Option<MonitorCallback>) -> Option<MonitorCallback> {
        let installed = callback.is_some();
        let previous = self.registry.borrow_mut().set_callback(|r| &mut r.monitor, callback);
        unsafe {
            if installed {
                ffi::glfwSetMonitorCallback(Some(trampolines::monitor));
            } else {
                ffi::glfwSetMonitorCallback(None);
            }
        }
        previous
    }

    // ----------------------
    // Window hints:
    // ----------------------

    pub fn default_window_hints(&self) {
        unsafe { ffi::glfwDefaultWindowHints() };
    }

    // Enum valued hints take the raw value, e.g. `OpenGlProfile::Core.into()`.
    pub fn window_hint(&self, hint: Hint, value: i32) {
        unsafe { ffi::glfwWindowHint(hint.into(), value) };
    }

    #[inline]
    pub fn window_hint_bool(&self, hint: Hint, value: bool) {
        self.window_hint(hint, to_glfw_bool(value));
    }

    pub fn window_hint_string(&self, hint: StringHint, value: &str) {
        let value = marshal::to_c_string(value);
        unsafe { ffi::glfwWindowHintString(hint.into(), value.as_ptr()) };
    }

    // ----------------------
    // Events:
    // ----------------------

    // Registered callbacks run from inside these, on this thread.

    pub fn poll_events(&self) {
        unsafe { ffi::glfwPollEvents() };
    }

    pub fn wait_events(&self) {
        unsafe { ffi::glfwWaitEvents() };
    }

    // In seconds.
    pub fn wait_events_timeout(&self, timeout: f64) {
        unsafe { ffi::glfwWaitEventsTimeout(timeout) };
    }

    // Wakes up a thread blocked in wait_events.
    pub fn post_empty_event(&self) {
        unsafe { ffi::glfwPostEmptyEvent() };
    }

    // ----------------------
    // Time:
    // ----------------------

    // Seconds since init, unless reset with set_time.
    pub fn get_time(&self) -> f64 {
        unsafe { ffi::glfwGetTime() }
    }

    pub fn set_time(&self, time: f64) {
        unsafe { ffi::glfwSetTime(time) };
    }

    pub fn get_timer_value(&self) -> u64 {
        unsafe { ffi::glfwGetTimerValue() }
    }

    // Ticks per second of get_timer_value.
    pub fn get_timer_frequency(&self) -> u64 {
        unsafe { ffi::glfwGetTimerFrequency() }
    }
}

impl Drop for Glfw {
    fn drop(&mut self) {
        self.terminate_internal();
    }
}
