use std::any::Any;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};
use paste::paste;
use slab::Slab;

use crate::{
    log,
    error::Error,
    marshal::DropPaths,
    handle::{Monitor, Window},
    consts::{Action, ConnectionEvent, JoystickId, Key, Modifiers, MouseButton},
    utils::hash::{self, PreHashedKeyMap},
};

pub(crate) mod trampolines;

#[cfg(test)]
mod tests;

// ----------------------------------------------
// Callback types
// ----------------------------------------------

// Process-wide:
pub type ErrorCallback = Box<dyn FnMut(Error)>;
pub type MonitorCallback = Box<dyn FnMut(Monitor, ConnectionEvent)>;
pub type JoystickCallback = Box<dyn FnMut(JoystickId, ConnectionEvent)>;

// Per-window:
pub type WindowPosCallback = Box<dyn FnMut(Window, i32, i32)>;
pub type WindowSizeCallback = Box<dyn FnMut(Window, i32, i32)>;
pub type WindowCloseCallback = Box<dyn FnMut(Window)>;
pub type WindowRefreshCallback = Box<dyn FnMut(Window)>;
pub type WindowFocusCallback = Box<dyn FnMut(Window, bool)>;
pub type WindowIconifyCallback = Box<dyn FnMut(Window, bool)>;
pub type WindowMaximizeCallback = Box<dyn FnMut(Window, bool)>;
pub type FramebufferSizeCallback = Box<dyn FnMut(Window, i32, i32)>;
pub type WindowContentScaleCallback = Box<dyn FnMut(Window, f32, f32)>;
pub type MouseButtonCallback = Box<dyn FnMut(Window, MouseButton, Action, Modifiers)>;
pub type CursorPosCallback = Box<dyn FnMut(Window, f64, f64)>;
pub type CursorEnterCallback = Box<dyn FnMut(Window, bool)>;
pub type ScrollCallback = Box<dyn FnMut(Window, f64, f64)>;
pub type KeyCallback = Box<dyn FnMut(Window, Key, i32, Action, Modifiers)>;
pub type CharCallback = Box<dyn FnMut(Window, char)>;
pub type CharModsCallback = Box<dyn FnMut(Window, char, Modifiers)>;
pub type DropCallback = Box<dyn FnMut(Window, DropPaths)>;

// Error callback that forwards every native error to the crate logger.
pub fn log_errors() -> ErrorCallback {
    Box::new(|error: Error| {
        log::error!(log::channel!("glfw"), "{error}");
    })
}

// ----------------------------------------------
// Slot
// ----------------------------------------------

// One registered closure. While a closure runs it is taken out of its
// slot, so it can re-enter the registry (even to replace itself).
pub struct Slot<C> {
    callback: Option<C>,
    dispatching: bool,
    replaced: bool,
}

impl<C> Default for Slot<C> {
    fn default() -> Self {
        Self { callback: None, dispatching: false, replaced: false }
    }
}

impl<C> Slot<C> {
    #[inline]
    pub fn is_set(&self) -> bool {
        self.callback.is_some()
    }

    // Returns the previous closure. A closure that is running at the time
    // is not returned; it is dropped once it finishes.
    fn replace(&mut self, callback: Option<C>) -> Option<C> {
        if self.dispatching {
            self.replaced = true;
        }
        std::mem::replace(&mut self.callback, callback)
    }

    fn take_for_dispatch(&mut self) -> Option<C> {
        let callback = self.callback.take()?;
        self.dispatching = true;
        self.replaced = false;
        Some(callback)
    }

    fn restore_after_dispatch(&mut self, callback: C) {
        if self.dispatching && !self.replaced {
            self.callback = Some(callback);
        }
        self.dispatching = false;
        self.replaced = false;
    }
}

// ----------------------------------------------
// WindowCallbacks
// ----------------------------------------------

// Single list of every per-window event kind. Each entry names the record
// field, the closure alias (`<Kind>Callback`), the native setter
// (`glfwSet<Kind>Callback`) and the trampoline.
macro_rules! for_each_window_callback {
    ($mac:ident) => {
        $mac! {
            window_pos,
            window_size,
            window_close,
            window_refresh,
            window_focus,
            window_iconify,
            window_maximize,
            framebuffer_size,
            window_content_scale,
            mouse_button,
            cursor_pos,
            cursor_enter,
            scroll,
            key,
            char,
            char_mods,
            drop,
        }
    };
}

pub(crate) use for_each_window_callback;

macro_rules! declare_window_callbacks {
    ($($kind:ident),+ $(,)?) => {
        paste! {
            // Closures registered for one window.
            #[derive(Default)]
            pub struct WindowCallbacks {
                $(pub $kind: Slot<[<$kind:camel Callback>]>,)+
            }

            impl WindowCallbacks {
                pub fn registered_count(&self) -> usize {
                    0 $(+ self.$kind.is_set() as usize)+
                }
            }
        }
    };
}

for_each_window_callback!(declare_window_callbacks);

// ----------------------------------------------
// CallbackRegistry
// ----------------------------------------------

// Every closure registered through one Glfw context. Window records live
// in a slab indexed by the native window address and are created on first
// registration, removed when the window is destroyed.
#[derive(Default)]
pub struct CallbackRegistry {
    pub error: Slot<ErrorCallback>,
    pub monitor: Slot<MonitorCallback>,
    pub joystick: Slot<JoystickCallback>,
    windows: Slab<WindowCallbacks>,
    window_index: PreHashedKeyMap<u64, usize>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn window(&mut self, window: Window) -> Option<&mut WindowCallbacks> {
        let slab_key = *self.window_index.get(&hash::address_key(window.as_raw()))?;
        self.windows.get_mut(slab_key)
    }

    pub fn window_or_insert(&mut self, window: Window) -> &mut WindowCallbacks {
        let address = hash::address_key(window.as_raw());
        let slab_key = match self.window_index.get(&address) {
            Some(&slab_key) => slab_key,
            None => {
                let slab_key = self.windows.insert(WindowCallbacks::default());
                self.window_index.insert(address, slab_key);
                log::verbose!(log::channel!("callbacks"), "New callback record for window {:p}.", window.as_raw());
                slab_key
            }
        };
        &mut self.windows[slab_key]
    }

    // Hands the record back so the caller can drop its closures outside
    // any borrow of the registry.
    pub fn remove_window(&mut self, window: Window) -> Option<WindowCallbacks> {
        let slab_key = self.window_index.remove(&hash::address_key(window.as_raw()))?;
        log::verbose!(log::channel!("callbacks"), "Removed callback record for window {:p}.", window.as_raw());
        self.windows.try_remove(slab_key)
    }

    #[inline]
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    pub fn is_window_registered(&self, window: Window) -> bool {
        self.window_index.contains_key(&hash::address_key(window.as_raw()))
    }

    // Setting None never creates a record.
    pub fn set_window_callback<C>(&mut self,
                                  window: Window,
                                  slot: fn(&mut WindowCallbacks) -> &mut Slot<C>,
                                  callback: Option<C>) -> Option<C> {
        match callback {
            Some(callback) => slot(self.window_or_insert(window)).replace(Some(callback)),
            None => self.window(window).and_then(|record| slot(record).replace(None)),
        }
    }

    pub fn set_callback<C>(&mut self,
                           slot: fn(&mut CallbackRegistry) -> &mut Slot<C>,
                           callback: Option<C>) -> Option<C> {
        slot(self).replace(callback)
    }
}

// ----------------------------------------------
// Dispatch
// ----------------------------------------------

// Invokes the closure found by `locate`, without holding the registry
// borrow while it runs. Absent record or closure is a no-op. Panics are
// caught here since the caller is usually a native callback frame.
pub fn dispatch<C>(registry: &RefCell<CallbackRegistry>,
                   locate: impl Fn(&mut CallbackRegistry) -> Option<&mut Slot<C>>,
                   invoke: impl FnOnce(&mut C)) {
    let taken = match registry.try_borrow_mut() {
        Ok(mut registry) => locate(&mut *registry).and_then(Slot::take_for_dispatch),
        Err(_) => {
            log::error!(log::channel!("callbacks"), "Callback registry is busy; event dropped.");
            None
        }
    };

    let Some(mut callback) = taken else {
        return;
    };

    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| invoke(&mut callback))) {
        log::error!(log::channel!("callbacks"), "Panic in callback: {}", panic_message(&*payload));
    }

    // The record may have been removed (window destroyed) while running.
    let leftover = match registry.try_borrow_mut() {
        Ok(mut registry) => match locate(&mut *registry) {
            Some(slot) => {
                slot.restore_after_dispatch(callback);
                None
            }
            None => Some(callback),
        },
        Err(_) => Some(callback),
    };
    drop(leftover);
}

#[inline]
pub fn dispatch_window<C>(registry: &RefCell<CallbackRegistry>,
                          window: Window,
                          slot: fn(&mut WindowCallbacks) -> &mut Slot<C>,
                          invoke: impl FnOnce(&mut C)) {
    dispatch(registry, |registry| registry.window(window).map(slot), invoke);
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "<non-string panic payload>"
    }
}

// ----------------------------------------------
// Active registry
// ----------------------------------------------

// Native callbacks carry no user data, so trampolines find the registry
// of the context that is live on the calling thread through this.
thread_local! {
    static ACTIVE_REGISTRY: RefCell<Weak<RefCell<CallbackRegistry>>> = RefCell::new(Weak::new());
}

pub(crate) fn activate(registry: &Rc<RefCell<CallbackRegistry>>) {
    ACTIVE_REGISTRY.with(|active| *active.borrow_mut() = Rc::downgrade(registry));
}

pub(crate) fn deactivate() {
    ACTIVE_REGISTRY.with(|active| *active.borrow_mut() = Weak::new());
}

pub(crate) fn is_active() -> bool {
    ACTIVE_REGISTRY.with(|active| active.borrow().strong_count() > 0)
}

pub(crate) fn with_active_registry(f: impl FnOnce(&RefCell<CallbackRegistry>)) {
    let registry = ACTIVE_REGISTRY.with(|active| active.borrow().upgrade());
    if let Some(registry) = registry {
        f(&registry);
    }
}
