use libc::{c_char, c_double, c_float, c_int, c_uint};

use crate::{
    log,
    ffi,
    marshal,
    error::Error,
    handle::{Monitor, Window},
    consts::{Action, ConnectionEvent, JoystickId, Key, Modifiers, MouseButton},
    utils::from_glfw_bool,
};

use super::{CallbackRegistry, Slot, WindowCallbacks};

// Native entry points installed for every callback slot that has a Rust
// closure. Each one converts the raw arguments and dispatches into the
// registry of the context active on this thread; with none active, or for
// arguments that do not map to a known value, the event is ignored.

fn dispatch_window<C>(window: *mut ffi::GLFWwindow,
                      slot: fn(&mut WindowCallbacks) -> &mut Slot<C>,
                      invoke: impl FnOnce(&mut C, Window)) {
    let Some(window) = (unsafe { Window::from_raw(window) }) else {
        return;
    };
    super::with_active_registry(|registry| {
        super::dispatch_window(registry, window, slot, |callback| invoke(callback, window));
    });
}

fn dispatch_global<C>(slot: fn(&mut CallbackRegistry) -> &mut Slot<C>, invoke: impl FnOnce(&mut C)) {
    super::with_active_registry(|registry| {
        super::dispatch(registry, |registry| Some(slot(registry)), invoke);
    });
}

fn connection_event(event: c_int) -> Option<ConnectionEvent> {
    let event = ConnectionEvent::try_from(event).ok();
    if event.is_none() {
        log::warn!(log::channel!("callbacks"), "Ignoring unknown connection event.");
    }
    event
}

fn codepoint_to_char(codepoint: c_uint) -> Option<char> {
    let ch = char::from_u32(codepoint);
    if ch.is_none() {
        log::warn!(log::channel!("callbacks"), "Ignoring invalid codepoint 0x{codepoint:X}.");
    }
    ch
}

// ----------------------------------------------
// Process-wide
// ----------------------------------------------

pub(crate) unsafe extern "C" fn error(code: c_int, description: *const c_char) {
    let description = unsafe { marshal::string_from_raw(description) }.unwrap_or_default();
    dispatch_global(|registry| &mut registry.error, |callback| {
        callback(Error::new(code, description));
    });
}

pub(crate) unsafe extern "C" fn monitor(monitor: *mut ffi::GLFWmonitor, event: c_int) {
    let Some(monitor) = (unsafe { Monitor::from_raw(monitor) }) else { return };
    let Some(event) = connection_event(event) else { return };
    dispatch_global(|registry| &mut registry.monitor, |callback| callback(monitor, event));
}

pub(crate) unsafe extern "C" fn joystick(jid: c_int, event: c_int) {
    let Ok(joystick) = JoystickId::try_from(jid) else { return };
    let Some(event) = connection_event(event) else { return };
    dispatch_global(|registry| &mut registry.joystick, |callback| callback(joystick, event));
}

// ----------------------------------------------
// Per-window
// ----------------------------------------------

pub(crate) unsafe extern "C" fn window_pos(window: *mut ffi::GLFWwindow, x: c_int, y: c_int) {
    dispatch_window(window, |w| &mut w.window_pos, |callback, window| callback(window, x, y));
}

pub(crate) unsafe extern "C" fn window_size(window: *mut ffi::GLFWwindow, width: c_int, height: c_int) {
    dispatch_window(window, |w| &mut w.window_size, |callback, window| callback(window, width, height));
}

pub(crate) unsafe extern "C" fn window_close(window: *mut ffi::GLFWwindow) {
    dispatch_window(window, |w| &mut w.window_close, |callback, window| callback(window));
}

pub(crate) unsafe extern "C" fn window_refresh(window: *mut ffi::GLFWwindow) {
    dispatch_window(window, |w| &mut w.window_refresh, |callback, window| callback(window));
}

pub(crate) unsafe extern "C" fn window_focus(window: *mut ffi::GLFWwindow, focused: c_int) {
    let focused = from_glfw_bool(focused);
    dispatch_window(window, |w| &mut w.window_focus, |callback, window| callback(window, focused));
}

pub(crate) unsafe extern "C" fn window_iconify(window: *mut ffi::GLFWwindow, iconified: c_int) {
    let iconified = from_glfw_bool(iconified);
    dispatch_window(window, |w| &mut w.window_iconify, |callback, window| callback(window, iconified));
}

pub(crate) unsafe extern "C" fn window_maximize(window: *mut ffi::GLFWwindow, maximized: c_int) {
    let maximized = from_glfw_bool(maximized);
    dispatch_window(window, |w| &mut w.window_maximize, |callback, window| callback(window, maximized));
}

pub(crate) unsafe extern "C" fn framebuffer_size(window: *mut ffi::GLFWwindow, width: c_int, height: c_int) {
    dispatch_window(window, |w| &mut w.framebuffer_size, |callback, window| callback(window, width, height));
}

pub(crate) unsafe extern "C" fn window_content_scale(window: *mut ffi::GLFWwindow, xscale: c_float, yscale: c_float) {
    dispatch_window(window, |w| &mut w.window_content_scale, |callback, window| callback(window, xscale, yscale));
}

pub(crate) unsafe extern "C" fn mouse_button(window: *mut ffi::GLFWwindow, button: c_int, action: c_int, mods: c_int) {
    let Ok(button) = MouseButton::try_from(button) else { return };
    let Ok(action) = Action::try_from(action) else { return };
    let mods = Modifiers::from_raw(mods);
    dispatch_window(window, |w| &mut w.mouse_button, |callback, window| callback(window, button, action, mods));
}

pub(crate) unsafe extern "C" fn cursor_pos(window: *mut ffi::GLFWwindow, x: c_double, y: c_double) {
    dispatch_window(window, |w| &mut w.cursor_pos, |callback, window| callback(window, x, y));
}

pub(crate) unsafe extern "C" fn cursor_enter(window: *mut ffi::GLFWwindow, entered: c_int) {
    let entered = from_glfw_bool(entered);
    dispatch_window(window, |w| &mut w.cursor_enter, |callback, window| callback(window, entered));
}

pub(crate) unsafe extern "C" fn scroll(window: *mut ffi::GLFWwindow, x: c_double, y: c_double) {
    dispatch_window(window, |w| &mut w.scroll, |callback, window| callback(window, x, y));
}

pub(crate) unsafe extern "C" fn key(window: *mut ffi::GLFWwindow, key: c_int, scancode: c_int, action: c_int, mods: c_int) {
    let key = Key::from(key);
    let Ok(action) = Action::try_from(action) else { return };
    let mods = Modifiers::from_raw(mods);
    dispatch_window(window, |w| &mut w.key, |callback, window| callback(window, key, scancode, action, mods));
}

pub(crate) unsafe extern "C" fn char(window: *mut ffi::GLFWwindow, codepoint: c_uint) {
    let Some(ch) = codepoint_to_char(codepoint) else { return };
    dispatch_window(window, |w| &mut w.char, |callback, window| callback(window, ch));
}

pub(crate) unsafe extern "C" fn char_mods(window: *mut ffi::GLFWwindow, codepoint: c_uint, mods: c_int) {
    let Some(ch) = codepoint_to_char(codepoint) else { return };
    let mods = Modifiers::from_raw(mods);
    dispatch_window(window, |w| &mut w.char_mods, |callback, window| callback(window, ch, mods));
}

// The path strings are only valid for the duration of this call.
pub(crate) unsafe extern "C" fn drop(window: *mut ffi::GLFWwindow, count: c_int, paths: *mut *const c_char) {
    let paths = unsafe { marshal::drop_paths_from_raw(paths, count) };
    dispatch_window(window, |w| &mut w.drop, |callback, window| callback(window, paths));
}
