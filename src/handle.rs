use std::ptr::{self, NonNull};
use libc::{c_double, c_float, c_int, c_void};

use crate::{
    log,
    ffi,
    marshal,
    consts::{Action, CursorMode, Hint, InputMode, Key, MouseButton},
    types::{GammaRamp, Image, VideoMode},
    utils::{from_glfw_bool, to_glfw_bool},
};

// Native objects are owned by the library. These handles only name them:
// they are Copy, never free anything on drop, and go stale once the object
// is destroyed (or the library terminated). Equality is identity.
//
// A handle must not be used after its object is destroyed or after the
// Glfw it came from is terminated. The native library does not check, so
// such a call through the `native` backend is undefined behavior even
// though these methods are safe to call. The null platform looks every
// handle up and reports InvalidValue instead.

macro_rules! opaque_handle {
    ($name:ident, $raw:ty) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub struct $name(NonNull<$raw>);

        impl $name {
            // SAFETY: `ptr` must be null or a live object returned by the
            // native library.
            #[inline]
            pub unsafe fn from_raw(ptr: *mut $raw) -> Option<Self> {
                NonNull::new(ptr).map(Self)
            }

            #[inline]
            pub fn as_raw(self) -> *mut $raw {
                self.0.as_ptr()
            }
        }
    };
}

opaque_handle!(Monitor, ffi::GLFWmonitor);
opaque_handle!(Window, ffi::GLFWwindow);
opaque_handle!(Cursor, ffi::GLFWcursor);

// ----------------------------------------------
// Monitor
// ----------------------------------------------

impl Monitor {
    pub fn pos(self) -> (i32, i32) {
        let (mut x, mut y) = (0, 0);
        unsafe { ffi::glfwGetMonitorPos(self.as_raw(), &mut x, &mut y) };
        (x, y)
    }

    // (x, y, width, height) not occluded by task bars or menus.
    pub fn workarea(self) -> (i32, i32, i32, i32) {
        let (mut x, mut y, mut w, mut h) = (0, 0, 0, 0);
        unsafe { ffi::glfwGetMonitorWorkarea(self.as_raw(), &mut x, &mut y, &mut w, &mut h) };
        (x, y, w, h)
    }

    // In millimeters.
    pub fn physical_size(self) -> (i32, i32) {
        let (mut w, mut h) = (0, 0);
        unsafe { ffi::glfwGetMonitorPhysicalSize(self.as_raw(), &mut w, &mut h) };
        (w, h)
    }

    pub fn content_scale(self) -> (f32, f32) {
        let (mut x, mut y): (c_float, c_float) = (0.0, 0.0);
        unsafe { ffi::glfwGetMonitorContentScale(self.as_raw(), &mut x, &mut y) };
        (x, y)
    }

    pub fn name(self) -> Option<String> {
        unsafe { marshal::string_from_raw(ffi::glfwGetMonitorName(self.as_raw())) }
    }

    // Sorted by the native side, smallest first.
    pub fn video_modes(self) -> Vec<VideoMode> {
        let mut count: c_int = 0;
        let modes = unsafe { ffi::glfwGetVideoModes(self.as_raw(), &mut count) };
        unsafe { marshal::slice_from_raw(modes, count) }
            .iter()
            .map(VideoMode::from)
            .collect()
    }

    pub fn video_mode(self) -> Option<VideoMode> {
        let mode = unsafe { ffi::glfwGetVideoMode(self.as_raw()) };
        unsafe { mode.as_ref() }.map(VideoMode::from)
    }

    pub fn set_gamma(self, gamma: f32) {
        unsafe { ffi::glfwSetGamma(self.as_raw(), gamma) };
    }

    pub fn gamma_ramp(self) -> Option<GammaRamp> {
        unsafe { GammaRamp::from_raw(ffi::glfwGetGammaRamp(self.as_raw())) }
    }

    // Ramps with uneven or empty channels are rejected without reaching
    // the native side.
    pub fn set_gamma_ramp(self, ramp: &GammaRamp) {
        if !ramp.is_valid() {
            log::warn!(log::channel!("marshal"), "Rejected gamma ramp with channel sizes {}/{}/{}.",
                       ramp.red.len(), ramp.green.len(), ramp.blue.len());
            return;
        }
        let raw = ramp.as_raw();
        unsafe { ffi::glfwSetGammaRamp(self.as_raw(), &raw) };
    }
}

// ----------------------------------------------
// Window
// ----------------------------------------------

impl Window {
    pub fn should_close(self) -> bool {
        from_glfw_bool(unsafe { ffi::glfwWindowShouldClose(self.as_raw()) })
    }

    pub fn set_should_close(self, value: bool) {
        unsafe { ffi::glfwSetWindowShouldClose(self.as_raw(), to_glfw_bool(value)) };
    }

    pub fn set_title(self, title: &str) {
        let title = marshal::to_c_string(title);
        unsafe { ffi::glfwSetWindowTitle(self.as_raw(), title.as_ptr()) };
    }

    // Candidate icon images; the closest in size is picked natively.
    // An empty slice reverts to the default icon.
    pub fn set_icon(self, images: &[Image]) {
        if !images.iter().all(|image| image.validate("window icon")) {
            return;
        }
        let raw: Vec<ffi::GLFWimage> = images.iter().map(Image::as_raw).collect();
        let ptr = if raw.is_empty() { ptr::null() } else { raw.as_ptr() };
        unsafe { ffi::glfwSetWindowIcon(self.as_raw(), raw.len() as c_int, ptr) };
    }

    pub fn pos(self) -> (i32, i32) {
        let (mut x, mut y) = (0, 0);
        unsafe { ffi::glfwGetWindowPos(self.as_raw(), &mut x, &mut y) };
        (x, y)
    }

    pub fn set_pos(self, x: i32, y: i32) {
        unsafe { ffi::glfwSetWindowPos(self.as_raw(), x, y) };
    }

    pub fn size(self) -> (i32, i32) {
        let (mut w, mut h) = (0, 0);
        unsafe { ffi::glfwGetWindowSize(self.as_raw(), &mut w, &mut h) };
        (w, h)
    }

    pub fn set_size(self, width: i32, height: i32) {
        unsafe { ffi::glfwSetWindowSize(self.as_raw(), width, height) };
    }

    // Pass consts::DONT_CARE for any unbounded side.
    pub fn set_size_limits(self, min_width: i32, min_height: i32, max_width: i32, max_height: i32) {
        unsafe { ffi::glfwSetWindowSizeLimits(self.as_raw(), min_width, min_height, max_width, max_height) };
    }

    pub fn set_aspect_ratio(self, numer: i32, denom: i32) {
        unsafe { ffi::glfwSetWindowAspectRatio(self.as_raw(), numer, denom) };
    }

    // In pixels, which may differ from the window size in screen coordinates.
    pub fn framebuffer_size(self) -> (i32, i32) {
        let (mut w, mut h) = (0, 0);
        unsafe { ffi::glfwGetFramebufferSize(self.as_raw(), &mut w, &mut h) };
        (w, h)
    }

    // (left, top, right, bottom) decoration extents.
    pub fn frame_size(self) -> (i32, i32, i32, i32) {
        let (mut l, mut t, mut r, mut b) = (0, 0, 0, 0);
        unsafe { ffi::glfwGetWindowFrameSize(self.as_raw(), &mut l, &mut t, &mut r, &mut b) };
        (l, t, r, b)
    }

    pub fn content_scale(self) -> (f32, f32) {
        let (mut x, mut y): (c_float, c_float) = (0.0, 0.0);
        unsafe { ffi::glfwGetWindowContentScale(self.as_raw(), &mut x, &mut y) };
        (x, y)
    }

    pub fn opacity(self) -> f32 {
        unsafe { ffi::glfwGetWindowOpacity(self.as_raw()) }
    }

    pub fn set_opacity(self, opacity: f32) {
        unsafe { ffi::glfwSetWindowOpacity(self.as_raw(), opacity) };
    }

    pub fn iconify(self) {
        unsafe { ffi::glfwIconifyWindow(self.as_raw()) };
    }

    pub fn restore(self) {
        unsafe { ffi::glfwRestoreWindow(self.as_raw()) };
    }

    pub fn maximize(self) {
        unsafe { ffi::glfwMaximizeWindow(self.as_raw()) };
    }

    pub fn show(self) {
        unsafe { ffi::glfwShowWindow(self.as_raw()) };
    }

    pub fn hide(self) {
        unsafe { ffi::glfwHideWindow(self.as_raw()) };
    }

    pub fn focus(self) {
        unsafe { ffi::glfwFocusWindow(self.as_raw()) };
    }

    pub fn request_attention(self) {
        unsafe { ffi::glfwRequestWindowAttention(self.as_raw()) };
    }

    // The monitor a full screen window is on; None when windowed.
    pub fn monitor(self) -> Option<Monitor> {
        unsafe { Monitor::from_raw(ffi::glfwGetWindowMonitor(self.as_raw())) }
    }

    // Some(monitor) switches to full screen; None back to windowed mode
    // at (x, y).
    pub fn set_monitor(self, monitor: Option<Monitor>, x: i32, y: i32, width: i32, height: i32, refresh_rate: i32) {
        let monitor = monitor.map_or(ptr::null_mut(), Monitor::as_raw);
        unsafe { ffi::glfwSetWindowMonitor(self.as_raw(), monitor, x, y, width, height, refresh_rate) };
    }

    pub fn attrib(self, attrib: Hint) -> i32 {
        unsafe { ffi::glfwGetWindowAttrib(self.as_raw(), attrib.into()) }
    }

    #[inline]
    pub fn attrib_bool(self, attrib: Hint) -> bool {
        from_glfw_bool(self.attrib(attrib))
    }

    // Only Decorated, Resizable, Floating, AutoIconify and FocusOnShow
    // can change after creation.
    pub fn set_attrib(self, attrib: Hint, value: bool) {
        unsafe { ffi::glfwSetWindowAttrib(self.as_raw(), attrib.into(), to_glfw_bool(value)) };
    }

    pub fn user_pointer(self) -> *mut c_void {
        unsafe { ffi::glfwGetWindowUserPointer(self.as_raw()) }
    }

    pub fn set_user_pointer(self, pointer: *mut c_void) {
        unsafe { ffi::glfwSetWindowUserPointer(self.as_raw(), pointer) };
    }

    // ----------------------
    // Input:
    // ----------------------

    pub fn input_mode(self, mode: InputMode) -> i32 {
        unsafe { ffi::glfwGetInputMode(self.as_raw(), mode.into()) }
    }

    pub fn set_input_mode(self, mode: InputMode, value: i32) {
        unsafe { ffi::glfwSetInputMode(self.as_raw(), mode.into(), value) };
    }

    pub fn cursor_mode(self) -> CursorMode {
        CursorMode::try_from(self.input_mode(InputMode::Cursor)).unwrap_or(CursorMode::Normal)
    }

    pub fn set_cursor_mode(self, mode: CursorMode) {
        self.set_input_mode(InputMode::Cursor, mode.into());
    }

    // Last reported state: Press or Release (Repeat is never cached).
    pub fn key(self, key: Key) -> Action {
        let state = unsafe { ffi::glfwGetKey(self.as_raw(), key.into()) };
        Action::try_from(state).unwrap_or(Action::Release)
    }

    pub fn mouse_button(self, button: MouseButton) -> Action {
        let state = unsafe { ffi::glfwGetMouseButton(self.as_raw(), button.into()) };
        Action::try_from(state).unwrap_or(Action::Release)
    }

    pub fn cursor_pos(self) -> (f64, f64) {
        let (mut x, mut y): (c_double, c_double) = (0.0, 0.0);
        unsafe { ffi::glfwGetCursorPos(self.as_raw(), &mut x, &mut y) };
        (x, y)
    }

    pub fn set_cursor_pos(self, x: f64, y: f64) {
        unsafe { ffi::glfwSetCursorPos(self.as_raw(), x, y) };
    }

    // None restores the default arrow.
    pub fn set_cursor(self, cursor: Option<Cursor>) {
        let cursor = cursor.map_or(ptr::null_mut(), Cursor::as_raw);
        unsafe { ffi::glfwSetCursor(self.as_raw(), cursor) };
    }

    // ----------------------
    // Context / clipboard:
    // ----------------------

    pub fn swap_buffers(self) {
        unsafe { ffi::glfwSwapBuffers(self.as_raw()) };
    }

    pub fn set_clipboard_string(self, text: &str) {
        let text = marshal::to_c_string(text);
        unsafe { ffi::glfwSetClipboardString(self.as_raw(), text.as_ptr()) };
    }

    // None if the clipboard is empty or not convertible to text.
    pub fn clipboard_string(self) -> Option<String> {
        unsafe { marshal::string_from_raw(ffi::glfwGetClipboardString(self.as_raw())) }
    }
}
