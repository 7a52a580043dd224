use libc::c_int;

use crate::{
    ffi,
    marshal,
    handle::Cursor,
    types::{GamepadState, Image},
    consts::{Action, JoystickHat, JoystickId, Key, StandardCursor},
    callbacks::{trampolines, JoystickCallback},
    utils::from_glfw_bool,
};

use super::Glfw;

// ----------------------------------------------
// Keyboard / mouse
// ----------------------------------------------

impl Glfw {
    // Layout-specific name of a printable key. With `None` (or
    // Key::Unknown) the key is identified by `scancode` instead.
    pub fn key_name(&self, key: Option<Key>, scancode: i32) -> Option<String> {
        let key = key.unwrap_or(Key::Unknown);
        unsafe { marshal::string_from_raw(ffi::glfwGetKeyName(key.into(), scancode)) }
    }

    // Platform scancode of a key, or None if the key has none.
    pub fn key_scancode(&self, key: Key) -> Option<i32> {
        let scancode = unsafe { ffi::glfwGetKeyScancode(key.into()) };
        (scancode != -1).then_some(scancode)
    }

    pub fn raw_mouse_motion_supported(&self) -> bool {
        from_glfw_bool(unsafe { ffi::glfwRawMouseMotionSupported() })
    }

    // Custom cursor from an RGBA image; the hotspot is in pixels from the
    // top-left corner. Images too small for their stated size are rejected.
    pub fn create_cursor(&self, image: &Image, xhot: i32, yhot: i32) -> Option<Cursor> {
        if !image.validate("cursor") {
            return None;
        }
        let raw = image.as_raw();
        unsafe { Cursor::from_raw(ffi::glfwCreateCursor(&raw, xhot, yhot)) }
    }

    pub fn create_standard_cursor(&self, shape: StandardCursor) -> Option<Cursor> {
        unsafe { Cursor::from_raw(ffi::glfwCreateStandardCursor(shape.into())) }
    }

    // Windows using the cursor revert to the default arrow.
    pub fn destroy_cursor(&self, cursor: Cursor) {
        unsafe { ffi::glfwDestroyCursor(cursor.as_raw()) };
    }
}

// ----------------------------------------------
// Joysticks / gamepads
// ----------------------------------------------

impl Glfw {
    pub fn joystick_present(&self, joystick: JoystickId) -> bool {
        from_glfw_bool(unsafe { ffi::glfwJoystickPresent(joystick.into()) })
    }

    // Each axis in [-1, 1]. Empty if the joystick is not present.
    pub fn joystick_axes(&self, joystick: JoystickId) -> Vec<f32> {
        let mut count: c_int = 0;
        let axes = unsafe { ffi::glfwGetJoystickAxes(joystick.into(), &mut count) };
        unsafe { marshal::slice_from_raw(axes, count) }.to_vec()
    }

    // Unless disabled with InitHint::JoystickHatButtons, hats are also
    // reported here as four buttons each.
    pub fn joystick_buttons(&self, joystick: JoystickId) -> Vec<Action> {
        let mut count: c_int = 0;
        let buttons = unsafe { ffi::glfwGetJoystickButtons(joystick.into(), &mut count) };
        unsafe { marshal::slice_from_raw(buttons, count) }
            .iter()
            .map(|&byte| Action::from_button_byte(byte))
            .collect()
    }

    pub fn joystick_hats(&self, joystick: JoystickId) -> Vec<JoystickHat> {
        let mut count: c_int = 0;
        let hats = unsafe { ffi::glfwGetJoystickHats(joystick.into(), &mut count) };
        unsafe { marshal::slice_from_raw(hats, count) }
            .iter()
            .map(|&bits| JoystickHat::from_bits_truncate(bits))
            .collect()
    }

    pub fn joystick_name(&self, joystick: JoystickId) -> Option<String> {
        unsafe { marshal::string_from_raw(ffi::glfwGetJoystickName(joystick.into())) }
    }

    // SDL compatible GUID as a hex string.
    pub fn joystick_guid(&self, joystick: JoystickId) -> Option<String> {
        unsafe { marshal::string_from_raw(ffi::glfwGetJoystickGUID(joystick.into())) }
    }

    pub fn joystick_is_gamepad(&self, joystick: JoystickId) -> bool {
        from_glfw_bool(unsafe { ffi::glfwJoystickIsGamepad(joystick.into()) })
    }

    pub fn set_joystick_callback(&self, callback: Option<JoystickCallback>) -> Option<JoystickCallback> {
        let installed = callback.is_some();
        let previous = self.registry.borrow_mut().set_callback(|r| &mut r.joystick, callback);
        unsafe {
            if installed {
                ffi::glfwSetJoystickCallback(Some(trampolines::joystick));
            } else {
                ffi::glfwSetJoystickCallback(None);
            }
        }
        previous
    }

    // Adds SDL_GameControllerDB formatted mappings. Invalid lines are
    // reported as errors and skipped.
    pub fn update_gamepad_mappings(&self, mappings: &str) -> bool {
        let mappings = marshal::to_c_string(mappings);
        from_glfw_bool(unsafe { ffi::glfwUpdateGamepadMappings(mappings.as_ptr()) })
    }

    pub fn gamepad_name(&self, joystick: JoystickId) -> Option<String> {
        unsafe { marshal::string_from_raw(ffi::glfwGetGamepadName(joystick.into())) }
    }

    // None if the joystick is absent or has no gamepad mapping.
    pub fn gamepad_state(&self, joystick: JoystickId) -> Option<GamepadState> {
        let mut state = ffi::GLFWgamepadstate::default();
        let ok = unsafe { ffi::glfwGetGamepadState(joystick.into(), &mut state) };
        from_glfw_bool(ok).then(|| GamepadState::from(&state))
    }
}
