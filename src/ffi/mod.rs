// Raw native ABI: struct layouts, callback slot types and entry points.
// Names follow glfw3.h exactly so the C documentation applies directly.
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

use libc::{c_char, c_double, c_float, c_int, c_uchar, c_uint, c_ushort, c_void};

// Native backend selection:
//  - `native` feature: the system GLFW library.
//  - otherwise: the pure-Rust null platform.
#[cfg(feature = "native")]
mod native;
#[cfg(feature = "native")]
pub use native::*;

#[cfg(not(feature = "native"))]
pub mod null;
#[cfg(not(feature = "native"))]
pub use null::{
    glfwInit, glfwTerminate, glfwInitHint, glfwGetVersion, glfwGetVersionString,
    glfwGetError, glfwSetErrorCallback,
    glfwGetMonitors, glfwGetPrimaryMonitor, glfwGetMonitorPos, glfwGetMonitorWorkarea,
    glfwGetMonitorPhysicalSize, glfwGetMonitorContentScale, glfwGetMonitorName,
    glfwSetMonitorCallback, glfwGetVideoModes, glfwGetVideoMode, glfwSetGamma,
    glfwGetGammaRamp, glfwSetGammaRamp,
    glfwDefaultWindowHints, glfwWindowHint, glfwWindowHintString, glfwCreateWindow,
    glfwDestroyWindow, glfwWindowShouldClose, glfwSetWindowShouldClose, glfwSetWindowTitle,
    glfwSetWindowIcon, glfwGetWindowPos, glfwSetWindowPos, glfwGetWindowSize,
    glfwSetWindowSizeLimits, glfwSetWindowAspectRatio, glfwSetWindowSize,
    glfwGetFramebufferSize, glfwGetWindowFrameSize, glfwGetWindowContentScale,
    glfwGetWindowOpacity, glfwSetWindowOpacity, glfwIconifyWindow, glfwRestoreWindow,
    glfwMaximizeWindow, glfwShowWindow, glfwHideWindow, glfwFocusWindow,
    glfwRequestWindowAttention, glfwGetWindowMonitor, glfwSetWindowMonitor,
    glfwGetWindowAttrib, glfwSetWindowAttrib, glfwSetWindowUserPointer,
    glfwGetWindowUserPointer,
    glfwSetWindowPosCallback, glfwSetWindowSizeCallback, glfwSetWindowCloseCallback,
    glfwSetWindowRefreshCallback, glfwSetWindowFocusCallback, glfwSetWindowIconifyCallback,
    glfwSetWindowMaximizeCallback, glfwSetFramebufferSizeCallback,
    glfwSetWindowContentScaleCallback,
    glfwPollEvents, glfwWaitEvents, glfwWaitEventsTimeout, glfwPostEmptyEvent,
    glfwGetInputMode, glfwSetInputMode, glfwRawMouseMotionSupported, glfwGetKeyName,
    glfwGetKeyScancode, glfwGetKey, glfwGetMouseButton, glfwGetCursorPos, glfwSetCursorPos,
    glfwCreateCursor, glfwCreateStandardCursor, glfwDestroyCursor, glfwSetCursor,
    glfwSetKeyCallback, glfwSetCharCallback, glfwSetCharModsCallback,
    glfwSetMouseButtonCallback, glfwSetCursorPosCallback, glfwSetCursorEnterCallback,
    glfwSetScrollCallback, glfwSetDropCallback,
    glfwJoystickPresent, glfwGetJoystickAxes, glfwGetJoystickButtons, glfwGetJoystickHats,
    glfwGetJoystickName, glfwGetJoystickGUID, glfwJoystickIsGamepad, glfwSetJoystickCallback,
    glfwUpdateGamepadMappings, glfwGetGamepadName, glfwGetGamepadState,
    glfwSetClipboardString, glfwGetClipboardString,
    glfwGetTime, glfwSetTime, glfwGetTimerValue, glfwGetTimerFrequency,
    glfwMakeContextCurrent, glfwGetCurrentContext, glfwSwapBuffers, glfwSwapInterval,
    glfwExtensionSupported, glfwGetProcAddress,
    glfwVulkanSupported, glfwGetRequiredInstanceExtensions, glfwGetInstanceProcAddress,
    glfwGetPhysicalDevicePresentationSupport, glfwCreateWindowSurface,
};

// ----------------------------------------------
// Opaque objects
// ----------------------------------------------

#[repr(C)]
pub struct GLFWmonitor {
    _private: [u8; 0],
}

#[repr(C)]
pub struct GLFWwindow {
    _private: [u8; 0],
}

#[repr(C)]
pub struct GLFWcursor {
    _private: [u8; 0],
}

// ----------------------------------------------
// Plain structs
// ----------------------------------------------

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GLFWvidmode {
    pub width: c_int,
    pub height: c_int,
    pub redBits: c_int,
    pub greenBits: c_int,
    pub blueBits: c_int,
    pub refreshRate: c_int,
}

#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct GLFWgammaramp {
    pub red: *mut c_ushort,
    pub green: *mut c_ushort,
    pub blue: *mut c_ushort,
    pub size: c_uint,
}

// Pixels are 8-bit RGBA, left-to-right, top-to-bottom.
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct GLFWimage {
    pub width: c_int,
    pub height: c_int,
    pub pixels: *mut c_uchar,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GLFWgamepadstate {
    pub buttons: [c_uchar; 15],
    pub axes: [c_float; 6],
}

// ----------------------------------------------
// Procedure addresses / Vulkan interop
// ----------------------------------------------

pub type GLFWglproc = Option<unsafe extern "C" fn()>;
pub type GLFWvkproc = Option<unsafe extern "C" fn()>;

pub type VkInstance = *mut c_void;
pub type VkPhysicalDevice = *mut c_void;
pub type VkSurfaceKHR = u64;
pub type VkResult = c_int;

#[repr(C)]
pub struct VkAllocationCallbacks {
    _private: [u8; 0],
}

// ----------------------------------------------
// Callback slots
// ----------------------------------------------

// Process-wide:
pub type GLFWerrorfun = Option<unsafe extern "C" fn(c_int, *const c_char)>;
pub type GLFWmonitorfun = Option<unsafe extern "C" fn(*mut GLFWmonitor, c_int)>;
pub type GLFWjoystickfun = Option<unsafe extern "C" fn(c_int, c_int)>;

// Per-window:
pub type GLFWwindowposfun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_int, c_int)>;
pub type GLFWwindowsizefun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_int, c_int)>;
pub type GLFWwindowclosefun = Option<unsafe extern "C" fn(*mut GLFWwindow)>;
pub type GLFWwindowrefreshfun = Option<unsafe extern "C" fn(*mut GLFWwindow)>;
pub type GLFWwindowfocusfun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_int)>;
pub type GLFWwindowiconifyfun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_int)>;
pub type GLFWwindowmaximizefun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_int)>;
pub type GLFWframebuffersizefun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_int, c_int)>;
pub type GLFWwindowcontentscalefun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_float, c_float)>;
pub type GLFWmousebuttonfun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_int, c_int, c_int)>;
pub type GLFWcursorposfun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_double, c_double)>;
pub type GLFWcursorenterfun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_int)>;
pub type GLFWscrollfun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_double, c_double)>;
pub type GLFWkeyfun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_int, c_int, c_int, c_int)>;
pub type GLFWcharfun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_uint)>;
pub type GLFWcharmodsfun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_uint, c_int)>;
pub type GLFWdropfun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_int, *mut *const c_char)>;
