use libc::{c_char, c_double, c_float, c_int, c_void};
use super::*;

#[link(name = "glfw")]
unsafe extern "C" {
    // Initialization, version and errors:
    pub fn glfwInit() -> c_int;
    pub fn glfwTerminate();
    pub fn glfwInitHint(hint: c_int, value: c_int);
    pub fn glfwGetVersion(major: *mut c_int, minor: *mut c_int, rev: *mut c_int);
    pub fn glfwGetVersionString() -> *const c_char;
    pub fn glfwGetError(description: *mut *const c_char) -> c_int;
    pub fn glfwSetErrorCallback(callback: GLFWerrorfun) -> GLFWerrorfun;

    // Monitors:
    pub fn glfwGetMonitors(count: *mut c_int) -> *mut *mut GLFWmonitor;
    pub fn glfwGetPrimaryMonitor() -> *mut GLFWmonitor;
    pub fn glfwGetMonitorPos(monitor: *mut GLFWmonitor, xpos: *mut c_int, ypos: *mut c_int);
    pub fn glfwGetMonitorWorkarea(monitor: *mut GLFWmonitor, xpos: *mut c_int, ypos: *mut c_int, width: *mut c_int, height: *mut c_int);
    pub fn glfwGetMonitorPhysicalSize(monitor: *mut GLFWmonitor, width_mm: *mut c_int, height_mm: *mut c_int);
    pub fn glfwGetMonitorContentScale(monitor: *mut GLFWmonitor, xscale: *mut c_float, yscale: *mut c_float);
    pub fn glfwGetMonitorName(monitor: *mut GLFWmonitor) -> *const c_char;
    pub fn glfwSetMonitorCallback(callback: GLFWmonitorfun) -> GLFWmonitorfun;
    pub fn glfwGetVideoModes(monitor: *mut GLFWmonitor, count: *mut c_int) -> *const GLFWvidmode;
    pub fn glfwGetVideoMode(monitor: *mut GLFWmonitor) -> *const GLFWvidmode;
    pub fn glfwSetGamma(monitor: *mut GLFWmonitor, gamma: c_float);
    pub fn glfwGetGammaRamp(monitor: *mut GLFWmonitor) -> *const GLFWgammaramp;
    pub fn glfwSetGammaRamp(monitor: *mut GLFWmonitor, ramp: *const GLFWgammaramp);

    // Windows:
    pub fn glfwDefaultWindowHints();
    pub fn glfwWindowHint(hint: c_int, value: c_int);
    pub fn glfwWindowHintString(hint: c_int, value: *const c_char);
    pub fn glfwCreateWindow(width: c_int, height: c_int, title: *const c_char, monitor: *mut GLFWmonitor, share: *mut GLFWwindow) -> *mut GLFWwindow;
    pub fn glfwDestroyWindow(window: *mut GLFWwindow);
    pub fn glfwWindowShouldClose(window: *mut GLFWwindow) -> c_int;
    pub fn glfwSetWindowShouldClose(window: *mut GLFWwindow, value: c_int);
    pub fn glfwSetWindowTitle(window: *mut GLFWwindow, title: *const c_char);
    pub fn glfwSetWindowIcon(window: *mut GLFWwindow, count: c_int, images: *const GLFWimage);
    pub fn glfwGetWindowPos(window: *mut GLFWwindow, xpos: *mut c_int, ypos: *mut c_int);
    pub fn glfwSetWindowPos(window: *mut GLFWwindow, xpos: c_int, ypos: c_int);
    pub fn glfwGetWindowSize(window: *mut GLFWwindow, width: *mut c_int, height: *mut c_int);
    pub fn glfwSetWindowSizeLimits(window: *mut GLFWwindow, minwidth: c_int, minheight: c_int, maxwidth: c_int, maxheight: c_int);
    pub fn glfwSetWindowAspectRatio(window: *mut GLFWwindow, numer: c_int, denom: c_int);
    pub fn glfwSetWindowSize(window: *mut GLFWwindow, width: c_int, height: c_int);
    pub fn glfwGetFramebufferSize(window: *mut GLFWwindow, width: *mut c_int, height: *mut c_int);
    pub fn glfwGetWindowFrameSize(window: *mut GLFWwindow, left: *mut c_int, top: *mut c_int, right: *mut c_int, bottom: *mut c_int);
    pub fn glfwGetWindowContentScale(window: *mut GLFWwindow, xscale: *mut c_float, yscale: *mut c_float);
    pub fn glfwGetWindowOpacity(window: *mut GLFWwindow) -> c_float;
    pub fn glfwSetWindowOpacity(window: *mut GLFWwindow, opacity: c_float);
    pub fn glfwIconifyWindow(window: *mut GLFWwindow);
    pub fn glfwRestoreWindow(window: *mut GLFWwindow);
    pub fn glfwMaximizeWindow(window: *mut GLFWwindow);
    pub fn glfwShowWindow(window: *mut GLFWwindow);
    pub fn glfwHideWindow(window: *mut GLFWwindow);
    pub fn glfwFocusWindow(window: *mut GLFWwindow);
    pub fn glfwRequestWindowAttention(window: *mut GLFWwindow);
    pub fn glfwGetWindowMonitor(window: *mut GLFWwindow) -> *mut GLFWmonitor;
    pub fn glfwSetWindowMonitor(window: *mut GLFWwindow, monitor: *mut GLFWmonitor, xpos: c_int, ypos: c_int, width: c_int, height: c_int, refresh_rate: c_int);
    pub fn glfwGetWindowAttrib(window: *mut GLFWwindow, attrib: c_int) -> c_int;
    pub fn glfwSetWindowAttrib(window: *mut GLFWwindow, attrib: c_int, value: c_int);
    pub fn glfwSetWindowUserPointer(window: *mut GLFWwindow, pointer: *mut c_void);
    pub fn glfwGetWindowUserPointer(window: *mut GLFWwindow) -> *mut c_void;

    // Window callbacks:
    pub fn glfwSetWindowPosCallback(window: *mut GLFWwindow, callback: GLFWwindowposfun) -> GLFWwindowposfun;
    pub fn glfwSetWindowSizeCallback(window: *mut GLFWwindow, callback: GLFWwindowsizefun) -> GLFWwindowsizefun;
    pub fn glfwSetWindowCloseCallback(window: *mut GLFWwindow, callback: GLFWwindowclosefun) -> GLFWwindowclosefun;
    pub fn glfwSetWindowRefreshCallback(window: *mut GLFWwindow, callback: GLFWwindowrefreshfun) -> GLFWwindowrefreshfun;
    pub fn glfwSetWindowFocusCallback(window: *mut GLFWwindow, callback: GLFWwindowfocusfun) -> GLFWwindowfocusfun;
    pub fn glfwSetWindowIconifyCallback(window: *mut GLFWwindow, callback: GLFWwindowiconifyfun) -> GLFWwindowiconifyfun;
    pub fn glfwSetWindowMaximizeCallback(window: *mut GLFWwindow, callback: GLFWwindowmaximizefun) -> GLFWwindowmaximizefun;
    pub fn glfwSetFramebufferSizeCallback(window: *mut GLFWwindow, callback: GLFWframebuffersizefun) -> GLFWframebuffersizefun;
    pub fn glfwSetWindowContentScaleCallback(window: *mut GLFWwindow, callback: GLFWwindowcontentscalefun) -> GLFWwindowcontentscalefun;

    // Events:
    pub fn glfwPollEvents();
    pub fn glfwWaitEvents();
    pub fn glfwWaitEventsTimeout(timeout: c_double);
    pub fn glfwPostEmptyEvent();

    // Input:
    pub fn glfwGetInputMode(window: *mut GLFWwindow, mode: c_int) -> c_int;
    pub fn glfwSetInputMode(window: *mut GLFWwindow, mode: c_int, value: c_int);
    pub fn glfwRawMouseMotionSupported() -> c_int;
    pub fn glfwGetKeyName(key: c_int, scancode: c_int) -> *const c_char;
    pub fn glfwGetKeyScancode(key: c_int) -> c_int;
    pub fn glfwGetKey(window: *mut GLFWwindow, key: c_int) -> c_int;
    pub fn glfwGetMouseButton(window: *mut GLFWwindow, button: c_int) -> c_int;
    pub fn glfwGetCursorPos(window: *mut GLFWwindow, xpos: *mut c_double, ypos: *mut c_double);
    pub fn glfwSetCursorPos(window: *mut GLFWwindow, xpos: c_double, ypos: c_double);
    pub fn glfwCreateCursor(image: *const GLFWimage, xhot: c_int, yhot: c_int) -> *mut GLFWcursor;
    pub fn glfwCreateStandardCursor(shape: c_int) -> *mut GLFWcursor;
    pub fn glfwDestroyCursor(cursor: *mut GLFWcursor);
    pub fn glfwSetCursor(window: *mut GLFWwindow, cursor: *mut GLFWcursor);

    // Input callbacks:
    pub fn glfwSetKeyCallback(window: *mut GLFWwindow, callback: GLFWkeyfun) -> GLFWkeyfun;
    pub fn glfwSetCharCallback(window: *mut GLFWwindow, callback: GLFWcharfun) -> GLFWcharfun;
    pub fn glfwSetCharModsCallback(window: *mut GLFWwindow, callback: GLFWcharmodsfun) -> GLFWcharmodsfun;
    pub fn glfwSetMouseButtonCallback(window: *mut GLFWwindow, callback: GLFWmousebuttonfun) -> GLFWmousebuttonfun;
    pub fn glfwSetCursorPosCallback(window: *mut GLFWwindow, callback: GLFWcursorposfun) -> GLFWcursorposfun;
    pub fn glfwSetCursorEnterCallback(window: *mut GLFWwindow, callback: GLFWcursorenterfun) -> GLFWcursorenterfun;
    pub fn glfwSetScrollCallback(window: *mut GLFWwindow, callback: GLFWscrollfun) -> GLFWscrollfun;
    pub fn glfwSetDropCallback(window: *mut GLFWwindow, callback: GLFWdropfun) -> GLFWdropfun;

    // Joysticks / gamepads:
    pub fn glfwJoystickPresent(jid: c_int) -> c_int;
    pub fn glfwGetJoystickAxes(jid: c_int, count: *mut c_int) -> *const c_float;
    pub fn glfwGetJoystickButtons(jid: c_int, count: *mut c_int) -> *const u8;
    pub fn glfwGetJoystickHats(jid: c_int, count: *mut c_int) -> *const u8;
    pub fn glfwGetJoystickName(jid: c_int) -> *const c_char;
    pub fn glfwGetJoystickGUID(jid: c_int) -> *const c_char;
    pub fn glfwJoystickIsGamepad(jid: c_int) -> c_int;
    pub fn glfwSetJoystickCallback(callback: GLFWjoystickfun) -> GLFWjoystickfun;
    pub fn glfwUpdateGamepadMappings(string: *const c_char) -> c_int;
    pub fn glfwGetGamepadName(jid: c_int) -> *const c_char;
    pub fn glfwGetGamepadState(jid: c_int, state: *mut GLFWgamepadstate) -> c_int;

    // Clipboard:
    pub fn glfwSetClipboardString(window: *mut GLFWwindow, string: *const c_char);
    pub fn glfwGetClipboardString(window: *mut GLFWwindow) -> *const c_char;

    // Time:
    pub fn glfwGetTime() -> c_double;
    pub fn glfwSetTime(time: c_double);
    pub fn glfwGetTimerValue() -> u64;
    pub fn glfwGetTimerFrequency() -> u64;

    // OpenGL context:
    pub fn glfwMakeContextCurrent(window: *mut GLFWwindow);
    pub fn glfwGetCurrentContext() -> *mut GLFWwindow;
    pub fn glfwSwapBuffers(window: *mut GLFWwindow);
    pub fn glfwSwapInterval(interval: c_int);
    pub fn glfwExtensionSupported(extension: *const c_char) -> c_int;
    pub fn glfwGetProcAddress(procname: *const c_char) -> GLFWglproc;

    // Vulkan:
    pub fn glfwVulkanSupported() -> c_int;
    pub fn glfwGetRequiredInstanceExtensions(count: *mut u32) -> *mut *const c_char;
    pub fn glfwGetInstanceProcAddress(instance: VkInstance, procname: *const c_char) -> GLFWvkproc;
    pub fn glfwGetPhysicalDevicePresentationSupport(instance: VkInstance, device: VkPhysicalDevice, queuefamily: u32) -> c_int;
    pub fn glfwCreateWindowSurface(instance: VkInstance, window: *mut GLFWwindow, allocator: *const VkAllocationCallbacks, surface: *mut VkSurfaceKHR) -> VkResult;
}

