// Null platform: a pure-Rust stand-in for the native library with the same
// entry points. Nothing reaches a display server. All state is per thread,
// so independent tests never observe each other's windows or callbacks.
//
// Besides the C surface, this module exposes `emit_*` functions that inject
// input and window events the way a real platform backend would (invoking
// whatever native callback pointers are installed), plus a few inspection
// helpers for state the C API has no getter for.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::{CStr, CString};
use std::ptr;
use std::time::Instant;
use libc::{c_char, c_double, c_float, c_int, c_uchar, c_ushort, c_void};

use super::*;
use crate::consts::{self, Hint, InitHint, ClientApi, InputMode, CursorMode, StandardCursor, ConnectionEvent, Key, Modifiers, JoystickHat};
use crate::error::ErrorCode;
use crate::types::Image;
use crate::utils::{from_glfw_bool, to_glfw_bool};

const RELEASE: c_int = 0;
const PRESS: c_int = 1;
const REPEAT: c_int = 2;

// Key/button released while sticky mode was on; reads as a press once.
const STICK: c_int = 3;

const KEY_COUNT: usize = Key::LAST as usize + 1;
const MOUSE_BUTTON_COUNT: usize = 8;
const JOYSTICK_COUNT: usize = 16;
const GAMMA_RAMP_SIZE: usize = 256;

const VERSION_STRING: &CStr = c"3.3.8 Null Rust";
const VK_ERROR_INITIALIZATION_FAILED: VkResult = -3;

// ----------------------------------------------
// Internal errors
// ----------------------------------------------

struct NullError {
    code: c_int,
    description: String,
}

type NullResult<T> = Result<T, NullError>;

fn fail<T>(code: ErrorCode, description: impl Into<String>) -> NullResult<T> {
    Err(NullError { code: code.into(), description: description.into() })
}

#[derive(Default)]
struct ErrorSlot {
    code: c_int,
    // Outlives the code so the pointer handed out by glfwGetError stays valid.
    description: Option<CString>,
}

// ----------------------------------------------
// Monitor
// ----------------------------------------------

struct NullMonitor {
    name: CString,
    modes: Vec<GLFWvidmode>,
    current_mode: GLFWvidmode,
    red: Vec<c_ushort>,
    green: Vec<c_ushort>,
    blue: Vec<c_ushort>,
    ramp: GLFWgammaramp,
}

fn video_mode(width: c_int, height: c_int) -> GLFWvidmode {
    GLFWvidmode { width, height, redBits: 8, greenBits: 8, blueBits: 8, refreshRate: 60 }
}

fn gamma_channel(gamma: c_float, size: usize) -> Vec<c_ushort> {
    let exponent = 1.0 / gamma as f64;
    (0..size)
        .map(|i| {
            let value = i as f64 / (size - 1) as f64;
            (value.powf(exponent) * 65535.0 + 0.5).min(65535.0) as c_ushort
        })
        .collect()
}

impl NullMonitor {
    fn new() -> Box<Self> {
        let modes = vec![
            video_mode(640, 480),
            video_mode(800, 600),
            video_mode(1280, 720),
            video_mode(1920, 1080),
        ];
        let current_mode = modes[modes.len() - 1];
        let linear = gamma_channel(1.0, GAMMA_RAMP_SIZE);
        Box::new(Self {
            name: c"Null Monitor".to_owned(),
            modes,
            current_mode,
            red: linear.clone(),
            green: linear.clone(),
            blue: linear,
            ramp: GLFWgammaramp {
                red: ptr::null_mut(),
                green: ptr::null_mut(),
                blue: ptr::null_mut(),
                size: 0,
            },
        })
    }

    fn handle(&mut self) -> *mut GLFWmonitor {
        self as *mut NullMonitor as *mut GLFWmonitor
    }
}

// ----------------------------------------------
// Window
// ----------------------------------------------

#[derive(Default)]
struct WindowSlots {
    pos: GLFWwindowposfun,
    size: GLFWwindowsizefun,
    close: GLFWwindowclosefun,
    refresh: GLFWwindowrefreshfun,
    focus: GLFWwindowfocusfun,
    iconify: GLFWwindowiconifyfun,
    maximize: GLFWwindowmaximizefun,
    framebuffer_size: GLFWframebuffersizefun,
    content_scale: GLFWwindowcontentscalefun,
    mouse_button: GLFWmousebuttonfun,
    cursor_pos: GLFWcursorposfun,
    cursor_enter: GLFWcursorenterfun,
    scroll: GLFWscrollfun,
    key: GLFWkeyfun,
    char: GLFWcharfun,
    char_mods: GLFWcharmodsfun,
    drop: GLFWdropfun,
}

struct NullWindow {
    title: CString,
    pos: (c_int, c_int),
    size: (c_int, c_int),
    size_limits: [c_int; 4],
    aspect_ratio: (c_int, c_int),
    content_scale: (c_float, c_float),
    opacity: c_float,
    should_close: bool,
    monitor: *mut GLFWmonitor,
    attribs: HashMap<c_int, c_int>,
    user_pointer: *mut c_void,
    cursor_mode: c_int,
    sticky_keys: bool,
    sticky_mouse_buttons: bool,
    lock_key_mods: bool,
    raw_mouse_motion: bool,
    keys: [c_int; KEY_COUNT],
    mouse_buttons: [c_int; MOUSE_BUTTON_COUNT],
    cursor_pos: (c_double, c_double),
    cursor: *mut GLFWcursor,
    icon: Vec<Image>,
    swap_count: u32,
    slots: WindowSlots,
}

impl NullWindow {
    fn new(title: CString, width: c_int, height: c_int, monitor: *mut GLFWmonitor, hints: &HashMap<c_int, c_int>) -> Box<Self> {
        let mut attribs = hints.clone();
        attribs.insert(Hint::Iconified.into(), consts::FALSE);
        attribs.insert(Hint::Hovered.into(), consts::FALSE);
        attribs.insert(Hint::ContextRevision.into(), 0);

        let hint = |h: Hint| hints.get(&i32::from(h)).is_some_and(|&v| from_glfw_bool(v));
        let visible = hint(Hint::Visible);
        let focused = visible && hint(Hint::Focused);
        attribs.insert(Hint::Focused.into(), to_glfw_bool(focused));

        Box::new(Self {
            title,
            pos: (0, 0),
            size: (width, height),
            size_limits: [consts::DONT_CARE; 4],
            aspect_ratio: (consts::DONT_CARE, consts::DONT_CARE),
            content_scale: (1.0, 1.0),
            opacity: 1.0,
            should_close: false,
            monitor,
            attribs,
            user_pointer: ptr::null_mut(),
            cursor_mode: CursorMode::Normal.into(),
            sticky_keys: false,
            sticky_mouse_buttons: false,
            lock_key_mods: false,
            raw_mouse_motion: false,
            keys: [RELEASE; KEY_COUNT],
            mouse_buttons: [RELEASE; MOUSE_BUTTON_COUNT],
            cursor_pos: (0.0, 0.0),
            cursor: ptr::null_mut(),
            icon: Vec::new(),
            swap_count: 0,
            slots: WindowSlots::default(),
        })
    }

    fn handle(&mut self) -> *mut GLFWwindow {
        self as *mut NullWindow as *mut GLFWwindow
    }

    fn attrib(&self, hint: Hint) -> c_int {
        self.attribs.get(&i32::from(hint)).copied().unwrap_or(consts::FALSE)
    }

    fn flag(&self, hint: Hint) -> bool {
        from_glfw_bool(self.attrib(hint))
    }

    fn set_flag(&mut self, hint: Hint, value: bool) {
        self.attribs.insert(hint.into(), to_glfw_bool(value));
    }

    fn has_context(&self) -> bool {
        self.attrib(Hint::ClientApi) != i32::from(ClientApi::NoApi)
    }

    fn mask_mods(&self, mods: c_int) -> c_int {
        if self.lock_key_mods {
            mods
        } else {
            mods & !(Modifiers::CapsLock | Modifiers::NumLock).bits()
        }
    }

    fn clamp_size(&self, width: c_int, height: c_int) -> (c_int, c_int) {
        let [min_w, min_h, max_w, max_h] = self.size_limits;
        let clamp = |value: c_int, min: c_int, max: c_int| {
            let value = if min != consts::DONT_CARE { value.max(min) } else { value };
            if max != consts::DONT_CARE { value.min(max) } else { value }
        };
        let width = clamp(width, min_w, max_w);
        let mut height = clamp(height, min_h, max_h);
        let (numer, denom) = self.aspect_ratio;
        if numer != consts::DONT_CARE && denom != consts::DONT_CARE {
            height = (width * denom / numer).max(1);
        }
        (width, height)
    }
}

// ----------------------------------------------
// Cursor
// ----------------------------------------------

struct NullCursor {
    image: Option<Image>,
    hotspot: (c_int, c_int),
    shape: Option<StandardCursor>,
}

impl NullCursor {
    fn handle(&mut self) -> *mut GLFWcursor {
        self as *mut NullCursor as *mut GLFWcursor
    }
}

// ----------------------------------------------
// Joystick
// ----------------------------------------------

// Scripted joystick contents. Button bytes are Press/Release and hat bytes
// are JoystickHat bits, as the native arrays carry them.
#[derive(Clone, Debug, Default)]
pub struct JoystickDesc {
    pub name: String,
    pub guid: String,
    pub axes: Vec<f32>,
    pub buttons: Vec<u8>,
    pub hats: Vec<u8>,
    // Some makes the joystick a gamepad with this state.
    pub gamepad: Option<GLFWgamepadstate>,
}

struct NullJoystick {
    desc: JoystickDesc,
    // Mappings are matched on the lowercase GUID.
    mapping_key: String,
    name: CString,
    guid: CString,
    gamepad_name: CString,
    button_view: Vec<c_uchar>,
}

impl NullJoystick {
    fn new(desc: JoystickDesc) -> Self {
        let mut joystick = Self {
            mapping_key: desc.guid.to_ascii_lowercase(),
            name: to_c_string(&desc.name),
            guid: to_c_string(&desc.guid),
            gamepad_name: CString::default(),
            button_view: Vec::new(),
            desc,
        };
        joystick.gamepad_name = joystick.name.clone();
        joystick
    }

    fn is_gamepad(&self, mappings: &HashMap<String, CString>) -> bool {
        self.desc.gamepad.is_some() || mappings.contains_key(&self.mapping_key)
    }
}

fn to_c_string(s: &str) -> CString {
    let bytes = s.as_bytes();
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    CString::new(&bytes[..end]).unwrap_or_default()
}

// ----------------------------------------------
// NullState
// ----------------------------------------------

#[derive(Copy, Clone)]
struct InitHints {
    joystick_hat_buttons: bool,
    cocoa_chdir_resources: bool,
    cocoa_menubar: bool,
}

impl Default for InitHints {
    fn default() -> Self {
        Self { joystick_hat_buttons: true, cocoa_chdir_resources: true, cocoa_menubar: true }
    }
}

struct NullState {
    initialized: bool,
    init_hints: InitHints,
    error: ErrorSlot,
    error_callback: GLFWerrorfun,
    monitor_callback: GLFWmonitorfun,
    joystick_callback: GLFWjoystickfun,
    monitor: Option<Box<NullMonitor>>,
    monitor_list: Vec<*mut GLFWmonitor>,
    hints: HashMap<c_int, c_int>,
    string_hints: HashMap<c_int, CString>,
    windows: Vec<Box<NullWindow>>,
    cursors: Vec<Box<NullCursor>>,
    current_context: *mut GLFWwindow,
    swap_interval: c_int,
    clipboard: Option<CString>,
    key_name: CString,
    epoch: Instant,
    timer_offset: u64,
    joysticks: [Option<NullJoystick>; JOYSTICK_COUNT],
    gamepad_mappings: HashMap<String, CString>,
}

thread_local! {
    static STATE: RefCell<NullState> = RefCell::new(NullState::new());
}

fn default_window_hints() -> HashMap<c_int, c_int> {
    let t = consts::TRUE;
    let f = consts::FALSE;
    [
        (Hint::Focused, t), (Hint::Resizable, t), (Hint::Visible, t), (Hint::Decorated, t),
        (Hint::AutoIconify, t), (Hint::Floating, f), (Hint::Maximized, f), (Hint::CenterCursor, t),
        (Hint::TransparentFramebuffer, f), (Hint::FocusOnShow, t), (Hint::ScaleToMonitor, f),
        (Hint::RedBits, 8), (Hint::GreenBits, 8), (Hint::BlueBits, 8), (Hint::AlphaBits, 8),
        (Hint::DepthBits, 24), (Hint::StencilBits, 8),
        (Hint::AccumRedBits, 0), (Hint::AccumGreenBits, 0), (Hint::AccumBlueBits, 0), (Hint::AccumAlphaBits, 0),
        (Hint::AuxBuffers, 0), (Hint::Stereo, f), (Hint::Samples, 0), (Hint::SrgbCapable, f),
        (Hint::RefreshRate, consts::DONT_CARE), (Hint::Doublebuffer, t),
        (Hint::ClientApi, i32::from(ClientApi::OpenGl)),
        (Hint::ContextCreationApi, i32::from(consts::ContextCreationApi::Native)),
        (Hint::ContextVersionMajor, 1), (Hint::ContextVersionMinor, 0),
        (Hint::ContextRobustness, i32::from(consts::ContextRobustness::NoRobustness)),
        (Hint::OpenGlForwardCompat, f), (Hint::OpenGlDebugContext, f),
        (Hint::OpenGlProfile, i32::from(consts::OpenGlProfile::Any)),
        (Hint::ContextReleaseBehavior, i32::from(consts::ContextReleaseBehavior::Any)),
        (Hint::ContextNoError, f),
        (Hint::CocoaRetinaFramebuffer, t), (Hint::CocoaGraphicsSwitching, f),
    ]
    .into_iter()
    .map(|(hint, value)| (i32::from(hint), value))
    .collect()
}

impl NullState {
    fn new() -> Self {
        Self {
            initialized: false,
            init_hints: InitHints::default(),
            error: ErrorSlot::default(),
            error_callback: None,
            monitor_callback: None,
            joystick_callback: None,
            monitor: None,
            monitor_list: Vec::new(),
            hints: default_window_hints(),
            string_hints: HashMap::new(),
            windows: Vec::new(),
            cursors: Vec::new(),
            current_context: ptr::null_mut(),
            swap_interval: 0,
            clipboard: None,
            key_name: CString::default(),
            epoch: Instant::now(),
            timer_offset: 0,
            joysticks: std::array::from_fn(|_| None),
            gamepad_mappings: HashMap::new(),
        }
    }

    // Everything but the pieces that survive termination.
    fn reset(&mut self) {
        let mut fresh = NullState::new();
        fresh.init_hints = self.init_hints;
        fresh.error = std::mem::take(&mut self.error);
        fresh.error_callback = self.error_callback;
        fresh.epoch = self.epoch;
        *self = fresh;
    }

    fn timer_value(&self) -> u64 {
        self.epoch.elapsed().as_nanos() as u64
    }

    fn monitor(&mut self, monitor: *mut GLFWmonitor) -> NullResult<&mut NullMonitor> {
        match self.monitor.as_deref_mut() {
            Some(m) if ptr::eq(&*m, monitor as *const NullMonitor) => Ok(m),
            _ => fail(ErrorCode::InvalidValue, "Invalid monitor handle"),
        }
    }

    fn window(&mut self, window: *mut GLFWwindow) -> NullResult<&mut NullWindow> {
        let target = window as *const NullWindow;
        match self.windows.iter_mut().find(|w| ptr::eq(&***w, target)) {
            Some(w) => Ok(&mut **w),
            None => fail(ErrorCode::InvalidValue, "Invalid window handle"),
        }
    }

    fn has_cursor(&self, cursor: *mut GLFWcursor) -> bool {
        let target = cursor as *const NullCursor;
        self.cursors.iter().any(|c| ptr::eq(&**c, target))
    }

    fn joystick(&mut self, jid: c_int) -> NullResult<Option<&mut NullJoystick>> {
        if jid < 0 || jid as usize >= JOYSTICK_COUNT {
            return fail(ErrorCode::InvalidEnum, format!("Invalid joystick ID {jid}"));
        }
        Ok(self.joysticks[jid as usize].as_mut())
    }

    fn refresh_gamepad_names(&mut self) {
        for joystick in self.joysticks.iter_mut().flatten() {
            joystick.gamepad_name = match self.gamepad_mappings.get(&joystick.mapping_key) {
                Some(name) => name.clone(),
                None => joystick.name.clone(),
            };
        }
    }
}

// ----------------------------------------------
// Helpers
// ----------------------------------------------

fn report(err: NullError) {
    let NullError { code, description } = err;
    let (callback, description) = STATE.with(|state| {
        let mut state = state.borrow_mut();
        state.error = ErrorSlot { code, description: Some(to_c_string(&description)) };
        let description = state.error.description.as_ref().map_or(ptr::null(), |d| d.as_ptr());
        (state.error_callback, description)
    });
    if let Some(callback) = callback {
        unsafe { callback(code, description) }
    }
}

// Runs `f` against an initialized library; errors are reported and
// `default` returned.
fn run<R>(default: R, f: impl FnOnce(&mut NullState) -> NullResult<R>) -> R {
    let result = STATE.with(|state| {
        let mut state = state.borrow_mut();
        if !state.initialized {
            return fail(ErrorCode::NotInitialized, "The GLFW library is not initialized");
        }
        f(&mut state)
    });
    match result {
        Ok(value) => value,
        Err(err) => {
            report(err);
            default
        }
    }
}

fn run_window<R>(window: *mut GLFWwindow, default: R, f: impl FnOnce(&mut NullWindow) -> NullResult<R>) -> R {
    run(default, |state| f(state.window(window)?))
}

unsafe fn write<T>(dest: *mut T, value: T) {
    if !dest.is_null() {
        unsafe { *dest = value }
    }
}

unsafe fn read_image(image: *const GLFWimage) -> NullResult<Image> {
    if image.is_null() {
        return fail(ErrorCode::InvalidValue, "Null image");
    }
    let image = unsafe { &*image };
    if image.width <= 0 || image.height <= 0 || image.pixels.is_null() {
        return fail(ErrorCode::InvalidValue, format!("Invalid image dimensions {}x{}", image.width, image.height));
    }
    let len = image.width as usize * image.height as usize * 4;
    let pixels = unsafe { std::slice::from_raw_parts(image.pixels, len) }.to_vec();
    Ok(Image { width: image.width, height: image.height, pixels })
}

fn is_settable_hint(hint: Hint) -> bool {
    !matches!(hint, Hint::Iconified | Hint::Hovered | Hint::ContextRevision)
}

// ----------------------------------------------
// Initialization, version and errors
// ----------------------------------------------

pub unsafe fn glfwInit() -> c_int {
    STATE.with(|state| {
        let mut state = state.borrow_mut();
        if !state.initialized {
            state.reset();
            let mut monitor = NullMonitor::new();
            state.monitor_list = vec![monitor.handle()];
            state.monitor = Some(monitor);
            state.timer_offset = state.timer_value();
            state.initialized = true;
        }
    });
    consts::TRUE
}

pub unsafe fn glfwTerminate() {
    STATE.with(|state| {
        let mut state = state.borrow_mut();
        if state.initialized {
            state.reset();
        }
    });
}

pub unsafe fn glfwInitHint(hint: c_int, value: c_int) {
    let result = STATE.with(|state| {
        let mut state = state.borrow_mut();
        let value = value != consts::FALSE;
        match InitHint::try_from(hint) {
            Ok(InitHint::JoystickHatButtons) => state.init_hints.joystick_hat_buttons = value,
            Ok(InitHint::CocoaChdirResources) => state.init_hints.cocoa_chdir_resources = value,
            Ok(InitHint::CocoaMenubar) => state.init_hints.cocoa_menubar = value,
            Err(_) => return fail(ErrorCode::InvalidEnum, format!("Invalid init hint 0x{hint:08X}")),
        }
        Ok(())
    });
    if let Err(err) = result {
        report(err);
    }
}

pub unsafe fn glfwGetVersion(major: *mut c_int, minor: *mut c_int, rev: *mut c_int) {
    unsafe {
        write(major, consts::VERSION_MAJOR);
        write(minor, consts::VERSION_MINOR);
        write(rev, consts::VERSION_REVISION);
    }
}

pub unsafe fn glfwGetVersionString() -> *const c_char {
    VERSION_STRING.as_ptr()
}

pub unsafe fn glfwGetError(description: *mut *const c_char) -> c_int {
    STATE.with(|state| {
        let mut state = state.borrow_mut();
        let code = std::mem::take(&mut state.error.code);
        let text = match (&state.error.description, code) {
            (Some(text), code) if code != 0 => text.as_ptr(),
            _ => ptr::null(),
        };
        unsafe { write(description, text) };
        code
    })
}

pub unsafe fn glfwSetErrorCallback(callback: GLFWerrorfun) -> GLFWerrorfun {
    STATE.with(|state| std::mem::replace(&mut state.borrow_mut().error_callback, callback))
}

// ----------------------------------------------
// Monitors
// ----------------------------------------------

pub unsafe fn glfwGetMonitors(count: *mut c_int) -> *mut *mut GLFWmonitor {
    unsafe { write(count, 0) };
    run(ptr::null_mut(), |state| {
        unsafe { write(count, state.monitor_list.len() as c_int) };
        Ok(state.monitor_list.as_mut_ptr())
    })
}

pub unsafe fn glfwGetPrimaryMonitor() -> *mut GLFWmonitor {
    run(ptr::null_mut(), |state| Ok(state.monitor_list.first().copied().unwrap_or(ptr::null_mut())))
}

pub unsafe fn glfwGetMonitorPos(monitor: *mut GLFWmonitor, xpos: *mut c_int, ypos: *mut c_int) {
    unsafe {
        write(xpos, 0);
        write(ypos, 0);
    }
    run((), |state| state.monitor(monitor).map(|_| ()));
}

pub unsafe fn glfwGetMonitorWorkarea(monitor: *mut GLFWmonitor, xpos: *mut c_int, ypos: *mut c_int, width: *mut c_int, height: *mut c_int) {
    unsafe {
        write(xpos, 0);
        write(ypos, 0);
        write(width, 0);
        write(height, 0);
    }
    run((), |state| {
        let mode = state.monitor(monitor)?.current_mode;
        unsafe {
            write(width, mode.width);
            write(height, mode.height);
        }
        Ok(())
    });
}

pub unsafe fn glfwGetMonitorPhysicalSize(monitor: *mut GLFWmonitor, width_mm: *mut c_int, height_mm: *mut c_int) {
    unsafe {
        write(width_mm, 0);
        write(height_mm, 0);
    }
    run((), |state| {
        // Assumes a 96 DPI panel.
        let mode = state.monitor(monitor)?.current_mode;
        unsafe {
            write(width_mm, (mode.width as f32 * 25.4 / 96.0) as c_int);
            write(height_mm, (mode.height as f32 * 25.4 / 96.0) as c_int);
        }
        Ok(())
    });
}

pub unsafe fn glfwGetMonitorContentScale(monitor: *mut GLFWmonitor, xscale: *mut c_float, yscale: *mut c_float) {
    unsafe {
        write(xscale, 0.0);
        write(yscale, 0.0);
    }
    run((), |state| {
        state.monitor(monitor)?;
        unsafe {
            write(xscale, 1.0);
            write(yscale, 1.0);
        }
        Ok(())
    });
}

pub unsafe fn glfwGetMonitorName(monitor: *mut GLFWmonitor) -> *const c_char {
    run(ptr::null(), |state| Ok(state.monitor(monitor)?.name.as_ptr()))
}

pub unsafe fn glfwSetMonitorCallback(callback: GLFWmonitorfun) -> GLFWmonitorfun {
    run(None, |state| Ok(std::mem::replace(&mut state.monitor_callback, callback)))
}

pub unsafe fn glfwGetVideoModes(monitor: *mut GLFWmonitor, count: *mut c_int) -> *const GLFWvidmode {
    unsafe { write(count, 0) };
    run(ptr::null(), |state| {
        let monitor = state.monitor(monitor)?;
        unsafe { write(count, monitor.modes.len() as c_int) };
        Ok(monitor.modes.as_ptr())
    })
}

pub unsafe fn glfwGetVideoMode(monitor: *mut GLFWmonitor) -> *const GLFWvidmode {
    run(ptr::null(), |state| Ok(&state.monitor(monitor)?.current_mode as *const GLFWvidmode))
}

pub unsafe fn glfwSetGamma(monitor: *mut GLFWmonitor, gamma: c_float) {
    run((), |state| {
        let monitor = state.monitor(monitor)?;
        if !gamma.is_finite() || gamma <= 0.0 {
            return fail(ErrorCode::InvalidValue, format!("Invalid gamma value {gamma}"));
        }
        let size = monitor.red.len();
        let channel = gamma_channel(gamma, size);
        monitor.red = channel.clone();
        monitor.green = channel.clone();
        monitor.blue = channel;
        Ok(())
    });
}

pub unsafe fn glfwGetGammaRamp(monitor: *mut GLFWmonitor) -> *const GLFWgammaramp {
    run(ptr::null(), |state| {
        let monitor = state.monitor(monitor)?;
        monitor.ramp = GLFWgammaramp {
            red: monitor.red.as_mut_ptr(),
            green: monitor.green.as_mut_ptr(),
            blue: monitor.blue.as_mut_ptr(),
            size: monitor.red.len() as _,
        };
        Ok(&monitor.ramp as *const GLFWgammaramp)
    })
}

pub unsafe fn glfwSetGammaRamp(monitor: *mut GLFWmonitor, ramp: *const GLFWgammaramp) {
    run((), |state| {
        let monitor = state.monitor(monitor)?;
        if ramp.is_null() {
            return fail(ErrorCode::InvalidValue, "Null gamma ramp");
        }
        let ramp = unsafe { &*ramp };
        let size = ramp.size as usize;
        if size == 0 {
            return fail(ErrorCode::InvalidValue, "Invalid gamma ramp size 0");
        }
        if size != monitor.red.len() {
            return fail(ErrorCode::PlatformError, "Gamma ramp size must match current ramp size");
        }
        unsafe {
            monitor.red = std::slice::from_raw_parts(ramp.red, size).to_vec();
            monitor.green = std::slice::from_raw_parts(ramp.green, size).to_vec();
            monitor.blue = std::slice::from_raw_parts(ramp.blue, size).to_vec();
        }
        Ok(())
    });
}

// ----------------------------------------------
// Window hints / creation
// ----------------------------------------------

pub unsafe fn glfwDefaultWindowHints() {
    run((), |state| {
        state.hints = default_window_hints();
        state.string_hints.clear();
        Ok(())
    });
}

pub unsafe fn glfwWindowHint(hint: c_int, value: c_int) {
    run((), |state| match Hint::try_from(hint) {
        Ok(known) if is_settable_hint(known) => {
            state.hints.insert(hint, value);
            Ok(())
        }
        _ => fail(ErrorCode::InvalidEnum, format!("Invalid window hint 0x{hint:08X}")),
    });
}

pub unsafe fn glfwWindowHintString(hint: c_int, value: *const c_char) {
    run((), |state| {
        if consts::StringHint::try_from(hint).is_err() {
            return fail(ErrorCode::InvalidEnum, format!("Invalid window hint string 0x{hint:08X}"));
        }
        if value.is_null() {
            return fail(ErrorCode::InvalidValue, "Null window hint string");
        }
        state.string_hints.insert(hint, unsafe { CStr::from_ptr(value) }.to_owned());
        Ok(())
    });
}

pub unsafe fn glfwCreateWindow(width: c_int, height: c_int, title: *const c_char, monitor: *mut GLFWmonitor, share: *mut GLFWwindow) -> *mut GLFWwindow {
    run(ptr::null_mut(), |state| {
        if width <= 0 || height <= 0 {
            return fail(ErrorCode::InvalidValue, format!("Invalid window size {width}x{height}"));
        }
        let client_api = state.hints.get(&i32::from(Hint::ClientApi)).copied().unwrap_or_default();
        if ClientApi::try_from(client_api).is_err() {
            return fail(ErrorCode::InvalidEnum, "Invalid client API");
        }
        if !monitor.is_null() {
            state.monitor(monitor)?;
        }
        if !share.is_null() {
            state.window(share)?;
        }

        let title = if title.is_null() {
            CString::default()
        } else {
            unsafe { CStr::from_ptr(title) }.to_owned()
        };

        let mut window = NullWindow::new(title, width, height, monitor, &state.hints);
        if window.flag(Hint::Focused) {
            for other in state.windows.iter_mut() {
                other.set_flag(Hint::Focused, false);
            }
        }

        let handle = window.handle();
        state.windows.push(window);
        Ok(handle)
    })
}

pub unsafe fn glfwDestroyWindow(window: *mut GLFWwindow) {
    if window.is_null() {
        return;
    }
    run((), |state| {
        state.window(window)?;
        let target = window as *const NullWindow;
        state.windows.retain(|w| !ptr::eq(&**w, target));
        if state.current_context == window {
            state.current_context = ptr::null_mut();
        }
        Ok(())
    });
}

// ----------------------------------------------
// Window state
// ----------------------------------------------

pub unsafe fn glfwWindowShouldClose(window: *mut GLFWwindow) -> c_int {
    run_window(window, consts::FALSE, |w| Ok(to_glfw_bool(w.should_close)))
}

pub unsafe fn glfwSetWindowShouldClose(window: *mut GLFWwindow, value: c_int) {
    run_window(window, (), |w| {
        w.should_close = value != consts::FALSE;
        Ok(())
    });
}

pub unsafe fn glfwSetWindowTitle(window: *mut GLFWwindow, title: *const c_char) {
    run_window(window, (), |w| {
        if title.is_null() {
            return fail(ErrorCode::InvalidValue, "Null window title");
        }
        w.title = unsafe { CStr::from_ptr(title) }.to_owned();
        Ok(())
    });
}

pub unsafe fn glfwSetWindowIcon(window: *mut GLFWwindow, count: c_int, images: *const GLFWimage) {
    run_window(window, (), |w| {
        if count < 0 {
            return fail(ErrorCode::InvalidValue, format!("Invalid image count {count}"));
        }
        let mut icon = Vec::with_capacity(count as usize);
        for i in 0..count as usize {
            icon.push(unsafe { read_image(images.add(i))? });
        }
        w.icon = icon;
        Ok(())
    });
}

pub unsafe fn glfwGetWindowPos(window: *mut GLFWwindow, xpos: *mut c_int, ypos: *mut c_int) {
    let pos = run_window(window, (0, 0), |w| Ok(w.pos));
    unsafe {
        write(xpos, pos.0);
        write(ypos, pos.1);
    }
}

pub unsafe fn glfwSetWindowPos(window: *mut GLFWwindow, xpos: c_int, ypos: c_int) {
    emit_window_pos(window, xpos, ypos);
}

pub unsafe fn glfwGetWindowSize(window: *mut GLFWwindow, width: *mut c_int, height: *mut c_int) {
    let size = run_window(window, (0, 0), |w| Ok(w.size));
    unsafe {
        write(width, size.0);
        write(height, size.1);
    }
}

pub unsafe fn glfwSetWindowSizeLimits(window: *mut GLFWwindow, minwidth: c_int, minheight: c_int, maxwidth: c_int, maxheight: c_int) {
    run_window(window, (), |w| {
        let valid_min = |v: c_int| v == consts::DONT_CARE || v >= 0;
        if !valid_min(minwidth) || !valid_min(minheight) {
            return fail(ErrorCode::InvalidValue, format!("Invalid window minimum size {minwidth}x{minheight}"));
        }
        let valid_max = |max: c_int, min: c_int| max == consts::DONT_CARE || (max >= 0 && max >= min);
        if !valid_max(maxwidth, minwidth) || !valid_max(maxheight, minheight) {
            return fail(ErrorCode::InvalidValue, format!("Invalid window maximum size {maxwidth}x{maxheight}"));
        }
        w.size_limits = [minwidth, minheight, maxwidth, maxheight];
        Ok(())
    });
}

pub unsafe fn glfwSetWindowAspectRatio(window: *mut GLFWwindow, numer: c_int, denom: c_int) {
    run_window(window, (), |w| {
        let dont_care = numer == consts::DONT_CARE && denom == consts::DONT_CARE;
        if !dont_care && (numer <= 0 || denom <= 0) {
            return fail(ErrorCode::InvalidValue, format!("Invalid window aspect ratio {numer}:{denom}"));
        }
        w.aspect_ratio = (numer, denom);
        Ok(())
    });
}

pub unsafe fn glfwSetWindowSize(window: *mut GLFWwindow, width: c_int, height: c_int) {
    let (width, height) = run_window(window, (width, height), |w| {
        Ok(if w.monitor.is_null() { w.clamp_size(width, height) } else { (width, height) })
    });
    emit_window_size(window, width, height);
    emit_framebuffer_size(window, width, height);
}

pub unsafe fn glfwGetFramebufferSize(window: *mut GLFWwindow, width: *mut c_int, height: *mut c_int) {
    let size = run_window(window, (0, 0), |w| {
        Ok(((w.size.0 as f32 * w.content_scale.0) as c_int, (w.size.1 as f32 * w.content_scale.1) as c_int))
    });
    unsafe {
        write(width, size.0);
        write(height, size.1);
    }
}

pub unsafe fn glfwGetWindowFrameSize(window: *mut GLFWwindow, left: *mut c_int, top: *mut c_int, right: *mut c_int, bottom: *mut c_int) {
    run_window(window, (), |_| Ok(()));
    unsafe {
        write(left, 0);
        write(top, 0);
        write(right, 0);
        write(bottom, 0);
    }
}

pub unsafe fn glfwGetWindowContentScale(window: *mut GLFWwindow, xscale: *mut c_float, yscale: *mut c_float) {
    let scale = run_window(window, (0.0, 0.0), |w| Ok(w.content_scale));
    unsafe {
        write(xscale, scale.0);
        write(yscale, scale.1);
    }
}

pub unsafe fn glfwGetWindowOpacity(window: *mut GLFWwindow) -> c_float {
    run_window(window, 1.0, |w| Ok(w.opacity))
}

pub unsafe fn glfwSetWindowOpacity(window: *mut GLFWwindow, opacity: c_float) {
    run_window(window, (), |w| {
        if !(0.0..=1.0).contains(&opacity) {
            return fail(ErrorCode::InvalidValue, format!("Invalid window opacity {opacity}"));
        }
        w.opacity = opacity;
        Ok(())
    });
}

pub unsafe fn glfwIconifyWindow(window: *mut GLFWwindow) {
    emit_window_iconify(window, true);
}

pub unsafe fn glfwRestoreWindow(window: *mut GLFWwindow) {
    let (iconified, maximized) = run_window(window, (false, false), |w| {
        Ok((w.flag(Hint::Iconified), w.flag(Hint::Maximized)))
    });
    if iconified {
        emit_window_iconify(window, false);
    } else if maximized {
        emit_window_maximize(window, false);
    }
}

pub unsafe fn glfwMaximizeWindow(window: *mut GLFWwindow) {
    emit_window_maximize(window, true);
}

pub unsafe fn glfwShowWindow(window: *mut GLFWwindow) {
    let focus = run_window(window, false, |w| {
        w.set_flag(Hint::Visible, true);
        Ok(w.flag(Hint::FocusOnShow))
    });
    if focus {
        unsafe { glfwFocusWindow(window) };
    }
}

pub unsafe fn glfwHideWindow(window: *mut GLFWwindow) {
    run_window(window, (), |w| {
        w.set_flag(Hint::Visible, false);
        Ok(())
    });
}

pub unsafe fn glfwFocusWindow(window: *mut GLFWwindow) {
    let events = run(Vec::new(), |state| {
        state.window(window)?;
        let mut events = Vec::new();
        for other in state.windows.iter_mut() {
            let focused = ptr::eq(&**other, window as *const NullWindow);
            if other.flag(Hint::Focused) != focused {
                other.set_flag(Hint::Focused, focused);
                if let Some(callback) = other.slots.focus {
                    events.push((other.handle(), callback, to_glfw_bool(focused)));
                }
            }
        }
        Ok(events)
    });
    // Loss of focus is delivered before gain, like the native backends do.
    let (gained, lost): (Vec<_>, Vec<_>) = events.into_iter().partition(|e| e.2 == consts::TRUE);
    for (handle, callback, focused) in lost.into_iter().chain(gained) {
        unsafe { callback(handle, focused) };
    }
}

pub unsafe fn glfwRequestWindowAttention(window: *mut GLFWwindow) {
    run_window(window, (), |_| Ok(()));
}

pub unsafe fn glfwGetWindowMonitor(window: *mut GLFWwindow) -> *mut GLFWmonitor {
    run_window(window, ptr::null_mut(), |w| Ok(w.monitor))
}

pub unsafe fn glfwSetWindowMonitor(window: *mut GLFWwindow, monitor: *mut GLFWmonitor, xpos: c_int, ypos: c_int, width: c_int, height: c_int, _refresh_rate: c_int) {
    run((), |state| {
        if width <= 0 || height <= 0 {
            return fail(ErrorCode::InvalidValue, format!("Invalid window size {width}x{height}"));
        }
        if !monitor.is_null() {
            state.monitor(monitor)?;
        }
        let w = state.window(window)?;
        w.monitor = monitor;
        w.pos = if monitor.is_null() { (xpos, ypos) } else { (0, 0) };
        w.size = (width, height);
        Ok(())
    });
}

pub unsafe fn glfwGetWindowAttrib(window: *mut GLFWwindow, attrib: c_int) -> c_int {
    run_window(window, 0, |w| {
        match Hint::try_from(attrib) {
            Ok(hint) if hint.is_window_attrib() => Ok(w.attrib(hint)),
            _ => fail(ErrorCode::InvalidEnum, format!("Invalid window attribute 0x{attrib:08X}")),
        }
    })
}

pub unsafe fn glfwSetWindowAttrib(window: *mut GLFWwindow, attrib: c_int, value: c_int) {
    run_window(window, (), |w| match Hint::try_from(attrib) {
        Ok(hint @ (Hint::Decorated | Hint::Resizable | Hint::Floating | Hint::AutoIconify | Hint::FocusOnShow)) => {
            w.set_flag(hint, value != consts::FALSE);
            Ok(())
        }
        _ => fail(ErrorCode::InvalidEnum, format!("Invalid window attribute 0x{attrib:08X}")),
    });
}

pub unsafe fn glfwSetWindowUserPointer(window: *mut GLFWwindow, pointer: *mut c_void) {
    run_window(window, (), |w| {
        w.user_pointer = pointer;
        Ok(())
    });
}

pub unsafe fn glfwGetWindowUserPointer(window: *mut GLFWwindow) -> *mut c_void {
    run_window(window, ptr::null_mut(), |w| Ok(w.user_pointer))
}

// ----------------------------------------------
// Callback slots
// ----------------------------------------------

macro_rules! window_slot_setter {
    ($name:ident, $slot:ident, $fun:ty) => {
        pub unsafe fn $name(window: *mut GLFWwindow, callback: $fun) -> $fun {
            run_window(window, None, |w| Ok(std::mem::replace(&mut w.slots.$slot, callback)))
        }
    };
}

window_slot_setter!(glfwSetWindowPosCallback, pos, GLFWwindowposfun);
window_slot_setter!(glfwSetWindowSizeCallback, size, GLFWwindowsizefun);
window_slot_setter!(glfwSetWindowCloseCallback, close, GLFWwindowclosefun);
window_slot_setter!(glfwSetWindowRefreshCallback, refresh, GLFWwindowrefreshfun);
window_slot_setter!(glfwSetWindowFocusCallback, focus, GLFWwindowfocusfun);
window_slot_setter!(glfwSetWindowIconifyCallback, iconify, GLFWwindowiconifyfun);
window_slot_setter!(glfwSetWindowMaximizeCallback, maximize, GLFWwindowmaximizefun);
window_slot_setter!(glfwSetFramebufferSizeCallback, framebuffer_size, GLFWframebuffersizefun);
window_slot_setter!(glfwSetWindowContentScaleCallback, content_scale, GLFWwindowcontentscalefun);
window_slot_setter!(glfwSetKeyCallback, key, GLFWkeyfun);
window_slot_setter!(glfwSetCharCallback, char, GLFWcharfun);
window_slot_setter!(glfwSetCharModsCallback, char_mods, GLFWcharmodsfun);
window_slot_setter!(glfwSetMouseButtonCallback, mouse_button, GLFWmousebuttonfun);
window_slot_setter!(glfwSetCursorPosCallback, cursor_pos, GLFWcursorposfun);
window_slot_setter!(glfwSetCursorEnterCallback, cursor_enter, GLFWcursorenterfun);
window_slot_setter!(glfwSetScrollCallback, scroll, GLFWscrollfun);
window_slot_setter!(glfwSetDropCallback, drop, GLFWdropfun);

// ----------------------------------------------
// Events
// ----------------------------------------------

// No event source; injected events are delivered as they are emitted.
pub unsafe fn glfwPollEvents() {
    run((), |_| Ok(()));
}

pub unsafe fn glfwWaitEvents() {
    run((), |_| Ok(()));
}

pub unsafe fn glfwWaitEventsTimeout(timeout: c_double) {
    run((), |_| {
        if !timeout.is_finite() || timeout < 0.0 {
            return fail(ErrorCode::InvalidValue, format!("Invalid time {timeout}"));
        }
        Ok(())
    });
}

pub unsafe fn glfwPostEmptyEvent() {
    run((), |_| Ok(()));
}

// ----------------------------------------------
// Input
// ----------------------------------------------

pub unsafe fn glfwGetInputMode(window: *mut GLFWwindow, mode: c_int) -> c_int {
    run_window(window, 0, |w| match InputMode::try_from(mode) {
        Ok(InputMode::Cursor) => Ok(w.cursor_mode),
        Ok(InputMode::StickyKeys) => Ok(to_glfw_bool(w.sticky_keys)),
        Ok(InputMode::StickyMouseButtons) => Ok(to_glfw_bool(w.sticky_mouse_buttons)),
        Ok(InputMode::LockKeyMods) => Ok(to_glfw_bool(w.lock_key_mods)),
        Ok(InputMode::RawMouseMotion) => Ok(to_glfw_bool(w.raw_mouse_motion)),
        Err(_) => fail(ErrorCode::InvalidEnum, format!("Invalid input mode 0x{mode:08X}")),
    })
}

pub unsafe fn glfwSetInputMode(window: *mut GLFWwindow, mode: c_int, value: c_int) {
    run_window(window, (), |w| {
        let enabled = value != consts::FALSE;
        match InputMode::try_from(mode) {
            Ok(InputMode::Cursor) => {
                if CursorMode::try_from(value).is_err() {
                    return fail(ErrorCode::InvalidEnum, format!("Invalid cursor mode 0x{value:08X}"));
                }
                w.cursor_mode = value;
            }
            Ok(InputMode::StickyKeys) => {
                if !enabled {
                    for key in w.keys.iter_mut().filter(|k| **k == STICK) {
                        *key = RELEASE;
                    }
                }
                w.sticky_keys = enabled;
            }
            Ok(InputMode::StickyMouseButtons) => {
                if !enabled {
                    for button in w.mouse_buttons.iter_mut().filter(|b| **b == STICK) {
                        *button = RELEASE;
                    }
                }
                w.sticky_mouse_buttons = enabled;
            }
            Ok(InputMode::LockKeyMods) => w.lock_key_mods = enabled,
            Ok(InputMode::RawMouseMotion) => {
                if enabled {
                    return fail(ErrorCode::PlatformError, "Raw mouse motion is not supported on this system");
                }
                w.raw_mouse_motion = false;
            }
            Err(_) => return fail(ErrorCode::InvalidEnum, format!("Invalid input mode 0x{mode:08X}")),
        }
        Ok(())
    });
}

pub unsafe fn glfwRawMouseMotionSupported() -> c_int {
    run(consts::FALSE, |_| Ok(consts::FALSE))
}

// Scancodes on this platform are the key codes themselves.
pub unsafe fn glfwGetKeyName(key: c_int, scancode: c_int) -> *const c_char {
    run(ptr::null(), |state| {
        let key = if key == i32::from(Key::Unknown) { scancode } else { key };
        let printable = matches!(Key::from(key), k if k.is_printable() && !matches!(k, Key::Space | Key::World1 | Key::World2));
        if !printable {
            return Ok(ptr::null());
        }
        let name = (key as u8 as char).to_ascii_lowercase();
        state.key_name = to_c_string(&name.to_string());
        Ok(state.key_name.as_ptr())
    })
}

pub unsafe fn glfwGetKeyScancode(key: c_int) -> c_int {
    run(-1, |_| {
        if key < i32::from(Key::Space) || key > i32::from(Key::LAST) {
            return fail(ErrorCode::InvalidEnum, format!("Invalid key {key}"));
        }
        Ok(if Key::from(key) == Key::Unknown { -1 } else { key })
    })
}

pub unsafe fn glfwGetKey(window: *mut GLFWwindow, key: c_int) -> c_int {
    run_window(window, RELEASE, |w| {
        if key < i32::from(Key::Space) || key > i32::from(Key::LAST) {
            return fail(ErrorCode::InvalidEnum, format!("Invalid key {key}"));
        }
        let state = &mut w.keys[key as usize];
        if *state == STICK {
            *state = RELEASE;
            return Ok(PRESS);
        }
        Ok(*state)
    })
}

pub unsafe fn glfwGetMouseButton(window: *mut GLFWwindow, button: c_int) -> c_int {
    run_window(window, RELEASE, |w| {
        if button < 0 || button as usize >= MOUSE_BUTTON_COUNT {
            return fail(ErrorCode::InvalidEnum, format!("Invalid mouse button {button}"));
        }
        let state = &mut w.mouse_buttons[button as usize];
        if *state == STICK {
            *state = RELEASE;
            return Ok(PRESS);
        }
        Ok(*state)
    })
}

pub unsafe fn glfwGetCursorPos(window: *mut GLFWwindow, xpos: *mut c_double, ypos: *mut c_double) {
    let pos = run_window(window, (0.0, 0.0), |w| Ok(w.cursor_pos));
    unsafe {
        write(xpos, pos.0);
        write(ypos, pos.1);
    }
}

pub unsafe fn glfwSetCursorPos(window: *mut GLFWwindow, xpos: c_double, ypos: c_double) {
    run_window(window, (), |w| {
        if !xpos.is_finite() || !ypos.is_finite() {
            return fail(ErrorCode::InvalidValue, format!("Invalid cursor position {xpos} {ypos}"));
        }
        w.cursor_pos = (xpos, ypos);
        Ok(())
    });
}

pub unsafe fn glfwCreateCursor(image: *const GLFWimage, xhot: c_int, yhot: c_int) -> *mut GLFWcursor {
    run(ptr::null_mut(), |state| {
        let image = unsafe { read_image(image)? };
        let mut cursor = Box::new(NullCursor { image: Some(image), hotspot: (xhot, yhot), shape: None });
        let handle = cursor.handle();
        state.cursors.push(cursor);
        Ok(handle)
    })
}

pub unsafe fn glfwCreateStandardCursor(shape: c_int) -> *mut GLFWcursor {
    run(ptr::null_mut(), |state| {
        let Ok(shape) = StandardCursor::try_from(shape) else {
            return fail(ErrorCode::InvalidEnum, format!("Invalid standard cursor 0x{shape:08X}"));
        };
        let mut cursor = Box::new(NullCursor { image: None, hotspot: (0, 0), shape: Some(shape) });
        let handle = cursor.handle();
        state.cursors.push(cursor);
        Ok(handle)
    })
}

pub unsafe fn glfwDestroyCursor(cursor: *mut GLFWcursor) {
    if cursor.is_null() {
        return;
    }
    run((), |state| {
        if !state.has_cursor(cursor) {
            return fail(ErrorCode::InvalidValue, "Invalid cursor handle");
        }
        for window in state.windows.iter_mut().filter(|w| w.cursor == cursor) {
            window.cursor = ptr::null_mut();
        }
        let target = cursor as *const NullCursor;
        state.cursors.retain(|c| !ptr::eq(&**c, target));
        Ok(())
    });
}

pub unsafe fn glfwSetCursor(window: *mut GLFWwindow, cursor: *mut GLFWcursor) {
    run((), |state| {
        if !cursor.is_null() && !state.has_cursor(cursor) {
            return fail(ErrorCode::InvalidValue, "Invalid cursor handle");
        }
        state.window(window)?.cursor = cursor;
        Ok(())
    });
}

// ----------------------------------------------
// Joysticks / gamepads
// ----------------------------------------------

pub unsafe fn glfwJoystickPresent(jid: c_int) -> c_int {
    run(consts::FALSE, |state| Ok(to_glfw_bool(state.joystick(jid)?.is_some())))
}

pub unsafe fn glfwGetJoystickAxes(jid: c_int, count: *mut c_int) -> *const c_float {
    unsafe { write(count, 0) };
    run(ptr::null(), |state| {
        let Some(joystick) = state.joystick(jid)? else { return Ok(ptr::null()) };
        unsafe { write(count, joystick.desc.axes.len() as c_int) };
        Ok(joystick.desc.axes.as_ptr())
    })
}

pub unsafe fn glfwGetJoystickButtons(jid: c_int, count: *mut c_int) -> *const c_uchar {
    unsafe { write(count, 0) };
    run(ptr::null(), |state| {
        let hat_buttons = state.init_hints.joystick_hat_buttons;
        let Some(joystick) = state.joystick(jid)? else { return Ok(ptr::null()) };

        // Hats are appended as four buttons each: up, right, down, left.
        let mut view = joystick.desc.buttons.clone();
        if hat_buttons {
            for &hat in &joystick.desc.hats {
                let hat = JoystickHat::from_bits_truncate(hat);
                for direction in [JoystickHat::Up, JoystickHat::Right, JoystickHat::Down, JoystickHat::Left] {
                    view.push(if hat.contains(direction) { PRESS as c_uchar } else { RELEASE as c_uchar });
                }
            }
        }
        joystick.button_view = view;
        unsafe { write(count, joystick.button_view.len() as c_int) };
        Ok(joystick.button_view.as_ptr())
    })
}

pub unsafe fn glfwGetJoystickHats(jid: c_int, count: *mut c_int) -> *const c_uchar {
    unsafe { write(count, 0) };
    run(ptr::null(), |state| {
        let Some(joystick) = state.joystick(jid)? else { return Ok(ptr::null()) };
        unsafe { write(count, joystick.desc.hats.len() as c_int) };
        Ok(joystick.desc.hats.as_ptr())
    })
}

pub unsafe fn glfwGetJoystickName(jid: c_int) -> *const c_char {
    run(ptr::null(), |state| Ok(state.joystick(jid)?.map_or(ptr::null(), |j| j.name.as_ptr())))
}

pub unsafe fn glfwGetJoystickGUID(jid: c_int) -> *const c_char {
    run(ptr::null(), |state| Ok(state.joystick(jid)?.map_or(ptr::null(), |j| j.guid.as_ptr())))
}

pub unsafe fn glfwJoystickIsGamepad(jid: c_int) -> c_int {
    run(consts::FALSE, |state| {
        let present = state.joystick(jid)?.is_some();
        let mappings = &state.gamepad_mappings;
        let gamepad = present && state.joysticks[jid as usize].as_ref().is_some_and(|j| j.is_gamepad(mappings));
        Ok(to_glfw_bool(gamepad))
    })
}

pub unsafe fn glfwSetJoystickCallback(callback: GLFWjoystickfun) -> GLFWjoystickfun {
    run(None, |state| Ok(std::mem::replace(&mut state.joystick_callback, callback)))
}

// Accepts SDL_GameControllerDB lines: `<32 hex guid>,<name>,<bindings...>`.
// Malformed lines are reported and skipped.
fn parse_mappings(text: &str) -> (Vec<(String, String)>, Vec<NullError>) {
    let mut mappings = Vec::new();
    let mut errors = Vec::new();
    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split(',');
        let guid = fields.next().unwrap_or_default();
        let name = fields.next().unwrap_or_default();
        if guid.len() != 32 || !guid.chars().all(|c| c.is_ascii_hexdigit()) || name.is_empty() {
            errors.push(NullError {
                code: ErrorCode::InvalidValue.into(),
                description: format!("Invalid gamepad mapping: {line}"),
            });
            continue;
        }
        mappings.push((guid.to_ascii_lowercase(), name.to_string()));
    }
    (mappings, errors)
}

pub unsafe fn glfwUpdateGamepadMappings(string: *const c_char) -> c_int {
    let text = if string.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(string) }.to_string_lossy().into_owned()
    };
    let (mappings, errors) = parse_mappings(&text);
    let result = run(consts::FALSE, |state| {
        for (guid, name) in mappings {
            state.gamepad_mappings.insert(guid, to_c_string(&name));
        }
        state.refresh_gamepad_names();
        Ok(consts::TRUE)
    });
    if result == consts::TRUE {
        errors.into_iter().for_each(report);
    }
    result
}

pub unsafe fn glfwGetGamepadName(jid: c_int) -> *const c_char {
    run(ptr::null(), |state| {
        let present = state.joystick(jid)?.is_some();
        let mappings = &state.gamepad_mappings;
        Ok(match state.joysticks[jid as usize].as_ref() {
            Some(joystick) if present && joystick.is_gamepad(mappings) => joystick.gamepad_name.as_ptr(),
            _ => ptr::null(),
        })
    })
}

pub unsafe fn glfwGetGamepadState(jid: c_int, state_out: *mut GLFWgamepadstate) -> c_int {
    unsafe { write(state_out, GLFWgamepadstate::default()) };
    run(consts::FALSE, |state| {
        let present = state.joystick(jid)?.is_some();
        let mappings = &state.gamepad_mappings;
        match state.joysticks[jid as usize].as_ref() {
            Some(joystick) if present && joystick.is_gamepad(mappings) => {
                unsafe { write(state_out, joystick.desc.gamepad.unwrap_or_default()) };
                Ok(consts::TRUE)
            }
            _ => Ok(consts::FALSE),
        }
    })
}

// ----------------------------------------------
// Clipboard
// ----------------------------------------------

pub unsafe fn glfwSetClipboardString(_window: *mut GLFWwindow, string: *const c_char) {
    run((), |state| {
        if string.is_null() {
            return fail(ErrorCode::InvalidValue, "Null clipboard string");
        }
        state.clipboard = Some(unsafe { CStr::from_ptr(string) }.to_owned());
        Ok(())
    });
}

pub unsafe fn glfwGetClipboardString(_window: *mut GLFWwindow) -> *const c_char {
    run(ptr::null(), |state| match &state.clipboard {
        Some(text) => Ok(text.as_ptr()),
        None => fail(ErrorCode::FormatUnavailable, "Clipboard is empty"),
    })
}

// ----------------------------------------------
// Time
// ----------------------------------------------

const TIMER_FREQUENCY: u64 = 1_000_000_000;

pub unsafe fn glfwGetTime() -> c_double {
    run(0.0, |state| {
        // The offset wraps when the clock is set ahead of the epoch.
        let ticks = state.timer_value().wrapping_sub(state.timer_offset);
        Ok(ticks as c_double / TIMER_FREQUENCY as c_double)
    })
}

pub unsafe fn glfwSetTime(time: c_double) {
    run((), |state| {
        if !time.is_finite() || !(0.0..=18446744073.0).contains(&time) {
            return fail(ErrorCode::InvalidValue, format!("Invalid time {time}"));
        }
        let ticks = (time * TIMER_FREQUENCY as c_double) as u64;
        state.timer_offset = state.timer_value().wrapping_sub(ticks);
        Ok(())
    });
}

pub unsafe fn glfwGetTimerValue() -> u64 {
    run(0, |state| Ok(state.timer_value()))
}

pub unsafe fn glfwGetTimerFrequency() -> u64 {
    run(0, |_| Ok(TIMER_FREQUENCY))
}

// ----------------------------------------------
// OpenGL context
// ----------------------------------------------

pub unsafe fn glfwMakeContextCurrent(window: *mut GLFWwindow) {
    run((), |state| {
        if !window.is_null() && !state.window(window)?.has_context() {
            return fail(ErrorCode::NoWindowContext, "Cannot make current a window that has no OpenGL or OpenGL ES context");
        }
        state.current_context = window;
        Ok(())
    });
}

pub unsafe fn glfwGetCurrentContext() -> *mut GLFWwindow {
    run(ptr::null_mut(), |state| Ok(state.current_context))
}

pub unsafe fn glfwSwapBuffers(window: *mut GLFWwindow) {
    run_window(window, (), |w| {
        if !w.has_context() {
            return fail(ErrorCode::NoWindowContext, "Cannot swap buffers of a window that has no OpenGL or OpenGL ES context");
        }
        w.swap_count += 1;
        Ok(())
    });
}

pub unsafe fn glfwSwapInterval(interval: c_int) {
    run((), |state| {
        if state.current_context.is_null() {
            return fail(ErrorCode::NoCurrentContext, "Cannot set swap interval without a current OpenGL or OpenGL ES context");
        }
        state.swap_interval = interval;
        Ok(())
    });
}

pub unsafe fn glfwExtensionSupported(extension: *const c_char) -> c_int {
    run(consts::FALSE, |state| {
        if state.current_context.is_null() {
            return fail(ErrorCode::NoCurrentContext, "Cannot query extension without a current OpenGL or OpenGL ES context");
        }
        if extension.is_null() || unsafe { *extension } == 0 {
            return fail(ErrorCode::InvalidValue, "Extension name cannot be an empty string");
        }
        Ok(consts::FALSE)
    })
}

pub unsafe fn glfwGetProcAddress(_procname: *const c_char) -> GLFWglproc {
    run(None, |state| {
        if state.current_context.is_null() {
            return fail(ErrorCode::NoCurrentContext, "Cannot query entry point without a current OpenGL or OpenGL ES context");
        }
        Ok(None)
    })
}

// ----------------------------------------------
// Vulkan
// ----------------------------------------------

fn vulkan_unavailable<T>() -> NullResult<T> {
    fail(ErrorCode::ApiUnavailable, "Vulkan: Loader not found")
}

pub unsafe fn glfwVulkanSupported() -> c_int {
    run(consts::FALSE, |_| Ok(consts::FALSE))
}

pub unsafe fn glfwGetRequiredInstanceExtensions(count: *mut u32) -> *mut *const c_char {
    unsafe { write(count, 0) };
    run(ptr::null_mut(), |_| vulkan_unavailable())
}

pub unsafe fn glfwGetInstanceProcAddress(_instance: VkInstance, _procname: *const c_char) -> GLFWvkproc {
    run(None, |_| vulkan_unavailable())
}

pub unsafe fn glfwGetPhysicalDevicePresentationSupport(_instance: VkInstance, _device: VkPhysicalDevice, _queuefamily: u32) -> c_int {
    run(consts::FALSE, |_| vulkan_unavailable())
}

pub unsafe fn glfwCreateWindowSurface(_instance: VkInstance, window: *mut GLFWwindow, _allocator: *const VkAllocationCallbacks, surface: *mut VkSurfaceKHR) -> VkResult {
    unsafe { write(surface, 0) };
    run(VK_ERROR_INITIALIZATION_FAILED, |state| {
        state.window(window)?;
        vulkan_unavailable()
    })
}

// ----------------------------------------------
// Event injection
// ----------------------------------------------

// Updates the window under the state borrow and hands back what the
// installed callback should be invoked with, if anything.
fn window_event<T>(window: *mut GLFWwindow, f: impl FnOnce(&mut NullWindow) -> Option<T>) -> Option<T> {
    run_window(window, None, |w| Ok(f(w)))
}

pub fn emit_error(code: c_int, description: &str) {
    report(NullError { code, description: description.to_string() });
}

pub fn emit_monitor(event: ConnectionEvent) {
    let pending = run(None, |state| {
        let monitor = state.monitor_list.first().copied().unwrap_or(ptr::null_mut());
        Ok(state.monitor_callback.map(|callback| (callback, monitor)))
    });
    if let Some((callback, monitor)) = pending {
        unsafe { callback(monitor, event.into()) };
    }
}

pub fn emit_window_pos(window: *mut GLFWwindow, xpos: c_int, ypos: c_int) {
    let pending = window_event(window, |w| {
        w.pos = (xpos, ypos);
        w.slots.pos
    });
    if let Some(callback) = pending {
        unsafe { callback(window, xpos, ypos) };
    }
}

pub fn emit_window_size(window: *mut GLFWwindow, width: c_int, height: c_int) {
    let pending = window_event(window, |w| {
        w.size = (width, height);
        w.slots.size
    });
    if let Some(callback) = pending {
        unsafe { callback(window, width, height) };
    }
}

pub fn emit_framebuffer_size(window: *mut GLFWwindow, width: c_int, height: c_int) {
    let pending = window_event(window, |w| w.slots.framebuffer_size);
    if let Some(callback) = pending {
        unsafe { callback(window, width, height) };
    }
}

pub fn emit_window_content_scale(window: *mut GLFWwindow, xscale: c_float, yscale: c_float) {
    let pending = window_event(window, |w| {
        w.content_scale = (xscale, yscale);
        w.slots.content_scale
    });
    if let Some(callback) = pending {
        unsafe { callback(window, xscale, yscale) };
    }
}

// Sets the close flag first; the callback may clear it again.
pub fn emit_window_close(window: *mut GLFWwindow) {
    let pending = window_event(window, |w| {
        w.should_close = true;
        w.slots.close
    });
    if let Some(callback) = pending {
        unsafe { callback(window) };
    }
}

pub fn emit_window_refresh(window: *mut GLFWwindow) {
    let pending = window_event(window, |w| w.slots.refresh);
    if let Some(callback) = pending {
        unsafe { callback(window) };
    }
}

pub fn emit_window_focus(window: *mut GLFWwindow, focused: bool) {
    let pending = window_event(window, |w| {
        w.set_flag(Hint::Focused, focused);
        w.slots.focus
    });
    if let Some(callback) = pending {
        unsafe { callback(window, to_glfw_bool(focused)) };
    }
}

pub fn emit_window_iconify(window: *mut GLFWwindow, iconified: bool) {
    let pending = window_event(window, |w| {
        if w.flag(Hint::Iconified) == iconified {
            return None;
        }
        w.set_flag(Hint::Iconified, iconified);
        if iconified {
            w.set_flag(Hint::Maximized, false);
        }
        w.slots.iconify
    });
    if let Some(callback) = pending {
        unsafe { callback(window, to_glfw_bool(iconified)) };
    }
}

pub fn emit_window_maximize(window: *mut GLFWwindow, maximized: bool) {
    let pending = window_event(window, |w| {
        if w.flag(Hint::Maximized) == maximized {
            return None;
        }
        w.set_flag(Hint::Maximized, maximized);
        w.slots.maximize
    });
    if let Some(callback) = pending {
        unsafe { callback(window, to_glfw_bool(maximized)) };
    }
}

pub fn emit_key(window: *mut GLFWwindow, key: c_int, scancode: c_int, action: c_int, mods: c_int) {
    let pending = window_event(window, |w| {
        let mut action = action;
        if key >= 0 && (key as usize) < KEY_COUNT {
            let state = &mut w.keys[key as usize];
            if action == RELEASE && *state == RELEASE {
                return None;
            }
            let repeated = action == PRESS && *state == PRESS;
            *state = if action == RELEASE && w.sticky_keys {
                STICK
            } else if action == REPEAT {
                PRESS
            } else {
                action
            };
            if repeated {
                action = REPEAT;
            }
        }
        let mods = w.mask_mods(mods);
        w.slots.key.map(|callback| (callback, action, mods))
    });
    if let Some((callback, action, mods)) = pending {
        unsafe { callback(window, key, scancode, action, mods) };
    }
}

pub fn emit_char(window: *mut GLFWwindow, codepoint: u32, mods: c_int) {
    if codepoint < 32 || (codepoint > 126 && codepoint < 160) {
        return;
    }
    let pending = window_event(window, |w| {
        let mods = w.mask_mods(mods);
        let plain = mods & (Modifiers::Control | Modifiers::Alt).bits() == 0;
        Some((if plain { w.slots.char } else { None }, w.slots.char_mods, mods))
    });
    if let Some((char_callback, char_mods_callback, mods)) = pending {
        if let Some(callback) = char_callback {
            unsafe { callback(window, codepoint) };
        }
        if let Some(callback) = char_mods_callback {
            unsafe { callback(window, codepoint, mods) };
        }
    }
}

pub fn emit_mouse_button(window: *mut GLFWwindow, button: c_int, action: c_int, mods: c_int) {
    if button < 0 || button as usize >= MOUSE_BUTTON_COUNT {
        return;
    }
    let pending = window_event(window, |w| {
        w.mouse_buttons[button as usize] = if action == RELEASE && w.sticky_mouse_buttons { STICK } else { action };
        let mods = w.mask_mods(mods);
        w.slots.mouse_button.map(|callback| (callback, mods))
    });
    if let Some((callback, mods)) = pending {
        unsafe { callback(window, button, action, mods) };
    }
}

pub fn emit_cursor_pos(window: *mut GLFWwindow, xpos: c_double, ypos: c_double) {
    let pending = window_event(window, |w| {
        if w.cursor_pos == (xpos, ypos) {
            return None;
        }
        w.cursor_pos = (xpos, ypos);
        w.slots.cursor_pos
    });
    if let Some(callback) = pending {
        unsafe { callback(window, xpos, ypos) };
    }
}

pub fn emit_cursor_enter(window: *mut GLFWwindow, entered: bool) {
    let pending = window_event(window, |w| {
        w.set_flag(Hint::Hovered, entered);
        w.slots.cursor_enter
    });
    if let Some(callback) = pending {
        unsafe { callback(window, to_glfw_bool(entered)) };
    }
}

pub fn emit_scroll(window: *mut GLFWwindow, xoffset: c_double, yoffset: c_double) {
    let pending = window_event(window, |w| w.slots.scroll);
    if let Some(callback) = pending {
        unsafe { callback(window, xoffset, yoffset) };
    }
}

pub fn emit_drop(window: *mut GLFWwindow, paths: &[&str]) {
    let pending = window_event(window, |w| w.slots.drop);
    if let Some(callback) = pending {
        let owned: Vec<CString> = paths.iter().map(|p| to_c_string(p)).collect();
        let mut raw: Vec<*const c_char> = owned.iter().map(|p| p.as_ptr()).collect();
        unsafe { callback(window, raw.len() as c_int, raw.as_mut_ptr()) };
    }
}

// ----------------------------------------------
// Joystick scripting
// ----------------------------------------------

pub fn connect_joystick(jid: c_int, desc: JoystickDesc) {
    let pending = run(None, |state| {
        let replaced = state.joystick(jid)?.is_some();
        let mut joystick = NullJoystick::new(desc);
        if let Some(name) = state.gamepad_mappings.get(&joystick.mapping_key) {
            joystick.gamepad_name = name.clone();
        }
        state.joysticks[jid as usize] = Some(joystick);
        Ok(if replaced { None } else { state.joystick_callback })
    });
    if let Some(callback) = pending {
        unsafe { callback(jid, ConnectionEvent::Connected.into()) };
    }
}

pub fn disconnect_joystick(jid: c_int) {
    let pending = run(None, |state| {
        let present = state.joystick(jid)?.is_some();
        state.joysticks[jid as usize] = None;
        Ok(if present { state.joystick_callback } else { None })
    });
    if let Some(callback) = pending {
        unsafe { callback(jid, ConnectionEvent::Disconnected.into()) };
    }
}

// Changes the live contents of a connected joystick (axes moved, buttons
// pressed, and so on). Returns false if nothing is connected at `jid`.
pub fn update_joystick(jid: c_int, f: impl FnOnce(&mut JoystickDesc)) -> bool {
    run(false, |state| {
        let Some(joystick) = state.joystick(jid)? else { return Ok(false) };
        f(&mut joystick.desc);
        Ok(true)
    })
}

// ----------------------------------------------
// Inspection
// ----------------------------------------------

// No getter exists natively for these.

pub fn window_title(window: *mut GLFWwindow) -> Option<String> {
    run_window(window, None, |w| Ok(Some(w.title.to_string_lossy().into_owned())))
}

pub fn window_icon(window: *mut GLFWwindow) -> Vec<Image> {
    run_window(window, Vec::new(), |w| Ok(w.icon.clone()))
}

pub fn window_cursor(window: *mut GLFWwindow) -> *mut GLFWcursor {
    run_window(window, ptr::null_mut(), |w| Ok(w.cursor))
}

pub fn swap_count(window: *mut GLFWwindow) -> u32 {
    run_window(window, 0, |w| Ok(w.swap_count))
}

pub fn swap_interval() -> c_int {
    run(0, |state| Ok(state.swap_interval))
}

pub fn window_count() -> usize {
    run(0, |state| Ok(state.windows.len()))
}

// Image and hotspot of a custom cursor; None for standard cursors.
pub fn cursor_image(cursor: *mut GLFWcursor) -> Option<(Image, (c_int, c_int))> {
    run(None, |state| {
        let target = cursor as *const NullCursor;
        match state.cursors.iter().find(|c| ptr::eq(&***c, target)) {
            Some(c) => Ok(c.image.clone().map(|image| (image, c.hotspot))),
            None => fail(ErrorCode::InvalidValue, "Invalid cursor handle"),
        }
    })
}

pub fn cursor_shape(cursor: *mut GLFWcursor) -> Option<StandardCursor> {
    run(None, |state| {
        let target = cursor as *const NullCursor;
        Ok(state.cursors.iter().find(|c| ptr::eq(&***c, target)).and_then(|c| c.shape))
    })
}

pub fn window_hint_string(hint: c_int) -> Option<String> {
    run(None, |state| Ok(state.string_hints.get(&hint).map(|s| s.to_string_lossy().into_owned())))
}

pub fn is_initialized() -> bool {
    STATE.with(|state| state.borrow().initialized)
}

// ----------------------------------------------
// Unit Tests
// ----------------------------------------------

#[test]
fn test_linear_gamma_spans_full_range() {
    let channel = gamma_channel(1.0, GAMMA_RAMP_SIZE);
    assert_eq!(channel.len(), 256);
    assert_eq!(channel[0], 0);
    assert_eq!(channel[1], 257);
    assert_eq!(channel[255], 65535);
}

#[test]
fn test_parse_mappings_skips_malformed_lines() {
    let text = "\
        # comment\n\
        03000000de280000ff11000001000000,Steam Virtual Gamepad,a:b0,b:b1,platform:Linux,\n\
        not-a-guid,Broken,a:b0\n\
        \n";
    let (mappings, errors) = parse_mappings(text);
    assert_eq!(mappings, vec![("03000000de280000ff11000001000000".to_string(), "Steam Virtual Gamepad".to_string())]);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, i32::from(ErrorCode::InvalidValue));
}

#[test]
fn test_calls_before_init_report_not_initialized() {
    unsafe {
        glfwTerminate();
        assert!(glfwCreateWindow(640, 480, c"x".as_ptr(), ptr::null_mut(), ptr::null_mut()).is_null());
        assert_eq!(glfwGetError(ptr::null_mut()), i32::from(ErrorCode::NotInitialized));
        assert_eq!(glfwGetError(ptr::null_mut()), 0);
    }
}
