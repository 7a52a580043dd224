// Safe Rust binding for GLFW 3.3.
//
// Build with the `native` feature to link the system GLFW library. Without
// it every call goes to a headless pure-Rust platform (`null_platform`) that
// keeps the same semantics and lets tests script native events.

pub mod log;
pub mod utils;
pub mod consts;
pub mod error;
pub mod ffi;
pub mod marshal;
pub mod types;
pub mod handle;
pub mod callbacks;
pub mod context;
pub mod config;

pub use context::{Glfw, get_version, get_version_string};
pub use error::{Error, ErrorCode};
pub use handle::{Monitor, Window, Cursor};
pub use types::{VideoMode, GammaRamp, Image, GamepadState};
pub use marshal::DropPaths;
pub use config::{Configs, InitConfig, WindowHints, WindowConfig};
pub use callbacks::{
    log_errors,
    ErrorCallback,
    MonitorCallback,
    JoystickCallback,
    WindowPosCallback,
    WindowSizeCallback,
    WindowCloseCallback,
    WindowRefreshCallback,
    WindowFocusCallback,
    WindowIconifyCallback,
    WindowMaximizeCallback,
    FramebufferSizeCallback,
    WindowContentScaleCallback,
    MouseButtonCallback,
    CursorPosCallback,
    CursorEnterCallback,
    ScrollCallback,
    KeyCallback,
    CharCallback,
    CharModsCallback,
    DropCallback,
};
pub use consts::*;

#[cfg(not(feature = "native"))]
pub use ffi::null as null_platform;
