use std::path::Path;
use serde::{Serialize, Deserialize, de::DeserializeOwned};

use crate::{
    log,
    error::Error,
    context::Glfw,
    handle::Window,
    consts::{
        self,
        Hint,
        StringHint,
        InitHint,
        ClientApi,
        ContextCreationApi,
        ContextRobustness,
        ContextReleaseBehavior,
        OpenGlProfile,
    },
};

// ----------------------------------------------
// Configs
// ----------------------------------------------

pub trait Configs {
    // Fix up values after loading, e.g. clamp out of range fields.
    fn post_load(&mut self) {
    }

    // Saves current configs as pretty JSON. Parent directories are created.
    fn save_file(&self, path: &Path) -> bool
        where Self: Sized + Serialize
    {
        if let Some(dir) = path.parent() {
            // Fails harmlessly if the directory already exists.
            let _ = std::fs::create_dir_all(dir);
        }

        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(err) => {
                log::error!(log::channel!("config"), "Failed to serialize config file {path:?}: {err}");
                return false;
            }
        };

        if let Err(err) = std::fs::write(path, json) {
            log::error!(log::channel!("config"), "Failed to write config file {path:?}: {err}");
            return false;
        }

        true
    }

    // Either succeeds loading the config file or returns a default config.
    fn load_file(path: &Path) -> Self
        where Self: Sized + Default + DeserializeOwned
    {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                log::error!(log::channel!("config"), "Failed to read config file from path {path:?}: {err}");
                return Self::default();
            }
        };

        match serde_json::from_str::<Self>(&json) {
            Ok(mut configs) => {
                configs.post_load();
                configs
            }
            Err(err) => {
                log::error!(log::channel!("config"), "Failed to deserialize config file from path {path:?}: {err}");
                Self::default()
            }
        }
    }
}

// ----------------------------------------------
// InitConfig
// ----------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)] // Missing fields get defaults from InitConfig::default().
pub struct InitConfig {
    pub joystick_hat_buttons: bool,
    // macOS only:
    pub cocoa_chdir_resources: bool,
    pub cocoa_menubar: bool,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            joystick_hat_buttons: true,
            cocoa_chdir_resources: true,
            cocoa_menubar: true,
        }
    }
}

impl Configs for InitConfig {}

impl InitConfig {
    // Issues the init hints. Only has an effect before Glfw::init.
    pub fn apply(&self) {
        Glfw::init_hint(InitHint::JoystickHatButtons, self.joystick_hat_buttons);
        Glfw::init_hint(InitHint::CocoaChdirResources, self.cocoa_chdir_resources);
        Glfw::init_hint(InitHint::CocoaMenubar, self.cocoa_menubar);
    }

    pub fn init(&self) -> Result<Glfw, Error> {
        self.apply();
        Glfw::init()
    }
}

// ----------------------------------------------
// WindowHints
// ----------------------------------------------

// Every window creation hint, defaulting to the native defaults.
// Integer hints accept consts::DONT_CARE.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowHints {
    // Window:
    pub resizable: bool,
    pub visible: bool,
    pub decorated: bool,
    pub focused: bool,
    pub auto_iconify: bool,
    pub floating: bool,
    pub maximized: bool,
    pub center_cursor: bool,
    pub transparent_framebuffer: bool,
    pub focus_on_show: bool,
    pub scale_to_monitor: bool,

    // Framebuffer:
    pub red_bits: i32,
    pub green_bits: i32,
    pub blue_bits: i32,
    pub alpha_bits: i32,
    pub depth_bits: i32,
    pub stencil_bits: i32,
    pub accum_red_bits: i32,
    pub accum_green_bits: i32,
    pub accum_blue_bits: i32,
    pub accum_alpha_bits: i32,
    pub aux_buffers: i32,
    pub samples: i32,
    pub refresh_rate: i32,
    pub stereo: bool,
    pub srgb_capable: bool,
    pub doublebuffer: bool,

    // Context:
    pub client_api: ClientApi,
    pub context_creation_api: ContextCreationApi,
    pub context_version_major: i32,
    pub context_version_minor: i32,
    pub context_robustness: ContextRobustness,
    pub context_release_behavior: ContextReleaseBehavior,
    pub context_no_error: bool,
    pub opengl_forward_compat: bool,
    pub opengl_debug_context: bool,
    pub opengl_profile: OpenGlProfile,

    // Platform specific:
    pub cocoa_retina_framebuffer: bool,
    pub cocoa_graphics_switching: bool,
    pub cocoa_frame_name: Option<String>,
    pub x11_class_name: Option<String>,
    pub x11_instance_name: Option<String>,
}

impl Default for WindowHints {
    fn default() -> Self {
        Self {
            // Window:
            resizable: true,
            visible: true,
            decorated: true,
            focused: true,
            auto_iconify: true,
            floating: false,
            maximized: false,
            center_cursor: true,
            transparent_framebuffer: false,
            focus_on_show: true,
            scale_to_monitor: false,

            // Framebuffer:
            red_bits: 8,
            green_bits: 8,
            blue_bits: 8,
            alpha_bits: 8,
            depth_bits: 24,
            stencil_bits: 8,
            accum_red_bits: 0,
            accum_green_bits: 0,
            accum_blue_bits: 0,
            accum_alpha_bits: 0,
            aux_buffers: 0,
            samples: 0,
            refresh_rate: consts::DONT_CARE,
            stereo: false,
            srgb_capable: false,
            doublebuffer: true,

            // Context:
            client_api: ClientApi::OpenGl,
            context_creation_api: ContextCreationApi::Native,
            context_version_major: 1,
            context_version_minor: 0,
            context_robustness: ContextRobustness::NoRobustness,
            context_release_behavior: ContextReleaseBehavior::Any,
            context_no_error: false,
            opengl_forward_compat: false,
            opengl_debug_context: false,
            opengl_profile: OpenGlProfile::Any,

            // Platform specific:
            cocoa_retina_framebuffer: true,
            cocoa_graphics_switching: false,
            cocoa_frame_name: None,
            x11_class_name: None,
            x11_instance_name: None,
        }
    }
}

impl Configs for WindowHints {
    fn post_load(&mut self) {
        if self.context_version_major < 1 {
            log::warn!(log::channel!("config"), "Invalid context version {}.{}, using 1.0.",
                       self.context_version_major, self.context_version_minor);
            self.context_version_major = 1;
            self.context_version_minor = 0;
        }
    }
}

impl WindowHints {
    // Resets the hints to the native defaults then issues every field.
    pub fn apply(&self, glfw: &Glfw) {
        glfw.default_window_hints();

        let flags = [
            (Hint::Resizable, self.resizable),
            (Hint::Visible, self.visible),
            (Hint::Decorated, self.decorated),
            (Hint::Focused, self.focused),
            (Hint::AutoIconify, self.auto_iconify),
            (Hint::Floating, self.floating),
            (Hint::Maximized, self.maximized),
            (Hint::CenterCursor, self.center_cursor),
            (Hint::TransparentFramebuffer, self.transparent_framebuffer),
            (Hint::FocusOnShow, self.focus_on_show),
            (Hint::ScaleToMonitor, self.scale_to_monitor),
            (Hint::Stereo, self.stereo),
            (Hint::SrgbCapable, self.srgb_capable),
            (Hint::Doublebuffer, self.doublebuffer),
            (Hint::ContextNoError, self.context_no_error),
            (Hint::OpenGlForwardCompat, self.opengl_forward_compat),
            (Hint::OpenGlDebugContext, self.opengl_debug_context),
            (Hint::CocoaRetinaFramebuffer, self.cocoa_retina_framebuffer),
            (Hint::CocoaGraphicsSwitching, self.cocoa_graphics_switching),
        ];
        for (hint, value) in flags {
            glfw.window_hint_bool(hint, value);
        }

        let values = [
            (Hint::RedBits, self.red_bits),
            (Hint::GreenBits, self.green_bits),
            (Hint::BlueBits, self.blue_bits),
            (Hint::AlphaBits, self.alpha_bits),
            (Hint::DepthBits, self.depth_bits),
            (Hint::StencilBits, self.stencil_bits),
            (Hint::AccumRedBits, self.accum_red_bits),
            (Hint::AccumGreenBits, self.accum_green_bits),
            (Hint::AccumBlueBits, self.accum_blue_bits),
            (Hint::AccumAlphaBits, self.accum_alpha_bits),
            (Hint::AuxBuffers, self.aux_buffers),
            (Hint::Samples, self.samples),
            (Hint::RefreshRate, self.refresh_rate),
            (Hint::ClientApi, self.client_api.into()),
            (Hint::ContextCreationApi, self.context_creation_api.into()),
            (Hint::ContextVersionMajor, self.context_version_major),
            (Hint::ContextVersionMinor, self.context_version_minor),
            (Hint::ContextRobustness, self.context_robustness.into()),
            (Hint::ContextReleaseBehavior, self.context_release_behavior.into()),
            (Hint::OpenGlProfile, self.opengl_profile.into()),
        ];
        for (hint, value) in values {
            glfw.window_hint(hint, value);
        }

        let strings = [
            (StringHint::CocoaFrameName, &self.cocoa_frame_name),
            (StringHint::X11ClassName, &self.x11_class_name),
            (StringHint::X11InstanceName, &self.x11_instance_name),
        ];
        for (hint, value) in strings {
            if let Some(value) = value {
                glfw.window_hint_string(hint, value);
            }
        }
    }
}

// ----------------------------------------------
// WindowConfig
// ----------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: i32,
    pub height: i32,
    // Full screen on the primary monitor.
    pub fullscreen: bool,
    pub hints: WindowHints,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "GLFW".into(),
            width: 1024,
            height: 768,
            fullscreen: false,
            hints: WindowHints::default(),
        }
    }
}

impl Configs for WindowConfig {
    fn post_load(&mut self) {
        if self.width <= 0 || self.height <= 0 {
            let defaults = Self::default();
            log::warn!(log::channel!("config"), "Invalid window size {}x{}, using {}x{}.",
                       self.width, self.height, defaults.width, defaults.height);
            self.width = defaults.width;
            self.height = defaults.height;
        }
        self.hints.post_load();
    }
}

impl WindowConfig {
    pub fn create_window(&self, glfw: &Glfw) -> Option<Window> {
        self.hints.apply(glfw);

        let monitor = if self.fullscreen {
            let primary = glfw.primary_monitor();
            if primary.is_none() {
                log::warn!(log::channel!("config"), "No monitor available for full screen, opening windowed.");
            }
            primary
        } else {
            None
        };

        glfw.create_window(self.width, self.height, &self.title, monitor, None)
    }
}

// ----------------------------------------------
// Unit Tests
// ----------------------------------------------

#[cfg(test)]
fn temp_config_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir()
        .join(format!("glfw-binding-{}", std::process::id()))
        .join(name)
        .with_extension("json")
}

#[test]
fn test_partial_json_gets_defaults() {
    let config: WindowConfig = serde_json::from_str(r#"{ "title": "Editor", "hints": { "samples": 4 } }"#).unwrap();
    assert_eq!(config.title, "Editor");
    assert_eq!(config.width, 1024);
    assert_eq!(config.hints.samples, 4);
    assert_eq!(config.hints.depth_bits, 24);
    assert_eq!(config.hints.client_api, ClientApi::OpenGl);
}

#[test]
fn test_save_and_load_file() {
    let path = temp_config_path("window_save_load");
    let mut config = WindowConfig::default();
    config.title = "Saved".into();
    config.hints.opengl_profile = OpenGlProfile::Core;
    config.hints.x11_class_name = Some("saved".into());

    assert!(config.save_file(&path));
    assert_eq!(WindowConfig::load_file(&path), config);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_load_failures_fall_back_to_defaults() {
    let missing = temp_config_path("does_not_exist");
    assert_eq!(InitConfig::load_file(&missing), InitConfig::default());

    let garbage = temp_config_path("garbage");
    let _ = std::fs::create_dir_all(garbage.parent().unwrap());
    std::fs::write(&garbage, "{ not json").unwrap();
    assert_eq!(WindowConfig::load_file(&garbage), WindowConfig::default());
    let _ = std::fs::remove_file(&garbage);
}

#[test]
fn test_post_load_fixes_invalid_size() {
    let path = temp_config_path("invalid_size");
    let _ = std::fs::create_dir_all(path.parent().unwrap());
    std::fs::write(&path, r#"{ "width": -5, "height": 600 }"#).unwrap();

    let config = WindowConfig::load_file(&path);
    assert_eq!((config.width, config.height), (1024, 768));
    let _ = std::fs::remove_file(&path);
}

#[cfg(not(feature = "native"))]
#[test]
fn test_window_config_creates_hinted_window() {
    use crate::ffi::null;

    let glfw = Glfw::init().unwrap();
    let mut config = WindowConfig::default();
    config.title = "Configured".into();
    config.hints.resizable = false;
    config.hints.x11_instance_name = Some("configured".into());

    let window = config.create_window(&glfw).unwrap();
    assert!(!window.attrib_bool(Hint::Resizable));
    assert_eq!(window.size(), (1024, 768));
    assert_eq!(null::window_title(window.as_raw()).as_deref(), Some("Configured"));
    assert_eq!(null::window_hint_string(StringHint::X11InstanceName.into()).as_deref(), Some("configured"));

    config.fullscreen = true;
    let fullscreen = config.create_window(&glfw).unwrap();
    assert_eq!(fullscreen.monitor(), glfw.primary_monitor());
}

#[cfg(not(feature = "native"))]
#[test]
fn test_init_config_disables_hat_buttons() {
    use crate::{consts::JoystickId, ffi::null};

    let config = InitConfig { joystick_hat_buttons: false, ..Default::default() };
    let glfw = config.init().unwrap();
    null::connect_joystick(JoystickId::Joystick1.into(), null::JoystickDesc {
        buttons: vec![1],
        hats: vec![consts::JoystickHat::Up.bits()],
        ..Default::default()
    });
    assert_eq!(glfw.joystick_buttons(JoystickId::Joystick1).len(), 1);
}
