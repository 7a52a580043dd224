use std::fmt;
use std::path::Path;
use serde::{Serialize, Deserialize};

use crate::{
    log,
    ffi,
    marshal,
    consts::{Action, GamepadAxis, GamepadButton},
};

// ----------------------------------------------
// VideoMode
// ----------------------------------------------

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoMode {
    pub width: i32,
    pub height: i32,
    pub red_bits: i32,
    pub green_bits: i32,
    pub blue_bits: i32,
    pub refresh_rate: i32,
}

impl From<&ffi::GLFWvidmode> for VideoMode {
    fn from(mode: &ffi::GLFWvidmode) -> Self {
        Self {
            width: mode.width,
            height: mode.height,
            red_bits: mode.redBits,
            green_bits: mode.greenBits,
            blue_bits: mode.blueBits,
            refresh_rate: mode.refreshRate,
        }
    }
}

impl fmt::Display for VideoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} ({}/{}/{}) @ {}Hz",
               self.width, self.height,
               self.red_bits, self.green_bits, self.blue_bits,
               self.refresh_rate)
    }
}

// ----------------------------------------------
// GammaRamp
// ----------------------------------------------

// Per-channel gamma response. All three channels must have the same,
// non-zero length to be accepted by the native side.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GammaRamp {
    pub red: Vec<u16>,
    pub green: Vec<u16>,
    pub blue: Vec<u16>,
}

impl GammaRamp {
    // Same curve the native library builds for glfwSetGamma.
    pub fn with_gamma(gamma: f32, size: usize) -> Self {
        let exponent = 1.0 / gamma as f64;
        let channel: Vec<u16> = (0..size)
            .map(|i| {
                let value = i as f64 / (size.max(2) - 1) as f64;
                (value.powf(exponent) * 65535.0 + 0.5).min(65535.0) as u16
            })
            .collect();
        Self { red: channel.clone(), green: channel.clone(), blue: channel }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.red.len()
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.red.is_empty()
            && self.red.len() == self.green.len()
            && self.red.len() == self.blue.len()
    }

    // SAFETY: `ramp` must be null or point to a ramp whose channel arrays
    // hold `size` entries each.
    pub unsafe fn from_raw(ramp: *const ffi::GLFWgammaramp) -> Option<Self> {
        if ramp.is_null() {
            return None;
        }
        let ramp = unsafe { &*ramp };
        let size = ramp.size as libc::c_int;
        unsafe {
            Some(Self {
                red: marshal::slice_from_raw(ramp.red, size).to_vec(),
                green: marshal::slice_from_raw(ramp.green, size).to_vec(),
                blue: marshal::slice_from_raw(ramp.blue, size).to_vec(),
            })
        }
    }

    // Borrowed native view; only valid while `self` is.
    pub(crate) fn as_raw(&self) -> ffi::GLFWgammaramp {
        // The native side never writes through these.
        ffi::GLFWgammaramp {
            red: self.red.as_ptr() as *mut u16,
            green: self.green.as_ptr() as *mut u16,
            blue: self.blue.as_ptr() as *mut u16,
            size: self.size() as libc::c_uint,
        }
    }
}

// ----------------------------------------------
// Image
// ----------------------------------------------

// 8-bit RGBA pixels, left-to-right, top-to-bottom. Used for window icons
// and custom cursors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image {
    pub width: i32,
    pub height: i32,
    pub pixels: Vec<u8>,
}

impl Image {
    pub fn new(width: i32, height: i32, pixels: Vec<u8>) -> Self {
        Self { width, height, pixels }
    }

    pub fn from_rgba(image: image::RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width: width as i32,
            height: height as i32,
            pixels: image.into_raw(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> image::ImageResult<Self> {
        let path = path.as_ref();
        let decoded = image::open(path)?;
        log::info!(log::channel!("marshal"), "Loaded image '{}' ({}x{}).",
                   path.display(), decoded.width(), decoded.height());
        Ok(Self::from_rgba(decoded.into_rgba8()))
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.pixels.len() >= self.width as usize * self.height as usize * 4
    }

    // Logs and returns false for images the native side would over-read.
    pub(crate) fn validate(&self, what: &str) -> bool {
        if self.is_valid() {
            return true;
        }
        log::warn!(log::channel!("marshal"), "Rejected {what} image: {}x{} with {} bytes of pixels.",
                   self.width, self.height, self.pixels.len());
        false
    }

    // Borrowed native view; only valid while `self` is.
    pub(crate) fn as_raw(&self) -> ffi::GLFWimage {
        ffi::GLFWimage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.as_ptr() as *mut u8,
        }
    }
}

// ----------------------------------------------
// GamepadState
// ----------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GamepadState {
    pub buttons: [Action; 15],
    pub axes: [f32; 6],
}

impl Default for GamepadState {
    fn default() -> Self {
        Self { buttons: [Action::Release; 15], axes: [0.0; 6] }
    }
}

impl GamepadState {
    #[inline]
    pub fn button(&self, button: GamepadButton) -> Action {
        self.buttons[i32::from(button) as usize]
    }

    #[inline]
    pub fn axis(&self, axis: GamepadAxis) -> f32 {
        self.axes[i32::from(axis) as usize]
    }
}

impl From<&ffi::GLFWgamepadstate> for GamepadState {
    fn from(state: &ffi::GLFWgamepadstate) -> Self {
        Self {
            buttons: state.buttons.map(Action::from_button_byte),
            axes: state.axes,
        }
    }
}

// ----------------------------------------------
// Unit Tests
// ----------------------------------------------

#[test]
fn test_gamma_ramp_reads_every_channel() {
    let red = [0u16, 100, 200];
    let green = [1u16, 101, 201];
    let blue = [2u16, 102, 202];
    let raw = ffi::GLFWgammaramp {
        red: red.as_ptr() as *mut u16,
        green: green.as_ptr() as *mut u16,
        blue: blue.as_ptr() as *mut u16,
        size: 3,
    };

    let ramp = unsafe { GammaRamp::from_raw(&raw) }.unwrap();
    assert_eq!(ramp.red, red);
    assert_eq!(ramp.green, green);
    assert_eq!(ramp.blue, blue);
    assert!(unsafe { GammaRamp::from_raw(std::ptr::null()) }.is_none());
}

#[test]
fn test_gamma_ramp_validation() {
    assert!(GammaRamp::with_gamma(2.2, 256).is_valid());
    assert!(!GammaRamp::default().is_valid());

    let mut uneven = GammaRamp::with_gamma(1.0, 4);
    uneven.blue.pop();
    assert!(!uneven.is_valid());

    let linear = GammaRamp::with_gamma(1.0, 256);
    assert_eq!(linear.red[0], 0);
    assert_eq!(linear.red[255], 65535);
}

#[test]
fn test_image_validation() {
    assert!(Image::new(2, 2, vec![0; 16]).is_valid());
    assert!(!Image::new(2, 2, vec![0; 15]).is_valid());
    assert!(!Image::new(0, 2, Vec::new()).is_valid());

    let rgba = image::RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 4]));
    let image = Image::from_rgba(rgba);
    assert_eq!((image.width, image.height), (3, 2));
    assert_eq!(&image.pixels[..4], &[1, 2, 3, 4]);
    assert!(image.is_valid());
}

#[test]
fn test_gamepad_state_conversion() {
    let mut raw = ffi::GLFWgamepadstate::default();
    raw.buttons[i32::from(GamepadButton::Start) as usize] = 1;
    raw.axes[i32::from(GamepadAxis::RightTrigger) as usize] = 0.5;

    let state = GamepadState::from(&raw);
    assert_eq!(state.button(GamepadButton::Start), Action::Press);
    assert_eq!(state.button(GamepadButton::A), Action::Release);
    assert_eq!(state.axis(GamepadAxis::RightTrigger), 0.5);
}

#[test]
fn test_video_mode_display() {
    let mode = VideoMode { width: 1920, height: 1080, red_bits: 8, green_bits: 8, blue_bits: 8, refresh_rate: 60 };
    assert_eq!(mode.to_string(), "1920x1080 (8/8/8) @ 60Hz");
}
