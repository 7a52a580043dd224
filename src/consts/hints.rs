use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Serialize, Deserialize};
use strum_macros::{Display, EnumCount, EnumIter};

// ----------------------------------------------
// Hint
// ----------------------------------------------

// Window creation hints. The same codes select window attributes
// (e.g. Window::attrib(Hint::Focused)).
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[derive(IntoPrimitive, TryFromPrimitive, EnumCount, EnumIter, Display)]
pub enum Hint {
    // Window related:
    Focused                = 0x00020001,
    Iconified              = 0x00020002,
    Resizable              = 0x00020003,
    Visible                = 0x00020004,
    Decorated              = 0x00020005,
    AutoIconify            = 0x00020006,
    Floating               = 0x00020007,
    Maximized              = 0x00020008,
    CenterCursor           = 0x00020009,
    TransparentFramebuffer = 0x0002000A,
    Hovered                = 0x0002000B,
    FocusOnShow            = 0x0002000C,

    // Framebuffer related:
    RedBits                = 0x00021001,
    GreenBits              = 0x00021002,
    BlueBits               = 0x00021003,
    AlphaBits              = 0x00021004,
    DepthBits              = 0x00021005,
    StencilBits            = 0x00021006,
    AccumRedBits           = 0x00021007,
    AccumGreenBits         = 0x00021008,
    AccumBlueBits          = 0x00021009,
    AccumAlphaBits         = 0x0002100A,
    AuxBuffers             = 0x0002100B,
    Stereo                 = 0x0002100C,
    Samples                = 0x0002100D,
    SrgbCapable            = 0x0002100E,
    RefreshRate            = 0x0002100F, // Monitor related.
    Doublebuffer           = 0x00021010,

    // Context related:
    ClientApi              = 0x00022001,
    ContextVersionMajor    = 0x00022002,
    ContextVersionMinor    = 0x00022003,
    ContextRevision        = 0x00022004,
    ContextRobustness      = 0x00022005,
    OpenGlForwardCompat    = 0x00022006,
    OpenGlDebugContext     = 0x00022007,
    OpenGlProfile          = 0x00022008,
    ContextReleaseBehavior = 0x00022009,
    ContextNoError         = 0x0002200A,
    ContextCreationApi     = 0x0002200B,
    ScaleToMonitor         = 0x0002200C,

    // Platform specific:
    CocoaRetinaFramebuffer = 0x00023001,
    CocoaGraphicsSwitching = 0x00023003,
}

impl Hint {
    // Hints that can also be queried as window attributes. Framebuffer and
    // platform hints only affect creation.
    pub fn is_window_attrib(self) -> bool {
        let code = self as i32;
        (0x00020001..=0x0002000C).contains(&code) || (0x00022001..=0x0002200B).contains(&code)
    }
}

// String valued hints (glfwWindowHintString).
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[derive(IntoPrimitive, TryFromPrimitive, EnumCount, EnumIter, Display)]
pub enum StringHint {
    CocoaFrameName  = 0x00023002,
    X11ClassName    = 0x00024001,
    X11InstanceName = 0x00024002,
}

// Initialization hints (glfwInitHint), only honored before init.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[derive(IntoPrimitive, TryFromPrimitive, EnumCount, EnumIter, Display)]
pub enum InitHint {
    JoystickHatButtons  = 0x00050001,
    CocoaChdirResources = 0x00051001,
    CocoaMenubar        = 0x00051002,
}

// ----------------------------------------------
// Hint values
// ----------------------------------------------

// Values for Hint::ClientApi.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(IntoPrimitive, TryFromPrimitive, EnumCount, EnumIter, Display)]
pub enum ClientApi {
    NoApi       = 0,
    OpenGl      = 0x00030001,
    OpenGlEs    = 0x00030002,
}

// Values for Hint::ContextRobustness.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(IntoPrimitive, TryFromPrimitive, EnumCount, EnumIter, Display)]
pub enum ContextRobustness {
    NoRobustness        = 0,
    NoResetNotification = 0x00031001,
    LoseContextOnReset  = 0x00031002,
}

// Values for Hint::OpenGlProfile.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(IntoPrimitive, TryFromPrimitive, EnumCount, EnumIter, Display)]
pub enum OpenGlProfile {
    Any    = 0,
    Core   = 0x00032001,
    Compat = 0x00032002,
}

// Values for Hint::ContextReleaseBehavior.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(IntoPrimitive, TryFromPrimitive, EnumCount, EnumIter, Display)]
pub enum ContextReleaseBehavior {
    Any       = 0,
    Flush     = 0x00035001,
    DontFlush = 0x00035002,
}

// Values for Hint::ContextCreationApi.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(IntoPrimitive, TryFromPrimitive, EnumCount, EnumIter, Display)]
pub enum ContextCreationApi {
    Native = 0x00036001,
    Egl    = 0x00036002,
    OsMesa = 0x00036003,
}
