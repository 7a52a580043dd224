use bitflags::bitflags;
use num_enum::{FromPrimitive, IntoPrimitive, TryFromPrimitive};
use serde::{Serialize, Deserialize};
use strum_macros::{Display, EnumCount, EnumIter};

// ----------------------------------------------
// Action
// ----------------------------------------------

// Key and button actions.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(IntoPrimitive, TryFromPrimitive, EnumCount, EnumIter, Display)]
pub enum Action {
    Release = 0,
    Press   = 1,
    Repeat  = 2,
}

impl Action {
    // Joystick and gamepad button arrays are bytes holding Press/Release.
    #[inline]
    pub fn from_button_byte(byte: u8) -> Self {
        if byte as i32 == Action::Press as i32 { Action::Press } else { Action::Release }
    }

    #[inline]
    pub fn is_down(self) -> bool {
        self != Action::Release
    }
}

// ----------------------------------------------
// Key
// ----------------------------------------------

// Keyboard keys.
//
// Codes follow the USB HID usage tables, re-arranged to map to 7-bit ASCII
// for printable keys. Function keys live in the 256+ range. Names assume the
// US layout; keys without a clear US mapping are `World1`/`World2`.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(IntoPrimitive, FromPrimitive, EnumCount, EnumIter, Display)]
pub enum Key {
    #[num_enum(default)]
    Unknown      = -1,

    // Printable keys:
    Space        = 32,
    Apostrophe   = 39, // '
    Comma        = 44, // ,
    Minus        = 45, // -
    Period       = 46, // .
    Slash        = 47, // /
    Num0         = 48,
    Num1         = 49,
    Num2         = 50,
    Num3         = 51,
    Num4         = 52,
    Num5         = 53,
    Num6         = 54,
    Num7         = 55,
    Num8         = 56,
    Num9         = 57,
    Semicolon    = 59, // ;
    Equal        = 61, // =
    A            = 65,
    B            = 66,
    C            = 67,
    D            = 68,
    E            = 69,
    F            = 70,
    G            = 71,
    H            = 72,
    I            = 73,
    J            = 74,
    K            = 75,
    L            = 76,
    M            = 77,
    N            = 78,
    O            = 79,
    P            = 80,
    Q            = 81,
    R            = 82,
    S            = 83,
    T            = 84,
    U            = 85,
    V            = 86,
    W            = 87,
    X            = 88,
    Y            = 89,
    Z            = 90,
    LeftBracket  = 91, // [
    Backslash    = 92, // \
    RightBracket = 93, // ]
    GraveAccent  = 96, // `
    World1       = 161, // non-US #1
    World2       = 162, // non-US #2

    // Function keys:
    Escape       = 256,
    Enter        = 257,
    Tab          = 258,
    Backspace    = 259,
    Insert       = 260,
    Delete       = 261,
    Right        = 262,
    Left         = 263,
    Down         = 264,
    Up           = 265,
    PageUp       = 266,
    PageDown     = 267,
    Home         = 268,
    End          = 269,
    CapsLock     = 280,
    ScrollLock   = 281,
    NumLock      = 282,
    PrintScreen  = 283,
    Pause        = 284,
    F1           = 290,
    F2           = 291,
    F3           = 292,
    F4           = 293,
    F5           = 294,
    F6           = 295,
    F7           = 296,
    F8           = 297,
    F9           = 298,
    F10          = 299,
    F11          = 300,
    F12          = 301,
    F13          = 302,
    F14          = 303,
    F15          = 304,
    F16          = 305,
    F17          = 306,
    F18          = 307,
    F19          = 308,
    F20          = 309,
    F21          = 310,
    F22          = 311,
    F23          = 312,
    F24          = 313,
    F25          = 314,
    Kp0          = 320,
    Kp1          = 321,
    Kp2          = 322,
    Kp3          = 323,
    Kp4          = 324,
    Kp5          = 325,
    Kp6          = 326,
    Kp7          = 327,
    Kp8          = 328,
    Kp9          = 329,
    KpDecimal    = 330,
    KpDivide     = 331,
    KpMultiply   = 332,
    KpSubtract   = 333,
    KpAdd        = 334,
    KpEnter      = 335,
    KpEqual      = 336,
    LeftShift    = 340,
    LeftControl  = 341,
    LeftAlt      = 342,
    LeftSuper    = 343,
    RightShift   = 344,
    RightControl = 345,
    RightAlt     = 346,
    RightSuper   = 347,
    Menu         = 348,
}

impl Key {
    pub const LAST: Key = Key::Menu;

    #[inline]
    pub fn is_printable(self) -> bool {
        (self as i32) >= (Key::Space as i32) && (self as i32) <= (Key::World2 as i32)
    }
}

// ----------------------------------------------
// Modifiers
// ----------------------------------------------

bitflags! {
    // Modifier keys held down during a key, char or mouse button event.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Modifiers: i32 {
        const Shift    = 0x0001;
        const Control  = 0x0002;
        const Alt      = 0x0004;
        const Super    = 0x0008;
        // Only reported when InputMode::LockKeyMods is enabled.
        const CapsLock = 0x0010;
        const NumLock  = 0x0020;
    }
}

impl Modifiers {
    // Unknown bits from newer native versions are dropped.
    #[inline]
    pub fn from_raw(bits: i32) -> Self {
        Self::from_bits_truncate(bits)
    }
}

// ----------------------------------------------
// MouseButton
// ----------------------------------------------

#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(IntoPrimitive, TryFromPrimitive, EnumCount, EnumIter, Display)]
pub enum MouseButton {
    Button1 = 0,
    Button2 = 1,
    Button3 = 2,
    Button4 = 3,
    Button5 = 4,
    Button6 = 5,
    Button7 = 6,
    Button8 = 7,
}

impl MouseButton {
    pub const LEFT:   MouseButton = MouseButton::Button1;
    pub const RIGHT:  MouseButton = MouseButton::Button2;
    pub const MIDDLE: MouseButton = MouseButton::Button3;
    pub const LAST:   MouseButton = MouseButton::Button8;
}

// ----------------------------------------------
// Joysticks
// ----------------------------------------------

#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[derive(IntoPrimitive, TryFromPrimitive, EnumCount, EnumIter, Display)]
pub enum JoystickId {
    Joystick1  = 0,
    Joystick2  = 1,
    Joystick3  = 2,
    Joystick4  = 3,
    Joystick5  = 4,
    Joystick6  = 5,
    Joystick7  = 6,
    Joystick8  = 7,
    Joystick9  = 8,
    Joystick10 = 9,
    Joystick11 = 10,
    Joystick12 = 11,
    Joystick13 = 12,
    Joystick14 = 13,
    Joystick15 = 14,
    Joystick16 = 15,
}

impl JoystickId {
    pub const LAST: JoystickId = JoystickId::Joystick16;
}

bitflags! {
    // Joystick hat states. Diagonals are combinations of two directions.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct JoystickHat: u8 {
        const Up    = 0x01;
        const Right = 0x02;
        const Down  = 0x04;
        const Left  = 0x08;

        const RightUp   = Self::Right.bits() | Self::Up.bits();
        const RightDown = Self::Right.bits() | Self::Down.bits();
        const LeftUp    = Self::Left.bits()  | Self::Up.bits();
        const LeftDown  = Self::Left.bits()  | Self::Down.bits();
    }
}

impl JoystickHat {
    pub const CENTERED: JoystickHat = JoystickHat::empty();
}

#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(IntoPrimitive, TryFromPrimitive, EnumCount, EnumIter, Display)]
pub enum GamepadButton {
    A           = 0,
    B           = 1,
    X           = 2,
    Y           = 3,
    LeftBumper  = 4,
    RightBumper = 5,
    Back        = 6,
    Start       = 7,
    Guide       = 8,
    LeftThumb   = 9,
    RightThumb  = 10,
    DpadUp      = 11,
    DpadRight   = 12,
    DpadDown    = 13,
    DpadLeft    = 14,
}

impl GamepadButton {
    pub const LAST:     GamepadButton = GamepadButton::DpadLeft;
    pub const CROSS:    GamepadButton = GamepadButton::A;
    pub const CIRCLE:   GamepadButton = GamepadButton::B;
    pub const SQUARE:   GamepadButton = GamepadButton::X;
    pub const TRIANGLE: GamepadButton = GamepadButton::Y;
}

#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(IntoPrimitive, TryFromPrimitive, EnumCount, EnumIter, Display)]
pub enum GamepadAxis {
    LeftX        = 0,
    LeftY        = 1,
    RightX       = 2,
    RightY       = 3,
    LeftTrigger  = 4,
    RightTrigger = 5,
}

impl GamepadAxis {
    pub const LAST: GamepadAxis = GamepadAxis::RightTrigger;
}

// ----------------------------------------------
// Input modes
// ----------------------------------------------

#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[derive(IntoPrimitive, TryFromPrimitive, EnumCount, EnumIter, Display)]
pub enum InputMode {
    Cursor             = 0x00033001,
    StickyKeys         = 0x00033002,
    StickyMouseButtons = 0x00033003,
    LockKeyMods        = 0x00033004,
    RawMouseMotion     = 0x00033005,
}

// Values for InputMode::Cursor.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(IntoPrimitive, TryFromPrimitive, EnumCount, EnumIter, Display)]
pub enum CursorMode {
    Normal   = 0x00034001,
    Hidden   = 0x00034002,
    Disabled = 0x00034003,
}

// ----------------------------------------------
// StandardCursor
// ----------------------------------------------

#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(IntoPrimitive, TryFromPrimitive, EnumCount, EnumIter, Display)]
pub enum StandardCursor {
    Arrow     = 0x00036001,
    IBeam     = 0x00036002,
    Crosshair = 0x00036003,
    Hand      = 0x00036004,
    HResize   = 0x00036005,
    VResize   = 0x00036006,
}

// ----------------------------------------------
// ConnectionEvent
// ----------------------------------------------

// Whether a monitor or joystick was connected or disconnected.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[derive(IntoPrimitive, TryFromPrimitive, EnumCount, EnumIter, Display)]
pub enum ConnectionEvent {
    Connected    = 0x00040001,
    Disconnected = 0x00040002,
}
