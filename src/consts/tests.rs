use strum::{EnumCount, IntoEnumIterator};
use super::*;
use crate::error::ErrorCode;

// ----------------------------------------------
// Golden values
// ----------------------------------------------

// Every entry must match glfw3.h (3.3) exactly.

#[test]
fn test_version_and_sentinels() {
    assert_eq!((VERSION_MAJOR, VERSION_MINOR, VERSION_REVISION), (3, 3, 8));
    assert_eq!(TRUE, 1);
    assert_eq!(FALSE, 0);
    assert_eq!(DONT_CARE, -1);
}

#[test]
fn test_key_codes() {
    let golden: &[(Key, i32)] = &[
        (Key::Unknown, -1),
        (Key::Space, 32),
        (Key::Apostrophe, 39),
        (Key::Num0, 48),
        (Key::Num9, 57),
        (Key::Semicolon, 59),
        (Key::Equal, 61),
        (Key::A, 65),
        (Key::Z, 90),
        (Key::GraveAccent, 96),
        (Key::World1, 161),
        (Key::World2, 162),
        (Key::Escape, 256),
        (Key::Enter, 257),
        (Key::Tab, 258),
        (Key::Backspace, 259),
        (Key::Insert, 260),
        (Key::Delete, 261),
        (Key::Right, 262),
        (Key::Left, 263),
        (Key::Down, 264),
        (Key::Up, 265),
        (Key::PageUp, 266),
        (Key::PageDown, 267),
        (Key::Home, 268),
        (Key::End, 269),
        (Key::CapsLock, 280),
        (Key::ScrollLock, 281),
        (Key::NumLock, 282),
        (Key::PrintScreen, 283),
        (Key::Pause, 284),
        (Key::F1, 290),
        (Key::F12, 301),
        (Key::F25, 314),
        (Key::Kp0, 320),
        (Key::KpDecimal, 330),
        (Key::KpEqual, 336),
        (Key::LeftShift, 340),
        (Key::RightSuper, 347),
        (Key::Menu, 348),
    ];
    for &(key, code) in golden {
        assert_eq!(i32::from(key), code, "{key:?}");
        assert_eq!(Key::from(code), key);
    }

    assert_eq!(Key::LAST, Key::Menu);
    assert_eq!(Key::COUNT, 121);

    // Codes not in the table map to Unknown instead of failing.
    assert_eq!(Key::from(33), Key::Unknown);
    assert_eq!(Key::from(1000), Key::Unknown);
}

#[test]
fn test_key_printable_range() {
    assert!(Key::A.is_printable());
    assert!(Key::World2.is_printable());
    assert!(!Key::Escape.is_printable());
    assert!(!Key::Unknown.is_printable());
}

#[test]
fn test_input_enums() {
    assert_eq!(i32::from(Action::Release), 0);
    assert_eq!(i32::from(Action::Press), 1);
    assert_eq!(i32::from(Action::Repeat), 2);
    assert_eq!(Action::from_button_byte(1), Action::Press);
    assert_eq!(Action::from_button_byte(0), Action::Release);

    assert_eq!(Modifiers::Shift.bits(), 0x0001);
    assert_eq!(Modifiers::Control.bits(), 0x0002);
    assert_eq!(Modifiers::Alt.bits(), 0x0004);
    assert_eq!(Modifiers::Super.bits(), 0x0008);
    assert_eq!(Modifiers::CapsLock.bits(), 0x0010);
    assert_eq!(Modifiers::NumLock.bits(), 0x0020);
    assert_eq!(Modifiers::from_raw(0x0103), Modifiers::Shift | Modifiers::Control);

    assert_eq!(i32::from(MouseButton::LEFT), 0);
    assert_eq!(i32::from(MouseButton::RIGHT), 1);
    assert_eq!(i32::from(MouseButton::MIDDLE), 2);
    assert_eq!(i32::from(MouseButton::LAST), 7);
    assert_eq!(MouseButton::COUNT, 8);

    assert_eq!(i32::from(JoystickId::Joystick1), 0);
    assert_eq!(i32::from(JoystickId::LAST), 15);
    assert_eq!(JoystickId::COUNT, 16);

    assert_eq!(JoystickHat::CENTERED.bits(), 0);
    assert_eq!(JoystickHat::Up.bits(), 1);
    assert_eq!(JoystickHat::Right.bits(), 2);
    assert_eq!(JoystickHat::Down.bits(), 4);
    assert_eq!(JoystickHat::Left.bits(), 8);
    assert_eq!(JoystickHat::RightUp.bits(), 3);
    assert_eq!(JoystickHat::RightDown.bits(), 6);
    assert_eq!(JoystickHat::LeftUp.bits(), 9);
    assert_eq!(JoystickHat::LeftDown.bits(), 12);

    assert_eq!(i32::from(GamepadButton::A), 0);
    assert_eq!(GamepadButton::CROSS, GamepadButton::A);
    assert_eq!(GamepadButton::TRIANGLE, GamepadButton::Y);
    assert_eq!(i32::from(GamepadButton::LAST), 14);
    assert_eq!(GamepadButton::COUNT, 15);
    assert_eq!(i32::from(GamepadAxis::LAST), 5);
    assert_eq!(GamepadAxis::COUNT, 6);

    assert_eq!(i32::from(InputMode::Cursor), 0x00033001);
    assert_eq!(i32::from(InputMode::RawMouseMotion), 0x00033005);
    assert_eq!(i32::from(CursorMode::Normal), 0x00034001);
    assert_eq!(i32::from(CursorMode::Disabled), 0x00034003);
    assert_eq!(i32::from(StandardCursor::Arrow), 0x00036001);
    assert_eq!(i32::from(StandardCursor::VResize), 0x00036006);
    assert_eq!(i32::from(ConnectionEvent::Connected), 0x00040001);
    assert_eq!(i32::from(ConnectionEvent::Disconnected), 0x00040002);
}

#[test]
fn test_hint_codes() {
    let golden: &[(Hint, i32)] = &[
        (Hint::Focused, 0x00020001),
        (Hint::FocusOnShow, 0x0002000C),
        (Hint::RedBits, 0x00021001),
        (Hint::RefreshRate, 0x0002100F),
        (Hint::Doublebuffer, 0x00021010),
        (Hint::ClientApi, 0x00022001),
        (Hint::OpenGlProfile, 0x00022008),
        (Hint::ScaleToMonitor, 0x0002200C),
        (Hint::CocoaRetinaFramebuffer, 0x00023001),
        (Hint::CocoaGraphicsSwitching, 0x00023003),
    ];
    for &(hint, code) in golden {
        assert_eq!(i32::from(hint), code, "{hint:?}");
        assert_eq!(Hint::try_from(code).ok(), Some(hint));
    }

    assert_eq!(i32::from(StringHint::CocoaFrameName), 0x00023002);
    assert_eq!(i32::from(StringHint::X11ClassName), 0x00024001);
    assert_eq!(i32::from(StringHint::X11InstanceName), 0x00024002);

    assert_eq!(i32::from(InitHint::JoystickHatButtons), 0x00050001);
    assert_eq!(i32::from(InitHint::CocoaChdirResources), 0x00051001);
    assert_eq!(i32::from(InitHint::CocoaMenubar), 0x00051002);

    assert_eq!(i32::from(ClientApi::NoApi), 0);
    assert_eq!(i32::from(ClientApi::OpenGl), 0x00030001);
    assert_eq!(i32::from(ClientApi::OpenGlEs), 0x00030002);
    assert_eq!(i32::from(ContextRobustness::LoseContextOnReset), 0x00031002);
    assert_eq!(i32::from(OpenGlProfile::Core), 0x00032001);
    assert_eq!(i32::from(OpenGlProfile::Compat), 0x00032002);
    assert_eq!(i32::from(ContextReleaseBehavior::Flush), 0x00035001);
    assert_eq!(i32::from(ContextReleaseBehavior::DontFlush), 0x00035002);
    assert_eq!(i32::from(ContextCreationApi::Native), 0x00036001);
    assert_eq!(i32::from(ContextCreationApi::OsMesa), 0x00036003);
}

#[test]
fn test_window_attrib_subset() {
    assert!(Hint::Focused.is_window_attrib());
    assert!(Hint::Hovered.is_window_attrib());
    assert!(Hint::ContextNoError.is_window_attrib());
    assert!(!Hint::RedBits.is_window_attrib());
    assert!(!Hint::ScaleToMonitor.is_window_attrib());
    assert!(!Hint::CocoaRetinaFramebuffer.is_window_attrib());
}

#[test]
fn test_error_codes() {
    assert_eq!(i32::from(ErrorCode::NoError), 0);
    let expected = 0x00010001..=0x0001000A;
    let codes: Vec<i32> = ErrorCode::iter().skip(1).map(i32::from).collect();
    assert_eq!(codes, expected.collect::<Vec<_>>());
}

#[test]
fn test_enum_codes_are_unique() {
    let mut codes: Vec<i32> = Hint::iter().map(i32::from).collect();
    codes.extend(StringHint::iter().map(i32::from));
    let count = codes.len();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), count);
}
