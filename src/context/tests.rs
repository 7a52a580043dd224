use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

use super::*;
use crate::{
    ffi::null,
    handle::Window,
    types::{GammaRamp, Image},
    consts::{Action, ClientApi, ConnectionEvent, GamepadButton, JoystickHat, JoystickId, Key, Modifiers, MouseButton, StandardCursor},
};

fn init() -> Glfw {
    Glfw::init().expect("null platform always initializes")
}

fn create_window(glfw: &Glfw, title: &str) -> Window {
    glfw.create_window(640, 480, title, None, None).expect("window creation failed")
}

fn counter() -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
    let counter = Rc::new(Cell::new(0));
    (counter.clone(), counter)
}

// ----------------------------------------------
// Lifecycle / errors
// ----------------------------------------------

#[test]
fn test_second_init_on_same_thread_fails() {
    let glfw = init();
    let err = Glfw::init().err().expect("second init must fail");
    assert_eq!(err.kind(), Some(ErrorCode::PlatformError));

    glfw.terminate();
    assert!(!null::is_initialized());

    let again = init();
    assert!(null::is_initialized());
    drop(again);
    assert!(!null::is_initialized());
}

#[test]
fn test_version_needs_no_init() {
    assert_eq!(get_version(), (consts::VERSION_MAJOR, consts::VERSION_MINOR, consts::VERSION_REVISION));
    assert!(get_version_string().starts_with("3.3"));
}

#[test]
fn test_error_callback_receives_errors() {
    let glfw = init();
    let received = Rc::new(RefCell::new(Vec::new()));

    let sink = received.clone();
    glfw.set_error_callback(Some(Box::new(move |err| sink.borrow_mut().push(err))));

    // Negative sizes are rejected natively.
    assert!(glfw.create_window(-1, 10, "bad", None, None).is_none());
    null::emit_error(ErrorCode::OutOfMemory.into(), "scripted");

    let received = received.borrow();
    assert_eq!(received.len(), 2);
    assert_eq!(received[0].kind(), Some(ErrorCode::InvalidValue));
    assert_eq!(received[1], Error::from_code(ErrorCode::OutOfMemory, "scripted"));
}

#[test]
fn test_get_error_takes_last_error() {
    let glfw = init();
    assert_eq!(glfw.get_error(), None);

    glfw.window_hint_string(consts::StringHint::X11ClassName, "demo");
    glfw.set_time(-1.0);
    let err = glfw.get_error().expect("invalid time should be reported");
    assert_eq!(err.kind(), Some(ErrorCode::InvalidValue));
    assert_eq!(glfw.get_error(), None);
}

#[test]
fn test_error_callback_replacement_returns_previous() {
    let glfw = init();
    assert!(glfw.set_error_callback(Some(callbacks::log_errors())).is_none());
    assert!(glfw.set_error_callback(None).is_some());
    assert!(glfw.set_error_callback(None).is_none());
}

// ----------------------------------------------
// Monitors
// ----------------------------------------------

#[test]
fn test_monitor_queries() {
    let glfw = init();
    let monitors = glfw.monitors();
    assert_eq!(monitors.len(), 1);
    assert_eq!(glfw.primary_monitor(), Some(monitors[0]));

    let monitor = monitors[0];
    assert_eq!(monitor.name().as_deref(), Some("Null Monitor"));

    let modes = monitor.video_modes();
    assert_eq!(modes.len(), 4);
    assert!(modes.windows(2).all(|pair| pair[0].width <= pair[1].width));

    let current = monitor.video_mode().expect("current mode");
    assert_eq!((current.width, current.height, current.refresh_rate), (1920, 1080, 60));
    assert_eq!(modes.last(), Some(&current));
}

#[test]
fn test_gamma_ramp_round_trip() {
    let glfw = init();
    let monitor = glfw.primary_monitor().unwrap();

    let original = monitor.gamma_ramp().expect("monitor has a ramp");
    assert_eq!(original.size(), 256);

    let mut ramp = GammaRamp::with_gamma(2.2, original.size());
    ramp.green[10] = 1234;
    monitor.set_gamma_ramp(&ramp);
    assert_eq!(monitor.gamma_ramp(), Some(ramp.clone()));

    // Channels of different lengths never reach the native side.
    let mut broken = ramp.clone();
    broken.blue.pop();
    monitor.set_gamma_ramp(&broken);
    assert_eq!(monitor.gamma_ramp(), Some(ramp));
    assert_eq!(glfw.get_error(), None);
}

#[test]
fn test_monitor_callback_dispatch() {
    let glfw = init();
    let events = Rc::new(RefCell::new(Vec::new()));

    let sink = events.clone();
    glfw.set_monitor_callback(Some(Box::new(move |monitor, event| sink.borrow_mut().push((monitor, event)))));
    null::emit_monitor(ConnectionEvent::Disconnected);

    let primary = glfw.primary_monitor().unwrap();
    assert_eq!(*events.borrow(), vec![(primary, ConnectionEvent::Disconnected)]);

    glfw.set_monitor_callback(None);
    null::emit_monitor(ConnectionEvent::Connected);
    assert_eq!(events.borrow().len(), 1);
}

// ----------------------------------------------
// Windows
// ----------------------------------------------

#[test]
fn test_window_state_round_trip() {
    let glfw = init();
    let window = create_window(&glfw, "Main");

    assert_eq!(null::window_title(window.as_raw()).as_deref(), Some("Main"));
    window.set_title("Renamed");
    assert_eq!(null::window_title(window.as_raw()).as_deref(), Some("Renamed"));

    window.set_pos(100, 50);
    assert_eq!(window.pos(), (100, 50));
    window.set_size(800, 600);
    assert_eq!(window.size(), (800, 600));

    assert!(!window.should_close());
    window.set_should_close(true);
    assert!(window.should_close());

    window.set_attrib(Hint::Resizable, false);
    assert!(!window.attrib_bool(Hint::Resizable));

    glfw.destroy_window(window);
    assert_eq!(null::window_count(), 0);
}

#[test]
fn test_window_icon_round_trip() {
    let glfw = init();
    let window = create_window(&glfw, "Icon");

    let small = Image::new(2, 2, vec![0xFF; 16]);
    let large = Image::new(4, 4, (0..64).collect());
    window.set_icon(&[small.clone(), large.clone()]);
    assert_eq!(null::window_icon(window.as_raw()), vec![small.clone(), large]);

    // A truncated image rejects the whole set.
    let truncated = Image::new(4, 4, vec![0; 10]);
    window.set_icon(&[small.clone(), truncated]);
    assert_eq!(null::window_icon(window.as_raw()).len(), 2);

    window.set_icon(&[]);
    assert!(null::window_icon(window.as_raw()).is_empty());
}

#[test]
fn test_window_hints_apply_to_new_windows() {
    let glfw = init();
    glfw.window_hint_bool(Hint::Resizable, false);
    glfw.window_hint_bool(Hint::Decorated, false);
    glfw.window_hint_string(consts::StringHint::X11ClassName, "glfw-binding");

    let window = create_window(&glfw, "Hinted");
    assert!(!window.attrib_bool(Hint::Resizable));
    assert!(!window.attrib_bool(Hint::Decorated));
    assert_eq!(null::window_hint_string(consts::StringHint::X11ClassName.into()).as_deref(), Some("glfw-binding"));

    glfw.default_window_hints();
    let defaults = create_window(&glfw, "Defaults");
    assert!(defaults.attrib_bool(Hint::Resizable));
    assert!(defaults.attrib_bool(Hint::Decorated));
}

#[test]
fn test_clipboard_round_trip() {
    let glfw = init();
    let window = create_window(&glfw, "Clipboard");

    assert_eq!(window.clipboard_string(), None);
    assert_eq!(glfw.get_error().and_then(|err| err.kind()), Some(ErrorCode::FormatUnavailable));

    window.set_clipboard_string("héllo wörld");
    assert_eq!(window.clipboard_string().as_deref(), Some("héllo wörld"));
}

// ----------------------------------------------
// Window callbacks
// ----------------------------------------------

#[test]
fn test_set_callback_returns_previous() {
    let glfw = init();
    let window = create_window(&glfw, "Callbacks");
    let (first_calls, first) = counter();

    assert!(glfw.set_window_close_callback(window, Some(Box::new(move |_| first.set(first.get() + 1)))).is_none());

    let previous = glfw.set_window_close_callback(window, Some(Box::new(|_| {})));
    let mut previous = previous.expect("first closure is handed back");
    previous(window);
    assert_eq!(first_calls.get(), 1);

    assert!(glfw.set_window_close_callback(window, None).is_some());
}

#[test]
fn test_cleared_callback_is_not_invoked() {
    let glfw = init();
    let window = create_window(&glfw, "Scroll");
    let offsets = Rc::new(RefCell::new(Vec::new()));

    let sink = offsets.clone();
    glfw.set_scroll_callback(window, Some(Box::new(move |_, x, y| sink.borrow_mut().push((x, y)))));
    null::emit_scroll(window.as_raw(), 0.0, 1.5);

    glfw.set_scroll_callback(window, None);
    null::emit_scroll(window.as_raw(), 0.0, -1.0);
    assert_eq!(*offsets.borrow(), vec![(0.0, 1.5)]);
}

#[test]
fn test_windows_dispatch_independently() {
    let glfw = init();
    let window_a = create_window(&glfw, "A");
    let window_b = create_window(&glfw, "B");
    let sizes = Rc::new(RefCell::new(Vec::new()));

    for window in [window_a, window_b] {
        let sink = sizes.clone();
        glfw.set_window_size_callback(window, Some(Box::new(move |w, width, height| sink.borrow_mut().push((w, width, height)))));
    }

    window_a.set_size(320, 200);
    null::emit_window_size(window_b.as_raw(), 1024, 768);
    assert_eq!(*sizes.borrow(), vec![(window_a, 320, 200), (window_b, 1024, 768)]);
}

#[test]
fn test_destroy_window_drops_its_closures() {
    let glfw = init();
    let window = create_window(&glfw, "Doomed");
    let other = create_window(&glfw, "Survivor");

    let token = Rc::new(());
    let held = token.clone();
    glfw.set_window_refresh_callback(window, Some(Box::new(move |_| { let _held = &held; })));
    glfw.set_window_refresh_callback(other, Some(Box::new(|_| {})));
    assert_eq!(Rc::strong_count(&token), 2);

    glfw.destroy_window(window);
    assert_eq!(Rc::strong_count(&token), 1);
    assert!(!glfw.registry().borrow().is_window_registered(window));
    assert!(glfw.registry().borrow().is_window_registered(other));
}

#[test]
fn test_terminate_drops_all_closures() {
    let glfw = init();
    let window = create_window(&glfw, "Window");

    let token = Rc::new(());
    let held = token.clone();
    glfw.set_key_callback(window, Some(Box::new(move |_, _, _, _, _| { let _held = &held; })));
    let held = token.clone();
    glfw.set_joystick_callback(Some(Box::new(move |_, _| { let _held = &held; })));
    assert_eq!(Rc::strong_count(&token), 3);

    glfw.terminate();
    assert_eq!(Rc::strong_count(&token), 1);
}

#[test]
fn test_key_and_text_input() {
    let glfw = init();
    let window = create_window(&glfw, "Keys");
    let keys = Rc::new(RefCell::new(Vec::new()));
    let chars = Rc::new(RefCell::new(String::new()));

    let sink = keys.clone();
    glfw.set_key_callback(window, Some(Box::new(move |_, key, _, action, mods| sink.borrow_mut().push((key, action, mods)))));
    let sink = chars.clone();
    glfw.set_char_callback(window, Some(Box::new(move |_, c| sink.borrow_mut().push(c))));

    null::emit_key(window.as_raw(), Key::A.into(), Key::A.into(), Action::Press.into(), Modifiers::Shift.bits());
    null::emit_key(window.as_raw(), Key::A.into(), Key::A.into(), Action::Press.into(), Modifiers::Shift.bits());
    null::emit_key(window.as_raw(), Key::A.into(), Key::A.into(), Action::Release.into(), 0);
    null::emit_char(window.as_raw(), 'A' as u32, Modifiers::Shift.bits());
    null::emit_char(window.as_raw(), 'ß' as u32, 0);
    // Ctrl held: char mods only.
    null::emit_char(window.as_raw(), 'c' as u32, Modifiers::Control.bits());

    assert_eq!(*keys.borrow(), vec![
        (Key::A, Action::Press, Modifiers::Shift),
        (Key::A, Action::Repeat, Modifiers::Shift),
        (Key::A, Action::Release, Modifiers::empty()),
    ]);
    assert_eq!(*chars.borrow(), "Aß");
    assert_eq!(window.key(Key::A), Action::Release);
}

#[test]
fn test_mouse_input() {
    let glfw = init();
    let window = create_window(&glfw, "Mouse");
    let buttons = Rc::new(RefCell::new(Vec::new()));
    let moves = Rc::new(RefCell::new(Vec::new()));

    let sink = buttons.clone();
    glfw.set_mouse_button_callback(window, Some(Box::new(move |_, button, action, mods| sink.borrow_mut().push((button, action, mods)))));
    let sink = moves.clone();
    glfw.set_cursor_pos_callback(window, Some(Box::new(move |_, x, y| sink.borrow_mut().push((x, y)))));

    null::emit_mouse_button(window.as_raw(), MouseButton::RIGHT.into(), Action::Press.into(), 0);
    assert_eq!(window.mouse_button(MouseButton::RIGHT), Action::Press);

    window.set_cursor_pos(10.0, 20.0);
    null::emit_cursor_pos(window.as_raw(), 10.0, 20.0);
    null::emit_cursor_pos(window.as_raw(), 11.5, 20.0);

    assert_eq!(*buttons.borrow(), vec![(MouseButton::Button2, Action::Press, Modifiers::empty())]);
    assert_eq!(*moves.borrow(), vec![(11.5, 20.0)]);
    assert_eq!(window.cursor_pos(), (11.5, 20.0));
}

#[test]
fn test_drop_paths() {
    let glfw = init();
    let window = create_window(&glfw, "Drop");
    let dropped = Rc::new(RefCell::new(Vec::new()));

    let sink = dropped.clone();
    glfw.set_drop_callback(window, Some(Box::new(move |_, paths| sink.borrow_mut().extend(paths))));

    null::emit_drop(window.as_raw(), &[]);
    assert!(dropped.borrow().is_empty());

    null::emit_drop(window.as_raw(), &["/tmp/a.png", "/tmp/dir with spaces/b.txt"]);
    assert_eq!(*dropped.borrow(), vec![PathBuf::from("/tmp/a.png"), PathBuf::from("/tmp/dir with spaces/b.txt")]);
}

#[test]
fn test_closure_can_destroy_its_window() {
    let glfw = Rc::new(init());
    let window = create_window(&glfw, "Self destruct");
    let (calls, count) = counter();

    let weak = Rc::downgrade(&glfw);
    glfw.set_window_close_callback(window, Some(Box::new(move |window| {
        count.set(count.get() + 1);
        if let Some(glfw) = weak.upgrade() {
            glfw.destroy_window(window);
        }
    })));

    null::emit_window_close(window.as_raw());
    assert_eq!(calls.get(), 1);
    assert_eq!(null::window_count(), 0);
    assert!(!glfw.registry().borrow().is_window_registered(window));
}

#[test]
fn test_callback_fires_from_native_state_change() {
    let glfw = init();
    let window = create_window(&glfw, "Iconify");
    let states = Rc::new(RefCell::new(Vec::new()));

    let sink = states.clone();
    glfw.set_window_iconify_callback(window, Some(Box::new(move |_, iconified| sink.borrow_mut().push(iconified))));

    window.iconify();
    window.iconify();
    window.restore();
    assert_eq!(*states.borrow(), vec![true, false]);
}

// ----------------------------------------------
// Cursors / keyboard
// ----------------------------------------------

#[test]
fn test_custom_cursor() {
    let glfw = init();
    let window = create_window(&glfw, "Cursor");

    let image = Image::new(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    let cursor = glfw.create_cursor(&image, 1, 0).expect("cursor");
    assert_eq!(null::cursor_image(cursor.as_raw()), Some((image, (1, 0))));

    window.set_cursor(Some(cursor));
    assert_eq!(null::window_cursor(window.as_raw()), cursor.as_raw());

    glfw.destroy_cursor(cursor);
    assert!(null::window_cursor(window.as_raw()).is_null());

    assert!(glfw.create_cursor(&Image::new(16, 16, vec![0; 4]), 0, 0).is_none());
}

#[test]
fn test_standard_cursor() {
    let glfw = init();
    let cursor = glfw.create_standard_cursor(StandardCursor::IBeam).expect("cursor");
    assert_eq!(null::cursor_shape(cursor.as_raw()), Some(StandardCursor::IBeam));
    assert_eq!(null::cursor_image(cursor.as_raw()), None);
}

#[test]
fn test_key_names() {
    let glfw = init();
    assert_eq!(glfw.key_name(Some(Key::A), 0).as_deref(), Some("a"));
    assert_eq!(glfw.key_name(Some(Key::Escape), 0), None);
    assert_eq!(glfw.key_name(None, Key::Slash.into()).as_deref(), Some("/"));
    assert_eq!(glfw.key_scancode(Key::A), Some(i32::from(Key::A)));
}

// ----------------------------------------------
// Joysticks
// ----------------------------------------------

fn pad_guid() -> String {
    "030000005e0400008e02000010010000".to_string()
}

#[test]
fn test_joystick_state() {
    let glfw = init();
    let jid = JoystickId::Joystick3;
    assert!(!glfw.joystick_present(jid));
    assert!(glfw.joystick_axes(jid).is_empty());
    assert!(glfw.joystick_buttons(jid).is_empty());

    null::connect_joystick(jid.into(), null::JoystickDesc {
        name: "Stick".to_string(),
        guid: pad_guid(),
        axes: vec![-1.0, 0.25],
        buttons: vec![1, 0],
        hats: vec![JoystickHat::RightUp.bits()],
        gamepad: None,
    });

    assert!(glfw.joystick_present(jid));
    assert_eq!(glfw.joystick_name(jid).as_deref(), Some("Stick"));
    assert_eq!(glfw.joystick_guid(jid), Some(pad_guid()));
    assert_eq!(glfw.joystick_axes(jid), vec![-1.0, 0.25]);
    assert_eq!(glfw.joystick_hats(jid), vec![JoystickHat::RightUp]);

    // Hat reported as up, right, down, left buttons after the real ones.
    assert_eq!(glfw.joystick_buttons(jid), vec![
        Action::Press, Action::Release,
        Action::Press, Action::Press, Action::Release, Action::Release,
    ]);

    null::update_joystick(jid.into(), |desc| desc.axes[1] = 1.0);
    assert_eq!(glfw.joystick_axes(jid), vec![-1.0, 1.0]);
}

#[test]
fn test_joystick_callback() {
    let glfw = init();
    let events = Rc::new(RefCell::new(Vec::new()));

    let sink = events.clone();
    glfw.set_joystick_callback(Some(Box::new(move |jid, event| sink.borrow_mut().push((jid, event)))));

    null::connect_joystick(JoystickId::Joystick1.into(), null::JoystickDesc::default());
    null::disconnect_joystick(JoystickId::Joystick1.into());

    assert_eq!(*events.borrow(), vec![
        (JoystickId::Joystick1, ConnectionEvent::Connected),
        (JoystickId::Joystick1, ConnectionEvent::Disconnected),
    ]);
}

#[test]
fn test_gamepad_mapping_and_state() {
    let glfw = init();
    let jid = JoystickId::Joystick1;
    null::connect_joystick(jid.into(), null::JoystickDesc {
        name: "Pad".to_string(),
        guid: pad_guid().to_uppercase(),
        ..Default::default()
    });

    assert!(!glfw.joystick_is_gamepad(jid));
    assert_eq!(glfw.gamepad_state(jid), None);

    let mappings = format!("# comment\n{},Xbox Controller,a:b0,b:b1,\nnot a mapping\n", pad_guid());
    assert!(glfw.update_gamepad_mappings(&mappings));
    assert_eq!(glfw.get_error().and_then(|err| err.kind()), Some(ErrorCode::InvalidValue));

    assert!(glfw.joystick_is_gamepad(jid));
    assert_eq!(glfw.gamepad_name(jid).as_deref(), Some("Xbox Controller"));

    null::update_joystick(jid.into(), |desc| {
        let mut state = ffi::GLFWgamepadstate::default();
        state.buttons[GamepadButton::A as usize] = 1;
        state.axes[5] = 0.5;
        desc.gamepad = Some(state);
    });

    let state = glfw.gamepad_state(jid).expect("mapped gamepad");
    assert_eq!(state.button(GamepadButton::A), Action::Press);
    assert_eq!(state.button(GamepadButton::B), Action::Release);
    assert_eq!(state.axes[5], 0.5);
}

// ----------------------------------------------
// Context / time
// ----------------------------------------------

#[test]
fn test_context_requirements() {
    let glfw = init();

    glfw.swap_interval(1);
    assert_eq!(glfw.get_error().and_then(|err| err.kind()), Some(ErrorCode::NoCurrentContext));
    assert!(glfw.get_proc_address("glClear").is_null());

    let window = create_window(&glfw, "GL");
    glfw.make_context_current(Some(window));
    assert_eq!(glfw.current_context(), Some(window));
    glfw.swap_interval(1);
    assert_eq!(null::swap_interval(), 1);
    window.swap_buffers();
    assert_eq!(null::swap_count(window.as_raw()), 1);

    glfw.window_hint(Hint::ClientApi, ClientApi::NoApi.into());
    let vulkan_window = create_window(&glfw, "Vulkan");
    glfw.make_context_current(Some(vulkan_window));
    assert_eq!(glfw.get_error().and_then(|err| err.kind()), Some(ErrorCode::NoWindowContext));
    assert_eq!(glfw.current_context(), Some(window));

    glfw.make_context_current(None);
    assert_eq!(glfw.current_context(), None);
}

#[test]
fn test_vulkan_unavailable() {
    let glfw = init();
    assert!(!glfw.vulkan_supported());
    assert!(glfw.required_instance_extensions().is_empty());
}

#[test]
fn test_time() {
    let glfw = init();
    assert_eq!(glfw.get_timer_frequency(), 1_000_000_000);

    glfw.set_time(100.0);
    let now = glfw.get_time();
    assert!((100.0..101.0).contains(&now));

    let first = glfw.get_timer_value();
    assert!(glfw.get_timer_value() >= first);
}

#[test]
fn test_set_time_moves_clock_both_ways() {
    let glfw = init();

    glfw.set_time(5.0);
    assert!(glfw.get_time() >= 5.0);

    glfw.set_time(86_400.0);
    let now = glfw.get_time();
    assert!((86_400.0..86_401.0).contains(&now));

    // Back below the time elapsed since init.
    glfw.set_time(0.0);
    assert!(glfw.get_time() < 1.0);

    // Out-of-range times are rejected and leave the clock alone.
    glfw.set_time(-1.0);
    assert_eq!(glfw.get_error().and_then(|err| err.kind()), Some(ErrorCode::InvalidValue));
    assert!(glfw.get_time() < 1.0);
}

#[test]
fn test_native_library_claim_is_exclusive() {
    let claimed = std::sync::atomic::AtomicBool::new(false);
    assert!(try_claim(&claimed));
    assert!(!try_claim(&claimed));

    release_claim(&claimed);
    assert!(try_claim(&claimed));
}

#[test]
fn test_destroyed_window_handle_reports_invalid_value() {
    let glfw = init();
    let window = create_window(&glfw, "Stale");
    window.set_pos(30, 40);
    glfw.destroy_window(window);
    assert_eq!(glfw.get_error(), None);

    assert_eq!(window.pos(), (0, 0));
    assert_eq!(glfw.get_error().and_then(|err| err.kind()), Some(ErrorCode::InvalidValue));
}
