use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;
use crate::ffi;

fn fake_window(address: usize) -> Window {
    unsafe { Window::from_raw(address as *mut ffi::GLFWwindow) }.unwrap()
}

fn counting_close_callback(counter: &Rc<Cell<u32>>) -> WindowCloseCallback {
    let counter = counter.clone();
    Box::new(move |_| counter.set(counter.get() + 1))
}

fn close_slot(record: &mut WindowCallbacks) -> &mut Slot<WindowCloseCallback> {
    &mut record.window_close
}

fn emit_close(registry: &RefCell<CallbackRegistry>, window: Window) {
    dispatch_window(registry, window, close_slot, |callback| callback(window));
}

// ----------------------------------------------
// Registration
// ----------------------------------------------

#[test]
fn test_set_returns_previous_closure() {
    let mut registry = CallbackRegistry::new();
    let window = fake_window(0x1000);
    let first = Rc::new(Cell::new(0));

    let previous = registry.set_window_callback(window, close_slot, Some(counting_close_callback(&first)));
    assert!(previous.is_none());

    let previous = registry.set_window_callback(window, close_slot, Some(Box::new(|_| {}) as WindowCloseCallback));
    let mut previous = previous.expect("first closure should be handed back");
    previous(window);
    assert_eq!(first.get(), 1);

    let previous = registry.set_window_callback(window, close_slot, None);
    assert!(previous.is_some());
    assert!(!registry.window(window).unwrap().window_close.is_set());
}

#[test]
fn test_clearing_unknown_window_creates_no_record() {
    let mut registry = CallbackRegistry::new();
    let window = fake_window(0x2000);

    assert!(registry.set_window_callback(window, close_slot, None).is_none());
    assert_eq!(registry.window_count(), 0);
    assert!(!registry.is_window_registered(window));
}

#[test]
fn test_global_slots() {
    let mut registry = CallbackRegistry::new();
    assert!(registry.set_callback(|r| &mut r.error, Some(log_errors())).is_none());
    assert!(registry.set_callback(|r| &mut r.error, None).is_some());
    assert!(!registry.error.is_set());
}

// ----------------------------------------------
// Dispatch
// ----------------------------------------------

#[test]
fn test_dispatch_and_removal() {
    let registry = RefCell::new(CallbackRegistry::new());
    let window = fake_window(0x3000);
    let counter = Rc::new(Cell::new(0));

    registry.borrow_mut().set_window_callback(window, close_slot, Some(counting_close_callback(&counter)));
    emit_close(&registry, window);
    emit_close(&registry, window);
    assert_eq!(counter.get(), 2);

    registry.borrow_mut().set_window_callback(window, close_slot, None);
    emit_close(&registry, window);
    assert_eq!(counter.get(), 2);

    registry.borrow_mut().set_window_callback(window, close_slot, Some(counting_close_callback(&counter)));
    assert!(registry.borrow_mut().remove_window(window).is_some());
    emit_close(&registry, window);
    assert_eq!(counter.get(), 2);
    assert_eq!(registry.borrow().window_count(), 0);
}

#[test]
fn test_windows_are_independent() {
    let registry = RefCell::new(CallbackRegistry::new());
    let window_a = fake_window(0x4000);
    let window_b = fake_window(0x5000);
    let count_a = Rc::new(Cell::new(0));
    let count_b = Rc::new(Cell::new(0));

    registry.borrow_mut().set_window_callback(window_a, close_slot, Some(counting_close_callback(&count_a)));
    registry.borrow_mut().set_window_callback(window_b, close_slot, Some(counting_close_callback(&count_b)));

    emit_close(&registry, window_a);
    assert_eq!((count_a.get(), count_b.get()), (1, 0));

    registry.borrow_mut().remove_window(window_a);
    emit_close(&registry, window_a);
    emit_close(&registry, window_b);
    assert_eq!((count_a.get(), count_b.get()), (1, 1));
    assert_eq!(registry.borrow().window_count(), 1);
}

#[test]
fn test_dispatch_without_closure_is_noop() {
    let registry = RefCell::new(CallbackRegistry::new());
    let window = fake_window(0x6000);
    emit_close(&registry, window);

    registry.borrow_mut().set_window_callback(window, |r| &mut r.scroll, Some(Box::new(|_, _, _| {}) as ScrollCallback));
    emit_close(&registry, window);
    assert_eq!(registry.borrow_mut().window(window).unwrap().registered_count(), 1);
}

// ----------------------------------------------
// Re-entrancy
// ----------------------------------------------

#[test]
fn test_closure_can_replace_itself() {
    let registry = Rc::new(RefCell::new(CallbackRegistry::new()));
    let window = fake_window(0x7000);
    let replacement_calls = Rc::new(Cell::new(0));

    let weak = Rc::downgrade(&registry);
    let replacement = counting_close_callback(&replacement_calls);
    let mut replacement = Some(replacement);
    registry.borrow_mut().set_window_callback(window, close_slot, Some(Box::new(move |window| {
        let registry = weak.upgrade().unwrap();
        let previous = registry.borrow_mut().set_window_callback(window, close_slot, replacement.take());
        // The running closure is out of its slot.
        assert!(previous.is_none());
    }) as WindowCloseCallback));

    emit_close(&registry, window);
    emit_close(&registry, window);
    assert_eq!(replacement_calls.get(), 1);
}

#[test]
fn test_closure_can_clear_itself() {
    let registry = Rc::new(RefCell::new(CallbackRegistry::new()));
    let window = fake_window(0x8000);
    let calls = Rc::new(Cell::new(0));

    let weak = Rc::downgrade(&registry);
    let counter = calls.clone();
    registry.borrow_mut().set_window_callback(window, close_slot, Some(Box::new(move |window| {
        counter.set(counter.get() + 1);
        weak.upgrade().unwrap().borrow_mut().set_window_callback(window, close_slot, None);
    }) as WindowCloseCallback));

    emit_close(&registry, window);
    emit_close(&registry, window);
    assert_eq!(calls.get(), 1);
    assert!(!registry.borrow_mut().window(window).unwrap().window_close.is_set());
}

#[test]
fn test_closure_can_remove_its_window() {
    let registry = Rc::new(RefCell::new(CallbackRegistry::new()));
    let window = fake_window(0x9000);

    let weak = Rc::downgrade(&registry);
    registry.borrow_mut().set_window_callback(window, close_slot, Some(Box::new(move |window| {
        let removed = weak.upgrade().unwrap().borrow_mut().remove_window(window);
        assert!(removed.is_some());
    }) as WindowCloseCallback));

    emit_close(&registry, window);
    assert_eq!(registry.borrow().window_count(), 0);
    assert!(!registry.borrow().is_window_registered(window));
}

#[test]
fn test_panicking_closure_is_contained() {
    let registry = RefCell::new(CallbackRegistry::new());
    let window = fake_window(0xA000);
    let calls = Rc::new(Cell::new(0));

    let counter = calls.clone();
    registry.borrow_mut().set_window_callback(window, close_slot, Some(Box::new(move |_| {
        counter.set(counter.get() + 1);
        if counter.get() > 0 {
            panic!("close handler failed");
        }
    }) as WindowCloseCallback));

    emit_close(&registry, window);
    emit_close(&registry, window);
    // Still registered after panicking.
    assert_eq!(calls.get(), 2);
}
