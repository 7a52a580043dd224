use std::ffi::{CStr, CString};
use std::path::PathBuf;
use libc::{c_char, c_int};
use smallvec::SmallVec;

use crate::log;

// ----------------------------------------------
// Native arrays -> Rust
// ----------------------------------------------

// Views a native (pointer, count) pair as a slice.
// A null pointer or a non-positive count yields an empty slice.
//
// SAFETY: if `ptr` is non-null it must point to `count` initialized
// elements that stay valid and unmodified for `'a`.
#[inline]
pub unsafe fn slice_from_raw<'a, T>(ptr: *const T, count: c_int) -> &'a [T] {
    if ptr.is_null() || count <= 0 {
        return &[];
    }
    unsafe { std::slice::from_raw_parts(ptr, count as usize) }
}

// Copies a native NUL-terminated string. Invalid UTF-8 is replaced
// rather than rejected. Null -> None.
//
// SAFETY: `ptr` must be null or point to a NUL-terminated string.
#[inline]
pub unsafe fn string_from_raw(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
}

// Copies a native array of strings. Null entries are skipped.
//
// SAFETY: as for `slice_from_raw` and `string_from_raw`.
pub unsafe fn strings_from_raw(ptr: *const *const c_char, count: c_int) -> Vec<String> {
    unsafe { slice_from_raw(ptr, count) }
        .iter()
        .filter_map(|&s| unsafe { string_from_raw(s) })
        .collect()
}

// File drops rarely carry more than a handful of paths.
pub type DropPaths = SmallVec<[PathBuf; 4]>;

// SAFETY: as for `strings_from_raw`.
pub unsafe fn drop_paths_from_raw(ptr: *const *const c_char, count: c_int) -> DropPaths {
    unsafe { slice_from_raw(ptr, count) }
        .iter()
        .filter_map(|&s| unsafe { string_from_raw(s) })
        .map(PathBuf::from)
        .collect()
}

// ----------------------------------------------
// Rust -> native
// ----------------------------------------------

// Native strings end at the first NUL, so anything after an interior NUL
// is dropped instead of failing the call.
pub fn to_c_string(s: &str) -> CString {
    let bytes = s.as_bytes();
    match bytes.iter().position(|&b| b == 0) {
        Some(nul) => {
            log::warn!(log::channel!("marshal"), "String truncated at interior NUL: {:?}", &s[..nul]);
            CString::new(&bytes[..nul]).unwrap_or_default()
        }
        None => CString::new(bytes).unwrap_or_default(),
    }
}

// ----------------------------------------------
// Unit Tests
// ----------------------------------------------

#[test]
fn test_slice_from_null_or_empty() {
    let empty: &[f32] = unsafe { slice_from_raw(std::ptr::null(), 4) };
    assert!(empty.is_empty());

    let values = [1.0f32, 2.0, 3.0];
    assert!(unsafe { slice_from_raw(values.as_ptr(), 0) }.is_empty());
    assert!(unsafe { slice_from_raw(values.as_ptr(), -1) }.is_empty());
    assert_eq!(unsafe { slice_from_raw(values.as_ptr(), 3) }, &values);
}

#[test]
fn test_strings_from_raw() {
    assert_eq!(unsafe { string_from_raw(std::ptr::null()) }, None);
    assert_eq!(unsafe { string_from_raw(c"VK_KHR_surface".as_ptr()) }.as_deref(), Some("VK_KHR_surface"));

    let names = [c"VK_KHR_surface".as_ptr(), std::ptr::null(), c"VK_KHR_xcb_surface".as_ptr()];
    let strings = unsafe { strings_from_raw(names.as_ptr(), names.len() as c_int) };
    assert_eq!(strings, ["VK_KHR_surface", "VK_KHR_xcb_surface"]);
    assert!(unsafe { strings_from_raw(std::ptr::null(), 3) }.is_empty());
}

#[test]
fn test_drop_paths_from_raw() {
    let paths = [c"/tmp/a.png".as_ptr(), c"/tmp/b c.txt".as_ptr()];
    let dropped = unsafe { drop_paths_from_raw(paths.as_ptr(), 2) };
    assert_eq!(dropped.as_slice(), [PathBuf::from("/tmp/a.png"), PathBuf::from("/tmp/b c.txt")]);
    assert!(!dropped.spilled());
}

#[test]
fn test_to_c_string_truncates_at_nul() {
    assert_eq!(to_c_string("hello").as_bytes(), b"hello");
    assert_eq!(to_c_string("hel\0lo").as_bytes(), b"hel");
    assert_eq!(to_c_string("").as_bytes(), b"");
}
