pub mod hash;

// ----------------------------------------------
// Bool conversions
// ----------------------------------------------

// Native booleans are plain ints: GLFW_TRUE (1) or GLFW_FALSE (0).
#[inline]
pub const fn to_glfw_bool(value: bool) -> libc::c_int {
    if value { crate::consts::TRUE } else { crate::consts::FALSE }
}

#[inline]
pub const fn from_glfw_bool(value: libc::c_int) -> bool {
    value == crate::consts::TRUE
}
