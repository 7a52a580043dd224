// Constant tables. Every discriminant below is part of the native ABI and
// must match glfw3.h (3.3) bit-for-bit.

use libc::c_int;

mod hints;
mod input;

pub use hints::*;
pub use input::*;

#[cfg(test)]
mod tests;

// ----------------------------------------------
// Version
// ----------------------------------------------

// Incremented when the API is changed in non-compatible ways.
pub const VERSION_MAJOR: c_int = 3;
// Incremented when features are added but the API stays backward-compatible.
pub const VERSION_MINOR: c_int = 3;
// Incremented on bug fix releases with no API changes.
pub const VERSION_REVISION: c_int = 8;

// ----------------------------------------------
// Booleans / sentinels
// ----------------------------------------------

pub const TRUE: c_int = 1;
pub const FALSE: c_int = 0;

// Accepted by integer hints and size limits to mean "no preference".
pub const DONT_CARE: c_int = -1;
