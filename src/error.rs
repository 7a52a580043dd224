use std::fmt;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::{Display, EnumCount, EnumIter};

// ----------------------------------------------
// ErrorCode
// ----------------------------------------------

// Native error codes. They are never returned by the forwarded calls
// themselves; they arrive through the error callback or Glfw::get_error().
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[derive(IntoPrimitive, TryFromPrimitive, EnumCount, EnumIter, Display)]
pub enum ErrorCode {
    NoError            = 0,
    // A function that requires initialization was called before init.
    NotInitialized     = 0x00010001,
    // A function that needs a current context was called without one.
    NoCurrentContext   = 0x00010002,
    // An argument was not a valid enum value for that function.
    InvalidEnum        = 0x00010003,
    // An argument was out of range (e.g. OpenGL version 2.7).
    InvalidValue       = 0x00010004,
    OutOfMemory        = 0x00010005,
    // The requested client API is not supported by the driver.
    ApiUnavailable     = 0x00010006,
    // The requested context version or framebuffer is not available.
    VersionUnavailable = 0x00010007,
    PlatformError      = 0x00010008,
    // Pixel format during window creation, or clipboard conversion.
    FormatUnavailable  = 0x00010009,
    // The window passed in does not have an OpenGL or OpenGL ES context.
    NoWindowContext    = 0x0001000A,
}

// ----------------------------------------------
// Error
// ----------------------------------------------

// A native error as reported by the library. The raw integer is kept as-is
// so codes from newer native versions are not lost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pub code: i32,
    pub description: String,
}

impl Error {
    pub fn new(code: i32, description: impl Into<String>) -> Self {
        Self { code, description: description.into() }
    }

    #[inline]
    pub fn from_code(code: ErrorCode, description: impl Into<String>) -> Self {
        Self::new(code.into(), description)
    }

    // None if the code is not one this binding knows about.
    #[inline]
    pub fn kind(&self) -> Option<ErrorCode> {
        ErrorCode::try_from(self.code).ok()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Some(kind) => write!(f, "{kind} (0x{:08X}): {}", self.code, self.description),
            None => write!(f, "Unknown error (0x{:08X}): {}", self.code, self.description),
        }
    }
}

impl std::error::Error for Error {}

// ----------------------------------------------
// Unit Tests
// ----------------------------------------------

#[test]
fn test_error_kind_and_display() {
    let err = Error::from_code(ErrorCode::InvalidEnum, "bad hint");
    assert_eq!(err.code, 0x00010003);
    assert_eq!(err.kind(), Some(ErrorCode::InvalidEnum));
    assert_eq!(err.to_string(), "InvalidEnum (0x00010003): bad hint");

    let unknown = Error::new(0x0001FFFF, "from the future");
    assert_eq!(unknown.kind(), None);
    assert!(unknown.to_string().starts_with("Unknown error (0x0001FFFF)"));
}
