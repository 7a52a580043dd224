use std::fmt;
use std::io::Write;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::hash::{Hash, Hasher};

use crate::utils::hash::{self, StringHash};

// ----------------------------------------------
// Log Levels
// ----------------------------------------------

#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Level {
    Verbose,
    Info,
    Warn,
    Error,
    Silent,
}

impl Level {
    #[inline]
    pub fn is_enabled(self) -> bool {
        self != Self::Silent && (self as u32) >= MIN_LOG_LEVEL.load(Ordering::Relaxed)
    }

    fn tty_color(self) -> (&'static str, &'static str) {
        match self {
            Self::Silent  => ("", ""),
            Self::Verbose => ("\x1b[90m", "\x1b[0m"), // gray
            Self::Info    => ("\x1b[32m", "\x1b[0m"), // green
            Self::Warn    => ("\x1b[33m", "\x1b[0m"), // yellow
            Self::Error   => ("\x1b[31m", "\x1b[0m"), // red
        }
    }
}

// ----------------------------------------------
// Log Channel
// ----------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Channel {
    pub name: &'static str,
    pub hash: StringHash,
}

impl Channel {
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            hash: hash::fnv1a_from_str(name),
        }
    }
}

impl Hash for Channel {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! log_channel {
    ($name:literal) => { $crate::log::Channel::new(concat!(" [", $name, "]")) };
}

// ----------------------------------------------
// Log Listener
// ----------------------------------------------

#[derive(Clone, Debug)]
pub struct Record {
    pub level: Level,
    pub channel: Option<Channel>,
    pub location: Location,
    pub message: String,
}

type ListenerFn = Box<dyn Fn(&Record) + Send + Sync>;

// One global listener. Replacing it drops the previous one.
static LISTENER: RwLock<Option<ListenerFn>> = RwLock::new(None);

pub fn set_listener<F>(listener_fn: F)
    where F: Fn(&Record) + Send + Sync + 'static
{
    if let Ok(mut listener) = LISTENER.write() {
        *listener = Some(Box::new(listener_fn));
    }
}

pub fn clear_listener() {
    if let Ok(mut listener) = LISTENER.write() {
        *listener = None;
    }
}

// ----------------------------------------------
// Global Configs
// ----------------------------------------------

static MIN_LOG_LEVEL: AtomicU32 = AtomicU32::new(Level::Warn as u32);
static ENABLE_SRC_LOCATION: AtomicBool = AtomicBool::new(false);
static ENABLE_TTY_COLORS: AtomicBool = AtomicBool::new(true);

pub fn set_level(level: Level) {
    MIN_LOG_LEVEL.store(level as u32, Ordering::Relaxed);
}

pub fn level() -> Level {
    match MIN_LOG_LEVEL.load(Ordering::Relaxed) {
        0 => Level::Verbose,
        1 => Level::Info,
        2 => Level::Warn,
        3 => Level::Error,
        _ => Level::Silent,
    }
}

pub fn enable_source_location(enable: bool) {
    ENABLE_SRC_LOCATION.store(enable, Ordering::Relaxed);
}

pub fn enable_tty_colors(enable: bool) {
    ENABLE_TTY_COLORS.store(enable, Ordering::Relaxed);
}

// ----------------------------------------------
// Internal Implementation
// ----------------------------------------------

#[derive(Copy, Clone, Debug)]
pub struct Location {
    pub file: &'static str,
    pub line: u32,
    pub module: &'static str,
}

pub fn print_internal(level: Level, channel: Option<Channel>, location: &Location, args: fmt::Arguments) {
    if !level.is_enabled() {
        return;
    }

    let chan_str = channel
        .as_ref()
        .map(|chan| chan.name)
        .unwrap_or_default();

    let (color_start, color_end) = {
        if ENABLE_TTY_COLORS.load(Ordering::Relaxed) {
            level.tty_color()
        } else {
            ("", "")
        }
    };

    // Library output goes to stderr; a failed write is not worth a panic.
    let mut out = std::io::stderr().lock();

    if ENABLE_SRC_LOCATION.load(Ordering::Relaxed) {
        let _ = writeln!(
            &mut out,
            "{}[{:?}]{}{} {}:{} {} - {}",
            color_start, level, chan_str, color_end,
            location.file, location.line, location.module, args
        );
    } else {
        let _ = writeln!(
            &mut out,
            "{}[{:?}]{}{} {}",
            color_start, level, chan_str, color_end, args
        );
    }

    if let Ok(listener) = LISTENER.read() {
        if let Some(listener) = listener.as_ref() {
            listener(&Record {
                level,
                channel,
                location: *location,
                message: args.to_string(),
            });
        }
    }
}

// Shared helper used by all logging macros.
#[doc(hidden)]
#[macro_export]
macro_rules! log_message {
    ($level:expr, $chan:expr, $fmt:literal $(, $($arg:tt)+)?) => {
        if $level.is_enabled() {
            $crate::log::print_internal(
                $level,
                $chan,
                &$crate::log::Location { file: file!(), line: line!(), module: module_path!() },
                format_args!($fmt $(, $($arg)+)?)
            );
        }
    };
}

// ----------------------------------------------
// Public API
// ----------------------------------------------

// Verbose
#[doc(hidden)]
#[macro_export]
macro_rules! log_verbose {
    ($fmt:literal $(, $($arg:tt)+)?) => {
        $crate::log_message!($crate::log::Level::Verbose, None, $fmt $(, $($arg)+)?)
    };
    ($chan:expr, $fmt:literal $(, $($arg:tt)+)?) => {
        $crate::log_message!($crate::log::Level::Verbose, Some($chan), $fmt $(, $($arg)+)?)
    };
}

// Info
#[doc(hidden)]
#[macro_export]
macro_rules! log_info {
    ($fmt:literal $(, $($arg:tt)+)?) => {
        $crate::log_message!($crate::log::Level::Info, None, $fmt $(, $($arg)+)?)
    };
    ($chan:expr, $fmt:literal $(, $($arg:tt)+)?) => {
        $crate::log_message!($crate::log::Level::Info, Some($chan), $fmt $(, $($arg)+)?)
    };
}

// Warn
#[doc(hidden)]
#[macro_export]
macro_rules! log_warn {
    ($fmt:literal $(, $($arg:tt)+)?) => {
        $crate::log_message!($crate::log::Level::Warn, None, $fmt $(, $($arg)+)?)
    };
    ($chan:expr, $fmt:literal $(, $($arg:tt)+)?) => {
        $crate::log_message!($crate::log::Level::Warn, Some($chan), $fmt $(, $($arg)+)?)
    };
}

// Error
#[doc(hidden)]
#[macro_export]
macro_rules! log_error {
    ($fmt:literal $(, $($arg:tt)+)?) => {
        $crate::log_message!($crate::log::Level::Error, None, $fmt $(, $($arg)+)?)
    };
    ($chan:expr, $fmt:literal $(, $($arg:tt)+)?) => {
        $crate::log_message!($crate::log::Level::Error, Some($chan), $fmt $(, $($arg)+)?)
    };
}

// Re-export these here so usage is scoped, e.g., log::info!(), log::warn!(), etc.
#[allow(unused_imports)]
pub use crate::{
    log_channel as channel,
    log_verbose as verbose,
    log_info as info,
    log_warn as warn,
    log_error as error,
};

// ----------------------------------------------
// Unit Tests
// ----------------------------------------------

#[test]
fn test_channel_hash_matches_name() {
    let chan = channel!("glfw");
    assert_eq!(chan.name, " [glfw]");
    assert_eq!(chan.hash, hash::fnv1a_from_str(" [glfw]"));
    assert_ne!(chan, channel!("callbacks"));
}

#[test]
fn test_silent_is_never_enabled() {
    assert!(!Level::Silent.is_enabled());
}
