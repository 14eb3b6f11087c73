//! Leveled logger for the `archdiagram` CLI.
//!
//! Feature gates:
//! - `log-info` enables `info!` output (enabled by default).
//! - `log-debug` enables `debug!` output and a runtime debug switch.
//! - `verbose` enables `verbose!`, an untagged progress printer for humans.
//! - `file-logging` lets tagged messages be redirected to a log file.
//!
//! `warn!` and `error!` are always active and go to stderr; `info!` and
//! `debug!` go to stdout unless a log file is active.

use std::fmt::{self, Arguments};
use std::str::FromStr;
#[cfg(any(feature = "log-debug", feature = "verbose"))]
use std::sync::atomic::AtomicBool;
use std::sync::atomic::{AtomicU8, Ordering};

#[cfg(feature = "file-logging")]
use std::{
    fs::{File, OpenOptions},
    io::Write,
    sync::{LazyLock, Mutex},
};

/// Logging levels, ordered from most to least severe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Fatal problems; always emitted.
    Error = 1,
    /// Recoverable problems; always emitted.
    Warn = 2,
    /// Progress information (requires `log-info`).
    Info = 3,
    /// Diagnostics (requires `log-debug` and the runtime switch).
    Debug = 4,
}

impl Level {
    /// Tag printed in front of every message of this level.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Error => "[ERROR]",
            Self::Warn => "[WARN]",
            Self::Info => "[INFO]",
            Self::Debug => "[DEBUG]",
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Error,
            2 => Self::Warn,
            3 => Self::Info,
            _ => Self::Debug,
        }
    }

    const fn is_stderr(self) -> bool {
        matches!(self, Self::Error | Self::Warn)
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" | "err" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            _ => Err(format!("Unknown log level: '{s}'")),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        f.write_str(name)
    }
}

const fn default_level() -> Level {
    if cfg!(feature = "log-debug") {
        Level::Debug
    } else if cfg!(feature = "log-info") {
        Level::Info
    } else {
        Level::Warn
    }
}

static LOG_LEVEL: AtomicU8 = AtomicU8::new(default_level() as u8);
#[cfg(feature = "log-debug")]
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(true);
#[cfg(feature = "verbose")]
static VERBOSE_ENABLED: AtomicBool = AtomicBool::new(false);
#[cfg(feature = "file-logging")]
static LOG_FILE: LazyLock<Mutex<Option<File>>> = LazyLock::new(|| Mutex::new(None));

/// Set the global log level.
pub fn set_level(level: Level) {
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Current global log level.
#[must_use]
pub fn level() -> Level {
    Level::from_u8(LOG_LEVEL.load(Ordering::SeqCst))
}

/// Parse and set the level from a string (case-insensitive). Returns true on success.
#[must_use]
pub fn set_level_from_str(level: &str) -> bool {
    level.parse::<Level>().map(set_level).is_ok()
}

/// Turn the runtime debug switch on (no-op without `log-debug`).
pub fn enable_debug() {
    #[cfg(feature = "log-debug")]
    DEBUG_ENABLED.store(true, Ordering::SeqCst);
}

/// Turn the runtime debug switch off (no-op without `log-debug`).
pub fn disable_debug() {
    #[cfg(feature = "log-debug")]
    DEBUG_ENABLED.store(false, Ordering::SeqCst);
}

/// Whether `debug!` may emit at all.
#[must_use]
pub fn is_debug_enabled() -> bool {
    #[cfg(feature = "log-debug")]
    {
        DEBUG_ENABLED.load(Ordering::SeqCst)
    }
    #[cfg(not(feature = "log-debug"))]
    {
        false
    }
}

/// Turn `verbose!` output on (no-op without `verbose`).
pub fn enable_verbose() {
    #[cfg(feature = "verbose")]
    VERBOSE_ENABLED.store(true, Ordering::SeqCst);
}

/// Turn `verbose!` output off (no-op without `verbose`).
pub fn disable_verbose() {
    #[cfg(feature = "verbose")]
    VERBOSE_ENABLED.store(false, Ordering::SeqCst);
}

/// Whether `verbose!` output is on.
#[must_use]
pub fn is_verbose_enabled() -> bool {
    #[cfg(feature = "verbose")]
    {
        VERBOSE_ENABLED.load(Ordering::SeqCst)
    }
    #[cfg(not(feature = "verbose"))]
    {
        false
    }
}

/// Redirect tagged messages to `path` (appending). Returns true on success.
#[must_use]
pub fn init_file_logging(path: &std::path::Path) -> bool {
    #[cfg(feature = "file-logging")]
    {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            let _ = std::fs::create_dir_all(parent);
        }
        let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
            return false;
        };
        LOG_FILE.lock().map_or(false, |mut slot| {
            *slot = Some(file);
            true
        })
    }
    #[cfg(not(feature = "file-logging"))]
    {
        let _ = path;
        false
    }
}

/// Stop writing to the log file; messages go back to the console.
pub fn close_file_logging() {
    #[cfg(feature = "file-logging")]
    {
        if let Ok(mut slot) = LOG_FILE.lock() {
            *slot = None;
        }
    }
}

/// Try to write a line to the log file. Returns false when no file is active.
fn write_to_file(line: &str) -> bool {
    #[cfg(feature = "file-logging")]
    {
        let Ok(mut slot) = LOG_FILE.lock() else {
            return false;
        };
        if let Some(file) = slot.as_mut() {
            let _ = writeln!(file, "{line}");
            let _ = file.flush();
            return true;
        }
        false
    }
    #[cfg(not(feature = "file-logging"))]
    {
        let _ = line;
        false
    }
}

fn should_log(level: Level) -> bool {
    let compiled_in = match level {
        Level::Info => cfg!(feature = "log-info"),
        Level::Debug => cfg!(feature = "log-debug") && is_debug_enabled(),
        Level::Error | Level::Warn => true,
    };
    compiled_in && level <= self::level()
}

/// Dispatch used by the logging macros.
pub fn log_impl(level: Level, args: Arguments) {
    if !should_log(level) {
        return;
    }
    let line = format!("{} {args}", level.tag());
    if write_to_file(&line) {
        return;
    }
    if level.is_stderr() {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

/// Logs an error-level message.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => { $crate::log_impl($crate::Level::Error, format_args!($($arg)*)) };
}

/// Logs a warning-level message.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => { $crate::log_impl($crate::Level::Warn, format_args!($($arg)*)) };
}

/// Logs an info-level message (requires `log-info`).
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => { $crate::log_impl($crate::Level::Info, format_args!($($arg)*)) };
}

/// Logs a debug-level message (requires `log-debug` and the runtime switch).
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => { $crate::log_impl($crate::Level::Debug, format_args!($($arg)*)) };
}

/// Prints an untagged line when verbose output is on. Never goes to the log file.
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::is_verbose_enabled() {
            println!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_round_trips_through_display() {
        for level in [Level::Error, Level::Warn, Level::Info, Level::Debug] {
            assert_eq!(level.to_string().parse::<Level>(), Ok(level));
        }
    }

    #[test]
    fn level_parse_accepts_aliases() {
        assert_eq!("ERR".parse::<Level>(), Ok(Level::Error));
        assert_eq!(" Warning ".parse::<Level>(), Ok(Level::Warn));
        assert!("trace".parse::<Level>().is_err());
    }

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(Level::Error < Level::Warn);
        assert!(Level::Info < Level::Debug);
    }

    #[test]
    fn macros_do_not_panic() {
        crate::info!("info {}", 1);
        crate::warn!("warn {}", 2);
        crate::error!("error {}", 3);
        crate::debug!("debug {}", 4);
        crate::verbose!("verbose {}", 5);
    }
}
