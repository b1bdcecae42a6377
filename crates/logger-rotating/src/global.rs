//! Process-wide default logger and the free functions and macros over it.
//!
//! The default logger writes to stderr until [`init`] is called, after which
//! it writes to `<executable>.log` in the working directory, mirrored to
//! stdout when `LOG_TO_CONSOLE` is set.

use crate::config::LoggerConfig;
use crate::error::Result;
use crate::level::Level;
use crate::logger::{ExitHook, FATAL_EXIT_CODE, Logger};
use crate::writer::LogWriter;
use once_cell::sync::Lazy;
use std::fmt;
use std::panic::Location;

static GLOBAL: Lazy<Logger> = Lazy::new(|| Logger::new(LoggerConfig::default()));

/// The process-wide default logger
#[must_use]
pub fn global() -> &'static Logger {
    &GLOBAL
}

/// Initialize the default logger from the default configuration
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn init() -> Result<()> {
    GLOBAL.init()
}

/// Initialize the default logger from `config`
///
/// # Errors
///
/// Returns an error if `config` is invalid.
pub fn init_with(config: LoggerConfig) -> Result<()> {
    GLOBAL.init_with(config)
}

/// Replace the default logger's formatter with one carrying `prefix`
pub fn set_prefix(prefix: impl Into<String>) {
    GLOBAL.set_prefix(prefix);
}

/// Handle to the default logger's sink
#[must_use]
pub fn writer() -> LogWriter {
    GLOBAL.writer()
}

/// Switch the default logger between Debug and Info
#[track_caller]
#[inline(never)]
pub fn set_debug_logging(enabled: bool) {
    GLOBAL.switch_debug_logging(enabled, Location::caller());
}

/// The default logger's minimum level
#[must_use]
pub fn get_level() -> Level {
    GLOBAL.level()
}

/// Whether the default logger would write a record at `level`
#[must_use]
pub fn is_enabled(level: Level) -> bool {
    GLOBAL.is_enabled(level)
}

/// Replace the default logger's exit hook
pub fn set_exit_hook(hook: ExitHook) {
    GLOBAL.set_exit_hook(hook);
}

/// Log at Debug through the default logger
#[track_caller]
#[inline(never)]
pub fn debug(args: fmt::Arguments<'_>) {
    GLOBAL.log_at(Level::Debug, args, Location::caller());
}

/// Log at Info through the default logger
#[track_caller]
#[inline(never)]
pub fn info(args: fmt::Arguments<'_>) {
    GLOBAL.log_at(Level::Info, args, Location::caller());
}

/// Log at Warn through the default logger
#[track_caller]
#[inline(never)]
pub fn warn(args: fmt::Arguments<'_>) {
    GLOBAL.log_at(Level::Warn, args, Location::caller());
}

/// Log at Error through the default logger
#[track_caller]
#[inline(never)]
pub fn error(args: fmt::Arguments<'_>) {
    GLOBAL.log_at(Level::Error, args, Location::caller());
}

/// Log at Fatal through the default logger, then run its exit hook with 1
#[track_caller]
#[inline(never)]
pub fn fatal(args: fmt::Arguments<'_>) {
    GLOBAL.log_at(Level::Fatal, args, Location::caller());
    GLOBAL.exit(FATAL_EXIT_CODE);
}

/// Log at Debug through the default logger.
///
/// The arguments are not evaluated when Debug is off.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        if $crate::is_enabled($crate::Level::Debug) {
            $crate::debug(::std::format_args!($($arg)+));
        }
    };
}

/// Log at Info through the default logger
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::info(::std::format_args!($($arg)+))
    };
}

/// Log at Warn through the default logger
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::warn(::std::format_args!($($arg)+))
    };
}

/// Log at Error through the default logger
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::error(::std::format_args!($($arg)+))
    };
}

/// Log at Fatal through the default logger, then run its exit hook
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => {
        $crate::fatal(::std::format_args!($($arg)+))
    };
}
