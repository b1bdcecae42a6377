//! Process-wide line logger with a rotating log file.
//!
//! Every record becomes exactly one line:
//!
//! ```text
//! LEVEL TIMESTAMP VERSION [PREFIX]MESSAGE file:PATH[:LINE] [func:FUNCTION]
//! ```
//!
//! Lines go to `<executable>.log`, rotated at 10 MB with three gzipped
//! backups kept for 30 days, and are mirrored to stdout when the
//! `LOG_TO_CONSOLE` environment variable is non-empty.
//!
//! Records below Info are only written once debug logging is switched on.
//!
//! ```no_run
//! use proven_logger_rotating as log;
//!
//! log::init().expect("failed to initialize logging");
//! log::set_prefix("[worker] ");
//! log::info!("listening on {}", 8080);
//! log::debug!("not written");
//! log::set_debug_logging(true);
//! log::debug!("written");
//! ```
//!
//! Independent [`Logger`] instances can be created for tests or embedding;
//! the free functions and macros use the one returned by [`global`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::redundant_pub_crate)]
#![forbid(unsafe_code)]

mod caller;
pub mod capture;
pub mod compat;
mod config;
mod error;
mod formatter;
mod global;
mod level;
mod logger;
mod record;
mod rotation;
mod router;
mod writer;

pub use caller::{CallerInfo, resolve as resolve_caller, trim_marker};
pub use config::{DEFAULT_CALLER_MARKER, LoggerConfig, LoggerConfigBuilder};
pub use error::{Error, Result};
pub use formatter::{DEFAULT_VERSION, Formatter, LINE_ENDING, LineFormatter};
pub use global::{
    debug, error, fatal, get_level, global, info, init, init_with, is_enabled, set_debug_logging,
    set_exit_hook, set_prefix, warn, writer,
};
pub use level::{Level, LevelGate};
pub use logger::{ExitHook, FATAL_EXIT_CODE, Logger};
pub use record::Record;
pub use rotation::{RotatingFile, RotationPolicy};
pub use router::{LOG_TO_CONSOLE, SinkRouter, console_from_env, default_log_file_name};
pub use writer::{FanOut, LogWriter};
