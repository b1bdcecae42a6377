//! Output routing: rotating file only, or file plus console

use crate::rotation::{RotatingFile, RotationPolicy};
use crate::writer::{FanOut, LogWriter};
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Environment variable that mirrors log output to stdout when non-empty
pub const LOG_TO_CONSOLE: &str = "LOG_TO_CONSOLE";

const LOG_EXTENSION: &str = "log";
const FALLBACK_PROGRAM_NAME: &str = "app";

/// Whether `LOG_TO_CONSOLE` is set to a non-empty value
#[must_use]
pub fn console_from_env() -> bool {
    std::env::var_os(LOG_TO_CONSOLE).is_some_and(|v| !v.is_empty())
}

/// Log file name derived from the running executable.
///
/// `server.exe` becomes `server.log`, `server` becomes `server.log`.
#[must_use]
pub fn default_log_file_name() -> PathBuf {
    let program = std::env::args_os()
        .next()
        .map(PathBuf::from)
        .or_else(|| std::env::current_exe().ok())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_PROGRAM_NAME));

    log_file_name_for(&program)
}

/// Log file name for a program path: its base name with a `.log` extension
#[must_use]
pub fn log_file_name_for(program: &Path) -> PathBuf {
    let base = program
        .file_name()
        .unwrap_or_else(|| OsStr::new(FALLBACK_PROGRAM_NAME));

    PathBuf::from(base).with_extension(LOG_EXTENSION)
}

/// Builds the writer the logger writes into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkRouter {
    filename: PathBuf,
    policy: RotationPolicy,
    log_to_console: bool,
}

impl SinkRouter {
    /// File-only router
    pub fn new(filename: impl Into<PathBuf>, policy: RotationPolicy) -> Self {
        Self {
            filename: filename.into(),
            policy,
            log_to_console: false,
        }
    }

    /// Router with console mirroring taken from `LOG_TO_CONSOLE`
    pub fn from_env(filename: impl Into<PathBuf>, policy: RotationPolicy) -> Self {
        Self::new(filename, policy).with_console(console_from_env())
    }

    /// Turn console mirroring on or off
    #[must_use]
    pub const fn with_console(mut self, log_to_console: bool) -> Self {
        self.log_to_console = log_to_console;
        self
    }

    /// Whether writes are mirrored to the console
    #[must_use]
    pub const fn log_to_console(&self) -> bool {
        self.log_to_console
    }

    /// Path of the active log file
    #[must_use]
    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// Rotation policy applied to the file
    #[must_use]
    pub const fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    /// Fresh rotating file sink for the configured path
    #[must_use]
    pub fn rotating_file(&self) -> RotatingFile {
        RotatingFile::new(&self.filename, self.policy.clone())
    }

    /// Build the sink, mirroring to stdout when console output is on
    #[must_use]
    pub fn build_writer(&self) -> LogWriter {
        self.build_writer_with_console(io::stdout())
    }

    /// Build the sink with `console` as the mirror target
    pub fn build_writer_with_console(&self, console: impl Write + Send + 'static) -> LogWriter {
        let file = self.rotating_file();

        if self.log_to_console {
            LogWriter::new(FanOut::new(file, console))
        } else {
            LogWriter::new(file)
        }
    }
}
