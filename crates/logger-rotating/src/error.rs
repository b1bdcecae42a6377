//! Error types for the rotating logger

use std::io;
use std::path::PathBuf;

/// Result type for logger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while configuring or writing logs
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O step failed
    #[error("{0}: {1}")]
    Io(&'static str, #[source] io::Error),

    /// Failed to create log directory
    #[error("Failed to create log directory at {path}: {source}")]
    CreateDirectory {
        /// The path that failed to be created
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Failed to rotate log file
    #[error("Failed to rotate log file: {0}")]
    Rotation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The `log` crate already has a global logger
    #[cfg(feature = "log-compat")]
    #[error(transparent)]
    SetLogger(#[from] log::SetLoggerError),

    /// A global tracing subscriber is already installed
    #[cfg(feature = "tracing-compat")]
    #[error(transparent)]
    SetTracing(#[from] tracing::subscriber::SetGlobalDefaultError),
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Io(_, source) | Error::CreateDirectory { source, .. } => source,
            other => Self::other(other),
        }
    }
}
