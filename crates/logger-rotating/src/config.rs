//! Logger configuration

use crate::error::Result;
use crate::formatter::{DEFAULT_VERSION, LineFormatter};
use crate::rotation::RotationPolicy;
use crate::router::{SinkRouter, console_from_env, default_log_file_name};
use std::path::PathBuf;

/// Marker stripped from caller file and function names by default
pub const DEFAULT_CALLER_MARKER: &str = "src/";

/// Configuration for a [`Logger`](crate::Logger)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Active log file
    pub filename: PathBuf,
    /// Size, backup and age limits for the log file
    pub rotation: RotationPolicy,
    /// Mirror to stdout; `None` reads `LOG_TO_CONSOLE` when the sink is built
    pub log_to_console: Option<bool>,
    /// Prefix written directly before every message
    pub prefix: String,
    /// Version tag written on every line
    pub version: String,
    /// Caller file and function names are cut after the last occurrence of this
    pub caller_marker: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            filename: default_log_file_name(),
            rotation: RotationPolicy::default(),
            log_to_console: None,
            prefix: String::new(),
            version: DEFAULT_VERSION.to_string(),
            caller_marker: DEFAULT_CALLER_MARKER.to_string(),
        }
    }
}

impl LoggerConfig {
    /// Start building a configuration from the defaults
    #[must_use]
    pub fn builder() -> LoggerConfigBuilder {
        LoggerConfigBuilder::default()
    }

    /// Defaults, with the console toggle read from the environment now
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            log_to_console: Some(console_from_env()),
            ..Self::default()
        }
    }

    /// Check the configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the rotation policy is unusable.
    pub fn validate(&self) -> Result<()> {
        self.rotation.validate()
    }

    /// Router for this configuration
    #[must_use]
    pub fn router(&self) -> SinkRouter {
        let router = SinkRouter::new(&self.filename, self.rotation.clone());
        router.with_console(self.log_to_console.unwrap_or_else(console_from_env))
    }

    /// Formatter for this configuration
    #[must_use]
    pub fn formatter(&self) -> LineFormatter {
        LineFormatter::new()
            .with_prefix(self.prefix.clone())
            .with_version(self.version.clone())
    }
}

/// Builder for [`LoggerConfig`]
#[derive(Debug, Default)]
pub struct LoggerConfigBuilder {
    config: LoggerConfig,
}

impl LoggerConfigBuilder {
    /// Set the active log file
    #[must_use]
    pub fn filename(mut self, filename: impl Into<PathBuf>) -> Self {
        self.config.filename = filename.into();
        self
    }

    /// Set the rotation policy
    #[must_use]
    pub fn rotation(mut self, rotation: RotationPolicy) -> Self {
        self.config.rotation = rotation;
        self
    }

    /// Force console mirroring on or off, ignoring `LOG_TO_CONSOLE`
    #[must_use]
    pub const fn log_to_console(mut self, enabled: bool) -> Self {
        self.config.log_to_console = Some(enabled);
        self
    }

    /// Set the message prefix
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix = prefix.into();
        self
    }

    /// Set the version tag
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.config.version = version.into();
        self
    }

    /// Set the caller marker
    #[must_use]
    pub fn caller_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.caller_marker = marker.into();
        self
    }

    /// Finish the configuration
    #[must_use]
    pub fn build(self) -> LoggerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.rotation, RotationPolicy::default());
        assert_eq!(config.version, "1.0.0");
        assert_eq!(config.caller_marker, "src/");
        assert!(config.prefix.is_empty());
        assert!(config.log_to_console.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = LoggerConfig::builder()
            .filename("/tmp/custom.log")
            .rotation(RotationPolicy::default().with_max_backups(7))
            .log_to_console(true)
            .prefix("[api] ")
            .version("2.0.1")
            .caller_marker("")
            .build();

        assert_eq!(config.filename, PathBuf::from("/tmp/custom.log"));
        assert_eq!(config.rotation.max_backups, 7);

        let router = config.router();
        assert!(router.log_to_console());
        assert_eq!(router.filename(), config.filename.as_path());

        let formatter = config.formatter();
        assert_eq!(formatter.prefix(), "[api] ");
        assert_eq!(formatter.version(), "2.0.1");
    }

    #[test]
    fn test_invalid_rotation() {
        let config = LoggerConfig::builder()
            .rotation(RotationPolicy::default().with_max_size_mb(0))
            .build();
        assert!(config.validate().is_err());
    }
}
