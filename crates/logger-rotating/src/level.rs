//! Severity levels and the minimum-level gate

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Log severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Very fine-grained diagnostics
    Trace,
    /// Diagnostics, only written when debug logging is on
    Debug,
    /// Normal operational messages
    Info,
    /// Something unexpected that did not stop the operation
    Warn,
    /// An operation failed
    Error,
    /// The process is about to terminate
    Fatal,
    /// Unrecoverable state
    Panic,
}

impl Level {
    /// All levels, least severe first
    pub const ALL: [Self; 7] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Fatal,
        Self::Panic,
    ];

    /// Lower-case level name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Panic => "panic",
        }
    }

    /// Upper-case level name, as written at the start of every line
    #[must_use]
    pub const fn as_upper_str(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARNING",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
            Self::Panic => "PANIC",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_upper_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            "panic" => Ok(Self::Panic),
            _ => Err(Error::Configuration(format!("unknown log level: {s}"))),
        }
    }
}

/// Holds the current minimum severity.
///
/// Info is the highest minimum the gate accepts, so Info, Warn, Error and
/// Fatal records always pass and only Debug and Trace can be suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelGate {
    min: Level,
}

impl LevelGate {
    /// Gate with the given minimum (clamped to the Info floor)
    #[must_use]
    pub fn new(min: Level) -> Self {
        let mut gate = Self { min: Level::Info };
        gate.set_level(min);
        gate
    }

    /// Whether a record at `level` should be written
    #[inline]
    #[must_use]
    pub fn is_enabled(&self, level: Level) -> bool {
        level >= self.min
    }

    /// Change the minimum severity
    pub fn set_level(&mut self, level: Level) {
        self.min = level.min(Level::Info);
    }

    /// Current minimum severity
    #[must_use]
    pub const fn level(&self) -> Level {
        self.min
    }
}

impl Default for LevelGate {
    fn default() -> Self {
        Self { min: Level::Info }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_names() {
        let names: Vec<_> = Level::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            ["TRACE", "DEBUG", "INFO", "WARNING", "ERROR", "FATAL", "PANIC"]
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("WARN".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("warning".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("Debug".parse::<Level>().unwrap(), Level::Debug);
        assert!("verbose".parse::<Level>().is_err());
    }

    #[test]
    fn test_default_gate_suppresses_only_debug() {
        let gate = LevelGate::default();
        assert_eq!(gate.level(), Level::Info);
        assert!(!gate.is_enabled(Level::Trace));
        assert!(!gate.is_enabled(Level::Debug));
        for level in [Level::Info, Level::Warn, Level::Error, Level::Fatal] {
            assert!(gate.is_enabled(level));
        }
    }

    #[test]
    fn test_debug_gate_passes_everything() {
        let gate = LevelGate::new(Level::Debug);
        assert!(gate.is_enabled(Level::Debug));
        assert!(gate.is_enabled(Level::Info));
        assert!(!gate.is_enabled(Level::Trace));
    }

    #[test]
    fn test_info_is_the_floor() {
        let mut gate = LevelGate::default();
        gate.set_level(Level::Error);
        assert_eq!(gate.level(), Level::Info);
        assert!(gate.is_enabled(Level::Info));
        assert!(gate.is_enabled(Level::Warn));
    }
}
