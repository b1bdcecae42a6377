//! Line formatting.
//!
//! Every line has the layout
//!
//! ```text
//! LEVEL TIMESTAMP VERSION [PREFIX]MESSAGE file:PATH[:LINE] [func:FUNCTION]
//! ```
//!
//! terminated with the platform line ending.

use crate::{Record, Result};
use chrono::SecondsFormat;

/// Version tag written when none is configured
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Platform line terminator
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
/// Platform line terminator
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Turns a record into the bytes of one log line
pub trait Formatter: Send + Sync + 'static {
    /// Render `record`, including the trailing line terminator
    ///
    /// # Errors
    ///
    /// Implementations may fail; [`LineFormatter`] never does.
    fn format(&self, record: &Record<'_>) -> Result<Vec<u8>>;
}

/// The fixed-layout text formatter.
///
/// Holds the only formatter configuration there is (prefix and version), so
/// changing the prefix means installing a new `LineFormatter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFormatter {
    prefix: String,
    version: String,
}

impl LineFormatter {
    /// Formatter with no prefix and the default version tag
    #[must_use]
    pub fn new() -> Self {
        Self {
            prefix: String::new(),
            version: DEFAULT_VERSION.to_string(),
        }
    }

    /// Builder-style method for setting the message prefix
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Builder-style method for setting the version tag
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Prefix written directly before every message
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Version tag written in the third field
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Render `record` into a string. Never fails.
    #[must_use]
    pub fn format_line(&self, record: &Record<'_>) -> String {
        let mut line = String::with_capacity(96 + record.message.len());

        line.push_str(record.level.as_upper_str());
        line.push(' ');
        line.push_str(
            &record
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Secs, false),
        );
        line.push(' ');
        line.push_str(&self.version);
        line.push(' ');
        line.push_str(&self.prefix);
        line.push_str(&record.message);
        line.push(' ');

        if let Some(caller) = &record.caller {
            line.push_str("file:");
            line.push_str(&caller.file);
            if let Some(number) = caller.line {
                line.push(':');
                line.push_str(&number.to_string());
            }
            if !caller.function.is_empty() {
                line.push_str(" func:");
                line.push_str(&caller.function);
            }
        }

        line.push_str(LINE_ENDING);
        line
    }
}

impl Default for LineFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for LineFormatter {
    fn format(&self, record: &Record<'_>) -> Result<Vec<u8>> {
        Ok(self.format_line(record).into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CallerInfo, Level};
    use chrono::{DateTime, FixedOffset, TimeZone};

    fn timestamp() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2021, 1, 23, 14, 43, 3)
            .unwrap()
    }

    fn caller() -> CallerInfo {
        CallerInfo {
            file: "main.rs".to_string(),
            function: "app::main".to_string(),
            line: Some(33),
        }
    }

    #[test]
    fn test_full_layout() {
        let record = Record::new(Level::Debug, "Test Message")
            .with_timestamp(timestamp())
            .with_caller(caller());

        let line = LineFormatter::new().format_line(&record);

        assert_eq!(
            line,
            format!(
                "DEBUG 2021-01-23T14:43:03+03:00 1.0.0 Test Message file:main.rs:33 func:app::main{LINE_ENDING}"
            )
        );
    }

    #[test]
    fn test_utc_uses_numeric_offset() {
        let ts = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 1, 0, 0, 0)
            .unwrap();
        let record = Record::new(Level::Info, "m").with_timestamp(ts);

        let line = LineFormatter::new().format_line(&record);
        assert!(line.contains(" 2024-05-01T00:00:00+00:00 "), "{line}");
    }

    #[test]
    fn test_prefix_is_glued_to_message() {
        let record = Record::new(Level::Info, "started")
            .with_timestamp(timestamp())
            .with_caller(caller());

        let line = LineFormatter::new()
            .with_prefix("[worker-1] ")
            .format_line(&record);
        let fields: Vec<_> = line.splitn(4, ' ').collect();

        assert!(fields[3].starts_with("[worker-1] started file:"));
    }

    #[test]
    fn test_optional_caller_parts() {
        let record = Record::new(Level::Error, "boom")
            .with_timestamp(timestamp())
            .with_caller(CallerInfo {
                file: "main.rs:33".to_string(),
                function: String::new(),
                line: None,
            });

        let line = LineFormatter::new().format_line(&record);
        assert!(line.ends_with(&format!("boom file:main.rs:33{LINE_ENDING}")));
    }

    #[test]
    fn test_line_number_follows_file() {
        for (number, expected) in [(0, "file:lib.rs:0 "), (u32::MAX, "file:lib.rs:4294967295 ")] {
            let record = Record::new(Level::Info, "m").with_caller(CallerInfo {
                file: "lib.rs".to_string(),
                function: "app::run".to_string(),
                line: Some(number),
            });

            let line = LineFormatter::new().format_line(&record);
            assert!(line.contains(expected), "{line}");
        }
    }

    #[test]
    fn test_no_caller() {
        let record = Record::new(Level::Warn, "plain").with_timestamp(timestamp());

        let line = LineFormatter::new().with_version("2.3.4").format_line(&record);
        assert_eq!(
            line,
            format!("WARNING 2021-01-23T14:43:03+03:00 2.3.4 plain {LINE_ENDING}")
        );
    }

    #[test]
    fn test_format_is_total() {
        for level in Level::ALL {
            let record = Record::new(level, "").with_caller(CallerInfo::default());
            let bytes = LineFormatter::new().format(&record).unwrap();
            let line = String::from_utf8(bytes).unwrap();
            assert!(line.starts_with(level.as_upper_str()));
            assert!(line.ends_with(LINE_ENDING));
        }
    }
}
