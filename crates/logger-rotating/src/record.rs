//! Log record passed from the emit path to a formatter

use crate::{CallerInfo, Level};
use chrono::{DateTime, FixedOffset, Local};
use std::borrow::Cow;

/// A single log record.
///
/// Built once per emitted line and dropped after formatting.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    /// Log level
    pub level: Level,
    /// When the record was created, in the zone it was created with
    pub timestamp: DateTime<FixedOffset>,
    /// The log message
    pub message: Cow<'a, str>,
    /// Where the record came from, if known
    pub caller: Option<CallerInfo>,
}

impl<'a> Record<'a> {
    /// Create a record stamped with the current local time
    #[inline]
    pub fn new(level: Level, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            level,
            timestamp: Local::now().fixed_offset(),
            message: message.into(),
            caller: None,
        }
    }

    /// Builder-style method for setting the timestamp
    #[inline]
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<FixedOffset>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Builder-style method for attaching caller info
    #[inline]
    #[must_use]
    pub fn with_caller(mut self, caller: CallerInfo) -> Self {
        self.caller = Some(caller);
        self
    }
}
