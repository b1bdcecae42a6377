//! In-memory sinks for tests.
//!
//! [`CaptureWriter`] stands in for a log file or the console and
//! [`ExitRecorder`] stands in for process termination on the fatal path.

use crate::logger::ExitHook;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// A writer that keeps everything written to it in memory
#[derive(Debug, Clone, Default)]
pub struct CaptureWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CaptureWriter {
    /// Create an empty capture writer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock()).into_owned()
    }

    /// Written lines, without terminators
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Check if the captured output contains `text`
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.contents().contains(text)
    }
}

impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Records exit codes instead of terminating the process
#[derive(Debug, Clone, Default)]
pub struct ExitRecorder {
    codes: Arc<Mutex<Vec<i32>>>,
}

impl ExitRecorder {
    /// Create a recorder with no recorded exits
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit hook that records into this recorder
    #[must_use]
    pub fn hook(&self) -> ExitHook {
        let codes = self.codes.clone();
        Arc::new(move |code| codes.lock().push(code))
    }

    /// All recorded exit codes, oldest first
    #[must_use]
    pub fn codes(&self) -> Vec<i32> {
        self.codes.lock().clone()
    }

    /// The most recent exit code
    #[must_use]
    pub fn last(&self) -> Option<i32> {
        self.codes.lock().last().copied()
    }
}
