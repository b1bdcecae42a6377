//! Caller identity capture.
//!
//! All stack walking lives here. Everything else deals in [`CallerInfo`].

use std::panic::Location;

/// File, function and line of the code that emitted a record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerInfo {
    /// Source file, trimmed after the caller marker
    pub file: String,
    /// Fully qualified function name, trimmed after the caller marker
    pub function: String,
    /// Line number, when one was captured
    pub line: Option<u32>,
}

impl CallerInfo {
    /// True when nothing was captured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.file.is_empty() && self.function.is_empty() && self.line.is_none()
    }

    /// Fill a missing file/line from `location`, keeping the function name
    #[must_use]
    pub fn or_location(mut self, location: &Location<'_>, marker: &str) -> Self {
        if self.file.is_empty() {
            self.file = trim_marker(location.file(), marker).to_string();
            self.line = Some(location.line());
        }
        self
    }
}

/// Resolve the frame `skip` levels above this function's own frame.
///
/// `skip == 0` is `resolve` itself, `1` its caller, and so on. File and
/// function are cut after the last occurrence of `marker`. When the stack
/// is shallower than `skip`, or symbols cannot be found, the result is
/// empty rather than an error.
#[inline(never)]
#[must_use]
pub fn resolve(skip: usize, marker: &str) -> CallerInfo {
    let anchor: fn(usize, &str) -> CallerInfo = resolve;
    let anchor = anchor as usize;

    let mut depth: Option<usize> = None;
    let mut target = None;

    backtrace::trace(|frame| {
        let next = match depth {
            None if frame.symbol_address() as usize == anchor => 0,
            None => return true,
            Some(d) => d + 1,
        };

        if next == skip {
            target = Some(frame.clone());
            return false;
        }

        depth = Some(next);
        true
    });

    let Some(frame) = target else {
        return CallerInfo::default();
    };

    let mut info = CallerInfo::default();
    let mut resolved = false;

    // Inlined code yields several symbols per frame; the first is innermost.
    backtrace::resolve_frame(&frame, |symbol| {
        if resolved {
            return;
        }
        resolved = true;

        if let Some(name) = symbol.name() {
            info.function = trim_marker(&format!("{name:#}"), marker).to_string();
        }
        if let Some(path) = symbol.filename() {
            info.file = trim_marker(&path.to_string_lossy(), marker).to_string();
        }
        info.line = symbol.lineno();
    });

    info
}

/// Everything after the last occurrence of `marker`, or `s` unchanged
#[must_use]
pub fn trim_marker<'a>(s: &'a str, marker: &str) -> &'a str {
    if marker.is_empty() {
        return s;
    }

    s.rfind(marker).map_or(s, |idx| &s[idx + marker.len()..])
}
