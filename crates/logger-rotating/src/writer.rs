//! Shared sink handle and fan-out writer

use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// Cloneable handle to the logger's output sink.
///
/// All clones write to the same underlying writer under the same lock, so a
/// line written through any of them is never interleaved with another.
#[derive(Clone)]
pub struct LogWriter {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl LogWriter {
    /// Wrap any writer
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Writer for the process's standard error
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Write one complete line as a single operation on the sink
    pub(crate) fn write_line(&self, line: &[u8]) -> io::Result<()> {
        self.inner.lock().write_all(line)
    }

    /// Whether two handles refer to the same sink
    #[must_use]
    pub fn same_sink(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for LogWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogWriter").finish_non_exhaustive()
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.lock().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.lock().flush()
    }
}

/// Duplicates every write to two writers, in order.
///
/// A write succeeds only if the full buffer reached both branches.
#[derive(Debug)]
pub struct FanOut<A, B> {
    first: A,
    second: B,
}

impl<A: Write, B: Write> FanOut<A, B> {
    /// Fan writes out to `first`, then `second`
    pub const fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: Write, B: Write> Write for FanOut<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.first.write_all(buf)?;
        self.second.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.first.flush()?;
        self.second.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CaptureWriter;

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_fan_out_duplicates_writes() {
        let a = CaptureWriter::new();
        let b = CaptureWriter::new();
        let mut fan = FanOut::new(a.clone(), b.clone());

        fan.write_all(b"one\n").unwrap();
        fan.write_all(b"two\n").unwrap();

        assert_eq!(a.contents(), "one\ntwo\n");
        assert_eq!(b.contents(), a.contents());
    }

    #[test]
    fn test_fan_out_fails_if_either_branch_fails() {
        let ok = CaptureWriter::new();
        let mut fan = FanOut::new(ok.clone(), Broken);
        assert!(fan.write_all(b"x\n").is_err());

        let mut fan = FanOut::new(Broken, ok);
        assert!(fan.write_all(b"x\n").is_err());
    }

    #[test]
    fn test_clones_share_a_sink() {
        let capture = CaptureWriter::new();
        let writer = LogWriter::new(capture.clone());
        let mut other = writer.clone();

        writer.write_line(b"a\n").unwrap();
        other.write_all(b"b\n").unwrap();

        assert!(writer.same_sink(&other));
        assert!(!writer.same_sink(&LogWriter::stderr()));
        assert_eq!(capture.lines(), ["a", "b"]);
    }
}
