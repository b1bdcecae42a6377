//! The logger handle.
//!
//! A [`Logger`] owns one sink, one formatter and one level gate behind a
//! single lock. `init`, `set_prefix`, `set_debug_logging` and friends take it
//! for writing, so state changes are never observed half-applied. Emitting
//! takes it for reading only long enough to copy out the sink; rendering the
//! message and writing the line happen after it is released.

use crate::caller::{self, CallerInfo};
use crate::config::LoggerConfig;
use crate::error::{Error, Result};
use crate::formatter::{Formatter, LineFormatter};
use crate::level::{Level, LevelGate};
use crate::record::Record;
use crate::writer::LogWriter;
use parking_lot::RwLock;
use std::borrow::Cow;
use std::fmt;
use std::io::Write;
use std::panic::Location;
use std::sync::Arc;

/// Action taken after a fatal record has been written. Receives the exit code.
pub type ExitHook = Arc<dyn Fn(i32) + Send + Sync>;

/// Exit code passed to the exit hook by the fatal path
pub const FATAL_EXIT_CODE: i32 = 1;

// resolve (0) -> log_at (1) -> public entry point (2) -> caller (3)
const CALLER_SKIP: usize = 3;

fn exit_process(code: i32) {
    std::process::exit(code)
}

fn default_exit_hook() -> ExitHook {
    Arc::new(exit_process)
}

/// Everything needed to turn a record into bytes on the sink
#[derive(Clone)]
struct Sink {
    writer: LogWriter,
    formatter: Arc<dyn Formatter>,
    caller_marker: Arc<str>,
}

impl Sink {
    /// Format and write one record as a single write on the sink
    fn write(&self, record: &Record<'_>) -> Result<()> {
        let line = self.formatter.format(record)?;
        self.writer
            .write_line(&line)
            .map_err(|e| Error::Io("failed to write log line", e))
    }

    /// Like [`write`](Self::write), reporting failures on stderr
    fn emit(&self, record: &Record<'_>) {
        if let Err(e) = self.write(record) {
            eprintln!("Failed to write to log: {e}");
        }
    }

    fn emit_from_caller(
        &self,
        level: Level,
        args: fmt::Arguments<'_>,
        location: &'static Location<'static>,
        caller: CallerInfo,
    ) {
        let caller = caller.or_location(location, &self.caller_marker);
        let record = Record::new(level, message(args)).with_caller(caller);
        self.emit(&record);
    }
}

struct LoggerState {
    sink: Sink,
    gate: LevelGate,
}

impl LoggerState {
    fn new(writer: LogWriter, config: &LoggerConfig) -> Self {
        Self {
            sink: Sink {
                writer,
                formatter: Arc::new(config.formatter()),
                caller_marker: Arc::from(config.caller_marker.as_str()),
            },
            gate: LevelGate::default(),
        }
    }

    /// Copy of the sink if `level` passes the gate
    fn sink_for(&self, level: Level) -> Option<Sink> {
        self.gate.is_enabled(level).then(|| self.sink.clone())
    }
}

fn message(args: fmt::Arguments<'_>) -> Cow<'static, str> {
    args.as_str()
        .map_or_else(|| Cow::Owned(fmt::format(args)), Cow::Borrowed)
}

struct Inner {
    state: RwLock<LoggerState>,
    config: RwLock<LoggerConfig>,
    exit: RwLock<ExitHook>,
}

/// Cheaply cloneable logger handle.
///
/// Until [`init`](Self::init) is called a logger writes to stderr. Clones
/// share all state.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

impl Logger {
    /// Create an uninitialized logger writing to stderr at Info
    #[must_use]
    pub fn new(config: LoggerConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(LoggerState::new(LogWriter::stderr(), &config)),
                config: RwLock::new(config),
                exit: RwLock::new(default_exit_hook()),
            }),
        }
    }

    /// (Re)build the sink and formatter from the current configuration.
    ///
    /// The level is reset to Info and any prefix installed with
    /// [`set_prefix`](Self::set_prefix) is dropped in favour of the
    /// configured one. Calling this again replaces everything built by the
    /// previous call.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn init(&self) -> Result<()> {
        let config = self.inner.config.read().clone();
        self.init_with(config)
    }

    /// Replace the configuration, then [`init`](Self::init)
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid. The logger is left unchanged.
    pub fn init_with(&self, config: LoggerConfig) -> Result<()> {
        config.validate()?;

        let router = config.router();
        let writer = router.build_writer();

        *self.inner.state.write() = LoggerState::new(writer, &config);
        *self.inner.config.write() = config;

        tracing::debug!(
            file = %router.filename().display(),
            console = router.log_to_console(),
            "logger initialized"
        );
        Ok(())
    }

    /// Install a fresh formatter carrying `prefix`.
    ///
    /// The previous formatter is discarded, including one installed with
    /// [`set_formatter`](Self::set_formatter). The stored configuration is
    /// untouched, so the next [`init`](Self::init) restores its prefix.
    pub fn set_prefix(&self, prefix: impl Into<String>) {
        let version = self.inner.config.read().version.clone();
        let formatter = LineFormatter::new()
            .with_prefix(prefix.into())
            .with_version(version);

        self.set_formatter(Arc::new(formatter));
    }

    /// Install a custom formatter
    pub fn set_formatter(&self, formatter: Arc<dyn Formatter>) {
        self.inner.state.write().sink.formatter = formatter;
    }

    /// Handle to the current sink
    #[must_use]
    pub fn writer(&self) -> LogWriter {
        self.inner.state.read().sink.writer.clone()
    }

    /// Replace the sink
    pub fn set_writer(&self, writer: LogWriter) {
        self.inner.state.write().sink.writer = writer;
    }

    /// Current minimum level
    #[must_use]
    pub fn level(&self) -> Level {
        self.inner.state.read().gate.level()
    }

    /// Set the minimum level. Anything above Info is treated as Info.
    pub fn set_level(&self, level: Level) {
        self.inner.state.write().gate.set_level(level);
    }

    /// Whether a record at `level` would be written
    #[must_use]
    pub fn is_enabled(&self, level: Level) -> bool {
        self.inner.state.read().gate.is_enabled(level)
    }

    /// Replace the action taken after a fatal record
    pub fn set_exit_hook(&self, hook: ExitHook) {
        *self.inner.exit.write() = hook;
    }

    /// Switch between Debug and Info, announcing the change at Info
    #[track_caller]
    #[inline(never)]
    pub fn set_debug_logging(&self, enabled: bool) {
        self.switch_debug_logging(enabled, Location::caller());
    }

    #[inline(never)]
    pub(crate) fn switch_debug_logging(
        &self,
        enabled: bool,
        location: &'static Location<'static>,
    ) {
        let sink = {
            let mut state = self.inner.state.write();
            state
                .gate
                .set_level(if enabled { Level::Debug } else { Level::Info });
            state.sink.clone()
        };

        let caller = caller::resolve(CALLER_SKIP, &sink.caller_marker);
        sink.emit_from_caller(
            Level::Info,
            format_args!("Debug logging set to: {enabled}"),
            location,
            caller,
        );
    }

    /// Log at Debug. Nothing is resolved or formatted when Debug is off.
    #[track_caller]
    #[inline(never)]
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log_at(Level::Debug, args, Location::caller());
    }

    /// Log at Info
    #[track_caller]
    #[inline(never)]
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log_at(Level::Info, args, Location::caller());
    }

    /// Log at Warn
    #[track_caller]
    #[inline(never)]
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.log_at(Level::Warn, args, Location::caller());
    }

    /// Log at Error
    #[track_caller]
    #[inline(never)]
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log_at(Level::Error, args, Location::caller());
    }

    /// Log at Fatal, then run the exit hook with code 1.
    ///
    /// The hook runs even if the write failed. With the default hook this
    /// does not return.
    #[track_caller]
    #[inline(never)]
    pub fn fatal(&self, args: fmt::Arguments<'_>) {
        self.log_at(Level::Fatal, args, Location::caller());
        self.exit(FATAL_EXIT_CODE);
    }

    /// Log at any level. Fatal and Panic do not run the exit hook here.
    #[track_caller]
    #[inline(never)]
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        self.log_at(level, args, Location::caller());
    }

    /// Write a prepared record, returning any failure to the caller.
    ///
    /// The record is gated like any other but its caller info is used as is.
    ///
    /// # Errors
    ///
    /// Returns the formatter's or the sink's error.
    pub fn try_log(&self, record: &Record<'_>) -> Result<()> {
        let Some(sink) = self.sink_for(record.level) else {
            return Ok(());
        };
        sink.write(record)
    }

    /// Flush the sink
    pub fn flush(&self) {
        let mut writer = self.writer();
        if let Err(e) = writer.flush() {
            eprintln!("Failed to flush log: {e}");
        }
    }

    // The state lock is released before the message is rendered, so a
    // Display impl that logs does not wait behind a queued writer.
    fn sink_for(&self, level: Level) -> Option<Sink> {
        self.inner.state.read().sink_for(level)
    }

    #[inline(never)]
    pub(crate) fn log_at(
        &self,
        level: Level,
        args: fmt::Arguments<'_>,
        location: &'static Location<'static>,
    ) {
        let Some(sink) = self.sink_for(level) else {
            return;
        };

        let caller = caller::resolve(CALLER_SKIP, &sink.caller_marker);
        sink.emit_from_caller(level, args, location, caller);
    }

    /// Emit a record whose origin was captured by another logging facade
    #[cfg(any(feature = "log-compat", feature = "tracing-compat"))]
    pub(crate) fn log_bridged(
        &self,
        level: Level,
        message: String,
        file: Option<&str>,
        line: Option<u32>,
        function: Option<&str>,
    ) {
        let Some(sink) = self.sink_for(level) else {
            return;
        };

        let marker = &*sink.caller_marker;
        let caller = CallerInfo {
            file: file.map(|f| caller::trim_marker(f, marker).to_string()).unwrap_or_default(),
            function: function
                .map(|f| caller::trim_marker(f, marker).to_string())
                .unwrap_or_default(),
            line,
        };
        sink.emit(&Record::new(level, message).with_caller(caller));
    }

    pub(crate) fn exit(&self, code: i32) {
        self.flush();
        let hook = self.inner.exit.read().clone();
        hook(code);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &*self.inner.config.read())
            .field("level", &self.level())
            .finish_non_exhaustive()
    }
}
