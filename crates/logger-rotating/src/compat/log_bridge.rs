//! Bridge from the `log` crate

use super::is_own_target;
use crate::{Level, Logger, Result};
use log::{LevelFilter, Log, Metadata, Record as LogRecord};

/// Implements [`log::Log`] by writing into a [`Logger`]
#[derive(Debug, Clone)]
pub struct LogBridge {
    logger: Logger,
}

impl LogBridge {
    /// Create a new log bridge
    #[must_use]
    pub const fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        !is_own_target(metadata.target()) && self.logger.is_enabled(map_level(metadata.level()))
    }

    fn log(&self, record: &LogRecord) {
        if !self.enabled(record.metadata()) {
            return;
        }

        self.logger.log_bridged(
            map_level(record.level()),
            record.args().to_string(),
            record.file(),
            record.line(),
            record.module_path(),
        );
    }

    fn flush(&self) {
        self.logger.flush();
    }
}

fn map_level(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warn,
        log::Level::Info => Level::Info,
        log::Level::Debug => Level::Debug,
        log::Level::Trace => Level::Trace,
    }
}

/// Route everything logged through the `log` macros into `logger`
///
/// # Example
/// ```no_run
/// use proven_logger_rotating::{compat::init_log_bridge, global};
///
/// init_log_bridge(global().clone()).expect("Failed to set log bridge");
/// log::info!("now written to the rotating log");
/// ```
///
/// # Errors
///
/// Returns an error if a `log` logger is already installed.
pub fn init_log_bridge(logger: Logger) -> Result<()> {
    // log::set_logger needs a 'static logger
    let bridge = Box::leak(Box::new(LogBridge::new(logger)));
    log::set_logger(bridge)?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}
