//! Bridge from `tracing`

use super::is_own_target;
use crate::{Level, Logger, Result};
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::{Layer, layer::Context, registry::LookupSpan};

/// A tracing layer that writes events into a [`Logger`].
///
/// Event fields other than `message` are appended to the message as
/// `key=value`. Enclosing span names are prepended, outermost first.
#[derive(Debug, Clone)]
pub struct TracingBridge {
    logger: Logger,
}

impl TracingBridge {
    /// Create a new tracing bridge
    #[must_use]
    pub const fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl<S> Layer<S> for TracingBridge
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if is_own_target(metadata.target()) {
            return;
        }

        let level = match *metadata.level() {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::INFO => Level::Info,
            tracing::Level::DEBUG => Level::Debug,
            tracing::Level::TRACE => Level::Trace,
        };
        if !self.logger.is_enabled(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let spans: Vec<_> = ctx
            .event_scope(event)
            .map(|scope| scope.from_root().map(|span| span.name()).collect())
            .unwrap_or_default();

        let message = if spans.is_empty() {
            visitor.finish()
        } else {
            format!("{}: {}", spans.join("::"), visitor.finish())
        };

        self.logger.log_bridged(
            level,
            message,
            metadata.file(),
            metadata.line(),
            metadata.module_path(),
        );
    }
}

/// Collects the `message` field and the remaining fields as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn push_field(&mut self, field: &Field, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        self.fields.push_str(field.name());
        self.fields.push('=');
        self.fields.push_str(&value.to_string());
    }

    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field, format_args!("{value}"));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push_field(field, format_args!("{value:?}"));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push_field(field, format_args!("{value}"));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push_field(field, format_args!("{value}"));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push_field(field, format_args!("{value}"));
    }
}

/// Install a global tracing subscriber that writes every event into `logger`
///
/// # Example
/// ```no_run
/// use proven_logger_rotating::{compat::init_tracing_bridge, global};
///
/// init_tracing_bridge(global().clone()).expect("Failed to set tracing bridge");
/// tracing::info!(peer = "10.0.0.7", "connected");
/// ```
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing_bridge(logger: Logger) -> Result<()> {
    use tracing_subscriber::prelude::*;

    let subscriber = tracing_subscriber::registry().with(TracingBridge::new(logger));
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
