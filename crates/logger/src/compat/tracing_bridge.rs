//! Bridge from tracing to ares-logger

use crate::{Caller, Field, Level, Logger, Record, Result};
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::field::{self, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::{Layer, layer::Context, registry::LookupSpan};

/// Events from these crates are the loggers' own diagnostics and are not
/// forwarded, so a failing sink cannot feed back into itself.
const INTERNAL_CRATES: [&str; 2] = ["ares_logger", "ares_logger_file"];

/// Whether `target` is one of [`INTERNAL_CRATES`] or a module inside one.
fn is_internal_target(target: &str) -> bool {
    INTERNAL_CRATES.iter().any(|name| {
        target
            .strip_prefix(name)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
    })
}

/// A tracing layer that forwards events to an ares-logger [`Logger`]
pub struct TracingBridge<S> {
    logger: Arc<dyn Logger>,
    _subscriber: PhantomData<fn(S)>,
}

impl<S> TracingBridge<S> {
    /// Create a new tracing bridge
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            logger,
            _subscriber: PhantomData,
        }
    }
}

impl<S> Layer<S> for TracingBridge<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if is_internal_target(metadata.target()) {
            return;
        }

        let level = map_level(*metadata.level());
        if !self.logger.is_enabled(level) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let spans: Vec<_> = ctx
            .event_scope(event)
            .map(|scope| scope.from_root().map(|span| span.name()).collect())
            .unwrap_or_default();
        let message = if spans.is_empty() {
            visitor.message
        } else {
            format!("{}: {}", spans.join("::"), visitor.message)
        };

        let mut record = Record::new(level, message).with_fields(&visitor.fields);
        if let (Some(file), Some(line)) = (metadata.file(), metadata.line()) {
            record = record.with_caller(Caller::new(file, line));
        }

        self.logger.log(&record);
    }
}

fn map_level(level: tracing::Level) -> Level {
    match level {
        tracing::Level::ERROR => Level::Error,
        tracing::Level::WARN => Level::Warn,
        tracing::Level::INFO => Level::Info,
        tracing::Level::DEBUG | tracing::Level::TRACE => Level::Debug,
    }
}

/// Collects the message and typed fields of an event
#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Vec<Field>,
}

impl FieldVisitor {
    fn push(&mut self, field: &field::Field, value: impl Into<Value>) {
        self.fields.push(Field::new(field.name(), value));
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push(field, value);
        }
    }

    fn record_debug(&mut self, field: &field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push(field, format!("{value:?}"));
        }
    }

    fn record_error(&mut self, field: &field::Field, value: &(dyn std::error::Error + 'static)) {
        self.push(field, value.to_string());
    }

    fn record_i64(&mut self, field: &field::Field, value: i64) {
        self.push(field, value);
    }

    fn record_u64(&mut self, field: &field::Field, value: u64) {
        self.push(field, value);
    }

    fn record_f64(&mut self, field: &field::Field, value: f64) {
        self.push(field, value);
    }

    fn record_bool(&mut self, field: &field::Field, value: bool) {
        self.push(field, value);
    }
}

/// Install a global tracing subscriber that forwards every event to
/// `logger`.
///
/// # Example
/// ```no_run
/// use ares_logger::{FileLogger, LoggerConfig, compat::init_tracing_bridge};
/// use std::sync::Arc;
///
/// let logger = FileLogger::new(LoggerConfig::new("app.log", "INFO", 100, 3, 7))?;
/// init_tracing_bridge(Arc::new(logger))?;
/// tracing::info!(user = "alice", "signed in");
/// # Ok::<(), ares_logger::Error>(())
/// ```
pub fn init_tracing_bridge(logger: Arc<dyn Logger>) -> Result<()> {
    use tracing_subscriber::prelude::*;

    let subscriber = tracing_subscriber::registry().with(TracingBridge::new(logger));
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
