//! Bridge from the `log` crate to ares-logger

use crate::{Caller, Field, Level, Logger, Record, Result};
use log::kv::{self, Key, Source, VisitSource};
use log::{LevelFilter, Log, Metadata, Record as LogRecord};
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;

/// Implements `log::Log` on top of an ares-logger [`Logger`]
pub struct LogBridge {
    logger: Arc<dyn Logger>,
}

impl LogBridge {
    /// Create a new log bridge
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }

    /// The most verbose `log` level the wrapped logger accepts
    pub fn max_level(&self) -> LevelFilter {
        if self.logger.is_enabled(Level::Debug) {
            LevelFilter::Trace
        } else if self.logger.is_enabled(Level::Info) {
            LevelFilter::Info
        } else if self.logger.is_enabled(Level::Warn) {
            LevelFilter::Warn
        } else if self.logger.is_enabled(Level::Error) {
            LevelFilter::Error
        } else {
            LevelFilter::Off
        }
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.logger.is_enabled(map_level(metadata.level()))
    }

    fn log(&self, record: &LogRecord) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut collector = FieldCollector::default();
        // A failed visit only loses the remaining key-values.
        let _ = record.key_values().visit(&mut collector);

        let message = record.args().to_string();
        let mut ours = Record::new(map_level(record.level()), message).with_fields(&collector.0);

        let file = match (record.file_static(), record.file()) {
            (Some(file), _) => Some(Cow::Borrowed(file)),
            (None, Some(file)) => Some(Cow::Owned(file.to_owned())),
            (None, None) => None,
        };
        if let (Some(file), Some(line)) = (file, record.line()) {
            ours = ours.with_caller(Caller::new(file, line));
        }

        self.logger.log(&ours);
    }

    fn flush(&self) {
        self.logger.flush();
    }
}

#[derive(Default)]
struct FieldCollector(Vec<Field>);

impl<'kvs> VisitSource<'kvs> for FieldCollector {
    fn visit_pair(&mut self, key: Key<'kvs>, value: kv::Value<'kvs>) -> std::result::Result<(), kv::Error> {
        let value = if let Some(v) = value.to_bool() {
            Value::from(v)
        } else if let Some(v) = value.to_i64() {
            Value::from(v)
        } else if let Some(v) = value.to_u64() {
            Value::from(v)
        } else if let Some(v) = value.to_f64() {
            Value::from(v)
        } else {
            Value::from(value.to_string())
        };
        self.0.push(Field::new(key.as_str().to_owned(), value));
        Ok(())
    }
}

/// Map log levels to our levels; `trace` becomes debug
fn map_level(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warn,
        log::Level::Info => Level::Info,
        log::Level::Debug | log::Level::Trace => Level::Debug,
    }
}

/// Route the `log` crate's macros into `logger`.
///
/// # Example
/// ```no_run
/// use ares_logger::{FileLogger, LoggerConfig, compat::init_log_bridge};
/// use std::sync::Arc;
///
/// let logger = FileLogger::new(LoggerConfig::new("app.log", "INFO", 100, 3, 7))?;
/// init_log_bridge(Arc::new(logger))?;
/// log::info!("routed through ares-logger");
/// # Ok::<(), ares_logger::Error>(())
/// ```
pub fn init_log_bridge(logger: Arc<dyn Logger>) -> Result<()> {
    // log::set_logger requires a 'static reference
    let bridge: &'static LogBridge = Box::leak(Box::new(LogBridge::new(logger)));
    log::set_logger(bridge)?;
    log::set_max_level(bridge.max_level());
    Ok(())
}
