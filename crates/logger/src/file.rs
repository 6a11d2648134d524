//! Logger writing encoded records to a sink

use crate::{Encoder, Field, Level, Logger, LoggerConfig, Record, Result, Sink};
use ares_logger_file::RotatingFile;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// The default logger: one encoder and one sink, usually a rotating file.
///
/// Cloning is cheap; clones and children created with
/// [`Logger::with_fields`] share the encoder and sink.
///
/// ```no_run
/// use ares_logger::{FileLogger, LoggerConfig, LoggerExt, Field};
///
/// let logger = FileLogger::new(LoggerConfig::new("app.log", "INFO", 1024, 30, 30))?;
/// logger.infow("log is ready", &[Field::new("a", 1), Field::new("b", 2)]);
/// logger.info("test");
/// # Ok::<(), ares_logger::Error>(())
/// ```
#[derive(Clone)]
pub struct FileLogger {
    shared: Arc<Shared>,
    context: Arc<[Field]>,
}

struct Shared {
    level: Level,
    development: bool,
    encoder: Box<dyn Encoder>,
    sink: Arc<dyn Sink>,
}

impl FileLogger {
    /// Open the configured destination and build a logger around it.
    ///
    /// Missing parent directories are created. Fails if the destination
    /// cannot be opened.
    pub fn new(config: LoggerConfig) -> Result<Self> {
        let file = Arc::new(RotatingFile::open(config.rotation()?)?);
        let logger = Self::with_sink(&config, file.clone());

        debug!(
            destination = %file.path().display(),
            max_size = file.config().max_size,
            max_backups = file.config().max_backups,
            level = %logger.level(),
            encoding = ?config.encoding,
            "logger ready"
        );
        Ok(logger)
    }

    /// Build a logger writing to an arbitrary sink.
    ///
    /// The rotation settings of `config` are ignored.
    pub fn with_sink(config: &LoggerConfig, sink: Arc<dyn Sink>) -> Self {
        let encoder = config
            .encoding
            .encoder(config.encoder_config(), config.color);
        Self::from_parts(config.min_level(), config.development, encoder, sink)
    }

    /// Assemble a logger from a threshold, an encoder and a sink
    pub fn from_parts(
        level: Level,
        development: bool,
        encoder: Box<dyn Encoder>,
        sink: Arc<dyn Sink>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                level,
                development,
                encoder,
                sink,
            }),
            context: Arc::from(Vec::new()),
        }
    }

    /// Minimum level written by this logger
    pub fn level(&self) -> Level {
        self.shared.level
    }

    /// Fields added to every record
    pub fn context(&self) -> &[Field] {
        &self.context
    }
}

impl fmt::Debug for FileLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileLogger")
            .field("level", &self.shared.level)
            .field("development", &self.shared.development)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl Logger for FileLogger {
    fn log(&self, record: &Record<'_>) {
        let mut buf = Vec::with_capacity(256);
        if let Err(e) = self.shared.encoder.encode(record, &self.context, &mut buf) {
            error!(error = %e, level = %record.level, "failed to encode log record");
            return;
        }
        if let Err(e) = self.shared.sink.write_record(&buf) {
            error!(error = %e, level = %record.level, "failed to write log record");
        }
    }

    fn flush(&self) {
        if let Err(e) = self.shared.sink.sync() {
            warn!(error = %e, "failed to flush log sink");
        }
    }

    #[inline]
    fn is_enabled(&self, level: Level) -> bool {
        level >= self.shared.level
    }

    fn is_development(&self) -> bool {
        self.shared.development
    }

    fn with_fields(&self, fields: Vec<Field>) -> Arc<dyn Logger> {
        let mut context = self.context.to_vec();
        context.extend(fields);
        Arc::new(Self {
            shared: Arc::clone(&self.shared),
            context: context.into(),
        })
    }
}
