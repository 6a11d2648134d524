//! Leveled, structured logging to a rotating file
//!
//! `ares-logger` is a small facade: a [`FileLogger`] owns one [`Encoder`]
//! (console lines or JSON objects) and one [`Sink`] (by default a
//! size-rotating file from `ares-logger-file`), and filters records below a
//! configured [`Level`] before encoding them.
//!
//! Every severity has three call shapes, provided by [`LoggerExt`]:
//! - plain: `logger.info("ready")`
//! - formatted: `logger.infof(format_args!("port {port}"))` or `info!(logger: logger, "port {port}")`
//! - keyed: `logger.infow("ready", &[Field::new("port", port)])` or
//!   `infow!(logger: logger, "ready", "port" => port)`
//!
//! Records carry the source location of the application call site.
//!
//! ```no_run
//! use ares_logger::{FileLogger, LoggerConfig, LoggerExt, Field};
//!
//! let config = LoggerConfig::new("logs/app.log", "INFO", 100, 30, 30).with_message_key("message");
//! let logger = FileLogger::new(config)?;
//! logger.info("started");
//! logger.debug("not written");
//! logger.warnw("slow request", &[Field::new("ms", 1250)]);
//! # Ok::<(), ares_logger::Error>(())
//! ```

#![warn(missing_docs, unreachable_pub)]
#![forbid(unsafe_code)]

mod config;
mod encoder;
mod error;
mod field;
mod file;
mod global;
mod level;
mod logger;
mod macros;
mod record;
mod sink;

pub mod compat;

pub use config::LoggerConfig;
pub use encoder::{
    ConsoleEncoder, DEFAULT_MESSAGE_KEY, Encoder, EncoderConfig, Encoding, JsonEncoder,
    TIME_FORMAT,
};
pub use error::{Error, Result};
pub use field::{Field, IGNORED_KEY, INVALID_KEY};
pub use file::FileLogger;
pub use global::{global, init, is_initialized};
pub use level::Level;
pub use logger::{Logger, LoggerExt, NoOpLogger};
pub use record::{Caller, Record, Sprint};
pub use sink::{MemorySink, Sink};

/// JSON value type used for field values
pub use serde_json::Value;
