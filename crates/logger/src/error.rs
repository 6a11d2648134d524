//! Error types for the logging facade

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for logger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or installing a logger.
///
/// Logging calls themselves never return errors; failures on the write path
/// are reported as `tracing` events and the record is dropped.
#[derive(Debug, Error)]
pub enum Error {
    /// The rotating file sink could not be configured or opened
    #[error("File sink error: {0}")]
    File(#[from] ares_logger_file::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A record could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A configuration file could not be read
    #[error("Failed to read configuration from {path}: {source}")]
    ConfigRead {
        /// The file that failed to be read
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// A configuration document could not be parsed
    #[error("Invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The global logger was already set
    #[error("Global logger already initialized")]
    AlreadyInitialized,

    /// The `log` crate already has a logger installed
    #[cfg(feature = "log-compat")]
    #[error("Failed to install log bridge: {0}")]
    SetLogger(#[from] log::SetLoggerError),

    /// A global `tracing` subscriber is already installed
    #[cfg(feature = "tracing-compat")]
    #[error("Failed to install tracing bridge: {0}")]
    SetTracing(#[from] tracing::dispatcher::SetGlobalDefaultError),
}
