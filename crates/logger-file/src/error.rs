//! Error types for rotating file output

use std::io;
use std::path::PathBuf;

/// Result type for rotating file operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while writing or rotating log files
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failed to create log directory
    #[error("Failed to create log directory at {path}: {source}")]
    CreateDirectory {
        /// The path that failed to be created
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Failed to open the active log file
    #[error("Failed to open log file at {path}: {source}")]
    Open {
        /// The file that could not be opened
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// A single write is larger than the configured maximum file size
    #[error("write length {len} exceeds maximum file size {max}")]
    WriteTooLarge {
        /// Length of the rejected write
        len: u64,
        /// Configured maximum size in bytes
        max: u64,
    },

    /// Failed to rotate log file
    #[error("Failed to rotate log file: {0}")]
    Rotation(String),

    /// The backup housekeeping thread is no longer running
    #[error("Backup housekeeping error: {0}")]
    Housekeeping(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::Io(e) => e,
            Error::WriteTooLarge { .. } => Self::new(io::ErrorKind::InvalidInput, error),
            other => Self::other(other),
        }
    }
}
