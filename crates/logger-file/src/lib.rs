//! Size based rotating log file
//!
//! This crate provides the file sink behind `ares-logger`:
//! - Rotation once a write would push the active file past its size limit
//! - Backups named after their rotation time, in local time or UTC
//! - Retention by backup count and by age
//! - Optional gzip compression of rotated files
//!
//! Rotation itself only renames the full file and opens a new one. Pruning
//! and compression run on one housekeeping thread per file, so writers never
//! wait for them. Call [`RotatingFile::wait_for_housekeeping`] or
//! [`RotatingFile::close`] to wait for queued work.

#![warn(missing_docs, unreachable_pub)]
#![forbid(unsafe_code)]

mod backup;
mod config;
mod error;
mod housekeeping;
mod writer;

pub use backup::{BACKUP_TIME_FORMAT, BackupFile, COMPRESS_SUFFIX};
pub use config::{DEFAULT_MAX_SIZE_MB, MEGABYTE, RotatingFileConfig, RotatingFileConfigBuilder};
pub use error::{Error, Result};
pub use writer::RotatingFile;
