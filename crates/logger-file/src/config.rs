//! Rotation policy configuration

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// One megabyte, the unit of [`RotatingFileConfigBuilder::max_size_mb`].
pub const MEGABYTE: u64 = 1024 * 1024;

/// Size limit used when none (or zero) is configured.
pub const DEFAULT_MAX_SIZE_MB: u64 = 100;

/// Settings for a [`RotatingFile`](crate::RotatingFile).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotatingFileConfig {
    /// Path of the active log file
    pub path: PathBuf,
    /// Maximum size of the active file in bytes before it is rotated
    pub max_size: u64,
    /// Number of rotated files to keep, `0` keeps all of them
    pub max_backups: usize,
    /// Days to keep rotated files, `0` disables age based removal
    pub max_age_days: u64,
    /// Gzip rotated files
    pub compress: bool,
    /// Use local time instead of UTC in backup file names
    pub local_time: bool,
}

impl RotatingFileConfig {
    /// Start building a configuration for the file at `path`.
    pub fn builder(path: impl Into<PathBuf>) -> RotatingFileConfigBuilder {
        RotatingFileConfigBuilder::new(path)
    }

    /// Directory holding the active file and its backups.
    pub fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Splits the file name into the stem used as backup prefix and the
    /// extension (including the dot) used as backup suffix.
    pub(crate) fn name_parts(&self) -> (String, String) {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = self
            .path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        (stem, ext)
    }
}

/// Builder for [`RotatingFileConfig`]
#[derive(Debug, Clone)]
pub struct RotatingFileConfigBuilder {
    path: PathBuf,
    max_size: u64,
    max_backups: usize,
    max_age_days: u64,
    compress: bool,
    local_time: bool,
}

impl RotatingFileConfigBuilder {
    /// Create a builder with the default policy: 100 MB files, every backup
    /// kept forever, no compression, UTC names.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_size: DEFAULT_MAX_SIZE_MB * MEGABYTE,
            max_backups: 0,
            max_age_days: 0,
            compress: false,
            local_time: false,
        }
    }

    /// Maximum size in megabytes; `0` selects [`DEFAULT_MAX_SIZE_MB`].
    pub fn max_size_mb(mut self, megabytes: u64) -> Self {
        let megabytes = if megabytes == 0 {
            DEFAULT_MAX_SIZE_MB
        } else {
            megabytes
        };
        self.max_size = megabytes.saturating_mul(MEGABYTE);
        self
    }

    /// Maximum size in bytes.
    pub fn max_size_bytes(mut self, bytes: u64) -> Self {
        self.max_size = bytes;
        self
    }

    /// Number of rotated files to keep.
    pub fn max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    /// Maximum age of rotated files in days.
    pub fn max_age_days(mut self, days: u64) -> Self {
        self.max_age_days = days;
        self
    }

    /// Gzip rotated files.
    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Name backups using local time.
    pub fn local_time(mut self, local_time: bool) -> Self {
        self.local_time = local_time;
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the path has no file name or the
    /// maximum size is zero.
    pub fn build(self) -> Result<RotatingFileConfig> {
        if self.path.file_name().is_none() {
            return Err(Error::Configuration(format!(
                "log path {} has no file name",
                self.path.display()
            )));
        }
        if self.max_size == 0 {
            return Err(Error::Configuration(
                "maximum file size must be greater than zero".to_string(),
            ));
        }

        Ok(RotatingFileConfig {
            path: self.path,
            max_size: self.max_size,
            max_backups: self.max_backups,
            max_age_days: self.max_age_days,
            compress: self.compress,
            local_time: self.local_time,
        })
    }
}
