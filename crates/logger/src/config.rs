//! Logger configuration

use crate::{EncoderConfig, Encoding, Error, Level, Result};
use ares_logger_file::{DEFAULT_MAX_SIZE_MB, RotatingFileConfig};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for a [`FileLogger`](crate::FileLogger).
///
/// Can be built in code with [`LoggerConfig::new`] or loaded from TOML:
///
/// ```toml
/// destination = "logs/app.log"
/// level = "INFO"
/// max_size_mb = 1024
/// max_backups = 30
/// max_age_days = 30
/// encoding = "json"
/// message_key = "message"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggerConfig {
    /// Path of the active log file
    pub destination: PathBuf,
    /// Minimum level name, resolved with [`Level::resolve`]
    #[serde(default = "default_level")]
    pub level: String,
    /// Rotate once the file would exceed this many megabytes; 0 means 100
    #[serde(default = "default_max_size_mb")]
    pub max_size_mb: u64,
    /// Rotated files to keep; 0 keeps all
    #[serde(default)]
    pub max_backups: usize,
    /// Delete rotated files older than this many days; 0 never deletes
    #[serde(default)]
    pub max_age_days: u64,
    /// JSON key for the message, `msg` when unset
    #[serde(default)]
    pub message_key: Option<String>,
    /// Output format
    #[serde(default)]
    pub encoding: Encoding,
    /// Gzip rotated files
    #[serde(default = "default_true")]
    pub compress: bool,
    /// Use local time in backup names
    #[serde(default = "default_true")]
    pub local_time: bool,
    /// Panic on DPanic records
    #[serde(default)]
    pub development: bool,
    /// Color the level in console output
    #[serde(default)]
    pub color: bool,
}

fn default_level() -> String {
    Level::Info.as_str().to_string()
}

fn default_max_size_mb() -> u64 {
    DEFAULT_MAX_SIZE_MB
}

fn default_true() -> bool {
    true
}

impl LoggerConfig {
    /// Create a configuration with the rotation policy and defaults for
    /// everything else.
    pub fn new(
        destination: impl Into<PathBuf>,
        level: impl Into<String>,
        max_size_mb: u64,
        max_backups: usize,
        max_age_days: u64,
    ) -> Self {
        Self {
            destination: destination.into(),
            level: level.into(),
            max_size_mb,
            max_backups,
            max_age_days,
            message_key: None,
            encoding: Encoding::default(),
            compress: true,
            local_time: true,
            development: false,
            color: false,
        }
    }

    /// Set the JSON message key
    pub fn with_message_key(mut self, key: impl Into<String>) -> Self {
        self.message_key = Some(key.into());
        self
    }

    /// Set the output format
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Enable or disable gzip of rotated files
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Choose local time or UTC for backup names
    pub fn with_local_time(mut self, local_time: bool) -> Self {
        self.local_time = local_time;
        self
    }

    /// Enable development mode
    pub fn with_development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    /// Enable level colors in console output
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// The resolved minimum level
    pub fn min_level(&self) -> Level {
        Level::resolve(&self.level)
    }

    /// Encoder keys for this configuration
    pub fn encoder_config(&self) -> EncoderConfig {
        let config = EncoderConfig::default();
        match &self.message_key {
            Some(key) => config.with_message_key(key.clone()),
            None => config,
        }
    }

    /// Rotation policy for the destination file
    pub fn rotation(&self) -> Result<RotatingFileConfig> {
        let config = RotatingFileConfig::builder(&self.destination)
            .max_size_mb(self.max_size_mb)
            .max_backups(self.max_backups)
            .max_age_days(self.max_age_days)
            .compress(self.compress)
            .local_time(self.local_time)
            .build()?;
        Ok(config)
    }

    /// Parse a TOML document
    pub fn from_toml_str(document: &str) -> Result<Self> {
        Ok(toml::from_str(document)?)
    }

    /// Read and parse a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let document = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&document)
    }
}
