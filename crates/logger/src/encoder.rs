//! Record encoders: tab-separated console lines and JSON objects

use crate::{Field, Level, Record, Result};
use serde::Deserialize;
use serde::Serializer as _;
use serde::ser::SerializeMap;
use std::io::Write;
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

/// Timestamp layout: local time, milliseconds, numeric UTC offset
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Default key for the message in JSON output
pub const DEFAULT_MESSAGE_KEY: &str = "msg";

/// Renders records into bytes, one newline-terminated entry per record.
pub trait Encoder: Send + Sync + 'static {
    /// Append the encoded `record` to `buf`.
    ///
    /// `context` holds fields inherited from parent loggers; they are
    /// written before the record's own fields.
    fn encode(&self, record: &Record<'_>, context: &[Field], buf: &mut Vec<u8>) -> Result<()>;
}

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Tab-separated human-readable lines
    #[default]
    Console,
    /// One JSON object per line
    Json,
}

impl Encoding {
    /// Build the encoder for this format.
    ///
    /// `color` only affects console output.
    pub fn encoder(self, config: EncoderConfig, color: bool) -> Box<dyn Encoder> {
        match self {
            Self::Console => Box::new(ConsoleEncoder::new().with_color(color)),
            Self::Json => Box::new(JsonEncoder::new(config)),
        }
    }
}

/// Keys used for the fixed parts of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Timestamp key
    pub time_key: String,
    /// Level key
    pub level_key: String,
    /// Caller key
    pub caller_key: String,
    /// Message key
    pub message_key: String,
}

impl EncoderConfig {
    /// Override the message key
    pub fn with_message_key(mut self, key: impl Into<String>) -> Self {
        self.message_key = key.into();
        self
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            time_key: "ts".to_string(),
            level_key: "level".to_string(),
            caller_key: "caller".to_string(),
            message_key: DEFAULT_MESSAGE_KEY.to_string(),
        }
    }
}

/// Development-style console encoder.
///
/// Produces `ts<TAB>LEVEL<TAB>caller<TAB>message` followed, when the record
/// carries fields, by a tab and the fields as a JSON object. Console lines
/// are positional, so they take no [`EncoderConfig`].
#[derive(Debug, Clone, Default)]
pub struct ConsoleEncoder {
    color: bool,
}

impl ConsoleEncoder {
    /// Create a console encoder
    pub fn new() -> Self {
        Self { color: false }
    }

    /// Color the level with ANSI escapes
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn write_level(&self, level: Level, buf: &mut Vec<u8>) -> Result<()> {
        if !self.color {
            buf.extend_from_slice(level.as_str().as_bytes());
            return Ok(());
        }

        let color = match level {
            Level::Debug => Color::Magenta,
            Level::Info => Color::Blue,
            Level::Warn => Color::Yellow,
            Level::Error | Level::DPanic | Level::Panic | Level::Fatal => Color::Red,
        };
        let mut colored = Buffer::ansi();
        colored.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        colored.write_all(level.as_str().as_bytes())?;
        colored.reset()?;
        buf.extend_from_slice(colored.as_slice());
        Ok(())
    }
}

impl Encoder for ConsoleEncoder {
    fn encode(&self, record: &Record<'_>, context: &[Field], buf: &mut Vec<u8>) -> Result<()> {
        write!(buf, "{}\t", record.timestamp.format(TIME_FORMAT))?;
        self.write_level(record.level, buf)?;
        if let Some(caller) = &record.caller {
            write!(buf, "\t{caller}")?;
        }
        write!(buf, "\t{}", record.message)?;

        if !context.is_empty() || !record.fields.is_empty() {
            buf.push(b'\t');
            let mut serializer = serde_json::Serializer::new(&mut *buf);
            let mut map = (&mut serializer).serialize_map(None)?;
            for field in context.iter().chain(record.fields) {
                map.serialize_entry(&field.key, &field.value)?;
            }
            map.end()?;
        }

        buf.push(b'\n');
        Ok(())
    }
}

/// Production-style JSON encoder.
///
/// Keys are written in a fixed order (timestamp, level, caller, message)
/// followed by context and record fields in call order. Duplicate field
/// keys are written as given.
#[derive(Debug, Clone, Default)]
pub struct JsonEncoder {
    config: EncoderConfig,
}

impl JsonEncoder {
    /// Create a JSON encoder
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, record: &Record<'_>, context: &[Field], buf: &mut Vec<u8>) -> Result<()> {
        let timestamp = record.timestamp.format(TIME_FORMAT).to_string();

        let mut serializer = serde_json::Serializer::new(&mut *buf);
        let mut map = (&mut serializer).serialize_map(None)?;
        map.serialize_entry(&self.config.time_key, &timestamp)?;
        map.serialize_entry(&self.config.level_key, record.level.as_str())?;
        if let Some(caller) = &record.caller {
            map.serialize_entry(&self.config.caller_key, &caller.to_string())?;
        }
        map.serialize_entry(&self.config.message_key, &record.message)?;
        for field in context.iter().chain(record.fields) {
            map.serialize_entry(&field.key, &field.value)?;
        }
        map.end()?;

        buf.push(b'\n');
        Ok(())
    }
}
