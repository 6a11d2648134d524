//! Log record passed from the method surface to the encoder

use crate::{Field, Level};
use chrono::{DateTime, Local};
use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

/// A log record, built per call and encoded immediately
#[derive(Debug, Clone)]
pub struct Record<'a> {
    /// Log level
    pub level: Level,
    /// The log message
    pub message: Cow<'a, str>,
    /// When the record was created
    pub timestamp: DateTime<Local>,
    /// Application call site
    pub caller: Option<Caller>,
    /// Fields of a keyed call, in call order
    pub fields: &'a [Field],
}

impl<'a> Record<'a> {
    /// Create a record stamped with the current local time
    #[inline]
    pub fn new(level: Level, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Local::now(),
            caller: None,
            fields: &[],
        }
    }

    /// Builder-style method for setting the call site
    #[inline]
    pub fn with_caller(mut self, caller: Caller) -> Self {
        self.caller = Some(caller);
        self
    }

    /// Builder-style method for setting fields
    #[inline]
    pub fn with_fields(mut self, fields: &'a [Field]) -> Self {
        self.fields = fields;
        self
    }

    /// Builder-style method for overriding the timestamp
    #[inline]
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Source location of a logging call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// Source file path as reported by the compiler
    pub file: Cow<'static, str>,
    /// Line number
    pub line: u32,
}

impl Caller {
    /// Create a caller location
    pub fn new(file: impl Into<Cow<'static, str>>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// The location of the `#[track_caller]` chain's origin
    #[track_caller]
    pub fn here() -> Self {
        Location::caller().into()
    }

    /// File path shortened to its parent directory and file name
    pub fn trimmed_file(&self) -> &str {
        let is_separator = |c: char| c == '/' || c == '\\';
        let file = self.file.as_ref();
        let Some(last) = file.rfind(is_separator) else {
            return file;
        };
        match file[..last].rfind(is_separator) {
            Some(previous) => &file[previous + 1..],
            None => file,
        }
    }
}

impl From<&'static Location<'static>> for Caller {
    fn from(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.trimmed_file(), self.line)
    }
}

/// Space-joined rendering of several operands, for plain calls with more
/// than one value.
///
/// ```
/// use ares_logger::Sprint;
///
/// assert_eq!(Sprint(&[&"retry", &3, &"of", &5]).to_string(), "retry 3 of 5");
/// ```
#[derive(Clone, Copy)]
pub struct Sprint<'a>(pub &'a [&'a dyn fmt::Display]);

impl fmt::Display for Sprint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, operand) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{operand}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Sprint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sprint({self})")
    }
}
