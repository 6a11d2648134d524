//! Log severities and the level-name table

use std::fmt;

/// Log severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Debugging information
    Debug,
    /// General information
    #[default]
    Info,
    /// Warning messages
    Warn,
    /// Error messages
    Error,
    /// Errors that panic in development mode
    DPanic,
    /// Logs, then panics
    Panic,
    /// Logs, then exits the process
    Fatal,
}

impl Level {
    /// All levels in ascending order
    pub const ALL: [Self; 7] = [
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::DPanic,
        Self::Panic,
        Self::Fatal,
    ];

    /// Resolves a configured level name.
    ///
    /// Only the all-lowercase and all-uppercase spellings are recognized
    /// (`"warn"`, `"WARN"`). Anything else, including mixed case and the
    /// empty string, resolves to [`Level::Info`].
    pub fn resolve(name: &str) -> Self {
        match name {
            "debug" | "DEBUG" => Self::Debug,
            "info" | "INFO" => Self::Info,
            "warn" | "WARN" => Self::Warn,
            "error" | "ERROR" => Self::Error,
            "dpanic" | "DPANIC" => Self::DPanic,
            "panic" | "PANIC" => Self::Panic,
            "fatal" | "FATAL" => Self::Fatal,
            _ => Self::Info,
        }
    }

    /// Uppercase name, as written to log output
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::DPanic => "DPANIC",
            Self::Panic => "PANIC",
            Self::Fatal => "FATAL",
        }
    }

    /// Lowercase name
    pub const fn as_lowercase_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::DPanic => "dpanic",
            Self::Panic => "panic",
            Self::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Level {
    fn from(name: &str) -> Self {
        Self::resolve(name)
    }
}
