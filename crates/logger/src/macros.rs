//! Logging macros
//!
//! Formatted macros (`info!`) take `format!` style arguments; keyed macros
//! (`infow!`) take a message followed by `key => value` pairs. Both log to
//! the [global](crate::global) logger unless the first argument is
//! `logger: <expr>`.
//!
//! ```
//! use ares_logger::{info, infow, FileLogger, LoggerConfig, MemorySink};
//! use std::sync::Arc;
//!
//! let sink = MemorySink::new();
//! let config = LoggerConfig::new("app.log", "debug", 1, 1, 1);
//! let logger = FileLogger::with_sink(&config, Arc::new(sink.clone()));
//!
//! let port = 8080;
//! info!(logger: logger, "listening on {port}");
//! infow!(logger: logger, "request", "path" => "/health", "status" => 200);
//! assert_eq!(sink.lines().len(), 2);
//! ```

#[doc(hidden)]
#[macro_export]
macro_rules! __log_formatted {
    ($method:ident, logger: $logger:expr, $($arg:tt)+) => {{
        use $crate::LoggerExt as _;
        ($logger).$method(::core::format_args!($($arg)+))
    }};
    ($method:ident, $($arg:tt)+) => {{
        use $crate::LoggerExt as _;
        $crate::global().$method(::core::format_args!($($arg)+))
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_keyed {
    ($method:ident, logger: $logger:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {{
        use $crate::LoggerExt as _;
        ($logger).$method($msg, &[$($crate::Field::new($key, $value)),*])
    }};
    ($method:ident, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {{
        use $crate::LoggerExt as _;
        $crate::global().$method($msg, &[$($crate::Field::new($key, $value)),*])
    }};
}

/// Log a formatted message at debug level
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::__log_formatted!(debugf, $($arg)+) };
}

/// Log a formatted message at info level
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::__log_formatted!(infof, $($arg)+) };
}

/// Log a formatted message at warn level
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => { $crate::__log_formatted!(warnf, $($arg)+) };
}

/// Log a formatted message at error level
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::__log_formatted!(errorf, $($arg)+) };
}

/// Log a formatted message at dpanic level
#[macro_export]
macro_rules! dpanic {
    ($($arg:tt)+) => { $crate::__log_formatted!(dpanicf, $($arg)+) };
}

/// Log a formatted message at fatal level, then exit with status 1
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => { $crate::__log_formatted!(fatalf, $($arg)+) };
}

/// Log a message with `key => value` fields at debug level
#[macro_export]
macro_rules! debugw {
    ($($arg:tt)+) => { $crate::__log_keyed!(debugw, $($arg)+) };
}

/// Log a message with `key => value` fields at info level
#[macro_export]
macro_rules! infow {
    ($($arg:tt)+) => { $crate::__log_keyed!(infow, $($arg)+) };
}

/// Log a message with `key => value` fields at warn level
#[macro_export]
macro_rules! warnw {
    ($($arg:tt)+) => { $crate::__log_keyed!(warnw, $($arg)+) };
}

/// Log a message with `key => value` fields at error level
#[macro_export]
macro_rules! errorw {
    ($($arg:tt)+) => { $crate::__log_keyed!(errorw, $($arg)+) };
}

/// Log a message with `key => value` fields at dpanic level
#[macro_export]
macro_rules! dpanicw {
    ($($arg:tt)+) => { $crate::__log_keyed!(dpanicw, $($arg)+) };
}

/// Log a message with `key => value` fields at panic level, then panic
#[macro_export]
macro_rules! panicw {
    ($($arg:tt)+) => { $crate::__log_keyed!(panicw, $($arg)+) };
}

/// Log a message with `key => value` fields at fatal level, then exit with
/// status 1
#[macro_export]
macro_rules! fatalw {
    ($($arg:tt)+) => { $crate::__log_keyed!(fatalw, $($arg)+) };
}
