//! Core logger trait and the leveled method surface

use crate::{Field, Level, Record};
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Core logger trait
pub trait Logger: Send + Sync + 'static {
    /// Write a record. Callers are expected to check [`Logger::is_enabled`]
    /// first; the record is written regardless of its level.
    fn log(&self, record: &Record<'_>);

    /// Flush any buffered output
    fn flush(&self);

    /// Check if a level passes the threshold
    fn is_enabled(&self, level: Level) -> bool;

    /// Whether DPanic records should panic
    fn is_development(&self) -> bool {
        false
    }

    /// Create a child logger that adds `fields` to every record
    fn with_fields(&self, fields: Vec<Field>) -> Arc<dyn Logger>;
}

macro_rules! leveled_methods {
    ($level:expr, $name:literal, $plain:ident, $formatted:ident, $keyed:ident) => {
        #[doc = concat!("Log a message at ", $name, " level")]
        #[track_caller]
        fn $plain(&self, message: impl fmt::Display) {
            emit(self, $level, &message, &[]);
        }

        #[doc = concat!("Log a formatted message at ", $name, " level")]
        #[track_caller]
        fn $formatted(&self, args: fmt::Arguments<'_>) {
            emit(self, $level, &args, &[]);
        }

        #[doc = concat!("Log a message with fields at ", $name, " level")]
        #[track_caller]
        fn $keyed(&self, message: impl fmt::Display, fields: &[Field]) {
            emit(self, $level, &message, fields);
        }
    };
}

/// Leveled logging methods, available on every [`Logger`].
///
/// Each severity comes in three shapes: plain (`info`), formatted (`infof`,
/// usually through [`info!`](crate::info!)) and keyed (`infow`). Every
/// method records the location of its caller.
pub trait LoggerExt: Logger {
    leveled_methods!(Level::Debug, "debug", debug, debugf, debugw);
    leveled_methods!(Level::Info, "info", info, infof, infow);
    leveled_methods!(Level::Warn, "warn", warn, warnf, warnw);
    leveled_methods!(Level::Error, "error", error, errorf, errorw);
    leveled_methods!(Level::DPanic, "dpanic", dpanic, dpanicf, dpanicw);

    /// Log at panic level, then panic with the message
    #[track_caller]
    fn panic(&self, message: impl fmt::Display) -> ! {
        emit_panic(self, &message, &[])
    }

    /// Log a formatted message at panic level, then panic
    #[track_caller]
    fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        emit_panic(self, &args, &[])
    }

    /// Log a message with fields at panic level, then panic
    #[track_caller]
    fn panicw(&self, message: impl fmt::Display, fields: &[Field]) -> ! {
        emit_panic(self, &message, fields)
    }

    /// Log at fatal level, flush, then exit the process with status 1
    #[track_caller]
    fn fatal(&self, message: impl fmt::Display) -> ! {
        emit_fatal(self, &message, &[])
    }

    /// Log a formatted message at fatal level, flush, then exit with status 1
    #[track_caller]
    fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        emit_fatal(self, &args, &[])
    }

    /// Log a message with fields at fatal level, flush, then exit with
    /// status 1
    #[track_caller]
    fn fatalw(&self, message: impl fmt::Display, fields: &[Field]) -> ! {
        emit_fatal(self, &message, fields)
    }
}

// Implement for all loggers
impl<T: Logger + ?Sized> LoggerExt for T {}

#[track_caller]
fn write_record<L: Logger + ?Sized>(logger: &L, level: Level, message: &str, fields: &[Field]) {
    let record = Record::new(level, message)
        .with_caller(Location::caller().into())
        .with_fields(fields);
    logger.log(&record);
}

#[track_caller]
fn emit<L: Logger + ?Sized>(
    logger: &L,
    level: Level,
    message: &dyn fmt::Display,
    fields: &[Field],
) {
    let panics = level == Level::DPanic && logger.is_development();
    if !panics && !logger.is_enabled(level) {
        return;
    }

    let message = message.to_string();
    if logger.is_enabled(level) {
        write_record(logger, level, &message, fields);
    }
    if panics {
        logger.flush();
        panic!("{message}");
    }
}

#[track_caller]
fn emit_panic<L: Logger + ?Sized>(logger: &L, message: &dyn fmt::Display, fields: &[Field]) -> ! {
    let message = message.to_string();
    if logger.is_enabled(Level::Panic) {
        write_record(logger, Level::Panic, &message, fields);
    }
    logger.flush();
    panic!("{message}");
}

#[track_caller]
fn emit_fatal<L: Logger + ?Sized>(logger: &L, message: &dyn fmt::Display, fields: &[Field]) -> ! {
    if logger.is_enabled(Level::Fatal) {
        write_record(logger, Level::Fatal, &message.to_string(), fields);
    }
    logger.flush();
    std::process::exit(1);
}

/// Logger that discards everything.
///
/// Panic and fatal calls still panic and exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    #[inline(always)]
    fn log(&self, _record: &Record<'_>) {}

    #[inline(always)]
    fn flush(&self) {}

    #[inline(always)]
    fn is_enabled(&self, _level: Level) -> bool {
        false
    }

    fn with_fields(&self, _fields: Vec<Field>) -> Arc<dyn Logger> {
        Arc::new(NoOpLogger)
    }
}
