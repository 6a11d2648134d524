//! Process-wide logger used by the logging macros

use crate::{Error, Logger, NoOpLogger, Result};
use std::sync::{Arc, OnceLock};

static GLOBAL_LOGGER: OnceLock<Arc<dyn Logger>> = OnceLock::new();
static NOOP: NoOpLogger = NoOpLogger;

/// Install the global logger. Can only be called once per process.
pub fn init(logger: Arc<dyn Logger>) -> Result<()> {
    GLOBAL_LOGGER
        .set(logger)
        .map_err(|_| Error::AlreadyInitialized)
}

/// The global logger, or a [`NoOpLogger`] before [`init`] is called.
#[inline]
pub fn global() -> &'static dyn Logger {
    match GLOBAL_LOGGER.get() {
        Some(logger) => logger.as_ref(),
        None => &NOOP,
    }
}

/// Whether [`init`] has been called
pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}
