//! Byte sinks behind a logger

use ares_logger_file::RotatingFile;
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;

/// Destination for encoded records.
///
/// Each call to [`Sink::write_record`] carries exactly one encoded record and
/// must be written as a unit, so concurrent records never interleave.
pub trait Sink: Send + Sync + 'static {
    /// Write one encoded record
    fn write_record(&self, bytes: &[u8]) -> io::Result<()>;

    /// Flush buffered output to durable storage
    fn sync(&self) -> io::Result<()> {
        Ok(())
    }
}

impl Sink for RotatingFile {
    fn write_record(&self, bytes: &[u8]) -> io::Result<()> {
        RotatingFile::write(self, bytes)?;
        Ok(())
    }

    fn sync(&self) -> io::Result<()> {
        RotatingFile::sync(self)?;
        Ok(())
    }
}

/// In-memory sink, useful for capturing output in tests.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    /// Written records, one entry per line
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    /// Check if the output contains `text`
    pub fn contains(&self, text: &str) -> bool {
        self.contents().contains(text)
    }

    /// Discard captured output
    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write_record(&self, bytes: &[u8]) -> io::Result<()> {
        self.buffer.lock().extend_from_slice(bytes);
        Ok(())
    }
}
