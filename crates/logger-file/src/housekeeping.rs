//! Background worker that prunes and compresses backups off the write path

use crate::backup;
use crate::config::RotatingFileConfig;
use crate::error::{Error, Result};
use std::thread::{self, JoinHandle};
use tracing::warn;

const WORKER_NAME: &str = "ares-logger-housekeeping";

enum Request {
    Prune,
    Drain(flume::Sender<()>),
}

/// Owns the housekeeping thread of one rotating file.
///
/// Requests are handled in order by a single worker, so a drain returns only
/// after every prune queued before it has finished. Dropping the handle
/// closes the channel and joins the worker.
#[derive(Debug)]
pub(crate) struct Housekeeper {
    sender: Option<flume::Sender<Request>>,
    worker: Option<JoinHandle<()>>,
}

impl Housekeeper {
    pub(crate) fn spawn(config: RotatingFileConfig) -> Result<Self> {
        let (sender, receiver) = flume::unbounded();
        let worker = thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || {
                for request in receiver.iter() {
                    match request {
                        Request::Prune => {
                            if let Err(e) = backup::prune(&config) {
                                warn!(
                                    path = %config.path.display(),
                                    error = %e,
                                    "backup housekeeping failed"
                                );
                            }
                        }
                        Request::Drain(done) => {
                            let _ = done.send(());
                        }
                    }
                }
            })?;

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
        })
    }

    /// Queue a prune without waiting for it.
    pub(crate) fn schedule(&self) {
        let sent = self
            .sender
            .as_ref()
            .is_some_and(|sender| sender.send(Request::Prune).is_ok());
        if !sent {
            warn!("housekeeping worker stopped, backups left as they are");
        }
    }

    /// Block until every queued request has been handled.
    pub(crate) fn drain(&self) -> Result<()> {
        let stopped = || Error::Housekeeping("worker stopped".to_string());
        let sender = self.sender.as_ref().ok_or_else(stopped)?;

        let (done, finished) = flume::bounded(1);
        sender.send(Request::Drain(done)).map_err(|_| stopped())?;
        finished.recv().map_err(|_| stopped())
    }
}

impl Drop for Housekeeper {
    fn drop(&mut self) {
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("housekeeping worker panicked");
            }
        }
    }
}
