//! Size based rotating file writer

use crate::backup::{self, BackupFile, COMPRESS_SUFFIX};
use crate::config::RotatingFileConfig;
use crate::error::{Error, Result};
use crate::housekeeping::Housekeeper;
use chrono::{NaiveDateTime, SubsecRound, TimeDelta};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A log file that rotates itself once it grows past its size limit.
///
/// All writes go through an internal mutex, so a shared `&RotatingFile` can
/// be written from many threads and every `write` lands contiguously in one
/// file.
///
/// Rotation only renames the full file and opens a fresh one while the lock
/// is held. Pruning and compressing backups happens on a dedicated
/// housekeeping thread, so other writers never wait for it.
#[derive(Debug)]
pub struct RotatingFile {
    config: RotatingFileConfig,
    state: Mutex<State>,
    housekeeper: Housekeeper,
}

#[derive(Debug, Default)]
struct State {
    file: Option<File>,
    size: u64,
    last_backup: Option<NaiveDateTime>,
}

impl RotatingFile {
    /// Opens (or creates) the active file described by `config`.
    ///
    /// Missing parent directories are created. An existing file is appended
    /// to, unless it is already at its size limit, in which case it is
    /// rotated first.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file cannot
    /// be opened.
    pub fn open(config: RotatingFileConfig) -> Result<Self> {
        let writer = Self {
            housekeeper: Housekeeper::spawn(config.clone())?,
            config,
            state: Mutex::new(State::default()),
        };

        {
            let mut state = writer.state.lock();
            writer.open_existing_or_new(&mut state, 0)?;
        }

        debug!(
            path = %writer.config.path.display(),
            max_size = writer.config.max_size,
            max_backups = writer.config.max_backups,
            max_age_days = writer.config.max_age_days,
            compress = writer.config.compress,
            "opened rotating log file"
        );

        Ok(writer)
    }

    /// Configuration the file was opened with
    pub fn config(&self) -> &RotatingFileConfig {
        &self.config
    }

    /// Path of the active file
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Bytes written to the active file so far
    pub fn size(&self) -> u64 {
        self.state.lock().size
    }

    /// Writes `buf` to the active file, rotating first if it would exceed the
    /// size limit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WriteTooLarge`] if `buf` alone is larger than the
    /// limit, or an I/O error from rotating or writing.
    pub fn write(&self, buf: &[u8]) -> Result<usize> {
        let len = buf.len() as u64;
        if len > self.config.max_size {
            return Err(Error::WriteTooLarge {
                len,
                max: self.config.max_size,
            });
        }

        let mut state = self.state.lock();

        if state.file.is_none() {
            self.open_existing_or_new(&mut state, len)?;
        }

        if state.size + len > self.config.max_size {
            self.rotate_locked(&mut state)?;
        }

        let file = state
            .file
            .as_mut()
            .ok_or_else(|| Error::Rotation("no active log file".to_string()))?;
        file.write_all(buf)?;
        state.size += len;

        Ok(buf.len())
    }

    /// Forces a rotation regardless of the current size.
    ///
    /// # Errors
    ///
    /// Returns an error if the active file cannot be renamed or reopened.
    pub fn rotate(&self) -> Result<()> {
        let mut state = self.state.lock();
        self.rotate_locked(&mut state)
    }

    /// Flushes the active file to disk.
    ///
    /// # Errors
    ///
    /// Returns an I/O error from the underlying `fsync`.
    pub fn sync(&self) -> Result<()> {
        if let Some(file) = self.state.lock().file.as_ref() {
            file.sync_all()?;
        }
        Ok(())
    }

    /// Closes the active file and waits for pending housekeeping. The next
    /// write reopens the file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the final flush fails, or
    /// [`Error::Housekeeping`] if the housekeeping thread has stopped.
    pub fn close(&self) -> Result<()> {
        {
            let mut state = self.state.lock();
            if let Some(file) = state.file.take() {
                file.sync_all()?;
            }
        }
        self.housekeeper.drain()
    }

    /// Blocks until every prune and compression queued by earlier rotations
    /// has finished. Writes are not held up while waiting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Housekeeping`] if the housekeeping thread has stopped.
    pub fn wait_for_housekeeping(&self) -> Result<()> {
        self.housekeeper.drain()
    }

    /// Rotated files next to the active file, newest first.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be read.
    pub fn backups(&self) -> Result<Vec<BackupFile>> {
        backup::list_backups(&self.config)
    }

    fn open_existing_or_new(&self, state: &mut State, write_len: u64) -> Result<()> {
        self.ensure_directory()?;

        match fs::metadata(&self.config.path) {
            Ok(meta) if meta.len() + write_len >= self.config.max_size && meta.len() > 0 => {
                self.rotate_locked(state)
            }
            Ok(meta) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.config.path)
                    .map_err(|source| Error::Open {
                        path: self.config.path.clone(),
                        source,
                    })?;
                state.file = Some(file);
                state.size = meta.len();
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => self.open_new(state),
            Err(e) => Err(e.into()),
        }
    }

    fn open_new(&self, state: &mut State) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.config.path)
            .map_err(|source| Error::Open {
                path: self.config.path.clone(),
                source,
            })?;
        state.file = Some(file);
        state.size = 0;
        Ok(())
    }

    fn ensure_directory(&self) -> Result<()> {
        let dir = self.config.directory();
        fs::create_dir_all(dir).map_err(|source| Error::CreateDirectory {
            path: dir.to_path_buf(),
            source,
        })
    }

    fn rotate_locked(&self, state: &mut State) -> Result<()> {
        state.file = None;
        self.ensure_directory()?;

        if self.config.path.exists() {
            let backup = self.next_backup_path(state);
            fs::rename(&self.config.path, &backup).map_err(|e| {
                Error::Rotation(format!(
                    "renaming {} to {}: {e}",
                    self.config.path.display(),
                    backup.display()
                ))
            })?;
            debug!(backup = %backup.display(), "rotated log file");
        }

        self.open_new(state)?;
        self.housekeeper.schedule();
        Ok(())
    }

    /// Picks a backup name strictly newer than the previous one and not
    /// already taken on disk.
    fn next_backup_path(&self, state: &mut State) -> PathBuf {
        let mut stamp = backup::now(self.config.local_time).trunc_subsecs(3);
        if let Some(last) = state.last_backup {
            if stamp <= last {
                stamp = last + TimeDelta::milliseconds(1);
            }
        }

        let mut path = backup::backup_path(&self.config, stamp);
        while path.exists() || compressed_twin(&path).exists() {
            stamp += TimeDelta::milliseconds(1);
            path = backup::backup_path(&self.config, stamp);
        }

        state.last_backup = Some(stamp);
        path
    }
}

fn compressed_twin(path: &Path) -> PathBuf {
    let mut twin = path.as_os_str().to_owned();
    twin.push(COMPRESS_SUFFIX);
    PathBuf::from(twin)
}

impl Write for &RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        RotatingFile::write(self, buf).map_err(Into::into)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        RotatingFile::write(self, buf).map_err(Into::into)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
