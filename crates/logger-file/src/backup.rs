//! Rotated file naming, discovery and housekeeping

use crate::config::RotatingFileConfig;
use crate::error::{Error, Result};
use chrono::{Local, NaiveDateTime, TimeDelta, Utc};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Timestamp layout embedded in backup file names.
pub const BACKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";

/// Suffix appended to compressed backups.
pub const COMPRESS_SUFFIX: &str = ".gz";

/// A rotated log file found next to the active file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupFile {
    /// Location on disk
    pub path: PathBuf,
    /// Rotation time parsed from the file name
    pub timestamp: NaiveDateTime,
    /// Whether the file has been gzipped
    pub compressed: bool,
}

/// Current wall-clock time in the frame used for backup names.
pub(crate) fn now(local_time: bool) -> NaiveDateTime {
    if local_time {
        Local::now().naive_local()
    } else {
        Utc::now().naive_utc()
    }
}

/// Path a backup rotated at `timestamp` is renamed to.
pub(crate) fn backup_path(config: &RotatingFileConfig, timestamp: NaiveDateTime) -> PathBuf {
    let (stem, ext) = config.name_parts();
    config.directory().join(format!(
        "{stem}-{}{ext}",
        timestamp.format(BACKUP_TIME_FORMAT)
    ))
}

fn parse_backup_name(name: &str, prefix: &str, ext: &str) -> Option<(NaiveDateTime, bool)> {
    let (name, compressed) = match name.strip_suffix(COMPRESS_SUFFIX) {
        Some(stripped) => (stripped, true),
        None => (name, false),
    };
    let stamp = name.strip_prefix(prefix)?.strip_suffix(ext)?;
    NaiveDateTime::parse_from_str(stamp, BACKUP_TIME_FORMAT)
        .ok()
        .map(|timestamp| (timestamp, compressed))
}

/// Lists backups of the configured file, newest first.
pub(crate) fn list_backups(config: &RotatingFileConfig) -> Result<Vec<BackupFile>> {
    let (stem, ext) = config.name_parts();
    let prefix = format!("{stem}-");

    let entries = match fs::read_dir(config.directory()) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut backups = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some((timestamp, compressed)) = parse_backup_name(name, &prefix, &ext) {
            backups.push(BackupFile {
                path: entry.path(),
                timestamp,
                compressed,
            });
        }
    }

    backups.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then(a.compressed.cmp(&b.compressed))
    });
    Ok(backups)
}

/// Applies the retention policy: count limit, age limit, then compression.
///
/// Every candidate is attempted; the first failure is returned.
pub(crate) fn prune(config: &RotatingFileConfig) -> Result<()> {
    let mut remaining = list_backups(config)?;
    let mut expired = Vec::new();

    if config.max_backups > 0 {
        // A backup and its compressed twin count once.
        let mut seen = HashSet::new();
        let mut keep = Vec::with_capacity(remaining.len());
        for backup in remaining {
            seen.insert(backup.timestamp);
            if seen.len() > config.max_backups {
                expired.push(backup);
            } else {
                keep.push(backup);
            }
        }
        remaining = keep;
    }

    if config.max_age_days > 0 {
        let days = i64::try_from(config.max_age_days).unwrap_or(i64::MAX);
        let cutoff = TimeDelta::try_days(days)
            .and_then(|age| now(config.local_time).checked_sub_signed(age));
        if let Some(cutoff) = cutoff {
            let (old, keep): (Vec<_>, Vec<_>) = remaining
                .into_iter()
                .partition(|backup| backup.timestamp < cutoff);
            expired.extend(old);
            remaining = keep;
        }
    }

    let mut first_error = None;

    for backup in expired {
        match fs::remove_file(&backup.path) {
            Ok(()) => debug!(path = %backup.path.display(), "removed expired backup"),
            Err(e) => {
                warn!(path = %backup.path.display(), error = %e, "failed to remove backup");
                first_error.get_or_insert(Error::Io(e));
            }
        }
    }

    if config.compress {
        for backup in remaining.iter().filter(|backup| !backup.compressed) {
            match compress_file(&backup.path) {
                Ok(target) => debug!(path = %target.display(), "compressed backup"),
                Err(e) => {
                    warn!(path = %backup.path.display(), error = %e, "failed to compress backup");
                    first_error.get_or_insert(e);
                }
            }
        }
    }

    first_error.map_or(Ok(()), Err)
}

/// Gzips `path` into `path.gz` and removes the original.
pub(crate) fn compress_file(path: &Path) -> Result<PathBuf> {
    let mut target = path.as_os_str().to_owned();
    target.push(COMPRESS_SUFFIX);
    let target = PathBuf::from(target);

    let mut source = File::open(path)?;
    let mut encoder = GzEncoder::new(File::create(&target)?, Compression::default());

    match io::copy(&mut source, &mut encoder).and_then(|_| encoder.finish()) {
        Ok(file) => file.sync_all()?,
        Err(e) => {
            let _ = fs::remove_file(&target);
            return Err(e.into());
        }
    }

    fs::remove_file(path)?;
    Ok(target)
}
