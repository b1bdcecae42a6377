//! Rotation policy and the rotating file sink.
//!
//! Rotation itself is done by `file-rotate`: the active file is cut once a
//! write takes it past the size limit, renamed to `<name>.<timestamp>` and
//! gzipped. [`RotatingFile`] opens it lazily, maps the [`RotationPolicy`] onto
//! it and drops backups older than the age limit.

use crate::error::{Error, Result};
use file_rotate::compression::Compression;
use file_rotate::suffix::{AppendTimestamp, FileLimit};
use file_rotate::{ContentLimit, FileRotate};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

/// Default maximum size of the active file, in megabytes
pub const DEFAULT_MAX_SIZE_MB: u64 = 10;

/// Default number of backups to keep
pub const DEFAULT_MAX_BACKUPS: usize = 3;

/// Default maximum backup age, in days
pub const DEFAULT_MAX_AGE_DAYS: u64 = 30;

/// Backups are gzipped by default
pub const DEFAULT_COMPRESS: bool = true;

const MEGABYTE: u64 = 1024 * 1024;
const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// When to roll the active file over and which backups to keep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Maximum size of the active file, in megabytes
    pub max_size_mb: u64,
    /// Maximum number of backups to keep (0 keeps all)
    pub max_backups: usize,
    /// Delete backups older than this many days (0 keeps all)
    pub max_age_days: u64,
    /// Gzip backups after rotation
    pub compress: bool,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_size_mb: DEFAULT_MAX_SIZE_MB,
            max_backups: DEFAULT_MAX_BACKUPS,
            max_age_days: DEFAULT_MAX_AGE_DAYS,
            compress: DEFAULT_COMPRESS,
        }
    }
}

impl RotationPolicy {
    /// Set the maximum active file size in megabytes
    #[must_use]
    pub const fn with_max_size_mb(mut self, max_size_mb: u64) -> Self {
        self.max_size_mb = max_size_mb;
        self
    }

    /// Set the number of backups to keep
    #[must_use]
    pub const fn with_max_backups(mut self, max_backups: usize) -> Self {
        self.max_backups = max_backups;
        self
    }

    /// Set the maximum backup age in days
    #[must_use]
    pub const fn with_max_age_days(mut self, max_age_days: u64) -> Self {
        self.max_age_days = max_age_days;
        self
    }

    /// Enable or disable backup compression
    #[must_use]
    pub const fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Maximum active file size in bytes
    #[must_use]
    pub const fn max_size_bytes(&self) -> u64 {
        self.max_size_mb.saturating_mul(MEGABYTE)
    }

    /// Check the policy for values that make rotation impossible
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the maximum size is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_size_mb == 0 {
            return Err(Error::Configuration(
                "max_size_mb must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    fn content_limit(max_bytes: u64) -> ContentLimit {
        ContentLimit::BytesSurpassed(usize::try_from(max_bytes).unwrap_or(usize::MAX))
    }

    fn file_limit(&self) -> FileLimit {
        if self.max_backups == 0 {
            FileLimit::Unlimited
        } else {
            FileLimit::MaxFiles(self.max_backups)
        }
    }

    fn compression(&self) -> Compression {
        if self.compress {
            Compression::OnRotate(0)
        } else {
            Compression::None
        }
    }

    fn max_age(&self) -> Option<Duration> {
        (self.max_age_days > 0)
            .then(|| Duration::from_secs(self.max_age_days.saturating_mul(SECONDS_PER_DAY)))
    }
}

/// Log file writer that rotates by size and prunes old backups.
///
/// Nothing is opened until the first write. A single write is never split
/// across files; the active file may exceed the limit by at most that write.
pub struct RotatingFile {
    path: PathBuf,
    policy: RotationPolicy,
    max_bytes: u64,
    inner: Option<FileRotate<AppendTimestamp>>,
    backups: usize,
}

impl RotatingFile {
    /// Create a writer for `path`
    pub fn new(path: impl Into<PathBuf>, policy: RotationPolicy) -> Self {
        let max_bytes = policy.max_size_bytes();
        Self {
            path: path.into(),
            policy,
            max_bytes,
            inner: None,
            backups: 0,
        }
    }

    #[cfg(test)]
    const fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Path of the active log file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rotation policy in effect
    #[must_use]
    pub const fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    /// Rotated-out files, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the log directory cannot be created.
    pub fn backups(&mut self) -> Result<Vec<PathBuf>> {
        Ok(self.open()?.log_paths())
    }

    /// Move the active file to a backup and start a new one
    ///
    /// # Errors
    ///
    /// Returns an error if the log directory cannot be created or the
    /// rotation fails.
    pub fn rotate(&mut self) -> Result<()> {
        self.open()?
            .rotate()
            .map_err(|e| Error::Rotation(format!("{}: {e}", self.path.display())))?;
        self.after_write();
        Ok(())
    }

    /// Close the active file. The next write reopens it.
    pub fn close(&mut self) {
        self.inner = None;
    }

    fn open(&mut self) -> Result<&mut FileRotate<AppendTimestamp>> {
        if self.inner.is_none() {
            if let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(dir).map_err(|source| Error::CreateDirectory {
                    path: dir.to_path_buf(),
                    source,
                })?;
            }

            self.reopen();
        }

        self.inner
            .as_mut()
            .ok_or_else(|| Error::Io("log file not open", io::Error::from(io::ErrorKind::NotFound)))
    }

    fn reopen(&mut self) {
        let mut file = FileRotate::new(
            &self.path,
            AppendTimestamp::default(self.policy.file_limit()),
            RotationPolicy::content_limit(self.max_bytes),
            self.policy.compression(),
            #[cfg(unix)]
            None,
        );
        self.backups = file.log_paths().len();
        self.inner = Some(file);
        self.remove_expired();
    }

    /// Age limit is checked whenever the set of backups changes
    fn after_write(&mut self) {
        let Some(file) = self.inner.as_mut() else {
            return;
        };

        let backups = file.log_paths().len();
        if backups != self.backups {
            self.backups = backups;
            debug!(path = %self.path.display(), backups, "rotated log file");
            self.remove_expired();
        }
    }

    fn remove_expired(&mut self) {
        let (Some(max_age), Some(file)) = (self.policy.max_age(), self.inner.as_mut()) else {
            return;
        };
        let Some(cutoff) = SystemTime::now().checked_sub(max_age) else {
            return;
        };

        let mut removed = false;
        for backup in file.log_paths() {
            let expired = fs::metadata(&backup)
                .and_then(|m| m.modified())
                .is_ok_and(|modified| modified < cutoff);
            if !expired {
                continue;
            }

            match fs::remove_file(&backup) {
                Ok(()) => removed = true,
                Err(e) => {
                    warn!(error = %e, path = %backup.display(), "failed to remove old log file");
                }
            }
        }

        // Rescan the backup index from disk
        if removed {
            self.reopen();
        }
    }
}

impl fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .field("open", &self.inner.is_some())
            .finish_non_exhaustive()
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let file = self.open()?;
        file.write_all(buf)?;
        file.flush()?;
        self.after_write();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.as_mut().map_or(Ok(()), Write::flush)
    }
}
