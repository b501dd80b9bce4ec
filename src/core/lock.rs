//! core::lock
//!
//! Exclusive lock on a pattern file.
//!
//! # Architecture
//!
//! Every CLI command that rewrites a pattern holds this lock for the whole
//! read-modify-write, so two `stitch` processes editing the same file cannot
//! interleave and lose a stitch. The lock lives in a sibling file named
//! `<pattern>.lock`; the pattern file itself is only ever replaced by rename.
//!
//! # Invariants
//!
//! - Lock must be held from the read until the rename completes
//! - Lock is released on drop
//! - Acquisition is non-blocking (fails fast if locked)
//!
//! # Example
//!
//! ```
//! use stitchwork::core::lock::{LockError, PatternLock};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let pattern = dir.path().join("scarf.json");
//!
//! let lock = PatternLock::acquire(&pattern).unwrap();
//! assert!(lock.is_held());
//! assert!(matches!(
//!     PatternLock::acquire(&pattern),
//!     Err(LockError::AlreadyLocked(_))
//! ));
//! drop(lock);
//! assert!(PatternLock::acquire(&pattern).is_ok());
//! ```

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

/// Errors from locking operations.
#[derive(Debug, Error)]
pub enum LockError {
    /// Another process already holds the lock.
    #[error("pattern '{0}' is locked by another stitch process")]
    AlreadyLocked(PathBuf),

    #[error("failed to create lock: {0}")]
    CreateFailed(String),

    #[error("failed to acquire lock: {0}")]
    AcquireFailed(String),

    #[error("failed to release lock: {0}")]
    ReleaseFailed(String),
}

/// An exclusive lock on one pattern file.
#[derive(Debug)]
pub struct PatternLock {
    path: PathBuf,
    /// Some while the lock is held.
    file: Option<File>,
}

impl PatternLock {
    /// Lock file path for a pattern.
    pub fn lock_path(pattern: &Path) -> PathBuf {
        let mut name = pattern.as_os_str().to_os_string();
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Attempt to lock `pattern`.
    ///
    /// # Errors
    ///
    /// - [`LockError::AlreadyLocked`] if another process holds the lock
    /// - [`LockError::CreateFailed`] if the lock file cannot be created
    /// - [`LockError::AcquireFailed`] if the OS lock cannot be acquired
    pub fn acquire(pattern: &Path) -> Result<Self, LockError> {
        if let Some(dir) = pattern.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| {
                LockError::CreateFailed(format!("cannot create {}: {}", dir.display(), e))
            })?;
        }

        let path = Self::lock_path(pattern);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| {
                LockError::CreateFailed(format!("cannot open {}: {}", path.display(), e))
            })?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(Self {
                path,
                file: Some(file),
            }),
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
                Err(LockError::AlreadyLocked(pattern.to_path_buf()))
            }
            Err(e) => Err(LockError::AcquireFailed(e.to_string())),
        }
    }

    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }

    /// Path of the lock file (not the pattern).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the lock before the guard goes out of scope.
    pub fn release(&mut self) -> Result<(), LockError> {
        if let Some(file) = self.file.take() {
            FileExt::unlock(&file).map_err(|e| LockError::ReleaseFailed(e.to_string()))?;
        }
        Ok(())
    }
}

impl Drop for PatternLock {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            let _ = FileExt::unlock(&file);
        }
    }
}
