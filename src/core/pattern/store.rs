//! core::pattern::store
//!
//! Storage backends for pattern files.
//!
//! # Design
//!
//! The `PatternStore` trait is async because opening and saving a pattern
//! involves I/O the editor must not block on. Stores only move text; parsing
//! and validation belong to [`super::schema`].
//!
//! # Example
//!
//! ```
//! use stitchwork::core::pattern::{FileStore, PatternStore};
//!
//! # tokio_test::block_on(async {
//! let dir = tempfile::tempdir().unwrap();
//! let store = FileStore::new(dir.path());
//!
//! store.save("scarf.json", "[]").await.unwrap();
//! assert_eq!(store.open("scarf.json").await.unwrap(), "[]");
//! # });
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

/// Errors from pattern storage.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("pattern not found: {0}")]
    NotFound(String),

    #[error("failed to open pattern '{name}': {message}")]
    Open { name: String, message: String },

    #[error("failed to save pattern '{name}': {message}")]
    Save { name: String, message: String },
}

/// A place patterns can be read from and written to.
#[async_trait]
pub trait PatternStore: Send + Sync {
    /// Read the full text of a pattern.
    async fn open(&self, name: &str) -> Result<String, StoreError>;

    /// Replace the full text of a pattern, creating it if needed.
    async fn save(&self, name: &str, contents: &str) -> Result<(), StoreError>;
}

/// Store backed by a directory on disk.
///
/// Names are joined onto the root directory. Saves go through a temporary
/// file and a rename, so a reader never sees a half-written pattern.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path for a pattern name.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[async_trait]
impl PatternStore for FileStore {
    async fn open(&self, name: &str) -> Result<String, StoreError> {
        let path = self.path_for(name);
        tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(path.display().to_string())
            } else {
                StoreError::Open {
                    name: name.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    async fn save(&self, name: &str, contents: &str) -> Result<(), StoreError> {
        let path = self.path_for(name);
        let save_err = |e: std::io::Error| StoreError::Save {
            name: name.to_string(),
            message: e.to_string(),
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(save_err)?;
        }

        let mut temp = path.clone().into_os_string();
        temp.push(".tmp");
        let temp = PathBuf::from(temp);

        tokio::fs::write(&temp, contents).await.map_err(save_err)?;
        tokio::fs::rename(&temp, &path).await.map_err(save_err)?;
        Ok(())
    }
}
