//! core::pattern::memory
//!
//! In-memory pattern store for deterministic testing.
//!
//! # Example
//!
//! ```
//! use stitchwork::core::pattern::memory::{FailOn, MemoryStore};
//! use stitchwork::core::pattern::{PatternStore, StoreError};
//!
//! # tokio_test::block_on(async {
//! let store = MemoryStore::new().with_pattern("a.json", "[]");
//! assert_eq!(store.open("a.json").await.unwrap(), "[]");
//!
//! let failing = MemoryStore::new()
//!     .fail_on(FailOn::Save(StoreError::NotFound("disk".into())));
//! assert!(failing.save("a.json", "[]").await.is_err());
//! # });
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::store::{PatternStore, StoreError};

/// Memory-backed store.
///
/// Clones share state, so a test can keep a handle while the session under
/// test owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    patterns: HashMap<String, String>,
    fail_on: Option<FailOn>,
    operations: Vec<StoreOperation>,
}

/// Which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    Open(StoreError),
    Save(StoreError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOperation {
    Open { name: String },
    Save { name: String, contents: String },
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a pattern.
    pub fn with_pattern(self, name: &str, contents: &str) -> Self {
        self.lock()
            .patterns
            .insert(name.to_string(), contents.to_string());
        self
    }

    /// Make every call of one operation fail with the given error.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.lock().fail_on = Some(fail_on);
        self
    }

    pub fn clear_fail_on(&self) {
        self.lock().fail_on = None;
    }

    /// All operations seen so far, in call order.
    pub fn operations(&self) -> Vec<StoreOperation> {
        self.lock().operations.clone()
    }

    /// Current contents of a pattern.
    pub fn contents(&self, name: &str) -> Option<String> {
        self.lock().patterns.get(name).cloned()
    }

    /// Names of every stored pattern, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().patterns.keys().cloned().collect();
        names.sort();
        names
    }

    fn lock(&self) -> MutexGuard<'_, MemoryStoreInner> {
        // A panicking test thread must not hide the recorded state from others.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl PatternStore for MemoryStore {
    async fn open(&self, name: &str) -> Result<String, StoreError> {
        let mut inner = self.lock();
        inner.operations.push(StoreOperation::Open {
            name: name.to_string(),
        });
        if let Some(FailOn::Open(err)) = &inner.fail_on {
            return Err(err.clone());
        }
        inner
            .patterns
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    async fn save(&self, name: &str, contents: &str) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.operations.push(StoreOperation::Save {
            name: name.to_string(),
            contents: contents.to_string(),
        });
        if let Some(FailOn::Save(err)) = &inner.fail_on {
            return Err(err.clone());
        }
        inner
            .patterns
            .insert(name.to_string(), contents.to_string());
        Ok(())
    }
}
