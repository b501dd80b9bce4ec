//! editor::session
//!
//! Import and export of the editor's pattern through a [`PatternStore`].
//!
//! # Invariants
//!
//! - A failed import leaves the current graph untouched
//! - A successful import replaces the graph in one step and cancels any
//!   in-progress drag
//! - Export serializes the graph before the first await, so later edits
//!   never leak into a pending write
//!
//! # Example
//!
//! ```
//! use stitchwork::core::graph::StitchGraph;
//! use stitchwork::core::pattern::memory::MemoryStore;
//! use stitchwork::core::types::Point;
//! use stitchwork::editor::{Editor, Session};
//!
//! # tokio_test::block_on(async {
//! let store = MemoryStore::new();
//! let mut session = Session::new(Editor::new(StitchGraph::new(Point::new(0.0, 0.0))));
//!
//! session.export(&store, "swatch.json").await.unwrap();
//! let count = session.import(&store, "swatch.json").await.unwrap();
//! assert_eq!(count, 1);
//! # });
//! ```

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::Editor;
use crate::core::pattern::{export_filename, parse_pattern, to_json, PatternError, PatternStore, StoreError};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] PatternError),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to serialize pattern: {0}")]
    Pattern(#[from] PatternError),
}

/// An editor bound to pattern storage.
#[derive(Debug, Clone)]
pub struct Session {
    editor: Editor,
}

impl Session {
    pub fn new(editor: Editor) -> Self {
        Self { editor }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn into_editor(self) -> Editor {
        self.editor
    }

    /// Replace the current pattern with `name` from `store`.
    ///
    /// Returns the number of stitches loaded.
    ///
    /// # Errors
    ///
    /// Returns `ImportError` if the store cannot supply the file or the
    /// file is not a valid pattern. The current graph is kept either way.
    pub async fn import<S>(&mut self, store: &S, name: &str) -> Result<usize, ImportError>
    where
        S: PatternStore + ?Sized,
    {
        let contents = store.open(name).await?;
        let graph = parse_pattern(&contents)?;
        let count = graph.len();
        self.editor.install_graph(graph);
        Ok(count)
    }

    /// Write the current pattern to `name` in `store`.
    pub async fn export<S>(&self, store: &S, name: &str) -> Result<(), ExportError>
    where
        S: PatternStore + ?Sized,
    {
        let contents = to_json(self.editor.graph())?;
        store.save(name, &contents).await?;
        Ok(())
    }

    /// Write the current pattern under a timestamped name built from
    /// `prefix`, returning the name used.
    pub async fn export_timestamped<S>(
        &self,
        store: &S,
        prefix: &str,
        at: DateTime<Utc>,
    ) -> Result<String, ExportError>
    where
        S: PatternStore + ?Sized,
    {
        let name = export_filename(prefix, at);
        self.export(store, &name).await?;
        Ok(name)
    }
}
