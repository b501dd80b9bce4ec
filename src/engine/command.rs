//! engine::command
//!
//! Command traits for the edit lifecycle.
//!
//! # Architecture
//!
//! Every command that changes a pattern implements [`Command`]: it receives
//! the loaded graph and edits it in place. Everything around the edit
//! (locking, loading, verification, saving) belongs to
//! [`crate::engine::runner`], so a command never touches the filesystem.
//!
//! Query commands implement [`ReadOnlyCommand`] and only ever see a shared
//! reference.
//!
//! # Invariants
//!
//! - `apply` is pure with respect to I/O
//! - An `apply` error means nothing is written
//!
//! # Example
//!
//! ```
//! use stitchwork::core::graph::StitchGraph;
//! use stitchwork::core::types::Point;
//! use stitchwork::engine::command::{resolve_index, Command, EditError};
//!
//! struct Nudge {
//!     index: usize,
//!     by: Point,
//! }
//!
//! impl Command for Nudge {
//!     type Output = ();
//!
//!     fn name(&self) -> &'static str {
//!         "nudge"
//!     }
//!
//!     fn apply(&self, graph: &mut StitchGraph) -> Result<(), EditError> {
//!         let id = resolve_index(graph, self.index)?;
//!         graph.move_by([id], self.by);
//!         Ok(())
//!     }
//! }
//!
//! let mut graph = StitchGraph::new(Point::new(0.0, 0.0));
//! Nudge { index: 0, by: Point::new(1.0, 2.0) }.apply(&mut graph).unwrap();
//! assert_eq!(graph.get(graph.sentinel()).unwrap().position(), Point::new(1.0, 2.0));
//!
//! let err = Nudge { index: 5, by: Point::default() }.apply(&mut graph).unwrap_err();
//! assert_eq!(err, EditError::UnknownStitch { index: 5, len: 1 });
//! ```

use thiserror::Error;

use crate::core::graph::StitchGraph;
use crate::core::types::StitchId;

/// Errors a command raises while editing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EditError {
    /// A stitch index that is not in the pattern.
    #[error("no stitch at index {index} (pattern has {len} stitches)")]
    UnknownStitch { index: usize, len: usize },

    /// The edit is not allowed on this pattern.
    #[error("{0}")]
    Rejected(String),
}

/// A command that edits a pattern through the engine lifecycle.
pub trait Command {
    /// Output type produced by this command.
    type Output;

    /// Short name used in debug output.
    fn name(&self) -> &'static str;

    /// Edit `graph` in place.
    ///
    /// Called with the lock held and the pattern freshly loaded. Must not
    /// perform I/O.
    fn apply(&self, graph: &mut StitchGraph) -> Result<Self::Output, EditError>;
}

/// A command that only reads a pattern.
pub trait ReadOnlyCommand {
    /// Output type produced by this command.
    type Output;

    /// Produce output from the loaded graph.
    ///
    /// Printing to stdout/stderr is acceptable for display commands.
    fn execute(&self, graph: &StitchGraph) -> Result<Self::Output, EditError>;
}

/// Resolve a collection index (as used on the command line and in pattern
/// files) to a stitch id.
pub fn resolve_index(graph: &StitchGraph, index: usize) -> Result<StitchId, EditError> {
    graph.id_at(index).ok_or(EditError::UnknownStitch {
        index,
        len: graph.len(),
    })
}

/// Resolve several indices, failing on the first unknown one.
pub fn resolve_indices(graph: &StitchGraph, indices: &[usize]) -> Result<Vec<StitchId>, EditError> {
    indices.iter().map(|i| resolve_index(graph, *i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Point, StitchType};

    #[test]
    fn resolve_follows_collection_order() {
        let mut graph = StitchGraph::new(Point::default());
        let a = graph.add_stitch(Point::new(1.0, 0.0), StitchType::Chain, None);
        let b = graph.add_stitch(Point::new(2.0, 0.0), StitchType::Chain, None);
        graph.delete_stitch(a);

        assert_eq!(resolve_index(&graph, 1), Ok(b));
        assert_eq!(
            resolve_index(&graph, 2),
            Err(EditError::UnknownStitch { index: 2, len: 2 })
        );
    }

    #[test]
    fn resolve_indices_fails_on_first_unknown() {
        let graph = StitchGraph::new(Point::default());
        assert_eq!(
            resolve_indices(&graph, &[0, 3, 4]),
            Err(EditError::UnknownStitch { index: 3, len: 1 })
        );
        assert_eq!(resolve_indices(&graph, &[0, 0]).unwrap().len(), 2);
    }

    #[test]
    fn error_messages() {
        let err = EditError::UnknownStitch { index: 4, len: 2 };
        assert_eq!(err.to_string(), "no stitch at index 4 (pattern has 2 stitches)");
        assert_eq!(
            EditError::Rejected("cannot delete the sentinel".into()).to_string(),
            "cannot delete the sentinel"
        );
    }
}
