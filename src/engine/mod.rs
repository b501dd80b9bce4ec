//! engine
//!
//! Orchestrates the pattern edit lifecycle: Lock -> Load -> Apply -> Verify -> Save.
//!
//! # Architecture
//!
//! The engine is the single place pattern files are rewritten. Commands
//! only describe an edit against an in-memory [`StitchGraph`]; the runner
//! does the rest:
//!
//! 1. **Lock**: take the exclusive `<pattern>.lock`
//! 2. **Load**: read and validate the pattern through a `FileStore`
//! 3. **Apply**: run the command against the loaded graph
//! 4. **Verify**: check graph invariants with `fast_verify`
//! 5. **Save**: write the graph back via temp file + rename
//!
//! # Invariants
//!
//! - Nothing is written unless Apply and Verify both succeed
//! - The lock is held from Load until Save completes
//! - Read-only commands never take the lock and never write
//!
//! # Example
//!
//! ```
//! use stitchwork::core::graph::StitchGraph;
//! use stitchwork::core::types::Point;
//! use stitchwork::engine::{create_pattern, run_readonly_command, Context, EditError, ReadOnlyCommand};
//!
//! struct Count;
//!
//! impl ReadOnlyCommand for Count {
//!     type Output = usize;
//!
//!     fn execute(&self, graph: &StitchGraph) -> Result<usize, EditError> {
//!         Ok(graph.len())
//!     }
//! }
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("scarf.json");
//! let ctx = Context::default();
//!
//! create_pattern(&path, Point::new(400.0, 300.0), false, &ctx).unwrap();
//! assert_eq!(run_readonly_command(&Count, &path, &ctx).unwrap(), 1);
//! ```
//!
//! [`StitchGraph`]: crate::core::graph::StitchGraph

pub mod command;
pub mod runner;

pub use command::{resolve_index, Command, EditError, ReadOnlyCommand};
pub use runner::{
    create_pattern, load_pattern, run_command, run_command_to, run_readonly_command, RunError,
};

use std::path::PathBuf;

use crate::ui::output::Verbosity;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Config file given with `--config`.
    pub config_path: Option<PathBuf>,
}

impl Context {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}
