//! delete command - Remove a stitch and reattach its dependents

use std::path::Path;

use crate::core::graph::StitchGraph;
use crate::engine::command::{resolve_index, Command, EditError};
use crate::engine::runner::run_command;
use crate::engine::Context;
use crate::ui::output;
use anyhow::{Context as _, Result};

pub struct DeleteCommand {
    index: usize,
}

impl Command for DeleteCommand {
    type Output = ();

    fn name(&self) -> &'static str {
        "delete"
    }

    fn apply(&self, graph: &mut StitchGraph) -> Result<(), EditError> {
        let id = resolve_index(graph, self.index)?;
        if graph.is_sentinel(id) {
            return Err(EditError::Rejected(
                "the sentinel (index 0) cannot be deleted".to_string(),
            ));
        }
        graph.delete_stitch(id);
        Ok(())
    }
}

/// Delete the stitch at `index`.
///
/// Stitches worked into it move to its base (else its parent); stitches
/// following it move to its parent.
pub fn delete(ctx: &Context, file: &Path, index: usize) -> Result<()> {
    run_command(&DeleteCommand { index }, file, ctx)
        .with_context(|| format!("Failed to delete stitch {} from '{}'", index, file.display()))?;
    output::success(format!("Deleted stitch {}", index), ctx.verbosity());
    Ok(())
}
