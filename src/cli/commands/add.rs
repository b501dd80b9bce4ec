//! add command - Add a stitch after the cursor

use std::path::Path;

use crate::core::graph::StitchGraph;
use crate::core::types::{Point, StitchType};
use crate::engine::command::{resolve_index, Command, EditError};
use crate::engine::runner::run_command;
use crate::engine::Context;
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Command struct for adding one stitch.
pub struct AddCommand {
    at: Point,
    kind: StitchType,
    /// Index of the stitch worked into.
    base: Option<usize>,
    /// Index of the stitch to follow instead of the cursor.
    after: Option<usize>,
}

impl Command for AddCommand {
    /// Index of the new stitch.
    type Output = usize;

    fn name(&self) -> &'static str {
        "add"
    }

    fn apply(&self, graph: &mut StitchGraph) -> Result<usize, EditError> {
        let base = self.base.map(|i| resolve_index(graph, i)).transpose()?;
        if let Some(after) = self.after {
            let after = resolve_index(graph, after)?;
            graph.set_next_parent(after);
        }
        let id = graph.add_stitch(self.at, self.kind, base);
        graph
            .index_of(id)
            .ok_or_else(|| EditError::Rejected(format!("stitch {id} was not added")))
    }
}

/// Add a stitch to a pattern.
pub fn add(
    ctx: &Context,
    file: &Path,
    at: Point,
    kind: StitchType,
    base: Option<usize>,
    after: Option<usize>,
) -> Result<()> {
    let command = AddCommand {
        at,
        kind,
        base,
        after,
    };
    let index = run_command(&command, file, ctx)
        .with_context(|| format!("Failed to add stitch to '{}'", file.display()))?;

    if kind.is_post_stitch() && base.is_none() {
        output::warn(
            format!(
                "{} stitch {} has no base and will not be drawn; set one with 'stitch rebase'",
                kind.label(),
                index
            ),
            ctx.verbosity(),
        );
    }
    output::success(
        format!("Added {} {} at {}", kind.abbreviation(), index, at),
        ctx.verbosity(),
    );
    Ok(())
}
