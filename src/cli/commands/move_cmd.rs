//! move command - Translate stitches by an offset

use std::path::Path;

use crate::core::graph::StitchGraph;
use crate::core::types::Point;
use crate::engine::command::{resolve_indices, Command, EditError};
use crate::engine::runner::run_command;
use crate::engine::Context;
use crate::ui::output;
use anyhow::{Context as _, Result};

pub struct MoveCommand {
    by: Point,
    indices: Vec<usize>,
}

impl Command for MoveCommand {
    /// Number of stitches moved.
    type Output = usize;

    fn name(&self) -> &'static str {
        "move"
    }

    fn apply(&self, graph: &mut StitchGraph) -> Result<usize, EditError> {
        let mut ids = resolve_indices(graph, &self.indices)?;
        ids.sort();
        ids.dedup();
        Ok(graph.move_by(ids, self.by))
    }
}

/// Move the listed stitches by `by`.
pub fn move_stitches(ctx: &Context, file: &Path, by: Point, indices: &[usize]) -> Result<()> {
    let command = MoveCommand {
        by,
        indices: indices.to_vec(),
    };
    let moved = run_command(&command, file, ctx)
        .with_context(|| format!("Failed to move stitches in '{}'", file.display()))?;
    output::success(format!("Moved {} stitches by {}", moved, by), ctx.verbosity());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::StitchType;

    #[test]
    fn repeated_indices_move_once() {
        let mut graph = StitchGraph::new(Point::default());
        let a = graph.add_stitch(Point::new(10.0, 0.0), StitchType::Chain, None);
        let command = MoveCommand {
            by: Point::new(5.0, -5.0),
            indices: vec![1, 1],
        };
        assert_eq!(command.apply(&mut graph).unwrap(), 1);
        assert_eq!(graph.get(a).unwrap().position(), Point::new(15.0, -5.0));
    }
}
