//! rebase command - Work a stitch into a different base

use std::path::Path;

use crate::core::graph::StitchGraph;
use crate::engine::command::{resolve_index, Command, EditError};
use crate::engine::runner::run_command;
use crate::engine::Context;
use crate::ui::output;
use anyhow::{Context as _, Result};

pub struct RebaseCommand {
    index: usize,
    onto: usize,
}

impl Command for RebaseCommand {
    type Output = ();

    fn name(&self) -> &'static str {
        "rebase"
    }

    fn apply(&self, graph: &mut StitchGraph) -> Result<(), EditError> {
        let id = resolve_index(graph, self.index)?;
        let onto = resolve_index(graph, self.onto)?;
        let kind = graph
            .get(id)
            .map(|s| s.kind())
            .ok_or(EditError::UnknownStitch {
                index: self.index,
                len: graph.len(),
            })?;

        if graph.is_sentinel(id) {
            return Err(EditError::Rejected("the sentinel has no base".to_string()));
        }
        if id == onto {
            return Err(EditError::Rejected(format!(
                "stitch {} cannot be worked into itself",
                self.index
            )));
        }
        if !kind.is_post_stitch() {
            return Err(EditError::Rejected(format!(
                "stitch {} is a {}, which is not worked into a base",
                self.index,
                kind.label()
            )));
        }

        if graph.rebase(id, onto) {
            Ok(())
        } else {
            Err(EditError::Rejected(format!(
                "stitch {} cannot be rebased onto {}",
                self.index, self.onto
            )))
        }
    }
}

/// Rebase the stitch at `index` onto the stitch at `onto`.
pub fn rebase(ctx: &Context, file: &Path, index: usize, onto: usize) -> Result<()> {
    run_command(&RebaseCommand { index, onto }, file, ctx)
        .with_context(|| format!("Failed to rebase stitch {} in '{}'", index, file.display()))?;
    output::success(
        format!("Stitch {} now worked into {}", index, onto),
        ctx.verbosity(),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Point, StitchType};

    fn graph() -> StitchGraph {
        let mut graph = StitchGraph::new(Point::default());
        let c1 = graph.add_stitch(Point::new(10.0, 0.0), StitchType::Chain, None);
        graph.add_stitch(Point::new(20.0, 0.0), StitchType::Chain, None);
        graph.add_stitch(Point::new(10.0, -10.0), StitchType::DoubleCrochet, Some(c1));
        graph
    }

    #[test]
    fn moves_the_base() {
        let mut graph = graph();
        RebaseCommand { index: 3, onto: 2 }.apply(&mut graph).unwrap();
        let dc = graph.id_at(3).unwrap();
        assert_eq!(graph.get(dc).unwrap().base(), graph.id_at(2));
    }

    #[test]
    fn rejects_chains_sentinel_and_self() {
        let mut graph = graph();
        let before = graph.clone();
        for (index, onto) in [(1, 2), (0, 1), (3, 3)] {
            let result = RebaseCommand { index, onto }.apply(&mut graph);
            assert!(matches!(result, Err(EditError::Rejected(_))), "{index} -> {onto}");
        }
        assert_eq!(graph, before);
    }
}
