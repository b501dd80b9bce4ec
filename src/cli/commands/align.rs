//! align command - Line stitches up on their mean x or y

use std::collections::BTreeSet;
use std::path::Path;

use crate::core::graph::StitchGraph;
use crate::core::types::StitchId;
use crate::engine::command::{resolve_indices, Command, EditError};
use crate::engine::runner::run_command;
use crate::engine::Context;
use crate::ui::output;
use anyhow::{Context as _, Result};

pub struct AlignCommand {
    vertical: bool,
    indices: Vec<usize>,
}

impl Command for AlignCommand {
    type Output = usize;

    fn name(&self) -> &'static str {
        "align"
    }

    fn apply(&self, graph: &mut StitchGraph) -> Result<usize, EditError> {
        let ids: BTreeSet<StitchId> = resolve_indices(graph, &self.indices)?.into_iter().collect();
        let ids: Vec<StitchId> = ids.into_iter().collect();
        if ids.len() < 2 {
            return Err(EditError::Rejected(
                "aligning needs at least two distinct stitches".to_string(),
            ));
        }

        let aligned = if self.vertical {
            graph.align_vertical(&ids)
        } else {
            graph.align_horizontal(&ids)
        };
        if aligned {
            Ok(ids.len())
        } else {
            Err(EditError::Rejected("nothing to align".to_string()))
        }
    }
}

/// Align the listed stitches; `vertical` picks the axis.
pub fn align(ctx: &Context, file: &Path, vertical: bool, indices: &[usize]) -> Result<()> {
    let command = AlignCommand {
        vertical,
        indices: indices.to_vec(),
    };
    let count = run_command(&command, file, ctx)
        .with_context(|| format!("Failed to align stitches in '{}'", file.display()))?;
    let axis = if vertical { "vertically" } else { "horizontally" };
    output::success(format!("Aligned {} stitches {}", count, axis), ctx.verbosity());
    Ok(())
}
