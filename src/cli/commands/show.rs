//! show command - List the stitches of a pattern
//!
//! # Architecture
//!
//! This is a read-only command that implements `ReadOnlyCommand` and flows
//! through `run_readonly_command`.

use std::path::Path;

use crate::core::graph::StitchGraph;
use crate::core::pattern::to_json_pretty;
use crate::core::verify::{integrity_warnings, IntegrityWarning};
use crate::editor::EditingMode;
use crate::engine::command::{EditError, ReadOnlyCommand};
use crate::engine::runner::run_readonly_command;
use crate::engine::Context;
use crate::ui::listing::{render_listing, ListingOptions};
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Command to render a pattern listing.
pub struct ShowCommand {
    options: ListingOptions,
    json: bool,
}

/// Rendered text plus anything worth warning about.
pub struct ShowOutput {
    text: String,
    warnings: Vec<IntegrityWarning>,
}

impl ReadOnlyCommand for ShowCommand {
    type Output = ShowOutput;

    fn execute(&self, graph: &StitchGraph) -> Result<Self::Output, EditError> {
        let text = if self.json {
            to_json_pretty(graph).map_err(|e| EditError::Rejected(e.to_string()))?
        } else {
            render_listing(graph, self.options)
        };
        Ok(ShowOutput {
            text,
            warnings: integrity_warnings(graph),
        })
    }
}

/// Print a pattern.
pub fn show(
    ctx: &Context,
    file: &Path,
    mode: Option<EditingMode>,
    anchors: bool,
    json: bool,
) -> Result<()> {
    let command = ShowCommand {
        options: ListingOptions { anchors, mode },
        json,
    };
    let shown = run_readonly_command(&command, file, ctx)
        .with_context(|| format!("Failed to show '{}'", file.display()))?;

    // The listing is the result, so it is printed even in quiet mode.
    print!("{}", shown.text);
    if json {
        println!();
    }
    for warning in &shown.warnings {
        output::warn(warning, ctx.verbosity());
    }
    Ok(())
}
