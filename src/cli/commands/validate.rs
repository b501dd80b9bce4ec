//! validate command - Check a pattern file without changing it
//!
//! Structural errors (dangling references, a dead cursor, a sentinel with
//! references) fail the command. Stitches that cannot be drawn only warn.

use std::path::Path;

use crate::core::graph::StitchGraph;
use crate::core::verify::{fast_verify, integrity_warnings, IntegrityWarning, VerifyError};
use crate::engine::command::{EditError, ReadOnlyCommand};
use crate::engine::runner::run_readonly_command;
use crate::engine::Context;
use crate::ui::output;
use anyhow::{bail, Context as _, Result};

pub struct ValidateCommand;

pub struct ValidateReport {
    pub stitches: usize,
    pub errors: Vec<VerifyError>,
    pub warnings: Vec<IntegrityWarning>,
}

impl ReadOnlyCommand for ValidateCommand {
    type Output = ValidateReport;

    fn execute(&self, graph: &StitchGraph) -> Result<ValidateReport, EditError> {
        Ok(ValidateReport {
            stitches: graph.len(),
            errors: fast_verify(graph).errors,
            warnings: integrity_warnings(graph),
        })
    }
}

/// Validate `file`.
pub fn validate(ctx: &Context, file: &Path) -> Result<()> {
    let report = run_readonly_command(&ValidateCommand, file, ctx)
        .with_context(|| format!("Failed to validate '{}'", file.display()))?;

    for warning in &report.warnings {
        output::warn(warning, ctx.verbosity());
    }
    if !report.errors.is_empty() {
        bail!(
            "'{}' has {} structural errors:\n{}",
            file.display(),
            report.errors.len(),
            output::format_list(&report.errors, "  - ")
        );
    }

    output::success(
        format!("{} is valid ({} stitches)", file.display(), report.stitches),
        ctx.verbosity(),
    );
    Ok(())
}
