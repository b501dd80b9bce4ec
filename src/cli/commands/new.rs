//! new command - Create a sentinel-only pattern

use std::path::Path;

use super::load_config;
use crate::core::types::Point;
use crate::engine::{create_pattern, Context};
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Create a new pattern at `file`.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `file` - Pattern file to create
/// * `at` - Sentinel position (defaults to the configured canvas center)
/// * `force` - Replace an existing file
pub fn new(ctx: &Context, file: &Path, at: Option<Point>, force: bool) -> Result<()> {
    let origin = match at {
        Some(point) => point,
        None => load_config(ctx)?.canvas_center(),
    };

    create_pattern(file, origin, force, ctx)
        .with_context(|| format!("Failed to create '{}'", file.display()))?;

    output::success(
        format!("Created {} with sentinel at {}", file.display(), origin),
        ctx.verbosity(),
    );
    Ok(())
}
