//! export command - Write a timestamped copy of a pattern

use std::path::Path;

use chrono::Utc;
use tokio::runtime::Runtime;

use super::load_config;
use super::replay::directory_of;
use crate::core::pattern::FileStore;
use crate::editor::{Editor, Session};
use crate::engine::runner::load_pattern;
use crate::engine::Context;
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Export `file` as `<prefix> - <timestamp>.json` into `dir` (defaults to
/// the file's own directory).
pub fn export(ctx: &Context, file: &Path, dir: Option<&Path>) -> Result<()> {
    let config = load_config(ctx)?;
    let graph = load_pattern(file, ctx)
        .with_context(|| format!("Failed to load '{}'", file.display()))?;

    let dir = dir.map(Path::to_path_buf).unwrap_or_else(|| directory_of(file));
    let store = FileStore::new(&dir);
    let session = Session::new(Editor::new(graph));

    let runtime = Runtime::new().context("Failed to start async runtime")?;
    let name = runtime
        .block_on(session.export_timestamped(&store, config.export_prefix(), Utc::now()))
        .with_context(|| format!("Failed to export into '{}'", dir.display()))?;

    // The path is the result; print it even when quiet.
    println!("{}", store.path_for(&name).display());
    output::debug(
        format!("Exported {} stitches", session.editor().graph().len()),
        ctx.verbosity(),
    );
    Ok(())
}
