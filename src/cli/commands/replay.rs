//! replay command - Drive the editor with a recorded gesture script
//!
//! # Architecture
//!
//! The script is parsed up front, then replayed inside the normal
//! `run_command` lifecycle so the edited pattern is verified before it is
//! written. Every export request in the script snapshots the graph at
//! that point; snapshots are written after the pattern is saved.

use std::fs;
use std::mem;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::runtime::Runtime;

use super::load_config;
use crate::core::graph::StitchGraph;
use crate::core::pattern::FileStore;
use crate::core::types::Point;
use crate::editor::script::{parse_script, GestureEvent};
use crate::editor::{Action, Editor, EditorSettings, Session};
use crate::engine::command::{Command, EditError};
use crate::engine::runner::run_command_to;
use crate::engine::Context;
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Command struct for replaying gestures against a pattern.
pub struct ReplayCommand {
    events: Vec<GestureEvent>,
    settings: EditorSettings,
}

/// What a replay did.
#[derive(Debug, Default)]
pub struct ReplayOutput {
    pub actions: Vec<Action>,
    /// Graph snapshots taken at each export request, in order.
    pub exports: Vec<StitchGraph>,
}

impl ReplayOutput {
    fn count(&self, matches: impl Fn(&Action) -> bool) -> usize {
        self.actions.iter().filter(|a| matches(a)).count()
    }
}

impl Command for ReplayCommand {
    type Output = ReplayOutput;

    fn name(&self) -> &'static str {
        "replay"
    }

    fn apply(&self, graph: &mut StitchGraph) -> Result<ReplayOutput, EditError> {
        let taken = mem::replace(graph, StitchGraph::new(Point::default()));
        let mut editor = Editor::with_settings(taken, self.settings);
        let mut output = ReplayOutput::default();

        for event in &self.events {
            for action in event.apply(&mut editor) {
                if action == Action::ExportRequested {
                    output.exports.push(editor.graph().clone());
                }
                output.actions.push(action);
            }
        }

        *graph = editor.into_graph();
        Ok(output)
    }
}

/// Replay `script` against `file`.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `file` - Pattern to edit
/// * `script` - JSON Lines gesture script
/// * `out` - Write the result here instead of back to `file`
/// * `export_dir` - Where export requests write (defaults to the output's directory)
pub fn replay(
    ctx: &Context,
    file: &Path,
    script: &Path,
    out: Option<&Path>,
    export_dir: Option<&Path>,
) -> Result<()> {
    let text = fs::read_to_string(script)
        .with_context(|| format!("Failed to read script '{}'", script.display()))?;
    let events = parse_script(&text)
        .with_context(|| format!("Invalid script '{}'", script.display()))?;
    output::debug(format!("Parsed {} events", events.len()), ctx.verbosity());

    let config = load_config(ctx)?;
    let command = ReplayCommand {
        events,
        settings: EditorSettings::from_config(&config),
    };

    let target = out.unwrap_or(file);
    let result = run_command_to(&command, file, target, ctx)
        .with_context(|| format!("Failed to replay into '{}'", target.display()))?;

    if !result.exports.is_empty() {
        let dir = export_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| directory_of(target));
        write_exports(ctx, &dir, config.export_prefix(), &result.exports)?;
    }

    output::success(
        format!(
            "Replayed {} events into {}: {} added, {} deleted, {} rebased, {} moves, {} exports",
            command.events.len(),
            target.display(),
            result.count(|a| matches!(a, Action::StitchAdded(_))),
            result.count(|a| matches!(a, Action::StitchDeleted(_))),
            result.count(|a| matches!(a, Action::Rebased { .. })),
            result.count(|a| matches!(a, Action::Moved { .. })),
            result.exports.len(),
        ),
        ctx.verbosity(),
    );
    Ok(())
}

/// Write each snapshot under a timestamped name.
///
/// Snapshots after the first get a numbered prefix, since several exports
/// in one replay usually share a timestamp.
fn write_exports(ctx: &Context, dir: &Path, prefix: &str, snapshots: &[StitchGraph]) -> Result<()> {
    let store = FileStore::new(dir);
    let runtime = Runtime::new().context("Failed to start async runtime")?;

    for (n, snapshot) in snapshots.iter().enumerate() {
        let numbered = match n {
            0 => prefix.to_string(),
            n => format!("{prefix} ({})", n + 1),
        };
        let session = Session::new(Editor::new(snapshot.clone()));
        let name = runtime
            .block_on(session.export_timestamped(&store, &numbered, Utc::now()))
            .with_context(|| format!("Failed to export into '{}'", dir.display()))?;
        output::print(
            format!("Exported {}", store.path_for(&name).display()),
            ctx.verbosity(),
        );
    }
    Ok(())
}

pub(super) fn directory_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
