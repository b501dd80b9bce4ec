//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Calls the engine to execute the command
//! 3. Formats and displays output
//!
//! Handlers do NOT write pattern files directly; edits flow through
//! [`crate::engine::run_command`], which locks, verifies and saves.

mod add;
mod align;
mod completion;
mod config_cmd;
mod delete;
mod export;
mod move_cmd;
mod new;
mod rebase;
mod replay;
mod show;
mod validate;

// Re-export command functions for testing and direct invocation
pub use add::add;
pub use align::align;
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, path as config_path};
pub use delete::delete;
pub use export::export;
pub use move_cmd::move_stitches;
pub use new::new;
pub use rebase::rebase;
pub use replay::replay;
pub use show::show;
pub use validate::validate;

use crate::cli::args::{Command, ConfigAction};
use crate::core::config::Config;
use crate::engine::Context;
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::New { file, at, force } => new::new(ctx, &file, at, force),
        Command::Show {
            file,
            mode,
            anchors,
            json,
        } => show::show(ctx, &file, mode, anchors, json),
        Command::Add {
            file,
            at,
            kind,
            base,
            after,
        } => add::add(ctx, &file, at, kind, base, after),
        Command::Delete { file, index } => delete::delete(ctx, &file, index),
        Command::Rebase { file, index, onto } => rebase::rebase(ctx, &file, index, onto),
        Command::Move { file, by, indices } => move_cmd::move_stitches(ctx, &file, by, &indices),
        Command::Align {
            file,
            vertical,
            horizontal: _,
            indices,
        } => align::align(ctx, &file, vertical, &indices),
        Command::Replay {
            file,
            script,
            out,
            export_dir,
        } => replay::replay(ctx, &file, &script, out.as_deref(), export_dir.as_deref()),
        Command::Validate { file } => validate::validate(ctx, &file),
        Command::Export { file, dir } => export::export(ctx, &file, dir.as_deref()),
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::List => config_cmd::list(ctx),
            ConfigAction::Path => config_cmd::path(ctx),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Load configuration, reporting any warnings.
pub(crate) fn load_config(ctx: &Context) -> Result<Config> {
    let result = Config::load(ctx.config_path.as_deref()).context("Failed to load config")?;
    for warning in &result.warnings {
        output::warn(
            format!("{} ({})", warning.message, warning.path.display()),
            ctx.verbosity(),
        );
    }
    if let Some(path) = result.config.loaded_from() {
        output::debug(format!("Using config {}", path.display()), ctx.verbosity());
    }
    Ok(result.config)
}
