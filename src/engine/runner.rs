//! engine::runner
//!
//! Engine runner - the single entry point for pattern file edits.
//!
//! # Architecture
//!
//! ```text
//! Lock -> Load -> Apply -> Verify -> Save -> Return
//! ```
//!
//! Pattern I/O goes through the async [`PatternStore`] boundary; the runner
//! drives it with a tokio runtime and `block_on`, so commands stay
//! synchronous.
//!
//! # Invariants
//!
//! - Commands receive a loaded, parsed graph, never raw file text
//! - Verification is always performed before saving
//! - A failed step leaves the file on disk untouched
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use stitchwork::engine::{run_command, Context};
//! # use stitchwork::engine::{Command, EditError};
//! # use stitchwork::core::graph::StitchGraph;
//! # struct Clear;
//! # impl Command for Clear {
//! #     type Output = ();
//! #     fn name(&self) -> &'static str { "clear" }
//! #     fn apply(&self, _: &mut StitchGraph) -> Result<(), EditError> { Ok(()) }
//! # }
//!
//! let ctx = Context::default();
//! run_command(&Clear, Path::new("scarf.json"), &ctx)?;
//! # Ok::<(), stitchwork::engine::RunError>(())
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::runtime::Runtime;

use super::command::{Command, EditError, ReadOnlyCommand};
use super::Context;
use crate::core::graph::StitchGraph;
use crate::core::lock::{LockError, PatternLock};
use crate::core::pattern::{parse_pattern, to_json, FileStore, PatternStore};
use crate::core::types::Point;
use crate::core::verify::{fast_verify, VerifyError};
use crate::editor::{ExportError, ImportError};

/// Errors from the engine runner.
#[derive(Debug, Error)]
pub enum RunError {
    /// Lock acquisition failed.
    #[error(transparent)]
    Lock(#[from] LockError),

    /// The pattern could not be read or parsed.
    #[error("failed to load pattern: {0}")]
    Load(#[from] ImportError),

    /// The command refused the edit.
    #[error(transparent)]
    Edit(#[from] EditError),

    /// The edited graph broke an invariant; nothing was written.
    #[error("verification failed: {}", join_errors(.0))]
    Verify(Vec<VerifyError>),

    /// The pattern could not be written.
    #[error("failed to save pattern: {0}")]
    Save(#[from] ExportError),

    #[error("pattern '{}' already exists (use --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),

    #[error("'{}' is not a pattern file path", .0.display())]
    InvalidPath(PathBuf),

    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

fn join_errors(errors: &[VerifyError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Run a command against the pattern at `path`, writing the result back.
///
/// # Lifecycle
///
/// 1. **Lock**: acquire `<path>.lock`
/// 2. **Load**: read and parse the pattern
/// 3. **Apply**: call `command.apply()`
/// 4. **Verify**: `fast_verify` the edited graph
/// 5. **Save**: write the graph back to `path`
pub fn run_command<C: Command>(
    command: &C,
    path: &Path,
    ctx: &Context,
) -> Result<C::Output, RunError> {
    run_command_to(command, path, path, ctx)
}

/// Like [`run_command`], but writes the result to `target`.
///
/// Both files are locked when they differ.
pub fn run_command_to<C: Command>(
    command: &C,
    source: &Path,
    target: &Path,
    ctx: &Context,
) -> Result<C::Output, RunError> {
    if ctx.debug {
        eprintln!("[debug] Starting command lifecycle: {}", command.name());
    }

    // Step 1: Lock
    if ctx.debug {
        eprintln!("[debug] Step 1: Lock {}", target.display());
    }
    let _target_lock = PatternLock::acquire(target)?;
    let _source_lock = if source != target {
        Some(PatternLock::acquire(source)?)
    } else {
        None
    };

    let runtime = runtime()?;

    // Step 2: Load
    if ctx.debug {
        eprintln!("[debug] Step 2: Load {}", source.display());
    }
    let mut graph = runtime.block_on(load(source))?;
    if ctx.debug {
        eprintln!("[debug] Loaded {} stitches", graph.len());
    }

    // Step 3: Apply
    if ctx.debug {
        eprintln!("[debug] Step 3: Apply");
    }
    let output = command.apply(&mut graph)?;

    // Step 4: Verify
    if ctx.debug {
        eprintln!("[debug] Step 4: Verify");
    }
    let result = fast_verify(&graph);
    if !result.ok {
        if ctx.debug {
            eprintln!("[debug] Verification found {} errors", result.errors.len());
        }
        return Err(RunError::Verify(result.errors));
    }

    // Step 5: Save
    if ctx.debug {
        eprintln!("[debug] Step 5: Save {} stitches", graph.len());
    }
    runtime.block_on(save(target, &graph))?;

    Ok(output)
}

/// Run a read-only command against the pattern at `path`.
///
/// # Lifecycle
///
/// 1. **Load**: read and parse the pattern
/// 2. **Execute**: call `command.execute()`
pub fn run_readonly_command<C: ReadOnlyCommand>(
    command: &C,
    path: &Path,
    ctx: &Context,
) -> Result<C::Output, RunError> {
    if ctx.debug {
        eprintln!("[debug] Starting read-only command lifecycle");
    }

    let graph = load_pattern(path, ctx)?;

    // Step 2: Execute
    if ctx.debug {
        eprintln!("[debug] Step 2: Execute");
    }
    Ok(command.execute(&graph)?)
}

/// Read and parse the pattern at `path` without locking it.
pub fn load_pattern(path: &Path, ctx: &Context) -> Result<StitchGraph, RunError> {
    if ctx.debug {
        eprintln!("[debug] Step 1: Load {}", path.display());
    }
    let graph = runtime()?.block_on(load(path))?;
    if ctx.debug {
        eprintln!("[debug] Loaded {} stitches", graph.len());
    }
    Ok(graph)
}

/// Write a new pattern holding only a sentinel at `origin`.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn create_pattern(
    path: &Path,
    origin: Point,
    force: bool,
    ctx: &Context,
) -> Result<StitchGraph, RunError> {
    if ctx.debug {
        eprintln!("[debug] Step 1: Lock {}", path.display());
    }
    let _lock = PatternLock::acquire(path)?;

    if path.exists() && !force {
        return Err(RunError::AlreadyExists(path.to_path_buf()));
    }

    let graph = StitchGraph::new(origin);
    if ctx.debug {
        eprintln!("[debug] Step 2: Save sentinel at {}", origin);
    }
    runtime()?.block_on(save(path, &graph))?;
    Ok(graph)
}

fn runtime() -> Result<Runtime, RunError> {
    Runtime::new().map_err(RunError::Runtime)
}

/// Split a pattern path into a store rooted at its directory and a name.
fn store_for(path: &Path) -> Result<(FileStore, String), RunError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| RunError::InvalidPath(path.to_path_buf()))?;
    let root = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((FileStore::new(root), name.to_string()))
}

async fn load(path: &Path) -> Result<StitchGraph, RunError> {
    let (store, name) = store_for(path)?;
    let contents = store.open(&name).await.map_err(ImportError::from)?;
    let graph = parse_pattern(&contents).map_err(ImportError::from)?;
    Ok(graph)
}

async fn save(path: &Path, graph: &StitchGraph) -> Result<(), RunError> {
    let (store, name) = store_for(path)?;
    let contents = to_json(graph).map_err(ExportError::from)?;
    store
        .save(&name, &contents)
        .await
        .map_err(ExportError::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pattern::StoreError;
    use crate::core::types::StitchType;
    use std::fs;
    use tempfile::TempDir;

    struct AddChain;

    impl Command for AddChain {
        type Output = usize;

        fn name(&self) -> &'static str {
            "add-chain"
        }

        fn apply(&self, graph: &mut StitchGraph) -> Result<usize, EditError> {
            graph.add_stitch(Point::new(450.0, 300.0), StitchType::Chain, None);
            Ok(graph.len())
        }
    }

    struct Refuse;

    impl Command for Refuse {
        type Output = ();

        fn name(&self) -> &'static str {
            "refuse"
        }

        fn apply(&self, graph: &mut StitchGraph) -> Result<(), EditError> {
            graph.add_stitch(Point::new(1.0, 1.0), StitchType::Chain, None);
            Err(EditError::Rejected("no".into()))
        }
    }

    struct Len;

    impl ReadOnlyCommand for Len {
        type Output = usize;

        fn execute(&self, graph: &StitchGraph) -> Result<usize, EditError> {
            Ok(graph.len())
        }
    }

    fn new_pattern() -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("swatch.json");
        create_pattern(&path, Point::new(400.0, 300.0), false, &Context::default()).unwrap();
        (temp, path)
    }

    #[test]
    fn create_writes_sentinel() {
        let (_temp, path) = new_pattern();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            r#"[{"x":400.0,"y":300.0,"parent":null,"base":null,"type":6}]"#
        );
    }

    #[test]
    fn create_refuses_existing_without_force() {
        let (_temp, path) = new_pattern();
        let ctx = Context::default();
        let err = create_pattern(&path, Point::default(), false, &ctx).unwrap_err();
        assert!(matches!(err, RunError::AlreadyExists(_)));

        create_pattern(&path, Point::new(1.0, 2.0), true, &ctx).unwrap();
        let graph = load_pattern(&path, &ctx).unwrap();
        assert_eq!(graph.get(graph.sentinel()).unwrap().position(), Point::new(1.0, 2.0));
    }

    #[test]
    fn run_command_round_trips_through_disk() {
        let (_temp, path) = new_pattern();
        let ctx = Context::default();

        assert_eq!(run_command(&AddChain, &path, &ctx).unwrap(), 2);
        assert_eq!(run_command(&AddChain, &path, &ctx).unwrap(), 3);
        assert_eq!(run_readonly_command(&Len, &path, &ctx).unwrap(), 3);
        // The lock is released once the command returns
        assert!(PatternLock::acquire(&path).is_ok());
    }

    #[test]
    fn rejected_edit_writes_nothing() {
        let (_temp, path) = new_pattern();
        let before = fs::read_to_string(&path).unwrap();

        let err = run_command(&Refuse, &path, &Context::default()).unwrap_err();
        assert!(matches!(err, RunError::Edit(EditError::Rejected(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn run_command_to_writes_target_only() {
        let (temp, path) = new_pattern();
        let before = fs::read_to_string(&path).unwrap();
        let out = temp.path().join("copy.json");

        run_command_to(&AddChain, &path, &out, &Context::default()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
        assert_eq!(run_readonly_command(&Len, &out, &Context::default()).unwrap(), 2);
    }

    #[test]
    fn held_lock_blocks_edits() {
        let (_temp, path) = new_pattern();
        let _held = PatternLock::acquire(&path).unwrap();
        let err = run_command(&AddChain, &path, &Context::default()).unwrap_err();
        assert!(matches!(err, RunError::Lock(LockError::AlreadyLocked(_))));
    }

    #[test]
    fn missing_file_is_load_error() {
        let temp = TempDir::new().unwrap();
        let err = load_pattern(&temp.path().join("nope.json"), &Context::default()).unwrap_err();
        assert!(matches!(
            err,
            RunError::Load(ImportError::Store(StoreError::NotFound(_)))
        ));
    }

    #[test]
    fn invalid_file_names_the_field() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        fs::write(
            &path,
            r#"[{"x":0,"y":0,"parent":null,"base":null,"type":6},{"x":1,"parent":0,"base":null,"type":0}]"#,
        )
        .unwrap();
        let err = run_command(&AddChain, &path, &Context::default()).unwrap_err();
        assert!(err.to_string().contains("stitch 1 has invalid y: missing"), "{err}");
    }

    #[test]
    fn unverifiable_graph_is_not_saved() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("loop.json");
        let contents = r#"[{"x":0,"y":0,"parent":1,"base":null,"type":6},{"x":1,"y":0,"parent":0,"base":null,"type":0}]"#;
        fs::write(&path, contents).unwrap();

        let err = run_command(&AddChain, &path, &Context::default()).unwrap_err();
        assert!(matches!(err, RunError::Verify(_)));
        assert!(err.to_string().contains("sentinel"));
        assert_eq!(fs::read_to_string(&path).unwrap(), contents);
    }

    #[test]
    fn store_for_relative_name() {
        let (store, name) = store_for(Path::new("scarf.json")).unwrap();
        assert_eq!(store.root(), Path::new("."));
        assert_eq!(name, "scarf.json");
        assert!(matches!(store_for(Path::new("/")), Err(RunError::InvalidPath(_))));
    }
}
