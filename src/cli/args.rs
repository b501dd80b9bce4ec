//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Use this config file instead of searching
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//!
//! Stitches are always referred to by collection index, the same index the
//! pattern file uses for `parent` and `base`.

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::types::{Point, StitchType};
use crate::editor::EditingMode;

/// Stitchwork - edit crochet stitch patterns from the command line
#[derive(Parser, Debug)]
#[command(name = "stitch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use this config file instead of searching the default locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a pattern holding only the starting slip stitch
    #[command(
        name = "new",
        long_about = "Create a new pattern file.\n\n\
            Every pattern starts from a single slip stitch (the sentinel) that \
            anchors the whole piece and can never be deleted. Without --at it is \
            placed at the center of the configured canvas.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Start a swatch at the canvas center
    stitch new swatch.json

    # Start somewhere specific, replacing an old file
    stitch new swatch.json --at 100,100 --force"
    )]
    New {
        /// Pattern file to create
        file: PathBuf,

        /// Sentinel position as X,Y
        #[arg(long, value_name = "X,Y", allow_hyphen_values = true)]
        at: Option<Point>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// List the stitches of a pattern
    #[command(
        name = "show",
        long_about = "List every stitch in collection order.\n\n\
            Columns show the stitch index, type abbreviation, position, and the \
            indices of its parent and base. The next-parent cursor (where the next \
            stitch will be attached) is marked with '*'. Integrity warnings for \
            stitches that cannot be drawn are printed after the table.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Quick look
    stitch show swatch.json

    # Include computed anchors and the pick anchor used in Rebasing mode
    stitch show swatch.json --anchors --mode rebasing

    # Pretty-printed pattern JSON
    stitch show swatch.json --json"
    )]
    Show {
        /// Pattern file
        file: PathBuf,

        /// Add a column with the anchor each stitch is picked at in this mode
        #[arg(long, value_name = "MODE")]
        mode: Option<EditingMode>,

        /// Add middle and attach anchor columns
        #[arg(long)]
        anchors: bool,

        /// Print the pattern as pretty JSON instead of a table
        #[arg(long, conflicts_with_all = ["mode", "anchors"])]
        json: bool,
    },

    /// Add a stitch after the cursor
    #[command(
        name = "add",
        long_about = "Add a stitch to a pattern.\n\n\
            The new stitch follows the next-parent cursor (or the stitch given \
            with --after) in crochet order and becomes the new cursor. A stitch \
            that followed the cursor is rewired to follow the new stitch. Post \
            stitches (sc, hdc, dc, tr, dtr) should name the stitch they are \
            worked into with --base.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Chain along the foundation row
    stitch add swatch.json --at 450,300
    stitch add swatch.json --at 500,300

    # Double crochet worked into stitch 1
    stitch add swatch.json --at 450,250 --type dc --base 1

    # Insert a chain after stitch 1
    stitch add swatch.json --at 475,300 --after 1

STITCH TYPES:
    ch  chain             sl  slip
    sc  single crochet    hdc half double crochet
    dc  double crochet    tr  treble crochet
    dtr double treble crochet"
    )]
    Add {
        /// Pattern file
        file: PathBuf,

        /// Position as X,Y
        #[arg(long, value_name = "X,Y", allow_hyphen_values = true)]
        at: Point,

        /// Stitch type (abbreviation or name)
        #[arg(long = "type", value_name = "TYPE", default_value = "ch")]
        kind: StitchType,

        /// Index of the stitch this one is worked into
        #[arg(long, value_name = "N")]
        base: Option<usize>,

        /// Index of the stitch to follow instead of the cursor
        #[arg(long, value_name = "N")]
        after: Option<usize>,
    },

    /// Delete a stitch, repairing references to it
    #[command(
        name = "delete",
        long_about = "Delete a stitch.\n\n\
            Stitches worked into the deleted stitch move to its base (or its \
            parent if it had none). The stitch that followed it follows its parent \
            instead, and the cursor moves back to its parent when it pointed at the \
            deleted stitch. The starting slip stitch (index 0) cannot be deleted.",
        after_help = "\
WORKFLOW EXAMPLES:
    stitch delete swatch.json 3"
    )]
    Delete {
        /// Pattern file
        file: PathBuf,

        /// Index of the stitch to delete
        index: usize,
    },

    /// Work a stitch into a different base stitch
    #[command(
        name = "rebase",
        after_help = "\
WORKFLOW EXAMPLES:
    # Stitch 4 is now worked into stitch 2
    stitch rebase swatch.json 4 --onto 2"
    )]
    Rebase {
        /// Pattern file
        file: PathBuf,

        /// Index of the stitch to rebase
        index: usize,

        /// Index of the new base stitch
        #[arg(long, value_name = "N")]
        onto: usize,
    },

    /// Translate stitches
    #[command(
        name = "move",
        after_help = "\
WORKFLOW EXAMPLES:
    # Shift stitches 1 to 3 left by 10 pixels
    stitch move swatch.json --by -10,0 1 2 3"
    )]
    Move {
        /// Pattern file
        file: PathBuf,

        /// Offset as DX,DY
        #[arg(long, value_name = "DX,DY", allow_hyphen_values = true)]
        by: Point,

        /// Indices of the stitches to move
        #[arg(required = true, value_name = "N")]
        indices: Vec<usize>,
    },

    /// Line stitches up on their mean x or y
    #[command(
        name = "align",
        group(ArgGroup::new("axis").required(true).args(["vertical", "horizontal"])),
        after_help = "\
WORKFLOW EXAMPLES:
    # Same x for stitches 2, 5 and 8
    stitch align swatch.json --vertical 2 5 8

    # Same y for the foundation chain
    stitch align swatch.json --horizontal 0 1 2 3"
    )]
    Align {
        /// Pattern file
        file: PathBuf,

        /// Align on a vertical line (same x)
        #[arg(long)]
        vertical: bool,

        /// Align on a horizontal line (same y)
        #[arg(long)]
        horizontal: bool,

        /// Indices of the stitches to align (at least two)
        #[arg(required = true, num_args = 2.., value_name = "N")]
        indices: Vec<usize>,
    },

    /// Drive the editor with a recorded gesture script
    #[command(
        name = "replay",
        long_about = "Replay a gesture script through the interactive editor.\n\n\
            The script is a JSON Lines file of pointer and key events, applied \
            exactly as live input would be. The edited pattern is written back \
            (or to --out). Each export request (the 'e' key) writes a timestamped \
            copy of the pattern at that moment into --export-dir.",
        after_help = "\
SCRIPT FORMAT:
    # comments and blank lines are skipped
    {\"event\": \"down\", \"x\": 450, \"y\": 300}
    {\"event\": \"move\", \"x\": 480, \"y\": 300}
    {\"event\": \"up\", \"x\": 500, \"y\": 300}
    {\"event\": \"key\", \"key\": \"m\"}
    {\"event\": \"key\", \"key\": \"right\", \"shift\": true}
    {\"event\": \"frame\"}

WORKFLOW EXAMPLES:
    stitch replay swatch.json gestures.jsonl
    stitch replay swatch.json gestures.jsonl --out result.json --export-dir exports"
    )]
    Replay {
        /// Pattern file
        file: PathBuf,

        /// Gesture script (JSON Lines)
        script: PathBuf,

        /// Write the result here instead of back to FILE
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,

        /// Directory for export requests (defaults to the output file's directory)
        #[arg(long, value_name = "DIR")]
        export_dir: Option<PathBuf>,
    },

    /// Check a pattern file
    #[command(
        name = "validate",
        long_about = "Parse and verify a pattern file.\n\n\
            Fails if the file is not a valid pattern or breaks a structural \
            invariant. Stitches that are valid but cannot be drawn as their type \
            requires are reported as warnings."
    )]
    Validate {
        /// Pattern file
        file: PathBuf,
    },

    /// Write a timestamped copy of a pattern
    #[command(
        name = "export",
        after_help = "\
WORKFLOW EXAMPLES:
    # Writes 'exported pattern - 2024-03-09T14:05:07.json' next to the pattern
    stitch export swatch.json

    # Into another directory
    stitch export swatch.json --dir backups"
    )]
    Export {
        /// Pattern file
        file: PathBuf,

        /// Directory for the copy (defaults to FILE's directory)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for stitch commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    stitch completion bash >> ~/.bashrc

    # Zsh
    stitch completion zsh > ~/.zfunc/_stitch

    # Fish
    stitch completion fish > ~/.config/fish/completions/stitch.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get the effective value of a key
    Get {
        /// Configuration key, e.g. editor.hover_radius
        key: String,
    },
    /// List every key with its effective value
    List,
    /// Print the config file in use
    Path,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_with_negative_point() {
        let cli = Cli::try_parse_from([
            "stitch", "add", "p.json", "--at", "-5,10", "--type", "dc", "--base", "1",
        ])
        .unwrap();
        match cli.command {
            Command::Add {
                at, kind, base, after, ..
            } => {
                assert_eq!(at, Point::new(-5.0, 10.0));
                assert_eq!(kind, StitchType::DoubleCrochet);
                assert_eq!(base, Some(1));
                assert_eq!(after, None);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn add_defaults_to_chain() {
        let cli = Cli::try_parse_from(["stitch", "add", "p.json", "--at", "1,2"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Add {
                kind: StitchType::Chain,
                ..
            }
        ));
    }

    #[test]
    fn align_requires_an_axis() {
        assert!(Cli::try_parse_from(["stitch", "align", "p.json", "1", "2"]).is_err());
        assert!(Cli::try_parse_from(["stitch", "align", "p.json", "--vertical", "1"]).is_err());
        assert!(Cli::try_parse_from(["stitch", "align", "p.json", "--vertical", "1", "2"]).is_ok());
        assert!(Cli::try_parse_from([
            "stitch",
            "align",
            "p.json",
            "--vertical",
            "--horizontal",
            "1",
            "2"
        ])
        .is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["stitch", "show", "p.json", "--debug", "--mode", "Moving"]).unwrap();
        assert!(cli.debug);
        assert!(matches!(
            cli.command,
            Command::Show {
                mode: Some(EditingMode::Moving),
                ..
            }
        ));
    }

    #[test]
    fn rejects_bad_point() {
        assert!(Cli::try_parse_from(["stitch", "add", "p.json", "--at", "12"]).is_err());
    }
}
