//! editor::modes
//!
//! Editing modes.
//!
//! The editor is always in exactly one mode, which decides what a pointer
//! press does, which stitches can be picked, and which anchor is used to
//! pick them (see [`crate::core::anchor::anchor_kind_for_mode`]).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown editing mode '{0}', expected one of: adding, moving, deleting, inserting, viewing, rebasing")]
pub struct UnknownMode(pub String);

/// What a pointer gesture does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditingMode {
    /// Drag from a stitch to place a new stitch worked into it
    #[default]
    Adding,
    /// Drag stitches around; box-select and Shift-click to group
    Moving,
    /// Click a stitch to delete it
    Deleting,
    /// Click a stitch to make it the next parent, then return to Adding
    Inserting,
    /// Nothing is pickable
    Viewing,
    /// Drag a post stitch onto a new base
    Rebasing,
}

impl EditingMode {
    pub const ALL: [EditingMode; 6] = [
        EditingMode::Adding,
        EditingMode::Moving,
        EditingMode::Deleting,
        EditingMode::Inserting,
        EditingMode::Viewing,
        EditingMode::Rebasing,
    ];

    /// Status text shown by the editor.
    pub fn label(self) -> &'static str {
        match self {
            EditingMode::Adding => "Adding",
            EditingMode::Moving => "Moving",
            EditingMode::Deleting => "Deleting",
            EditingMode::Inserting => "Inserting",
            EditingMode::Viewing => "Viewing",
            EditingMode::Rebasing => "Rebasing",
        }
    }

    /// Key that selects this mode.
    pub fn key(self) -> char {
        match self {
            EditingMode::Adding => 'a',
            EditingMode::Moving => 'm',
            EditingMode::Deleting => 'd',
            EditingMode::Inserting => 'i',
            EditingMode::Viewing => 'v',
            EditingMode::Rebasing => 'b',
        }
    }
}

impl fmt::Display for EditingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EditingMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.label().to_ascii_lowercase() == lower)
            .ok_or_else(|| UnknownMode(s.to_string()))
    }
}
