//! ui
//!
//! User-facing output utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//! - [`listing`] - Tabular pattern listing
//!
//! # Design
//!
//! All terminal output goes through this module to ensure consistent
//! formatting and proper handling of the quiet and debug flags.

pub mod listing;
pub mod output;
