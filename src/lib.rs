//! Stitchwork - crochet stitch pattern editing
//!
//! A crochet pattern is a graph of stitches: each stitch follows a parent
//! (the previous stitch in working order) and may be worked into a base.
//! Stitchwork keeps that graph consistent under editing, drives it from
//! pointer and keyboard input, and reads and writes it as a flat JSON file.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Orchestrates the Lock -> Load -> Apply -> Verify -> Save lifecycle
//! - [`editor`] - Interactive editing state machine, scene model, import/export session
//! - [`core`] - Stitch graph, geometry, pattern schema, verification, config
//! - [`ui`] - Output and listing formatting
//!
//! # Correctness Invariants
//!
//! 1. Every parent and base reference in a graph resolves to a live stitch
//! 2. The sentinel (index 0) is never deleted and never gains references
//! 3. Pattern files are never written with a graph that fails verification

pub mod cli;
pub mod core;
pub mod editor;
pub mod engine;
pub mod ui;
