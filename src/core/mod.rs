//! core
//!
//! Core domain types, schemas, and operations for stitchwork.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Point, StitchId, StitchType
//! - [`graph`] - Stitch graph representation and operations
//! - [`anchor`] - Anchor points derived from the graph
//! - [`verify`] - Fast verification of graph invariants
//! - [`pattern`] - Pattern file schema and storage
//! - [`config`] - Configuration schema and loading
//! - [`lock`] - Exclusive pattern file lock
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing
//! - All verification is deterministic

pub mod anchor;
pub mod config;
pub mod graph;
pub mod lock;
pub mod pattern;
pub mod types;
pub mod verify;
