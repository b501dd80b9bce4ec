//! core::verify
//!
//! Fast structural verification of a stitch graph.
//!
//! # Checks
//!
//! - **Fast verify**: run after every CLI mutation and after import
//!   - Every `parent`/`base` reference resolves
//!   - The next-parent cursor resolves
//!   - The sentinel carries no references
//!
//! - **Integrity warnings**: stitches missing a reference their type needs
//!   to be drawn (a chain without a parent, a post stitch without a base).
//!   These can only come from a hand-edited file; the scene skips their
//!   connectors.
//!
//! # Invariants
//!
//! - Never mutates the graph
//! - Must be deterministic (reports follow collection order)

use std::fmt;

use thiserror::Error;

use super::graph::StitchGraph;
use super::types::{StitchId, StitchType};

/// Errors from verification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("stitch {stitch} references missing parent {parent}")]
    DanglingParent { stitch: StitchId, parent: StitchId },

    #[error("stitch {stitch} references missing base {base}")]
    DanglingBase { stitch: StitchId, base: StitchId },

    #[error("next-parent cursor {0} does not resolve")]
    DeadCursor(StitchId),

    #[error("sentinel {0} must not have a parent or base")]
    SentinelHasReferences(StitchId),
}

/// Result of fast verification.
#[derive(Debug)]
pub struct VerifyResult {
    /// Whether verification passed
    pub ok: bool,
    /// Errors found during verification
    pub errors: Vec<VerifyError>,
}

impl VerifyResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: vec![],
        }
    }

    /// Create a failed result with errors.
    pub fn failure(errors: Vec<VerifyError>) -> Self {
        Self { ok: false, errors }
    }
}

/// Perform fast verification of the stitch graph.
pub fn fast_verify(graph: &StitchGraph) -> VerifyResult {
    let mut errors = Vec::new();

    for stitch in graph.iter() {
        if let Some(parent) = stitch.parent() {
            if !graph.contains(parent) {
                errors.push(VerifyError::DanglingParent {
                    stitch: stitch.id(),
                    parent,
                });
            }
        }
        if let Some(base) = stitch.base() {
            if !graph.contains(base) {
                errors.push(VerifyError::DanglingBase {
                    stitch: stitch.id(),
                    base,
                });
            }
        }
    }

    if !graph.contains(graph.next_parent()) {
        errors.push(VerifyError::DeadCursor(graph.next_parent()));
    }

    let sentinel = graph.sentinel();
    if let Some(s) = graph.get(sentinel) {
        if s.parent().is_some() || s.base().is_some() {
            errors.push(VerifyError::SentinelHasReferences(sentinel));
        }
    }

    if errors.is_empty() {
        VerifyResult::success()
    } else {
        VerifyResult::failure(errors)
    }
}

/// A stitch that cannot be drawn as its type requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegrityWarning {
    pub stitch: StitchId,
    pub kind: StitchType,
    pub missing: MissingReference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingReference {
    Parent,
    Base,
}

impl fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let missing = match self.missing {
            MissingReference::Parent => "parent",
            MissingReference::Base => "base",
        };
        write!(
            f,
            "{} stitch {} has no {}",
            self.kind.label(),
            self.stitch,
            missing
        )
    }
}

/// List stitches missing a structurally required reference.
///
/// Chains need a parent; post stitches need a base; the long stitches
/// (half double crochet and up) additionally need a parent for their head.
pub fn integrity_warnings(graph: &StitchGraph) -> Vec<IntegrityWarning> {
    let mut warnings = Vec::new();
    for stitch in graph.iter() {
        let needs_parent = match stitch.kind() {
            StitchType::Chain => true,
            StitchType::Slip | StitchType::SingleCrochet => false,
            StitchType::HalfDoubleCrochet
            | StitchType::DoubleCrochet
            | StitchType::TrebleCrochet
            | StitchType::DoubleTrebleCrochet => true,
        };
        let resolves = |r: Option<StitchId>| r.is_some_and(|id| graph.contains(id));

        if stitch.kind().is_post_stitch() && !resolves(stitch.base()) {
            warnings.push(IntegrityWarning {
                stitch: stitch.id(),
                kind: stitch.kind(),
                missing: MissingReference::Base,
            });
        }
        if needs_parent && !resolves(stitch.parent()) {
            warnings.push(IntegrityWarning {
                stitch: stitch.id(),
                kind: stitch.kind(),
                missing: MissingReference::Parent,
            });
        }
    }
    warnings
}
