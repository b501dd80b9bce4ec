//! core::anchor
//!
//! Anchor points derived from the stitch graph.
//!
//! An anchor is the 2D location used for drawing connectors and for
//! hit-testing. Only the head anchor is the stored position; the others
//! depend on the stitch type and on the stitches it references:
//!
//! | Type | middle | attach |
//! |---|---|---|
//! | Slip | head | head |
//! | Chain | midpoint of parent head and position | middle |
//! | post stitches | midpoint of base attach and position | head |
//!
//! `middle` and `attach` recurse into each other through `base`/`parent`
//! edges. The recursion is bounded: a post stitch's middle reads its base's
//! attach, and a chain's attach reads only its parent's head, so at most
//! three stitches are visited per anchor.
//!
//! A missing or dangling reference degrades to the head anchor; see
//! [`crate::core::verify::integrity_warnings`] for reporting those.

use super::graph::{Stitch, StitchGraph};
use super::types::{Point, StitchId, StitchType};
use crate::editor::modes::EditingMode;

/// Which of the three anchors to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    Head,
    Middle,
    Attach,
}

/// The stored position.
pub fn head_anchor(stitch: &Stitch) -> Point {
    stitch.position()
}

/// Point halfway along the stitch body.
pub fn middle_anchor(graph: &StitchGraph, stitch: &Stitch) -> Point {
    match stitch.kind() {
        StitchType::Slip => head_anchor(stitch),
        StitchType::Chain => match stitch.parent().and_then(|p| graph.get(p)) {
            None => head_anchor(stitch),
            Some(parent) => head_anchor(parent).midpoint(stitch.position()),
        },
        StitchType::SingleCrochet
        | StitchType::HalfDoubleCrochet
        | StitchType::DoubleCrochet
        | StitchType::TrebleCrochet
        | StitchType::DoubleTrebleCrochet => match stitch.base().and_then(|b| graph.get(b)) {
            None => head_anchor(stitch),
            Some(base) => attach_anchor(graph, base).midpoint(stitch.position()),
        },
    }
}

/// Point other stitches are worked into.
pub fn attach_anchor(graph: &StitchGraph, stitch: &Stitch) -> Point {
    match stitch.kind() {
        StitchType::Chain => middle_anchor(graph, stitch),
        StitchType::Slip
        | StitchType::SingleCrochet
        | StitchType::HalfDoubleCrochet
        | StitchType::DoubleCrochet
        | StitchType::TrebleCrochet
        | StitchType::DoubleTrebleCrochet => head_anchor(stitch),
    }
}

/// Compute one anchor of `stitch`.
pub fn anchor(graph: &StitchGraph, stitch: &Stitch, kind: AnchorKind) -> Point {
    match kind {
        AnchorKind::Head => head_anchor(stitch),
        AnchorKind::Middle => middle_anchor(graph, stitch),
        AnchorKind::Attach => attach_anchor(graph, stitch),
    }
}

/// Anchor kind used for hit-testing and drawing in `mode`.
pub fn anchor_kind_for_mode(mode: EditingMode, dragging: bool, is_next_parent: bool) -> AnchorKind {
    match mode {
        EditingMode::Moving | EditingMode::Viewing | EditingMode::Inserting => AnchorKind::Head,
        EditingMode::Deleting => AnchorKind::Middle,
        EditingMode::Rebasing if dragging => AnchorKind::Attach,
        EditingMode::Rebasing => AnchorKind::Middle,
        EditingMode::Adding if is_next_parent => AnchorKind::Head,
        EditingMode::Adding => AnchorKind::Attach,
    }
}

/// Anchor of `id` as seen in `mode`.
///
/// `dragging` is whether a drag gesture is active; `next_parent` is the
/// graph's cursor. Returns `None` for an unknown id.
pub fn anchor_for_mode(
    graph: &StitchGraph,
    id: StitchId,
    mode: EditingMode,
    dragging: bool,
    next_parent: StitchId,
) -> Option<Point> {
    let stitch = graph.get(id)?;
    let kind = anchor_kind_for_mode(mode, dragging, id == next_parent);
    Some(anchor(graph, stitch, kind))
}
