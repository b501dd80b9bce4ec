//! editor::scene
//!
//! Renderer-facing snapshot of the editor.
//!
//! A [`Scene`] holds everything needed to draw one frame with resolved
//! points, so a renderer never reads the graph itself. Stitch glyphs are
//! drawn from `base_attach` (or `parent_head` for chains) to `head`, with
//! `hash_count` cross marks on the taller stitches.
//!
//! # Drawing rules
//!
//! - A chain needs its parent; single crochet needs its base; taller
//!   stitches need both. Stitches missing one are listed but not drawable.
//! - The next parent is highlighted except in Viewing mode.
//! - Selection fill only shows in Moving mode.
//! - Group bounds show in Moving mode with a non-empty selection and no
//!   selection box.

use std::collections::HashSet;

use super::{Editor, EditingMode, SelectionBox, ANCHOR_DOT_RADIUS};
use crate::core::anchor::{attach_anchor, head_anchor, middle_anchor};
use crate::core::types::{Point, StitchId, StitchType};
use crate::core::verify::integrity_warnings;

/// One stitch with its resolved anchors and display flags.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneStitch {
    pub id: StitchId,
    /// Collection index, as used in the pattern file
    pub index: usize,
    pub kind: StitchType,
    pub head: Point,
    pub middle: Point,
    pub attach: Point,
    /// Anchor the pick dot is drawn at in the current mode
    pub mode_anchor: Point,
    pub parent_head: Option<Point>,
    pub base_attach: Option<Point>,
    pub hash_count: Option<u8>,
    pub drawable: bool,
    pub highlighted: bool,
    pub hovered: bool,
    pub selected: bool,
    pub draggable: bool,
}

/// The ghost preview of an in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneGhost {
    pub kind: StitchType,
    pub head: Point,
    pub parent_head: Option<Point>,
    pub base_attach: Option<Point>,
}

/// A crochet-order edge from a stitch's head to its parent's head.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSegment {
    pub from: Point,
    pub to: Point,
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub stitches: Vec<SceneStitch>,
    pub ghost: Option<SceneGhost>,
    pub selection_box: Option<SelectionBox>,
    pub group_bounds: Option<Bounds>,
    /// Empty unless the detailed view is on
    pub crochet_path: Vec<PathSegment>,
    pub mode_label: &'static str,
    /// Only set in Adding mode
    pub stitch_type_label: Option<&'static str>,
}

impl Scene {
    pub fn stitch(&self, id: StitchId) -> Option<&SceneStitch> {
        self.stitches.iter().find(|s| s.id == id)
    }
}

pub(super) fn build(editor: &Editor) -> Scene {
    let graph = editor.graph();
    let mode = editor.mode();
    let incomplete: HashSet<StitchId> = integrity_warnings(graph)
        .into_iter()
        .map(|w| w.stitch)
        .collect();

    let stitches = graph
        .iter()
        .enumerate()
        .map(|(index, stitch)| {
            let id = stitch.id();
            let head = head_anchor(stitch);
            SceneStitch {
                id,
                index,
                kind: stitch.kind(),
                head,
                middle: middle_anchor(graph, stitch),
                attach: attach_anchor(graph, stitch),
                mode_anchor: editor.mode_anchor(id).unwrap_or(head),
                parent_head: stitch.parent().and_then(|p| graph.get(p)).map(head_anchor),
                base_attach: stitch
                    .base()
                    .and_then(|b| graph.get(b))
                    .map(|b| attach_anchor(graph, b)),
                hash_count: stitch.kind().hash_count(),
                drawable: !incomplete.contains(&id),
                highlighted: id == graph.next_parent() && mode != EditingMode::Viewing,
                hovered: editor.hovering() == Some(id),
                selected: mode == EditingMode::Moving && editor.is_selected(id),
                draggable: editor.can_drag(id),
            }
        })
        .collect();

    let ghost = editor.ghost().map(|ghost| SceneGhost {
        kind: ghost.kind,
        head: ghost.position,
        parent_head: ghost.parent_head(graph),
        base_attach: ghost.base_attach(graph),
    });

    let crochet_path = if editor.detailed_view() {
        graph
            .crochet_path()
            .into_iter()
            .filter_map(|(stitch, parent)| {
                let from = graph.get(stitch).map(head_anchor)?;
                let to = graph.get(parent).map(head_anchor)?;
                Some(PathSegment { from, to })
            })
            .collect()
    } else {
        Vec::new()
    };

    Scene {
        stitches,
        ghost,
        selection_box: editor.selection_box(),
        group_bounds: group_bounds(editor),
        crochet_path,
        mode_label: mode.label(),
        stitch_type_label: (mode == EditingMode::Adding).then(|| editor.stitch_type().label()),
    }
}

fn group_bounds(editor: &Editor) -> Option<Bounds> {
    if editor.mode() != EditingMode::Moving || editor.selection_box().is_some() {
        return None;
    }
    let mut anchors = editor.selection().filter_map(|id| editor.mode_anchor(id));
    let first = anchors.next()?;
    let (min, max) = anchors.fold((first, first), |(min, max), p| {
        (
            Point::new(min.x.min(p.x), min.y.min(p.y)),
            Point::new(max.x.max(p.x), max.y.max(p.y)),
        )
    });
    let pad = Point::new(ANCHOR_DOT_RADIUS, ANCHOR_DOT_RADIUS);
    Some(Bounds {
        min: min - pad,
        max: max + pad,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::{IndexedStitch, StitchGraph};
    use crate::editor::{Key, Modifiers};

    fn editor() -> (Editor, StitchId, StitchId, StitchId) {
        let mut graph = StitchGraph::new(Point::new(400.0, 300.0));
        let s0 = graph.sentinel();
        let chain = graph.add_stitch(Point::new(450.0, 300.0), StitchType::Chain, None);
        let dc = graph.add_stitch(Point::new(450.0, 250.0), StitchType::DoubleCrochet, Some(chain));
        (Editor::new(graph), s0, chain, dc)
    }

    #[test]
    fn resolves_anchors_and_connectors() {
        let (editor, s0, chain, dc) = editor();
        let scene = editor.scene();
        assert_eq!(scene.stitches.len(), 3);

        let chain = scene.stitch(chain).unwrap();
        assert_eq!(chain.index, 1);
        assert_eq!(chain.middle, Point::new(425.0, 300.0));
        assert_eq!(chain.parent_head, Some(Point::new(400.0, 300.0)));
        assert_eq!(chain.base_attach, None);
        assert!(chain.drawable);

        let dc = scene.stitch(dc).unwrap();
        assert_eq!(dc.base_attach, Some(Point::new(425.0, 300.0)));
        assert_eq!(dc.hash_count, Some(1));
        assert!(dc.highlighted);
        assert!(!scene.stitch(s0).unwrap().highlighted);
    }

    #[test]
    fn labels_follow_mode() {
        let (mut editor, ..) = editor();
        let scene = editor.scene();
        assert_eq!(scene.mode_label, "Adding");
        assert_eq!(scene.stitch_type_label, Some("Chain"));

        editor.set_mode(EditingMode::Rebasing);
        let scene = editor.scene();
        assert_eq!(scene.mode_label, "Rebasing");
        assert_eq!(scene.stitch_type_label, None);
    }

    #[test]
    fn viewing_suppresses_highlight() {
        let (mut editor, _s0, _chain, dc) = editor();
        editor.set_mode(EditingMode::Viewing);
        let scene = editor.scene();
        assert!(!scene.stitch(dc).unwrap().highlighted);
        assert!(scene.stitches.iter().all(|s| !s.draggable));
    }

    #[test]
    fn stitches_missing_references_are_not_drawable() {
        let graph = StitchGraph::from_indexed(&[
            IndexedStitch {
                position: Point::new(0.0, 0.0),
                parent: None,
                base: None,
                kind: StitchType::Slip,
            },
            IndexedStitch {
                position: Point::new(10.0, 0.0),
                parent: Some(0),
                base: None,
                kind: StitchType::TrebleCrochet,
            },
        ])
        .unwrap();
        let scene = Editor::new(graph).scene();
        assert!(scene.stitches[0].drawable);
        assert!(!scene.stitches[1].drawable);
    }

    #[test]
    fn group_bounds_padded_in_moving_mode() {
        let (mut editor, s0, chain, _dc) = editor();
        editor.set_mode(EditingMode::Moving);
        assert_eq!(editor.scene().group_bounds, None);

        editor.pointer_down(Point::new(400.0, 300.0), Modifiers::SHIFT);
        editor.pointer_down(Point::new(450.0, 300.0), Modifiers::SHIFT);
        let scene = editor.scene();
        assert_eq!(
            scene.group_bounds,
            Some(Bounds {
                min: Point::new(388.0, 288.0),
                max: Point::new(462.0, 312.0),
            })
        );
        assert!(scene.stitch(s0).unwrap().selected);
        assert!(scene.stitch(chain).unwrap().selected);

        // Hidden while a selection box is being dragged
        editor.pointer_down(Point::new(600.0, 600.0), Modifiers::NONE);
        assert_eq!(editor.scene().group_bounds, None);
        assert!(editor.scene().selection_box.is_some());
    }

    #[test]
    fn crochet_path_only_in_detailed_view() {
        let (mut editor, ..) = editor();
        assert!(editor.scene().crochet_path.is_empty());
        editor.key_down(Key::Space, Modifiers::NONE);
        let path = editor.scene().crochet_path;
        assert_eq!(path.len(), 2);
        assert_eq!(
            path[0],
            PathSegment {
                from: Point::new(450.0, 300.0),
                to: Point::new(400.0, 300.0),
            }
        );
    }

    #[test]
    fn ghost_is_resolved() {
        let (mut editor, ..) = editor();
        editor.key_down(Key::Char('3'), Modifiers::NONE);
        // The chain attaches at (425, 300)
        editor.pointer_down(Point::new(425.0, 300.0), Modifiers::NONE);
        editor.frame(Point::new(430.0, 200.0));
        let ghost = editor.scene().ghost.unwrap();
        assert_eq!(ghost.kind, StitchType::SingleCrochet);
        assert_eq!(ghost.head, Point::new(430.0, 200.0));
        assert_eq!(ghost.parent_head, Some(Point::new(450.0, 250.0)));
        assert_eq!(ghost.base_attach, Some(Point::new(425.0, 300.0)));
    }
}
