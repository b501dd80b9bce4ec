//! Property-based tests for the stitch graph.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated edit sequences.

use proptest::prelude::*;

use stitchwork::core::anchor::{anchor_for_mode, head_anchor};
use stitchwork::core::graph::StitchGraph;
use stitchwork::core::pattern::{parse_pattern, to_json, to_records};
use stitchwork::core::types::{Point, StitchType};
use stitchwork::core::verify::fast_verify;
use stitchwork::editor::EditingMode;

/// One graph edit; indices are taken modulo the graph size when applied.
#[derive(Debug, Clone)]
enum Edit {
    Add {
        at: Point,
        kind: StitchType,
        base: Option<usize>,
    },
    Delete(usize),
    Cursor(usize),
}

/// Whole and half pixels, so positions survive a JSON round trip exactly.
fn point() -> impl Strategy<Value = Point> {
    (-2000..2000i32, -2000..2000i32)
        .prop_map(|(x, y)| Point::new(f64::from(x) / 2.0, f64::from(y) / 2.0))
}

fn stitch_type() -> impl Strategy<Value = StitchType> {
    prop::sample::select(StitchType::ALL.to_vec())
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        3 => (point(), stitch_type(), prop::option::of(0..64usize))
            .prop_map(|(at, kind, base)| Edit::Add { at, kind, base }),
        1 => (0..64usize).prop_map(Edit::Delete),
        1 => (0..64usize).prop_map(Edit::Cursor),
    ]
}

fn build(edits: &[Edit], with_cursor: bool) -> StitchGraph {
    let mut graph = StitchGraph::new(Point::new(400.0, 300.0));
    for edit in edits {
        match edit {
            Edit::Add { at, kind, base } => {
                let base = base.and_then(|i| graph.id_at(i % graph.len()));
                graph.add_stitch(*at, *kind, base);
            }
            Edit::Delete(i) => {
                if let Some(id) = graph.id_at(i % graph.len()) {
                    graph.delete_stitch(id);
                }
            }
            Edit::Cursor(i) => {
                if with_cursor {
                    if let Some(id) = graph.id_at(i % graph.len()) {
                        graph.set_next_parent(id);
                    }
                }
            }
        }
    }
    graph
}

proptest! {
    /// Adds and deletes never leave a reference to a missing stitch.
    #[test]
    fn edits_never_dangle(edits in prop::collection::vec(edit(), 0..40)) {
        let graph = build(&edits, true);
        let result = fast_verify(&graph);
        prop_assert!(result.ok, "{:?}", result.errors);
        prop_assert!(graph.contains(graph.next_parent()));
    }

    /// Without cursor moves, references only point backwards in creation order.
    #[test]
    fn references_point_to_older_stitches(edits in prop::collection::vec(edit(), 0..40)) {
        let graph = build(&edits, false);
        for (index, record) in to_records(&graph).iter().enumerate() {
            if let Some(parent) = record.parent {
                prop_assert!(parent < index, "parent {} of {}", parent, index);
            }
            if let Some(base) = record.base {
                prop_assert!(base < index, "base {} of {}", base, index);
            }
        }
    }

    /// Deleting a stitch removes every reference to it.
    #[test]
    fn delete_leaves_no_reference(
        edits in prop::collection::vec(edit(), 1..30),
        victim in 1..64usize,
    ) {
        let mut graph = build(&edits, true);
        prop_assume!(graph.len() > 1);
        let id = graph.id_at(1 + victim % (graph.len() - 1)).unwrap();

        prop_assert!(graph.delete_stitch(id));
        prop_assert!(!graph.contains(id));
        for stitch in graph.iter() {
            prop_assert_ne!(stitch.parent(), Some(id));
            prop_assert_ne!(stitch.base(), Some(id));
        }
        prop_assert_ne!(graph.next_parent(), id);
    }

    /// The sentinel survives any delete attempt untouched.
    #[test]
    fn sentinel_delete_is_a_no_op(edits in prop::collection::vec(edit(), 0..30)) {
        let mut graph = build(&edits, true);
        let before = graph.clone();
        let sentinel = graph.sentinel();
        prop_assert!(!graph.delete_stitch(sentinel));
        prop_assert_eq!(graph, before);
    }

    /// The head anchor is the stored position in every mode.
    #[test]
    fn head_anchor_is_position(edits in prop::collection::vec(edit(), 0..30)) {
        let graph = build(&edits, true);
        for stitch in graph.iter() {
            prop_assert_eq!(head_anchor(stitch), stitch.position());
            for mode in [EditingMode::Moving, EditingMode::Viewing, EditingMode::Inserting] {
                let anchor = anchor_for_mode(&graph, stitch.id(), mode, false, graph.next_parent());
                prop_assert_eq!(anchor, Some(stitch.position()));
            }
        }
    }

    /// Export then import keeps positions, types, and index structure.
    #[test]
    fn round_trip_preserves_structure(edits in prop::collection::vec(edit(), 0..40)) {
        let graph = build(&edits, true);
        let json = to_json(&graph).unwrap();
        let imported = parse_pattern(&json).unwrap();

        prop_assert_eq!(to_records(&imported), to_records(&graph));
        prop_assert_eq!(
            imported.index_of(imported.next_parent()),
            Some(imported.len() - 1)
        );
    }
}
