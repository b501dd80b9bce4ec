//! ui::listing
//!
//! Tabular listing of a pattern for the `show` command.

use std::fmt::Write as _;

use super::output::format_index;
use crate::core::anchor::{anchor_for_mode, attach_anchor, middle_anchor};
use crate::core::graph::StitchGraph;
use crate::editor::EditingMode;

/// What to include besides the stored fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingOptions {
    /// Add middle and attach anchor columns
    pub anchors: bool,
    /// Add the anchor picked in this mode when idle
    pub mode: Option<EditingMode>,
}

/// Render one row per stitch in collection order.
///
/// The next-parent cursor is marked with `*`.
pub fn render_listing(graph: &StitchGraph, options: ListingOptions) -> String {
    let mut out = String::new();
    let mut header = format!(
        "{:>4}  {:<4} {:>8} {:>8} {:>6} {:>6}",
        "#", "type", "x", "y", "parent", "base"
    );
    if options.anchors {
        let _ = write!(header, "  {:<18} {:<18}", "middle", "attach");
    }
    if let Some(mode) = options.mode {
        let _ = write!(header, "  {}", mode.label().to_ascii_lowercase());
    }
    out.push_str(header.trim_end());
    out.push('\n');

    for (index, stitch) in graph.iter().enumerate() {
        let index_of = |id| graph.index_of(id);
        let marker = if stitch.id() == graph.next_parent() { "*" } else { " " };
        let position = stitch.position();
        let mut row = format!(
            "{:>3}{}  {:<4} {:>8.1} {:>8.1} {:>6} {:>6}",
            index,
            marker,
            stitch.kind().abbreviation(),
            position.x,
            position.y,
            format_index(stitch.parent().and_then(index_of)),
            format_index(stitch.base().and_then(index_of)),
        );
        if options.anchors {
            let _ = write!(
                row,
                "  {:<18} {:<18}",
                middle_anchor(graph, stitch).to_string(),
                attach_anchor(graph, stitch).to_string()
            );
        }
        if let Some(mode) = options.mode {
            if let Some(pick) = anchor_for_mode(graph, stitch.id(), mode, false, graph.next_parent()) {
                let _ = write!(row, "  {}", pick);
            }
        }
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Point, StitchType};

    fn graph() -> StitchGraph {
        let mut graph = StitchGraph::new(Point::new(400.0, 300.0));
        let chain = graph.add_stitch(Point::new(450.0, 300.0), StitchType::Chain, None);
        graph.add_stitch(Point::new(450.0, 250.0), StitchType::DoubleCrochet, Some(chain));
        graph
    }

    #[test]
    fn plain_listing() {
        let listing = render_listing(&graph(), ListingOptions::default());
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "   #  type        x        y parent   base");
        assert_eq!(lines[1], "  0   sl      400.0    300.0      -      -");
        assert_eq!(lines[2], "  1   ch      450.0    300.0      0      -");
        assert_eq!(lines[3], "  2*  dc      450.0    250.0      1      1");
    }

    #[test]
    fn anchor_columns() {
        let listing = render_listing(
            &graph(),
            ListingOptions {
                anchors: true,
                mode: Some(EditingMode::Deleting),
            },
        );
        let chain_row = listing.lines().nth(2).unwrap();
        assert!(listing.lines().next().unwrap().ends_with("deleting"));
        assert!(chain_row.contains("(425, 300)"), "{chain_row}");
        assert!(chain_row.ends_with("(425, 300)"), "{chain_row}");
    }
}
