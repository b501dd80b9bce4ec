//! editor
//!
//! Interactive editing state machine.
//!
//! # Architecture
//!
//! All editor state lives in one [`Editor`] value: the stitch graph, the
//! current mode and stitch type, the hovered stitch, the active drag, the
//! group selection and selection box. Input arrives as discrete calls:
//!
//! - [`Editor::frame`] once per rendered frame with the pointer position
//! - [`Editor::pointer_down`] / [`Editor::pointer_up`] for presses
//! - [`Editor::key_down`] for key presses
//!
//! Each returns the [`Action`]s it performed so a host can react (redraw,
//! write an export, show status). A renderer reads [`Editor::scene`].
//!
//! # Invariants
//!
//! - Hover and drag only ever name stitches that passed [`Editor::can_drag`]
//! - Key input is ignored while a drag is active
//! - Replacing the graph cancels any drag and selection
//!
//! # Example
//!
//! ```
//! use stitchwork::core::graph::StitchGraph;
//! use stitchwork::core::types::{Point, StitchType};
//! use stitchwork::editor::{Action, Editor, Key, Modifiers};
//!
//! let mut graph = StitchGraph::new(Point::new(400.0, 300.0));
//! graph.add_stitch(Point::new(450.0, 300.0), StitchType::Chain, None);
//! let mut editor = Editor::new(graph);
//!
//! // Drag from the newest stitch to add another chain
//! editor.pointer_down(Point::new(450.0, 300.0), Modifiers::NONE);
//! let actions = editor.pointer_up(Point::new(500.0, 300.0));
//! assert!(matches!(actions.last(), Some(Action::StitchAdded(_))));
//! assert_eq!(editor.graph().len(), 3);
//!
//! // Pressing the current mode's key switches to Viewing
//! editor.key_down(Key::Char('a'), Modifiers::NONE);
//! assert_eq!(editor.mode().label(), "Viewing");
//! ```

pub mod input;
pub mod modes;
pub mod scene;
pub mod script;
pub mod session;

pub use input::{Key, Modifiers};
pub use modes::EditingMode;
pub use scene::Scene;
pub use session::{ExportError, ImportError, Session};

use std::collections::BTreeSet;

use crate::core::anchor::{anchor_for_mode, attach_anchor, head_anchor};
use crate::core::config::Config;
use crate::core::graph::StitchGraph;
use crate::core::types::{Point, StitchId, StitchType};

/// Radius of the pick dots drawn on anchors; group bounds are padded by it.
pub const ANCHOR_DOT_RADIUS: f64 = 12.0;

/// Stitch types selected by the number keys `1` through `7`.
const TYPE_KEYS: [StitchType; 7] = [
    StitchType::Chain,
    StitchType::Slip,
    StitchType::SingleCrochet,
    StitchType::HalfDoubleCrochet,
    StitchType::DoubleCrochet,
    StitchType::TrebleCrochet,
    StitchType::DoubleTrebleCrochet,
];

/// Pointer and keyboard tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorSettings {
    pub hover_radius: f64,
    pub nudge_step: f64,
    pub nudge_step_large: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            hover_radius: 20.0,
            nudge_step: 1.0,
            nudge_step_large: 10.0,
        }
    }
}

impl EditorSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            hover_radius: config.hover_radius(),
            nudge_step: config.nudge_step(),
            nudge_step_large: config.nudge_step_large(),
        }
    }
}

/// An active drag gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    /// The stitch the drag started on
    pub stitch: StitchId,
    /// Pointer position the next move is measured from
    pub start: Point,
}

/// Rubber-band selection rectangle, corners in drag order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionBox {
    pub start: Point,
    pub end: Point,
}

impl SelectionBox {
    /// Inclusive containment, whichever way the box was dragged.
    pub fn contains(&self, point: Point) -> bool {
        let within = |v: f64, a: f64, b: f64| v >= a.min(b) && v <= a.max(b);
        within(point.x, self.start.x, self.end.x) && within(point.y, self.start.y, self.end.y)
    }
}

/// What a ghost stitch is attached to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GhostBase {
    Stitch(StitchId),
    /// Stand-in slip stitch under the pointer when no target is hovered
    Placeholder(Point),
}

/// Preview of the stitch a drag would produce. Never part of the graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ghost {
    pub position: Point,
    pub parent: Option<StitchId>,
    pub base: GhostBase,
    pub kind: StitchType,
}

impl Ghost {
    pub fn parent_head(&self, graph: &StitchGraph) -> Option<Point> {
        self.parent.and_then(|p| graph.get(p)).map(head_anchor)
    }

    pub fn base_attach(&self, graph: &StitchGraph) -> Option<Point> {
        match self.base {
            GhostBase::Stitch(id) => graph.get(id).map(|s| attach_anchor(graph, s)),
            GhostBase::Placeholder(point) => Some(point),
        }
    }
}

/// Something the editor did in response to input.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    StitchAdded(StitchId),
    StitchDeleted(StitchId),
    Rebased { stitch: StitchId, base: StitchId },
    Moved { stitches: Vec<StitchId> },
    ModeChanged(EditingMode),
    StitchTypeChanged(StitchType),
    DetailedViewToggled(bool),
    NextParentChanged(StitchId),
    ExportRequested,
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Vertical,
    Horizontal,
}

/// The editor.
#[derive(Debug, Clone)]
pub struct Editor {
    graph: StitchGraph,
    mode: EditingMode,
    stitch_type: StitchType,
    hovering: Option<StitchId>,
    dragging: Option<DragState>,
    selection: BTreeSet<StitchId>,
    selection_box: Option<SelectionBox>,
    detailed_view: bool,
    pointer: Point,
    settings: EditorSettings,
}

impl Editor {
    pub fn new(graph: StitchGraph) -> Self {
        Self::with_settings(graph, EditorSettings::default())
    }

    pub fn with_settings(graph: StitchGraph, settings: EditorSettings) -> Self {
        Self {
            graph,
            mode: EditingMode::Adding,
            stitch_type: StitchType::Chain,
            hovering: None,
            dragging: None,
            selection: BTreeSet::new(),
            selection_box: None,
            detailed_view: false,
            pointer: Point::default(),
            settings,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn graph(&self) -> &StitchGraph {
        &self.graph
    }

    pub fn into_graph(self) -> StitchGraph {
        self.graph
    }

    pub fn mode(&self) -> EditingMode {
        self.mode
    }

    /// Type used for the next added stitch.
    pub fn stitch_type(&self) -> StitchType {
        self.stitch_type
    }

    pub fn hovering(&self) -> Option<StitchId> {
        self.hovering
    }

    pub fn dragging(&self) -> Option<DragState> {
        self.dragging
    }

    /// Group selection in collection order.
    pub fn selection(&self) -> impl Iterator<Item = StitchId> + '_ {
        self.selection.iter().copied()
    }

    pub fn is_selected(&self, id: StitchId) -> bool {
        self.selection.contains(&id)
    }

    pub fn selection_box(&self) -> Option<SelectionBox> {
        self.selection_box
    }

    pub fn detailed_view(&self) -> bool {
        self.detailed_view
    }

    /// Last pointer position seen.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Renderer snapshot of the current frame.
    pub fn scene(&self) -> Scene {
        scene::build(self)
    }

    /// Anchor of `id` used for picking and drawing in the current mode.
    pub fn mode_anchor(&self, id: StitchId) -> Option<Point> {
        anchor_for_mode(
            &self.graph,
            id,
            self.mode,
            self.dragging.is_some(),
            self.graph.next_parent(),
        )
    }

    /// Whether `id` can be picked in the current mode.
    pub fn can_drag(&self, id: StitchId) -> bool {
        let Some(stitch) = self.graph.get(id) else {
            return false;
        };
        match self.mode {
            EditingMode::Moving | EditingMode::Inserting => true,
            EditingMode::Deleting => !self.graph.is_sentinel(id),
            EditingMode::Viewing => false,
            EditingMode::Rebasing => match self.dragging {
                Some(drag) => drag.stitch != id,
                None => !matches!(stitch.kind(), StitchType::Chain | StitchType::Slip),
            },
            EditingMode::Adding => match self.stitch_type {
                StitchType::Chain => id == self.graph.next_parent(),
                StitchType::Slip
                | StitchType::SingleCrochet
                | StitchType::HalfDoubleCrochet
                | StitchType::DoubleCrochet
                | StitchType::TrebleCrochet
                | StitchType::DoubleTrebleCrochet => id != self.graph.next_parent(),
            },
        }
    }

    /// The pickable stitch nearest `at` within the hover radius.
    ///
    /// Ties keep the earliest stitch in collection order.
    pub fn hover_at(&self, at: Point) -> Option<StitchId> {
        let mut best: Option<(StitchId, f64)> = None;
        for id in self.graph.ids() {
            if !self.can_drag(id) {
                continue;
            }
            let Some(anchor) = self.mode_anchor(id) else {
                continue;
            };
            let distance = anchor.distance(at);
            if distance < self.settings.hover_radius && best.map_or(true, |(_, d)| distance < d) {
                best = Some((id, distance));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Preview of the stitch the active drag would produce.
    pub fn ghost(&self) -> Option<Ghost> {
        let drag = self.dragging?;
        match self.mode {
            EditingMode::Adding => Some(Ghost {
                position: self.pointer,
                parent: Some(self.graph.next_parent()),
                base: GhostBase::Stitch(drag.stitch),
                kind: self.stitch_type,
            }),
            EditingMode::Rebasing => {
                let dragged = self.graph.get(drag.stitch)?;
                Some(Ghost {
                    position: dragged.position(),
                    parent: dragged.parent(),
                    base: self
                        .hovering
                        .map_or(GhostBase::Placeholder(self.pointer), GhostBase::Stitch),
                    kind: dragged.kind(),
                })
            }
            EditingMode::Moving
            | EditingMode::Deleting
            | EditingMode::Inserting
            | EditingMode::Viewing => None,
        }
    }

    // =========================================================================
    // State changes
    // =========================================================================

    /// Select a mode. Selecting the current mode switches to Viewing.
    ///
    /// Always clears the group selection.
    pub fn set_mode(&mut self, mode: EditingMode) -> Vec<Action> {
        self.selection.clear();
        let next = if self.mode == mode {
            EditingMode::Viewing
        } else {
            mode
        };
        if next == self.mode {
            return Vec::new();
        }
        self.mode = next;
        vec![Action::ModeChanged(next)]
    }

    pub fn set_stitch_type(&mut self, kind: StitchType) -> Vec<Action> {
        if self.stitch_type == kind {
            return Vec::new();
        }
        self.stitch_type = kind;
        vec![Action::StitchTypeChanged(kind)]
    }

    pub fn toggle_detailed_view(&mut self) -> Vec<Action> {
        self.detailed_view = !self.detailed_view;
        vec![Action::DetailedViewToggled(self.detailed_view)]
    }

    /// Replace the whole graph, returning the previous one.
    ///
    /// Cancels any drag and selection box and clears hover and selection.
    pub fn install_graph(&mut self, graph: StitchGraph) -> StitchGraph {
        self.dragging = None;
        self.selection_box = None;
        self.hovering = None;
        self.selection.clear();
        std::mem::replace(&mut self.graph, graph)
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Per-frame update with the current pointer position.
    ///
    /// Refreshes hover, drags the group selection in Moving mode, and grows
    /// an active selection box.
    pub fn frame(&mut self, pointer: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        self.pointer = pointer;
        self.hovering = self.hover_at(pointer);

        if self.mode == EditingMode::Moving {
            if let Some(drag) = self.dragging.as_mut() {
                let delta = pointer - drag.start;
                drag.start = pointer;
                if delta != Point::default() && !self.selection.is_empty() {
                    let ids: Vec<StitchId> = self.selection.iter().copied().collect();
                    self.graph.move_by(ids.iter().copied(), delta);
                    actions.push(Action::Moved { stitches: ids });
                }
            }
        }

        if let Some(selection_box) = self.selection_box.as_mut() {
            selection_box.end = pointer;
            let selection_box = *selection_box;
            self.selection = self
                .graph
                .ids()
                .filter(|id| {
                    self.mode_anchor(*id)
                        .is_some_and(|anchor| selection_box.contains(anchor))
                })
                .collect();
        }

        actions
    }

    /// Pointer press at `at`.
    pub fn pointer_down(&mut self, at: Point, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        self.pointer = at;
        self.hovering = self.hover_at(at);

        let Some(id) = self.hovering else {
            if self.mode == EditingMode::Moving {
                self.selection_box = Some(SelectionBox { start: at, end: at });
                self.selection.clear();
            }
            return actions;
        };
        if !self.can_drag(id) {
            return actions;
        }

        let drag = DragState {
            stitch: id,
            start: at,
        };
        match self.mode {
            EditingMode::Moving => {
                if modifiers.shift {
                    if !self.selection.remove(&id) {
                        self.selection.insert(id);
                    }
                } else {
                    if !self.selection.contains(&id) {
                        self.selection.clear();
                    }
                    self.selection.insert(id);
                    self.dragging = Some(drag);
                }
            }
            EditingMode::Adding | EditingMode::Rebasing => {
                self.dragging = Some(drag);
            }
            EditingMode::Deleting => {
                if self.graph.delete_stitch(id) {
                    self.selection.remove(&id);
                    self.hovering = None;
                    actions.push(Action::StitchDeleted(id));
                }
            }
            EditingMode::Inserting => {
                if self.graph.set_next_parent(id) {
                    actions.push(Action::NextParentChanged(id));
                }
                self.mode = EditingMode::Adding;
                actions.push(Action::ModeChanged(EditingMode::Adding));
            }
            EditingMode::Viewing => {}
        }
        actions
    }

    /// Pointer release at `at`. Completes any drag.
    pub fn pointer_up(&mut self, at: Point) -> Vec<Action> {
        let mut actions = self.frame(at);
        self.selection_box = None;

        let Some(drag) = self.dragging.take() else {
            return actions;
        };
        match self.mode {
            EditingMode::Adding => {
                let id = self
                    .graph
                    .add_stitch(at, self.stitch_type, Some(drag.stitch));
                actions.push(Action::StitchAdded(id));
            }
            EditingMode::Rebasing => {
                if let Some(target) = self.hovering {
                    if self.graph.rebase(drag.stitch, target) {
                        actions.push(Action::Rebased {
                            stitch: drag.stitch,
                            base: target,
                        });
                    }
                }
            }
            EditingMode::Moving
            | EditingMode::Deleting
            | EditingMode::Inserting
            | EditingMode::Viewing => {}
        }

        self.hovering = self.hover_at(at);
        actions
    }

    /// Key press. Ignored while dragging.
    pub fn key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        if self.dragging.is_some() {
            return Vec::new();
        }
        let moving = self.mode == EditingMode::Moving;
        match key {
            Key::Char('a') => self.set_mode(EditingMode::Adding),
            Key::Char('m') => self.set_mode(EditingMode::Moving),
            Key::Char('d') => self.set_mode(EditingMode::Deleting),
            Key::Char('i') => self.set_mode(EditingMode::Inserting),
            Key::Char('b') => self.set_mode(EditingMode::Rebasing),
            Key::Char('v') if moving => self.align(Axis::Vertical),
            Key::Char('v') => self.set_mode(EditingMode::Viewing),
            Key::Char('h') if moving => self.align(Axis::Horizontal),
            Key::Char(c @ '1'..='7') => {
                let index = c as usize - '1' as usize;
                self.set_stitch_type(TYPE_KEYS[index])
            }
            Key::Char('e') => vec![Action::ExportRequested],
            Key::Space => self.toggle_detailed_view(),
            Key::Left | Key::Right | Key::Up | Key::Down if moving => self.nudge(key, modifiers),
            Key::Char(_) | Key::Left | Key::Right | Key::Up | Key::Down => Vec::new(),
        }
    }

    fn align(&mut self, axis: Axis) -> Vec<Action> {
        let ids: Vec<StitchId> = self.selection.iter().copied().collect();
        let changed = match axis {
            Axis::Vertical => self.graph.align_vertical(&ids),
            Axis::Horizontal => self.graph.align_horizontal(&ids),
        };
        if changed {
            vec![Action::Moved { stitches: ids }]
        } else {
            Vec::new()
        }
    }

    fn nudge(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        let step = if modifiers.shift {
            self.settings.nudge_step_large
        } else {
            self.settings.nudge_step
        };
        // Canvas y grows downward.
        let delta = match key {
            Key::Left => Point::new(-step, 0.0),
            Key::Right => Point::new(step, 0.0),
            Key::Up => Point::new(0.0, -step),
            Key::Down => Point::new(0.0, step),
            Key::Char(_) | Key::Space => return Vec::new(),
        };
        if self.selection.is_empty() {
            return Vec::new();
        }
        let ids: Vec<StitchId> = self.selection.iter().copied().collect();
        self.graph.move_by(ids.iter().copied(), delta);
        vec![Action::Moved { stitches: ids }]
    }
}
