//! editor::script
//!
//! Recorded gesture scripts.
//!
//! A script is a JSON Lines file with one input event per line. Blank lines
//! and lines starting with `#` are skipped.
//!
//! ```text
//! # drag a chain out of the cursor
//! {"event": "down", "x": 450, "y": 300}
//! {"event": "move", "x": 480, "y": 300}
//! {"event": "up", "x": 500, "y": 300}
//! {"event": "key", "key": "m"}
//! {"event": "key", "key": "right", "shift": true}
//! {"event": "frame"}
//! ```
//!
//! Replaying a script drives an [`Editor`] exactly as live input would.

use serde::Deserialize;
use thiserror::Error;

use super::{Action, Editor, Key, Modifiers};
use crate::core::types::Point;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    /// 1-based line number
    pub line: usize,
    pub message: String,
}

/// One recorded input event.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum GestureEvent {
    /// Pointer moved; runs a frame at the new position
    Move { x: f64, y: f64 },
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
    },
    Up { x: f64, y: f64 },
    Key {
        key: Key,
        #[serde(default)]
        shift: bool,
    },
    /// A frame with the pointer where it last was
    Frame,
}

impl GestureEvent {
    /// Feed this event to `editor`.
    pub fn apply(self, editor: &mut Editor) -> Vec<Action> {
        match self {
            GestureEvent::Move { x, y } => editor.frame(Point::new(x, y)),
            GestureEvent::Down { x, y, shift } => {
                editor.pointer_down(Point::new(x, y), Modifiers { shift })
            }
            GestureEvent::Up { x, y } => editor.pointer_up(Point::new(x, y)),
            GestureEvent::Key { key, shift } => editor.key_down(key, Modifiers { shift }),
            GestureEvent::Frame => {
                let pointer = editor.pointer();
                editor.frame(pointer)
            }
        }
    }
}

/// Parse a script.
///
/// # Errors
///
/// Returns the first malformed line.
pub fn parse_script(text: &str) -> Result<Vec<GestureEvent>, ScriptError> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line, text)| {
            serde_json::from_str(text).map_err(|e| ScriptError {
                line,
                message: e.to_string(),
            })
        })
        .collect()
}

/// Apply `events` in order, collecting every action.
pub fn replay(editor: &mut Editor, events: &[GestureEvent]) -> Vec<Action> {
    events
        .iter()
        .flat_map(|event| event.apply(editor))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::StitchGraph;
    use crate::core::types::StitchType;
    use crate::editor::EditingMode;

    #[test]
    fn parses_every_event() {
        let script = r#"
            # comment
            {"event": "move", "x": 1, "y": 2}
            {"event": "down", "x": 3, "y": 4, "shift": true}

            {"event": "up", "x": 5.5, "y": 6}
            {"event": "key", "key": "space"}
            {"event": "frame"}
        "#;
        assert_eq!(
            parse_script(script).unwrap(),
            vec![
                GestureEvent::Move { x: 1.0, y: 2.0 },
                GestureEvent::Down { x: 3.0, y: 4.0, shift: true },
                GestureEvent::Up { x: 5.5, y: 6.0 },
                GestureEvent::Key { key: Key::Space, shift: false },
                GestureEvent::Frame,
            ]
        );
    }

    #[test]
    fn reports_line_of_bad_event() {
        let script = "{\"event\": \"frame\"}\n\n{\"event\": \"jump\"}\n";
        let err = parse_script(script).unwrap_err();
        assert_eq!(err.line, 3);
        assert!(err.message.contains("jump"), "{}", err.message);
    }

    #[test]
    fn rejects_unknown_key() {
        let err = parse_script(r#"{"event": "key", "key": "escape"}"#).unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.message.contains("unknown key"), "{}", err.message);
    }

    #[test]
    fn replay_builds_a_row() {
        let mut graph = StitchGraph::new(Point::new(400.0, 300.0));
        graph.add_stitch(Point::new(450.0, 300.0), StitchType::Chain, None);
        let mut editor = Editor::new(graph);

        let events = parse_script(
            r#"
            {"event": "down", "x": 450, "y": 300}
            {"event": "up", "x": 500, "y": 300}
            {"event": "down", "x": 500, "y": 300}
            {"event": "up", "x": 550, "y": 300}
            {"event": "key", "key": "m"}
            "#,
        )
        .unwrap();
        let actions = replay(&mut editor, &events);

        assert_eq!(editor.graph().len(), 4);
        assert_eq!(editor.mode(), EditingMode::Moving);
        assert_eq!(
            actions
                .iter()
                .filter(|a| matches!(a, Action::StitchAdded(_)))
                .count(),
            2
        );
    }

    #[test]
    fn frame_reuses_last_pointer() {
        let mut editor = Editor::new(StitchGraph::new(Point::new(0.0, 0.0)));
        GestureEvent::Move { x: 7.0, y: 8.0 }.apply(&mut editor);
        GestureEvent::Frame.apply(&mut editor);
        assert_eq!(editor.pointer(), Point::new(7.0, 8.0));
    }
}
