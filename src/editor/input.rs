//! editor::input
//!
//! Input event vocabulary consumed by the editor.

use std::fmt;

use serde::Deserialize;

/// A key press the editor understands.
///
/// Character keys are case-sensitive, matching what the platform reports
/// for the key (Shift+a arrives as `A`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Key {
    Char(char),
    Space,
    Left,
    Right,
    Up,
    Down,
}

impl Key {
    /// Parse a key name: a single character, or one of
    /// `space`, `left`, `right`, `up`, `down`.
    pub fn from_name(name: &str) -> Option<Key> {
        match name {
            "space" | " " => Some(Key::Space),
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "up" => Some(Key::Up),
            "down" => Some(Key::Down),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

impl TryFrom<String> for Key {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Key::from_name(&value).ok_or_else(|| format!("unknown key '{value}'"))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{c}"),
            Key::Space => f.write_str("space"),
            Key::Left => f.write_str("left"),
            Key::Right => f.write_str("right"),
            Key::Up => f.write_str("up"),
            Key::Down => f.write_str("down"),
        }
    }
}

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false };
    pub const SHIFT: Modifiers = Modifiers { shift: true };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names() {
        assert_eq!(Key::from_name("a"), Some(Key::Char('a')));
        assert_eq!(Key::from_name("7"), Some(Key::Char('7')));
        assert_eq!(Key::from_name("space"), Some(Key::Space));
        assert_eq!(Key::from_name("left"), Some(Key::Left));
        assert_eq!(Key::from_name(""), None);
        assert_eq!(Key::from_name("ab"), None);
    }

    #[test]
    fn display_roundtrips_names() {
        for key in [Key::Char('e'), Key::Space, Key::Up, Key::Down] {
            assert_eq!(Key::from_name(&key.to_string()), Some(key));
        }
    }
}
