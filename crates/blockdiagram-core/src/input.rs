//! Pointer and keyboard events delivered to the canvas.

use crate::grid::Cursor;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Pointer event in device cells.
///
/// Device columns are one to the right of the grid column the gesture
/// anchors on; the canvas applies that shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        column: i32,
        row: i32,
        button: MouseButton,
    },
    Move {
        column: i32,
        row: i32,
        button: MouseButton,
    },
    Up {
        column: i32,
        row: i32,
        button: MouseButton,
    },
}

impl PointerEvent {
    pub fn down(column: i32, row: i32) -> Self {
        PointerEvent::Down {
            column,
            row,
            button: MouseButton::Left,
        }
    }

    pub fn drag(column: i32, row: i32) -> Self {
        PointerEvent::Move {
            column,
            row,
            button: MouseButton::Left,
        }
    }

    pub fn up(column: i32, row: i32) -> Self {
        PointerEvent::Up {
            column,
            row,
            button: MouseButton::Left,
        }
    }

    /// Raw device position as a grid position.
    pub fn position(&self) -> Cursor {
        let (PointerEvent::Down { column, row, .. }
        | PointerEvent::Move { column, row, .. }
        | PointerEvent::Up { column, row, .. }) = *self;
        Cursor::new(row, column)
    }

    pub fn button(&self) -> MouseButton {
        let (PointerEvent::Down { button, .. }
        | PointerEvent::Move { button, .. }
        | PointerEvent::Up { button, .. }) = *self;
        button
    }
}

/// Keys the canvas reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyEvent {
    Enter,
    Space,
    Backspace,
    Delete,
    /// A printable character.
    Char(char),
    /// A control shortcut, e.g. `Ctrl('c')`.
    Ctrl(char),
}

impl KeyEvent {
    /// Key name as used in scripts and shortcuts.
    pub fn name(&self) -> String {
        match self {
            KeyEvent::Enter => "enter".to_string(),
            KeyEvent::Space => "space".to_string(),
            KeyEvent::Backspace => "backspace".to_string(),
            KeyEvent::Delete => "delete".to_string(),
            KeyEvent::Char(c) => c.to_string(),
            KeyEvent::Ctrl(c) => format!("ctrl+{c}"),
        }
    }
}

impl FromStr for KeyEvent {
    type Err = String;

    /// Parse `enter`, `space`, `backspace`, `delete`, `ctrl+<c>` or a single
    /// printable character.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            "enter" => KeyEvent::Enter,
            "space" => KeyEvent::Space,
            "backspace" => KeyEvent::Backspace,
            "delete" => KeyEvent::Delete,
            _ => {
                let (text, ctrl) = match s.strip_prefix("ctrl+") {
                    Some(rest) => (rest, true),
                    None => (s, false),
                };
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if ctrl => KeyEvent::Ctrl(c.to_ascii_lowercase()),
                    (Some(c), None) if !c.is_control() => KeyEvent::Char(c),
                    _ => return Err(format!("Unknown key: {s}")),
                }
            }
        };
        Ok(key)
    }
}
