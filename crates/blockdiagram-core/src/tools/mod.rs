//! Tool system for the diagram canvas.

use crate::charset::{ArrowHeads, CharacterSet};
use crate::grid::Cursor;
use crate::shapes::{ApproachMode, Arrow, Line, Rectangle, Shape, Trapezoid, TrapezoidOrientation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Box,
    Arrow,
    Line,
    TrapezoidVertical,
    TrapezoidHorizontal,
    TextHorizontal,
    TextVertical,
    Select,
    Eraser,
}

impl ToolKind {
    pub const ALL: [ToolKind; 9] = [
        ToolKind::Box,
        ToolKind::Arrow,
        ToolKind::Line,
        ToolKind::TrapezoidVertical,
        ToolKind::TrapezoidHorizontal,
        ToolKind::TextHorizontal,
        ToolKind::TextVertical,
        ToolKind::Select,
        ToolKind::Eraser,
    ];

    /// Activation name.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Box => "box",
            ToolKind::Arrow => "arrow",
            ToolKind::Line => "line",
            ToolKind::TrapezoidVertical => "trapezoid-vertical",
            ToolKind::TrapezoidHorizontal => "trapezoid-horizontal",
            ToolKind::TextHorizontal => "text-horizontal",
            ToolKind::TextVertical => "text-vertical",
            ToolKind::Select => "select",
            ToolKind::Eraser => "eraser",
        }
    }

    /// Box and arrow endpoints follow the raw pointer; the other shapes
    /// follow the clamped cursor.
    pub fn endpoint(self, pointer: Cursor, cursor: Cursor) -> Cursor {
        match self {
            ToolKind::Box | ToolKind::Arrow => pointer,
            _ => cursor,
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|tool| tool.name() == s)
            .ok_or_else(|| format!("Unknown tool: {s}"))
    }
}

/// A tool activation request: the tool plus optional glyph sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCommand {
    pub tool: ToolKind,
    pub char_set: Option<CharacterSet>,
    pub arrow_heads: Option<ArrowHeads>,
}

impl ToolCommand {
    pub fn new(tool: ToolKind) -> Self {
        Self {
            tool,
            char_set: None,
            arrow_heads: None,
        }
    }

    pub fn with_char_set(mut self, char_set: CharacterSet) -> Self {
        self.char_set = Some(char_set);
        self
    }

    pub fn with_arrow_heads(mut self, heads: ArrowHeads) -> Self {
        self.arrow_heads = Some(heads);
        self
    }
}

/// State of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolState {
    /// Waiting for a pointer press.
    #[default]
    Idle,
    /// Pointer is down.
    Active {
        /// Grid cell the gesture started on.
        anchor: Cursor,
        /// Approach mode inferred on the last move.
        approach: ApproachMode,
    },
}

/// Manages the current tool and its state.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently active tool, if any.
    pub current_tool: Option<ToolKind>,
    /// Current state of the gesture.
    pub state: ToolState,
    /// Glyphs for new shapes.
    pub char_set: CharacterSet,
    /// Arrowheads for new arrows.
    pub arrow_heads: ArrowHeads,
}

impl ToolManager {
    /// Create a new tool manager with no active tool.
    pub fn new(char_set: CharacterSet, arrow_heads: ArrowHeads) -> Self {
        Self {
            char_set,
            arrow_heads,
            ..Self::default()
        }
    }

    /// Activate a tool. Glyph sets missing from the command fall back to
    /// `defaults`.
    pub fn activate(&mut self, command: ToolCommand, defaults: (CharacterSet, ArrowHeads)) {
        self.current_tool = Some(command.tool);
        self.char_set = command.char_set.unwrap_or(defaults.0);
        self.arrow_heads = command.arrow_heads.unwrap_or(defaults.1);
        self.state = ToolState::Idle;
        log::info!("Activated tool {}", command.tool);
    }

    /// Begin a gesture at `anchor`.
    pub fn begin(&mut self, anchor: Cursor) {
        self.state = ToolState::Active {
            anchor,
            approach: ApproachMode::default(),
        };
    }

    /// Record the approach mode inferred for the current gesture.
    pub fn set_approach(&mut self, mode: ApproachMode) {
        if let ToolState::Active { approach, .. } = &mut self.state {
            *approach = mode;
        }
    }

    /// End the gesture, returning the anchor it started on.
    pub fn end(&mut self) -> Option<Cursor> {
        let anchor = self.anchor();
        self.state = ToolState::Idle;
        anchor
    }

    /// Cancel the current gesture.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
    }

    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Active { .. })
    }

    pub fn anchor(&self) -> Option<Cursor> {
        match self.state {
            ToolState::Active { anchor, .. } => Some(anchor),
            ToolState::Idle => None,
        }
    }

    pub fn approach(&self) -> ApproachMode {
        match self.state {
            ToolState::Active { approach, .. } => approach,
            ToolState::Idle => ApproachMode::default(),
        }
    }

    /// Build the shape the current tool draws between `anchor` and `end`.
    pub fn create_shape(&self, anchor: Cursor, end: Cursor) -> Option<Shape> {
        let char_set = self.char_set;
        let shape = match self.current_tool? {
            ToolKind::Box => Shape::Box(Rectangle::new(anchor, end, char_set)),
            ToolKind::Line => Shape::Line(Line::new(anchor, end, char_set)),
            ToolKind::Arrow => Shape::Arrow(Arrow::new(
                anchor,
                end,
                self.approach(),
                char_set,
                self.arrow_heads,
            )),
            ToolKind::TrapezoidVertical => Shape::Trapezoid(Trapezoid::new(
                anchor,
                end,
                TrapezoidOrientation::Vertical,
                char_set,
            )),
            ToolKind::TrapezoidHorizontal => Shape::Trapezoid(Trapezoid::new(
                anchor,
                end,
                TrapezoidOrientation::Horizontal,
                char_set,
            )),
            ToolKind::TextHorizontal
            | ToolKind::TextVertical
            | ToolKind::Select
            | ToolKind::Eraser => return None,
        };
        Some(shape)
    }
}
