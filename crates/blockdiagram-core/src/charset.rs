//! Glyph sets used by the drawing tools.

use serde::{Deserialize, Serialize};

/// Single or double stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineStyle {
    Single,
    Double,
}

/// Dash pattern of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinePattern {
    DoubleDash,
    TripleDash,
    QuadrupleDash,
    Continuous,
    Wavy,
}

/// Stroke weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineWeight {
    Light,
    Heavy,
}

/// Corner shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CornerStyle {
    Square,
    Arc,
}

/// Vertical half of a corner role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerRow {
    Top,
    Bottom,
}

/// Horizontal half of a corner role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerCol {
    Left,
    Right,
}

const LINE_STYLES: [LineStyle; 2] = [LineStyle::Single, LineStyle::Double];
const LINE_PATTERNS: [LinePattern; 5] = [
    LinePattern::DoubleDash,
    LinePattern::TripleDash,
    LinePattern::QuadrupleDash,
    LinePattern::Continuous,
    LinePattern::Wavy,
];
const LINE_WEIGHTS: [LineWeight; 2] = [LineWeight::Light, LineWeight::Heavy];
const CORNER_STYLES: [CornerStyle; 2] = [CornerStyle::Square, CornerStyle::Arc];

/// Edge glyphs (horizontal, vertical) for a line style, if it exists.
fn edge_glyphs(style: LineStyle, pattern: LinePattern, weight: LineWeight) -> Option<(char, char)> {
    use LinePattern::*;
    use LineStyle::*;
    use LineWeight::*;

    match (style, pattern, weight) {
        (Single, DoubleDash, Light) => Some(('╌', '╎')),
        (Single, DoubleDash, Heavy) => Some(('╍', '╏')),
        (Single, TripleDash, Light) => Some(('┄', '┆')),
        (Single, TripleDash, Heavy) => Some(('┅', '┇')),
        (Single, QuadrupleDash, Light) => Some(('┈', '┊')),
        (Single, QuadrupleDash, Heavy) => Some(('┉', '┋')),
        (Single, Continuous, Light) => Some(('─', '│')),
        (Single, Continuous, Heavy) => Some(('━', '┃')),
        (Single, Wavy, Light) => Some(('∿', 'ʃ')),
        (Double, Continuous, Light) => Some(('═', '║')),
        _ => None,
    }
}

/// Corner glyphs (tl, tr, bl, br) for a corner style, if it exists.
fn corner_glyphs(style: LineStyle, corner: CornerStyle, weight: LineWeight) -> Option<[char; 4]> {
    match (style, corner, weight) {
        (LineStyle::Single, CornerStyle::Square, LineWeight::Light) => Some(['┌', '┐', '└', '┘']),
        (LineStyle::Single, CornerStyle::Square, LineWeight::Heavy) => Some(['┏', '┓', '┗', '┛']),
        (LineStyle::Single, CornerStyle::Arc, LineWeight::Light) => Some(['╭', '╮', '╰', '╯']),
        (LineStyle::Double, CornerStyle::Square, LineWeight::Light) => Some(['╔', '╗', '╚', '╝']),
        _ => None,
    }
}

/// Glyphs for the six drawing roles: two edges and four corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSet {
    pub h: char,
    pub v: char,
    pub tl: char,
    pub tr: char,
    pub bl: char,
    pub br: char,
}

impl Default for CharacterSet {
    fn default() -> Self {
        Self {
            h: '─',
            v: '│',
            tl: '┌',
            tr: '┐',
            bl: '└',
            br: '┘',
        }
    }
}

impl CharacterSet {
    /// Look up a catalog combination. Returns `None` when the style does
    /// not exist (e.g. heavy wavy lines or double arcs).
    pub fn from_style(
        style: LineStyle,
        pattern: LinePattern,
        corner: CornerStyle,
        weight: LineWeight,
    ) -> Option<Self> {
        let (h, v) = edge_glyphs(style, pattern, weight)?;
        let [tl, tr, bl, br] = corner_glyphs(style, corner, weight)?;
        Some(Self { h, v, tl, tr, bl, br })
    }

    /// Every valid catalog combination.
    pub fn combinations() -> Vec<(LineStyle, LinePattern, CornerStyle, LineWeight)> {
        let mut combos = Vec::new();
        for style in LINE_STYLES {
            for pattern in LINE_PATTERNS {
                for weight in LINE_WEIGHTS {
                    for corner in CORNER_STYLES {
                        if Self::from_style(style, pattern, corner, weight).is_some() {
                            combos.push((style, pattern, corner, weight));
                        }
                    }
                }
            }
        }
        combos
    }

    /// Corner glyph for the given role.
    pub fn corner(&self, row: CornerRow, col: CornerCol) -> char {
        match (row, col) {
            (CornerRow::Top, CornerCol::Left) => self.tl,
            (CornerRow::Top, CornerCol::Right) => self.tr,
            (CornerRow::Bottom, CornerCol::Left) => self.bl,
            (CornerRow::Bottom, CornerCol::Right) => self.br,
        }
    }

    /// A small sample box drawn with this set.
    pub fn sample_box(&self) -> String {
        let h: String = std::iter::repeat_n(self.h, 2).collect();
        format!(
            "{}{h}{}\n{}  {}\n{}{h}{}",
            self.tl, self.tr, self.v, self.v, self.bl, self.br
        )
    }
}

/// Filled or outlined arrowhead triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadStyle {
    Black,
    White,
}

/// Arrowhead glyphs per direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrowHeads {
    pub right: char,
    pub left: char,
    pub up: char,
    pub down: char,
}

impl Default for ArrowHeads {
    fn default() -> Self {
        Self {
            right: '►',
            left: '◄',
            up: '▲',
            down: '▼',
        }
    }
}

impl ArrowHeads {
    pub fn from_style(style: HeadStyle) -> Self {
        match style {
            HeadStyle::Black => Self {
                right: '▶',
                left: '◀',
                up: '▲',
                down: '▼',
            },
            HeadStyle::White => Self {
                right: '▷',
                left: '◁',
                up: '△',
                down: '▽',
            },
        }
    }
}
