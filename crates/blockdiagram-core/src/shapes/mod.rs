//! Shape definitions and the cell-level rasterization primitives they share.

mod arrow;
mod line;
mod rectangle;
mod trapezoid;

pub use arrow::{ApproachMode, Arrow, infer_approach_mode};
pub use line::Line;
pub use rectangle::Rectangle;
pub use trapezoid::{Trapezoid, TrapezoidOrientation};

use crate::grid::{CellTag, Cursor, GridBuffer, WriteMode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for committed shapes.
pub type ShapeId = Uuid;

/// Glyph written where a horizontal and a vertical run cross.
pub const DEFAULT_JUNCTION_GLYPH: char = ')';

/// Direction of a diagonal run, named after its glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slant {
    /// `\`: column grows as the row grows.
    Backslash,
    /// `/`: column shrinks as the row grows.
    Slash,
}

impl Slant {
    pub fn glyph(self) -> char {
        match self {
            Slant::Backslash => '\\',
            Slant::Slash => '/',
        }
    }

    fn step(self) -> i32 {
        match self {
            Slant::Backslash => 1,
            Slant::Slash => -1,
        }
    }
}

/// Writes cells into a [`GridBuffer`] in one [`WriteMode`].
///
/// Junction checks always read committed metadata, so previews render
/// crossings the same way the commit will.
pub struct Painter<'a> {
    grid: &'a mut GridBuffer,
    mode: WriteMode,
    junction: char,
}

impl<'a> Painter<'a> {
    pub fn new(grid: &'a mut GridBuffer, mode: WriteMode) -> Self {
        Self {
            grid,
            mode,
            junction: DEFAULT_JUNCTION_GLYPH,
        }
    }

    /// Use a different crossing glyph.
    pub fn with_junction(mut self, glyph: char) -> Self {
        self.junction = glyph;
        self
    }

    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    pub fn grid(&self) -> &GridBuffer {
        &*self.grid
    }

    pub fn set(&mut self, col: i32, row: i32, glyph: char, tag: Option<CellTag>) {
        self.grid.set(col, row, glyph, tag, self.mode);
    }

    /// Write `length` cells rightwards from (`col`, `row`).
    pub fn h_run(&mut self, col: i32, row: i32, length: i32, glyph: char, tag: CellTag) {
        for c in col..col + length {
            let glyph = if self.grid.tag(c, row) == Some(CellTag::ArrowVertical) {
                self.junction
            } else {
                glyph
            };
            self.set(c, row, glyph, Some(tag));
        }
    }

    /// Write `length` cells downwards from (`col`, `row`).
    pub fn v_run(&mut self, col: i32, row: i32, length: i32, glyph: char, tag: CellTag) {
        for r in row..row + length {
            let glyph = if self.grid.tag(col, r) == Some(CellTag::ArrowHorizontal) {
                self.junction
            } else {
                glyph
            };
            self.set(col, r, glyph, Some(tag));
        }
    }

    /// Write `length` diagonal cells starting at the top cell, one column
    /// per row.
    pub fn diagonal(&mut self, top_col: i32, top_row: i32, length: i32, slant: Slant) {
        for i in 0..length.max(0) {
            self.set(
                top_col + slant.step() * i,
                top_row + i,
                slant.glyph(),
                Some(CellTag::Diagonal),
            );
        }
    }
}

/// Round `value` to the nearest multiple of `multiple`, ties going to the
/// even quotient.
pub fn round_to_multiple(value: i32, multiple: i32) -> i32 {
    let quotient = value.div_euclid(multiple);
    let twice_rem = 2 * value.rem_euclid(multiple);
    let rounded = if twice_rem > multiple || (twice_rem == multiple && quotient % 2 != 0) {
        quotient + 1
    } else {
        quotient
    };
    rounded * multiple
}

/// Something that can be drawn onto the grid.
pub trait Rasterize {
    fn rasterize(&self, painter: &mut Painter<'_>);
}

/// A committed shape, kept in insertion order by the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Shape {
    Box(Rectangle),
    Line(Line),
    Trapezoid(Trapezoid),
    Arrow(Arrow),
}

impl Shape {
    /// Short kind name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Box(_) => "box",
            Shape::Line(_) => "line",
            Shape::Trapezoid(_) => "trapezoid",
            Shape::Arrow(_) => "arrow",
        }
    }

    /// The (anchor, endpoint) pair the shape was drawn from.
    pub fn endpoints(&self) -> (Cursor, Cursor) {
        match self {
            Shape::Box(s) => (s.anchor, s.end),
            Shape::Line(s) => (s.anchor, s.end),
            Shape::Trapezoid(s) => (s.anchor, s.end),
            Shape::Arrow(s) => (s.anchor, s.end),
        }
    }
}

impl Rasterize for Shape {
    fn rasterize(&self, painter: &mut Painter<'_>) {
        match self {
            Shape::Box(s) => s.rasterize(painter),
            Shape::Line(s) => s.rasterize(painter),
            Shape::Trapezoid(s) => s.rasterize(painter),
            Shape::Arrow(s) => s.rasterize(painter),
        }
    }
}
