//! Trapezoid shape with one slanted pair of sides.

use super::{Painter, Rasterize, ShapeId, Slant, round_to_multiple};
use crate::charset::CharacterSet;
use crate::grid::{CellTag, Cursor};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which axis the long edges run along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrapezoidOrientation {
    /// Long edges are vertical; the drag's row delta sets the size.
    Vertical,
    /// Long edges are horizontal; the drag's column delta sets the size.
    Horizontal,
}

/// A trapezoid whose size snaps to a multiple of three so the slanted legs
/// keep a fixed slope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trapezoid {
    pub(crate) id: ShapeId,
    pub anchor: Cursor,
    pub end: Cursor,
    pub orientation: TrapezoidOrientation,
    pub char_set: CharacterSet,
}

impl Trapezoid {
    pub fn new(
        anchor: Cursor,
        end: Cursor,
        orientation: TrapezoidOrientation,
        char_set: CharacterSet,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            anchor,
            end,
            orientation,
            char_set,
        }
    }

    /// Length of the long edge after snapping.
    pub fn size(&self) -> i32 {
        let delta = match self.orientation {
            TrapezoidOrientation::Vertical => self.end.row - self.anchor.row,
            TrapezoidOrientation::Horizontal => self.end.col - self.anchor.col,
        };
        round_to_multiple(delta.abs(), 3)
    }

    /// Length of each slanted leg, a third of the size.
    pub fn leg(&self) -> i32 {
        self.size() / 3
    }

    fn rasterize_vertical(&self, painter: &mut Painter<'_>) {
        let Cursor { row, col } = self.anchor;
        let (size, leg) = (self.size(), self.leg());
        let v = self.char_set.v;

        if self.end.col > self.anchor.col {
            // |\
            // |  |
            // |/
            painter.v_run(col, row, size, v, CellTag::BoxVertical);
            painter.v_run(col + leg + 1, row + leg, leg, v, CellTag::BoxVertical);
            painter.diagonal(col + 1, row, leg, Slant::Backslash);
            painter.diagonal(col + leg, row + 2 * leg, leg, Slant::Slash);
        } else {
            //   /|
            // |  |
            //   \|
            painter.v_run(col, row + leg, leg, v, CellTag::BoxVertical);
            painter.v_run(col + leg + 1, row, size, v, CellTag::BoxVertical);
            painter.diagonal(col + 1, row + 2 * leg, leg, Slant::Backslash);
            painter.diagonal(col + leg, row, leg, Slant::Slash);
        }
    }

    fn rasterize_horizontal(&self, painter: &mut Painter<'_>) {
        let Cursor { row, col } = self.anchor;
        let (size, leg) = (self.size(), self.leg());
        let h = self.char_set.h;

        //   ──
        //  /  \
        // /    \
        // ──────
        painter.h_run(col + leg, row, leg, h, CellTag::BoxHorizontal);
        painter.diagonal(col + leg - 1, row + 1, leg, Slant::Slash);
        painter.diagonal(col + 2 * leg, row + 1, leg, Slant::Backslash);
        painter.h_run(col, row + leg + 1, size, h, CellTag::BoxHorizontal);
    }
}

impl Rasterize for Trapezoid {
    fn rasterize(&self, painter: &mut Painter<'_>) {
        match self.orientation {
            TrapezoidOrientation::Vertical => self.rasterize_vertical(painter),
            TrapezoidOrientation::Horizontal => self.rasterize_horizontal(painter),
        }
    }
}
