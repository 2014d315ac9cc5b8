//! Straight line shape.

use super::{Painter, Rasterize, ShapeId};
use crate::charset::CharacterSet;
use crate::grid::{CellTag, Cursor};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A straight horizontal or vertical line.
///
/// Only the dominant axis of the drag is followed; the other delta is
/// ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: ShapeId,
    pub anchor: Cursor,
    pub end: Cursor,
    pub char_set: CharacterSet,
}

impl Line {
    pub fn new(anchor: Cursor, end: Cursor, char_set: CharacterSet) -> Self {
        Self {
            id: Uuid::new_v4(),
            anchor,
            end,
            char_set,
        }
    }

    /// Vertical when the row delta exceeds the column delta.
    pub fn is_vertical(&self) -> bool {
        (self.end.row - self.anchor.row).abs() > (self.end.col - self.anchor.col).abs()
    }
}

impl Rasterize for Line {
    fn rasterize(&self, painter: &mut Painter<'_>) {
        let height = (self.end.row - self.anchor.row).abs();
        let width = (self.end.col - self.anchor.col).abs();

        if self.is_vertical() {
            let top = self.anchor.row.min(self.end.row);
            painter.v_run(self.anchor.col, top, height, self.char_set.v, CellTag::ArrowVertical);
        } else {
            let left = self.anchor.col.min(self.end.col);
            painter.h_run(left, self.anchor.row, width, self.char_set.h, CellTag::ArrowHorizontal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridBuffer, WriteMode};

    fn draw(anchor: Cursor, end: Cursor) -> GridBuffer {
        let mut grid = GridBuffer::new(10, 10);
        Line::new(anchor, end, CharacterSet::default())
            .rasterize(&mut Painter::new(&mut grid, WriteMode::Commit));
        grid
    }

    #[test]
    fn test_horizontal_line_ignores_row_delta() {
        let grid = draw(Cursor::new(2, 1), Cursor::new(3, 6));
        assert_eq!(grid.trimmed_lines()[2], " ─────");
        assert_eq!(grid.high_water(), (5, 2));
        assert_eq!(grid.tag(3, 2), Some(CellTag::ArrowHorizontal));
    }

    #[test]
    fn test_vertical_line() {
        let grid = draw(Cursor::new(1, 4), Cursor::new(5, 5));
        for row in 1..5 {
            assert_eq!(grid.get(4, row).glyph, '│');
            assert_eq!(grid.tag(4, row), Some(CellTag::ArrowVertical));
        }
        assert_eq!(grid.get(4, 5).glyph, ' ');
    }

    #[test]
    fn test_leftward_line_covers_same_span() {
        let grid = draw(Cursor::new(0, 6), Cursor::new(0, 2));
        let drawn: Vec<i32> = (0..10).filter(|&c| grid.get(c, 0).glyph == '─').collect();
        assert_eq!(drawn, vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_tie_is_horizontal() {
        let line = Line::new(Cursor::new(0, 0), Cursor::new(3, 3), CharacterSet::default());
        assert!(!line.is_vertical());
    }
}
