//! Box shape.

use super::{Painter, Rasterize, ShapeId};
use crate::charset::CharacterSet;
use crate::grid::{CellTag, Cursor};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned box spanning two opposite corners.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Cell where the drag started.
    pub anchor: Cursor,
    /// Cell where the drag ended.
    pub end: Cursor,
    pub char_set: CharacterSet,
}

impl Rectangle {
    pub fn new(anchor: Cursor, end: Cursor, char_set: CharacterSet) -> Self {
        Self {
            id: Uuid::new_v4(),
            anchor,
            end,
            char_set,
        }
    }

    /// Top-left corner of the box.
    pub fn origin(&self) -> Cursor {
        Cursor::new(self.anchor.row.min(self.end.row), self.anchor.col.min(self.end.col))
    }

    /// Width in cells, at least 1.
    pub fn width(&self) -> i32 {
        (self.end.col - self.anchor.col).abs() + 1
    }

    /// Height in cells, at least 1.
    pub fn height(&self) -> i32 {
        (self.end.row - self.anchor.row).abs() + 1
    }
}

impl Rasterize for Rectangle {
    fn rasterize(&self, painter: &mut Painter<'_>) {
        let Cursor { row, col } = self.origin();
        let (width, height) = (self.width(), self.height());
        let last_row = row + height - 1;
        let last_col = col + width - 1;
        let set = &self.char_set;

        painter.h_run(col + 1, row, width - 2, set.h, CellTag::BoxHorizontal);
        painter.h_run(col + 1, last_row, width - 2, set.h, CellTag::BoxHorizontal);
        painter.v_run(col, row + 1, height - 2, set.v, CellTag::BoxVertical);
        painter.v_run(last_col, row + 1, height - 2, set.v, CellTag::BoxVertical);

        // Corners last so they win over both runs.
        painter.set(col, row, set.tl, None);
        painter.set(last_col, row, set.tr, None);
        painter.set(col, last_row, set.bl, None);
        painter.set(last_col, last_row, set.br, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridBuffer, WriteMode};

    fn draw(anchor: Cursor, end: Cursor) -> GridBuffer {
        let mut grid = GridBuffer::new(10, 10);
        let shape = Rectangle::new(anchor, end, CharacterSet::default());
        shape.rasterize(&mut Painter::new(&mut grid, WriteMode::Commit));
        grid
    }

    #[test]
    fn test_box_layout() {
        let grid = draw(Cursor::new(1, 1), Cursor::new(3, 5));
        let lines = grid.trimmed_lines();

        assert_eq!(lines[1], " ┌───┐");
        assert_eq!(lines[2], " │   │");
        assert_eq!(lines[3], " └───┘");
        assert_eq!(grid.tag(2, 1), Some(CellTag::BoxHorizontal));
        assert_eq!(grid.tag(1, 2), Some(CellTag::BoxVertical));
        assert_eq!(grid.tag(1, 1), None);
    }

    #[test]
    fn test_box_normalizes_drag_direction() {
        let forward = draw(Cursor::new(1, 1), Cursor::new(3, 5));
        let backward = draw(Cursor::new(3, 5), Cursor::new(1, 1));
        assert_eq!(forward.trimmed_lines(), backward.trimmed_lines());
    }

    #[test]
    fn test_edge_run_lengths() {
        let grid = draw(Cursor::new(0, 0), Cursor::new(4, 6));
        let top = (1..6).filter(|&c| grid.get(c, 0).glyph == '─').count();
        let left = (1..4).filter(|&r| grid.get(0, r).glyph == '│').count();
        assert_eq!(top, 5);
        assert_eq!(left, 3);
        for (col, row, glyph) in [(0, 0, '┌'), (6, 0, '┐'), (0, 4, '└'), (6, 4, '┘')] {
            assert_eq!(grid.get(col, row).glyph, glyph);
        }
    }

    #[test]
    fn test_degenerate_box_places_corners() {
        let grid = draw(Cursor::new(2, 2), Cursor::new(2, 4));
        // Height 1: bottom corners overwrite the top ones.
        assert_eq!(grid.get(2, 2).glyph, '└');
        assert_eq!(grid.get(3, 2).glyph, '─');
        assert_eq!(grid.get(4, 2).glyph, '┘');

        let dot = draw(Cursor::new(5, 5), Cursor::new(5, 5));
        assert_eq!(dot.get(5, 5).glyph, '┘');
        assert_eq!(dot.high_water(), (5, 5));
    }

    #[test]
    fn test_corners_override_junctions() {
        let mut grid = GridBuffer::new(10, 10);
        grid.set(1, 1, '│', Some(CellTag::ArrowVertical), WriteMode::Commit);
        let shape = Rectangle::new(Cursor::new(1, 1), Cursor::new(3, 3), CharacterSet::default());
        shape.rasterize(&mut Painter::new(&mut grid, WriteMode::Commit));

        assert_eq!(grid.get(1, 1).glyph, '┌');
    }
}
