//! Orthogonally routed arrows.

use super::{Painter, Rasterize, ShapeId};
use crate::charset::{ArrowHeads, CharacterSet, CornerCol, CornerRow};
use crate::grid::{CellTag, Cursor, GridBuffer};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where an elbowed arrow turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApproachMode {
    /// Leave the anchor vertically and arrive at the endpoint sideways.
    #[default]
    Horizontal,
    /// Leave the anchor sideways and arrive at the endpoint vertically.
    Vertical,
}

/// Pick the approach mode from the committed borders around `end`.
///
/// The cell one column past the endpoint (in the direction of travel) is
/// checked for a vertical box border, then the cell one row past it for a
/// horizontal box border. Anything else, including cells outside the
/// grid, means [`ApproachMode::Horizontal`].
pub fn infer_approach_mode(anchor: Cursor, end: Cursor, grid: &GridBuffer) -> ApproachMode {
    let dir_col = if anchor.col < end.col { 1 } else { -1 };
    let dir_row = if anchor.row < end.row { 1 } else { -1 };
    let side = (end.col + dir_col, end.row);
    let below = (end.col, end.row + dir_row);

    if !grid.in_bounds(side.0, side.1) || !grid.in_bounds(below.0, below.1) {
        return ApproachMode::Horizontal;
    }
    if grid.tag(side.0, side.1) == Some(CellTag::BoxVertical) {
        ApproachMode::Horizontal
    } else if grid.tag(below.0, below.1) == Some(CellTag::BoxHorizontal) {
        ApproachMode::Vertical
    } else {
        ApproachMode::Horizontal
    }
}

/// A connector from `anchor` to `end` with an arrowhead at `end`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arrow {
    pub(crate) id: ShapeId,
    pub anchor: Cursor,
    pub end: Cursor,
    pub approach: ApproachMode,
    pub char_set: CharacterSet,
    pub heads: ArrowHeads,
}

impl Arrow {
    pub fn new(
        anchor: Cursor,
        end: Cursor,
        approach: ApproachMode,
        char_set: CharacterSet,
        heads: ArrowHeads,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            anchor,
            end,
            approach,
            char_set,
            heads,
        }
    }

    fn h(&self, p: &mut Painter<'_>, col: i32, row: i32, len: i32) {
        p.h_run(col, row, len, self.char_set.h, CellTag::ArrowHorizontal);
    }

    fn v(&self, p: &mut Painter<'_>, col: i32, row: i32, len: i32) {
        p.v_run(col, row, len, self.char_set.v, CellTag::ArrowVertical);
    }

    fn corner(&self, p: &mut Painter<'_>, col: i32, row: i32, r: CornerRow, c: CornerCol) {
        p.set(col, row, self.char_set.corner(r, c), None);
    }

    /// Draw one of the eight elbow layouts. The offsets differ per layout.
    fn elbow(&self, p: &mut Painter<'_>) {
        use CornerCol::{Left, Right};
        use CornerRow::{Bottom, Top};

        let (sc, sr) = (self.anchor.col, self.anchor.row);
        let (ec, er) = (self.end.col, self.end.row);
        let heads = self.heads;
        let down = sr < er;
        let right = sc < ec;

        match (down, right, self.approach) {
            // └───►
            (true, true, ApproachMode::Horizontal) => {
                let (sc, ec) = (sc + 1, ec + 1);
                self.v(p, sc, sr, (er - sr).abs());
                self.h(p, sc, er, (ec - sc).abs());
                p.set(ec - 1, er, heads.right, Some(CellTag::HeadRight));
                self.corner(p, sc, er, Bottom, Left);
            }
            // ───┐
            //    ▼
            (true, true, ApproachMode::Vertical) => {
                let sc = sc + 1;
                self.v(p, ec, sr, (er - sr).abs());
                self.h(p, sc, sr, (ec - sc).abs());
                p.set(ec, er, heads.down, Some(CellTag::HeadDown));
                self.corner(p, ec, sr, Top, Right);
            }
            // ◄───┘
            (true, false, ApproachMode::Horizontal) => {
                let sc = sc + 1;
                self.v(p, sc, sr, (er - sr).abs());
                self.h(p, ec, er, (ec - sc).abs());
                p.set(ec, er, heads.left, Some(CellTag::HeadLeft));
                self.corner(p, sc, er, Bottom, Right);
            }
            // ┌───
            // ▼
            (true, false, ApproachMode::Vertical) => {
                let sc = sc + 1;
                self.v(p, ec, sr, (er - sr).abs());
                self.h(p, ec, sr, (ec - sc).abs());
                p.set(ec, er, heads.down, Some(CellTag::HeadDown));
                self.corner(p, ec, sr, Top, Left);
            }
            // ┌───►
            (false, true, ApproachMode::Horizontal) => {
                let (sc, sr) = (sc + 1, sr + 1);
                self.v(p, sc, er, (er - sr).abs());
                self.h(p, sc, er, (ec - sc).abs());
                p.set(ec, er, heads.right, Some(CellTag::HeadRight));
                self.corner(p, sc, er, Top, Left);
            }
            //    ▲
            // ───┘
            (false, true, ApproachMode::Vertical) => {
                let sc = sc + 1;
                self.v(p, ec, er, (er - sr).abs());
                self.h(p, sc, sr, (ec - sc).abs());
                p.set(ec, er, heads.up, Some(CellTag::HeadUp));
                self.corner(p, ec, sr, Bottom, Right);
            }
            // ◄───┐
            (false, false, ApproachMode::Horizontal) => {
                let sc = sc + 1;
                self.v(p, sc, er, (er - sr).abs());
                self.h(p, ec, er, (ec - sc).abs());
                p.set(ec + 1, er, heads.left, Some(CellTag::HeadLeft));
                self.corner(p, sc, er, Top, Right);
            }
            // ▲
            // └───
            (false, false, ApproachMode::Vertical) => {
                let sc = sc + 2;
                self.v(p, ec, er, (er - sr).abs());
                self.h(p, ec, sr, (ec - sc).abs());
                p.set(ec, er, heads.up, Some(CellTag::HeadUp));
                self.corner(p, ec, sr, Bottom, Left);
            }
        }
    }
}

impl Rasterize for Arrow {
    fn rasterize(&self, painter: &mut Painter<'_>) {
        let (sc, sr) = (self.anchor.col, self.anchor.row);
        let (ec, er) = (self.end.col, self.end.row);
        let start_tag = painter.grid().tag(sc + 1, sr);

        if sr == er {
            self.h(painter, sc.min(ec) + 1, sr, (ec - sc).abs());
            let (glyph, tag) = if sc < ec {
                (self.heads.right, CellTag::HeadRight)
            } else {
                (self.heads.left, CellTag::HeadLeft)
            };
            painter.set(ec, er, glyph, Some(tag));
        } else if sc == ec {
            self.v(painter, sc, sr.min(er), (er - sr).abs());
            let (glyph, tag) = if sr < er {
                (self.heads.down, CellTag::HeadDown)
            } else {
                (self.heads.up, CellTag::HeadUp)
            };
            painter.set(ec, er, glyph, Some(tag));
        } else {
            self.elbow(painter);
        }

        // Join onto the head of an arrow that ends right next to our anchor.
        let vertical = match start_tag {
            Some(CellTag::HeadUp) => Some(CornerRow::Top),
            Some(CellTag::HeadDown) => Some(CornerRow::Bottom),
            _ => None,
        };
        if let Some(row) = vertical {
            let col = if sc < ec { CornerCol::Left } else { CornerCol::Right };
            self.corner(painter, sc + 1, sr, row, col);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::WriteMode;

    fn arrow(anchor: Cursor, end: Cursor, approach: ApproachMode) -> Arrow {
        Arrow::new(anchor, end, approach, CharacterSet::default(), ArrowHeads::default())
    }

    fn draw_on(grid: &mut GridBuffer, shape: &Arrow) {
        shape.rasterize(&mut Painter::new(grid, WriteMode::Commit));
    }

    fn draw(shape: &Arrow) -> GridBuffer {
        let mut grid = GridBuffer::new(10, 12);
        draw_on(&mut grid, shape);
        grid
    }

    #[test]
    fn test_same_row_right() {
        let grid = draw(&arrow(Cursor::new(0, 0), Cursor::new(0, 5), ApproachMode::Horizontal));
        for col in 1..5 {
            assert_eq!(grid.get(col, 0).glyph, '─');
            assert_eq!(grid.tag(col, 0), Some(CellTag::ArrowHorizontal));
        }
        assert_eq!(grid.get(5, 0).glyph, '►');
        assert_eq!(grid.tag(5, 0), Some(CellTag::HeadRight));
        assert_eq!(grid.get(0, 0).glyph, ' ');
    }

    #[test]
    fn test_same_row_left() {
        let grid = draw(&arrow(Cursor::new(2, 6), Cursor::new(2, 2), ApproachMode::Horizontal));
        assert_eq!(grid.trimmed_lines()[2], "  ◄────");
        assert_eq!(grid.tag(2, 2), Some(CellTag::HeadLeft));
    }

    #[test]
    fn test_same_column_heads_follow_direction() {
        let grid = draw(&arrow(Cursor::new(1, 3), Cursor::new(4, 3), ApproachMode::Horizontal));
        assert_eq!(grid.get(3, 1).glyph, '│');
        assert_eq!(grid.get(3, 3).glyph, '│');
        assert_eq!(grid.get(3, 4).glyph, '▼');
        assert_eq!(grid.tag(3, 4), Some(CellTag::HeadDown));

        let grid = draw(&arrow(Cursor::new(4, 3), Cursor::new(1, 3), ApproachMode::Horizontal));
        assert_eq!(grid.get(3, 1).glyph, '▲');
        assert_eq!(grid.tag(3, 1), Some(CellTag::HeadUp));
        assert_eq!(grid.get(3, 3).glyph, '│');
        assert_eq!(grid.get(3, 4).glyph, ' ');
    }

    #[test]
    fn test_down_right_horizontal() {
        let grid = draw(&arrow(Cursor::new(0, 0), Cursor::new(2, 4), ApproachMode::Horizontal));
        assert_eq!(grid.trimmed_lines(), vec![" │   ", " │   ", " └──►"]);
    }

    #[test]
    fn test_down_right_vertical() {
        let grid = draw(&arrow(Cursor::new(0, 0), Cursor::new(2, 4), ApproachMode::Vertical));
        assert_eq!(grid.trimmed_lines(), vec![" ───┐", "    │", "    ▼"]);
    }

    #[test]
    fn test_down_left_horizontal() {
        let grid = draw(&arrow(Cursor::new(0, 5), Cursor::new(2, 1), ApproachMode::Horizontal));
        assert_eq!(grid.trimmed_lines(), vec!["      │", "      │", " ◄────┘"]);
    }

    #[test]
    fn test_down_left_vertical() {
        let grid = draw(&arrow(Cursor::new(0, 5), Cursor::new(2, 1), ApproachMode::Vertical));
        assert_eq!(grid.trimmed_lines(), vec![" ┌────", " │    ", " ▼    "]);
    }

    #[test]
    fn test_up_right_horizontal() {
        let grid = draw(&arrow(Cursor::new(3, 0), Cursor::new(0, 4), ApproachMode::Horizontal));
        assert_eq!(grid.trimmed_lines(), vec![" ┌──►", " │   ", " │   ", " │   "]);
    }

    #[test]
    fn test_up_right_vertical() {
        let grid = draw(&arrow(Cursor::new(2, 0), Cursor::new(0, 4), ApproachMode::Vertical));
        assert_eq!(grid.trimmed_lines(), vec!["    ▲", "    │", " ───┘"]);
    }

    #[test]
    fn test_up_left_horizontal() {
        let grid = draw(&arrow(Cursor::new(2, 5), Cursor::new(0, 1), ApproachMode::Horizontal));
        assert_eq!(grid.trimmed_lines(), vec![" ─◄───┐", "      │"]);
    }

    #[test]
    fn test_up_left_vertical() {
        let grid = draw(&arrow(Cursor::new(2, 5), Cursor::new(0, 1), ApproachMode::Vertical));
        assert_eq!(grid.trimmed_lines(), vec![" ▲     ", " │     ", " └─────"]);
    }

    #[test]
    fn test_chained_arrow_stamps_corner() {
        let mut grid = GridBuffer::new(10, 12);
        draw_on(&mut grid, &arrow(Cursor::new(0, 1), Cursor::new(3, 1), ApproachMode::Horizontal));
        assert_eq!(grid.tag(1, 3), Some(CellTag::HeadDown));

        draw_on(&mut grid, &arrow(Cursor::new(3, 0), Cursor::new(3, 6), ApproachMode::Horizontal));
        assert_eq!(grid.get(1, 3).glyph, '└');
        assert_eq!(grid.get(6, 3).glyph, '►');
    }

    #[test]
    fn test_crossing_arrows_use_junction() {
        let mut grid = GridBuffer::new(10, 12);
        draw_on(&mut grid, &arrow(Cursor::new(0, 3), Cursor::new(5, 3), ApproachMode::Horizontal));
        draw_on(&mut grid, &arrow(Cursor::new(2, 0), Cursor::new(2, 6), ApproachMode::Horizontal));
        assert_eq!(grid.get(3, 2).glyph, ')');
    }

    #[test]
    fn test_infer_defaults_to_horizontal() {
        let grid = GridBuffer::new(10, 10);
        let mode = infer_approach_mode(Cursor::new(0, 0), Cursor::new(4, 4), &grid);
        assert_eq!(mode, ApproachMode::Horizontal);
    }

    #[test]
    fn test_infer_vertical_over_box_top() {
        let mut grid = GridBuffer::new(10, 10);
        grid.set(4, 5, '─', Some(CellTag::BoxHorizontal), WriteMode::Commit);
        let mode = infer_approach_mode(Cursor::new(0, 0), Cursor::new(4, 4), &grid);
        assert_eq!(mode, ApproachMode::Vertical);

        // A box side next to the endpoint wins.
        grid.set(5, 4, '│', Some(CellTag::BoxVertical), WriteMode::Commit);
        let mode = infer_approach_mode(Cursor::new(0, 0), Cursor::new(4, 4), &grid);
        assert_eq!(mode, ApproachMode::Horizontal);
    }

    #[test]
    fn test_infer_looks_away_from_anchor() {
        let mut grid = GridBuffer::new(10, 10);
        grid.set(4, 3, '─', Some(CellTag::BoxHorizontal), WriteMode::Commit);
        let mode = infer_approach_mode(Cursor::new(8, 8), Cursor::new(4, 4), &grid);
        assert_eq!(mode, ApproachMode::Vertical);
    }

    #[test]
    fn test_infer_out_of_bounds_is_horizontal() {
        let mut grid = GridBuffer::new(5, 5);
        grid.set(4, 4, '─', Some(CellTag::BoxHorizontal), WriteMode::Commit);
        let mode = infer_approach_mode(Cursor::new(0, 0), Cursor::new(3, 4), &grid);
        assert_eq!(mode, ApproachMode::Horizontal);
    }
}
