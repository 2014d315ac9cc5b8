//! Rectangular selection with copy, move and erase.

use crate::grid::{CellTag, Cursor, GridBuffer, Region, WriteMode};

/// One captured cell. A captured space is stored as `glyph: None` so that
/// stamping the snapshot leaves the destination cell alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipCell {
    pub glyph: Option<char>,
    pub tag: Option<CellTag>,
}

/// Where the selection gesture currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    /// Pointer is down, nothing dragged yet.
    Anchored { anchor: Cursor },
    /// Region is tracking the pointer.
    Dragging { anchor: Cursor, current: Cursor },
    /// A region has been captured. `moving` is set while it is dragged
    /// around as a live preview.
    Selected {
        region: Region,
        snapshot: Vec<Vec<ClipCell>>,
        moving: bool,
    },
}

/// The select tool's state machine plus its clipboard.
#[derive(Debug, Clone, Default)]
pub struct SelectionClipboard {
    state: SelectionState,
}

impl SelectionClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// The captured region, if any.
    pub fn region(&self) -> Option<Region> {
        match &self.state {
            SelectionState::Selected { region, .. } => Some(*region),
            _ => None,
        }
    }

    /// The captured cells, if any.
    pub fn snapshot(&self) -> Option<&[Vec<ClipCell>]> {
        match &self.state {
            SelectionState::Selected { snapshot, .. } => Some(snapshot),
            _ => None,
        }
    }

    /// Region to highlight on screen. Hidden while a selection is being moved.
    pub fn highlight(&self) -> Option<Region> {
        match &self.state {
            SelectionState::Dragging { anchor, current } => {
                Some(Region::from_corners(*anchor, *current))
            }
            SelectionState::Selected {
                region,
                moving: false,
                ..
            } => Some(*region),
            _ => None,
        }
    }

    /// Drop the selection without touching the grid.
    pub fn clear(&mut self) {
        self.state = SelectionState::Idle;
    }

    /// Abandon a drag or move in progress. A captured selection is kept.
    pub fn cancel_drag(&mut self) {
        match &mut self.state {
            SelectionState::Anchored { .. } | SelectionState::Dragging { .. } => {
                self.state = SelectionState::Idle;
            }
            SelectionState::Selected { moving, .. } => *moving = false,
            SelectionState::Idle => {}
        }
    }

    /// Pointer pressed. `pointer` is the raw pointer cell used for the hit
    /// test, `anchor` the gesture anchor.
    pub fn pointer_down(&mut self, anchor: Cursor, pointer: Cursor) {
        match &self.state {
            SelectionState::Selected { region, .. } if region.contains(pointer) => {
                log::debug!("Grabbed selection at {pointer:?}");
            }
            SelectionState::Selected { .. } => {
                log::debug!("Selection discarded");
                self.state = SelectionState::Idle;
            }
            _ => self.state = SelectionState::Anchored { anchor },
        }
    }

    /// Pointer dragged to `cursor`. A captured selection is previewed with
    /// its top-left corner at `dest`.
    pub fn pointer_move(&mut self, cursor: Cursor, dest: Cursor, grid: &mut GridBuffer) {
        match &mut self.state {
            SelectionState::Anchored { anchor } => {
                let anchor = *anchor;
                log::debug!("Selecting from {anchor:?}");
                self.state = SelectionState::Dragging {
                    anchor,
                    current: cursor,
                };
            }
            SelectionState::Dragging { current, .. } => *current = cursor,
            SelectionState::Selected {
                snapshot, moving, ..
            } => {
                *moving = true;
                stamp(snapshot, dest, grid, WriteMode::Preview);
            }
            SelectionState::Idle => {}
        }
    }

    /// Pointer released at `cursor`. Finishes a drag by capturing the region,
    /// or finishes a move by committing it at `dest` and blanking the source.
    pub fn pointer_up(&mut self, cursor: Cursor, dest: Cursor, grid: &mut GridBuffer) {
        match std::mem::take(&mut self.state) {
            SelectionState::Dragging { anchor, .. } => {
                let region = Region::from_corners(anchor, cursor);
                log::debug!("Selected {region:?}");
                self.state = SelectionState::Selected {
                    region,
                    snapshot: capture(grid, region),
                    moving: false,
                };
            }
            SelectionState::Selected {
                region, snapshot, ..
            } => {
                log::debug!("Moving selection {region:?} to {dest:?}");
                stamp(&snapshot, dest, grid, WriteMode::Commit);
                erase(grid, region);
            }
            SelectionState::Anchored { .. } | SelectionState::Idle => {}
        }
    }

    /// Re-capture the selected region from the grid.
    pub fn copy(&mut self, grid: &GridBuffer) -> bool {
        match &mut self.state {
            SelectionState::Selected {
                region, snapshot, ..
            } => {
                *snapshot = capture(grid, *region);
                true
            }
            _ => false,
        }
    }

    /// Blank the selected region. The selection itself is kept.
    pub fn erase(&self, grid: &mut GridBuffer) -> bool {
        match self.region() {
            Some(region) => {
                erase(grid, region);
                true
            }
            None => false,
        }
    }

    /// Commit the snapshot with its top-left corner at `dest`.
    pub fn paste(&self, dest: Cursor, grid: &mut GridBuffer) -> bool {
        match self.snapshot() {
            Some(snapshot) => {
                stamp(snapshot, dest, grid, WriteMode::Commit);
                true
            }
            None => false,
        }
    }
}

fn capture(grid: &GridBuffer, region: Region) -> Vec<Vec<ClipCell>> {
    (region.first.row..=region.second.row)
        .map(|row| {
            (region.first.col..=region.second.col)
                .map(|col| {
                    let cell = grid.get(col, row);
                    ClipCell {
                        glyph: (cell.glyph != ' ').then_some(cell.glyph),
                        tag: cell.tag,
                    }
                })
                .collect()
        })
        .collect()
}

fn stamp(snapshot: &[Vec<ClipCell>], dest: Cursor, grid: &mut GridBuffer, mode: WriteMode) {
    for (dr, line) in snapshot.iter().enumerate() {
        for (dc, cell) in line.iter().enumerate() {
            if let Some(glyph) = cell.glyph {
                grid.set(dest.col + dc as i32, dest.row + dr as i32, glyph, cell.tag, mode);
            }
        }
    }
}

fn erase(grid: &mut GridBuffer, region: Region) {
    for row in region.first.row..=region.second.row {
        for col in region.first.col..=region.second.col {
            grid.set(col, row, ' ', None, WriteMode::Commit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(sel: &mut SelectionClipboard, grid: &mut GridBuffer, a: Cursor, b: Cursor) {
        sel.pointer_down(a, a);
        sel.pointer_move(b, b, grid);
        sel.pointer_up(b, b, grid);
    }

    #[test]
    fn test_drag_captures_region() {
        let mut grid = GridBuffer::new(10, 10);
        grid.set(2, 2, 'x', Some(CellTag::Text), WriteMode::Commit);
        let mut sel = SelectionClipboard::new();

        sel.pointer_down(Cursor::new(3, 3), Cursor::new(3, 4));
        assert!(matches!(sel.state(), SelectionState::Anchored { .. }));
        sel.pointer_move(Cursor::new(1, 1), Cursor::new(1, 0), &mut grid);
        assert_eq!(
            sel.highlight(),
            Some(Region::from_corners(Cursor::new(1, 1), Cursor::new(3, 3)))
        );
        sel.pointer_up(Cursor::new(1, 1), Cursor::new(1, 0), &mut grid);

        let region = sel.region().unwrap();
        assert_eq!(region.first, Cursor::new(1, 1));
        assert_eq!(region.second, Cursor::new(3, 3));
        let snapshot = sel.snapshot().unwrap();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[1][1], ClipCell { glyph: Some('x'), tag: Some(CellTag::Text) });
        assert_eq!(snapshot[0][0], ClipCell { glyph: None, tag: None });
    }

    #[test]
    fn test_move_keeps_destination_background() {
        let mut grid = GridBuffer::new(12, 12);
        grid.set(2, 2, '*', None, WriteMode::Commit);
        grid.set(6, 6, '#', None, WriteMode::Commit);
        grid.set(7, 7, '#', None, WriteMode::Commit);
        let mut sel = SelectionClipboard::new();
        select(&mut sel, &mut grid, Cursor::new(1, 1), Cursor::new(2, 2));

        // Grab inside the region and drop it five cells further on.
        sel.pointer_down(Cursor::new(1, 0), Cursor::new(1, 1));
        grid.begin_preview();
        sel.pointer_move(Cursor::new(6, 6), Cursor::new(6, 6), &mut grid);
        assert_eq!(sel.highlight(), None);
        assert_eq!(grid.visible_glyph(7, 7), '*');
        assert_eq!(grid.get(7, 7).glyph, '#');
        grid.end_preview();
        sel.pointer_up(Cursor::new(6, 6), Cursor::new(6, 6), &mut grid);

        assert_eq!(grid.get(7, 7).glyph, '*');
        assert_eq!(grid.get(6, 6).glyph, '#');
        assert_eq!(grid.get(2, 2).glyph, ' ');
        assert_eq!(*sel.state(), SelectionState::Idle);
    }

    #[test]
    fn test_click_outside_discards() {
        let mut grid = GridBuffer::new(10, 10);
        let mut sel = SelectionClipboard::new();
        select(&mut sel, &mut grid, Cursor::new(1, 1), Cursor::new(2, 2));

        sel.pointer_down(Cursor::new(8, 7), Cursor::new(8, 8));
        assert_eq!(*sel.state(), SelectionState::Idle);
        assert!(!sel.paste(Cursor::new(0, 0), &mut grid));
    }

    #[test]
    fn test_copy_erase_paste_keep_state() {
        let mut grid = GridBuffer::new(10, 10);
        grid.set(1, 1, 'a', None, WriteMode::Commit);
        let mut sel = SelectionClipboard::new();
        select(&mut sel, &mut grid, Cursor::new(1, 1), Cursor::new(1, 2));

        grid.set(2, 1, 'b', None, WriteMode::Commit);
        assert!(sel.copy(&grid));
        assert!(sel.erase(&mut grid));
        assert_eq!(grid.get(1, 1).glyph, ' ');
        assert_eq!(grid.get(2, 1).glyph, ' ');

        assert!(sel.paste(Cursor::new(4, 4), &mut grid));
        assert_eq!(grid.get(4, 4).glyph, 'a');
        assert_eq!(grid.get(5, 4).glyph, 'b');
        assert!(sel.region().is_some());
    }

    #[test]
    fn test_operations_without_selection_are_noops() {
        let mut grid = GridBuffer::new(4, 4);
        let mut sel = SelectionClipboard::new();
        assert!(!sel.copy(&grid));
        assert!(!sel.erase(&mut grid));
        assert!(!sel.paste(Cursor::new(1, 1), &mut grid));
        sel.pointer_up(Cursor::new(1, 1), Cursor::new(1, 0), &mut grid);
        assert_eq!(*sel.state(), SelectionState::Idle);
        assert_eq!(grid.high_water(), (0, 0));
    }

    #[test]
    fn test_cancel_drag_keeps_captured_region() {
        let mut grid = GridBuffer::new(10, 10);
        let mut sel = SelectionClipboard::new();
        sel.pointer_down(Cursor::new(1, 1), Cursor::new(1, 2));
        sel.cancel_drag();
        assert_eq!(*sel.state(), SelectionState::Idle);

        select(&mut sel, &mut grid, Cursor::new(1, 1), Cursor::new(2, 2));
        sel.pointer_down(Cursor::new(1, 0), Cursor::new(1, 1));
        sel.pointer_move(Cursor::new(5, 5), Cursor::new(5, 5), &mut grid);
        assert_eq!(sel.highlight(), None);
        sel.cancel_drag();
        assert!(sel.highlight().is_some());
    }
}
