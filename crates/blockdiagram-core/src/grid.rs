//! Character grid with per-cell metadata and a preview scratch layer.

use serde::{Deserialize, Serialize};

/// Extra rows/columns added beyond the requested cell when the grid grows.
const GROWTH_HEADROOM: usize = 2;

/// Classification of how a committed cell was drawn.
///
/// The serialized names are the short tags stored in structured diagram files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellTag {
    /// Horizontal box border.
    #[serde(rename = "bh")]
    BoxHorizontal,
    /// Vertical box border.
    #[serde(rename = "bv")]
    BoxVertical,
    /// Horizontal arrow or line run.
    #[serde(rename = "ah")]
    ArrowHorizontal,
    /// Vertical arrow or line run.
    #[serde(rename = "av")]
    ArrowVertical,
    /// Diagonal run.
    #[serde(rename = "diag")]
    Diagonal,
    #[serde(rename = ">")]
    HeadRight,
    #[serde(rename = "<")]
    HeadLeft,
    #[serde(rename = "^")]
    HeadUp,
    #[serde(rename = "v")]
    HeadDown,
    /// Typed text.
    #[serde(rename = "t")]
    Text,
}

impl CellTag {
    /// The short tag string used on disk.
    pub fn as_str(self) -> &'static str {
        match self {
            CellTag::BoxHorizontal => "bh",
            CellTag::BoxVertical => "bv",
            CellTag::ArrowHorizontal => "ah",
            CellTag::ArrowVertical => "av",
            CellTag::Diagonal => "diag",
            CellTag::HeadRight => ">",
            CellTag::HeadLeft => "<",
            CellTag::HeadUp => "^",
            CellTag::HeadDown => "v",
            CellTag::Text => "t",
        }
    }

    /// Whether this tag marks an arrowhead.
    pub fn is_head(self) -> bool {
        matches!(
            self,
            CellTag::HeadRight | CellTag::HeadLeft | CellTag::HeadUp | CellTag::HeadDown
        )
    }
}

/// One grid cell: a glyph plus optional metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub tag: Option<CellTag>,
}

impl Cell {
    /// The blank cell returned for every out-of-range read.
    pub const EMPTY: Cell = Cell { glyph: ' ', tag: None };
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// A (row, col) grid position.
///
/// Signed so that geometry may step outside the grid; such cells are
/// dropped on write and read back as [`Cell::EMPTY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cursor {
    pub row: i32,
    pub col: i32,
}

impl Cursor {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// A normalized rectangle of cells, `first` top-left and `second`
/// bottom-right, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub first: Cursor,
    pub second: Cursor,
}

impl Region {
    /// Build a region from two arbitrary corners, normalizing element-wise.
    pub fn from_corners(a: Cursor, b: Cursor) -> Self {
        Self {
            first: Cursor::new(a.row.min(b.row), a.col.min(b.col)),
            second: Cursor::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    pub fn contains(&self, point: Cursor) -> bool {
        point.row >= self.first.row
            && point.row <= self.second.row
            && point.col >= self.first.col
            && point.col <= self.second.col
    }

    pub fn width(&self) -> i32 {
        self.second.col - self.first.col + 1
    }

    pub fn height(&self) -> i32 {
        self.second.row - self.first.row + 1
    }
}

/// Where a write lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Scratch layer only; metadata and high-water marks are untouched.
    Preview,
    /// Committed grid, metadata and high-water marks.
    Commit,
}

/// The committed character grid, its metadata and the preview scratch layer.
///
/// Rows always share one length. The grid only grows.
#[derive(Debug, Clone)]
pub struct GridBuffer {
    chars: Vec<Vec<char>>,
    tags: Vec<Vec<Option<CellTag>>>,
    /// Deep copy of `chars` taken at gesture start, present while previewing.
    scratch: Option<Vec<Vec<char>>>,
    col_max: usize,
    row_max: usize,
    drawing_col_max: usize,
    drawing_row_max: usize,
}

impl GridBuffer {
    /// Create a blank grid of `rows` x `cols` cells (at least 1 x 1).
    pub fn new(rows: usize, cols: usize) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            chars: vec![vec![' '; cols]; rows],
            tags: vec![vec![None; cols]; rows],
            scratch: None,
            col_max: cols,
            row_max: rows,
            drawing_col_max: 0,
            drawing_row_max: 0,
        }
    }

    /// Number of rows currently allocated.
    pub fn rows(&self) -> usize {
        self.chars.len()
    }

    /// Number of columns currently allocated.
    pub fn cols(&self) -> usize {
        self.chars.first().map_or(0, Vec::len)
    }

    /// Largest column requested by any growth so far.
    pub fn col_max(&self) -> usize {
        self.col_max
    }

    /// Largest row requested by any growth so far.
    pub fn row_max(&self) -> usize {
        self.row_max
    }

    /// Furthest (col, row) reached by a committed write.
    pub fn high_water(&self) -> (usize, usize) {
        (self.drawing_col_max, self.drawing_row_max)
    }

    fn index(&self, col: i32, row: i32) -> Option<(usize, usize)> {
        let (col, row) = (usize::try_from(col).ok()?, usize::try_from(row).ok()?);
        (row < self.rows() && col < self.cols()).then_some((col, row))
    }

    pub fn in_bounds(&self, col: i32, row: i32) -> bool {
        self.index(col, row).is_some()
    }

    /// Read a committed cell. Out-of-range reads return [`Cell::EMPTY`].
    pub fn get(&self, col: i32, row: i32) -> Cell {
        match self.index(col, row) {
            Some((c, r)) => Cell {
                glyph: self.chars[r][c],
                tag: self.tags[r][c],
            },
            None => Cell::EMPTY,
        }
    }

    /// Committed metadata of a cell, `None` when untagged or out of range.
    pub fn tag(&self, col: i32, row: i32) -> Option<CellTag> {
        self.get(col, row).tag
    }

    /// The glyph currently on display: the scratch layer while previewing.
    pub fn visible_glyph(&self, col: i32, row: i32) -> char {
        match (self.index(col, row), &self.scratch) {
            (Some((c, r)), Some(scratch)) => scratch[r][c],
            (Some((c, r)), None) => self.chars[r][c],
            (None, _) => ' ',
        }
    }

    /// Write one cell, growing the grid first when needed.
    ///
    /// Cells at negative coordinates cannot exist and are dropped.
    pub fn set(&mut self, col: i32, row: i32, glyph: char, tag: Option<CellTag>, mode: WriteMode) {
        let (Ok(c), Ok(r)) = (usize::try_from(col), usize::try_from(row)) else {
            log::trace!("Dropping write of {glyph:?} at ({col}, {row})");
            return;
        };
        self.expand(r, c);

        match mode {
            WriteMode::Preview => {
                let scratch = self.scratch.get_or_insert_with(|| self.chars.clone());
                scratch[r][c] = glyph;
            }
            WriteMode::Commit => {
                self.chars[r][c] = glyph;
                self.tags[r][c] = tag;
                self.drawing_col_max = self.drawing_col_max.max(c);
                self.drawing_row_max = self.drawing_row_max.max(r);
            }
        }
    }

    /// Grow so that (`row`, `col`) is addressable, with headroom beyond it.
    pub fn expand(&mut self, row: usize, col: usize) {
        let rows = self.rows();
        if row >= rows {
            let add = row - rows + GROWTH_HEADROOM;
            let width = self.cols();
            log::debug!("Growing grid by {add} rows");
            self.chars.extend((0..add).map(|_| vec![' '; width]));
            self.tags.extend((0..add).map(|_| vec![None; width]));
            if let Some(scratch) = &mut self.scratch {
                scratch.extend((0..add).map(|_| vec![' '; width]));
            }
        }

        let cols = self.cols();
        if col >= cols {
            let width = col + GROWTH_HEADROOM;
            log::debug!("Growing grid to {width} columns");
            for line in &mut self.chars {
                line.resize(width, ' ');
            }
            for line in &mut self.tags {
                line.resize(width, None);
            }
            if let Some(scratch) = &mut self.scratch {
                for line in scratch {
                    line.resize(width, ' ');
                }
            }
        }

        self.col_max = self.col_max.max(col);
        self.row_max = self.row_max.max(row);
    }

    /// Start a preview: snapshot the committed glyphs into the scratch layer.
    pub fn begin_preview(&mut self) {
        self.scratch = Some(self.chars.clone());
    }

    /// Throw away preview writes made since the last snapshot, keeping the
    /// preview open.
    pub fn reset_preview(&mut self) {
        if self.scratch.is_some() {
            log::trace!("Resetting preview layer");
            self.scratch = Some(self.chars.clone());
        }
    }

    /// Discard the scratch layer.
    pub fn end_preview(&mut self) {
        self.scratch = None;
    }

    pub fn is_previewing(&self) -> bool {
        self.scratch.is_some()
    }

    /// Every visible row as a string, full width.
    pub fn visible_lines(&self) -> Vec<String> {
        self.scratch
            .as_ref()
            .unwrap_or(&self.chars)
            .iter()
            .map(|line| line.iter().collect())
            .collect()
    }

    /// Committed rows cut to the high-water marks.
    pub fn trimmed_lines(&self) -> Vec<String> {
        let (col_max, row_max) = self.high_water();
        self.chars
            .iter()
            .take(row_max + 1)
            .map(|line| line.iter().take(col_max + 1).collect())
            .collect()
    }

    /// Committed metadata cut to the high-water marks.
    pub fn trimmed_tags(&self) -> Vec<Vec<Option<CellTag>>> {
        let (col_max, row_max) = self.high_water();
        self.tags
            .iter()
            .take(row_max + 1)
            .map(|line| line.iter().take(col_max + 1).copied().collect())
            .collect()
    }

    /// Clamp a position to the allocated grid.
    pub fn clamp(&self, col: i32, row: i32) -> Cursor {
        let max_row = self.rows().saturating_sub(1) as i32;
        let max_col = self.cols().saturating_sub(1) as i32;
        Cursor::new(row.clamp(0, max_row), col.clamp(0, max_col))
    }

    /// Every row has the same length in all layers.
    pub fn is_rectangular(&self) -> bool {
        let width = self.cols();
        let layer_ok = |rows: &Vec<Vec<char>>| {
            rows.len() == self.rows() && rows.iter().all(|line| line.len() == width)
        };
        layer_ok(&self.chars)
            && self.tags.len() == self.rows()
            && self.tags.iter().all(|line| line.len() == width)
            && self.scratch.as_ref().is_none_or(layer_ok)
    }
}
