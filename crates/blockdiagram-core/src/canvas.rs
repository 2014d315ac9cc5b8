//! Canvas document and input session.

use crate::config::CanvasConfig;
use crate::grid::{CellTag, Cursor, GridBuffer, Region, WriteMode};
use crate::input::{KeyEvent, MouseButton, PointerEvent};
use crate::selection::SelectionClipboard;
use crate::shapes::{Painter, Rasterize, Shape, infer_approach_mode};
use crate::storage::{Storage, StorageResult};
use crate::tools::{ToolCommand, ToolKind, ToolManager};
use std::time::Duration;
use uuid::Uuid;

/// A diagram: the committed grid plus the shapes drawn on it.
#[derive(Debug, Clone)]
pub struct CanvasDocument {
    /// Unique document identifier.
    pub id: String,
    /// Document name, usually the file it was loaded from.
    pub name: String,
    /// Committed cells and metadata.
    pub grid: GridBuffer,
    /// Committed shapes in drawing order.
    pub shapes: Vec<Shape>,
}

impl CanvasDocument {
    /// Create an empty document with a `rows` x `cols` grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            grid: GridBuffer::new(rows, cols),
            shapes: Vec::new(),
        }
    }

    /// Create an empty document sized from `config`.
    pub fn with_config(config: &CanvasConfig) -> Self {
        Self::new(config.initial_rows, config.initial_cols)
    }

    /// Append a committed shape.
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Rasterize every shape, in order, onto a fresh grid of the same size.
    pub fn replay(&self, junction: char) -> GridBuffer {
        let mut grid = GridBuffer::new(self.grid.rows(), self.grid.cols());
        for shape in &self.shapes {
            shape.rasterize(&mut Painter::new(&mut grid, WriteMode::Commit).with_junction(junction));
        }
        grid
    }
}

/// Runtime canvas state: the document plus everything an editing session
/// needs on top of it.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// The document being edited.
    pub document: CanvasDocument,
    pub config: CanvasConfig,
    pub tool_manager: ToolManager,
    pub selection: SelectionClipboard,
    cursor: Cursor,
    cursor_visible: bool,
    focused: bool,
    /// Column the pointer last put the cursor on; horizontal text returns
    /// here on enter.
    text_origin_col: i32,
}

impl Canvas {
    /// Create a canvas with an empty document.
    pub fn new(config: CanvasConfig) -> Self {
        Self::with_document(CanvasDocument::with_config(&config), config)
    }

    /// Create a canvas with an existing document.
    pub fn with_document(document: CanvasDocument, config: CanvasConfig) -> Self {
        Self {
            document,
            tool_manager: ToolManager::new(config.char_set, config.arrow_heads),
            config,
            selection: SelectionClipboard::new(),
            cursor: Cursor::default(),
            cursor_visible: true,
            focused: false,
            text_origin_col: 0,
        }
    }

    pub fn grid(&self) -> &GridBuffer {
        &self.document.grid
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn current_tool(&self) -> Option<ToolKind> {
        self.tool_manager.current_tool
    }

    /// Region to highlight, shown only while the select tool is active.
    pub fn highlight(&self) -> Option<Region> {
        match self.current_tool() {
            Some(ToolKind::Select) => self.selection.highlight(),
            _ => None,
        }
    }

    /// Activate a tool, dropping any gesture in progress.
    pub fn activate_tool(&mut self, command: ToolCommand) {
        self.cancel_gesture();
        self.tool_manager
            .activate(command, (self.config.char_set, self.config.arrow_heads));
    }

    /// Move the cursor, clamped to the grid.
    pub fn move_cursor(&mut self, col: i32, row: i32) {
        self.cursor = self.document.grid.clamp(col, row);
    }

    /// Period of the cursor blink timer.
    pub fn blink_interval(&self) -> Duration {
        Duration::from_millis(self.config.cursor_blink_ms)
    }

    /// Blink timer tick. Only blinks while focused.
    pub fn tick_cursor(&mut self) {
        if self.focused {
            self.cursor_visible = !self.cursor_visible;
        }
    }

    pub fn focus(&mut self) {
        self.focused = true;
        self.cursor_visible = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
        self.cursor_visible = false;
    }

    /// Grow the grid to cover a viewport of `rows` x `cols`, less a
    /// two-cell margin.
    pub fn fit_viewport(&mut self, rows: usize, cols: usize) {
        let grid = &mut self.document.grid;
        if cols > grid.col_max() || rows > grid.row_max() {
            grid.expand(rows.saturating_sub(2), cols.saturating_sub(2));
        }
    }

    /// Drop the gesture in progress without committing anything.
    pub fn cancel_gesture(&mut self) {
        if self.tool_manager.is_active() {
            log::debug!("Gesture cancelled");
        }
        self.tool_manager.cancel();
        self.selection.cancel_drag();
        self.document.grid.end_preview();
    }

    /// Dispatch a pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if event.button() != MouseButton::Left {
            log::trace!("Ignoring {:?} button", event.button());
            return;
        }
        let Cursor { row, col } = event.position();
        match event {
            PointerEvent::Down { .. } => self.pointer_down(col, row),
            PointerEvent::Move { .. } => self.pointer_move(col, row),
            PointerEvent::Up { .. } => self.pointer_up(col, row),
        }
    }

    fn painter(&mut self, mode: WriteMode) -> Painter<'_> {
        Painter::new(&mut self.document.grid, mode).with_junction(self.config.junction_glyph)
    }

    fn erase_at(&mut self, col: i32, row: i32) {
        self.document.grid.set(col, row, ' ', None, WriteMode::Commit);
    }

    fn pointer_down(&mut self, col: i32, row: i32) {
        let anchor = Cursor::new(row, col - 1);
        self.focus();
        self.tool_manager.begin(anchor);
        self.move_cursor(col, row);
        self.text_origin_col = self.cursor.col;

        match self.current_tool() {
            Some(ToolKind::Eraser) => self.erase_at(col, row),
            Some(ToolKind::Select) => self.selection.pointer_down(anchor, Cursor::new(row, col)),
            _ => {}
        }
        self.document.grid.begin_preview();
    }

    fn pointer_move(&mut self, col: i32, row: i32) {
        let Some(anchor) = self.tool_manager.anchor() else {
            log::trace!("Move without a gesture");
            return;
        };
        let pointer = Cursor::new(row, col);
        let approach = infer_approach_mode(anchor, pointer, &self.document.grid);
        self.tool_manager.set_approach(approach);
        self.cursor_visible = true;
        self.move_cursor(col, row);

        let Some(tool) = self.current_tool() else {
            return;
        };
        if tool == ToolKind::Eraser {
            self.erase_at(col, row);
        }
        self.document.grid.reset_preview();

        if let Some(shape) = self
            .tool_manager
            .create_shape(anchor, tool.endpoint(pointer, self.cursor))
        {
            shape.rasterize(&mut self.painter(WriteMode::Preview));
        }
        if tool == ToolKind::Select {
            let cursor = self.cursor;
            self.selection
                .pointer_move(cursor, Cursor::new(row, col - 1), &mut self.document.grid);
        }
    }

    fn pointer_up(&mut self, col: i32, row: i32) {
        self.cursor_visible = true;
        self.document.grid.end_preview();
        let Some(anchor) = self.tool_manager.anchor() else {
            return;
        };
        if anchor == Cursor::new(row, col - 1) {
            log::trace!("Click at {anchor:?}");
            self.tool_manager.cancel();
            self.selection.cancel_drag();
            return;
        }
        self.move_cursor(col, row);
        let pointer = Cursor::new(row, col);

        if let Some(tool) = self.current_tool() {
            if let Some(shape) = self
                .tool_manager
                .create_shape(anchor, tool.endpoint(pointer, self.cursor))
            {
                shape.rasterize(&mut self.painter(WriteMode::Commit));
                let (start, end) = shape.endpoints();
                log::debug!("Committed {} from {start:?} to {end:?}", shape.kind());
                self.document.add_shape(shape);
            }
            if tool == ToolKind::Select {
                let cursor = self.cursor;
                self.selection
                    .pointer_up(cursor, Cursor::new(row, col - 1), &mut self.document.grid);
            }
        }
        self.tool_manager.end();
    }

    /// Handle a key press. Returns whether the active tool consumed it.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.current_tool() {
            Some(ToolKind::TextHorizontal) => self.text_key(key, false),
            Some(ToolKind::TextVertical) => self.text_key(key, true),
            Some(ToolKind::Select) => self.selection_key(key),
            _ => {
                log::warn!("Ignoring key {} with no text or select tool", key.name());
                false
            }
        }
    }

    fn text_key(&mut self, key: KeyEvent, vertical: bool) -> bool {
        let Cursor { row, col } = self.cursor;
        let (step_col, step_row) = if vertical { (0, 1) } else { (1, 0) };
        match key {
            KeyEvent::Enter if vertical => self.move_cursor(col, row + 1),
            KeyEvent::Enter => self.move_cursor(self.text_origin_col, row + 1),
            KeyEvent::Space => self.move_cursor(col + step_col, row + step_row),
            KeyEvent::Backspace => {
                self.move_cursor(col - step_col, row - step_row);
                let Cursor { row, col } = self.cursor;
                self.erase_at(col, row);
            }
            KeyEvent::Char(c) => {
                self.document
                    .grid
                    .set(col, row, c, Some(CellTag::Text), WriteMode::Commit);
                self.move_cursor(col + step_col, row + step_row);
            }
            KeyEvent::Delete | KeyEvent::Ctrl(_) => {
                log::warn!("Ignoring key {} in text mode", key.name());
                return false;
            }
        }
        true
    }

    fn selection_key(&mut self, key: KeyEvent) -> bool {
        let grid = &mut self.document.grid;
        let done = match key {
            KeyEvent::Ctrl('c') => self.selection.copy(grid),
            KeyEvent::Delete | KeyEvent::Backspace => self.selection.erase(grid),
            KeyEvent::Ctrl('v') | KeyEvent::Ctrl('u') => self.selection.paste(self.cursor, grid),
            _ => {
                log::warn!("Ignoring key {} in select mode", key.name());
                return false;
            }
        };
        if !done {
            log::debug!("No selection for {}", key.name());
        }
        true
    }

    /// Save the document under `name`.
    pub fn save(&self, storage: &dyn Storage, name: &str) -> StorageResult<()> {
        storage.save(name, &self.document)
    }

    /// Load `name`, replacing the document only if loading succeeds.
    pub fn load(&mut self, storage: &dyn Storage, name: &str) -> StorageResult<()> {
        let document = storage.load(name, &self.config)?;
        self.cancel_gesture();
        self.selection.clear();
        self.document = document;
        self.move_cursor(self.cursor.col, self.cursor.row);
        Ok(())
    }
}
