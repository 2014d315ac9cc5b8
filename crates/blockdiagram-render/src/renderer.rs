//! Renderer trait abstraction.

use blockdiagram_core::canvas::Canvas;
use blockdiagram_core::grid::{Cursor, Region};
use std::io::Write;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Output error: {0}")]
    Output(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// How the selection highlight is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightStyle {
    /// Selection is not drawn.
    None,
    /// Colored background behind selected cells.
    #[default]
    Background,
    /// Selected cells are underlined.
    Underline,
}

impl HighlightStyle {
    /// Cycle to the next highlight style.
    pub fn next(self) -> Self {
        match self {
            HighlightStyle::None => HighlightStyle::Background,
            HighlightStyle::Background => HighlightStyle::Underline,
            HighlightStyle::Underline => HighlightStyle::None,
        }
    }

    /// Get display name for this highlight style.
    pub fn name(self) -> &'static str {
        match self {
            HighlightStyle::None => "None",
            HighlightStyle::Background => "Background",
            HighlightStyle::Underline => "Underline",
        }
    }

    /// SGR parameters for the style.
    pub(crate) fn sgr(self) -> Option<&'static str> {
        match self {
            HighlightStyle::None => None,
            HighlightStyle::Background => Some("44"),
            HighlightStyle::Underline => Some("4"),
        }
    }
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Visible area as (rows, cols). `None` shows the whole grid.
    pub viewport: Option<(usize, usize)>,
    /// Whether the cursor cell is marked.
    pub show_cursor: bool,
    /// Selection highlight style.
    pub highlight_style: HighlightStyle,
    /// Strip trailing blanks from lines and blank lines from the bottom.
    pub trim: bool,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context. The cursor follows the canvas blink state.
    pub fn new(canvas: &'a Canvas) -> Self {
        Self {
            canvas,
            viewport: None,
            show_cursor: canvas.cursor_visible(),
            highlight_style: HighlightStyle::default(),
            trim: false,
        }
    }

    /// Limit the frame to a viewport.
    pub fn with_viewport(mut self, rows: usize, cols: usize) -> Self {
        self.viewport = Some((rows, cols));
        self
    }

    /// Override cursor visibility.
    pub fn with_cursor(mut self, show: bool) -> Self {
        self.show_cursor = show;
        self
    }

    /// Set the highlight style.
    pub fn with_highlight(mut self, style: HighlightStyle) -> Self {
        self.highlight_style = style;
        self
    }

    /// Trim trailing blanks.
    pub fn trimmed(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}

/// The visible text of the canvas plus the overlays to draw on it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    pub lines: Vec<String>,
    pub cursor: Option<Cursor>,
    pub selection: Option<Region>,
}

impl Frame {
    /// Build a frame from the visible layer of the canvas.
    pub fn from_context(ctx: &RenderContext) -> Self {
        let canvas = ctx.canvas;
        let mut lines = canvas.grid().visible_lines();

        if let Some((rows, cols)) = ctx.viewport {
            lines.truncate(rows);
            for line in &mut lines {
                *line = line.chars().take(cols).collect();
            }
        }
        if ctx.trim {
            for line in &mut lines {
                line.truncate(line.trim_end().len());
            }
            while lines.last().is_some_and(String::is_empty) {
                lines.pop();
            }
        }

        let in_view = |cursor: &Cursor| match ctx.viewport {
            Some((rows, cols)) => (cursor.row as usize) < rows && (cursor.col as usize) < cols,
            None => true,
        };
        Self {
            cursor: Some(canvas.cursor()).filter(|c| ctx.show_cursor && in_view(c)),
            selection: canvas
                .highlight()
                .filter(|_| ctx.highlight_style != HighlightStyle::None),
            lines,
        }
    }

    /// Width needed to show row `row` with its overlays.
    pub(crate) fn row_width(&self, row: usize) -> usize {
        let mut width = self.lines.get(row).map_or(0, |line| line.chars().count());
        if let Some(cursor) = self.cursor.filter(|c| c.row as usize == row) {
            width = width.max(cursor.col as usize + 1);
        }
        if let Some(region) = self.selection {
            if (region.first.row..=region.second.row).contains(&(row as i32)) {
                width = width.max(region.second.col.max(0) as usize + 1);
            }
        }
        width
    }
}

/// Trait for rendering backends.
///
/// Implementations turn a [`Frame`] into output for a particular device.
pub trait Renderer: Send + Sync {
    /// Build the frame for the current canvas state.
    fn build_frame(&mut self, ctx: &RenderContext) -> Frame {
        Frame::from_context(ctx)
    }

    /// Write a frame to `out`.
    fn write_frame(&self, frame: &Frame, out: &mut dyn Write) -> RenderResult<()>;

    /// Build and write a frame in one step.
    fn render(&mut self, ctx: &RenderContext, out: &mut dyn Write) -> RenderResult<()> {
        let frame = self.build_frame(ctx);
        self.write_frame(&frame, out)
    }
}
