//! Text renderers: plain lines and ANSI terminal output.

use crate::renderer::{Frame, RenderResult, Renderer, RendererError};
#[cfg(feature = "ansi-renderer")]
use crate::renderer::HighlightStyle;
use std::io::Write;

fn output_error(e: std::io::Error) -> RendererError {
    RendererError::Output(e.to_string())
}

/// Writes the frame text as is. Overlays are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl PlainRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for PlainRenderer {
    fn write_frame(&self, frame: &Frame, out: &mut dyn Write) -> RenderResult<()> {
        for line in &frame.lines {
            writeln!(out, "{line}").map_err(output_error)?;
        }
        Ok(())
    }
}

/// Renders for an ANSI terminal: the cursor in reverse video and the
/// selection in the configured highlight.
#[cfg(feature = "ansi-renderer")]
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiRenderer {
    highlight: HighlightStyle,
    /// Clear the screen and home the terminal cursor before each frame.
    clear_screen: bool,
}

#[cfg(feature = "ansi-renderer")]
impl AnsiRenderer {
    pub fn new(highlight: HighlightStyle) -> Self {
        Self {
            highlight,
            clear_screen: false,
        }
    }

    pub fn with_clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }

    fn cell_style(&self, frame: &Frame, row: usize, col: usize) -> Option<&'static str> {
        let here = blockdiagram_core::grid::Cursor::new(row as i32, col as i32);
        if frame.cursor == Some(here) {
            return Some("7");
        }
        frame
            .selection
            .filter(|region| region.contains(here))
            .and_then(|_| self.highlight.sgr())
    }
}

#[cfg(feature = "ansi-renderer")]
impl Renderer for AnsiRenderer {
    fn write_frame(&self, frame: &Frame, out: &mut dyn Write) -> RenderResult<()> {
        let mut text = String::new();
        if self.clear_screen {
            text.push_str("\x1b[2J\x1b[H");
        }
        for (row, line) in frame.lines.iter().enumerate() {
            let glyphs: Vec<char> = line.chars().collect();
            let mut current = None;
            for col in 0..frame.row_width(row) {
                let style = self.cell_style(frame, row, col);
                if style != current {
                    if current.is_some() {
                        text.push_str("\x1b[0m");
                    }
                    if let Some(sgr) = style {
                        text.push_str(&format!("\x1b[{sgr}m"));
                    }
                    current = style;
                }
                text.push(glyphs.get(col).copied().unwrap_or(' '));
            }
            if current.is_some() {
                text.push_str("\x1b[0m");
            }
            text.push('\n');
        }
        log::trace!("Writing {} rows", frame.lines.len());
        out.write_all(text.as_bytes()).map_err(output_error)
    }
}
