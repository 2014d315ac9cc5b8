//! Block Diagram Render Library
//!
//! Renderer abstraction and text renderers for the block diagram canvas.
//! The default build includes an ANSI terminal renderer.

mod renderer;
mod text_impl;

pub use renderer::{Frame, HighlightStyle, RenderContext, RenderResult, Renderer, RendererError};
pub use text_impl::PlainRenderer;

#[cfg(feature = "ansi-renderer")]
pub use text_impl::AnsiRenderer;
