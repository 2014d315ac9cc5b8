//! Block Diagram command line front end.
//!
//! Loads, converts and prints diagram files, and replays gesture scripts
//! through a headless [`Canvas`].

mod args;
pub mod script;

pub use args::{Args, Command};

use anyhow::Context;
use blockdiagram_core::canvas::Canvas;
use blockdiagram_core::charset::CharacterSet;
use blockdiagram_core::config::CanvasConfig;
use blockdiagram_core::storage::FileStorage;
use blockdiagram_render::{AnsiRenderer, HighlightStyle, PlainRenderer, RenderContext, Renderer};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Run the command described by `args`.
pub fn run(args: &Args) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;

    match &args.command {
        Command::Show { input, ansi } => {
            let canvas = load_canvas(input, config)?;
            print_canvas(&canvas, *ansi)
        }
        Command::Convert { input, output } => {
            let canvas = load_canvas(input, config)?;
            save_canvas(&canvas, output)
        }
        Command::Replay {
            script: script_path,
            input,
            output,
            ansi,
        } => {
            let text = fs::read_to_string(script_path)
                .with_context(|| format!("Failed to read script {}", script_path.display()))?;
            let steps = script::parse(&text)?;
            let mut canvas = match input {
                Some(path) => load_canvas(path, config)?,
                None => Canvas::new(config),
            };
            script::run(&mut canvas, &steps)?;
            log::info!("Replayed {} steps", steps.len());
            match output {
                Some(path) => save_canvas(&canvas, path),
                None => print_canvas(&canvas, *ansi),
            }
        }
        Command::Styles => {
            let mut out = std::io::stdout().lock();
            for combo in CharacterSet::combinations() {
                let (style, pattern, corner, weight) = combo;
                if let Some(set) = CharacterSet::from_style(style, pattern, corner, weight) {
                    writeln!(out, "{}\n{}\n", script::style_name(combo), set.sample_box())?;
                }
            }
            Ok(())
        }
    }
}

/// Explicit config files must load; the default location may be missing.
fn load_config(path: Option<&Path>) -> anyhow::Result<CanvasConfig> {
    match path {
        Some(path) => CanvasConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(CanvasConfig::load_default().unwrap_or_else(|e| {
            log::warn!("Using default config: {e}");
            CanvasConfig::default()
        })),
    }
}

/// Load a diagram file into a fresh canvas.
pub fn load_canvas(path: &Path, config: CanvasConfig) -> anyhow::Result<Canvas> {
    let (storage, name) = FileStorage::for_path(path)?;
    let mut canvas = Canvas::new(config);
    canvas
        .load(&storage, &name)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    Ok(canvas)
}

/// Save a canvas; the extension picks the format.
pub fn save_canvas(canvas: &Canvas, path: &Path) -> anyhow::Result<()> {
    let (storage, name) = FileStorage::for_path(path)?;
    canvas
        .save(&storage, &name)
        .with_context(|| format!("Failed to save {}", path.display()))
}

fn print_canvas(canvas: &Canvas, ansi: bool) -> anyhow::Result<()> {
    let ctx = RenderContext::new(canvas).trimmed(true).with_cursor(false);
    let mut renderer: Box<dyn Renderer> = if ansi {
        Box::new(AnsiRenderer::new(HighlightStyle::Background))
    } else {
        Box::new(PlainRenderer::new())
    };
    let mut out = std::io::stdout().lock();
    renderer.render(&ctx, &mut out)?;
    Ok(())
}
