//! Line-oriented gesture scripts.
//!
//! One step per line. Lines starting with `#` are comments, as is a `#`
//! word after a step's arguments. `text` and `save` take the rest of the
//! line as is, and `key #` types a `#`:
//!
//! ```text
//! tool box single-continuous-arc-light
//! drag 3 1 12 5
//! tool arrow white
//! down 13 3
//! move 20 3
//! up 30 3
//! tool text-horizontal
//! cursor 5 3
//! text hello
//! key enter
//! save out.json
//! ```

use blockdiagram_core::canvas::Canvas;
use blockdiagram_core::charset::{
    ArrowHeads, CharacterSet, CornerStyle, HeadStyle, LinePattern, LineStyle, LineWeight,
};
use blockdiagram_core::input::{KeyEvent, PointerEvent};
use blockdiagram_core::storage::{FileStorage, StorageError};
use blockdiagram_core::tools::{ToolCommand, ToolKind};
use std::path::PathBuf;
use thiserror::Error;

/// Script errors.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// One script step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Tool(ToolCommand),
    Pointer(PointerEvent),
    /// Down at the first cell, one move, up at the second.
    Drag { from: (i32, i32), to: (i32, i32) },
    Key(KeyEvent),
    /// Typed one key at a time; spaces advance.
    Text(String),
    Cursor { column: i32, row: i32 },
    Cancel,
    Save(PathBuf),
}

/// Name of a catalog style, e.g. `single-continuous-square-light`.
pub fn style_name(combo: (LineStyle, LinePattern, CornerStyle, LineWeight)) -> String {
    let (style, pattern, corner, weight) = combo;
    let pattern = match pattern {
        LinePattern::DoubleDash => "double-dash".to_string(),
        LinePattern::TripleDash => "triple-dash".to_string(),
        LinePattern::QuadrupleDash => "quadruple-dash".to_string(),
        other => format!("{other:?}"),
    };
    format!("{style:?}-{pattern}-{corner:?}-{weight:?}").to_lowercase()
}

/// Look up a character set by its style name.
pub fn char_set_by_name(name: &str) -> Option<CharacterSet> {
    CharacterSet::combinations()
        .into_iter()
        .find(|combo| style_name(*combo) == name)
        .and_then(|(style, pattern, corner, weight)| {
            CharacterSet::from_style(style, pattern, corner, weight)
        })
}

fn parse_heads(name: &str) -> Option<ArrowHeads> {
    match name {
        "black" => Some(ArrowHeads::from_style(HeadStyle::Black)),
        "white" => Some(ArrowHeads::from_style(HeadStyle::White)),
        _ => None,
    }
}

/// Parse a whole script.
pub fn parse(text: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim_start();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let step = parse_step(line).map_err(|message| ScriptError::Parse {
            line: index + 1,
            message,
        })?;
        steps.push(step);
    }
    Ok(steps)
}

fn parse_step(line: &str) -> Result<Step, String> {
    let (word, rest) = line.split_once(' ').unwrap_or((line.trim_end(), ""));
    let args: Vec<&str> = rest
        .split_whitespace()
        .take_while(|arg| !arg.starts_with('#'))
        .collect();

    let step = match word {
        "tool" => {
            let (name, options) = args.split_first().ok_or("tool needs a name")?;
            let mut command = ToolCommand::new(name.parse::<ToolKind>()?);
            for option in options {
                if let Some(heads) = parse_heads(option) {
                    command = command.with_arrow_heads(heads);
                } else if let Some(char_set) = char_set_by_name(option) {
                    command = command.with_char_set(char_set);
                } else {
                    return Err(format!("Unknown style: {option}"));
                }
            }
            Step::Tool(command)
        }
        "down" | "move" | "up" => {
            let [column, row] = numbers::<2>(&args)?;
            Step::Pointer(match word {
                "down" => PointerEvent::down(column, row),
                "move" => PointerEvent::drag(column, row),
                _ => PointerEvent::up(column, row),
            })
        }
        "drag" => {
            let [c1, r1, c2, r2] = numbers::<4>(&args)?;
            Step::Drag {
                from: (c1, r1),
                to: (c2, r2),
            }
        }
        "cursor" => {
            let [column, row] = numbers::<2>(&args)?;
            Step::Cursor { column, row }
        }
        "key" => {
            let mut words = rest.split_whitespace();
            match (words.next(), words.next()) {
                (Some(key), None) => Step::Key(key.parse()?),
                (Some(key), Some(comment)) if comment.starts_with('#') => Step::Key(key.parse()?),
                _ => return Err("key needs one key name".to_string()),
            }
        }
        "text" => Step::Text(rest.to_string()),
        "cancel" => Step::Cancel,
        "save" => match rest.trim() {
            "" => return Err("save needs a path".to_string()),
            path => Step::Save(PathBuf::from(path)),
        },
        other => return Err(format!("Unknown step: {other}")),
    };
    Ok(step)
}

fn numbers<const N: usize>(args: &[&str]) -> Result<[i32; N], String> {
    if args.len() != N {
        return Err(format!("expected {N} numbers, got {}", args.len()));
    }
    let mut out = [0; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg.parse().map_err(|_| format!("Not a number: {arg}"))?;
    }
    Ok(out)
}

/// Apply steps to a canvas in order.
pub fn run(canvas: &mut Canvas, steps: &[Step]) -> Result<(), ScriptError> {
    for step in steps {
        log::debug!("Step {step:?}");
        match step {
            Step::Tool(command) => canvas.activate_tool(*command),
            Step::Pointer(event) => canvas.handle_pointer(*event),
            Step::Drag { from, to } => {
                canvas.handle_pointer(PointerEvent::down(from.0, from.1));
                canvas.handle_pointer(PointerEvent::drag(to.0, to.1));
                canvas.handle_pointer(PointerEvent::up(to.0, to.1));
            }
            Step::Key(key) => {
                canvas.handle_key(*key);
            }
            Step::Text(text) => {
                for c in text.chars() {
                    let key = if c == ' ' { KeyEvent::Space } else { KeyEvent::Char(c) };
                    canvas.handle_key(key);
                }
            }
            Step::Cursor { column, row } => canvas.move_cursor(*column, *row),
            Step::Cancel => canvas.cancel_gesture(),
            Step::Save(path) => {
                let (storage, name) = FileStorage::for_path(path)?;
                canvas.save(&storage, &name)?;
            }
        }
    }
    Ok(())
}
