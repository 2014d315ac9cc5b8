//! Diagram persistence: on-disk formats and storage backends.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::canvas::CanvasDocument;
use crate::config::CanvasConfig;
use crate::grid::{CellTag, WriteMode};
use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Malformed diagram: {0}")]
    Malformed(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Marker that starts a header comment line in structured files.
const COMMENT_PREFIX: &str = "//";

/// On-disk diagram format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramFormat {
    /// Drawing lines only, no metadata.
    Plain,
    /// JSON object with `drawing` and `metadata`, behind a comment preview.
    Structured,
}

impl DiagramFormat {
    /// `.json` selects the structured format, anything else plain text.
    pub fn from_name(name: impl AsRef<Path>) -> Self {
        match name.as_ref().extension() {
            Some(ext) if ext == "json" => DiagramFormat::Structured,
            _ => DiagramFormat::Plain,
        }
    }
}

/// Structured file body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DiagramFile {
    drawing: Vec<String>,
    metadata: Vec<Vec<Option<CellTag>>>,
}

/// Trait for diagram storage backends.
///
/// Names are file names; their extension picks the [`DiagramFormat`].
pub trait Storage: Send + Sync {
    /// Save a document.
    fn save(&self, name: &str, document: &CanvasDocument) -> StorageResult<()>;

    /// Load a document into a fresh grid sized from `config`.
    fn load(&self, name: &str, config: &CanvasConfig) -> StorageResult<CanvasDocument>;

    /// Delete a document. Missing documents are not an error.
    fn delete(&self, name: &str) -> StorageResult<()>;

    /// List stored document names.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a document exists.
    fn exists(&self, name: &str) -> StorageResult<bool>;
}

/// Encode a document in the given format.
pub fn encode(document: &CanvasDocument, format: DiagramFormat) -> StorageResult<String> {
    let drawing = document.grid.trimmed_lines();
    match format {
        DiagramFormat::Plain => Ok(drawing.join("\n")),
        DiagramFormat::Structured => {
            let file = DiagramFile {
                metadata: document.grid.trimmed_tags(),
                drawing,
            };
            let mut out = String::new();
            for line in &file.drawing {
                out.push_str(COMMENT_PREFIX);
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
            out.push_str(&to_compact_json(&file)?);
            Ok(out)
        }
    }
}

/// Decode a document. Nothing is returned unless the whole input is valid.
pub fn decode(
    text: &str,
    format: DiagramFormat,
    config: &CanvasConfig,
) -> StorageResult<CanvasDocument> {
    let mut document = CanvasDocument::with_config(config);
    match format {
        DiagramFormat::Plain => {
            for (row, line) in text.lines().enumerate() {
                for (col, glyph) in line.trim_end().chars().enumerate() {
                    document
                        .grid
                        .set(col as i32, row as i32, glyph, None, WriteMode::Commit);
                }
            }
        }
        DiagramFormat::Structured => {
            let body = strip_header(text);
            let file: DiagramFile = serde_json::from_str(&body)
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
            validate(&file)?;
            for (row, (line, tags)) in file.drawing.iter().zip(&file.metadata).enumerate() {
                for (col, (glyph, tag)) in line.chars().zip(tags).enumerate() {
                    document
                        .grid
                        .set(col as i32, row as i32, glyph, *tag, WriteMode::Commit);
                }
            }
        }
    }
    Ok(document)
}

/// Drop the leading `//` preview block, up to and including the first blank
/// line.
fn strip_header(text: &str) -> String {
    let mut in_header = true;
    let mut body = Vec::new();
    for line in text.lines() {
        if in_header {
            let trimmed = line.trim();
            if trimmed.starts_with(COMMENT_PREFIX) {
                continue;
            }
            in_header = false;
            if trimmed.is_empty() {
                continue;
            }
        }
        body.push(line);
    }
    body.join("\n")
}

fn validate(file: &DiagramFile) -> StorageResult<()> {
    if file.drawing.len() != file.metadata.len() {
        return Err(StorageError::Malformed(format!(
            "{} drawing rows but {} metadata rows",
            file.drawing.len(),
            file.metadata.len()
        )));
    }
    for (row, (line, tags)) in file.drawing.iter().zip(&file.metadata).enumerate() {
        let width = line.chars().count();
        if width != tags.len() {
            return Err(StorageError::Malformed(format!(
                "row {row}: {width} cells but {} tags",
                tags.len()
            )));
        }
    }
    Ok(())
}

/// Pretty layout for the top two levels; deeper arrays stay on one line.
#[derive(Debug, Default)]
struct RowsFormatter {
    depth: usize,
    has_value: bool,
}

impl RowsFormatter {
    const INLINE_DEPTH: usize = 3;

    fn indent<W: ?Sized + io::Write>(writer: &mut W, level: usize) -> io::Result<()> {
        for _ in 0..level {
            writer.write_all(b"    ")?;
        }
        Ok(())
    }

    fn open<W: ?Sized + io::Write>(&mut self, writer: &mut W, bracket: &[u8]) -> io::Result<()> {
        self.depth += 1;
        self.has_value = false;
        writer.write_all(bracket)
    }

    fn close<W: ?Sized + io::Write>(&mut self, writer: &mut W, bracket: &[u8]) -> io::Result<()> {
        if self.depth < Self::INLINE_DEPTH && self.has_value {
            writer.write_all(b"\n")?;
            Self::indent(writer, self.depth - 1)?;
        }
        self.depth -= 1;
        writer.write_all(bracket)
    }

    fn item<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if self.depth >= Self::INLINE_DEPTH {
            return if first { Ok(()) } else { writer.write_all(b", ") };
        }
        let separator: &[u8] = if first { b"\n" } else { b",\n" };
        writer.write_all(separator)?;
        Self::indent(writer, self.depth)
    }
}

impl Formatter for RowsFormatter {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.open(writer, b"[")
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.close(writer, b"]")
    }

    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.item(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.open(writer, b"{")
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.close(writer, b"}")
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.item(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }
}

/// Indented JSON with every drawing line and metadata row kept on one line.
fn to_compact_json(file: &DiagramFile) -> StorageResult<String> {
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, RowsFormatter::default());
    file.serialize(&mut serializer)
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    String::from_utf8(out).map_err(|e| StorageError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::CharacterSet;
    use crate::grid::Cursor;
    use crate::shapes::{Painter, Rasterize, Rectangle};

    fn boxed_document() -> CanvasDocument {
        let mut document = CanvasDocument::with_config(&CanvasConfig::default());
        let shape = Rectangle::new(Cursor::new(0, 1), Cursor::new(2, 4), CharacterSet::default());
        shape.rasterize(&mut Painter::new(&mut document.grid, WriteMode::Commit));
        document
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DiagramFormat::from_name("a.json"), DiagramFormat::Structured);
        assert_eq!(DiagramFormat::from_name("dir/a.txt"), DiagramFormat::Plain);
        assert_eq!(DiagramFormat::from_name("noext"), DiagramFormat::Plain);
    }

    #[test]
    fn test_structured_layout() {
        let text = encode(&boxed_document(), DiagramFormat::Structured).unwrap();
        let expected = concat!(
            "// ┌──┐\n",
            "// │  │\n",
            "// └──┘\n",
            "\n",
            "{\n",
            "    \"drawing\": [\n",
            "        \" ┌──┐\",\n",
            "        \" │  │\",\n",
            "        \" └──┘\"\n",
            "    ],\n",
            "    \"metadata\": [\n",
            "        [null, null, \"bh\", \"bh\", null],\n",
            "        [null, \"bv\", null, null, \"bv\"],\n",
            "        [null, null, \"bh\", \"bh\", null]\n",
            "    ]\n",
            "}"
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_compact_json_empty_blocks() {
        let file = DiagramFile {
            drawing: Vec::new(),
            metadata: vec![Vec::new()],
        };
        assert_eq!(
            to_compact_json(&file).unwrap(),
            "{\n    \"drawing\": [],\n    \"metadata\": [\n        []\n    ]\n}"
        );
    }

    #[test]
    fn test_structured_round_trip_is_stable() {
        let config = CanvasConfig::default();
        let first = encode(&boxed_document(), DiagramFormat::Structured).unwrap();
        let loaded = decode(&first, DiagramFormat::Structured, &config).unwrap();
        let second = encode(&loaded, DiagramFormat::Structured).unwrap();

        assert_eq!(first, second);
        assert_eq!(loaded.grid.tag(2, 0), Some(CellTag::BoxHorizontal));
        assert!(loaded.shapes.is_empty());
    }

    #[test]
    fn test_plain_round_trip_drops_tags() {
        let config = CanvasConfig::default();
        let text = encode(&boxed_document(), DiagramFormat::Plain).unwrap();
        assert_eq!(text, " ┌──┐\n │  │\n └──┘");

        let loaded = decode(&text, DiagramFormat::Plain, &config).unwrap();
        assert_eq!(loaded.grid.get(2, 0).glyph, '─');
        assert_eq!(loaded.grid.tag(2, 0), None);
    }

    #[test]
    fn test_plain_load_strips_trailing_whitespace() {
        let config = CanvasConfig::default();
        let loaded = decode("ab   \n  c\r\n", DiagramFormat::Plain, &config).unwrap();
        assert_eq!(loaded.grid.high_water(), (2, 1));
        assert_eq!(loaded.grid.trimmed_lines(), vec!["ab ", "  c"]);
    }

    #[test]
    fn test_unknown_tag_fails() {
        let text = "{\"drawing\": [\"a\"], \"metadata\": [[\"zz\"]]}";
        let result = decode(text, DiagramFormat::Structured, &CanvasConfig::default());
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_mismatched_extents_fail() {
        let text = "{\"drawing\": [\"ab\"], \"metadata\": [[null]]}";
        let result = decode(text, DiagramFormat::Structured, &CanvasConfig::default());
        assert!(matches!(result, Err(StorageError::Malformed(_))));

        let text = "{\"drawing\": [\"a\", \"b\"], \"metadata\": [[null]]}";
        let result = decode(text, DiagramFormat::Structured, &CanvasConfig::default());
        assert!(matches!(result, Err(StorageError::Malformed(_))));
    }

    #[test]
    fn test_missing_field_fails() {
        let text = "// x\n\n{\"drawing\": [\"x\"]}";
        let result = decode(text, DiagramFormat::Structured, &CanvasConfig::default());
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_header_lines_are_stripped() {
        let text = "//a\n  // indented\n\n{\"drawing\": [\"//\"], \"metadata\": [[null, \"t\"]]}";
        let loaded = decode(text, DiagramFormat::Structured, &CanvasConfig::default()).unwrap();
        assert_eq!(loaded.grid.trimmed_lines(), vec!["//"]);
        assert_eq!(loaded.grid.tag(1, 0), Some(CellTag::Text));
    }
}
