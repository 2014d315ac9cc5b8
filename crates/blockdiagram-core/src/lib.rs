//! Block Diagram Core Library
//!
//! Grid buffer, shape rasterization, tools, selection and persistence for a
//! text-grid block diagram editor.

pub mod canvas;
pub mod charset;
pub mod config;
pub mod grid;
pub mod input;
pub mod selection;
pub mod shapes;
pub mod storage;
pub mod tools;

pub use canvas::{Canvas, CanvasDocument};
pub use charset::{ArrowHeads, CharacterSet, CornerStyle, HeadStyle, LinePattern, LineStyle, LineWeight};
pub use config::{CanvasConfig, ConfigError};
pub use grid::{Cell, CellTag, Cursor, GridBuffer, Region, WriteMode};
pub use input::{KeyEvent, MouseButton, PointerEvent};
pub use selection::{SelectionClipboard, SelectionState};
pub use shapes::{ApproachMode, Painter, Rasterize, Shape};
pub use storage::{DiagramFormat, FileStorage, MemoryStorage, Storage, StorageError};
pub use tools::{ToolCommand, ToolKind, ToolManager};
