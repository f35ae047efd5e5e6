//! Typed document model produced by the parser and consumed by the renderer.

mod document;
mod paragraph;
mod table;

pub use document::{Block, Document};
pub use paragraph::{HeadingLevel, Hyperlink, Inline, ListInfo, ListKind, Paragraph, TextRun, TextStyle};
pub use table::{Cell, Row, Table};
