//! # docmd
//!
//! Structural DOCX to Markdown conversion.
//!
//! This library converts a Word document package into a Markdown
//! representation preserving structural semantics: headings, paragraphs,
//! nested ordered/unordered lists, tables, hyperlinks, bold/italic
//! emphasis, and text embedded in floating text boxes.
//!
//! ## Quick Start
//!
//! ```no_run
//! // One-shot conversion
//! let markdown = docmd::to_markdown("report.docx")?;
//! std::fs::write("report.md", markdown)?;
//!
//! // Full parsing with access to the document model
//! let doc = docmd::parse_file("report.docx")?;
//! println!("blocks: {}", doc.blocks.len());
//! # Ok::<(), docmd::Error>(())
//! ```
//!
//! Conversion is a single synchronous pass: the package is opened, at most
//! three entries are read (the document body, and optionally the hyperlink
//! relationships and list numbering definitions), two lookup tables are
//! built, the body is walked once, and the normalized Markdown is
//! assembled. Absent optional entries degrade to empty tables; a missing
//! `word/document.xml` is fatal.

pub mod container;
pub mod docx;
pub mod error;
pub mod model;
pub mod render;

// Re-exports
pub use container::{DocxContainer, Relationships};
pub use docx::{DocxParser, NumberingMap};
pub use error::{Error, Result};
pub use model::{
    Block, Cell, Document, HeadingLevel, Hyperlink, Inline, ListInfo, ListKind, Paragraph, Row,
    Table, TextRun, TextStyle,
};

use std::path::Path;

/// Parse a DOCX file and return its document model.
///
/// # Example
///
/// ```no_run
/// let doc = docmd::parse_file("document.docx")?;
/// # Ok::<(), docmd::Error>(())
/// ```
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document> {
    DocxParser::open(path)?.parse()
}

/// Parse a DOCX package from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    DocxParser::from_bytes(data.to_vec())?.parse()
}

/// Convert a DOCX file to Markdown.
///
/// # Example
///
/// ```no_run
/// let markdown = docmd::to_markdown("document.docx")?;
/// std::fs::write("output.md", markdown)?;
/// # Ok::<(), docmd::Error>(())
/// ```
pub fn to_markdown(path: impl AsRef<Path>) -> Result<String> {
    let doc = parse_file(path)?;
    Ok(render::to_markdown(&doc))
}
