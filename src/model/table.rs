//! Table model structures.

use super::Paragraph;
use serde::{Deserialize, Serialize};

/// A cell in a table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Cell content (paragraphs)
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

impl Cell {
    /// Create a new empty cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cell with a single text paragraph.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            paragraphs: vec![Paragraph::with_text(text)],
        }
    }

    /// Check if this cell has no content.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

/// A row of table cells.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Row {
    /// Cells in document order
    #[serde(default)]
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create a new empty row.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A table block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    /// Rows in document order
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of columns in the first row (the header row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, |row| row.cells.len())
    }
}
