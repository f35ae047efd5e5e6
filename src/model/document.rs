//! Document model structures.

use super::{Paragraph, Table};
use serde::{Deserialize, Serialize};

/// A body-level content block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Block {
    /// A paragraph of text
    Paragraph(Paragraph),
    /// A table
    Table(Table),
}

/// A parsed document: the body's blocks in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Content blocks
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block to the body.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Check if the document has no content.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate over the body's paragraphs, skipping tables.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(para) => Some(para),
            Block::Table(_) => None,
        })
    }
}
