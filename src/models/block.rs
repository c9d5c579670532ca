use serde::{Deserialize, Serialize};

use crate::models::style::StyleSubset;

/// One classified unit of slide content.
///
/// Blocks are immutable once built and keep the order in which they appeared in the
/// source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Block {
    /// A heading; `level` is 1..=6.
    Heading {
        level: u8,
        text: String,
        style: StyleSubset,
    },
    Paragraph {
        text: String,
        style: StyleSubset,
    },
    /// A list item; `level` counts the list containers above it (minimum 1).
    ListItem {
        level: u32,
        text: String,
        style: StyleSubset,
    },
    /// A table with at least one row holding a non-empty cell.
    Table {
        rows: Vec<Vec<String>>,
        style: StyleSubset,
    },
}

impl Block {
    /// The style subset attached to the block, whatever its kind.
    pub fn style(&self) -> &StyleSubset {
        match self {
            Block::Heading { style, .. }
            | Block::Paragraph { style, .. }
            | Block::ListItem { style, .. }
            | Block::Table { style, .. } => style,
        }
    }

    /// The text of a non-table block.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Heading { text, .. }
            | Block::Paragraph { text, .. }
            | Block::ListItem { text, .. } => Some(text),
            Block::Table { .. } => None,
        }
    }

    /// Short name of the block kind, used in log lines.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::ListItem { .. } => "list item",
            Block::Table { .. } => "table",
        }
    }
}
