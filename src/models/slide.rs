// src/models/slide.rs

use serde::{Deserialize, Serialize};

use crate::models::block::Block;

/// The declared type of a logical slide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlideKind {
    Title,
    Section,
    /// Ordinary content slide; used whenever no recognized type marker is present.
    #[default]
    Content,
    End,
}

impl SlideKind {
    /// Reads a slide type from a marker value (`title`, `section`, `section-break`, `end`).
    /// Returns `None` for anything else.
    pub fn from_marker(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => Some(SlideKind::Title),
            "section" | "section-break" => Some(SlideKind::Section),
            "end" => Some(SlideKind::End),
            "content" => Some(SlideKind::Content),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SlideKind::Title => "title",
            SlideKind::Section => "section",
            SlideKind::Content => "content",
            SlideKind::End => "end",
        }
    }
}

/// A logical, author-defined group of blocks, before pagination.
///
/// Slides are built once by the segmenter and never mutated afterwards; a slide with
/// no blocks is never constructed for the layout stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub kind: SlideKind,
    pub blocks: Vec<Block>,
    /// Background color declared on the slide container itself, as a CSS color string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_values() {
        assert_eq!(SlideKind::from_marker("Title"), Some(SlideKind::Title));
        assert_eq!(SlideKind::from_marker(" section-break "), Some(SlideKind::Section));
        assert_eq!(SlideKind::from_marker("section"), Some(SlideKind::Section));
        assert_eq!(SlideKind::from_marker("END"), Some(SlideKind::End));
        assert_eq!(SlideKind::from_marker("agenda"), None);
        assert_eq!(SlideKind::default(), SlideKind::Content);
    }
}
