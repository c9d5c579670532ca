//! Presentation-ready values handed to a [`PresentationWriter`](crate::writer::PresentationWriter).
//!
//! All lengths are in points; all colors are uppercase 6-hex-digit strings without `#`.

use serde::{Deserialize, Serialize};

/// Opaque handle to a physical page created by a writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageHandle(pub usize);

/// Alignment after mapping. Anything that is not explicitly left or center maps to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

/// A positioned box on a page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Concrete draw style produced by the style mapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedStyle {
    pub font_size_pt: f64,
    pub color: String,
    /// Box fill; `None` means transparent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    pub bold: bool,
    pub align: HorizontalAlign,
    pub space_before_pt: f64,
    pub space_after_pt: f64,
}

/// One table cell with its resolved style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellStyled {
    pub text: String,
    pub style: MappedStyle,
}
