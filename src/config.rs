//! Deck configuration: page geometry, layout heuristics, typography and theme.
//!
//! Every group implements `Default`, and `DeckConfig::from_json_str` accepts a partial
//! JSON document where missing keys keep their defaults.

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::models::slide::SlideKind;

// Pixel to point conversion (CSS px at 96 DPI, pt at 72 DPI).
pub const PT_PER_PX: f64 = 0.75;
// Base font size used to resolve relative CSS units.
pub const BASE_FONT_SIZE_PX: f64 = 16.0;
// Font weight at and above which text is drawn bold.
pub const BOLD_WEIGHT_THRESHOLD: u16 = 600;

pub const DEFAULT_TEXT_COLOR: &str = "333333";
pub const DEFAULT_HEADING_COLOR: &str = "1F3A5F";
pub const DEFAULT_BACKGROUND_COLOR: &str = "FFFFFF";
pub const DEFAULT_INVERSE_TEXT_COLOR: &str = "FFFFFF";
pub const DEFAULT_TABLE_HEADER_FILL: &str = "D9E2F3";

/// Fixed page geometry in points. Read-only for the duration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageGeometry {
    pub page_width: f64,
    pub page_height: f64,
    pub top_margin: f64,
    pub bottom_margin: f64,
    pub side_margin: f64,
}

impl Default for PageGeometry {
    // 16:9, 10in x 5.625in
    fn default() -> Self {
        Self {
            page_width: 720.0,
            page_height: 405.0,
            top_margin: 36.0,
            bottom_margin: 36.0,
            side_margin: 36.0,
        }
    }
}

impl PageGeometry {
    /// The lowest y a block may reach without overflowing.
    pub fn content_bottom(&self) -> f64 {
        self.page_height - self.bottom_margin
    }

    /// Vertical space between the top and bottom margins.
    pub fn usable_height(&self) -> f64 {
        self.page_height - self.top_margin - self.bottom_margin
    }

    /// Width available to a block indented by `indent`, never negative.
    pub fn content_width(&self, indent: f64) -> f64 {
        (self.page_width - 2.0 * self.side_margin - indent).max(0.0)
    }
}

/// Heuristic per-kind block heights used for pagination decisions.
///
/// These are estimates rather than measured text extents; pagination breakpoints are
/// defined relative to them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutMetrics {
    pub heading_height: f64,
    pub paragraph_height: f64,
    pub list_item_height: f64,
    pub table_row_height: f64,
    pub table_padding: f64,
    pub block_spacing: f64,
    pub indent_step: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            heading_height: 48.0,
            paragraph_height: 40.0,
            list_item_height: 28.0,
            table_row_height: 24.0,
            table_padding: 12.0,
            block_spacing: 8.0,
            indent_step: 24.0,
        }
    }
}

/// Default point sizes used when a block carries no font size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Typography {
    /// Heading sizes for levels 1 through 6.
    pub heading_sizes_pt: [f64; 6],
    pub body_size_pt: f64,
    pub table_size_pt: f64,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            heading_sizes_pt: [32.0, 28.0, 24.0, 20.0, 18.0, 16.0],
            body_size_pt: 14.0,
            table_size_pt: 12.0,
        }
    }
}

impl Typography {
    pub fn heading_size_pt(&self, level: u8) -> f64 {
        let index = usize::from(level.clamp(1, 6)) - 1;
        self.heading_sizes_pt[index]
    }
}

/// Colors applied to every physical page of one slide kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideTheme {
    pub background: String,
    pub text_color: String,
    pub heading_color: String,
}

impl SlideTheme {
    fn dark(background: &str) -> Self {
        Self {
            background: background.to_string(),
            text_color: DEFAULT_INVERSE_TEXT_COLOR.to_string(),
            heading_color: DEFAULT_INVERSE_TEXT_COLOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeckTheme {
    pub title: SlideTheme,
    pub section: SlideTheme,
    pub content: SlideTheme,
    pub end: SlideTheme,
    pub table_header_fill: String,
}

impl Default for DeckTheme {
    fn default() -> Self {
        Self {
            title: SlideTheme::dark("1F3A5F"),
            section: SlideTheme::dark("2E5C8A"),
            content: SlideTheme {
                background: DEFAULT_BACKGROUND_COLOR.to_string(),
                text_color: DEFAULT_TEXT_COLOR.to_string(),
                heading_color: DEFAULT_HEADING_COLOR.to_string(),
            },
            end: SlideTheme::dark("1F3A5F"),
            table_header_fill: DEFAULT_TABLE_HEADER_FILL.to_string(),
        }
    }
}

impl DeckTheme {
    pub fn for_kind(&self, kind: SlideKind) -> &SlideTheme {
        match kind {
            SlideKind::Title => &self.title,
            SlideKind::Section => &self.section,
            SlideKind::Content => &self.content,
            SlideKind::End => &self.end,
        }
    }
}

/// How slides and styles are read from the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractionOptions {
    /// Apply built-in per-tag defaults (heading sizes, bold table headers, paragraph margins).
    pub user_agent_defaults: bool,
    /// Class marking a slide container.
    pub slide_class: String,
    /// Attribute marking a slide container; its value may carry the slide type.
    pub slide_attribute: String,
    /// Attribute carrying the slide type.
    pub slide_type_attribute: String,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            user_agent_defaults: true,
            slide_class: "slide".to_string(),
            slide_attribute: "data-slide".to_string(),
            slide_type_attribute: "data-slide-type".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeckConfig {
    pub geometry: PageGeometry,
    pub metrics: LayoutMetrics,
    pub typography: Typography,
    pub theme: DeckTheme,
    pub extraction: ExtractionOptions,
}

impl DeckConfig {
    /// Parses a (possibly partial) JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
