//! Pagination and layout of logical slides onto fixed-size physical pages.
//!
//! The engine is single-pass and greedy: blocks are taken in order, each gets an
//! estimated height from a per-kind constant, and a new page is started whenever the
//! next block would cross the bottom margin. There is no lookahead and no reflow, so
//! the output is a deterministic function of the blocks and the configuration.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::style_map::{map_style, normalize_color, parse_color, StyleContext};
use crate::config::{DeckConfig, LayoutMetrics, PageGeometry, SlideTheme, DEFAULT_BACKGROUND_COLOR};
use crate::errors::{DeckError, Result};
use crate::models::{
    block::Block,
    draw::{CellStyled, Frame, PageHandle},
    slide::{Slide, SlideKind},
    style::StyleSubset,
};
use crate::writer::PresentationWriter;

/// Where one block landed on a page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Index of the block within its logical slide.
    pub block_index: usize,
    pub y: f64,
    /// Estimated height the pagination decision was based on.
    pub height: f64,
}

/// One physical page produced from a logical slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    /// Index of the logical slide among the slides that were laid out.
    pub slide_index: usize,
    pub kind: SlideKind,
    /// 0 for the first page of a slide, 1 for its first continuation, and so on.
    pub page_in_slide: usize,
    pub handle: PageHandle,
    pub placements: Vec<Placement>,
}

/// All physical pages of a deck, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckLayout {
    pub pages: Vec<PageLayout>,
}

impl DeckLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Pages produced from the logical slide at `slide_index`.
    pub fn pages_for_slide(&self, slide_index: usize) -> impl Iterator<Item = &PageLayout> {
        self.pages
            .iter()
            .filter(move |page| page.slide_index == slide_index)
    }
}

/// Vertical position on the current physical page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    pub y: f64,
}

impl LayoutCursor {
    pub fn at_top(geometry: &PageGeometry) -> Self {
        Self {
            y: geometry.top_margin,
        }
    }

    /// True when a block of `height` placed here ends on or above the bottom margin.
    pub fn fits(&self, height: f64, geometry: &PageGeometry) -> bool {
        self.y + height <= geometry.content_bottom()
    }

    pub fn advance(&mut self, height: f64, spacing: f64) {
        self.y += height + spacing;
    }
}

/// Heuristic rendered height of a block.
pub fn estimate_height(block: &Block, metrics: &LayoutMetrics) -> f64 {
    match block {
        Block::Heading { .. } => metrics.heading_height,
        Block::Paragraph { .. } => metrics.paragraph_height,
        Block::ListItem { .. } => metrics.list_item_height,
        Block::Table { rows, .. } => rows.len() as f64 * metrics.table_row_height + metrics.table_padding,
    }
}

/// Horizontal indent of a block; only list items are indented.
pub fn level_indent(block: &Block, metrics: &LayoutMetrics) -> f64 {
    match block {
        Block::ListItem { level, .. } => f64::from(level.saturating_sub(1)) * metrics.indent_step,
        _ => 0.0,
    }
}

/// Lays out every slide in order, emitting draw commands to `writer`.
///
/// A slide may expand into several physical pages; slides are never merged. Slides
/// without blocks are skipped.
///
/// # Errors
/// Returns `DeckError::NoContent` when there is no slide with at least one block.
pub fn layout_deck<W>(slides: &[Slide], config: &DeckConfig, writer: &mut W) -> Result<DeckLayout>
where
    W: PresentationWriter + ?Sized,
{
    let mut layout = DeckLayout::default();
    let non_empty = slides.iter().filter(|slide| !slide.blocks.is_empty());

    for (slide_index, slide) in non_empty.enumerate() {
        layout_slide(slide_index, slide, config, writer, &mut layout.pages);
    }

    if layout.pages.is_empty() {
        return Err(DeckError::NoContent);
    }
    info!(
        "Laid out {} physical page(s) from {} slide(s)",
        layout.page_count(),
        layout.pages.last().map_or(0, |page| page.slide_index + 1)
    );
    Ok(layout)
}

fn open_page<W>(
    writer: &mut W,
    slide_index: usize,
    kind: SlideKind,
    page_in_slide: usize,
    background: &str,
) -> PageLayout
where
    W: PresentationWriter + ?Sized,
{
    PageLayout {
        slide_index,
        kind,
        page_in_slide,
        handle: writer.create_page(background),
        placements: Vec::new(),
    }
}

fn layout_slide<W>(
    slide_index: usize,
    slide: &Slide,
    config: &DeckConfig,
    writer: &mut W,
    pages: &mut Vec<PageLayout>,
) where
    W: PresentationWriter + ?Sized,
{
    let geometry = &config.geometry;
    let theme = config.theme.for_kind(slide.kind);
    let background = slide
        .background
        .as_deref()
        .and_then(parse_color)
        .unwrap_or_else(|| normalize_color(Some(&theme.background), DEFAULT_BACKGROUND_COLOR));

    let mut page = open_page(writer, slide_index, slide.kind, 0, &background);
    let mut cursor = LayoutCursor::at_top(geometry);

    for (block_index, block) in slide.blocks.iter().enumerate() {
        let height = estimate_height(block, &config.metrics);

        // Checked once per block, including the first; the page opened by a break always
        // takes the block, so an oversized block cannot loop.
        if !cursor.fits(height, geometry) {
            debug!(
                "[layout_slide] Slide {} overflows at block {} (y={}, height={}), starting page {}",
                slide_index + 1,
                block_index,
                cursor.y,
                height,
                page.page_in_slide + 2
            );
            let next = open_page(writer, slide_index, slide.kind, page.page_in_slide + 1, &background);
            pages.push(std::mem::replace(&mut page, next));
            cursor = LayoutCursor::at_top(geometry);
        }

        if height > geometry.usable_height() {
            warn!(
                "Slide {}: {} of estimated height {} exceeds the usable page height {} and will overflow",
                slide_index + 1,
                block.kind_name(),
                height,
                geometry.usable_height()
            );
        }

        place_block(writer, page.handle, block, cursor.y, height, theme, config);
        page.placements.push(Placement {
            block_index,
            y: cursor.y,
            height,
        });
        cursor.advance(height, config.metrics.block_spacing);
    }

    pages.push(page);
}

fn place_block<W>(
    writer: &mut W,
    page: PageHandle,
    block: &Block,
    y: f64,
    height: f64,
    theme: &SlideTheme,
    config: &DeckConfig,
) where
    W: PresentationWriter + ?Sized,
{
    // Deep nesting cannot push a block past the right margin.
    let indent = level_indent(block, &config.metrics).min(config.geometry.content_width(0.0));
    let x = config.geometry.side_margin + indent;
    let width = config.geometry.content_width(indent);

    let (text, style, context) = match block {
        Block::Table { rows, style } => {
            let cells = styled_rows(rows, style, theme, config);
            writer.place_table(page, &cells, x, y, width);
            return;
        }
        Block::Heading { level, text, style } => (text, style, StyleContext::Heading(*level)),
        Block::Paragraph { text, style } | Block::ListItem { text, style, .. } => {
            (text, style, StyleContext::Body)
        }
    };

    let mapped = map_style(style, context, theme, &config.typography);
    let frame = Frame { x, y, width, height };
    writer.place_text(page, text, frame, &mapped);
}

/// Styles every cell; row 0 is the header row (bold, header fill).
fn styled_rows(
    rows: &[Vec<String>],
    style: &StyleSubset,
    theme: &SlideTheme,
    config: &DeckConfig,
) -> Vec<Vec<CellStyled>> {
    let body = map_style(style, StyleContext::Table, theme, &config.typography);
    let mut header = body.clone();
    header.bold = true;
    header.fill = Some(normalize_color(
        Some(&config.theme.table_header_fill),
        DEFAULT_BACKGROUND_COLOR,
    ));
    header.color = normalize_color(style.color.as_deref(), &config.theme.content.text_color);

    rows.iter()
        .enumerate()
        .map(|(row_index, row)| {
            let cell_style = if row_index == 0 { &header } else { &body };
            row.iter()
                .map(|text| CellStyled {
                    text: text.clone(),
                    style: cell_style.clone(),
                })
                .collect()
        })
        .collect()
}
