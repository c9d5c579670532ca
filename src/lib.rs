//! Turns an HTML-like document into a deck of fixed-size slides.
//!
//! The pipeline has two halves: extraction ([`extract`]) walks the parsed tree into
//! logical [`Slide`]s of classified blocks, and layout ([`converters::layout`]) paginates
//! each slide onto physical pages, emitting draw commands to a [`PresentationWriter`].

pub mod config;
pub mod converters;
pub mod errors;
pub mod extract;
pub mod models;
pub mod writer;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use config::{DeckConfig, PageGeometry};
pub use converters::layout::{layout_deck, DeckLayout};
pub use converters::markdown::slides_to_markdown;
pub use errors::{DeckError, Result};
pub use extract::parse_slides;
pub use models::{block::Block, slide::Slide, slide::SlideKind, style::StyleSubset};
pub use writer::{PresentationWriter, RecordingWriter};

/// Extracts slides from `html` and lays them out onto `writer`.
///
/// # Errors
/// Returns `DeckError::NoContent` when the document yields no non-empty slide.
pub fn build_deck<W>(html: &str, config: &DeckConfig, writer: &mut W) -> Result<DeckLayout>
where
    W: PresentationWriter + ?Sized,
{
    let slides = parse_slides(html, &config.extraction)?;
    layout_deck(&slides, config, writer)
}

/// Runs the whole pipeline into a [`RecordingWriter`] and returns its commands as JSON.
///
/// `config_json` may be a partial configuration; `None` uses the defaults.
pub fn render_html_to_json(html: &str, config_json: Option<&str>) -> Result<String> {
    let config = match config_json {
        Some(json) => DeckConfig::from_json_str(json)?,
        None => DeckConfig::default(),
    };
    let mut writer = RecordingWriter::new();
    build_deck(html, &config, &mut writer)?;
    writer.to_json()
}
