//! Slide segmentation: splits a parsed document into logical [`Slide`]s.

use log::{debug, info};
use scraper::{CaseSensitivity, ElementRef, Html};

use super::classify::collect_blocks;
use super::style::declared_style;
use crate::config::ExtractionOptions;
use crate::errors::{DeckError, Result};
use crate::models::slide::{Slide, SlideKind};

/// Whether `element` carries the slide marker class or attribute.
fn is_slide_marker(element: ElementRef<'_>, options: &ExtractionOptions) -> bool {
    let el = element.value();
    el.has_class(&options.slide_class, CaseSensitivity::AsciiCaseInsensitive)
        || el.attr(&options.slide_attribute).is_some()
}

/// Collects the outermost marked containers in document order.
fn find_slide_containers<'a>(
    element: ElementRef<'a>,
    options: &ExtractionOptions,
    containers: &mut Vec<ElementRef<'a>>,
) {
    for child in element.child_elements() {
        if is_slide_marker(child, options) {
            containers.push(child);
        } else {
            find_slide_containers(child, options, containers);
        }
    }
}

/// Reads the slide type from the type attribute, the marker attribute's value, or a
/// `<slide class>-<type>` class, in that order. Defaults to `Content`.
pub(crate) fn slide_kind(container: ElementRef<'_>, options: &ExtractionOptions) -> SlideKind {
    let el = container.value();
    let class_prefix = format!("{}-", options.slide_class);

    el.attr(&options.slide_type_attribute)
        .and_then(SlideKind::from_marker)
        .or_else(|| el.attr(&options.slide_attribute).and_then(SlideKind::from_marker))
        .or_else(|| {
            el.classes()
                .filter_map(|class| class.strip_prefix(class_prefix.as_str()))
                .find_map(SlideKind::from_marker)
        })
        .unwrap_or_default()
}

/// Splits a parsed document into slides.
///
/// Each outermost marked container becomes one slide; without any marker the whole
/// document is a single `Content` slide. Slides without blocks are dropped, so the
/// result may be empty.
pub fn segment_document(document: &Html, options: &ExtractionOptions) -> Vec<Slide> {
    let root = document.root_element();
    let mut containers = Vec::new();
    if is_slide_marker(root, options) {
        containers.push(root);
    } else {
        find_slide_containers(root, options, &mut containers);
    }

    if containers.is_empty() {
        debug!("[segment_document] No slide markers found, using the whole document");
        let blocks = collect_blocks(root, options);
        return if blocks.is_empty() {
            Vec::new()
        } else {
            vec![Slide {
                kind: SlideKind::Content,
                blocks,
                background: None,
            }]
        };
    }

    containers
        .into_iter()
        .enumerate()
        .filter_map(|(index, container)| {
            let blocks = collect_blocks(container, options);
            if blocks.is_empty() {
                debug!(
                    "[segment_document] Dropping slide container {} without content",
                    index + 1
                );
                return None;
            }
            Some(Slide {
                kind: slide_kind(container, options),
                blocks,
                background: declared_style(container, options).background_color,
            })
        })
        .collect()
}

/// Parses markup and segments it into slides.
///
/// # Errors
/// Returns `DeckError::NoContent` when no slide holds a single non-empty block.
pub fn parse_slides(html: &str, options: &ExtractionOptions) -> Result<Vec<Slide>> {
    let document = Html::parse_document(html);
    let slides = segment_document(&document, options);
    if slides.is_empty() {
        return Err(DeckError::NoContent);
    }
    info!(
        "Extracted {} slide(s) with {} block(s)",
        slides.len(),
        slides.iter().map(|slide| slide.blocks.len()).sum::<usize>()
    );
    Ok(slides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::block::Block;

    fn slides_of(html: &str) -> Vec<Slide> {
        segment_document(&Html::parse_document(html), &ExtractionOptions::default())
    }

    #[test]
    fn test_unmarked_document_is_one_content_slide() {
        let slides = slides_of("<h1>Hello</h1><p>World</p>");
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].kind, SlideKind::Content);
        assert_eq!(slides[0].blocks.len(), 2);
    }

    #[test]
    fn test_marked_containers_and_kinds() {
        let slides = slides_of(
            r#"<div class="slide" data-slide-type="title"><h1>Deck</h1></div>
               <p>between slides is ignored</p>
               <section data-slide><p>Body</p></section>
               <div class="slide slide-section-break"><h2>Part 2</h2></div>
               <div data-slide="end"><p>Thanks</p></div>
               <div class="slide" data-slide-type="agenda"><p>Agenda</p></div>"#,
        );
        let kinds: Vec<SlideKind> = slides.iter().map(|slide| slide.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SlideKind::Title,
                SlideKind::Content,
                SlideKind::Section,
                SlideKind::End,
                SlideKind::Content,
            ]
        );
    }

    #[test]
    fn test_empty_slides_are_dropped() {
        let slides = slides_of(
            r#"<div class="slide"><table><tr><td> </td></tr></table></div>
               <div class="slide"><p>kept</p></div>"#,
        );
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].blocks[0].text(), Some("kept"));
    }

    #[test]
    fn test_nested_markers_belong_to_outer_slide() {
        let slides = slides_of(
            r#"<div class="slide"><p>outer</p><div class="slide"><p>inner</p></div></div>"#,
        );
        assert_eq!(slides.len(), 1);
        let texts: Vec<_> = slides[0].blocks.iter().filter_map(Block::text).collect();
        assert_eq!(texts, vec!["outer", "inner"]);
    }

    #[test]
    fn test_container_background_is_recorded() {
        let slides = slides_of(r#"<div class="slide" style="background:#222 url(x.png)"><p>x</p></div>"#);
        assert_eq!(slides[0].background.as_deref(), Some("rgb(34, 34, 34)"));
    }

    #[test]
    fn test_no_content_error() {
        let err = parse_slides("<div class='slide'>  </div>", &ExtractionOptions::default())
            .unwrap_err();
        assert!(matches!(err, DeckError::NoContent));
        assert!(matches!(
            parse_slides("", &ExtractionOptions::default()),
            Err(DeckError::NoContent)
        ));
    }
}
