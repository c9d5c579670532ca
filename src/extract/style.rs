//! Style extraction: reduces a node's styling to a [`StyleSubset`].
//!
//! Resolution is a small cascade subset rather than full CSS: for each element the
//! inline `style` declarations win, then presentational attributes (`align`,
//! `bgcolor`, `<font color>`), then built-in per-tag defaults. Color, font size,
//! weight and alignment are inherited from the nearest ancestor that declares them.
//! Relative lengths resolve against a fixed 16px base.

use csscolorparser::Color as CssColor;
use indexmap::IndexMap;
use log::debug;
use scraper::{ElementRef, Node};

use crate::config::{ExtractionOptions, BASE_FONT_SIZE_PX};
use crate::models::style::{StyleSubset, TextAlign};

type NodeRef<'a> = ego_tree::NodeRef<'a, Node>;

/// Extracts the style subset of `node`.
///
/// Non-element nodes have no styling and yield an empty subset.
pub fn extract_style(node: NodeRef<'_>, options: &ExtractionOptions) -> StyleSubset {
    let Some(element) = ElementRef::wrap(node) else {
        return StyleSubset::default();
    };

    let mut style = declared_style(element, options);
    for ancestor in element.ancestors().filter_map(ElementRef::wrap) {
        style.inherit_from(&declared_style(ancestor, options));
    }
    style
}

/// The style an element declares for itself, without inheritance.
pub(crate) fn declared_style(element: ElementRef<'_>, options: &ExtractionOptions) -> StyleSubset {
    let mut style = element
        .value()
        .attr("style")
        .map(|css| style_from_declarations(&parse_declarations(css)))
        .unwrap_or_default();

    style.fill_from(&presentational_style(element));
    if options.user_agent_defaults {
        style.fill_from(&user_agent_style(element.value().name()));
    }
    style
}

/// Splits an inline `style` attribute into lowercase property names and values.
/// Later declarations of the same property replace earlier ones.
pub(crate) fn parse_declarations(css: &str) -> IndexMap<String, String> {
    let mut declarations = IndexMap::new();
    for declaration in css.split(';') {
        let Some((property, value)) = declaration.split_once(':') else {
            continue;
        };
        let property = property.trim().to_ascii_lowercase();
        let value = value.trim();
        let value = value
            .strip_suffix("!important")
            .map(str::trim_end)
            .unwrap_or(value);
        if property.is_empty() || value.is_empty() {
            continue;
        }
        declarations.insert(property, value.to_string());
    }
    declarations
}

fn style_from_declarations(declarations: &IndexMap<String, String>) -> StyleSubset {
    let mut style = StyleSubset::default();

    for (property, value) in declarations {
        match property.as_str() {
            "color" => style.color = computed_color(value),
            "background-color" => style.background_color = computed_color(value),
            // Only the color layer of the shorthand is understood.
            "background" => {
                style.background_color = computed_color(value)
                    .or_else(|| value.split_whitespace().find_map(computed_color));
            }
            "font-size" => style.font_size_px = parse_font_size_px(value),
            "font-weight" => style.font_weight = parse_font_weight(value),
            "text-align" => style.text_align = parse_text_align(value),
            "margin-top" => style.margin_top_px = parse_length_px(value),
            "margin-bottom" => style.margin_bottom_px = parse_length_px(value),
            "margin" => {
                let (top, bottom) = parse_margin_shorthand(value);
                style.margin_top_px = top;
                style.margin_bottom_px = bottom;
            }
            _ => {}
        }
    }
    style
}

fn presentational_style(element: ElementRef<'_>) -> StyleSubset {
    let el = element.value();
    let mut style = StyleSubset {
        text_align: el.attr("align").and_then(parse_text_align),
        background_color: el.attr("bgcolor").and_then(computed_color),
        ..Default::default()
    };
    if el.name() == "font" {
        style.color = el.attr("color").and_then(computed_color);
    }
    style
}

/// Built-in defaults per tag, the subset of a browser stylesheet this pipeline cares about.
fn user_agent_style(tag: &str) -> StyleSubset {
    // (font size px, margin em) for h1..h6
    const HEADINGS: [(f64, f64); 6] = [
        (32.0, 0.67),
        (24.0, 0.83),
        (18.72, 1.0),
        (16.0, 1.33),
        (13.28, 1.67),
        (10.72, 2.33),
    ];

    match tag {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let (size, margin_em) = HEADINGS[heading_index(tag)];
            let margin = (margin_em * size * 100.0).round() / 100.0;
            StyleSubset {
                font_size_px: Some(size),
                font_weight: Some(700),
                margin_top_px: Some(margin),
                margin_bottom_px: Some(margin),
                ..Default::default()
            }
        }
        "p" | "blockquote" | "figure" | "ul" | "ol" => StyleSubset {
            margin_top_px: Some(16.0),
            margin_bottom_px: Some(16.0),
            ..Default::default()
        },
        "pre" => StyleSubset {
            font_size_px: Some(13.0),
            margin_top_px: Some(13.0),
            margin_bottom_px: Some(13.0),
            ..Default::default()
        },
        "th" => StyleSubset {
            font_weight: Some(700),
            text_align: Some(TextAlign::Center),
            ..Default::default()
        },
        "b" | "strong" => StyleSubset {
            font_weight: Some(700),
            ..Default::default()
        },
        _ => StyleSubset::default(),
    }
}

fn heading_index(tag: &str) -> usize {
    tag.as_bytes()
        .get(1)
        .map(|digit| usize::from(digit.saturating_sub(b'1')).min(5))
        .unwrap_or(0)
}

/// Canonicalizes any CSS color into the `rgb()` / `rgba()` form a computed-style
/// facility reports. Unparseable values yield `None`.
pub(crate) fn computed_color(value: &str) -> Option<String> {
    let parsed: CssColor = match value.trim().parse() {
        Ok(color) => color,
        Err(_) => {
            debug!("[computed_color] Ignoring unrecognized color value '{}'", value);
            return None;
        }
    };
    let [r, g, b, a] = parsed.to_rgba8();
    if a == u8::MAX {
        Some(format!("rgb({}, {}, {})", r, g, b))
    } else {
        let alpha = (f64::from(parsed.a) * 100.0).round() / 100.0;
        Some(format!("rgba({}, {}, {}, {})", r, g, b, alpha))
    }
}

/// Parses a CSS length into pixels. `auto` and unknown units yield `None`.
pub(crate) fn parse_length_px(value: &str) -> Option<f64> {
    let value = value.trim().to_ascii_lowercase();
    let split = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);
    let number: f64 = number.parse().ok()?;
    let px = match unit.trim() {
        "" | "px" => number,
        "em" | "rem" => number * BASE_FONT_SIZE_PX,
        "pt" => number * 4.0 / 3.0,
        "%" => number * BASE_FONT_SIZE_PX / 100.0,
        _ => return None,
    };
    px.is_finite().then_some(px)
}

fn parse_font_size_px(value: &str) -> Option<f64> {
    match value.trim().to_ascii_lowercase().as_str() {
        "xx-small" => Some(9.0),
        "x-small" => Some(10.0),
        "small" => Some(13.0),
        "medium" => Some(16.0),
        "large" => Some(18.0),
        "x-large" => Some(24.0),
        "xx-large" => Some(32.0),
        _ => parse_length_px(value).filter(|px| *px > 0.0),
    }
}

fn parse_font_weight(value: &str) -> Option<u16> {
    match value.trim().to_ascii_lowercase().as_str() {
        "normal" => Some(400),
        "bold" | "bolder" => Some(700),
        "lighter" => Some(300),
        other => other
            .parse::<u16>()
            .ok()
            .filter(|weight| (1..=1000).contains(weight)),
    }
}

/// Only explicit `left`, `center` and `right` are kept; logical values such as
/// `start` or `justify` are left unset.
fn parse_text_align(value: &str) -> Option<TextAlign> {
    match value.trim().to_ascii_lowercase().as_str() {
        "left" => Some(TextAlign::Left),
        "center" | "middle" => Some(TextAlign::Center),
        "right" => Some(TextAlign::Right),
        _ => None,
    }
}

/// Returns (top, bottom) from a 1-4 value `margin` shorthand.
fn parse_margin_shorthand(value: &str) -> (Option<f64>, Option<f64>) {
    let parts: Vec<&str> = value.split_whitespace().collect();
    match parts.as_slice() {
        [all] => (parse_length_px(all), parse_length_px(all)),
        [vertical, _] => (parse_length_px(vertical), parse_length_px(vertical)),
        [top, _, bottom] | [top, _, bottom, _] => (parse_length_px(top), parse_length_px(bottom)),
        _ => (None, None),
    }
}
