//! Style mapping: converts a [`StyleSubset`] into presentation-ready values.
//!
//! Every conversion is pure and resolves unknown input to a documented default.

use log::debug;

use crate::config::{SlideTheme, Typography, BOLD_WEIGHT_THRESHOLD, PT_PER_PX};
use crate::models::draw::{HorizontalAlign, MappedStyle};
use crate::models::style::{StyleSubset, TextAlign};

/// What a style is being mapped for; selects default size and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleContext {
    Heading(u8),
    Body,
    Table,
}

// --- Unit Conversion ---

/// Converts a pixel length to points, or returns `default_pt` when absent.
pub fn px_to_pt(px: Option<f64>, default_pt: f64) -> f64 {
    match px {
        Some(px) if px.is_finite() => px * PT_PER_PX,
        _ => default_pt,
    }
}

// --- Color Formatting ---

/// Parses a 3/6-digit hex string (leading `#` optional) or an `rgb()`/`rgba()` form
/// into an uppercase 6-hex-digit string without `#`.
///
/// Fully transparent `rgba()` values are treated as no color at all.
pub fn parse_color(value: &str) -> Option<String> {
    let value = value.trim();
    let lower = value.to_ascii_lowercase();

    if let Some(args) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_rgb_function(args);
    }

    let hex = value.strip_prefix('#').unwrap_or(value);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => Some(hex.to_ascii_uppercase()),
        3 => Some(
            hex.chars()
                .flat_map(|c| [c, c])
                .collect::<String>()
                .to_ascii_uppercase(),
        ),
        _ => None,
    }
}

fn parse_rgb_function(args: &str) -> Option<String> {
    let parts: Vec<&str> = args
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();
    if !(3..=4).contains(&parts.len()) {
        return None;
    }

    if let Some(alpha) = parts.get(3) {
        let alpha = match alpha.strip_suffix('%') {
            Some(percent) => percent.parse::<f64>().ok()? / 100.0,
            None => alpha.parse::<f64>().ok()?,
        };
        if alpha <= 0.0 {
            return None;
        }
    }

    let mut hex = String::with_capacity(6);
    for channel in &parts[..3] {
        let value = match channel.strip_suffix('%') {
            Some(percent) => percent.parse::<f64>().ok()? * 255.0 / 100.0,
            None => channel.parse::<f64>().ok()?,
        };
        if !value.is_finite() {
            return None;
        }
        hex.push_str(&format!("{:02X}", value.round().clamp(0.0, 255.0) as u8));
    }
    Some(hex)
}

/// Normalizes `value`, falling back to `fallback` (itself normalized) when the value
/// is absent or not in a recognized format.
pub fn normalize_color(value: Option<&str>, fallback: &str) -> String {
    if let Some(raw) = value {
        if let Some(color) = parse_color(raw) {
            return color;
        }
        debug!(
            "[normalize_color] Unrecognized color '{}', using fallback {}",
            raw, fallback
        );
    }
    parse_color(fallback).unwrap_or_else(|| fallback.to_ascii_uppercase())
}

// --- Alignment / Weight ---

/// `Center` and `Left` map directly; anything else, including absence, maps to right.
pub fn map_alignment(align: Option<TextAlign>) -> HorizontalAlign {
    match align {
        Some(TextAlign::Center) => HorizontalAlign::Center,
        Some(TextAlign::Left) => HorizontalAlign::Left,
        _ => HorizontalAlign::Right,
    }
}

/// Bold iff the weight is at least 600.
pub fn is_bold(weight: Option<u16>) -> bool {
    weight.is_some_and(|weight| weight >= BOLD_WEIGHT_THRESHOLD)
}

/// Maps a block's style subset to a concrete draw style.
pub fn map_style(
    style: &StyleSubset,
    context: StyleContext,
    theme: &SlideTheme,
    typography: &Typography,
) -> MappedStyle {
    let (default_size, default_color) = match context {
        StyleContext::Heading(level) => (typography.heading_size_pt(level), &theme.heading_color),
        StyleContext::Body => (typography.body_size_pt, &theme.text_color),
        StyleContext::Table => (typography.table_size_pt, &theme.text_color),
    };

    MappedStyle {
        font_size_pt: px_to_pt(style.font_size_px, default_size),
        color: normalize_color(style.color.as_deref(), default_color),
        fill: style.background_color.as_deref().and_then(parse_color),
        bold: is_bold(style.font_weight),
        align: map_alignment(style.text_align),
        space_before_pt: px_to_pt(style.margin_top_px, 0.0),
        space_after_pt: px_to_pt(style.margin_bottom_px, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeckTheme;

    #[test]
    fn test_px_to_pt() {
        assert_eq!(px_to_pt(Some(32.0), 10.0), 24.0);
        assert_eq!(px_to_pt(None, 10.0), 10.0);
        assert_eq!(px_to_pt(Some(f64::NAN), 10.0), 10.0);
    }

    #[test]
    fn test_parse_color_forms() {
        assert_eq!(parse_color("#abc").as_deref(), Some("AABBCC"));
        assert_eq!(parse_color("1a2b3c").as_deref(), Some("1A2B3C"));
        assert_eq!(parse_color("rgb(255, 0, 128)").as_deref(), Some("FF0080"));
        assert_eq!(parse_color("RGBA(0, 0, 0, 0.5)").as_deref(), Some("000000"));
        assert_eq!(parse_color("rgb(10 20 30 / 50%)").as_deref(), Some("0A141E"));
        assert_eq!(parse_color("rgb(300, -5, 100%)").as_deref(), Some("FF00FF"));
    }

    #[test]
    fn test_parse_color_rejects_unknown_and_transparent() {
        assert_eq!(parse_color("red"), None);
        assert_eq!(parse_color("#abcd"), None);
        assert_eq!(parse_color("rgb(1, 2)"), None);
        assert_eq!(parse_color("rgba(0, 0, 0, 0)"), None);
        assert_eq!(parse_color("hsl(0, 100%, 50%)"), None);
    }

    #[test]
    fn test_normalize_color_fallback() {
        assert_eq!(normalize_color(Some("bogus"), "333333"), "333333");
        assert_eq!(normalize_color(None, "#fff"), "FFFFFF");
        assert_eq!(normalize_color(Some("#010203"), "333333"), "010203");
    }

    #[test]
    fn test_alignment_defaults_to_right() {
        assert_eq!(map_alignment(Some(TextAlign::Center)), HorizontalAlign::Center);
        assert_eq!(map_alignment(Some(TextAlign::Left)), HorizontalAlign::Left);
        assert_eq!(map_alignment(Some(TextAlign::Right)), HorizontalAlign::Right);
        assert_eq!(map_alignment(None), HorizontalAlign::Right);
    }

    #[test]
    fn test_bold_threshold() {
        assert!(!is_bold(Some(599)));
        assert!(is_bold(Some(600)));
        assert!(is_bold(Some(900)));
        assert!(!is_bold(None));
    }

    #[test]
    fn test_map_style_uses_context_defaults() {
        let theme = DeckTheme::default();
        let typography = Typography::default();

        let heading = map_style(
            &StyleSubset::default(),
            StyleContext::Heading(2),
            &theme.content,
            &typography,
        );
        assert_eq!(heading.font_size_pt, 28.0);
        assert_eq!(heading.color, "1F3A5F");
        assert_eq!(heading.fill, None);
        assert!(!heading.bold);

        let body = map_style(
            &StyleSubset {
                font_size_px: Some(20.0),
                font_weight: Some(700),
                color: Some("rgb(0, 0, 255)".to_string()),
                background_color: Some("rgba(0, 0, 0, 0)".to_string()),
                margin_top_px: Some(16.0),
                ..Default::default()
            },
            StyleContext::Body,
            &theme.title,
            &typography,
        );
        assert_eq!(body.font_size_pt, 15.0);
        assert_eq!(body.color, "0000FF");
        assert_eq!(body.fill, None);
        assert!(body.bold);
        assert_eq!(body.space_before_pt, 12.0);
        assert_eq!(body.space_after_pt, 0.0);
    }
}
