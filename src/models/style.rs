// src/models/style.rs

use serde::{Deserialize, Serialize};

/// Horizontal text alignment as understood by the extraction stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// The bounded set of style attributes carried from the source document.
///
/// Every field is independently optional; absence means "use the engine default"
/// and is never an error. Colors are kept as CSS strings (`rgb(...)`, `rgba(...)`
/// or hex) and only normalized by the style mapper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSubset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size_px: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_top_px: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_bottom_px: Option<f64>,
}

impl StyleSubset {
    /// True when no attribute is set.
    pub fn is_empty(&self) -> bool {
        *self == StyleSubset::default()
    }

    /// Fills every unset field of `self` from `other`.
    pub(crate) fn fill_from(&mut self, other: &StyleSubset) {
        if self.color.is_none() {
            self.color = other.color.clone();
        }
        if self.background_color.is_none() {
            self.background_color = other.background_color.clone();
        }
        if self.font_size_px.is_none() {
            self.font_size_px = other.font_size_px;
        }
        if self.font_weight.is_none() {
            self.font_weight = other.font_weight;
        }
        if self.text_align.is_none() {
            self.text_align = other.text_align;
        }
        if self.margin_top_px.is_none() {
            self.margin_top_px = other.margin_top_px;
        }
        if self.margin_bottom_px.is_none() {
            self.margin_bottom_px = other.margin_bottom_px;
        }
    }

    /// Fills only the CSS-inherited fields (color, font size, weight, alignment).
    pub(crate) fn inherit_from(&mut self, ancestor: &StyleSubset) {
        if self.color.is_none() {
            self.color = ancestor.color.clone();
        }
        if self.font_size_px.is_none() {
            self.font_size_px = ancestor.font_size_px;
        }
        if self.font_weight.is_none() {
            self.font_weight = ancestor.font_weight;
        }
        if self.text_align.is_none() {
            self.text_align = ancestor.text_align;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inherit_skips_box_properties() {
        let ancestor = StyleSubset {
            color: Some("rgb(1, 2, 3)".to_string()),
            background_color: Some("rgb(9, 9, 9)".to_string()),
            margin_top_px: Some(10.0),
            font_weight: Some(700),
            ..Default::default()
        };
        let mut own = StyleSubset {
            font_weight: Some(400),
            ..Default::default()
        };
        own.inherit_from(&ancestor);

        assert_eq!(own.color.as_deref(), Some("rgb(1, 2, 3)"));
        assert_eq!(own.font_weight, Some(400));
        assert!(own.background_color.is_none());
        assert!(own.margin_top_px.is_none());
    }

    #[test]
    fn test_fill_from_keeps_own_values() {
        let mut own = StyleSubset {
            margin_top_px: Some(4.0),
            ..Default::default()
        };
        own.fill_from(&StyleSubset {
            margin_top_px: Some(16.0),
            margin_bottom_px: Some(16.0),
            ..Default::default()
        });
        assert_eq!(own.margin_top_px, Some(4.0));
        assert_eq!(own.margin_bottom_px, Some(16.0));
        assert!(!own.is_empty());
        assert!(StyleSubset::default().is_empty());
    }
}
