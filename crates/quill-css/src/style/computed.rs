//! CSS Computed Style
//!
//! [§ 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
//! "The computed value is the result of resolving the specified value..."

use serde::{Deserialize, Serialize};

use super::property::{PropertyId, PropertyValue, StyleLookup};
use super::values::{ColorValue, LengthValue, TextAlign};

/// Computed styles for an element.
///
/// [§ 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
///
/// All values are Option - None means "not set" and is left out of the
/// serialized CSS text, letting the rendering surface inherit it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComputedStyle {
    /// [§ 3.1 'color'](https://www.w3.org/TR/css-color-4/#the-color-property)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorValue>,
    /// [§ 3.2 'background-color'](https://www.w3.org/TR/css-backgrounds-3/#background-color)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<ColorValue>,
    /// [§ 3.1 'font-family'](https://www.w3.org/TR/css-fonts-4/#font-family-prop)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// [§ 3.5 'font-size'](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<LengthValue>,
    /// [§ 3.2 'font-weight'](https://www.w3.org/TR/css-fonts-4/#font-weight-prop)
    ///
    /// Numeric weight, 1-1000. `normal` is 400 and `bold` is 700.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    /// [§ 3.3 'font-style'](https://www.w3.org/TR/css-fonts-4/#font-style-prop)
    ///
    /// Values: normal | italic | oblique
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    /// [§ 2.1 'text-decoration-line'](https://www.w3.org/TR/css-text-decor-3/#text-decoration-line-property)
    ///
    /// Values: none | underline | overline | line-through
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
    /// [§ 4.2 'line-height'](https://www.w3.org/TR/css-inline-3/#line-height-property)
    ///
    /// Unitless multiplier of the font size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    /// [§ 16.2 Alignment: the 'text-align' property](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
}

impl ComputedStyle {
    /// Builder-style setter for `text-align`.
    #[must_use]
    pub fn with_text_align(mut self, align: TextAlign) -> Self {
        self.text_align = Some(align);
        self
    }

    /// Builder-style setter for `font-size` in pixels.
    #[must_use]
    pub fn with_font_size_px(mut self, px: f64) -> Self {
        self.font_size = Some(LengthValue::Px(px));
        self
    }

    /// Builder-style setter for `color`.
    #[must_use]
    pub fn with_color(mut self, color: ColorValue) -> Self {
        self.color = Some(color);
        self
    }
}

impl StyleLookup for ComputedStyle {
    fn get(&self, property: PropertyId) -> Option<PropertyValue> {
        match property {
            PropertyId::Color => self.color.map(PropertyValue::Color),
            PropertyId::BackgroundColor => self.background_color.map(PropertyValue::Color),
            PropertyId::FontFamily => self.font_family.clone().map(PropertyValue::FontFamily),
            PropertyId::FontSize => self.font_size.map(PropertyValue::Length),
            PropertyId::FontWeight => self
                .font_weight
                .map(|weight| PropertyValue::Number(f64::from(weight))),
            PropertyId::FontStyle => self.font_style.clone().map(PropertyValue::Keyword),
            PropertyId::TextDecoration => self.text_decoration.clone().map(PropertyValue::Keyword),
            PropertyId::LineHeight => self.line_height.map(PropertyValue::Number),
            PropertyId::TextAlign => self
                .text_align
                .map(|align| PropertyValue::Keyword(align.to_string())),
        }
    }

    fn text_align(&self) -> TextAlign {
        self.text_align.unwrap_or_default()
    }
}
