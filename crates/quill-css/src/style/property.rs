//! Property identifiers and the read-only style lookup capability.

use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;

use quill_dom::NodeId;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use super::computed::ComputedStyle;
use super::values::{ColorValue, LengthValue, TextAlign};

/// Identifier of a style property the bridge can read.
///
/// Iteration order (via [`IntoEnumIterator`]) is the order properties
/// appear in serialized CSS text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum PropertyId {
    /// [§ 3.1 'color'](https://www.w3.org/TR/css-color-4/#the-color-property)
    Color,
    /// [§ 3.2 'background-color'](https://www.w3.org/TR/css-backgrounds-3/#background-color)
    BackgroundColor,
    /// [§ 3.1 'font-family'](https://www.w3.org/TR/css-fonts-4/#font-family-prop)
    FontFamily,
    /// [§ 3.5 'font-size'](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
    FontSize,
    /// [§ 3.2 'font-weight'](https://www.w3.org/TR/css-fonts-4/#font-weight-prop)
    FontWeight,
    /// [§ 3.3 'font-style'](https://www.w3.org/TR/css-fonts-4/#font-style-prop)
    FontStyle,
    /// [§ 2.1 'text-decoration-line'](https://www.w3.org/TR/css-text-decor-3/#text-decoration-line-property)
    TextDecoration,
    /// [§ 4.2 'line-height'](https://www.w3.org/TR/css-inline-3/#line-height-property)
    LineHeight,
    /// [§ 16.2 'text-align'](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
    TextAlign,
}

/// A resolved property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// An identifier such as `center` or `italic`.
    Keyword(String),
    /// A length such as `16px`.
    Length(LengthValue),
    /// An sRGB color.
    Color(ColorValue),
    /// A bare number (`font-weight: 700`, unitless `line-height`).
    Number(f64),
    /// A font family list, kept verbatim.
    FontFamily(String),
}

impl fmt::Display for PropertyValue {
    /// [CSSOM § 6.7.2 Serializing CSS Values](https://www.w3.org/TR/cssom-1/#serializing-css-values)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(k) | Self::FontFamily(k) => f.write_str(k),
            Self::Length(l) => write!(f, "{l}"),
            Self::Color(c) => write!(f, "{c}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Read-only access to a computed style snapshot.
///
/// This is the only view of styles the bridge needs: it never mutates a
/// snapshot, it only reads individual properties or the whole snapshot as
/// CSS text.
pub trait StyleLookup {
    /// The resolved value of `property`, or `None` if it is not set.
    fn get(&self, property: PropertyId) -> Option<PropertyValue>;

    /// The resolved `text-align`, defaulting to [`TextAlign::Left`].
    fn text_align(&self) -> TextAlign {
        match self.get(PropertyId::TextAlign) {
            Some(PropertyValue::Keyword(keyword)) => keyword.parse().unwrap_or_default(),
            _ => TextAlign::Left,
        }
    }

    /// [CSSOM § 6.7.1 cssText](https://www.w3.org/TR/cssom-1/#dom-cssstyledeclaration-csstext)
    ///
    /// "Return the result of serializing the declarations" as
    /// `name: value` pairs joined by `"; "`, in [`PropertyId`] order.
    fn css_text(&self) -> String {
        PropertyId::iter()
            .filter_map(|property| self.get(property).map(|value| format!("{property}: {value}")))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Per-node source of computed styles.
pub trait StyleSource {
    /// The computed style of `node`, if one has been resolved.
    fn computed_style(&self, node: NodeId) -> Option<&dyn StyleLookup>;
}

/// Computed styles keyed by node, as produced by the cascade.
pub type StyleMap = HashMap<NodeId, ComputedStyle>;

impl<S: BuildHasher> StyleSource for HashMap<NodeId, ComputedStyle, S> {
    fn computed_style(&self, node: NodeId) -> Option<&dyn StyleLookup> {
        self.get(&node).map(|style| style as &dyn StyleLookup)
    }
}
