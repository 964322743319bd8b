//! CSS value types: colors, lengths, and text alignment.
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// User agent default font size.
/// [§ 3.5 font-size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
pub const DEFAULT_FONT_SIZE_PX: f64 = 16.0;

/// A value string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} value: {input:?}")]
pub struct ValueError {
    kind: &'static str,
    input: String,
}

impl ValueError {
    fn new(kind: &'static str, input: &str) -> Self {
        Self {
            kind,
            input: input.to_string(),
        }
    }
}

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color represented as RGBA components.
///
/// Serialized as a hex string (`#rrggbb` or `#rrggbbaa`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorValue {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

impl ColorValue {
    /// Black (#000000)
    pub const BLACK: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    ///
    /// "The syntax of a <hex-color> is a <hash-token> token whose value
    /// consists of 3, 4, 6, or 8 hexadecimal digits."
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        // "The three-digit RGB notation (#RGB) is converted into six-digit
        // form (#RRGGBB) by replicating digits, not by adding zeros."
        let short = |i: usize| channel(&hex[i..=i].repeat(2));
        match hex.len() {
            3 => Some(Self {
                r: short(0)?,
                g: short(1)?,
                b: short(2)?,
                a: 255,
            }),
            4 => Some(Self {
                r: short(0)?,
                g: short(1)?,
                b: short(2)?,
                a: short(3)?,
            }),
            6 => Some(Self {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
                a: 255,
            }),
            8 => Some(Self {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
                a: channel(&hex[6..8])?,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for ColorValue {
    /// [§ 15.2 Serializing sRGB values](https://www.w3.org/TR/css-color-4/#serializing-sRGB-values)
    ///
    /// Opaque colors use the six-digit form; translucent ones carry the
    /// alpha channel as two extra digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for ColorValue {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s.trim()).ok_or_else(|| ValueError::new("color", s))
    }
}

impl TryFrom<String> for ColorValue {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColorValue> for String {
    fn from(value: ColorValue) -> Self {
        value.to_string()
    }
}

/// [§ 4.1 Lengths](https://www.w3.org/TR/css-values-4/#lengths)
/// "Lengths refer to distance measurements and are denoted by `<length>` in the
/// property definitions."
///
/// Serialized in CSS syntax (`16px`, `1.5em`, `50%`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LengthValue {
    /// [§ 6.1 Absolute lengths](https://www.w3.org/TR/css-values-4/#absolute-lengths)
    /// "1px = 1/96th of 1in"
    Px(f64),
    /// [§ 5.1.1 Font-relative lengths](https://www.w3.org/TR/css-values-4/#font-relative-lengths)
    /// "Equal to the computed value of the font-size property of the element"
    Em(f64),
    /// [§ 4.3 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
    Percent(f64),
}

impl LengthValue {
    /// Resolve to pixels. Font-relative units and percentages resolve
    /// against `reference_px` (the parent font size for `font-size`).
    #[must_use]
    pub fn to_px(&self, reference_px: f64) -> f64 {
        match self {
            Self::Px(px) => *px,
            Self::Em(em) => *em * reference_px,
            Self::Percent(pct) => *pct * reference_px / 100.0,
        }
    }
}

impl fmt::Display for LengthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Em(v) => write!(f, "{v}em"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

impl FromStr for LengthValue {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_ascii_lowercase();
        let number = |digits: &str| {
            digits
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ValueError::new("length", s))
        };
        if let Some(digits) = trimmed.strip_suffix("px") {
            number(digits).map(Self::Px)
        } else if let Some(digits) = trimmed.strip_suffix("em") {
            number(digits).map(Self::Em)
        } else if let Some(digits) = trimmed.strip_suffix('%') {
            number(digits).map(Self::Percent)
        } else if trimmed == "0" {
            // [§ 6 Distance Units](https://www.w3.org/TR/css-values-4/#lengths)
            // "the unit identifier may be omitted" for zero lengths.
            Ok(Self::Px(0.0))
        } else {
            Err(ValueError::new("length", s))
        }
    }
}

impl TryFrom<String> for LengthValue {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LengthValue> for String {
    fn from(value: LengthValue) -> Self {
        value.to_string()
    }
}

/// [§ 16.2 Alignment: the 'text-align' property](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
///
/// "This property describes how inline-level content of a block
/// container is aligned."
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TextAlign {
    /// "Left-aligned"
    #[default]
    Left,
    /// "Right-aligned"
    Right,
    /// "Centered"
    Center,
    /// "Justified"
    Justify,
}

impl TextAlign {
    /// Value for a legacy `align` attribute on a block wrapper.
    ///
    /// Left is the wrapper's default and justify has no attribute form,
    /// so both yield `None`.
    #[must_use]
    pub const fn attribute_value(self) -> Option<&'static str> {
        match self {
            Self::Right => Some("right"),
            Self::Center => Some("center"),
            Self::Left | Self::Justify => None,
        }
    }
}
