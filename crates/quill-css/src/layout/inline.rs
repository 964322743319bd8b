//! Font metrics for inline text measurement.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."

/// Font metrics interface for text measurement during layout.
///
/// Implementors provide the actual per-glyph advance widths and line
/// height values needed for inline layout. Rendering surfaces call these
/// methods to measure words for line breaking.
pub trait FontMetrics {
    /// Measure the total advance width of a text string at the given font size.
    ///
    /// `bold` selects the heavier face where the implementation has one.
    fn text_width(&self, text: &str, font_size: f32, bold: bool) -> f32;

    /// Calculate the line height for a given font size.
    ///
    /// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
    ///
    /// "The initial value of 'line-height' is 'normal'. We recommend a used
    /// value for 'normal' between 1.0 and 1.2."
    fn line_height(&self, font_size: f32) -> f32;
}

/// Approximate font metrics using fixed ratios.
///
/// Without access to actual font data, we use fixed ratio approximations.
/// The average advance width of Latin glyphs in a proportional font is
/// approximately 0.6x the font size, bold faces run about 10% wider, and
/// line height uses 1.2x, the upper end of the recommended range for
/// `line-height: normal`.
///
/// This is used as a fallback when no font is available, and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFontMetrics;

impl FontMetrics for ApproximateFontMetrics {
    fn text_width(&self, text: &str, font_size: f32, bold: bool) -> f32 {
        const CHAR_WIDTH_RATIO: f32 = 0.6;
        const BOLD_RATIO: f32 = 1.1;
        let width = text.chars().count() as f32 * font_size * CHAR_WIDTH_RATIO;
        if bold { width * BOLD_RATIO } else { width }
    }

    fn line_height(&self, font_size: f32) -> f32 {
        const LINE_HEIGHT_RATIO: f32 = 1.2;
        font_size * LINE_HEIGHT_RATIO
    }
}
