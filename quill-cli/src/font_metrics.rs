//! Font metrics backed by fontdue for measuring with a real font file.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use fontdue::{Font, FontSettings};
use quill_css::FontMetrics;

/// Font metrics implementation backed by fontdue's per-glyph metrics.
///
/// Uses `Font::metrics()` rather than `Font::rasterize()`; only advances
/// are needed. A single face serves every weight, so bold runs measure the
/// same as regular ones.
pub struct FontdueFontMetrics {
    font: Font,
}

impl FontdueFontMetrics {
    /// Load a TrueType or OpenType font file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("reading font {}", path.display()))?;
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| anyhow!("parsing font {}: {e}", path.display()))?;
        Ok(Self { font })
    }
}

impl FontMetrics for FontdueFontMetrics {
    fn text_width(&self, text: &str, font_size: f32, _bold: bool) -> f32 {
        text.chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| self.font.metrics(ch, font_size).advance_width)
            .sum()
    }

    fn line_height(&self, font_size: f32) -> f32 {
        // [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
        //
        // "We recommend a used value for 'normal' between 1.0 and 1.2."
        font_size * 1.2
    }
}
