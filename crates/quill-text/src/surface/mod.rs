//! The rendering-surface boundary.
//!
//! A rendering surface is the external rich-text widget that shapes, wraps,
//! and paints a markup fragment. The bridge only talks to it through
//! [`RenderingSurface`]: push markup, assign bounds, read back sizes, and
//! ask which link sits under a point.
//!
//! [`MarkupSurface`] is a reference surface that lays fragments out with a
//! [`FontMetrics`](quill_css::FontMetrics) implementation.

mod flow;
mod fragment;
mod markup_surface;

use quill_css::{Rect, Size};
use serde::{Deserialize, Serialize};

pub use markup_surface::{IMAGE_PLACEHOLDER_SIZE, MarkupSurface};

/// An external rich-text rendering surface.
///
/// Preferred-size answers are only accurate for the surface's current
/// width, which is why the bridge keeps a second surface for hypothetical
/// widths.
pub trait RenderingSurface {
    /// Replace the displayed content with `markup`.
    fn set_markup(&mut self, markup: &str);

    /// The markup currently displayed.
    fn markup(&self) -> &str;

    /// Assign position and size.
    fn set_bounds(&mut self, bounds: Rect);

    /// The assigned position and size.
    fn bounds(&self) -> Rect;

    /// Assign a size, keeping the current position.
    fn set_size(&mut self, width: f32, height: f32) {
        let bounds = self.bounds();
        self.set_bounds(Rect::new(bounds.x, bounds.y, width, height));
    }

    /// The smallest size the content fits in without truncation.
    fn minimum_size(&self) -> Size;

    /// The natural width of the content and its height at the currently
    /// assigned width.
    fn preferred_size(&self) -> Size;

    /// Create a new, empty surface configured like this one.
    #[must_use]
    fn spawn_probe(&self) -> Self
    where
        Self: Sized;

    /// The target of the link at surface-local point `(x, y)`, if any.
    fn link_at(&self, x: f32, y: f32) -> Option<String>;
}

/// Insets a surface draws around its content.
///
/// Text widgets commonly pad their content by a few pixels; the default
/// models a 3px top inset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceChrome {
    /// Top inset in pixels.
    pub top: f32,
    /// Right inset in pixels.
    pub right: f32,
    /// Bottom inset in pixels.
    pub bottom: f32,
    /// Left inset in pixels.
    pub left: f32,
}

impl SurfaceChrome {
    /// No insets at all.
    pub const NONE: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    /// Left plus right inset.
    #[must_use]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Top plus bottom inset.
    #[must_use]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl Default for SurfaceChrome {
    fn default() -> Self {
        Self {
            top: 3.0,
            ..Self::NONE
        }
    }
}
