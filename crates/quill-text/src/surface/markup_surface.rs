//! A rendering surface that lays fragments out with font metrics.

use std::fmt;
use std::rc::Rc;

use quill_css::{FontMetrics, Rect, Size, TextAlign};

use super::flow::{self, Atom, LineLayout};
use super::fragment::read_fragment;
use super::{RenderingSurface, SurfaceChrome};

/// Side length of the square box an image occupies. Images are not decoded.
pub const IMAGE_PLACEHOLDER_SIZE: f32 = 16.0;

/// A [`RenderingSurface`] that reads markup fragments, breaks them into
/// lines with a [`FontMetrics`] implementation, and reports sizes the way a
/// text widget would: content size plus [`SurfaceChrome`] insets.
///
/// Probes spawned from a surface share its metrics.
pub struct MarkupSurface {
    metrics: Rc<dyn FontMetrics>,
    chrome: SurfaceChrome,
    markup: String,
    align: TextAlign,
    atoms: Vec<Atom>,
    bounds: Rect,
}

impl fmt::Debug for MarkupSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkupSurface")
            .field("chrome", &self.chrome)
            .field("markup", &self.markup)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl MarkupSurface {
    /// Create an empty surface.
    #[must_use]
    pub fn new(metrics: Rc<dyn FontMetrics>, chrome: SurfaceChrome) -> Self {
        Self {
            metrics,
            chrome,
            markup: String::new(),
            align: TextAlign::Left,
            atoms: Vec::new(),
            bounds: Rect::default(),
        }
    }

    /// The insets drawn around the content.
    #[must_use]
    pub const fn chrome(&self) -> SurfaceChrome {
        self.chrome
    }

    /// Width available to content at the assigned bounds.
    fn inner_width(&self) -> f32 {
        (self.bounds.width - self.chrome.horizontal()).max(0.0)
    }

    /// Lines at the assigned width. A surface that has not been given a
    /// width yet lays out unbounded.
    fn current_layout(&self) -> LineLayout {
        let max_width = if self.bounds.width > 0.0 {
            self.inner_width()
        } else {
            f32::INFINITY
        };
        flow::break_lines(&self.atoms, max_width, self.align)
    }
}

impl RenderingSurface for MarkupSurface {
    fn set_markup(&mut self, markup: &str) {
        let content = read_fragment(markup);
        self.atoms = flow::measure(&content, self.metrics.as_ref());
        self.align = content.align;
        markup.clone_into(&mut self.markup);
    }

    fn markup(&self) -> &str {
        &self.markup
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn minimum_size(&self) -> Size {
        let width = flow::widest_segment(&self.atoms);
        let height = flow::break_lines(&self.atoms, width, self.align).height;
        Size::new(
            width + self.chrome.horizontal(),
            height + self.chrome.vertical(),
        )
    }

    fn preferred_size(&self) -> Size {
        let natural = flow::break_lines(&self.atoms, f32::INFINITY, self.align);
        let height = self.current_layout().height;
        Size::new(
            natural.width + self.chrome.horizontal(),
            height + self.chrome.vertical(),
        )
    }

    fn spawn_probe(&self) -> Self {
        Self::new(Rc::clone(&self.metrics), self.chrome)
    }

    fn link_at(&self, x: f32, y: f32) -> Option<String> {
        let (x, y) = (x - self.chrome.left, y - self.chrome.top);
        self.current_layout()
            .links
            .into_iter()
            .find(|(rect, _)| rect.contains(x, y))
            .map(|(_, href)| href)
    }
}
