//! Greedy line breaking over inline items.
//!
//! [CSS Text § 5 Line Breaking](https://www.w3.org/TR/css-text-3/#line-breaking)
//!
//! Words never break internally; lines break only at collapsed spaces and
//! forced breaks. A word wider than the line sits on a line of its own and
//! overflows.

use quill_css::{FontMetrics, Rect, TextAlign};

use super::fragment::{FlowContent, InlineItem, RunStyle};
use super::markup_surface::IMAGE_PLACEHOLDER_SIZE;

/// A measured unit of inline content.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Atom {
    /// An unbreakable run: a word or an image.
    Segment {
        width: f32,
        height: f32,
        href: Option<String>,
    },
    /// A break opportunity with the advance of one space.
    Space { width: f32, height: f32 },
    /// A forced line break.
    Break { height: f32 },
}

/// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
///
/// A unitless `line-height` multiplies the font size; `normal` defers to the
/// font metrics.
fn line_height(metrics: &dyn FontMetrics, style: RunStyle) -> f32 {
    style.line_height.map_or_else(
        || metrics.line_height(style.font_size),
        |multiplier| multiplier * style.font_size,
    )
}

/// Measure every item of `content`.
pub(crate) fn measure(content: &FlowContent, metrics: &dyn FontMetrics) -> Vec<Atom> {
    content
        .items
        .iter()
        .map(|item| match item {
            InlineItem::Text { text, style, href } => Atom::Segment {
                width: metrics.text_width(text, style.font_size, style.bold),
                height: line_height(metrics, *style),
                href: href.clone(),
            },
            InlineItem::Space { style } => Atom::Space {
                width: metrics.text_width(" ", style.font_size, style.bold),
                height: line_height(metrics, *style),
            },
            InlineItem::LineBreak { style } => Atom::Break {
                height: line_height(metrics, *style),
            },
            InlineItem::Image { href, .. } => Atom::Segment {
                width: IMAGE_PLACEHOLDER_SIZE,
                height: IMAGE_PLACEHOLDER_SIZE,
                href: href.clone(),
            },
        })
        .collect()
}

/// Width of the widest unbreakable segment: the min-content width.
pub(crate) fn widest_segment(atoms: &[Atom]) -> f32 {
    atoms
        .iter()
        .filter_map(|atom| match atom {
            Atom::Segment { width, .. } => Some(*width),
            _ => None,
        })
        .fold(0.0, f32::max)
}

/// Result of breaking atoms into lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct LineLayout {
    /// Width of the widest line.
    pub width: f32,
    /// Sum of line heights.
    pub height: f32,
    /// Boxes of linked segments with their targets, in content coordinates.
    pub links: Vec<(Rect, String)>,
}

#[derive(Default)]
struct OpenLine {
    width: f32,
    height: f32,
    pending_space: f32,
    placed: Vec<(f32, f32, Option<String>)>,
}

impl OpenLine {
    fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }
}

struct LineBreaker {
    max_width: f32,
    align: TextAlign,
    layout: LineLayout,
    line: OpenLine,
}

impl LineBreaker {
    /// Close the current line. `min_height` applies to lines that end in a
    /// forced break, so an empty line still takes vertical space.
    fn finish_line(&mut self, min_height: f32) {
        let line = std::mem::take(&mut self.line);
        let height = line.height.max(min_height);

        // [§ 16.2 Alignment](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
        // Justified lines are placed like left-aligned ones.
        let slack = if self.max_width.is_finite() {
            (self.max_width - line.width).max(0.0)
        } else {
            0.0
        };
        let offset = match self.align {
            TextAlign::Left | TextAlign::Justify => 0.0,
            TextAlign::Right => slack,
            TextAlign::Center => slack / 2.0,
        };

        let y = self.layout.height;
        for (x, width, href) in line.placed {
            if let Some(href) = href {
                self.layout
                    .links
                    .push((Rect::new(x + offset, y, width, height), href));
            }
        }
        self.layout.width = self.layout.width.max(line.width);
        self.layout.height += height;
    }

    fn place(&mut self, width: f32, height: f32, href: Option<&str>) {
        if !self.line.is_empty()
            && self.line.width + self.line.pending_space + width > self.max_width
        {
            self.finish_line(0.0);
        }
        let line = &mut self.line;
        if !line.is_empty() {
            line.width += line.pending_space;
        }
        line.pending_space = 0.0;
        line.placed.push((line.width, width, href.map(str::to_string)));
        line.width += width;
        line.height = line.height.max(height);
    }
}

/// Break `atoms` into lines no wider than `max_width`.
///
/// An infinite `max_width` yields the max-content layout. A trailing forced
/// break does not open a new line; consecutive forced breaks produce empty
/// lines.
pub(crate) fn break_lines(atoms: &[Atom], max_width: f32, align: TextAlign) -> LineLayout {
    let mut breaker = LineBreaker {
        max_width,
        align,
        layout: LineLayout::default(),
        line: OpenLine::default(),
    };

    for atom in atoms {
        match atom {
            Atom::Segment {
                width,
                height,
                href,
            } => breaker.place(*width, *height, href.as_deref()),
            Atom::Space { width, height } => {
                // Spaces at the start of a line are dropped.
                if !breaker.line.is_empty() {
                    breaker.line.pending_space = *width;
                    breaker.line.height = breaker.line.height.max(*height);
                }
            }
            Atom::Break { height } => breaker.finish_line(*height),
        }
    }
    if !breaker.line.is_empty() {
        breaker.finish_line(0.0);
    }
    breaker.layout
}
