//! The layout participant contract.
//!
//! [CSS Box Sizing Level 3 § 5 Intrinsic Size Determination](https://www.w3.org/TR/css-sizing-3/#intrinsic-sizes)
//!
//! The outer layout algorithm drives every participant through one pass in a
//! fixed order:
//!
//! 1. `intrinsic_content_width` (bottom-up, content driven), once per
//!    [`SizingDirective`];
//! 2. `content_height_for_width` for the width it picked (top-down);
//! 3. `set_border_box_bounds` to commit position and size.
//!
//! `move_relative` may follow at any time to shift committed bounds without
//! a new pass.

use quill_dom::DomTree;

use super::box_model::Rect;
use crate::style::StyleSource;

/// Which intrinsic width an intrinsic-width query asks for.
///
/// [§ 5.1 Intrinsic Sizes](https://www.w3.org/TR/css-sizing-3/#intrinsic-sizes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizingDirective {
    /// "min-content inline size: The narrowest inline size a box could take
    /// that doesn't lead to inline-dimension overflow that could be avoided
    /// by choosing a larger inline size."
    Minimum,
    /// "max-content inline size: A box's ideal size in a given axis when
    /// given infinite available space."
    Preferred,
}

/// What kind of content a participant lays out.
///
/// The outer algorithm uses this to decide whether to recurse into the
/// participant's children as participants in their own right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// A box whose children are laid out by the outer algorithm.
    Container,
    /// Formatted text rendered as a unit; children are markup, not participants.
    FormattedText,
    /// A native form control.
    FormControl,
}

impl ContentType {
    /// Whether children of this participant may themselves be participants.
    #[must_use]
    pub const fn may_have_participant_children(self) -> bool {
        matches!(self, Self::Container)
    }
}

/// Read-only view of the document a participant measures.
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
    /// The document tree.
    pub dom: &'a DomTree,
    /// Computed styles for nodes of `dom`.
    pub styles: &'a dyn StyleSource,
}

impl<'a> LayoutContext<'a> {
    /// Bundle a tree and its computed styles.
    #[must_use]
    pub fn new(dom: &'a DomTree, styles: &'a dyn StyleSource) -> Self {
        Self { dom, styles }
    }
}

/// A box that takes part in the outer box-model layout.
///
/// Widths and heights are content-box values unless stated otherwise.
/// Queries never fail: a participant always answers with a size.
pub trait LayoutParticipant {
    /// What kind of content this participant lays out.
    fn content_type(&self) -> ContentType;

    /// [§ 5.1 Intrinsic Sizes](https://www.w3.org/TR/css-sizing-3/#intrinsic-sizes)
    ///
    /// The content-box width wanted under `directive`. For the same content
    /// the [`SizingDirective::Minimum`] answer never exceeds the
    /// [`SizingDirective::Preferred`] one. Must not change observable bounds.
    fn intrinsic_content_width(
        &mut self,
        cx: &LayoutContext<'_>,
        directive: SizingDirective,
        parent_content_width: f32,
    ) -> f32;

    /// The content height needed to render without clipping at
    /// `content_width`.
    fn content_height_for_width(
        &mut self,
        cx: &LayoutContext<'_>,
        content_width: f32,
        parent_content_width: f32,
    ) -> f32;

    /// Commit the final border-box position and size. This is the only
    /// operation that changes observable geometry.
    fn set_border_box_bounds(
        &mut self,
        cx: &LayoutContext<'_>,
        bounds: Rect,
        containing_box_width: f32,
    );

    /// Shift committed bounds by `(dx, dy)` without changing their size.
    fn move_relative(&mut self, dx: f32, dy: f32);

    /// The last committed border-box bounds.
    fn border_box_bounds(&self) -> Rect;
}

/// [§ 10.3.5 Floating, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#float-width)
///
/// "Then the shrink-to-fit width is:
/// min(max(preferred minimum width, available width), preferred width)."
#[must_use]
pub fn shrink_to_fit_width(preferred_minimum: f32, preferred: f32, available: f32) -> f32 {
    available.max(preferred_minimum).min(preferred)
}

/// Run one layout pass over a single participant placed at `(x, y)`.
///
/// # Algorithm
///
/// STEP 1: Query the minimum and preferred intrinsic widths.
///
/// STEP 2: Pick the shrink-to-fit width for `available_width`.
///
/// STEP 3: Query the height for that width.
///
/// STEP 4: Commit the resulting bounds.
///
/// Participants that cannot carry borders or padding have equal content
/// and border boxes, so the measured size is committed as-is.
pub fn lay_out_participant<P: LayoutParticipant + ?Sized>(
    participant: &mut P,
    cx: &LayoutContext<'_>,
    x: f32,
    y: f32,
    available_width: f32,
    containing_box_width: f32,
) -> Rect {
    // STEP 1
    let minimum =
        participant.intrinsic_content_width(cx, SizingDirective::Minimum, available_width);
    let preferred =
        participant.intrinsic_content_width(cx, SizingDirective::Preferred, available_width);

    // STEP 2
    let width = shrink_to_fit_width(minimum, preferred, available_width);

    // STEP 3
    let height = participant.content_height_for_width(cx, width, available_width);

    // STEP 4
    let bounds = Rect::new(x, y, width, height);
    participant.set_border_box_bounds(cx, bounds, containing_box_width);
    bounds
}
