//! Computed style snapshots and the layout participant contract for the
//! Quill text bridge.
//!
//! # Scope
//!
//! This crate implements:
//! - **Computed Styles** ([CSS Cascading Level 4 § 4.4](https://www.w3.org/TR/css-cascade-4/#computed))
//!   - A read-only lookup capability ([`StyleLookup`]) keyed by [`PropertyId`]
//!   - Color values (hex), length values (px, em, %), text alignment
//!   - Serialization of a snapshot as inline CSS text
//!
//! - **Layout Participant Contract** ([CSS Sizing Level 3](https://www.w3.org/TR/css-sizing-3/))
//!   - Intrinsic width queries under a [`SizingDirective`]
//!   - Height-for-width queries and bounds commitment
//!   - A shrink-to-fit driver for a single participant
//!
//! # Not Implemented
//!
//! Selector matching and the cascade itself. Computed styles are consumed
//! here as already-resolved values.

/// Box model, font metrics, and the layout participant contract.
pub mod layout;
/// Computed style representation per [CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/).
pub mod style;

// Re-exports for convenience
pub use layout::{
    ApproximateFontMetrics, ContentType, FontMetrics, LayoutContext, LayoutParticipant, Rect,
    SizingDirective, Size, lay_out_participant, shrink_to_fit_width,
};
pub use style::{
    ColorValue, ComputedStyle, DEFAULT_FONT_SIZE_PX, LengthValue, PropertyId, PropertyValue,
    StyleLookup, StyleMap, StyleSource, TextAlign,
};
