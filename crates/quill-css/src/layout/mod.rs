//! Layout types consumed and produced by layout participants.
//!
//! # Relevant Specifications
//!
//! - [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)
//! - [CSS Box Sizing Module Level 3](https://www.w3.org/TR/css-sizing-3/)
//! - [CSS 2.1 Visual Formatting Model Details](https://www.w3.org/TR/CSS2/visudet.html)
//!
//! # Module Structure
//!
//! - [`box_model`] - Rectangles and sizes
//! - [`inline`] - Font metrics used to measure inline text
//! - [`participant`] - The contract every sizing participant implements

pub mod box_model;
pub mod inline;
pub mod participant;

// Re-exports for convenience
pub use box_model::{Rect, Size};
pub use inline::{ApproximateFontMetrics, FontMetrics};
pub use participant::{
    ContentType, LayoutContext, LayoutParticipant, SizingDirective, lay_out_participant,
    shrink_to_fit_width,
};
