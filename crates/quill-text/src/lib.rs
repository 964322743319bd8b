//! Formatted-text bridge for the Quill layout engine.
//!
//! # Scope
//!
//! This crate implements:
//! - **Inline Subtree Serialization** ([`serialize()`])
//!   - `br`, `img`, `a[href]` and generic wrappers with computed styles
//!     baked in as inline `style` text
//!   - Escaping of every text run and attribute value
//!
//! - **Rendering Surfaces** ([`surface`])
//!   - The [`RenderingSurface`] boundary trait
//!   - [`MarkupSurface`], a reference surface that breaks fragments into
//!     lines with [`FontMetrics`](quill_css::FontMetrics)
//!
//! - **The Bridge** ([`FormattedText`])
//!   - The layout participant contract over a live and a probe surface
//!   - Lazy fragment regeneration after child insertion
//!   - Hyperlink activation through a [`LinkBridge`]
//!
//! # Not Implemented
//!
//! Glyph shaping, bidi, hyphenation and image decoding. Surfaces other than
//! [`MarkupSurface`] are expected to bring their own.

/// The bridge participant.
pub mod component;
/// Calibration constants.
pub mod config;
/// Markup escaping.
pub mod escape;
/// Widget-backed element dispatch.
pub mod factory;
/// Hyperlink activation.
pub mod link;
/// Subtree serialization.
pub mod serialize;
/// The rendering-surface boundary.
pub mod surface;

pub use component::FormattedText;
pub use config::FormattedTextConfig;
pub use escape::{escape, escape_into};
pub use factory::{TEXT_COMPONENT_NAME, create_component};
pub use link::{LinkBridge, LinkError, LinkOpener, LinkOutcome};
pub use serialize::serialize;
pub use surface::{MarkupSurface, RenderingSurface, SurfaceChrome};
