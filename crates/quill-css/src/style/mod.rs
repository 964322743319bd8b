//! CSS Computed Style
//!
//! [§ 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
//! "The computed value is the result of resolving the specified value..."
//!
//! The bridge only ever reads computed styles. [`StyleLookup`] is the
//! read-only capability it reads through, so the component producing
//! styles can change representation without touching the bridge.

mod computed;
mod property;
mod values;

pub use computed::ComputedStyle;
pub use property::{PropertyId, PropertyValue, StyleLookup, StyleMap, StyleSource};
pub use values::{ColorValue, DEFAULT_FONT_SIZE_PX, LengthValue, TextAlign, ValueError};
