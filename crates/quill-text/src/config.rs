//! Calibration of the formatted-text bridge against its rendering surface.

use serde::{Deserialize, Serialize};

/// Tunables tied to the chosen rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormattedTextConfig {
    /// Pixels subtracted from a probe-measured height to report a content
    /// height rather than the surface's padded height. Should match the
    /// vertical chrome of the surface in use.
    pub text_padding_correction: f32,
    /// Height bound assigned to the probe surface while measuring.
    pub probe_max_height: f32,
}

impl Default for FormattedTextConfig {
    fn default() -> Self {
        Self {
            text_padding_correction: 3.0,
            probe_max_height: f32::from(i16::MAX),
        }
    }
}
