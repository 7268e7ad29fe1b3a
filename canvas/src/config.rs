//! Interaction tuning knobs.
//!
//! Hosts usually take [`EngineConfig::default`]. Each field can be overridden
//! individually from JSON; missing fields keep their defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DUPLICATE_OFFSET, HANDLE_TOLERANCE_PX, MIN_LAYER_SIZE};
use crate::error::DocResult;
use crate::geom::is_positive;

/// How a pointer resize maps handle movement onto the layer box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeMode {
    /// The pointer delta is added to width and height whichever handle was
    /// grabbed; the top-left corner never moves.
    #[default]
    Origin,
    /// The edge opposite the grabbed handle stays put and only the axes the
    /// handle controls change.
    OppositeEdge,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Smallest width/height a pointer resize can produce, in canvas units.
    pub min_layer_size: f64,
    /// Slop around each resize handle, in screen pixels.
    pub handle_tolerance_px: f64,
    /// Offset of a keyboard duplicate from its original, in canvas units.
    pub duplicate_offset: f64,
    pub resize_mode: ResizeMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_layer_size: MIN_LAYER_SIZE,
            handle_tolerance_px: HANDLE_TOLERANCE_PX,
            duplicate_offset: DUPLICATE_OFFSET,
            resize_mode: ResizeMode::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON config.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a field has the wrong type.
    pub fn from_json(json: &str) -> DocResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Replace out-of-range values with their defaults.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            min_layer_size: if is_positive(self.min_layer_size) { self.min_layer_size } else { defaults.min_layer_size },
            handle_tolerance_px: if self.handle_tolerance_px.is_finite() && self.handle_tolerance_px >= 0.0 {
                self.handle_tolerance_px
            } else {
                defaults.handle_tolerance_px
            },
            duplicate_offset: if self.duplicate_offset.is_finite() {
                self.duplicate_offset
            } else {
                defaults.duplicate_offset
            },
            resize_mode: self.resize_mode,
        }
    }
}
