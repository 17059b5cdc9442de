//! Plane configuration.

use crate::error::{GraphError, GraphResult};

pub const DEFAULT_CANVAS_WIDTH: f64 = 640.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 480.0;
pub const DEFAULT_SCALE: f64 = 20.0;
pub const DEFAULT_TICK_SPACING: f64 = 20.0;

/// Canvas size, initial origin, and initial scale for a [`Plane`].
///
/// `origin` is the pixel location of real (0, 0); `None` centers it.
///
/// [`Plane`]: crate::plane::Plane
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlaneConfig {
    pub width: f64,
    pub height: f64,
    pub origin: Option<(f64, f64)>,
    /// Pixels per real unit.
    pub scale: f64,
    /// Pixels between axis ticks at zoom level 1.
    pub tick_spacing: f64,
}

impl Default for PlaneConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            origin: None,
            scale: DEFAULT_SCALE,
            tick_spacing: DEFAULT_TICK_SPACING,
        }
    }
}

impl PlaneConfig {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.origin = Some((x, y));
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Check that sizes and scales are finite and positive and the origin
    /// is finite.
    pub fn validate(&self) -> GraphResult<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.width) || !positive(self.height) {
            return Err(GraphError::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }
        if !positive(self.scale) {
            return Err(GraphError::InvalidScale(self.scale));
        }
        if !positive(self.tick_spacing) {
            return Err(GraphError::InvalidScale(self.tick_spacing));
        }
        if let Some((x, y)) = self.origin {
            if !x.is_finite() || !y.is_finite() {
                return Err(GraphError::InvalidCanvas {
                    width: self.width,
                    height: self.height,
                });
            }
        }
        Ok(())
    }
}
