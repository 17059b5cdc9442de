//! Real-space ↔ screen-space mapping with zoom.
//!
//! Screen y grows downward, so the y mapping is inverted. The mapper keeps
//! the unzoomed scale, tick spacing, and origin so that returning to zoom
//! level 1 restores them bit-for-bit.

use log::{debug, warn};

use crate::basics::PointD;
use crate::config::PlaneConfig;
use crate::error::{GraphError, GraphResult};

// ============================================================================
// Viewport
// ============================================================================

/// A snapshot of the mapping geometry: canvas size, origin, and scale.
///
/// Curve builders take a `Viewport` by value so that every sample in one
/// build sees the same `(scale, origin)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Pixel location of real (0, 0).
    pub origin: PointD,
    /// Pixels per real unit; always finite and positive.
    pub scale: f64,
}

impl Viewport {
    #[inline]
    pub fn real_to_screen_x(&self, x: f64) -> f64 {
        self.origin.x + x * self.scale
    }

    #[inline]
    pub fn real_to_screen_y(&self, y: f64) -> f64 {
        self.origin.y - y * self.scale
    }

    #[inline]
    pub fn screen_to_real_x(&self, px: f64) -> f64 {
        (px - self.origin.x) / self.scale
    }

    #[inline]
    pub fn screen_to_real_y(&self, py: f64) -> f64 {
        (self.origin.y - py) / self.scale
    }

    /// Real x at the left canvas edge.
    pub fn min_real_x(&self) -> f64 {
        self.screen_to_real_x(0.0)
    }

    /// Real x at the right canvas edge.
    pub fn max_real_x(&self) -> f64 {
        self.screen_to_real_x(self.width)
    }

    /// Real y at the bottom canvas edge.
    pub fn min_real_y(&self) -> f64 {
        self.screen_to_real_y(self.height)
    }

    /// Real y at the top canvas edge.
    pub fn max_real_y(&self) -> f64 {
        self.screen_to_real_y(0.0)
    }

    pub fn center(&self) -> PointD {
        PointD::new(self.width * 0.5, self.height * 0.5)
    }
}

// ============================================================================
// ZoomState
// ============================================================================

/// Zoom level plus the values to restore when the level returns to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    pub level: f64,
    pub unzoomed_scale: f64,
    pub unzoomed_tick_spacing: f64,
    pub unzoomed_origin: PointD,
}

// ============================================================================
// CoordinateMapper
// ============================================================================

/// Converts between real coordinates and screen pixels; owns origin,
/// scale, tick spacing, and zoom state.
#[derive(Debug, Clone)]
pub struct CoordinateMapper {
    viewport: Viewport,
    tick_spacing: f64,
    zoom: ZoomState,
}

fn valid_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

impl CoordinateMapper {
    /// Build a mapper from a validated configuration.
    pub fn new(config: &PlaneConfig) -> GraphResult<Self> {
        config.validate()?;
        let origin = config
            .origin
            .map(PointD::from)
            .unwrap_or_else(|| PointD::new(config.width * 0.5, config.height * 0.5));
        Ok(Self {
            viewport: Viewport {
                width: config.width,
                height: config.height,
                origin,
                scale: config.scale,
            },
            tick_spacing: config.tick_spacing,
            zoom: ZoomState {
                level: 1.0,
                unzoomed_scale: config.scale,
                unzoomed_tick_spacing: config.tick_spacing,
                unzoomed_origin: origin,
            },
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn origin(&self) -> PointD {
        self.viewport.origin
    }

    pub fn scale(&self) -> f64 {
        self.viewport.scale
    }

    pub fn tick_spacing(&self) -> f64 {
        self.tick_spacing
    }

    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    pub fn zoom_level(&self) -> f64 {
        self.zoom.level
    }

    pub fn canvas_width(&self) -> f64 {
        self.viewport.width
    }

    pub fn canvas_height(&self) -> f64 {
        self.viewport.height
    }

    #[inline]
    pub fn real_to_screen_x(&self, x: f64) -> f64 {
        self.viewport.real_to_screen_x(x)
    }

    #[inline]
    pub fn real_to_screen_y(&self, y: f64) -> f64 {
        self.viewport.real_to_screen_y(y)
    }

    #[inline]
    pub fn screen_to_real_x(&self, px: f64) -> f64 {
        self.viewport.screen_to_real_x(px)
    }

    #[inline]
    pub fn screen_to_real_y(&self, py: f64) -> f64 {
        self.viewport.screen_to_real_y(py)
    }

    /// Set the zoom level. Levels above 1 zoom out (`scale = base / level`).
    ///
    /// Rejects levels that are not finite and positive, leaving every field
    /// untouched. On success returns the viewport in effect before the call.
    pub fn set_zoom(&mut self, level: f64) -> GraphResult<Viewport> {
        if !valid_positive(level) {
            warn!("rejecting zoom level {}", level);
            return Err(GraphError::InvalidZoom(level));
        }
        let previous = self.viewport;
        let scale = self.zoom.unzoomed_scale / level;
        if !valid_positive(scale) {
            warn!("zoom level {} yields unusable scale {}", level, scale);
            return Err(GraphError::InvalidZoom(level));
        }

        self.viewport.scale = scale;
        self.tick_spacing = self.zoom.unzoomed_tick_spacing / level;
        self.viewport.origin = if level == 1.0 {
            self.zoom.unzoomed_origin
        } else {
            let c = self.viewport.center();
            let u = self.zoom.unzoomed_origin;
            PointD::new(c.x + (u.x - c.x) / level, c.y + (u.y - c.y) / level)
        };
        self.zoom.level = level;
        debug!(
            "zoom {} -> scale {}, origin ({}, {})",
            level, self.viewport.scale, self.viewport.origin.x, self.viewport.origin.y
        );
        Ok(previous)
    }

    /// Resize the canvas, keeping the view centered on the same real point.
    ///
    /// Origin and unzoomed origin both shift by half the size change.
    pub fn resize(&mut self, width: f64, height: f64) -> GraphResult<Viewport> {
        if !valid_positive(width) || !valid_positive(height) {
            warn!("rejecting canvas size {}x{}", width, height);
            return Err(GraphError::InvalidCanvas { width, height });
        }
        let previous = self.viewport;
        let dx = (width - previous.width) * 0.5;
        let dy = (height - previous.height) * 0.5;

        self.viewport.width = width;
        self.viewport.height = height;
        self.viewport.origin.x += dx;
        self.viewport.origin.y += dy;
        self.zoom.unzoomed_origin.x += dx;
        self.zoom.unzoomed_origin.y += dy;
        debug!("canvas resized to {}x{}", width, height);
        Ok(previous)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> CoordinateMapper {
        CoordinateMapper::new(&PlaneConfig {
            width: 640.0,
            height: 480.0,
            origin: Some((320.0, 240.0)),
            scale: 20.0,
            tick_spacing: 20.0,
        })
        .unwrap()
    }

    #[test]
    fn test_real_to_screen() {
        let m = mapper();
        assert_eq!(m.real_to_screen_x(0.0), 320.0);
        assert_eq!(m.real_to_screen_x(2.0), 360.0);
        assert_eq!(m.real_to_screen_y(2.0), 200.0);
        assert_eq!(m.real_to_screen_y(-1.0), 260.0);
        assert_eq!(m.screen_to_real_x(0.0), -16.0);
        assert_eq!(m.screen_to_real_y(0.0), 12.0);
    }

    #[test]
    fn test_round_trip() {
        let m = mapper();
        for v in [-1e6, -123.25, -0.1, 0.0, 0.3, 7.5, 9999.0] {
            let x = m.screen_to_real_x(m.real_to_screen_x(v));
            let y = m.screen_to_real_y(m.real_to_screen_y(v));
            assert!((x - v).abs() <= 1e-9 * (1.0 + v.abs()));
            assert!((y - v).abs() <= 1e-9 * (1.0 + v.abs()));
        }
    }

    #[test]
    fn test_canvas_edges() {
        let vp = mapper().viewport();
        assert_eq!(vp.min_real_x(), -16.0);
        assert_eq!(vp.max_real_x(), 16.0);
        assert_eq!(vp.min_real_y(), -12.0);
        assert_eq!(vp.max_real_y(), 12.0);
    }

    #[test]
    fn test_set_zoom_scales() {
        let mut m = mapper();
        for level in [0.25, 0.5, 2.0, 3.0, 10.0] {
            m.set_zoom(level).unwrap();
            assert_eq!(m.scale(), 20.0 / level);
            assert_eq!(m.tick_spacing(), 20.0 / level);
            assert_eq!(m.zoom_level(), level);
        }
    }

    #[test]
    fn test_set_zoom_one_restores_origin_exactly() {
        let mut m = CoordinateMapper::new(&PlaneConfig {
            width: 641.0,
            height: 479.0,
            origin: Some((100.1, 333.3)),
            scale: 17.3,
            tick_spacing: 11.0,
        })
        .unwrap();
        let before = m.origin();
        for level in [3.0, 0.7, 1.3, 0.11] {
            m.set_zoom(level).unwrap();
        }
        m.set_zoom(1.0).unwrap();
        assert_eq!(m.origin().x.to_bits(), before.x.to_bits());
        assert_eq!(m.origin().y.to_bits(), before.y.to_bits());
        assert_eq!(m.scale(), 17.3);
    }

    #[test]
    fn test_set_zoom_origin_moves_toward_center() {
        let mut m = CoordinateMapper::new(&PlaneConfig {
            origin: Some((120.0, 40.0)),
            ..PlaneConfig::default()
        })
        .unwrap();
        m.set_zoom(2.0).unwrap();
        // center (320, 240) + ((120, 40) - center) / 2
        assert_eq!(m.origin(), PointD::new(220.0, 140.0));
    }

    #[test]
    fn test_set_zoom_rejects_invalid() {
        let mut m = mapper();
        m.set_zoom(2.0).unwrap();
        let before = m.viewport();
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(m.set_zoom(bad), Err(GraphError::InvalidZoom(_))));
            assert_eq!(m.viewport(), before);
            assert_eq!(m.zoom_level(), 2.0);
            assert_eq!(m.tick_spacing(), 10.0);
        }
    }

    #[test]
    fn test_set_zoom_returns_previous_viewport() {
        let mut m = mapper();
        let prev = m.set_zoom(4.0).unwrap();
        assert_eq!(prev.scale, 20.0);
        assert_eq!(m.scale(), 5.0);
    }

    #[test]
    fn test_resize_keeps_view_centered() {
        let mut m = mapper();
        let prev = m.resize(800.0, 600.0).unwrap();
        assert_eq!(prev.width, 640.0);
        assert_eq!(m.origin(), PointD::new(400.0, 300.0));
        assert_eq!(m.canvas_width(), 800.0);
        // Zooming back to 1 uses the shifted unzoomed origin
        m.set_zoom(2.0).unwrap();
        m.set_zoom(1.0).unwrap();
        assert_eq!(m.origin(), PointD::new(400.0, 300.0));
    }

    #[test]
    fn test_resize_rejects_invalid() {
        let mut m = mapper();
        assert!(m.resize(0.0, 100.0).is_err());
        assert!(m.resize(100.0, f64::NAN).is_err());
        assert_eq!(m.canvas_width(), 640.0);
    }
}
