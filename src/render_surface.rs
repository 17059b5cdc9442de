//! Drawing seam between curve geometry and a concrete backend.
//!
//! A surface consumes paths and regions through the [`VertexSource`]
//! protocol, one call per subpath or region, in the order
//! [`draw_geometry`] issues them: fills first, strokes on top.

use crate::basics::{collect_polygons, PointD, VertexSource};
use crate::color::Rgba8;
use crate::curve_model::CurveStyle;
use crate::math::point_in_polygon;
use crate::path_storage::{CurveGeometry, FillSide};

// ============================================================================
// RenderSurface
// ============================================================================

pub trait RenderSurface {
    /// Stroke an open polyline.
    fn stroke(&mut self, path: &mut dyn VertexSource, color: Rgba8, width: f64);

    /// Fill closed polygons with the even-odd rule.
    fn fill(&mut self, region: &mut dyn VertexSource, color: Rgba8);

    /// Whether (x, y) lies inside `region`.
    fn hit_test(&mut self, region: &mut dyn VertexSource, x: f64, y: f64) -> bool {
        collect_polygons(region, 0)
            .iter()
            .any(|poly| point_in_polygon(poly, x, y))
    }
}

/// Color for a region under `style`. Right of an `x = f(y)` curve counts as
/// above; closed curves fill their interior with the above color.
fn region_color(style: &CurveStyle, side: FillSide) -> Option<Rgba8> {
    match side {
        FillSide::Above | FillSide::Right | FillSide::Interior => style.fill_above,
        FillSide::Below | FillSide::Left => style.fill_below,
    }
}

/// Fill every configured region of `geometry`, then stroke each subpath.
pub fn draw_geometry(surface: &mut dyn RenderSurface, geometry: &CurveGeometry, style: &CurveStyle) {
    for region in &geometry.regions {
        if region.is_empty() {
            continue;
        }
        if let Some(color) = region_color(style, region.side()) {
            surface.fill(&mut region.vertices(), color);
        }
    }
    for i in 0..geometry.path.subpath_count() {
        surface.stroke(
            &mut geometry.path.subpath_vertices(i),
            style.stroke,
            style.line_width,
        );
    }
}

// ============================================================================
// RecordingSurface
// ============================================================================

/// One call received by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Stroke {
        polylines: Vec<Vec<PointD>>,
        color: Rgba8,
        width: f64,
    },
    Fill {
        polygons: Vec<Vec<PointD>>,
        color: Rgba8,
    },
}

/// Surface that stores every call's vertices instead of rasterizing them.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn stroke_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Stroke { .. }))
            .count()
    }

    pub fn fill_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Fill { .. }))
            .count()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl RenderSurface for RecordingSurface {
    fn stroke(&mut self, path: &mut dyn VertexSource, color: Rgba8, width: f64) {
        self.ops.push(SurfaceOp::Stroke {
            polylines: collect_polygons(path, 0),
            color,
            width,
        });
    }

    fn fill(&mut self, region: &mut dyn VertexSource, color: Rgba8) {
        self.ops.push(SurfaceOp::Fill {
            polygons: collect_polygons(region, 0),
            color,
        });
    }
}

// ============================================================================
// Tests
// ============================================================================
