//! Geometric math utilities.
//!
//! Point/segment distances and the polygon and polyline hit tests used to
//! classify points against built curves.

use crate::basics::PointD;

/// Coinciding points maximal distance (epsilon).
pub const VERTEX_DIST_EPSILON: f64 = 1e-14;

// ============================================================================
// Distances
// ============================================================================

/// Squared Euclidean distance between two points.
#[inline]
pub fn calc_sq_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    dx * dx + dy * dy
}

/// Squared distance from point (x, y) to the closest point on segment
/// (x1,y1)→(x2,y2).
#[inline]
pub fn calc_segment_point_sq_distance(x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    if dx.abs() < VERTEX_DIST_EPSILON && dy.abs() < VERTEX_DIST_EPSILON {
        return calc_sq_distance(x, y, x1, y1);
    }
    let u = ((x - x1) * dx + (y - y1) * dy) / (dx * dx + dy * dy);
    if u <= 0.0 {
        calc_sq_distance(x, y, x1, y1)
    } else if u >= 1.0 {
        calc_sq_distance(x, y, x2, y2)
    } else {
        calc_sq_distance(x, y, x1 + u * dx, y1 + u * dy)
    }
}

// ============================================================================
// Hit tests
// ============================================================================

/// Even-odd crossing test of (x, y) against a polygon. The polygon is
/// implicitly closed; fewer than three vertices never contain anything.
pub fn point_in_polygon(poly: &[PointD], x: f64, y: f64) -> bool {
    if poly.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = poly.len() - 1;
    for i in 0..poly.len() {
        let (pi, pj) = (poly[i], poly[j]);
        if (pi.y > y) != (pj.y > y) {
            let x_cross = pj.x + (y - pj.y) * (pi.x - pj.x) / (pi.y - pj.y);
            if x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// True when (x, y) lies within `tolerance` of any segment of the polyline.
/// A single-point polyline is tested as a dot.
pub fn polyline_hit(points: &[PointD], x: f64, y: f64, tolerance: f64) -> bool {
    let tol_sq = tolerance * tolerance;
    match points {
        [] => false,
        [p] => calc_sq_distance(p.x, p.y, x, y) <= tol_sq,
        _ => points
            .windows(2)
            .any(|w| calc_segment_point_sq_distance(w[0].x, w[0].y, w[1].x, w[1].y, x, y) <= tol_sq),
    }
}

// ============================================================================
// Tests
// ============================================================================
