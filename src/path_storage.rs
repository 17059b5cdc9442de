//! Screen-space geometry produced by the path builder.
//!
//! A [`Path`] is an ordered list of subpaths (polylines in screen pixels)
//! plus a `continuous` flag. A [`FillRegion`] is a set of closed polygons
//! that extend subpaths to canvas edges for shading. Both expose their
//! vertices through [`VertexSource`] adaptors so a render surface never sees
//! the storage directly.

use crate::basics::{
    PointD, VertexSource, PATH_CMD_END_POLY, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP,
    PATH_FLAGS_CLOSE,
};
use crate::math::{point_in_polygon, polyline_hit};

// ============================================================================
// Path
// ============================================================================

/// Ordered subpaths of screen points.
///
/// `continuous` is false once the builder detected any discontinuity
/// (asymptote or failed sample) while producing this path.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    subpaths: Vec<Vec<PointD>>,
    continuous: bool,
}

impl Default for Path {
    fn default() -> Self {
        Self::new()
    }
}

impl Path {
    pub fn new() -> Self {
        Self {
            subpaths: Vec::new(),
            continuous: true,
        }
    }

    // ---------------------------------------------------------------
    // Construction (builder only)
    // ---------------------------------------------------------------

    /// Begin a new subpath at `p`.
    pub(crate) fn move_to(&mut self, p: PointD) {
        self.subpaths.push(vec![p]);
    }

    /// Extend the current subpath, or begin one if there is none.
    pub(crate) fn line_to(&mut self, p: PointD) {
        match self.subpaths.last_mut() {
            Some(sub) => sub.push(p),
            None => self.subpaths.push(vec![p]),
        }
    }

    pub(crate) fn mark_discontinuous(&mut self) {
        self.continuous = false;
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    pub fn subpaths(&self) -> &[Vec<PointD>] {
        &self.subpaths
    }

    pub fn is_continuous(&self) -> bool {
        self.continuous
    }

    pub fn subpath_count(&self) -> usize {
        self.subpaths.len()
    }

    pub fn point_count(&self) -> usize {
        self.subpaths.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    /// All points in order, across subpaths.
    pub fn points(&self) -> impl Iterator<Item = &PointD> {
        self.subpaths.iter().flatten()
    }

    pub fn first_point(&self) -> Option<PointD> {
        self.subpaths.first().and_then(|s| s.first()).copied()
    }

    pub fn last_point(&self) -> Option<PointD> {
        self.subpaths.last().and_then(|s| s.last()).copied()
    }

    /// True when (x, y) is within `tolerance` pixels of any subpath.
    pub fn hit_test(&self, x: f64, y: f64, tolerance: f64) -> bool {
        self.subpaths
            .iter()
            .any(|sub| polyline_hit(sub, x, y, tolerance))
    }

    /// Vertex-source view: one move_to per subpath followed by line_tos.
    pub fn vertices(&self) -> PathVertices<'_> {
        PathVertices::new(&self.subpaths, false)
    }

    /// Vertex-source view of a single subpath.
    pub fn subpath_vertices(&self, idx: usize) -> PathVertices<'_> {
        let n = self.subpaths.len();
        let range = idx.min(n)..idx.saturating_add(1).min(n);
        PathVertices::new(&self.subpaths[range], false)
    }
}

// ============================================================================
// FillRegion
// ============================================================================

/// Which side of a curve a fill region shades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillSide {
    Above,
    Below,
    Left,
    Right,
    Interior,
}

/// Closed polygons bounding the area between a curve and canvas edges
/// (or a closed curve's interior). One polygon per subpath.
#[derive(Debug, Clone, PartialEq)]
pub struct FillRegion {
    side: FillSide,
    polygons: Vec<Vec<PointD>>,
}

impl FillRegion {
    pub fn new(side: FillSide) -> Self {
        Self {
            side,
            polygons: Vec::new(),
        }
    }

    pub(crate) fn add_polygon(&mut self, poly: Vec<PointD>) {
        if poly.len() >= 3 {
            self.polygons.push(poly);
        }
    }

    pub fn side(&self) -> FillSide {
        self.side
    }

    pub fn polygons(&self) -> &[Vec<PointD>] {
        &self.polygons
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Even-odd containment against every polygon of the region.
    pub fn hit_test(&self, x: f64, y: f64) -> bool {
        self.polygons.iter().any(|p| point_in_polygon(p, x, y))
    }

    /// Vertex-source view; each polygon is closed with `end_poly | close`.
    pub fn vertices(&self) -> PathVertices<'_> {
        PathVertices::new(&self.polygons, true)
    }
}

// ============================================================================
// CurveGeometry
// ============================================================================

/// One build's output: a path and up to two fill regions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurveGeometry {
    pub path: Path,
    pub regions: Vec<FillRegion>,
}

impl CurveGeometry {
    pub fn region(&self, side: FillSide) -> Option<&FillRegion> {
        self.regions.iter().find(|r| r.side == side)
    }
}

// ============================================================================
// PathVertices
// ============================================================================

/// Borrowing vertex source over a list of polylines.
pub struct PathVertices<'a> {
    polys: &'a [Vec<PointD>],
    closed: bool,
    poly: usize,
    vertex: usize,
}

impl<'a> PathVertices<'a> {
    fn new(polys: &'a [Vec<PointD>], closed: bool) -> Self {
        Self {
            polys,
            closed,
            poly: 0,
            vertex: 0,
        }
    }
}

impl VertexSource for PathVertices<'_> {
    fn rewind(&mut self, _path_id: u32) {
        self.poly = 0;
        self.vertex = 0;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        loop {
            let Some(poly) = self.polys.get(self.poly) else {
                return PATH_CMD_STOP;
            };
            if self.vertex < poly.len() {
                let p = poly[self.vertex];
                *x = p.x;
                *y = p.y;
                self.vertex += 1;
                return if self.vertex == 1 {
                    PATH_CMD_MOVE_TO
                } else {
                    PATH_CMD_LINE_TO
                };
            }
            let close = self.closed && self.vertex == poly.len() && !poly.is_empty();
            self.poly += 1;
            self.vertex = 0;
            if close {
                return PATH_CMD_END_POLY | PATH_FLAGS_CLOSE;
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::{collect_polygons, is_close, is_stop};

    fn drain(vs: &mut dyn VertexSource) -> Vec<(u32, f64, f64)> {
        let mut out = Vec::new();
        let (mut x, mut y) = (0.0, 0.0);
        vs.rewind(0);
        loop {
            let cmd = vs.vertex(&mut x, &mut y);
            if is_stop(cmd) {
                break;
            }
            out.push((cmd, x, y));
        }
        out
    }

    #[test]
    fn test_path_construction() {
        let mut p = Path::new();
        assert!(p.is_empty());
        assert!(p.is_continuous());
        p.line_to(PointD::new(0.0, 0.0));
        p.line_to(PointD::new(1.0, 1.0));
        p.mark_discontinuous();
        p.move_to(PointD::new(5.0, 5.0));
        p.line_to(PointD::new(6.0, 5.0));
        assert_eq!(p.subpath_count(), 2);
        assert_eq!(p.point_count(), 4);
        assert!(!p.is_continuous());
        assert_eq!(p.first_point(), Some(PointD::new(0.0, 0.0)));
        assert_eq!(p.last_point(), Some(PointD::new(6.0, 5.0)));
    }

    #[test]
    fn test_path_vertices() {
        let mut p = Path::new();
        p.move_to(PointD::new(0.0, 0.0));
        p.line_to(PointD::new(1.0, 0.0));
        p.move_to(PointD::new(2.0, 2.0));
        let v = drain(&mut p.vertices());
        assert_eq!(
            v,
            vec![
                (PATH_CMD_MOVE_TO, 0.0, 0.0),
                (PATH_CMD_LINE_TO, 1.0, 0.0),
                (PATH_CMD_MOVE_TO, 2.0, 2.0),
            ]
        );
        let v = drain(&mut p.subpath_vertices(1));
        assert_eq!(v, vec![(PATH_CMD_MOVE_TO, 2.0, 2.0)]);
        assert!(drain(&mut p.subpath_vertices(7)).is_empty());
    }

    #[test]
    fn test_subpath_vertices_out_of_range() {
        let mut p = Path::new();
        p.move_to(PointD::new(0.0, 0.0));
        p.line_to(PointD::new(1.0, 1.0));
        assert!(drain(&mut p.subpath_vertices(usize::MAX)).is_empty());
        assert!(drain(&mut Path::new().subpath_vertices(0)).is_empty());
    }

    #[test]
    fn test_region_vertices_close_each_polygon() {
        let mut r = FillRegion::new(FillSide::Below);
        r.add_polygon(vec![
            PointD::new(0.0, 0.0),
            PointD::new(4.0, 0.0),
            PointD::new(4.0, 4.0),
        ]);
        r.add_polygon(vec![PointD::new(0.0, 0.0), PointD::new(1.0, 0.0)]);
        assert_eq!(r.polygons().len(), 1);
        let v = drain(&mut r.vertices());
        assert_eq!(v.len(), 4);
        assert!(is_close(v[3].0));
        assert_eq!(collect_polygons(&mut r.vertices(), 0), r.polygons().to_vec());
    }

    #[test]
    fn test_hit_tests() {
        let mut p = Path::new();
        p.move_to(PointD::new(0.0, 10.0));
        p.line_to(PointD::new(100.0, 10.0));
        assert!(p.hit_test(50.0, 11.0, 2.0));
        assert!(!p.hit_test(50.0, 20.0, 2.0));

        let mut r = FillRegion::new(FillSide::Below);
        r.add_polygon(vec![
            PointD::new(0.0, 10.0),
            PointD::new(100.0, 10.0),
            PointD::new(100.0, 50.0),
            PointD::new(0.0, 50.0),
        ]);
        assert!(r.hit_test(50.0, 30.0));
        assert!(!r.hit_test(50.0, 5.0));

        let g = CurveGeometry {
            path: p,
            regions: vec![r],
        };
        assert!(g.region(FillSide::Below).is_some());
        assert!(g.region(FillSide::Above).is_none());
    }
}
