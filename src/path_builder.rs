//! Curve sampling into screen-space paths and fill regions.
//!
//! The builder takes one [`Viewport`] snapshot and produces a fresh,
//! immutable [`CurveGeometry`] per call:
//!
//! - **Explicit y = f(x)**: one sample per screen column across the visible
//!   part of the domain. Consecutive samples that straddle the canvas (one
//!   above the top edge, the other below the bottom edge) are an asymptote
//!   and start a new subpath. Above/Below regions close each subpath along
//!   the top/bottom canvas edge.
//! - **Explicit x = f(y)**: the same per screen row, with Left/Right regions.
//! - **Polar r = f(θ)**: fixed θ steps over the θ domain, traced into one
//!   closed interior polygon.
//! - **Parametric (x, y) = f(t)**: seeded at the start of the t domain, then
//!   fixed t steps up to the end; also closed into an interior polygon.
//!
//! A sample whose evaluator returns a non-finite value (or panics) breaks
//! the path for every curve family. Only explicit curves are additionally
//! split at asymptotes, since polar and parametric samples have no sweep
//! axis to straddle.

use log::{trace, warn};

use crate::basics::PointD;
use crate::coord_mapper::Viewport;
use crate::curve_model::{Axis, CurveKind, CurveModel};
use crate::path_storage::{CurveGeometry, FillRegion, FillSide, Path};

/// Extra pixels around half the line width that still count as "on" the
/// stroke.
pub const STROKE_HIT_TOLERANCE: f64 = 1.0;

/// Upper bound on samples per polar/parametric build.
pub const MAX_CURVE_SAMPLES: u64 = 1 << 20;

/// Absorbs rounding when dividing a domain span by its step.
const STEP_EPSILON: f64 = 1e-9;

/// Where a point lies relative to a built curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurvePosition {
    On,
    Above,
    Below,
    Left,
    Right,
    Inside,
    Outside,
    Unknown,
}

/// Sampling direction for explicit curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sweep {
    /// y = f(x): walk screen columns, test y against the canvas height.
    Columns,
    /// x = f(y): walk screen rows, test x against the canvas width.
    Rows,
}

/// Samples curve models against a fixed viewport.
#[derive(Debug, Clone, Copy)]
pub struct PathBuilder {
    vp: Viewport,
}

impl PathBuilder {
    pub fn new(vp: Viewport) -> Self {
        Self { vp }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.vp
    }

    /// Build the path and fill regions for `model`.
    pub fn build(&self, model: &CurveModel) -> CurveGeometry {
        let geometry = match model.kind() {
            CurveKind::ExplicitY(_) => self.build_explicit(model, Sweep::Columns),
            CurveKind::ExplicitX(_) => self.build_explicit(model, Sweep::Rows),
            CurveKind::Polar(_) => self.build_closed(model, Axis::Theta, model.sample_theta_step(), false),
            CurveKind::Parametric(_) => self.build_closed(model, Axis::T, model.sample_t_step(), true),
        };
        trace!(
            "built {} curve: {} subpaths, {} points, continuous={}",
            model.kind().name(),
            geometry.path.subpath_count(),
            geometry.path.point_count(),
            geometry.path.is_continuous()
        );
        geometry
    }

    // ---------------------------------------------------------------
    // Explicit curves
    // ---------------------------------------------------------------

    fn build_explicit(&self, model: &CurveModel, sweep: Sweep) -> CurveGeometry {
        let vp = &self.vp;
        let (low_side, high_side) = match sweep {
            Sweep::Columns => (FillSide::Above, FillSide::Below),
            Sweep::Rows => (FillSide::Left, FillSide::Right),
        };
        let mut path = Path::new();

        let axis = model.active_axis();
        if !model.bounds().is_degenerate(axis) {
            let (start, end) = model.bounds().range(axis);
            // Pixel span of the domain clipped to the canvas. Rows run from
            // the top edge down, so real y decreases along the sweep.
            let (lo, hi, limit) = match sweep {
                Sweep::Columns => (
                    vp.real_to_screen_x(start).max(0.0),
                    vp.real_to_screen_x(end).min(vp.width),
                    vp.height,
                ),
                Sweep::Rows => (
                    vp.real_to_screen_y(end).max(0.0),
                    vp.real_to_screen_y(start).min(vp.height),
                    vp.width,
                ),
            };
            let to_real = |px: f64| match sweep {
                Sweep::Columns => vp.screen_to_real_x(px),
                Sweep::Rows => vp.screen_to_real_y(px),
            };
            let cross = |p: &PointD| match sweep {
                Sweep::Columns => p.y,
                Sweep::Rows => p.x,
            };

            let mut prev: Option<PointD> = None;
            for px in pixel_steps(lo, hi) {
                match model.evaluate_screen(to_real(px), vp) {
                    None => {
                        path.mark_discontinuous();
                        prev = None;
                    }
                    Some(p) => {
                        match prev {
                            None => path.move_to(p),
                            Some(q) if straddles(cross(&q), cross(&p), limit) => {
                                path.mark_discontinuous();
                                path.move_to(p);
                            }
                            Some(_) => path.line_to(p),
                        }
                        prev = Some(p);
                    }
                }
            }
        }

        let mut low = FillRegion::new(low_side);
        let mut high = FillRegion::new(high_side);
        for sub in path.subpaths() {
            let (Some(first), Some(last)) = (sub.first(), sub.last()) else {
                continue;
            };
            let (low_edge, high_edge) = match sweep {
                Sweep::Columns => (
                    [PointD::new(last.x, 0.0), PointD::new(first.x, 0.0)],
                    [PointD::new(last.x, vp.height), PointD::new(first.x, vp.height)],
                ),
                Sweep::Rows => (
                    [PointD::new(0.0, last.y), PointD::new(0.0, first.y)],
                    [PointD::new(vp.width, last.y), PointD::new(vp.width, first.y)],
                ),
            };
            low.add_polygon(sub.iter().copied().chain(low_edge).collect());
            high.add_polygon(sub.iter().copied().chain(high_edge).collect());
        }

        CurveGeometry {
            path,
            regions: vec![low, high],
        }
    }

    // ---------------------------------------------------------------
    // Polar and parametric curves
    // ---------------------------------------------------------------

    fn build_closed(&self, model: &CurveModel, axis: Axis, step: f64, seeded: bool) -> CurveGeometry {
        let vp = &self.vp;
        let (start, end) = model.bounds().range(axis);
        let mut path = Path::new();

        // A failed sample ends the current subpath; the next good one
        // starts a new subpath instead of bridging the gap.
        let mut broken = true;
        let mut push = |path: &mut Path, sample: Option<PointD>| match sample {
            Some(p) if broken => {
                path.move_to(p);
                broken = false;
            }
            Some(p) => path.line_to(p),
            None => {
                path.mark_discontinuous();
                broken = true;
            }
        };

        if seeded {
            push(&mut path, model.evaluate_screen(start, vp));
        }

        if !model.bounds().is_degenerate(axis) {
            let mut steps = ((end - start) / step + STEP_EPSILON).floor() as u64;
            if steps > MAX_CURVE_SAMPLES {
                warn!(
                    "{} curve needs {} samples, truncating to {}",
                    model.kind().name(),
                    steps,
                    MAX_CURVE_SAMPLES
                );
                steps = MAX_CURVE_SAMPLES;
            }
            let first = if seeded { 1 } else { 0 };
            for i in first..=steps {
                push(&mut path, model.evaluate_screen(start + i as f64 * step, vp));
            }
        }

        let mut interior = FillRegion::new(FillSide::Interior);
        for sub in path.subpaths() {
            interior.add_polygon(sub.clone());
        }
        CurveGeometry {
            path,
            regions: vec![interior],
        }
    }

    // ---------------------------------------------------------------
    // Classification
    // ---------------------------------------------------------------

    /// Classify the screen point (x, y) against a curve built by this
    /// builder.
    ///
    /// Continuous geometry is tested against the stroke and then the fill
    /// regions. A discontinuous explicit curve cannot trust its regions
    /// (they stop at each break), so the curve is evaluated directly at the
    /// point's real coordinate instead.
    pub fn position_of(
        &self,
        model: &CurveModel,
        geometry: &CurveGeometry,
        x: f64,
        y: f64,
    ) -> CurvePosition {
        let vp = &self.vp;
        let tolerance = model.curve_style().line_width * 0.5 + STROKE_HIT_TOLERANCE;
        let kind = model.kind();

        if geometry.path.is_continuous() || !kind.detects_discontinuities() {
            if geometry.path.hit_test(x, y, tolerance) {
                return CurvePosition::On;
            }
            let hit = |side| geometry.region(side).is_some_and(|r| r.hit_test(x, y));
            return match kind {
                CurveKind::ExplicitY(_) if hit(FillSide::Above) => CurvePosition::Above,
                CurveKind::ExplicitY(_) if hit(FillSide::Below) => CurvePosition::Below,
                CurveKind::ExplicitX(_) if hit(FillSide::Right) => CurvePosition::Right,
                CurveKind::ExplicitX(_) if hit(FillSide::Left) => CurvePosition::Left,
                CurveKind::ExplicitY(_) | CurveKind::ExplicitX(_) => CurvePosition::Unknown,
                CurveKind::Polar(_) | CurveKind::Parametric(_) if hit(FillSide::Interior) => {
                    CurvePosition::Inside
                }
                CurveKind::Polar(_) | CurveKind::Parametric(_) => CurvePosition::Outside,
            };
        }

        match kind {
            CurveKind::ExplicitY(_) => {
                let Some(fy) = model.evaluate_real(vp.screen_to_real_x(x)) else {
                    return CurvePosition::Unknown;
                };
                let curve_y = vp.real_to_screen_y(fy);
                if (y - curve_y).abs() <= tolerance {
                    CurvePosition::On
                } else if y < curve_y {
                    CurvePosition::Above
                } else {
                    CurvePosition::Below
                }
            }
            CurveKind::ExplicitX(_) => {
                let Some(fx) = model.evaluate_real(vp.screen_to_real_y(y)) else {
                    return CurvePosition::Unknown;
                };
                let curve_x = vp.real_to_screen_x(fx);
                if (x - curve_x).abs() <= tolerance {
                    CurvePosition::On
                } else if x > curve_x {
                    CurvePosition::Right
                } else {
                    CurvePosition::Left
                }
            }
            CurveKind::Polar(_) | CurveKind::Parametric(_) => CurvePosition::Unknown,
        }
    }
}

/// One value per pixel from `lo`, plus `hi` itself when the span is not a
/// whole number of pixels. Empty when `hi < lo`.
fn pixel_steps(lo: f64, hi: f64) -> impl Iterator<Item = f64> {
    let span = hi - lo;
    let whole = if span >= 0.0 {
        (span + STEP_EPSILON).floor() as u64
    } else {
        0
    };
    let tail = span >= 0.0 && span - whole as f64 > STEP_EPSILON;
    let body = if span >= 0.0 { 0..=whole } else { 1..=0 };
    body.map(move |i| lo + i as f64).chain(tail.then_some(hi))
}

/// One coordinate beyond the low edge and the other beyond `limit`.
#[inline]
fn straddles(a: f64, b: f64, limit: f64) -> bool {
    (a < 0.0 && b > limit) || (a > limit && b < 0.0)
}

// ============================================================================
// Tests
// ============================================================================
