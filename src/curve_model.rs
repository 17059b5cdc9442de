//! Declarative description of one drawable curve.
//!
//! A `CurveModel` carries the curve family and its evaluator, the domain
//! bounds on every axis (with an additive velocity for animation), the
//! sampling steps, and the stroke/fill style. The family is resolved once at
//! construction into a [`CurveKind`] variant; nothing downstream re-checks a
//! type tag per sample.

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use log::{trace, warn};

use crate::basics::{PointD, TWO_PI};
use crate::color::Rgba8;
use crate::coord_mapper::Viewport;
use crate::trans_polar::from_polar;

pub const DEFAULT_THETA_STEP: f64 = TWO_PI / 360.0;
pub const DEFAULT_T_STEP: f64 = 0.01;
pub const DEFAULT_LINE_WIDTH: f64 = 2.0;

/// Scalar evaluator: `x → y`, `y → x`, or `θ → r`.
pub type ScalarFn = Box<dyn Fn(f64) -> f64>;
/// Parametric evaluator: `t → (x, y)`.
pub type PointFn = Box<dyn Fn(f64) -> PointD>;

// ============================================================================
// CurveKind
// ============================================================================

/// Curve family with its evaluator.
pub enum CurveKind {
    /// `y = f(x)`
    ExplicitY(ScalarFn),
    /// `x = f(y)`
    ExplicitX(ScalarFn),
    /// `r = f(θ)`
    Polar(ScalarFn),
    /// `(x, y) = f(t)`
    Parametric(PointFn),
}

impl CurveKind {
    pub fn name(&self) -> &'static str {
        match self {
            CurveKind::ExplicitY(_) => "explicit-y",
            CurveKind::ExplicitX(_) => "explicit-x",
            CurveKind::Polar(_) => "polar",
            CurveKind::Parametric(_) => "parametric",
        }
    }

    /// The axis the path builder iterates over.
    pub fn active_axis(&self) -> Axis {
        match self {
            CurveKind::ExplicitY(_) => Axis::X,
            CurveKind::ExplicitX(_) => Axis::Y,
            CurveKind::Polar(_) => Axis::Theta,
            CurveKind::Parametric(_) => Axis::T,
        }
    }

    /// Only explicit curves can jump across the canvas between samples.
    pub fn detects_discontinuities(&self) -> bool {
        matches!(self, CurveKind::ExplicitY(_) | CurveKind::ExplicitX(_))
    }
}

impl fmt::Debug for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurveKind::{}", self.name())
    }
}

// ============================================================================
// Axis bounds
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    R,
    Theta,
    T,
}

/// One value per domain axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AxisValues {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub theta: f64,
    pub t: f64,
}

impl AxisValues {
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::R => self.r,
            Axis::Theta => self.theta,
            Axis::T => self.t,
        }
    }

    pub fn set(&mut self, axis: Axis, v: f64) {
        match axis {
            Axis::X => self.x = v,
            Axis::Y => self.y = v,
            Axis::R => self.r = v,
            Axis::Theta => self.theta = v,
            Axis::T => self.t = v,
        }
    }

    /// `self += other * k` on every axis.
    pub fn add_scaled(&mut self, other: &AxisValues, k: f64) {
        self.x += other.x * k;
        self.y += other.y * k;
        self.r += other.r * k;
        self.theta += other.theta * k;
        self.t += other.t * k;
    }

    pub fn is_zero(&self) -> bool {
        *self == AxisValues::default()
    }
}

/// Start and end values per axis. Used both for the domain and for its
/// per-tick velocity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Bounds {
    pub start: AxisValues,
    pub end: AxisValues,
}

impl Bounds {
    /// Explicit axes unbounded, θ over one turn, t over [0, 1], r from 0.
    pub fn default_domain() -> Self {
        Self {
            start: AxisValues {
                x: f64::NEG_INFINITY,
                y: f64::NEG_INFINITY,
                r: 0.0,
                theta: 0.0,
                t: 0.0,
            },
            end: AxisValues {
                x: f64::INFINITY,
                y: f64::INFINITY,
                r: f64::INFINITY,
                theta: TWO_PI,
                t: 1.0,
            },
        }
    }

    pub fn range(&self, axis: Axis) -> (f64, f64) {
        (self.start.get(axis), self.end.get(axis))
    }

    pub fn set_range(&mut self, axis: Axis, start: f64, end: f64) {
        self.start.set(axis, start);
        self.end.set(axis, end);
    }

    /// End ≤ start (or either is NaN) on the axis.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn is_degenerate(&self, axis: Axis) -> bool {
        let (s, e) = self.range(axis);
        !(e > s)
    }
}

// ============================================================================
// CurveStyle
// ============================================================================

/// Stroke and fill appearance.
///
/// For `ExplicitX` curves "above" means right of the curve and "below"
/// means left. Closed curves (polar, parametric) fill their interior with
/// `fill_above`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CurveStyle {
    pub stroke: Rgba8,
    pub line_width: f64,
    pub fill_above: Option<Rgba8>,
    pub fill_below: Option<Rgba8>,
}

impl Default for CurveStyle {
    fn default() -> Self {
        Self {
            stroke: Rgba8::BLACK,
            line_width: DEFAULT_LINE_WIDTH,
            fill_above: None,
            fill_below: None,
        }
    }
}

// ============================================================================
// CurveModel
// ============================================================================

pub struct CurveModel {
    kind: CurveKind,
    bounds: Bounds,
    velocity: Bounds,
    theta_step: f64,
    t_step: f64,
    style: CurveStyle,
    is_static: bool,
}

impl fmt::Debug for CurveModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurveModel")
            .field("kind", &self.kind)
            .field("bounds", &self.bounds)
            .field("velocity", &self.velocity)
            .field("theta_step", &self.theta_step)
            .field("t_step", &self.t_step)
            .field("style", &self.style)
            .field("is_static", &self.is_static)
            .finish()
    }
}

impl CurveModel {
    pub fn new(kind: CurveKind) -> Self {
        Self {
            kind,
            bounds: Bounds::default_domain(),
            velocity: Bounds::default(),
            theta_step: DEFAULT_THETA_STEP,
            t_step: DEFAULT_T_STEP,
            style: CurveStyle::default(),
            is_static: false,
        }
    }

    /// `y = f(x)`.
    pub fn explicit_y<F: Fn(f64) -> f64 + 'static>(f: F) -> Self {
        Self::new(CurveKind::ExplicitY(Box::new(f)))
    }

    /// `x = f(y)`.
    pub fn explicit_x<F: Fn(f64) -> f64 + 'static>(f: F) -> Self {
        Self::new(CurveKind::ExplicitX(Box::new(f)))
    }

    /// `r = f(θ)`.
    pub fn polar<F: Fn(f64) -> f64 + 'static>(f: F) -> Self {
        Self::new(CurveKind::Polar(Box::new(f)))
    }

    /// `(x, y) = f(t)`.
    pub fn parametric<F: Fn(f64) -> PointD + 'static>(f: F) -> Self {
        Self::new(CurveKind::Parametric(Box::new(f)))
    }

    // ---------------------------------------------------------------
    // Builder setters
    // ---------------------------------------------------------------

    pub fn domain_x(mut self, start: f64, end: f64) -> Self {
        self.bounds.set_range(Axis::X, start, end);
        self
    }

    pub fn domain_y(mut self, start: f64, end: f64) -> Self {
        self.bounds.set_range(Axis::Y, start, end);
        self
    }

    pub fn domain_r(mut self, start: f64, end: f64) -> Self {
        self.bounds.set_range(Axis::R, start, end);
        self
    }

    pub fn domain_theta(mut self, start: f64, end: f64) -> Self {
        self.bounds.set_range(Axis::Theta, start, end);
        self
    }

    pub fn domain_t(mut self, start: f64, end: f64) -> Self {
        self.bounds.set_range(Axis::T, start, end);
        self
    }

    /// Per-tick change of the domain bounds.
    pub fn velocity(mut self, velocity: Bounds) -> Self {
        self.velocity = velocity;
        self
    }

    /// Polar sampling step in radians. Non-positive or non-finite steps are
    /// ignored.
    pub fn theta_step(mut self, step: f64) -> Self {
        if step.is_finite() && step > 0.0 {
            self.theta_step = step;
        } else {
            warn!("ignoring theta step {}", step);
        }
        self
    }

    /// Parametric sampling step. Non-positive or non-finite steps are
    /// ignored.
    pub fn t_step(mut self, step: f64) -> Self {
        if step.is_finite() && step > 0.0 {
            self.t_step = step;
        } else {
            warn!("ignoring t step {}", step);
        }
        self
    }

    pub fn style(mut self, style: CurveStyle) -> Self {
        self.style = style;
        self
    }

    pub fn stroke(mut self, color: Rgba8) -> Self {
        self.style.stroke = color;
        self
    }

    pub fn line_width(mut self, width: f64) -> Self {
        self.style.line_width = width;
        self
    }

    pub fn fill_above(mut self, color: Rgba8) -> Self {
        self.style.fill_above = Some(color);
        self
    }

    pub fn fill_below(mut self, color: Rgba8) -> Self {
        self.style.fill_below = Some(color);
        self
    }

    /// Mark the curve's geometry as immutable so it is built once and
    /// cached. Static curves must not carry a nonzero end-bound velocity.
    pub fn static_path(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    // ---------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------

    pub fn kind(&self) -> &CurveKind {
        &self.kind
    }

    pub fn active_axis(&self) -> Axis {
        self.kind.active_axis()
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn velocity_bounds(&self) -> &Bounds {
        &self.velocity
    }

    pub fn sample_theta_step(&self) -> f64 {
        self.theta_step
    }

    pub fn sample_t_step(&self) -> f64 {
        self.t_step
    }

    pub fn curve_style(&self) -> &CurveStyle {
        &self.style
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    // ---------------------------------------------------------------
    // Evaluation
    // ---------------------------------------------------------------

    /// Run one evaluator call, turning a panic into `None`.
    fn guarded<T>(&self, input: f64, eval: impl FnOnce() -> T) -> Option<T> {
        match catch_unwind(AssertUnwindSafe(eval)) {
            Ok(v) => Some(v),
            Err(_) => {
                trace!("{} evaluator panicked at {}", self.kind.name(), input);
                None
            }
        }
    }

    /// Evaluate the curve at `input` on its active axis and map the result
    /// to screen space. `None` when the evaluator yields a non-finite value
    /// or panics.
    pub fn evaluate_screen(&self, input: f64, vp: &Viewport) -> Option<PointD> {
        self.guarded(input, || self.map_to_screen(input, vp)).flatten()
    }

    fn map_to_screen(&self, input: f64, vp: &Viewport) -> Option<PointD> {
        let p = match &self.kind {
            CurveKind::ExplicitY(f) => {
                PointD::new(vp.real_to_screen_x(input), vp.real_to_screen_y(f(input)))
            }
            CurveKind::ExplicitX(f) => {
                PointD::new(vp.real_to_screen_x(f(input)), vp.real_to_screen_y(input))
            }
            CurveKind::Polar(f) => {
                let (dx, dy) = from_polar(f(input) * vp.scale, input);
                PointD::new(vp.origin.x + dx, vp.origin.y - dy)
            }
            CurveKind::Parametric(f) => {
                let r = f(input);
                PointD {
                    x: vp.real_to_screen_x(r.x),
                    y: vp.real_to_screen_y(r.y),
                    z: r.z,
                }
            }
        };
        if p.is_finite() {
            Some(p)
        } else {
            None
        }
    }

    /// Evaluate a scalar curve in real space. `None` for parametric curves,
    /// for non-finite results, and when the evaluator panics.
    pub fn evaluate_real(&self, input: f64) -> Option<f64> {
        let v = match &self.kind {
            CurveKind::ExplicitY(f) | CurveKind::ExplicitX(f) | CurveKind::Polar(f) => {
                self.guarded(input, || f(input))?
            }
            CurveKind::Parametric(_) => return None,
        };
        if v.is_finite() {
            Some(v)
        } else {
            None
        }
    }

    // ---------------------------------------------------------------
    // Bounds maintenance
    // ---------------------------------------------------------------

    /// Advance every bound by its velocity times `tick`. Purely additive and
    /// unbounded; callers reset runaway bounds themselves.
    pub fn update(&mut self, tick: f64) {
        if self.velocity.start.is_zero() && self.velocity.end.is_zero() {
            return;
        }
        self.bounds.start.add_scaled(&self.velocity.start, tick);
        self.bounds.end.add_scaled(&self.velocity.end, tick);
        trace!("{} bounds advanced to {:?}", self.kind.name(), self.bounds);
    }

    /// Replace infinite bounds on the active explicit axis with the canvas
    /// edges, so they can later be re-anchored and animated.
    pub fn anchor_to_canvas(&mut self, vp: &Viewport) {
        let (axis, lo, hi) = match self.kind {
            CurveKind::ExplicitY(_) => (Axis::X, vp.min_real_x(), vp.max_real_x()),
            CurveKind::ExplicitX(_) => (Axis::Y, vp.min_real_y(), vp.max_real_y()),
            _ => return,
        };
        if self.bounds.start.get(axis) == f64::NEG_INFINITY {
            self.bounds.start.set(axis, lo);
        }
        if self.bounds.end.get(axis) == f64::INFINITY {
            self.bounds.end.set(axis, hi);
        }
    }

    /// After a scale or canvas change, move any active-axis bound that sat
    /// exactly on a canvas edge under `previous` to that edge under
    /// `current`. Bounds placed elsewhere by the caller are left alone.
    pub fn update_bounds_on_resize(&mut self, previous: &Viewport, current: &Viewport) {
        let (axis, old_lo, old_hi, new_lo, new_hi) = match self.kind {
            CurveKind::ExplicitY(_) => (
                Axis::X,
                previous.min_real_x(),
                previous.max_real_x(),
                current.min_real_x(),
                current.max_real_x(),
            ),
            CurveKind::ExplicitX(_) => (
                Axis::Y,
                previous.min_real_y(),
                previous.max_real_y(),
                current.min_real_y(),
                current.max_real_y(),
            ),
            _ => return,
        };
        if self.bounds.start.get(axis) == old_lo {
            self.bounds.start.set(axis, new_lo);
        }
        if self.bounds.end.get(axis) == old_hi {
            self.bounds.end.set(axis, new_hi);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
