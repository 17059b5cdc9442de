//! Polar coordinate conversion and slope/angle helpers.
//!
//! Angles are radians in `[0, 2π)` unless a function says degrees. Vertical
//! slopes are represented by the infinities: `+∞` points up (π/2) and `−∞`
//! points down (3π/2).

use crate::basics::{deg2rad, rad2deg, round_to_zero, PI, TWO_PI};

const HALF_PI: f64 = PI / 2.0;
const THREE_HALVES_PI: f64 = 3.0 * PI / 2.0;

/// Beyond this many turns additive folding would lose precision (or never
/// terminate), so normalization switches to a Euclidean remainder.
const MAX_FOLD_TURNS: f64 = 1.0e6;

/// A point in polar form.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Polar {
    pub r: f64,
    pub theta: f64,
}

impl Polar {
    pub fn new(r: f64, theta: f64) -> Self {
        Self { r, theta }
    }
}

// ============================================================================
// Cartesian <-> polar
// ============================================================================

/// Convert cartesian (x, y) to polar.
///
/// The quadrant correction is a single branch: `x < 0` adds π, otherwise
/// `y < 0` adds 2π. Points on the y axis are special-cased so the result
/// never depends on `atan(±∞)`.
pub fn to_polar(x: f64, y: f64) -> Polar {
    if x == 0.0 {
        return if y > 0.0 {
            Polar::new(y, HALF_PI)
        } else if y < 0.0 {
            Polar::new(y.abs(), THREE_HALVES_PI)
        } else {
            Polar::new(0.0, 0.0)
        };
    }

    let mut theta = (y / x).atan();
    if x < 0.0 {
        theta += PI;
    } else if y < 0.0 {
        theta += TWO_PI;
    }
    Polar::new(x.hypot(y), theta)
}

/// Convert polar (r, θ) to cartesian, snapping near-zero components to 0.
pub fn from_polar(r: f64, theta: f64) -> (f64, f64) {
    (round_to_zero(r * theta.cos()), round_to_zero(r * theta.sin()))
}

// ============================================================================
// Angle normalization
// ============================================================================

fn fold(mut a: f64, turn: f64) -> f64 {
    if !a.is_finite() {
        return a;
    }
    if a.abs() > turn * MAX_FOLD_TURNS {
        return a.rem_euclid(turn);
    }
    while a < 0.0 {
        a += turn;
    }
    while a >= turn {
        a -= turn;
    }
    a
}

/// Fold an angle into `[0, 2π)` by repeated addition or subtraction of 2π.
pub fn normalize_radians(theta: f64) -> f64 {
    fold(theta, TWO_PI)
}

/// Fold an angle into `[0, 360)`.
pub fn normalize_degrees(deg: f64) -> f64 {
    fold(deg, 360.0)
}

// ============================================================================
// Slope <-> angle
// ============================================================================

/// Direction angle of a line with the given slope, in `[0, 2π)`.
pub fn slope_to_radians(slope: f64) -> f64 {
    if slope == f64::INFINITY {
        HALF_PI
    } else if slope == f64::NEG_INFINITY {
        THREE_HALVES_PI
    } else {
        to_polar(1.0, slope).theta
    }
}

/// Slope of a line at angle `theta`. π/2 maps to `+∞`, 3π/2 to `−∞`.
pub fn radians_to_slope(theta: f64) -> f64 {
    let theta = normalize_radians(theta);
    if theta == HALF_PI {
        f64::INFINITY
    } else if theta == THREE_HALVES_PI {
        f64::NEG_INFINITY
    } else {
        theta.tan()
    }
}

/// Direction angle of a line with the given slope, in degrees `[0, 360)`.
pub fn slope_to_degrees(slope: f64) -> f64 {
    if slope == f64::INFINITY {
        90.0
    } else if slope == f64::NEG_INFINITY {
        270.0
    } else {
        rad2deg(slope_to_radians(slope))
    }
}

/// Slope of a line at `deg` degrees. 90° maps to `+∞`, 270° to `−∞`.
pub fn degrees_to_slope(deg: f64) -> f64 {
    let deg = normalize_degrees(deg);
    if deg == 90.0 {
        f64::INFINITY
    } else if deg == 270.0 {
        f64::NEG_INFINITY
    } else {
        deg2rad(deg).tan()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_to_polar_axes() {
        assert_eq!(to_polar(0.0, 0.0), Polar::new(0.0, 0.0));
        assert_eq!(to_polar(0.0, 2.0), Polar::new(2.0, HALF_PI));
        assert_eq!(to_polar(0.0, -3.0), Polar::new(3.0, THREE_HALVES_PI));
        let p = to_polar(4.0, 0.0);
        assert_eq!(p, Polar::new(4.0, 0.0));
        let p = to_polar(-4.0, 0.0);
        assert!((p.theta - PI).abs() < EPS);
    }

    #[test]
    fn test_to_polar_quadrants() {
        let q1 = to_polar(1.0, 1.0);
        assert!((q1.theta - PI / 4.0).abs() < EPS);
        let q2 = to_polar(-1.0, 1.0);
        assert!((q2.theta - 3.0 * PI / 4.0).abs() < EPS);
        let q3 = to_polar(-1.0, -1.0);
        assert!((q3.theta - 5.0 * PI / 4.0).abs() < EPS);
        let q4 = to_polar(1.0, -1.0);
        assert!((q4.theta - 7.0 * PI / 4.0).abs() < EPS);
        assert!((q3.r - 2f64.sqrt()).abs() < EPS);
    }

    #[test]
    fn test_polar_round_trip() {
        let samples = [
            (1.0, 0.0),
            (3.5, -2.25),
            (-7.0, 0.125),
            (-1e3, -4e2),
            (0.0, 5.0),
            (0.0, -5.0),
            (123.456, 789.0),
        ];
        for (x, y) in samples {
            let p = to_polar(x, y);
            let (rx, ry) = from_polar(p.r, p.theta);
            let tol = EPS * (1.0 + x.abs().max(y.abs()));
            assert!((rx - x).abs() < tol, "x round trip for ({x}, {y}): {rx}");
            assert!((ry - y).abs() < tol, "y round trip for ({x}, {y}): {ry}");
        }
    }

    #[test]
    fn test_from_polar_snaps_noise() {
        let (x, y) = from_polar(1.0, HALF_PI);
        assert_eq!(x, 0.0);
        assert_eq!(y, 1.0);
        let (x, y) = from_polar(1.0, PI);
        assert_eq!(x, -1.0);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn test_normalize_radians() {
        assert_eq!(normalize_radians(0.0), 0.0);
        assert!((normalize_radians(-HALF_PI) - THREE_HALVES_PI).abs() < EPS);
        assert!((normalize_radians(5.0 * PI) - PI).abs() < EPS);
        assert_eq!(normalize_radians(TWO_PI), 0.0);
        assert!(normalize_radians(f64::NAN).is_nan());
        let big = normalize_radians(1e300);
        assert!((0.0..TWO_PI).contains(&big));
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(450.0), 90.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
    }

    #[test]
    fn test_degrees_to_slope_vertical() {
        assert_eq!(degrees_to_slope(90.0), f64::INFINITY);
        assert_eq!(degrees_to_slope(270.0), f64::NEG_INFINITY);
        assert_eq!(degrees_to_slope(-90.0), f64::NEG_INFINITY);
        assert!((degrees_to_slope(45.0) - 1.0).abs() < EPS);
        assert!(degrees_to_slope(0.0).abs() < EPS);
    }

    #[test]
    fn test_radians_to_slope_vertical() {
        assert_eq!(radians_to_slope(HALF_PI), f64::INFINITY);
        assert_eq!(radians_to_slope(THREE_HALVES_PI), f64::NEG_INFINITY);
        assert!((radians_to_slope(PI / 4.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_slope_to_angle() {
        assert_eq!(slope_to_radians(f64::INFINITY), HALF_PI);
        assert_eq!(slope_to_radians(f64::NEG_INFINITY), THREE_HALVES_PI);
        assert_eq!(slope_to_degrees(f64::INFINITY), 90.0);
        assert_eq!(slope_to_degrees(f64::NEG_INFINITY), 270.0);
        assert!((slope_to_degrees(1.0) - 45.0).abs() < EPS);
        // Negative slopes land in the fourth quadrant
        assert!((slope_to_degrees(-1.0) - 315.0).abs() < EPS);
    }

    #[test]
    fn test_slope_angle_round_trip() {
        for slope in [-12.5, -1.0, -0.01, 0.0, 0.3, 2.0, 400.0] {
            let back = radians_to_slope(slope_to_radians(slope));
            assert!((back - slope).abs() < 1e-6 * (1.0 + slope.abs()), "{slope} -> {back}");
        }
    }
}
