//! Finite and convergent sums for series-defined evaluators.
//!
//! A series that never settles is reported as [`GraphError::Indeterminate`]
//! instead of spinning; [`series_evaluator`] turns that into NaN so the path
//! builder treats the sample as a discontinuity.

use log::trace;

use crate::error::{GraphError, GraphResult};

pub const DEFAULT_TOLERANCE: f64 = 1e-12;
pub const DEFAULT_MAX_DEPTH: u64 = 10_000;

/// Σ term(n) for n in `lower..=upper`. Zero for an empty range, NaN if any
/// term or the running sum is not finite.
pub fn sum_range<F>(lower: i64, upper: i64, term: F) -> f64
where
    F: Fn(i64) -> f64,
{
    let mut sum = 0.0;
    for n in lower..=upper {
        sum += term(n);
        if !sum.is_finite() {
            return f64::NAN;
        }
    }
    sum
}

/// Σ term(n) from n = `start` until a term's magnitude drops below
/// `tolerance`.
///
/// Fails with `Indeterminate` when `max_depth` terms pass without that
/// happening, or when a term is not finite.
pub fn sum_to_convergence<F>(term: F, start: u64, tolerance: f64, max_depth: u64) -> GraphResult<f64>
where
    F: Fn(u64) -> f64,
{
    let mut sum = 0.0;
    for (depth, n) in (start..).take(max_depth as usize).enumerate() {
        let t = term(n);
        if !t.is_finite() {
            trace!("series term {} is not finite after {} terms", n, depth);
            return Err(GraphError::Indeterminate { depth: depth as u64 });
        }
        sum += t;
        if t.abs() < tolerance {
            return Ok(sum);
        }
    }
    Err(GraphError::Indeterminate { depth: max_depth })
}

/// Wrap `term(x, n)` summed over n ≥ 0 into a scalar evaluator usable with
/// [`CurveModel::explicit_y`] and friends.
///
/// [`CurveModel::explicit_y`]: crate::curve_model::CurveModel::explicit_y
pub fn series_evaluator<F>(term: F, tolerance: f64, max_depth: u64) -> impl Fn(f64) -> f64
where
    F: Fn(f64, u64) -> f64,
{
    move |x| sum_to_convergence(|n| term(x, n), 0, tolerance, max_depth).unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_range() {
        assert_eq!(sum_range(1, 100, |n| n as f64), 5050.0);
        assert_eq!(sum_range(-2, 2, |n| (n * n) as f64), 10.0);
        assert_eq!(sum_range(5, 1, |_| 1.0), 0.0);
        assert!(sum_range(0, 3, |n| 1.0 / n as f64).is_nan());
    }

    #[test]
    fn test_geometric_series_converges() {
        let s = sum_to_convergence(|n| 0.5f64.powi(n as i32), 0, DEFAULT_TOLERANCE, DEFAULT_MAX_DEPTH)
            .unwrap();
        assert!((s - 2.0).abs() < 1e-11);
    }

    #[test]
    fn test_divergent_series_is_indeterminate() {
        assert_eq!(
            sum_to_convergence(|n| n as f64, 1, 1e-9, 50),
            Err(GraphError::Indeterminate { depth: 50 })
        );
        assert_eq!(
            sum_to_convergence(|n| if n == 3 { f64::INFINITY } else { 1.0 }, 0, 1e-9, 50),
            Err(GraphError::Indeterminate { depth: 3 })
        );
    }

    #[test]
    fn test_series_evaluator() {
        // e^x = Σ x^n / n!
        let exp = series_evaluator(
            |x, n| x.powi(n as i32) / (1..=n).map(|k| k as f64).product::<f64>(),
            1e-15,
            200,
        );
        assert!((exp(1.0) - std::f64::consts::E).abs() < 1e-12);
        assert!((exp(0.0) - 1.0).abs() < 1e-15);

        // Geometric series diverges for |x| ≥ 1.
        let geo = series_evaluator(|x, n| x.powi(n as i32), 1e-12, 500);
        assert!((geo(0.5) - 2.0).abs() < 1e-10);
        assert!(geo(1.5).is_nan());
    }
}
