//! Error types.

use thiserror::Error;

use crate::plane::CurveId;

/// Errors reported by the mapping and curve layers.
///
/// None of these abort a frame: callers log them and carry on with the
/// previous state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// Zoom level was zero, negative, infinite, or NaN.
    #[error("invalid zoom level: {0}")]
    InvalidZoom(f64),

    /// Scale (pixels per unit) must be finite and positive.
    #[error("invalid scale: {0}")]
    InvalidScale(f64),

    #[error("invalid canvas size: {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },

    /// Color string was not `#rrggbb` or `#rrggbbaa`.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// A series failed to converge within the allowed depth.
    #[error("indeterminate: series did not converge within {depth} terms")]
    Indeterminate { depth: u64 },

    #[error("no curve registered with id {0}")]
    UnknownCurve(CurveId),
}

/// Result alias for this crate.
pub type GraphResult<T> = std::result::Result<T, GraphError>;
