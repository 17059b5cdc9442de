//! # curve-plane
//!
//! Curve sampling and coordinate mapping for an interactive, zoomable 2D
//! graphing plane.
//!
//! A [`Plane`] owns a [`CoordinateMapper`] (real units ↔ screen pixels, with
//! zoom and resize) and any number of [`CurveModel`]s. Each frame the plane
//! advances curve bounds, asks a [`PathBuilder`] to sample every curve into
//! screen-space [`CurveGeometry`], and hands the result to a
//! [`RenderSurface`].
//!
//! ## Architecture
//!
//! 1. **Mapping** converts real coordinates to pixels and back
//! 2. **Curve models** describe explicit, polar, and parametric curves
//! 3. **Path building** samples a model into subpaths and fill regions,
//!    splitting at asymptotes
//! 4. **Rendering** consumes geometry through the vertex-source protocol
//!
//! ```
//! use curve_plane::{CurveModel, Plane, PlaneConfig, RecordingSurface, Rgba8};
//!
//! let mut plane = Plane::new(&PlaneConfig::default()).unwrap();
//! plane.add_curve(CurveModel::explicit_y(|x| x * x).stroke(Rgba8::BLUE));
//! let mut surface = RecordingSurface::new();
//! assert_eq!(plane.frame(1.0, &mut surface), 1);
//! ```

// Foundation types & math
pub mod basics;
pub mod color;
pub mod error;
pub mod math;

// Mapping
pub mod config;
pub mod coord_mapper;
pub mod trans_polar;

// Curves & geometry
pub mod curve_model;
pub mod path_builder;
pub mod path_storage;
pub mod static_cache;
pub mod summation;

// Rendering & registry
pub mod plane;
pub mod render_surface;

pub use basics::{PointD, VertexSource};
pub use color::Rgba8;
pub use config::PlaneConfig;
pub use coord_mapper::{CoordinateMapper, Viewport};
pub use curve_model::{Bounds, CurveKind, CurveModel, CurveStyle};
pub use error::{GraphError, GraphResult};
pub use path_builder::{CurvePosition, PathBuilder};
pub use path_storage::{CurveGeometry, FillRegion, FillSide, Path};
pub use plane::{CurveId, Plane};
pub use render_surface::{draw_geometry, RecordingSurface, RenderSurface};
