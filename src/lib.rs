// #![deny(warnings)]
#![deny(clippy::cast_lossless)]
#![doc(test(no_crate_inject))]
//! Shape kernel for 2D (and a little 3D) geometry.
//!
//! Every shape implements [`Geometry`](data::Geometry): transforms in both a
//! mutating and a copying flavour, containment, closest-point and projection
//! queries, and intersection tests. Intersections are resolved by a
//! [`Registry`] that dispatches on the [`ShapeKind`](data::ShapeKind) of both
//! operands. Polygons can be split into triangles with a Bowyer–Watson
//! Delaunay triangulation, see [`algorithms::triangulation`].
//!
//! ```rust
//! # use rshape::data::*;
//! let square = Polygon::new(vec![
//!   Point::new([0.0, 0.0]),
//!   Point::new([4.0, 0.0]),
//!   Point::new([4.0, 4.0]),
//!   Point::new([0.0, 4.0]),
//! ])?;
//! assert_eq!(square.area(), 16.0);
//! assert_eq!(square.triangulate().len(), 2);
//!
//! let diagonal = Segment::new(Point::new([-1.0, -1.0]), Point::new([5.0, 5.0]));
//! let (hit, points) = square.intersects(&diagonal);
//! assert!(hit);
//! assert_eq!(points.len(), 2);
//! # Ok::<(), rshape::Error>(())
//! ```

pub mod algorithms;
pub mod data;
pub mod intersection;
mod matrix;
mod orientation;
mod transformation;

pub use intersection::{unique_points, unique_points_within, CoverageReport, Intersects, Registry};
pub use orientation::Orientation;
pub use transformation::{Angle, Scale, Transform};

/// Absolute tolerance used by every equality and boundary predicate unless a
/// call site takes an explicit `tolerance`.
pub const EPSILON: f64 = 1e-10;

/// The Delaunay super-triangle spans this many times the input's bounding box.
pub const SUPER_TRIANGLE_SCALE: f64 = 20.0;

/// Number of line segments a bezier curve is flattened into for intersection
/// tests and bounding boxes.
pub const BEZIER_FLATTEN_SEGMENTS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Error {
  #[error("Insufficient vertices: need at least {required}, got {found}")]
  InsufficientVertices { required: usize, found: usize },
  #[error("Negative {what}: {value}")]
  NegativeLength { what: &'static str, value: f64 },
  #[error("Non-finite coordinate or parameter")]
  NonFinite,
  #[error("Sector sweep {0} is outside [-2π, 2π]")]
  InvalidSweep(f64),
  /// Two consecutive edges are either colinear or turn clockwise.
  #[error("Convex violation")]
  ConvexViolation,
  #[error("Degenerate direction: the two points coincide")]
  DegenerateDirection,
}

pub(crate) fn ensure_finite(values: &[f64]) -> Result<(), Error> {
  if values.iter().all(|v| v.is_finite()) {
    Ok(())
  } else {
    Err(Error::NonFinite)
  }
}

pub(crate) fn ensure_non_negative(what: &'static str, value: f64) -> Result<(), Error> {
  if value < 0.0 {
    Err(Error::NegativeLength { what, value })
  } else {
    Ok(())
  }
}

#[cfg(test)]
pub mod testing;
