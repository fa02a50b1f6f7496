use std::borrow::Cow;
use std::f64::consts::PI;
use std::fmt;

use super::*;
use crate::{ensure_finite, Error, Orientation, EPSILON};

mod iter;
pub use iter::*;

mod convex;
pub use convex::*;

/// Simple polygon given by its vertices in boundary order. Edges wrap around
/// from the last vertex to the first. Neither convexity nor orientation is
/// enforced.
#[derive(Debug, Clone)]
pub struct Polygon {
  pub(crate) points: Vec<Point<2>>,
}

impl Polygon {
  /// Keeps the input order.
  ///
  /// ```rust
  /// # use rshape::data::*;
  /// # use rshape::Error;
  /// let err = Polygon::new(vec![Point::new([0.0, 0.0]), Point::new([1.0, 0.0])]);
  /// assert_eq!(err.err(), Some(Error::InsufficientVertices { required: 3, found: 2 }));
  /// ```
  pub fn new(points: Vec<Point<2>>) -> Result<Polygon, Error> {
    let polygon = Polygon::new_unchecked(points);
    polygon.validate()?;
    Ok(polygon)
  }

  pub fn new_unchecked(points: Vec<Point<2>>) -> Polygon {
    Polygon { points }
  }

  pub fn validate(&self) -> Result<(), Error> {
    if self.points.len() < 3 {
      return Err(Error::InsufficientVertices {
        required: 3,
        found: self.points.len(),
      });
    }
    for pt in self.iter() {
      ensure_finite(&pt.array)?;
    }
    Ok(())
  }

  /// Borrowed view of the vertices. Use `to_vec()` on the result for a copy
  /// that outlives later mutation.
  pub fn vertices(&self) -> &[Point<2>] {
    &self.points
  }

  pub fn vertex_count(&self) -> usize {
    self.points.len()
  }

  pub fn point(&self, idx: usize) -> &Point<2> {
    &self.points[idx % self.points.len()]
  }

  pub fn iter(&self) -> Iter<'_> {
    Iter {
      iter: self.points.iter(),
    }
  }

  pub fn iter_mut(&mut self) -> IterMut<'_> {
    IterMut {
      points: self.points.iter_mut(),
    }
  }

  #[must_use]
  pub fn map_points<F>(mut self, f: F) -> Polygon
  where
    F: Fn(Point<2>) -> Point<2>,
  {
    for pt in self.iter_mut() {
      *pt = f(*pt);
    }
    self
  }

  /// Shoelace formula. Positive for counter-clockwise vertex order.
  pub fn signed_area(&self) -> f64 {
    self.signed_area_2x() / 2.0
  }

  pub fn signed_area_2x(&self) -> f64 {
    self
      .iter_edges()
      .map(|(p, q)| p[0] * q[1] - q[0] * p[1])
      .sum()
  }

  pub fn area(&self) -> f64 {
    self.signed_area().abs()
  }

  /// Area centroid. Falls back to the vertex mean for polygons without area.
  pub fn centroid(&self) -> Point<2> {
    let area_2x = self.signed_area_2x();
    let mean = || Point::mean(self.iter()).unwrap_or_else(Point::origin);
    if area_2x.abs() < EPSILON {
      return mean();
    }
    // Relative to the first vertex for precision.
    let origin = self.points[0];
    let (mut cx, mut cy, mut a2) = (0.0, 0.0, 0.0);
    for (p, q) in self.iter_edges() {
      let p = p - &origin;
      let q = q - &origin;
      let cross = p.cross(&q);
      cx += (p[0] + q[0]) * cross;
      cy += (p[1] + q[1]) * cross;
      a2 += cross;
    }
    if a2.abs() < EPSILON {
      return mean();
    }
    origin + Vector([cx / (3.0 * a2), cy / (3.0 * a2)])
  }

  /// Every turn goes the same way (colinear vertices are allowed) and the
  /// boundary winds around exactly once.
  pub fn is_convex(&self) -> bool {
    let n = self.points.len();
    let mut ccw = false;
    let mut cw = false;
    let mut winding = 0.0;
    for i in 0..n {
      let p = self.point(i);
      let q = self.point(i + 1);
      let r = self.point(i + 2);
      match Orientation::with_tolerance(p, q, r, EPSILON) {
        Orientation::CounterClockWise => ccw = true,
        Orientation::ClockWise => cw = true,
        Orientation::CoLinear => {}
      }
      let (u, v) = (q - p, r - q);
      winding += u.cross(&v).atan2(u.dot(&v));
    }
    (ccw != cw) && (winding.abs() - 2.0 * PI).abs() < 1e-6
  }

  pub fn orientation(&self) -> Orientation {
    if self.signed_area_2x() > 0.0 {
      Orientation::CounterClockWise
    } else if self.signed_area_2x() < 0.0 {
      Orientation::ClockWise
    } else {
      Orientation::CoLinear
    }
  }

  /// Reverse the vertex order if it is clockwise.
  pub fn ensure_ccw(&mut self) {
    if self.orientation().is_cw() {
      self.points.reverse();
    }
  }

  pub fn locate(&self, pt: &Point<2>) -> PointLocation {
    self.locate_with(pt, EPSILON)
  }

  /// Delaunay triangulation clipped to the polygon.
  ///
  /// ```rust
  /// # use rshape::data::*;
  /// let square = Polygon::new(vec![
  ///   Point::new([0.0, 0.0]),
  ///   Point::new([4.0, 0.0]),
  ///   Point::new([4.0, 4.0]),
  ///   Point::new([0.0, 4.0]),
  /// ])?;
  /// let triangles = square.triangulate();
  /// assert_eq!(triangles.len(), 2);
  /// assert_eq!(triangles.iter().map(Triangle::area).sum::<f64>(), 16.0);
  /// # Ok::<(), rshape::Error>(())
  /// ```
  pub fn triangulate(&self) -> Vec<Triangle> {
    crate::algorithms::triangulation::delaunay::triangulate(self)
  }

  pub(crate) fn iter_edges(&self) -> impl Iterator<Item = (&Point<2>, &Point<2>)> + '_ {
    let n = self.points.len();
    (0..n).map(move |i| (&self.points[i], &self.points[(i + 1) % n]))
  }
}

impl Polygonal for Polygon {
  fn ring(&self) -> Cow<'_, [Point<2>]> {
    Cow::Borrowed(&self.points)
  }
}

impl Geometry for Polygon {
  fn kind(&self) -> ShapeKind {
    ShapeKind::Polygon
  }

  /// Same boundary cycle, starting anywhere and running either way.
  fn approx_eq(&self, other: &Polygon, tolerance: f64) -> bool {
    let n = self.points.len();
    if n != other.points.len() {
      return false;
    }
    let matches = |shift: usize, step: isize| {
      (0..n).all(|i| {
        let j = (shift as isize + step * i as isize).rem_euclid(n as isize) as usize;
        self.points[i].approx_eq(&other.points[j], tolerance)
      })
    };
    (0..n).any(|shift| matches(shift, 1) || matches(shift, -1))
  }

  fn center(&self) -> Point<2> {
    self.centroid()
  }

  fn aabb(&self) -> Aabb {
    Aabb::from_points(&self.points).unwrap_or_else(|| Aabb::new(0.0, 0.0, 0.0, 0.0))
  }

  fn translate(&mut self, offset: &Vector<2>) {
    for pt in self.iter_mut() {
      *pt += offset;
    }
  }

  fn rotate(&mut self, angle: Angle, center: Option<Point<2>>) {
    let t = rotation(angle, &pivot(self, center));
    for pt in self.iter_mut() {
      *pt = &t * *pt;
    }
  }

  fn scale(&mut self, factor: Scale, center: Option<Point<2>>) {
    let t = scaling(factor, &pivot(self, center));
    for pt in self.iter_mut() {
      *pt = &t * *pt;
    }
  }

  fn contains_point_with(&self, pt: &Point<2>, tolerance: f64) -> bool {
    self.locate_with(pt, tolerance) != PointLocation::Outside
  }

  fn closest_point(&self, pt: &Point<2>, boundary: bool) -> Point<2> {
    closest_point_polygonal(self, pt, boundary)
  }

  fn as_shape(&self) -> Cow<'_, Shape> {
    Cow::Owned(Shape::Polygon(self.clone()))
  }
}

impl fmt::Display for Polygon {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Polygon[")?;
    for (i, pt) in self.iter().enumerate() {
      if i > 0 {
        write!(f, ", ")?;
      }
      write!(f, "{}", pt)?;
    }
    write!(f, "]")
  }
}

#[cfg(test)]
pub mod tests {
  use super::*;
  use crate::testing::*;
  use approx::assert_abs_diff_eq;

  use proptest::prelude::*;
  use test_strategy::proptest;

  pub fn square() -> Polygon {
    Polygon::new(vec![
      Point::new([0.0, 0.0]),
      Point::new([4.0, 0.0]),
      Point::new([4.0, 4.0]),
      Point::new([0.0, 4.0]),
    ])
    .unwrap()
  }

  pub fn notched() -> Polygon {
    // A square with a triangular notch cut into the top edge.
    Polygon::new(vec![
      Point::new([0.0, 0.0]),
      Point::new([4.0, 0.0]),
      Point::new([4.0, 4.0]),
      Point::new([2.0, 1.0]),
      Point::new([0.0, 4.0]),
    ])
    .unwrap()
  }

  #[test]
  fn square_measures() {
    let sq = square();
    assert_eq!(sq.area(), 16.0);
    assert_eq!(sq.perimeter(), 16.0);
    assert!(sq.is_convex());
    assert_eq!(sq.centroid(), Point::new([2.0, 2.0]));
    assert_eq!(sq.vertex_count(), 4);
  }

  #[test]
  fn notch_is_not_convex() {
    let poly = notched();
    assert!(!poly.is_convex());
    assert_eq!(poly.locate(&Point::new([2.0, 3.0])), PointLocation::Outside);
    assert_eq!(poly.locate(&Point::new([2.0, 0.5])), PointLocation::Inside);
    assert_eq!(poly.locate(&Point::new([2.0, 1.0])), PointLocation::OnBoundary);
  }

  #[test]
  fn pentagram_is_not_convex() {
    let star: Vec<Point<2>> = (0..5)
      .map(|i| {
        let angle = (i * 2) as f64 * 2.0 * PI / 5.0;
        Point::new([angle.cos(), angle.sin()])
      })
      .collect();
    assert!(!Polygon::new(star).unwrap().is_convex());
  }

  #[test]
  fn keeps_input_order() {
    let pts = vec![
      Point::new([0.0, 0.0]),
      Point::new([0.0, 1.0]),
      Point::new([1.0, 0.0]),
    ];
    let mut poly = Polygon::new(pts.clone()).unwrap();
    assert_eq!(poly.vertices(), &pts[..]);
    assert_eq!(poly.orientation(), Orientation::ClockWise);
    poly.ensure_ccw();
    assert_eq!(poly.orientation(), Orientation::CounterClockWise);
  }

  #[test]
  fn rejects_short_and_non_finite() {
    assert_eq!(
      Polygon::new(vec![]).err(),
      Some(Error::InsufficientVertices {
        required: 3,
        found: 0
      })
    );
    let bad = vec![
      Point::new([0.0, 0.0]),
      Point::new([f64::INFINITY, 0.0]),
      Point::new([0.0, 1.0]),
    ];
    assert_eq!(Polygon::new(bad).err(), Some(Error::NonFinite));
  }

  #[test]
  fn cyclic_equality() {
    let sq = square();
    let mut shifted = sq.vertices().to_vec();
    shifted.rotate_left(2);
    assert_eq!(sq, Polygon::new(shifted.clone()).unwrap());
    shifted.reverse();
    assert_eq!(sq, Polygon::new(shifted).unwrap());
  }

  #[test]
  fn zero_area_centroid() {
    let flat = Polygon::new(vec![
      Point::new([0.0, 0.0]),
      Point::new([1.0, 0.0]),
      Point::new([2.0, 0.0]),
    ])
    .unwrap();
    assert_eq!(flat.centroid(), Point::new([1.0, 0.0]));
  }

  #[test]
  fn closest_point_on_edges() {
    let sq = square();
    assert_eq!(sq.closest_point(&Point::new([1.0, 1.0]), false), Point::new([1.0, 1.0]));
    assert_eq!(sq.closest_point(&Point::new([1.0, 1.0]), true), Point::new([1.0, 0.0]));
    assert_eq!(sq.distance_to_point(&Point::new([7.0, 2.0])), 3.0);
  }

  #[proptest]
  fn vertices_are_contained(#[strategy(any_polygon())] poly: Polygon) {
    for pt in poly.iter() {
      prop_assert!(poly.contains_point(pt));
    }
  }

  #[proptest]
  fn convex_centroid_is_inside(#[strategy(any_convex())] poly: PolygonConvex) {
    prop_assert!(poly.contains_point(&poly.centroid()));
    prop_assert!(poly.is_convex());
  }

  #[proptest]
  fn reversal_flips_signed_area(#[strategy(any_polygon())] poly: Polygon) {
    let mut rev = poly.vertices().to_vec();
    rev.reverse();
    let rev = Polygon::new(rev).unwrap();
    assert_abs_diff_eq!(rev.signed_area(), -poly.signed_area(), epsilon = 1e-6);
  }
}
