use claims::debug_assert_ok;
use std::borrow::Cow;
use std::fmt;

use super::*;
use crate::{ensure_finite, Error, Orientation, EPSILON};

#[derive(Debug, Clone, Copy)]
pub struct Triangle([Point<2>; 3]);

impl Triangle {
  pub fn new(pts: [Point<2>; 3]) -> Triangle {
    let triangle = Triangle(pts);
    debug_assert_ok!(triangle.validate());
    triangle
  }

  pub fn validate(&self) -> Result<(), Error> {
    let [a, b, c] = &self.0;
    ensure_finite(&[a[0], a[1], b[0], b[1], c[0], c[1]])
  }

  pub fn vertices(&self) -> &[Point<2>; 3] {
    &self.0
  }

  // O(1)
  pub fn orientation(&self) -> Orientation {
    let [a, b, c] = &self.0;
    Orientation::new(a, b, c)
  }

  /// Positive for counter-clockwise vertex order.
  pub fn signed_area(&self) -> f64 {
    let [a, b, c] = &self.0;
    (b - a).cross(&(c - a)) / 2.0
  }

  pub fn area(&self) -> f64 {
    self.signed_area().abs()
  }

  pub fn centroid(&self) -> Point<2> {
    let [a, b, c] = self.0;
    Point::new([(a[0] + b[0] + c[0]) / 3.0, (a[1] + b[1] + c[1]) / 3.0])
  }

  #[must_use]
  pub fn ensure_ccw(mut self) -> Triangle {
    if self.orientation().is_cw() {
      self.0.swap(1, 2);
    }
    self
  }

  /// Exact point location. Degenerate triangles have no interior.
  pub fn locate(&self, pt: &Point<2>) -> PointLocation {
    use Orientation::*;
    let [a, b, c] = &self.0;
    let turn = self.orientation();
    if turn == CoLinear {
      return if self.on_boundary(pt, 0.0) {
        PointLocation::OnBoundary
      } else {
        PointLocation::Outside
      };
    }
    let ab = Orientation::new(a, b, pt);
    let bc = Orientation::new(b, c, pt);
    let ca = Orientation::new(c, a, pt);
    let outside = turn.reverse();
    if ab == outside || bc == outside || ca == outside {
      PointLocation::Outside
    } else if ab == CoLinear || bc == CoLinear || ca == CoLinear {
      PointLocation::OnBoundary
    } else {
      PointLocation::Inside
    }
  }

  /// Center and radius of the circle through all three vertices. `None` for
  /// colinear vertices.
  pub fn circumcircle(&self) -> Option<(Point<2>, f64)> {
    let [a, b, c] = &self.0;
    let ab = b - a;
    let ac = c - a;
    let d = 2.0 * ab.cross(&ac);
    if d.abs() < EPSILON * EPSILON {
      return None;
    }
    let ab2 = ab.squared_magnitude();
    let ac2 = ac.squared_magnitude();
    let ux = (ac[1] * ab2 - ab[1] * ac2) / d;
    let uy = (ab[0] * ac2 - ac[0] * ab2) / d;
    let center = a + &Vector([ux, uy]);
    let radius = center.distance(a);
    Some((center, radius))
  }

  /// `pt` lies strictly inside the circumcircle, by more than [`EPSILON`].
  /// Colinear triangles have an infinite circumcircle that contains nothing.
  pub fn circumcircle_contains(&self, pt: &Point<2>) -> bool {
    Triangle::circle_contains(self.circumcircle().as_ref(), pt)
  }

  /// Same test against a circumcircle computed earlier.
  pub(crate) fn circle_contains(circle: Option<&(Point<2>, f64)>, pt: &Point<2>) -> bool {
    match circle {
      Some((center, radius)) => center.distance(pt) < radius - EPSILON,
      None => false,
    }
  }
}

impl Polygonal for Triangle {
  fn ring(&self) -> Cow<'_, [Point<2>]> {
    Cow::Borrowed(&self.0[..])
  }
}

impl Geometry for Triangle {
  fn kind(&self) -> ShapeKind {
    ShapeKind::Triangle
  }

  /// Same vertex set, in any order.
  fn approx_eq(&self, other: &Triangle, tolerance: f64) -> bool {
    same_point_set(&self.0, &other.0, tolerance)
  }

  fn center(&self) -> Point<2> {
    self.centroid()
  }

  fn aabb(&self) -> Aabb {
    Aabb::from_points(&self.0).unwrap_or_else(|| Aabb::new(0.0, 0.0, 0.0, 0.0))
  }

  fn translate(&mut self, offset: &Vector<2>) {
    for pt in self.0.iter_mut() {
      *pt += offset;
    }
  }

  fn rotate(&mut self, angle: Angle, center: Option<Point<2>>) {
    let t = rotation(angle, &pivot(self, center));
    for pt in self.0.iter_mut() {
      *pt = &t * *pt;
    }
  }

  fn scale(&mut self, factor: Scale, center: Option<Point<2>>) {
    let t = scaling(factor, &pivot(self, center));
    for pt in self.0.iter_mut() {
      *pt = &t * *pt;
    }
  }

  fn contains_point_with(&self, pt: &Point<2>, tolerance: f64) -> bool {
    self.locate(pt) != PointLocation::Outside || self.on_boundary(pt, tolerance)
  }

  fn closest_point(&self, pt: &Point<2>, boundary: bool) -> Point<2> {
    closest_point_polygonal(self, pt, boundary)
  }

  fn as_shape(&self) -> Cow<'_, Shape> {
    Cow::Owned(Shape::Triangle(*self))
  }
}

impl fmt::Display for Triangle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let [a, b, c] = &self.0;
    write!(f, "Triangle({}, {}, {})", a, b, c)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::*;

  use proptest::prelude::*;
  use test_strategy::proptest;

  fn unit() -> Triangle {
    Triangle::new([
      Point::new([0.0, 0.0]),
      Point::new([1.0, 0.0]),
      Point::new([0.0, 1.0]),
    ])
  }

  #[test]
  fn locate() {
    let t = unit();
    assert_eq!(t.locate(&Point::new([0.25, 0.25])), PointLocation::Inside);
    assert_eq!(t.locate(&Point::new([0.5, 0.0])), PointLocation::OnBoundary);
    assert_eq!(t.locate(&Point::new([1.0, 1.0])), PointLocation::Outside);
    // Vertex order does not matter.
    let cw = Triangle::new([t.0[0], t.0[2], t.0[1]]);
    assert_eq!(cw.locate(&Point::new([0.25, 0.25])), PointLocation::Inside);
    assert_eq!(cw.ensure_ccw().orientation(), Orientation::CounterClockWise);
  }

  #[test]
  fn right_triangle_circumcircle() {
    let (center, radius) = unit().circumcircle().unwrap();
    assert!(center.approx_eq(&Point::new([0.5, 0.5]), 1e-12));
    assert!((radius - 0.5f64.sqrt()).abs() < 1e-12);
    assert!(unit().circumcircle_contains(&Point::new([0.9, 0.9])));
    assert!(!unit().circumcircle_contains(&Point::new([1.0, 1.0])));
  }

  #[test]
  fn colinear_has_no_circumcircle() {
    let flat = Triangle::new([
      Point::new([0.0, 0.0]),
      Point::new([1.0, 0.0]),
      Point::new([2.0, 0.0]),
    ]);
    assert_eq!(flat.circumcircle(), None);
    assert!(!flat.circumcircle_contains(&Point::new([1.0, 0.0])));
    assert_eq!(flat.locate(&Point::new([1.5, 0.0])), PointLocation::OnBoundary);
    assert_eq!(flat.locate(&Point::new([3.0, 0.0])), PointLocation::Outside);
  }

  #[proptest]
  fn circumcircle_passes_through_vertices(#[strategy(any_triangle())] t: Triangle) {
    prop_assume!(t.area() > 1.0);
    if let Some((center, radius)) = t.circumcircle() {
      for v in t.vertices() {
        prop_assert!((center.distance(v) - radius).abs() <= 1e-6 * radius.max(1.0));
      }
    }
  }

  #[proptest]
  fn vertices_are_contained(#[strategy(any_triangle())] t: Triangle) {
    for v in t.vertices() {
      prop_assert!(t.contains_point(v));
    }
    prop_assert!(t.contains_point_with(&t.centroid(), 1e-9));
  }
}
