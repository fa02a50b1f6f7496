use std::borrow::Cow;
use std::f64::consts::PI;
use std::fmt;

use super::*;
use crate::{ensure_finite, ensure_non_negative, Error, EPSILON};

/// Closed elliptical region. `a` is the semi-axis along `direction`, `b` the
/// semi-axis along its counter-clockwise perpendicular.
#[derive(Debug, Clone, Copy)]
pub struct Ellipse {
  center: Point<2>,
  a: f64,
  b: f64,
  direction: Vector<2>,
}

impl Ellipse {
  pub fn new(center: Point<2>, a: f64, b: f64, direction: Vector<2>) -> Result<Ellipse, Error> {
    ensure_finite(&[center[0], center[1], a, b, direction[0], direction[1]])?;
    ensure_non_negative("semi-axis", a)?;
    ensure_non_negative("semi-axis", b)?;
    Ok(Ellipse {
      center,
      a,
      b,
      direction: direction.normalize_or(Vector::UNIT_X),
    })
  }

  /// Axis-aligned ellipse.
  pub fn axis_aligned(center: Point<2>, a: f64, b: f64) -> Result<Ellipse, Error> {
    Ellipse::new(center, a, b, Vector::UNIT_X)
  }

  /// `(a, b)`.
  pub fn semi_axes(&self) -> (f64, f64) {
    (self.a, self.b)
  }

  pub fn direction(&self) -> &Vector<2> {
    &self.direction
  }

  pub fn area(&self) -> f64 {
    PI * self.a * self.b
  }

  /// Ramanujan's approximation.
  pub fn perimeter(&self) -> f64 {
    let (a, b) = (self.a, self.b);
    PI * (3.0 * (a + b) - ((3.0 * a + b) * (a + 3.0 * b)).sqrt())
  }

  pub fn point_at_angle(&self, theta: f64) -> Point<2> {
    self.from_local(self.a * theta.cos(), self.b * theta.sin())
  }

  pub(crate) fn to_local(&self, pt: &Point<2>) -> (f64, f64) {
    let d = pt - &self.center;
    (d.dot(&self.direction), d.dot(&self.direction.perp()))
  }

  pub(crate) fn from_local(&self, x: f64, y: f64) -> Point<2> {
    self.center + self.direction * x + self.direction.perp() * y
  }

  pub(crate) fn is_degenerate(&self) -> bool {
    self.a < EPSILON || self.b < EPSILON
  }

  // A flat ellipse is the segment along its longer axis.
  pub(crate) fn collapsed(&self) -> Segment {
    if self.a >= self.b {
      Segment::new(self.from_local(-self.a, 0.0), self.from_local(self.a, 0.0))
    } else {
      Segment::new(self.from_local(0.0, -self.b), self.from_local(0.0, self.b))
    }
  }

  fn closest_boundary_point(&self, pt: &Point<2>) -> Point<2> {
    if self.is_degenerate() {
      return self.collapsed().closest_point(pt, true);
    }
    let (x, y) = self.to_local(pt);
    let (ex, ey) = closest_on_ellipse(self.a, self.b, x.abs(), y.abs());
    self.from_local(ex.copysign(x), ey.copysign(y))
  }
}

// Nearest point on the first-quadrant arc of an axis-aligned ellipse, by
// iterating on the evolute. Needs no trigonometry and converges in a handful
// of steps for any eccentricity.
fn closest_on_ellipse(a: f64, b: f64, px: f64, py: f64) -> (f64, f64) {
  let mut tx = std::f64::consts::FRAC_1_SQRT_2;
  let mut ty = std::f64::consts::FRAC_1_SQRT_2;
  for _ in 0..8 {
    let x = a * tx;
    let y = b * ty;
    let ex = (a * a - b * b) * tx.powi(3) / a;
    let ey = (b * b - a * a) * ty.powi(3) / b;
    let r = (x - ex).hypot(y - ey);
    let q = (px - ex).hypot(py - ey);
    if q < EPSILON {
      break;
    }
    tx = ((px - ex) * r / q + ex) / a;
    ty = ((py - ey) * r / q + ey) / b;
    tx = tx.clamp(0.0, 1.0);
    ty = ty.clamp(0.0, 1.0);
    let t = tx.hypot(ty);
    tx /= t;
    ty /= t;
  }
  (a * tx, b * ty)
}

impl Geometry for Ellipse {
  fn kind(&self) -> ShapeKind {
    ShapeKind::Ellipse
  }

  /// Directions are compared up to sign. Swapped semi-axes with
  /// perpendicular directions describe the same ellipse.
  fn approx_eq(&self, other: &Ellipse, tolerance: f64) -> bool {
    if !self.center.approx_eq(&other.center, tolerance) {
      return false;
    }
    let close = |u: f64, v: f64| (u - v).abs() <= tolerance;
    let round = close(self.a, self.b);
    let same = close(self.a, other.a)
      && close(self.b, other.b)
      && (round || self.direction.is_parallel(&other.direction, tolerance));
    let swapped = close(self.a, other.b)
      && close(self.b, other.a)
      && (round || self.direction.dot(&other.direction).abs() <= tolerance);
    same || swapped
  }

  fn center(&self) -> Point<2> {
    self.center
  }

  fn aabb(&self) -> Aabb {
    let [dx, dy] = self.direction.0;
    let (a2, b2) = (self.a * self.a, self.b * self.b);
    let hw = (a2 * dx * dx + b2 * dy * dy).sqrt();
    let hh = (a2 * dy * dy + b2 * dx * dx).sqrt();
    let [x, y] = self.center.array;
    Aabb::new(x - hw, x + hw, y - hh, y + hh)
  }

  fn translate(&mut self, offset: &Vector<2>) {
    self.center += offset;
  }

  fn rotate(&mut self, angle: Angle, center: Option<Point<2>>) {
    let t = rotation(angle, &pivot(self, center));
    self.center = &t * self.center;
    self.direction = t.apply_vector(&self.direction).normalize_or(self.direction);
  }

  /// Each semi-axis is scaled by the stretch of its own axis direction.
  /// Exact for uniform factors and for axis-aligned ellipses.
  fn scale(&mut self, factor: Scale, center: Option<Point<2>>) {
    let t = scaling(factor, &pivot(self, center));
    let u = t.apply_vector(&self.direction);
    let v = t.apply_vector(&self.direction.perp());
    self.center = &t * self.center;
    self.a *= u.magnitude();
    self.b *= v.magnitude();
    self.direction = u.normalize_or(self.direction);
  }

  fn contains_point_with(&self, pt: &Point<2>, tolerance: f64) -> bool {
    if !self.is_degenerate() {
      let (x, y) = self.to_local(pt);
      let (u, v) = (x / self.a, y / self.b);
      if u * u + v * v <= 1.0 {
        return true;
      }
    }
    self.closest_boundary_point(pt).distance(pt) <= tolerance
  }

  fn closest_point(&self, pt: &Point<2>, boundary: bool) -> Point<2> {
    if !boundary && self.contains_point(pt) {
      *pt
    } else {
      self.closest_boundary_point(pt)
    }
  }

  fn as_shape(&self) -> Cow<'_, Shape> {
    Cow::Owned(Shape::Ellipse(*self))
  }
}

impl fmt::Display for Ellipse {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Ellipse(center: {}, a: {}, b: {}, direction: {})",
      self.center, self.a, self.b, self.direction
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::*;
  use approx::assert_abs_diff_eq;

  use proptest::prelude::*;
  use test_strategy::proptest;

  #[test]
  fn rotated_bounds() {
    let ellipse = Ellipse::new(Point::origin(), 4.0, 1.0, Vector([0.0, 1.0])).unwrap();
    let aabb = ellipse.aabb();
    assert_abs_diff_eq!(aabb.max_x, 1.0);
    assert_abs_diff_eq!(aabb.max_y, 4.0);
  }

  #[test]
  fn circle_perimeter() {
    let round = Ellipse::axis_aligned(Point::origin(), 2.0, 2.0).unwrap();
    assert_abs_diff_eq!(round.perimeter(), 4.0 * PI, epsilon = 1e-12);
    assert_abs_diff_eq!(round.area(), 4.0 * PI, epsilon = 1e-12);
  }

  #[test]
  fn vertex_projection() {
    let ellipse = Ellipse::axis_aligned(Point::new([1.0, 1.0]), 3.0, 1.0).unwrap();
    let p = ellipse.project_point(&Point::new([10.0, 1.0]));
    assert!(p.approx_eq(&Point::new([4.0, 1.0]), 1e-9));
    let q = ellipse.project_point(&Point::new([1.0, -7.0]));
    assert!(q.approx_eq(&Point::new([1.0, 0.0]), 1e-9));
  }

  #[test]
  fn swapped_axes_are_equal() {
    let a = Ellipse::new(Point::origin(), 3.0, 1.0, Vector::UNIT_X).unwrap();
    let b = Ellipse::new(Point::origin(), 1.0, 3.0, Vector::UNIT_Y).unwrap();
    assert_eq!(a, b);
  }

  #[test]
  fn flat_ellipse_is_a_segment() {
    let flat = Ellipse::axis_aligned(Point::origin(), 2.0, 0.0).unwrap();
    assert!(flat.contains_point(&Point::new([1.5, 0.0])));
    assert!(!flat.contains_point(&Point::new([1.5, 0.1])));
  }

  #[proptest]
  fn projection_is_on_boundary(
    #[strategy(1.0..20.0)] a: f64,
    #[strategy(1.0..20.0)] b: f64,
    #[strategy(any_point())] pt: Point<2>,
  ) {
    let ellipse = Ellipse::axis_aligned(Point::origin(), a, b).unwrap();
    let p = ellipse.project_point(&pt);
    let (u, v) = (p[0] / a, p[1] / b);
    prop_assert!((u * u + v * v - 1.0).abs() < 1e-9);
    // No boundary sample is closer.
    let d = p.distance(&pt);
    for i in 0..360 {
      let sample = ellipse.point_at_angle((i as f64).to_radians());
      prop_assert!(sample.distance(&pt) >= d - 1e-6 * (1.0 + d));
    }
  }
}
