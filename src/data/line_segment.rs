use std::borrow::Cow;
use std::fmt;

use super::*;
use crate::Error;

/// Closed straight segment between `a` and `b`. The endpoints may coincide.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
  pub a: Point<2>,
  pub b: Point<2>,
}

impl Segment {
  pub fn new(a: Point<2>, b: Point<2>) -> Segment {
    Segment { a, b }
  }

  /// `b - a`.
  pub fn vector(&self) -> Vector<2> {
    self.b - self.a
  }

  /// Unit direction from `a` to `b`.
  pub fn direction(&self) -> Result<Vector<2>, Error> {
    self.vector().normalize().ok_or(Error::DegenerateDirection)
  }

  pub fn length(&self) -> f64 {
    self.a.distance(&self.b)
  }

  pub fn midpoint(&self) -> Point<2> {
    self.a.midpoint(&self.b)
  }

  /// `t = 0` is `a`, `t = 1` is `b`.
  pub fn point_at(&self, t: f64) -> Point<2> {
    self.a.lerp(&self.b, t)
  }

  /// Parameter of the closest point, clamped to `[0, 1]`.
  pub fn parameter_of(&self, pt: &Point<2>) -> f64 {
    let v = self.vector();
    let len2 = v.squared_magnitude();
    if len2 == 0.0 {
      return 0.0;
    }
    ((pt - &self.a).dot(&v) / len2).clamp(0.0, 1.0)
  }

  #[must_use]
  pub fn reversed(&self) -> Segment {
    Segment::new(self.b, self.a)
  }
}

impl Geometry for Segment {
  fn kind(&self) -> ShapeKind {
    ShapeKind::Segment
  }

  /// Endpoint order is irrelevant.
  fn approx_eq(&self, other: &Segment, tolerance: f64) -> bool {
    (self.a.approx_eq(&other.a, tolerance) && self.b.approx_eq(&other.b, tolerance))
      || (self.a.approx_eq(&other.b, tolerance) && self.b.approx_eq(&other.a, tolerance))
  }

  fn center(&self) -> Point<2> {
    self.midpoint()
  }

  fn aabb(&self) -> Aabb {
    Aabb::new(
      self.a[0].min(self.b[0]),
      self.a[0].max(self.b[0]),
      self.a[1].min(self.b[1]),
      self.a[1].max(self.b[1]),
    )
  }

  fn translate(&mut self, offset: &Vector<2>) {
    self.a += offset;
    self.b += offset;
  }

  fn rotate(&mut self, angle: Angle, center: Option<Point<2>>) {
    let t = rotation(angle, &pivot(self, center));
    self.a = &t * self.a;
    self.b = &t * self.b;
  }

  fn scale(&mut self, factor: Scale, center: Option<Point<2>>) {
    let t = scaling(factor, &pivot(self, center));
    self.a = &t * self.a;
    self.b = &t * self.b;
  }

  fn contains_point_with(&self, pt: &Point<2>, tolerance: f64) -> bool {
    self.closest_point(pt, true).distance(pt) <= tolerance
  }

  fn closest_point(&self, pt: &Point<2>, _boundary: bool) -> Point<2> {
    self.point_at(self.parameter_of(pt))
  }

  fn as_shape(&self) -> Cow<'_, Shape> {
    Cow::Owned(Shape::Segment(*self))
  }
}

impl fmt::Display for Segment {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Segment({}, {})", self.a, self.b)
  }
}
