use std::borrow::Cow;
use std::f64::consts::PI;
use std::fmt;

use super::*;
use crate::{ensure_finite, ensure_non_negative, Error};

/// Closed disk.
#[derive(Debug, Clone, Copy)]
pub struct Circle {
  center: Point<2>,
  radius: f64,
}

impl Circle {
  pub fn new(center: Point<2>, radius: f64) -> Result<Circle, Error> {
    ensure_finite(&[center[0], center[1], radius])?;
    ensure_non_negative("radius", radius)?;
    Ok(Circle { center, radius })
  }

  pub fn radius(&self) -> f64 {
    self.radius
  }

  pub fn area(&self) -> f64 {
    PI * self.radius * self.radius
  }

  pub fn perimeter(&self) -> f64 {
    2.0 * PI * self.radius
  }

  /// Point on the circle at `angle` radians from the positive x axis.
  pub fn point_at_angle(&self, angle: f64) -> Point<2> {
    self.center + Vector::from_angle(angle) * self.radius
  }
}

impl Geometry for Circle {
  fn kind(&self) -> ShapeKind {
    ShapeKind::Circle
  }

  fn approx_eq(&self, other: &Circle, tolerance: f64) -> bool {
    self.center.approx_eq(&other.center, tolerance) && (self.radius - other.radius).abs() <= tolerance
  }

  fn center(&self) -> Point<2> {
    self.center
  }

  fn aabb(&self) -> Aabb {
    let [x, y] = self.center.array;
    let r = self.radius;
    Aabb::new(x - r, x + r, y - r, y + r)
  }

  fn translate(&mut self, offset: &Vector<2>) {
    self.center += offset;
  }

  fn rotate(&mut self, angle: Angle, center: Option<Point<2>>) {
    let t = rotation(angle, &pivot(self, center));
    self.center = &t * self.center;
  }

  /// Per-axis factors scale the radius by their geometric mean.
  fn scale(&mut self, factor: Scale, center: Option<Point<2>>) {
    let t = scaling(factor, &pivot(self, center));
    self.center = &t * self.center;
    self.radius *= factor.length_factor();
  }

  fn contains_point_with(&self, pt: &Point<2>, tolerance: f64) -> bool {
    self.center.distance(pt) <= self.radius + tolerance
  }

  fn closest_point(&self, pt: &Point<2>, boundary: bool) -> Point<2> {
    if !boundary && self.contains_point(pt) {
      return *pt;
    }
    let dir = (pt - &self.center).normalize_or(Vector::UNIT_X);
    self.center + dir * self.radius
  }

  fn as_shape(&self) -> Cow<'_, Shape> {
    Cow::Owned(Shape::Circle(*self))
  }
}

impl fmt::Display for Circle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Circle(center: {}, radius: {})", self.center, self.radius)
  }
}
