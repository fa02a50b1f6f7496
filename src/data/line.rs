use std::borrow::Cow;
use std::fmt;

use super::*;
use crate::Orientation;

///////////////////////////////////////////////////////////////////////////////
// Line

/// Infinite line through `origin` with a unit `direction`.
#[derive(Debug, Clone, Copy)]
pub struct Line {
  origin: Point<2>,
  direction: Vector<2>,
}

impl Line {
  /// The direction is normalized. A direction shorter than [`EPSILON`](crate::EPSILON) is
  /// replaced by `(1, 0)`.
  pub fn new(origin: Point<2>, direction: Vector<2>) -> Line {
    Line {
      origin,
      direction: direction.normalize_or(Vector::UNIT_X),
    }
  }

  /// Line through `a` and `b`. Coinciding points give a horizontal line.
  ///
  /// ```rust
  /// # use rshape::data::*;
  /// let line = Line::from_points(Point::new([0.0, 0.0]), Point::new([1.0, 0.0]));
  /// assert!(line.contains_point(&Point::new([5.0, 0.0])));
  /// assert!(!line.contains_point(&Point::new([5.0, 1.0])));
  /// ```
  pub fn from_points(a: Point<2>, b: Point<2>) -> Line {
    Line::new(a, b - a)
  }

  pub fn origin(&self) -> &Point<2> {
    &self.origin
  }

  pub fn direction(&self) -> &Vector<2> {
    &self.direction
  }

  pub fn point_at(&self, t: f64) -> Point<2> {
    self.origin + self.direction * t
  }

  /// Parameter of the orthogonal projection of `pt`.
  pub fn parameter_of(&self, pt: &Point<2>) -> f64 {
    (pt - &self.origin).dot(&self.direction)
  }

  /// Positive on the left-hand side.
  pub fn signed_distance(&self, pt: &Point<2>) -> f64 {
    self.direction.cross(&(pt - &self.origin))
  }

  pub fn side(&self, pt: &Point<2>, tolerance: f64) -> Orientation {
    Orientation::along_vector(&self.origin, &self.direction, pt, tolerance)
  }

  pub fn is_parallel(&self, other: &Line, tolerance: f64) -> bool {
    self.direction.is_parallel(&other.direction, tolerance)
  }
}

impl Geometry for Line {
  fn kind(&self) -> ShapeKind {
    ShapeKind::Line
  }

  /// Lines are equal when they cover the same points, whatever their anchors
  /// and the sign of their directions.
  fn approx_eq(&self, other: &Line, tolerance: f64) -> bool {
    self.is_parallel(other, tolerance) && self.signed_distance(&other.origin).abs() <= tolerance
  }

  fn center(&self) -> Point<2> {
    self.origin
  }

  fn aabb(&self) -> Aabb {
    directional_aabb(&self.origin, &self.direction, true)
  }

  fn translate(&mut self, offset: &Vector<2>) {
    self.origin += offset;
  }

  fn rotate(&mut self, angle: Angle, center: Option<Point<2>>) {
    let t = rotation(angle, &pivot(self, center));
    self.origin = &t * self.origin;
    self.direction = t.apply_vector(&self.direction).normalize_or(self.direction);
  }

  fn scale(&mut self, factor: Scale, center: Option<Point<2>>) {
    let t = scaling(factor, &pivot(self, center));
    self.origin = &t * self.origin;
    self.direction = t.apply_vector(&self.direction).normalize_or(self.direction);
  }

  fn contains_point_with(&self, pt: &Point<2>, tolerance: f64) -> bool {
    self.signed_distance(pt).abs() <= tolerance
  }

  fn closest_point(&self, pt: &Point<2>, _boundary: bool) -> Point<2> {
    self.point_at(self.parameter_of(pt))
  }

  fn as_shape(&self) -> Cow<'_, Shape> {
    Cow::Owned(Shape::Line(*self))
  }
}

impl fmt::Display for Line {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Line(origin: {}, direction: {})", self.origin, self.direction)
  }
}

///////////////////////////////////////////////////////////////////////////////
// Ray

/// Half-line `origin + t·direction` for `t ≥ 0`.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
  origin: Point<2>,
  direction: Vector<2>,
}

impl Ray {
  /// Same normalization rule as [`Line::new`].
  pub fn new(origin: Point<2>, direction: Vector<2>) -> Ray {
    Ray {
      origin,
      direction: direction.normalize_or(Vector::UNIT_X),
    }
  }

  /// Ray starting at `origin` and passing through `through`.
  pub fn from_points(origin: Point<2>, through: Point<2>) -> Ray {
    Ray::new(origin, through - origin)
  }

  pub fn origin(&self) -> &Point<2> {
    &self.origin
  }

  pub fn direction(&self) -> &Vector<2> {
    &self.direction
  }

  pub fn point_at(&self, t: f64) -> Point<2> {
    self.origin + self.direction * t
  }

  pub fn parameter_of(&self, pt: &Point<2>) -> f64 {
    (pt - &self.origin).dot(&self.direction)
  }

  /// The supporting line.
  pub fn line(&self) -> Line {
    Line::new(self.origin, self.direction)
  }
}

impl Geometry for Ray {
  fn kind(&self) -> ShapeKind {
    ShapeKind::Ray
  }

  fn approx_eq(&self, other: &Ray, tolerance: f64) -> bool {
    self.origin.approx_eq(&other.origin, tolerance)
      && self.direction.approx_eq(&other.direction, tolerance)
  }

  fn center(&self) -> Point<2> {
    self.origin
  }

  fn aabb(&self) -> Aabb {
    directional_aabb(&self.origin, &self.direction, false)
  }

  fn translate(&mut self, offset: &Vector<2>) {
    self.origin += offset;
  }

  fn rotate(&mut self, angle: Angle, center: Option<Point<2>>) {
    let t = rotation(angle, &pivot(self, center));
    self.origin = &t * self.origin;
    self.direction = t.apply_vector(&self.direction).normalize_or(self.direction);
  }

  fn scale(&mut self, factor: Scale, center: Option<Point<2>>) {
    let t = scaling(factor, &pivot(self, center));
    self.origin = &t * self.origin;
    self.direction = t.apply_vector(&self.direction).normalize_or(self.direction);
  }

  fn contains_point_with(&self, pt: &Point<2>, tolerance: f64) -> bool {
    self.closest_point(pt, true).distance(pt) <= tolerance
  }

  fn closest_point(&self, pt: &Point<2>, _boundary: bool) -> Point<2> {
    self.point_at(self.parameter_of(pt).max(0.0))
  }

  fn as_shape(&self) -> Cow<'_, Shape> {
    Cow::Owned(Shape::Ray(*self))
  }
}

impl fmt::Display for Ray {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Ray(origin: {}, direction: {})", self.origin, self.direction)
  }
}

// Bounds of a line (both directions) or ray (forward only). An axis stays
// bounded only when the direction has no component along it at all.
fn directional_aabb(origin: &Point<2>, direction: &Vector<2>, both_ways: bool) -> Aabb {
  let extent = |coord: f64, delta: f64| -> (f64, f64) {
    if delta == 0.0 {
      (coord, coord)
    } else if both_ways {
      (f64::NEG_INFINITY, f64::INFINITY)
    } else if delta > 0.0 {
      (coord, f64::INFINITY)
    } else {
      (f64::NEG_INFINITY, coord)
    }
  };
  let (min_x, max_x) = extent(origin[0], direction[0]);
  let (min_y, max_y) = extent(origin[1], direction[1]);
  Aabb::new(min_x, max_x, min_y, max_y)
}
