use std::borrow::Cow;
use std::fmt;

use super::*;
use crate::{ensure_finite, ensure_non_negative, Error};

/// Oriented rectangle. `width` runs along `direction`, `height` along its
/// counter-clockwise perpendicular.
#[derive(Debug, Clone, Copy)]
pub struct Rectangle {
  center: Point<2>,
  width: f64,
  height: f64,
  direction: Vector<2>,
}

impl Rectangle {
  /// ```rust
  /// # use rshape::data::*;
  /// let rect = Rectangle::new(Point::new([0.0, 0.0]), 4.0, 2.0, Vector([1.0, 0.0]))?;
  /// assert_eq!(rect.aabb().as_tuple(), (-2.0, 2.0, -1.0, 1.0));
  /// assert_eq!(rect.area(), 8.0);
  /// # Ok::<(), rshape::Error>(())
  /// ```
  pub fn new(center: Point<2>, width: f64, height: f64, direction: Vector<2>) -> Result<Rectangle, Error> {
    ensure_finite(&[center[0], center[1], width, height, direction[0], direction[1]])?;
    ensure_non_negative("width", width)?;
    ensure_non_negative("height", height)?;
    Ok(Rectangle {
      center,
      width,
      height,
      direction: direction.normalize_or(Vector::UNIT_X),
    })
  }

  /// Axis-aligned rectangle spanning two opposite corners.
  pub fn from_corners(p: Point<2>, q: Point<2>) -> Result<Rectangle, Error> {
    let size = q - p;
    Rectangle::new(p.midpoint(&q), size[0].abs(), size[1].abs(), Vector::UNIT_X)
  }

  pub fn width(&self) -> f64 {
    self.width
  }

  pub fn height(&self) -> f64 {
    self.height
  }

  pub fn direction(&self) -> &Vector<2> {
    &self.direction
  }

  pub fn area(&self) -> f64 {
    self.width * self.height
  }

  /// Counter-clockwise, starting at the corner with the lowest local
  /// coordinates.
  pub fn corners(&self) -> [Point<2>; 4] {
    let u = self.direction * (self.width / 2.0);
    let v = self.direction.perp() * (self.height / 2.0);
    let c = self.center;
    [c - u - v, c + u - v, c + u + v, c - u + v]
  }

  fn inside_extents(&self, pt: &Point<2>, tolerance: f64) -> bool {
    let d = pt - &self.center;
    d.dot(&self.direction).abs() <= self.width / 2.0 + tolerance
      && d.dot(&self.direction.perp()).abs() <= self.height / 2.0 + tolerance
  }
}

impl Polygonal for Rectangle {
  fn ring(&self) -> Cow<'_, [Point<2>]> {
    Cow::Owned(self.corners().to_vec())
  }
}

impl Geometry for Rectangle {
  fn kind(&self) -> ShapeKind {
    ShapeKind::Rectangle
  }

  /// Same corner set, however the rectangle is parameterized.
  fn approx_eq(&self, other: &Rectangle, tolerance: f64) -> bool {
    self.center.approx_eq(&other.center, tolerance)
      && same_point_set(&self.corners(), &other.corners(), tolerance)
  }

  fn center(&self) -> Point<2> {
    self.center
  }

  fn aabb(&self) -> Aabb {
    let corners = self.corners();
    Aabb::from_points(&corners).unwrap_or_else(|| Aabb::new(0.0, 0.0, 0.0, 0.0))
  }

  fn translate(&mut self, offset: &Vector<2>) {
    self.center += offset;
  }

  fn rotate(&mut self, angle: Angle, center: Option<Point<2>>) {
    let t = rotation(angle, &pivot(self, center));
    self.center = &t * self.center;
    self.direction = t.apply_vector(&self.direction).normalize_or(self.direction);
  }

  /// Width and height follow the stretch of their axis directions.
  fn scale(&mut self, factor: Scale, center: Option<Point<2>>) {
    let t = scaling(factor, &pivot(self, center));
    let u = t.apply_vector(&self.direction);
    let v = t.apply_vector(&self.direction.perp());
    self.center = &t * self.center;
    self.width *= u.magnitude();
    self.height *= v.magnitude();
    self.direction = u.normalize_or(self.direction);
  }

  fn contains_point_with(&self, pt: &Point<2>, tolerance: f64) -> bool {
    self.inside_extents(pt, tolerance) || self.on_boundary(pt, tolerance)
  }

  fn closest_point(&self, pt: &Point<2>, boundary: bool) -> Point<2> {
    closest_point_polygonal(self, pt, boundary)
  }

  fn as_shape(&self) -> Cow<'_, Shape> {
    Cow::Owned(Shape::Rectangle(*self))
  }
}

/// Every point of `xs` has a partner in `ys` and vice versa.
pub(crate) fn same_point_set(xs: &[Point<2>], ys: &[Point<2>], tolerance: f64) -> bool {
  let covered = |from: &[Point<2>], to: &[Point<2>]| {
    from
      .iter()
      .all(|p| to.iter().any(|q| p.approx_eq(q, tolerance)))
  };
  xs.len() == ys.len() && covered(xs, ys) && covered(ys, xs)
}

impl fmt::Display for Rectangle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Rectangle(center: {}, width: {}, height: {}, direction: {})",
      self.center, self.width, self.height, self.direction
    )
  }
}
