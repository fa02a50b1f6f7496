use ordered_float::OrderedFloat;
use std::borrow::Cow;
use std::fmt;

use super::*;
use crate::{ensure_finite, Error, BEZIER_FLATTEN_SEGMENTS};

/// Bezier curve of arbitrary order in `N` dimensions.
#[derive(Debug, Clone)]
pub struct BezierCurve<const N: usize = 2> {
  points: Vec<Point<N>>,
}

pub type BezierCurve3D = BezierCurve<3>;

impl<const N: usize> BezierCurve<N> {
  /// At least two control points are required.
  pub fn new(points: Vec<Point<N>>) -> Result<BezierCurve<N>, Error> {
    if points.len() < 2 {
      return Err(Error::InsufficientVertices {
        required: 2,
        found: points.len(),
      });
    }
    for pt in points.iter() {
      ensure_finite(&pt.array)?;
    }
    Ok(BezierCurve { points })
  }

  pub fn control_points(&self) -> &[Point<N>] {
    &self.points
  }

  pub fn point_count(&self) -> usize {
    self.points.len()
  }

  /// Polynomial degree: one less than the number of control points.
  pub fn order(&self) -> usize {
    self.points.len() - 1
  }

  /// de Casteljau evaluation. `t` is not clamped.
  pub fn point_at(&self, t: f64) -> Point<N> {
    de_casteljau(&self.points, t)
  }

  /// First derivative with respect to `t`.
  pub fn tangent_at(&self, t: f64) -> Vector<N> {
    let hodograph = self.hodograph();
    Vector::from(de_casteljau(&hodograph, t))
  }

  /// `segments + 1` points evenly spaced in `t`.
  pub fn flatten(&self, segments: usize) -> Vec<Point<N>> {
    let segments = segments.max(1);
    (0..=segments)
      .map(|i| self.point_at(i as f64 / segments as f64))
      .collect()
  }

  /// Arc length of the flattened curve.
  pub fn length(&self) -> f64 {
    self
      .flatten(BEZIER_FLATTEN_SEGMENTS)
      .windows(2)
      .map(|w| w[0].distance(&w[1]))
      .sum()
  }

  /// Parameter in `[0, 1]` of the curve point nearest to `pt`. A coarse
  /// scan picks the start, Newton steps on the squared distance refine it.
  pub fn parameter_of(&self, pt: &Point<N>) -> f64 {
    let samples = BEZIER_FLATTEN_SEGMENTS;
    let mut best = (0..=samples)
      .map(|i| i as f64 / samples as f64)
      .min_by_key(|&t| OrderedFloat(self.point_at(t).squared_distance(pt)))
      .unwrap_or(0.0);
    let first = self.hodograph();
    let second = differentiate(&first);
    for _ in 0..8 {
      let offset = self.point_at(best) - *pt;
      let d1 = Vector::from(de_casteljau(&first, best));
      let d2 = second
        .as_ref()
        .map_or(Vector([0.0; N]), |s| Vector::from(de_casteljau(s, best)));
      let numerator = offset.dot(&d1);
      let denominator = d1.dot(&d1) + offset.dot(&d2);
      if denominator.abs() < f64::EPSILON {
        break;
      }
      let next = (best - numerator / denominator).clamp(0.0, 1.0);
      if self.point_at(next).squared_distance(pt) > self.point_at(best).squared_distance(pt) {
        break;
      }
      best = next;
    }
    best
  }

  pub fn closest_point_on_curve(&self, pt: &Point<N>) -> Point<N> {
    self.point_at(self.parameter_of(pt))
  }

  fn hodograph(&self) -> Vec<Point<N>> {
    differentiate(&self.points).unwrap_or_else(|| vec![Point::origin()])
  }

  fn map_points<F: Fn(&Point<N>) -> Point<N>>(&mut self, f: F) {
    for pt in self.points.iter_mut() {
      *pt = f(pt);
    }
  }

  fn mean(&self) -> Point<N> {
    Point::mean(&self.points).unwrap_or_else(Point::origin)
  }

  fn same_control_points(&self, other: &BezierCurve<N>, tolerance: f64) -> bool {
    let n = self.points.len();
    n == other.points.len()
      && ((0..n).all(|i| self.points[i].approx_eq(&other.points[i], tolerance))
        || (0..n).all(|i| self.points[i].approx_eq(&other.points[n - 1 - i], tolerance)))
  }
}

fn de_casteljau<const N: usize>(points: &[Point<N>], t: f64) -> Point<N> {
  let mut work = points.to_vec();
  for level in (1..work.len()).rev() {
    for i in 0..level {
      work[i] = work[i].lerp(&work[i + 1], t);
    }
  }
  work[0]
}

// Control points of the derivative, stored as points. `None` below two points.
fn differentiate<const N: usize>(points: &[Point<N>]) -> Option<Vec<Point<N>>> {
  if points.len() < 2 {
    return None;
  }
  let degree = (points.len() - 1) as f64;
  Some(
    points
      .windows(2)
      .map(|w| Point::from((w[1] - w[0]) * degree))
      .collect(),
  )
}

///////////////////////////////////////////////////////////////////////////////
// 2D curves

impl BezierCurve<2> {
  pub fn flattened_segments(&self) -> Vec<Segment> {
    self
      .flatten(BEZIER_FLATTEN_SEGMENTS)
      .windows(2)
      .map(|w| Segment::new(w[0], w[1]))
      .collect()
  }
}

impl Geometry for BezierCurve<2> {
  fn kind(&self) -> ShapeKind {
    ShapeKind::BezierCurve
  }

  /// Same control points, in either direction.
  fn approx_eq(&self, other: &BezierCurve<2>, tolerance: f64) -> bool {
    self.same_control_points(other, tolerance)
  }

  /// Mean of the control points.
  fn center(&self) -> Point<2> {
    self.mean()
  }

  /// Bounds of the flattened curve.
  fn aabb(&self) -> Aabb {
    let samples = self.flatten(BEZIER_FLATTEN_SEGMENTS);
    Aabb::from_points(&samples).unwrap_or_else(|| Aabb::new(0.0, 0.0, 0.0, 0.0))
  }

  fn translate(&mut self, offset: &Vector<2>) {
    self.map_points(|pt| pt + offset);
  }

  fn rotate(&mut self, angle: Angle, center: Option<Point<2>>) {
    let t = rotation(angle, &pivot(self, center));
    self.map_points(|pt| &t * pt);
  }

  fn scale(&mut self, factor: Scale, center: Option<Point<2>>) {
    let t = scaling(factor, &pivot(self, center));
    self.map_points(|pt| &t * pt);
  }

  fn contains_point_with(&self, pt: &Point<2>, tolerance: f64) -> bool {
    self.closest_point_on_curve(pt).distance(pt) <= tolerance
  }

  fn closest_point(&self, pt: &Point<2>, _boundary: bool) -> Point<2> {
    self.closest_point_on_curve(pt)
  }

  fn as_shape(&self) -> Cow<'_, Shape> {
    Cow::Owned(Shape::BezierCurve(self.clone()))
  }
}

///////////////////////////////////////////////////////////////////////////////
// 3D curves

impl BezierCurve<3> {
  pub fn center(&self) -> Point<3> {
    self.mean()
  }

  pub fn aabb(&self) -> Aabb3 {
    let samples = self.flatten(BEZIER_FLATTEN_SEGMENTS);
    Aabb3::from_points(&samples).unwrap_or(Aabb3 {
      min_x: 0.0,
      max_x: 0.0,
      min_y: 0.0,
      max_y: 0.0,
      min_z: 0.0,
      max_z: 0.0,
    })
  }

  pub fn translate(&mut self, offset: &Vector<3>) {
    self.map_points(|pt| pt + offset);
  }

  #[must_use]
  pub fn translated(&self, offset: &Vector<3>) -> BezierCurve<3> {
    let mut copy = self.clone();
    copy.translate(offset);
    copy
  }

  /// Rotate around the axis through `center` (default: the control point
  /// mean) with direction `axis`.
  pub fn rotate(&mut self, axis: &Vector<3>, angle: Angle, center: Option<Point<3>>) {
    let c = center.unwrap_or_else(|| self.mean());
    let t = Transform::about(&c, Transform::rotate_axis(axis, angle.as_radians()));
    self.map_points(|pt| &t * pt);
  }

  #[must_use]
  pub fn rotated(&self, axis: &Vector<3>, angle: Angle, center: Option<Point<3>>) -> BezierCurve<3> {
    let mut copy = self.clone();
    copy.rotate(axis, angle, center);
    copy
  }

  pub fn scale(&mut self, factors: &Vector<3>, center: Option<Point<3>>) {
    let c = center.unwrap_or_else(|| self.mean());
    self.map_points(|pt| pt.scale_about(&c, factors));
  }

  #[must_use]
  pub fn scaled(&self, factors: &Vector<3>, center: Option<Point<3>>) -> BezierCurve<3> {
    let mut copy = self.clone();
    copy.scale(factors, center);
    copy
  }

  pub fn contains_point_with(&self, pt: &Point<3>, tolerance: f64) -> bool {
    self.closest_point_on_curve(pt).distance(pt) <= tolerance
  }

  pub fn distance_to_point(&self, pt: &Point<3>) -> f64 {
    self.closest_point_on_curve(pt).distance(pt)
  }

  pub fn approx_eq(&self, other: &BezierCurve<3>, tolerance: f64) -> bool {
    self.same_control_points(other, tolerance)
  }
}

impl PartialEq for BezierCurve<3> {
  fn eq(&self, other: &Self) -> bool {
    self.approx_eq(other, crate::EPSILON)
  }
}

impl<const N: usize> fmt::Display for BezierCurve<N> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "BezierCurve[")?;
    for (i, pt) in self.points.iter().enumerate() {
      if i > 0 {
        write!(f, ", ")?;
      }
      write!(f, "{}", pt)?;
    }
    write!(f, "]")
  }
}
