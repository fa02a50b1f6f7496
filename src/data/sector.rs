use std::borrow::Cow;
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;

use super::*;
use crate::{ensure_finite, ensure_non_negative, Error, EPSILON};

/// Circular sector: the region swept by a radius of length `radius` turning
/// counter-clockwise from `start` through `sweep` radians. The boundary is
/// the arc plus the two bounding radii.
#[derive(Debug, Clone, Copy)]
pub struct Sector {
  center: Point<2>,
  radius: f64,
  start: f64,
  sweep: f64,
}

impl Sector {
  /// A negative `sweep` runs clockwise from `start`; it is stored as the
  /// equivalent counter-clockwise sweep.
  pub fn new(center: Point<2>, radius: f64, start: f64, sweep: f64) -> Result<Sector, Error> {
    ensure_finite(&[center[0], center[1], radius, start, sweep])?;
    ensure_non_negative("radius", radius)?;
    if sweep.abs() > TAU + EPSILON {
      return Err(Error::InvalidSweep(sweep));
    }
    let (start, sweep) = if sweep < 0.0 {
      (start + sweep, -sweep)
    } else {
      (start, sweep)
    };
    Ok(Sector {
      center,
      radius,
      start: start.rem_euclid(TAU),
      sweep: sweep.min(TAU),
    })
  }

  pub fn radius(&self) -> f64 {
    self.radius
  }

  /// In `[0, 2π)`.
  pub fn start_angle(&self) -> f64 {
    self.start
  }

  pub fn end_angle(&self) -> f64 {
    self.start + self.sweep
  }

  /// In `[0, 2π]`.
  pub fn sweep(&self) -> f64 {
    self.sweep
  }

  pub fn is_full(&self) -> bool {
    self.sweep >= TAU - EPSILON
  }

  pub fn area(&self) -> f64 {
    self.radius * self.radius * self.sweep / 2.0
  }

  pub fn arc_length(&self) -> f64 {
    self.radius * self.sweep
  }

  pub fn perimeter(&self) -> f64 {
    self.arc_length() + 2.0 * self.radius
  }

  pub fn point_at_angle(&self, angle: f64) -> Point<2> {
    self.center + Vector::from_angle(angle) * self.radius
  }

  pub fn arc_start(&self) -> Point<2> {
    self.point_at_angle(self.start)
  }

  pub fn arc_end(&self) -> Point<2> {
    self.point_at_angle(self.end_angle())
  }

  /// `angle` lies within the sweep, `slack` radians included.
  pub fn contains_angle(&self, angle: f64, slack: f64) -> bool {
    if self.is_full() {
      return true;
    }
    let rel = (angle - self.start).rem_euclid(TAU);
    rel <= self.sweep + slack || rel >= TAU - slack
  }

  /// The two bounding radii, from the center outwards.
  pub fn radii(&self) -> [Segment; 2] {
    [
      Segment::new(self.center, self.arc_start()),
      Segment::new(self.center, self.arc_end()),
    ]
  }

  fn closest_on_arc(&self, pt: &Point<2>) -> Option<Point<2>> {
    let d = pt - &self.center;
    let angle = d.normalize().map_or(self.start, |u| u.angle());
    if self.contains_angle(angle, 0.0) {
      Some(self.point_at_angle(angle))
    } else {
      None
    }
  }

  fn closest_boundary_point(&self, pt: &Point<2>) -> Point<2> {
    let [r0, r1] = self.radii();
    let candidates = self
      .closest_on_arc(pt)
      .into_iter()
      .chain([r0.closest_point(pt, true), r1.closest_point(pt, true)]);
    closest_of(candidates, pt).unwrap_or(self.center)
  }
}

impl Geometry for Sector {
  fn kind(&self) -> ShapeKind {
    ShapeKind::Sector
  }

  fn approx_eq(&self, other: &Sector, tolerance: f64) -> bool {
    let start_gap = (self.start - other.start + PI).rem_euclid(TAU) - PI;
    self.center.approx_eq(&other.center, tolerance)
      && (self.radius - other.radius).abs() <= tolerance
      && (self.sweep - other.sweep).abs() <= tolerance
      && (start_gap.abs() <= tolerance || self.is_full())
  }

  fn center(&self) -> Point<2> {
    self.center
  }

  /// Tight bounds: the center, both arc ends and every axis extreme the arc
  /// passes through.
  fn aabb(&self) -> Aabb {
    let mut aabb = Aabb::new(self.center[0], self.center[0], self.center[1], self.center[1])
      .including(&self.arc_start())
      .including(&self.arc_end());
    for quadrant in 0..4 {
      let angle = f64::from(quadrant) * FRAC_PI_2;
      if self.contains_angle(angle, 0.0) {
        aabb = aabb.including(&self.point_at_angle(angle));
      }
    }
    aabb
  }

  fn translate(&mut self, offset: &Vector<2>) {
    self.center += offset;
  }

  fn rotate(&mut self, angle: Angle, center: Option<Point<2>>) {
    let t = rotation(angle, &pivot(self, center));
    self.center = &t * self.center;
    self.start = (self.start + angle.as_radians()).rem_euclid(TAU);
  }

  /// The radius scales by the geometric mean of the factors. Negative
  /// factors mirror the sweep.
  fn scale(&mut self, factor: Scale, center: Option<Point<2>>) {
    let t = scaling(factor, &pivot(self, center));
    self.center = &t * self.center;
    self.radius *= factor.length_factor();
    let Vector([sx, sy]) = factor.factors();
    let mut start = self.start;
    if sx < 0.0 {
      // θ ↦ π - θ
      start = PI - (start + self.sweep);
    }
    if sy < 0.0 {
      // θ ↦ -θ
      start = -(start + self.sweep);
    }
    self.start = start.rem_euclid(TAU);
  }

  fn contains_point_with(&self, pt: &Point<2>, tolerance: f64) -> bool {
    let d = self.center.distance(pt);
    if d <= tolerance {
      return true;
    }
    if d > self.radius + tolerance {
      return false;
    }
    let angle = (pt - &self.center).angle();
    self.contains_angle(angle, 0.0)
      || self
        .radii()
        .iter()
        .any(|r| r.contains_point_with(pt, tolerance))
  }

  fn closest_point(&self, pt: &Point<2>, boundary: bool) -> Point<2> {
    if !boundary && self.contains_point(pt) {
      *pt
    } else {
      self.closest_boundary_point(pt)
    }
  }

  fn as_shape(&self) -> Cow<'_, Shape> {
    Cow::Owned(Shape::Sector(*self))
  }
}

impl fmt::Display for Sector {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Sector(center: {}, radius: {}, start: {}, sweep: {})",
      self.center, self.radius, self.start, self.sweep
    )
  }
}
