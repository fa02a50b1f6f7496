use std::fmt;

use super::{Point, Vector};

/// Axis-aligned bounding box in the plane. Unbounded shapes use infinite
/// extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
  pub min_x: f64,
  pub max_x: f64,
  pub min_y: f64,
  pub max_y: f64,
}

impl Aabb {
  pub const EVERYTHING: Aabb = Aabb {
    min_x: f64::NEG_INFINITY,
    max_x: f64::INFINITY,
    min_y: f64::NEG_INFINITY,
    max_y: f64::INFINITY,
  };

  pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Aabb {
    Aabb {
      min_x,
      max_x,
      min_y,
      max_y,
    }
  }

  /// Tightest box around the points. `None` for an empty iterator.
  pub fn from_points<'a, I>(points: I) -> Option<Aabb>
  where
    I: IntoIterator<Item = &'a Point<2>>,
  {
    let mut iter = points.into_iter();
    let first = iter.next()?;
    let init = Aabb::new(first[0], first[0], first[1], first[1]);
    Some(iter.fold(init, |acc, pt| acc.including(pt)))
  }

  #[must_use]
  pub fn including(self, pt: &Point<2>) -> Aabb {
    Aabb {
      min_x: self.min_x.min(pt[0]),
      max_x: self.max_x.max(pt[0]),
      min_y: self.min_y.min(pt[1]),
      max_y: self.max_y.max(pt[1]),
    }
  }

  #[must_use]
  pub fn union(self, other: &Aabb) -> Aabb {
    Aabb {
      min_x: self.min_x.min(other.min_x),
      max_x: self.max_x.max(other.max_x),
      min_y: self.min_y.min(other.min_y),
      max_y: self.max_y.max(other.max_y),
    }
  }

  /// `(width, height)`.
  pub fn size(&self) -> Vector<2> {
    Vector([self.max_x - self.min_x, self.max_y - self.min_y])
  }

  pub fn center(&self) -> Point<2> {
    Point::new([
      (self.min_x + self.max_x) / 2.0,
      (self.min_y + self.max_y) / 2.0,
    ])
  }

  pub fn contains_point(&self, pt: &Point<2>, tolerance: f64) -> bool {
    pt[0] >= self.min_x - tolerance
      && pt[0] <= self.max_x + tolerance
      && pt[1] >= self.min_y - tolerance
      && pt[1] <= self.max_y + tolerance
  }

  /// Overlap test, touching boxes included.
  pub fn overlaps(&self, other: &Aabb, tolerance: f64) -> bool {
    self.min_x <= other.max_x + tolerance
      && other.min_x <= self.max_x + tolerance
      && self.min_y <= other.max_y + tolerance
      && other.min_y <= self.max_y + tolerance
  }

  pub fn approx_eq(&self, other: &Aabb, tolerance: f64) -> bool {
    fn close(a: f64, b: f64, tolerance: f64) -> bool {
      a == b || (a - b).abs() <= tolerance
    }
    close(self.min_x, other.min_x, tolerance)
      && close(self.max_x, other.max_x, tolerance)
      && close(self.min_y, other.min_y, tolerance)
      && close(self.max_y, other.max_y, tolerance)
  }

  /// `(min_x, max_x, min_y, max_y)`.
  pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
    (self.min_x, self.max_x, self.min_y, self.max_y)
  }
}

impl fmt::Display for Aabb {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Aabb(x: {}..{}, y: {}..{})",
      self.min_x, self.max_x, self.min_y, self.max_y
    )
  }
}

/// Axis-aligned bounding box in space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb3 {
  pub min_x: f64,
  pub max_x: f64,
  pub min_y: f64,
  pub max_y: f64,
  pub min_z: f64,
  pub max_z: f64,
}

impl Aabb3 {
  pub fn from_points<'a, I>(points: I) -> Option<Aabb3>
  where
    I: IntoIterator<Item = &'a Point<3>>,
  {
    let mut iter = points.into_iter();
    let first = iter.next()?;
    let init = Aabb3 {
      min_x: first[0],
      max_x: first[0],
      min_y: first[1],
      max_y: first[1],
      min_z: first[2],
      max_z: first[2],
    };
    Some(iter.fold(init, |acc, pt| Aabb3 {
      min_x: acc.min_x.min(pt[0]),
      max_x: acc.max_x.max(pt[0]),
      min_y: acc.min_y.min(pt[1]),
      max_y: acc.max_y.max(pt[1]),
      min_z: acc.min_z.min(pt[2]),
      max_z: acc.max_z.max(pt[2]),
    }))
  }

  /// `(width, height, depth)`.
  pub fn size(&self) -> Vector<3> {
    Vector([
      self.max_x - self.min_x,
      self.max_y - self.min_y,
      self.max_z - self.min_z,
    ])
  }

  /// `(min_x, max_x, min_y, max_y, min_z, max_z)`.
  pub fn as_tuple(&self) -> (f64, f64, f64, f64, f64, f64) {
    (
      self.min_x, self.max_x, self.min_y, self.max_y, self.min_z, self.max_z,
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn from_points() {
    let pts = [
      Point::new([1.0, -1.0]),
      Point::new([-2.0, 3.0]),
      Point::new([0.0, 0.0]),
    ];
    let aabb = Aabb::from_points(&pts).unwrap();
    assert_eq!(aabb.as_tuple(), (-2.0, 1.0, -1.0, 3.0));
    assert_eq!(aabb.size(), Vector([3.0, 4.0]));
    assert_eq!(Aabb::from_points(&[]), None);
  }

  #[test]
  fn infinite_overlap() {
    let band = Aabb::new(f64::NEG_INFINITY, f64::INFINITY, 0.0, 0.0);
    assert!(band.overlaps(&Aabb::new(5.0, 6.0, -1.0, 1.0), 0.0));
    assert!(!band.overlaps(&Aabb::new(5.0, 6.0, 1.0, 2.0), 0.0));
    assert!(band.approx_eq(&band, 1e-10));
  }

  #[test]
  fn three_dimensional() {
    let pts = [Point::new([0.0, 1.0, 2.0]), Point::new([3.0, -1.0, 5.0])];
    let aabb = Aabb3::from_points(&pts).unwrap();
    assert_eq!(aabb.as_tuple(), (0.0, 3.0, -1.0, 1.0, 2.0, 5.0));
    assert_eq!(aabb.size(), Vector([3.0, 2.0, 3.0]));
  }
}
