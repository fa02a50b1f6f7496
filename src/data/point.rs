use array_init::array_init;
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use std::fmt;
use std::ops::Deref;
use std::ops::Index;

use super::Vector;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[repr(transparent)] // Required for correctness!
pub struct Point<const N: usize> {
  pub array: [f64; N],
}

pub type Point2 = Point<2>;
pub type Point3 = Point<3>;

// Random sampling.
impl<const N: usize> Distribution<Point<N>> for Standard {
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point<N> {
    Point {
      array: array_init(|_| rng.gen()),
    }
  }
}

// Methods on N-dimensional points.
impl<const N: usize> Point<N> {
  pub const fn new(array: [f64; N]) -> Point<N> {
    Point { array }
  }

  pub fn origin() -> Self {
    Point { array: [0.0; N] }
  }

  pub fn as_vec(&self) -> &Vector<N> {
    self.into()
  }

  pub fn squared_distance(&self, rhs: &Point<N>) -> f64 {
    (self - rhs).squared_magnitude()
  }

  pub fn distance(&self, rhs: &Point<N>) -> f64 {
    self.squared_distance(rhs).sqrt()
  }

  /// Linear interpolation: `t = 0` gives `self`, `t = 1` gives `other`.
  pub fn lerp(&self, other: &Point<N>, t: f64) -> Point<N> {
    Point {
      array: array_init(|i| self.array[i] + (other.array[i] - self.array[i]) * t),
    }
  }

  pub fn midpoint(&self, other: &Point<N>) -> Point<N> {
    self.lerp(other, 0.5)
  }

  pub fn approx_eq(&self, other: &Point<N>, tolerance: f64) -> bool {
    self.distance(other) <= tolerance
  }

  pub fn is_finite(&self) -> bool {
    self.array.iter().all(|v| v.is_finite())
  }

  /// Move the point away from (or towards) `center` by a factor per axis.
  pub fn scale_about(&self, center: &Point<N>, factors: &Vector<N>) -> Point<N> {
    Point {
      array: array_init(|i| center.array[i] + (self.array[i] - center.array[i]) * factors.0[i]),
    }
  }

  /// Arithmetic mean of a non-empty set of points.
  pub fn mean<'a, I>(points: I) -> Option<Point<N>>
  where
    I: IntoIterator<Item = &'a Point<N>>,
  {
    let mut count = 0usize;
    let mut acc = [0.0; N];
    for pt in points {
      count += 1;
      for (a, v) in acc.iter_mut().zip(pt.array.iter()) {
        *a += v;
      }
    }
    if count == 0 {
      return None;
    }
    let n = count as f64;
    Some(Point {
      array: array_init(|i| acc[i] / n),
    })
  }
}

impl<const N: usize> Index<usize> for Point<N> {
  type Output = f64;
  fn index(&self, key: usize) -> &f64 {
    self.array.index(key)
  }
}

impl<const N: usize> From<[f64; N]> for Point<N> {
  fn from(array: [f64; N]) -> Point<N> {
    Point { array }
  }
}

impl From<(f64, f64)> for Point<2> {
  fn from(point: (f64, f64)) -> Point<2> {
    Point {
      array: [point.0, point.1],
    }
  }
}

impl From<(f64, f64, f64)> for Point<3> {
  fn from(point: (f64, f64, f64)) -> Point<3> {
    Point {
      array: [point.0, point.1, point.2],
    }
  }
}

impl<const N: usize> From<Vector<N>> for Point<N> {
  fn from(vector: Vector<N>) -> Point<N> {
    Point { array: vector.0 }
  }
}

// Methods on two-dimensional points.
impl Point<2> {
  /// Rotate counter-clockwise around `center` by `angle` radians.
  pub fn rotate_around(&self, center: &Point<2>, angle: f64) -> Point<2> {
    center + &(self - center).rotate(angle)
  }
}

impl Point<3> {
  /// Rotate around the axis through `center` with direction `axis`.
  pub fn rotate_around_axis(&self, center: &Point<3>, axis: &Vector<3>, angle: f64) -> Point<3> {
    center + &(self - center).rotate_about(axis, angle)
  }
}

// FIXME: Use a macro
impl Point<2> {
  pub fn x_coord(&self) -> f64 {
    self.array[0]
  }
  pub fn y_coord(&self) -> f64 {
    self.array[1]
  }
}
impl Point<3> {
  pub fn x_coord(&self) -> f64 {
    self.array[0]
  }
  pub fn y_coord(&self) -> f64 {
    self.array[1]
  }
  pub fn z_coord(&self) -> f64 {
    self.array[2]
  }
}

impl<const N: usize> Deref for Point<N> {
  type Target = [f64; N];
  fn deref(&self) -> &[f64; N] {
    &self.array
  }
}

/// `(x, y)` using the shortest round-trip representation of each coordinate.
impl<const N: usize> fmt::Display for Point<N> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "(")?;
    for (i, v) in self.array.iter().enumerate() {
      if i > 0 {
        write!(f, ", ")?;
      }
      write!(f, "{}", v)?;
    }
    write!(f, ")")
  }
}

mod add;
mod sub;

#[cfg(test)]
pub mod tests {
  use super::*;
  use crate::testing::*;
  use approx::assert_abs_diff_eq;
  use std::f64::consts::PI;

  use proptest::prelude::*;

  proptest! {
    #[test]
    fn distance_is_symmetric(pt1 in any_point(), pt2 in any_point()) {
      prop_assert_eq!(pt1.distance(&pt2), pt2.distance(&pt1));
    }

    #[test]
    fn full_turn_is_identity(pt in any_point(), center in any_point()) {
      let rotated = pt.rotate_around(&center, 2.0 * PI);
      prop_assert!(rotated.approx_eq(&pt, 1e-9));
    }

    #[test]
    fn lerp_endpoints(pt1 in any_point(), pt2 in any_point()) {
      prop_assert_eq!(pt1.lerp(&pt2, 0.0), pt1);
      prop_assert!(pt1.lerp(&pt2, 1.0).approx_eq(&pt2, 1e-9));
    }
  }

  #[test]
  fn quarter_turn() {
    let p = Point::new([2.0, 1.0]).rotate_around(&Point::new([1.0, 1.0]), PI / 2.0);
    assert_abs_diff_eq!(p.x_coord(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(p.y_coord(), 2.0, epsilon = 1e-12);
  }

  #[test]
  fn axis_rotation() {
    let p = Point::new([1.0, 0.0, 5.0]);
    let r = p.rotate_around_axis(&Point::origin(), &Vector([0.0, 0.0, 1.0]), PI / 2.0);
    assert_abs_diff_eq!(r.x_coord(), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(r.y_coord(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(r.z_coord(), 5.0, epsilon = 1e-12);
  }

  #[test]
  fn offset_by_vector() {
    let p = Point::new([1.0, 2.0]);
    let v = Vector([0.5, -1.0]);
    let expected = Point::new([1.5, 1.0]);
    assert_eq!(&p + v, expected);
    assert_eq!(&p + &v, expected);
    assert_eq!(p + v, expected);
    assert_eq!(p + &v, expected);
    assert_eq!(&p - &v, Point::new([0.5, 3.0]));
    assert_eq!(Point::<3>::origin(), Point::new([0.0; 3]));
  }

  #[test]
  fn display() {
    assert_eq!(Point::new([1.5, -2.0]).to_string(), "(1.5, -2)");
    assert_eq!(Point::new([0.0, 1.0, 2.0]).to_string(), "(0, 1, 2)");
  }

  #[test]
  fn mean() {
    let pts = [Point::new([0.0, 0.0]), Point::new([2.0, 4.0])];
    assert_eq!(Point::mean(&pts), Some(Point::new([1.0, 2.0])));
    assert_eq!(Point::<2>::mean(&[]), None);
  }
}
