use array_init::array_init;
use num_traits::identities::Zero;
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use std::fmt;
use std::iter::Sum;
use std::ops::Index;
use std::ops::Neg;

use crate::data::Point;
use crate::EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Vector<const N: usize>(pub [f64; N]);

pub type Vector2 = Vector<2>;
pub type Vector3 = Vector<3>;

impl<const N: usize> Distribution<Vector<N>> for Standard {
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector<N> {
    Vector(array_init(|_| rng.gen()))
  }
}

impl<const N: usize> Vector<N> {
  pub fn dot(&self, other: &Vector<N>) -> f64 {
    self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
  }

  pub fn squared_magnitude(&self) -> f64 {
    self.dot(self)
  }

  pub fn magnitude(&self) -> f64 {
    self.squared_magnitude().sqrt()
  }

  /// Unit vector in the same direction, or `None` if the length is below
  /// [`EPSILON`].
  pub fn normalize(&self) -> Option<Vector<N>> {
    let len = self.magnitude();
    if len < EPSILON || !len.is_finite() {
      None
    } else {
      Some(*self / len)
    }
  }

  pub fn normalize_or(&self, fallback: Vector<N>) -> Vector<N> {
    self.normalize().unwrap_or(fallback)
  }

  /// Component-wise product.
  pub fn scale_by(&self, factors: &Vector<N>) -> Vector<N> {
    Vector(array_init(|i| self.0[i] * factors.0[i]))
  }

  pub fn approx_eq(&self, other: &Vector<N>, tolerance: f64) -> bool {
    (*self - *other).magnitude() <= tolerance
  }
}

impl Vector<2> {
  pub const UNIT_X: Vector<2> = Vector([1.0, 0.0]);
  pub const UNIT_Y: Vector<2> = Vector([0.0, 1.0]);

  pub fn from_angle(angle: f64) -> Vector<2> {
    Vector([angle.cos(), angle.sin()])
  }

  /// Scalar (z component of the) cross product.
  pub fn cross(&self, other: &Vector<2>) -> f64 {
    self.0[0] * other.0[1] - self.0[1] * other.0[0]
  }

  /// Counter-clockwise perpendicular.
  pub fn perp(&self) -> Vector<2> {
    Vector([-self.0[1], self.0[0]])
  }

  /// Counter-clockwise rotation by `angle` radians.
  pub fn rotate(&self, angle: f64) -> Vector<2> {
    let (sin, cos) = angle.sin_cos();
    Vector([
      self.0[0] * cos - self.0[1] * sin,
      self.0[0] * sin + self.0[1] * cos,
    ])
  }

  /// Angle to the positive x axis in `(-π, π]`.
  pub fn angle(&self) -> f64 {
    self.0[1].atan2(self.0[0])
  }

  pub fn is_parallel(&self, other: &Vector<2>, tolerance: f64) -> bool {
    self.cross(other).abs() <= tolerance
  }
}

impl Vector<3> {
  pub fn cross(&self, other: &Vector<3>) -> Vector<3> {
    let [a1, a2, a3] = self.0;
    let [b1, b2, b3] = other.0;
    Vector([a2 * b3 - a3 * b2, a3 * b1 - a1 * b3, a1 * b2 - a2 * b1])
  }

  /// Rodrigues rotation around `axis` by `angle` radians. A degenerate axis
  /// leaves the vector unchanged.
  pub fn rotate_about(&self, axis: &Vector<3>, angle: f64) -> Vector<3> {
    let k = match axis.normalize() {
      Some(k) => k,
      None => return *self,
    };
    let (sin, cos) = angle.sin_cos();
    *self * cos + k.cross(self) * sin + k * (k.dot(self) * (1.0 - cos))
  }
}

impl<const N: usize> Index<usize> for Vector<N> {
  type Output = f64;
  fn index(&self, index: usize) -> &f64 {
    self.0.index(index)
  }
}

impl<const N: usize> From<Point<N>> for Vector<N> {
  fn from(point: Point<N>) -> Vector<N> {
    Vector(point.array)
  }
}

impl<'a, const N: usize> From<&'a Point<N>> for &'a Vector<N> {
  fn from(point: &Point<N>) -> &Vector<N> {
    // Both types are #[repr(transparent)] wrappers around [f64; N].
    unsafe { &*(point as *const Point<N> as *const Vector<N>) }
  }
}

impl From<(f64, f64)> for Vector<2> {
  fn from(v: (f64, f64)) -> Vector<2> {
    Vector([v.0, v.1])
  }
}

impl<const N: usize> fmt::Display for Vector<N> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&Point::new(self.0), f)
  }
}

mod add;
mod div;
mod mul;
mod sub;

impl<const N: usize> Zero for Vector<N> {
  fn zero() -> Vector<N> {
    Vector([0.0; N])
  }
  fn is_zero(&self) -> bool {
    self.0.iter().all(Zero::is_zero)
  }
}

impl<const N: usize> Sum for Vector<N> {
  fn sum<I>(iter: I) -> Vector<N>
  where
    I: Iterator<Item = Vector<N>>,
  {
    let mut acc = Zero::zero();
    for vec in iter {
      acc += vec;
    }
    acc
  }
}

impl<const N: usize> Neg for Vector<N> {
  type Output = Self;
  fn neg(self) -> Self {
    Vector(array_init(|i| -self.0[i]))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::*;
  use approx::assert_abs_diff_eq;
  use std::f64::consts::PI;

  use proptest::prelude::*;

  proptest! {
    #[test]
    fn normalized_has_unit_length(v in any_vector()) {
      if let Some(n) = v.normalize() {
        prop_assert!((n.magnitude() - 1.0).abs() < 1e-12);
      }
    }

    #[test]
    fn rotation_preserves_length(v in any_vector(), angle in -10.0..10.0f64) {
      prop_assert!((v.rotate(angle).magnitude() - v.magnitude()).abs() < 1e-9);
    }

    #[test]
    fn cross_is_antisymmetric(a in any_vector(), b in any_vector()) {
      prop_assert_eq!(a.cross(&b), -b.cross(&a));
    }
  }

  #[test]
  fn degenerate_normalize() {
    assert_eq!(Vector([0.0, 0.0]).normalize(), None);
    assert_eq!(Vector([1e-12, 0.0]).normalize(), None);
    assert_eq!(Vector([0.0, 0.0]).normalize_or(Vector::UNIT_X), Vector::UNIT_X);
  }

  #[test]
  fn rodrigues() {
    let v = Vector([1.0, 0.0, 0.0]);
    let r = v.rotate_about(&Vector([0.0, 0.0, 2.0]), PI / 2.0);
    assert_abs_diff_eq!(r.0[0], 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(r.0[1], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(r.0[2], 0.0, epsilon = 1e-12);
    assert_eq!(v.rotate_about(&Vector([0.0, 0.0, 0.0]), 1.0), v);
  }

  #[test]
  fn sum() {
    let total: Vector<2> = vec![Vector([1.0, 2.0]), Vector([3.0, 4.0])].into_iter().sum();
    assert_eq!(total, Vector([4.0, 6.0]));
  }
}
