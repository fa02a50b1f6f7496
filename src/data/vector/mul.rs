use array_init::array_init;
use std::ops::Mul;
use std::ops::MulAssign;

use super::Vector;

impl<const N: usize> Mul<f64> for Vector<N> {
  type Output = Vector<N>;

  fn mul(self: Vector<N>, other: f64) -> Self::Output {
    Vector(array_init(|i| self.0[i] * other))
  }
}

impl<const N: usize> Mul<f64> for &Vector<N> {
  type Output = Vector<N>;

  fn mul(self, other: f64) -> Vector<N> {
    *self * other
  }
}

impl<const N: usize> Mul<Vector<N>> for f64 {
  type Output = Vector<N>;

  fn mul(self, other: Vector<N>) -> Vector<N> {
    other * self
  }
}

impl<const N: usize> MulAssign<f64> for Vector<N> {
  fn mul_assign(&mut self, other: f64) {
    for elt in self.0.iter_mut() {
      *elt *= other
    }
  }
}
