use array_init::array_init;
use std::ops::Sub;

use super::Vector;

impl<'a, 'b, const N: usize> Sub<&'a Vector<N>> for &'b Vector<N> {
  type Output = Vector<N>;

  fn sub(self: &'b Vector<N>, other: &'a Vector<N>) -> Self::Output {
    Vector(array_init(|i| self.0[i] - other.0[i]))
  }
}

impl<const N: usize> Sub<Vector<N>> for Vector<N> {
  type Output = Vector<N>;

  fn sub(self: Vector<N>, other: Vector<N>) -> Self::Output {
    &self - &other
  }
}
