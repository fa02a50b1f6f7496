use array_init::array_init;
use std::ops::Add;
use std::ops::AddAssign;

use super::Vector;

// &vector + &vector = vector
impl<'a, 'b, const N: usize> Add<&'a Vector<N>> for &'b Vector<N> {
  type Output = Vector<N>;

  fn add(self: &'b Vector<N>, other: &'a Vector<N>) -> Self::Output {
    Vector(array_init(|i| self.0[i] + other.0[i]))
  }
}

// vector + vector = vector
impl<const N: usize> Add<Vector<N>> for Vector<N> {
  type Output = Vector<N>;

  fn add(self: Vector<N>, other: Vector<N>) -> Self::Output {
    &self + &other
  }
}

// vector += vector
impl<const N: usize> AddAssign<Vector<N>> for Vector<N> {
  fn add_assign(&mut self, other: Vector<N>) {
    for i in 0..N {
      self.0[i] += other.0[i]
    }
  }
}
