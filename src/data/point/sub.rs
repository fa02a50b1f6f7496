use array_init::array_init;
use std::ops::Sub;
use std::ops::SubAssign;

use super::Point;
use crate::data::Vector;

// &point - &point = vector
impl<'a, 'b, const N: usize> Sub<&'a Point<N>> for &'b Point<N> {
  type Output = Vector<N>;

  fn sub(self: &'b Point<N>, other: &'a Point<N>) -> Self::Output {
    Vector(array_init(|i| self.array[i] - other.array[i]))
  }
}

// point - point = vector
impl<const N: usize> Sub<Point<N>> for Point<N> {
  type Output = Vector<N>;

  fn sub(self: Point<N>, other: Point<N>) -> Self::Output {
    Sub::sub(&self, &other)
  }
}

// &point - &vector = point
impl<'a, 'b, const N: usize> Sub<&'a Vector<N>> for &'b Point<N> {
  type Output = Point<N>;

  fn sub(self: &'b Point<N>, other: &'a Vector<N>) -> Self::Output {
    Point {
      array: array_init(|i| self.array[i] - other.0[i]),
    }
  }
}

// point - vector = point
impl<const N: usize> Sub<Vector<N>> for Point<N> {
  type Output = Point<N>;

  fn sub(self: Point<N>, other: Vector<N>) -> Self::Output {
    &self - &other
  }
}

// point -= &vector
impl<const N: usize> SubAssign<&Vector<N>> for Point<N> {
  fn sub_assign(&mut self, other: &Vector<N>) {
    for i in 0..N {
      self.array[i] -= other.0[i]
    }
  }
}
