use array_init::array_init;
use std::ops::Div;

use super::Vector;

impl<const N: usize> Div<f64> for Vector<N> {
  type Output = Vector<N>;

  fn div(self: Vector<N>, other: f64) -> Self::Output {
    Vector(array_init(|i| self.0[i] / other))
  }
}
