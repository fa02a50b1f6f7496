use array_init::array_init;
use std::ops::Mul;

use crate::data::Point;
use crate::data::Polygon;
use crate::data::Vector;
use crate::matrix::Matrix;

/// Rotation amount, given in either unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Angle {
  Radians(f64),
  Degrees(f64),
}

impl Angle {
  pub fn radians(value: f64) -> Angle {
    Angle::Radians(value)
  }

  pub fn degrees(value: f64) -> Angle {
    Angle::Degrees(value)
  }

  pub fn as_radians(self) -> f64 {
    match self {
      Angle::Radians(r) => r,
      Angle::Degrees(d) => d.to_radians(),
    }
  }
}

/// Scale factor: the same along both axes, or one per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
  Uniform(f64),
  Axes(f64, f64),
}

impl Scale {
  pub fn factors(self) -> Vector<2> {
    match self {
      Scale::Uniform(s) => Vector([s, s]),
      Scale::Axes(sx, sy) => Vector([sx, sy]),
    }
  }

  pub fn is_uniform(self) -> bool {
    match self {
      Scale::Uniform(_) => true,
      Scale::Axes(sx, sy) => sx == sy,
    }
  }

  /// Factor applied to lengths that have no preferred direction, such as a
  /// circle's radius.
  pub fn length_factor(self) -> f64 {
    match self {
      Scale::Uniform(s) => s.abs(),
      Scale::Axes(sx, sy) => (sx * sy).abs().sqrt(),
    }
  }
}

impl From<f64> for Scale {
  fn from(s: f64) -> Scale {
    Scale::Uniform(s)
  }
}

// Use const generics once generic_const_exprs is stable and store an
// [[f64; N + 1]; N + 1] directly.
/// Affine transform in homogeneous coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform<const N: usize>(Matrix);

impl<const N: usize> Transform<N> {
  fn new(m: Matrix) -> Transform<N> {
    assert_eq!(m.ncols(), N + 1);
    assert_eq!(m.nrows(), N + 1);
    Transform(m)
  }

  pub fn identity() -> Transform<N> {
    Transform::new(Matrix::identity(N + 1))
  }

  pub fn translate(vec: Vector<N>) -> Transform<N> {
    let mut m = Matrix::identity(N + 1);
    for i in 0..N {
      m[(i, N)] = vec[i];
    }
    Transform::new(m)
  }

  pub fn scale(vec: Vector<N>) -> Transform<N> {
    let mut m = Matrix::identity(N + 1);
    for i in 0..N {
      m[(i, i)] = vec[i];
    }
    Transform::new(m)
  }

  pub fn uniform_scale(v: f64) -> Transform<N> {
    Transform::scale(Vector([v; N]))
  }

  /// Conjugate `inner` so that it acts around `center` instead of the origin.
  pub fn about(center: &Point<N>, inner: Transform<N>) -> Transform<N> {
    let to_origin = Transform::translate(-Vector(center.array));
    let back = Transform::translate(Vector(center.array));
    back * inner * to_origin
  }

  /// Apply only the linear part, ignoring translation.
  pub fn apply_vector(&self, v: &Vector<N>) -> Vector<N> {
    Vector(array_init(|i| (0..N).map(|k| self.0[(i, k)] * v.0[k]).sum()))
  }
}

impl Transform<2> {
  /// Counter-clockwise rotation around the origin by `angle` radians.
  pub fn rotate(angle: f64) -> Transform<2> {
    let (sin, cos) = angle.sin_cos();
    let mut m = Matrix::identity(3);
    m[(0, 0)] = cos;
    m[(0, 1)] = -sin;
    m[(1, 0)] = sin;
    m[(1, 1)] = cos;
    Transform::new(m)
  }
}

impl Transform<3> {
  /// Rotation around an axis through the origin by `angle` radians.
  pub fn rotate_axis(axis: &Vector<3>, angle: f64) -> Transform<3> {
    let mut m = Matrix::identity(4);
    let basis = [
      Vector([1.0, 0.0, 0.0]),
      Vector([0.0, 1.0, 0.0]),
      Vector([0.0, 0.0, 1.0]),
    ];
    for (col, e) in basis.iter().enumerate() {
      let image = e.rotate_about(axis, angle);
      for row in 0..3 {
        m[(row, col)] = image.0[row];
      }
    }
    Transform::new(m)
  }
}

impl<const N: usize> Mul for Transform<N> {
  type Output = Transform<N>;
  fn mul(self, other: Transform<N>) -> Transform<N> {
    Transform::new(self.0 * other.0)
  }
}

impl<const N: usize> Mul<&Transform<N>> for &Transform<N> {
  type Output = Transform<N>;
  fn mul(self, other: &Transform<N>) -> Transform<N> {
    Transform::new(&self.0 * &other.0)
  }
}

// &t * &p = p
impl<const N: usize> Mul<&Point<N>> for &Transform<N> {
  type Output = Point<N>;
  fn mul(self, other: &Point<N>) -> Point<N> {
    let mut v = Matrix::new(N + 1, 1);
    for i in 0..N {
      v[(i, 0)] = other.array[i]
    }
    v[(N, 0)] = 1.0;
    let ret = &self.0 * v;
    let normalizer = ret[(N, 0)];
    Point::new(array_init(|i| ret[(i, 0)] / normalizer))
  }
}

impl<const N: usize> Mul<Point<N>> for &Transform<N> {
  type Output = Point<N>;
  fn mul(self, other: Point<N>) -> Point<N> {
    self * &other
  }
}

impl<const N: usize> Mul<Point<N>> for Transform<N> {
  type Output = Point<N>;
  fn mul(self, other: Point<N>) -> Point<N> {
    &self * &other
  }
}

impl Mul<&Polygon> for &Transform<2> {
  type Output = Polygon;
  fn mul(self, other: &Polygon) -> Polygon {
    other.clone().map_points(|p| self * p)
  }
}

impl Mul<Polygon> for &Transform<2> {
  type Output = Polygon;
  fn mul(self, mut other: Polygon) -> Polygon {
    for pt in other.iter_mut() {
      *pt = self * *pt;
    }
    other
  }
}

impl Mul<Polygon> for Transform<2> {
  type Output = Polygon;
  fn mul(self, other: Polygon) -> Polygon {
    (&self).mul(other)
  }
}
