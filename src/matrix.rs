use std::ops::Index;
use std::ops::IndexMut;
use std::ops::Mul;

/// Dense row-major matrix of `f64`.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
  nrows: usize,
  ncols: usize,
  elements: Vec<f64>,
}

impl Matrix {
  pub fn new(nrows: usize, ncols: usize) -> Matrix {
    Matrix {
      nrows,
      ncols,
      elements: vec![0.0; nrows * ncols],
    }
  }

  pub fn identity(n: usize) -> Matrix {
    let mut m = Matrix::new(n, n);
    for i in 0..n {
      m[(i, i)] = 1.0;
    }
    m
  }

  fn validate(&self) {
    assert_eq!(self.elements.len(), self.nrows * self.ncols)
  }

  pub fn nrows(&self) -> usize {
    self.nrows
  }

  pub fn ncols(&self) -> usize {
    self.ncols
  }
}

impl Index<(usize, usize)> for Matrix {
  type Output = f64;
  fn index(&self, key: (usize, usize)) -> &f64 {
    self.elements.index(key.0 * self.ncols + key.1)
  }
}

impl IndexMut<(usize, usize)> for Matrix {
  fn index_mut(&mut self, key: (usize, usize)) -> &mut f64 {
    self.elements.index_mut(key.0 * self.ncols + key.1)
  }
}

impl<'a, 'b> Mul<&'b Matrix> for &'a Matrix {
  type Output = Matrix;
  // n*m * m*p = n*p
  fn mul(self, other: &Matrix) -> Matrix {
    let n = self.nrows;
    let m = self.ncols;
    let p = other.ncols;
    assert_eq!(self.ncols, other.nrows);
    let mut out = Matrix::new(n, p);
    for i in 0..n {
      for j in 0..p {
        for k in 0..m {
          out[(i, j)] += self[(i, k)] * other[(k, j)]
        }
      }
    }
    out.validate();
    out
  }
}

impl<'a> Mul<Matrix> for &'a Matrix {
  type Output = Matrix;
  fn mul(self, other: Matrix) -> Matrix {
    self * &other
  }
}

impl<'a> Mul<&'a Matrix> for Matrix {
  type Output = Matrix;
  fn mul(self, other: &Matrix) -> Matrix {
    &self * other
  }
}

impl Mul<Matrix> for Matrix {
  type Output = Matrix;
  fn mul(self, other: Matrix) -> Matrix {
    &self * &other
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn identity_is_neutral() {
    let mut m = Matrix::new(2, 2);
    m[(0, 0)] = 1.0;
    m[(0, 1)] = 2.0;
    m[(1, 0)] = 3.0;
    m[(1, 1)] = 4.0;
    assert_eq!(&m * &Matrix::identity(2), m);
    assert_eq!(Matrix::identity(2) * &m, m);
  }

  #[test]
  fn row_major_product() {
    let mut a = Matrix::new(1, 2);
    a[(0, 0)] = 1.0;
    a[(0, 1)] = 2.0;
    let mut b = Matrix::new(2, 1);
    b[(0, 0)] = 3.0;
    b[(1, 0)] = 4.0;
    let c = a * b;
    assert_eq!((c.nrows(), c.ncols()), (1, 1));
    assert_eq!(c[(0, 0)], 11.0);
  }
}
