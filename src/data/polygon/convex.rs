use claims::debug_assert_ok;
use ordered_float::OrderedFloat;
use rand::distributions::{Distribution, Standard};
use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::Deref;

use crate::data::{Point, PointLocation, Triangle, Vector};
use crate::{Error, Orientation};

use super::Polygon;

/// Polygon with strictly convex, counter-clockwise vertices.
#[derive(Debug, Clone)]
pub struct PolygonConvex(Polygon);

///////////////////////////////////////////////////////////////////////////////
// PolygonConvex

impl PolygonConvex {
  /// Check convexity of `poly`. Clockwise input is reversed first.
  pub fn new(mut poly: Polygon) -> Result<PolygonConvex, Error> {
    poly.ensure_ccw();
    let convex = PolygonConvex(poly);
    convex.validate()?;
    Ok(convex)
  }

  /// $O(1)$ Assume that a polygon is convex.
  ///
  /// # Safety
  /// The input polygon has to be strictly convex, ie. no vertices are allowed to
  /// be concave or colinear.
  pub fn new_unchecked(poly: Polygon) -> PolygonConvex {
    let convex = PolygonConvex(poly);
    debug_assert_ok!(convex.validate());
    convex
  }

  /// $O(\log n)$ point location by binary search over the fan around the
  /// first vertex.
  pub fn locate(&self, pt: &Point<2>) -> PointLocation {
    let vertices = self.0.vertices();
    let n = vertices.len();
    let p0 = &vertices[0];
    let mut lower = 1;
    let mut upper = n - 1;
    while lower + 1 < upper {
      let middle = (lower + upper) / 2;
      if Orientation::new(p0, &vertices[middle], pt) == Orientation::CounterClockWise {
        lower = middle;
      } else {
        upper = middle;
      }
    }
    let p1 = &vertices[lower];
    let p2 = &vertices[upper];
    match Triangle::new([*p0, *p1, *p2]).locate(pt) {
      PointLocation::OnBoundary => {
        // Fan diagonals are interior.
        let on_edge = Orientation::new(p1, p2, pt).is_colinear()
          || (lower == 1 && Orientation::new(p0, p1, pt).is_colinear())
          || (upper == n - 1 && Orientation::new(p2, p0, pt).is_colinear());
        if on_edge {
          PointLocation::OnBoundary
        } else {
          PointLocation::Inside
        }
      }
      location => location,
    }
  }

  /// $O(n)$
  pub fn validate(&self) -> Result<(), Error> {
    self.0.validate()?;
    let n = self.0.vertex_count();
    for i in 0..n {
      let turn = Orientation::new(self.0.point(i), self.0.point(i + 1), self.0.point(i + 2));
      if turn != Orientation::CounterClockWise {
        return Err(Error::ConvexViolation);
      }
    }
    if !self.0.is_convex() {
      return Err(Error::ConvexViolation);
    }
    Ok(())
  }

  /// $O(1)$
  pub fn polygon(&self) -> &Polygon {
    self.into()
  }

  /// $O(n \log n)$ Sample a random convex polygon with `n` vertices.
  ///
  /// The edge vectors are random, sum to zero and are sorted by angle. The
  /// first vertex sits at the origin end of the last edge; width and height
  /// are both 1.
  ///
  /// ```rust
  /// # use rshape::data::*;
  /// let convex = PolygonConvex::random(10, &mut rand::thread_rng());
  /// assert_eq!(convex.vertex_count(), 10);
  /// assert!(convex.is_convex());
  /// ```
  pub fn random<R>(n: usize, rng: &mut R) -> PolygonConvex
  where
    R: Rng + ?Sized,
  {
    let n = n.max(3);
    loop {
      let mut vs = random_vectors(n, rng);
      vs.sort_by_key(|v| OrderedFloat(v.angle()));
      let vertices: Vec<Point<2>> = vs
        .into_iter()
        .scan(Point::origin(), |st, vec| {
          *st += vec;
          Some(*st)
        })
        .collect();
      debug_assert_eq!(vertices.len(), n);
      let convex = PolygonConvex(Polygon::new_unchecked(vertices));
      // Coinciding edge angles produce colinear vertices. Try again.
      if convex.validate().is_ok() {
        return convex;
      }
    }
  }
}

///////////////////////////////////////////////////////////////////////////////
// Trait Implementations

impl Deref for PolygonConvex {
  type Target = Polygon;
  fn deref(&self) -> &Self::Target {
    self.polygon()
  }
}

impl From<PolygonConvex> for Polygon {
  fn from(convex: PolygonConvex) -> Polygon {
    convex.0
  }
}

impl<'a> From<&'a PolygonConvex> for &'a Polygon {
  fn from(convex: &'a PolygonConvex) -> &'a Polygon {
    &convex.0
  }
}

impl Distribution<PolygonConvex> for Standard {
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PolygonConvex {
    PolygonConvex::random(100, rng)
  }
}

///////////////////////////////////////////////////////////////////////////////
// Helper functions

// Property: random_between_iter(n, &mut rng).sum::<f64>() == 1
fn random_between_iter<R>(n: usize, rng: &mut R) -> impl Iterator<Item = f64>
where
  R: Rng + ?Sized,
{
  assert!(n > 0);
  let mut cuts = Vec::with_capacity(n);
  while cuts.len() < n - 1 {
    cuts.push(rng.gen_range(0.0..1.0));
  }
  cuts.sort_unstable_by_key(|&x| OrderedFloat(x));
  cuts.push(1.0);
  cuts.into_iter().scan(0.0, |from, x| {
    let out = x - *from;
    *from = x;
    Some(out)
  })
}

// Property: random_between_zero(10, &mut rng).iter().sum::<f64>() == 0
fn random_between_zero<R>(n: usize, rng: &mut R) -> Vec<f64>
where
  R: Rng + ?Sized,
{
  assert!(n >= 2);
  let n_positive = rng.gen_range(1..n); // [1;n[
  let n_negative = n - n_positive;
  assert!(n_positive + n_negative == n);
  let positive: Vec<f64> = random_between_iter(n_positive, rng).collect();
  let negative: Vec<f64> = random_between_iter(n_negative, rng).map(|i| -i).collect();
  let mut result: Vec<f64> = positive.into_iter().chain(negative).collect();
  result.shuffle(rng);
  result
}

// Random vectors that sum to zero.
fn random_vectors<R>(n: usize, rng: &mut R) -> Vec<Vector<2>>
where
  R: Rng + ?Sized,
{
  random_between_zero(n, rng)
    .into_iter()
    .zip(random_between_zero(n, rng))
    .map(|(a, b)| Vector([a, b]))
    .collect()
}

///////////////////////////////////////////////////////////////////////////////
// Tests
