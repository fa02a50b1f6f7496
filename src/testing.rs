// This module contains strategies for:
//  * points and vectors
//  * polygons (simple, convex and regular)
//  * every shape kind
// A Strategy is a way to generate a shrinkable value.
use crate::data::*;

use core::ops::Range;
use proptest::arbitrary::*;
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::strategy::*;
use rand::SeedableRng;
use std::f64::consts::TAU;

const COORD: f64 = 1000.0;

///////////////////////////////////////////////////////////////////////////////
// Points and vectors

pub fn any_coord() -> impl Strategy<Value = f64> {
  -COORD..COORD
}

pub fn any_point() -> impl Strategy<Value = Point<2>> {
  (any_coord(), any_coord()).prop_map(|(x, y)| Point::new([x, y]))
}

pub fn any_vector() -> impl Strategy<Value = Vector<2>> {
  (-100.0..100.0, -100.0..100.0).prop_map(|(x, y)| Vector([x, y]))
}

pub fn any_nonzero_vector() -> impl Strategy<Value = Vector<2>> {
  any_vector().prop_filter("Direction too short", |v| v.magnitude() > 1e-3)
}

///////////////////////////////////////////////////////////////////////////////
// Polygons

pub fn any_triangle() -> impl Strategy<Value = Triangle> {
  (any_point(), any_point(), any_point()).prop_map(|(a, b, c)| Triangle::new([a, b, c]))
}

/// Simple star-shaped polygons: vertices sorted by angle around a center,
/// with consecutive angles less than π apart.
pub fn any_polygon() -> impl Strategy<Value = Polygon> {
  (3..20usize)
    .prop_flat_map(|n| (any_point(), vec((0.0..0.4, 1.0..100.0), n)))
    .prop_map(|(center, spokes)| {
      let n = spokes.len() as f64;
      let points = spokes
        .iter()
        .enumerate()
        .map(|(i, &(jitter, radius))| {
          let angle = (i as f64 + jitter) * TAU / n;
          center + Vector::from_angle(angle) * radius
        })
        .collect();
      Polygon::new_unchecked(points)
    })
}

/// Cocircular, evenly spaced vertices.
pub fn any_regular_polygon() -> impl Strategy<Value = Polygon> {
  (3..40usize, any_point(), 0.1..100.0, 0.0..TAU).prop_map(|(n, center, radius, phase)| {
    let points = (0..n)
      .map(|i| center + Vector::from_angle(phase + TAU * i as f64 / n as f64) * radius)
      .collect();
    Polygon::new_unchecked(points)
  })
}

pub fn any_convex() -> impl Strategy<Value = PolygonConvex> {
  any::<PolygonConvex>()
}

impl Arbitrary for PolygonConvex {
  type Strategy = Map<(Range<usize>, StrategyFor<u64>), fn(_: (usize, u64)) -> PolygonConvex>;
  type Parameters = Range<usize>;
  fn arbitrary_with(mut range: Self::Parameters) -> Self::Strategy {
    if range.is_empty() {
      range = 3usize..100;
    }
    (range, any::<u64>()).prop_map(|(n, seed)| {
      let rng = &mut rand::rngs::SmallRng::seed_from_u64(seed);
      PolygonConvex::random(n.max(3), rng)
    })
  }
}

///////////////////////////////////////////////////////////////////////////////
// Curves and shapes

pub fn any_bezier() -> impl Strategy<Value = BezierCurve> {
  vec((-100.0..100.0, -100.0..100.0), 2..6).prop_map(|pts| {
    let points = pts.into_iter().map(|(x, y)| Point::new([x, y])).collect();
    BezierCurve::new(points).unwrap()
  })
}

fn any_extent() -> impl Strategy<Value = f64> {
  0.5..50.0
}

/// One valid shape of every kind, with moderate sizes.
pub fn any_shape() -> impl Strategy<Value = Shape> {
  prop_oneof![
    (any_point(), any_nonzero_vector()).prop_map(|(p, d)| Shape::from(Line::new(p, d))),
    (any_point(), any_nonzero_vector()).prop_map(|(p, d)| Shape::from(Ray::new(p, d))),
    (any_point(), any_point()).prop_map(|(a, b)| Shape::from(Segment::new(a, b))),
    (any_point(), any_extent()).prop_map(|(c, r)| Shape::from(Circle::new(c, r).unwrap())),
    (any_point(), 1.0..50.0, 1.0..50.0, any_nonzero_vector())
      .prop_map(|(c, a, b, d)| Shape::from(Ellipse::new(c, a, b, d).unwrap())),
    (any_point(), any_extent(), any_extent(), any_nonzero_vector())
      .prop_map(|(c, w, h, d)| Shape::from(Rectangle::new(c, w, h, d).unwrap())),
    any_triangle().prop_map(Shape::from),
    any_polygon().prop_map(Shape::from),
    (any_point(), any_extent(), -10.0..10.0, -TAU..TAU)
      .prop_map(|(c, r, start, sweep)| Shape::from(Sector::new(c, r, start, sweep).unwrap())),
    any_bezier().prop_map(Shape::from),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Orientation;

  use test_strategy::proptest;

  #[proptest]
  fn polygons_are_simple_and_valid(#[strategy(any_polygon())] poly: Polygon) {
    prop_assert!(poly.validate().is_ok());
    prop_assert_eq!(poly.orientation(), Orientation::CounterClockWise);
    prop_assert!(poly.area() > 0.0);
  }

  #[proptest]
  fn regular_polygons_are_convex(#[strategy(any_regular_polygon())] poly: Polygon) {
    prop_assert!(poly.is_convex());
  }

  #[proptest]
  fn shapes_are_finite(#[strategy(any_shape())] shape: Shape) {
    prop_assert!(shape.center().is_finite());
  }
}
