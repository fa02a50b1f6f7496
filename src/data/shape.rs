use ordered_float::OrderedFloat;
use std::borrow::Cow;
use std::fmt;

use super::*;
use crate::intersection::Registry;
use crate::EPSILON;

///////////////////////////////////////////////////////////////////////////////
// ShapeKind

/// Nominal tag of every 2D shape variant. The intersection registry
/// dispatches on pairs of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShapeKind {
  Line,
  Ray,
  Segment,
  Circle,
  Ellipse,
  Rectangle,
  Triangle,
  Polygon,
  Sector,
  BezierCurve,
}

impl ShapeKind {
  pub const COUNT: usize = 10;

  pub const ALL: [ShapeKind; ShapeKind::COUNT] = [
    ShapeKind::Line,
    ShapeKind::Ray,
    ShapeKind::Segment,
    ShapeKind::Circle,
    ShapeKind::Ellipse,
    ShapeKind::Rectangle,
    ShapeKind::Triangle,
    ShapeKind::Polygon,
    ShapeKind::Sector,
    ShapeKind::BezierCurve,
  ];

  pub fn index(self) -> usize {
    self as usize
  }

  pub fn name(self) -> &'static str {
    match self {
      ShapeKind::Line => "Line",
      ShapeKind::Ray => "Ray",
      ShapeKind::Segment => "Segment",
      ShapeKind::Circle => "Circle",
      ShapeKind::Ellipse => "Ellipse",
      ShapeKind::Rectangle => "Rectangle",
      ShapeKind::Triangle => "Triangle",
      ShapeKind::Polygon => "Polygon",
      ShapeKind::Sector => "Sector",
      ShapeKind::BezierCurve => "BezierCurve",
    }
  }
}

impl fmt::Display for ShapeKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

///////////////////////////////////////////////////////////////////////////////
// Geometry

/// Operations shared by every 2D shape.
///
/// Each transform comes in an in-place form (`translate`, `rotate`, `scale`)
/// and a copying form (`translated`, `rotated`, `scaled`). The copying form
/// clones first, so the result never shares storage with `self`.
pub trait Geometry: Clone + fmt::Display {
  fn kind(&self) -> ShapeKind;

  /// Geometric equality: both values describe the same point set, within
  /// `tolerance`.
  fn approx_eq(&self, other: &Self, tolerance: f64) -> bool;

  /// Default pivot for rotation and scaling.
  fn center(&self) -> Point<2>;

  fn aabb(&self) -> Aabb;

  /// `(width, height)` of [`Geometry::aabb`].
  fn bounding_box_size(&self) -> Vector<2> {
    self.aabb().size()
  }

  fn translate(&mut self, offset: &Vector<2>);

  /// Move by `amount` along both axes.
  fn translate_by(&mut self, amount: f64) {
    self.translate(&Vector([amount, amount]))
  }

  #[must_use]
  fn translated(&self, offset: &Vector<2>) -> Self {
    let mut copy = self.clone();
    copy.translate(offset);
    copy
  }

  /// Counter-clockwise rotation around `center`, or [`Geometry::center`].
  fn rotate(&mut self, angle: Angle, center: Option<Point<2>>);

  #[must_use]
  fn rotated(&self, angle: Angle, center: Option<Point<2>>) -> Self {
    let mut copy = self.clone();
    copy.rotate(angle, center);
    copy
  }

  /// Scale around `center`, or [`Geometry::center`].
  fn scale(&mut self, factor: Scale, center: Option<Point<2>>);

  #[must_use]
  fn scaled(&self, factor: Scale, center: Option<Point<2>>) -> Self {
    let mut copy = self.clone();
    copy.scale(factor, center);
    copy
  }

  /// Membership test. Closed shapes include their interior; curves only
  /// their trace.
  fn contains_point_with(&self, pt: &Point<2>, tolerance: f64) -> bool;

  fn contains_point(&self, pt: &Point<2>) -> bool {
    self.contains_point_with(pt, EPSILON)
  }

  /// Nearest point of the shape. With `boundary == false` a contained point
  /// is its own closest point; otherwise the nearest boundary point is
  /// returned.
  fn closest_point(&self, pt: &Point<2>, boundary: bool) -> Point<2>;

  /// Zero for contained points.
  fn distance_to_point(&self, pt: &Point<2>) -> f64 {
    self.closest_point(pt, false).distance(pt)
  }

  fn project_point(&self, pt: &Point<2>) -> Point<2> {
    self.closest_point(pt, true)
  }

  fn as_shape(&self) -> Cow<'_, Shape>;

  /// Intersection points of the two boundaries, as computed by the handler
  /// registered for this pair of kinds. Unsupported pairs report no
  /// intersection.
  fn intersects<G: Geometry>(&self, other: &G) -> (bool, Vec<Point<2>>) {
    Registry::global().intersect(&self.as_shape(), &other.as_shape())
  }

  fn has_intersection<G: Geometry>(&self, other: &G) -> bool {
    Registry::global().has_intersection(&self.as_shape(), &other.as_shape())
  }
}

macro_rules! impl_geometric_eq {
  ( $( $ty:ty ),* ) => {
    $(
      impl PartialEq for $ty {
        fn eq(&self, other: &Self) -> bool {
          Geometry::approx_eq(self, other, EPSILON)
        }
      }
    )*
  };
}

impl_geometric_eq!(
  Line,
  Ray,
  Segment,
  Circle,
  Ellipse,
  Rectangle,
  Triangle,
  Polygon,
  Sector,
  BezierCurve<2>,
  Shape
);

///////////////////////////////////////////////////////////////////////////////
// Polygonal

/// Shapes whose boundary is a closed ring of straight edges.
pub trait Polygonal {
  /// Corners in boundary order.
  fn ring(&self) -> Cow<'_, [Point<2>]>;

  fn edges(&self) -> Vec<Segment> {
    let ring = self.ring();
    let n = ring.len();
    (0..n)
      .map(|i| Segment::new(ring[i], ring[(i + 1) % n]))
      .collect()
  }

  fn perimeter(&self) -> f64 {
    self.edges().iter().map(Segment::length).sum()
  }

  fn on_boundary(&self, pt: &Point<2>, tolerance: f64) -> bool {
    self
      .edges()
      .iter()
      .any(|edge| edge.contains_point_with(pt, tolerance))
  }

  /// Even-odd ray crossing test. Unreliable exactly on the boundary, which
  /// is why [`Polygonal::locate_with`] re-checks the edges.
  fn crossing_test(&self, pt: &Point<2>) -> bool {
    let ring = self.ring();
    let n = ring.len();
    let [x, y] = pt.array;
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
      let [xi, yi] = ring[i].array;
      let [xj, yj] = ring[j].array;
      if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
        inside = !inside;
      }
      j = i;
    }
    inside
  }

  fn locate_with(&self, pt: &Point<2>, tolerance: f64) -> PointLocation {
    if self.on_boundary(pt, tolerance) {
      PointLocation::OnBoundary
    } else if self.crossing_test(pt) {
      PointLocation::Inside
    } else {
      PointLocation::Outside
    }
  }

  fn closest_boundary_point(&self, pt: &Point<2>) -> Point<2> {
    closest_of(self.edges().iter().map(|edge| edge.closest_point(pt, true)), pt)
      .unwrap_or(*pt)
  }
}

/// The candidate nearest to `pt`.
pub(crate) fn closest_of<I>(candidates: I, pt: &Point<2>) -> Option<Point<2>>
where
  I: IntoIterator<Item = Point<2>>,
{
  candidates
    .into_iter()
    .min_by_key(|candidate| OrderedFloat(candidate.squared_distance(pt)))
}

/// Shared `closest_point` for closed polygonal shapes.
pub(crate) fn closest_point_polygonal<P>(shape: &P, pt: &Point<2>, boundary: bool) -> Point<2>
where
  P: Polygonal + Geometry,
{
  if !boundary && shape.contains_point(pt) {
    *pt
  } else {
    shape.closest_boundary_point(pt)
  }
}

/// Resolve the pivot of a rotation or scaling.
pub(crate) fn pivot<G: Geometry>(shape: &G, center: Option<Point<2>>) -> Point<2> {
  center.unwrap_or_else(|| shape.center())
}

pub(crate) fn rotation(angle: Angle, center: &Point<2>) -> Transform<2> {
  Transform::about(center, Transform::rotate(angle.as_radians()))
}

pub(crate) fn scaling(factor: Scale, center: &Point<2>) -> Transform<2> {
  Transform::about(center, Transform::scale(factor.factors()))
}

///////////////////////////////////////////////////////////////////////////////
// Shape

/// Any 2D shape, tagged by its kind.
#[derive(Debug, Clone)]
pub enum Shape {
  Line(Line),
  Ray(Ray),
  Segment(Segment),
  Circle(Circle),
  Ellipse(Ellipse),
  Rectangle(Rectangle),
  Triangle(Triangle),
  Polygon(Polygon),
  Sector(Sector),
  BezierCurve(BezierCurve<2>),
}

macro_rules! each_shape {
  ($value:expr, $inner:ident => $body:expr) => {
    match $value {
      Shape::Line($inner) => $body,
      Shape::Ray($inner) => $body,
      Shape::Segment($inner) => $body,
      Shape::Circle($inner) => $body,
      Shape::Ellipse($inner) => $body,
      Shape::Rectangle($inner) => $body,
      Shape::Triangle($inner) => $body,
      Shape::Polygon($inner) => $body,
      Shape::Sector($inner) => $body,
      Shape::BezierCurve($inner) => $body,
    }
  };
}

macro_rules! shape_from {
  ( $( $variant:ident($ty:ty) ),* ) => {
    $(
      impl From<$ty> for Shape {
        fn from(shape: $ty) -> Shape {
          Shape::$variant(shape)
        }
      }
    )*
  };
}

shape_from!(
  Line(Line),
  Ray(Ray),
  Segment(Segment),
  Circle(Circle),
  Ellipse(Ellipse),
  Rectangle(Rectangle),
  Triangle(Triangle),
  Polygon(Polygon),
  Sector(Sector),
  BezierCurve(BezierCurve<2>)
);

impl Geometry for Shape {
  fn kind(&self) -> ShapeKind {
    each_shape!(self, s => s.kind())
  }

  fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
    match (self, other) {
      (Shape::Line(a), Shape::Line(b)) => a.approx_eq(b, tolerance),
      (Shape::Ray(a), Shape::Ray(b)) => a.approx_eq(b, tolerance),
      (Shape::Segment(a), Shape::Segment(b)) => a.approx_eq(b, tolerance),
      (Shape::Circle(a), Shape::Circle(b)) => a.approx_eq(b, tolerance),
      (Shape::Ellipse(a), Shape::Ellipse(b)) => a.approx_eq(b, tolerance),
      (Shape::Rectangle(a), Shape::Rectangle(b)) => a.approx_eq(b, tolerance),
      (Shape::Triangle(a), Shape::Triangle(b)) => a.approx_eq(b, tolerance),
      (Shape::Polygon(a), Shape::Polygon(b)) => a.approx_eq(b, tolerance),
      (Shape::Sector(a), Shape::Sector(b)) => a.approx_eq(b, tolerance),
      (Shape::BezierCurve(a), Shape::BezierCurve(b)) => a.approx_eq(b, tolerance),
      _ => false,
    }
  }

  fn center(&self) -> Point<2> {
    each_shape!(self, s => s.center())
  }

  fn aabb(&self) -> Aabb {
    each_shape!(self, s => s.aabb())
  }

  fn translate(&mut self, offset: &Vector<2>) {
    each_shape!(self, s => s.translate(offset))
  }

  fn rotate(&mut self, angle: Angle, center: Option<Point<2>>) {
    each_shape!(self, s => s.rotate(angle, center))
  }

  fn scale(&mut self, factor: Scale, center: Option<Point<2>>) {
    each_shape!(self, s => s.scale(factor, center))
  }

  fn contains_point_with(&self, pt: &Point<2>, tolerance: f64) -> bool {
    each_shape!(self, s => s.contains_point_with(pt, tolerance))
  }

  fn closest_point(&self, pt: &Point<2>, boundary: bool) -> Point<2> {
    each_shape!(self, s => s.closest_point(pt, boundary))
  }

  fn as_shape(&self) -> Cow<'_, Shape> {
    Cow::Borrowed(self)
  }
}

impl fmt::Display for Shape {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    each_shape!(self, s => fmt::Display::fmt(s, f))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::*;

  use proptest::prelude::*;
  use std::f64::consts::PI;
  use test_strategy::proptest;

  #[test]
  fn kinds_are_indexed_in_order() {
    for (i, kind) in ShapeKind::ALL.iter().enumerate() {
      assert_eq!(kind.index(), i);
    }
    assert_eq!(ShapeKind::BezierCurve.to_string(), "BezierCurve");
  }

  #[proptest]
  fn clone_is_equal_and_independent(#[strategy(any_shape())] shape: Shape) {
    let mut copy = shape.clone();
    prop_assert!(copy.approx_eq(&shape, 1e-9));
    let before = shape.clone();
    copy.translate(&Vector([1.0, 2.0]));
    prop_assert!(shape.approx_eq(&before, 1e-12));
    prop_assert!(!copy.approx_eq(&shape, 1e-3) || shape.kind() == ShapeKind::Line);
  }

  #[proptest]
  fn translate_round_trip(#[strategy(any_shape())] shape: Shape, #[strategy(any_vector())] v: Vector<2>) {
    let moved = shape.translated(&v).translated(&-v);
    prop_assert!(moved.approx_eq(&shape, 1e-6), "{} vs {}", moved, shape);
  }

  #[proptest]
  fn full_turn_is_identity(#[strategy(any_shape())] shape: Shape, #[strategy(any_point())] center: Point<2>) {
    let radians = shape.rotated(Angle::radians(2.0 * PI), Some(center));
    prop_assert!(radians.approx_eq(&shape, 1e-6), "{} vs {}", radians, shape);
    let degrees = shape.rotated(Angle::degrees(360.0), None);
    prop_assert!(degrees.approx_eq(&shape, 1e-6), "{} vs {}", degrees, shape);
  }

  #[proptest]
  fn unit_scale_is_identity(#[strategy(any_shape())] shape: Shape, #[strategy(any_point())] center: Point<2>) {
    prop_assert!(shape.scaled(Scale::Uniform(1.0), Some(center)).approx_eq(&shape, 1e-9));
    prop_assert!(shape.scaled(Scale::Axes(1.0, 1.0), None).approx_eq(&shape, 1e-9));
  }

  #[proptest]
  fn projection_lands_on_shape(#[strategy(any_shape())] shape: Shape, #[strategy(any_point())] pt: Point<2>) {
    let projected = shape.project_point(&pt);
    prop_assert!(shape.contains_point_with(&projected, 1e-6), "{} not on {}", projected, shape);
  }

  #[proptest]
  fn distance_is_zero_inside(#[strategy(any_shape())] shape: Shape, #[strategy(any_point())] pt: Point<2>) {
    if shape.contains_point(&pt) {
      prop_assert_eq!(shape.distance_to_point(&pt), 0.0);
    } else {
      prop_assert!(shape.distance_to_point(&pt) > 0.0);
    }
  }

  #[test]
  fn mismatched_kinds_are_unequal() {
    let seg = Shape::from(Segment::new(Point::new([0.0, 0.0]), Point::new([1.0, 0.0])));
    let line = Shape::from(Line::new(Point::new([0.0, 0.0]), Vector([1.0, 0.0])));
    assert_ne!(seg, line);
    assert_eq!(seg.kind(), ShapeKind::Segment);
    assert_eq!(line.kind(), ShapeKind::Line);
  }
}
