use crate::data::*;
use crate::intersection::{unique_points_within, Intersects, Registry};
use crate::EPSILON;

use super::pieces::{circles_touch, Boundary, Piece};
use super::refine;

// Slack for bounding-box rejection. Loose on purpose: it only prunes work.
const AABB_SLACK: f64 = 1e-6;

/// Register a handler pair for every kind pair.
pub fn register_defaults(registry: &mut Registry) {
  use ShapeKind::*;
  for (i, &a) in ShapeKind::ALL.iter().enumerate() {
    for &b in ShapeKind::ALL[i..].iter() {
      registry.register_intersect(a, b, boundary_intersect);
      registry.register_has_intersection(a, b, boundary_has_intersection);
    }
  }
  registry.register_intersect(Line, Line, line_line);
  registry.register_has_intersection(Line, Line, lines_meet);
  registry.register_intersect(Segment, Segment, segment_segment);
  registry.register_intersect(Circle, Circle, circle_circle);
  registry.register_has_intersection(Circle, Circle, circles_meet);
  registry.register_has_intersection(Line, Circle, line_meets_circle);
}

/// Where the boundaries of `a` and `b` meet. Interiors are ignored: a
/// segment strictly inside a polygon does not intersect it.
///
/// Boundaries sharing a stretch of curve intersect; the end points of the
/// shared stretch are reported when they are finite.
///
/// Bezier curves meet through their flattened outline; the meeting points are
/// then moved onto the curve.
pub fn boundary_intersect(a: &Shape, b: &Shape) -> (bool, Vec<Point<2>>) {
  let (hit, points) = pieces_intersect(&a.boundary(), &b.boundary());
  (hit, refine::onto_curves(a, b, points))
}

/// Same answer as `boundary_intersect(a, b).0`, with bounding-box rejection
/// and early exit.
pub fn boundary_has_intersection(a: &Shape, b: &Shape) -> bool {
  if !a.aabb().overlaps(&b.aabb(), AABB_SLACK) {
    return false;
  }
  let others = b.boundary();
  let boxes: Vec<Aabb> = others.iter().map(Piece::aabb).collect();
  a.boundary().iter().any(|piece| {
    let bounds = piece.aabb();
    others
      .iter()
      .zip(boxes.iter())
      .any(|(other, other_bounds)| bounds.overlaps(other_bounds, AABB_SLACK) && piece.intersect(other).is_some())
  })
}

fn pieces_intersect(ours: &[Piece], theirs: &[Piece]) -> (bool, Vec<Point<2>>) {
  let mut hit = false;
  let mut points = Vec::new();
  for piece in ours {
    for other in theirs {
      if let Some(isect) = piece.intersect(other) {
        hit = true;
        points.extend(isect.points());
      }
    }
  }
  (hit, unique_points_within(&points, EPSILON))
}

///////////////////////////////////////////////////////////////////////////////
// Specialized handlers

// Lines are either parallel, coincident or cross exactly once.
fn line_line(a: &Shape, b: &Shape) -> (bool, Vec<Point<2>>) {
  let (Shape::Line(l1), Shape::Line(l2)) = (a, b) else {
    return boundary_intersect(a, b);
  };
  if l1.is_parallel(l2, EPSILON) {
    return (l1.contains_point(l2.origin()), Vec::new());
  }
  let w = l2.origin() - l1.origin();
  let t = w.cross(l2.direction()) / l1.direction().cross(l2.direction());
  (true, vec![l1.point_at(t)])
}

fn lines_meet(a: &Shape, b: &Shape) -> bool {
  match (a, b) {
    (Shape::Line(l1), Shape::Line(l2)) => !l1.is_parallel(l2, EPSILON) || l1.contains_point(l2.origin()),
    _ => boundary_has_intersection(a, b),
  }
}

fn segment_segment(a: &Shape, b: &Shape) -> (bool, Vec<Point<2>>) {
  match (a, b) {
    (Shape::Segment(s1), Shape::Segment(s2)) => {
      pieces_intersect(&[Piece::segment(s1)], &[Piece::segment(s2)])
    }
    _ => boundary_intersect(a, b),
  }
}

fn circle_circle(a: &Shape, b: &Shape) -> (bool, Vec<Point<2>>) {
  match (a, b) {
    (Shape::Circle(c1), Shape::Circle(c2)) => pieces_intersect(
      &[Piece::full_circle(c1.center(), c1.radius())],
      &[Piece::full_circle(c2.center(), c2.radius())],
    ),
    _ => boundary_intersect(a, b),
  }
}

fn circles_meet(a: &Shape, b: &Shape) -> bool {
  match (a, b) {
    (Shape::Circle(c1), Shape::Circle(c2)) => {
      circles_touch(c1.center().distance(&c2.center()), c1.radius(), c2.radius())
    }
    _ => boundary_has_intersection(a, b),
  }
}

fn line_meets_circle(a: &Shape, b: &Shape) -> bool {
  match (a, b) {
    (Shape::Line(line), Shape::Circle(circle)) => {
      line.signed_distance(&circle.center()).abs() <= circle.radius() + EPSILON
    }
    _ => boundary_has_intersection(a, b),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn registry() -> Registry {
    Registry::new()
  }

  fn pt(x: f64, y: f64) -> Point<2> {
    Point::new([x, y])
  }

  fn square() -> Shape {
    Polygon::new(vec![pt(0.0, 0.0), pt(4.0, 0.0), pt(4.0, 4.0), pt(0.0, 4.0)])
      .unwrap()
      .into()
  }

  #[test]
  fn crossing_lines() {
    let a: Shape = Line::new(pt(0.0, 0.0), Vector([1.0, 1.0])).into();
    let b: Shape = Line::new(pt(0.0, 2.0), Vector([1.0, -1.0])).into();
    let (hit, pts) = registry().intersect(&a, &b);
    assert!(hit);
    assert_eq!(pts.len(), 1);
    assert!(pts[0].approx_eq(&pt(1.0, 1.0), 1e-12));
  }

  #[test]
  fn parallel_and_coincident_lines() {
    let a: Shape = Line::new(pt(0.0, 0.0), Vector([1.0, 0.0])).into();
    let b: Shape = Line::new(pt(0.0, 1.0), Vector([1.0, 0.0])).into();
    let c: Shape = Line::new(pt(5.0, 0.0), Vector([-1.0, 0.0])).into();
    assert_eq!(registry().intersect(&a, &b), (false, vec![]));
    assert!(!registry().has_intersection(&a, &b));
    assert_eq!(registry().intersect(&a, &c), (true, vec![]));
    assert!(registry().has_intersection(&a, &c));
  }

  #[test]
  fn near_axis_line_agrees_with_boolean_table() {
    let line: Shape = Line::new(pt(0.0, 0.0), Vector([1.0, 1e-11])).into();
    let seg: Shape = Segment::new(pt(1e6, 5e-6), pt(1e6, 2e-5)).into();
    let (hit, pts) = registry().intersect(&line, &seg);
    assert!(hit);
    assert_eq!(pts.len(), 1);
    assert!(registry().has_intersection(&line, &seg));
    assert!(registry().has_intersection(&seg, &line));
    let ray: Shape = Ray::new(pt(0.0, 0.0), Vector([1.0, 1e-11])).into();
    assert_eq!(registry().intersect(&ray, &seg).0, registry().has_intersection(&ray, &seg));
    assert!(registry().has_intersection(&ray, &seg));
  }

  #[test]
  fn segment_through_square() {
    let seg: Shape = Segment::new(pt(-1.0, 2.0), pt(5.0, 2.0)).into();
    let (hit, pts) = registry().intersect(&square(), &seg);
    assert!(hit);
    assert_eq!(pts.len(), 2);
    assert!(pts.iter().any(|p| p.approx_eq(&pt(4.0, 2.0), 1e-12)));
    assert!(pts.iter().any(|p| p.approx_eq(&pt(0.0, 2.0), 1e-12)));
  }

  #[test]
  fn interiors_do_not_count() {
    let inner: Shape = Segment::new(pt(1.0, 1.0), pt(3.0, 3.0)).into();
    assert_eq!(registry().intersect(&square(), &inner), (false, vec![]));
    assert!(!registry().has_intersection(&inner, &square()));
  }

  #[test]
  fn shared_corner_is_reported_once() {
    let tri: Shape = Triangle::new([pt(4.0, 4.0), pt(6.0, 4.0), pt(6.0, 6.0)]).into();
    let (hit, pts) = registry().intersect(&square(), &tri);
    assert!(hit);
    assert_eq!(pts, vec![pt(4.0, 4.0)]);
  }

  #[test]
  fn circle_pairs() {
    let a: Shape = Circle::new(pt(0.0, 0.0), 2.0).unwrap().into();
    let b: Shape = Circle::new(pt(3.0, 0.0), 1.0).unwrap().into();
    let (hit, pts) = registry().intersect(&a, &b);
    assert!(hit);
    assert_eq!(pts.len(), 1);
    assert!(pts[0].approx_eq(&pt(2.0, 0.0), 1e-9));
    assert!(registry().has_intersection(&b, &a));
    let inside: Shape = Circle::new(pt(0.5, 0.0), 0.5).unwrap().into();
    assert!(!registry().has_intersection(&a, &inside));
    assert_eq!(registry().intersect(&a, &inside), (false, vec![]));
  }

  #[test]
  fn line_and_circle() {
    let line: Shape = Line::new(pt(0.0, 1.0), Vector([1.0, 0.0])).into();
    let circle: Shape = Circle::new(pt(0.0, 0.0), 2.0).unwrap().into();
    let (hit, pts) = registry().intersect(&circle, &line);
    assert!(hit);
    assert_eq!(pts.len(), 2);
    for p in &pts {
      assert!((p.distance(&Point::origin()) - 2.0).abs() < 1e-9);
      assert!((p[1] - 1.0).abs() < 1e-12);
    }
    let far: Shape = Line::new(pt(0.0, 3.0), Vector([1.0, 0.0])).into();
    assert!(!registry().has_intersection(&far, &circle));
  }

  #[test]
  fn sector_edges_participate() {
    let sector: Shape = Sector::new(pt(0.0, 0.0), 2.0, 0.0, std::f64::consts::FRAC_PI_2)
      .unwrap()
      .into();
    let seg: Shape = Segment::new(pt(1.0, -1.0), pt(1.0, 3.0)).into();
    let (hit, pts) = registry().intersect(&sector, &seg);
    assert!(hit);
    assert_eq!(pts.len(), 2);
    assert!(pts.iter().any(|p| p.approx_eq(&pt(1.0, 0.0), 1e-12)));
    assert!(pts.iter().any(|p| p.approx_eq(&pt(1.0, 3.0f64.sqrt()), 1e-12)));
  }

  #[test]
  fn ellipse_against_segment() {
    let ellipse: Shape = Ellipse::axis_aligned(pt(0.0, 0.0), 3.0, 1.0).unwrap().into();
    let seg: Shape = Segment::new(pt(0.0, -5.0), pt(0.0, 5.0)).into();
    let (hit, pts) = registry().intersect(&ellipse, &seg);
    assert!(hit);
    assert_eq!(pts.len(), 2);
    assert!(registry().has_intersection(&seg, &ellipse));
  }

  #[test]
  fn ellipse_against_circle() {
    let ellipse: Shape = Ellipse::axis_aligned(pt(0.0, 0.0), 3.0, 1.0).unwrap().into();
    let circle: Shape = Circle::new(pt(0.0, 0.0), 2.0).unwrap().into();
    let (hit, pts) = registry().intersect(&ellipse, &circle);
    assert!(hit);
    assert_eq!(pts.len(), 4);
    let x = (27.0f64 / 8.0).sqrt();
    let y = 0.625f64.sqrt();
    for p in &pts {
      assert!((p[0].abs() - x).abs() < 1e-9);
      assert!((p[1].abs() - y).abs() < 1e-9);
    }
    assert!(registry().has_intersection(&circle, &ellipse));
    // Tangent at the ends of the minor axis.
    let unit: Shape = Circle::new(pt(0.0, 0.0), 1.0).unwrap().into();
    let (hit, pts) = registry().intersect(&unit, &ellipse);
    assert!(hit);
    assert_eq!(pts.len(), 2);
    assert!(pts.iter().any(|p| p.approx_eq(&pt(0.0, 1.0), 1e-6)));
    assert!(pts.iter().any(|p| p.approx_eq(&pt(0.0, -1.0), 1e-6)));
    let inner: Shape = Circle::new(pt(0.0, 0.0), 0.5).unwrap().into();
    assert_eq!(registry().intersect(&ellipse, &inner), (false, vec![]));
    assert!(!registry().has_intersection(&inner, &ellipse));
  }

  #[test]
  fn crossed_ellipses() {
    let wide = Ellipse::axis_aligned(pt(0.0, 0.0), 3.0, 1.0).unwrap();
    let tall: Shape = wide.rotated(Angle::degrees(90.0), None).into();
    let wide: Shape = wide.into();
    let (hit, pts) = registry().intersect(&wide, &tall);
    assert!(hit);
    assert_eq!(pts.len(), 4);
    let c = 0.9f64.sqrt();
    for p in &pts {
      assert!((p[0].abs() - c).abs() < 1e-9);
      assert!((p[1].abs() - c).abs() < 1e-9);
    }
    let (_, mirrored) = registry().intersect(&tall, &wide);
    assert_eq!(mirrored.len(), 4);
    assert!(registry().has_intersection(&tall, &wide));
    assert_eq!(registry().intersect(&wide, &wide), (true, vec![]));
    let apart: Shape = Ellipse::axis_aligned(pt(10.0, 0.0), 3.0, 1.0).unwrap().into();
    assert!(!registry().has_intersection(&wide, &apart));
  }

  #[test]
  fn ellipse_against_sector() {
    let ellipse: Shape = Ellipse::axis_aligned(pt(0.0, 0.0), 3.0, 1.0).unwrap().into();
    let sector: Shape = Sector::new(pt(0.0, 0.0), 2.0, 0.0, std::f64::consts::FRAC_PI_2)
      .unwrap()
      .into();
    let (hit, pts) = registry().intersect(&sector, &ellipse);
    assert!(hit);
    assert_eq!(pts.len(), 2);
    assert!(pts.iter().any(|p| p.approx_eq(&pt(0.0, 1.0), 1e-9)));
    assert!(pts
      .iter()
      .any(|p| p.approx_eq(&pt((27.0f64 / 8.0).sqrt(), 0.625f64.sqrt()), 1e-9)));
    assert!(registry().has_intersection(&ellipse, &sector));
  }

  #[test]
  fn near_concentric_circles_agree() {
    let a: Shape = Circle::new(pt(0.0, 0.0), 1.0).unwrap().into();
    for (offset, radius, meets) in [
      (5e-11, 1.0 + 1.2e-10, true),
      (2e-10, 1.0 + 2.5e-10, true),
      (5e-11, 1.0 + 3e-10, false),
    ] {
      let b: Shape = Circle::new(pt(offset, 0.0), radius).unwrap().into();
      let (hit, pts) = registry().intersect(&a, &b);
      assert_eq!(hit, meets);
      assert_eq!(registry().has_intersection(&a, &b), meets);
      if meets {
        assert_eq!(pts.len(), 1);
        assert!(pts[0].approx_eq(&pt(-1.0, 0.0), 1e-9));
      }
    }
  }

  #[test]
  fn bezier_against_line() {
    let curve = BezierCurve::new(vec![pt(0.0, 0.0), pt(1.0, 2.0), pt(2.0, 0.0)]).unwrap();
    let line: Shape = Line::new(pt(0.0, 0.5), Vector([1.0, 0.0])).into();
    let (hit, pts) = registry().intersect(&line, &curve.clone().into());
    assert!(hit);
    assert_eq!(pts.len(), 2);
    // y(t) = 4t(1 - t) = 0.5 and x(t) = 2t.
    let offset = 0.5f64.sqrt();
    for x in [1.0 - offset, 1.0 + offset] {
      assert!(pts.iter().any(|p| p.approx_eq(&pt(x, 0.5), 1e-9)));
    }
    for p in &pts {
      assert!(curve.distance_to_point(p) < 1e-9);
      assert!(curve.contains_point(p));
    }
  }

  #[test]
  fn crossing_beziers() {
    let arch = BezierCurve::new(vec![pt(0.0, 0.0), pt(1.0, 2.0), pt(2.0, 0.0)]).unwrap();
    let bowl = BezierCurve::new(vec![pt(0.0, 1.0), pt(1.0, -1.0), pt(2.0, 1.0)]).unwrap();
    let (hit, pts) = registry().intersect(&arch.clone().into(), &bowl.clone().into());
    assert!(hit);
    assert_eq!(pts.len(), 2);
    for p in &pts {
      assert!(arch.distance_to_point(p) < 1e-9);
      assert!(bowl.distance_to_point(p) < 1e-9);
    }
  }
}
