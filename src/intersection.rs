//! Kind-pair dispatch for intersection queries.
//!
//! Every pair of [`ShapeKind`]s is registered at most once, under the
//! argument order its handler expects. A lookup that misses tries the
//! mirrored pair with the arguments swapped. Pairs missing from both
//! orientations report no intersection; [`Registry::audit`] lists them.
use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

use crate::data::{Geometry, Point, Shape, ShapeKind};

/// Pairwise intersection of two primitives. `None` means disjoint.
pub trait Intersects<T = Self> {
  type Result;
  fn intersect(self, other: T) -> Option<Self::Result>;
}

/// Computes whether two shapes intersect and where.
pub type IntersectFn = fn(&Shape, &Shape) -> (bool, Vec<Point<2>>);

/// Decides whether two shapes intersect, without producing points.
pub type HasIntersectionFn = fn(&Shape, &Shape) -> bool;

const K: usize = ShapeKind::COUNT;

#[derive(Clone)]
pub struct Registry {
  intersect: [[Option<IntersectFn>; K]; K],
  has_intersection: [[Option<HasIntersectionFn>; K]; K],
}

impl Registry {
  /// A registry without any handlers.
  pub fn empty() -> Registry {
    Registry {
      intersect: [[None; K]; K],
      has_intersection: [[None; K]; K],
    }
  }

  /// A registry with the built-in handlers.
  pub fn new() -> Registry {
    let mut registry = Registry::empty();
    crate::algorithms::intersection::register_defaults(&mut registry);
    registry
  }

  /// The process-wide registry used by [`Geometry::intersects`] and
  /// [`Geometry::has_intersection`]. Built on first use; coverage gaps are
  /// logged once at that point.
  pub fn global() -> &'static Registry {
    static GLOBAL: OnceLock<Registry> = OnceLock::new();
    GLOBAL.get_or_init(|| {
      let registry = Registry::new();
      let report = registry.audit();
      if !report.is_complete() {
        tracing::warn!(
          unregistered = report.unregistered.len(),
          intersect_only = report.intersect_only.len(),
          has_intersection_only = report.has_intersection_only.len(),
          "Intersection registry has gaps: {}",
          report
        );
      }
      registry
    })
  }

  /// Register the handler for `(a, b)`. The handler is called with
  /// arguments in this order; `(b, a)` queries are swapped before the call.
  pub fn register_intersect(&mut self, a: ShapeKind, b: ShapeKind, handler: IntersectFn) {
    debug_assert!(
      a == b || self.intersect[b.index()][a.index()].is_none(),
      "{}×{} is already registered in the mirrored order",
      a,
      b
    );
    self.intersect[a.index()][b.index()] = Some(handler);
  }

  pub fn register_has_intersection(&mut self, a: ShapeKind, b: ShapeKind, handler: HasIntersectionFn) {
    debug_assert!(
      a == b || self.has_intersection[b.index()][a.index()].is_none(),
      "{}×{} is already registered in the mirrored order",
      a,
      b
    );
    self.has_intersection[a.index()][b.index()] = Some(handler);
  }

  /// `(false, [])` if the pair is not registered in either order. Points are
  /// returned in whatever order the handler produces them.
  pub fn intersect(&self, a: &Shape, b: &Shape) -> (bool, Vec<Point<2>>) {
    let (ka, kb) = (a.kind().index(), b.kind().index());
    if let Some(handler) = self.intersect[ka][kb] {
      handler(a, b)
    } else if let Some(handler) = self.intersect[kb][ka] {
      handler(b, a)
    } else {
      (false, Vec::new())
    }
  }

  /// `false` if the pair is not registered in either order.
  pub fn has_intersection(&self, a: &Shape, b: &Shape) -> bool {
    let (ka, kb) = (a.kind().index(), b.kind().index());
    if let Some(handler) = self.has_intersection[ka][kb] {
      handler(a, b)
    } else if let Some(handler) = self.has_intersection[kb][ka] {
      handler(b, a)
    } else {
      false
    }
  }

  pub fn supports_intersect(&self, a: ShapeKind, b: ShapeKind) -> bool {
    self.intersect[a.index()][b.index()].is_some() || self.intersect[b.index()][a.index()].is_some()
  }

  pub fn supports_has_intersection(&self, a: ShapeKind, b: ShapeKind) -> bool {
    self.has_intersection[a.index()][b.index()].is_some()
      || self.has_intersection[b.index()][a.index()].is_some()
  }

  /// Enumerate every unordered kind pair and report the ones missing from
  /// one table or both.
  pub fn audit(&self) -> CoverageReport {
    let mut report = CoverageReport::default();
    for (i, &a) in ShapeKind::ALL.iter().enumerate() {
      for &b in ShapeKind::ALL[i..].iter() {
        match (self.supports_intersect(a, b), self.supports_has_intersection(a, b)) {
          (true, true) => {}
          (true, false) => report.intersect_only.push((a, b)),
          (false, true) => report.has_intersection_only.push((a, b)),
          (false, false) => report.unregistered.push((a, b)),
        }
      }
    }
    report
  }
}

impl Default for Registry {
  fn default() -> Registry {
    Registry::new()
  }
}

impl fmt::Debug for Registry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Registry")
      .field("coverage", &self.audit())
      .finish()
  }
}

/// Kind pairs lacking a handler, as unordered pairs in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageReport {
  /// Missing from both tables.
  pub unregistered: Vec<(ShapeKind, ShapeKind)>,
  /// Registered for `intersect` but not for `has_intersection`.
  pub intersect_only: Vec<(ShapeKind, ShapeKind)>,
  /// Registered for `has_intersection` but not for `intersect`.
  pub has_intersection_only: Vec<(ShapeKind, ShapeKind)>,
}

impl CoverageReport {
  pub fn is_complete(&self) -> bool {
    self.unregistered.is_empty() && self.intersect_only.is_empty() && self.has_intersection_only.is_empty()
  }
}

impl fmt::Display for CoverageReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut first = true;
    let groups = [
      ("unregistered", &self.unregistered),
      ("intersect only", &self.intersect_only),
      ("has_intersection only", &self.has_intersection_only),
    ];
    for (label, pairs) in groups.iter() {
      if pairs.is_empty() {
        continue;
      }
      if !first {
        write!(f, "; ")?;
      }
      first = false;
      write!(f, "{}:", label)?;
      for (a, b) in pairs.iter() {
        write!(f, " {}×{}", a, b)?;
      }
    }
    if first {
      write!(f, "complete")?;
    }
    Ok(())
  }
}

/// Drop repeated points, keeping the first occurrence. Two points repeat
/// only when their formatted text is identical, so values a rounding error
/// apart are all kept. See [`unique_points_within`] for a spatial variant.
pub fn unique_points(points: &[Point<2>]) -> Vec<Point<2>> {
  let mut seen = HashSet::new();
  points
    .iter()
    .filter(|pt| seen.insert(pt.to_string()))
    .copied()
    .collect()
}

/// Drop every point within `tolerance` of an earlier kept point.
pub fn unique_points_within(points: &[Point<2>], tolerance: f64) -> Vec<Point<2>> {
  let mut kept: Vec<Point<2>> = Vec::with_capacity(points.len());
  for pt in points {
    if !kept.iter().any(|k| k.approx_eq(pt, tolerance)) {
      kept.push(*pt);
    }
  }
  kept
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::data::*;
  use crate::testing::*;

  use proptest::prelude::*;
  use test_strategy::proptest;

  fn circle(x: f64, y: f64, r: f64) -> Shape {
    Circle::new(Point::new([x, y]), r).unwrap().into()
  }

  fn always(_: &Shape, _: &Shape) -> (bool, Vec<Point<2>>) {
    (true, vec![Point::new([1.0, 2.0])])
  }

  fn first_is_circle(a: &Shape, _: &Shape) -> bool {
    a.kind() == ShapeKind::Circle
  }

  #[test]
  fn text_key_dedup() {
    let pts = [
      Point::new([1.0, 2.0]),
      Point::new([3.0, 4.0]),
      Point::new([1.0, 2.0]),
      Point::new([1.0 + 1e-13, 2.0]),
    ];
    assert_eq!(unique_points(&pts), vec![pts[0], pts[1], pts[3]]);
    assert_eq!(unique_points_within(&pts, 1e-10), vec![pts[0], pts[1]]);
  }

  #[test]
  fn empty_registry_is_silent() {
    let registry = Registry::empty();
    let a = circle(0.0, 0.0, 1.0);
    assert_eq!(registry.intersect(&a, &a), (false, vec![]));
    assert!(!registry.has_intersection(&a, &a));
    assert_eq!(registry.audit().unregistered.len(), 55);
  }

  #[test]
  fn mirrored_lookup_swaps_arguments() {
    let mut registry = Registry::empty();
    registry.register_intersect(ShapeKind::Circle, ShapeKind::Segment, always);
    registry.register_has_intersection(ShapeKind::Circle, ShapeKind::Segment, first_is_circle);
    let c = circle(0.0, 0.0, 1.0);
    let s: Shape = Segment::new(Point::origin(), Point::new([1.0, 1.0])).into();
    assert_eq!(registry.intersect(&s, &c), (true, vec![Point::new([1.0, 2.0])]));
    assert!(registry.has_intersection(&s, &c));
    assert!(registry.has_intersection(&c, &s));
  }

  #[test]
  fn audit_classifies_pairs() {
    let mut registry = Registry::empty();
    registry.register_intersect(ShapeKind::Line, ShapeKind::Ray, always);
    registry.register_has_intersection(ShapeKind::Circle, ShapeKind::Circle, first_is_circle);
    let report = registry.audit();
    assert_eq!(report.intersect_only, vec![(ShapeKind::Line, ShapeKind::Ray)]);
    assert_eq!(report.has_intersection_only, vec![(ShapeKind::Circle, ShapeKind::Circle)]);
    assert_eq!(report.unregistered.len(), 53);
    assert!(!report.is_complete());
  }

  #[test]
  fn builtin_registry_is_complete() {
    let report = Registry::new().audit();
    assert!(report.is_complete());
    assert!(report.unregistered.is_empty());
    assert!(report.intersect_only.is_empty());
    assert!(report.has_intersection_only.is_empty());
    assert_eq!(report.to_string(), "complete");
  }

  fn same_points(ps: &[Point<2>], qs: &[Point<2>]) -> bool {
    let close = |p: &Point<2>, q: &Point<2>| p.distance(q) <= 1e-6 * (1.0 + p.distance(&Point::origin()));
    ps.len() == qs.len() && ps.iter().all(|p| qs.iter().any(|q| close(p, q)))
  }

  #[proptest]
  fn lookup_is_symmetric(#[strategy(any_shape())] a: Shape, #[strategy(any_shape())] b: Shape) {
    let registry = Registry::global();
    prop_assert_eq!(registry.has_intersection(&a, &b), registry.has_intersection(&b, &a));
    let (hit_ab, pts_ab) = registry.intersect(&a, &b);
    let (hit_ba, pts_ba) = registry.intersect(&b, &a);
    prop_assert_eq!(hit_ab, hit_ba);
    prop_assert!(same_points(&pts_ab, &pts_ba), "{:?} vs {:?}", pts_ab, pts_ba);
  }

  #[proptest]
  fn boolean_table_agrees(#[strategy(any_shape())] a: Shape, #[strategy(any_shape())] b: Shape) {
    let registry = Registry::global();
    prop_assert_eq!(registry.has_intersection(&a, &b), registry.intersect(&a, &b).0);
  }

  #[proptest]
  fn points_lie_on_both_shapes(#[strategy(any_shape())] a: Shape, #[strategy(any_shape())] b: Shape) {
    let (hit, pts) = Registry::global().intersect(&a, &b);
    prop_assert!(hit || pts.is_empty());
    for pt in &pts {
      let tolerance = 1e-6 * (1.0 + pt.distance(&Point::origin()));
      prop_assert!(a.contains_point_with(pt, tolerance), "{} not on {}", pt, a);
      prop_assert!(b.contains_point_with(pt, tolerance), "{} not on {}", pt, b);
    }
  }
}
