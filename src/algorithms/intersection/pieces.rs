use std::f64::consts::TAU;

use crate::data::*;
use crate::intersection::Intersects;
use crate::EPSILON;

/// One elementary curve of a shape's boundary.
#[derive(Debug, Clone, Copy)]
pub enum Piece {
  /// `origin + t * direction` for `t` in `[t_min, t_max]`. Either bound may
  /// be infinite.
  Linear {
    origin: Point<2>,
    direction: Vector<2>,
    t_min: f64,
    t_max: f64,
  },
  /// Counter-clockwise arc from `start` through `sweep` radians.
  Arc {
    center: Point<2>,
    radius: f64,
    start: f64,
    sweep: f64,
  },
  /// The full outline of a non-degenerate ellipse.
  Ellipse(Ellipse),
}

/// Pieces that touch.
#[derive(Debug, Clone, PartialEq)]
pub enum IPiece {
  /// Isolated touching points.
  Crossing(Vec<Point<2>>),
  /// The pieces share a stretch of curve. Holds its finite end points, which
  /// may be none.
  Overlap(Vec<Point<2>>),
}

impl IPiece {
  pub fn points(self) -> Vec<Point<2>> {
    match self {
      IPiece::Crossing(pts) | IPiece::Overlap(pts) => pts,
    }
  }
}

impl Piece {
  pub fn segment(segment: &Segment) -> Piece {
    Piece::Linear {
      origin: segment.a,
      direction: segment.vector(),
      t_min: 0.0,
      t_max: 1.0,
    }
  }

  pub fn full_circle(center: Point<2>, radius: f64) -> Piece {
    Piece::Arc {
      center,
      radius,
      start: 0.0,
      sweep: TAU,
    }
  }

  pub fn aabb(&self) -> Aabb {
    match self {
      Piece::Linear {
        origin,
        direction,
        t_min,
        t_max,
      } => {
        let axis = |i: usize| {
          let a = linear_coord(origin[i], direction[i], *t_min);
          let b = linear_coord(origin[i], direction[i], *t_max);
          (a.min(b), a.max(b))
        };
        let (min_x, max_x) = axis(0);
        let (min_y, max_y) = axis(1);
        Aabb::new(min_x, max_x, min_y, max_y)
      }
      Piece::Arc { center, radius, .. } => Aabb::new(
        center[0] - radius,
        center[0] + radius,
        center[1] - radius,
        center[1] + radius,
      ),
      Piece::Ellipse(ellipse) => ellipse.aabb(),
    }
  }

  pub fn contains_point(&self, pt: &Point<2>, tolerance: f64) -> bool {
    match self {
      Piece::Linear {
        origin,
        direction,
        t_min,
        t_max,
      } => {
        let len2 = direction.squared_magnitude();
        let t = if len2 == 0.0 {
          0.0
        } else {
          ((pt - origin).dot(direction) / len2).clamp(*t_min, *t_max)
        };
        (*origin + *direction * t).distance(pt) <= tolerance
      }
      Piece::Arc {
        center,
        radius,
        start,
        sweep,
      } => {
        let d = center.distance(pt);
        (d - radius).abs() <= tolerance
          && (d <= tolerance || in_sweep((pt - center).angle(), *start, *sweep, tolerance / radius.max(EPSILON)))
      }
      Piece::Ellipse(ellipse) => ellipse.project_point(pt).distance(pt) <= tolerance,
    }
  }
}

// Coordinate at parameter `t`, avoiding `0 * inf`.
fn linear_coord(origin: f64, direction: f64, t: f64) -> f64 {
  if t.is_infinite() {
    if direction == 0.0 {
      origin
    } else {
      t * direction.signum()
    }
  } else {
    origin + t * direction
  }
}

fn in_sweep(angle: f64, start: f64, sweep: f64, slack: f64) -> bool {
  if sweep >= TAU - EPSILON {
    return true;
  }
  let rel = (angle - start).rem_euclid(TAU);
  rel <= sweep + slack || rel >= TAU - slack
}

fn in_range(t: f64, t_min: f64, t_max: f64, slack: f64) -> bool {
  t >= t_min - slack && t <= t_max + slack
}

///////////////////////////////////////////////////////////////////////////////
// Boundary

/// Decomposition of a shape's boundary into [`Piece`]s.
pub trait Boundary {
  fn boundary(&self) -> Vec<Piece>;
}

impl Boundary for Line {
  fn boundary(&self) -> Vec<Piece> {
    vec![Piece::Linear {
      origin: *self.origin(),
      direction: *self.direction(),
      t_min: f64::NEG_INFINITY,
      t_max: f64::INFINITY,
    }]
  }
}

impl Boundary for Ray {
  fn boundary(&self) -> Vec<Piece> {
    vec![Piece::Linear {
      origin: *self.origin(),
      direction: *self.direction(),
      t_min: 0.0,
      t_max: f64::INFINITY,
    }]
  }
}

impl Boundary for Segment {
  fn boundary(&self) -> Vec<Piece> {
    vec![Piece::segment(self)]
  }
}

impl Boundary for Circle {
  fn boundary(&self) -> Vec<Piece> {
    vec![Piece::full_circle(self.center(), self.radius())]
  }
}

impl Boundary for Ellipse {
  fn boundary(&self) -> Vec<Piece> {
    if self.is_degenerate() {
      vec![Piece::segment(&self.collapsed())]
    } else {
      vec![Piece::Ellipse(*self)]
    }
  }
}

fn polygonal_boundary<P: Polygonal>(shape: &P) -> Vec<Piece> {
  shape.edges().iter().map(Piece::segment).collect()
}

impl Boundary for Rectangle {
  fn boundary(&self) -> Vec<Piece> {
    polygonal_boundary(self)
  }
}

impl Boundary for Triangle {
  fn boundary(&self) -> Vec<Piece> {
    polygonal_boundary(self)
  }
}

impl Boundary for Polygon {
  fn boundary(&self) -> Vec<Piece> {
    polygonal_boundary(self)
  }
}

impl Boundary for Sector {
  fn boundary(&self) -> Vec<Piece> {
    let arc = Piece::Arc {
      center: self.center(),
      radius: self.radius(),
      start: self.start_angle(),
      sweep: self.sweep(),
    };
    if self.is_full() {
      return vec![arc];
    }
    let [r0, r1] = self.radii();
    vec![arc, Piece::segment(&r0), Piece::segment(&r1)]
  }
}

impl Boundary for BezierCurve<2> {
  fn boundary(&self) -> Vec<Piece> {
    self.flattened_segments().iter().map(Piece::segment).collect()
  }
}

impl Boundary for Shape {
  fn boundary(&self) -> Vec<Piece> {
    match self {
      Shape::Line(s) => s.boundary(),
      Shape::Ray(s) => s.boundary(),
      Shape::Segment(s) => s.boundary(),
      Shape::Circle(s) => s.boundary(),
      Shape::Ellipse(s) => s.boundary(),
      Shape::Rectangle(s) => s.boundary(),
      Shape::Triangle(s) => s.boundary(),
      Shape::Polygon(s) => s.boundary(),
      Shape::Sector(s) => s.boundary(),
      Shape::BezierCurve(s) => s.boundary(),
    }
  }
}

///////////////////////////////////////////////////////////////////////////////
// Intersects

impl<'a> Intersects for &'a Piece {
  type Result = IPiece;

  /// Arcs against ellipses, and ellipses against each other, are solved
  /// numerically along the ellipse outline.
  fn intersect(self, other: &'a Piece) -> Option<IPiece> {
    match (self, other) {
      (
        Piece::Linear { origin, direction, .. },
        _,
      ) if direction.squared_magnitude() == 0.0 => point_on(origin, other),
      (
        _,
        Piece::Linear { origin, direction, .. },
      ) if direction.squared_magnitude() == 0.0 => point_on(origin, self),
      (Piece::Linear { .. }, Piece::Linear { .. }) => linear_linear(self, other),
      (
        Piece::Linear {
          origin,
          direction,
          t_min,
          t_max,
        },
        Piece::Arc {
          center,
          radius,
          start,
          sweep,
        },
      )
      | (
        Piece::Arc {
          center,
          radius,
          start,
          sweep,
        },
        Piece::Linear {
          origin,
          direction,
          t_min,
          t_max,
        },
      ) => {
        let ts = line_circle_parameters(origin, direction, center, *radius, EPSILON)?;
        let slack = EPSILON / direction.magnitude();
        let angle_slack = EPSILON / radius.max(EPSILON);
        let pts: Vec<Point<2>> = ts
          .into_iter()
          .filter(|t| in_range(*t, *t_min, *t_max, slack))
          .map(|t| *origin + *direction * t.clamp(*t_min, *t_max))
          .filter(|pt| *radius <= EPSILON || in_sweep((pt - center).angle(), *start, *sweep, angle_slack))
          .collect();
        crossing(pts)
      }
      (
        Piece::Linear {
          origin,
          direction,
          t_min,
          t_max,
        },
        Piece::Ellipse(ellipse),
      )
      | (
        Piece::Ellipse(ellipse),
        Piece::Linear {
          origin,
          direction,
          t_min,
          t_max,
        },
      ) => {
        // In the ellipse frame, with axes scaled to a unit circle, the
        // parameter along the line is unchanged.
        let (a, b) = ellipse.semi_axes();
        let (ox, oy) = ellipse.to_local(origin);
        let u = *ellipse.direction();
        let (dx, dy) = (direction.dot(&u), direction.dot(&u.perp()));
        let local_origin = Point::new([ox / a, oy / b]);
        let local_direction = Vector([dx / a, dy / b]);
        let ts = line_circle_parameters(
          &local_origin,
          &local_direction,
          &Point::origin(),
          1.0,
          EPSILON / a.min(b),
        )?;
        let slack = EPSILON / direction.magnitude();
        let pts = ts
          .into_iter()
          .filter(|t| in_range(*t, *t_min, *t_max, slack))
          .map(|t| *origin + *direction * t.clamp(*t_min, *t_max))
          .collect();
        crossing(pts)
      }
      (Piece::Arc { .. }, Piece::Arc { .. }) => arc_arc(self, other),
      (Piece::Arc { .. }, Piece::Ellipse(ellipse)) => arc_ellipse(self, ellipse),
      (Piece::Ellipse(ellipse), Piece::Arc { .. }) => arc_ellipse(other, ellipse),
      (Piece::Ellipse(e1), Piece::Ellipse(e2)) => ellipse_ellipse(e1, e2),
    }
  }
}

fn crossing(pts: Vec<Point<2>>) -> Option<IPiece> {
  if pts.is_empty() {
    None
  } else {
    Some(IPiece::Crossing(pts))
  }
}

// A zero-length linear piece is a point.
fn point_on(origin: &Point<2>, other: &Piece) -> Option<IPiece> {
  if other.contains_point(origin, EPSILON) {
    Some(IPiece::Crossing(vec![*origin]))
  } else {
    None
  }
}

fn linear_linear(p: &Piece, q: &Piece) -> Option<IPiece> {
  let (
    Piece::Linear {
      origin: o1,
      direction: d1,
      t_min: t1_min,
      t_max: t1_max,
    },
    Piece::Linear {
      origin: o2,
      direction: d2,
      t_min: t2_min,
      t_max: t2_max,
    },
  ) = (p, q)
  else {
    return None;
  };
  let w = o2 - o1;
  let denom = d1.cross(d2);
  let len1 = d1.magnitude();
  let len2 = d2.magnitude();
  let slack1 = EPSILON / len1;
  let slack2 = EPSILON / len2;
  if denom.abs() > EPSILON * len1 * len2 {
    let t = w.cross(d2) / denom;
    let s = w.cross(d1) / denom;
    if in_range(t, *t1_min, *t1_max, slack1) && in_range(s, *t2_min, *t2_max, slack2) {
      let t = t.clamp(*t1_min, *t1_max);
      return Some(IPiece::Crossing(vec![*o1 + *d1 * t]));
    }
    return None;
  }
  // Parallel. Overlap only when colinear.
  if w.cross(d1).abs() / len1 > EPSILON {
    return None;
  }
  // Map the second range onto the first parameterization.
  let t0 = w.dot(d1) / (len1 * len1);
  let k = d2.dot(d1) / (len1 * len1);
  let map = |s: f64| {
    if s.is_infinite() {
      s * k.signum()
    } else {
      t0 + s * k
    }
  };
  let (a, b) = (map(*t2_min), map(*t2_max));
  let lo = t1_min.max(a.min(b));
  let hi = t1_max.min(a.max(b));
  if lo > hi + slack1 {
    return None;
  }
  let hi = hi.max(lo);
  let mut ends = Vec::new();
  if lo.is_finite() {
    ends.push(*o1 + *d1 * lo);
  }
  if hi.is_finite() && (hi - lo) * len1 > EPSILON {
    ends.push(*o1 + *d1 * hi);
  }
  Some(IPiece::Overlap(ends))
}

// Parameters where `origin + t * direction` meets the circle. A tangent line
// yields one parameter.
fn line_circle_parameters(
  origin: &Point<2>,
  direction: &Vector<2>,
  center: &Point<2>,
  radius: f64,
  tolerance: f64,
) -> Option<Vec<f64>> {
  let len2 = direction.squared_magnitude();
  let t_foot = (center - origin).dot(direction) / len2;
  let foot = *origin + *direction * t_foot;
  let h = foot.distance(center);
  if h > radius + tolerance {
    return None;
  }
  let half = (radius * radius - h * h).max(0.0).sqrt();
  if half <= tolerance {
    Some(vec![t_foot])
  } else {
    let dt = half / len2.sqrt();
    Some(vec![t_foot - dt, t_foot + dt])
  }
}

fn arc_arc(p: &Piece, q: &Piece) -> Option<IPiece> {
  let (
    Piece::Arc {
      center: c1,
      radius: r1,
      start: s1,
      sweep: w1,
    },
    Piece::Arc {
      center: c2,
      radius: r2,
      start: s2,
      sweep: w2,
    },
  ) = (p, q)
  else {
    return None;
  };
  let d = c1.distance(c2);
  if d <= EPSILON && (r1 - r2).abs() <= EPSILON {
    // Same circle: overlap where the sweeps meet.
    let slack = EPSILON / r1.max(EPSILON);
    let full1 = *w1 >= TAU - EPSILON;
    let full2 = *w2 >= TAU - EPSILON;
    let mut ends = Vec::new();
    for (start, sweep, other_start, other_sweep, full) in [
      (*s1, *w1, *s2, *w2, full1),
      (*s2, *w2, *s1, *w1, full2),
    ] {
      if full {
        continue;
      }
      for angle in [start, start + sweep] {
        if in_sweep(angle, other_start, other_sweep, slack) {
          ends.push(*c1 + Vector::from_angle(angle) * *r1);
        }
      }
    }
    return if ends.is_empty() && !(full1 && full2) {
      None
    } else {
      Some(IPiece::Overlap(ends))
    };
  }
  if !circles_touch(d, *r1, *r2) {
    return None;
  }
  // Nearly concentric circles put the foot far outside; it belongs on the
  // first circle.
  let a = ((d * d + r1 * r1 - r2 * r2) / (2.0 * d)).clamp(-r1, *r1);
  let h = (r1 * r1 - a * a).max(0.0).sqrt();
  let axis = (c2 - c1) * (1.0 / d);
  let base = *c1 + axis * a;
  let candidates = if h <= EPSILON {
    vec![base]
  } else {
    vec![base + axis.perp() * h, base - axis.perp() * h]
  };
  let slack1 = EPSILON / r1.max(EPSILON);
  let slack2 = EPSILON / r2.max(EPSILON);
  let pts = candidates
    .into_iter()
    .filter(|pt| {
      (*r1 <= EPSILON || in_sweep((pt - c1).angle(), *s1, *w1, slack1))
        && (*r2 <= EPSILON || in_sweep((pt - c2).angle(), *s2, *w2, slack2))
    })
    .collect();
  crossing(pts)
}

/// Whether circle outlines of radii `r1` and `r2`, with centers `d` apart,
/// meet: `d` lies between the difference and the sum of the radii.
pub(crate) fn circles_touch(d: f64, r1: f64, r2: f64) -> bool {
  (r1 - r2).abs() - EPSILON <= d && d <= r1 + r2 + EPSILON
}

///////////////////////////////////////////////////////////////////////////////
// Ellipse outlines

// Samples per ellipse outline when scanning for crossings.
const ELLIPSE_SAMPLES: usize = 256;

// A circular ellipse is handled as a circle.
fn as_circle(ellipse: &Ellipse) -> Option<Piece> {
  let (a, b) = ellipse.semi_axes();
  if (a - b).abs() <= EPSILON {
    Some(Piece::full_circle(ellipse.center(), 0.5 * (a + b)))
  } else {
    None
  }
}

fn arc_ellipse(arc: &Piece, ellipse: &Ellipse) -> Option<IPiece> {
  let Piece::Arc {
    center,
    radius,
    start,
    sweep,
  } = arc
  else {
    return None;
  };
  if *radius <= EPSILON {
    return point_on(center, &Piece::Ellipse(*ellipse));
  }
  if let Some(circle) = as_circle(ellipse) {
    return arc_arc(arc, &circle);
  }
  let slack = EPSILON / radius;
  let pts = outline_roots(ellipse, |pt| center.distance(pt) - radius)
    .into_iter()
    .map(|theta| ellipse.point_at_angle(theta))
    .filter(|pt| in_sweep((pt - center).angle(), *start, *sweep, slack))
    .collect();
  crossing(pts)
}

fn ellipse_ellipse(e1: &Ellipse, e2: &Ellipse) -> Option<IPiece> {
  if e1.approx_eq(e2, EPSILON) {
    return Some(IPiece::Overlap(Vec::new()));
  }
  if let Some(circle) = as_circle(e1) {
    return arc_ellipse(&circle, e2);
  }
  if let Some(circle) = as_circle(e2) {
    return arc_ellipse(&circle, e1);
  }
  // The smaller outline is scanned against the other's level set, whatever
  // the argument order.
  let (scanned, level) = if ellipse_key(e1) <= ellipse_key(e2) {
    (e1, e2)
  } else {
    (e2, e1)
  };
  let pts = outline_roots(scanned, |pt| ellipse_level(level, pt))
    .into_iter()
    .map(|theta| scanned.point_at_angle(theta))
    .collect();
  crossing(pts)
}

fn ellipse_key(ellipse: &Ellipse) -> [f64; 7] {
  let (a, b) = ellipse.semi_axes();
  let center = ellipse.center();
  let dir = ellipse.direction();
  [a * b, center[0], center[1], a, b, dir[0], dir[1]]
}

// Implicit equation of the outline divided by its gradient: zero on the
// outline, negative inside, close to the signed distance nearby.
fn ellipse_level(ellipse: &Ellipse, pt: &Point<2>) -> f64 {
  let (a, b) = ellipse.semi_axes();
  let (x, y) = ellipse.to_local(pt);
  let value = (x / a).powi(2) + (y / b).powi(2) - 1.0;
  let gradient = 2.0 * (x / (a * a)).hypot(y / (b * b));
  value / gradient.max(EPSILON)
}

// Angles where `level` vanishes along the outline. Sign changes between
// samples are bisected. A sampled dip of `|level|` is minimized: it either
// hides two crossings or is a tangency when it reaches within EPSILON of zero.
fn outline_roots<F: Fn(&Point<2>) -> f64>(ellipse: &Ellipse, level: F) -> Vec<f64> {
  let g = |theta: f64| level(&ellipse.point_at_angle(theta));
  let n = ELLIPSE_SAMPLES;
  let step = TAU / n as f64;
  let values: Vec<f64> = (0..n).map(|i| g(i as f64 * step)).collect();
  let mut roots = Vec::new();
  for i in 0..n {
    let t0 = i as f64 * step;
    let t1 = t0 + step;
    let (prev, cur, next) = (values[(i + n - 1) % n], values[i], values[(i + 1) % n]);
    if cur == 0.0 {
      roots.push(t0);
      continue;
    }
    if cur * next < 0.0 {
      roots.push(bisect(&g, t0, t1));
      continue;
    }
    let dip = cur.abs() < prev.abs() && cur.abs() <= next.abs() && cur * prev > 0.0 && cur * next > 0.0;
    if !dip {
      continue;
    }
    let sign = cur.signum();
    let (t, lowest) = golden_min(|t| sign * g(t), t0 - step, t1);
    if lowest < 0.0 {
      roots.push(bisect(&g, t0 - step, t));
      roots.push(bisect(&g, t, t1));
    } else if lowest <= EPSILON {
      roots.push(t);
    }
  }
  roots
}

// Root of `g` in `[lo, hi]`, where `g` changes sign.
fn bisect<F: Fn(f64) -> f64>(g: &F, mut lo: f64, mut hi: f64) -> f64 {
  let negative_lo = g(lo) < 0.0;
  for _ in 0..64 {
    let mid = 0.5 * (lo + hi);
    let value = g(mid);
    if value == 0.0 {
      return mid;
    }
    if (value < 0.0) == negative_lo {
      lo = mid;
    } else {
      hi = mid;
    }
  }
  0.5 * (lo + hi)
}

// Golden-section search. Returns the minimizer and the minimum.
fn golden_min<F: Fn(f64) -> f64>(f: F, mut lo: f64, mut hi: f64) -> (f64, f64) {
  const INV_PHI: f64 = 0.618_033_988_749_894_9;
  let mut x1 = hi - INV_PHI * (hi - lo);
  let mut x2 = lo + INV_PHI * (hi - lo);
  let (mut f1, mut f2) = (f(x1), f(x2));
  for _ in 0..64 {
    if f1 < f2 {
      hi = x2;
      x2 = x1;
      f2 = f1;
      x1 = hi - INV_PHI * (hi - lo);
      f1 = f(x1);
    } else {
      lo = x1;
      x1 = x2;
      f1 = f2;
      x2 = lo + INV_PHI * (hi - lo);
      f2 = f(x2);
    }
  }
  let t = 0.5 * (lo + hi);
  (t, f(t))
}
