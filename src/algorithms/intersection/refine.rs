use crate::data::*;
use crate::intersection::unique_points_within;
use crate::EPSILON;

use super::pieces::{Boundary, Piece};

const NEWTON_STEPS: usize = 32;

// A parameterized curve that an intersection point can slide along.
#[derive(Clone, Copy)]
enum Track<'a> {
  Curve(&'a BezierCurve<2>),
  Piece(&'a Piece),
}

impl<'a> Track<'a> {
  fn at(&self, t: f64) -> Point<2> {
    match self {
      Track::Curve(curve) => curve.point_at(t),
      Track::Piece(Piece::Linear { origin, direction, .. }) => *origin + *direction * t,
      Track::Piece(Piece::Arc { center, radius, .. }) => *center + Vector::from_angle(t) * *radius,
      Track::Piece(Piece::Ellipse(ellipse)) => ellipse.point_at_angle(t),
    }
  }

  fn tangent(&self, t: f64) -> Vector<2> {
    match self {
      Track::Curve(curve) => curve.tangent_at(t),
      Track::Piece(Piece::Linear { direction, .. }) => *direction,
      Track::Piece(Piece::Arc { radius, .. }) => Vector::from_angle(t).perp() * *radius,
      Track::Piece(Piece::Ellipse(ellipse)) => {
        let (a, b) = ellipse.semi_axes();
        let u = *ellipse.direction();
        u * (-a * t.sin()) + u.perp() * (b * t.cos())
      }
    }
  }

  // Parameter of the track point closest to `pt`, or near it.
  fn parameter_near(&self, pt: &Point<2>) -> f64 {
    match self {
      Track::Curve(curve) => curve.parameter_of(pt),
      Track::Piece(Piece::Linear { origin, direction, .. }) => {
        (pt - origin).dot(direction) / direction.squared_magnitude().max(f64::MIN_POSITIVE)
      }
      Track::Piece(Piece::Arc { center, .. }) => (pt - center).angle(),
      Track::Piece(Piece::Ellipse(ellipse)) => {
        let (a, b) = ellipse.semi_axes();
        let (x, y) = ellipse.to_local(pt);
        (y / b).atan2(x / a)
      }
    }
  }

  fn covers(&self, t: f64, pt: &Point<2>, tolerance: f64) -> bool {
    match self {
      Track::Curve(_) => (-EPSILON..=1.0 + EPSILON).contains(&t),
      Track::Piece(piece) => piece.contains_point(pt, tolerance),
    }
  }
}

/// Moves meeting points found on flattened bezier outlines onto the curves.
/// Other points are returned unchanged.
pub(crate) fn onto_curves(a: &Shape, b: &Shape, points: Vec<Point<2>>) -> Vec<Point<2>> {
  let (curve, other) = match (a, b) {
    (Shape::BezierCurve(curve), other) | (other, Shape::BezierCurve(curve)) => (curve, other),
    _ => return points,
  };
  let pieces = match other {
    Shape::BezierCurve(_) => Vec::new(),
    _ => other.boundary(),
  };
  let tracks: Vec<Track> = match other {
    Shape::BezierCurve(theirs) => vec![Track::Curve(theirs)],
    _ => pieces.iter().map(Track::Piece).collect(),
  };
  let reach = match other {
    Shape::BezierCurve(theirs) => longest_chord(curve).max(longest_chord(theirs)),
    _ => longest_chord(curve),
  };
  let refined: Vec<Point<2>> = points
    .iter()
    .map(|pt| {
      tracks
        .iter()
        .filter_map(|track| meet(Track::Curve(curve), *track, pt, reach))
        .min_by(|p, q| p.distance(pt).total_cmp(&q.distance(pt)))
        .unwrap_or_else(|| curve.closest_point_on_curve(pt))
    })
    .collect();
  unique_points_within(&refined, EPSILON)
}

fn longest_chord(curve: &BezierCurve<2>) -> f64 {
  curve
    .flattened_segments()
    .iter()
    .map(|seg| seg.a.distance(&seg.b))
    .fold(0.0, f64::max)
}

// Newton iteration on `ours(s) = theirs(u)`, started from the parameters
// nearest `guess`. Gives up on parallel tangents, on points that wander
// further than `reach`, and on points off either track.
fn meet(ours: Track, theirs: Track, guess: &Point<2>, reach: f64) -> Option<Point<2>> {
  let tolerance = EPSILON * (1.0 + guess.distance(&Point::origin()));
  let mut s = ours.parameter_near(guess);
  let mut u = theirs.parameter_near(guess);
  let mut residual = ours.at(s) - theirs.at(u);
  for _ in 0..NEWTON_STEPS {
    if residual.magnitude() <= tolerance {
      break;
    }
    let p = ours.tangent(s);
    let q = theirs.tangent(u);
    let det = p.cross(&q);
    if det.abs() <= f64::EPSILON * p.magnitude() * q.magnitude() {
      return None;
    }
    s -= residual.cross(&q) / det;
    u += p.cross(&residual) / det;
    residual = ours.at(s) - theirs.at(u);
  }
  let pt = ours.at(s);
  let found = residual.magnitude() <= tolerance
    && pt.distance(guess) <= reach
    && ours.covers(s, &pt, tolerance)
    && theirs.covers(u, &pt, tolerance);
  found.then_some(pt)
}
