use crate::data::{Point, Vector};

#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Copy, Clone)]
pub enum Orientation {
  CounterClockWise,
  ClockWise,
  CoLinear,
}
use Orientation::*;

impl Orientation {
  /// Determine the direction you have to turn if you walk from `p1`
  /// to `p2` to `p3`.
  ///
  /// The sign is computed with adaptive-precision arithmetic and is exact for
  /// any finite input.
  ///
  /// # Examples
  ///
  /// ```rust
  /// # use rshape::data::Point;
  /// # use rshape::Orientation;
  /// let p1 = Point::new([ 0.0, 0.0 ]);
  /// let p2 = Point::new([ 0.0, 1.0 ]); // One unit above p1.
  /// // (0,0) -> (0,1) -> (0,2) == Orientation::CoLinear
  /// assert!(Orientation::new(&p1, &p2, &Point::new([ 0.0, 2.0 ])).is_colinear());
  /// // (0,0) -> (0,1) -> (-1,2) == Orientation::CounterClockWise
  /// assert!(Orientation::new(&p1, &p2, &Point::new([ -1.0, 2.0 ])).is_ccw());
  /// // (0,0) -> (0,1) -> (1,2) == Orientation::ClockWise
  /// assert!(Orientation::new(&p1, &p2, &Point::new([ 1.0, 2.0 ])).is_cw());
  /// ```
  pub fn new(p1: &Point<2>, p2: &Point<2>, p3: &Point<2>) -> Orientation {
    let orient = geometry_predicates::predicates::orient2d(p1.array, p2.array, p3.array);
    Orientation::from_sign(orient, 0.0)
  }

  /// Like [`Orientation::new`] but any turn whose cross product magnitude is
  /// at most `tolerance` counts as colinear.
  pub fn with_tolerance(p1: &Point<2>, p2: &Point<2>, p3: &Point<2>, tolerance: f64) -> Orientation {
    let cross = (p2 - p1).cross(&(p3 - p1));
    Orientation::from_sign(cross, tolerance)
  }

  /// Locate `p2` in relation to the line through `p1` with the given direction.
  pub fn along_vector(p1: &Point<2>, vector: &Vector<2>, p2: &Point<2>, tolerance: f64) -> Orientation {
    Orientation::from_sign(vector.cross(&(p2 - p1)), tolerance)
  }

  fn from_sign(value: f64, tolerance: f64) -> Orientation {
    if value > tolerance {
      CounterClockWise
    } else if value < -tolerance {
      ClockWise
    } else {
      CoLinear
    }
  }

  pub fn is_colinear(self) -> bool {
    matches!(self, Orientation::CoLinear)
  }

  pub fn is_ccw(self) -> bool {
    matches!(self, Orientation::CounterClockWise)
  }

  pub fn is_cw(self) -> bool {
    matches!(self, Orientation::ClockWise)
  }

  #[must_use]
  pub fn then(self, other: Orientation) -> Orientation {
    match self {
      Orientation::CoLinear => other,
      _ => self,
    }
  }

  #[must_use]
  pub fn reverse(self) -> Orientation {
    match self {
      CounterClockWise => ClockWise,
      ClockWise => CounterClockWise,
      CoLinear => CoLinear,
    }
  }
}
