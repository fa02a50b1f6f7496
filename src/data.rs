mod aabb;
mod bezier;
mod circle;
mod ellipse;
mod line;
mod line_segment;
pub(crate) mod point;
pub mod polygon;
mod rectangle;
mod sector;
mod shape;
mod triangle;
mod vector;

pub use aabb::*;
pub use bezier::*;
pub use circle::*;
pub use ellipse::*;
pub use line::*;
pub use line_segment::*;
pub use rectangle::*;
pub use sector::*;
pub use shape::*;
pub use triangle::*;

#[doc(inline)]
pub use crate::data::polygon::{Polygon, PolygonConvex};
pub use crate::transformation::{Angle, Scale, Transform};
pub use point::{Point, Point2, Point3};
pub use vector::{Vector, Vector2, Vector3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PointLocation {
  Inside,
  OnBoundary,
  Outside,
}
