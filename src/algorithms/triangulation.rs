use crate::data::{Polygon, PolygonConvex, Rectangle, Triangle};

pub mod delaunay;

/// Split a region into triangles.
pub trait Triangulate {
  fn triangulate(self) -> Vec<Triangle>;
}

impl Triangulate for &Polygon {
  fn triangulate(self) -> Vec<Triangle> {
    delaunay::triangulate(self)
  }
}

impl Triangulate for &PolygonConvex {
  fn triangulate(self) -> Vec<Triangle> {
    delaunay::triangulate(self.polygon())
  }
}

impl Triangulate for &Rectangle {
  fn triangulate(self) -> Vec<Triangle> {
    delaunay::triangulate(&Polygon::new_unchecked(self.corners().to_vec()))
  }
}
