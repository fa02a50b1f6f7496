// https://en.wikipedia.org/wiki/Bowyer%E2%80%93Watson_algorithm
use crate::data::*;
use crate::{EPSILON, SUPER_TRIANGLE_SCALE};

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct VertIdx(pub usize);
impl std::fmt::Debug for VertIdx {
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(fmt, "v{}", self.0)
  }
}

impl VertIdx {
  /// The first three vertices belong to the super-triangle.
  pub fn is_super(&self) -> bool {
    self.0 < 3
  }
}

#[derive(Debug, Clone, Copy)]
struct Face {
  verts: [VertIdx; 3],
  // Cached. `None` for colinear faces.
  circle: Option<(Point<2>, f64)>,
}

impl Face {
  fn new(verts: [VertIdx; 3], points: &[Point<2>]) -> Face {
    let [a, b, c] = verts.map(|v| points[v.0]);
    Face {
      verts,
      circle: Triangle::new([a, b, c]).circumcircle(),
    }
  }

  fn is_bad(&self, pt: &Point<2>) -> bool {
    Triangle::circle_contains(self.circle.as_ref(), pt)
  }

  fn edges(&self) -> [(VertIdx, VertIdx); 3] {
    let [a, b, c] = self.verts;
    [(a, b), (b, c), (c, a)]
  }

  fn touches_super(&self) -> bool {
    self.verts.iter().any(VertIdx::is_super)
  }
}

fn same_edge(e: &(VertIdx, VertIdx), f: &(VertIdx, VertIdx)) -> bool {
  (e.0 == f.0 && e.1 == f.1) || (e.0 == f.1 && e.1 == f.0)
}

/// Corners of a counter-clockwise triangle enclosing the box around `aabb`
/// with a wide margin.
fn super_triangle(aabb: &Aabb) -> [Point<2>; 3] {
  let Vector([w, h]) = aabb.size();
  let d = w.max(h);
  let mid = aabb.center();
  let (mx, my) = (mid[0], mid[1]);
  let s = SUPER_TRIANGLE_SCALE;
  [
    Point::new([mx - s * d, my - d]),
    Point::new([mx + s * d, my - d]),
    Point::new([mx, my + s * d]),
  ]
}

/// $O(n^2)$ Bowyer–Watson triangulation of the polygon's vertices, clipped to
/// the polygon.
///
/// Vertices are inserted in polygon order into a triangulation seeded with a
/// super-triangle. Every triangle whose circumcircle strictly contains the
/// new vertex is removed; the edges of the resulting cavity are joined to
/// the vertex. A cavity edge between two polygon vertices is only joined
/// when its midpoint lies inside the polygon (boundary included), which
/// keeps triangles out of concave notches. Triangles that still touch the
/// super-triangle at the end are dropped.
///
/// Output triangles are counter-clockwise and in no particular order.
/// Degenerate polygons (all vertices colinear) yield no triangles. A sliver
/// corner whose circumcircle is wider than the super-triangle swallows a
/// super-triangle vertex, and its triangle is dropped with it.
/// Self-intersecting input gives unspecified, possibly overlapping, output.
///
/// ```rust
/// # use rshape::data::*;
/// # use rshape::algorithms::triangulation::delaunay::triangulate;
/// let hexagon = Polygon::new(
///   (0..6)
///     .map(|i| Point::new([0.0, 0.0]) + Vector::from_angle(f64::from(i) * std::f64::consts::PI / 3.0))
///     .collect(),
/// )?;
/// let triangles = triangulate(&hexagon);
/// assert_eq!(triangles.len(), 4);
/// # Ok::<(), rshape::Error>(())
/// ```
pub fn triangulate(polygon: &Polygon) -> Vec<Triangle> {
  let vertices = polygon.vertices();
  let aabb = match Aabb::from_points(vertices) {
    Some(aabb) => aabb,
    None => return Vec::new(),
  };
  let Vector([w, h]) = aabb.size();
  if w.max(h) <= EPSILON || polygon.area() <= EPSILON {
    tracing::debug!(vertices = vertices.len(), "Skipping degenerate polygon");
    return Vec::new();
  }

  let mut points: Vec<Point<2>> = Vec::with_capacity(vertices.len() + 3);
  points.extend(super_triangle(&aabb));
  points.extend_from_slice(vertices);

  let mut faces = vec![Face::new([VertIdx(0), VertIdx(1), VertIdx(2)], &points)];
  for idx in 3..points.len() {
    let pt = points[idx];
    let (bad, good): (Vec<Face>, Vec<Face>) = faces.into_iter().partition(|face| face.is_bad(&pt));
    faces = good;

    let edges: Vec<(VertIdx, VertIdx)> = bad.iter().flat_map(Face::edges).collect();
    for (i, edge) in edges.iter().enumerate() {
      let shared = edges
        .iter()
        .enumerate()
        .any(|(j, other)| i != j && same_edge(edge, other));
      if shared {
        continue;
      }
      let (a, b) = *edge;
      if !a.is_super() && !b.is_super() {
        let mid = points[a.0].midpoint(&points[b.0]);
        if polygon.locate(&mid) == PointLocation::Outside {
          continue;
        }
      }
      faces.push(Face::new([a, b, VertIdx(idx)], &points));
    }
  }

  let total = faces.len();
  let triangles: Vec<Triangle> = faces
    .iter()
    .filter(|face| !face.touches_super())
    .map(|face| Triangle::new(face.verts.map(|v| points[v.0])).ensure_ccw())
    .collect();
  tracing::debug!(
    vertices = vertices.len(),
    faces = total,
    triangles = triangles.len(),
    "Delaunay triangulation"
  );
  triangles
}
