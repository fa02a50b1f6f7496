//! The pairwise algorithms behind the built-in [`Registry`](crate::Registry)
//! handlers.
//!
//! Every shape's boundary decomposes into [`Piece`]s: linear spans (lines,
//! rays, segments, polygon edges, flattened bezier curves), circular arcs
//! and whole ellipses. Two shapes intersect when any pair of their pieces
//! does. Points found on a flattened curve are then refined onto the curve.
mod handlers;
mod pieces;
mod refine;

pub use handlers::{boundary_has_intersection, boundary_intersect, register_defaults};
pub use pieces::{Boundary, IPiece, Piece};
