//! Geometric intersection engine: bounding-box-tree pruning, primitive
//! intersections, triangle-triangle clipping, mesh-mesh polyline
//! reconstruction, Newton-like surface-surface refinement, and the
//! curve/surface and polyline drivers built on top of them.
#![deny(rust_2018_idioms)]

pub use cadkit_base::cgmath64::*;
pub use cadkit_base::tolerance::*;
pub use cadkit_geotrait::*;
pub use cadkit_mesh::*;

mod bbox_tree;
mod error;
mod types;
mod primitives;
mod triangle;
mod polyline_reconstruction;
mod mesh;
mod surface_refine;
mod curve_surface;
mod curves;
mod polyline_intersect;

pub use bbox_tree::*;
pub use error::*;
pub use types::*;
pub use primitives::*;
pub use triangle::*;
pub use polyline_reconstruction::*;
pub use mesh::*;
pub use surface_refine::*;
pub use curve_surface::*;
pub use curves::*;
pub use polyline_intersect::*;
