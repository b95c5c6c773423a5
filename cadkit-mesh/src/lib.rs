//! Mesh and polyline data structures for cadkit: the concrete `MeshData`
//! and `PolylineData` of spec.md §3, plus the tessellation/fitting oracle
//! contracts the intersection engine treats as external collaborators.
#![deny(rust_2018_idioms)]

use serde::{Deserialize, Serialize};

pub use cadkit_base::{bounding_box::BoundingBox, cgmath64::*, tolerance::*};

mod oracles;
mod polygon_mesh;
mod polyline_curve;

pub use oracles::*;
pub use polygon_mesh::*;
pub use polyline_curve::*;
