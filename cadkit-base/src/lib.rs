//! Basic structs and traits shared across the cadkit workspace: a
//! f64-specialized re-export of `cgmath`, a single tolerance constant, and
//! the bounding box type the tree traversal in `cadkit-intersect` prunes
//! over.
#![deny(rust_2018_idioms)]

pub mod bounding_box;
pub mod cgmath64;
pub mod tolerance;
