//! Geometric traits for cadkit: the external-collaborator contracts
//! spec.md §6 treats as oracles (`eval_rational_curve_point`,
//! `eval_rational_surface_derivatives`, …) expressed as Rust traits so the
//! intersection engine can be generic over any curve/surface
//! representation that implements them.
#![deny(rust_2018_idioms)]

pub use cadkit_base::cgmath64::*;
pub use cadkit_base::tolerance::*;

pub mod traits;
pub use traits::*;
