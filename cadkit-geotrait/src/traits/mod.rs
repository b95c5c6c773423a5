use crate::*;

mod curve;
mod minimizer;
mod surface;
pub use curve::*;
pub use minimizer::*;
pub use surface::*;
