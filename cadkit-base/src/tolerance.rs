use crate::cgmath64::*;
use cgmath::AbsDiffEq;
use std::fmt::Debug;

/// General tolerance, used for parallelism, degeneracy, and containment
/// checks throughout the engine unless a call site passes an explicit `tol`.
pub const TOLERANCE: f64 = 1.0e-6;

/// `TOLERANCE` squared, for comparisons against squared distances.
pub const TOLERANCE2: f64 = TOLERANCE * TOLERANCE;

/// Defines a tolerance in the whole package.
pub trait Tolerance: AbsDiffEq<Epsilon = f64> + Debug {
    /// The "distance" is less than `TOLERANCE`.
    fn near(&self, other: &Self) -> bool { self.abs_diff_eq(other, TOLERANCE) }

    /// The "distance" is less than `TOLERANCE2`.
    fn near2(&self, other: &Self) -> bool { self.abs_diff_eq(other, TOLERANCE2) }
}

impl<T: AbsDiffEq<Epsilon = f64> + Debug> Tolerance for T {}

/// A scalar is small compared to `TOLERANCE`.
pub trait SmallOrd {
    /// `|self| < TOLERANCE`
    fn so_small(&self) -> bool;
    /// `|self| < TOLERANCE2`
    fn so_small2(&self) -> bool;
}

impl SmallOrd for f64 {
    fn so_small(&self) -> bool { self.abs() < TOLERANCE }
    fn so_small2(&self) -> bool { self.abs() < TOLERANCE2 }
}

/// Asserts that `left.near(&right)` (using `Tolerance`).
#[macro_export]
macro_rules! assert_near {
    ($left: expr, $right: expr $(,)?) => {{
        let (left, right) = ($left, $right);
        assert!(
            $crate::tolerance::Tolerance::near(&left, &right),
            "assertion failed: `left` is near `right`\nleft: {left:?},\nright: {right:?}",
        )
    }};
}

/// Asserts that `left.near2(&right)` (using `Tolerance`).
#[macro_export]
macro_rules! assert_near2 {
    ($left: expr, $right: expr $(,)?) => {{
        let (left, right) = ($left, $right);
        assert!(
            $crate::tolerance::Tolerance::near2(&left, &right),
            "assertion failed: `left` is near `right`\nleft: {left:?},\nright: {right:?}",
        )
    }};
}
