use cgmath::*;
use serde::*;
use std::ops::Index;

/// Axis-aligned bounding box over a point type `V`.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct BoundingBox<V>(V, V);

/// The trait for defining the bounding box
pub trait Bounded<S> {
    /// the result of subtraction
    type Vector;
    #[doc(hidden)]
    fn infinity() -> Self;
    #[doc(hidden)]
    fn neg_infinity() -> Self;
    #[doc(hidden)]
    fn max(&self, other: &Self) -> Self;
    #[doc(hidden)]
    fn min(&self, other: &Self) -> Self;
    #[doc(hidden)]
    fn max_component(one: Self::Vector) -> S;
    #[doc(hidden)]
    fn diagonal(self, other: Self) -> Self::Vector;
    #[doc(hidden)]
    fn mid(self, other: Self) -> Self;
    #[doc(hidden)]
    fn dim() -> usize;
}

macro_rules! pr2 {
    ($a: expr, $b: expr) => {
        $b
    };
}
macro_rules! impl_bounded {
    ($typename: ident, $vectortype: ident, $($num: expr),*) => {
        impl<S: BaseFloat> Bounded<S> for $typename<S> {
            type Vector = $vectortype<S>;
            fn infinity() -> $typename<S> {
                $typename::new($(pr2!($num, S::infinity())),*)
            }
            fn neg_infinity() -> $typename<S> {
                $typename::new($(pr2!($num, S::neg_infinity())),*)
            }
            fn max(&self, other: &Self) -> Self {
                $typename::new(
                    $(
                        if self[$num] < other[$num] { other[$num] } else { self[$num] }
                    ),*
                )
            }
            fn min(&self, other: &Self) -> Self {
                $typename::new(
                    $(
                        if self[$num] > other[$num] { other[$num] } else { self[$num] }
                    ),*
                )
            }
            fn max_component(one: Self::Vector) -> S {
                let mut max = S::neg_infinity();
                $(if max < one[$num] { max = one[$num] })*
                max
            }
            fn diagonal(self, other: Self) -> Self::Vector { self - other }
            fn mid(self, other: Self) -> Self {
                self + (other - self) / (S::one() + S::one())
            }
            fn dim() -> usize { [$($num),*].len() }
        }
    };
}
impl_bounded!(Vector2, Vector2, 0, 1);
impl_bounded!(Point2, Vector2, 0, 1);
impl_bounded!(Vector3, Vector3, 0, 1, 2);
impl_bounded!(Point3, Vector3, 0, 1, 2);

impl<F, V> Default for BoundingBox<V>
where
    F: BaseFloat,
    V: MetricSpace<Metric = F> + Index<usize, Output = F> + Bounded<F> + Copy,
{
    #[inline(always)]
    fn default() -> Self { BoundingBox(V::infinity(), V::neg_infinity()) }
}

impl<F, V> BoundingBox<V>
where
    F: BaseFloat,
    V: MetricSpace<Metric = F> + Index<usize, Output = F> + Bounded<F> + Copy,
{
    /// Creates an empty bounding box.
    #[inline(always)]
    pub fn new() -> Self { Self::default() }

    /// Adds a point to the bounding box. NaN-bearing points are ignored.
    #[inline(always)]
    pub fn push(&mut self, point: &V) {
        self.0 = self.0.min(point);
        self.1 = self.1.max(point);
    }

    /// Whether no point has ever been pushed.
    #[inline(always)]
    pub fn is_empty(&self) -> bool { self.0[0] > self.1[0] }

    /// Reference to the maximal corner.
    #[inline(always)]
    pub fn max(&self) -> &V { &self.1 }

    /// Reference to the minimal corner.
    #[inline(always)]
    pub fn min(&self) -> &V { &self.0 }

    /// Diagonal vector, `max - min`.
    #[inline(always)]
    pub fn diagonal(&self) -> V::Vector { self.1.diagonal(self.0) }

    /// Largest edge length of the box.
    #[inline(always)]
    pub fn size(&self) -> F { V::max_component(self.diagonal()) }

    /// Center point of the box.
    #[inline(always)]
    pub fn center(&self) -> V { self.0.mid(self.1) }

    /// Whether `self` and `other` overlap within `tol`: the box is expanded
    /// by `tol` on every side before testing for a non-empty intersection.
    /// Mirrors spec.md's `Box::intersects(other, tol)`.
    pub fn intersects(&self, other: &Self, tol: F) -> bool {
        (0..V::dim()).all(|i| {
            self.0[i] - tol <= other.1[i] + tol && other.0[i] - tol <= self.1[i] + tol
        })
    }
}

impl<'a, F, V> FromIterator<&'a V> for BoundingBox<V>
where
    F: BaseFloat,
    V: MetricSpace<Metric = F> + Copy + Index<usize, Output = F> + Bounded<F>,
{
    fn from_iter<I: IntoIterator<Item = &'a V>>(iter: I) -> BoundingBox<V> {
        let mut bdd_box = BoundingBox::new();
        iter.into_iter().for_each(|pt| bdd_box.push(pt));
        bdd_box
    }
}

impl<F, V> FromIterator<V> for BoundingBox<V>
where
    F: BaseFloat,
    V: MetricSpace<Metric = F> + Copy + Index<usize, Output = F> + Bounded<F>,
{
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> BoundingBox<V> {
        let mut bdd_box = BoundingBox::new();
        iter.into_iter().for_each(|pt| bdd_box.push(&pt));
        bdd_box
    }
}

impl<F, V> std::ops::AddAssign<&BoundingBox<V>> for BoundingBox<V>
where
    F: BaseFloat,
    V: MetricSpace<Metric = F> + Copy + Index<usize, Output = F> + Bounded<F>,
{
    /// Puts the points in `other` into `self`.
    #[inline(always)]
    fn add_assign(&mut self, other: &BoundingBox<V>) {
        self.0 = self.0.min(&other.0);
        self.1 = self.1.max(&other.1);
    }
}
