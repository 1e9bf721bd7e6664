//! Distance functions.
use num::{PrimInt, Zero};
use std::fmt::Debug;
use std::ops::Sub;

/// A distance value. `u32`, `f32`, `f64` and friends all qualify.
///
/// The tree only ever subtracts a smaller distance from a larger one, so
/// unsigned types are safe.
pub trait Scalar: Copy + PartialOrd + Zero + Sub<Output = Self> + Debug {}
impl<T: Copy + PartialOrd + Zero + Sub<Output = T> + Debug> Scalar for T {}

/// A distance function over points of type `T`.
///
/// Must be deterministic. Search pruning is only exact when the metric is
/// symmetric and satisfies the triangle inequality; otherwise results are
/// approximate, but the tree stays consistent.
pub trait Metric<T> {
    type Distance: Scalar;

    fn distance(&self, a: &T, b: &T) -> Self::Distance;
}

impl<T, D, F> Metric<T> for F
where
    F: Fn(&T, &T) -> D,
    D: Scalar,
{
    type Distance = D;

    #[inline]
    fn distance(&self, a: &T, b: &T) -> D {
        self(a, b)
    }
}

/// Number of differing bits between two integers.
///
/// ```
/// use vptree::{Hamming, Metric};
/// assert_eq!(Hamming.distance(&0b1010u8, &0b0110u8), 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hamming;

impl<T: PrimInt> Metric<T> for Hamming {
    type Distance = u32;

    #[inline]
    fn distance(&self, a: &T, b: &T) -> u32 {
        (*a ^ *b).count_ones()
    }
}
