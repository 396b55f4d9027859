use std::fmt::Debug;

use num_traits::Num;

/// A trait for types that can be used for indexed coordinates.
///
/// Unlike a fixed list of primitives, this is blanket-implemented for every numeric type with a
/// total-enough ordering, so arbitrary-precision types (for example
/// `num_rational::BigRational`) can be indexed exactly. Coordinates are only ever cloned,
/// subtracted, multiplied, added and compared; no square roots are taken anywhere.
///
/// Values that are not comparable with themselves (floating point `NaN`) must not be indexed.
pub trait IndexableNum: Num + PartialOrd + Clone + Debug {}

impl<T: Num + PartialOrd + Clone + Debug> IndexableNum for T {}

/// `|a - b|`, computed without ever going below zero so that unsigned types work.
#[inline]
pub(crate) fn abs_diff<N: IndexableNum>(a: &N, b: &N) -> N {
    if a >= b {
        a.clone() - b.clone()
    } else {
        b.clone() - a.clone()
    }
}

/// Squared euclidean distance between two coordinate slices of equal length.
#[inline]
pub(crate) fn sq_dist<N: IndexableNum>(a: &[N], b: &[N]) -> N {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).fold(N::zero(), |acc, (x, y)| {
        let d = abs_diff(x, y);
        acc + d.clone() * d
    })
}
