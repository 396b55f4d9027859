//! An immutable point in k-dimensional euclidean space.

use std::fmt;

use geo_traits::CoordTrait;

use crate::error::{KDIndexError, Result};
use crate::r#type::{sq_dist, IndexableNum};

/// An immutable, ordered tuple of `k >= 1` coordinates.
///
/// Equality is structural: two points are equal when they have the same dimensionality and every
/// coordinate compares equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Point<N: IndexableNum> {
    coords: Vec<N>,
}

impl<N: IndexableNum> Point<N> {
    /// Create a point from its coordinates.
    ///
    /// Fails with [`KDIndexError::InvalidDimensionality`] if `coords` is empty.
    pub fn new(coords: impl Into<Vec<N>>) -> Result<Self> {
        let coords = coords.into();
        if coords.is_empty() {
            return Err(KDIndexError::InvalidDimensionality(0));
        }
        Ok(Self { coords })
    }

    /// Create a point from any [`CoordTrait`] implementation, such as a `geo::Coord`.
    pub fn from_coord(coord: &impl CoordTrait<T = N>) -> Result<Self> {
        let dims = coord.dim().size();
        Self::new((0..dims).map(|i| coord.nth_or_panic(i)).collect::<Vec<_>>())
    }

    /// The number of coordinates of this point.
    #[inline]
    pub fn dims(&self) -> usize {
        self.coords.len()
    }

    /// The coordinate along `axis`.
    ///
    /// # Panics
    ///
    /// If `axis >= self.dims()`.
    #[inline]
    pub fn coord(&self, axis: usize) -> &N {
        &self.coords[axis]
    }

    /// All coordinates of this point.
    #[inline]
    pub fn coords(&self) -> &[N] {
        &self.coords
    }

    /// Squared euclidean distance to `other`.
    ///
    /// The distance is kept squared so that no precision is lost to a square root; squaring is
    /// monotonic on non-negative values so comparisons between squared distances order the same
    /// way as comparisons between distances.
    pub fn distance_squared(&self, other: &Self) -> Result<N> {
        if self.dims() != other.dims() {
            return Err(KDIndexError::DimensionalityMismatch {
                expected: self.dims(),
                found: other.dims(),
            });
        }
        Ok(self.distance_squared_unchecked(other))
    }

    /// Squared distance for points already known to share a dimensionality.
    #[inline]
    pub(crate) fn distance_squared_unchecked(&self, other: &Self) -> N {
        sq_dist(&self.coords, &other.coords)
    }

    /// Consume the point, returning its coordinates.
    pub fn into_inner(self) -> Vec<N> {
        self.coords
    }
}

impl<N: IndexableNum> TryFrom<Vec<N>> for Point<N> {
    type Error = KDIndexError;

    fn try_from(value: Vec<N>) -> Result<Self> {
        Self::new(value)
    }
}

impl<N: IndexableNum> AsRef<[N]> for Point<N> {
    fn as_ref(&self) -> &[N] {
        &self.coords
    }
}

impl<N: IndexableNum + fmt::Display> fmt::Display for Point<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}
