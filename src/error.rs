use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KDIndexError {
    /// A point or tree was requested with zero dimensions.
    #[error("Dimensionality must be at least 1, got {0}.")]
    InvalidDimensionality(usize),

    /// Two points (or a point and a tree) disagree on the number of dimensions.
    #[error("Expected a point with {expected} dimensions, got {found}.")]
    DimensionalityMismatch { expected: usize, found: usize },

    /// A bounded priority queue was requested with zero capacity.
    #[error("Capacity must be at least 1, got {0}.")]
    InvalidCapacity(usize),

    /// A k-nearest-neighbor query asked for zero neighbors.
    #[error("Number of neighbors must be at least 1, got {0}.")]
    InvalidK(usize),

    /// Access to an element of an empty structure.
    #[error("Cannot access an element of an empty {0}.")]
    EmptyStructure(&'static str),

    #[error("Axis {axis} is out of bounds for {dims} dimensions.")]
    AxisOutOfBounds { axis: usize, dims: usize },

    #[error("Radius must not be negative.")]
    NegativeRadius,
}

pub type Result<T> = std::result::Result<T, KDIndexError>;
