#![doc = include_str!("../README.md")]

mod error;
pub mod kdtree;
mod point;
pub mod queue;
mod r#type;

pub use error::{KDIndexError, Result};
pub use kdtree::KDTree;
pub use point::Point;
pub use queue::BoundedPriorityQueue;
pub use r#type::IndexableNum;

#[cfg(test)]
pub(crate) mod test;
