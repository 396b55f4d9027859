//! An implementation of a dynamic, unbalanced K-D tree over k-dimensional points.

#![warn(missing_docs)]

mod builder;
mod index;
pub(crate) mod node;
mod traversal;

pub use builder::KDTreeBuilder;
pub use index::{KDTree, DEFAULT_DIMS};
pub use traversal::{Node, Points};
