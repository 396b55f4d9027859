use std::cmp::Ordering;

use log::debug;

use crate::error::{KDIndexError, Result};
use crate::kdtree::node::{next_axis, KDNode};
use crate::kdtree::KDTree;
use crate::point::Point;
use crate::r#type::IndexableNum;

/// A builder to create a balanced [`KDTree`] from a known set of points.
///
/// ```
/// use kd_index::kdtree::KDTreeBuilder;
/// use kd_index::Point;
///
/// let mut builder = KDTreeBuilder::new(2).unwrap();
/// for (x, y) in [(2, 3), (5, 4), (9, 6), (4, 7), (8, 1), (7, 2)] {
///     builder.add(Point::new([x, y]).unwrap()).unwrap();
/// }
/// let tree = builder.finish();
/// assert_eq!(tree.len(), 6);
/// assert_eq!(tree.height(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct KDTreeBuilder<N: IndexableNum> {
    points: Vec<Point<N>>,
    dims: usize,
}

impl<N: IndexableNum> KDTreeBuilder<N> {
    /// Create a new builder for points with `dims` coordinates.
    pub fn new(dims: usize) -> Result<Self> {
        Self::with_capacity(dims, 0)
    }

    /// Create a new builder, reserving space for `num_items` points.
    pub fn with_capacity(dims: usize, num_items: usize) -> Result<Self> {
        if dims == 0 {
            return Err(KDIndexError::InvalidDimensionality(dims));
        }
        Ok(Self {
            points: Vec::with_capacity(num_items),
            dims,
        })
    }

    /// Add a point to the index, returning its insertion index.
    pub fn add(&mut self, point: Point<N>) -> Result<usize> {
        if point.dims() != self.dims {
            return Err(KDIndexError::DimensionalityMismatch {
                expected: self.dims,
                found: point.dims(),
            });
        }
        self.points.push(point);
        Ok(self.points.len() - 1)
    }

    /// Consume this builder, splitting recursively on the median of each depth's axis.
    pub fn finish(self) -> KDTree<N> {
        let count = self.points.len();
        let root = build(self.points, 0, self.dims);
        let tree = KDTree {
            root,
            dims: self.dims,
            count,
        };
        debug!(
            "Built KDTree with {} points and height {}",
            count,
            tree.height()
        );
        tree
    }
}

fn build<N: IndexableNum>(
    mut points: Vec<Point<N>>,
    axis: usize,
    dims: usize,
) -> Option<Box<KDNode<N>>> {
    if points.is_empty() {
        return None;
    }

    // We don't allow NaN, so incomparable values only arise from misuse
    points.sort_by(|a, b| {
        a.coord(axis)
            .partial_cmp(b.coord(axis))
            .unwrap_or(Ordering::Equal)
    });

    // Step back to the first point of the median's run of equal coordinates, so that everything
    // before it is strictly smaller on this axis
    let mut m = points.len() / 2;
    while m > 0 && points[m - 1].coord(axis) == points[m].coord(axis) {
        m -= 1;
    }

    let right = points.split_off(m + 1);
    let median = points.pop()?;
    let next = next_axis(axis, dims);

    let mut node = KDNode::new(median);
    node.left = build(points, next, dims);
    node.right = build(right, next, dims);
    node.update_height();
    Some(Box::new(node))
}
