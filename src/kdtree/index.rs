use std::fmt::Display;

use log::trace;

use crate::error::{KDIndexError, Result};
use crate::kdtree::node::KDNode;
use crate::kdtree::traversal::{Node, Points};
use crate::point::Point;
use crate::queue::BoundedPriorityQueue;
use crate::r#type::IndexableNum;

/// The dimensionality of [`KDTree::default`].
pub const DEFAULT_DIMS: usize = 2;

/// A dynamic K-D tree over points with a fixed number of dimensions.
///
/// Points may be inserted and deleted at any time. The tree is **not** self-balancing: inserting
/// points in sorted order degrades it towards a linked list. Use
/// [`KDTreeBuilder`][crate::kdtree::KDTreeBuilder] to bulk load a balanced tree.
///
/// All methods taking a point fail with [`KDIndexError::DimensionalityMismatch`] if the point
/// does not have [`dims`][Self::dims] coordinates. Queries borrow the stored points rather than
/// copying them.
#[derive(Debug, Clone)]
pub struct KDTree<N: IndexableNum> {
    pub(crate) root: Option<Box<KDNode<N>>>,
    pub(crate) dims: usize,
    pub(crate) count: usize,
}

impl<N: IndexableNum> Default for KDTree<N> {
    fn default() -> Self {
        Self {
            root: None,
            dims: DEFAULT_DIMS,
            count: 0,
        }
    }
}

impl<N: IndexableNum> KDTree<N> {
    /// Create an empty tree for points with `dims` coordinates.
    ///
    /// Fails with [`KDIndexError::InvalidDimensionality`] if `dims` is zero.
    pub fn new(dims: usize) -> Result<Self> {
        if dims == 0 {
            return Err(KDIndexError::InvalidDimensionality(dims));
        }
        Ok(Self {
            root: None,
            dims,
            count: 0,
        })
    }

    fn check_dims(&self, point: &Point<N>) -> Result<()> {
        if point.dims() != self.dims {
            return Err(KDIndexError::DimensionalityMismatch {
                expected: self.dims,
                found: point.dims(),
            });
        }
        Ok(())
    }

    /// The number of coordinates of every point in this tree.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// The number of stored points, counting duplicates.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The height of the tree: -1 when empty, 0 for a single point.
    pub fn height(&self) -> isize {
        self.root.as_ref().map_or(-1, |root| root.height as isize)
    }

    /// Insert a point. Equal points may be inserted more than once.
    pub fn insert(&mut self, point: Point<N>) -> Result<()> {
        self.check_dims(&point)?;
        match &mut self.root {
            Some(root) => root.insert(point, 0, self.dims),
            None => self.root = Some(Box::new(KDNode::new(point))),
        }
        self.count += 1;
        trace!("Inserted point, tree now holds {} points", self.count);
        Ok(())
    }

    /// Delete one point equal to `point`.
    ///
    /// Returns `true` if a point was removed and `false` if no equal point was stored, in which
    /// case the tree is left untouched.
    pub fn delete(&mut self, point: &Point<N>) -> Result<bool> {
        if !self.contains(point)? {
            trace!("Point to delete not found");
            return Ok(false);
        }
        if let Some(root) = self.root.take() {
            self.root = root.delete(point, 0, self.dims);
        }
        self.count -= 1;
        trace!("Deleted point, tree now holds {} points", self.count);
        Ok(true)
    }

    /// Whether a point equal to `point` is stored.
    pub fn contains(&self, point: &Point<N>) -> Result<bool> {
        self.check_dims(point)?;
        Ok(self
            .root
            .as_ref()
            .is_some_and(|root| root.contains(point, 0, self.dims)))
    }

    /// All stored points whose euclidean distance to `anchor` is at most `radius`, inclusive.
    ///
    /// The radius is squared internally and compared against squared distances. Points equal to
    /// `anchor` are included. Results are in no particular order.
    pub fn range(&self, anchor: &Point<N>, radius: N) -> Result<Vec<&Point<N>>> {
        self.check_dims(anchor)?;
        if radius < N::zero() {
            return Err(KDIndexError::NegativeRadius);
        }
        let radius_sq = radius.clone() * radius;
        let mut results = vec![];
        if let Some(root) = &self.root {
            root.within(anchor, &radius_sq, 0, self.dims, &mut results);
        }
        Ok(results)
    }

    /// All stored points inside the axis-aligned box spanned by the corners `min` and `max`,
    /// boundary included. A box with `min[i] > max[i]` on any axis contains nothing.
    pub fn range_rect(&self, min: &Point<N>, max: &Point<N>) -> Result<Vec<&Point<N>>> {
        self.check_dims(min)?;
        self.check_dims(max)?;
        let mut results = vec![];
        if let Some(root) = &self.root {
            root.within_rect(min, max, 0, self.dims, &mut results);
        }
        Ok(results)
    }

    /// The stored point closest to `anchor`, other than points equal to `anchor` itself.
    ///
    /// Returns `None` when the tree is empty or holds nothing but copies of `anchor`. Among
    /// equally close points any one may be returned.
    pub fn nearest_neighbor(&self, anchor: &Point<N>) -> Result<Option<&Point<N>>> {
        self.check_dims(anchor)?;
        let mut best = None;
        if let Some(root) = &self.root {
            root.nearest(anchor, 0, self.dims, &mut best);
        }
        Ok(best.map(|(point, _)| point))
    }

    /// The `k` stored points closest to `anchor`, closest first, other than points equal to
    /// `anchor` itself. Fewer than `k` points are returned if the tree holds fewer candidates.
    ///
    /// Fails with [`KDIndexError::InvalidK`] if `k` is zero.
    pub fn k_nearest_neighbors(&self, k: usize, anchor: &Point<N>) -> Result<Vec<&Point<N>>> {
        if k == 0 {
            return Err(KDIndexError::InvalidK(k));
        }
        self.check_dims(anchor)?;
        let mut queue = BoundedPriorityQueue::new(k)?;
        if let Some(root) = &self.root {
            root.k_nearest(anchor, 0, self.dims, &mut queue);
        }
        Ok(queue.into_vec())
    }

    fn check_axis(&self, axis: usize) -> Result<()> {
        if axis >= self.dims {
            return Err(KDIndexError::AxisOutOfBounds {
                axis,
                dims: self.dims,
            });
        }
        Ok(())
    }

    /// A stored point with the smallest coordinate on `axis`.
    pub fn min_along(&self, axis: usize) -> Result<&Point<N>> {
        self.check_axis(axis)?;
        let root = self
            .root
            .as_ref()
            .ok_or(KDIndexError::EmptyStructure("KDTree"))?;
        Ok(root.min_along(axis, 0, self.dims))
    }

    /// A stored point with the largest coordinate on `axis`.
    pub fn max_along(&self, axis: usize) -> Result<&Point<N>> {
        self.check_axis(axis)?;
        let root = self
            .root
            .as_ref()
            .ok_or(KDIndexError::EmptyStructure("KDTree"))?;
        Ok(root.max_along(axis, 0, self.dims))
    }

    /// The point stored at the root, if any.
    pub fn root_point(&self) -> Option<&Point<N>> {
        self.root.as_ref().map(|root| &root.point)
    }

    /// Access the root node of the KDTree for manual traversal.
    pub fn root(&self) -> Option<Node<'_, N>> {
        self.root
            .as_deref()
            .map(|root| Node::from_root(root, self.dims))
    }

    /// Iterate over all stored points in pre-order.
    pub fn iter(&self) -> Points<'_, N> {
        Points::new(self.root.as_deref(), self.count)
    }

    /// Remove every point, keeping the dimensionality.
    pub fn clear(&mut self) {
        self.root = None;
        self.count = 0;
    }
}

impl<N: IndexableNum + Display> KDTree<N> {
    /// A pre-order description of the tree shape, one line per child slot.
    ///
    /// Each line is indented by one space per level; empty child slots are shown as `*`.
    /// An empty tree is described as a single `*`.
    ///
    /// ```
    /// use kd_index::{KDTree, Point};
    ///
    /// let mut tree = KDTree::new(2).unwrap();
    /// tree.insert(Point::new([5, 5]).unwrap()).unwrap();
    /// tree.insert(Point::new([2, 8]).unwrap()).unwrap();
    /// assert_eq!(tree.describe(), vec!["(5, 5)", " (2, 8)", "  *", "  *", " *"]);
    /// ```
    pub fn describe(&self) -> Vec<String> {
        let mut lines = vec![];
        describe_node(self.root(), 0, &mut lines);
        lines
    }
}

fn describe_node<N: IndexableNum + Display>(
    node: Option<Node<'_, N>>,
    depth: usize,
    lines: &mut Vec<String>,
) {
    let indent = " ".repeat(depth);
    match node {
        Some(node) => {
            lines.push(format!("{}{}", indent, node.point()));
            describe_node(node.left_child(), depth + 1, lines);
            describe_node(node.right_child(), depth + 1, lines);
        }
        None => lines.push(format!("{}*", indent)),
    }
}

impl<'a, N: IndexableNum> IntoIterator for &'a KDTree<N> {
    type Item = &'a Point<N>;
    type IntoIter = Points<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
