//! Utilities to traverse the KDTree structure.

use crate::kdtree::node::{next_axis, KDNode};
use crate::point::Point;
use crate::r#type::IndexableNum;

/// A read-only handle onto a node in the KDTree.
#[derive(Debug)]
pub struct Node<'a, N: IndexableNum> {
    node: &'a KDNode<N>,

    /// The depth of this node, 0 for the root.
    depth: usize,

    /// The axis that the children of this node are split over.
    axis: usize,

    dims: usize,
}

impl<N: IndexableNum> Clone for Node<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N: IndexableNum> Copy for Node<'_, N> {}

impl<'a, N: IndexableNum> Node<'a, N> {
    pub(crate) fn from_root(root: &'a KDNode<N>, dims: usize) -> Self {
        Self {
            node: root,
            depth: 0,
            axis: 0,
            dims,
        }
    }

    fn child(&self, child: &'a Option<Box<KDNode<N>>>) -> Option<Node<'a, N>> {
        child.as_deref().map(|node| Self {
            node,
            depth: self.depth + 1,
            axis: next_axis(self.axis, self.dims),
            dims: self.dims,
        })
    }

    /// The point stored at this node.
    pub fn point(&self) -> &'a Point<N> {
        &self.node.point
    }

    /// The depth of this node, 0 for the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The coordinate axis this node splits on, `depth % dims`.
    pub fn axis(&self) -> usize {
        self.axis
    }

    /// The height of the subtree rooted at this node, 0 for a leaf.
    pub fn height(&self) -> usize {
        self.node.height
    }

    /// The child holding points strictly below this node on [`axis`][Self::axis].
    pub fn left_child(&self) -> Option<Node<'a, N>> {
        self.child(&self.node.left)
    }

    /// The child holding points greater than or equal to this node on [`axis`][Self::axis].
    pub fn right_child(&self) -> Option<Node<'a, N>> {
        self.child(&self.node.right)
    }

    /// Returns `true` if this is a leaf node without children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.node.left.is_none() && self.node.right.is_none()
    }

    /// Returns `true` if this is an intermediate node with children.
    #[inline]
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }
}

/// A pre-order iterator over the points of a KDTree.
#[derive(Debug)]
pub struct Points<'a, N: IndexableNum> {
    stack: Vec<&'a KDNode<N>>,
    remaining: usize,
}

impl<'a, N: IndexableNum> Points<'a, N> {
    pub(crate) fn new(root: Option<&'a KDNode<N>>, len: usize) -> Self {
        Self {
            stack: root.into_iter().collect(),
            remaining: len,
        }
    }
}

impl<'a, N: IndexableNum> Iterator for Points<'a, N> {
    type Item = &'a Point<N>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Note: pushed in backwards order to what gets popped
        if let Some(right) = node.right.as_deref() {
            self.stack.push(right);
        }
        if let Some(left) = node.left.as_deref() {
            self.stack.push(left);
        }
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<N: IndexableNum> ExactSizeIterator for Points<'_, N> {}
