//! The recursive node of a dynamic K-D tree.
//!
//! Every operation takes the splitting `axis` of the node it is called on together with the
//! tree's dimensionality `dims`; children split on `(axis + 1) % dims`. A node's left subtree
//! holds points strictly below it on its axis and its right subtree points greater or equal.
//! Callers validate point dimensionality before reaching this module.

use tinyvec::TinyVec;

use crate::point::Point;
use crate::queue::BoundedPriorityQueue;
use crate::r#type::{abs_diff, IndexableNum};

/// An owned node of the tree. Children are exclusively owned by their parent.
#[derive(Debug, Clone)]
pub(crate) struct KDNode<N: IndexableNum> {
    pub(crate) point: Point<N>,
    /// Height of the subtree rooted here, 0 for a leaf.
    pub(crate) height: usize,
    pub(crate) left: Option<Box<KDNode<N>>>,
    pub(crate) right: Option<Box<KDNode<N>>>,
}

/// Explicit traversal stack entry. The node is optional only so the entry has a `Default`.
type StackEntry<'a, N> = (Option<&'a KDNode<N>>, usize);

#[inline]
pub(crate) fn next_axis(axis: usize, dims: usize) -> usize {
    (axis + 1) % dims
}

/// Squared distance from `anchor` to the splitting hyperplane through `split` on one axis.
#[inline]
fn plane_dist<N: IndexableNum>(anchor: &N, split: &N) -> N {
    let d = abs_diff(anchor, split);
    d.clone() * d
}

impl<N: IndexableNum> KDNode<N> {
    pub(crate) fn new(point: Point<N>) -> Self {
        Self {
            point,
            height: 0,
            left: None,
            right: None,
        }
    }

    pub(crate) fn update_height(&mut self) {
        self.height = [&self.left, &self.right]
            .into_iter()
            .flatten()
            .map(|child| child.height + 1)
            .max()
            .unwrap_or(0);
    }

    pub(crate) fn insert(&mut self, point: Point<N>, axis: usize, dims: usize) {
        let child = if point.coord(axis) < self.point.coord(axis) {
            &mut self.left
        } else {
            &mut self.right
        };
        if let Some(node) = child {
            node.insert(point, next_axis(axis, dims), dims);
        } else {
            *child = Some(Box::new(KDNode::new(point)));
        }
        self.update_height();
    }

    /// Whether a point structurally equal to `target` is stored in this subtree.
    pub(crate) fn contains(&self, target: &Point<N>, mut axis: usize, dims: usize) -> bool {
        let mut node = self;
        loop {
            if node.point == *target {
                return true;
            }
            let child = if target.coord(axis) < node.point.coord(axis) {
                &node.left
            } else {
                &node.right
            };
            match child {
                Some(next) => {
                    node = next;
                    axis = next_axis(axis, dims);
                }
                None => return false,
            }
        }
    }

    /// Remove one point equal to `target` from this subtree, returning the new subtree root.
    ///
    /// A removed interior node takes over the minimum (on its own axis) of its right subtree. If
    /// it has no right subtree, the minimum of its left subtree is promoted instead and what
    /// remains of the left subtree becomes the right one, since points equal to that minimum may
    /// remain and must sit on the right.
    pub(crate) fn delete(
        mut self: Box<Self>,
        target: &Point<N>,
        axis: usize,
        dims: usize,
    ) -> Option<Box<Self>> {
        let next = next_axis(axis, dims);
        if self.point == *target {
            if let Some(right) = self.right.take() {
                let replacement = right.min_along(axis, next, dims).clone();
                self.right = right.delete(&replacement, next, dims);
                self.point = replacement;
            } else if let Some(left) = self.left.take() {
                let replacement = left.min_along(axis, next, dims).clone();
                self.right = left.delete(&replacement, next, dims);
                self.point = replacement;
            } else {
                return None;
            }
        } else if target.coord(axis) < self.point.coord(axis) {
            if let Some(left) = self.left.take() {
                self.left = left.delete(target, next, dims);
            }
        } else if let Some(right) = self.right.take() {
            self.right = right.delete(target, next, dims);
        }
        self.update_height();
        Some(self)
    }

    /// The point of this subtree with the smallest coordinate on `sought`.
    pub(crate) fn min_along(&self, sought: usize, axis: usize, dims: usize) -> &Point<N> {
        let next = next_axis(axis, dims);
        if sought == axis {
            // The right subtree cannot go below this node on its own axis.
            return match &self.left {
                Some(left) => left.min_along(sought, next, dims),
                None => &self.point,
            };
        }
        let mut best = &self.point;
        for child in [&self.left, &self.right].into_iter().flatten() {
            let candidate = child.min_along(sought, next, dims);
            if candidate.coord(sought) < best.coord(sought) {
                best = candidate;
            }
        }
        best
    }

    /// The point of this subtree with the largest coordinate on `sought`.
    pub(crate) fn max_along(&self, sought: usize, axis: usize, dims: usize) -> &Point<N> {
        let next = next_axis(axis, dims);
        if sought == axis {
            return match &self.right {
                Some(right) => right.max_along(sought, next, dims),
                None => &self.point,
            };
        }
        let mut best = &self.point;
        for child in [&self.left, &self.right].into_iter().flatten() {
            let candidate = child.max_along(sought, next, dims);
            if candidate.coord(sought) > best.coord(sought) {
                best = candidate;
            }
        }
        best
    }

    /// Collect every point within `radius_sq` (inclusive) of `anchor`.
    pub(crate) fn within<'a>(
        &'a self,
        anchor: &Point<N>,
        radius_sq: &N,
        axis: usize,
        dims: usize,
        results: &mut Vec<&'a Point<N>>,
    ) {
        // Use TinyVec to avoid heap allocations for shallow trees
        let mut stack: TinyVec<[StackEntry<'a, N>; 32]> = TinyVec::new();
        stack.push((Some(self), axis));

        while let Some((node, axis)) = stack.pop() {
            let Some(node) = node else { continue };

            if node.point.distance_squared_unchecked(anchor) <= *radius_sq {
                results.push(&node.point);
            }

            let split = node.point.coord(axis);
            let a = anchor.coord(axis);
            // the query ball reaches the other side of the splitting hyperplane
            let crosses = plane_dist(a, split) <= *radius_sq;
            let next = next_axis(axis, dims);

            if let Some(left) = node.left.as_deref() {
                if a < split || crosses {
                    stack.push((Some(left), next));
                }
            }
            if let Some(right) = node.right.as_deref() {
                if a >= split || crosses {
                    stack.push((Some(right), next));
                }
            }
        }
    }

    /// Collect every point inside the closed box `[min, max]`.
    pub(crate) fn within_rect<'a>(
        &'a self,
        min: &Point<N>,
        max: &Point<N>,
        axis: usize,
        dims: usize,
        results: &mut Vec<&'a Point<N>>,
    ) {
        let mut stack: TinyVec<[StackEntry<'a, N>; 32]> = TinyVec::new();
        stack.push((Some(self), axis));

        while let Some((node, axis)) = stack.pop() {
            let Some(node) = node else { continue };

            let inside = (0..dims).all(|i| {
                let c = node.point.coord(i);
                min.coord(i) <= c && c <= max.coord(i)
            });
            if inside {
                results.push(&node.point);
            }

            // queue search in halves that intersect the query
            let split = node.point.coord(axis);
            let next = next_axis(axis, dims);
            if let Some(left) = node.left.as_deref() {
                if min.coord(axis) < split {
                    stack.push((Some(left), next));
                }
            }
            if let Some(right) = node.right.as_deref() {
                if max.coord(axis) >= split {
                    stack.push((Some(right), next));
                }
            }
        }
    }

    /// Update `best` with the closest point to `anchor` in this subtree, skipping points equal to
    /// `anchor`.
    pub(crate) fn nearest<'a>(
        &'a self,
        anchor: &Point<N>,
        axis: usize,
        dims: usize,
        best: &mut Option<(&'a Point<N>, N)>,
    ) {
        if self.point != *anchor {
            let dist = self.point.distance_squared_unchecked(anchor);
            if best.as_ref().map_or(true, |(_, best_dist)| dist < *best_dist) {
                *best = Some((&self.point, dist));
            }
        }

        let split = self.point.coord(axis);
        let a = anchor.coord(axis);
        let (near, far) = if a < split {
            (&self.left, &self.right)
        } else {
            (&self.right, &self.left)
        };
        let next = next_axis(axis, dims);

        if let Some(near) = near {
            near.nearest(anchor, next, dims, best);
        }
        if let Some(far) = far {
            let plane = plane_dist(a, split);
            if best.as_ref().map_or(true, |(_, best_dist)| plane < *best_dist) {
                far.nearest(anchor, next, dims, best);
            }
        }
    }

    /// Offer every point of this subtree that could still make the cut to `queue`, prioritized
    /// by squared distance to `anchor`. Points equal to `anchor` are skipped.
    pub(crate) fn k_nearest<'a>(
        &'a self,
        anchor: &Point<N>,
        axis: usize,
        dims: usize,
        queue: &mut BoundedPriorityQueue<&'a Point<N>, N>,
    ) {
        if self.point != *anchor {
            queue.enqueue(&self.point, self.point.distance_squared_unchecked(anchor));
        }

        let split = self.point.coord(axis);
        let a = anchor.coord(axis);
        let (near, far) = if a < split {
            (&self.left, &self.right)
        } else {
            (&self.right, &self.left)
        };
        let next = next_axis(axis, dims);

        if let Some(near) = near {
            near.k_nearest(anchor, next, dims, queue);
        }
        if let Some(far) = far {
            // Until the queue is full anything is accepted, afterwards only strict improvements
            // on the current worst.
            let reachable = !queue.is_full()
                || queue
                    .last_priority()
                    .map_or(true, |worst| plane_dist(a, split) < *worst);
            if reachable {
                far.k_nearest(anchor, next, dims, queue);
            }
        }
    }
}
