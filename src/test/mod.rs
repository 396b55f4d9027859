//! Fixtures shared by tests across the crate.

use rand::rngs::StdRng;
use rand::Rng;

use crate::kdtree::Node;
use crate::{IndexableNum, KDTree, Point};


/// A point from a coordinate slice, for terse tests.
pub(crate) fn pt<N: IndexableNum>(coords: &[N]) -> Point<N> {
    Point::new(coords.to_vec()).unwrap()
}

/// `n` random integer points with coordinates in `-extent..=extent`. A small extent produces
/// plenty of duplicate coordinates and duplicate points.
pub(crate) fn random_points(rng: &mut StdRng, n: usize, dims: usize, extent: i64) -> Vec<Point<i64>> {
    (0..n)
        .map(|_| {
            let coords: Vec<i64> = (0..dims).map(|_| rng.gen_range(-extent..=extent)).collect();
            Point::new(coords).unwrap()
        })
        .collect()
}

/// Points in lexicographic coordinate order, so results can be compared as multisets.
pub(crate) fn sorted(points: impl IntoIterator<Item = Point<i64>>) -> Vec<Point<i64>> {
    let mut points: Vec<Point<i64>> = points.into_iter().collect();
    points.sort_by(|a, b| a.coords().cmp(b.coords()));
    points
}

fn collect_subtree<'a, N: IndexableNum>(node: Option<Node<'a, N>>, out: &mut Vec<&'a Point<N>>) {
    if let Some(node) = node {
        out.push(node.point());
        collect_subtree(node.left_child(), out);
        collect_subtree(node.right_child(), out);
    }
}

/// Check the splitting invariant and the cached height of every node, returning the height.
fn check_node<N: IndexableNum>(node: Node<'_, N>) -> usize {
    let axis = node.axis();
    let split = node.point().coord(axis);

    let mut left = vec![];
    collect_subtree(node.left_child(), &mut left);
    for p in left {
        assert!(
            p.coord(axis) < split,
            "left descendant {:?} not below {:?} on axis {}",
            p,
            node.point(),
            axis
        );
    }

    let mut right = vec![];
    collect_subtree(node.right_child(), &mut right);
    for p in right {
        assert!(
            p.coord(axis) >= split,
            "right descendant {:?} below {:?} on axis {}",
            p,
            node.point(),
            axis
        );
    }

    let height = [node.left_child(), node.right_child()]
        .into_iter()
        .flatten()
        .map(|child| check_node(child) + 1)
        .max()
        .unwrap_or(0);
    assert_eq!(node.height(), height, "stale height at {:?}", node.point());
    height
}

/// Assert every structural invariant of `tree`.
pub(crate) fn assert_invariants<N: IndexableNum>(tree: &KDTree<N>) {
    match tree.root() {
        Some(root) => {
            let height = check_node(root);
            assert_eq!(tree.height(), height as isize);
            assert!(!tree.is_empty());
        }
        None => {
            assert_eq!(tree.height(), -1);
            assert!(tree.is_empty());
        }
    }
    assert_eq!(tree.iter().count(), tree.len(), "count out of sync");
}
