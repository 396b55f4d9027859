//! A priority queue that keeps only the best `capacity` elements it has seen.

use crate::error::{KDIndexError, Result};

#[derive(Debug, Clone)]
struct Entry<T, P> {
    element: T,
    priority: P,
}

/// A fixed-capacity queue ordered by ascending priority, where a **lower** priority is better.
///
/// Entries are held in a vector sorted from best to worst, so the worst entry is always at the
/// end and [`last`][Self::last] is O(1). Among equal priorities the entry enqueued first ranks
/// better. Once full, a newcomer is only kept if its priority is strictly better than the current
/// worst, in which case the worst is evicted; ties with the worst are rejected.
///
/// ```
/// use kd_index::BoundedPriorityQueue;
///
/// let mut queue = BoundedPriorityQueue::new(2).unwrap();
/// queue.enqueue("far", 9);
/// queue.enqueue("near", 1);
/// queue.enqueue("middle", 4);
/// assert_eq!(queue.into_vec(), vec!["near", "middle"]);
/// ```
#[derive(Debug, Clone)]
pub struct BoundedPriorityQueue<T, P: PartialOrd> {
    entries: Vec<Entry<T, P>>,
    capacity: usize,
}

impl<T, P: PartialOrd> BoundedPriorityQueue<T, P> {
    /// Create an empty queue holding at most `capacity` elements.
    ///
    /// Fails with [`KDIndexError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(KDIndexError::InvalidCapacity(capacity));
        }
        Ok(Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        })
    }

    /// Insert `element` with the given `priority`.
    ///
    /// Returns `true` if the element is now held by the queue and `false` if it was rejected
    /// because the queue is full of entries at least as good.
    pub fn enqueue(&mut self, element: T, priority: P) -> bool {
        if self.is_full() {
            match self.entries.last() {
                Some(worst) if priority < worst.priority => {}
                _ => return false,
            }
        }

        // After every entry with priority <= the new one, which keeps ties in insertion order.
        let pos = self.entries.partition_point(|e| e.priority <= priority);
        self.entries.insert(pos, Entry { element, priority });
        if self.entries.len() > self.capacity {
            self.entries.pop();
        }
        true
    }

    /// Remove and return the best element.
    pub fn dequeue(&mut self) -> Result<T> {
        if self.entries.is_empty() {
            return Err(KDIndexError::EmptyStructure("BoundedPriorityQueue"));
        }
        Ok(self.entries.remove(0).element)
    }

    /// The best element, without removing it.
    pub fn first(&self) -> Result<&T> {
        self.first_entry().map(|e| &e.element)
    }

    /// The worst element, without removing it.
    pub fn last(&self) -> Result<&T> {
        self.last_entry().map(|e| &e.element)
    }

    /// The priority of the best element.
    pub fn first_priority(&self) -> Result<&P> {
        self.first_entry().map(|e| &e.priority)
    }

    /// The priority of the worst element. Once the queue is full, only strictly smaller
    /// priorities are accepted by [`enqueue`][Self::enqueue].
    pub fn last_priority(&self) -> Result<&P> {
        self.last_entry().map(|e| &e.priority)
    }

    fn first_entry(&self) -> Result<&Entry<T, P>> {
        self.entries
            .first()
            .ok_or(KDIndexError::EmptyStructure("BoundedPriorityQueue"))
    }

    fn last_entry(&self) -> Result<&Entry<T, P>> {
        self.entries
            .last()
            .ok_or(KDIndexError::EmptyStructure("BoundedPriorityQueue"))
    }

    /// Whether an element equal to `element` is held. This is a linear scan.
    pub fn contains(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        self.entries.iter().any(|e| e.element == *element)
    }

    /// The number of held elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The maximum number of held elements, fixed at construction.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }

    /// Iterate over the held elements from best to worst.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.iter().map(|e| &e.element)
    }

    /// Iterate over `(element, priority)` pairs from best to worst.
    pub fn iter_with_priority(&self) -> impl Iterator<Item = (&T, &P)> + '_ {
        self.entries.iter().map(|e| (&e.element, &e.priority))
    }

    /// Consume the queue, returning its elements from best to worst.
    pub fn into_vec(self) -> Vec<T> {
        self.into_iter().collect()
    }
}

impl<T, P: PartialOrd> IntoIterator for BoundedPriorityQueue<T, P> {
    type Item = T;
    type IntoIter = IntoIter<T, P>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self.entries.into_iter())
    }
}

/// An owning iterator over the elements of a [`BoundedPriorityQueue`], from best to worst.
#[derive(Debug)]
pub struct IntoIter<T, P>(std::vec::IntoIter<Entry<T, P>>);

impl<T, P> Iterator for IntoIter<T, P> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.next().map(|e| e.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T, P> ExactSizeIterator for IntoIter<T, P> {}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn rejects_zero_capacity() {
        assert_eq!(
            BoundedPriorityQueue::<u8, u8>::new(0).unwrap_err(),
            KDIndexError::InvalidCapacity(0)
        );
    }

    #[test]
    fn empty_queue_access_fails() {
        let mut queue = BoundedPriorityQueue::<&str, f64>::new(3).unwrap();
        let empty = KDIndexError::EmptyStructure("BoundedPriorityQueue");
        assert_eq!(queue.first().unwrap_err(), empty);
        assert_eq!(queue.last().unwrap_err(), empty);
        assert_eq!(queue.last_priority().unwrap_err(), empty);
        assert_eq!(queue.dequeue().unwrap_err(), empty);
        assert!(queue.is_empty());
    }

    #[test]
    fn orders_by_ascending_priority() {
        let mut queue = BoundedPriorityQueue::new(10).unwrap();
        for (element, priority) in [("c", 3.5), ("a", 0.25), ("d", 7.0), ("b", 1.0)] {
            assert!(queue.enqueue(element, priority));
        }
        assert_eq!(*queue.first().unwrap(), "a");
        assert_eq!(*queue.last().unwrap(), "d");
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), ["a", "b", "c", "d"]);

        assert_eq!(queue.dequeue().unwrap(), "a");
        assert_eq!(queue.dequeue().unwrap(), "b");
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut queue = BoundedPriorityQueue::new(4).unwrap();
        queue.enqueue("first", 1);
        queue.enqueue("second", 1);
        queue.enqueue("zero", 0);
        queue.enqueue("third", 1);
        assert_eq!(queue.into_vec(), vec!["zero", "first", "second", "third"]);
    }

    #[test]
    fn full_queue_evicts_worst() {
        let mut queue = BoundedPriorityQueue::new(3).unwrap();
        queue.enqueue('a', 5);
        queue.enqueue('b', 2);
        queue.enqueue('c', 8);
        assert!(queue.is_full());

        assert!(queue.enqueue('d', 1));
        assert_eq!(queue.len(), 3);
        assert!(!queue.contains(&'c'));
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), ['d', 'b', 'a']);
        assert_eq!(*queue.last_priority().unwrap(), 5);
    }

    #[test]
    fn full_queue_rejects_worse_and_tied() {
        let mut queue = BoundedPriorityQueue::new(2).unwrap();
        queue.enqueue('a', 1);
        queue.enqueue('b', 4);

        assert!(!queue.enqueue('c', 9));
        assert!(!queue.enqueue('d', 4));
        assert!(queue.contains(&'b'));
        assert!(!queue.contains(&'c'));
        assert!(!queue.contains(&'d'));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn capacity_one() {
        let mut queue = BoundedPriorityQueue::new(1).unwrap();
        queue.enqueue("x", 10);
        queue.enqueue("y", 3);
        queue.enqueue("z", 3);
        assert_eq!(queue.first().unwrap(), queue.last().unwrap());
        assert_eq!(queue.into_vec(), vec!["y"]);
    }

    #[test]
    fn keeps_lowest_priorities_seen() {
        let mut rng = StdRng::seed_from_u64(7);
        for capacity in [1, 2, 5, 16, 50] {
            let mut queue = BoundedPriorityQueue::new(capacity).unwrap();
            let mut seen = vec![];
            for i in 0..200_usize {
                let priority: i32 = rng.gen_range(0..40);
                queue.enqueue(i, priority);
                seen.push((priority, i));

                // A stable sort keeps equal priorities in insertion order.
                let mut expected = seen.clone();
                expected.sort_by_key(|(p, _)| *p);
                expected.truncate(capacity);

                let held: Vec<(i32, usize)> =
                    queue.iter_with_priority().map(|(e, p)| (*p, *e)).collect();
                assert_eq!(held, expected);
                assert_eq!(queue.len(), capacity.min(seen.len()));
            }
        }
    }
}
