//! A d-ary min-heap used as the frontier of best-first searches.
//!
//! A heap is a tree-like structure where every subtree's root ranks better
//! than all the other nodes in the subtree. It lives in a flat array that's
//! traversed in a non-linear way. With arity 2 the indices look like,
//!
//! ```text
//!                           0
//!              1                         2
//!       3            4            5             6
//!   7      8      9     10    11     12     13     14
//! 15 16  17 18  19 20  21 22 23 24  25
//! ```
//!
//! The last level will often be incomplete.
//!
//! Entries are never re-ranked in place. Searches push a fresh entry when a
//! node improves and skip the stale ones when they surface.

use std::cmp::min;

const HEAP_ARITY: usize = 4usize;

/// The parent node
///
/// ```
/// use wayfinder::open_list::index_parent;
/// assert_eq!(index_parent::<2>(1), 0);
/// assert_eq!(index_parent::<2>(2), 0);
/// assert_eq!(index_parent::<2>(5), 2);
/// assert_eq!(index_parent::<2>(25), 12);
/// assert_eq!(index_parent::<4>(4), 0);
/// assert_eq!(index_parent::<4>(5), 1);
/// ```
#[inline(always)]
#[must_use]
pub fn index_parent<const A: usize>(i: usize) -> usize {
    (i - 1) / A
}

/// The first (left-most) child
///
/// ```
/// use wayfinder::open_list::index_first_child;
/// assert_eq!(index_first_child::<2>(0), 1);
/// assert_eq!(index_first_child::<2>(3), 7);
/// assert_eq!(index_first_child::<4>(0), 1);
/// assert_eq!(index_first_child::<4>(1), 5);
/// ```
#[inline(always)]
#[must_use]
pub fn index_first_child<const A: usize>(i: usize) -> usize {
    (A * i) + 1
}

#[inline(always)]
#[must_use]
fn up(i: usize) -> usize {
    index_parent::<HEAP_ARITY>(i)
}
#[inline(always)]
#[must_use]
fn down_left(i: usize) -> usize {
    index_first_child::<HEAP_ARITY>(i)
}

/// A min-heap. `pop` yields the smallest entry according to `Ord`.
///
/// Entries that compare equal come out in no particular order, so callers
/// needing stable tie-breaking should rank on an insertion counter too.
#[derive(Debug, Clone)]
pub struct OpenList<T>
where
    T: Ord,
{
    heap: Vec<T>,
}

impl<T> Default for OpenList<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OpenList<T>
where
    T: Ord,
{
    #[must_use]
    pub fn new() -> Self {
        Self { heap: vec![] }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    #[inline(always)]
    pub fn peek(&self) -> Option<&T> {
        self.heap.first()
    }

    pub fn push(&mut self, e: T) {
        self.heap.push(e);
        self.sift_up(self.heap.len() - 1);
        self.verify_heap();
    }

    pub fn pop(&mut self) -> Option<T> {
        let len = self.heap.len();
        if len <= 1 {
            return self.heap.pop();
        }
        self.heap.swap(0, len - 1);
        let top = self.heap.pop();
        self.sift_down(0);
        self.verify_heap();
        top
    }

    /// Raises a node
    /// Returns it's new index
    fn sift_up(&mut self, mut pos: usize) -> usize {
        while pos > 0 {
            let parent = up(pos);
            if self.heap[parent] <= self.heap[pos] {
                break;
            }
            self.heap.swap(parent, pos);
            pos = parent;
        }
        pos
    }

    /// Lowers a node
    /// Returns it's new index
    fn sift_down(&mut self, mut pos: usize) -> usize {
        let len = self.heap.len();
        loop {
            let first = down_left(pos);
            if first >= len {
                break;
            }
            let last = min(first + HEAP_ARITY, len);
            // Find the best child. Ties go to the left-most one.
            let mut best = first;
            for child in (first + 1)..last {
                if self.heap[child] < self.heap[best] {
                    best = child;
                }
            }
            if self.heap[pos] <= self.heap[best] {
                break;
            }
            self.heap.swap(pos, best);
            pos = best;
        }
        pos
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    fn verify_heap(&self) {
        // All good... (hopefully)
    }
    #[cfg(feature = "verify")]
    fn verify_heap(&self) {
        // Every node goes after its parent node, if any.
        for i in 1..self.heap.len() {
            let p = up(i);
            assert!(
                self.heap[p] <= self.heap[i],
                "Node[{p}] !<= child [{i}]. Out of heap of len={}",
                self.heap.len(),
            );
        }
    }
}

impl<T> Extend<T> for OpenList<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for e in iter {
            self.push(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    #[test]
    fn pops_in_order() {
        let mut open = OpenList::new();
        open.extend([5, 3, 9, 1, 1, 7, 0, 12, 4]);
        assert_eq!(open.peek(), Some(&0));

        let mut popped = vec![];
        while let Some(e) = open.pop() {
            popped.push(e);
        }
        assert_eq!(popped, vec![0, 1, 1, 3, 4, 5, 7, 9, 12]);
        assert!(open.is_empty());
    }

    #[test]
    fn interleaved_push_pop_matches_sort() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut open = OpenList::with_capacity(64);
        let mut reference = vec![];

        for round in 0..500u32 {
            let v: u32 = rng.random_range(0..100);
            open.push((v, round));
            reference.push((v, round));
            if round % 3 == 0 {
                reference.sort();
                let expected = reference.remove(0);
                assert_eq!(open.pop(), Some(expected));
            }
        }
        reference.sort();
        for expected in reference {
            assert_eq!(open.pop(), Some(expected));
        }
        assert_eq!(open.pop(), None);
    }
}
