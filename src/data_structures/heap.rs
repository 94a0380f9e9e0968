//! A d-ary min-heap.
//!
//! A heap is a tree-like structure where every subtree's root has a better
//! score than all the other nodes in the subtree, stored in an array that's
//! traversed in a non-linear way. For `ARITY = 2` the indices look like,
//!
//! ```text
//!                           0
//!              1                         2
//!       3            4            5             6
//!   7      8      9     10    11     12     13     14
//! 15 16  17 18  19 20  21 22 23 24  25
//! ```
//!
//! Wider heaps are shallower, so pops touch fewer levels at the cost of
//! comparing more siblings per level.

use std::fmt::Debug;

/// The parent node
///
/// ```
/// use maze_search::data_structures::heap::index_parent;
/// assert_eq!(index_parent::<2>(1), 0);
/// assert_eq!(index_parent::<2>(2), 0);
/// assert_eq!(index_parent::<2>(6), 2);
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
/// use maze_search::data_structures::heap::index_first_child;
/// assert_eq!(index_first_child::<2>(0), 1);
/// assert_eq!(index_first_child::<2>(3), 7);
/// assert_eq!(index_first_child::<4>(1), 5);
/// ```
#[inline(always)]
#[must_use]
pub fn index_first_child<const A: usize>(i: usize) -> usize {
    (A * i) + 1
}

/// Index of the smallest element in a non-empty run of siblings.
///
/// Ties go to the left-most sibling.
#[inline(always)]
#[must_use]
fn derank<T: Ord>(a: &[T]) -> usize {
    debug_assert!(!a.is_empty());
    let mut best = 0;
    for i in 1..a.len() {
        if a[i] < a[best] {
            best = i;
        }
    }
    best
}

#[derive(Clone)]
pub struct DaryHeap<T: Ord, const ARITY: usize> {
    data: Vec<T>,
}

impl<T: Ord, const ARITY: usize> DaryHeap<T, ARITY> {
    #[must_use]
    pub fn new() -> Self {
        debug_assert!(ARITY >= 2);
        Self { data: Vec::new() }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.data.len()
    }
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    pub fn push(&mut self, t: T) {
        self.data.push(t);
        self.sift_up(self.data.len() - 1);
        self.verify_heap();
    }

    pub fn pop(&mut self) -> Option<T> {
        let len = self.data.len();
        if len <= 1 {
            return self.data.pop();
        }
        self.data.swap(0, len - 1);
        let top = self.data.pop();
        self.sift_down(0);
        self.verify_heap();
        top
    }

    /// Raises a node. Returns its new index.
    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = index_parent::<ARITY>(index);
            if self.data[parent] <= self.data[index] {
                break;
            }
            self.data.swap(parent, index);
            index = parent;
        }
        index
    }

    /// Lowers a node. Returns its new index.
    fn sift_down(&mut self, mut index: usize) -> usize {
        let len = self.data.len();
        loop {
            let first = index_first_child::<ARITY>(index);
            if first >= len {
                break;
            }
            let child = first + derank(&self.data[first..std::cmp::min(first + ARITY, len)]);
            if self.data[index] <= self.data[child] {
                break;
            }
            self.data.swap(index, child);
            index = child;
        }
        index
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    fn verify_heap(&self) {}

    #[cfg(feature = "verify")]
    fn verify_heap(&self) {
        for i in 1..self.data.len() {
            let p = index_parent::<ARITY>(i);
            assert!(
                self.data[p] <= self.data[i],
                "Node[{p}] goes after its child [{i}]. Out of heap of len={}",
                self.data.len(),
            );
        }
    }
}

impl<T: Ord, const ARITY: usize> Default for DaryHeap<T, ARITY> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord, const ARITY: usize> Debug for DaryHeap<T, ARITY> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "DaryHeap<{ARITY}>{{({} nodes)}}", self.len())
    }
}
