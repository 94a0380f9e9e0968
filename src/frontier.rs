//! Frontiers hold the states that were reached but not expanded yet.
//!
//! The order in which a frontier hands states back is what tells the search
//! strategies apart.

use std::collections::VecDeque;
use std::fmt::Debug;

use crate::cost::Cost;
use crate::data_structures::heap::DaryHeap;
use crate::space::State;

pub trait Frontier<St, C>: Debug + Default
where
    St: State,
    C: Cost,
{
    /// Adds a state. Frontiers that don't rank states ignore `rank`.
    fn push(&mut self, s: St, rank: C);
    fn pop(&mut self) -> Option<St>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Last in, first out.
#[derive(Debug)]
pub struct Stack<St> {
    states: Vec<St>,
}

impl<St> Default for Stack<St> {
    fn default() -> Self {
        Self { states: Vec::new() }
    }
}

impl<St: State, C: Cost> Frontier<St, C> for Stack<St> {
    #[inline(always)]
    fn push(&mut self, s: St, _rank: C) {
        self.states.push(s);
    }
    #[inline(always)]
    fn pop(&mut self) -> Option<St> {
        self.states.pop()
    }
    #[inline(always)]
    fn len(&self) -> usize {
        self.states.len()
    }
}

/// First in, first out.
#[derive(Debug)]
pub struct Queue<St> {
    states: VecDeque<St>,
}

impl<St> Default for Queue<St> {
    fn default() -> Self {
        Self {
            states: VecDeque::new(),
        }
    }
}

impl<St: State, C: Cost> Frontier<St, C> for Queue<St> {
    #[inline(always)]
    fn push(&mut self, s: St, _rank: C) {
        self.states.push_back(s);
    }
    #[inline(always)]
    fn pop(&mut self) -> Option<St> {
        self.states.pop_front()
    }
    #[inline(always)]
    fn len(&self) -> usize {
        self.states.len()
    }
}

/// The ranking tuple for priority frontiers.
///
/// Lower ranks go first, and equal ranks go in insertion order. The sequence
/// number is unique, so the order is total and runs are reproducible.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct PriorityRank<C: Cost> {
    pub rank: C,
    pub sequence: u64,
}

#[derive(Debug)]
pub struct PriorityEntry<St, C: Cost> {
    pub rank: PriorityRank<C>,
    /// Ignored when ranking.
    pub state: St,
}

impl<St, C: Cost> PartialEq for PriorityEntry<St, C> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.rank.eq(&other.rank)
    }
}
impl<St, C: Cost> Eq for PriorityEntry<St, C> {}

impl<St, C: Cost> PartialOrd for PriorityEntry<St, C> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<St, C: Cost> Ord for PriorityEntry<St, C> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank.cmp(&other.rank)
    }
}

const HEAP_ARITY: usize = 4usize;

/// Lowest rank first.
///
/// The same state may be pushed several times with different ranks. Every
/// copy is popped eventually; it's up to the caller to cope with the stale
/// ones.
#[derive(Debug)]
pub struct PriorityFrontier<St, C: Cost> {
    heap: DaryHeap<PriorityEntry<St, C>, HEAP_ARITY>,
    next_sequence: u64,
}

impl<St, C: Cost> Default for PriorityFrontier<St, C> {
    fn default() -> Self {
        Self {
            heap: DaryHeap::with_capacity(256),
            next_sequence: 0,
        }
    }
}

impl<St: State, C: Cost> Frontier<St, C> for PriorityFrontier<St, C> {
    fn push(&mut self, s: St, rank: C) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(PriorityEntry {
            rank: PriorityRank { rank, sequence },
            state: s,
        });
    }
    fn pop(&mut self) -> Option<St> {
        self.heap.pop().map(|e| e.state)
    }
    #[inline(always)]
    fn len(&self) -> usize {
        self.heap.len()
    }
}
