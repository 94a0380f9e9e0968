use std::fmt::Debug;
use std::hash::Hash;

use num_traits::{One, SaturatingAdd, Zero};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use thiserror::Error;

use crate::cost::Cost;

pub trait Action: Copy + Clone + Debug + PartialEq + Eq {}
pub trait State: Copy + Clone + Debug + PartialEq + Eq + Hash {}

/// How many moves fit inline before a `SmallVec` spills to the heap.
pub const INLINE_ACTIONS: usize = 4;

pub type Actions<A> = SmallVec<[A; INLINE_ACTIONS]>;
pub type Successors<St, A> = SmallVec<[(St, A); INLINE_ACTIONS]>;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Action {action:?} is not legal from {state:?}")]
pub struct TransitionError<St: State, A: Action> {
    pub state: St,
    pub action: A,
}

/// A route through a search space.
///
/// `states` holds every visited state from start to end inclusive, and
/// `actions[i]` takes `states[i]` to `states[i + 1]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    states: Vec<St>,
    actions: Vec<A>,
    cost: C,
}

impl<St, A, C> Path<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    pub fn new_from_start(start: St) -> Self {
        Self {
            states: vec![start],
            actions: vec![],
            cost: C::zero(),
        }
    }

    pub fn start(&self) -> St {
        self.states[0]
    }
    pub fn end(&self) -> St {
        self.states[self.states.len() - 1]
    }
    pub fn states(&self) -> &[St] {
        &self.states
    }
    pub fn actions(&self) -> &[A] {
        &self.actions
    }
    pub fn cost(&self) -> C {
        self.cost
    }

    /// Number of steps taken.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the path never moves away from its start.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Whether no state is visited twice.
    pub fn is_simple(&self) -> bool {
        let mut seen = FxHashSet::default();
        self.states.iter().all(|s| seen.insert(*s))
    }

    #[inline(always)]
    pub(crate) fn append(&mut self, action: A, s: St, c: C) {
        self.actions.push(action);
        self.states.push(s);
        self.cost = self.cost.saturating_add(&c);
    }

    /// Reverses the state and action sequences, keeping the cost.
    ///
    /// Only meaningful while reconstructing paths backwards, where
    /// `actions[i]` was recorded as the move that reached `states[i]`.
    pub(crate) fn reverse(&mut self) {
        self.states.reverse();
        self.actions.reverse();
    }

    pub(crate) fn set_cost(&mut self, c: C) {
        self.cost = c;
    }
}

impl<St, A, C> std::fmt::Display for Path<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Path({}, {:?}:{:?}:{:?})",
            self.cost,
            self.start(),
            self.actions.iter().take(20).collect::<Vec<_>>(),
            self.end()
        )
    }
}

/// What a search needs to know about the world it explores.
///
/// Implementations own a fixed state space with a single start and goal. The
/// search only ever calls `result` with actions it got from `actions`.
pub trait Environment: Debug {
    type State: State;
    type Action: Action;
    type Cost: Cost;

    fn start(&self) -> Self::State;
    fn goal(&self) -> Self::State;

    fn in_bounds(&self, s: &Self::State) -> bool;
    fn passable(&self, s: &Self::State) -> bool;

    /// Actions that lead to an in-bounds, passable state.
    fn actions(&self, s: &Self::State) -> Actions<Self::Action>;

    fn result(
        &self,
        s: &Self::State,
        a: &Self::Action,
    ) -> Result<Self::State, TransitionError<Self::State, Self::Action>>;

    fn step_cost(&self, _s: &Self::State, _a: &Self::Action, _next: &Self::State) -> Self::Cost {
        Self::Cost::one()
    }

    fn goal_test(&self, s: &Self::State) -> bool {
        *s == self.goal()
    }

    /// Every legal action from `s` along with where it leads.
    fn successors(&self, s: &Self::State) -> Successors<Self::State, Self::Action> {
        let mut v = Successors::new();
        for a in self.actions(s) {
            match self.result(s, &a) {
                Ok(next) => v.push((next, a)),
                Err(e) => unreachable!("actions() offered an illegal move. {e}"),
            }
        }
        v
    }

    /// Checks that a path replays legally from the start to a goal and that
    /// its cost adds up.
    fn valid_path(&self, p: &Path<Self::State, Self::Action, Self::Cost>) -> bool {
        if p.start() != self.start() || !self.goal_test(&p.end()) {
            return false;
        }
        if p.states().len() != p.actions().len() + 1 {
            return false;
        }

        let mut cost = Self::Cost::zero();
        for (i, a) in p.actions().iter().enumerate() {
            let s = p.states()[i];
            if !self.actions(&s).contains(a) {
                return false;
            }
            match self.result(&s, a) {
                Ok(next) if next == p.states()[i + 1] => {
                    cost = cost.saturating_add(&self.step_cost(&s, a, &next));
                }
                _ => return false,
            }
        }
        cost == p.cost()
    }
}
