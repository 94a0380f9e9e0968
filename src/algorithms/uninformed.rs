//! Blind strategies that only look at the order states were reached in.

use crate::algorithms::Policy;
use crate::cost::Cost;
use crate::frontier::Queue;
use crate::frontier::Stack;
use crate::space::State;

/// Expands the most recently reached state first.
#[derive(Copy, Clone, Debug)]
pub struct DepthFirst;

impl<St, C> Policy<St, C> for DepthFirst
where
    St: State,
    C: Cost,
{
    type Frontier = Stack<St>;
    const RELAX: bool = false;

    #[inline(always)]
    fn rank(_g: C, _s: &St, _goal: &St) -> C {
        C::zero()
    }
}

/// Expands states in the order they were reached, one layer at a time.
#[derive(Copy, Clone, Debug)]
pub struct BreadthFirst;

impl<St, C> Policy<St, C> for BreadthFirst
where
    St: State,
    C: Cost,
{
    type Frontier = Queue<St>;
    const RELAX: bool = false;

    #[inline(always)]
    fn rank(_g: C, _s: &St, _goal: &St) -> C {
        C::zero()
    }
}
