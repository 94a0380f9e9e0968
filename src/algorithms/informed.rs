//! Best-first strategies ranked by a heuristic.

use std::fmt::Debug;
use std::marker::PhantomData;

use crate::algorithms::Policy;
use crate::cost::Cost;
use crate::frontier::PriorityFrontier;
use crate::heuristic::Heuristic;
use crate::space::State;

/// A*: ranks states by `f = g + h`.
///
/// A state reached again through a strictly cheaper path is re-queued with
/// its better rank. The stale copy stays in the frontier and, once popped,
/// only gets re-expanded with the improved cost, so it never changes the tree.
#[derive(Debug)]
pub struct AStar<H> {
    _phantom_heuristic: PhantomData<H>,
}

impl<H, St, C> Policy<St, C> for AStar<H>
where
    H: Heuristic<St, C>,
    St: State,
    C: Cost,
{
    type Frontier = PriorityFrontier<St, C>;
    const RELAX: bool = true;

    #[inline(always)]
    fn rank(g: C, s: &St, goal: &St) -> C {
        g.saturating_add(&H::h(s, goal))
    }
}

/// Greedy best-first: ranks states by `h` alone.
#[derive(Debug)]
pub struct Greedy<H> {
    _phantom_heuristic: PhantomData<H>,
}

impl<H, St, C> Policy<St, C> for Greedy<H>
where
    H: Heuristic<St, C>,
    St: State,
    C: Cost,
{
    type Frontier = PriorityFrontier<St, C>;
    const RELAX: bool = false;

    #[inline(always)]
    fn rank(_g: C, s: &St, goal: &St) -> C {
        H::h(s, goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::Blind;
    use crate::problems::grid::GridCost;
    use crate::problems::grid::Manhattan;
    use crate::problems::grid::Position;

    fn rank<P: Policy<Position, GridCost>>(g: f64) -> GridCost {
        P::rank(GridCost::new(g), &Position::new(0, 0), &Position::new(3, 4))
    }

    #[test]
    fn astar_ranks_by_cost_plus_estimate() {
        assert_eq!(rank::<AStar<Manhattan>>(2.0), GridCost::new(9.0));
    }

    #[test]
    fn greedy_ignores_cost_so_far() {
        assert_eq!(rank::<Greedy<Manhattan>>(100.0), GridCost::new(7.0));
    }

    #[test]
    fn blind_astar_ranks_by_cost() {
        assert_eq!(rank::<AStar<Blind>>(5.0), GridCost::new(5.0));
    }
}
