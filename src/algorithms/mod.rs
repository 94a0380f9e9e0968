//! Implementation of search algorithms.
//!
//! Every strategy runs the same loop ([`engine::Search`]) and only differs in
//! its [`Policy`]: which frontier it uses, how states are ranked in it, and
//! whether a cheaper path to an already reached state gets recorded.
//!
//! | Strategy      | Frontier | Rank        | Relaxes |
//! |---------------|----------|-------------|---------|
//! | Depth-first   | stack    | -           | no      |
//! | Breadth-first | queue    | -           | no      |
//! | A*            | heap     | `g + h`     | yes     |
//! | Greedy        | heap     | `h`         | no      |

pub mod engine;
pub mod informed;
pub mod uninformed;

use std::fmt::Debug;

use crate::cost::Cost;
use crate::frontier::Frontier;
use crate::heuristic::Blind;
use crate::heuristic::Heuristic;
use crate::search::SearchResult;
use crate::space::Environment;
use crate::space::State;

pub use engine::Search;
pub use informed::AStar;
pub use informed::Greedy;
pub use uninformed::BreadthFirst;
pub use uninformed::DepthFirst;

/// How a search orders and records the states it reaches.
pub trait Policy<St, C>: Debug
where
    St: State,
    C: Cost,
{
    type Frontier: Frontier<St, C>;

    /// Whether a strictly cheaper path to an already reached state replaces
    /// the recorded one and re-queues the state.
    const RELAX: bool;

    /// Frontier rank of `s` when reached with cost `g`.
    fn rank(g: C, s: &St, goal: &St) -> C;
}

type EnvResult<E> =
    SearchResult<<E as Environment>::State, <E as Environment>::Action, <E as Environment>::Cost>;

/// Depth-first search. Finds some path, not necessarily a short one.
#[must_use]
pub fn depth_first<E: Environment>(environment: &E) -> EnvResult<E> {
    Search::<DepthFirst, E>::new(environment).run()
}

/// Breadth-first search. Finds a path with the fewest steps.
#[must_use]
pub fn breadth_first<E: Environment>(environment: &E) -> EnvResult<E> {
    Search::<BreadthFirst, E>::new(environment).run()
}

/// A* search. Finds a cheapest path when `H` is admissible.
#[must_use]
pub fn astar<H, E>(environment: &E) -> EnvResult<E>
where
    E: Environment,
    H: Heuristic<E::State, E::Cost>,
{
    Search::<AStar<H>, E>::new(environment).run()
}

/// Greedy best-first search. Follows the heuristic, ignoring costs so far.
#[must_use]
pub fn greedy<H, E>(environment: &E) -> EnvResult<E>
where
    E: Environment,
    H: Heuristic<E::State, E::Cost>,
{
    Search::<Greedy<H>, E>::new(environment).run()
}

/// Uniform-cost search (Dijkstra), A* without a heuristic.
#[must_use]
pub fn uniform_cost<E: Environment>(environment: &E) -> EnvResult<E> {
    astar::<Blind, E>(environment)
}
