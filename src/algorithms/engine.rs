//! The exploration loop shared by every strategy.

use std::fmt::Debug;
use std::marker::PhantomData;

use num_traits::SaturatingAdd;

use crate::algorithms::Policy;
use crate::frontier::Frontier;
use crate::search::Metrics;
use crate::search::SearchResult;
use crate::search::SearchTree;
use crate::space::Environment;

/// A single search over an Environment.
///
/// The policy `P` picks the frontier, how states are ranked in it, and whether
/// cheaper paths to already reached states replace the old ones. Everything
/// else, visited tracking, metrics and termination, lives here.
pub struct Search<'e, P, E>
where
    E: Environment,
    P: Policy<E::State, E::Cost>,
{
    environment: &'e E,
    frontier: P::Frontier,
    /// Visited set, parent map and best known costs.
    tree: SearchTree<E::State, E::Action, E::Cost>,
    metrics: Metrics,

    _phantom_policy: PhantomData<P>,
}

impl<'e, P, E> Search<'e, P, E>
where
    E: Environment,
    P: Policy<E::State, E::Cost>,
{
    #[must_use]
    pub fn new(environment: &'e E) -> Self {
        let start = environment.start();
        let goal = environment.goal();

        let mut frontier = P::Frontier::default();
        frontier.push(start, P::rank(num_traits::Zero::zero(), &start, &goal));

        Self {
            environment,
            frontier,
            tree: SearchTree::new_with_root(start),
            metrics: Metrics::default(),
            _phantom_policy: PhantomData,
        }
    }

    /// Explores until the goal is popped or the frontier runs dry.
    #[must_use]
    pub fn run(mut self) -> SearchResult<E::State, E::Action, E::Cost> {
        let goal = self.environment.goal();

        while let Some(state) = self.pop() {
            self.metrics.nodes_expanded += 1;

            if self.environment.goal_test(&state) {
                let path = self.tree.path(self.environment, state);
                debug_assert!(path.is_some(), "Goal {state:?} popped without a node");
                return SearchResult {
                    path,
                    metrics: self.metrics,
                };
            }

            let g = match self.tree.get(&state) {
                Some(node) => node.g(),
                None => unreachable!("Popped {state:?} without a node"),
            };

            for (next, a) in self.environment.successors(&state) {
                let c = self.environment.step_cost(&state, &a, &next);
                let next_g = g.saturating_add(&c);

                if self.tree.reach(next, (state, a), next_g, P::RELAX) {
                    self.frontier.push(next, P::rank(next_g, &next, &goal));
                }
            }
        }

        SearchResult {
            path: None,
            metrics: self.metrics,
        }
    }

    /// Samples memory usage and pops the next state to expand.
    #[inline(always)]
    fn pop(&mut self) -> Option<E::State> {
        if !self.frontier.is_empty() {
            self.metrics
                .observe_memory(self.frontier.len() + self.tree.len());
        }
        self.frontier.pop()
    }
}

impl<P, E> Debug for Search<'_, P, E>
where
    E: Environment,
    P: Policy<E::State, E::Cost>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Search")
            .field("environment", self.environment)
            .field("frontier", &self.frontier)
            .field("tree", &self.tree)
            .field("metrics", &self.metrics)
            .finish()
    }
}
