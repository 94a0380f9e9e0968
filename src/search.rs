use std::collections::hash_map::Entry;
use std::fmt::Debug;

use derive_more::Display;
use rustc_hash::FxHashMap;

use crate::cost::Cost;
use crate::space::Action;
use crate::space::Environment;
use crate::space::Path;
use crate::space::State;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchTreeNode<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    /// The state this one was reached from, and how. `None` for the root.
    pub(crate) parent: Option<(St, A)>,
    /// Cost of the best known path from the root.
    pub(crate) g: C,
}

impl<St, A, C> SearchTreeNode<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub fn new(parent: Option<(St, A)>, g: C) -> Self {
        Self { parent, g }
    }

    /// Gives this Node a better path through a new parent.
    pub fn reach(&mut self, new_parent: (St, A), g: C) {
        debug_assert!(g < self.g);
        self.parent = Some(new_parent);
        self.g = g;
    }

    pub fn parent(&self) -> Option<(St, A)> {
        self.parent
    }
    pub fn g(&self) -> C {
        self.g
    }
}

/// The visited set and parent map of a search.
///
/// Keyed by state, every reached state points back to the state it was
/// reached from. It only grows during a search.
pub struct SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    nodes: FxHashMap<St, SearchTreeNode<St, A, C>>,
}

impl<St, A, C> SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    #[must_use]
    pub fn new_with_root(root: St) -> Self {
        let mut nodes = FxHashMap::default();
        nodes.insert(root, SearchTreeNode::new(None, C::zero()));
        Self { nodes }
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline(always)]
    pub fn get(&self, s: &St) -> Option<&SearchTreeNode<St, A, C>> {
        self.nodes.get(s)
    }

    /// Records reaching `s` from `parent` with cost `g`.
    ///
    /// New states are always recorded. Known states are only updated when
    /// `relax` is set and `g` is strictly better than their current cost.
    /// Returns whether the tree changed.
    pub fn reach(&mut self, s: St, parent: (St, A), g: C, relax: bool) -> bool {
        match self.nodes.entry(s) {
            Entry::Vacant(e) => {
                e.insert(SearchTreeNode::new(Some(parent), g));
                true
            }
            Entry::Occupied(mut e) => {
                if relax && g < e.get().g {
                    e.get_mut().reach(parent, g);
                    return true;
                }
                false
            }
        }
    }

    /// Rebuilds the path that reached `end`.
    ///
    /// Walks parents back to the root and reverses. Returns `None` if `end`
    /// was never reached.
    #[must_use]
    pub fn path<E>(&self, environment: &E, end: St) -> Option<Path<St, A, C>>
    where
        E: Environment<State = St, Action = A, Cost = C>,
    {
        let mut node = self.get(&end)?;
        let mut path = Path::<St, A, C>::new_from_start(end);

        // Steps are recorded backwards as (action that reached the state, the
        // state it came from).
        let mut steps = 0usize;
        while let Some((parent, a)) = node.parent {
            path.append(a, parent, C::zero());
            node = self.get(&parent)?;

            steps += 1;
            debug_assert!(steps <= self.len(), "Cycle in the parent map");
        }
        path.reverse();

        let mut cost = C::zero();
        for (i, a) in path.actions().iter().enumerate() {
            let s = &path.states()[i];
            let next = &path.states()[i + 1];
            cost = cost.saturating_add(&environment.step_cost(s, a, next));
        }
        path.set_cost(cost);

        Some(path)
    }
}

impl<St, A, C> std::fmt::Debug for SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "SearchTree{{({} nodes)}}", self.len())
    }
}

/// Effort counters, comparable across strategies.
#[derive(Copy, Clone, Debug, Default, Display, PartialEq, Eq, Hash)]
#[display("Metrics(expanded: {nodes_expanded}, peak memory: {max_memory_usage})")]
pub struct Metrics {
    /// How many states were popped and goal-tested.
    pub nodes_expanded: usize,
    /// Peak of frontier size plus visited-set size.
    pub max_memory_usage: usize,
}

impl Metrics {
    #[inline(always)]
    pub(crate) fn observe_memory(&mut self, usage: usize) {
        self.max_memory_usage = std::cmp::max(self.max_memory_usage, usage);
    }
}

/// The outcome of a search.
///
/// Not finding a path is a normal outcome with `path == None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub path: Option<Path<St, A, C>>,
    pub metrics: Metrics,
}

impl<St, A, C> SearchResult<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub fn found(&self) -> bool {
        self.path.is_some()
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::problems::grid::Direction;
    use crate::problems::grid::Grid;
    use crate::problems::grid::GridCost;
    use crate::problems::grid::Position;

    fn corridor() -> Grid {
        Grid::try_from(indoc! {"
            S..
            ##.
            G..
        "})
        .unwrap()
    }

    #[test]
    fn reach_keeps_first_parent_without_relaxing() {
        let root = Position::new(0, 0);
        let s = Position::new(0, 1);
        let mut tree = SearchTree::<Position, Direction, GridCost>::new_with_root(root);

        assert!(tree.reach(s, (root, Direction::East), GridCost::new(5.0), false));
        assert!(!tree.reach(s, (root, Direction::South), GridCost::new(1.0), false));
        assert_eq!(tree.get(&s).unwrap().parent(), Some((root, Direction::East)));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn reach_relaxes_only_strictly_cheaper() {
        let root = Position::new(0, 0);
        let s = Position::new(0, 1);
        let mut tree = SearchTree::<Position, Direction, GridCost>::new_with_root(root);

        assert!(tree.reach(s, (root, Direction::East), GridCost::new(5.0), true));
        assert!(!tree.reach(s, (root, Direction::South), GridCost::new(5.0), true));
        assert!(tree.reach(s, (root, Direction::South), GridCost::new(2.0), true));
        let node = tree.get(&s).unwrap();
        assert_eq!(node.parent(), Some((root, Direction::South)));
        assert_eq!(node.g(), GridCost::new(2.0));
    }

    #[test]
    fn path_walks_back_to_the_root() {
        let grid = corridor();
        let p = |r, c| Position::new(r, c);
        let mut tree = SearchTree::new_with_root(p(0, 0));
        let steps = [
            (p(0, 1), p(0, 0), Direction::East),
            (p(0, 2), p(0, 1), Direction::East),
            (p(1, 2), p(0, 2), Direction::South),
            (p(2, 2), p(1, 2), Direction::South),
            (p(2, 1), p(2, 2), Direction::West),
            (p(2, 0), p(2, 1), Direction::West),
        ];
        for (i, (s, parent, a)) in steps.iter().enumerate() {
            tree.reach(*s, (*parent, *a), GridCost::new((i + 1) as f64), false);
        }

        let path = tree.path(&grid, p(2, 0)).unwrap();
        assert_eq!(path.start(), p(0, 0));
        assert_eq!(path.end(), p(2, 0));
        assert_eq!(path.len(), 6);
        assert_eq!(path.cost(), GridCost::new(6.0));
        assert_eq!(
            path.actions(),
            &[
                Direction::East,
                Direction::East,
                Direction::South,
                Direction::South,
                Direction::West,
                Direction::West,
            ]
        );
        assert!(path.is_simple());
        assert!(grid.valid_path(&path));
    }

    #[test]
    fn path_of_the_root_is_a_single_state() {
        let grid = corridor();
        let tree = SearchTree::<Position, Direction, GridCost>::new_with_root(grid.start());
        let path = tree.path(&grid, grid.start()).unwrap();
        assert_eq!(path.states(), &[grid.start()]);
        assert!(path.is_empty());
        assert_eq!(path.cost(), GridCost::new(0.0));
    }

    #[test]
    fn path_to_unreached_state_is_none() {
        let grid = corridor();
        let tree = SearchTree::<Position, Direction, GridCost>::new_with_root(grid.start());
        assert!(tree.path(&grid, grid.goal()).is_none());
    }

    #[test]
    fn metrics_keep_the_peak() {
        let mut m = Metrics::default();
        m.observe_memory(3);
        m.observe_memory(9);
        m.observe_memory(4);
        assert_eq!(m.max_memory_usage, 9);
        assert_eq!(m.to_string(), "Metrics(expanded: 0, peak memory: 9)");
    }
}
