use derive_more::Display;

use crate::algorithms;
use crate::problems::grid::Direction;
use crate::problems::grid::Euclidean;
use crate::problems::grid::Grid;
use crate::problems::grid::GridCost;
use crate::problems::grid::Manhattan;
use crate::problems::grid::Position;
use crate::search::SearchResult;

pub type GridResult = SearchResult<Position, Direction, GridCost>;

/// The strategies that can be compared on grid mazes.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum Strategy {
    #[display("DFS")]
    #[value(name = "dfs")]
    DepthFirst,
    #[display("BFS")]
    #[value(name = "bfs")]
    BreadthFirst,
    #[display("A* (Manhattan)")]
    #[value(name = "astar")]
    AStarManhattan,
    #[display("A* (Euclidean)")]
    #[value(name = "astar-euclidean")]
    AStarEuclidean,
    #[display("Greedy (Manhattan)")]
    #[value(name = "greedy")]
    GreedyManhattan,
    #[display("Greedy (Euclidean)")]
    #[value(name = "greedy-euclidean")]
    GreedyEuclidean,
    #[display("UCS")]
    #[value(name = "ucs")]
    UniformCost,
}

impl Strategy {
    /// DFS, BFS, A* and Greedy, the last two with the Manhattan distance.
    pub const CORE: [Strategy; 4] = [
        Strategy::DepthFirst,
        Strategy::BreadthFirst,
        Strategy::AStarManhattan,
        Strategy::GreedyManhattan,
    ];

    /// What gets compared when nothing else is asked for.
    pub const DEFAULT: [Strategy; 6] = [
        Strategy::DepthFirst,
        Strategy::BreadthFirst,
        Strategy::AStarManhattan,
        Strategy::AStarEuclidean,
        Strategy::GreedyManhattan,
        Strategy::GreedyEuclidean,
    ];

    pub fn run(&self, grid: &Grid) -> GridResult {
        match self {
            Strategy::DepthFirst => algorithms::depth_first(grid),
            Strategy::BreadthFirst => algorithms::breadth_first(grid),
            Strategy::AStarManhattan => algorithms::astar::<Manhattan, _>(grid),
            Strategy::AStarEuclidean => algorithms::astar::<Euclidean, _>(grid),
            Strategy::GreedyManhattan => algorithms::greedy::<Manhattan, _>(grid),
            Strategy::GreedyEuclidean => algorithms::greedy::<Euclidean, _>(grid),
            Strategy::UniformCost => algorithms::uniform_cost(grid),
        }
    }

    /// Whether paths found are guaranteed to be as short as possible on
    /// unit-cost grids.
    pub fn is_optimal(&self) -> bool {
        match self {
            Strategy::BreadthFirst
            | Strategy::AStarManhattan
            | Strategy::AStarEuclidean
            | Strategy::UniformCost => true,
            Strategy::DepthFirst | Strategy::GreedyManhattan | Strategy::GreedyEuclidean => false,
        }
    }
}
