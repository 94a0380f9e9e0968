use std::fmt::Write;

use derive_more::Display;
use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::float_cost::FloatCost;
use crate::heuristic::Heuristic;
use crate::space::Action;
use crate::space::Actions;
use crate::space::Environment;
use crate::space::Path;
use crate::space::State;
use crate::space::TransitionError;

pub type Coord = i32;
pub type GridCost = FloatCost;
pub type GridPath = Path<Position, Direction, GridCost>;

/// A cell on the grid, as `(row, column)`.
///
/// Positions off the grid are representable so bounds checks can reject them.
#[derive(Copy, Clone, Debug, Default, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("({row},{col})")]
pub struct Position {
    pub(crate) row: Coord,
    pub(crate) col: Coord,
}

impl Position {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }
    pub fn row(&self) -> Coord {
        self.row
    }
    pub fn col(&self) -> Coord {
        self.col
    }

    pub(crate) fn from_usize(row: usize, col: usize) -> Self {
        debug_assert!(row < Coord::MAX as usize);
        debug_assert!(col < Coord::MAX as usize);
        Self::new(row as Coord, col as Coord)
    }

    /// The adjacent position in direction `d`, whether or not it's on a grid.
    #[inline(always)]
    pub fn step(&self, d: Direction) -> Self {
        let (dr, dc) = d.delta();
        Self::new(self.row.saturating_add(dr), self.col.saturating_add(dc))
    }

    /// Sum of the absolute row and column differences.
    ///
    /// ```
    /// use maze_search::problems::grid::Position;
    /// assert_eq!(Position::new(0, 0).manhattan_distance(&Position::new(3, 4)), 7);
    /// assert_eq!(Position::new(2, 2).manhattan_distance(&Position::new(2, 2)), 0);
    /// ```
    #[inline(always)]
    pub fn manhattan_distance(&self, other: &Position) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Straight-line distance.
    ///
    /// ```
    /// use maze_search::problems::grid::Position;
    /// assert_eq!(Position::new(0, 0).euclidean_distance(&Position::new(3, 4)), 5.0);
    /// assert_eq!(Position::new(0, 0).euclidean_distance(&Position::new(0, 5)), 5.0);
    /// ```
    #[inline(always)]
    pub fn euclidean_distance(&self, other: &Position) -> f64 {
        let dr = f64::from(self.row.abs_diff(other.row));
        let dc = f64::from(self.col.abs_diff(other.col));
        dr.hypot(dc)
    }
}
impl State for Position {}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    #[display("↑")]
    North, // row--
    #[display("↓")]
    South, // row++
    #[display("←")]
    West, // col--
    #[display("→")]
    East, // col++
}
impl Action for Direction {}

impl Direction {
    /// Every direction, in the order `actions()` lists them.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// `(row, column)` offsets.
    #[inline(always)]
    pub fn delta(&self) -> (Coord, Coord) {
        #[rustfmt::skip]
        let d = match self {
            Direction::North => (-1,  0),
            Direction::South => ( 1,  0),
            Direction::West  => ( 0, -1),
            Direction::East  => ( 0,  1),
        };
        d
    }
}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum Cell {
    #[display("░")]
    Open,
    #[display("█")]
    Wall,
}

impl std::convert::From<char> for Cell {
    /// Walls are `#` (or `█`). Anything else can be walked on.
    fn from(ch: char) -> Self {
        match ch {
            '#' | '█' => Cell::Wall,
            _ => Cell::Open,
        }
    }
}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum Marker {
    #[display("start (S)")]
    Start,
    #[display("goal (G)")]
    Goal,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Empty grid")]
    Empty,
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Missing {0}")]
    MissingMarker(Marker),
    #[error("Found a second {marker} at {second}, the first one is at {first}")]
    DuplicateMarker {
        marker: Marker,
        first: Position,
        second: Position,
    },
    #[error("The {marker} at {position} is off the grid")]
    OutOfBounds { marker: Marker, position: Position },
    #[error("The {marker} at {position} is on a wall")]
    Blocked { marker: Marker, position: Position },
    #[error("Need at least {needed} open cells, found {found}")]
    NotEnoughOpenCells { needed: usize, found: usize },
}

/// A rectangular maze with a start and a goal.
///
/// Moves go one cell North, South, West or East, cost `1.0` each, and can't
/// enter walls or leave the grid.
#[derive(Clone, PartialEq)]
pub struct Grid {
    cells: Vec<Vec<Cell>>,
    start: Position,
    goal: Position,
}

impl Grid {
    /// Builds a grid, checking it's a non-empty rectangle with the start and
    /// goal on open cells.
    pub fn new(cells: Vec<Vec<Cell>>, start: Position, goal: Position) -> Result<Self, GridError> {
        let cols = cells.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(GridError::Empty);
        }
        for (row, line) in cells.iter().enumerate() {
            if line.len() != cols {
                return Err(GridError::RaggedRow {
                    row,
                    expected: cols,
                    found: line.len(),
                });
            }
        }

        let grid = Self { cells, start, goal };
        for (marker, position) in [(Marker::Start, start), (Marker::Goal, goal)] {
            if !grid.in_bounds(&position) {
                return Err(GridError::OutOfBounds { marker, position });
            }
            if !grid.passable(&position) {
                return Err(GridError::Blocked { marker, position });
            }
        }
        Ok(grid)
    }

    /// Parses a grid from its rows.
    ///
    /// `S` marks the start and `G` the goal, both exactly once. `#` marks
    /// walls and any other character is open floor.
    pub fn from_rows<'a, I>(rows: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut cells = vec![];
        let mut start: Option<Position> = None;
        let mut goal: Option<Position> = None;

        for (row, line) in rows.into_iter().enumerate() {
            let mut cell_row = Vec::with_capacity(line.len());
            for (col, ch) in line.chars().enumerate() {
                let position = Position::from_usize(row, col);
                let marker = match ch {
                    'S' => Some((Marker::Start, &mut start)),
                    'G' => Some((Marker::Goal, &mut goal)),
                    _ => None,
                };
                match marker {
                    Some((marker, slot)) => {
                        if let Some(first) = *slot {
                            return Err(GridError::DuplicateMarker {
                                marker,
                                first,
                                second: position,
                            });
                        }
                        *slot = Some(position);
                        cell_row.push(Cell::Open);
                    }
                    None => cell_row.push(Cell::from(ch)),
                }
            }
            cells.push(cell_row);
        }

        if cells.first().is_none_or(Vec::is_empty) {
            return Err(GridError::Empty);
        }
        let start = start.ok_or(GridError::MissingMarker(Marker::Start))?;
        let goal = goal.ok_or(GridError::MissingMarker(Marker::Goal))?;
        Self::new(cells, start, goal)
    }

    /// A random grid where each cell is a wall with probability
    /// `wall_density`, with start and goal on two distinct open cells.
    ///
    /// The goal is not guaranteed to be reachable.
    pub fn random<R: Rng>(
        rng: &mut R,
        rows: usize,
        cols: usize,
        wall_density: f64,
    ) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        let density = if wall_density.is_nan() {
            0.0
        } else {
            wall_density.clamp(0.0, 1.0)
        };
        let mut cells = vec![vec![Cell::Open; cols]; rows];
        for row in cells.iter_mut() {
            for cell in row.iter_mut() {
                if rng.random_bool(density) {
                    *cell = Cell::Wall;
                }
            }
        }

        let mut open: Vec<Position> = vec![];
        for (r, row) in cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if *cell == Cell::Open {
                    open.push(Position::from_usize(r, c));
                }
            }
        }
        if open.len() < 2 {
            return Err(GridError::NotEnoughOpenCells {
                needed: 2,
                found: open.len(),
            });
        }
        let (picked, _) = open.partial_shuffle(rng, 2);
        let (start, goal) = (picked[0], picked[1]);

        Self::new(cells, start, goal)
    }

    /// `(rows, columns)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cells.len(), self.cells[0].len())
    }

    pub fn cell(&self, p: &Position) -> Option<Cell> {
        if !self.in_bounds(p) {
            return None;
        }
        Some(self.cells[p.row as usize][p.col as usize])
    }

    pub fn open_cells(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| **c == Cell::Open)
            .count()
    }

    /// Draws the grid with a path on top of it.
    ///
    /// Every step shows the direction it leaves in; `S` and `G` stay visible.
    pub fn render_path(&self, path: &GridPath) -> String {
        let (rows, cols) = self.dimensions();
        let mut canvas: Vec<Vec<char>> = self
            .cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| match c {
                        Cell::Open => '.',
                        Cell::Wall => '#',
                    })
                    .collect()
            })
            .collect();

        for (s, a) in path.states().iter().zip(path.actions()) {
            if self.in_bounds(s) {
                canvas[s.row as usize][s.col as usize] = match a {
                    Direction::North => '^',
                    Direction::South => 'v',
                    Direction::West => '<',
                    Direction::East => '>',
                };
            }
        }
        canvas[self.start.row as usize][self.start.col as usize] = 'S';
        canvas[self.goal.row as usize][self.goal.col as usize] = 'G';

        let mut out = String::with_capacity(rows * (cols + 1));
        for row in canvas {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

impl std::convert::TryFrom<&str> for Grid {
    type Error = GridError;

    /// Parses a single maze, ignoring blank lines around it.
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let lines: Vec<&str> = s.lines().collect();
        let first = lines.iter().position(|l| !l.trim().is_empty());
        let last = lines.iter().rposition(|l| !l.trim().is_empty());
        match (first, last) {
            (Some(first), Some(last)) => Self::from_rows(lines[first..=last].iter().copied()),
            _ => Err(GridError::Empty),
        }
    }
}

impl Environment for Grid {
    type State = Position;
    type Action = Direction;
    type Cost = GridCost;

    fn start(&self) -> Position {
        self.start
    }
    fn goal(&self) -> Position {
        self.goal
    }

    #[inline(always)]
    fn in_bounds(&self, p: &Position) -> bool {
        let (rows, cols) = self.dimensions();
        p.row >= 0 && p.col >= 0 && (p.row as usize) < rows && (p.col as usize) < cols
    }

    #[inline(always)]
    fn passable(&self, p: &Position) -> bool {
        self.cell(p) == Some(Cell::Open)
    }

    fn actions(&self, p: &Position) -> Actions<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| self.passable(&p.step(*d)))
            .collect()
    }

    fn result(
        &self,
        p: &Position,
        d: &Direction,
    ) -> Result<Position, TransitionError<Position, Direction>> {
        let next = p.step(*d);
        if self.passable(p) && self.passable(&next) {
            return Ok(next);
        }
        Err(TransitionError {
            state: *p,
            action: *d,
        })
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let p = Position::from_usize(r, c);
                match (p == self.start, p == self.goal) {
                    (true, true) => f.write_char('!')?,
                    (true, false) => f.write_char('S')?,
                    (false, true) => f.write_char('G')?,
                    (false, false) => write!(f, "{cell}")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let (rows, cols) = self.dimensions();
        write!(f, "Grid({rows}x{cols}, s:{}, g:{})", self.start, self.goal)
    }
}

/// Admissible and consistent on 4-connected unit-cost grids.
#[derive(Copy, Clone, Debug, Default)]
pub struct Manhattan;

impl Heuristic<Position, GridCost> for Manhattan {
    #[inline(always)]
    fn h(from: &Position, to: &Position) -> GridCost {
        GridCost::new(f64::from(from.manhattan_distance(to)))
    }
}

/// Admissible, but never above [`Manhattan`] so it's less informed.
#[derive(Copy, Clone, Debug, Default)]
pub struct Euclidean;

impl Heuristic<Position, GridCost> for Euclidean {
    #[inline(always)]
    fn h(from: &Position, to: &Position) -> GridCost {
        GridCost::new(from.euclidean_distance(to))
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::algorithms::breadth_first;

    #[test]
    fn parse_markers_and_walls() {
        let grid = Grid::try_from(indoc! {"
            #####
            #S.G#
            #####
        "})
        .unwrap();
        assert_eq!(grid.dimensions(), (3, 5));
        assert_eq!(grid.start(), Position::new(1, 1));
        assert_eq!(grid.goal(), Position::new(1, 3));
        assert_eq!(grid.cell(&Position::new(0, 0)), Some(Cell::Wall));
        assert_eq!(grid.cell(&Position::new(1, 2)), Some(Cell::Open));
        assert_eq!(grid.cell(&Position::new(1, 1)), Some(Cell::Open));
        assert_eq!(grid.cell(&Position::new(-1, 0)), None);
        assert_eq!(grid.open_cells(), 3);
    }

    #[test]
    fn unknown_characters_are_floor() {
        let grid = Grid::try_from("S x0G").unwrap();
        assert_eq!(grid.open_cells(), 5);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(Grid::try_from(""), Err(GridError::Empty));
        assert_eq!(Grid::try_from("\n  \n"), Err(GridError::Empty));
        assert_eq!(
            Grid::try_from("S..\n..."),
            Err(GridError::MissingMarker(Marker::Goal))
        );
        assert_eq!(
            Grid::try_from("...\n..G"),
            Err(GridError::MissingMarker(Marker::Start))
        );
        assert_eq!(
            Grid::try_from("S.G\n.."),
            Err(GridError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            Grid::try_from("S.G\nS.."),
            Err(GridError::DuplicateMarker {
                marker: Marker::Start,
                first: Position::new(0, 0),
                second: Position::new(1, 0),
            })
        );
    }

    #[test]
    fn new_rejects_bad_markers() {
        let cells = vec![vec![Cell::Open, Cell::Wall]];
        let p = |r, c| Position::new(r, c);
        assert_eq!(Grid::new(vec![], p(0, 0), p(0, 0)), Err(GridError::Empty));
        assert_eq!(
            Grid::new(vec![vec![]], p(0, 0), p(0, 0)),
            Err(GridError::Empty)
        );
        assert_eq!(
            Grid::new(cells.clone(), p(0, 2), p(0, 0)),
            Err(GridError::OutOfBounds {
                marker: Marker::Start,
                position: p(0, 2)
            })
        );
        assert_eq!(
            Grid::new(cells.clone(), p(0, 0), p(0, 1)),
            Err(GridError::Blocked {
                marker: Marker::Goal,
                position: p(0, 1)
            })
        );
        assert!(Grid::new(cells, p(0, 0), p(0, 0)).is_ok());
    }

    #[test]
    fn actions_only_lead_to_open_cells() {
        let grid = Grid::try_from(indoc! {"
            S.#
            .#.
            ..G
        "})
        .unwrap();
        let corner = Position::new(0, 0);
        assert_eq!(
            grid.actions(&corner).as_slice(),
            &[Direction::South, Direction::East]
        );
        assert_eq!(
            grid.actions(&Position::new(0, 1)).as_slice(),
            &[Direction::West]
        );
        assert_eq!(grid.result(&corner, &Direction::East), Ok(Position::new(0, 1)));
        assert_eq!(
            grid.result(&corner, &Direction::North),
            Err(TransitionError {
                state: corner,
                action: Direction::North
            })
        );
        assert!(grid.result(&Position::new(0, 1), &Direction::East).is_err());
        assert!(grid.goal_test(&Position::new(2, 2)));
        assert!(!grid.goal_test(&corner));
        assert_eq!(
            grid.step_cost(&corner, &Direction::East, &Position::new(0, 1)),
            GridCost::new(1.0)
        );
    }

    #[test]
    fn euclidean_never_exceeds_manhattan() {
        let points: Vec<Position> = (-3..4)
            .flat_map(|r| (-3..4).map(move |c| Position::new(r, c)))
            .collect();
        for a in &points {
            for b in &points {
                let m = Manhattan::h(a, b);
                let e = Euclidean::h(a, b);
                assert!(e <= m, "{a} -> {b}: {e} > {m}");
                assert!(e >= GridCost::new(0.0));
                assert_eq!(Manhattan::h(a, b), Manhattan::h(b, a));
            }
        }
    }

    #[test]
    fn heuristics_never_overestimate() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let grid = Grid::random(&mut rng, 12, 15, 0.3).unwrap();
            if let Some(path) = breadth_first(&grid).path {
                let shortest = GridCost::new(path.len() as f64);
                assert!(Manhattan::h(&grid.start(), &grid.goal()) <= shortest);
                assert!(Euclidean::h(&grid.start(), &grid.goal()) <= shortest);
            }
        }
    }

    #[test]
    fn random_grids_are_reproducible() {
        let a = Grid::random(&mut ChaCha8Rng::seed_from_u64(3), 10, 20, 0.25).unwrap();
        let b = Grid::random(&mut ChaCha8Rng::seed_from_u64(3), 10, 20, 0.25).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.dimensions(), (10, 20));
        assert_ne!(a.start(), a.goal());
        assert!(a.passable(&a.start()));
        assert!(a.passable(&a.goal()));
    }

    #[test]
    fn random_grid_needs_room() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(
            Grid::random(&mut rng, 3, 3, 1.0),
            Err(GridError::NotEnoughOpenCells { needed: 2, found: 0 })
        );
        assert_eq!(Grid::random(&mut rng, 0, 3, 0.0), Err(GridError::Empty));
    }

    #[test]
    fn display_and_render() {
        let grid = Grid::try_from(indoc! {"
            S.#
            ..G
        "})
        .unwrap();
        assert_eq!(grid.to_string(), "S░█\n░░G\n");
        assert_eq!(format!("{grid:?}"), "Grid(2x3, s:(0,0), g:(1,2))");

        let path = breadth_first(&grid).path.unwrap();
        assert_eq!(path.len(), 3);
        let drawn = grid.render_path(&path);
        assert_eq!(drawn.lines().count(), 2);
        assert!(drawn.starts_with('S'));
        assert_eq!(drawn.chars().filter(|c| *c == '#').count(), 1);
    }

    #[test]
    fn display_round_trips() {
        let text = indoc! {"
            S..#
            .#..
            ...G
        "};
        let grid = Grid::try_from(text).unwrap();
        assert_eq!(Grid::try_from(grid.to_string().as_str()).unwrap(), grid);
    }
}
