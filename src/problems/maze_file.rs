//! Loading mazes from disk.
//!
//! Text files hold one or more mazes separated by blank lines. Each row is
//! trimmed before parsing, so indentation and `\r\n` endings don't matter.
//!
//! PNG images hold a single maze: black pixels are walls, blue is the start,
//! green the goal and anything else is floor.

use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

use crate::problems::grid::Cell;
use crate::problems::grid::Grid;
use crate::problems::grid::GridError;
use crate::problems::grid::Marker;
use crate::problems::grid::Position;

// Simple colours
const BLACK: [u8; 3] = [u8::MIN, u8::MIN, u8::MIN];
const GREEN: [u8; 3] = [u8::MIN, u8::MAX, u8::MIN];
const BLUE: [u8; 3] = [u8::MIN, u8::MIN, u8::MAX];

#[derive(Debug, Error)]
pub enum MazeFileError {
    #[error("I/O error when loading '{p}': {e}")]
    IOError { p: PathBuf, e: std::io::Error },
    #[error("Image error when loading '{p}': {e}")]
    ImageError { p: PathBuf, e: image::ImageError },
    #[error("Maze #{index} in '{p}' is invalid: {e}")]
    InvalidMaze {
        p: PathBuf,
        index: usize,
        e: GridError,
    },
    #[error("Invalid image '{p}': {e}")]
    InvalidImage { p: PathBuf, e: GridError },
}

/// Splits text into mazes on blank lines and parses each one.
///
/// Errors carry the 1-based index of the offending maze.
pub fn parse_mazes(s: &str) -> Result<Vec<Grid>, (usize, GridError)> {
    let mut mazes = vec![];
    let mut rows: Vec<&str> = vec![];

    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() {
            flush(&mut rows, &mut mazes)?;
        } else {
            rows.push(line);
        }
    }
    flush(&mut rows, &mut mazes)?;

    Ok(mazes)
}

fn flush(rows: &mut Vec<&str>, mazes: &mut Vec<Grid>) -> Result<(), (usize, GridError)> {
    if rows.is_empty() {
        return Ok(());
    }
    let grid = Grid::from_rows(rows.drain(..)).map_err(|e| (mazes.len() + 1, e))?;
    mazes.push(grid);
    Ok(())
}

/// Reads every maze in a file.
///
/// Files with a `png` extension are read as a single image maze, anything
/// else as text.
pub fn load(p: &Path) -> Result<Vec<Grid>, MazeFileError> {
    let is_image = p
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if is_image {
        return Ok(vec![Grid::try_from(p)?]);
    }

    let text = std::fs::read_to_string(p).map_err(|e| MazeFileError::IOError {
        p: p.to_path_buf(),
        e,
    })?;
    let mazes = parse_mazes(&text).map_err(|(index, e)| MazeFileError::InvalidMaze {
        p: p.to_path_buf(),
        index,
        e,
    })?;
    log::debug!("Loaded {} mazes from {}", mazes.len(), p.display());
    Ok(mazes)
}

impl std::convert::TryFrom<&Path> for Grid {
    type Error = MazeFileError;

    fn try_from(p: &Path) -> Result<Self, Self::Error> {
        use image::ImageReader;
        use image::Rgb;

        let img = ImageReader::open(p)
            .map_err(|e| MazeFileError::IOError {
                p: p.to_path_buf(),
                e,
            })?
            .decode()
            .map_err(|e| MazeFileError::ImageError {
                p: p.to_path_buf(),
                e,
            })?
            .into_rgb8();

        let invalid = |e: GridError| MazeFileError::InvalidImage {
            p: p.to_path_buf(),
            e,
        };

        let mut cells = vec![vec![Cell::Open; img.width() as usize]; img.height() as usize];
        let mut start: Option<Position> = None;
        let mut goal: Option<Position> = None;

        for (x, y, px) in img.enumerate_pixels() {
            let px: &Rgb<u8> = px;
            let position = Position::from_usize(y as usize, x as usize);
            let (marker, slot) = match px.0 {
                BLACK => {
                    cells[y as usize][x as usize] = Cell::Wall;
                    continue;
                }
                BLUE => (Marker::Start, &mut start),
                GREEN => (Marker::Goal, &mut goal),
                _ => continue,
            };
            if let Some(first) = *slot {
                return Err(invalid(GridError::DuplicateMarker {
                    marker,
                    first,
                    second: position,
                }));
            }
            *slot = Some(position);
        }

        let start = start.ok_or_else(|| invalid(GridError::MissingMarker(Marker::Start)))?;
        let goal = goal.ok_or_else(|| invalid(GridError::MissingMarker(Marker::Goal)))?;
        Grid::new(cells, start, goal).map_err(invalid)
    }
}
