//! Search problems.
//!
//! Grid mazes implement [`crate::space::Environment`] so every strategy can
//! run on them, and [`maze_file`] reads them from disk.

pub mod grid;
pub mod maze_file;
