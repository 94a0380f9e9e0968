use shadow_rs::shadow;

shadow!(build);

// Internals
// ---------
pub mod data_structures;

// Search space and problems
// -------------------------
pub mod cost;
pub mod float_cost;
pub mod heuristic;
pub mod search;
pub mod space;

// Problems
// --------
pub mod problems;

// Algorithms
// ----------
pub mod algorithms;
pub mod frontier;

// Comparison
// ----------
pub mod report;
pub mod strategy;
