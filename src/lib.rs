use shadow_rs::shadow;

shadow!(build);

// Internals
// ---------
mod parse;
pub mod error;
pub mod open_list;

// Graphs and paths
// ----------------
pub mod graph;
pub mod space;

// Estimates and scores
// --------------------
pub mod heuristic;
pub mod utility;

// Problems
// --------
pub mod problems;

// Algorithms
// ----------
pub mod algorithms;
