//! Problem and solution types for the ILP solver.

mod problem;
mod solution;

pub use problem::IntegerProgram;
pub use solution::{IlpSolution, IlpStatus, IncumbentTracker, SearchStats};
