//! Branch-and-bound search.

mod bounds;
mod branching;
mod heuristic;
mod node;
mod queue;
mod tree;

pub use bounds::{BoundTracker, Termination};
pub use branching::{BranchDecision, FirstFractional, VariableSelector};
pub use heuristic::{FeasibilityHeuristic, NoHeuristic, RoundingHeuristic};
pub use node::{BoundChange, BoundKind, SearchNode};
pub use queue::{Frontier, NodeSelector};
pub use tree::BranchAndBound;
