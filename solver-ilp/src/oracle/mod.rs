//! LP relaxation oracle.

mod backend;
mod simplex_backend;

pub use backend::{ConstraintSystem, Relaxation, RelaxationBackend, RelaxationStatus};
pub use simplex_backend::SimplexBackend;
