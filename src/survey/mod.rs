//! Consumers of the solver.
//!
//! Nothing here adds game logic. Each type drives a [`Solver`](crate::cascade::Solver)
//! through its public operations and reshapes the answers: the schedule
//! unrolled as a tree, the herding pattern of a block, and parameter sweeps
//! comparing strategic against myopic agents.

mod herd;
mod sweep;
mod tree;

pub use herd::*;
pub use sweep::*;
pub use tree::*;
