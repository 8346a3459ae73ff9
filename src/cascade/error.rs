//! Error types for cascade solving.

use super::*;
use crate::Probability;
use crate::Utility;
use thiserror::Error;

/// Malformed input rejected at the boundary of a public operation.
/// Nothing is computed or cached when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidArgument {
    #[error("Yes-leaning probability {0} outside [0, 0.5]")]
    Probability(Probability),

    #[error("alignment utility {0} must be positive and finite")]
    Alignment(Utility),

    #[error("game has no blocks")]
    Empty,

    #[error("adjacency has {rows} rows, expected {blocks}")]
    Rows { rows: usize, blocks: usize },

    #[error("adjacency row {row} has {cols} columns, expected {blocks}")]
    Cols { row: usize, cols: usize, blocks: usize },

    #[error("adjacency weight [{row}][{col}] = {weight} must be non-negative and finite")]
    Weight { row: usize, col: usize, weight: Utility },

    #[error("state has {len} entries, expected {blocks}")]
    Length { len: usize, blocks: usize },

    #[error("state out of bounds in block {block}: ys {ys}, ns {ns}, size {size}")]
    Bounds {
        block: usize,
        ys: usize,
        ns: usize,
        size: usize,
    },

    #[error("state {0} is terminal")]
    Terminal(State),

    #[error("block {block} out of range for {blocks} blocks")]
    Block { block: usize, blocks: usize },

    #[error("block {block} has no agents left to move in {state}")]
    Exhausted { block: usize, state: State },
}

/// Errors that can occur while querying a [`Solver`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CascadeError {
    #[error("invalid argument: {0}")]
    Invalid(#[from] InvalidArgument),

    /// A No-leaning agent prefers Yes while a Yes-leaning agent in the
    /// same spot prefers No. The game is outside its single-crossing regime.
    #[error("single crossing violated for block {block} at {state}")]
    Crossing { block: usize, state: State },

    /// The solver already hit a crossing violation and refuses further queries.
    #[error("solver poisoned by an earlier single crossing violation")]
    Poisoned,

    /// Sweep workers could not be started or did not finish.
    #[error("sweep workers failed: {0}")]
    Workers(String),
}

impl CascadeError {
    /// internal-invariant failures are fatal to the solver instance
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Invalid(_))
    }
}
