use super::*;
use crate::Arbitrary;
use crate::P_MAX;
use crate::Probability;
use crate::Utility;

/// Immutable description of one cascade game.
///
/// - `p` is the probability that any agent is Yes-leaning.
/// - `pi` is the bonus an agent receives for acting on its own leaning.
/// - `sizes[b]` is the population of block `b`.
/// - `adjacency[b][j]` is the weight an agent of block `b` places on the
///   Yes (or No) count of block `j`. Rows need not be symmetric and the
///   diagonal is taken at face value.
///
/// A `Game` is validated once at construction and never mutated; a solver
/// owns its `Game`, so new parameters always mean a new solver.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize)]
pub struct Game {
    p: Probability,
    pi: Utility,
    sizes: Vec<usize>,
    adjacency: Vec<Vec<Utility>>,
}

impl Game {
    pub fn new(
        p: Probability,
        pi: Utility,
        sizes: Vec<usize>,
        adjacency: Vec<Vec<Utility>>,
    ) -> Result<Self, InvalidArgument> {
        let blocks = sizes.len();
        if !(0. ..=P_MAX).contains(&p) {
            return Err(InvalidArgument::Probability(p));
        }
        if !(pi.is_finite() && pi > 0.) {
            return Err(InvalidArgument::Alignment(pi));
        }
        if blocks == 0 {
            return Err(InvalidArgument::Empty);
        }
        if adjacency.len() != blocks {
            return Err(InvalidArgument::Rows {
                rows: adjacency.len(),
                blocks,
            });
        }
        for (row, weights) in adjacency.iter().enumerate() {
            if weights.len() != blocks {
                return Err(InvalidArgument::Cols {
                    row,
                    cols: weights.len(),
                    blocks,
                });
            }
            if let Some((col, &weight)) = weights
                .iter()
                .enumerate()
                .find(|(_, w)| !(w.is_finite() && **w >= 0.))
            {
                return Err(InvalidArgument::Weight { row, col, weight });
            }
        }
        Ok(Self {
            p,
            pi,
            sizes,
            adjacency,
        })
    }

    /// One hub agent and a leaf block of `n`, with unit influence both ways.
    pub fn star(p: Probability, pi: Utility, n: usize) -> Result<Self, InvalidArgument> {
        Self::new(p, pi, vec![1, n], vec![vec![0., 1.], vec![1., 0.]])
    }

    /// Blocks on a line, each influenced with unit weight by its neighbours.
    pub fn path(p: Probability, pi: Utility, sizes: Vec<usize>) -> Result<Self, InvalidArgument> {
        let n = sizes.len();
        let adjacency = (0..n)
            .map(|b| {
                (0..n)
                    .map(|j| if b.abs_diff(j) == 1 { 1. } else { 0. })
                    .collect()
            })
            .collect();
        Self::new(p, pi, sizes, adjacency)
    }

    pub fn p(&self) -> Probability {
        self.p
    }
    pub fn pi(&self) -> Utility {
        self.pi
    }
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }
    pub fn adjacency(&self) -> &[Vec<Utility>] {
        &self.adjacency
    }
    pub fn blocks(&self) -> usize {
        self.sizes.len()
    }
    pub fn size(&self, block: usize) -> usize {
        self.sizes[block]
    }
    /// total number of agents across all blocks
    pub fn population(&self) -> usize {
        self.sizes.iter().sum()
    }
    pub fn weight(&self, block: usize, other: usize) -> Utility {
        self.adjacency[block][other]
    }
    pub fn row(&self, block: usize) -> &[Utility] {
        &self.adjacency[block]
    }
}

/// Small random games, at most two blocks and four agents,
/// sized so exhaustive search stays cheap. Every parameter is drawn
/// from inside the range `new` accepts.
impl Arbitrary for Game {
    fn random() -> Self {
        use rand::Rng;
        let ref mut rng = rand::rng();
        let blocks = rng.random_range(1..=2usize);
        let mut sizes = vec![0; blocks];
        for _ in 0..rng.random_range(1..=4usize) {
            sizes[rng.random_range(0..blocks)] += 1;
        }
        let adjacency = (0..blocks)
            .map(|_| {
                (0..blocks)
                    .map(|_| (rng.random_range(0..=4u8) as Utility) * 0.5)
                    .collect()
            })
            .collect();
        let p = rng.random_range(1..=10u8) as Probability * 0.05;
        let pi = rng.random_range(1..=8u8) as Utility * 0.25;
        Self {
            p,
            pi,
            sizes,
            adjacency,
        }
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "p={} pi={} sizes={:?} adjacency={:?}",
            self.p, self.pi, self.sizes, self.adjacency
        )
    }
}
