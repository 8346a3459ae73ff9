use super::*;
use crate::Utility;

/// Optimal action of one agent, with the expected final Yes count per
/// block given that action and optimal play afterwards.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize)]
pub struct Decision {
    pub choice: Choice,
    pub expected: Vec<Utility>,
}

impl Decision {
    pub fn total(&self) -> Utility {
        self.expected.iter().sum()
    }
}

/// The scheduler's next block, or `None` once nobody is left to move,
/// with the expected final Yes count per block marginalized over the
/// leaning of the agent about to be revealed.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize)]
pub struct Schedule {
    pub block: Option<usize>,
    pub expected: Vec<Utility>,
}

impl Schedule {
    pub fn total(&self) -> Utility {
        self.expected.iter().sum()
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:.4?}", self.choice, self.expected)
    }
}

impl std::fmt::Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.block {
            Some(block) => write!(f, "block {} {:.4?}", block, self.expected),
            None => write!(f, "N/A {:.4?}", self.expected),
        }
    }
}
