//! Tie-breaking policies.
//!
//! Equal utilities and equal scheduler totals have no principled winner.
//! The rules are named here so solvers can be configured either way and
//! compared, rather than being implied by a comparison operator.

use super::*;
use crate::Utility;

/// How an agent resolves equal utility between Yes and No.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum AgentTie {
    #[default]
    No,
    Yes,
}

impl AgentTie {
    pub fn resolve(&self, yes: Utility, no: Utility) -> Choice {
        match self {
            Self::No => Choice::from(yes > no),
            Self::Yes => Choice::from(yes >= no),
        }
    }
}

/// How the scheduler resolves equal expected totals across blocks,
/// candidates being visited in increasing block order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum SchedulerTie {
    /// highest-index maximizer
    #[default]
    Last,
    /// lowest-index maximizer
    First,
}

impl SchedulerTie {
    /// whether a later candidate `challenger` replaces the current `best`
    pub fn replaces(&self, challenger: Utility, best: Utility) -> bool {
        match self {
            Self::Last => challenger >= best,
            Self::First => challenger > best,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Ties {
    pub agent: AgentTie,
    pub scheduler: SchedulerTie,
}
