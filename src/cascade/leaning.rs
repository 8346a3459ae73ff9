use super::*;
use crate::Arbitrary;
use crate::Probability;

/// An agent's private disposition, drawn i.i.d. before scheduling begins.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Leaning {
    Yes,
    No,
}

impl Leaning {
    /// both leanings, Yes first
    pub const fn all() -> [Self; 2] {
        [Self::Yes, Self::No]
    }
    /// the action this leaning is aligned with
    pub fn aligned(&self) -> Choice {
        match self {
            Self::Yes => Choice::Yes,
            Self::No => Choice::No,
        }
    }
    /// prior mass of this leaning when Yes is drawn with probability p
    pub fn weight(&self, p: Probability) -> Probability {
        match self {
            Self::Yes => p,
            Self::No => 1. - p,
        }
    }
}

impl From<bool> for Leaning {
    fn from(yes: bool) -> Self {
        if yes { Self::Yes } else { Self::No }
    }
}

impl Arbitrary for Leaning {
    fn random() -> Self {
        Self::from(rand::random::<bool>())
    }
}

impl std::fmt::Display for Leaning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yes => write!(f, "Y-type"),
            Self::No => write!(f, "N-type"),
        }
    }
}
