use super::*;

/// How agents weigh the future.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Mode {
    /// Full backward induction over continuation values.
    #[default]
    Strategic,
    /// Every agent acts as though it were the last to move.
    /// Used as a non-strategic reference policy.
    Myopic,
}

/// Whether an agent's own block weight (the adjacency diagonal)
/// enters its utility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum SelfLoops {
    #[default]
    Honor,
    Ignore,
}

/// Everything about a solver besides the game itself.
/// Fixed for the lifetime of a [`Solver`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Config {
    pub mode: Mode,
    pub ties: Ties,
    pub loops: SelfLoops,
}

impl From<Mode> for Config {
    fn from(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }
}
