use super::*;
use std::collections::BTreeMap;

/// Key of the node-decision table: who is deciding, and what they see.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Node {
    pub block: usize,
    pub leaning: Leaning,
    pub state: State,
}

/// Write-once tables of solved decisions and schedules.
///
/// Owned by exactly one [`Solver`] and grows for its whole lifetime.
/// Entries are only ever added. Keys are ordered so dumps are stable.
#[derive(Debug, Default)]
pub struct Memo {
    decisions: BTreeMap<Node, Decision>,
    schedules: BTreeMap<State, Schedule>,
}

impl Memo {
    pub fn decision(&self, node: &Node) -> Option<&Decision> {
        self.decisions.get(node)
    }
    pub fn schedule(&self, state: &State) -> Option<&Schedule> {
        self.schedules.get(state)
    }
    /// insert if absent; an existing entry always wins
    pub fn decided(&mut self, node: Node, decision: Decision) -> Decision {
        self.decisions.entry(node).or_insert(decision).clone()
    }
    /// insert if absent; an existing entry always wins
    pub fn scheduled(&mut self, state: State, schedule: Schedule) -> Schedule {
        self.schedules.entry(state).or_insert(schedule).clone()
    }
    pub fn decisions(&self) -> impl Iterator<Item = (&Node, &Decision)> {
        self.decisions.iter()
    }
    pub fn schedules(&self) -> impl Iterator<Item = (&State, &Schedule)> {
        self.schedules.iter()
    }
    /// (decision entries, schedule entries)
    pub fn len(&self) -> (usize, usize) {
        (self.decisions.len(), self.schedules.len())
    }
    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty() && self.schedules.is_empty()
    }
}
