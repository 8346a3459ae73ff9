use crate::cascade::*;
use petgraph::graph::DiGraph;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

/// What the scheduler does at a vertex of the schedule tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Block(usize),
    Done,
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Block(block) => write!(f, "{}", block),
            Self::Done => write!(f, "N/A"),
        }
    }
}

/// The optimal schedule unrolled from the empty state to a fixed depth.
///
/// Each vertex is the block the scheduler reveals there; its outgoing
/// edges are the public choices that agent can make. When pruning, an
/// edge is dropped if no agent of that block would ever take it: the No
/// edge when even a No-leaning agent says Yes, the Yes edge when even a
/// Yes-leaning agent says No.
#[derive(Debug)]
pub struct ScheduleTree {
    graph: DiGraph<Label, Choice>,
}

impl ScheduleTree {
    pub fn grow(solver: &mut Solver, depth: usize) -> Result<Self, CascadeError> {
        Self::walk(solver, depth, true)
    }
    pub fn unpruned(solver: &mut Solver, depth: usize) -> Result<Self, CascadeError> {
        Self::walk(solver, depth, false)
    }
    pub fn graph(&self) -> &DiGraph<Label, Choice> {
        &self.graph
    }
    pub fn root(&self) -> NodeIndex {
        NodeIndex::new(0)
    }
    pub fn label(&self, index: NodeIndex) -> Label {
        self.graph[index]
    }
    /// Graphviz rendering, vertices labelled by block and edges by choice
    pub fn dot(&self) -> String {
        format!("{}", petgraph::dot::Dot::with_config(&self.graph, &[]))
    }
    /// the child reached from `index` by `choice`, if that edge survived pruning
    pub fn follow(&self, index: NodeIndex, choice: Choice) -> Option<NodeIndex> {
        self.graph
            .edges_directed(index, petgraph::Outgoing)
            .find(|edge| *edge.weight() == choice)
            .map(|edge| edge.target())
    }

    fn walk(solver: &mut Solver, depth: usize, prune: bool) -> Result<Self, CascadeError> {
        let mut graph = DiGraph::new();
        let zero = State::zero(solver.game().blocks());
        Self::expand(solver, &mut graph, zero, depth, prune)?;
        log::debug!("grew schedule tree of {} vertices", graph.node_count());
        Ok(Self { graph })
    }

    fn expand(
        solver: &mut Solver,
        graph: &mut DiGraph<Label, Choice>,
        state: State,
        depth: usize,
        prune: bool,
    ) -> Result<NodeIndex, CascadeError> {
        if state.is_terminal(solver.game()) {
            return Ok(graph.add_node(Label::Done));
        }
        let block = match solver.block_choice(&state)?.block {
            Some(block) => block,
            None => return Ok(graph.add_node(Label::Done)),
        };
        let index = graph.add_node(Label::Block(block));
        if depth == 0 {
            return Ok(index);
        }
        for choice in [Choice::No, Choice::Yes] {
            if prune && Self::unreachable(solver, block, &state, choice)? {
                continue;
            }
            let child = Self::expand(solver, graph, state.advance(block, choice), depth - 1, prune)?;
            graph.add_edge(index, child, choice);
        }
        Ok(index)
    }

    /// under single crossing the leaning aligned with `choice` is the
    /// most willing to take it
    fn unreachable(
        solver: &mut Solver,
        block: usize,
        state: &State,
        choice: Choice,
    ) -> Result<bool, CascadeError> {
        let willing = match choice {
            Choice::No => Leaning::No,
            Choice::Yes => Leaning::Yes,
        };
        Ok(solver.node_choice(block, willing, state)?.choice != choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star() -> Solver {
        Solver::strategic(Game::star(0.4, 0.5, 10).unwrap())
    }

    #[test]
    fn acyclic() {
        let tree = ScheduleTree::grow(&mut star(), 4).unwrap();
        assert!(!petgraph::algo::is_cyclic_directed(tree.graph()));
    }

    #[test]
    fn treelike() {
        let tree = ScheduleTree::unpruned(&mut star(), 3).unwrap();
        assert!(tree
            .graph()
            .node_indices()
            .filter(|n| *n != tree.root())
            .all(|n| 1 == tree
                .graph()
                .neighbors_directed(n, petgraph::Direction::Incoming)
                .count()));
    }

    #[test]
    fn unpruned_is_complete() {
        let tree = ScheduleTree::unpruned(&mut star(), 3).unwrap();
        assert_eq!(tree.graph().node_count(), 15);
        assert_eq!(tree.graph().edge_count(), 14);
    }

    #[test]
    fn pruned_star() {
        let tree = ScheduleTree::grow(&mut star(), 2).unwrap();
        assert_eq!(tree.graph().node_count(), 5);
        assert_eq!(tree.label(tree.root()), Label::Block(1));
        let no = tree.follow(tree.root(), Choice::No).unwrap();
        let yes = tree.follow(tree.root(), Choice::Yes).unwrap();
        assert_eq!(tree.label(no), Label::Block(1));
        assert_eq!(tree.label(yes), Label::Block(0));
        assert!(tree.follow(no, Choice::Yes).is_none());
        assert!(tree.follow(yes, Choice::No).is_none());
        assert_eq!(tree.label(tree.follow(no, Choice::No).unwrap()), Label::Block(1));
        assert_eq!(tree.label(tree.follow(yes, Choice::Yes).unwrap()), Label::Block(1));
    }

    #[test]
    fn terminal_leaves() {
        let game = Game::new(0.4, 0.5, vec![1], vec![vec![0.]]).unwrap();
        let tree = ScheduleTree::unpruned(&mut Solver::strategic(game), 5).unwrap();
        assert_eq!(tree.graph().node_count(), 3);
        assert_eq!(tree.label(tree.follow(tree.root(), Choice::Yes).unwrap()), Label::Done);
        assert_eq!(tree.label(tree.follow(tree.root(), Choice::No).unwrap()), Label::Done);
    }

    #[test]
    fn dot_labels() {
        let dot = ScheduleTree::grow(&mut star(), 1).unwrap().dot();
        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("label = \"Yes\""));
        assert!(dot.contains("label = \"No\""));
        assert!(dot.contains("label = \"1\""));
    }
}
