use super::*;
use crate::Probability;
use crate::Utility;

/// Backward-induction solver for one cascade game.
///
/// Two mutually recursive queries share one write-once [`Memo`]:
///
/// - [`Solver::node_choice`]: what an agent of a given block and leaning
///   does on seeing a state, and what the game then produces.
/// - [`Solver::block_choice`]: which block the scheduler reveals next,
///   averaging over the unknown leaning of whoever it reveals.
///
/// Every call pair moves one more agent, so recursion depth is bounded
/// by the population. Results are computed lazily on first query and
/// kept for the lifetime of the solver. The game and config are fixed at
/// construction, so no cached entry can outlive the parameters it was
/// computed under.
///
/// Recursion runs a few frames per agent, so very large populations need
/// a thread stack larger than the 2 MiB default; sweeps run on workers
/// sized by [`SWEEP_STACK`](crate::SWEEP_STACK).
#[derive(Debug)]
pub struct Solver {
    game: Game,
    config: Config,
    memo: Memo,
    poisoned: bool,
}

impl Solver {
    pub fn new(game: Game, config: Config) -> Self {
        log::debug!("new {:?} solver for {}", config.mode, game);
        Self {
            game,
            config,
            memo: Memo::default(),
            poisoned: false,
        }
    }
    pub fn strategic(game: Game) -> Self {
        Self::new(game, Config::from(Mode::Strategic))
    }
    pub fn myopic(game: Game) -> Self {
        Self::new(game, Config::from(Mode::Myopic))
    }
    /// validate raw parameters and build a solver with default ties and self-loops
    pub fn build(
        p: Probability,
        pi: Utility,
        sizes: Vec<usize>,
        adjacency: Vec<Vec<Utility>>,
        mode: Mode,
    ) -> Result<Self, InvalidArgument> {
        Game::new(p, pi, sizes, adjacency).map(|game| Self::new(game, Config::from(mode)))
    }

    pub fn game(&self) -> &Game {
        &self.game
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    /// read-only view of everything solved so far
    pub fn memo(&self) -> &Memo {
        &self.memo
    }
    pub fn decisions(&self) -> impl Iterator<Item = (&Node, &Decision)> {
        self.memo.decisions()
    }
    pub fn schedules(&self) -> impl Iterator<Item = (&State, &Schedule)> {
        self.memo.schedules()
    }

    /// Optimal action of the next agent of `block`, of the given leaning,
    /// having seen `state` (which does not yet count that agent).
    pub fn node_choice(
        &mut self,
        block: usize,
        leaning: Leaning,
        state: &State,
    ) -> Result<Decision, CascadeError> {
        self.healthy()?;
        self.movable(block, state)?;
        let node = Node {
            block,
            leaning,
            state: state.clone(),
        };
        self.decide(node).map_err(|e| self.poison(e))
    }

    /// Decisions of a Yes-leaning and a No-leaning next agent of `block`
    /// at `state`. A crossing between the two is fatal to the solver.
    pub fn respond(&mut self, block: usize, state: &State) -> Result<(Decision, Decision), CascadeError> {
        self.healthy()?;
        self.movable(block, state)?;
        self.pair(block, state).map_err(|e| self.poison(e))
    }

    /// Optimal next block to reveal from a non-terminal `state`.
    pub fn block_choice(&mut self, state: &State) -> Result<Schedule, CascadeError> {
        self.healthy()?;
        self.ongoing(state)?;
        self.schedule(state.clone()).map_err(|e| self.poison(e))
    }

    /// Full-game schedule from the empty state. A game with no agents
    /// has nothing to schedule and reports `None` with zero counts.
    pub fn solve(&mut self) -> Result<Schedule, CascadeError> {
        let zero = State::zero(self.game.blocks());
        if zero.is_terminal(&self.game) {
            self.healthy()?;
            return Ok(Schedule {
                block: None,
                expected: zero.expected(),
            });
        }
        let schedule = self.block_choice(&zero)?;
        log::debug!(
            "solved {:?} game: {} → {:.6} expected Yes, memo {:?}",
            self.config.mode,
            schedule,
            schedule.total(),
            self.memo.len(),
        );
        Ok(schedule)
    }

    /// Expected total number of Yes decisions under optimal play
    /// from the start of the game.
    pub fn expected_ys(&mut self) -> Result<Utility, CascadeError> {
        self.solve().map(|schedule| schedule.total())
    }

    /// Contribution of `block`'s own weight to the (Yes, No) utilities of
    /// its next agent under the last-mover formula. Zero when self-loops
    /// are ignored.
    pub fn diagonal(&self, block: usize, state: &State) -> Result<(Utility, Utility), InvalidArgument> {
        state.check(&self.game)?;
        self.within(block)?;
        let weight = self.weight(block, block);
        Ok((
            weight * state.ys()[block] as Utility,
            weight * state.no(block) as Utility,
        ))
    }
}

/// boundary checks
impl Solver {
    fn healthy(&self) -> Result<(), CascadeError> {
        match self.poisoned {
            true => Err(CascadeError::Poisoned),
            false => Ok(()),
        }
    }
    fn poison(&mut self, error: CascadeError) -> CascadeError {
        if error.is_fatal() {
            self.poisoned = true;
        }
        error
    }
    fn within(&self, block: usize) -> Result<(), InvalidArgument> {
        match block < self.game.blocks() {
            true => Ok(()),
            false => Err(InvalidArgument::Block {
                block,
                blocks: self.game.blocks(),
            }),
        }
    }
    fn ongoing(&self, state: &State) -> Result<(), InvalidArgument> {
        state.check(&self.game)?;
        match state.is_terminal(&self.game) {
            true => Err(InvalidArgument::Terminal(state.clone())),
            false => Ok(()),
        }
    }
    fn movable(&self, block: usize, state: &State) -> Result<(), InvalidArgument> {
        self.within(block)?;
        self.ongoing(state)?;
        match state.ns()[block] < self.game.size(block) {
            true => Ok(()),
            false => Err(InvalidArgument::Exhausted {
                block,
                state: state.clone(),
            }),
        }
    }
}

/// recursion
impl Solver {
    fn decide(&mut self, node: Node) -> Result<Decision, CascadeError> {
        if let Some(hit) = self.memo.decision(&node) {
            return Ok(hit.clone());
        }
        log::trace!("deciding {} {} at {}", node.block, node.leaning, node.state);
        let decision = match (node.state.is_final(&self.game), self.config.mode) {
            (true, _) => self.last(&node),
            (false, Mode::Strategic) => self.foresee(&node)?,
            (false, Mode::Myopic) => self.react(&node)?,
        };
        Ok(self.memo.decided(node, decision))
    }

    fn schedule(&mut self, state: State) -> Result<Schedule, CascadeError> {
        if let Some(hit) = self.memo.schedule(&state) {
            return Ok(hit.clone());
        }
        let p = self.game.p();
        let open = state.open(&self.game).collect::<Vec<_>>();
        let mut best = None::<(usize, Utility, Vec<Utility>)>;
        for block in open {
            let (yes, no) = self.pair(block, &state)?;
            let blended = yes
                .expected
                .iter()
                .zip(no.expected.iter())
                .map(|(y, n)| p * y + (1. - p) * n)
                .collect::<Vec<Utility>>();
            let total = blended.iter().sum::<Utility>();
            if best
                .as_ref()
                .map_or(true, |(_, top, _)| self.config.ties.scheduler.replaces(total, *top))
            {
                best = Some((block, total, blended));
            }
        }
        let schedule = match best {
            Some((block, _, expected)) => Schedule {
                block: Some(block),
                expected,
            },
            None => Schedule {
                block: None,
                expected: state.expected(),
            },
        };
        Ok(self.memo.scheduled(state, schedule))
    }

    /// both leanings of the next agent of `block`, checked for single crossing
    fn pair(&mut self, block: usize, state: &State) -> Result<(Decision, Decision), CascadeError> {
        let yes = self.decide(Node {
            block,
            leaning: Leaning::Yes,
            state: state.clone(),
        })?;
        let no = self.decide(Node {
            block,
            leaning: Leaning::No,
            state: state.clone(),
        })?;
        Self::crossing(block, state, &yes, &no)?;
        Ok((yes, no))
    }

    /// the last agent in the game sees every other final choice
    fn last(&self, node: &Node) -> Decision {
        let choice = self.glance(node);
        Decision {
            choice,
            expected: node.state.advance(node.block, choice).expected(),
        }
    }

    /// the agent acts as though it were last, then play continues
    fn react(&mut self, node: &Node) -> Result<Decision, CascadeError> {
        let choice = self.glance(node);
        let next = node.state.advance(node.block, choice);
        let expected = self.schedule(next)?.expected;
        Ok(Decision { choice, expected })
    }

    /// the agent compares the whole continuation under each action
    fn foresee(&mut self, node: &Node) -> Result<Decision, CascadeError> {
        let Node {
            block,
            leaning,
            ref state,
        } = *node;
        let if_no = self.schedule(state.advance(block, Choice::No))?.expected;
        let if_yes = self.schedule(state.advance(block, Choice::Yes))?.expected;
        let no = self.influence(block, |j| self.game.size(j) as Utility - if_no[j])
            + self.bonus(leaning, Choice::No);
        let yes = self.influence(block, |j| if_yes[j]) + self.bonus(leaning, Choice::Yes);
        let choice = self.config.ties.agent.resolve(yes, no);
        let expected = match choice {
            Choice::Yes => if_yes,
            Choice::No => if_no,
        };
        Ok(Decision { choice, expected })
    }

    /// last-mover utilities from counts already on the table
    fn glance(&self, node: &Node) -> Choice {
        let Node {
            block,
            leaning,
            ref state,
        } = *node;
        let no = self.influence(block, |j| state.no(j) as Utility) + self.bonus(leaning, Choice::No);
        let yes = self.influence(block, |j| state.ys()[j] as Utility) + self.bonus(leaning, Choice::Yes);
        self.config.ties.agent.resolve(yes, no)
    }

    fn influence<F>(&self, block: usize, count: F) -> Utility
    where
        F: Fn(usize) -> Utility,
    {
        (0..self.game.blocks())
            .map(|j| self.weight(block, j) * count(j))
            .sum()
    }

    fn weight(&self, block: usize, other: usize) -> Utility {
        match (self.config.loops, block == other) {
            (SelfLoops::Ignore, true) => 0.,
            _ => self.game.weight(block, other),
        }
    }

    fn bonus(&self, leaning: Leaning, choice: Choice) -> Utility {
        match leaning.aligned() == choice {
            true => self.game.pi(),
            false => 0.,
        }
    }

    /// a No-leaning Yes alongside a Yes-leaning No breaks single crossing
    fn crossing(block: usize, state: &State, yes: &Decision, no: &Decision) -> Result<(), CascadeError> {
        match (yes.choice, no.choice) {
            (Choice::No, Choice::Yes) => {
                log::error!("single crossing violated for block {} at {}", block, state);
                Err(CascadeError::Crossing {
                    block,
                    state: state.clone(),
                })
            }
            _ => Ok(()),
        }
    }
}

#[rustfmt::skip]
impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (decisions, schedules) = self.memo.len();
        writeln!(f, "{}", self.game)?;
        writeln!(f, "Decisions: {}", decisions)?;
        writeln!(f, "┌───────┬────────┬──────────────────┬──────────────────┬────────┬──────────────────────────┐")?;
        writeln!(f, "│ Block │ Type   │ ns               │ ys               │ Choice │ E[Y]                     │")?;
        writeln!(f, "├───────┼────────┼──────────────────┼──────────────────┼────────┼──────────────────────────┤")?;
        for (node, decision) in self.decisions() {
            writeln!(
                f,
                "│ {:>5} │ {:<6} │ {:<16} │ {:<16} │ {:<6} │ {:<24} │",
                node.block,
                node.leaning,
                format!("{:?}", node.state.ns()),
                format!("{:?}", node.state.ys()),
                decision.choice,
                format!("{:.3?}", decision.expected),
            )?;
        }
        writeln!(f, "└───────┴────────┴──────────────────┴──────────────────┴────────┴──────────────────────────┘")?;
        writeln!(f, "Schedules: {}", schedules)?;
        writeln!(f, "┌──────────────────┬──────────────────┬───────┬──────────────────────────┬──────────┐")?;
        writeln!(f, "│ ns               │ ys               │ Block │ E[Y]                     │    Total │")?;
        writeln!(f, "├──────────────────┼──────────────────┼───────┼──────────────────────────┼──────────┤")?;
        for (state, schedule) in self.schedules() {
            writeln!(
                f,
                "│ {:<16} │ {:<16} │ {:>5} │ {:<24} │ {:>8.4} │",
                format!("{:?}", state.ns()),
                format!("{:?}", state.ys()),
                schedule.block.map_or("N/A".to_string(), |b| b.to_string()),
                format!("{:.3?}", schedule.expected),
                schedule.total(),
            )?;
        }
        writeln!(f, "└──────────────────┴──────────────────┴───────┴──────────────────────────┴──────────┘")?;
        Ok(())
    }
}
