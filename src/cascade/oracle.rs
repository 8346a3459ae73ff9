//! Exhaustive reference for small games.
//!
//! Searches over full move histories with no state aggregation and no
//! caching, then plays the searched policy against every assignment of
//! leanings and averages the outcomes by their prior mass. Agreement with
//! [`Solver`] checks memoization by counts, blending, and tie handling in
//! one go. Exponential in the population; only for games of a few agents.

use super::*;
use crate::Probability;
use crate::TOLERANCE;
use crate::Utility;

type History = Vec<(usize, Choice)>;

struct Search<'a> {
    game: &'a Game,
    ties: Ties,
}

impl<'a> Search<'a> {
    fn new(game: &'a Game) -> Self {
        Self {
            game,
            ties: Ties::default(),
        }
    }

    fn counts(&self, history: &[(usize, Choice)]) -> State {
        history
            .iter()
            .fold(State::zero(self.game.blocks()), |state, &(block, choice)| {
                state.advance(block, choice)
            })
    }

    fn then(history: &[(usize, Choice)], block: usize, choice: Choice) -> History {
        history.iter().copied().chain(std::iter::once((block, choice))).collect()
    }

    fn utility(&self, block: usize, count: impl Fn(usize) -> Utility) -> Utility {
        (0..self.game.blocks())
            .map(|j| self.game.weight(block, j) * count(j))
            .sum()
    }

    fn bonus(&self, leaning: Leaning, choice: Choice) -> Utility {
        if leaning.aligned() == choice { self.game.pi() } else { 0. }
    }

    fn respond(&self, history: &[(usize, Choice)], block: usize, leaning: Leaning) -> (Choice, Vec<Utility>) {
        let state = self.counts(history);
        if state.moved() + 1 == self.game.population() {
            let no = self.utility(block, |j| state.no(j) as Utility) + self.bonus(leaning, Choice::No);
            let yes = self.utility(block, |j| state.ys()[j] as Utility) + self.bonus(leaning, Choice::Yes);
            let choice = self.ties.agent.resolve(yes, no);
            (choice, state.advance(block, choice).expected())
        } else {
            let (_, if_no) = self.plan(&Self::then(history, block, Choice::No));
            let (_, if_yes) = self.plan(&Self::then(history, block, Choice::Yes));
            let no = self.utility(block, |j| self.game.size(j) as Utility - if_no[j])
                + self.bonus(leaning, Choice::No);
            let yes = self.utility(block, |j| if_yes[j]) + self.bonus(leaning, Choice::Yes);
            match self.ties.agent.resolve(yes, no) {
                Choice::Yes => (Choice::Yes, if_yes),
                Choice::No => (Choice::No, if_no),
            }
        }
    }

    fn plan(&self, history: &[(usize, Choice)]) -> (Option<usize>, Vec<Utility>) {
        let state = self.counts(history);
        let p = self.game.p();
        let mut best = (None, Utility::NEG_INFINITY, state.expected());
        for block in state.open(self.game) {
            let (_, yes) = self.respond(history, block, Leaning::Yes);
            let (_, no) = self.respond(history, block, Leaning::No);
            let blended = yes
                .iter()
                .zip(no.iter())
                .map(|(y, n)| p * y + (1. - p) * n)
                .collect::<Vec<Utility>>();
            let total = blended.iter().sum::<Utility>();
            if best.0.is_none() || self.ties.scheduler.replaces(total, best.1) {
                best = (Some(block), total, blended);
            }
        }
        (best.0, best.2)
    }

    /// realized Yes counts when leanings are fixed in advance,
    /// `leanings[b][i]` being the i-th agent revealed from block b
    fn play(&self, leanings: &[Vec<Leaning>]) -> Vec<usize> {
        let mut history = History::new();
        while let (Some(block), _) = self.plan(&history) {
            let arrival = history.iter().filter(|(b, _)| *b == block).count();
            let (choice, _) = self.respond(&history, block, leanings[block][arrival]);
            history.push((block, choice));
        }
        self.counts(&history).ys().to_vec()
    }

    /// every assignment of leanings with its prior mass
    fn assignments(&self) -> Vec<(Probability, Vec<Vec<Leaning>>)> {
        let n = self.game.population();
        (0..1u32 << n)
            .map(|mask| {
                let mut bit = 0;
                let mut mass = 1.;
                let leanings: Vec<Vec<Leaning>> = self
                    .game
                    .sizes()
                    .iter()
                    .map(|&size| {
                        (0..size)
                            .map(|_| {
                                let leaning = Leaning::from(mask & (1 << bit) != 0);
                                bit += 1;
                                mass *= leaning.weight(self.game.p());
                                leaning
                            })
                            .collect::<Vec<Leaning>>()
                    })
                    .collect();
                (mass, leanings)
            })
            .collect()
    }

    fn average(&self) -> Vec<Utility> {
        let mut expected = vec![0.; self.game.blocks()];
        for (mass, leanings) in self.assignments() {
            for (e, y) in expected.iter_mut().zip(self.play(&leanings)) {
                *e += mass * y as Utility;
            }
        }
        expected
    }

    /// expected Yes counts when the schedule is a fixed `order` known to all
    fn fixed(&self, order: &[usize]) -> Vec<Utility> {
        let forced = Forced {
            search: self,
            order,
            k: 0,
        };
        forced.value(vec![0; self.game.blocks()])
    }

    fn arrived(&self, prefix: &[usize]) -> Vec<usize> {
        let mut ns = vec![0; self.game.blocks()];
        for &b in prefix {
            ns[b] += 1;
        }
        ns
    }

    /// every distinct sequence of blocks that exhausts the population
    fn orders(&self) -> Vec<Vec<usize>> {
        fn extend(remaining: &mut Vec<usize>, prefix: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
            if remaining.iter().all(|&r| r == 0) {
                out.push(prefix.clone());
                return;
            }
            for b in 0..remaining.len() {
                if remaining[b] > 0 {
                    remaining[b] -= 1;
                    prefix.push(b);
                    extend(remaining, prefix, out);
                    prefix.pop();
                    remaining[b] += 1;
                }
            }
        }
        let mut out = Vec::new();
        extend(&mut self.game.sizes().to_vec(), &mut Vec::new(), &mut out);
        out
    }
}

/// backward induction along one fixed order, starting at position `k`
struct Forced<'s, 'a> {
    search: &'s Search<'a>,
    order: &'s [usize],
    k: usize,
}

impl Forced<'_, '_> {
    fn value(&self, ys: Vec<usize>) -> Vec<Utility> {
        let Self { search, order, k } = *self;
        if k == order.len() {
            return ys.iter().map(|&y| y as Utility).collect();
        }
        let block = order[k];
        let state = State::from((search.arrived(&order[..k]), ys.clone()));
        let p = search.game.p();
        let mut yes_ys = ys.clone();
        yes_ys[block] += 1;
        let next = Forced {
            search,
            order,
            k: k + 1,
        };
        let respond = |leaning: Leaning| -> Vec<Utility> {
            if k + 1 == order.len() {
                let no = search.utility(block, |j| state.no(j) as Utility)
                    + search.bonus(leaning, Choice::No);
                let yes = search.utility(block, |j| ys[j] as Utility)
                    + search.bonus(leaning, Choice::Yes);
                let chosen = match search.ties.agent.resolve(yes, no) {
                    Choice::Yes => &yes_ys,
                    Choice::No => &ys,
                };
                return chosen.iter().map(|&y| y as Utility).collect();
            }
            let if_no = next.value(ys.clone());
            let if_yes = next.value(yes_ys.clone());
            let no = search.utility(block, |j| search.game.size(j) as Utility - if_no[j])
                + search.bonus(leaning, Choice::No);
            let yes = search.utility(block, |j| if_yes[j]) + search.bonus(leaning, Choice::Yes);
            match search.ties.agent.resolve(yes, no) {
                Choice::Yes => if_yes,
                Choice::No => if_no,
            }
        };
        let yes = respond(Leaning::Yes);
        let no = respond(Leaning::No);
        yes.iter().zip(no.iter()).map(|(y, n)| p * y + (1. - p) * n).collect()
    }
}

/// every game with at most two blocks and four agents over a few
/// influence patterns and parameter pairs
fn games() -> Vec<Game> {
    let singles = [vec![vec![0.]], vec![vec![1.]], vec![vec![2.5]]];
    let pairs = [
        vec![vec![0., 1.], vec![1., 0.]],
        vec![vec![0.5, 2.], vec![0., 1.]],
        vec![vec![1., 0.5], vec![1.5, 0.]],
    ];
    let params = [(0.4, 0.5), (0.2, 1.5), (0.5, 0.25), (0.1, 0.75)];
    let mut games = Vec::new();
    for sizes in [vec![1], vec![2], vec![3], vec![4]] {
        for adjacency in singles.iter() {
            for &(p, pi) in params.iter() {
                games.push(Game::new(p, pi, sizes.clone(), adjacency.clone()).unwrap());
            }
        }
    }
    for sizes in [[1, 1], [1, 2], [2, 1], [2, 2], [1, 3], [3, 1]] {
        for adjacency in pairs.iter() {
            for &(p, pi) in params.iter() {
                games.push(Game::new(p, pi, sizes.to_vec(), adjacency.clone()).unwrap());
            }
        }
    }
    games
}

fn close(a: &[Utility], b: &[Utility]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;

    #[test]
    fn exhaustive_matches_memoized() {
        for game in games() {
            let dp = Solver::strategic(game.clone()).solve().unwrap();
            let search = Search::new(&game);
            let (block, searched) = search.plan(&[]);
            let averaged = search.average();
            assert_eq!(dp.block, block, "{}", game);
            assert!(close(&dp.expected, &searched), "{}: {:?} vs {:?}", game, dp.expected, searched);
            assert!(close(&dp.expected, &averaged), "{}: {:?} vs {:?}", game, dp.expected, averaged);
        }
    }

    #[test]
    fn exhaustive_matches_random_games() {
        for _ in 0..16 {
            let game = Game::random();
            let dp = Solver::strategic(game.clone()).solve().unwrap();
            let averaged = Search::new(&game).average();
            assert!(close(&dp.expected, &averaged), "{}: {:?} vs {:?}", game, dp.expected, averaged);
        }
    }

    #[test]
    fn adaptive_schedule_beats_every_fixed_order() {
        for game in games() {
            let adaptive = Solver::strategic(game.clone()).expected_ys().unwrap();
            let search = Search::new(&game);
            for order in search.orders() {
                let fixed = search
                    .fixed(&order)
                    .iter()
                    .sum::<Utility>();
                assert!(fixed <= adaptive + TOLERANCE, "{}: {:?} gives {} > {}", game, order, fixed, adaptive);
            }
        }
    }

    #[test]
    fn orders_are_distinct_and_complete() {
        let game = Game::new(0.4, 0.5, vec![2, 1], vec![vec![0., 1.], vec![1., 0.]]).unwrap();
        let orders = Search::new(&game).orders();
        assert_eq!(orders, vec![vec![0, 0, 1], vec![0, 1, 0], vec![1, 0, 0]]);
    }

    #[test]
    fn assignments_carry_all_mass() {
        let game = Game::new(0.3, 1., vec![2, 2], vec![vec![0., 1.], vec![1., 0.]]).unwrap();
        let assignments = Search::new(&game).assignments();
        assert_eq!(assignments.len(), 16);
        let mass = assignments.iter().map(|(m, _)| m).sum::<Probability>();
        assert!((mass - 1.).abs() < TOLERANCE);
    }
}
