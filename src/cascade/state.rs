use super::*;
use crate::Utility;

/// Public record of play so far: `ns[b]` agents of block `b` have
/// committed and `ys[b]` of them chose Yes. An agent who is in the middle
/// of deciding is never counted.
///
/// Valid states satisfy `ys[b] <= ns[b] <= sizes[b]` for every block.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct State {
    ns: Vec<usize>,
    ys: Vec<usize>,
}

impl State {
    /// nobody has moved yet
    pub fn zero(blocks: usize) -> Self {
        Self {
            ns: vec![0; blocks],
            ys: vec![0; blocks],
        }
    }
    pub fn ns(&self) -> &[usize] {
        &self.ns
    }
    pub fn ys(&self) -> &[usize] {
        &self.ys
    }
    /// how many No decisions block `b` has seen
    pub fn no(&self, block: usize) -> usize {
        self.ns[block] - self.ys[block]
    }
    /// total number of agents who have committed
    pub fn moved(&self) -> usize {
        self.ns.iter().sum()
    }
    pub fn is_terminal(&self, game: &Game) -> bool {
        self.ns.iter().zip(game.sizes()).all(|(n, s)| n == s)
    }
    /// whether the agent about to move is the last in the whole game
    pub fn is_final(&self, game: &Game) -> bool {
        self.moved() + 1 == game.population()
    }
    /// blocks that still have someone left to move, in index order
    pub fn open<'a>(&'a self, game: &'a Game) -> impl Iterator<Item = usize> + 'a {
        self.ns
            .iter()
            .zip(game.sizes())
            .enumerate()
            .filter(|(_, (n, s))| n < s)
            .map(|(b, _)| b)
    }
    /// the state after one more agent of `block` commits to `choice`
    pub fn advance(&self, block: usize, choice: Choice) -> Self {
        let mut next = self.clone();
        next.ns[block] += 1;
        if choice.is_yes() {
            next.ys[block] += 1;
        }
        next
    }
    /// Yes counts as reals, the expected vector of a finished game
    pub fn expected(&self) -> Vec<Utility> {
        self.ys.iter().map(|&y| y as Utility).collect()
    }
    /// reject states that do not fit the shape and bounds of `game`
    pub fn check(&self, game: &Game) -> Result<(), InvalidArgument> {
        let blocks = game.blocks();
        for len in [self.ns.len(), self.ys.len()] {
            if len != blocks {
                return Err(InvalidArgument::Length { len, blocks });
            }
        }
        for (block, ((&ns, &ys), &size)) in self
            .ns
            .iter()
            .zip(self.ys.iter())
            .zip(game.sizes())
            .enumerate()
        {
            if ys > ns || ns > size {
                return Err(InvalidArgument::Bounds {
                    block,
                    ys,
                    ns,
                    size,
                });
            }
        }
        Ok(())
    }
}

impl From<(Vec<usize>, Vec<usize>)> for State {
    fn from((ns, ys): (Vec<usize>, Vec<usize>)) -> Self {
        Self { ns, ys }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ns={:?} ys={:?}", self.ns, self.ys)
    }
}
