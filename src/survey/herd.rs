use crate::cascade::*;

/// How the two leanings of one block act at one state. A herd forms
/// when both leanings make the same choice, hiding their private types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(serde::Serialize)]
pub enum Herd {
    Yes,
    No,
    Split,
}

impl Herd {
    pub fn of(solver: &mut Solver, block: usize, state: &State) -> Result<Self, CascadeError> {
        let (yes, no) = solver.respond(block, state)?;
        match (yes.choice, no.choice) {
            (Choice::Yes, Choice::Yes) => Ok(Self::Yes),
            (Choice::No, Choice::No) => Ok(Self::No),
            // respond rejects a No-leaning Yes beside a Yes-leaning No
            _ => Ok(Self::Split),
        }
    }
}

impl std::fmt::Display for Herd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yes => write!(f, "Y"),
            Self::No => write!(f, "N"),
            Self::Split => write!(f, "S"),
        }
    }
}

/// Herding map of one block: `rows[m][y]` is the [`Herd`] once `m` of its
/// agents have moved and `y` of those said Yes, all other blocks untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Bands {
    block: usize,
    rows: Vec<Vec<Herd>>,
}

impl Bands {
    pub fn scan(solver: &mut Solver, block: usize) -> Result<Self, CascadeError> {
        let blocks = solver.game().blocks();
        if block >= blocks {
            return Err(InvalidArgument::Block { block, blocks }.into());
        }
        let size = solver.game().size(block);
        let mut rows = Vec::with_capacity(size);
        for moved in 0..size {
            let mut row = Vec::with_capacity(moved + 1);
            for yes in 0..=moved {
                let mut ns = vec![0; blocks];
                let mut ys = vec![0; blocks];
                ns[block] = moved;
                ys[block] = yes;
                row.push(Herd::of(solver, block, &State::from((ns, ys)))?);
            }
            rows.push(row);
        }
        Ok(Self { block, rows })
    }
    pub fn block(&self) -> usize {
        self.block
    }
    pub fn rows(&self) -> &[Vec<Herd>] {
        &self.rows
    }
    pub fn at(&self, moved: usize, yes: usize) -> Option<Herd> {
        self.rows.get(moved).and_then(|row| row.get(yes)).copied()
    }
}

impl Bands {
    /// one row per number already moved, cells ordered by Yes count
    pub fn render<F, D>(&self, cell: F) -> String
    where
        F: Fn(Herd) -> D,
        D: std::fmt::Display,
    {
        let mut out = format!("block {}\n", self.block);
        for (moved, row) in self.rows.iter().enumerate() {
            let cells = row.iter().map(|h| cell(*h).to_string()).collect::<Vec<_>>();
            out.push_str(&format!("{:>4} │ {}\n", moved, cells.join(" ")));
        }
        out
    }
}

impl std::fmt::Display for Bands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(|h| h))
    }
}
