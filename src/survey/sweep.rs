use crate::SWEEP_STACK;
use crate::Utility;
use crate::cascade::*;

/// One grid point: the optimal expected Yes count with strategic and with
/// myopic agents, and their ratio where the myopic count is nonzero.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize)]
pub struct Cell {
    pub x: f64,
    pub y: f64,
    pub strategic: Utility,
    pub myopic: Utility,
    pub ratio: Option<Utility>,
}

impl Cell {
    pub fn measure(x: f64, y: f64, game: Game) -> Result<Self, CascadeError> {
        let strategic = Solver::strategic(game.clone()).expected_ys()?;
        let myopic = Solver::myopic(game).expected_ys()?;
        let ratio = if myopic > 0. { Some(strategic / myopic) } else { None };
        Ok(Self {
            x,
            y,
            strategic,
            myopic,
            ratio,
        })
    }
}

/// Two-parameter slices through star games, with the third held fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Plane {
    /// prior against alignment bonus, leaf block of `n`
    PvsPi { n: usize },
    /// prior against leaf count
    PvsN { pi: Utility },
    /// alignment bonus against leaf count
    PivsN { p: f64 },
}

impl Plane {
    /// the star game at grid point (x, y); leaf counts are rounded
    pub fn game(&self, x: f64, y: f64) -> Result<Game, InvalidArgument> {
        match *self {
            Self::PvsPi { n } => Game::star(x, y, n),
            Self::PvsN { pi } => Game::star(x, pi, Self::count(y)),
            Self::PivsN { p } => Game::star(p, x, Self::count(y)),
        }
    }
    pub fn axes(&self) -> (&'static str, &'static str) {
        match self {
            Self::PvsPi { .. } => ("p", "pi"),
            Self::PvsN { .. } => ("p", "n"),
            Self::PivsN { .. } => ("pi", "n"),
        }
    }
    fn count(y: f64) -> usize {
        y.round().max(0.) as usize
    }
}

/// A rectangular grid of parameter values.
#[derive(Debug, Clone, PartialEq)]
pub struct Sweep {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Sweep {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Self {
        Self { xs, ys }
    }
    /// `count` evenly spaced values from `start`
    pub fn range(start: f64, step: f64, count: usize) -> Vec<f64> {
        (0..count).map(|i| start + step * i as f64).collect()
    }
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }
    fn points(&self) -> Vec<(f64, f64)> {
        self.xs
            .iter()
            .flat_map(|&x| self.ys.iter().map(move |&y| (x, y)))
            .collect()
    }

    /// Solve both modes at every grid point, row-major in x. Each point
    /// gets its own solvers on a worker with a [`SWEEP_STACK`] stack; the
    /// first failure aborts the sweep.
    pub fn run<F>(&self, build: F) -> Result<Vec<Cell>, CascadeError>
    where
        F: Fn(f64, f64) -> Result<Game, InvalidArgument> + Sync,
    {
        log::info!("sweeping {} x {} grid", self.xs.len(), self.ys.len());
        let measure = |(x, y): (f64, f64)| Cell::measure(x, y, build(x, y)?);
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            rayon::ThreadPoolBuilder::new()
                .stack_size(SWEEP_STACK)
                .build()
                .map_err(|e| CascadeError::Workers(e.to_string()))?
                .install(|| self.points().into_par_iter().map(measure).collect())
        }
        #[cfg(not(feature = "parallel"))]
        {
            std::thread::scope(|scope| {
                std::thread::Builder::new()
                    .stack_size(SWEEP_STACK)
                    .spawn_scoped(scope, || -> Result<Vec<Cell>, CascadeError> {
                        self.points().into_iter().map(measure).collect()
                    })
                    .map_err(|e| CascadeError::Workers(e.to_string()))?
                    .join()
                    .map_err(|_| CascadeError::Workers("sweep thread panicked".to_string()))?
            })
        }
    }

    pub fn plane(&self, plane: Plane) -> Result<Vec<Cell>, CascadeError> {
        self.run(|x, y| plane.game(x, y))
    }
}
