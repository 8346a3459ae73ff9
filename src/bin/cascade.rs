//! Cascade Binary
//!
//! Solve, inspect, and sweep cascade games from the command line.
//!
//! Subcommands: solve, tree, dump, bands, sweep

use anyhow::Context;
use cascade::cascade::*;
use cascade::survey::*;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use colored::Colorize;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[arg(long, global = true)]
    log_file: Option<std::path::PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Optimal first block and expected Yes counts")]
    Solve {
        #[command(flatten)]
        game: GameArgs,
    },
    #[command(about = "Graphviz export of the schedule tree")]
    Tree {
        #[command(flatten)]
        game: GameArgs,
        #[arg(long, default_value_t = cascade::TREE_DEPTH)]
        depth: usize,
        #[arg(long)]
        unpruned: bool,
    },
    #[command(about = "Both memo tables after a full solve")]
    Dump {
        #[command(flatten)]
        game: GameArgs,
    },
    #[command(about = "Herding pattern of one block")]
    Bands {
        #[command(flatten)]
        game: GameArgs,
        #[arg(long, default_value_t = 0)]
        block: usize,
    },
    #[command(about = "Strategic over myopic ratio across a star parameter grid")]
    Sweep {
        #[arg(long, value_enum)]
        plane: PlaneArg,
        #[arg(long, help = "held fixed: n for p-pi, pi for p-n, p for pi-n")]
        fixed: f64,
        #[arg(long, num_args = 3, value_names = ["START", "STEP", "COUNT"])]
        xs: Vec<f64>,
        #[arg(long, num_args = 3, value_names = ["START", "STEP", "COUNT"])]
        ys: Vec<f64>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum PlaneArg {
    #[value(name = "p-pi")]
    PPi,
    #[value(name = "p-n")]
    PN,
    #[value(name = "pi-n")]
    PiN,
}

#[derive(Args)]
struct GameArgs {
    #[arg(long, default_value_t = 0.4)]
    p: f64,
    #[arg(long, default_value_t = 0.5)]
    pi: f64,
    #[arg(long, value_delimiter = ',', conflicts_with = "star")]
    sizes: Vec<usize>,
    #[arg(long, help = "rows split by ';', weights by ','", conflicts_with = "star")]
    adjacency: Option<String>,
    #[arg(long, help = "hub of one with a leaf block of N")]
    star: Option<usize>,
    #[arg(long)]
    myopic: bool,
    #[arg(long, help = "equal utilities resolve to Yes")]
    yes_ties: bool,
    #[arg(long, help = "lowest index wins scheduler ties")]
    first_ties: bool,
    #[arg(long, help = "treat diagonal weights as zero")]
    ignore_loops: bool,
}

impl GameArgs {
    fn game(&self) -> anyhow::Result<Game> {
        if let Some(n) = self.star {
            return Ok(Game::star(self.p, self.pi, n)?);
        }
        let adjacency = self
            .adjacency
            .as_deref()
            .context("either --star or --sizes with --adjacency is required")?
            .split(';')
            .map(|row| {
                row.split(',')
                    .map(|w| w.trim().parse::<f64>().with_context(|| format!("bad weight {:?}", w)))
                    .collect::<anyhow::Result<Vec<_>>>()
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Game::new(self.p, self.pi, self.sizes.clone(), adjacency)?)
    }
    fn config(&self) -> Config {
        Config {
            mode: if self.myopic { Mode::Myopic } else { Mode::Strategic },
            ties: Ties {
                agent: if self.yes_ties { AgentTie::Yes } else { AgentTie::No },
                scheduler: if self.first_ties { SchedulerTie::First } else { SchedulerTie::Last },
            },
            loops: if self.ignore_loops { SelfLoops::Ignore } else { SelfLoops::Honor },
        }
    }
    fn solver(&self) -> anyhow::Result<Solver> {
        Ok(Solver::new(self.game()?, self.config()))
    }
}

fn axis(values: &[f64]) -> Vec<f64> {
    match values {
        [start, step, count] => Sweep::range(*start, *step, count.max(0.) as usize),
        _ => Vec::new(),
    }
}

fn paint(herd: Herd) -> colored::ColoredString {
    match herd {
        Herd::Yes => herd.to_string().green(),
        Herd::No => herd.to_string().red(),
        Herd::Split => herd.to_string().dimmed(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    cascade::log(level, cli.log_file.as_deref())?;
    match cli.command {
        Command::Solve { game } => {
            let mut solver = game.solver()?;
            let schedule = solver.solve()?;
            println!("{}", solver.game());
            match schedule.block {
                Some(block) => println!("first block  {}", block.to_string().bold()),
                None => println!("first block  {}", "N/A".dimmed()),
            }
            println!("expected ys  {:?}", schedule.expected);
            println!("total        {:.6}", schedule.total());
        }
        Command::Tree {
            game,
            depth,
            unpruned,
        } => {
            let mut solver = game.solver()?;
            let tree = match unpruned {
                true => ScheduleTree::unpruned(&mut solver, depth)?,
                false => ScheduleTree::grow(&mut solver, depth)?,
            };
            println!("{}", tree.dot());
        }
        Command::Dump { game } => {
            let mut solver = game.solver()?;
            solver.solve()?;
            println!("{}", solver);
        }
        Command::Bands { game, block } => {
            let mut solver = game.solver()?;
            let bands = Bands::scan(&mut solver, block)?;
            print!("{}", bands.render(paint));
        }
        Command::Sweep {
            plane,
            fixed,
            xs,
            ys,
        } => {
            let plane = match plane {
                PlaneArg::PPi => Plane::PvsPi {
                    n: fixed.round().max(0.) as usize,
                },
                PlaneArg::PN => Plane::PvsN { pi: fixed },
                PlaneArg::PiN => Plane::PivsN { p: fixed },
            };
            let (x, y) = plane.axes();
            log::info!("sweep over {} and {}", x, y);
            let cells = Sweep::new(axis(&xs), axis(&ys)).plane(plane)?;
            println!("{}", serde_json::to_string_pretty(&cells)?);
        }
    }
    Ok(())
}
