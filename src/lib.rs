//! Optimal scheduling of sequential binary-decision cascades.
//!
//! Agents of a block-partitioned population are revealed one at a time.
//! Each knows a private Yes/No leaning and publicly commits to Yes or No,
//! trading its alignment bonus against the influence of everyone else's
//! choices. A scheduler picks which block moves next to maximize the
//! expected number of Yes decisions.
//!
//! - [`cascade`]: game parameters, decision states, and the memoized solver
//! - [`survey`]: consumers of the solver: schedule trees, herd bands, sweeps
pub mod cascade;
pub mod survey;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Payoffs, expected counts of Yes decisions, and influence weights.
pub type Utility = f64;
/// Leaning priors and blending weights.
pub type Probability = f64;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// CONSTANTS
// ============================================================================
/// Upper bound on a Yes-leaning prior. Above one half the roles of the
/// two leanings flip and the scheduler's objective is no longer the hard side.
pub const P_MAX: Probability = 0.5;
/// Absolute tolerance used when comparing expected counts across solvers.
pub const TOLERANCE: Utility = 1e-9;
/// Default depth of an exported schedule tree.
pub const TREE_DEPTH: usize = 5;
/// Stack size of sweep worker threads. Solving recurses a few frames per
/// agent, which outgrows the 2 MiB default after a few hundred agents.
pub const SWEEP_STACK: usize = 64 << 20;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize terminal logging at the given level, optionally mirrored
/// to a file at DEBUG level.
#[cfg(feature = "cli")]
pub fn log(level: log::LevelFilter, file: Option<&std::path::Path>) -> anyhow::Result<()> {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let mut loggers: Vec<Box<dyn simplelog::SharedLogger>> = Vec::new();
    loggers.push(simplelog::TermLogger::new(
        level,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    ));
    if let Some(path) = file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        loggers.push(simplelog::WriteLogger::new(
            log::LevelFilter::Debug,
            config,
            std::fs::File::create(path)?,
        ));
    }
    simplelog::CombinedLogger::init(loggers)?;
    Ok(())
}
