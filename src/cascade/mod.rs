//! The cascade game and its backward-induction solver.
//!
//! A [`Game`] fixes the population and its influence structure. A
//! [`State`] records who has moved and how. The [`Solver`] answers two
//! mutually recursive questions over states, memoizing every answer:
//! what a given agent does, and which block the scheduler reveals next.
//!
//! Tie-breaking ([`Ties`]), agent foresight ([`Mode`]), and the treatment of
//! an agent's own block weight ([`SelfLoops`]) are explicit [`Config`].

mod choice;
mod config;
mod decision;
mod error;
mod game;
mod leaning;
mod memo;
mod solver;
mod state;
mod ties;

#[cfg(test)]
mod oracle;

pub use choice::*;
pub use config::*;
pub use decision::*;
pub use error::*;
pub use game::*;
pub use leaning::*;
pub use memo::*;
pub use solver::*;
pub use state::*;
pub use ties::*;
