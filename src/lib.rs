//! Dice Calculator — exact sum distributions for pools of dice.
//!
//! Enumerates every face combination of a dice pool exactly once to build
//! the full distribution of sums, alongside closed-form averages and
//! standard deviations and "at least X" odds.

pub mod cli;
pub mod core;
pub mod schema;
