//! Opponent AI.

pub mod policy;

pub use policy::{HeuristicOpponent, OpponentPolicy};
