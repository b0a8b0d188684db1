//! Core traits and types for the Playout game engine
//!
//! This crate provides the abstractions the search engine consumes:
//! - `GameModel`: rules of a deterministic two-player game (legal actions,
//!   transitions, terminal test, outcome values, player to move)
//! - `Outcome`: per-player scores of a finished game
//! - `GameError`: precondition violations reported by a game model
//! - `game_utils`: seats and scoring shared by the two-player games

pub mod game_utils;
pub mod model;

// Re-export main types for convenience
pub use game_utils::{two_player_outcome, Seat, Winner};
pub use model::{GameError, GameModel, Outcome};
