//! Shared utilities for two-player game implementations
//!
//! Seats, winner bookkeeping and outcome scoring used by every two-player
//! game model, so that the games agree on what a win, a loss and a draw are
//! worth.

use crate::model::Outcome;

/// Score credited to the winner of a game.
pub const WIN_SCORE: f64 = 1.0;
/// Score credited to both players of a drawn game.
pub const DRAW_SCORE: f64 = 0.5;
/// Score credited to the loser of a game.
pub const LOSS_SCORE: f64 = 0.0;

/// One of the two players of a two-player game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seat {
    /// The player who moves first.
    First,
    /// The player who moves second.
    Second,
}

impl Seat {
    /// The other player.
    #[inline]
    pub fn opponent(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    /// Board cell marker for this seat (1 or 2, 0 is reserved for empty).
    #[inline]
    pub fn marker(self) -> u8 {
        match self {
            Seat::First => 1,
            Seat::Second => 2,
        }
    }

    /// Seat owning a board cell marker.
    pub fn from_marker(marker: u8) -> Option<Seat> {
        match marker {
            1 => Some(Seat::First),
            2 => Some(Seat::Second),
            _ => None,
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seat::First => write!(f, "first"),
            Seat::Second => write!(f, "second"),
        }
    }
}

/// Result of a two-player game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    /// Game still in progress.
    None,
    /// The given seat completed a winning line.
    Player(Seat),
    /// Board full without a winner.
    Draw,
}

impl Winner {
    /// Whether the game is finished.
    #[inline]
    pub fn is_decided(self) -> bool {
        !matches!(self, Winner::None)
    }
}

/// Build the outcome mapping of a finished two-player game.
///
/// Returns `None` for a game still in progress.
///
/// # Example
/// ```
/// use engine_core::game_utils::{two_player_outcome, Seat, Winner};
///
/// let outcome = two_player_outcome(Winner::Player(Seat::First)).unwrap();
/// assert_eq!(outcome.score(Seat::First), Some(1.0));
/// assert_eq!(outcome.score(Seat::Second), Some(0.0));
///
/// let draw = two_player_outcome(Winner::Draw).unwrap();
/// assert_eq!(draw.score(Seat::Second), Some(0.5));
///
/// assert!(two_player_outcome(Winner::None).is_none());
/// ```
pub fn two_player_outcome(winner: Winner) -> Option<Outcome<Seat>> {
    match winner {
        Winner::None => None,
        Winner::Player(seat) => Some(
            Outcome::new()
                .with_score(seat, WIN_SCORE)
                .with_score(seat.opponent(), LOSS_SCORE),
        ),
        Winner::Draw => Some(
            Outcome::new()
                .with_score(Seat::First, DRAW_SCORE)
                .with_score(Seat::Second, DRAW_SCORE),
        ),
    }
}
