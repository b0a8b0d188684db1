//! Game Model contract consumed by the search engine.
//!
//! The search never interprets game rules itself. Everything it needs to
//! know about a game (which actions are playable, what state an action
//! produces, whether the game is over and who won) is asked through the
//! [`GameModel`] trait. States are treated as immutable values: every
//! transition returns a fresh state and never mutates its input.

use std::fmt::Debug;

use thiserror::Error;

/// Errors raised by a game model when one of its preconditions is violated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("Cannot apply an action to a terminal state")]
    TerminalState,

    #[error("Illegal action: {0}")]
    IllegalAction(String),

    #[error("Outcome requested for a state that has not ended")]
    NotTerminal,
}

/// Final scores of a finished game, one entry per player.
///
/// Conventionally a win is `1.0`, a draw `0.5` and a loss `0.0`, but the
/// search treats the values opaquely and only looks up the score of the
/// player it searches for.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<P> {
    scores: Vec<(P, f64)>,
}

impl<P: Copy + PartialEq> Outcome<P> {
    /// Create an empty outcome.
    pub fn new() -> Self {
        Self { scores: Vec::new() }
    }

    /// Builder pattern: set the score of `player`, replacing any previous entry.
    pub fn with_score(mut self, player: P, score: f64) -> Self {
        self.set_score(player, score);
        self
    }

    /// Set the score of `player`, replacing any previous entry.
    pub fn set_score(&mut self, player: P, score: f64) {
        match self.scores.iter_mut().find(|(p, _)| *p == player) {
            Some(entry) => entry.1 = score,
            None => self.scores.push((player, score)),
        }
    }

    /// Score of `player`, if the outcome mentions them.
    pub fn score(&self, player: P) -> Option<f64> {
        self.scores
            .iter()
            .find(|(p, _)| *p == player)
            .map(|(_, score)| *score)
    }

    /// Iterate over `(player, score)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = &(P, f64)> {
        self.scores.iter()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl<P: Copy + PartialEq> Default for Outcome<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Rules of a deterministic, perfect-information, turn-based game.
///
/// # Contract
///
/// * `legal_actions` returns a duplicate-free list in a deterministic order
///   and is empty only when `is_ended` is true. Calling it twice on the same
///   state returns the same list.
/// * `next_state` is pure. It fails with [`GameError::TerminalState`] on a
///   finished game rather than inventing a successor.
/// * `win_values` is only defined once `is_ended` is true.
///
/// # Example
///
/// ```rust
/// use engine_core::{GameError, GameModel, Outcome, Seat};
///
/// /// Players alternately take one or two stones; whoever takes the last wins.
/// #[derive(Debug)]
/// struct Nim;
///
/// impl GameModel for Nim {
///     type State = (u8, Seat);
///     type Action = u8;
///     type Player = Seat;
///
///     fn initial_state(&self) -> Self::State {
///         (5, Seat::First)
///     }
///     fn legal_actions(&self, state: &Self::State) -> Vec<u8> {
///         (1..=2).filter(|take| *take <= state.0).collect()
///     }
///     fn next_state(&self, state: &Self::State, take: u8) -> Result<Self::State, GameError> {
///         if self.is_ended(state) {
///             return Err(GameError::TerminalState);
///         }
///         Ok((state.0 - take, state.1.opponent()))
///     }
///     fn is_ended(&self, state: &Self::State) -> bool {
///         state.0 == 0
///     }
///     fn win_values(&self, state: &Self::State) -> Result<Outcome<Seat>, GameError> {
///         if !self.is_ended(state) {
///             return Err(GameError::NotTerminal);
///         }
///         let winner = state.1.opponent();
///         Ok(Outcome::new().with_score(winner, 1.0).with_score(state.1, 0.0))
///     }
///     fn current_player(&self, state: &Self::State) -> Seat {
///         state.1
///     }
///     fn previous_player(&self, state: &Self::State) -> Seat {
///         state.1.opponent()
///     }
/// }
///
/// let nim = Nim;
/// let state = nim.next_state(&nim.initial_state(), 2).unwrap();
/// assert_eq!(state, (3, Seat::Second));
/// ```
pub trait GameModel: Debug {
    /// Immutable game position.
    type State: Clone + Debug;

    /// A move. Small and cheap to copy.
    type Action: Copy + PartialEq + Debug;

    /// Player identity used for outcome lookup and perspective.
    type Player: Copy + PartialEq + Debug;

    /// Starting position of a new game.
    fn initial_state(&self) -> Self::State;

    /// All actions playable from `state`.
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// State reached by playing `action` from `state`.
    fn next_state(
        &self,
        state: &Self::State,
        action: Self::Action,
    ) -> Result<Self::State, GameError>;

    /// Whether the game is over at `state`.
    fn is_ended(&self, state: &Self::State) -> bool;

    /// Scores of every player at a terminal `state`.
    fn win_values(&self, state: &Self::State) -> Result<Outcome<Self::Player>, GameError>;

    /// Player whose turn it is at `state`.
    fn current_player(&self, state: &Self::State) -> Self::Player;

    /// Player who moved into `state`.
    fn previous_player(&self, state: &Self::State) -> Self::Player;
}
