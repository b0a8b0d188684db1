//! Random rollout (playout) simulation.
//!
//! A rollout finishes a game from some position by playing uniformly random
//! legal moves, and reports the final outcome. Rollouts work on their own
//! state copies and never touch the search tree.

use engine_core::{GameModel, Outcome};
use rand::Rng;
use rand_chacha::ChaCha20Rng;

use crate::search::SearchError;

/// Outcome of a single rollout.
#[derive(Debug, Clone, PartialEq)]
pub struct RolloutResult<P> {
    /// Score per player at the terminal state
    pub outcome: Outcome<P>,
    /// Number of moves played during the rollout
    pub depth: u32,
}

/// Random rollout policy that plays uniformly random moves to a terminal state.
#[derive(Debug, Clone)]
pub struct RandomRollout {
    /// Maximum rollout depth to prevent infinite games
    pub max_depth: u32,
}

impl Default for RandomRollout {
    fn default() -> Self {
        Self { max_depth: 10_000 }
    }
}

impl RandomRollout {
    pub fn new(max_depth: u32) -> Self {
        Self { max_depth }
    }

    /// Play random moves from `state` until the game ends.
    pub fn run<G: GameModel>(
        &self,
        model: &G,
        state: &G::State,
        rng: &mut ChaCha20Rng,
    ) -> Result<RolloutResult<G::Player>, SearchError> {
        let mut state = state.clone();
        let mut depth = 0u32;

        while !model.is_ended(&state) {
            if depth >= self.max_depth {
                return Err(SearchError::RolloutDepthExceeded(self.max_depth));
            }

            let legal = model.legal_actions(&state);
            if legal.is_empty() {
                return Err(SearchError::PreconditionViolation(
                    "no legal actions at a non-terminal state during rollout".into(),
                ));
            }

            let action = legal[rng.gen_range(0..legal.len())];
            state = model.next_state(&state, action)?;
            depth += 1;
        }

        Ok(RolloutResult {
            outcome: model.win_values(&state)?,
            depth,
        })
    }
}
