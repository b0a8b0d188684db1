//! MCTS configuration parameters.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::search::SearchError;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Number of select/expand/rollout/backpropagate iterations per decision.
    pub num_iterations: u32,

    /// Exploration constant C in the UCB1 formula.
    /// Higher values encourage exploration, lower values favor exploitation.
    pub exploration: f64,

    /// Seed for the search RNG. None draws a seed from OS entropy.
    pub seed: Option<u64>,

    /// Maximum number of moves in a single rollout.
    pub max_rollout_depth: u32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_iterations: 1000,
            exploration: 2.0,
            seed: None,
            max_rollout_depth: 10_000,
        }
    }
}

impl MctsConfig {
    /// Create a fast, reproducible config for testing.
    pub fn for_testing() -> Self {
        Self {
            num_iterations: 50,
            exploration: 2.0,
            seed: Some(42),
            max_rollout_depth: 1000,
        }
    }

    /// Builder pattern: set number of iterations.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.num_iterations = n;
        self
    }

    /// Builder pattern: set exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder pattern: set rollout depth limit.
    pub fn with_max_rollout_depth(mut self, depth: u32) -> Self {
        self.max_rollout_depth = depth;
        self
    }

    /// Check that the search can run with these parameters.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.num_iterations == 0 {
            return Err(SearchError::InvalidConfig(
                "num_iterations must be positive".into(),
            ));
        }
        if !self.exploration.is_finite() || self.exploration <= 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "exploration must be positive and finite, got {}",
                self.exploration
            )));
        }
        if self.max_rollout_depth == 0 {
            return Err(SearchError::InvalidConfig(
                "max_rollout_depth must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Build the search RNG: seeded when `seed` is set, from entropy otherwise.
    pub fn make_rng(&self) -> ChaCha20Rng {
        match self.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        }
    }
}
