//! Move selection bots for the arena
//!
//! A bot picks an action for the player to move. The arena pits an MCTS bot
//! against an opponent, which is either a uniformly random bot or a second
//! MCTS bot with its own iteration budget.

use anyhow::{anyhow, Result};
use engine_core::GameModel;
use mcts::{run_mcts, MctsConfig, SearchResult};
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

/// Trait for move selection.
pub trait Bot<G: GameModel> {
    /// Short name used in logs and stats
    fn name(&self) -> &'static str;

    /// Select an action for the player to move at `state`
    fn select_action(&mut self, model: &G, state: &G::State) -> Result<G::Action>;
}

/// Bot that plays uniformly random legal moves.
#[derive(Debug)]
pub struct RandomBot {
    rng: ChaCha20Rng,
}

impl RandomBot {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl<G: GameModel> Bot<G> for RandomBot {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select_action(&mut self, model: &G, state: &G::State) -> Result<G::Action> {
        model
            .legal_actions(state)
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| anyhow!("no legal actions for the random bot"))
    }
}

/// Bot that runs a fresh MCTS search for every decision.
///
/// Each search gets its own seed drawn from a seed stream, so a whole match
/// is reproducible from the base seed while no two decisions share an RNG.
#[derive(Debug)]
pub struct MctsBot {
    /// MCTS configuration (the seed field is replaced per decision)
    config: MctsConfig,
    /// Source of per-decision seeds
    seeds: ChaCha20Rng,
    /// Number of searches run so far
    searches: u32,
}

impl MctsBot {
    pub fn new(config: MctsConfig, base_seed: u64) -> Self {
        Self {
            config,
            seeds: ChaCha20Rng::seed_from_u64(base_seed),
            searches: 0,
        }
    }

    /// Run one search and return the full result.
    pub fn search<G: GameModel>(
        &mut self,
        model: &G,
        state: &G::State,
    ) -> Result<SearchResult<G::Action>> {
        let seed: u64 = self.seeds.gen();
        let config = self.config.clone().with_seed(seed);

        let result = run_mcts(model, config, state.clone())?;
        self.searches += 1;

        debug!(
            search = self.searches,
            seed,
            action = ?result.action,
            win_rate = format!("{:.3}", result.win_rate),
            visits = result.visits,
            nodes = result.tree_stats.total_nodes,
            "MCTS search complete"
        );

        Ok(result)
    }

    pub fn searches(&self) -> u32 {
        self.searches
    }
}

impl<G: GameModel> Bot<G> for MctsBot {
    fn name(&self) -> &'static str {
        "mcts"
    }

    fn select_action(&mut self, model: &G, state: &G::State) -> Result<G::Action> {
        Ok(self.search(model, state)?.action)
    }
}
