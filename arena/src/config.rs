//! Configuration for the arena
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use mcts::MctsConfig;
use once_cell::sync::Lazy;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

/// Games the arena knows how to build
pub const SUPPORTED_GAMES: &[&str] = &["tictactoe", "connect4"];

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_env_id() -> String {
    CENTRAL_CONFIG.common.env_id.clone()
}

fn default_games() -> u32 {
    CENTRAL_CONFIG.arena.games
}

fn default_opponent() -> String {
    CENTRAL_CONFIG.arena.opponent.clone()
}

fn default_num_iterations() -> u32 {
    CENTRAL_CONFIG.mcts.num_iterations
}

fn default_exploration() -> f64 {
    CENTRAL_CONFIG.mcts.exploration
}

fn default_max_rollout_depth() -> u32 {
    CENTRAL_CONFIG.mcts.max_rollout_depth
}

fn default_opponent_iterations() -> u32 {
    CENTRAL_CONFIG.arena.opponent_iterations
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.arena.seed
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_log_interval() -> u32 {
    CENTRAL_CONFIG.arena.log_interval
}

fn default_data_dir() -> String {
    CENTRAL_CONFIG.common.data_dir.clone()
}

/// Who the MCTS bot plays against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpponentKind {
    Random,
    Mcts,
}

impl FromStr for OpponentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "random" => Ok(OpponentKind::Random),
            "mcts" => Ok(OpponentKind::Mcts),
            other => Err(anyhow!(
                "invalid opponent '{}', expected random or mcts",
                other
            )),
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "arena")]
#[command(about = "Playout Arena - MCTS match runner")]
#[command(
    long_about = "Plays a series of games between an MCTS bot and an opponent,
alternating who moves first, and reports wins, losses and draws.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Game to play (tictactoe, connect4)
    #[arg(long, default_value_t = default_env_id())]
    pub env_id: String,

    /// Number of games to play
    #[arg(long, default_value_t = default_games())]
    pub games: u32,

    /// Opponent of the MCTS bot (random, mcts)
    #[arg(long, default_value_t = default_opponent())]
    pub opponent: String,

    /// MCTS iterations per decision
    #[arg(long, default_value_t = default_num_iterations())]
    pub num_iterations: u32,

    /// UCB1 exploration constant
    #[arg(long, default_value_t = default_exploration())]
    pub exploration: f64,

    /// Maximum moves in a single rollout
    #[arg(long, default_value_t = default_max_rollout_depth())]
    pub max_rollout_depth: u32,

    /// MCTS iterations per decision for an mcts opponent
    #[arg(long, default_value_t = default_opponent_iterations())]
    pub opponent_iterations: u32,

    /// Base seed for the whole run
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Log progress every N games (0 to disable)
    #[arg(long, default_value_t = default_log_interval())]
    pub log_interval: u32,

    /// Data directory for the stats snapshot
    #[arg(long, default_value_t = default_data_dir())]
    pub data_dir: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_GAMES.contains(&self.env_id.as_str()) {
            return Err(anyhow!(
                "unknown env_id '{}', expected one of {}",
                self.env_id,
                SUPPORTED_GAMES.join(", ")
            ));
        }

        if self.games == 0 {
            return Err(anyhow!("games must be greater than 0"));
        }

        if self.data_dir.is_empty() {
            return Err(anyhow!("data_dir cannot be empty"));
        }

        self.mcts_config()
            .validate()
            .map_err(|e| anyhow!("mcts: {}", e))?;

        if self.opponent_kind()? == OpponentKind::Mcts {
            self.opponent_mcts_config()
                .validate()
                .map_err(|e| anyhow!("opponent: {}", e))?;
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    pub fn opponent_kind(&self) -> Result<OpponentKind> {
        self.opponent.parse()
    }

    /// Search parameters of the bot under test.
    pub fn mcts_config(&self) -> MctsConfig {
        MctsConfig {
            num_iterations: self.num_iterations,
            exploration: self.exploration,
            seed: Some(self.seed),
            max_rollout_depth: self.max_rollout_depth,
        }
    }

    /// Search parameters of an mcts opponent; only the budget differs.
    pub fn opponent_mcts_config(&self) -> MctsConfig {
        self.mcts_config().with_iterations(self.opponent_iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            env_id: "tictactoe".into(),
            games: 10,
            opponent: "random".into(),
            num_iterations: 100,
            exploration: 2.0,
            max_rollout_depth: 1000,
            opponent_iterations: 50,
            seed: 42,
            log_level: "info".into(),
            log_interval: 5,
            data_dir: "../data".into(),
        }
    }

    #[test]
    fn validate_accepts_valid_configuration() {
        let cfg = base_config();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_unknown_game() {
        let mut cfg = base_config();
        cfg.env_id = "chess".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("unknown env_id"));
    }

    #[test]
    fn validate_rejects_zero_games() {
        let mut cfg = base_config();
        cfg.games = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("games"));
    }

    #[test]
    fn validate_rejects_unknown_opponent() {
        let mut cfg = base_config();
        cfg.opponent = "human".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("invalid opponent"));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut cfg = base_config();
        cfg.log_level = "nope".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("invalid log level"));
    }

    #[test]
    fn validate_rejects_bad_search_parameters() {
        let mut cfg = base_config();
        cfg.exploration = -1.0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().starts_with("mcts:"));

        let mut cfg = base_config();
        cfg.num_iterations = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_checks_opponent_budget_only_for_mcts_opponent() {
        let mut cfg = base_config();
        cfg.opponent_iterations = 0;
        assert!(cfg.validate().is_ok());

        cfg.opponent = "mcts".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().starts_with("opponent:"));
    }

    #[test]
    fn opponent_kind_parses() {
        let mut cfg = base_config();
        assert_eq!(cfg.opponent_kind().unwrap(), OpponentKind::Random);
        cfg.opponent = "mcts".into();
        assert_eq!(cfg.opponent_kind().unwrap(), OpponentKind::Mcts);
    }

    #[test]
    fn mcts_configs_share_parameters() {
        let cfg = base_config();
        let own = cfg.mcts_config();
        let opponent = cfg.opponent_mcts_config();

        assert_eq!(own.num_iterations, 100);
        assert_eq!(opponent.num_iterations, 50);
        assert_eq!(own.exploration, opponent.exploration);
        assert_eq!(own.max_rollout_depth, opponent.max_rollout_depth);
        assert_eq!(own.seed, Some(42));
    }
}
