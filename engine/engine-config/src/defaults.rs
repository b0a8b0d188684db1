//! Default configuration values loaded from config.defaults.toml.
//!
//! This module loads defaults from the shared TOML file at compile time,
//! so the documented defaults and the compiled ones cannot drift apart.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    mcts: MctsDefaults,
    arena: ArenaDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    data_dir: String,
    env_id: String,
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    num_iterations: u32,
    exploration: f64,
    max_rollout_depth: u32,
}

#[derive(Debug, Deserialize)]
struct ArenaDefaults {
    games: u32,
    opponent: String,
    opponent_iterations: u32,
    seed: u64,
    log_interval: u32,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn data_dir() -> &'static str {
    &DEFAULTS.common.data_dir
}
pub fn env_id() -> &'static str {
    &DEFAULTS.common.env_id
}
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// MCTS
pub fn num_iterations() -> u32 {
    DEFAULTS.mcts.num_iterations
}
pub fn exploration() -> f64 {
    DEFAULTS.mcts.exploration
}
pub fn max_rollout_depth() -> u32 {
    DEFAULTS.mcts.max_rollout_depth
}

// Arena
pub fn games() -> u32 {
    DEFAULTS.arena.games
}
pub fn opponent() -> &'static str {
    &DEFAULTS.arena.opponent
}
pub fn opponent_iterations() -> u32 {
    DEFAULTS.arena.opponent_iterations
}
pub fn seed() -> u64 {
    DEFAULTS.arena.seed
}
pub fn log_interval() -> u32 {
    DEFAULTS.arena.log_interval
}
