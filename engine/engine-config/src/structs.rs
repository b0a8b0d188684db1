//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_data_dir() -> String {
    defaults::data_dir().into()
}
fn d_env_id() -> String {
    defaults::env_id().into()
}
fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_num_iterations() -> u32 {
    defaults::num_iterations()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_max_rollout_depth() -> u32 {
    defaults::max_rollout_depth()
}
fn d_games() -> u32 {
    defaults::games()
}
fn d_opponent() -> String {
    defaults::opponent().into()
}
fn d_opponent_iterations() -> u32 {
    defaults::opponent_iterations()
}
fn d_seed() -> u64 {
    defaults::seed()
}
fn d_log_interval() -> u32 {
    defaults::log_interval()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub mcts: MctsSection,
    #[serde(default)]
    pub arena: ArenaConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_data_dir")]
    pub data_dir: String,
    #[serde(default = "d_env_id")]
    pub env_id: String,
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            data_dir: defaults::data_dir().into(),
            env_id: defaults::env_id().into(),
            log_level: defaults::log_level().into(),
        }
    }
}

/// Search parameters of the `[mcts]` section.
///
/// Seeds are not configured here: callers derive them per decision.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsSection {
    #[serde(default = "d_num_iterations")]
    pub num_iterations: u32,
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    #[serde(default = "d_max_rollout_depth")]
    pub max_rollout_depth: u32,
}

impl Default for MctsSection {
    fn default() -> Self {
        Self {
            num_iterations: defaults::num_iterations(),
            exploration: defaults::exploration(),
            max_rollout_depth: defaults::max_rollout_depth(),
        }
    }
}

/// Match runner configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ArenaConfig {
    #[serde(default = "d_games")]
    pub games: u32,
    /// "random" or "mcts"
    #[serde(default = "d_opponent")]
    pub opponent: String,
    #[serde(default = "d_opponent_iterations")]
    pub opponent_iterations: u32,
    #[serde(default = "d_seed")]
    pub seed: u64,
    #[serde(default = "d_log_interval")]
    pub log_interval: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            games: defaults::games(),
            opponent: defaults::opponent().into(),
            opponent_iterations: defaults::opponent_iterations(),
            seed: defaults::seed(),
            log_interval: defaults::log_interval(),
        }
    }
}
