//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from subdirectory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by PLAYOUT_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var("PLAYOUT_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from PLAYOUT_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "PLAYOUT_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(path);
        }
    }

    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
///
/// Unreadable or malformed files fall back to the built-in defaults.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, u64, f64, etc.); unparseable values are ignored
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: PLAYOUT_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.env_id, "PLAYOUT_COMMON_ENV_ID");
    env_override!(config, common.data_dir, "PLAYOUT_COMMON_DATA_DIR");
    env_override!(config, common.log_level, "PLAYOUT_COMMON_LOG_LEVEL");

    // MCTS
    env_override!(
        config,
        mcts.num_iterations,
        "PLAYOUT_MCTS_NUM_ITERATIONS",
        parse
    );
    env_override!(config, mcts.exploration, "PLAYOUT_MCTS_EXPLORATION", parse);
    env_override!(
        config,
        mcts.max_rollout_depth,
        "PLAYOUT_MCTS_MAX_ROLLOUT_DEPTH",
        parse
    );

    // Arena
    env_override!(config, arena.games, "PLAYOUT_ARENA_GAMES", parse);
    env_override!(config, arena.opponent, "PLAYOUT_ARENA_OPPONENT");
    env_override!(
        config,
        arena.opponent_iterations,
        "PLAYOUT_ARENA_OPPONENT_ITERATIONS",
        parse
    );
    env_override!(config, arena.seed, "PLAYOUT_ARENA_SEED", parse);
    env_override!(
        config,
        arena.log_interval,
        "PLAYOUT_ARENA_LOG_INTERVAL",
        parse
    );

    config
}
