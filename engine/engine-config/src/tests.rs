//! Tests for the configuration module.

use super::*;
use std::io::Write;

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.env_id, "tictactoe");
    assert_eq!(config.common.data_dir, "./data");
    assert_eq!(config.common.log_level, "info");
    assert_eq!(config.mcts.num_iterations, 1000);
    assert_eq!(config.arena.games, 100);
    assert_eq!(config.arena.opponent, "random");
}

#[test]
fn test_mcts_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.mcts.num_iterations, 1000);
    assert!((config.mcts.exploration - 2.0).abs() < f64::EPSILON);
    assert_eq!(config.mcts.max_rollout_depth, 10_000);
}

#[test]
fn test_arena_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.arena.opponent_iterations, 200);
    assert_eq!(config.arena.seed, 42);
    assert_eq!(config.arena.log_interval, 10);
}

#[test]
fn test_playout_env_overrides() {
    std::env::set_var("PLAYOUT_COMMON_ENV_ID", "connect4");
    std::env::set_var("PLAYOUT_MCTS_EXPLORATION", "1.5");
    std::env::set_var("PLAYOUT_ARENA_GAMES", "7");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.common.env_id, "connect4");
    assert!((config.mcts.exploration - 1.5).abs() < f64::EPSILON);
    assert_eq!(config.arena.games, 7);

    std::env::remove_var("PLAYOUT_COMMON_ENV_ID");
    std::env::remove_var("PLAYOUT_MCTS_EXPLORATION");
    std::env::remove_var("PLAYOUT_ARENA_GAMES");
}

#[test]
fn test_unparseable_env_override_is_ignored() {
    std::env::set_var("PLAYOUT_MCTS_MAX_ROLLOUT_DEPTH", "lots");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.mcts.max_rollout_depth, 10_000);

    std::env::remove_var("PLAYOUT_MCTS_MAX_ROLLOUT_DEPTH");
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
[common]
env_id = "connect4"
data_dir = "/custom/data"

[mcts]
num_iterations = 5000
exploration = 1.4

[arena]
games = 20
opponent = "mcts"
opponent_iterations = 50
seed = 7
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.env_id, "connect4");
    assert_eq!(config.common.data_dir, "/custom/data");
    assert_eq!(config.mcts.num_iterations, 5000);
    assert!((config.mcts.exploration - 1.4).abs() < f64::EPSILON);
    assert_eq!(config.arena.games, 20);
    assert_eq!(config.arena.opponent, "mcts");
    assert_eq!(config.arena.opponent_iterations, 50);
    assert_eq!(config.arena.seed, 7);
}

#[test]
fn test_partial_config() {
    let toml_content = r#"
[common]
env_id = "connect4"
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.env_id, "connect4");
    assert_eq!(config.common.data_dir, "./data"); // Default
    assert_eq!(config.mcts.num_iterations, 1000); // Default
    assert_eq!(config.arena.log_interval, 10); // Default
}

#[test]
fn test_partial_section() {
    let toml_content = r#"
[mcts]
max_rollout_depth = 64
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.mcts.max_rollout_depth, 64);
    assert_eq!(config.mcts.num_iterations, 1000);
}

#[test]
fn test_load_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[arena]\nopponent_iterations = 321").unwrap();

    let config = load_from_path(file.path());
    assert_eq!(config.arena.opponent_iterations, 321);
    assert_eq!(config.arena.opponent, "random");
}

#[test]
fn test_load_from_invalid_path_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_from_path(&dir.path().join("missing.toml"));
    assert_eq!(config.arena.seed, 42);
}

#[test]
fn test_load_malformed_file_uses_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[mcts\nnum_iterations = ").unwrap();

    let config = load_from_path(file.path());
    assert_eq!(config.mcts.num_iterations, 1000);
}

#[test]
fn test_config_clone() {
    let config = CentralConfig::default();
    let cloned = config.clone();
    assert_eq!(config.common.env_id, cloned.common.env_id);
    assert_eq!(config.arena.games, cloned.arena.games);
}
