//! Arena - MCTS match runner for Playout
//!
//! A command-line process that:
//! 1. Loads configuration (CLI > env vars > config.toml > built-in defaults)
//! 2. Builds the requested game model
//! 3. Plays a series of games between an MCTS bot and an opponent
//! 4. Writes a stats snapshot to `<data_dir>/arena_stats.json`

use anyhow::{anyhow, Result};
use clap::Parser;
use games_connect4::Connect4;
use games_tictactoe::TicTacToe;
use tracing::{error, info};

mod arena;
mod bot;
mod config;
mod stats;

use crate::arena::Arena;
use crate::config::Config;
use crate::stats::ArenaStatsSnapshot;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn run(config: &Config) -> Result<ArenaStatsSnapshot> {
    match config.env_id.as_str() {
        "tictactoe" => Arena::new(TicTacToe::new(), config)?.run(),
        "connect4" => Arena::new(Connect4::new(), config)?.run(),
        other => Err(anyhow!("unsupported game '{}'", other)),
    }
}

fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Validate configuration
    config.validate()?;

    // Initialize tracing
    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    info!(
        games = config.games,
        opponent = %config.opponent,
        "Starting arena for environment {}",
        config.env_id
    );

    match run(&config) {
        Ok(snapshot) => {
            info!(
                games = snapshot.games_played,
                wins = snapshot.wins,
                losses = snapshot.losses,
                draws = snapshot.draws,
                win_rate = format!("{:.3}", snapshot.win_rate),
                avg_game_length = format!("{:.1}", snapshot.avg_game_length),
                avg_decision_ms = format!("{:.2}", snapshot.mcts_avg_decision_ms),
                runtime_seconds = format!("{:.1}", snapshot.runtime_seconds),
                "Arena completed successfully"
            );
            Ok(())
        }
        Err(e) => {
            error!("Arena failed: {}", e);
            Err(e)
        }
    }
}
