//! Arena statistics tracking and persistence.
//!
//! This module tracks the results of a match run:
//! - Wins, losses and draws from the MCTS bot's point of view
//! - Game lengths
//! - Time spent per MCTS decision
//!
//! Stats are written to a JSON file so runs can be compared afterwards.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Result of one game from the MCTS bot's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchResult {
    Win,
    Loss,
    Draw,
}

impl MatchResult {
    /// Classify a finished game by comparing both players' scores.
    pub fn from_scores(mcts_score: f64, opponent_score: f64) -> Self {
        if mcts_score > opponent_score {
            MatchResult::Win
        } else if mcts_score < opponent_score {
            MatchResult::Loss
        } else {
            MatchResult::Draw
        }
    }
}

/// Aggregated arena statistics.
#[derive(Debug)]
pub struct ArenaStats {
    /// Number of games completed
    games_played: u32,
    wins: u32,
    losses: u32,
    draws: u32,
    /// Wins in games where the MCTS bot moved first
    wins_as_first: u32,
    /// Sum of game lengths for average calculation
    total_moves: u64,
    /// MCTS stats: decisions made by the bot under test
    mcts_decisions: u64,
    /// MCTS stats: total search time (microseconds)
    mcts_search_us: u64,
    /// Start time for rate calculations
    start_time: Instant,
    /// Path to write stats file
    stats_path: String,
    /// Environment ID
    env_id: String,
    /// Opponent kind
    opponent: String,
}

/// Serializable stats for JSON output.
#[derive(Debug, Serialize, Deserialize)]
pub struct ArenaStatsSnapshot {
    pub env_id: String,
    pub opponent: String,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub wins_as_first: u32,
    pub win_rate: f64,
    pub avg_game_length: f64,
    pub mcts_decisions: u64,
    pub mcts_avg_decision_ms: f64,
    pub games_per_second: f64,
    pub runtime_seconds: f64,
    pub timestamp: u64,
}

impl ArenaStats {
    /// Create new stats tracker writing to `<data_dir>/arena_stats.json`.
    pub fn new(data_dir: &str, env_id: &str, opponent: &str) -> Self {
        let stats_path = format!("{}/arena_stats.json", data_dir);

        // Ensure data directory exists
        if let Err(e) = fs::create_dir_all(data_dir) {
            warn!("Failed to create data directory: {}", e);
        }

        Self {
            games_played: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            wins_as_first: 0,
            total_moves: 0,
            mcts_decisions: 0,
            mcts_search_us: 0,
            start_time: Instant::now(),
            stats_path,
            env_id: env_id.to_string(),
            opponent: opponent.to_string(),
        }
    }

    /// Record a completed game.
    pub fn record_game(&mut self, result: MatchResult, moves: u32, mcts_first: bool) {
        self.games_played += 1;
        self.total_moves += moves as u64;

        match result {
            MatchResult::Win => {
                self.wins += 1;
                if mcts_first {
                    self.wins_as_first += 1;
                }
            }
            MatchResult::Loss => self.losses += 1,
            MatchResult::Draw => self.draws += 1,
        }
    }

    /// Record the duration of one MCTS decision.
    pub fn record_decision(&mut self, elapsed: Duration) {
        self.mcts_decisions += 1;
        self.mcts_search_us += elapsed.as_micros() as u64;
    }

    /// Get a snapshot of current stats.
    pub fn snapshot(&self) -> ArenaStatsSnapshot {
        let games = self.games_played;
        let runtime = self.start_time.elapsed().as_secs_f64();

        let (win_rate, avg_game_length) = if games > 0 {
            (
                self.wins as f64 / games as f64,
                self.total_moves as f64 / games as f64,
            )
        } else {
            (0.0, 0.0)
        };

        let games_per_second = if runtime > 0.0 {
            games as f64 / runtime
        } else {
            0.0
        };

        let mcts_avg_decision_ms = if self.mcts_decisions > 0 {
            self.mcts_search_us as f64 / self.mcts_decisions as f64 / 1000.0
        } else {
            0.0
        };

        ArenaStatsSnapshot {
            env_id: self.env_id.clone(),
            opponent: self.opponent.clone(),
            games_played: games,
            wins: self.wins,
            losses: self.losses,
            draws: self.draws,
            wins_as_first: self.wins_as_first,
            win_rate,
            avg_game_length,
            mcts_decisions: self.mcts_decisions,
            mcts_avg_decision_ms,
            games_per_second,
            runtime_seconds: runtime,
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    /// Write stats to JSON file (atomic write-then-rename).
    pub fn write_stats(&self) {
        let snapshot = self.snapshot();

        let json = match serde_json::to_string_pretty(&snapshot) {
            Ok(j) => j,
            Err(e) => {
                warn!("Failed to serialize arena stats: {}", e);
                return;
            }
        };

        // Write to temp file then rename (atomic on most filesystems)
        let temp_path = format!("{}.tmp", self.stats_path);
        match fs::File::create(&temp_path) {
            Ok(mut file) => {
                if let Err(e) = file.write_all(json.as_bytes()) {
                    warn!("Failed to write arena stats: {}", e);
                    return;
                }
            }
            Err(e) => {
                warn!("Failed to create temp stats file: {}", e);
                return;
            }
        }

        if let Err(e) = fs::rename(&temp_path, &self.stats_path) {
            warn!("Failed to rename stats file: {}", e);
            let _ = fs::remove_file(&temp_path);
            return;
        }

        debug!("Wrote arena stats to {}", self.stats_path);
    }

    pub fn stats_path(&self) -> &str {
        &self.stats_path
    }
}
