//! Match runner: plays a series of games between the MCTS bot and an opponent.

use anyhow::Result;
use engine_core::GameModel;
use std::time::Instant;
use tracing::{debug, info};

use crate::bot::{Bot, MctsBot, RandomBot};
use crate::config::{Config, OpponentKind};
use crate::stats::{ArenaStats, ArenaStatsSnapshot, MatchResult};

/// Summary of one finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRecord {
    pub result: MatchResult,
    pub moves: u32,
    /// Whether the MCTS bot made the first move
    pub mcts_first: bool,
}

pub struct Arena<G: GameModel> {
    model: G,
    /// The bot under test
    mcts: MctsBot,
    opponent: Box<dyn Bot<G>>,
    stats: ArenaStats,
    games: u32,
    log_interval: u32,
}

impl<G: GameModel> Arena<G> {
    pub fn new(model: G, config: &Config) -> Result<Self> {
        // Each bot gets its own seed stream derived from the base seed
        let opponent: Box<dyn Bot<G>> = match config.opponent_kind()? {
            OpponentKind::Random => Box::new(RandomBot::with_seed(config.seed.wrapping_add(1))),
            OpponentKind::Mcts => Box::new(MctsBot::new(
                config.opponent_mcts_config(),
                config.seed.wrapping_add(2),
            )),
        };

        let stats = ArenaStats::new(&config.data_dir, &config.env_id, &config.opponent);

        info!(
            env_id = %config.env_id,
            opponent = opponent.name(),
            num_iterations = config.num_iterations,
            exploration = config.exploration,
            seed = config.seed,
            "Arena created, stats at {}",
            stats.stats_path()
        );

        Ok(Self {
            model,
            mcts: MctsBot::new(config.mcts_config(), config.seed),
            opponent,
            stats,
            games: config.games,
            log_interval: config.log_interval,
        })
    }

    /// Play all configured games and return the final stats.
    pub fn run(&mut self) -> Result<ArenaStatsSnapshot> {
        info!(
            games = self.games,
            opponent = self.opponent.name(),
            "Starting match"
        );

        for game_index in 0..self.games {
            let record = self.play_game(game_index)?;
            self.stats
                .record_game(record.result, record.moves, record.mcts_first);

            debug!(
                game = game_index + 1,
                result = ?record.result,
                moves = record.moves,
                mcts_first = record.mcts_first,
                "Game finished"
            );

            let played = game_index + 1;
            if self.log_interval > 0 && played % self.log_interval == 0 {
                let snapshot = self.stats.snapshot();
                info!(
                    games = played,
                    wins = snapshot.wins,
                    losses = snapshot.losses,
                    draws = snapshot.draws,
                    win_rate = format!("{:.3}", snapshot.win_rate),
                    avg_game_length = format!("{:.1}", snapshot.avg_game_length),
                    avg_decision_ms = format!("{:.2}", snapshot.mcts_avg_decision_ms),
                    "Arena progress"
                );
                self.stats.write_stats();
            }
        }

        self.stats.write_stats();
        Ok(self.stats.snapshot())
    }

    /// Play one game. The MCTS bot moves first in even-numbered games.
    pub fn play_game(&mut self, game_index: u32) -> Result<GameRecord> {
        let mcts_first = game_index % 2 == 0;
        let mut state = self.model.initial_state();
        let first_player = self.model.current_player(&state);
        let mut moves = 0u32;

        while !self.model.is_ended(&state) {
            let mcts_turn = (self.model.current_player(&state) == first_player) == mcts_first;

            let action = if mcts_turn {
                let start = Instant::now();
                let action = self.mcts.select_action(&self.model, &state)?;
                self.stats.record_decision(start.elapsed());
                action
            } else {
                self.opponent.select_action(&self.model, &state)?
            };

            state = self.model.next_state(&state, action)?;
            moves += 1;
        }

        let outcome = self.model.win_values(&state)?;
        let (mut mcts_score, mut opponent_score) = (0.0, 0.0);
        for &(player, score) in outcome.iter() {
            if (player == first_player) == mcts_first {
                mcts_score = score;
            } else {
                opponent_score = score;
            }
        }

        Ok(GameRecord {
            result: MatchResult::from_scores(mcts_score, opponent_score),
            moves,
            mcts_first,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_connect4::Connect4;
    use games_tictactoe::TicTacToe;
    use std::path::Path;
    use tempfile::tempdir;

    fn test_config(data_dir: &Path) -> Config {
        Config {
            env_id: "tictactoe".into(),
            games: 4,
            opponent: "random".into(),
            num_iterations: 50,
            exploration: 2.0,
            max_rollout_depth: 1000,
            opponent_iterations: 20,
            seed: 42,
            log_level: "info".into(),
            log_interval: 2,
            data_dir: data_dir.to_str().unwrap().into(),
        }
    }

    #[test]
    fn test_arena_runs_all_games() {
        let dir = tempdir().unwrap();
        let config = test_config(dir.path());
        let mut arena = Arena::new(TicTacToe::new(), &config).unwrap();

        let snapshot = arena.run().unwrap();

        assert_eq!(snapshot.games_played, 4);
        assert_eq!(snapshot.wins + snapshot.losses + snapshot.draws, 4);
        assert!(snapshot.mcts_decisions > 0);
        assert!(snapshot.avg_game_length >= 5.0 && snapshot.avg_game_length <= 9.0);

        let content = std::fs::read_to_string(dir.path().join("arena_stats.json")).unwrap();
        let parsed: ArenaStatsSnapshot = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.games_played, 4);
        assert_eq!(parsed.opponent, "random");
    }

    #[test]
    fn test_seats_alternate() {
        let dir = tempdir().unwrap();
        let config = test_config(dir.path());

        // MCTS moves first: it makes the odd-numbered moves
        let mut arena = Arena::new(TicTacToe::new(), &config).unwrap();
        let record = arena.play_game(0).unwrap();
        assert!(record.mcts_first);
        assert_eq!(arena.mcts.searches(), (record.moves + 1) / 2);

        // MCTS moves second: it makes the even-numbered moves
        let mut arena = Arena::new(TicTacToe::new(), &config).unwrap();
        let record = arena.play_game(1).unwrap();
        assert!(!record.mcts_first);
        assert_eq!(arena.mcts.searches(), record.moves / 2);
    }

    #[test]
    fn test_mcts_outplays_random() {
        let dir = tempdir().unwrap();
        let mut config = test_config(dir.path());
        config.games = 10;
        config.num_iterations = 300;

        let snapshot = Arena::new(TicTacToe::new(), &config)
            .unwrap()
            .run()
            .unwrap();

        assert!(snapshot.wins > snapshot.losses);
        assert!(snapshot.losses <= 2, "lost {} games", snapshot.losses);
    }

    #[test]
    fn test_runs_are_reproducible() {
        let dir = tempdir().unwrap();
        let config = test_config(dir.path());

        let a = Arena::new(TicTacToe::new(), &config)
            .unwrap()
            .run()
            .unwrap();
        let b = Arena::new(TicTacToe::new(), &config)
            .unwrap()
            .run()
            .unwrap();

        assert_eq!((a.wins, a.losses, a.draws), (b.wins, b.losses, b.draws));
        assert_eq!(a.avg_game_length, b.avg_game_length);
        assert_eq!(a.mcts_decisions, b.mcts_decisions);
    }

    #[test]
    fn test_connect4_against_mcts_opponent() {
        let dir = tempdir().unwrap();
        let mut config = test_config(dir.path());
        config.env_id = "connect4".into();
        config.opponent = "mcts".into();
        config.games = 2;
        config.num_iterations = 30;
        config.opponent_iterations = 10;

        let snapshot = Arena::new(Connect4::new(), &config)
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(snapshot.games_played, 2);
        assert_eq!(snapshot.opponent, "mcts");
        assert!(snapshot.avg_game_length >= 7.0 && snapshot.avg_game_length <= 42.0);
    }

    #[test]
    fn test_invalid_opponent_is_rejected() {
        let dir = tempdir().unwrap();
        let mut config = test_config(dir.path());
        config.opponent = "oracle".into();

        assert!(Arena::new(TicTacToe::new(), &config).is_err());
    }
}
