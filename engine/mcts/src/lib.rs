//! Monte Carlo Tree Search (MCTS) with random rollouts.
//!
//! This crate provides a game-agnostic MCTS implementation that works with any
//! game implementing the `engine-core` [`GameModel`](engine_core::GameModel)
//! trait. No learned policy or value model is involved: positions are
//! estimated purely by playing random games to the end.
//!
//! # Overview
//!
//! Each decision builds a fresh tree and runs a fixed number of iterations.
//! Each iteration consists of four phases:
//!
//! 1. **Selection**: Descend the tree with UCB1, scoring children from the
//!    point of view of the player to move at each node
//! 2. **Expansion**: Add a child for one randomly chosen untried action
//! 3. **Rollout**: Play uniformly random moves until the game ends
//! 4. **Backpropagation**: Add the searching player's score to every node on
//!    the path back to the root
//!
//! The chosen action is the root child with the best observed win ratio.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::GameModel;
//! use games_tictactoe::TicTacToe;
//! use mcts::{run_mcts, MctsConfig};
//!
//! let game = TicTacToe::new();
//! let config = MctsConfig::default().with_iterations(200).with_seed(42);
//!
//! let result = run_mcts(&game, config, game.initial_state()).unwrap();
//! println!("Best action: {}", result.action);
//! println!("Win rate: {:.3}", result.win_rate);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `num_iterations`: Number of iterations per decision (default: 1000)
//! - `exploration`: Exploration constant C for UCB1 (default: 2.0)
//! - `seed`: Optional RNG seed for reproducible searches
//! - `max_rollout_depth`: Guard against games that never end (default: 10000)

pub mod config;
pub mod node;
pub mod rollout;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::MctsConfig;
pub use node::{MctsNode, NodeId};
pub use rollout::{RandomRollout, RolloutResult};
pub use search::{run_mcts, MctsSearch, SearchError, SearchResult};
pub use tree::{ChildStats, MctsTree, TreeStats};
