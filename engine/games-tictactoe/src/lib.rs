//! TicTacToe game model for the Playout engine
//!
//! This crate provides a complete reference implementation of TicTacToe
//! demonstrating how to implement the `GameModel` trait consumed by the
//! search engine.
//!
//! # Board Layout
//!
//! ```text
//! [0][1][2]
//! [3][4][5]
//! [6][7][8]
//! ```
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{GameModel, Seat};
//! use games_tictactoe::TicTacToe;
//!
//! let game = TicTacToe::new();
//! let state = game.initial_state();
//! assert_eq!(game.legal_actions(&state).len(), 9);
//!
//! let state = game.next_state(&state, 4).unwrap();
//! assert_eq!(game.current_player(&state), Seat::Second);
//! ```

use std::fmt;

use engine_core::{two_player_outcome, GameError, GameModel, Outcome, Seat, Winner};

/// Number of cells on the board
pub const BOARD_SIZE: usize = 9;

/// Winning positions (rows, columns, diagonals)
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// TicTacToe action: the board position (0-8) to mark
pub type Action = u8;

/// TicTacToe game state
///
/// Represents the complete state of a TicTacToe game including the board,
/// the player to move, and winner information. States are small `Copy`
/// values; every move produces a new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    /// Board representation: 0=empty, 1=X (first seat), 2=O (second seat)
    board: [u8; BOARD_SIZE],
    /// Player to move. Keeps alternating after the game ends so that the
    /// player who made the final move is always `current_player.opponent()`.
    current_player: Seat,
    /// Game result so far
    winner: Winner,
}

impl State {
    /// Create a new initial game state
    pub fn new() -> Self {
        Self {
            board: [0; BOARD_SIZE],
            current_player: Seat::First, // X goes first
            winner: Winner::None,
        }
    }

    /// Build a position by playing `moves` from the empty board.
    pub fn from_moves(moves: &[Action]) -> Result<Self, GameError> {
        moves
            .iter()
            .try_fold(State::new(), |state, &position| state.make_move(position))
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.winner.is_decided()
    }

    /// Player to move
    pub fn current_player(&self) -> Seat {
        self.current_player
    }

    /// Game result so far
    pub fn winner(&self) -> Winner {
        self.winner
    }

    /// Owner of a cell, `None` if empty or out of range
    pub fn cell(&self, position: usize) -> Option<Seat> {
        self.board.get(position).and_then(|&c| Seat::from_marker(c))
    }

    /// Number of marks on the board
    pub fn moves_played(&self) -> usize {
        self.board.iter().filter(|&&cell| cell != 0).count()
    }

    /// Get legal moves (empty positions)
    pub fn legal_moves(&self) -> Vec<Action> {
        if self.is_done() {
            return Vec::new();
        }

        (0..BOARD_SIZE as u8)
            .filter(|&pos| self.board[pos as usize] == 0)
            .collect()
    }

    /// Make a move and return the new state
    pub fn make_move(&self, position: Action) -> Result<State, GameError> {
        if self.is_done() {
            return Err(GameError::TerminalState);
        }
        if position as usize >= BOARD_SIZE {
            return Err(GameError::IllegalAction(format!(
                "position {} is off the board",
                position
            )));
        }
        if self.board[position as usize] != 0 {
            return Err(GameError::IllegalAction(format!(
                "position {} is already taken",
                position
            )));
        }

        let mut new_state = *self;
        new_state.board[position as usize] = self.current_player.marker();
        new_state.winner = Self::check_winner(&new_state.board);
        new_state.current_player = self.current_player.opponent();

        Ok(new_state)
    }

    /// Check for winner on the board
    fn check_winner(board: &[u8; BOARD_SIZE]) -> Winner {
        for line in &LINES {
            let [a, b, c] = *line;
            if board[a] != 0 && board[a] == board[b] && board[b] == board[c] {
                if let Some(seat) = Seat::from_marker(board[a]) {
                    return Winner::Player(seat);
                }
            }
        }

        // Board full but no winner
        if board.iter().all(|&cell| cell != 0) {
            return Winner::Draw;
        }

        Winner::None
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            let cells: String = (0..3)
                .map(|col| match self.board[row * 3 + col] {
                    1 => 'X',
                    2 => 'O',
                    _ => '.',
                })
                .collect();
            if row < 2 {
                writeln!(f, "{}", cells)?;
            } else {
                write!(f, "{}", cells)?;
            }
        }
        Ok(())
    }
}

/// TicTacToe game model
#[derive(Debug, Clone, Copy, Default)]
pub struct TicTacToe;

impl TicTacToe {
    /// Create a new TicTacToe game
    pub fn new() -> Self {
        Self
    }
}

impl GameModel for TicTacToe {
    type State = State;
    type Action = Action;
    type Player = Seat;

    fn initial_state(&self) -> State {
        State::new()
    }

    fn legal_actions(&self, state: &State) -> Vec<Action> {
        state.legal_moves()
    }

    fn next_state(&self, state: &State, action: Action) -> Result<State, GameError> {
        state.make_move(action)
    }

    fn is_ended(&self, state: &State) -> bool {
        state.is_done()
    }

    fn win_values(&self, state: &State) -> Result<Outcome<Seat>, GameError> {
        two_player_outcome(state.winner).ok_or(GameError::NotTerminal)
    }

    fn current_player(&self, state: &State) -> Seat {
        state.current_player
    }

    /// On the empty board nobody has moved yet; the second seat is reported
    /// so that players keep alternating.
    fn previous_player(&self, state: &State) -> Seat {
        state.current_player.opponent()
    }
}
