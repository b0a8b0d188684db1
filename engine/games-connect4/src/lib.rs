//! Connect 4 game model for the Playout engine
//!
//! Connect 4 is a two-player connection game where players drop colored discs
//! into a 7-column, 6-row vertically suspended grid. The objective is to be
//! the first to form a horizontal, vertical, or diagonal line of four discs.
//!
//! # Board Layout
//!
//! The board is stored in row-major order, with row 0 at the bottom:
//! ```text
//! Row 5: [35][36][37][38][39][40][41]  <- Top
//! Row 4: [28][29][30][31][32][33][34]
//! Row 3: [21][22][23][24][25][26][27]
//! Row 2: [14][15][16][17][18][19][20]
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Bottom
//!         Col 0  1  2  3  4  5  6
//! ```
//!
//! # Usage
//!
//! ```rust
//! use engine_core::GameModel;
//! use games_connect4::Connect4;
//!
//! let game = Connect4::new();
//! let state = game.next_state(&game.initial_state(), 3).unwrap();
//! assert_eq!(game.legal_actions(&state).len(), 7);
//! ```

use std::fmt;

use engine_core::{two_player_outcome, GameError, GameModel, Outcome, Seat, Winner};

/// Board dimensions
pub const COLS: usize = 7;
pub const ROWS: usize = 6;
pub const BOARD_SIZE: usize = COLS * ROWS; // 42

/// Connect4 action: the column (0-6) to drop a piece into
pub type Action = u8;

/// Connect4 game state
///
/// Represents the complete state of a Connect4 game including the board,
/// player to move, and winner information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    /// Board representation: 0=empty, 1=Red (first seat), 2=Yellow (second seat)
    /// Stored in row-major order with row 0 at the bottom
    board: [u8; BOARD_SIZE],
    /// Player to move; alternates on every drop, including the final one
    current_player: Seat,
    /// Game result so far
    winner: Winner,
    /// Height of each column (0-6 means number of pieces in column)
    column_heights: [u8; COLS],
}

impl State {
    /// Create a new initial game state
    pub fn new() -> Self {
        Self {
            board: [0; BOARD_SIZE],
            current_player: Seat::First, // Red goes first
            winner: Winner::None,
            column_heights: [0; COLS],
        }
    }

    /// Build a position by dropping pieces into `columns` from the empty board.
    pub fn from_moves(columns: &[Action]) -> Result<Self, GameError> {
        columns
            .iter()
            .try_fold(State::new(), |state, &col| state.drop_piece(col))
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

    /// Number of pieces on the board
    pub fn moves_played(&self) -> usize {
        self.column_heights.iter().map(|&h| h as usize).sum()
    }

    /// Get legal moves (columns that are not full)
    pub fn legal_moves(&self) -> Vec<Action> {
        if self.is_done() {
            return Vec::new();
        }

        (0..COLS as u8)
            .filter(|&col| self.column_heights[col as usize] < ROWS as u8)
            .collect()
    }

    /// Convert column and row to board index
    #[inline]
    fn pos(col: usize, row: usize) -> usize {
        row * COLS + col
    }

    /// Drop a piece in the given column and return the new state
    pub fn drop_piece(&self, column: Action) -> Result<State, GameError> {
        let col = column as usize;

        if self.is_done() {
            return Err(GameError::TerminalState);
        }
        if col >= COLS {
            return Err(GameError::IllegalAction(format!(
                "column {} is off the board",
                column
            )));
        }
        if self.column_heights[col] >= ROWS as u8 {
            return Err(GameError::IllegalAction(format!(
                "column {} is full",
                column
            )));
        }

        let mut new_state = self.clone();
        let row = self.column_heights[col] as usize;

        new_state.board[Self::pos(col, row)] = self.current_player.marker();
        new_state.column_heights[col] += 1;
        new_state.winner = new_state.check_winner_at(col, row);
        new_state.current_player = self.current_player.opponent();

        Ok(new_state)
    }

    /// Check if the piece at (col, row) creates a winning line
    fn check_winner_at(&self, col: usize, row: usize) -> Winner {
        let player = self.board[Self::pos(col, row)];

        if let Some(seat) = Seat::from_marker(player) {
            // Direction vectors: horizontal, vertical, diagonal /, diagonal \
            let directions: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

            for (dc, dr) in directions {
                let count = 1
                    + self.count_direction(col, row, dc, dr, player)
                    + self.count_direction(col, row, -dc, -dr, player);
                if count >= 4 {
                    return Winner::Player(seat);
                }
            }
        }

        // Board full but no winner
        if self.column_heights.iter().all(|&h| h >= ROWS as u8) {
            return Winner::Draw;
        }

        Winner::None
    }

    /// Count consecutive `player` pieces from (col, row), excluding the start
    fn count_direction(&self, col: usize, row: usize, dc: i32, dr: i32, player: u8) -> usize {
        let mut count = 0;
        let (mut c, mut r) = (col as i32 + dc, row as i32 + dr);
        while c >= 0 && c < COLS as i32 && r >= 0 && r < ROWS as i32 {
            if self.board[Self::pos(c as usize, r as usize)] != player {
                break;
            }
            count += 1;
            c += dc;
            r += dr;
        }
        count
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..ROWS).rev() {
            let cells: String = (0..COLS)
                .map(|col| match self.board[Self::pos(col, row)] {
                    1 => 'R',
                    2 => 'Y',
                    _ => '.',
                })
                .collect();
            if row > 0 {
                writeln!(f, "{}", cells)?;
            } else {
                write!(f, "{}", cells)?;
            }
        }
        Ok(())
    }
}

/// Connect4 game model
#[derive(Debug, Clone, Copy, Default)]
pub struct Connect4;

impl Connect4 {
    /// Create a new Connect4 game
    pub fn new() -> Self {
        Self
    }
}

impl GameModel for Connect4 {
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
        state.drop_piece(action)
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

    fn previous_player(&self, state: &State) -> Seat {
        state.current_player.opponent()
    }
}
