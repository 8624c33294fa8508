//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lines;

/// A cell on the 3x3 board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    /// Parse a cell character. `=` is accepted for empty cells to stay
    /// compatible with the original board encoding.
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '=' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

/// Outcome of evaluating a board position.
///
/// Always derived from the cells via [`Board::result`]; never stored
/// separately, so it cannot go stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Win(Player),
    Draw,
    InProgress,
}

impl GameResult {
    /// Whether the game has been decided (win or draw).
    pub fn is_over(self) -> bool {
        !matches!(self, GameResult::InProgress)
    }
}

/// Complete board state including cells and whose turn it is.
///
/// The side to move is tracked explicitly rather than re-derived from piece
/// counts. `Copy` is cheap: 9 bytes of cells plus the player enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pub cells: [Cell; 9],
    pub to_move: Player,
}

impl Board {
    /// Create a new empty board with X to move
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; 9],
            to_move: Player::X,
        }
    }

    /// Create a board from a string of 9 cell characters.
    ///
    /// Whitespace is filtered out; `.`, `=` and space all denote an empty
    /// cell. The side to move is inferred from the piece counts (X moves
    /// first, so equal counts mean X's turn).
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 9 cell characters are present, a
    /// character is not a valid cell, or the piece counts are impossible.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() < 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().take(9).enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        let x_count = cells.iter().filter(|&&c| c == Cell::X).count();
        let o_count = cells.iter().filter(|&&c| c == Cell::O).count();
        let to_move = if x_count == o_count {
            Player::X
        } else if x_count == o_count + 1 {
            Player::O
        } else {
            return Err(crate::Error::InvalidPieceCounts { x_count, o_count });
        };

        Ok(Board { cells, to_move })
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is on the board and empty
    pub fn is_empty(&self, pos: usize) -> bool {
        pos < 9 && self.cells[pos] == Cell::Empty
    }

    /// Check if every cell is occupied
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Legal moves in this position: empty cell indices in ascending order.
    ///
    /// The ascending order is load-bearing: the search agents iterate it
    /// directly, so ties deterministically break to the lowest index. Empty
    /// on decided boards.
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.result().is_over() {
            return Vec::new();
        }
        self.empty_cells()
    }

    /// All empty cell indices in ascending order, ignoring terminal status.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Apply a move and return the resulting board.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`](crate::Error::GameOver) when the position
    /// is already decided (no move is legal on a decided board) and
    /// [`Error::InvalidMove`](crate::Error::InvalidMove) when the cell is out
    /// of range or occupied.
    #[must_use = "apply returns a new board; the original is unchanged"]
    pub fn apply(&self, pos: usize) -> Result<Board, crate::Error> {
        if self.result().is_over() {
            return Err(crate::Error::GameOver);
        }
        if !self.is_empty(pos) {
            return Err(crate::Error::InvalidMove { position: pos });
        }

        let mut next = *self;
        next.place(pos);
        Ok(next)
    }

    /// Speculatively play a move in place.
    ///
    /// Used by the search recursion together with [`unplace`](Self::unplace):
    /// every `place` on an exit path must be paired with an `unplace` so the
    /// board is restored to its pre-call value. The cell must be empty.
    pub fn place(&mut self, pos: usize) {
        debug_assert!(self.is_empty(pos), "place on occupied cell {pos}");
        self.cells[pos] = self.to_move.to_cell();
        self.to_move = self.to_move.opponent();
    }

    /// Undo a speculative [`place`](Self::place), restoring the cell to empty
    /// and handing the turn back.
    pub fn unplace(&mut self, pos: usize) {
        debug_assert!(self.cells[pos] != Cell::Empty, "unplace on empty cell {pos}");
        self.cells[pos] = Cell::Empty;
        self.to_move = self.to_move.opponent();
    }

    /// Check if a player has three in a row
    pub fn has_won(&self, player: Player) -> bool {
        lines::has_won(&self.cells, player)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        if self.has_won(Player::X) {
            Some(Player::X)
        } else if self.has_won(Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Evaluate the position: X win, then O win, then full-board draw, else
    /// still in progress. Recomputed on every call.
    pub fn result(&self) -> GameResult {
        if let Some(winner) = self.winner() {
            GameResult::Win(winner)
        } else if self.is_full() {
            GameResult::Draw
        } else {
            GameResult::InProgress
        }
    }

    /// Canonical state key: the raw 9-cell sequence as a string.
    ///
    /// Sufficient to disambiguate every reachable configuration (the side to
    /// move follows from the piece counts), and the key format used by the
    /// persisted Q-table.
    pub fn key(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
