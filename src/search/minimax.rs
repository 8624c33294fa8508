//! Exhaustive minimax over the full game tree

use std::collections::HashMap;

use crate::{
    error::{Error, Result},
    game::{Board, GameResult, Player},
    ports::Agent,
};

/// Score a terminal board: +1 for an O win, -1 for an X win, 0 for a draw.
///
/// O is the maximizing side throughout the search module; X minimizes.
pub(crate) fn terminal_score(result: GameResult) -> Option<i32> {
    match result {
        GameResult::Win(Player::O) => Some(1),
        GameResult::Win(Player::X) => Some(-1),
        GameResult::Draw => Some(0),
        GameResult::InProgress => None,
    }
}

/// Exhaustive minimax agent.
///
/// Explores the complete game tree below each position and plays the
/// optimal move for whichever side is to move. Positions are memoized by
/// board key, so repeated positions reached through different move orders
/// are evaluated once. Ties are broken toward the lowest cell index.
#[derive(Debug, Default)]
pub struct MinimaxAgent {
    memo: HashMap<String, i32>,
}

impl MinimaxAgent {
    pub fn new() -> Self {
        Self {
            memo: HashMap::new(),
        }
    }

    /// Number of memoized positions, exposed for instrumentation
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    /// Game-theoretic value of `board` with both sides playing perfectly
    pub fn evaluate(&mut self, board: &Board) -> i32 {
        if let Some(score) = terminal_score(board.result()) {
            return score;
        }

        let key = board.key();
        if let Some(&score) = self.memo.get(&key) {
            return score;
        }

        let maximizing = board.to_move == Player::O;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        let mut board = *board;

        for position in board.legal_moves() {
            board.place(position);
            let score = self.evaluate(&board);
            board.unplace(position);

            if maximizing {
                best = best.max(score);
            } else {
                best = best.min(score);
            }
        }

        self.memo.insert(key, best);
        best
    }

    /// Best move for the side to move, ties broken toward the lowest index.
    ///
    /// Strict improvement over ascending positions keeps the first move
    /// that attains the optimal value.
    pub fn best_move(&mut self, board: &Board) -> Result<usize> {
        let legal_moves = board.legal_moves();
        if legal_moves.is_empty() {
            return Err(Error::NoValidMoves);
        }

        let maximizing = board.to_move == Player::O;
        let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
        let mut best_position = legal_moves[0];
        let mut board = *board;

        for position in legal_moves {
            board.place(position);
            let score = self.evaluate(&board);
            board.unplace(position);

            let improved = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if improved {
                best_score = score;
                best_position = position;
            }
        }

        Ok(best_position)
    }
}

impl Agent for MinimaxAgent {
    fn choose_move(&mut self, board: &Board) -> Result<usize> {
        self.best_move(board)
    }

    fn name(&self) -> &str {
        "Minimax"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
