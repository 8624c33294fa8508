//! Minimax with alpha-beta pruning

use crate::{
    error::{Error, Result},
    game::{Board, Player},
    ports::Agent,
    search::minimax::terminal_score,
};

/// Alpha-beta pruning agent.
///
/// Move-for-move identical to [`MinimaxAgent`](crate::search::MinimaxAgent):
/// same scores, same lowest-index tie-break. The [alpha, beta] window only
/// skips subtrees that cannot change the result. No memoization here; a
/// value computed under a narrowed window is a bound, not the exact score,
/// and caching it would corrupt later lookups.
#[derive(Debug, Default)]
pub struct AlphaBetaAgent;

impl AlphaBetaAgent {
    pub fn new() -> Self {
        Self
    }

    /// Game-theoretic value of `board` with both sides playing perfectly.
    ///
    /// Searched with a full window, so the result is the exact score, not
    /// a bound.
    pub fn evaluate(&self, board: &Board) -> i32 {
        let mut board = *board;
        self.search(&mut board, i32::MIN, i32::MAX)
    }

    fn search(&self, board: &mut Board, mut alpha: i32, mut beta: i32) -> i32 {
        if let Some(score) = terminal_score(board.result()) {
            return score;
        }

        let maximizing = board.to_move == Player::O;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for position in board.legal_moves() {
            board.place(position);
            let score = self.search(board, alpha, beta);
            board.unplace(position);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if beta <= alpha {
                break;
            }
        }

        best
    }

    /// Best move for the side to move, ties broken toward the lowest index
    pub fn best_move(&self, board: &Board) -> Result<usize> {
        let legal_moves = board.legal_moves();
        if legal_moves.is_empty() {
            return Err(Error::NoValidMoves);
        }

        let maximizing = board.to_move == Player::O;
        let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
        let mut best_position = legal_moves[0];
        let mut board = *board;

        // Full window at the root: every child gets its exact score, so the
        // tie-break sees the same values minimax would.
        for position in legal_moves {
            board.place(position);
            let score = self.search(&mut board, i32::MIN, i32::MAX);
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

impl Agent for AlphaBetaAgent {
    fn choose_move(&mut self, board: &Board) -> Result<usize> {
        self.best_move(board)
    }

    fn name(&self) -> &str {
        "Alpha-Beta"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameResult;

    #[test]
    fn test_takes_immediate_win() {
        let agent = AlphaBetaAgent::new();
        let board = Board::from_string("XX.OO....").unwrap();
        assert_eq!(agent.best_move(&board).unwrap(), 2);
    }

    #[test]
    fn test_evaluate_exact_values() {
        let agent = AlphaBetaAgent::new();

        // Perfect play from the start is a draw
        assert_eq!(agent.evaluate(&Board::new()), 0);
        // X to move wins the top row
        assert_eq!(
            agent.evaluate(&Board::from_string("XX.OO....").unwrap()),
            -1
        );
        // Already-decided O win scores +1
        assert_eq!(
            agent.evaluate(&Board::from_string("XXOXO.O..").unwrap()),
            1
        );
    }

    #[test]
    fn test_blocks_opponent_win() {
        let agent = AlphaBetaAgent::new();
        let board = Board::from_string("XX..OX..O").unwrap();
        assert_eq!(agent.best_move(&board).unwrap(), 2);
    }

    #[test]
    fn test_lowest_index_tie_break() {
        let agent = AlphaBetaAgent::new();
        assert_eq!(agent.best_move(&Board::new()).unwrap(), 0);
    }

    #[test]
    fn test_errors_on_finished_board() {
        let agent = AlphaBetaAgent::new();
        let board = Board::from_string("XXXOO....").unwrap();
        assert!(matches!(
            agent.best_move(&board),
            Err(Error::NoValidMoves)
        ));
    }

    #[test]
    fn test_self_play_draws() {
        let agent = AlphaBetaAgent::new();
        let mut board = Board::new();
        while !board.result().is_over() {
            let position = agent.best_move(&board).unwrap();
            board = board.apply(position).unwrap();
        }
        assert_eq!(board.result(), GameResult::Draw);
    }
}
