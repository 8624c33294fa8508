//! Q-learning agent (off-policy TD control)

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    error::{Error, Result},
    game::{Board, GameResult},
    ports::Agent,
    q_learning::q_table::QTable,
};

/// Default exploration rate ε
pub const DEFAULT_EPSILON: f64 = 0.1;

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Tabular Q-learning agent with ε-greedy action selection.
///
/// Updates are deferred by one decision: the reward and successor for a
/// chosen move are only known once the opponent has replied, so each
/// `choose_move` first settles the previous state-action pair against the
/// board it now observes, then picks and remembers a new one. The terminal
/// update happens in `game_finished`.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    epsilon: f64,
    pending: Option<(Board, usize)>,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl QLearningAgent {
    pub fn new(q_table: QTable, epsilon: f64) -> Self {
        Self {
            q_table,
            epsilon,
            pending: None,
            rng: build_rng(None),
            rng_seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    /// Consume the agent and hand back its (updated) table for persistence
    pub fn into_q_table(self) -> QTable {
        self.q_table
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// ε-greedy action selection
    fn select_action_epsilon_greedy(&mut self, state: &str, legal_moves: &[usize]) -> usize {
        if self.rng.random::<f64>() < self.epsilon {
            // Explore: random action
            *legal_moves.choose(&mut self.rng).unwrap_or(&legal_moves[0])
        } else {
            // Exploit: greedy action, ties broken at random
            self.q_table
                .greedy_action(state, legal_moves, &mut self.rng)
                .unwrap_or(legal_moves[0])
        }
    }

    /// Reward from the point of view of the side the agent was playing
    /// when it took the pending action.
    fn reward_for(acting_player: crate::game::Player, result: GameResult) -> f64 {
        match result {
            GameResult::Win(winner) if winner == acting_player => 1.0,
            GameResult::Win(_) => -1.0,
            GameResult::Draw | GameResult::InProgress => 0.0,
        }
    }
}

impl Agent for QLearningAgent {
    fn choose_move(&mut self, board: &Board) -> Result<usize> {
        let legal_moves = board.legal_moves();
        if legal_moves.is_empty() {
            return Err(Error::NoValidMoves);
        }

        // The opponent has replied since our last move: settle the pending
        // pair against the board we now see. Intermediate reward is 0.
        if let Some((prev_board, prev_action)) = self.pending.take() {
            self.q_table.update(
                prev_board.key(),
                prev_action,
                0.0,
                &board.key(),
                &legal_moves,
                false,
            );
        }

        let state = board.key();
        let position = self.select_action_epsilon_greedy(&state, &legal_moves);
        self.pending = Some((*board, position));

        Ok(position)
    }

    fn game_finished(&mut self, _final_board: &Board, result: GameResult) -> Result<()> {
        // Terminal update for the last move we made this game. The
        // bootstrap term is zero: no further action follows.
        if let Some((prev_board, prev_action)) = self.pending.take() {
            let reward = Self::reward_for(prev_board.to_move, result);
            self.q_table
                .update(prev_board.key(), prev_action, reward, "", &[], true);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "Q-Learning"
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;

    fn greedy_agent() -> QLearningAgent {
        QLearningAgent::new(QTable::default(), 0.0).with_seed(42)
    }

    #[test]
    fn test_choose_move_is_legal() {
        let mut agent = QLearningAgent::new(QTable::default(), 0.5).with_seed(1);
        let board = Board::from_string("XOX......").unwrap();
        for _ in 0..20 {
            let position = agent.choose_move(&board).unwrap();
            assert!(board.is_empty(position));
        }
    }

    #[test]
    fn test_choose_move_errors_on_finished_board() {
        let mut agent = greedy_agent();
        let board = Board::from_string("XXXOO....").unwrap();
        assert!(matches!(
            agent.choose_move(&board),
            Err(Error::NoValidMoves)
        ));
    }

    #[test]
    fn test_greedy_follows_learned_values() {
        let mut agent = greedy_agent();
        let board = Board::new();
        let mut table = QTable::default();
        table.set(board.key(), 4, 10.0);
        agent.q_table = table;

        assert_eq!(agent.choose_move(&board).unwrap(), 4);
    }

    #[test]
    fn test_terminal_win_writes_positive_value() {
        let mut agent = greedy_agent();
        // X to move with a win on the table
        let board = Board::from_string("XX.OO....").unwrap();
        let state = board.key();

        let position = agent.choose_move(&board).unwrap();
        let final_board = board.apply(position).unwrap();
        agent
            .game_finished(&final_board, final_board.result())
            .unwrap();

        if final_board.result() == GameResult::Win(Player::X) {
            // Q(s,a) = 0 + 0.1 * (1 + 0 - 0) = 0.1
            assert!((agent.q_table().get(&state, position) - 0.1).abs() < 1e-12);
        } else {
            // Untrained table ties at random, so the agent may miss the win;
            // reporting a still-undecided result settles the pair at 0.
            assert_eq!(agent.q_table().get(&state, position), 0.0);
        }
    }

    #[test]
    fn test_terminal_loss_writes_negative_value() {
        let mut agent = greedy_agent();
        // The agent plays X, then the game ends with an O win; the pending
        // pair settles with reward -1.
        let board = Board::from_string("X..O.....").unwrap();
        let state = board.key();
        let position = agent.choose_move(&board).unwrap();
        let lost = Board::from_string("XX.OOOX..").unwrap();
        agent.game_finished(&lost, GameResult::Win(Player::O)).unwrap();

        assert!(agent.q_table().get(&state, position) < 0.0);
    }

    #[test]
    fn test_intermediate_update_bootstraps() {
        let mut agent = greedy_agent();
        let start = Board::new();
        let first = agent.choose_move(&start).unwrap();

        // Opponent replies; the next choose_move settles the pending pair
        // with reward 0 bootstrapped from the new state's best Q-value.
        let mut after_reply = start.apply(first).unwrap();
        let reply = after_reply.legal_moves()[0];
        after_reply = after_reply.apply(reply).unwrap();
        agent
            .q_table
            .set(after_reply.key(), after_reply.legal_moves()[0], 2.0);

        agent.choose_move(&after_reply).unwrap();

        // Q(s0,a0) = 0 + 0.1 * (0 + 0.9 * 2.0 - 0) = 0.18
        let updated = agent.q_table().get(&start.key(), first);
        assert!((updated - 0.18).abs() < 1e-12);
    }
}
