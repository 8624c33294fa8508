//! Agent port - the move-selection capability shared by every strategy
//!
//! One interface covers all six strategies: human input, exhaustive minimax,
//! alpha-beta, MCTS, tabular Q-learning and the uniform-random oracle. The
//! match orchestrator only ever talks to this trait.

use crate::{
    Result,
    game::{Board, GameResult},
};

/// Unified interface for move-selecting strategies.
///
/// # Contract
///
/// `choose_move` is only called on in-progress boards with at least one legal
/// move. An agent receiving a terminal board reports
/// [`Error::NoValidMoves`](crate::Error::NoValidMoves); that is a caller bug,
/// not a recoverable game event.
pub trait Agent: Send {
    /// Select a move (0-8) for the given board.
    ///
    /// # Errors
    ///
    /// Returns an error if no legal move exists, or if acquiring a move from
    /// an external source (human input) fails.
    fn choose_move(&mut self, board: &Board) -> Result<usize>;

    /// Notify the agent that a game it played in has ended.
    ///
    /// Learning agents resolve their pending value update here; the final
    /// board and result carry the reward signal. Stateless agents use the
    /// default no-op.
    fn game_finished(&mut self, _final_board: &Board, _result: GameResult) -> Result<()> {
        Ok(())
    }

    /// The agent's display name, used in match reports.
    fn name(&self) -> &str;

    /// Seed the agent's internal random number generator.
    ///
    /// Match runs call this when supplied with a deterministic seed so
    /// stochastic agents become reproducible. Deterministic agents ignore it.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }

    /// Enable downcasting to concrete agent types (e.g. to persist a
    /// Q-learning agent's table after a run).
    fn as_any(&self) -> &dyn std::any::Any
    where
        Self: 'static;
}
