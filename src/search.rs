//! Game-tree search agents

pub mod alphabeta;
pub mod mcts;
pub mod minimax;

pub use alphabeta::AlphaBetaAgent;
pub use mcts::{DEFAULT_ITERATIONS, MctsAgent};
pub use minimax::MinimaxAgent;
