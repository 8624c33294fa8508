//! Game model: board state, move legality and terminal evaluation

pub mod board;
pub mod lines;

pub use board::{Board, Cell, GameResult, Player};
