//! Tic-tac-toe decision engine
//!
//! This crate provides:
//! - Complete 3x3 tic-tac-toe game model with validation
//! - Search agents: exhaustive minimax, alpha-beta pruning and MCTS/UCT
//! - Tabular Q-learning agent with MessagePack persistence
//! - Match orchestrator for head-to-head runs with pluggable observers
//! - Uniform-random and interactive human baselines

pub mod adapters;
pub mod cli;
pub mod error;
pub mod game;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod search;

pub use error::{Error, Result};
pub use game::{Board, Cell, GameResult, Player};
