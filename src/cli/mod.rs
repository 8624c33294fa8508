//! CLI infrastructure for the tic-tac-toe decision engine
//!
//! This module provides the command-line interface for playing against the
//! engine, training the Q-learning agent and comparing strategies.

pub mod commands;
