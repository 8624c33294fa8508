//! Tabular Q-learning: value table and ε-greedy agent

pub mod agent;
pub mod q_table;

pub use agent::{DEFAULT_EPSILON, QLearningAgent};
pub use q_table::{DEFAULT_DISCOUNT_FACTOR, DEFAULT_LEARNING_RATE, QTable};
