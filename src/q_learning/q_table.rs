//! Tabular state-action value function

use std::collections::HashMap;

use rand::{Rng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

/// Default learning rate α
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
/// Default discount factor γ
pub const DEFAULT_DISCOUNT_FACTOR: f64 = 0.9;

/// Q-table mapping (state-key, action) pairs to value estimates.
///
/// State keys are the raw 9-cell board strings produced by
/// [`Board::key`](crate::game::Board::key). Unseen pairs read as 0.0;
/// entries are only ever added or updated, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QTable {
    /// (state_key, action_position) -> Q-value
    q_values: HashMap<(String, usize), f64>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl QTable {
    /// Create an empty Q-table with explicit hyperparameters
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            q_values: HashMap::new(),
            learning_rate,
            discount_factor,
        }
    }

    /// Get the Q-value for a state-action pair (0.0 for unseen pairs)
    pub fn get(&self, state: &str, action: usize) -> f64 {
        *self
            .q_values
            .get(&(state.to_string(), action))
            .unwrap_or(&0.0)
    }

    /// Set the Q-value for a state-action pair
    pub fn set(&mut self, state: String, action: usize, value: f64) {
        self.q_values.insert((state, action), value);
    }

    /// Maximum Q-value over the given legal actions, 0.0 if none are legal
    /// (terminal successor state).
    pub fn max_q(&self, state: &str, legal_actions: &[usize]) -> f64 {
        legal_actions
            .iter()
            .map(|&action| self.get(state, action))
            .fold(None, |best: Option<f64>, q| {
                Some(best.map_or(q, |b| b.max(q)))
            })
            .unwrap_or(0.0)
    }

    /// Greedy action: the legal move with the highest Q-value, ties broken
    /// uniformly at random among the maximizers.
    ///
    /// The random tie-break is intentional and differs from the search
    /// agents' lowest-index rule: an untrained table is all zeros, and a
    /// deterministic tie-break would collapse exploration onto cell 0.
    pub fn greedy_action<R: Rng>(
        &self,
        state: &str,
        legal_actions: &[usize],
        rng: &mut R,
    ) -> Option<usize> {
        let max_q = legal_actions
            .iter()
            .map(|&action| self.get(state, action))
            .fold(f64::NEG_INFINITY, f64::max);
        let maximizers: Vec<usize> = legal_actions
            .iter()
            .copied()
            .filter(|&action| self.get(state, action) == max_q)
            .collect();
        maximizers.choose(rng).copied()
    }

    /// One-step Q-learning update (off-policy TD control):
    ///
    /// Q(s,a) ← Q(s,a) + α·(r + γ·max_a' Q(s',a') − Q(s,a))
    ///
    /// `next_legal_actions` must be the moves still legal in `next_state`;
    /// the bootstrap term is 0.0 when the transition was terminal.
    pub fn update(
        &mut self,
        state: String,
        action: usize,
        reward: f64,
        next_state: &str,
        next_legal_actions: &[usize],
        done: bool,
    ) {
        let current_q = self.get(&state, action);
        let max_next_q = if done || next_legal_actions.is_empty() {
            0.0
        } else {
            self.max_q(next_state, next_legal_actions)
        };
        let td_target = reward + self.discount_factor * max_next_q;
        let new_q = current_q + self.learning_rate * (td_target - current_q);
        self.set(state, action, new_q);
    }

    /// Number of state-action pairs stored
    pub fn len(&self) -> usize {
        self.q_values.len()
    }

    /// Whether the table has no entries yet
    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }
}

impl Default for QTable {
    fn default() -> Self {
        Self::new(DEFAULT_LEARNING_RATE, DEFAULT_DISCOUNT_FACTOR)
    }
}
