//! Match orchestration: runner, observers, baseline agents, agent roster

pub mod baselines;
pub mod match_runner;
pub mod observers;
pub mod roster;

pub use baselines::{HumanAgent, RandomAgent};
pub use match_runner::{MatchConfig, MatchRunner, MatchSummary};
pub use observers::{MetricsObserver, MetricsSummary, ProgressObserver};
pub use roster::{AgentKind, AgentOptions};
