//! Agent roster: parsing agent kinds and building agents from them

use std::{
    fmt,
    io::{self, BufReader},
    str::FromStr,
};

use crate::{
    error::Error,
    pipeline::baselines::{HumanAgent, RandomAgent},
    ports::Agent,
    q_learning::{QLearningAgent, QTable},
    search::{AlphaBetaAgent, DEFAULT_ITERATIONS, MctsAgent, MinimaxAgent},
};

/// The strategies a match participant can be built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Minimax,
    AlphaBeta,
    Mcts,
    QLearning,
    Random,
    Human,
}

impl FromStr for AgentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" => Ok(Self::Minimax),
            "alphabeta" | "alpha-beta" => Ok(Self::AlphaBeta),
            "mcts" => Ok(Self::Mcts),
            "qlearning" | "q-learning" => Ok(Self::QLearning),
            "random" => Ok(Self::Random),
            "human" => Ok(Self::Human),
            _ => Err(Error::ParseAgentKind {
                input: s.to_string(),
                expected: "minimax, alphabeta, mcts, qlearning, random or human".to_string(),
            }),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Minimax => "minimax",
            Self::AlphaBeta => "alphabeta",
            Self::Mcts => "mcts",
            Self::QLearning => "qlearning",
            Self::Random => "random",
            Self::Human => "human",
        };
        write!(f, "{name}")
    }
}

/// Knobs used when instantiating an agent from its kind.
///
/// Only the fields relevant to the kind are consulted; the rest are ignored.
#[derive(Debug, Clone)]
pub struct AgentOptions {
    /// Search budget for MCTS agents
    pub mcts_iterations: usize,
    /// Exploration rate for Q-learning agents
    pub epsilon: f64,
    /// Value table a Q-learning agent starts from
    pub q_table: QTable,
    /// Seed for stochastic agents
    pub seed: Option<u64>,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            mcts_iterations: DEFAULT_ITERATIONS,
            epsilon: crate::q_learning::DEFAULT_EPSILON,
            q_table: QTable::default(),
            seed: None,
        }
    }
}

impl AgentKind {
    /// Instantiate an agent of this kind.
    ///
    /// Human agents are wired to stdin/stdout; tests construct
    /// [`HumanAgent`] directly over in-memory buffers instead.
    pub fn build(&self, options: &AgentOptions) -> Box<dyn Agent> {
        match self {
            Self::Minimax => Box::new(MinimaxAgent::new()),
            Self::AlphaBeta => Box::new(AlphaBetaAgent::new()),
            Self::Mcts => {
                let agent = MctsAgent::new(options.mcts_iterations);
                Box::new(match options.seed {
                    Some(seed) => agent.with_seed(seed),
                    None => agent,
                })
            }
            Self::QLearning => {
                let agent = QLearningAgent::new(options.q_table.clone(), options.epsilon);
                Box::new(match options.seed {
                    Some(seed) => agent.with_seed(seed),
                    None => agent,
                })
            }
            Self::Random => Box::new(match options.seed {
                Some(seed) => RandomAgent::with_seed(seed),
                None => RandomAgent::new(),
            }),
            Self::Human => Box::new(HumanAgent::new(BufReader::new(io::stdin()), io::stdout())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_agent_kinds() {
        assert_eq!("minimax".parse::<AgentKind>().unwrap(), AgentKind::Minimax);
        assert_eq!(
            "alpha-beta".parse::<AgentKind>().unwrap(),
            AgentKind::AlphaBeta
        );
        assert_eq!("MCTS".parse::<AgentKind>().unwrap(), AgentKind::Mcts);
        assert_eq!(
            "qlearning".parse::<AgentKind>().unwrap(),
            AgentKind::QLearning
        );
        assert_eq!("random".parse::<AgentKind>().unwrap(), AgentKind::Random);
        assert_eq!("human".parse::<AgentKind>().unwrap(), AgentKind::Human);
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        assert!(matches!(
            "negamax".parse::<AgentKind>(),
            Err(Error::ParseAgentKind { .. })
        ));
    }

    #[test]
    fn test_display_roundtrip() {
        for kind in [
            AgentKind::Minimax,
            AgentKind::AlphaBeta,
            AgentKind::Mcts,
            AgentKind::QLearning,
            AgentKind::Random,
        ] {
            assert_eq!(kind.to_string().parse::<AgentKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_build_names() {
        let options = AgentOptions {
            seed: Some(1),
            ..AgentOptions::default()
        };
        assert_eq!(AgentKind::Minimax.build(&options).name(), "Minimax");
        assert_eq!(AgentKind::AlphaBeta.build(&options).name(), "Alpha-Beta");
        assert_eq!(AgentKind::Mcts.build(&options).name(), "MCTS");
        assert_eq!(AgentKind::QLearning.build(&options).name(), "Q-Learning");
        assert_eq!(AgentKind::Random.build(&options).name(), "Random");
    }
}
