//! Match orchestrator: repeated games between two agents

use std::{fs::File, io::BufWriter, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    game::{Board, GameResult, Player},
    ports::{Agent, Observer},
};

/// Configuration for a match run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of independent games to play
    pub num_games: usize,
    /// Base seed for stochastic agents; each game derives its own offset so
    /// games differ while the whole run stays reproducible
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 100,
            seed: None,
        }
    }
}

/// Aggregated outcome of a match run.
///
/// "First" is the agent configured first, which always plays X; "second"
/// always plays O.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSummary {
    pub first_agent: String,
    pub second_agent: String,
    pub num_games: usize,
    pub first_wins: usize,
    pub second_wins: usize,
    pub draws: usize,
    pub first_win_rate: f64,
    pub second_win_rate: f64,
    pub draw_rate: f64,
}

impl MatchSummary {
    fn new(first_agent: String, second_agent: String) -> Self {
        Self {
            first_agent,
            second_agent,
            num_games: 0,
            first_wins: 0,
            second_wins: 0,
            draws: 0,
            first_win_rate: 0.0,
            second_win_rate: 0.0,
            draw_rate: 0.0,
        }
    }

    fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win(Player::X) => self.first_wins += 1,
            GameResult::Win(Player::O) => self.second_wins += 1,
            GameResult::Draw => self.draws += 1,
            GameResult::InProgress => {}
        }
        self.num_games += 1;
        self.first_win_rate = self.first_wins as f64 / self.num_games as f64;
        self.second_win_rate = self.second_wins as f64 / self.num_games as f64;
        self.draw_rate = self.draws as f64 / self.num_games as f64;
    }

    /// Write the summary as pretty-printed JSON
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Load a previously saved summary
    pub fn load_json(path: &Path) -> Result<MatchSummary> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;
        Ok(serde_json::from_reader(file)?)
    }
}

/// Drives repeated games between two agents and aggregates outcomes.
///
/// Observers are notified of run/game/move events; any observer error aborts
/// the run.
pub struct MatchRunner {
    config: MatchConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Register an observer for the run
    pub fn add_observer(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    /// Play the configured number of games. `first` always plays X,
    /// `second` always plays O.
    pub fn run(&mut self, first: &mut dyn Agent, second: &mut dyn Agent) -> Result<MatchSummary> {
        let mut summary = MatchSummary::new(first.name().to_string(), second.name().to_string());

        for observer in &mut self.observers {
            observer.on_run_start(self.config.num_games)?;
        }

        for game_num in 0..self.config.num_games {
            if let Some(seed) = self.config.seed {
                first.set_rng_seed(seed.wrapping_add(game_num as u64))?;
                second.set_rng_seed(
                    seed.wrapping_add(game_num as u64).wrapping_add(0x9e3779b9),
                )?;
            }

            for observer in &mut self.observers {
                observer.on_game_start(game_num)?;
            }

            let result = self.play_game(game_num, first, second)?;
            summary.record(result);

            for observer in &mut self.observers {
                observer.on_game_end(game_num, result)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_run_end()?;
        }

        Ok(summary)
    }

    fn play_game(
        &mut self,
        game_num: usize,
        first: &mut dyn Agent,
        second: &mut dyn Agent,
    ) -> Result<GameResult> {
        let mut board = Board::new();
        let mut step_num = 0;

        while !board.result().is_over() {
            let active: &mut dyn Agent = if board.to_move == Player::X {
                first
            } else {
                second
            };
            let position = active.choose_move(&board)?;

            for observer in &mut self.observers {
                observer.on_move(game_num, step_num, &board, position)?;
            }

            board = board.apply(position)?;
            step_num += 1;
        }

        let result = board.result();
        first.game_finished(&board, result)?;
        second.game_finished(&board, result)?;

        Ok(result)
    }
}
