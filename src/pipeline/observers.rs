//! Observer implementations for match runs
//!
//! Observers allow composable data collection during a batch of games
//! without coupling the match loop to specific output formats.

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    game::{Board, GameResult, Player},
    ports::Observer,
};

/// Progress bar observer - shows match progress on the terminal
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    first_wins: usize,
    second_wins: usize,
    draws: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            first_wins: 0,
            second_wins: 0,
            draws: 0,
        }
    }

    fn message(&self) -> String {
        format!("{} D:{} L:{}", self.first_wins, self.draws, self.second_wins)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_run_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (W:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, result: GameResult) -> Result<()> {
        match result {
            GameResult::Win(Player::X) => self.first_wins += 1,
            GameResult::Win(Player::O) => self.second_wins += 1,
            GameResult::Draw => self.draws += 1,
            GameResult::InProgress => {}
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - tracks outcome counts and game lengths
pub struct MetricsObserver {
    first_wins: usize,
    second_wins: usize,
    draws: usize,
    total_games: usize,
    move_counts: Vec<usize>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            first_wins: 0,
            second_wins: 0,
            draws: 0,
            total_games: 0,
            move_counts: Vec::new(),
        }
    }

    /// Win rate of the first-configured agent (X)
    pub fn first_win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.first_wins as f64 / self.total_games as f64
        }
    }

    /// Win rate of the second-configured agent (O)
    pub fn second_win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.second_wins as f64 / self.total_games as f64
        }
    }

    /// Fraction of games ending in a draw
    pub fn draw_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.draws as f64 / self.total_games as f64
        }
    }

    /// Average number of moves per game
    pub fn avg_game_length(&self) -> f64 {
        if self.move_counts.is_empty() {
            0.0
        } else {
            self.move_counts.iter().sum::<usize>() as f64 / self.move_counts.len() as f64
        }
    }

    /// Get a metrics snapshot
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.total_games,
            first_wins: self.first_wins,
            second_wins: self.second_wins,
            draws: self.draws,
            first_win_rate: self.first_win_rate(),
            second_win_rate: self.second_win_rate(),
            draw_rate: self.draw_rate(),
            avg_game_length: self.avg_game_length(),
        }
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of match metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub first_wins: usize,
    pub second_wins: usize,
    pub draws: usize,
    pub first_win_rate: f64,
    pub second_win_rate: f64,
    pub draw_rate: f64,
    pub avg_game_length: f64,
}

impl Observer for MetricsObserver {
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        self.move_counts.push(0);
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _board: &Board,
        _move_pos: usize,
    ) -> Result<()> {
        if let Some(last) = self.move_counts.last_mut() {
            *last += 1;
        }
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, result: GameResult) -> Result<()> {
        self.total_games += 1;
        match result {
            GameResult::Win(Player::X) => self.first_wins += 1,
            GameResult::Win(Player::O) => self.second_wins += 1,
            GameResult::Draw => self.draws += 1,
            GameResult::InProgress => {}
        }
        Ok(())
    }
}
