//! Observer port - instrumentation for match runs
//!
//! Observers allow composable data collection during a batch of games without
//! coupling the match loop to specific output formats.

use crate::{
    Result,
    game::{Board, GameResult},
};

/// Observer trait for monitoring a match run.
///
/// # Event Sequence
///
/// 1. `on_run_start(total_games)` - once at the beginning
/// 2. For each game:
///    - `on_game_start(game_num)`
///    - `on_move(...)` for each move in the game
///    - `on_game_end(game_num, result)`
/// 3. `on_run_end()` - once at the end
///
/// All methods default to no-ops, so observers implement only the events they
/// care about.
pub trait Observer: Send {
    /// Called once before the first game.
    fn on_run_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a game starts. `game_num` is 0-based.
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        Ok(())
    }

    /// Called for each move, after it has been selected but before it is
    /// applied. `board` is the state the move was chosen in.
    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _board: &Board,
        _move_pos: usize,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when a game reaches a terminal state.
    fn on_game_end(&mut self, _game_num: usize, _result: GameResult) -> Result<()> {
        Ok(())
    }

    /// Called once after the last game.
    fn on_run_end(&mut self) -> Result<()> {
        Ok(())
    }
}
