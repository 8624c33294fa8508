//! Baseline agents: the uniform-random oracle and interactive human input

use std::io::{BufRead, Write};

use rand::{SeedableRng, random, rngs::StdRng, seq::IndexedRandom};

use crate::{
    error::{Error, Result},
    game::Board,
    ports::Agent,
};

/// Uniform-random baseline.
///
/// Every legal move is equally likely. Useful as a calibration opponent and
/// as the rollout policy made into a standalone player.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::seed_from_u64(random()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn choose_move(&mut self, board: &Board) -> Result<usize> {
        board
            .legal_moves()
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoValidMoves)
    }

    fn name(&self) -> &str {
        "Random"
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Interactive agent that reads moves from a reader and prompts on a writer.
///
/// Generic over the I/O handles so games can run against stdin/stdout in the
/// CLI and against in-memory buffers in tests. Invalid input (not a number,
/// out of range, occupied cell) is reported and re-prompted, never returned
/// as an error; only I/O failure or end of input aborts.
pub struct HumanAgent<R, W> {
    input: R,
    output: W,
    name: String,
}

impl<R: BufRead, W: Write> HumanAgent<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            name: "Human".to_string(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let bytes = self.input.read_line(&mut line).map_err(|source| Error::Io {
            operation: "read move from input".to_string(),
            source,
        })?;
        if bytes == 0 {
            return Err(Error::Io {
                operation: "read move from input".to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "input closed before a move was entered",
                ),
            });
        }
        Ok(line)
    }
}

impl<R: BufRead + Send, W: Write + Send> Agent for HumanAgent<R, W> {
    fn choose_move(&mut self, board: &Board) -> Result<usize> {
        if board.legal_moves().is_empty() {
            return Err(Error::NoValidMoves);
        }

        let io_err = |source| Error::Io {
            operation: "write prompt".to_string(),
            source,
        };

        writeln!(self.output, "{board}").map_err(io_err)?;
        loop {
            write!(self.output, "Enter your move (0-8): ").map_err(io_err)?;
            self.output.flush().map_err(io_err)?;

            let line = self.read_line()?;
            let position = match line.trim().parse::<usize>() {
                Ok(position) if position < 9 => position,
                _ => {
                    writeln!(self.output, "Please enter a number between 0 and 8.")
                        .map_err(io_err)?;
                    continue;
                }
            };

            if board.is_empty(position) {
                return Ok(position);
            }
            writeln!(self.output, "Cell {position} is already taken.").map_err(io_err)?;
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn std::any::Any
    where
        Self: 'static,
    {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_random_agent_plays_legal_moves() {
        let mut agent = RandomAgent::with_seed(5);
        let board = Board::from_string("XOXO.....").unwrap();
        for _ in 0..50 {
            let position = agent.choose_move(&board).unwrap();
            assert!(board.is_empty(position));
        }
    }

    #[test]
    fn test_random_agent_same_seed_same_sequence() {
        let board = Board::new();
        let mut a = RandomAgent::with_seed(9);
        let mut b = RandomAgent::with_seed(9);
        for _ in 0..10 {
            assert_eq!(
                a.choose_move(&board).unwrap(),
                b.choose_move(&board).unwrap()
            );
        }
    }

    #[test]
    fn test_random_agent_errors_on_finished_board() {
        let mut agent = RandomAgent::with_seed(5);
        let board = Board::from_string("XXXOO....").unwrap();
        assert!(matches!(
            agent.choose_move(&board),
            Err(Error::NoValidMoves)
        ));
    }

    #[test]
    fn test_human_agent_reads_move() {
        let input = Cursor::new("4\n");
        let mut output = Vec::new();
        let mut agent = HumanAgent::new(input, &mut output);

        let position = agent.choose_move(&Board::new()).unwrap();
        assert_eq!(position, 4);

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("Enter your move (0-8): "));
    }

    #[test]
    fn test_human_agent_reprompts_on_bad_input() {
        // Garbage, out of range, occupied cell, then a valid move
        let input = Cursor::new("banana\n12\n0\n5\n");
        let mut output = Vec::new();
        let board = Board::from_string("X........").unwrap();
        let mut agent = HumanAgent::new(input, &mut output);

        assert_eq!(agent.choose_move(&board).unwrap(), 5);

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("Please enter a number between 0 and 8."));
        assert!(transcript.contains("Cell 0 is already taken."));
    }

    #[test]
    fn test_human_agent_errors_on_closed_input() {
        let input = Cursor::new("");
        let mut output = Vec::new();
        let mut agent = HumanAgent::new(input, &mut output);
        assert!(agent.choose_move(&Board::new()).is_err());
    }
}
