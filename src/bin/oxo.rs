//! oxo CLI - tic-tac-toe decision engine
//!
//! This CLI provides a unified interface for:
//! - Playing interactive games against any engine strategy
//! - Training the tabular Q-learning agent
//! - Comparing strategies head-to-head

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "oxo")]
#[command(version, about = "Tic-tac-toe decision engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game against the engine
    Play(oxo::cli::commands::play::PlayArgs),

    /// Train the Q-learning agent against an opponent
    Train(oxo::cli::commands::train::TrainArgs),

    /// Run a head-to-head match between two agents
    Compare(oxo::cli::commands::compare::CompareArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => oxo::cli::commands::play::execute(args),
        Commands::Train(args) => oxo::cli::commands::train::execute(args),
        Commands::Compare(args) => oxo::cli::commands::compare::execute(args),
    }
}
