//! Compare command - head-to-head match between two agents

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use crate::{
    adapters::MsgPackRepository,
    pipeline::{AgentKind, AgentOptions, MatchConfig, MatchRunner, ProgressObserver},
    ports::QTableRepository,
    q_learning::DEFAULT_EPSILON,
    search::DEFAULT_ITERATIONS,
};

#[derive(Parser, Debug)]
#[command(about = "Run a head-to-head match between two agents")]
pub struct CompareArgs {
    /// First agent; always plays X
    pub first: String,

    /// Second agent; always plays O
    pub second: String,

    /// Number of games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Q-table file for qlearning participants (read-only here)
    #[arg(long, short = 'q', default_value = "qtable.msgpack")]
    pub q_table: PathBuf,

    /// Search budget for mcts participants
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    pub mcts_iterations: usize,

    /// Exploration rate for qlearning participants
    #[arg(long, default_value_t = DEFAULT_EPSILON)]
    pub epsilon: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Export the match summary as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: CompareArgs) -> Result<()> {
    let first_kind: AgentKind = args
        .first
        .parse()
        .with_context(|| format!("invalid first agent '{}'", args.first))?;
    let second_kind: AgentKind = args
        .second
        .parse()
        .with_context(|| format!("invalid second agent '{}'", args.second))?;
    if first_kind == AgentKind::Human || second_kind == AgentKind::Human {
        return Err(anyhow!(
            "Human agents are for the play command; compare runs unattended"
        ));
    }

    let mut options = AgentOptions {
        mcts_iterations: args.mcts_iterations,
        epsilon: args.epsilon,
        seed: args.seed,
        ..AgentOptions::default()
    };
    if first_kind == AgentKind::QLearning || second_kind == AgentKind::QLearning {
        options.q_table = MsgPackRepository::new().load_or_default(&args.q_table)?;
    }

    let mut first = first_kind.build(&options);
    let mut second = second_kind.build(&options);

    println!("=== Match Configuration ===");
    println!("X: {}", first.name());
    println!("O: {}", second.name());
    println!("Games: {}", args.games);
    if let Some(seed) = args.seed {
        println!("Seed: {seed}");
    }

    let mut runner = MatchRunner::new(MatchConfig {
        num_games: args.games,
        seed: args.seed,
    });
    runner.add_observer(Box::new(ProgressObserver::new()));

    println!("\n=== Running Match ===");
    let summary = runner.run(first.as_mut(), second.as_mut())?;

    println!("\n=== Match Results ===");
    println!("Total games: {}", summary.num_games);
    println!(
        "{} (X): {} wins ({:.1}%)",
        summary.first_agent,
        summary.first_wins,
        summary.first_win_rate * 100.0
    );
    println!(
        "{} (O): {} wins ({:.1}%)",
        summary.second_agent,
        summary.second_wins,
        summary.second_win_rate * 100.0
    );
    println!("Draws: {} ({:.1}%)", summary.draws, summary.draw_rate * 100.0);

    if let Some(export_path) = &args.export {
        summary.save_json(export_path)?;
        println!("✓ Summary exported to: {}", export_path.display());
    }

    Ok(())
}
