//! Train command - train the Q-learning agent against an opponent

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use crate::{
    adapters::MsgPackRepository,
    game::Player,
    pipeline::{AgentKind, AgentOptions, MatchConfig, MatchRunner, ProgressObserver},
    ports::QTableRepository,
    q_learning::{
        DEFAULT_DISCOUNT_FACTOR, DEFAULT_EPSILON, DEFAULT_LEARNING_RATE, QLearningAgent, QTable,
    },
};

use super::parse_player_token;

#[derive(Parser, Debug)]
#[command(about = "Train the Q-learning agent")]
pub struct TrainArgs {
    /// Path where the Q-table is loaded from and saved to
    #[arg(long, short = 'q', default_value = "qtable.msgpack")]
    pub q_table: PathBuf,

    /// Number of training games
    #[arg(long, short = 'g', default_value_t = 10_000)]
    pub games: usize,

    /// Opponent to train against (minimax, alphabeta, mcts, random)
    #[arg(long, short = 'o', default_value = "random")]
    pub opponent: String,

    /// Exploration rate ε
    #[arg(long, default_value_t = DEFAULT_EPSILON)]
    pub epsilon: f64,

    /// Learning rate α (only used when starting a fresh table)
    #[arg(long, default_value_t = DEFAULT_LEARNING_RATE)]
    pub alpha: f64,

    /// Discount factor γ (only used when starting a fresh table)
    #[arg(long, default_value_t = DEFAULT_DISCOUNT_FACTOR)]
    pub gamma: f64,

    /// Which token the learner controls (`x` or `o`)
    #[arg(long, default_value = "x")]
    pub learner_player: String,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Export the match summary as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let learner_player = parse_player_token(&args.learner_player, "--learner-player")?;

    let opponent_kind: AgentKind = args
        .opponent
        .parse()
        .with_context(|| format!("invalid --opponent '{}'", args.opponent))?;
    if opponent_kind == AgentKind::Human {
        return Err(anyhow!(
            "Training against a human is not supported; use the play command instead"
        ));
    }

    // A table on disk keeps its stored hyperparameters; --alpha/--gamma only
    // apply to a fresh one.
    let repository = MsgPackRepository::new();
    let table = if args.q_table.exists() {
        println!("Loading Q-table from: {}", args.q_table.display());
        repository.load(&args.q_table)?
    } else {
        println!(
            "No Q-table at {}; starting fresh (alpha={}, gamma={})",
            args.q_table.display(),
            args.alpha,
            args.gamma
        );
        QTable::new(args.alpha, args.gamma)
    };

    let mut learner = QLearningAgent::new(table, args.epsilon);
    if let Some(seed) = args.seed {
        learner = learner.with_seed(seed);
    }

    let options = AgentOptions {
        seed: args.seed,
        ..AgentOptions::default()
    };
    let mut opponent = opponent_kind.build(&options);

    println!("\n=== Training Configuration ===");
    println!("Opponent: {}", opponent.name());
    println!("Learner plays as: {learner_player:?}");
    println!("Games: {}", args.games);
    println!("Epsilon: {}", args.epsilon);
    if let Some(seed) = args.seed {
        println!("Seed: {seed}");
    }

    let mut runner = MatchRunner::new(MatchConfig {
        num_games: args.games,
        seed: args.seed,
    });
    runner.add_observer(Box::new(ProgressObserver::new()));

    println!("\n=== Running Training ===");
    let summary = match learner_player {
        Player::X => runner.run(&mut learner, opponent.as_mut())?,
        Player::O => runner.run(opponent.as_mut(), &mut learner)?,
    };

    let (learner_wins, learner_win_rate, opponent_wins) = match learner_player {
        Player::X => (summary.first_wins, summary.first_win_rate, summary.second_wins),
        Player::O => (summary.second_wins, summary.second_win_rate, summary.first_wins),
    };

    println!("\n=== Training Results ===");
    println!("Total games: {}", summary.num_games);
    println!("Learner wins: {learner_wins} ({:.1}%)", learner_win_rate * 100.0);
    println!("Opponent wins: {opponent_wins}");
    println!("Draws: {} ({:.1}%)", summary.draws, summary.draw_rate * 100.0);

    let table = learner.into_q_table();
    println!("Learned state-action pairs: {}", table.len());
    repository.save(&table, &args.q_table)?;
    println!("✓ Q-table saved to: {}", args.q_table.display());

    if let Some(export_path) = &args.export {
        summary.save_json(export_path)?;
        println!("✓ Summary exported to: {}", export_path.display());
    }

    Ok(())
}
