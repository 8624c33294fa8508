//! Play command - interactive game against a chosen agent

use std::{
    io::{self, BufReader},
    path::PathBuf,
};

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use crate::{
    adapters::MsgPackRepository,
    game::{Board, GameResult},
    pipeline::{AgentKind, AgentOptions, HumanAgent},
    ports::{Agent, QTableRepository},
    q_learning::{DEFAULT_EPSILON, QLearningAgent},
    search::DEFAULT_ITERATIONS,
};

use super::parse_player_token;

#[derive(Parser, Debug)]
#[command(about = "Play an interactive game against the engine")]
pub struct PlayArgs {
    /// Opponent strategy (minimax, alphabeta, mcts, qlearning, random)
    #[arg(long, short = 'o', default_value = "minimax")]
    pub opponent: String,

    /// Which token you control (`x` or `o`); X always moves first
    #[arg(long, default_value = "x")]
    pub player: String,

    /// Q-table file for a qlearning opponent; updated after the game
    #[arg(long, short = 'q', default_value = "qtable.msgpack")]
    pub q_table: PathBuf,

    /// Search budget for an mcts opponent
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    pub mcts_iterations: usize,

    /// Random seed for stochastic opponents
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let human_player = parse_player_token(&args.player, "--player")?;
    let opponent_kind: AgentKind = args
        .opponent
        .parse()
        .with_context(|| format!("invalid --opponent '{}'", args.opponent))?;
    if opponent_kind == AgentKind::Human {
        return Err(anyhow!("Pick a non-human opponent to play against"));
    }

    let mut human = HumanAgent::new(BufReader::new(io::stdin()), io::stdout());

    // Q-learning opponents are built concretely so the table can be
    // recovered and saved once the game is over.
    let repository = MsgPackRepository::new();
    let mut opponent: Box<dyn Agent> = if opponent_kind == AgentKind::QLearning {
        let table = repository.load_or_default(&args.q_table)?;
        let mut agent = QLearningAgent::new(table, DEFAULT_EPSILON);
        if let Some(seed) = args.seed {
            agent = agent.with_seed(seed);
        }
        Box::new(agent)
    } else {
        let options = AgentOptions {
            mcts_iterations: args.mcts_iterations,
            seed: args.seed,
            ..AgentOptions::default()
        };
        opponent_kind.build(&options)
    };

    println!(
        "You are {human_player:?}; {} plays {:?}. Cells are numbered 0-8, left to right, top to bottom.",
        opponent.name(),
        human_player.opponent()
    );

    let mut board = Board::new();
    while !board.result().is_over() {
        let position = if board.to_move == human_player {
            human.choose_move(&board)?
        } else {
            let position = opponent.choose_move(&board)?;
            println!("{} plays {position}.", opponent.name());
            position
        };
        board = board.apply(position)?;
    }

    println!("{board}");
    match board.result() {
        GameResult::Win(winner) if winner == human_player => println!("You win!"),
        GameResult::Win(winner) => println!("{winner:?} wins."),
        GameResult::Draw => println!("Draw."),
        GameResult::InProgress => {}
    }

    let result = board.result();
    human.game_finished(&board, result)?;
    opponent.game_finished(&board, result)?;

    if opponent_kind == AgentKind::QLearning
        && let Some(agent) = opponent.as_any().downcast_ref::<QLearningAgent>()
    {
        repository.save(agent.q_table(), &args.q_table)?;
        println!("✓ Q-table saved to: {}", args.q_table.display());
    }

    Ok(())
}
