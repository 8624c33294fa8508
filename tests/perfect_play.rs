//! Game-level properties of the board model and the search agents.

use oxo::game::{Board, GameResult, Player};
use oxo::pipeline::{MatchConfig, MatchRunner, RandomAgent};
use oxo::ports::Agent;
use oxo::search::{AlphaBetaAgent, MctsAgent, MinimaxAgent};

#[test]
fn winning_move_flips_has_won_exactly_at_the_move() {
    let board = Board::from_string("XX.OO....").unwrap();
    assert!(!board.has_won(Player::X));
    assert_eq!(board.result(), GameResult::InProgress);

    let after = board.apply(2).unwrap();
    assert!(after.has_won(Player::X));
    assert_eq!(after.result(), GameResult::Win(Player::X));
}

#[test]
fn full_board_without_a_line_is_a_draw() {
    let board = Board::from_string("XOXOXOOXO").unwrap();
    assert_eq!(board.result(), GameResult::Draw);
    assert!(board.legal_moves().is_empty());
}

#[test]
fn moves_on_decided_boards_are_rejected() {
    let board = Board::from_string("XXXOO....").unwrap();
    assert_eq!(board.result(), GameResult::Win(Player::X));
    assert!(board.legal_moves().is_empty());
    assert!(board.apply(5).is_err());
}

#[test]
fn optimal_self_play_draws() {
    let mut x_agent = MinimaxAgent::new();
    let o_agent = AlphaBetaAgent::new();

    let mut board = Board::new();
    while !board.result().is_over() {
        let position = if board.to_move == Player::X {
            x_agent.best_move(&board).unwrap()
        } else {
            o_agent.best_move(&board).unwrap()
        };
        board = board.apply(position).unwrap();
    }

    assert_eq!(board.result(), GameResult::Draw);
}

#[test]
fn minimax_as_second_never_loses_to_random() {
    let mut runner = MatchRunner::new(MatchConfig {
        num_games: 50,
        seed: Some(1234),
    });
    let mut first = RandomAgent::with_seed(0);
    let mut second = MinimaxAgent::new();

    let summary = runner.run(&mut first, &mut second).unwrap();
    assert_eq!(summary.first_wins, 0, "random beat minimax");
}

#[test]
fn mcts_decisions_are_legal_and_seed_stable() {
    let board = Board::from_string("X...O....").unwrap();
    let mut first_run = None;

    for _ in 0..3 {
        let mut agent = MctsAgent::new(1000).with_seed(99);
        let position = agent.choose_move(&board).unwrap();
        assert!(board.is_empty(position));
        match first_run {
            None => first_run = Some(position),
            Some(previous) => assert_eq!(position, previous),
        }
    }
}

#[test]
fn mcts_rarely_loses_to_random_as_second() {
    // MCTS plays O with its O-perspective reward signal; 1000 iterations is
    // plenty against uniform-random X on a 3x3 board.
    let mut runner = MatchRunner::new(MatchConfig {
        num_games: 20,
        seed: Some(777),
    });
    let mut first = RandomAgent::with_seed(0);
    let mut second = MctsAgent::new(1000);

    let summary = runner.run(&mut first, &mut second).unwrap();
    assert!(
        summary.first_wins <= 2,
        "random won {} of 20 games against MCTS",
        summary.first_wins
    );
}
