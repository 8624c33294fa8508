//! Q-table persistence and end-to-end learning behavior.

use tempfile::TempDir;

use oxo::adapters::MsgPackRepository;
use oxo::pipeline::{MatchConfig, MatchRunner, RandomAgent};
use oxo::ports::QTableRepository;
use oxo::q_learning::{QLearningAgent, QTable};

#[test]
fn q_table_roundtrips_through_msgpack() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("table.msgpack");
    let repo = MsgPackRepository::new();

    let mut table = QTable::default();
    table.set(".........".to_string(), 4, 0.42);
    table.set("X...O....".to_string(), 2, -0.1);

    repo.save(&table, &path).unwrap();
    let loaded = repo.load(&path).unwrap();

    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.get(".........", 4), 0.42);
    assert_eq!(loaded.get("X...O....", 2), -0.1);
}

#[test]
fn missing_file_loads_as_empty_table() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("never_written.msgpack");

    let table = MsgPackRepository::new().load_or_default(&path).unwrap();
    assert!(table.is_empty());
}

#[test]
fn training_populates_the_table() {
    let mut learner = QLearningAgent::new(QTable::default(), 0.3).with_seed(5);
    let mut opponent = RandomAgent::with_seed(6);

    let mut runner = MatchRunner::new(MatchConfig {
        num_games: 200,
        seed: Some(11),
    });
    runner.run(&mut learner, &mut opponent).unwrap();

    let table = learner.into_q_table();
    assert!(
        table.len() > 50,
        "expected many state-action pairs after 200 games, got {}",
        table.len()
    );
}

#[test]
fn trained_table_survives_a_save_load_cycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("trained.msgpack");
    let repo = MsgPackRepository::new();

    let mut learner = QLearningAgent::new(QTable::default(), 0.3).with_seed(5);
    let mut opponent = RandomAgent::with_seed(6);
    let mut runner = MatchRunner::new(MatchConfig {
        num_games: 50,
        seed: Some(21),
    });
    runner.run(&mut learner, &mut opponent).unwrap();

    let table = learner.into_q_table();
    let size_before = table.len();
    repo.save(&table, &path).unwrap();

    let reloaded = repo.load_or_default(&path).unwrap();
    assert_eq!(reloaded.len(), size_before);

    // Resumed training keeps growing the same table
    let mut resumed = QLearningAgent::new(reloaded, 0.3).with_seed(50);
    let mut opponent = RandomAgent::with_seed(51);
    let mut runner = MatchRunner::new(MatchConfig {
        num_games: 50,
        seed: Some(22),
    });
    runner.run(&mut resumed, &mut opponent).unwrap();

    assert!(resumed.q_table().len() >= size_before);
}
