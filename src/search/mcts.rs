//! Monte Carlo tree search with UCT selection

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    error::{Error, Result},
    game::{Board, GameResult, Player},
    ports::Agent,
};

/// Default number of search iterations per decision
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Index into the search tree arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(usize);

#[derive(Debug)]
struct Node {
    board: Board,
    parent: Option<NodeId>,
    /// Move that led from the parent to this node
    move_from_parent: Option<usize>,
    children: Vec<NodeId>,
    /// Legal moves not yet expanded into children
    untried: Vec<usize>,
    visits: u64,
    /// Accumulated rollout reward (+1 per O win, -1 per X win)
    wins: f64,
}

/// Search tree backed by a flat arena; one tree is built per decision and
/// discarded afterwards.
#[derive(Debug)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn new(root_board: Board) -> Self {
        let root = Node {
            untried: root_board.legal_moves(),
            board: root_board,
            parent: None,
            move_from_parent: None,
            children: Vec::new(),
            visits: 0,
            wins: 0.0,
        };
        Self { nodes: vec![root] }
    }

    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn add_child(&mut self, parent: NodeId, position: usize, board: Board) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            untried: board.legal_moves(),
            board,
            parent: Some(parent),
            move_from_parent: Some(position),
            children: Vec::new(),
            visits: 0,
            wins: 0.0,
        });
        self.get_mut(parent).children.push(id);
        id
    }

    /// UCT score of a child: exploitation term plus exploration bonus
    fn uct_score(&self, child: NodeId, parent_visits: u64) -> f64 {
        let node = self.get(child);
        if node.visits == 0 {
            return f64::INFINITY;
        }
        let exploitation = node.wins / node.visits as f64;
        let exploration = (2.0 * (parent_visits as f64).ln() / node.visits as f64).sqrt();
        exploitation + exploration
    }

    /// Descend through fully expanded nodes by maximum UCT score
    fn select(&self, mut id: NodeId) -> NodeId {
        loop {
            let node = self.get(id);
            if !node.untried.is_empty() || node.children.is_empty() {
                return id;
            }
            let parent_visits = node.visits;
            let mut best = node.children[0];
            let mut best_score = self.uct_score(best, parent_visits);
            for &child in &node.children[1..] {
                let score = self.uct_score(child, parent_visits);
                if score > best_score {
                    best = child;
                    best_score = score;
                }
            }
            id = best;
        }
    }

    /// Add the visit and reward to the node and every ancestor
    fn backpropagate(&mut self, mut id: NodeId, reward: f64) {
        loop {
            let node = self.get_mut(id);
            node.visits += 1;
            node.wins += reward;
            match node.parent {
                Some(parent) => id = parent,
                None => return,
            }
        }
    }

    /// Robust child: the root move with the most visits, keeping the first
    /// child encountered on ties.
    fn best_root_move(&self) -> Option<usize> {
        let root = self.get(self.root());
        let mut best: Option<(u64, usize)> = None;
        for &child in &root.children {
            let node = self.get(child);
            let position = node.move_from_parent?;
            match best {
                Some((visits, _)) if node.visits <= visits => {}
                _ => best = Some((node.visits, position)),
            }
        }
        best.map(|(_, position)| position)
    }
}

/// Reward of a finished rollout, always from O's perspective
fn rollout_reward(result: GameResult) -> f64 {
    match result {
        GameResult::Win(Player::O) => 1.0,
        GameResult::Win(Player::X) => -1.0,
        GameResult::Draw | GameResult::InProgress => 0.0,
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Monte Carlo tree search agent.
///
/// Each decision runs a fixed budget of UCT iterations: select a leaf,
/// expand one untried move, play a uniform-random rollout to the end of the
/// game, and propagate the reward back up the path. The chosen move is the
/// most-visited root child.
#[derive(Debug)]
pub struct MctsAgent {
    iterations: usize,
    rng: StdRng,
}

impl MctsAgent {
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            rng: build_rng(None),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Uniform-random playout from `board` to a terminal position
    fn rollout(&mut self, mut board: Board) -> GameResult {
        loop {
            let result = board.result();
            if result.is_over() {
                return result;
            }
            let legal_moves = board.legal_moves();
            if let Some(&position) = legal_moves.choose(&mut self.rng) {
                board.place(position);
            } else {
                return result;
            }
        }
    }

    fn search(&mut self, root_board: Board) -> Option<usize> {
        let mut tree = Tree::new(root_board);

        for _ in 0..self.iterations {
            // Selection
            let mut id = tree.select(tree.root());

            // Expansion: one untried move, chosen uniformly at random
            let untried = &tree.get(id).untried;
            if !untried.is_empty() {
                let index = self.rng.random_range(0..untried.len());
                let position = tree.get_mut(id).untried.swap_remove(index);
                let mut board = tree.get(id).board;
                board.place(position);
                id = tree.add_child(id, position, board);
            }

            // Simulation and backpropagation
            let result = self.rollout(tree.get(id).board);
            tree.backpropagate(id, rollout_reward(result));
        }

        tree.best_root_move()
    }
}

impl Agent for MctsAgent {
    fn choose_move(&mut self, board: &Board) -> Result<usize> {
        if board.legal_moves().is_empty() {
            return Err(Error::NoValidMoves);
        }
        self.search(*board).ok_or(Error::NoValidMoves)
    }

    fn name(&self) -> &str {
        "MCTS"
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl Default for MctsAgent {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_legal_move() {
        let mut agent = MctsAgent::new(200).with_seed(1);
        let board = Board::from_string("XOX.O.X..").unwrap();
        let position = agent.choose_move(&board).unwrap();
        assert!(board.is_empty(position));
    }

    #[test]
    fn test_same_seed_same_decision() {
        let board = Board::from_string("X...O....").unwrap();
        let a = MctsAgent::new(500).with_seed(7).choose_move(&board).unwrap();
        let b = MctsAgent::new(500).with_seed(7).choose_move(&board).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_legal_move() {
        let mut agent = MctsAgent::new(50).with_seed(2);
        let board = Board::from_string("XOXOXO.XO").unwrap();
        assert_eq!(agent.choose_move(&board).unwrap(), 6);
    }

    #[test]
    fn test_errors_on_finished_board() {
        let mut agent = MctsAgent::new(50).with_seed(3);
        let board = Board::from_string("XXXOO....").unwrap();
        assert!(matches!(
            agent.choose_move(&board),
            Err(Error::NoValidMoves)
        ));
    }

    #[test]
    fn test_takes_immediate_win_as_maximizer() {
        // O to move with a win at 7; every rollout through it scores +1,
        // so the visit count concentrates there.
        let board = Board::from_string("XOXXO....").unwrap();
        let mut agent = MctsAgent::new(2000).with_seed(11);
        assert_eq!(agent.choose_move(&board).unwrap(), 7);
    }

    #[test]
    fn test_rollout_reward_values() {
        assert_eq!(rollout_reward(GameResult::Win(Player::O)), 1.0);
        assert_eq!(rollout_reward(GameResult::Win(Player::X)), -1.0);
        assert_eq!(rollout_reward(GameResult::Draw), 0.0);
    }
}
