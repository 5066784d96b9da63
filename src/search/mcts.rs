//! Monte Carlo tree search with UCB1 selection.
//!
//! Each iteration:
//! 1. Selection: descend by UCB1 until a terminal or unvisited node
//! 2. Expansion: a visited leaf gets one child per legal move
//! 3. Simulation: one random playout from the selected node
//! 4. Backpropagation: visits and wins along the path

use std::time::Instant;

use rand::rngs::StdRng;
use tracing::{debug, trace};

use super::rollout::random_playout;
use super::tree::{NodeId, SearchTree};
use super::{seeded_rng, Player};
use crate::config::{MctsConfig, SearchBudget};
use crate::error::ConfigError;
use crate::game::Game;
use crate::r#move::Move;

/// Run `iterate` until `budget` is spent. At least one iteration always
/// runs; a time budget is only checked between iterations.
pub(crate) fn run_budget(budget: SearchBudget, mut iterate: impl FnMut()) -> u32 {
    match budget {
        SearchBudget::Iterations(n) => {
            for _ in 0..n.max(1) {
                iterate();
            }
            n.max(1)
        }
        SearchBudget::Time(duration) => {
            let deadline = Instant::now() + duration;
            let mut count = 0;
            loop {
                iterate();
                count += 1;
                if Instant::now() >= deadline {
                    break count;
                }
            }
        }
    }
}

pub struct MctsPlayer {
    config: MctsConfig,
    rng: StdRng,
}

impl MctsPlayer {
    pub fn new(config: MctsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(MctsPlayer {
            rng: seeded_rng(config.seed),
            config,
        })
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Build a search tree for `game` within the configured budget.
    #[cfg_attr(feature = "hotpath", hotpath::measure)]
    pub fn search(&mut self, game: &Game) -> SearchTree {
        let mut tree = SearchTree::new(game);
        let c = self.config.exploration;
        let rng = &mut self.rng;

        let start = Instant::now();
        let iterations = run_budget(self.config.budget, || {
            let path = tree.select_path(|node, parent_visits| node.ucb1(parent_visits, c));
            let Some(&leaf) = path.last() else {
                return;
            };
            let mut scratch = tree.get(leaf).game.clone();
            let result = random_playout(&mut scratch, rng);
            tree.backpropagate(&path, result);
            trace!(leaf = leaf.0, depth = path.len(), %result, "iteration");
        });

        debug!(
            iterations,
            nodes = tree.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "mcts search done"
        );
        tree
    }
}

impl Player for MctsPlayer {
    fn get_move(&mut self, game: &Game) -> Option<Move> {
        let moves = game.legal_moves();
        if moves.len() <= 1 {
            return moves.first().cloned();
        }

        let tree = self.search(game);
        let best: NodeId = tree.best_root_child(self.config.selection)?;
        let node = tree.get(best);
        debug!(
            mv = ?node.mv,
            visits = node.visits,
            wins = node.wins,
            selection = ?self.config.selection,
            "mcts move"
        );
        node.mv.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChildSelection;
    use std::time::Duration;

    #[test]
    fn test_every_root_child_visited_before_any_revisit() {
        let game = Game::new();
        let branching = game.legal_moves().len() as u32;
        let mut player =
            MctsPlayer::new(MctsConfig::for_testing().with_iterations(branching)).expect("valid");

        let tree = player.search(&game);
        let root = tree.get(tree.root());
        assert_eq!(root.visits, branching);
        assert_eq!(root.children.len(), branching as usize);
        for &child in &root.children {
            assert_eq!(tree.get(child).visits, 1);
        }
    }

    #[test]
    fn test_root_visits_match_iterations() {
        let mut player = MctsPlayer::new(MctsConfig::for_testing().with_iterations(150))
            .expect("valid");
        let tree = player.search(&Game::new());
        let root = tree.get(tree.root());
        assert_eq!(root.visits, 150);
        let child_visits: u32 = root.children.iter().map(|&c| tree.get(c).visits).sum();
        assert_eq!(child_visits, 150);
    }

    #[test]
    fn test_child_wins_never_exceed_visits() {
        let mut player = MctsPlayer::new(MctsConfig::for_testing()).expect("valid");
        let tree = player.search(&Game::new());
        for id in (0..tree.len() as u32).map(NodeId) {
            let node = tree.get(id);
            assert!(node.wins <= node.visits as f64);
            if let Some(parent) = node.parent {
                assert!(tree.get(parent).children.contains(&id));
            }
        }
    }

    #[test]
    fn test_time_budget_runs_at_least_once() {
        let config = MctsConfig::for_testing().with_duration(Duration::from_nanos(1));
        let mut player = MctsPlayer::new(config).expect("valid");
        let tree = player.search(&Game::new());
        assert!(tree.get(tree.root()).visits >= 1);
    }

    #[test]
    fn test_win_rate_selection_returns_legal_move() {
        let config = MctsConfig::for_testing().with_selection(ChildSelection::WinRate);
        let mut player = MctsPlayer::new(config).expect("valid");
        let game = Game::new();
        let mv = player.get_move(&game).expect("opening has moves");
        assert!(game.legal_moves().contains(&mv));
    }

    #[test]
    fn test_seeded_search_is_reproducible() {
        let game = Game::new();
        let mut a = MctsPlayer::new(MctsConfig::for_testing()).expect("valid");
        let mut b = MctsPlayer::new(MctsConfig::for_testing()).expect("valid");
        assert_eq!(a.get_move(&game), b.get_move(&game));
    }

    #[test]
    fn test_run_budget_counts_iterations() {
        let mut calls = 0;
        assert_eq!(run_budget(SearchBudget::Iterations(5), || calls += 1), 5);
        assert_eq!(calls, 5);
    }
}
