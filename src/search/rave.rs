//! MCTS with rapid action value estimation.
//!
//! Besides the usual statistics, every child keeps all-moves-as-first (AMAF)
//! counts: a simulation that passes through its parent and later plays the
//! child's move with the same color counts for the child as if that move had
//! been played first. Selection blends the two estimates, leaning on AMAF
//! while real visits are scarce.

use std::collections::HashSet;
use std::time::Instant;

use rand::rngs::StdRng;
use tracing::{debug, trace};

use super::mcts::run_budget;
use super::rollout::random_playout_with;
use super::tree::{Node, NodeId, SearchTree};
use super::{seeded_rng, Player};
use crate::color::PieceColor;
use crate::config::{ChildSelection, RaveConfig};
use crate::error::ConfigError;
use crate::game::Game;
use crate::outcome::GameState;
use crate::r#move::Move;

/// Moves are identified by color and endpoints for AMAF purposes.
type MoveKey = (PieceColor, u8, u8);

fn move_key(color: PieceColor, mv: &Move) -> MoveKey {
    (color, mv.start().index() as u8, mv.end().index() as u8)
}

/// `(1 - beta) * Q + beta * Q_rave + c * sqrt(2 ln N / n)` with
/// `beta = k / (1 + rave_visits)` clamped to `[0, 1]`.
pub fn rave_score(node: &Node, parent_visits: u32, exploration: f64, rave_k: f64) -> f64 {
    if node.visits == 0 {
        return f64::INFINITY;
    }
    let n = node.visits as f64;
    let q = node.wins / n;
    let q_rave = if node.rave_visits == 0 {
        q
    } else {
        node.rave_wins / node.rave_visits as f64
    };
    let beta = (rave_k / (1.0 + node.rave_visits as f64)).clamp(0.0, 1.0);
    let explore = exploration * (2.0 * (parent_visits.max(1) as f64).ln() / n).sqrt();
    (1.0 - beta) * q + beta * q_rave + explore
}

pub struct RavePlayer {
    config: RaveConfig,
    rng: StdRng,
}

impl RavePlayer {
    pub fn new(config: RaveConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(RavePlayer {
            rng: seeded_rng(config.seed),
            config,
        })
    }

    pub fn config(&self) -> &RaveConfig {
        &self.config
    }

    #[cfg_attr(feature = "hotpath", hotpath::measure)]
    pub fn search(&mut self, game: &Game) -> SearchTree {
        let mut tree = SearchTree::new(game);
        let c = self.config.exploration;
        let k = self.config.rave_k;
        let rng = &mut self.rng;

        let start = Instant::now();
        let iterations = run_budget(self.config.budget, || {
            let path = tree.select_path(|node, parent_visits| rave_score(node, parent_visits, c, k));
            let Some(&leaf) = path.last() else {
                return;
            };

            let mut rollout_moves = Vec::new();
            let mut scratch = tree.get(leaf).game.clone();
            let result = random_playout_with(&mut scratch, rng, |color, mv| {
                rollout_moves.push(move_key(color, mv));
            });

            tree.backpropagate(&path, result);
            update_amaf(&mut tree, &path, rollout_moves, result);
            trace!(leaf = leaf.0, depth = path.len(), %result, "iteration");
        });

        debug!(
            iterations,
            nodes = tree.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "rave search done"
        );
        tree
    }
}

/// Credit AMAF statistics to the children of every node on `path`.
///
/// For the node at depth `i`, the moves that count are the tree moves below
/// it plus the rollout moves.
fn update_amaf(tree: &mut SearchTree, path: &[NodeId], rollout_moves: Vec<MoveKey>, result: GameState) {
    let winner = result.winner();
    let mut played: HashSet<MoveKey> = rollout_moves.into_iter().collect();

    for depth in (0..path.len()).rev() {
        if let Some(&below) = path.get(depth + 1) {
            let node = tree.get(below);
            if let Some(mv) = &node.mv {
                played.insert(move_key(node.mover(), mv));
            }
        }

        let children = tree.get(path[depth]).children.clone();
        for child in children {
            let node = tree.get_mut(child);
            let Some(mv) = &node.mv else {
                continue;
            };
            if played.contains(&move_key(node.mover(), mv)) {
                node.rave_visits += 1;
                if winner == Some(node.mover()) {
                    node.rave_wins += 1.0;
                }
            }
        }
    }
}

impl Player for RavePlayer {
    fn get_move(&mut self, game: &Game) -> Option<Move> {
        let moves = game.legal_moves();
        if moves.len() <= 1 {
            return moves.first().cloned();
        }

        let tree = self.search(game);
        let best = tree.best_root_child(ChildSelection::MostVisits)?;
        let node = tree.get(best);
        debug!(
            mv = ?node.mv,
            visits = node.visits,
            wins = node.wins,
            rave_visits = node.rave_visits,
            rave_wins = node.rave_wins,
            "rave move"
        );
        node.mv.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rave_score_blend() {
        let tree = SearchTree::new(&Game::new());
        let mut node = tree.get(tree.root()).clone();
        assert!(rave_score(&node, 10, 1.0, 1.0).is_infinite());

        node.visits = 4;
        node.wins = 1.0;
        node.rave_visits = 3;
        node.rave_wins = 3.0;

        // beta = 1 / 4, no exploration.
        let expected = 0.75 * 0.25 + 0.25 * 1.0;
        assert!((rave_score(&node, 10, 0.0, 1.0) - expected).abs() < 1e-12);

        // k = 0 turns RAVE off.
        assert!((rave_score(&node, 10, 0.0, 0.0) - 0.25).abs() < 1e-12);

        // Large k clamps beta to 1.
        assert!((rave_score(&node, 10, 0.0, 100.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_amaf_data_falls_back_to_win_rate() {
        let tree = SearchTree::new(&Game::new());
        let mut node = tree.get(tree.root()).clone();
        node.visits = 2;
        node.wins = 1.0;
        assert!((rave_score(&node, 5, 0.0, 1.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_amaf_credits_later_moves_of_same_color() {
        let game = Game::new();
        let mut tree = SearchTree::new(&game);
        tree.expand(tree.root());
        let children = tree.get(tree.root()).children.clone();
        let played = children[0];
        let later = children[3];

        let later_move = tree.get(later).mv.clone().expect("child has a move");
        let rollout = vec![
            (PieceColor::Blue, 40, 33),
            move_key(PieceColor::Red, &later_move),
        ];
        let path = [tree.root(), played];
        tree.backpropagate(&path, GameState::RedWin);
        update_amaf(&mut tree, &path, rollout, GameState::RedWin);

        // The child played in the tree and the one played later in the
        // rollout both get credit. The others don't.
        for &child in &children {
            let node = tree.get(child);
            if child == played || child == later {
                assert_eq!(node.rave_visits, 1);
                assert_eq!(node.rave_wins, 1.0);
            } else {
                assert_eq!(node.rave_visits, 0);
            }
        }
    }

    #[test]
    fn test_amaf_ignores_other_color() {
        let game = Game::new();
        let mut tree = SearchTree::new(&game);
        tree.expand(tree.root());
        let children = tree.get(tree.root()).children.clone();
        let target = tree.get(children[1]).mv.clone().expect("child has a move");

        // Same squares, wrong color.
        let root = tree.root();
        let rollout = vec![move_key(PieceColor::Blue, &target)];
        update_amaf(&mut tree, &[root], rollout, GameState::BlueWin);
        assert_eq!(tree.get(children[1]).rave_visits, 0);
    }

    #[test]
    fn test_search_updates_amaf() {
        let mut player = RavePlayer::new(RaveConfig::for_testing()).expect("valid");
        let tree = player.search(&Game::new());
        let root = tree.get(tree.root());
        assert_eq!(root.visits, 200);
        let total_rave: u32 = root.children.iter().map(|&c| tree.get(c).rave_visits).sum();
        assert!(total_rave >= 200);
        for &child in &root.children {
            let node = tree.get(child);
            assert!(node.rave_wins <= node.rave_visits as f64);
        }
    }

    #[test]
    fn test_rejects_bad_rave_k() {
        assert!(RavePlayer::new(RaveConfig::default().with_rave_k(f64::INFINITY)).is_err());
    }
}
