//! Flat Monte Carlo: score every legal move by the average result of random
//! playouts from the position it produces.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::{debug, trace};

use super::rollout::playout_score;
use super::{seeded_rng, Player};
use crate::color::PieceColor;
use crate::config::MonteCarloConfig;
use crate::error::ConfigError;
use crate::game::Game;
use crate::r#move::Move;

pub struct MonteCarloPlayer {
    config: MonteCarloConfig,
    rng: StdRng,
    pool: rayon::ThreadPool,
}

impl MonteCarloPlayer {
    pub fn new(config: MonteCarloConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|i| format!("playout-{i}"))
            .build()?;
        Ok(MonteCarloPlayer {
            rng: seeded_rng(config.seed),
            config,
            pool,
        })
    }

    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Average playout score of `game` for `perspective`.
    ///
    /// Playouts are split across the workers, the first `playouts % workers`
    /// workers taking one extra. Each worker draws its own RNG from the
    /// player's so a seeded player stays reproducible.
    #[cfg_attr(feature = "hotpath", hotpath::measure)]
    pub fn evaluate(&mut self, game: &Game, perspective: PieceColor) -> f64 {
        let playouts = self.config.playouts;
        let workers = self.config.workers as u32;
        let base = playouts / workers;
        let extra = playouts % workers;

        let rngs: Vec<StdRng> = (0..workers)
            .map(|_| StdRng::from_rng(&mut self.rng))
            .collect();

        let total: f64 = self.pool.install(|| {
            rngs.into_par_iter()
                .enumerate()
                .map(|(worker, mut rng)| {
                    let count = base + u32::from((worker as u32) < extra);
                    let sum: f64 = (0..count)
                        .map(|_| playout_score(game, perspective, &mut rng))
                        .sum();
                    trace!(worker, count, sum, "worker done");
                    sum
                })
                .sum::<f64>()
        });

        total / playouts as f64
    }
}

impl Player for MonteCarloPlayer {
    fn get_move(&mut self, game: &Game) -> Option<Move> {
        let moves = game.legal_moves();
        if moves.len() <= 1 {
            return moves.first().cloned();
        }

        let start = Instant::now();
        let color = game.next_turn();
        let mut best: Option<(&Move, f64)> = None;

        for mv in moves {
            let mut after = game.clone();
            assert!(after.run_move(mv), "generated move {mv} was rejected");
            let score = self.evaluate(&after, color);
            trace!(%mv, score, "candidate");
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((mv, score));
            }
        }

        let (mv, score) = best?;
        debug!(
            candidates = moves.len(),
            playouts = self.config.playouts,
            workers = self.config.workers,
            elapsed_ms = start.elapsed().as_millis() as u64,
            %mv,
            score,
            "monte carlo move"
        );
        Some(mv.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::piece::Piece;
    use crate::position::Position;

    #[test]
    fn test_rejects_invalid_config() {
        assert!(MonteCarloPlayer::new(MonteCarloConfig::default().with_playouts(0)).is_err());
        assert!(MonteCarloPlayer::new(MonteCarloConfig::default().with_workers(0)).is_err());
    }

    #[test]
    fn test_evaluate_decided_position() {
        let mut player = MonteCarloPlayer::new(MonteCarloConfig::for_testing()).expect("valid");
        // Red has nothing left to move.
        let game = Game::from_board(Board::empty(), PieceColor::Red);
        assert_eq!(player.evaluate(&game, PieceColor::Blue), 1.0);
        assert_eq!(player.evaluate(&game, PieceColor::Red), -1.0);
    }

    #[test]
    fn test_uneven_split_is_averaged() {
        let config = MonteCarloConfig::for_testing()
            .with_playouts(7)
            .with_workers(3);
        let mut player = MonteCarloPlayer::new(config).expect("valid");
        let score = player.evaluate(&Game::new(), PieceColor::Red);
        assert!((-1.0..=1.0).contains(&score));
        // Seven playouts with scores in {-1, 0, 1} average to a multiple of 1/7.
        let scaled = score * 7.0;
        assert!((scaled - scaled.round()).abs() < 1e-9);
    }

    #[test]
    fn test_workers_agree_with_single_thread_on_forced_result() {
        let mut board = Board::empty();
        board.set_piece(Position::new(2, 1).expect("on board"), Piece::RedMan);
        board.set_piece(Position::new(3, 2).expect("on board"), Piece::BlueMan);
        let game = Game::from_board(board, PieceColor::Red);

        for workers in [1, 4] {
            let config = MonteCarloConfig::for_testing().with_workers(workers);
            let mut player = MonteCarloPlayer::new(config).expect("valid");
            assert_eq!(player.evaluate(&game, PieceColor::Red), 1.0);
        }
    }

    #[test]
    fn test_seeded_players_agree() {
        let config = MonteCarloConfig::for_testing().with_workers(2);
        let mut a = MonteCarloPlayer::new(config.clone()).expect("valid");
        let mut b = MonteCarloPlayer::new(config).expect("valid");
        let game = Game::new();
        assert_eq!(a.get_move(&game), b.get_move(&game));
    }
}
