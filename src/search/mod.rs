//! Move-selection players.
//!
//! All three are statistical: they estimate move quality from random
//! playouts rather than from a handcrafted evaluation.

pub mod mcts;
pub mod monte_carlo;
pub mod rave;
pub mod rollout;
pub mod tree;

pub use mcts::MctsPlayer;
pub use monte_carlo::MonteCarloPlayer;
pub use rave::RavePlayer;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::game::Game;
use crate::r#move::Move;

pub trait Player {
    /// Choose a move for the side to move in `game`.
    ///
    /// Returns a member of `game.legal_moves()`, or `None` when there is
    /// none. A lone legal move is returned without searching. The caller's
    /// game is never modified.
    fn get_move(&mut self, game: &Game) -> Option<Move>;
}

pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::color::PieceColor;
    use crate::config::{MctsConfig, MonteCarloConfig, RaveConfig};
    use crate::piece::Piece;
    use crate::position::Position;

    fn pos(row: i32, col: i32) -> Position {
        Position::new(row, col).expect("on board")
    }

    /// Red king at (1,2) can step to (0,1) and leave Blue's man at (1,0)
    /// with no moves. Every other king move lets the game go on.
    fn immediate_win() -> (Game, Move) {
        let mut board = Board::empty();
        board.set_piece(pos(1, 2), Piece::RedKing);
        board.set_piece(pos(1, 0), Piece::BlueMan);
        let game = Game::from_board(board, PieceColor::Red);
        (game, Move::plain(1, 2, 0, 1).expect("on board"))
    }

    fn single_capture() -> Game {
        let mut board = Board::empty();
        board.set_piece(pos(2, 1), Piece::RedMan);
        board.set_piece(pos(3, 2), Piece::BlueMan);
        board.set_piece(pos(7, 6), Piece::BlueMan);
        Game::from_board(board, PieceColor::Red)
    }

    macro_rules! player_contract_tests {
        ($name:ident, $make:expr) => {
            paste::paste! {
                #[test]
                fn [<test_ $name _returns_legal_move>]() {
                    let mut player = $make;
                    let game = Game::new();
                    let mv = player.get_move(&game).expect("opening has moves");
                    assert!(game.legal_moves().contains(&mv));
                }

                #[test]
                fn [<test_ $name _returns_lone_move>]() {
                    let mut player = $make;
                    let game = single_capture();
                    assert_eq!(game.legal_moves().len(), 1);
                    assert_eq!(player.get_move(&game).as_ref(), game.legal_moves().first());
                }

                #[test]
                fn [<test_ $name _no_moves_gives_none>]() {
                    let mut player = $make;
                    let game = Game::from_board(Board::empty(), PieceColor::Blue);
                    assert_eq!(player.get_move(&game), None);
                }

                #[test]
                fn [<test_ $name _leaves_game_untouched>]() {
                    let mut player = $make;
                    let game = Game::new();
                    let board = *game.board();
                    player.get_move(&game);
                    assert_eq!(*game.board(), board);
                    assert_eq!(game.next_turn(), PieceColor::Red);
                    assert_eq!(game.move_count(), 0);
                    assert_eq!(game.legal_moves().len(), 7);
                }

                #[test]
                fn [<test_ $name _finds_immediate_win>]() {
                    let mut player = $make;
                    let (game, winning) = immediate_win();
                    assert_eq!(game.legal_moves().len(), 4);
                    assert_eq!(player.get_move(&game), Some(winning));
                }
            }
        };
    }

    player_contract_tests!(
        monte_carlo,
        MonteCarloPlayer::new(MonteCarloConfig::for_testing()).expect("valid config")
    );
    player_contract_tests!(
        monte_carlo_workers,
        MonteCarloPlayer::new(MonteCarloConfig::for_testing().with_workers(3))
            .expect("valid config")
    );
    player_contract_tests!(
        mcts,
        MctsPlayer::new(MctsConfig::for_testing()).expect("valid config")
    );
    player_contract_tests!(
        rave,
        RavePlayer::new(RaveConfig::for_testing()).expect("valid config")
    );

    #[test]
    fn test_seeded_rng_is_reproducible() {
        use rand::prelude::IndexedRandom;
        let items: Vec<u32> = (0..100).collect();
        let a: Vec<u32> = (0..10)
            .map(|_| *items.choose(&mut seeded_rng(Some(9))).expect("non-empty"))
            .collect();
        let b: Vec<u32> = (0..10)
            .map(|_| *items.choose(&mut seeded_rng(Some(9))).expect("non-empty"))
            .collect();
        assert_eq!(a, b);
    }
}
