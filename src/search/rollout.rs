//! Uniform random playouts.

use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::color::PieceColor;
use crate::game::Game;
use crate::outcome::GameState;
use crate::r#move::Move;

/// Play uniformly random legal moves until the game ends.
///
/// Always terminates: men only advance, captures shrink the board, and king
/// shuffling is cut off by the quiet-ply draw.
#[cfg_attr(feature = "hotpath", hotpath::measure)]
pub fn random_playout<R: Rng + ?Sized>(game: &mut Game, rng: &mut R) -> GameState {
    random_playout_with(game, rng, |_, _| {})
}

/// Like [`random_playout`], calling `on_move(color, move)` before each ply.
pub fn random_playout_with<R, F>(game: &mut Game, rng: &mut R, mut on_move: F) -> GameState
where
    R: Rng + ?Sized,
    F: FnMut(PieceColor, &Move),
{
    loop {
        let state = game.state();
        if state.is_terminal() {
            return state;
        }
        let Some(mv) = game.legal_moves().choose(rng).cloned() else {
            return game.state();
        };
        on_move(game.next_turn(), &mv);
        assert!(game.run_move(&mv), "generated move {mv} was rejected");
    }
}

/// Final score of one playout from a copy of `game`, from `perspective`.
pub fn playout_score<R: Rng + ?Sized>(game: &Game, perspective: PieceColor, rng: &mut R) -> f64 {
    let mut scratch = game.clone();
    random_playout(&mut scratch, rng).score_for(perspective)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::piece::Piece;
    use crate::position::Position;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_playout_reaches_terminal_state() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            let mut game = Game::new();
            let state = random_playout(&mut game, &mut rng);
            assert!(state.is_terminal());
            assert_eq!(state, game.state());
        }
    }

    #[test]
    fn test_playout_is_deterministic_for_seed() {
        let mut a = Game::new();
        let mut b = Game::new();
        random_playout(&mut a, &mut StdRng::seed_from_u64(11));
        random_playout(&mut b, &mut StdRng::seed_from_u64(11));
        assert_eq!(a.board(), b.board());
        assert_eq!(a.move_count(), b.move_count());
    }

    #[test]
    fn test_on_move_sees_every_ply() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut game = Game::new();
        let mut seen = Vec::new();
        random_playout_with(&mut game, &mut rng, |color, mv| seen.push((color, mv.clone())));

        assert_eq!(seen.len() as u32, game.move_count());
        assert_eq!(seen[0].0, PieceColor::Red);
        assert_eq!(seen[1].0, PieceColor::Blue);
    }

    #[test]
    fn test_recorded_plies_replay_on_fresh_game() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut played = Game::new();
        let mut seen = Vec::new();
        let result = random_playout_with(&mut played, &mut rng, |_, mv| seen.push(mv.clone()));

        let mut replay = Game::new();
        for mv in &seen {
            assert!(replay.run_move(mv), "{mv} rejected on replay");
        }
        assert_eq!(replay.board(), played.board());
        assert_eq!(replay.state(), result);
    }

    #[test]
    fn test_playout_score_leaves_game_alone() {
        let mut board = Board::empty();
        board.set_piece(Position::new(2, 1).expect("on board"), Piece::RedMan);
        board.set_piece(Position::new(3, 2).expect("on board"), Piece::BlueMan);
        let game = Game::from_board(board, PieceColor::Red);

        let mut rng = StdRng::seed_from_u64(1);
        // Red's only move captures Blue's last piece.
        assert_eq!(playout_score(&game, PieceColor::Red, &mut rng), 1.0);
        assert_eq!(playout_score(&game, PieceColor::Blue, &mut rng), -1.0);
        assert_eq!(game.move_count(), 0);
    }

    #[test]
    fn test_finished_game_is_returned_as_is() {
        let mut game = Game::from_board(Board::empty(), PieceColor::Red);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(random_playout(&mut game, &mut rng), GameState::BlueWin);
        assert_eq!(game.move_count(), 0);
    }
}
