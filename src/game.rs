use std::sync::Arc;

use crate::board::Board;
use crate::color::PieceColor;
use crate::outcome::GameState;
use crate::piece::Piece;
use crate::position::Position;
use crate::r#move::Move;

/// Quiet plies (king-only plain moves) after which the game is drawn.
pub const QUIET_PLY_LIMIT: u32 = 80;

/// Board plus side to move and counters. Cloning is cheap: the board is a
/// value copy and the cached legal moves are shared read-only until the next
/// `run_move` replaces them.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    turn: PieceColor,
    legal_moves: Arc<[Move]>,
    quiet_plies: u32,
    move_count: u32,
    last_move: Option<Move>,
}

impl Game {
    /// Standard opening position, Red to move.
    pub fn new() -> Self {
        Self::from_board(Board::new(), PieceColor::Red)
    }

    /// Start from an arbitrary position with `turn` to move.
    pub fn from_board(board: Board, turn: PieceColor) -> Self {
        Game {
            legal_moves: board.legal_moves_for(turn).into(),
            board,
            turn,
            quiet_plies: 0,
            move_count: 0,
            last_move: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn get_piece(&self, pos: Position) -> Option<Piece> {
        self.board.get_piece(pos)
    }

    pub fn width(&self) -> u8 {
        self.board.width()
    }

    pub fn height(&self) -> u8 {
        self.board.height()
    }

    pub fn next_turn(&self) -> PieceColor {
        self.turn
    }

    /// Plies played so far; a multi-jump counts once.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn quiet_plies(&self) -> u32 {
        self.quiet_plies
    }

    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.last_move.as_ref()
    }

    /// Start and end squares of the last move, for highlighting.
    pub fn last_move_endpoints(&self) -> Option<(Position, Position)> {
        self.last_move.as_ref().map(|m| (m.start(), m.end()))
    }

    pub fn state(&self) -> GameState {
        if self.quiet_plies >= QUIET_PLY_LIMIT {
            GameState::Draw
        } else if self.legal_moves.is_empty() {
            GameState::win_for(self.turn.opposite())
        } else {
            GameState::Ongoing
        }
    }

    pub fn is_over(&self) -> bool {
        self.state().is_terminal()
    }

    pub fn winner(&self) -> Option<PieceColor> {
        self.state().winner()
    }

    /// Play `move_` for the side to move. Returns `false` and leaves the game
    /// untouched if the game is over or the move is not valid on this board.
    #[cfg_attr(feature = "hotpath", hotpath::measure)]
    pub fn run_move(&mut self, move_: &Move) -> bool {
        if self.is_over() || !move_.is_valid(&self.board, self.turn) {
            return false;
        }

        let moved_man = self
            .board
            .get_piece(move_.start())
            .is_some_and(|p| !p.is_king());

        let landing = move_.apply(&mut self.board);
        self.board.king_me(landing);

        if move_.is_capture() || moved_man {
            self.quiet_plies = 0;
        } else {
            self.quiet_plies += 1;
        }

        self.turn = self.turn.opposite();
        self.legal_moves = self.board.legal_moves_for(self.turn).into();
        self.move_count += 1;
        self.last_move = Some(move_.clone());

        true
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}Next: {} Count: {} Quiet: {} State: {}",
            self.board,
            self.turn,
            self.move_count,
            self.quiet_plies,
            self.state()
        )
    }
}
