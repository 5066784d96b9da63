use std::fmt;

use crate::bitboard::Bitboard;
use crate::color::PieceColor;
use crate::piece::Piece;
use crate::position::Position;

pub const ROWS: u8 = 8;
pub const COLS: u8 = 8;

/// Rows filled with men at the start, counted from each side's back rank.
const STARTING_ROWS: u8 = 3;

/// Light squares, which can never hold a piece.
const INVALID_MASK: u64 = {
    let mut mask = 0u64;
    let mut index = 0;
    while index < (ROWS * COLS) as usize {
        let row = index / COLS as usize;
        let col = index % COLS as usize;
        if (row + col) % 2 == 0 {
            mask |= 1u64 << index;
        }
        index += 1;
    }
    mask
};

/// Full board state in four masks. `Copy`, so simulations take value copies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    red: Bitboard,
    blue: Bitboard,
    kings: Bitboard,
    invalid: Bitboard,
}

impl Board {
    /// The standard opening: Red men on rows 0..3, Blue men on rows 5..8.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for index in 0..(ROWS * COLS) as usize {
            let pos = Position::from_index(index);
            if !pos.is_dark() {
                continue;
            }
            if pos.row() < STARTING_ROWS {
                board.red.set(index);
            } else if pos.row() >= ROWS - STARTING_ROWS {
                board.blue.set(index);
            }
        }
        board
    }

    /// A board with no pieces.
    pub fn empty() -> Self {
        Board {
            red: Bitboard::empty(),
            blue: Bitboard::empty(),
            kings: Bitboard::empty(),
            invalid: Bitboard::from_bits(INVALID_MASK),
        }
    }

    pub fn width(&self) -> u8 {
        COLS
    }

    pub fn height(&self) -> u8 {
        ROWS
    }

    pub fn get_piece(&self, pos: Position) -> Option<Piece> {
        let idx = pos.index();
        if self.red.get(idx) {
            Some(Piece::new(PieceColor::Red, self.kings.get(idx)))
        } else if self.blue.get(idx) {
            Some(Piece::new(PieceColor::Blue, self.kings.get(idx)))
        } else {
            None
        }
    }

    /// Color at `pos` without decoding the king flag.
    #[inline]
    pub fn color_at(&self, pos: Position) -> Option<PieceColor> {
        let idx = pos.index();
        if self.red.get(idx) {
            Some(PieceColor::Red)
        } else if self.blue.get(idx) {
            Some(PieceColor::Blue)
        } else {
            None
        }
    }

    /// Place `piece` on `pos`, replacing whatever was there. Light squares
    /// are refused and `false` is returned.
    pub fn set_piece(&mut self, pos: Position, piece: Piece) -> bool {
        if !self.is_playable(pos) {
            return false;
        }
        let idx = pos.index();
        self.clear_square(idx);
        match piece.color() {
            PieceColor::Red => self.red.set(idx),
            PieceColor::Blue => self.blue.set(idx),
        }
        if piece.is_king() {
            self.kings.set(idx);
        }
        true
    }

    pub fn remove_piece(&mut self, pos: Position) -> Option<Piece> {
        let piece = self.get_piece(pos);
        self.clear_square(pos.index());
        piece
    }

    /// Relocate the piece on `start` to `end`, keeping color and king flag.
    /// Nothing moves if `end` is a light square.
    pub fn move_piece(&mut self, start: Position, end: Position) -> Option<Piece> {
        if !self.is_playable(end) {
            return None;
        }
        let piece = self.remove_piece(start)?;
        self.set_piece(end, piece);
        Some(piece)
    }

    /// Crown the man on `pos` if it stands on its promotion row. Returns
    /// whether a promotion happened; kings and empty squares are untouched.
    pub fn king_me(&mut self, pos: Position) -> bool {
        match self.get_piece(pos) {
            Some(piece) if !piece.is_king() && pos.row() == piece.color().promotion_row() => {
                self.kings.set(pos.index());
                true
            }
            _ => false,
        }
    }

    /// A dark square with nothing on it.
    #[inline]
    pub fn is_empty_square(&self, pos: Position) -> bool {
        !(self.occupied() | self.invalid).get(pos.index())
    }

    #[inline]
    pub fn is_playable(&self, pos: Position) -> bool {
        !self.invalid.get(pos.index())
    }

    #[inline]
    pub fn red(&self) -> Bitboard {
        self.red
    }

    #[inline]
    pub fn blue(&self) -> Bitboard {
        self.blue
    }

    #[inline]
    pub fn kings(&self) -> Bitboard {
        self.kings
    }

    #[inline]
    pub fn invalid(&self) -> Bitboard {
        self.invalid
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.red | self.blue
    }

    #[inline]
    pub fn pieces_for(&self, color: PieceColor) -> Bitboard {
        match color {
            PieceColor::Red => self.red,
            PieceColor::Blue => self.blue,
        }
    }

    pub fn count(&self, color: PieceColor) -> u32 {
        self.pieces_for(color).count()
    }

    /// Check the structural invariants of the masks.
    pub fn is_consistent(&self) -> bool {
        (self.red & self.blue).is_empty()
            && self.occupied().contains(self.kings)
            && (self.occupied() & self.invalid).is_empty()
    }

    #[inline]
    fn clear_square(&mut self, idx: usize) {
        self.red.clear(idx);
        self.blue.clear(idx);
        self.kings.clear(idx);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            write!(f, "{} |", row)?;

            for col in 0..COLS {
                let pos = Position::at(row, col);
                let c = if !self.is_playable(pos) {
                    ' '
                } else if let Some(piece) = self.get_piece(pos) {
                    piece.to_char()
                } else {
                    '.'
                };

                write!(f, "{}|", c)?;
            }

            writeln!(f)?;
        }

        // Column numbers
        write!(f, "   ")?;
        for col in 0..COLS {
            write!(f, "{} ", col)?;
        }
        writeln!(f)?;

        Ok(())
    }
}
