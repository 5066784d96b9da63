use crate::color::PieceColor;

/// The four piece identities. A piece carries no per-instance state, so the
/// identity is fully described by its color and king flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Piece {
    RedMan,
    RedKing,
    BlueMan,
    BlueKing,
}

impl Piece {
    pub fn new(color: PieceColor, is_king: bool) -> Self {
        match (color, is_king) {
            (PieceColor::Red, false) => Piece::RedMan,
            (PieceColor::Red, true) => Piece::RedKing,
            (PieceColor::Blue, false) => Piece::BlueMan,
            (PieceColor::Blue, true) => Piece::BlueKing,
        }
    }

    pub fn man(color: PieceColor) -> Self {
        Self::new(color, false)
    }

    pub fn king(color: PieceColor) -> Self {
        Self::new(color, true)
    }

    pub fn color(&self) -> PieceColor {
        match self {
            Piece::RedMan | Piece::RedKing => PieceColor::Red,
            Piece::BlueMan | Piece::BlueKing => PieceColor::Blue,
        }
    }

    pub fn is_king(&self) -> bool {
        matches!(self, Piece::RedKing | Piece::BlueKing)
    }

    /// Men print as a single letter, kings as a lowercase letter.
    pub fn to_char(&self) -> char {
        match self {
            Piece::RedMan => 'R',
            Piece::RedKing => 'r',
            Piece::BlueMan => 'B',
            Piece::BlueKing => 'b',
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_king() { "king" } else { "man" };
        write!(f, "{} {}", self.color(), kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_from_parts() {
        for color in [PieceColor::Red, PieceColor::Blue] {
            for king in [false, true] {
                let piece = Piece::new(color, king);
                assert_eq!(piece.color(), color);
                assert_eq!(piece.is_king(), king);
            }
        }
    }

    #[test]
    fn test_piece_is_two_bits_of_state() {
        assert_eq!(std::mem::size_of::<Piece>(), 1);
        assert_eq!(std::mem::size_of::<Option<Piece>>(), 1);
    }
}
