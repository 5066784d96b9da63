#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum PieceColor {
    Red = 1,
    Blue = -1,
}

impl PieceColor {
    pub fn opposite(&self) -> PieceColor {
        match self {
            PieceColor::Red => PieceColor::Blue,
            PieceColor::Blue => PieceColor::Red,
        }
    }

    /// Row delta of a forward step for this color's men.
    pub fn direction(&self) -> i8 {
        *self as i8
    }

    /// The row on which this color's men are crowned.
    pub fn promotion_row(&self) -> u8 {
        match self {
            PieceColor::Red => crate::board::ROWS - 1,
            PieceColor::Blue => 0,
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            PieceColor::Red => 'R',
            PieceColor::Blue => 'B',
        }
    }

    pub fn from_char(c: char) -> Option<PieceColor> {
        match c {
            'R' | 'r' => Some(PieceColor::Red),
            'B' | 'b' => Some(PieceColor::Blue),
            _ => None,
        }
    }

    pub fn from_int(i: i8) -> Option<PieceColor> {
        match i {
            1 => Some(PieceColor::Red),
            -1 => Some(PieceColor::Blue),
            _ => None,
        }
    }
}

impl std::fmt::Display for PieceColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceColor::Red => "Red",
            PieceColor::Blue => "Blue",
        };
        write!(f, "{}", name)
    }
}
