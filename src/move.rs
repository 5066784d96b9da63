use crate::board::Board;
use crate::color::PieceColor;
use crate::position::Position;

/// A single capture: the piece on `start` jumps the piece on `over` and lands
/// on `end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Jump {
    pub start: Position,
    pub over: Position,
    pub end: Position,
}

impl Jump {
    pub fn is_valid(&self, board: &Board, color: PieceColor) -> bool {
        board.is_empty_square(self.end)
            && board.color_at(self.start) == Some(color)
            && board.color_at(self.over) == Some(color.opposite())
    }

    /// Relocate the jumper and remove the jumped piece.
    pub fn apply(&self, board: &mut Board) -> Position {
        board.move_piece(self.start, self.end);
        board.remove_piece(self.over);
        self.end
    }
}

/// One ply. A `Multi` chains jumps of the same piece, each starting where
/// the previous one landed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Plain { start: Position, end: Position },
    Jump(Jump),
    Multi(Vec<Jump>),
}

impl Move {
    /// A plain step between two squares, `None` if either is off the board.
    pub fn plain(start_row: i32, start_col: i32, end_row: i32, end_col: i32) -> Option<Self> {
        Some(Move::Plain {
            start: Position::new(start_row, start_col)?,
            end: Position::new(end_row, end_col)?,
        })
    }

    /// A single jump, `None` if any square is off the board.
    pub fn jump(
        start_row: i32,
        start_col: i32,
        over_row: i32,
        over_col: i32,
        end_row: i32,
        end_col: i32,
    ) -> Option<Self> {
        Some(Move::Jump(Jump {
            start: Position::new(start_row, start_col)?,
            over: Position::new(over_row, over_col)?,
            end: Position::new(end_row, end_col)?,
        }))
    }

    /// Chain jumps into one move. Returns `None` for an empty or broken
    /// chain; a one-element chain becomes a plain `Jump`.
    pub fn chain(jumps: Vec<Jump>) -> Option<Self> {
        if jumps.is_empty() || jumps.windows(2).any(|w| w[0].end != w[1].start) {
            return None;
        }
        if jumps.len() == 1 {
            return Some(Move::Jump(jumps[0]));
        }
        Some(Move::Multi(jumps))
    }

    pub fn start(&self) -> Position {
        match self {
            Move::Plain { start, .. } => *start,
            Move::Jump(jump) => jump.start,
            Move::Multi(jumps) => jumps[0].start,
        }
    }

    pub fn end(&self) -> Position {
        match self {
            Move::Plain { end, .. } => *end,
            Move::Jump(jump) => jump.end,
            Move::Multi(jumps) => jumps[jumps.len() - 1].end,
        }
    }

    pub fn is_capture(&self) -> bool {
        !matches!(self, Move::Plain { .. })
    }

    /// Jumped squares in the order they are captured.
    pub fn captured(&self) -> Vec<Position> {
        match self {
            Move::Plain { .. } => Vec::new(),
            Move::Jump(jump) => vec![jump.over],
            Move::Multi(jumps) => jumps.iter().map(|j| j.over).collect(),
        }
    }

    /// Whether `color` may play this move on `board`. A chain is checked one
    /// jump at a time against a scratch copy.
    pub fn is_valid(&self, board: &Board, color: PieceColor) -> bool {
        match self {
            Move::Plain { start, end } => {
                board.is_empty_square(*end) && board.color_at(*start) == Some(color)
            }
            Move::Jump(jump) => jump.is_valid(board, color),
            Move::Multi(jumps) => {
                let mut scratch = *board;
                for jump in jumps {
                    if !jump.is_valid(&scratch, color) {
                        return false;
                    }
                    jump.apply(&mut scratch);
                }
                !jumps.is_empty()
            }
        }
    }

    /// Apply to `board` without validation; returns the landing square.
    pub fn apply(&self, board: &mut Board) -> Position {
        match self {
            Move::Plain { start, end } => {
                board.move_piece(*start, *end);
                *end
            }
            Move::Jump(jump) => jump.apply(board),
            Move::Multi(jumps) => {
                for jump in jumps {
                    jump.apply(board);
                }
                self.end()
            }
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Plain { start, end } => write!(f, "{}->{}", start, end),
            Move::Jump(jump) => write!(f, "{}x{}", jump.start, jump.end),
            Move::Multi(jumps) => {
                write!(f, "{}", self.start())?;
                for jump in jumps {
                    write!(f, "x{}", jump.end)?;
                }
                Ok(())
            }
        }
    }
}
