use crate::board::{COLS, ROWS};

/// A square on the 8×8 grid. The bit index is computed once at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    row: u8,
    col: u8,
    index: u8,
}

impl Position {
    /// Returns `None` for coordinates off the board.
    pub fn new(row: i32, col: i32) -> Option<Self> {
        if (0..ROWS as i32).contains(&row) && (0..COLS as i32).contains(&col) {
            Some(Self::at(row as u8, col as u8))
        } else {
            None
        }
    }

    pub(crate) const fn at(row: u8, col: u8) -> Self {
        debug_assert!(row < ROWS && col < COLS);
        Position {
            row,
            col,
            index: row * COLS + col,
        }
    }

    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < (ROWS * COLS) as usize);
        Self::at(index as u8 / COLS, index as u8 % COLS)
    }

    #[inline]
    pub fn row(&self) -> u8 {
        self.row
    }

    #[inline]
    pub fn col(&self) -> u8 {
        self.col
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index as usize
    }

    #[inline]
    pub fn mask(&self) -> u64 {
        1u64 << self.index
    }

    /// Dark squares are the playable ones.
    #[inline]
    pub fn is_dark(&self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// The square `rows`/`cols` away, if it is on the board.
    pub fn offset(&self, rows: i32, cols: i32) -> Option<Position> {
        Position::new(self.row as i32 + rows, self.col as i32 + cols)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}
