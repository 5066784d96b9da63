//! Occupancy-independent move geometry.
//!
//! For every square the table holds, per diagonal direction, the square one
//! step away and the (jumped, landing) pair two steps away. Anything that
//! would leave the board is clipped here, so generation never bounds-checks.
//! Legality against a concrete board is decided later by the move itself.

use once_cell::sync::Lazy;

use crate::board::{COLS, ROWS};
use crate::color::PieceColor;
use crate::piece::Piece;
use crate::position::Position;

const SQUARES: usize = (ROWS as usize) * (COLS as usize);

/// Diagonal directions as (row delta, col delta). The first two move toward
/// higher rows (Red's forward), the last two toward lower rows (Blue's).
pub const DIRECTIONS: [(i32, i32); 4] = [(1, -1), (1, 1), (-1, -1), (-1, 1)];

const RED_FORWARD: &[usize] = &[0, 1];
const BLUE_FORWARD: &[usize] = &[2, 3];
const ALL_DIRECTIONS: &[usize] = &[0, 1, 2, 3];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JumpTemplate {
    pub over: Position,
    pub end: Position,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SquareTemplates {
    steps: [Option<Position>; 4],
    jumps: [Option<JumpTemplate>; 4],
}

impl SquareTemplates {
    #[inline]
    pub fn step(&self, direction: usize) -> Option<Position> {
        self.steps[direction]
    }

    #[inline]
    pub fn jump(&self, direction: usize) -> Option<JumpTemplate> {
        self.jumps[direction]
    }
}

#[derive(Debug)]
pub struct MoveTemplates {
    squares: [SquareTemplates; SQUARES],
}

impl MoveTemplates {
    fn build() -> Self {
        let mut squares = [SquareTemplates::default(); SQUARES];

        for (index, entry) in squares.iter_mut().enumerate() {
            let from = Position::from_index(index);
            if !from.is_dark() {
                continue;
            }
            for (dir, &(dr, dc)) in DIRECTIONS.iter().enumerate() {
                entry.steps[dir] = from.offset(dr, dc);
                entry.jumps[dir] = match (from.offset(dr, dc), from.offset(2 * dr, 2 * dc)) {
                    (Some(over), Some(end)) => Some(JumpTemplate { over, end }),
                    _ => None,
                };
            }
        }

        MoveTemplates { squares }
    }

    #[inline]
    pub fn square(&self, pos: Position) -> &SquareTemplates {
        &self.squares[pos.index()]
    }
}

static TEMPLATES: Lazy<MoveTemplates> = Lazy::new(MoveTemplates::build);

/// The process-wide table, built on first use.
#[inline]
pub fn templates() -> &'static MoveTemplates {
    &TEMPLATES
}

/// Directions (indices into [`DIRECTIONS`]) a piece may move or jump in.
#[inline]
pub fn directions_for(piece: Piece) -> &'static [usize] {
    match piece {
        Piece::RedKing | Piece::BlueKing => ALL_DIRECTIONS,
        Piece::RedMan => RED_FORWARD,
        Piece::BlueMan => BLUE_FORWARD,
    }
}

/// Forward directions for men of `color`.
#[inline]
pub fn forward_directions(color: PieceColor) -> &'static [usize] {
    directions_for(Piece::man(color))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: i32, col: i32) -> Position {
        Position::new(row, col).expect("on board")
    }

    #[test]
    fn test_forward_directions_match_color() {
        for &dir in forward_directions(PieceColor::Red) {
            assert_eq!(DIRECTIONS[dir].0, PieceColor::Red.direction() as i32);
        }
        for &dir in forward_directions(PieceColor::Blue) {
            assert_eq!(DIRECTIONS[dir].0, PieceColor::Blue.direction() as i32);
        }
        assert_eq!(directions_for(Piece::BlueKing).len(), 4);
    }

    #[test]
    fn test_center_square_has_all_templates() {
        let t = templates().square(pos(3, 2));
        for dir in 0..4 {
            assert!(t.step(dir).is_some());
            assert!(t.jump(dir).is_some());
        }
        let jump = t.jump(1).expect("south-east jump");
        assert_eq!(jump.over, pos(4, 3));
        assert_eq!(jump.end, pos(5, 4));
    }

    #[test]
    fn test_edges_are_clipped() {
        // Left edge, one row from the top.
        let t = templates().square(pos(1, 0));
        assert_eq!(t.step(0), None);
        assert_eq!(t.step(1), Some(pos(2, 1)));
        assert_eq!(t.step(2), None);
        assert_eq!(t.step(3), Some(pos(0, 1)));
        assert_eq!(t.jump(3), None);
        assert_eq!(
            t.jump(1),
            Some(JumpTemplate {
                over: pos(2, 1),
                end: pos(3, 2)
            })
        );
    }

    #[test]
    fn test_light_squares_are_empty() {
        let t = templates().square(pos(0, 0));
        assert_eq!(*t, SquareTemplates::default());
    }

    #[test]
    fn test_table_is_shared() {
        assert!(std::ptr::eq(templates(), templates()));
    }
}
