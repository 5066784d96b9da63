//! Legal move generation.
//!
//! Captures are compulsory: once any jump is found for the side to move, plain
//! moves collected so far are dropped and no more are generated. A jump that
//! leaves the same piece with another capture is extended into every distinct
//! continuation, each becoming its own move.

use crate::board::Board;
use crate::color::PieceColor;
use crate::piece::Piece;
use crate::position::Position;
use crate::r#move::{Jump, Move};
use crate::templates::{directions_for, templates};

impl Board {
    #[cfg_attr(feature = "hotpath", hotpath::measure)]
    pub fn legal_moves_for(&self, color: PieceColor) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut found_jump = false;

        for idx in self.pieces_for(color).iter_ones() {
            let from = Position::from_index(idx);
            let piece = Piece::new(color, self.kings().get(idx));
            let square = templates().square(from);

            for &dir in directions_for(piece) {
                let Some(template) = square.jump(dir) else {
                    continue;
                };
                let jump = Jump {
                    start: from,
                    over: template.over,
                    end: template.end,
                };
                if !jump.is_valid(self, color) {
                    continue;
                }
                if !found_jump {
                    moves.clear();
                    found_jump = true;
                }
                let mut chain = vec![jump];
                let mut scratch = *self;
                jump.apply(&mut scratch);
                scratch.extend_chain(piece, &mut chain, &mut moves);
            }

            if found_jump {
                continue;
            }

            for &dir in directions_for(piece) {
                if let Some(end) = square.step(dir) {
                    if self.is_empty_square(end) {
                        moves.push(Move::Plain { start: from, end });
                    }
                }
            }
        }

        moves
    }

    /// True if `color` has at least one capture available.
    pub fn has_jump(&self, color: PieceColor) -> bool {
        self.pieces_for(color).iter_ones().any(|idx| {
            let from = Position::from_index(idx);
            let piece = Piece::new(color, self.kings().get(idx));
            let square = templates().square(from);
            directions_for(piece).iter().any(|&dir| {
                square.jump(dir).is_some_and(|t| {
                    Jump {
                        start: from,
                        over: t.over,
                        end: t.end,
                    }
                    .is_valid(self, color)
                })
            })
        })
    }

    /// `self` is a scratch board with every jump in `chain` already applied.
    /// Pushes one move per maximal continuation of the chain's piece.
    fn extend_chain(&self, piece: Piece, chain: &mut Vec<Jump>, out: &mut Vec<Move>) {
        let at = chain[chain.len() - 1].end;
        let color = piece.color();
        let square = templates().square(at);
        let mut extended = false;

        for &dir in directions_for(piece) {
            let Some(template) = square.jump(dir) else {
                continue;
            };
            let next = Jump {
                start: at,
                over: template.over,
                end: template.end,
            };
            if !next.is_valid(self, color) {
                continue;
            }
            extended = true;
            let mut scratch = *self;
            next.apply(&mut scratch);
            chain.push(next);
            scratch.extend_chain(piece, chain, out);
            chain.pop();
        }

        if !extended {
            out.push(if chain.len() == 1 {
                Move::Jump(chain[0])
            } else {
                Move::Multi(chain.clone())
            });
        }
    }
}
