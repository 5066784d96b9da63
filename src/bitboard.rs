use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// A 64-square bitboard. Bit `i` is the square `row * 8 + col`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bitboard(u64);

impl Bitboard {
    /// No squares.
    #[inline]
    pub const fn empty() -> Self {
        Bitboard(0)
    }

    /// Just the square `index`.
    #[inline]
    pub fn single(index: usize) -> Self {
        debug_assert!(index < 64);
        Bitboard(1u64 << index)
    }

    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Bitboard(bits)
    }

    #[inline]
    pub const fn bits(&self) -> u64 {
        self.0
    }

    #[inline]
    pub fn get(&self, index: usize) -> bool {
        debug_assert!(index < 64);
        (self.0 >> index) & 1 != 0
    }

    #[inline]
    pub fn set(&mut self, index: usize) {
        debug_assert!(index < 64);
        self.0 |= 1u64 << index;
    }

    #[inline]
    pub fn clear(&mut self, index: usize) {
        debug_assert!(index < 64);
        self.0 &= !(1u64 << index);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True if every bit of `other` is also set here.
    #[inline]
    pub fn contains(&self, other: Bitboard) -> bool {
        self.0 & other.0 == other.0
    }

    /// How many squares are in the set.
    #[inline]
    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Square indices in ascending order.
    #[inline]
    pub fn iter_ones(&self) -> BitIterator {
        BitIterator { bits: self.0 }
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0 |= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

/// Yields the squares of a `Bitboard`, see [`Bitboard::iter_ones`].
pub struct BitIterator {
    bits: u64,
}

impl Iterator for BitIterator {
    type Item = usize;
    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.bits == 0 {
            return None;
        }
        let bit = self.bits.trailing_zeros() as usize;
        self.bits &= self.bits - 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}
