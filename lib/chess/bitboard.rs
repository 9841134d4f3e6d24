use crate::chess::{Color, File, Rank, Square};
use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Constructor, Not};
use std::fmt::{self, Write};

/// A set of squares on a chess board.
#[derive(
    Default,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Constructor,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
#[repr(transparent)]
pub struct Bitboard(u64);

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('\n')?;
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                let sq = Square::new(file, rank);
                f.write_char(if self.contains(sq) { '■' } else { '◻' })?;
                f.write_char(if file < File::H { ' ' } else { '\n' })?;
            }
        }

        Ok(())
    }
}

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const BISHOP_STEPS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

const ROOK_STEPS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

const KING_STEPS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

impl Bitboard {
    /// An empty board.
    pub const fn empty() -> Self {
        Bitboard(0)
    }

    /// A full board.
    pub const fn full() -> Self {
        Bitboard(u64::MAX)
    }

    /// The number of [`Square`]s in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as _
    }

    /// Whether the board is empty.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Whether this [`Square`] is in the set.
    pub fn contains(&self, sq: Square) -> bool {
        !(*self & sq.bitboard()).is_empty()
    }

    /// Adds a [`Square`] to this set.
    pub fn with(self, sq: Square) -> Self {
        self | sq.bitboard()
    }

    /// Removes a [`Square`] from this set.
    pub fn without(self, sq: Square) -> Self {
        self & !sq.bitboard()
    }

    /// Squares one step away from `sq` in each of the given directions.
    pub fn jumps(sq: Square, steps: &[(i8, i8)]) -> Self {
        steps
            .iter()
            .filter_map(|&(df, dr)| sq.offset(df, dr))
            .collect()
    }

    /// Casts rays from `sq` in each of the given directions.
    ///
    /// Each ray includes the first occupied square it reaches and stops there.
    /// The origin itself is never part of the result.
    ///
    /// # Example
    /// ```
    /// # use lib::chess::*;
    /// assert_eq!(
    ///     Vec::from_iter(Bitboard::rays(Square::E2, &[(-1, 1), (1, -1)], Square::C4.bitboard())),
    ///     vec![Square::F1, Square::D3, Square::C4]
    /// );
    /// ```
    pub fn rays(sq: Square, steps: &[(i8, i8)], occupied: Bitboard) -> Self {
        let mut bitboard = Bitboard::empty();

        for &(df, dr) in steps {
            let mut cursor = sq;
            while let Some(next) = cursor.offset(df, dr) {
                bitboard = bitboard.with(next);
                if occupied.contains(next) {
                    break;
                }

                cursor = next;
            }
        }

        bitboard
    }

    /// Squares attacked by a pawn of the given [`Color`] standing on `sq`.
    pub fn pawn_attacks(sq: Square, side: Color) -> Self {
        Bitboard::jumps(sq, &[(-1, side.forward()), (1, side.forward())])
    }

    /// Squares attacked by a knight standing on `sq`.
    pub fn knight_attacks(sq: Square) -> Self {
        Bitboard::jumps(sq, &KNIGHT_STEPS)
    }

    /// Squares attacked by a king standing on `sq`.
    pub fn king_attacks(sq: Square) -> Self {
        Bitboard::jumps(sq, &KING_STEPS)
    }

    /// Squares attacked by a bishop standing on `sq` given the occupied squares.
    pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Self {
        Bitboard::rays(sq, &BISHOP_STEPS, occupied)
    }

    /// Squares attacked by a rook standing on `sq` given the occupied squares.
    pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Self {
        Bitboard::rays(sq, &ROOK_STEPS, occupied)
    }

    /// Squares attacked by a queen standing on `sq` given the occupied squares.
    pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Self {
        Bitboard::bishop_attacks(sq, occupied) | Bitboard::rook_attacks(sq, occupied)
    }
}

impl From<Square> for Bitboard {
    fn from(sq: Square) -> Self {
        sq.bitboard()
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Bitboard::empty(), |bb, sq| bb.with(sq))
    }
}

/// An iterator over the [`Square`]s in a [`Bitboard`], in ascending order.
#[derive(Debug)]
pub struct Squares(u64);

impl Iterator for Squares {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            None
        } else {
            let sq = Square::from_index(self.0.trailing_zeros() as _);
            self.0 &= self.0 - 1;
            Some(sq)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as _;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Squares {}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = Squares;

    fn into_iter(self) -> Self::IntoIter {
        Squares(self.0)
    }
}
