use crate::chess::{CastlingSide, Promotion, Square};
use derive_more::{DebugCustom, Display};
use test_strategy::Arbitrary;

/// A chess move.
///
/// A move is just a value describing a piece leaving a [`Square`] and landing on another,
/// it only takes effect once [applied][`crate::chess::Board::apply`] to a board.
#[derive(DebugCustom, Display, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
#[debug(fmt = "Move({})", self)]
#[display(fmt = "{}{}{}", whence, whither, promotion)]
pub struct Move {
    /// The source [`Square`].
    pub whence: Square,
    /// The destination [`Square`].
    pub whither: Square,
    /// The [`Promotion`] specifier.
    pub promotion: Promotion,
    /// Whether this is a pawn capturing [en passant].
    ///
    /// [en passant]: https://www.chessprogramming.org/En_passant
    pub en_passant: bool,
    /// The side towards which the king castles, if this is a castling move.
    pub castling: Option<CastlingSide>,
}

impl Move {
    /// A move that is neither a promotion, an en passant capture, nor castling.
    pub fn new(whence: Square, whither: Square) -> Self {
        Move {
            whence,
            whither,
            promotion: Promotion::None,
            en_passant: false,
            castling: None,
        }
    }

    /// A pawn move that promotes.
    pub fn promote(whence: Square, whither: Square, promotion: Promotion) -> Self {
        Move {
            promotion,
            ..Move::new(whence, whither)
        }
    }

    /// A pawn capturing en passant.
    pub fn capture_en_passant(whence: Square, whither: Square) -> Self {
        Move {
            en_passant: true,
            ..Move::new(whence, whither)
        }
    }

    /// A king castling towards a [`CastlingSide`].
    pub fn castle(whence: Square, whither: Square, side: CastlingSide) -> Self {
        Move {
            castling: Some(side),
            ..Move::new(whence, whither)
        }
    }

    /// Whether this is a castling move.
    pub fn is_castling(&self) -> bool {
        self.castling.is_some()
    }

    /// The [`Square`] where a pawn captured en passant stands.
    pub fn en_passant_victim(&self) -> Option<Square> {
        if self.en_passant {
            Some(Square::new(self.whither.file(), self.whence.rank()))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn move_is_printed_in_pure_coordinate_notation(a: Square, b: Square, p: Promotion) {
        assert_eq!(
            Move::promote(a, b, p).to_string(),
            format!("{a}{b}{p}")
        );
    }

    #[proptest]
    fn plain_moves_carry_no_special_flags(a: Square, b: Square) {
        let m = Move::new(a, b);
        assert_eq!(m.promotion, Promotion::None);
        assert!(!m.is_castling());
        assert_eq!(m.en_passant_victim(), None);
    }

    #[test]
    fn en_passant_victim_stands_beside_the_capturing_pawn() {
        let m = Move::capture_en_passant(Square::E5, Square::D6);
        assert_eq!(m.en_passant_victim(), Some(Square::D5));
    }

    #[test]
    fn castling_is_printed_as_king_move() {
        let m = Move::castle(Square::E1, Square::G1, CastlingSide::Kingside);
        assert_eq!(m.to_string(), "e1g1");
    }
}
