use crate::chess::{Color, File, Piece, Rank, Role, Square};
use bitflags::bitflags;
use derive_more::{Display, Error};
use proptest::prelude::*;
use std::{fmt, str::FromStr};

/// The side of the board a king castles towards.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, test_strategy::Arbitrary)]
pub enum CastlingSide {
    #[display(fmt = "O-O")]
    Kingside,
    #[display(fmt = "O-O-O")]
    Queenside,
}

impl CastlingSide {
    /// Where the king of the given [`Color`] lands.
    pub fn king_destination(&self, side: Color) -> Square {
        match self {
            CastlingSide::Kingside => Square::new(File::G, Rank::home(side)),
            CastlingSide::Queenside => Square::new(File::C, Rank::home(side)),
        }
    }

    /// Where the rook of the given [`Color`] starts.
    pub fn rook_origin(&self, side: Color) -> Square {
        match self {
            CastlingSide::Kingside => Square::new(File::H, Rank::home(side)),
            CastlingSide::Queenside => Square::new(File::A, Rank::home(side)),
        }
    }

    /// Where the rook of the given [`Color`] lands.
    pub fn rook_destination(&self, side: Color) -> Square {
        match self {
            CastlingSide::Kingside => Square::new(File::F, Rank::home(side)),
            CastlingSide::Queenside => Square::new(File::D, Rank::home(side)),
        }
    }
}

bitflags! {
    /// The castling rights in a chess [`Board`][`crate::chess::Board`].
    pub struct Castles: u8 {
        const WHITE_KINGSIDE = 0b0001;
        const WHITE_QUEENSIDE = 0b0010;
        const BLACK_KINGSIDE = 0b0100;
        const BLACK_QUEENSIDE = 0b1000;
    }
}

impl Castles {
    /// The right of the given [`Color`] to castle towards a [`CastlingSide`].
    pub fn right(side: Color, wing: CastlingSide) -> Self {
        match (side, wing) {
            (Color::White, CastlingSide::Kingside) => Castles::WHITE_KINGSIDE,
            (Color::White, CastlingSide::Queenside) => Castles::WHITE_QUEENSIDE,
            (Color::Black, CastlingSide::Kingside) => Castles::BLACK_KINGSIDE,
            (Color::Black, CastlingSide::Queenside) => Castles::BLACK_QUEENSIDE,
        }
    }

    /// Whether the given [`Color`] may still castle towards a [`CastlingSide`].
    pub fn has(&self, side: Color, wing: CastlingSide) -> bool {
        self.contains(Castles::right(side, wing))
    }

    /// The rights lost once a piece leaves or lands on this [`Square`].
    pub fn revoked_by(sq: Square) -> Self {
        match sq {
            Square::E1 => Castles::WHITE_KINGSIDE | Castles::WHITE_QUEENSIDE,
            Square::H1 => Castles::WHITE_KINGSIDE,
            Square::A1 => Castles::WHITE_QUEENSIDE,
            Square::E8 => Castles::BLACK_KINGSIDE | Castles::BLACK_QUEENSIDE,
            Square::H8 => Castles::BLACK_KINGSIDE,
            Square::A8 => Castles::BLACK_QUEENSIDE,
            _ => Castles::empty(),
        }
    }
}

impl Default for Castles {
    fn default() -> Self {
        Castles::all()
    }
}

impl Arbitrary for Castles {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (0u8..16).prop_map(Castles::from_bits_truncate).boxed()
    }
}

impl fmt::Display for Castles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }

        for side in Color::iter() {
            if self.has(side, CastlingSide::Kingside) {
                fmt::Display::fmt(&Piece(side, Role::King), f)?;
            }

            if self.has(side, CastlingSide::Queenside) {
                fmt::Display::fmt(&Piece(side, Role::Queen), f)?;
            }
        }

        Ok(())
    }
}

/// The reason why parsing [`Castles`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse castling rights")]
pub struct ParseCastlesError;

impl FromStr for Castles {
    type Err = ParseCastlesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            return Ok(Castles::empty());
        }

        let mut castles = Castles::empty();

        for c in s.chars() {
            let right = match Piece::try_from(c) {
                Ok(Piece(side, Role::King)) => Castles::right(side, CastlingSide::Kingside),
                Ok(Piece(side, Role::Queen)) => Castles::right(side, CastlingSide::Queenside),
                _ => return Err(ParseCastlesError),
            };

            if castles.contains(right) {
                return Err(ParseCastlesError);
            }

            castles |= right;
        }

        if castles.is_empty() {
            Err(ParseCastlesError)
        } else {
            Ok(castles)
        }
    }
}
