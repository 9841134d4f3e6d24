use crate::chess::Role;
use derive_more::{Display, Error};
use std::str::FromStr;
use test_strategy::Arbitrary;

/// A promotion specifier.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Arbitrary)]
pub enum Promotion {
    #[display(fmt = "")]
    None,
    #[display(fmt = "n")]
    Knight,
    #[display(fmt = "b")]
    Bishop,
    #[display(fmt = "r")]
    Rook,
    #[display(fmt = "q")]
    Queen,
}

impl Promotion {
    /// The [`Role`] the pawn is promoted to, if any.
    pub fn role(&self) -> Option<Role> {
        (*self).into()
    }
}

impl Default for Promotion {
    fn default() -> Self {
        Promotion::None
    }
}

impl From<Promotion> for Option<Role> {
    fn from(p: Promotion) -> Self {
        match p {
            Promotion::None => None,
            Promotion::Knight => Some(Role::Knight),
            Promotion::Bishop => Some(Role::Bishop),
            Promotion::Rook => Some(Role::Rook),
            Promotion::Queen => Some(Role::Queen),
        }
    }
}

/// The reason why a [`Role`] cannot be a [`Promotion`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "pawns can only promote to knight, bishop, rook, or queen")]
pub struct InvalidPromotion;

impl TryFrom<Role> for Promotion {
    type Error = InvalidPromotion;

    fn try_from(r: Role) -> Result<Self, Self::Error> {
        match r {
            Role::Knight => Ok(Promotion::Knight),
            Role::Bishop => Ok(Promotion::Bishop),
            Role::Rook => Ok(Promotion::Rook),
            Role::Queen => Ok(Promotion::Queen),
            Role::Pawn | Role::King => Err(InvalidPromotion),
        }
    }
}

impl FromStr for Promotion {
    type Err = InvalidPromotion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Promotion::None),
            _ => s.parse::<Role>().map_err(|_| InvalidPromotion)?.try_into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn promotion_has_an_equivalent_role(#[filter(#p != Promotion::None)] p: Promotion) {
        assert_eq!(p.role().map(Promotion::try_from), Some(Ok(p)));
    }

    #[test]
    fn no_promotion_has_no_role() {
        assert_eq!(Promotion::None.role(), None);
    }

    #[test]
    fn pawns_cannot_promote_to_pawns_or_kings() {
        assert_eq!(Promotion::try_from(Role::Pawn), Err(InvalidPromotion));
        assert_eq!(Promotion::try_from(Role::King), Err(InvalidPromotion));
    }

    #[proptest]
    fn parsing_printed_promotion_is_an_identity(p: Promotion) {
        assert_eq!(p.to_string().parse(), Ok(p));
    }
}
