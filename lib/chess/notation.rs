use crate::chess::{Board, CastlingSide, File, Move, Promotion, Rank, Role, Square};
use derive_more::{Display, Error};
use std::fmt::{self, Write};
use std::str::FromStr;

/// Marks a move that gives check or checkmate.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Suffix {
    #[display(fmt = "+")]
    Check,
    #[display(fmt = "#")]
    Checkmate,
}

/// A move in [Standard Algebraic Notation].
///
/// [Standard Algebraic Notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation#SAN
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum San {
    Castling {
        side: CastlingSide,
        suffix: Option<Suffix>,
    },
    Move {
        role: Role,
        file: Option<File>,
        rank: Option<Rank>,
        capture: bool,
        whither: Square,
        promotion: Promotion,
        suffix: Option<Suffix>,
    },
}

impl San {
    /// Whether this notation describes the given [`Move`], played on the given [`Board`].
    fn matches(&self, board: &Board, m: &Move) -> bool {
        match *self {
            San::Castling { side, .. } => m.castling == Some(side),
            San::Move {
                role,
                file,
                rank,
                whither,
                promotion,
                ..
            } => {
                m.castling.is_none()
                    && m.whither == whither
                    && board.role_on(m.whence) == Some(role)
                    && match file {
                        Some(f) => m.whence.file() == f,
                        None if role == Role::Pawn => m.whence.file() == whither.file(),
                        None => true,
                    }
                    && rank.map_or(true, |r| m.whence.rank() == r)
                    && match promotion {
                        Promotion::None => matches!(m.promotion, Promotion::None | Promotion::Queen),
                        p => m.promotion == p,
                    }
            }
        }
    }
}

impl fmt::Display for San {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match *self {
            San::Castling { side, suffix } => {
                write!(f, "{}", side)?;
                suffix
            }

            San::Move {
                role,
                file,
                rank,
                capture,
                whither,
                promotion,
                suffix,
            } => {
                if role != Role::Pawn {
                    f.write_char(role.letter().to_ascii_uppercase())?;
                }

                if let Some(file) = file {
                    write!(f, "{}", file)?;
                }

                if let Some(rank) = rank {
                    write!(f, "{}", rank)?;
                }

                if capture {
                    f.write_char('x')?;
                }

                write!(f, "{}", whither)?;

                if let Some(r) = promotion.role() {
                    write!(f, "={}", r.letter().to_ascii_uppercase())?;
                }

                suffix
            }
        };

        match suffix {
            Some(s) => write!(f, "{}", s),
            None => Ok(()),
        }
    }
}

/// The reason why parsing [`San`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "expected move in standard algebraic notation")]
pub struct ParseSanError;

impl FromStr for San {
    type Err = ParseSanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut s = s.trim_end_matches(['!', '?']);

        let suffix = if let Some(r) = s.strip_suffix('#') {
            s = r;
            Some(Suffix::Checkmate)
        } else if let Some(r) = s.strip_suffix('+') {
            s = r;
            Some(Suffix::Check)
        } else {
            None
        };

        match s {
            "O-O" | "0-0" => {
                return Ok(San::Castling {
                    side: CastlingSide::Kingside,
                    suffix,
                })
            }

            "O-O-O" | "0-0-0" => {
                return Ok(San::Castling {
                    side: CastlingSide::Queenside,
                    suffix,
                })
            }

            _ if !s.is_ascii() || s.len() < 2 => return Err(ParseSanError),
            _ => {}
        }

        // Lowercase letters would read as files unless introduced by `=`.
        let promotion = match s.chars().last() {
            Some(c @ ('N' | 'B' | 'R' | 'Q')) => {
                s = &s[..s.len() - 1];
                s = s.strip_suffix('=').unwrap_or(s);
                let role = Role::try_from(c.to_ascii_lowercase()).map_err(|_| ParseSanError)?;
                Promotion::try_from(role).map_err(|_| ParseSanError)?
            }

            Some(c @ ('n' | 'b' | 'r' | 'q')) if s[..s.len() - 1].ends_with('=') => {
                s = &s[..s.len() - 2];
                let role = Role::try_from(c).map_err(|_| ParseSanError)?;
                Promotion::try_from(role).map_err(|_| ParseSanError)?
            }

            _ => Promotion::None,
        };

        if s.len() < 2 {
            return Err(ParseSanError);
        }

        let (head, whither) = s.split_at(s.len() - 2);
        let whither = whither.parse().map_err(|_| ParseSanError)?;

        let (head, capture) = match head.strip_suffix('x') {
            Some(head) => (head, true),
            None => (head, false),
        };

        let mut chars = head.chars().peekable();

        let role = match chars.peek() {
            Some(&c) if matches!(c, 'N' | 'B' | 'R' | 'Q' | 'K') => {
                chars.next();
                Role::try_from(c.to_ascii_lowercase()).map_err(|_| ParseSanError)?
            }

            _ => Role::Pawn,
        };

        let file = match chars.peek().map(|&c| File::try_from(c)) {
            Some(Ok(f)) => {
                chars.next();
                Some(f)
            }

            _ => None,
        };

        let rank = match chars.peek().map(|&c| Rank::try_from(c)) {
            Some(Ok(r)) => {
                chars.next();
                Some(r)
            }

            _ => None,
        };

        if chars.next().is_some() || (role != Role::Pawn && promotion != Promotion::None) {
            return Err(ParseSanError);
        }

        Ok(San::Move {
            role,
            file,
            rank,
            capture,
            whither,
            promotion,
            suffix,
        })
    }
}

/// The reason why a move could not be played.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum InvalidMove {
    #[display(fmt = "no move given")]
    EmptyInput,
    #[display(fmt = "`{}` is neither in coordinate nor in algebraic notation", _0)]
    UnknownNotation(#[error(not(source))] String),
    #[display(fmt = "`{}` matches more than one legal move", _0)]
    AmbiguousNotation(#[error(not(source))] String),
    #[display(fmt = "`{}` is not a legal move", _0)]
    IllegalMove(#[error(not(source))] String),
}

/// Parses a move in [coordinate notation], such as `e2e4` or `e7e8q`.
///
/// [coordinate notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Pure_coordinate_notation
fn coordinates(s: &str) -> Option<(Square, Square, Promotion)> {
    if !s.is_ascii() || !(4..=5).contains(&s.len()) {
        return None;
    }

    let whence = s[..2].parse().ok()?;
    let whither = s[2..4].parse().ok()?;
    let promotion = s[4..].parse().ok()?;
    Some((whence, whither, promotion))
}

impl Board {
    /// Resolves text in coordinate or algebraic notation to a legal [`Move`].
    ///
    /// Coordinate notation is tried first. A pawn reaching the last rank promotes to a queen
    /// unless told otherwise.
    pub fn parse(&self, text: &str) -> Result<Move, InvalidMove> {
        let text = text.trim();

        if text.is_empty() {
            return Err(InvalidMove::EmptyInput);
        }

        let moves = self.legal_moves();

        if let Some((whence, whither, promotion)) = coordinates(text) {
            return moves
                .into_iter()
                .filter(|m| m.whence == whence && m.whither == whither)
                .find(|m| match promotion {
                    Promotion::None => matches!(m.promotion, Promotion::None | Promotion::Queen),
                    p => m.promotion == p,
                })
                .ok_or_else(|| InvalidMove::IllegalMove(text.into()));
        }

        let san: San = text
            .parse()
            .map_err(|_| InvalidMove::UnknownNotation(text.into()))?;

        let mut candidates = moves.into_iter().filter(|m| san.matches(self, m));

        match (candidates.next(), candidates.next()) {
            (Some(m), None) => Ok(m),
            (Some(_), Some(_)) => Err(InvalidMove::AmbiguousNotation(text.into())),
            (None, _) => Err(InvalidMove::IllegalMove(text.into())),
        }
    }

    /// The [`San`] of a legal [`Move`] played on this board.
    pub fn san(&self, m: Move) -> San {
        let next = self.apply(m);

        let suffix = match (next.is_check(), next.legal_moves().is_empty()) {
            (false, _) => None,
            (true, false) => Some(Suffix::Check),
            (true, true) => Some(Suffix::Checkmate),
        };

        if let Some(side) = m.castling {
            return San::Castling { side, suffix };
        }

        let role = self.role_on(m.whence).unwrap_or(Role::Pawn);
        let capture = self.captured(m).is_some();

        let (file, rank) = match role {
            Role::Pawn => (capture.then_some(m.whence.file()), None),
            Role::King => (None, None),
            _ => {
                let rivals: Vec<_> = self
                    .legal_moves()
                    .into_iter()
                    .filter(|r| r.whither == m.whither && r.whence != m.whence)
                    .filter(|r| self.role_on(r.whence) == Some(role))
                    .map(|r| r.whence)
                    .collect();

                if rivals.is_empty() {
                    (None, None)
                } else if rivals.iter().all(|sq| sq.file() != m.whence.file()) {
                    (Some(m.whence.file()), None)
                } else if rivals.iter().all(|sq| sq.rank() != m.whence.rank()) {
                    (None, Some(m.whence.rank()))
                } else {
                    (Some(m.whence.file()), Some(m.whence.rank()))
                }
            }
        };

        San::Move {
            role,
            file,
            rank,
            capture,
            whither: m.whither,
            promotion: m.promotion,
            suffix,
        }
    }
}
