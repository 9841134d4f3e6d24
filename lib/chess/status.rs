use crate::chess::{Board, Color, Key, Role};
use derive_more::Display;
use test_strategy::Arbitrary;

/// The state of a chess game as seen from its current position.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
pub enum Status {
    #[display(fmt = "Ongoing")]
    Ongoing,

    #[display(fmt = "Check!")]
    Check,

    #[display(fmt = "Checkmate! {_0} wins!")]
    Checkmate(Color),

    #[display(fmt = "Stalemate - Draw")]
    Stalemate,

    #[display(fmt = "Draw - Insufficient material")]
    DrawInsufficientMaterial,

    #[display(fmt = "Draw - Fifty move rule")]
    DrawFiftyMoves,

    #[display(fmt = "Draw - Threefold repetition")]
    DrawRepetition,
}

impl Status {
    /// Evaluates the [`Board`] given the [`Key`]s of every position reached so far.
    ///
    /// Conditions are checked in order and the first one that holds wins, so a
    /// checkmate delivered on the hundredth halfmove is still a checkmate.
    pub fn evaluate(board: &Board, history: &[Key]) -> Self {
        if board.legal_moves().is_empty() {
            return if board.is_check() {
                Status::Checkmate(!board.turn)
            } else {
                Status::Stalemate
            };
        }

        if board.is_material_insufficient() {
            return Status::DrawInsufficientMaterial;
        }

        if board.halfmoves >= 100 {
            return Status::DrawFiftyMoves;
        }

        let key = board.key();
        if history.iter().filter(|&&k| k == key).count() >= 3 {
            return Status::DrawRepetition;
        }

        if board.is_check() {
            Status::Check
        } else {
            Status::Ongoing
        }
    }

    /// Whether no more moves can be played.
    pub fn is_over(&self) -> bool {
        matches!(self, Status::Checkmate(_) | Status::Stalemate)
    }

    /// Whether the game is [drawn], whether or not it may still continue.
    ///
    /// [drawn]: https://www.chessprogramming.org/Draw
    pub fn is_draw(&self) -> bool {
        use Status::*;
        matches!(
            self,
            Stalemate | DrawInsufficientMaterial | DrawFiftyMoves | DrawRepetition
        )
    }

    /// The winning side, if any.
    pub fn winner(&self) -> Option<Color> {
        match *self {
            Status::Checkmate(c) => Some(c),
            _ => None,
        }
    }
}

impl Board {
    /// Whether neither side has enough material left to deliver checkmate.
    ///
    /// That is the case with bare kings, with a single minor piece, or with any number of
    /// bishops as long as they all stand on squares of the same color.
    pub fn is_material_insufficient(&self) -> bool {
        let heavy = self.by_role(Role::Pawn) | self.by_role(Role::Rook) | self.by_role(Role::Queen);
        if !heavy.is_empty() {
            return false;
        }

        let knights = self.by_role(Role::Knight);
        let bishops = self.by_role(Role::Bishop);

        if (knights | bishops).len() <= 1 {
            return true;
        }

        knights.is_empty() && {
            let mut shades = bishops.into_iter().map(|sq| sq.is_light());
            let first = shades.next();
            shades.all(|s| Some(s) == first)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::ParseFenError;
    use test_strategy::proptest;

    #[proptest]
    fn status_is_either_draw_decisive_or_undecided(s: Status) {
        let undecided = matches!(s, Status::Ongoing | Status::Check);
        assert_eq!(
            [s.is_draw(), s.winner().is_some(), undecided].iter().filter(|&&b| b).count(),
            1
        );
    }

    #[proptest]
    fn neither_side_wins_if_draw(#[filter(#s.is_draw())] s: Status) {
        assert_eq!(s.winner(), None);
    }

    #[proptest]
    fn side_that_checkmates_wins(c: Color) {
        assert_eq!(Status::Checkmate(c).winner(), Some(c));
        assert!(Status::Checkmate(c).is_over());
    }

    #[proptest]
    fn status_of_board_with_legal_moves_is_not_over(
        #[filter(!#b.legal_moves().is_empty())] b: Board,
    ) {
        assert!(!Status::evaluate(&b, &[b.key()]).is_over());
    }

    #[proptest]
    fn game_is_over_only_when_no_legal_moves_remain(b: Board) {
        let status = Status::evaluate(&b, &[b.key()]);
        assert_eq!(status.is_over(), b.legal_moves().is_empty());
    }

    #[test]
    fn checkmate_is_won_by_the_side_that_just_moved() -> Result<(), ParseFenError> {
        let b: Board = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3".parse()?;
        assert_eq!(Status::evaluate(&b, &[b.key()]), Status::Checkmate(Color::Black));
        assert_eq!(Status::Checkmate(Color::Black).to_string(), "Checkmate! Black wins!");
        Ok(())
    }

    #[test]
    fn stalemate_is_a_draw() -> Result<(), ParseFenError> {
        let b: Board = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1".parse()?;
        assert_eq!(Status::evaluate(&b, &[b.key()]), Status::Stalemate);
        Ok(())
    }

    #[test]
    fn checkmate_takes_precedence_over_fifty_move_rule() -> Result<(), ParseFenError> {
        let b: Board = "7k/6Q1/6K1/8/8/8/8/8 b - - 120 90".parse()?;
        assert_eq!(Status::evaluate(&b, &[b.key()]), Status::Checkmate(Color::White));
        Ok(())
    }

    #[test]
    fn fifty_move_rule_applies_after_a_hundred_halfmoves() -> Result<(), ParseFenError> {
        let b: Board = "4k3/8/8/8/8/8/8/R3K3 b - - 100 60".parse()?;
        assert_eq!(Status::evaluate(&b, &[b.key()]), Status::DrawFiftyMoves);

        let b: Board = "4k3/8/8/8/8/8/8/R3K3 b - - 99 60".parse()?;
        assert_eq!(Status::evaluate(&b, &[b.key()]), Status::Ongoing);
        Ok(())
    }

    #[test]
    fn repetition_requires_three_occurrences() -> Result<(), ParseFenError> {
        let b: Board = "4k3/8/8/8/8/8/8/R3K3 w - - 0 1".parse()?;
        assert_eq!(Status::evaluate(&b, &[b.key(); 2]), Status::Ongoing);
        assert_eq!(Status::evaluate(&b, &[b.key(); 3]), Status::DrawRepetition);
        Ok(())
    }

    #[test]
    fn check_is_reported() -> Result<(), ParseFenError> {
        let b: Board = "4k3/8/8/8/8/8/8/4R1K1 b - - 0 1".parse()?;
        assert_eq!(Status::evaluate(&b, &[b.key()]), Status::Check);
        Ok(())
    }

    #[test]
    fn material_is_insufficient_without_mating_potential() -> Result<(), ParseFenError> {
        for fen in [
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/2N1K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/2B1K3 w - - 0 1",
            "4kb2/8/8/8/8/8/8/2B1K3 w - - 0 1",
        ] {
            let b: Board = fen.parse()?;
            assert!(b.is_material_insufficient(), "{}", fen);
            assert_eq!(Status::evaluate(&b, &[b.key()]), Status::DrawInsufficientMaterial);
        }

        Ok(())
    }

    #[test]
    fn material_is_sufficient_with_mating_potential() -> Result<(), ParseFenError> {
        for fen in [
            "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/R3K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/1NB1K3 w - - 0 1",
            "4kn2/8/8/8/8/8/8/2N1K3 w - - 0 1",
            "4k1b1/8/8/8/8/8/8/2B1K3 w - - 0 1",
        ] {
            let b: Board = fen.parse()?;
            assert!(!b.is_material_insufficient(), "{}", fen);
        }

        Ok(())
    }
}
