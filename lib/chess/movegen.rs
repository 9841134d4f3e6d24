use crate::chess::{Bitboard, Board, CastlingSide, File, Move, Piece, Promotion, Rank, Role, Square};
use rayon::prelude::*;

const PROMOTIONS: [Promotion; 4] = [
    Promotion::Queen,
    Promotion::Rook,
    Promotion::Bishop,
    Promotion::Knight,
];

impl Board {
    /// Moves that obey how pieces move, whether or not they leave the king in check.
    pub fn pseudo_legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        let side = self.turn;
        let occupied = self.occupied();
        let targets = !self.by_color(side);

        for (Piece(_, role), whence) in self.iter().filter(|(p, _)| p.color() == side) {
            let attacks = match role {
                Role::Pawn => {
                    self.pawn_moves(whence, &mut moves);
                    continue;
                }
                Role::Knight => Bitboard::knight_attacks(whence),
                Role::Bishop => Bitboard::bishop_attacks(whence, occupied),
                Role::Rook => Bitboard::rook_attacks(whence, occupied),
                Role::Queen => Bitboard::queen_attacks(whence, occupied),
                Role::King => {
                    self.castling_moves(whence, &mut moves);
                    Bitboard::king_attacks(whence)
                }
            };

            moves.extend((attacks & targets).into_iter().map(|whither| Move::new(whence, whither)));
        }

        moves
    }

    /// Moves that may actually be played, in no particular order.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = self.pseudo_legal_moves();
        moves.retain(|&m| self.is_safe(m));
        moves
    }

    /// Whether a [`Move`] may be played on this board.
    pub fn is_legal(&self, m: Move) -> bool {
        self.pseudo_legal_moves().contains(&m) && self.is_safe(m)
    }

    /// Counts the leaf nodes of the legal move tree to the given depth.
    ///
    /// See [perft](https://www.chessprogramming.org/Perft).
    pub fn perft(&self, depth: u8) -> usize {
        match depth {
            0 => 1,
            1 => self.legal_moves().len(),
            d => self
                .legal_moves()
                .into_par_iter()
                .map(|m| self.apply(m).perft(d - 1))
                .sum(),
        }
    }

    /// Whether the side to move keeps its king out of check after playing this move.
    fn is_safe(&self, m: Move) -> bool {
        let side = self.turn;
        let next = self.apply(m);
        next.king(side).map_or(true, |k| !next.is_attacked(k, !side))
    }

    fn pawn_moves(&self, whence: Square, moves: &mut Vec<Move>) {
        let side = self.turn;
        let occupied = self.occupied();
        let forward = side.forward();

        let mut push = |whither: Square| {
            if whither.rank() == Rank::last(side) {
                moves.extend(PROMOTIONS.map(|p| Move::promote(whence, whither, p)));
            } else {
                moves.push(Move::new(whence, whither));
            }
        };

        if let Some(single) = whence.offset(0, forward).filter(|&sq| !occupied.contains(sq)) {
            push(single);

            let start = Rank::home(side).index() as i8 + forward;
            if whence.rank().index() as i8 == start {
                if let Some(double) = whence.offset(0, 2 * forward).filter(|&sq| !occupied.contains(sq)) {
                    push(double);
                }
            }
        }

        let captures = Bitboard::pawn_attacks(whence, side);
        for whither in captures & self.by_color(!side) {
            push(whither);
        }

        if let Some(ep) = self.en_passant.filter(|&sq| captures.contains(sq)) {
            moves.push(Move::capture_en_passant(whence, ep));
        }
    }

    fn castling_moves(&self, whence: Square, moves: &mut Vec<Move>) {
        let side = self.turn;
        let home = Rank::home(side);

        if whence != Square::new(File::E, home) || self.is_check() {
            return;
        }

        for wing in [CastlingSide::Kingside, CastlingSide::Queenside] {
            let rook = wing.rook_origin(side);
            let whither = wing.king_destination(side);
            let transit = wing.rook_destination(side);

            if !self.castles.has(side, wing) || self[rook] != Some(Piece(side, Role::Rook)) {
                continue;
            }

            let path: Bitboard = Square::iter()
                .filter(|sq| sq.rank() == home)
                .filter(|sq| {
                    let (lo, hi) = (whence.file().min(rook.file()), whence.file().max(rook.file()));
                    sq.file() > lo && sq.file() < hi
                })
                .collect();

            if !(path & self.occupied()).is_empty() {
                continue;
            }

            if [transit, whither].iter().any(|&sq| self.is_attacked(sq, !side)) {
                continue;
            }

            moves.push(Move::castle(whence, whither, wing));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::ParseFenError;
    use proptest::sample::Selector;
    use test_strategy::proptest;

    #[proptest]
    fn legal_moves_never_leave_the_king_in_check(b: Board) {
        for m in b.legal_moves() {
            let next = b.apply(m);
            let k = next.king(b.turn).unwrap();
            assert!(!next.is_attacked(k, next.turn));
        }
    }

    #[proptest]
    fn legal_moves_are_pseudo_legal(b: Board) {
        let pseudo = b.pseudo_legal_moves();
        for m in b.legal_moves() {
            assert!(pseudo.contains(&m));
        }
    }

    #[proptest]
    fn legal_moves_only_move_pieces_of_the_side_to_move(b: Board) {
        for m in b.legal_moves() {
            assert_eq!(b[m.whence].map(|p| p.color()), Some(b.turn));
            assert_ne!(b[m.whither].map(|p| p.color()), Some(b.turn));
        }
    }

    #[proptest]
    fn legal_moves_never_capture_the_king(b: Board) {
        for m in b.legal_moves() {
            assert_ne!(b[m.whither].map(|p| p.role()), Some(Role::King));
        }
    }

    #[proptest]
    fn is_legal_agrees_with_legal_moves(
        #[filter(!#b.legal_moves().is_empty())] b: Board,
        selector: Selector,
        m: Move,
    ) {
        assert!(b.is_legal(selector.select(b.legal_moves())));
        assert_eq!(b.is_legal(m), b.legal_moves().contains(&m));
    }

    #[test]
    fn there_are_twenty_legal_moves_in_the_initial_position() {
        assert_eq!(Board::default().legal_moves().len(), 20);
    }

    #[test]
    fn pawns_reaching_the_last_rank_promote_to_any_of_four_roles() -> Result<(), ParseFenError> {
        let b: Board = "8/P6k/8/8/8/8/8/K7 w - - 0 1".parse()?;
        let promotions: Vec<_> = b
            .legal_moves()
            .into_iter()
            .filter(|m| m.whence == Square::A7)
            .map(|m| m.promotion)
            .collect();

        assert_eq!(promotions.len(), 4);
        for p in PROMOTIONS {
            assert!(promotions.contains(&p));
        }

        Ok(())
    }

    #[test]
    fn king_may_not_castle_through_an_attacked_square() -> Result<(), ParseFenError> {
        let b: Board = "4k3/8/8/8/8/8/5r2/R3K2R w KQ - 0 1".parse()?;
        let castles: Vec<_> = b.legal_moves().into_iter().filter(|m| m.is_castling()).collect();
        assert_eq!(castles, vec![Move::castle(Square::E1, Square::C1, CastlingSide::Queenside)]);
        Ok(())
    }

    #[test]
    fn king_may_not_castle_out_of_check() -> Result<(), ParseFenError> {
        let b: Board = "4k3/8/8/8/8/8/4r3/R3K2R w KQ - 0 1".parse()?;
        assert!(!b.legal_moves().iter().any(|m| m.is_castling()));
        Ok(())
    }

    #[test]
    fn queenside_castling_requires_the_knight_square_to_be_empty() -> Result<(), ParseFenError> {
        let b: Board = "4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1".parse()?;
        let castles: Vec<_> = b.legal_moves().into_iter().filter(|m| m.is_castling()).collect();
        assert_eq!(castles, vec![Move::castle(Square::E1, Square::G1, CastlingSide::Kingside)]);
        Ok(())
    }

    #[test]
    fn queenside_castling_ignores_attacks_on_the_knight_square() -> Result<(), ParseFenError> {
        let b: Board = "1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1".parse()?;
        assert!(b.is_legal(Move::castle(Square::E1, Square::C1, CastlingSide::Queenside)));
        Ok(())
    }

    #[test]
    fn en_passant_is_illegal_if_it_exposes_the_king() -> Result<(), ParseFenError> {
        let b: Board = "8/8/8/K2pP2r/8/8/8/7k w - d6 0 2".parse()?;
        assert!(!b.is_legal(Move::capture_en_passant(Square::E5, Square::D6)));
        Ok(())
    }

    #[test]
    fn perft_counts_leaf_nodes() {
        let b = Board::default();
        assert_eq!(b.perft(0), 1);
        assert_eq!(b.perft(1), 20);
        assert_eq!(b.perft(2), 400);
        assert_eq!(b.perft(3), 8902);
    }
}
