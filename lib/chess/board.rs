use crate::chess::{Bitboard, CastlingSide, Castles, Color, File, Move, Piece, Rank, Role, Square};
use arrayvec::ArrayString;
use derive_more::{DebugCustom, Display, Error};
use proptest::sample::{Selector, SelectorStrategy};
use proptest::{prelude::*, strategy::Map};
use std::fmt::{self, Write};
use std::ops::{Index, Range};
use std::str::FromStr;

/// The chess board.
///
/// Holds the placement of pieces along with the side to move, the castling rights,
/// the en passant target and the move counters, that is everything [FEN] describes.
///
/// [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
#[derive(DebugCustom, Copy, Clone, Eq, PartialEq, Hash)]
#[debug(fmt = "Board({})", self)]
pub struct Board {
    roles: [Bitboard; 6],
    colors: [Bitboard; 2],
    /// The side to move.
    pub turn: Color,
    /// The castling rights left to each side.
    pub castles: Castles,
    /// The square skipped by a pawn that just advanced two squares.
    pub en_passant: Option<Square>,
    /// The number of halfmoves since the last capture or pawn advance.
    pub halfmoves: u32,
    /// The current move number, starts at 1 and is incremented after every move by black.
    pub fullmoves: u32,
}

/// Identifies a position for the purposes of [repetition].
///
/// Two boards share a key when the same pieces stand on the same squares, the same side is to
/// move, and the same moves are available, including castling and en passant captures.
///
/// [repetition]: https://www.chessprogramming.org/Repetitions
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Key {
    roles: [Bitboard; 6],
    colors: [Bitboard; 2],
    turn: Color,
    castles: Castles,
    en_passant: Option<Square>,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            roles: [
                Bitboard::new(0x00FF00000000FF00),
                Bitboard::new(0x4200000000000042),
                Bitboard::new(0x2400000000000024),
                Bitboard::new(0x8100000000000081),
                Bitboard::new(0x0800000000000008),
                Bitboard::new(0x1000000000000010),
            ],
            colors: [
                Bitboard::new(0x000000000000FFFF),
                Bitboard::new(0xFFFF000000000000),
            ],
            turn: Color::White,
            castles: Castles::all(),
            en_passant: None,
            halfmoves: 0,
            fullmoves: 1,
        }
    }
}

impl Arbitrary for Board {
    type Parameters = ();
    type Strategy = Map<(Range<usize>, SelectorStrategy), fn((usize, Selector)) -> Board>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (0..256, any::<Selector>()).prop_map(|(plies, selector)| {
            let mut board = Board::default();

            for _ in 0..plies {
                match selector.try_select(board.legal_moves()) {
                    None => break,
                    Some(m) => board = board.apply(m),
                }
            }

            board
        })
    }
}

impl Board {
    fn empty() -> Self {
        Board {
            roles: Default::default(),
            colors: Default::default(),
            turn: Color::White,
            castles: Castles::empty(),
            en_passant: None,
            halfmoves: 0,
            fullmoves: 1,
        }
    }

    /// [`Square`]s occupied.
    pub fn occupied(&self) -> Bitboard {
        self.colors[0] | self.colors[1]
    }

    /// [`Square`]s occupied by a [`Color`].
    pub fn by_color(&self, c: Color) -> Bitboard {
        self.colors[c as usize]
    }

    /// [`Square`]s occupied by a [`Role`].
    pub fn by_role(&self, r: Role) -> Bitboard {
        self.roles[r as usize]
    }

    /// [`Square`]s occupied by a [`Piece`].
    pub fn by_piece(&self, p: Piece) -> Bitboard {
        self.by_color(p.color()) & self.by_role(p.role())
    }

    /// [`Square`] occupied by the king of a [`Color`].
    pub fn king(&self, side: Color) -> Option<Square> {
        self.by_piece(Piece(side, Role::King)).into_iter().next()
    }

    /// The [`Color`] of the piece on the given [`Square`], if any.
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        Color::iter().find(|&c| self.by_color(c).contains(sq))
    }

    /// The [`Role`] of the piece on the given [`Square`], if any.
    pub fn role_on(&self, sq: Square) -> Option<Role> {
        Role::iter().find(|&r| self.by_role(r).contains(sq))
    }

    /// The [`Piece`] on the given [`Square`], if any.
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        Option::zip(self.color_on(sq), self.role_on(sq)).map(|(c, r)| Piece(c, r))
    }

    /// An iterator over all pieces on the board.
    pub fn iter(&self) -> impl Iterator<Item = (Piece, Square)> + '_ {
        Piece::iter().flat_map(|p| self.by_piece(p).into_iter().map(move |sq| (p, sq)))
    }

    /// Toggles a piece on a square.
    pub fn toggle(&mut self, p: Piece, sq: Square) {
        debug_assert!(!self[sq].is_some_and(|q| p != q));
        self.colors[p.color() as usize] ^= sq.bitboard();
        self.roles[p.role() as usize] ^= sq.bitboard();
    }

    /// From where pieces of this [`Color`] attack this [`Square`].
    pub fn attackers(&self, sq: Square, by: Color) -> Bitboard {
        let occupied = self.occupied();
        let queens = self.by_role(Role::Queen);

        let attackers = (Bitboard::pawn_attacks(sq, !by) & self.by_role(Role::Pawn))
            | (Bitboard::knight_attacks(sq) & self.by_role(Role::Knight))
            | (Bitboard::king_attacks(sq) & self.by_role(Role::King))
            | (Bitboard::bishop_attacks(sq, occupied) & (self.by_role(Role::Bishop) | queens))
            | (Bitboard::rook_attacks(sq, occupied) & (self.by_role(Role::Rook) | queens));

        attackers & self.by_color(by)
    }

    /// Whether any piece of this [`Color`] attacks this [`Square`].
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        !self.attackers(sq, by).is_empty()
    }

    /// Whether the side to move is in [check].
    ///
    /// [check]: https://www.chessprogramming.org/Check
    pub fn is_check(&self) -> bool {
        self.king(self.turn)
            .is_some_and(|k| self.is_attacked(k, !self.turn))
    }

    /// The piece a [`Move`] captures along with where it stands, if any.
    pub fn captured(&self, m: Move) -> Option<(Piece, Square)> {
        let sq = m.en_passant_victim().unwrap_or(m.whither);
        self[sq].filter(|p| p.color() != self.turn).map(|p| (p, sq))
    }

    /// Plays a [`Move`] and returns the resulting board, leaving this one untouched.
    ///
    /// The move is trusted to be at least [pseudo-legal][`Board::pseudo_legal_moves`],
    /// checking legality is the job of [`Board::legal_moves`].
    pub fn apply(&self, m: Move) -> Board {
        let mut next = *self;

        let Some(piece @ Piece(side, role)) = self[m.whence] else {
            debug_assert!(false, "expected piece on {}", m.whence);
            return next;
        };

        let captured = self.captured(m);
        if let Some((victim, sq)) = captured {
            next.toggle(victim, sq);
        }

        next.toggle(piece, m.whence);
        next.toggle(Piece(side, m.promotion.role().unwrap_or(role)), m.whither);

        if let Some(wing) = m.castling {
            let rook = Piece(side, Role::Rook);
            next.toggle(rook, wing.rook_origin(side));
            next.toggle(rook, wing.rook_destination(side));
        }

        next.castles -= Castles::revoked_by(m.whence) | Castles::revoked_by(m.whither);

        next.en_passant = match role {
            Role::Pawn if (m.whither.rank() - m.whence.rank()).abs() == 2 => {
                m.whence.offset(0, side.forward())
            }
            _ => None,
        };

        if role == Role::Pawn || captured.is_some() {
            next.halfmoves = 0;
        } else {
            next.halfmoves = next.halfmoves.saturating_add(1);
        }

        if side == Color::Black {
            next.fullmoves = next.fullmoves.saturating_add(1);
        }

        next.turn = !side;
        next
    }

    /// This board's repetition [`Key`].
    ///
    /// The en passant square only counts when an en passant capture is actually legal.
    pub fn key(&self) -> Key {
        let en_passant = self
            .en_passant
            .filter(|_| self.legal_moves().iter().any(|m| m.en_passant));

        Key {
            roles: self.roles,
            colors: self.colors,
            turn: self.turn,
            castles: self.castles,
            en_passant,
        }
    }
}

/// Retrieves the [`Piece`] at a given [`Square`], if any.
impl Index<Square> for Board {
    type Output = Option<Piece>;

    fn index(&self, sq: Square) -> &Self::Output {
        use {Color::*, Role::*};
        match self.piece_on(sq) {
            Some(Piece(White, Pawn)) => &Some(Piece(White, Pawn)),
            Some(Piece(White, Knight)) => &Some(Piece(White, Knight)),
            Some(Piece(White, Bishop)) => &Some(Piece(White, Bishop)),
            Some(Piece(White, Rook)) => &Some(Piece(White, Rook)),
            Some(Piece(White, Queen)) => &Some(Piece(White, Queen)),
            Some(Piece(White, King)) => &Some(Piece(White, King)),
            Some(Piece(Black, Pawn)) => &Some(Piece(Black, Pawn)),
            Some(Piece(Black, Knight)) => &Some(Piece(Black, Knight)),
            Some(Piece(Black, Bishop)) => &Some(Piece(Black, Bishop)),
            Some(Piece(Black, Rook)) => &Some(Piece(Black, Rook)),
            Some(Piece(Black, Queen)) => &Some(Piece(Black, Queen)),
            Some(Piece(Black, King)) => &Some(Piece(Black, King)),
            None => &None,
        }
    }
}

/// Prints the board in [FEN].
///
/// [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            let mut row = ArrayString::<8>::new();
            let mut skip = 0;

            for file in File::iter() {
                match self[Square::new(file, rank)] {
                    None => skip += 1,
                    Some(p) => {
                        if skip > 0 {
                            write!(row, "{}", skip)?;
                            skip = 0;
                        }

                        row.push(p.letter());
                    }
                }
            }

            if skip > 0 {
                write!(row, "{}", skip)?;
            }

            f.write_str(&row)?;
            if rank != Rank::First {
                f.write_char('/')?;
            }
        }

        match self.turn {
            Color::White => f.write_str(" w ")?,
            Color::Black => f.write_str(" b ")?,
        }

        write!(f, "{} ", self.castles)?;

        match self.en_passant {
            Some(ep) => write!(f, "{} ", ep)?,
            None => f.write_str("- ")?,
        }

        write!(f, "{} {}", self.halfmoves, self.fullmoves)
    }
}

/// The reason why parsing the FEN string failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum ParseFenError {
    #[display(fmt = "failed to parse piece placement")]
    InvalidPlacement,
    #[display(fmt = "failed to parse side to move")]
    InvalidSideToMove,
    #[display(fmt = "failed to parse castling rights")]
    InvalidCastlingRights,
    #[display(fmt = "failed to parse en passant square")]
    InvalidEnPassantSquare,
    #[display(fmt = "failed to parse halfmove clock")]
    InvalidHalfmoveClock,
    #[display(fmt = "failed to parse fullmove number")]
    InvalidFullmoveNumber,
    #[display(fmt = "expected six fields separated by spaces")]
    InvalidSyntax,
    #[display(fmt = "each side must have exactly one king")]
    InvalidKings,
    #[display(fmt = "there are pawns on the back rank")]
    PawnsOnBackRank,
    #[display(fmt = "the side not to move is in check")]
    OppositeCheck,
}

impl FromStr for Board {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<_> = s.split_ascii_whitespace().collect();
        let [placement, turn, castles, en_passant, halfmoves, fullmoves] = &fields[..] else {
            return Err(ParseFenError::InvalidSyntax);
        };

        let ranks: Vec<_> = placement.split('/').rev().collect();
        if ranks.len() != 8 {
            return Err(ParseFenError::InvalidPlacement);
        }

        let mut board = Board::empty();
        for (rank, segment) in Rank::iter().zip(ranks) {
            let mut file = 0;
            for c in segment.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += skip;
                } else if let (Ok(p), true) = (Piece::try_from(c), file < 8) {
                    board.toggle(p, Square::new(File::from_index(file as _), rank));
                    file += 1;
                } else {
                    return Err(ParseFenError::InvalidPlacement);
                }
            }

            if file != 8 {
                return Err(ParseFenError::InvalidPlacement);
            }
        }

        board.turn = match &turn[..] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(ParseFenError::InvalidSideToMove),
        };

        board.castles = castles
            .parse()
            .map_err(|_| ParseFenError::InvalidCastlingRights)?;

        board.en_passant = match &en_passant[..] {
            "-" => None,
            ep => Some(ep.parse().map_err(|_| ParseFenError::InvalidEnPassantSquare)?),
        };

        board.halfmoves = halfmoves
            .parse()
            .map_err(|_| ParseFenError::InvalidHalfmoveClock)?;

        board.fullmoves = match fullmoves.parse() {
            Ok(n) if n > 0 => n,
            _ => return Err(ParseFenError::InvalidFullmoveNumber),
        };

        board.validate()?;
        Ok(board)
    }
}

impl Board {
    fn validate(&self) -> Result<(), ParseFenError> {
        for side in Color::iter() {
            if self.by_piece(Piece(side, Role::King)).len() != 1 {
                return Err(ParseFenError::InvalidKings);
            }
        }

        let back_ranks = Rank::First.bitboard() | Rank::Eighth.bitboard();
        if !(self.by_role(Role::Pawn) & back_ranks).is_empty() {
            return Err(ParseFenError::PawnsOnBackRank);
        }

        for side in Color::iter() {
            for wing in [CastlingSide::Kingside, CastlingSide::Queenside] {
                let king = Square::new(File::E, Rank::home(side));
                if self.castles.has(side, wing)
                    && (self[king] != Some(Piece(side, Role::King))
                        || self[wing.rook_origin(side)] != Some(Piece(side, Role::Rook)))
                {
                    return Err(ParseFenError::InvalidCastlingRights);
                }
            }
        }

        if let Some(ep) = self.en_passant {
            let pusher = !self.turn;
            let pawn = ep.offset(0, -self.turn.forward());
            let origin = ep.offset(0, self.turn.forward());
            if ep.rank() != Rank::from_index(if pusher == Color::White { 2 } else { 5 })
                || self[ep].is_some()
                || origin.and_then(|sq| self[sq]).is_some()
                || pawn.and_then(|sq| self[sq]) != Some(Piece(pusher, Role::Pawn))
            {
                return Err(ParseFenError::InvalidEnPassantSquare);
            }
        }

        let opponent = !self.turn;
        if self
            .king(opponent)
            .is_some_and(|k| self.is_attacked(k, self.turn))
        {
            return Err(ParseFenError::OppositeCheck);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn iter_returns_pieces_and_squares(b: Board) {
        for (p, sq) in b.iter() {
            assert_eq!(b[sq], Some(p));
        }
    }

    #[proptest]
    fn by_color_returns_squares_occupied_by_pieces_of_a_color(b: Board, c: Color) {
        for sq in b.by_color(c) {
            assert_eq!(b[sq].map(|p| p.color()), Some(c));
        }
    }

    #[proptest]
    fn by_role_returns_squares_occupied_by_pieces_of_a_role(b: Board, r: Role) {
        for sq in b.by_role(r) {
            assert_eq!(b[sq].map(|p| p.role()), Some(r));
        }
    }

    #[proptest]
    fn board_can_be_indexed_by_square(b: Board, sq: Square) {
        assert_eq!(b[sq], b.piece_on(sq));
    }

    #[proptest]
    fn reachable_boards_have_exactly_one_king_per_side(b: Board, c: Color) {
        assert_eq!(b.by_piece(Piece(c, Role::King)).len(), 1);
    }

    #[proptest]
    fn toggle_removes_piece_from_square(mut b: Board, #[filter(#b[#sq].is_some())] sq: Square) {
        let p = b[sq].unwrap();
        b.toggle(p, sq);
        assert_eq!(b[sq], None);
    }

    #[proptest]
    fn toggle_places_piece_on_square(
        mut b: Board,
        #[filter(#b[#sq].is_none())] sq: Square,
        p: Piece,
    ) {
        b.toggle(p, sq);
        assert_eq!(b[sq], Some(p));
    }

    #[proptest]
    fn attackers_attack_the_square(b: Board, sq: Square, c: Color) {
        for whence in b.attackers(sq, c) {
            assert_eq!(b[whence].map(|p| p.color()), Some(c));
        }
    }

    #[proptest]
    fn apply_leaves_the_original_board_untouched(
        #[filter(!#b.legal_moves().is_empty())] b: Board,
        selector: Selector,
    ) {
        let before = b;
        let m = selector.select(b.legal_moves());
        let next = b.apply(m);
        assert_eq!(b, before);
        assert_ne!(next, b);
    }

    #[proptest]
    fn apply_flips_the_turn_and_moves_the_piece(
        #[filter(!#b.legal_moves().is_empty())] b: Board,
        selector: Selector,
    ) {
        let m = selector.select(b.legal_moves());
        let next = b.apply(m);
        assert_eq!(next.turn, !b.turn);
        assert_eq!(next[m.whence], None);
        assert_eq!(next[m.whither].map(|p| p.color()), Some(b.turn));
    }

    #[proptest]
    fn castling_rights_are_never_restored(
        #[filter(!#b.legal_moves().is_empty())] b: Board,
        selector: Selector,
    ) {
        let m = selector.select(b.legal_moves());
        assert!(b.castles.contains(b.apply(m).castles));
    }

    #[proptest]
    fn en_passant_target_only_survives_a_double_push(
        #[filter(!#b.legal_moves().is_empty())] b: Board,
        selector: Selector,
    ) {
        let m = selector.select(b.legal_moves());
        let next = b.apply(m);
        let double_push = b[m.whence].map(|p| p.role()) == Some(Role::Pawn)
            && (m.whither.rank() - m.whence.rank()).abs() == 2;
        assert_eq!(next.en_passant.is_some(), double_push);
    }

    #[proptest]
    fn halfmove_clock_resets_on_pawn_moves_and_captures(
        #[filter(!#b.legal_moves().is_empty())] b: Board,
        selector: Selector,
    ) {
        let m = selector.select(b.legal_moves());
        let next = b.apply(m);
        let zeroing = b[m.whence].map(|p| p.role()) == Some(Role::Pawn)
            || next.occupied().len() < b.occupied().len();

        if zeroing {
            assert_eq!(next.halfmoves, 0);
        } else {
            assert_eq!(next.halfmoves, b.halfmoves + 1);
        }
    }

    #[proptest]
    fn fullmove_number_increments_after_black_moves(
        #[filter(!#b.legal_moves().is_empty())] b: Board,
        selector: Selector,
    ) {
        let m = selector.select(b.legal_moves());
        let next = b.apply(m);
        match b.turn {
            Color::White => assert_eq!(next.fullmoves, b.fullmoves),
            Color::Black => assert_eq!(next.fullmoves, b.fullmoves + 1),
        }
    }

    #[test]
    fn default_board_is_the_initial_position() {
        assert_eq!(
            Board::default().to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
    }

    #[test]
    fn en_passant_capture_removes_the_pushed_pawn() -> Result<(), ParseFenError> {
        let b: Board = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2".parse()?;
        let next = b.apply(Move::capture_en_passant(Square::E5, Square::D6));
        assert_eq!(next[Square::D5], None);
        assert_eq!(next[Square::D6], Some(Piece(Color::White, Role::Pawn)));
        assert_eq!(next.halfmoves, 0);
        Ok(())
    }

    #[test]
    fn castling_relocates_the_rook() -> Result<(), ParseFenError> {
        let b: Board = "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 3 10".parse()?;
        let m = Move::castle(Square::E8, Square::C8, CastlingSide::Queenside);
        let next = b.apply(m);
        assert_eq!(next[Square::C8], Some(Piece(Color::Black, Role::King)));
        assert_eq!(next[Square::D8], Some(Piece(Color::Black, Role::Rook)));
        assert_eq!(next[Square::A8], None);
        assert_eq!(next.castles, Castles::WHITE_KINGSIDE | Castles::WHITE_QUEENSIDE);
        assert_eq!(next.fullmoves, 11);
        Ok(())
    }

    #[test]
    fn capturing_a_rook_revokes_its_castling_right() -> Result<(), ParseFenError> {
        let b: Board = "r3k2r/8/8/8/8/6n1/8/R3K2R b KQkq - 0 1".parse()?;
        let next = b
            .apply(Move::new(Square::G3, Square::H5))
            .apply(Move::new(Square::A1, Square::A8));
        assert!(!next.castles.has(Color::Black, CastlingSide::Queenside));
        assert!(!next.castles.has(Color::White, CastlingSide::Queenside));
        assert!(next.castles.has(Color::Black, CastlingSide::Kingside));
        Ok(())
    }

    #[test]
    fn promotion_substitutes_the_pawn() -> Result<(), ParseFenError> {
        use crate::chess::Promotion;
        let b: Board = "8/P6k/8/8/8/8/8/K7 w - - 0 1".parse()?;
        let next = b.apply(Move::promote(Square::A7, Square::A8, Promotion::Knight));
        assert_eq!(next[Square::A8], Some(Piece(Color::White, Role::Knight)));
        assert_eq!(next[Square::A7], None);
        Ok(())
    }

    #[test]
    fn clocks_saturate_instead_of_overflowing() -> Result<(), ParseFenError> {
        let b: Board = "4k3/8/8/8/8/8/8/R3K3 w - - 4294967295 1".parse()?;
        let next = b.apply(Move::new(Square::A1, Square::A2));
        assert_eq!(next.halfmoves, u32::MAX);
        assert_eq!(next.to_string().parse(), Ok(next));

        let b: Board = "4k3/8/8/8/8/8/8/R3K3 b - - 0 4294967295".parse()?;
        let next = b.apply(Move::new(Square::E8, Square::D7));
        assert_eq!(next.fullmoves, u32::MAX);
        assert_eq!(next.to_string().parse(), Ok(next));
        Ok(())
    }

    #[proptest]
    fn parsing_printed_board_is_an_identity(b: Board) {
        assert_eq!(b.to_string().parse(), Ok(b));
    }

    #[proptest]
    fn parsing_board_fails_for_invalid_fen(
        b: Board,
        #[strategy(..=#b.to_string().len())] n: usize,
        #[strategy("[^[:ascii:]]+")] r: String,
    ) {
        let s = b.to_string();
        assert_eq!([&s[..n], &r, &s[n..]].concat().parse().ok(), None::<Board>);
    }

    #[test]
    fn parsing_board_fails_without_kings() {
        assert_eq!(
            "8/8/8/8/8/8/8/4K3 w - - 0 1".parse::<Board>(),
            Err(ParseFenError::InvalidKings)
        );
    }

    #[test]
    fn parsing_board_fails_with_pawns_on_back_rank() {
        assert_eq!(
            "P3k3/8/8/8/8/8/8/4K3 w - - 0 1".parse::<Board>(),
            Err(ParseFenError::PawnsOnBackRank)
        );
    }

    #[test]
    fn parsing_board_fails_if_side_not_to_move_is_in_check() {
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K2r b - - 0 1".parse::<Board>(),
            Err(ParseFenError::OppositeCheck)
        );
    }

    #[test]
    fn parsing_board_fails_if_castling_rights_are_inconsistent() {
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K3 w K - 0 1".parse::<Board>(),
            Err(ParseFenError::InvalidCastlingRights)
        );
    }

    #[test]
    fn parsing_board_fails_if_en_passant_square_is_on_wrong_rank() {
        assert_eq!(
            "4k3/8/8/3pP3/8/8/8/4K3 w - d5 0 2".parse::<Board>(),
            Err(ParseFenError::InvalidEnPassantSquare)
        );
    }

    #[test]
    fn key_ignores_en_passant_square_unless_capture_is_legal() -> Result<(), ParseFenError> {
        let with: Board = "4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1".parse()?;
        let without: Board = "4k3/8/8/8/4P3/8/8/4K3 b - - 0 1".parse()?;
        assert_eq!(with.key(), without.key());

        let with: Board = "4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1".parse()?;
        let without: Board = "4k3/8/8/8/3pP3/8/8/4K3 b - - 0 1".parse()?;
        assert_ne!(with.key(), without.key());

        Ok(())
    }
}
