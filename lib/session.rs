use crate::chess::{Board, Color, InvalidMove, Key, Move, Piece, San, Status};
use tracing::{debug, info, instrument};

/// The result of successfully playing a move in a [`Game`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Played {
    /// The move in standard algebraic notation.
    pub san: San,
    /// The status of the game after the move.
    pub status: Status,
}

/// A snapshot of a [`Game`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct State {
    pub board: Board,
    pub turn: Color,
    /// White pieces taken by black, in the order they were captured.
    pub captured_white: Vec<Piece>,
    /// Black pieces taken by white, in the order they were captured.
    pub captured_black: Vec<Piece>,
    pub last_move: Option<San>,
    pub status: Status,
    pub fen: String,
}

/// A game of chess that advances one move at a time.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Game {
    start: Board,
    board: Board,
    history: Vec<Key>,
    moves: Vec<(Move, San)>,
    captured: [Vec<Piece>; 2],
}

impl Default for Game {
    fn default() -> Self {
        Game::new(Board::default())
    }
}

impl Game {
    /// Starts a game from the given [`Board`].
    pub fn new(board: Board) -> Self {
        Game {
            start: board,
            board,
            history: vec![board.key()],
            moves: Vec::new(),
            captured: Default::default(),
        }
    }

    /// The current [`Board`].
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The moves played so far.
    pub fn moves(&self) -> &[(Move, San)] {
        &self.moves
    }

    /// The current [`Status`].
    pub fn status(&self) -> Status {
        Status::evaluate(&self.board, &self.history)
    }

    /// Discards every move played and goes back to the starting position.
    #[instrument(level = "debug", skip(self))]
    pub fn reset(&mut self) {
        *self = Game::new(self.start);
    }

    /// Plays a move given in coordinate or algebraic notation.
    ///
    /// The game is left untouched if the move cannot be played.
    /// A pawn taken en passant counts as captured even though it stands beside the destination.
    #[instrument(level = "debug", skip(self), fields(fen = %self.board), err)]
    pub fn apply_move(&mut self, text: &str) -> Result<Played, InvalidMove> {
        let m = self.board.parse(text)?;
        let san = self.board.san(m);

        if let Some((victim, _)) = self.board.captured(m) {
            self.captured[victim.color() as usize].push(victim);
        }

        self.board = self.board.apply(m);
        self.history.push(self.board.key());
        self.moves.push((m, san));

        let status = self.status();
        debug!(%san, %status, fen = %self.board);

        if status.is_over() {
            info!(%status, winner = ?status.winner(), "game over");
        } else if status.is_draw() {
            info!(%status, "draw may be claimed");
        }

        Ok(Played { san, status })
    }

    /// A snapshot of the game as it stands.
    pub fn current_state(&self) -> State {
        State {
            board: self.board,
            turn: self.board.turn,
            captured_white: self.captured[Color::White as usize].clone(),
            captured_black: self.captured[Color::Black as usize].clone(),
            last_move: self.moves.last().map(|&(_, san)| san),
            status: self.status(),
            fen: self.board.to_string(),
        }
    }
}
