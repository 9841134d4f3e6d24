use derive_more::Deref;
use lib::chess::{File, Piece, Rank, Square};
use lib::session::State;
use std::fmt::{self, Display, Formatter, Write};

/// Renders a [`State`] as the text shown to players.
#[derive(Debug, Copy, Clone, Deref)]
pub struct Report<'a>(pub &'a State);

/// The figurines of captured pieces, separated by spaces.
struct Captured<'a>(&'a [Piece]);

impl Display for Captured<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, p) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }

            f.write_char(p.figurine())?;
        }

        Ok(())
    }
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current Board:")?;
        writeln!(f, "{}", Captured(&self.captured_white))?;

        for rank in Rank::iter().rev() {
            write!(f, "{}", rank)?;
            for file in File::iter() {
                let figurine = self.board[Square::new(file, rank)].map_or('⭘', |p| p.figurine());
                write!(f, " {}", figurine)?;
            }

            f.write_char('\n')?;
        }

        writeln!(f, "  a b c d e f g h")?;
        writeln!(f, "{}", Captured(&self.captured_black))?;

        if let Some(san) = &self.last_move {
            writeln!(f, "Last move: {}", san)?;
        }

        writeln!(f, "Turn: {}", self.turn)?;
        writeln!(f, "Status: {}", self.status)?;
        write!(f, "FEN: {}", self.fen)
    }
}
