use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::Board;
use std::time::Instant;
use tracing::{info, instrument};

/// Counts the leaf nodes of the legal move tree, as a move generator self-check.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Perft {
    /// How many plies deep to search.
    depth: u8,

    /// The position to search in FEN notation.
    #[clap(long, default_value_t)]
    fen: Board,
}

impl Perft {
    #[instrument(level = "trace", skip(self), err)]
    pub async fn execute(self) -> Result<(), Anyhow> {
        let timer = Instant::now();
        let nodes = self.fen.perft(self.depth);
        let elapsed = timer.elapsed();

        info!(depth = self.depth, fen = %self.fen, nodes, ?elapsed);
        println!("{nodes}");

        Ok(())
    }
}
