mod bitboard;
mod board;
mod castles;
mod color;
mod file;
mod r#move;
mod movegen;
mod notation;
mod piece;
mod promotion;
mod rank;
mod role;
mod square;
mod status;

pub use bitboard::*;
pub use board::*;
pub use castles::*;
pub use color::*;
pub use file::*;
pub use notation::*;
pub use piece::*;
pub use promotion::*;
pub use r#move::*;
pub use rank::*;
pub use role::*;
pub use square::*;
pub use status::*;
