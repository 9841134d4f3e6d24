/// Chess domain types and rules.
pub mod chess;
/// A single game of chess played one move at a time.
pub mod session;
