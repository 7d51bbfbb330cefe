//! The two levels of the Ultimate Tic-Tac-Toe board.

/// Winning lines and the line-threat heuristic.
pub mod lines;
/// The meta-board state, implementing the `Board` trait.
pub mod meta_state;
/// A single inner 3x3 grid.
pub mod sub_board;
