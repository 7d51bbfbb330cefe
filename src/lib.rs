//! An engine for Ultimate Tic-Tac-Toe.
//!
//! The game is played on a 3x3 meta-board whose cells are themselves 3x3
//! sub-boards. The cell a player marks decides which sub-board the opponent
//! must play in next. Winning three sub-boards in a row wins the game.
//!
//! The crate provides the game state ([`boards::meta_state::MetaState`]) and a
//! depth-limited minimax search with optional alpha-beta pruning
//! ([`minimax::MinimaxSearch`]) that picks moves for a computer player.
//!
//! # Example
//!
//! ```rust
//! use ultimate_ttt::board::Player;
//! use ultimate_ttt::boards::meta_state::MetaState;
//! use ultimate_ttt::minimax::MinimaxSearch;
//!
//! // Create a new game, X to move
//! let mut state = MetaState::new();
//!
//! // Configure a search looking three plies ahead
//! let search = MinimaxSearch::builder()
//!     .with_depth_limit(3)
//!     .with_alpha_beta_pruning(true)
//!     .build()?;
//!
//! // Pick and play the best move
//! let action = search.choose_action(&state, Player::X)?;
//! state.apply(&action)?;
//!
//! println!("X played {action}");
//! # Ok::<(), ultimate_ttt::error::Error>(())
//! ```

/// The `Action` type naming a sub-board and a cell.
pub mod action;
/// The `Board` trait the search works against, plus players and outcomes.
pub mod board;
/// Sub-boards, the meta-board state and their shared line heuristic.
pub mod boards;
/// Search configuration.
pub mod config;
/// Error types.
pub mod error;
/// The minimax search.
pub mod minimax;
/// Random number generation and a random opponent.
pub mod random;
