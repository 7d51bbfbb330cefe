//! Typed failures reported by the engine.

use crate::action::Action;
use crate::board::Outcome;
use derive_more::{Display, From};

/// A move that cannot be applied to the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InvalidMoveError {
    /// A sub-board or cell index outside `1..=9`.
    #[display("action ({sub_board}, {cell}) is out of range, both indices must be in 1..=9")]
    OutOfRange {
        /// Requested sub-board index.
        sub_board: u8,
        /// Requested cell index.
        cell: u8,
    },

    /// The target cell already holds a mark.
    #[display("cell {action} is already occupied")]
    CellOccupied {
        /// The rejected action.
        action: Action,
    },

    /// The target sub-board is already won or full.
    #[display("sub-board {} is already decided", action.sub_board())]
    SubBoardDecided {
        /// The rejected action.
        action: Action,
    },

    /// The previous move forces play into a different sub-board.
    #[display("{action} ignores the forced sub-board {forced}")]
    WrongSubBoard {
        /// The rejected action.
        action: Action,
        /// The sub-board the mover is restricted to.
        forced: u8,
    },

    /// The game has already ended.
    #[display("the game is already over")]
    GameOver,
}

impl std::error::Error for InvalidMoveError {}

/// The search was asked for a move in a state that has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("no legal move is available")]
pub struct NoLegalMoveError;

impl std::error::Error for NoLegalMoveError {}

/// Rejected search or state configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ConfigurationError {
    /// A depth limit of zero leaves nothing to search.
    #[display("depth limit must be a positive integer")]
    ZeroDepth,

    /// The search requires a depth bound but none was given.
    #[display("a depth limit is required for this search")]
    MissingDepth,
}

impl std::error::Error for ConfigurationError {}

/// A deserialized board that breaks the board invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InvalidStateError {
    /// A sub-board index outside `1..=9`.
    #[display("sub-board index {index} is out of range 1..=9")]
    IndexOutOfRange {
        /// The stored index.
        index: u8,
    },

    /// A sub-board stored at a position other than its index.
    #[display("sub-board {index} is stored at position {position}")]
    MisplacedSubBoard {
        /// Position in the meta-grid, `1..=9`.
        position: u8,
        /// The index the sub-board claims.
        index: u8,
    },

    /// The stored outcome disagrees with the marks on the board.
    #[display("stored outcome {stored:?} does not match the board, expected {actual:?}")]
    OutcomeMismatch {
        /// The outcome read from the input.
        stored: Outcome,
        /// The outcome the marks produce.
        actual: Outcome,
    },
}

impl std::error::Error for InvalidStateError {}

/// Any error the engine can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, From)]
pub enum Error {
    /// See [`InvalidMoveError`].
    #[display("invalid move: {_0}")]
    InvalidMove(InvalidMoveError),
    /// See [`NoLegalMoveError`].
    #[display("{_0}")]
    NoLegalMove(NoLegalMoveError),
    /// See [`ConfigurationError`].
    #[display("configuration error: {_0}")]
    Configuration(ConfigurationError),
    /// See [`InvalidStateError`].
    #[display("invalid state: {_0}")]
    InvalidState(InvalidStateError),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidMove(e) => Some(e),
            Error::NoLegalMove(e) => Some(e),
            Error::Configuration(e) => Some(e),
            Error::InvalidState(e) => Some(e),
        }
    }
}
