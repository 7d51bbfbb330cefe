use crate::action::Action;
use crate::board::{Evaluation, Outcome, Player};
use crate::boards::lines::{self, Spot};
use crate::error::{InvalidMoveError, InvalidStateError};
use serde::{Deserialize, Serialize};

/// A single cell of a sub-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// No mark yet.
    #[default]
    Empty,
    /// Marked by a player.
    Occupied(Player),
}

/// One of the nine inner 3x3 grids.
///
/// The outcome is recomputed on every placement, so queries are cheap and
/// always agree with the cells. Deserialization checks the index and that
/// the stored outcome matches the cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SubBoardRecord", into = "SubBoardRecord")]
pub struct SubBoard {
    index: u8,
    cells: [Cell; 9],
    outcome: Outcome,
}

impl SubBoard {
    /// Creates an empty sub-board at meta-grid position `index` (`1..=9`).
    pub(crate) fn new(index: u8) -> Self {
        Self {
            index,
            cells: [Cell::Empty; 9],
            outcome: Outcome::InProgress,
        }
    }

    /// Position of this sub-board in the meta-grid, `1..=9`.
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// The cell numbered `cell` (`1..=9`).
    pub fn cell(&self, cell: u8) -> Option<Cell> {
        usize::from(cell)
            .checked_sub(1)
            .and_then(|idx| self.cells.get(idx).copied())
    }

    /// Won, drawn or still in progress.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The player holding a line of three cells, if any.
    pub fn winner(&self) -> Option<Player> {
        self.outcome.winner()
    }

    /// Whether a player holds a line of three cells.
    pub fn has_winner(&self) -> bool {
        self.winner().is_some()
    }

    /// True when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }

    /// Full with no line completed.
    pub fn is_tie(&self) -> bool {
        self.outcome == Outcome::Draw
    }

    /// Won or full: no further moves are accepted.
    pub fn is_decided(&self) -> bool {
        self.outcome.is_decided()
    }

    /// True iff `action` targets this sub-board, it is undecided, and the
    /// target cell is empty.
    pub fn is_valid_action(&self, action: &Action) -> bool {
        self.check_action(action).is_ok()
    }

    /// All actions targeting an empty cell, in cell order. Empty once decided.
    pub fn available_actions(&self) -> Vec<Action> {
        if self.is_decided() {
            return Vec::new();
        }

        let board = usize::from(self.index - 1);
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(i, _)| Action::from_indices(board, i))
            .collect()
    }

    /// Writes `player`'s mark into the cell targeted by `action`.
    pub fn apply(&mut self, action: &Action, player: Player) -> Result<(), InvalidMoveError> {
        self.check_action(action)?;
        self.cells[action.cell_index()] = Cell::Occupied(player);
        self.outcome = self.compute_outcome();
        Ok(())
    }

    /// Positional heuristic from the line-completion counts of the cells.
    ///
    /// Only meaningful while the sub-board is undecided; a won sub-board is
    /// scored by the meta-board with a fixed constant instead.
    pub fn evaluate(&self) -> Evaluation {
        lines::score_lines(&self.spots())
    }

    fn check_action(&self, action: &Action) -> Result<(), InvalidMoveError> {
        if action.sub_board() != self.index {
            return Err(InvalidMoveError::WrongSubBoard {
                action: *action,
                forced: self.index,
            });
        }
        if self.is_decided() {
            return Err(InvalidMoveError::SubBoardDecided { action: *action });
        }
        if self.cells[action.cell_index()] != Cell::Empty {
            return Err(InvalidMoveError::CellOccupied { action: *action });
        }
        Ok(())
    }

    fn spots(&self) -> [Spot; 9] {
        self.cells.map(|cell| match cell {
            Cell::Empty => Spot::Open,
            Cell::Occupied(player) => Spot::Taken(player),
        })
    }

    fn compute_outcome(&self) -> Outcome {
        match lines::find_winner(&self.spots()) {
            Some(player) => Outcome::Won(player),
            None if self.is_full() => Outcome::Draw,
            None => Outcome::InProgress,
        }
    }
}

/// Wire form of a [`SubBoard`], validated on the way in.
#[derive(Clone, Serialize, Deserialize)]
struct SubBoardRecord {
    index: u8,
    cells: [Cell; 9],
    outcome: Outcome,
}

impl TryFrom<SubBoardRecord> for SubBoard {
    type Error = InvalidStateError;

    fn try_from(record: SubBoardRecord) -> Result<Self, Self::Error> {
        if !(1..=9).contains(&record.index) {
            return Err(InvalidStateError::IndexOutOfRange {
                index: record.index,
            });
        }

        let mut board = SubBoard::new(record.index);
        board.cells = record.cells;
        board.outcome = board.compute_outcome();
        if board.outcome != record.outcome {
            return Err(InvalidStateError::OutcomeMismatch {
                stored: record.outcome,
                actual: board.outcome,
            });
        }
        Ok(board)
    }
}

impl From<SubBoard> for SubBoardRecord {
    fn from(board: SubBoard) -> Self {
        Self {
            index: board.index,
            cells: board.cells,
            outcome: board.outcome,
        }
    }
}
