use crate::error::InvalidMoveError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A move: the sub-board to play in and the cell within it, both numbered
/// `1..=9` in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Action {
    sub_board: u8,
    cell: u8,
}

impl Action {
    /// Creates an action, rejecting indices outside `1..=9`.
    pub fn new(sub_board: u8, cell: u8) -> Result<Self, InvalidMoveError> {
        if !(1..=9).contains(&sub_board) || !(1..=9).contains(&cell) {
            return Err(InvalidMoveError::OutOfRange { sub_board, cell });
        }
        Ok(Self { sub_board, cell })
    }

    /// Both indices are already known to be in range.
    pub(crate) fn from_indices(sub_board: usize, cell: usize) -> Self {
        debug_assert!(sub_board < 9 && cell < 9);
        Self {
            sub_board: sub_board as u8 + 1,
            cell: cell as u8 + 1,
        }
    }

    /// The sub-board index, `1..=9`.
    pub fn sub_board(&self) -> u8 {
        self.sub_board
    }

    /// The cell index within the sub-board, `1..=9`.
    pub fn cell(&self) -> u8 {
        self.cell
    }

    pub(crate) fn sub_board_index(&self) -> usize {
        usize::from(self.sub_board - 1)
    }

    pub(crate) fn cell_index(&self) -> usize {
        usize::from(self.cell - 1)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.sub_board, self.cell)
    }
}

impl TryFrom<(u8, u8)> for Action {
    type Error = InvalidMoveError;

    fn try_from((sub_board, cell): (u8, u8)) -> Result<Self, Self::Error> {
        Action::new(sub_board, cell)
    }
}

impl From<Action> for (u8, u8) {
    fn from(action: Action) -> Self {
        (action.sub_board, action.cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_full_range() {
        for sub_board in 1..=9 {
            for cell in 1..=9 {
                let action = Action::new(sub_board, cell).unwrap();
                assert_eq!((action.sub_board(), action.cell()), (sub_board, cell));
            }
        }
    }

    #[test]
    fn rejects_out_of_range_indices() {
        assert_eq!(
            Action::new(0, 5),
            Err(InvalidMoveError::OutOfRange { sub_board: 0, cell: 5 })
        );
        assert_eq!(
            Action::new(4, 10),
            Err(InvalidMoveError::OutOfRange { sub_board: 4, cell: 10 })
        );
    }

    #[test]
    fn compares_by_value() {
        let a = Action::new(3, 7).unwrap();
        let b = Action::try_from((3, 7)).unwrap();
        assert_eq!(a, b);
        assert_eq!(Action::from_indices(2, 6), a);
    }

    #[test]
    fn deserialization_validates_range() {
        let ok: Action = serde_json::from_str("[9,1]").unwrap();
        assert_eq!(ok, Action::new(9, 1).unwrap());
        assert!(serde_json::from_str::<Action>("[0,1]").is_err());
        assert_eq!(serde_json::to_string(&ok).unwrap(), "[9,1]");
    }
}
