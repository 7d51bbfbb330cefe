use crate::action::Action;
use crate::board::{Board, Evaluation, Outcome, Player};
use crate::boards::lines::{self, LINE_COMPLETE_SCORE, Spot};
use crate::boards::sub_board::SubBoard;
use crate::error::{ConfigurationError, InvalidMoveError, InvalidStateError};
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// Fixed heuristic value of a won sub-board.
pub const SUB_BOARD_WIN_SCORE: i32 = LINE_COMPLETE_SCORE;

/// The full game: nine sub-boards plus turn and constraint bookkeeping.
///
/// The cell of the previous move names the sub-board the next player must
/// play in. When that sub-board is already decided the mover may pick any
/// undecided sub-board.
///
/// Cloning is a deep copy, so a cloned state can be explored without
/// affecting the original.
///
/// Deserialization checks that every sub-board sits at its own index and
/// that the stored outcome matches the boards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MetaStateRecord", into = "MetaStateRecord")]
pub struct MetaState {
    sub_boards: [SubBoard; 9],
    to_move: Player,
    last_action: Option<Action>,
    remaining_depth: Option<u32>,
    outcome: Outcome,
}

impl Default for MetaState {
    /// An empty board with X to move and no depth bound.
    fn default() -> Self {
        Self::new()
    }
}

impl MetaState {
    /// Creates an empty board with X to move and no depth bound.
    pub fn new() -> Self {
        Self {
            sub_boards: std::array::from_fn(|i| SubBoard::new(i as u8 + 1)),
            to_move: Player::X,
            last_action: None,
            remaining_depth: None,
            outcome: Outcome::InProgress,
        }
    }

    /// Creates an empty board whose search depth budget is `depth` moves.
    #[instrument]
    pub fn with_depth_limit(depth: u32) -> Result<Self, ConfigurationError> {
        if depth == 0 {
            return Err(ConfigurationError::ZeroDepth);
        }
        let mut state = Self::new();
        state.remaining_depth = Some(depth);
        Ok(state)
    }

    /// Sets up a position from a list of marks, ignoring the forced
    /// sub-board rule and turn order.
    ///
    /// Marks are placed in order, so a mark into an occupied cell or an
    /// already decided sub-board is rejected. The last mark becomes the last
    /// action and `to_move` moves next.
    #[instrument(skip(marks), fields(count = marks.len()))]
    pub fn from_marks(
        marks: &[(Action, Player)],
        to_move: Player,
    ) -> Result<Self, InvalidMoveError> {
        let mut state = Self::new();
        for (action, player) in marks {
            state.sub_boards[action.sub_board_index()].apply(action, *player)?;
            state.last_action = Some(*action);
        }
        state.to_move = to_move;
        state.outcome = state.compute_outcome();
        Ok(state)
    }

    /// Sub-boards in meta-grid order.
    pub fn sub_boards(&self) -> &[SubBoard; 9] {
        &self.sub_boards
    }

    /// The sub-board at meta-grid position `index` (`1..=9`).
    pub fn sub_board(&self, index: u8) -> Option<&SubBoard> {
        usize::from(index)
            .checked_sub(1)
            .and_then(|idx| self.sub_boards.get(idx))
    }

    /// The player whose mark the next `apply` places.
    pub fn current_player(&self) -> Player {
        self.to_move
    }

    /// The most recently applied action, `None` before the first move.
    pub fn last_action(&self) -> Option<Action> {
        self.last_action
    }

    /// Moves left before the search must cut off, `None` if unbounded.
    pub fn remaining_depth(&self) -> Option<u32> {
        self.remaining_depth
    }

    /// Replaces the depth budget, `None` meaning unbounded.
    pub fn set_remaining_depth(&mut self, depth: Option<u32>) {
        self.remaining_depth = depth;
    }

    /// The sub-board the next move is restricted to.
    ///
    /// `None` on the opening move, and when the nominal target is decided;
    /// either way any undecided sub-board may be played.
    pub fn forced_sub_board(&self) -> Option<u8> {
        let last = self.last_action?;
        let target = &self.sub_boards[last.cell_index()];
        (!target.is_decided()).then(|| target.index())
    }

    /// Won, drawn or still in progress at the meta level.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The player holding a meta-level line, if any.
    pub fn winner(&self) -> Option<Player> {
        self.outcome.winner()
    }

    /// Every sub-board decided and no meta-level line.
    pub fn is_tie(&self) -> bool {
        self.outcome == Outcome::Draw
    }

    /// True once a meta-level line is complete or every sub-board is decided.
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_decided()
    }

    /// Terminal, or out of search depth.
    pub fn is_cutoff(&self) -> bool {
        self.is_terminal() || self.remaining_depth == Some(0)
    }

    /// `1` if `role` won, `-1` if its opponent did, `0` for a draw.
    ///
    /// Also `0` while the game is in progress.
    pub fn terminal_utility(&self, role: Player) -> i32 {
        match self.outcome {
            Outcome::Won(winner) if winner == role => 1,
            Outcome::Won(_) => -1,
            Outcome::Draw | Outcome::InProgress => 0,
        }
    }

    /// True iff `action` targets an empty cell of an undecided sub-board the
    /// current player is allowed to play in.
    pub fn is_valid_action(&self, action: &Action) -> bool {
        self.check_action(action).is_ok()
    }

    /// Legal actions, sub-board-major then cell-major. Empty iff terminal.
    pub fn available_actions(&self) -> Vec<Action> {
        if self.is_terminal() {
            return Vec::new();
        }

        match self.forced_sub_board() {
            Some(index) => self.sub_boards[usize::from(index - 1)].available_actions(),
            None => self
                .sub_boards
                .iter()
                .flat_map(SubBoard::available_actions)
                .collect(),
        }
    }

    /// Places the current player's mark, records the action, spends one
    /// unit of depth and hands the turn to the opponent.
    #[instrument(level = "trace", skip(self), fields(player = ?self.to_move))]
    pub fn apply(&mut self, action: &Action) -> Result<(), InvalidMoveError> {
        self.check_action(action)?;
        self.sub_boards[action.sub_board_index()].apply(action, self.to_move)?;

        self.last_action = Some(*action);
        self.remaining_depth = self.remaining_depth.map(|d| d.saturating_sub(1));
        self.to_move = self.to_move.opponent();
        self.outcome = self.compute_outcome();
        trace!(outcome = ?self.outcome, "applied action");
        Ok(())
    }

    /// Aggregate heuristic: every sub-board's score (a fixed constant once
    /// won) plus the line heuristic over the grid of sub-board winners.
    pub fn evaluate(&self) -> Evaluation {
        let boards: Evaluation = self
            .sub_boards
            .iter()
            .map(|board| match board.winner() {
                Some(Player::X) => Evaluation::from_x_advantage(SUB_BOARD_WIN_SCORE),
                Some(Player::O) => Evaluation::from_x_advantage(-SUB_BOARD_WIN_SCORE),
                None => board.evaluate(),
            })
            .sum();

        boards + lines::score_lines(&self.meta_spots())
    }

    fn check_action(&self, action: &Action) -> Result<(), InvalidMoveError> {
        if self.is_terminal() {
            return Err(InvalidMoveError::GameOver);
        }
        let target = &self.sub_boards[action.sub_board_index()];
        if target.is_decided() {
            return Err(InvalidMoveError::SubBoardDecided { action: *action });
        }
        if let Some(forced) = self.forced_sub_board() {
            if forced != action.sub_board() {
                return Err(InvalidMoveError::WrongSubBoard {
                    action: *action,
                    forced,
                });
            }
        }
        if !target.is_valid_action(action) {
            return Err(InvalidMoveError::CellOccupied { action: *action });
        }
        Ok(())
    }

    fn meta_spots(&self) -> [Spot; 9] {
        std::array::from_fn(|i| match self.sub_boards[i].outcome() {
            Outcome::InProgress => Spot::Open,
            Outcome::Won(player) => Spot::Taken(player),
            Outcome::Draw => Spot::Blocked,
        })
    }

    fn compute_outcome(&self) -> Outcome {
        if let Some(player) = lines::find_winner(&self.meta_spots()) {
            return Outcome::Won(player);
        }
        if self.sub_boards.iter().all(SubBoard::is_decided) {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }
}

/// Wire form of a [`MetaState`], validated on the way in.
#[derive(Clone, Serialize, Deserialize)]
struct MetaStateRecord {
    sub_boards: [SubBoard; 9],
    to_move: Player,
    last_action: Option<Action>,
    remaining_depth: Option<u32>,
    outcome: Outcome,
}

impl TryFrom<MetaStateRecord> for MetaState {
    type Error = InvalidStateError;

    fn try_from(record: MetaStateRecord) -> Result<Self, Self::Error> {
        for (position, board) in (1..=9).zip(&record.sub_boards) {
            if board.index() != position {
                return Err(InvalidStateError::MisplacedSubBoard {
                    position,
                    index: board.index(),
                });
            }
        }

        let mut state = MetaState {
            sub_boards: record.sub_boards,
            to_move: record.to_move,
            last_action: record.last_action,
            remaining_depth: record.remaining_depth,
            outcome: Outcome::InProgress,
        };
        state.outcome = state.compute_outcome();
        if state.outcome != record.outcome {
            return Err(InvalidStateError::OutcomeMismatch {
                stored: record.outcome,
                actual: state.outcome,
            });
        }
        Ok(state)
    }
}

impl From<MetaState> for MetaStateRecord {
    fn from(state: MetaState) -> Self {
        Self {
            sub_boards: state.sub_boards,
            to_move: state.to_move,
            last_action: state.last_action,
            remaining_depth: state.remaining_depth,
            outcome: state.outcome,
        }
    }
}

impl Board for MetaState {
    type Move = Action;
    type Error = InvalidMoveError;

    fn get_current_player(&self) -> Player {
        self.to_move
    }

    fn get_available_moves(&self) -> Vec<Self::Move> {
        self.available_actions()
    }

    fn perform_move(&mut self, b_move: &Self::Move) -> Result<(), Self::Error> {
        self.apply(b_move)
    }

    fn get_outcome(&self) -> Outcome {
        self.outcome
    }

    fn is_cutoff(&self) -> bool {
        MetaState::is_cutoff(self)
    }

    fn set_depth_limit(&mut self, depth: Option<u32>) {
        self.set_remaining_depth(depth);
    }

    fn get_utility(&self, role: Player) -> i32 {
        self.terminal_utility(role)
    }

    fn get_evaluation(&self, role: Player) -> i32 {
        self.evaluate().for_player(role)
    }
}
