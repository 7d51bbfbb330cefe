use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// The interface the search needs from a game state.
///
/// The search never mutates a state it was handed: it clones, then calls
/// [`Board::perform_move`] on the private copy.
pub trait Board: Clone {
    /// The type representing a move in the game.
    type Move: Copy + PartialEq + Debug;
    /// The error returned when a move is rejected.
    type Error;

    /// Returns the player whose turn it is to make a move.
    fn get_current_player(&self) -> Player;

    /// Returns all legal moves, in a fixed enumeration order.
    fn get_available_moves(&self) -> Vec<Self::Move>;

    /// Applies a move, flipping the player to move.
    fn perform_move(&mut self, b_move: &Self::Move) -> Result<(), Self::Error>;

    /// Returns the current outcome of the game.
    fn get_outcome(&self) -> Outcome;

    /// True when the search must stop expanding this state.
    fn is_cutoff(&self) -> bool;

    /// Replaces the remaining search depth, `None` meaning unbounded.
    fn set_depth_limit(&mut self, depth: Option<u32>);

    /// Exact value of a finished game for `role`: `1`, `-1` or `0`.
    fn get_utility(&self, role: Player) -> i32;

    /// Heuristic desirability of an unfinished state for `role`.
    fn get_evaluation(&self, role: Player) -> i32;
}

/// One of the two players. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Player X.
    X,
    /// Player O.
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// The state of a game, or of a single sub-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Moves are still possible.
    InProgress,
    /// A player completed a line.
    Won(Player),
    /// Nothing left to play and nobody won.
    Draw,
}

impl Outcome {
    /// True once the outcome can no longer change.
    pub fn is_decided(self) -> bool {
        self != Outcome::InProgress
    }

    /// The winning player, if any.
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Won(player) => Some(player),
            _ => None,
        }
    }
}

/// A pair of heuristic scores, one per player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Evaluation {
    /// The higher, the better for X.
    pub x: i32,
    /// The higher, the better for O.
    pub o: i32,
}

impl Evaluation {
    /// Builds a symmetric evaluation from X's net advantage.
    pub fn from_x_advantage(x: i32) -> Self {
        Self { x, o: -x }
    }

    /// The score seen by `player`.
    pub fn for_player(self, player: Player) -> i32 {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }
}

impl std::ops::Add for Evaluation {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            o: self.o + rhs.o,
        }
    }
}

impl std::iter::Sum for Evaluation {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Evaluation::default(), |acc, e| acc + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_an_involution() {
        assert_eq!(Player::X.opponent(), Player::O);
        assert_eq!(Player::O.opponent().opponent(), Player::O);
    }

    #[test]
    fn evaluations_add_per_player() {
        let total: Evaluation = [
            Evaluation::from_x_advantage(10),
            Evaluation::from_x_advantage(-100),
        ]
        .into_iter()
        .sum();

        assert_eq!(total, Evaluation { x: -90, o: 90 });
        assert_eq!(total.for_player(Player::O), 90);
    }

    #[test]
    fn outcome_helpers() {
        assert!(!Outcome::InProgress.is_decided());
        assert!(Outcome::Draw.is_decided());
        assert_eq!(Outcome::Won(Player::O).winner(), Some(Player::O));
        assert_eq!(Outcome::Draw.winner(), None);
    }
}
