//! Winning lines of a 3x3 grid and the line-threat heuristic shared by
//! sub-boards and the meta-board.

use crate::board::{Evaluation, Player};

/// Score for a completed line.
pub const LINE_COMPLETE_SCORE: i32 = 100;
/// Score for two marks in a line whose third spot is still open.
pub const LINE_THREAT_SCORE: i32 = 10;

/// Winning line indices on a 3x3 grid, row-major.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// What a single spot of a 3x3 grid contributes to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spot {
    /// Still playable.
    Open,
    /// Owned by a player.
    Taken(Player),
    /// Owned by nobody and never will be.
    Blocked,
}

/// Returns the player owning a complete line, if any.
pub fn find_winner(spots: &[Spot; 9]) -> Option<Player> {
    WINNING_LINES.iter().find_map(|&[a, b, c]| match spots[a] {
        Spot::Taken(player) if spots[b] == spots[a] && spots[c] == spots[a] => Some(player),
        _ => None,
    })
}

/// Sums the line heuristic over all eight lines, from X's point of view.
///
/// A line held entirely by one player is worth [`LINE_COMPLETE_SCORE`], two
/// marks plus an open spot is worth [`LINE_THREAT_SCORE`]. O's lines count
/// negatively.
pub fn score_lines(spots: &[Spot; 9]) -> Evaluation {
    let x_advantage: i32 = WINNING_LINES
        .iter()
        .map(|line| score_line(spots, line, Player::X) - score_line(spots, line, Player::O))
        .sum();
    Evaluation::from_x_advantage(x_advantage)
}

fn score_line(spots: &[Spot; 9], line: &[usize; 3], player: Player) -> i32 {
    let mut owned = 0;
    let mut open = 0;
    for &idx in line {
        match spots[idx] {
            Spot::Taken(p) if p == player => owned += 1,
            Spot::Open => open += 1,
            _ => return 0,
        }
    }

    match (owned, open) {
        (3, _) => LINE_COMPLETE_SCORE,
        (2, 1) => LINE_THREAT_SCORE,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Spot = Spot::Taken(Player::X);
    const O: Spot = Spot::Taken(Player::O);
    const E: Spot = Spot::Open;
    const B: Spot = Spot::Blocked;

    #[test]
    fn finds_column_winner() {
        let spots = [O, X, E, O, X, E, E, X, E];
        assert_eq!(find_winner(&spots), Some(Player::X));
    }

    #[test]
    fn blocked_spots_never_win() {
        let spots = [B, B, B, E, E, E, E, E, E];
        assert_eq!(find_winner(&spots), None);
    }

    #[test]
    fn threat_needs_an_open_third() {
        let open = [X, X, E, E, E, E, E, E, E];
        let blocked = [X, X, B, E, E, E, E, E, E];

        assert_eq!(score_lines(&open).x, LINE_THREAT_SCORE);
        assert_eq!(score_lines(&blocked).x, 0);
    }

    #[test]
    fn opponent_lines_are_subtracted() {
        // O holds the left column and blocks the top row
        let spots = [O, X, X, O, E, E, O, E, E];

        let eval = score_lines(&spots);

        assert_eq!(eval.x, -LINE_COMPLETE_SCORE);
        assert_eq!(eval.o, LINE_COMPLETE_SCORE);
    }
}
