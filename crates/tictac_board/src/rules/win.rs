//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Cell, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the eight lines that win the game.
///
/// The variant order is the detection priority. Names are the stable
/// selectors used by glyph rendering.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LinePattern {
    /// Bottom row.
    Row1,
    /// Middle row.
    Row2,
    /// Top row.
    Row3,
    /// Left column.
    Col1,
    /// Middle column.
    Col2,
    /// Right column.
    Col3,
    /// Bottom-left to top-right diagonal.
    Bltr,
    /// Top-left to bottom-right diagonal.
    Tlbr,
}

impl LinePattern {
    /// All lines in detection order.
    pub const ALL: [LinePattern; 8] = [
        LinePattern::Row1,
        LinePattern::Row2,
        LinePattern::Row3,
        LinePattern::Col1,
        LinePattern::Col2,
        LinePattern::Col3,
        LinePattern::Bltr,
        LinePattern::Tlbr,
    ];

    /// Cell indices (0-based) making up this line.
    pub fn cells(self) -> [usize; 3] {
        match self {
            LinePattern::Row1 => [0, 1, 2],
            LinePattern::Row2 => [3, 4, 5],
            LinePattern::Row3 => [6, 7, 8],
            LinePattern::Col1 => [6, 3, 0],
            LinePattern::Col2 => [7, 4, 1],
            LinePattern::Col3 => [8, 5, 2],
            LinePattern::Bltr => [0, 4, 8],
            LinePattern::Tlbr => [6, 4, 2],
        }
    }

    /// Stable name (`row1`, `bltr`, ...).
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// A completed line and who completed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Victory {
    line: LinePattern,
    winner: Player,
}

impl Victory {
    /// The completed line.
    pub fn line(&self) -> LinePattern {
        self.line
    }

    /// The player occupying the line.
    pub fn winner(&self) -> Player {
        self.winner
    }
}

/// Finds the first completed line in [`LinePattern::ALL`] order.
///
/// Returns `None` when no line is complete. Boards with several lines (not
/// reachable by legal play) report rows before columns before diagonals.
#[instrument(level = "trace", skip(board))]
pub fn detect(board: &Board) -> Option<Victory> {
    let cells = board.cells();
    LinePattern::ALL.into_iter().find_map(|line| {
        let [a, b, c] = line.cells();
        match cells[a] {
            Cell::Occupied(winner) if cells[b] == cells[a] && cells[c] == cells[a] => {
                Some(Victory { line, winner })
            }
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn board_with(marks: &[(usize, Player)]) -> Board {
        marks
            .iter()
            .fold(Board::new(), |board, &(idx, p)| board.with(idx, Cell::Occupied(p)))
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(detect(&Board::new()), None);
    }

    #[test]
    fn test_winner_bottom_row() {
        let board = board_with(&[(0, Player::X), (1, Player::X), (2, Player::X)]);
        let victory = detect(&board).unwrap();
        assert_eq!(victory.line(), LinePattern::Row1);
        assert_eq!(victory.winner(), Player::X);
        assert_eq!(victory.line().name(), "row1");
    }

    #[test]
    fn test_winner_diagonal() {
        let board = board_with(&[(6, Player::O), (4, Player::O), (2, Player::O)]);
        let victory = detect(&board).unwrap();
        assert_eq!(victory.line(), LinePattern::Tlbr);
        assert_eq!(victory.winner(), Player::O);
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = board_with(&[(0, Player::X), (1, Player::X), (2, Player::O)]);
        assert_eq!(detect(&board), None);
    }

    #[test]
    fn test_rows_take_priority_over_columns() {
        let all_x: Vec<(usize, Player)> = (0..9).map(|idx| (idx, Player::X)).collect();
        let victory = detect(&board_with(&all_x)).unwrap();
        assert_eq!(victory.line(), LinePattern::Row1);

        // Column 1 and the bltr diagonal both complete; column wins.
        let board = board_with(&[(0, Player::O), (3, Player::O), (6, Player::O), (4, Player::O), (8, Player::O)]);
        assert_eq!(detect(&board).unwrap().line(), LinePattern::Col1);
    }

    #[test]
    fn test_every_line_detected_alone() {
        for line in LinePattern::iter() {
            let marks: Vec<(usize, Player)> = line.cells().iter().map(|&idx| (idx, Player::O)).collect();
            assert_eq!(detect(&board_with(&marks)).map(|v| v.line()), Some(line));
        }
    }

    #[test]
    fn test_line_names_are_stable() {
        let names: Vec<&str> = LinePattern::iter().map(LinePattern::name).collect();
        assert_eq!(
            names,
            vec!["row1", "row2", "row3", "col1", "col2", "col3", "bltr", "tlbr"]
        );
    }
}
