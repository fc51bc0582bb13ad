//! Core domain types for the board font.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of cells on the board.
pub const BOARD_CELLS: usize = 9;

/// Longest possible move sequence.
pub const MAX_MOVES: usize = BOARD_CELLS;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
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

    /// Weight of this player's mark in a board identity.
    pub fn weight(self) -> u16 {
        match self {
            Player::X => 1,
            Player::O => 2,
        }
    }

    /// Player who makes the move following `moves_played` moves.
    pub fn to_move(moves_played: usize) -> Self {
        if moves_played % 2 == 0 { Player::X } else { Player::O }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a player.
    Occupied(Player),
}

impl Cell {
    /// Weight of this cell in a board identity (0 for empty).
    pub fn weight(self) -> u16 {
        match self {
            Cell::Empty => 0,
            Cell::Occupied(player) => player.weight(),
        }
    }

    /// Returns true when no mark has been placed here.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// 3x3 board.
///
/// Cells are indexed 0-8 starting at the bottom-left corner and reading
/// row-major upward:
///
/// ```text
/// 6 7 8
/// 3 4 5
/// 0 1 2
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board from its cells.
    pub fn from_cells(cells: [Cell; BOARD_CELLS]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given index (0-8).
    pub fn get(&self, idx: usize) -> Option<Cell> {
        self.cells.get(idx).copied()
    }

    /// Returns a copy of the board with `cell` placed at `idx`.
    ///
    /// Out-of-range indices leave the board unchanged.
    pub fn with(mut self, idx: usize, cell: Cell) -> Self {
        if let Some(slot) = self.cells.get_mut(idx) {
            *slot = cell;
        }
        self
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, idx: usize) -> bool {
        matches!(self.get(idx), Some(Cell::Empty))
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.cells
    }

    /// Canonical identity of this board.
    pub fn id(&self) -> BoardId {
        crate::codec::encode(self)
    }

    /// Empty cell indices, 1-based and ascending.
    pub fn empty_cells(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(idx, _)| idx as u8 + 1)
    }

    /// Completed line on this board, if any.
    pub fn victory(&self) -> Option<crate::Victory> {
        crate::rules::detect(self)
    }
}

impl fmt::Display for Board {
    /// Top row first, `.` for empty cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..3).rev() {
            for col in 0..3 {
                let symbol = match self.cells[row * 3 + col] {
                    Cell::Empty => '.',
                    Cell::Occupied(Player::X) => 'X',
                    Cell::Occupied(Player::O) => 'O',
                };
                write!(f, "{symbol}")?;
            }
            if row > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Canonical board identity in `[0, 3^9)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct BoardId(u16);

impl BoardId {
    /// Number of distinct identities (`3^9`).
    pub const COUNT: u32 = 19_683;

    /// The empty board.
    pub const EMPTY: BoardId = BoardId(0);

    /// Wraps a raw identity, returning `None` when it is out of range.
    pub fn new(raw: u32) -> Option<Self> {
        if raw < Self::COUNT {
            u16::try_from(raw).ok().map(BoardId)
        } else {
            None
        }
    }

    /// Raw integer value.
    pub fn get(self) -> u32 {
        u32::from(self.0)
    }

    /// Identity after `player` marks the 1-based cell `index`.
    ///
    /// Does not check that the cell was empty.
    pub fn with_move(self, index: u8, player: Player) -> Self {
        BoardId(self.0 + player.weight() * 3u16.pow(u32::from(index) - 1))
    }

    pub(crate) fn from_raw(raw: u16) -> Self {
        BoardId(raw)
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered, 1-based cell indices in play order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MoveSequence {
    moves: [u8; MAX_MOVES],
    len: u8,
}

impl MoveSequence {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a sequence from a slice, returning `None` when it has more than nine moves.
    pub fn from_slice(moves: &[u8]) -> Option<Self> {
        if moves.len() > MAX_MOVES {
            return None;
        }
        let mut seq = Self::new();
        seq.moves[..moves.len()].copy_from_slice(moves);
        seq.len = moves.len() as u8;
        Some(seq)
    }

    /// Returns a new sequence with `index` appended.
    ///
    /// A full sequence is returned unchanged.
    pub fn push(self, index: u8) -> Self {
        let mut next = self;
        if usize::from(self.len) < MAX_MOVES {
            next.moves[usize::from(self.len)] = index;
            next.len += 1;
        }
        next
    }

    /// Number of moves.
    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    /// Returns true when no move has been played.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The moves as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.moves[..self.len()]
    }

    /// First move, used as the ligature dispatch key.
    pub fn first(&self) -> Option<u8> {
        self.as_slice().first().copied()
    }

    /// Last move played.
    pub fn last(&self) -> Option<u8> {
        self.as_slice().last().copied()
    }

    /// Every move after the first.
    pub fn tail(&self) -> MoveSequence {
        match self.as_slice().split_first() {
            Some((_, rest)) => {
                let mut seq = Self::new();
                seq.moves[..rest.len()].copy_from_slice(rest);
                seq.len = rest.len() as u8;
                seq
            }
            None => Self::new(),
        }
    }

    /// Iterates the moves in play order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.as_slice().iter().copied()
    }
}

impl fmt::Debug for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl fmt::Display for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_alternates() {
        assert_eq!(Player::X.opponent(), Player::O);
        assert_eq!(Player::O.opponent(), Player::X);
        assert_eq!(Player::to_move(0), Player::X);
        assert_eq!(Player::to_move(3), Player::O);
    }

    #[test]
    fn test_board_id_with_move() {
        let id = BoardId::EMPTY.with_move(1, Player::X).with_move(9, Player::O);
        assert_eq!(id.get(), 1 + 2 * 6561);
    }

    #[test]
    fn test_board_id_range() {
        assert_eq!(BoardId::new(19_682).map(BoardId::get), Some(19_682));
        assert_eq!(BoardId::new(19_683), None);
    }

    #[test]
    fn test_move_sequence_tail() {
        let seq = MoveSequence::from_slice(&[5, 1, 9]).unwrap();
        assert_eq!(seq.first(), Some(5));
        assert_eq!(seq.last(), Some(9));
        assert_eq!(seq.tail().as_slice(), &[1, 9]);
        assert!(MoveSequence::new().tail().is_empty());
        assert_eq!(seq.to_string(), "5,1,9");
    }

    #[test]
    fn test_move_sequence_rejects_overflow() {
        assert!(MoveSequence::from_slice(&[1; 10]).is_none());
        let full = MoveSequence::from_slice(&[1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap();
        assert_eq!(full.push(1), full);
    }

    #[test]
    fn test_board_display_top_row_first() {
        let board = Board::new()
            .with(0, Cell::Occupied(Player::X))
            .with(8, Cell::Occupied(Player::O));
        assert_eq!(board.to_string(), "..O\n...\nX..");
    }

    #[test]
    fn test_empty_cells_are_one_based() {
        let board = Board::new().with(4, Cell::Occupied(Player::X));
        let empty: Vec<u8> = board.empty_cells().collect();
        assert_eq!(empty, vec![1, 2, 3, 4, 6, 7, 8, 9]);
    }
}
