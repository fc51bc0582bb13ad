//! Board identity codec.
//!
//! A board identity is the base-3 number whose digit at position `i` is the
//! mark in cell `i` (0 empty, 1 X, 2 O). Cell 0 is the least significant digit.

use crate::error::{BoardError, BoardErrorKind};
use crate::types::{BOARD_CELLS, Board, BoardId, Cell, Player};
use tracing::instrument;

/// Encodes a board as its canonical identity.
#[instrument(level = "trace", skip(board))]
pub fn encode(board: &Board) -> BoardId {
    let raw = board
        .cells()
        .iter()
        .rev()
        .fold(0u16, |acc, cell| acc * 3 + cell.weight());
    BoardId::from_raw(raw)
}

/// Decodes a raw identity into a board.
///
/// # Errors
///
/// Returns [`BoardErrorKind::InvalidEncoding`] when `raw` needs more than nine
/// ternary digits or produces a digit outside `{0, 1, 2}`.
#[instrument(level = "trace")]
pub fn decode(raw: u32) -> Result<Board, BoardError> {
    if raw >= BoardId::COUNT {
        return Err(BoardError::new(BoardErrorKind::InvalidEncoding(raw)));
    }

    let mut cells = [Cell::Empty; BOARD_CELLS];
    let mut rest = raw;
    for cell in cells.iter_mut() {
        *cell = cell_from_digit(rest % 3).ok_or_else(|| BoardError::new(BoardErrorKind::InvalidEncoding(raw)))?;
        rest /= 3;
    }
    Ok(Board::from_cells(cells))
}

/// Decodes a typed identity into a board.
///
/// # Errors
///
/// Only fails if the identity invariant was broken upstream.
pub fn decode_id(id: BoardId) -> Result<Board, BoardError> {
    decode(id.get())
}

fn cell_from_digit(digit: u32) -> Option<Cell> {
    match digit {
        0 => Some(Cell::Empty),
        1 => Some(Cell::Occupied(Player::X)),
        2 => Some(Cell::Occupied(Player::O)),
        _ => None,
    }
}
