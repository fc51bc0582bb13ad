//! Draw detection logic for tic-tac-toe.

use super::win::detect;
use crate::types::Board;
use tracing::instrument;

/// Checks if the board is full (all cells occupied).
#[instrument(level = "trace", skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|c| !c.is_empty())
}

/// A full board with no completed line.
#[instrument(level = "trace", skip(board))]
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && detect(board).is_none()
}
