//! Tic-tac-toe board model for the ligature font.
//!
//! Boards are identified by a canonical base-3 integer so that every reachable
//! arrangement of marks maps to exactly one glyph.
//!
//! # Architecture
//!
//! - **Codec**: integer identity to 9-cell board and back
//! - **Rules**: line (victory) and full-board (draw) detection
//! - **Tree**: exhaustive enumeration of every game under alternating play
//!
//! # Example
//!
//! ```
//! use tictac_board::{GameTree, LinePattern, Player, codec};
//!
//! # fn example() -> Result<(), tictac_board::BoardError> {
//! let board = codec::decode(13)?;
//! let victory = board.victory().expect("bottom row is complete");
//! assert_eq!(victory.line(), LinePattern::Row1);
//! assert_eq!(victory.winner(), Player::X);
//!
//! let tree = GameTree::build()?;
//! assert_eq!(tree.iter().count(), 549_946);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod codec;
mod error;
pub mod rules;
mod tree;
mod types;

pub use error::{BoardError, BoardErrorKind};
pub use rules::{LinePattern, Victory, detect, is_draw, is_full};
pub use tree::{GameNode, GamePosition, GameTree, NodeState, PreOrder, apply_move, classify, expand, legal_moves};
pub use types::{BOARD_CELLS, Board, BoardId, Cell, MAX_MOVES, MoveSequence, Player};
