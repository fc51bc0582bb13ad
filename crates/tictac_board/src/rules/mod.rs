//! Game rules for tic-tac-toe.
//!
//! Pure functions over [`Board`](crate::Board) values. The tree builder uses
//! them to decide terminality; glyph generation uses the victory line to pick
//! which marker to draw.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LinePattern, Victory, detect};
