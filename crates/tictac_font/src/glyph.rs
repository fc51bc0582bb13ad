//! Glyph identities.
//!
//! Every reachable board gets a glyph named after its identity in hex, and
//! each single-X board doubles as the glyph typed for that move digit. The
//! names are what the ligature table refers to; outlines are drawn elsewhere.

use serde::Serialize;
use std::collections::BTreeSet;
use tictac_board::{BoardId, LinePattern, Player, codec};
use tracing::{debug, instrument};

use crate::error::FontError;

/// First codepoint of the board glyph range (Supplementary Private Use Area-A).
pub const BOARD_CODEPOINT_BASE: u32 = 0xF0000;

/// Glyph name of a board: `board` followed by the identity in lowercase hex.
pub fn board_glyph_name(id: BoardId) -> String {
    format!("board{:x}", id.get())
}

/// Glyph name of a move digit (1-9).
pub fn start_glyph_name(digit: u8) -> String {
    format!("start{}", digit)
}

/// Codepoint of a board glyph.
pub fn board_codepoint(id: BoardId) -> u32 {
    BOARD_CODEPOINT_BASE + id.get()
}

/// Board with a single X at cell `digit` (1-9), drawn by that digit's glyph.
pub fn start_board(digit: u8) -> BoardId {
    BoardId::EMPTY.with_move(digit, Player::X)
}

/// Move digit whose glyph aliases `id`, if `id` is a single-X board.
pub fn start_digit(id: BoardId) -> Option<u8> {
    (1..=9).find(|&digit| start_board(digit) == id)
}

/// One glyph the font must contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlyphEntry {
    /// Glyph name used by the substitution table.
    pub name: String,
    /// Unicode codepoint mapped to the glyph.
    pub codepoint: u32,
    /// Board drawn by the glyph.
    pub board: BoardId,
    /// Winning line to mark, if any.
    pub victory: Option<LinePattern>,
}

/// Every glyph needed for a set of boards.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GlyphInventory {
    entries: Vec<GlyphEntry>,
}

impl GlyphInventory {
    /// Board glyphs in ascending identity, each single-X board followed by
    /// its move digit glyph.
    ///
    /// # Errors
    ///
    /// Fails if a board identity cannot be decoded.
    #[instrument(skip(boards))]
    pub fn from_boards(boards: &BTreeSet<BoardId>) -> Result<Self, FontError> {
        let mut entries = Vec::with_capacity(boards.len() + 9);
        for &id in boards {
            let victory = codec::decode_id(id)?.victory().map(|v| v.line());
            entries.push(GlyphEntry {
                name: board_glyph_name(id),
                codepoint: board_codepoint(id),
                board: id,
                victory,
            });
            if let Some(digit) = start_digit(id) {
                entries.push(GlyphEntry {
                    name: start_glyph_name(digit),
                    codepoint: u32::from(b'0' + digit),
                    board: id,
                    victory,
                });
            }
        }
        debug!(glyph_count = entries.len(), "Built glyph inventory");
        Ok(Self { entries })
    }

    /// All entries.
    pub fn entries(&self) -> &[GlyphEntry] {
        &self.entries
    }

    /// Number of glyphs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when there are no glyphs.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a glyph by name.
    pub fn get(&self, name: &str) -> Option<&GlyphEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }
}
