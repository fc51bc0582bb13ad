//! Exhaustive game tree.
//!
//! Every reachable position under alternating play, X first, stopping at a
//! completed line or a full board. Positions are immutable values; each node
//! owns its children ordered by move index.

use crate::codec;
use crate::error::BoardError;
use crate::rules::{Victory, detect, is_full};
use crate::types::{BoardId, MoveSequence, Player};
use tracing::{debug, info, instrument};

/// A move sequence and the board it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GamePosition {
    moves: MoveSequence,
    board: BoardId,
}

impl GamePosition {
    /// The starting position: no moves, empty board.
    pub fn root() -> Self {
        Self::default()
    }

    /// Replays `moves` from the root with alternating players.
    ///
    /// Returns `None` for sequences longer than nine moves. Legality is not checked.
    pub fn from_moves(moves: &[u8]) -> Option<Self> {
        if moves.len() > crate::MAX_MOVES {
            return None;
        }
        Some(
            moves
                .iter()
                .enumerate()
                .fold(Self::root(), |pos, (ply, &index)| apply_move(&pos, index, Player::to_move(ply))),
        )
    }

    /// Moves played so far.
    pub fn moves(&self) -> &MoveSequence {
        &self.moves
    }

    /// Board identity after those moves.
    pub fn board(&self) -> BoardId {
        self.board
    }

    /// Player whose turn it is.
    pub fn to_move(&self) -> Player {
        Player::to_move(self.moves.len())
    }
}

/// Lifecycle state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// At least one legal move remains.
    Active,
    /// A line is complete.
    Won(Victory),
    /// Every cell is occupied and no line is complete.
    Full,
}

impl NodeState {
    /// Returns true for terminal states.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, NodeState::Active)
    }
}

/// Classifies a position.
///
/// # Errors
///
/// Fails only if the position carries an invalid board identity.
#[instrument(level = "trace")]
pub fn classify(position: &GamePosition) -> Result<NodeState, BoardError> {
    let board = codec::decode_id(position.board)?;
    Ok(match detect(&board) {
        Some(victory) => NodeState::Won(victory),
        None if is_full(&board) => NodeState::Full,
        None => NodeState::Active,
    })
}

/// Legal next moves (1-based, ascending); empty once a line is complete.
///
/// # Errors
///
/// Fails only if the position carries an invalid board identity.
#[instrument(level = "trace")]
pub fn legal_moves(position: &GamePosition) -> Result<Vec<u8>, BoardError> {
    let board = codec::decode_id(position.board)?;
    if detect(&board).is_some() {
        return Ok(Vec::new());
    }
    Ok(board.empty_cells().collect())
}

/// Plays `index` (1-based) for `player`, returning the new position.
///
/// The move is not validated; callers pass indices from [`legal_moves`].
pub fn apply_move(position: &GamePosition, index: u8, player: Player) -> GamePosition {
    GamePosition {
        moves: position.moves.push(index),
        board: position.board.with_move(index, player),
    }
}

/// Builds the full subtree below `position` with `player` to move.
///
/// # Errors
///
/// Propagates board decoding failures.
pub fn expand(position: GamePosition, player: Player) -> Result<GameNode, BoardError> {
    let children = legal_moves(&position)?
        .into_iter()
        .map(|index| expand(apply_move(&position, index, player), player.opponent()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(GameNode { position, children })
}

/// A position with its children ordered by move index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameNode {
    position: GamePosition,
    children: Vec<GameNode>,
}

impl GameNode {
    /// The position at this node.
    pub fn position(&self) -> &GamePosition {
        &self.position
    }

    /// Children in ascending move order.
    pub fn children(&self) -> &[GameNode] {
        &self.children
    }

    /// Child reached by playing `index` (1-based).
    pub fn child(&self, index: u8) -> Option<&GameNode> {
        self.children
            .binary_search_by_key(&Some(index), |child| child.position.moves.last())
            .ok()
            .map(|i| &self.children[i])
    }

    /// Move indices with a child node.
    pub fn moves(&self) -> impl Iterator<Item = u8> + '_ {
        self.children.iter().filter_map(|child| child.position.moves.last())
    }

    /// Returns true when this node has no children.
    pub fn is_terminal(&self) -> bool {
        self.children.is_empty()
    }
}

/// The complete game tree rooted at the empty board.
#[derive(Debug, Clone)]
pub struct GameTree {
    root: GameNode,
}

impl GameTree {
    /// Enumerates every reachable position.
    ///
    /// # Errors
    ///
    /// Propagates board decoding failures, which indicate a codec bug.
    #[instrument]
    pub fn build() -> Result<Self, BoardError> {
        let started = std::time::Instant::now();
        let root = expand(GamePosition::root(), Player::X)?;
        let tree = Self { root };
        info!(elapsed_ms = started.elapsed().as_millis() as u64, "Generated game tree");
        Ok(tree)
    }

    /// The root node.
    pub fn root(&self) -> &GameNode {
        &self.root
    }

    /// Depth-first pre-order traversal; children in ascending move order.
    ///
    /// Each call starts a fresh traversal.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder {
            stack: vec![&self.root],
        }
    }

    /// Positions in traversal order.
    pub fn positions(&self) -> impl Iterator<Item = GamePosition> + '_ {
        self.iter().map(|node| node.position)
    }

    /// Total number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Every distinct board identity reachable in play, ascending.
    #[instrument(skip(self))]
    pub fn distinct_boards(&self) -> std::collections::BTreeSet<BoardId> {
        let boards: std::collections::BTreeSet<BoardId> = self.positions().map(|p| p.board).collect();
        debug!(board_count = boards.len(), "Extracted distinct boards");
        boards
    }
}

impl<'a> IntoIterator for &'a GameTree {
    type Item = &'a GameNode;
    type IntoIter = PreOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order iterator over a [`GameTree`].
#[derive(Debug, Clone)]
pub struct PreOrder<'a> {
    stack: Vec<&'a GameNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a GameNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reversed so the lowest move index is popped first.
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_move_is_pure() {
        let root = GamePosition::root();
        let next = apply_move(&root, 5, Player::X);
        assert!(root.moves().is_empty());
        assert_eq!(next.moves().as_slice(), &[5]);
        assert_eq!(next.board().get(), 81);
    }

    #[test]
    fn test_from_moves_alternates() {
        let pos = GamePosition::from_moves(&[1, 2]).unwrap();
        assert_eq!(pos.board().get(), 1 + 2 * 3);
        assert_eq!(pos.to_move(), Player::X);
    }

    #[test]
    fn test_legal_moves_empty_after_win() {
        // X: 1, 2, 3 (bottom row); O: 4, 5
        let pos = GamePosition::from_moves(&[1, 4, 2, 5, 3]).unwrap();
        assert!(legal_moves(&pos).unwrap().is_empty());
        assert!(matches!(classify(&pos).unwrap(), NodeState::Won(_)));
    }

    #[test]
    fn test_legal_moves_root() {
        assert_eq!(legal_moves(&GamePosition::root()).unwrap(), (1..=9).collect::<Vec<u8>>());
    }

    #[test]
    fn test_expand_small_subtree() {
        // One cell left: a single child, which is full.
        let pos = GamePosition::from_moves(&[1, 2, 3, 5, 4, 6, 8, 7]).unwrap();
        let node = expand(pos, pos.to_move()).unwrap();
        assert_eq!(node.moves().collect::<Vec<_>>(), vec![9]);
        let leaf = node.child(9).unwrap();
        assert!(leaf.is_terminal());
        assert_eq!(classify(leaf.position()).unwrap(), NodeState::Full);
        assert!(node.child(1).is_none());
    }

    #[test]
    fn test_pre_order_visits_parent_first() {
        let pos = GamePosition::from_moves(&[1, 2, 3, 5, 4, 6]).unwrap();
        let tree = GameTree {
            root: expand(pos, pos.to_move()).unwrap(),
        };
        let seqs: Vec<String> = tree.positions().map(|p| p.moves().to_string()).collect();
        assert_eq!(seqs[0], "1,2,3,5,4,6");
        // X completes col1 with 7, so that branch stops immediately.
        assert_eq!(seqs[1], "1,2,3,5,4,6,7");
        assert_eq!(seqs[2], "1,2,3,5,4,6,8");
        assert_eq!(seqs[3], "1,2,3,5,4,6,8,7");
    }
}
