//! Grouping of candidate positions by dispatch key.

use super::LigatureRule;
use crate::policy::{MAX_SEQUENCE_LENGTH, MIN_SEQUENCE_LENGTH};
use std::collections::BTreeMap;
use tictac_board::GamePosition;
use tracing::{debug, instrument};

/// Sequence length and first move shared by every rule in a group.
///
/// Ordering is by length, then first move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    /// Full move sequence length.
    pub length: usize,
    /// First move, the glyph the ligature set is keyed on.
    pub first: u8,
}

impl GroupKey {
    /// Returns true when the key describes a sequence that needs a ligature.
    pub fn is_valid(&self) -> bool {
        (MIN_SEQUENCE_LENGTH..=MAX_SEQUENCE_LENGTH).contains(&self.length) && (1..=9).contains(&self.first)
    }
}

/// Candidate rules partitioned by [`GroupKey`], each group in input order.
#[derive(Debug, Clone, Default)]
pub struct Groups {
    groups: BTreeMap<GroupKey, Vec<LigatureRule>>,
    candidate_count: usize,
}

impl Groups {
    /// Groups in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &Vec<LigatureRule>)> {
        self.groups.iter()
    }

    /// Rules of one group.
    pub fn get(&self, key: &GroupKey) -> Option<&[LigatureRule]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true when no position qualified.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of positions that became rules.
    pub fn candidate_count(&self) -> usize {
        self.candidate_count
    }
}

/// Keeps positions with `2..=max_length` moves and groups them.
///
/// Shorter sequences need no ligature: a single move glyph already renders
/// the right board.
#[instrument(skip(positions))]
pub fn group_positions<I>(positions: I, max_length: usize) -> Groups
where
    I: IntoIterator<Item = GamePosition>,
{
    let mut grouped = Groups::default();
    for position in positions {
        let moves = position.moves();
        let length = moves.len();
        if length < MIN_SEQUENCE_LENGTH || length > max_length {
            continue;
        }
        let Some(first) = moves.first() else {
            continue;
        };

        grouped.candidate_count += 1;
        grouped
            .groups
            .entry(GroupKey { length, first })
            .or_default()
            .push(LigatureRule::new(moves.tail(), position.board()));
    }

    debug!(
        group_count = grouped.groups.len(),
        candidate_count = grouped.candidate_count,
        "Grouped candidate positions"
    );
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(moves: &[u8]) -> GamePosition {
        GamePosition::from_moves(moves).unwrap()
    }

    #[test]
    fn test_short_sequences_are_skipped() {
        let groups = group_positions([pos(&[]), pos(&[5]), pos(&[5, 1])], 9);
        assert_eq!(groups.candidate_count(), 1);
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn test_groups_by_length_and_first_move() {
        let groups = group_positions(
            [pos(&[1, 2]), pos(&[1, 3]), pos(&[2, 1]), pos(&[1, 2, 3])],
            9,
        );
        assert_eq!(groups.len(), 3);
        let ones = groups.get(&GroupKey { length: 2, first: 1 }).unwrap();
        let tails: Vec<String> = ones.iter().map(|r| r.tail().to_string()).collect();
        assert_eq!(tails, vec!["2", "3"]);
        assert_eq!(ones[0].target(), pos(&[1, 2]).board());
    }

    #[test]
    fn test_max_length_caps_candidates() {
        let groups = group_positions([pos(&[1, 2]), pos(&[1, 2, 3])], 2);
        assert_eq!(groups.candidate_count(), 1);
    }

    #[test]
    fn test_keys_iterate_shortest_first() {
        let groups = group_positions([pos(&[3, 1, 2]), pos(&[2, 1]), pos(&[1, 2])], 9);
        let keys: Vec<(usize, u8)> = groups.iter().map(|(k, _)| (k.length, k.first)).collect();
        assert_eq!(keys, vec![(2, 1), (2, 2), (3, 3)]);
        assert!(groups.iter().all(|(k, _)| k.is_valid()));
    }
}
