//! Lookup split policy.
//!
//! Shaping engines get unreliable once a single ligature lookup grows too
//! large, so long move groups are cut into several lookups. The counts were
//! tuned by trial and error against real fonts.

use crate::error::FontError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::instrument;

/// Shortest move sequence that needs a ligature.
pub const MIN_SEQUENCE_LENGTH: usize = 2;

/// Longest move sequence in a game.
pub const MAX_SEQUENCE_LENGTH: usize = tictac_board::MAX_MOVES;

/// Split count for one sequence length, as written in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct SplitRule {
    /// Move sequence length the rule applies to.
    pub length: usize,
    /// Number of lookups each group of that length is cut into.
    pub splits: usize,
}

/// Maps a sequence length to the number of lookups per group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPolicy {
    table: BTreeMap<usize, usize>,
}

impl SplitPolicy {
    /// Builds a policy from explicit rules. Lengths not listed are not split.
    ///
    /// # Errors
    ///
    /// Rejects lengths outside `2..=9`, zero split counts and duplicate lengths.
    #[instrument]
    pub fn from_rules(rules: &[SplitRule]) -> Result<Self, FontError> {
        let mut table = BTreeMap::new();
        for rule in rules {
            if !(MIN_SEQUENCE_LENGTH..=MAX_SEQUENCE_LENGTH).contains(&rule.length) {
                return Err(FontError::config(format!(
                    "split policy length {} outside {}..={}",
                    rule.length, MIN_SEQUENCE_LENGTH, MAX_SEQUENCE_LENGTH
                )));
            }
            if rule.splits == 0 {
                return Err(FontError::config(format!(
                    "split policy for length {} must split into at least one lookup",
                    rule.length
                )));
            }
            if table.insert(rule.length, rule.splits).is_some() {
                return Err(FontError::config(format!(
                    "split policy lists length {} twice",
                    rule.length
                )));
            }
        }
        Ok(Self { table })
    }

    /// A policy that never splits.
    pub fn unsplit() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }

    /// Number of lookups for groups of sequences of `length` moves.
    pub fn split_count(&self, length: usize) -> usize {
        self.table.get(&length).copied().unwrap_or(1)
    }

    /// The explicit entries, ascending by length.
    pub fn rules(&self) -> Vec<SplitRule> {
        self.table
            .iter()
            .map(|(&length, &splits)| SplitRule::new(length, splits))
            .collect()
    }

    /// Tuned defaults.
    pub fn default_rules() -> Vec<SplitRule> {
        [(2, 1), (3, 1), (4, 1), (5, 1), (6, 2), (7, 5), (8, 8), (9, 5)]
            .into_iter()
            .map(|(length, splits)| SplitRule::new(length, splits))
            .collect()
    }
}

impl Default for SplitPolicy {
    fn default() -> Self {
        Self {
            table: Self::default_rules()
                .into_iter()
                .map(|rule| (rule.length, rule.splits))
                .collect(),
        }
    }
}
