//! Ligature table synthesis.
//!
//! Turns enumerated positions into an ordered list of ligature lookups:
//!
//! 1. group positions by (sequence length, first move)
//! 2. cut each group into contiguous chunks per the [`SplitPolicy`]
//! 3. order lookups longest sequence first
//!
//! The shaping engine applies lookups in list order and a substituted span is
//! invisible to later lookups, so longer sequences must come first or a
//! shorter rule matching their prefix would collapse them early.

pub mod group;
pub mod split;

pub use group::{GroupKey, Groups, group_positions};
pub use split::split_group;

use crate::error::FontError;
use crate::policy::{MAX_SEQUENCE_LENGTH, MIN_SEQUENCE_LENGTH, SplitPolicy};
use derive_getters::Getters;
use serde::Serialize;
use std::collections::BTreeMap;
use tictac_board::{BoardId, GamePosition, MoveSequence};
use tracing::{debug, error, info, instrument};

/// Moves after the first, and the board they lead to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_new::new)]
pub struct LigatureRule {
    tail: MoveSequence,
    target: BoardId,
}

impl LigatureRule {
    /// Moves following the dispatch move.
    pub fn tail(&self) -> &MoveSequence {
        &self.tail
    }

    /// Board the whole sequence collapses into.
    pub fn target(&self) -> BoardId {
        self.target
    }
}

/// Rules sharing a dispatch move and sequence length.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Lookup {
    /// First move of every sequence in this lookup.
    dispatch: u8,
    /// Full length of every sequence in this lookup.
    sequence_length: usize,
    /// Position of this chunk within its group.
    part: usize,
    /// Number of chunks the group was cut into.
    parts: usize,
    /// Rules in group order.
    rules: Vec<LigatureRule>,
}

impl Lookup {
    /// Number of rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

/// Lookups in application priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupList {
    lookups: Vec<Lookup>,
    candidate_count: usize,
}

impl LookupList {
    /// Lookups in priority order.
    pub fn lookups(&self) -> &[Lookup] {
        &self.lookups
    }

    /// Number of lookups.
    pub fn len(&self) -> usize {
        self.lookups.len()
    }

    /// Returns true when there is nothing to substitute.
    pub fn is_empty(&self) -> bool {
        self.lookups.is_empty()
    }

    /// Positions that were turned into rules.
    pub fn candidate_count(&self) -> usize {
        self.candidate_count
    }

    /// Rules across all lookups.
    pub fn rule_count(&self) -> usize {
        self.lookups.iter().map(Lookup::rule_count).sum()
    }

    /// Lookup count per sequence length.
    pub fn lookups_per_length(&self) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for lookup in &self.lookups {
            *counts.entry(lookup.sequence_length).or_insert(0) += 1;
        }
        counts
    }

    /// Returns true when sequence lengths never increase along the list.
    pub fn is_priority_ordered(&self) -> bool {
        self.lookups
            .windows(2)
            .all(|pair| pair[0].sequence_length >= pair[1].sequence_length)
    }

    /// Lookup indices to register with the feature, in list order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        0..self.lookups.len()
    }
}

/// Summary of a synthesis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct SynthesisSummary {
    /// Positions turned into rules.
    candidate_count: usize,
    /// Lookups emitted.
    lookup_count: usize,
    /// Rules across all lookups.
    rule_count: usize,
    /// Lookups per sequence length.
    lookups_per_length: BTreeMap<usize, usize>,
}

impl From<&LookupList> for SynthesisSummary {
    fn from(list: &LookupList) -> Self {
        Self {
            candidate_count: list.candidate_count(),
            lookup_count: list.len(),
            rule_count: list.rule_count(),
            lookups_per_length: list.lookups_per_length(),
        }
    }
}

/// Builds lookup lists from positions.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    policy: SplitPolicy,
    max_length: usize,
}

impl Synthesizer {
    /// Creates a synthesizer covering every sequence up to nine moves.
    pub fn new(policy: SplitPolicy) -> Self {
        Self {
            policy,
            max_length: MAX_SEQUENCE_LENGTH,
        }
    }

    /// Limits the longest sequence that gets a ligature.
    ///
    /// # Errors
    ///
    /// Rejects lengths outside `2..=9`.
    pub fn with_max_length(mut self, max_length: usize) -> Result<Self, FontError> {
        if !(MIN_SEQUENCE_LENGTH..=MAX_SEQUENCE_LENGTH).contains(&max_length) {
            return Err(FontError::config(format!(
                "max sequence length {} outside {}..={}",
                max_length, MIN_SEQUENCE_LENGTH, MAX_SEQUENCE_LENGTH
            )));
        }
        self.max_length = max_length;
        Ok(self)
    }

    /// The split policy in use.
    pub fn policy(&self) -> &SplitPolicy {
        &self.policy
    }

    /// Longest sequence that gets a ligature.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Groups, splits and orders `positions` into a lookup list.
    ///
    /// # Errors
    ///
    /// Returns an internal consistency error if the lookups do not hold exactly
    /// one rule per candidate position.
    #[instrument(skip(self, positions), fields(max_length = self.max_length))]
    pub fn synthesize<I>(&self, positions: I) -> Result<LookupList, FontError>
    where
        I: IntoIterator<Item = GamePosition>,
    {
        let groups = group_positions(positions, self.max_length);

        let mut lookups = Vec::new();
        for (key, rules) in groups.iter() {
            debug_assert!(key.is_valid(), "invalid group key {key:?}");

            let chunks = split_group(rules, self.policy.split_count(key.length));
            let parts = chunks.len();
            for (part, chunk) in chunks.into_iter().enumerate() {
                debug!(
                    length = key.length,
                    digit = key.first,
                    split = part,
                    parts,
                    liga_count = chunk.len(),
                    "Built lookup"
                );
                lookups.push(Lookup {
                    dispatch: key.first,
                    sequence_length: key.length,
                    part,
                    parts,
                    rules: chunk,
                });
            }
        }

        // Stable, so equal lengths keep group and chunk order.
        lookups.sort_by(|a, b| b.sequence_length.cmp(&a.sequence_length));

        let list = LookupList {
            lookups,
            candidate_count: groups.candidate_count(),
        };
        verify_coverage(&list)?;

        info!(
            lookup_count = list.len(),
            ligature_count = list.rule_count(),
            "Synthesized ligature table"
        );
        Ok(list)
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new(SplitPolicy::default())
    }
}

/// Checks that the lookups hold exactly one rule per candidate position.
///
/// # Errors
///
/// Returns an internal consistency error on any mismatch.
#[instrument(skip(list))]
pub fn verify_coverage(list: &LookupList) -> Result<(), FontError> {
    let rule_count = list.rule_count();
    if rule_count != list.candidate_count {
        error!(
            rule_count,
            candidate_count = list.candidate_count,
            "Lookup rules do not cover candidates"
        );
        return Err(FontError::consistency(format!(
            "lookups hold {} rules for {} candidate positions",
            rule_count, list.candidate_count
        )));
    }
    Ok(())
}
