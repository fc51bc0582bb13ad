//! End-to-end table build.

use crate::config::FontConfig;
use crate::emit::EmittedTable;
use crate::error::FontError;
use crate::glyph::GlyphInventory;
use crate::synth::{LookupList, SynthesisSummary};
use crate::template::{Template, materialize};
use derive_getters::Getters;
use serde::Serialize;
use tictac_board::GameTree;
use tracing::{info, instrument};

/// Counts describing a build, printed by `stats` and logged by `build`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct BuildReport {
    /// Nodes in the game tree.
    node_count: usize,
    /// Distinct board identities, one glyph each.
    board_count: usize,
    /// Lookup list statistics.
    #[serde(flatten)]
    synthesis: SynthesisSummary,
}

impl BuildReport {
    /// Collects counts from a tree and its lookup list.
    pub fn new(tree: &GameTree, list: &LookupList) -> Self {
        Self {
            node_count: tree.node_count(),
            board_count: tree.distinct_boards().len(),
            synthesis: SynthesisSummary::from(list),
        }
    }
}

/// Builds the tree and synthesizes its lookup list.
///
/// # Errors
///
/// Propagates configuration and synthesis failures.
#[instrument(skip(config))]
pub fn synthesize(config: &FontConfig) -> Result<(GameTree, LookupList), FontError> {
    let synthesizer = config.synthesizer()?;
    let tree = GameTree::build()?;
    let list = synthesizer.synthesize(tree.positions())?;
    Ok((tree, list))
}

/// Renders the materialized TTX text without touching the output file.
///
/// # Errors
///
/// Fails on any synthesis, template or contract error.
#[instrument(skip(config, template))]
pub fn render(config: &FontConfig, template: &Template) -> Result<(String, BuildReport), FontError> {
    let (tree, list) = synthesize(config)?;
    let table = EmittedTable::render(&list);
    let text = materialize(template, &table)?;
    Ok((text, BuildReport::new(&tree, &list)))
}

/// Reads the template, materializes the table and writes the output file.
///
/// Nothing is written unless every step succeeded.
///
/// # Errors
///
/// Fails on any I/O, synthesis, template or contract error.
#[instrument(skip(config), fields(template = %config.template().display(), output = %config.output().display()))]
pub fn build(config: &FontConfig) -> Result<BuildReport, FontError> {
    let template = Template::from_file(config.template())?;
    let (text, report) = render(config, &template)?;
    std::fs::write(config.output(), text)?;
    info!(
        lookup_count = *report.synthesis().lookup_count(),
        rule_count = *report.synthesis().rule_count(),
        "Wrote font definition"
    );
    Ok(report)
}

/// Glyphs for every reachable board.
///
/// # Errors
///
/// Propagates board decoding failures.
#[instrument]
pub fn glyph_inventory() -> Result<GlyphInventory, FontError> {
    let tree = GameTree::build()?;
    GlyphInventory::from_boards(&tree.distinct_boards())
}
