//! TTX rendering of the lookup list.
//!
//! Produces the two text blocks the template expects: the body of the GSUB
//! `LookupList` and the `LookupListIndex` entries of the ligature feature.

use crate::glyph::{board_glyph_name, start_glyph_name};
use crate::synth::{LigatureRule, Lookup, LookupList};
use derive_getters::Getters;
use std::fmt::Write;
use tracing::{debug, instrument};

/// Rendered lookup list and index list, with the unit counts they contain.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_new::new)]
pub struct EmittedTable {
    /// `<Lookup>` elements, newline separated.
    lookup_list: String,
    /// Number of `<Lookup>` elements in `lookup_list`.
    lookup_count: usize,
    /// `<LookupListIndex>` elements, newline separated.
    index_list: String,
    /// Number of `<LookupListIndex>` elements in `index_list`.
    index_count: usize,
}

impl EmittedTable {
    /// Renders every lookup and its index entry.
    #[instrument(skip(list), fields(lookup_count = list.len()))]
    pub fn render(list: &LookupList) -> Self {
        let lookup_list = list
            .lookups()
            .iter()
            .enumerate()
            .map(|(index, lookup)| render_lookup(index, lookup))
            .collect::<Vec<_>>()
            .join("\n");

        let index_list = list
            .indices()
            .map(render_index)
            .collect::<Vec<_>>()
            .join("\n");

        debug!(
            lookup_bytes = lookup_list.len(),
            index_bytes = index_list.len(),
            "Rendered lookup list"
        );

        Self {
            lookup_list,
            lookup_count: list.len(),
            index_list,
            index_count: list.indices().count(),
        }
    }
}

/// Renders one type-4 ligature lookup keyed on its dispatch glyph.
pub fn render_lookup(index: usize, lookup: &Lookup) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "      <Lookup index=\"{index}\">");
    out.push_str("        <LookupType value=\"4\"/>\n");
    out.push_str("        <LookupFlag value=\"0\"/>\n");
    out.push_str("        <!-- SubTableCount=1 -->\n");
    out.push_str("        <LigatureSubst index=\"0\">\n");
    let _ = writeln!(
        out,
        "          <LigatureSet glyph=\"{}\">",
        start_glyph_name(*lookup.dispatch())
    );
    for rule in lookup.rules() {
        out.push_str(&render_ligature(rule));
        out.push('\n');
    }
    out.push_str("          </LigatureSet>\n");
    out.push_str("        </LigatureSubst>\n");
    out.push_str("      </Lookup>");
    out
}

/// Renders one `<Ligature>` element: tail move glyphs to the result board glyph.
pub fn render_ligature(rule: &LigatureRule) -> String {
    let components = rule
        .tail()
        .iter()
        .map(start_glyph_name)
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "            <Ligature components=\"{}\" glyph=\"{}\"/>",
        components,
        board_glyph_name(rule.target())
    )
}

/// Renders the feature's reference to lookup `index`.
pub fn render_index(index: usize) -> String {
    format!("          <LookupListIndex index=\"{index}\" value=\"{index}\"/>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::Synthesizer;
    use tictac_board::GamePosition;

    fn list() -> LookupList {
        let positions = [&[1u8, 2][..], &[1, 2, 3], &[2, 1]]
            .into_iter()
            .map(|moves| GamePosition::from_moves(moves).unwrap());
        Synthesizer::default().synthesize(positions).unwrap()
    }

    #[test]
    fn test_ligature_line() {
        let list = list();
        let rule = list.lookups()[0].rules()[0];
        // X1 O2 X3: 1 + 2*3 + 9 = 16
        assert_eq!(
            render_ligature(&rule),
            "            <Ligature components=\"start2,start3\" glyph=\"board10\"/>"
        );
    }

    #[test]
    fn test_lookup_block() {
        let list = list();
        let block = render_lookup(0, &list.lookups()[0]);
        let expected = "      <Lookup index=\"0\">
        <LookupType value=\"4\"/>
        <LookupFlag value=\"0\"/>
        <!-- SubTableCount=1 -->
        <LigatureSubst index=\"0\">
          <LigatureSet glyph=\"start1\">
            <Ligature components=\"start2,start3\" glyph=\"board10\"/>
          </LigatureSet>
        </LigatureSubst>
      </Lookup>";
        assert_eq!(block, expected);
    }

    #[test]
    fn test_counts_match_units() {
        let table = EmittedTable::render(&list());
        assert_eq!(*table.lookup_count(), 3);
        assert_eq!(*table.index_count(), 3);
        assert_eq!(table.lookup_list().matches("<Lookup index=").count(), 3);
        assert_eq!(table.index_list().lines().count(), 3);
        assert!(table.index_list().ends_with("<LookupListIndex index=\"2\" value=\"2\"/>"));
    }
}
