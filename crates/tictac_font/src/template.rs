//! Template materialization.
//!
//! A template is a TTX dump of the base font in which the ligature lookup
//! list has been replaced by `{{NAME}}` placeholders. Materializing fills
//! them with the emitted blocks by literal substitution.

use crate::emit::EmittedTable;
use crate::error::FontError;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, instrument, warn};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Placeholders the lookup list template understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, strum::EnumIter, strum::IntoStaticStr)]
pub enum Placeholder {
    /// Body of the GSUB lookup list.
    #[strum(serialize = "LOOKUP_LIST")]
    LookupList,
    /// Number of lookups in the body.
    #[strum(serialize = "LOOKUP_LIST_LENGTH")]
    LookupListLength,
    /// Lookup index entries of the ligature feature.
    #[strum(serialize = "LOOKUP_LIST_INDICES")]
    LookupListIndices,
    /// Number of index entries.
    #[strum(serialize = "LOOKUP_LIST_INDICES_LENGTH")]
    LookupListIndicesLength,
}

impl Placeholder {
    /// Name between the braces.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Template text with `{{NAME}}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    text: String,
}

impl Template {
    /// Wraps template text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Reads a template file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        debug!(bytes = text.len(), "Loaded template");
        Ok(Self { text })
    }

    /// Raw template text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Distinct placeholder names referenced by the template.
    ///
    /// # Errors
    ///
    /// Fails on an opening `{{` without a closing `}}`.
    pub fn placeholders(&self) -> Result<BTreeSet<&str>, FontError> {
        let mut names = BTreeSet::new();
        for segment in self.segments()? {
            if let Segment::Placeholder(name) = segment {
                names.insert(name);
            }
        }
        Ok(names)
    }

    /// Substitutes every placeholder.
    ///
    /// # Errors
    ///
    /// Returns a template contract error if a referenced placeholder has no
    /// value or a supplied value is never referenced.
    #[instrument(skip(self, values), fields(value_count = values.len()))]
    pub fn render(&self, values: &TemplateValues) -> Result<String, FontError> {
        let segments = self.segments()?;

        let referenced: BTreeSet<&str> = segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Placeholder(name) => Some(*name),
                Segment::Text(_) => None,
            })
            .collect();
        if let Some(unused) = values.names().find(|name| !referenced.contains(name)) {
            warn!(placeholder = unused, "Value supplied for missing placeholder");
            return Err(FontError::template(format!(
                "value supplied for {{{{{}}}}} but the template never references it",
                unused
            )));
        }

        let mut out = String::with_capacity(self.text.len() + values.total_len());
        for segment in segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    let value = values.get(name).ok_or_else(|| {
                        warn!(placeholder = name, "Placeholder without value");
                        FontError::template(format!("no value supplied for {{{{{}}}}}", name))
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }

    fn segments(&self) -> Result<Vec<Segment<'_>>, FontError> {
        let mut segments = Vec::new();
        let mut rest = self.text.as_str();
        while let Some(start) = rest.find(OPEN) {
            segments.push(Segment::Text(&rest[..start]));
            let after = &rest[start + OPEN.len()..];
            let end = after.find(CLOSE).ok_or_else(|| {
                FontError::template(format!("unterminated placeholder at byte {}", self.text.len() - rest.len() + start))
            })?;
            segments.push(Segment::Placeholder(after[..end].trim()));
            rest = &after[end + CLOSE.len()..];
        }
        segments.push(Segment::Text(rest));
        Ok(segments)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    Placeholder(&'a str),
}

/// Values for template placeholders, each supplied at most once.
#[derive(Debug, Clone, Default)]
pub struct TemplateValues {
    values: BTreeMap<String, String>,
}

impl TemplateValues {
    /// Creates an empty value set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies the value of `name`.
    ///
    /// # Errors
    ///
    /// Returns a template contract error if `name` already has a value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<(), FontError> {
        let name = name.into();
        if self.values.contains_key(&name) {
            return Err(FontError::template(format!("value for {{{{{}}}}} supplied twice", name)));
        }
        self.values.insert(name, value.into());
        Ok(())
    }

    /// Value of `name`, if supplied.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Supplied names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of supplied values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when nothing has been supplied.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn total_len(&self) -> usize {
        self.values.values().map(String::len).sum()
    }

    /// Values for the four lookup list placeholders.
    ///
    /// # Errors
    ///
    /// Returns a template contract error if the table's counts disagree with
    /// the units it actually contains.
    #[instrument(skip(table))]
    pub fn from_table(table: &EmittedTable) -> Result<Self, FontError> {
        check_count(table.lookup_list(), "<Lookup index=", *table.lookup_count(), Placeholder::LookupList)?;
        check_count(
            table.index_list(),
            "<LookupListIndex ",
            *table.index_count(),
            Placeholder::LookupListIndices,
        )?;
        if table.lookup_count() != table.index_count() {
            return Err(FontError::template(format!(
                "{} lookups but {} index entries",
                table.lookup_count(),
                table.index_count()
            )));
        }

        let mut values = Self::new();
        values.insert(Placeholder::LookupList.name(), table.lookup_list().as_str())?;
        values.insert(Placeholder::LookupListLength.name(), table.lookup_count().to_string())?;
        values.insert(Placeholder::LookupListIndices.name(), table.index_list().as_str())?;
        values.insert(Placeholder::LookupListIndicesLength.name(), table.index_count().to_string())?;
        Ok(values)
    }
}

fn check_count(block: &str, marker: &str, declared: usize, placeholder: Placeholder) -> Result<(), FontError> {
    let actual = block.matches(marker).count();
    if actual != declared {
        return Err(FontError::template(format!(
            "{{{{{}}}}} declares {} units but contains {}",
            placeholder.name(),
            declared,
            actual
        )));
    }
    Ok(())
}

/// Fills `template` with the emitted table.
///
/// # Errors
///
/// Returns a template contract error on any placeholder or count mismatch.
#[instrument(skip(template, table))]
pub fn materialize(template: &Template, table: &EmittedTable) -> Result<String, FontError> {
    let values = TemplateValues::from_table(table)?;
    template.render(&values)
}
