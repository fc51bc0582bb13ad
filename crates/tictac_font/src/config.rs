//! Build configuration.

use crate::error::FontError;
use crate::policy::{MAX_SEQUENCE_LENGTH, SplitPolicy, SplitRule};
use crate::synth::Synthesizer;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Configuration for a font table build.
///
/// ```toml
/// template = "base-font.ttx.template"
/// output = "font-withliga.ttx"
/// max_sequence_length = 9
///
/// [[split_policy]]
/// length = 7
/// splits = 5
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct FontConfig {
    /// Template with lookup list placeholders.
    #[serde(default = "default_template")]
    template: PathBuf,

    /// Where the materialized TTX is written.
    #[serde(default = "default_output")]
    output: PathBuf,

    /// Longest move sequence that gets a ligature.
    #[serde(default = "default_max_sequence_length")]
    max_sequence_length: usize,

    /// Lookups per group, by sequence length.
    #[serde(default = "SplitPolicy::default_rules")]
    split_policy: Vec<SplitRule>,
}

fn default_template() -> PathBuf {
    PathBuf::from("base-font.ttx.template")
}

fn default_output() -> PathBuf {
    PathBuf::from("font-withliga.ttx")
}

fn default_max_sequence_length() -> usize {
    MAX_SEQUENCE_LENGTH
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            output: default_output(),
            max_sequence_length: default_max_sequence_length(),
            split_policy: SplitPolicy::default_rules(),
        }
    }
}

impl FontConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FontError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| FontError::config(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(
            template = %config.template.display(),
            output = %config.output.display(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns a configuration error on malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, FontError> {
        toml::from_str(content).map_err(|e| FontError::config(format!("Failed to parse config: {}", e)))
    }

    /// Replaces the template path.
    pub fn with_template(mut self, template: impl Into<PathBuf>) -> Self {
        self.template = template.into();
        self
    }

    /// Replaces the output path.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Validated split policy.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an invalid policy table.
    pub fn policy(&self) -> Result<SplitPolicy, FontError> {
        SplitPolicy::from_rules(&self.split_policy)
    }

    /// Synthesizer configured from this file.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an invalid policy or length cap.
    #[instrument(skip(self))]
    pub fn synthesizer(&self) -> Result<Synthesizer, FontError> {
        Synthesizer::new(self.policy()?).with_max_length(self.max_sequence_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FontErrorKind;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = FontConfig::from_toml("").unwrap();
        assert_eq!(config, FontConfig::default());
        assert_eq!(config.policy().unwrap(), SplitPolicy::default());
    }

    #[test]
    fn test_parses_policy_table() {
        let config = FontConfig::from_toml(
            r#"
            template = "in.template"
            max_sequence_length = 5

            [[split_policy]]
            length = 5
            splits = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.template(), &PathBuf::from("in.template"));
        assert_eq!(config.output(), &default_output());
        let synth = config.synthesizer().unwrap();
        assert_eq!(synth.max_length(), 5);
        assert_eq!(synth.policy().split_count(5), 3);
        assert_eq!(synth.policy().split_count(8), 1);
    }

    #[test]
    fn test_invalid_length_cap() {
        let config = FontConfig::from_toml("max_sequence_length = 12").unwrap();
        assert_eq!(config.synthesizer().unwrap_err().kind(), FontErrorKind::Config);
    }

    #[test]
    fn test_malformed_toml() {
        let err = FontConfig::from_toml("split_policy = 3").unwrap_err();
        assert_eq!(err.kind(), FontErrorKind::Config);
    }

    #[test]
    fn test_path_overrides() {
        let config = FontConfig::default().with_template("a").with_output("b");
        assert_eq!(config.template(), &PathBuf::from("a"));
        assert_eq!(config.output(), &PathBuf::from("b"));
    }
}
