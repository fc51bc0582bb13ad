//! Tests for template materialization and the file-level build.

use std::fs;
use tictac_font::{FontConfig, FontErrorKind, Template, pipeline};

const TEMPLATE: &str = r#"<ttFont>
  <GSUB>
    <FeatureList>
      <FeatureRecord index="0">
        <Feature>
          <!-- LookupCount={{LOOKUP_LIST_INDICES_LENGTH}} -->
{{LOOKUP_LIST_INDICES}}
        </Feature>
      </FeatureRecord>
    </FeatureList>
    <LookupList>
      <!-- LookupCount={{LOOKUP_LIST_LENGTH}} -->
{{LOOKUP_LIST}}
    </LookupList>
  </GSUB>
</ttFont>
"#;

fn short_config(dir: &tempfile::TempDir) -> FontConfig {
    let config_path = dir.path().join("tictac_font.toml");
    fs::write(
        &config_path,
        format!(
            "template = {:?}\noutput = {:?}\nmax_sequence_length = 4\n",
            dir.path().join("base-font.ttx.template"),
            dir.path().join("font-withliga.ttx"),
        ),
    )
    .unwrap();
    FontConfig::from_file(&config_path).unwrap()
}

#[test]
fn test_build_writes_materialized_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("base-font.ttx.template"), TEMPLATE).unwrap();
    let config = short_config(&dir);

    let report = pipeline::build(&config).unwrap();
    assert_eq!(*report.node_count(), 549_946);
    assert_eq!(*report.board_count(), 5_478);
    assert_eq!(*report.synthesis().lookup_count(), 27);
    assert_eq!(*report.synthesis().rule_count(), 3_600);

    let output = fs::read_to_string(config.output()).unwrap();
    assert!(!output.contains("{{"));
    assert_eq!(output.matches("<!-- LookupCount=27 -->").count(), 2);
    assert_eq!(output.matches("<Lookup index=").count(), 27);
    assert_eq!(output.matches("<LookupListIndex ").count(), 27);
    assert_eq!(output.matches("<Ligature components=").count(), 3_600);
    // Longest sequences are registered first.
    let first_lookup = output.find("<Lookup index=\"0\">").unwrap();
    let first_ligature = &output[first_lookup..];
    let line = first_ligature.lines().find(|l| l.contains("<Ligature ")).unwrap();
    assert_eq!(line.matches("start").count(), 3);
}

#[test]
fn test_missing_placeholder_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("base-font.ttx.template"),
        TEMPLATE.replace("{{LOOKUP_LIST_INDICES}}", ""),
    )
    .unwrap();
    let config = short_config(&dir);

    let err = pipeline::build(&config).unwrap_err();
    assert_eq!(err.kind(), FontErrorKind::TemplateContract);
    assert!(!config.output().exists());
}

#[test]
fn test_unknown_placeholder_is_rejected() {
    let template = Template::new(format!("{TEMPLATE}{{{{FEATURE_COUNT}}}}"));
    let config = FontConfig::from_toml("max_sequence_length = 2").unwrap();
    let err = pipeline::render(&config, &template).unwrap_err();
    assert_eq!(err.kind(), FontErrorKind::TemplateContract);
}

#[test]
fn test_missing_template_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = short_config(&dir);
    assert_eq!(pipeline::build(&config).unwrap_err().kind(), FontErrorKind::Io);
}

#[test]
fn test_glyph_inventory_covers_every_board() {
    let inventory = pipeline::glyph_inventory().unwrap();
    assert_eq!(inventory.len(), 5_478 + 9);
    assert_eq!(inventory.get("board0").unwrap().codepoint, 0xF0000);
    assert_eq!(inventory.get("start5").unwrap().board.get(), 81);
}
