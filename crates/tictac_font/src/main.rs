//! Tic-tac-toe font - ligature table builder.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::{Path, PathBuf};
use tictac_board::codec;
use tictac_font::{BuildReport, FontConfig, pipeline};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    initialize_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Build { template, output } => run_build(config, template, output),
        Command::Stats => run_stats(&config),
        Command::Board { id } => run_board(id),
        Command::Glyphs => run_glyphs(),
    }
}

#[instrument]
fn initialize_tracing() {
    // Logs go to stderr so JSON output on stdout stays clean.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,tictac_font=debug".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[instrument]
fn load_config(path: Option<&Path>) -> Result<FontConfig> {
    match path {
        Some(path) => Ok(FontConfig::from_file(path)?),
        None => {
            info!("No config file given, using defaults");
            Ok(FontConfig::default())
        }
    }
}

/// Write the materialized font definition
#[instrument(skip(config))]
fn run_build(config: FontConfig, template: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let config = match template {
        Some(template) => config.with_template(template),
        None => config,
    };
    let config = match output {
        Some(output) => config.with_output(output),
        None => config,
    };

    let report = pipeline::build(&config)?;
    info!(
        node_count = *report.node_count(),
        board_count = *report.board_count(),
        "Build complete"
    );
    Ok(())
}

/// Print synthesis statistics
#[instrument(skip(config))]
fn run_stats(config: &FontConfig) -> Result<()> {
    let (tree, list) = pipeline::synthesize(config)?;
    let report = BuildReport::new(&tree, &list);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Print one board
#[instrument]
fn run_board(id: u32) -> Result<()> {
    let board = codec::decode(id)?;
    println!("{board}");
    match board.victory() {
        Some(victory) => println!("Victory: {} ({})", victory.line(), victory.winner()),
        None => println!("Victory: none"),
    }
    Ok(())
}

/// Print the glyph inventory
#[instrument]
fn run_glyphs() -> Result<()> {
    let inventory = pipeline::glyph_inventory()?;
    for entry in inventory.entries() {
        println!("{}", serde_json::to_string(entry)?);
    }
    info!(glyph_count = inventory.len(), "Listed glyphs");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_build_overrides() {
        let cli = Cli::try_parse_from(["tictac_font", "build", "-t", "in.template", "-o", "out.ttx"]).unwrap();
        match cli.command {
            Command::Build { template, output } => {
                assert_eq!(template, Some(PathBuf::from("in.template")));
                assert_eq!(output, Some(PathBuf::from("out.ttx")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_global_config() {
        let cli = Cli::try_parse_from(["tictac_font", "stats", "--config", "font.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("font.toml")));
        assert!(matches!(cli.command, Command::Stats));
    }

    #[test]
    fn test_cli_board_id() {
        let cli = Cli::try_parse_from(["tictac_font", "board", "13"]).unwrap();
        assert!(matches!(cli.command, Command::Board { id: 13 }));
    }
}
