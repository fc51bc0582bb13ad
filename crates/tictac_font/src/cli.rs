//! Command-line interface for tictac_font.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tic-tac-toe font - ligature table synthesis
#[derive(Parser, Debug)]
#[command(name = "tictac_font")]
#[command(about = "Builds the ligature table of a tic-tac-toe board font", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Materialize the lookup list into the TTX template
    Build {
        /// Template file (overrides the configuration)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Output file (overrides the configuration)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print lookup list statistics as JSON
    Stats,

    /// Print a decoded board and its winning line
    Board {
        /// Board identity (decimal)
        id: u32,
    },

    /// Print every glyph the font needs as JSON lines
    Glyphs,
}
