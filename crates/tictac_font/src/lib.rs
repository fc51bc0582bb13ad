//! Tic-tac-toe ligature font table synthesis.
//!
//! Typing a sequence of move digits in the font collapses, through the
//! shaping engine's ligature substitution, into the glyph of the resulting
//! board. This crate builds that substitution table from the exhaustive game
//! tree of [`tictac_board`].
//!
//! # Architecture
//!
//! - **Synth**: groups, splits and orders move sequences into lookups
//! - **Emit**: renders lookups as TTX fragments
//! - **Template**: fills a TTX template's placeholders with those fragments
//! - **Glyph**: stable glyph names and codepoints for every board
//! - **Pipeline**: tree to output file, driven by [`FontConfig`]
//!
//! # Example
//!
//! ```no_run
//! use tictac_font::{FontConfig, pipeline};
//!
//! # fn example() -> Result<(), tictac_font::FontError> {
//! let config = FontConfig::from_file("tictac_font.toml")?;
//! let report = pipeline::build(&config)?;
//! println!("{} lookups", report.synthesis().lookup_count());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
pub mod emit;
mod error;
pub mod glyph;
pub mod pipeline;
mod policy;
pub mod synth;
pub mod template;

pub use config::FontConfig;
pub use emit::EmittedTable;
pub use error::{FontError, FontErrorKind};
pub use glyph::{GlyphEntry, GlyphInventory};
pub use pipeline::BuildReport;
pub use policy::{MAX_SEQUENCE_LENGTH, MIN_SEQUENCE_LENGTH, SplitPolicy, SplitRule};
pub use synth::{LigatureRule, Lookup, LookupList, SynthesisSummary, Synthesizer};
pub use template::{Placeholder, Template, TemplateValues, materialize};
