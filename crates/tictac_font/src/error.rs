//! Font synthesis error types.

use derive_more::{Display, Error};
use tictac_board::BoardError;
use tracing::{error, instrument};

/// What went wrong while synthesizing or materializing the font table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FontErrorKind {
    /// The synthesized lookups do not cover the candidate positions exactly.
    #[display("internal consistency violation")]
    InternalConsistency,
    /// A template placeholder and the supplied values disagree.
    #[display("template contract violation")]
    TemplateContract,
    /// Invalid configuration or split policy.
    #[display("configuration error")]
    Config,
    /// Reading the template or writing the output failed.
    #[display("I/O error")]
    Io,
    /// The board model reported an invalid identity.
    #[display("board error")]
    Board,
}

/// Font synthesis error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Font error ({}): {} at {}:{}", kind, message, file, line)]
pub struct FontError {
    /// Error category.
    pub kind: FontErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl FontError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: FontErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        let message = message.into();
        error!(?kind, error_message = %message, "Font error created");
        Self {
            kind,
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Coverage mismatch after synthesis.
    #[track_caller]
    pub fn consistency(message: impl Into<String>) -> Self {
        Self::new(FontErrorKind::InternalConsistency, message)
    }

    /// Placeholder contract broken.
    #[track_caller]
    pub fn template(message: impl Into<String>) -> Self {
        Self::new(FontErrorKind::TemplateContract, message)
    }

    /// Bad configuration.
    #[track_caller]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(FontErrorKind::Config, message)
    }

    /// Returns the error category.
    pub fn kind(&self) -> FontErrorKind {
        self.kind
    }
}

impl From<BoardError> for FontError {
    #[track_caller]
    fn from(err: BoardError) -> Self {
        Self::new(FontErrorKind::Board, err.to_string())
    }
}

impl From<std::io::Error> for FontError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(FontErrorKind::Io, format!("I/O error: {}", err))
    }
}
