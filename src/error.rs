//! Error taxonomy.
//!
//! Only two things can go wrong in a run: the input cannot be obtained or
//! the configuration is out of range ([`ConfigError`]), or the input text is
//! malformed ([`ParseError`]). Once a layout has been constructed, scoring,
//! mutation and selection are total. Writing reports is the one I/O step
//! after that, surfaced through [`AutographError::Io`].

use std::path::PathBuf;
use thiserror::Error;

/// Malformed adjacency matrix or exported layout text.
///
/// Line and column numbers are 1-based.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("input contains no matrix rows")]
    Empty,

    #[error("line {line}, column {column}: `{token}` is not a non-negative integer")]
    InvalidToken {
        line: usize,
        column: usize,
        token: String,
    },

    #[error("line {line}: expected {expected} columns, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: malformed node declaration `{text}`")]
    MalformedNode { line: usize, text: String },

    #[error("line {line}: node `{name}` does not exist in the graph")]
    UnknownNode { line: usize, name: String },

    #[error("line {line}: position {x},{y} is already occupied")]
    DuplicatePosition { line: usize, x: i32, y: i32 },

    #[error("node `{0}` has no position in the layout")]
    MissingNode(String),
}

/// Invalid or unobtainable run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no CSV file provided")]
    MissingInput,

    #[error("cannot read `{}`: {source}", .path.display())]
    UnreadableInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Any failure of a complete run.
#[derive(Debug, Error)]
pub enum AutographError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to write layout: {0}")]
    Io(#[from] std::io::Error),
}
