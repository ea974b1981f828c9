//! Load-time error type.
//!
//! Only loading can fail. The layout pass treats every missing glyph or
//! odd value as a local, skippable condition and never returns an error.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading scores or font metadata.
#[derive(Debug, Error)]
pub enum Error {
    /// A file could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The JSON was not well formed or did not match the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A glyph name table entry carried a codepoint that is not "U+XXXX".
    #[error("glyph '{glyph}' has invalid codepoint '{value}'")]
    InvalidCodepoint { glyph: String, value: String },

    /// The score parsed but describes something the engine cannot lay out.
    #[error("invalid score: {0}")]
    InvalidScore(String),
}

pub type Result<T> = std::result::Result<T, Error>;
