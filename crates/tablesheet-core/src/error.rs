//! Error types for tablesheet-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tablesheet-core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Coordinate component outside the addressable domain
    #[error("Invalid coordinate: row {row}, column {col}")]
    InvalidCoordinate { row: i64, col: i64 },

    /// Text is not an A1-style address
    #[error("Malformed cell address: {0}")]
    MalformedAddress(String),

    /// Text is not an A1:B2-style range
    #[error("Malformed cell range: {0}")]
    MalformedRange(String),

    /// A merge region whose anchor cell was never assembled
    #[error("Merge {0} has no anchor cell")]
    UndefinedAnchor(String),

    /// Two source cells landed on the same target address
    #[error("Translation maps more than one cell onto {0}")]
    TranslationCollision(String),

    /// Offset would move content outside the addressable domain
    #[error("Offset ({rows}, {cols}) moves {target} out of bounds")]
    InvalidOffset {
        rows: i64,
        cols: i64,
        target: String,
    },

    /// Operation needs at least one occupied cell
    #[error("Worksheet has no occupied cells")]
    EmptyWorksheet,

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
