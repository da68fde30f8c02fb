/*!
 * Error types for the stalign library.
 *
 * This module contains custom error types for the different stages of
 * subtitle operation extraction, using the thiserror crate for ergonomic
 * error definitions.
 */

use thiserror::Error;

/// Errors that can occur while turning a transcript into subtitle records
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    /// The number of subtitle markers does not match the number of known identities
    #[error("Subtitle count mismatch: found {markers} subtitle markers but {identities} persistent ids")]
    MarkerCountMismatch {
        /// Number of subtitle markers found in the transcript
        markers: usize,
        /// Number of identities supplied by the caller
        identities: usize,
    },

    /// Non-whitespace text appears before the first subtitle marker
    #[error("Content before first subtitle marker: {0:?}")]
    ContentBeforeFirstMarker(String),
}

/// Errors that can occur during sequence alignment
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlignmentError {
    /// The final matrix cell lies outside of the diagonal band
    #[error("Diagonal band of {band} cannot reach final cell ({rows}, {cols})")]
    BandTooNarrow {
        /// Configured diagonal band range
        band: usize,
        /// Number of records in the left (from) sequence
        rows: usize,
        /// Number of records in the top (to) sequence
        cols: usize,
    },

    /// Both sides of an aligned pair are gaps
    #[error("Aligned pair at position {0} has gaps on both sides")]
    DoubleGap(usize),
}

/// Errors that can occur while computing subtitle operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OperationError {
    /// A group of aligned pairs matches no known operation template
    #[error("Handle this! Unhandled subtitle pair group pattern [{pattern}] at from-index {from_index:?}")]
    UnhandledPattern {
        /// Pair type codes of the group, e.g. `DA`
        pattern: String,
        /// Index of the first from-side subtitle in the group, if any
        from_index: Option<usize>,
    },

    /// Operation ids are 1-based
    #[error("Invalid starting operation id: {0}")]
    InvalidStartingId(u64),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration loading or validation
    #[error("Config error: {0}")]
    Config(String),

    /// Error from subtitle attribute extraction
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Error from alignment
    #[error("Alignment error: {0}")]
    Alignment(#[from] AlignmentError),

    /// Error from operation computation
    #[error("Operation error: {0}")]
    Operation(#[from] OperationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::File(error.to_string())
    }
}
