//! Structured error types for the biomet workspace.

use thiserror::Error;

/// Unified error type for all biomet operations.
#[derive(Debug, Error)]
pub enum BiometError {
    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error (malformed score, histogram or true-pairs line)
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid input (empty population, non-integer histogram scores,
    /// out-of-range rank, mismatched array lengths)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A query in a comparison set has no ground-truth identity.
    #[error("missing truth: query '{0}' has no true-pair entry")]
    MissingTruth(String),

    /// A report was requested in a format no writer exists for.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the biomet workspace.
pub type Result<T> = std::result::Result<T, BiometError>;
