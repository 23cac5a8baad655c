//! Error types for the analysis engine.
//!
//! Uses `thiserror` for structured error variants. Pattern-matching misses
//! are not errors anywhere in this crate; errors surface only for bad
//! configuration (a malformed extraction pattern, an unreadable config
//! file) and for I/O on the persisted JSON documents.

/// Top-level error type for the nephlit core library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid extraction pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A type alias for results using the top-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
