//! Error types for redwire
//!
//! Provides a unified error type for encoding, decoding and dispatch.

use thiserror::Error;

/// Result type alias using RedwireError
pub type Result<T> = std::result::Result<T, RedwireError>;

/// Unified error type for redwire operations
#[derive(Debug, Error)]
pub enum RedwireError {
    // -------------------------------------------------------------------------
    // Encoding Errors (raised before anything reaches the wire)
    // -------------------------------------------------------------------------
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    // -------------------------------------------------------------------------
    // Decoding Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Error reply reported by the server, message kept verbatim
    #[error("{0}")]
    Remote(String),

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RedwireError {
    /// True for errors raised locally while validating or encoding arguments
    pub fn is_argument_error(&self) -> bool {
        matches!(self, RedwireError::InvalidArgument(_) | RedwireError::Encoding(_))
    }
}
