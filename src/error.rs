//! Error types for kvconf
//!
//! Provides a unified error type for all store operations.

use thiserror::Error;

/// Result type alias using ConfError
pub type Result<T> = std::result::Result<T, ConfError>;

/// Unified error type for kvconf operations
#[derive(Debug, Error)]
pub enum ConfError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Argument Errors
    // -------------------------------------------------------------------------
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Key too long: {len} bytes (max {max})")]
    KeyTooLong { len: usize, max: usize },

    #[error("Value too long: {len} bytes (max {max})")]
    ValueTooLong { len: usize, max: usize },

    // -------------------------------------------------------------------------
    // Resource Errors
    // -------------------------------------------------------------------------
    #[error("Out of memory: {0}")]
    OutOfMemory(String),

    // -------------------------------------------------------------------------
    // Conversion Errors
    // -------------------------------------------------------------------------
    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),
}

impl From<std::collections::TryReserveError> for ConfError {
    fn from(err: std::collections::TryReserveError) -> Self {
        ConfError::OutOfMemory(err.to_string())
    }
}
