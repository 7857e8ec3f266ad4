//! Unified error types for the domain layer
//!
//! Parsing and validation failures for world-graph values. Adapters map these
//! into their own error types instead of passing strings around.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Direction string outside the canonical set
    #[error("Unknown direction: {0}")]
    UnknownDirection(String),

    /// Invalid ID format
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Create an unknown direction error, keeping the caller's original spelling.
    pub fn unknown_direction(direction: impl Into<String>) -> Self {
        Self::UnknownDirection(direction.into())
    }

    /// Create an invalid ID error
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
