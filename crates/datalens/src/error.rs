//! Error types for datalens

use thiserror::Error;

/// Result type alias for datalens operations
pub type LensResult<T> = Result<T, LensError>;

/// Why a user action was refused before any SQL was produced or executed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// No editable cell differs from its original value.
    #[error("No changes; edit at least one column to generate an UPDATE query")]
    NoChanges,
    /// The table has no primary key, so the row cannot be addressed safely.
    #[error("This table has no primary key; cannot build a safe UPDATE with a unique WHERE")]
    NoPrimaryKey,
    /// The raw SQL input contained nothing to run.
    #[error("No SQL statements to run")]
    EmptyInput,
    /// The read-only panel received statements that are not SELECT.
    ///
    /// `positions` are 1-based statement numbers within the batch.
    #[error(
        "Only SELECT queries are allowed in read-only mode; statement(s) {} are not SELECT",
        join_positions(positions)
    )]
    NonSelect { positions: Vec<usize> },
}

fn join_positions(positions: &[usize]) -> String {
    positions
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Error types for generation and execution
#[derive(Debug, Error)]
pub enum LensError {
    /// User input refused with a human-readable reason
    #[error("Rejected: {0}")]
    Rejected(Rejection),

    /// Statement execution failed in the connector
    #[error("Execution error: {0}")]
    Execution(String),

    /// A value violated a construction-time invariant
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl LensError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an execution error from an opaque connector message
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }

    /// Check if this is a user-input rejection
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Check if this is an execution failure
    pub fn is_execution(&self) -> bool {
        matches!(self, Self::Execution(_))
    }

    /// The rejection reason, if this error is a rejection.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(r) => Some(r),
            _ => None,
        }
    }
}

impl From<Rejection> for LensError {
    fn from(r: Rejection) -> Self {
        Self::Rejected(r)
    }
}

impl From<serde_json::Error> for LensError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
