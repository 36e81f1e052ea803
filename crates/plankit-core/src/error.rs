//! Unified error types for Plankit

use thiserror::Error;

/// Unified error type for all Plankit operations
///
/// No variant is fatal: the wizard stays interactive after any of these,
/// and the server maps them to 4xx/5xx responses.
#[derive(Error, Debug)]
pub enum PlanError {
    /// A required field or step failed its validation rule.
    /// Recovered locally; navigation is blocked, nothing else changes.
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// An index outside the valid range was requested. Treated as a
    /// failure return, never a panic.
    #[error("index {index} out of range (limit {limit})")]
    OutOfRange { index: usize, limit: usize },

    /// Draft storage read/write failed (missing directory, corrupt JSON,
    /// storage disabled). Callers swallow this and behave as if no draft
    /// exists.
    #[error("draft storage error: {0}")]
    Storage(String),

    /// The external submit collaborator rejected the plan. Form state is
    /// preserved so the user can retry.
    #[error("submit failed: {0}")]
    SubmitFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using PlanError
pub type Result<T> = std::result::Result<T, PlanError>;
