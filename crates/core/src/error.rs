//! Domain error model.

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, conflicts). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One or more form fields failed validation.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested record was not found.
    #[error("not found")]
    NotFound,

    /// A conflict occurred (e.g. duplicate record).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Authorization failure at the domain boundary.
    #[error("unauthorized")]
    Unauthorized,
}

impl DomainError {
    /// Single-field validation failure.
    pub fn validation(field: impl Into<String>, msg: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::default();
        errors.add(field, msg);
        Self::Validation(errors)
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}
