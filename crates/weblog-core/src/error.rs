//! Domain-level error types.

use std::fmt;

use thiserror::Error;

/// A single form field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {}", join_fields(.0))]
    Validation(Vec<FieldError>),

    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    /// Same kind for an unknown username and a wrong password.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Storage fault: {0}")]
    StorageFault(#[from] RepoError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Field errors when this is a validation failure.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            DomainError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
