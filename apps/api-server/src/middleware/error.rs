//! Error handling middleware - RFC 7807 compliant responses.

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header};
use weblog_core::DomainError;
use weblog_core::domain::Redirect;
use weblog_shared::ErrorResponse;
use weblog_shared::dto::FieldErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    Validation {
        errors: Vec<FieldErrorResponse>,
        form: Option<serde_json::Value>,
    },
    Conflict(String),
    InvalidCredentials,
    /// Not logged in; the client is sent to the login page.
    Unauthenticated,
    Internal(String),
}

impl AppError {
    /// Attach the submitted form to a validation error so it can be re-displayed.
    pub fn with_form(self, form: serde_json::Value) -> Self {
        match self {
            AppError::Validation { errors, .. } => AppError::Validation {
                errors,
                form: Some(form),
            },
            other => other,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation { errors, .. } => {
                write!(f, "Validation errors: {} field(s)", errors.len())
            }
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::Unauthenticated => write!(f, "Unauthenticated"),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::Validation { errors, form } => ErrorResponse::new(422, "Validation Failed")
                .with_errors(errors.clone())
                .with_form(form.clone()),
            AppError::Conflict(detail) => ErrorResponse::new(409, "Conflict").with_detail(detail),
            AppError::InvalidCredentials => ErrorResponse::unauthorized()
                .with_detail("Invalid username or password."),
            AppError::Unauthenticated => {
                ErrorResponse::unauthorized().with_detail("Please log in to continue.")
            }
            AppError::Internal(detail) => {
                // Log internal errors
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        let mut response = HttpResponse::build(self.status_code());
        if let AppError::Unauthenticated = self {
            response.insert_header((header::LOCATION, Redirect::Login.path()));
        }
        response.json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(errors) => AppError::Validation {
                errors: errors
                    .into_iter()
                    .map(|e| FieldErrorResponse {
                        field: e.field.to_string(),
                        message: e.message,
                    })
                    .collect(),
                form: None,
            },
            DomainError::DuplicateUsername(name) => {
                AppError::Conflict(format!("Username '{}' is already taken", name))
            }
            DomainError::InvalidCredentials => AppError::InvalidCredentials,
            DomainError::Unauthenticated => AppError::Unauthenticated,
            DomainError::StorageFault(e) => {
                tracing::error!("Database error: {}", e);
                AppError::Internal("Database error".to_string())
            }
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
