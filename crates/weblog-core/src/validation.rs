//! Form validation.
//!
//! Each check collects every failing field so the caller can re-display the
//! whole form at once.

use std::ops::RangeInclusive;

use crate::error::{DomainError, FieldError};

pub const USERNAME_LEN: RangeInclusive<usize> = 4..=20;
pub const PASSWORD_LEN: RangeInclusive<usize> = 6..=20;
pub const TITLE_MAX_LEN: usize = 200;
pub const CONTENT_MAX_LEN: usize = 1000;
pub const CATEGORY_NAME_MAX_LEN: usize = 20;

fn check_length(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: &str,
    range: RangeInclusive<usize>,
) {
    let len = value.chars().count();
    if !range.contains(&len) {
        errors.push(FieldError::new(
            field,
            format!(
                "must be between {} and {} characters long",
                range.start(),
                range.end()
            ),
        ));
    }
}

fn check_required(errors: &mut Vec<FieldError>, field: &'static str, value: &str, max: usize) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "is required"));
    } else if value.chars().count() > max {
        errors.push(FieldError::new(
            field,
            format!("must be at most {max} characters long"),
        ));
    }
}

fn finish(errors: Vec<FieldError>) -> Result<(), DomainError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(errors))
    }
}

/// Validate the registration form.
pub fn validate_registration(username: &str, password: &str) -> Result<(), DomainError> {
    let mut errors = Vec::new();
    check_length(&mut errors, "username", username, USERNAME_LEN);
    check_length(&mut errors, "password", password, PASSWORD_LEN);
    finish(errors)
}

/// Validate the post form. `tags` are the already parsed category names.
pub fn validate_post(title: &str, content: &str, tags: &[String]) -> Result<(), DomainError> {
    let mut errors = Vec::new();
    check_required(&mut errors, "title", title, TITLE_MAX_LEN);
    check_required(&mut errors, "content", content, CONTENT_MAX_LEN);

    if let Some(tag) = tags
        .iter()
        .find(|t| t.chars().count() > CATEGORY_NAME_MAX_LEN)
    {
        errors.push(FieldError::new(
            "tags",
            format!("tag '{tag}' is longer than {CATEGORY_NAME_MAX_LEN} characters"),
        ));
    }

    finish(errors)
}
