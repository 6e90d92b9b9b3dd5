use std::sync::LazyLock;

use regex::Regex;

use crate::models::{FieldError, UpdateProfileRequest};

// Letters separated by single spaces, no leading/trailing space, no digits.
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+(?: [A-Za-z]+)*$").expect("valid name pattern"));

// Indian mobile number: optional +91 prefix, 10 digits starting 6-9.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\+91)?[6-9][0-9]{9}$").expect("valid phone pattern"));

const MIN_NAME_LEN: usize = 2;

/// Validate one name-shaped field (name, city, state).
///
/// Boundary behavior: a two-letter value ("Jo") passes; a single letter,
/// a doubled internal space ("A  B") or a leading space (" Ab") fail.
fn check_name_field(value: &str, field: &str) -> Option<FieldError> {
    if value.chars().count() < MIN_NAME_LEN {
        return Some(FieldError {
            field: field.to_string(),
            message: format!("must be at least {MIN_NAME_LEN} characters"),
        });
    }
    if !NAME_RE.is_match(value) {
        return Some(FieldError {
            field: field.to_string(),
            message: "only letters separated by single spaces are allowed".to_string(),
        });
    }
    None
}

fn check_phone(value: &str) -> Option<FieldError> {
    if !PHONE_RE.is_match(value) {
        return Some(FieldError {
            field: "phone".to_string(),
            message: "must be a valid Indian mobile number (optionally prefixed with +91)"
                .to_string(),
        });
    }
    None
}

/// Validate a profile update before anything is written.
///
/// Only fields present in the partial update are checked; a single invalid
/// field rejects the whole submit, mirroring the form behavior where the
/// submit button stays blocked while any field is invalid.
pub fn validate_profile(req: &UpdateProfileRequest) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if let Some(name) = &req.name {
        errors.extend(check_name_field(name, "name"));
    }
    if let Some(city) = &req.city {
        errors.extend(check_name_field(city, "city"));
    }
    if let Some(state) = &req.state {
        errors.extend(check_name_field(state, "state"));
    }
    if let Some(phone) = &req.phone {
        errors.extend(check_phone(phone));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
