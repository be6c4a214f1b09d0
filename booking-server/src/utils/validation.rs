//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Guest-field limits mirror the booking form rules: names at least two
//! characters, phones at least ten, party size between 1 and 20.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Guest names
pub const MAX_NAME_LEN: usize = 200;
pub const MIN_NAME_LEN: usize = 2;

/// Phone numbers
pub const MAX_PHONE_LEN: usize = 100;
pub const MIN_PHONE_LEN: usize = 10;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Special requests, notes
pub const MAX_NOTE_LEN: usize = 500;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;
pub const MIN_PASSWORD_LEN: usize = 6;

/// Party size
pub const MIN_GUESTS: u32 = 1;
pub const MAX_GUESTS: u32 = 20;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a guest name (non-empty, 2..=200 chars).
pub fn validate_guest_name(name: &str) -> Result<(), AppError> {
    validate_required_text(name, "guestName", MAX_NAME_LEN)?;
    if name.trim().chars().count() < MIN_NAME_LEN {
        return Err(AppError::validation(format!(
            "guestName must be at least {MIN_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a guest phone (10..=100 chars, digits/spaces/`+-()` only).
pub fn validate_guest_phone(phone: &str) -> Result<(), AppError> {
    validate_required_text(phone, "guestPhone", MAX_PHONE_LEN)?;
    if phone.chars().count() < MIN_PHONE_LEN {
        return Err(AppError::validation(format!(
            "guestPhone must be at least {MIN_PHONE_LEN} characters"
        )));
    }
    let valid_chars = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'));
    if !valid_chars {
        return Err(AppError::validation("guestPhone has an invalid format"));
    }
    Ok(())
}

/// Validate an email address (empty passes: guest email is optional,
/// account email is guarded by a non-empty check upstream).
pub fn validate_email(email: &str, field: &str) -> Result<(), AppError> {
    if email.is_empty() {
        return Ok(());
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {MAX_EMAIL_LEN})",
            email.len()
        )));
    }
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    };
    if !well_formed {
        return Err(AppError::validation(format!("{field} has an invalid format")));
    }
    Ok(())
}

/// Validate a party size (1..=20).
pub fn validate_guests(guests: u32) -> Result<(), AppError> {
    if !(MIN_GUESTS..=MAX_GUESTS).contains(&guests) {
        return Err(AppError::validation(format!(
            "guests must be between {MIN_GUESTS} and {MAX_GUESTS}"
        )));
    }
    Ok(())
}
