// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use rust_decimal::Decimal;

/// Maximum plate length after normalization.
pub const MAX_PLATE_LENGTH: usize = 10;

/// Maximum length for names of people and catalog entries.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum phone length.
pub const MAX_PHONE_LENGTH: usize = 20;

/// Longest estimated duration accepted for an appointment: one day.
pub const MAX_DURATION_MINUTES: u32 = 24 * 60;

/// Normalizes and validates a vehicle plate.
///
/// Plates are stored uppercase with surrounding whitespace removed.
/// Only ASCII letters, digits and `-` are accepted.
///
/// # Errors
///
/// Returns `DomainError::InvalidPlate` if the plate is empty, too long, or
/// contains other characters.
pub fn normalize_plate(plate: &str) -> Result<String, DomainError> {
    let normalized: String = plate.trim().to_ascii_uppercase();
    if normalized.is_empty() {
        return Err(DomainError::InvalidPlate(String::from(
            "Plate cannot be empty",
        )));
    }
    if normalized.len() > MAX_PLATE_LENGTH {
        return Err(DomainError::InvalidPlate(format!(
            "Plate '{normalized}' exceeds {MAX_PLATE_LENGTH} characters"
        )));
    }
    if !normalized
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(DomainError::InvalidPlate(format!(
            "Plate '{normalized}' may only contain letters, digits and '-'"
        )));
    }
    Ok(normalized)
}

/// Validates a display name and returns it trimmed.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is empty or too long.
pub fn validate_name(name: &str) -> Result<String, DomainError> {
    let trimmed: &str = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidName(format!(
            "Name exceeds {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validates a free-text field that must be present.
///
/// # Errors
///
/// Returns `DomainError::MissingRequiredField` if the value is blank.
pub fn require_text(field: &'static str, value: &str) -> Result<String, DomainError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::MissingRequiredField(field));
    }
    Ok(trimmed.to_string())
}

/// Trims optional free text, mapping blank values to `None`.
#[must_use]
pub fn clean_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

/// Validates an optional contact phone.
///
/// # Errors
///
/// Returns `DomainError::InvalidPhone` if the phone is too long or contains
/// characters other than digits, spaces, `+`, `-`, `(` and `)`.
pub fn validate_phone(phone: Option<&str>) -> Result<Option<String>, DomainError> {
    let Some(phone) = clean_text(phone) else {
        return Ok(None);
    };
    if phone.len() > MAX_PHONE_LENGTH {
        return Err(DomainError::InvalidPhone(format!(
            "Phone exceeds {MAX_PHONE_LENGTH} characters"
        )));
    }
    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
    {
        return Err(DomainError::InvalidPhone(format!(
            "Phone '{phone}' contains invalid characters"
        )));
    }
    Ok(Some(phone))
}

/// Validates an optional contact email.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the address lacks a local part
/// or a dotted domain.
pub fn validate_email(email: Option<&str>) -> Result<Option<String>, DomainError> {
    let Some(email) = clean_text(email) else {
        return Ok(None);
    };
    let valid: bool = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains('@')
        }
        None => false,
    };
    if !valid || email.contains(char::is_whitespace) {
        return Err(DomainError::InvalidEmail(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(Some(email))
}

/// Validates an estimated duration in minutes.
///
/// # Errors
///
/// Returns `DomainError::InvalidDuration` if the duration is zero or
/// longer than `MAX_DURATION_MINUTES`.
pub const fn validate_duration(minutes: u32) -> Result<u32, DomainError> {
    if minutes == 0 || minutes > MAX_DURATION_MINUTES {
        return Err(DomainError::InvalidDuration(minutes));
    }
    Ok(minutes)
}

/// Parses a non-negative monetary amount with at most two decimal places.
///
/// # Errors
///
/// Returns `DomainError::InvalidAmount` if the text is not a number, is
/// negative, or has more than two decimal places.
pub fn parse_money(field: &'static str, value: &str) -> Result<Decimal, DomainError> {
    let amount: Decimal = value
        .trim()
        .parse::<Decimal>()
        .map_err(|e| DomainError::InvalidAmount {
            field,
            reason: e.to_string(),
        })?;
    validate_money(field, amount)
}

/// Validates a monetary amount already in decimal form.
///
/// # Errors
///
/// Returns `DomainError::InvalidAmount` if the amount is negative or has
/// more than two decimal places.
pub fn validate_money(field: &'static str, amount: Decimal) -> Result<Decimal, DomainError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(DomainError::InvalidAmount {
            field,
            reason: String::from("must not be negative"),
        });
    }
    if amount.normalize().scale() > 2 {
        return Err(DomainError::InvalidAmount {
            field,
            reason: String::from("at most two decimal places are allowed"),
        });
    }
    Ok(amount)
}

/// Parses an optional monetary amount.
///
/// # Errors
///
/// See [`parse_money`].
pub fn parse_optional_money(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<Decimal>, DomainError> {
    clean_text(value)
        .map(|v| parse_money(field, &v))
        .transpose()
}

/// Formats a monetary amount with exactly two decimal places.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}
