//! Field validators for member and class data.
//!
//! These are boundary checks: the interactive re-prompt loops of a UI stay
//! outside the core, which only ever sees a single value and accepts or
//! rejects it.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// `local@domain.tld` with at least a two-letter TLD.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// Argentine DNI: 7 or 8 digits.
static DNI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{7,8}$").unwrap());

/// Argentine phone number: optional +54 country code, optional 2-4 digit
/// area code, then two 4-digit groups.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+54\s?)?(\d{2,4}\s?)?\d{4}\s?\d{4}$").unwrap());

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    #[error("invalid DNI: {0:?} (expected 7-8 digits)")]
    InvalidDni(String),
    #[error("invalid email: {0:?}")]
    InvalidEmail(String),
    #[error("invalid phone number: {0:?}")]
    InvalidPhone(String),
    #[error("invalid {field}: {value:?} (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },
    #[error("class capacity must be greater than zero")]
    NonPositiveCapacity,
}

/// Trim `value` and reject it if nothing remains.
pub fn require_non_empty(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

pub fn validate_dni(dni: &str) -> Result<String, ValidationError> {
    let trimmed = dni.trim();
    if !DNI_RE.is_match(trimmed) {
        return Err(ValidationError::InvalidDni(dni.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Validated emails are normalized to lowercase.
pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let trimmed = email.trim().to_lowercase();
    if !EMAIL_RE.is_match(&trimmed) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }
    Ok(trimmed)
}

pub fn validate_phone(phone: &str) -> Result<String, ValidationError> {
    let trimmed = phone.trim();
    if !PHONE_RE.is_match(trimmed) {
        return Err(ValidationError::InvalidPhone(phone.to_string()));
    }
    Ok(trimmed.to_string())
}

pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| ValidationError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

pub fn validate_capacity(capacity: u32) -> Result<u32, ValidationError> {
    if capacity == 0 {
        return Err(ValidationError::NonPositiveCapacity);
    }
    Ok(capacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty() {
        assert_eq!(require_non_empty("name", "  Ana ").unwrap(), "Ana");
        assert_eq!(
            require_non_empty("name", "   "),
            Err(ValidationError::EmptyField("name"))
        );
    }

    #[test]
    fn test_validate_dni() {
        validate_dni("1234567").unwrap();
        validate_dni("12345678").unwrap();
        validate_dni("123456").unwrap_err(); // too short
        validate_dni("123456789").unwrap_err(); // too long
        validate_dni("1234567a").unwrap_err();
        validate_dni("12.345.678").unwrap_err();
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(
            validate_email("Ana.Perez@Example.COM").unwrap(),
            "ana.perez@example.com"
        );
        validate_email("ana@example").unwrap_err(); // no TLD
        validate_email("ana@.com").unwrap_err();
        validate_email("@example.com").unwrap_err();
        validate_email("ana perez@example.com").unwrap_err();
    }

    #[test]
    fn test_validate_phone() {
        validate_phone("4567 8901").unwrap();
        validate_phone("45678901").unwrap();
        validate_phone("11 4567 8901").unwrap();
        validate_phone("+54 11 4567 8901").unwrap();
        validate_phone("456789012").unwrap_err(); // 9 digits fit no grouping
        validate_phone("123").unwrap_err();
        validate_phone("phone").unwrap_err();
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("birthdate", "1990-07-15").unwrap(),
            NaiveDate::from_ymd_opt(1990, 7, 15).unwrap()
        );
        parse_date("birthdate", "15/07/1990").unwrap_err();
        parse_date("birthdate", "1990-13-01").unwrap_err();
        parse_date("birthdate", "not-a-date").unwrap_err();
    }

    #[test]
    fn test_validate_capacity() {
        assert_eq!(validate_capacity(1).unwrap(), 1);
        assert_eq!(
            validate_capacity(0),
            Err(ValidationError::NonPositiveCapacity)
        );
    }
}
