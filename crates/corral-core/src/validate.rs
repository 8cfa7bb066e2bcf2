//! Field validation rules shared by the per-collection validators.
//!
//! The reconciliation validator rejects a whole submission on the first
//! violation; every error names the 1-based position of the offending item.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// A violation detected before any store mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{item} {index} is missing the required field '{field}'")]
    MissingField {
        item: &'static str,
        index: usize,
        field: &'static str,
    },

    #[error("{item} {index} has an invalid {field}: {reason}")]
    InvalidFormat {
        item: &'static str,
        index: usize,
        field: &'static str,
        reason: String,
    },

    #[error("duplicate {field} '{value}' in the submitted {item} list")]
    DuplicateInBatch {
        item: &'static str,
        field: &'static str,
        value: String,
    },
}

impl ValidationError {
    pub fn missing(item: &'static str, index: usize, field: &'static str) -> Self {
        Self::MissingField { item, index, field }
    }

    pub fn format(
        item: &'static str,
        index: usize,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidFormat {
            item,
            index,
            field,
            reason: reason.into(),
        }
    }

    pub fn duplicate(item: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        Self::DuplicateInBatch {
            item,
            field,
            value: value.into(),
        }
    }
}

/// Require a present field of any type.
pub fn require<'a, T>(
    item: &'static str,
    index: usize,
    field: &'static str,
    value: &'a Option<T>,
) -> Result<&'a T, ValidationError> {
    value
        .as_ref()
        .ok_or(ValidationError::MissingField { item, index, field })
}

/// Require a present, non-blank text field. Returns the trimmed value.
pub fn require_text<'a>(
    item: &'static str,
    index: usize,
    field: &'static str,
    value: &'a Option<String>,
) -> Result<&'a str, ValidationError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField { item, index, field }),
    }
}

/// Require an `http://` or `https://` URL.
pub fn check_http_url(
    item: &'static str,
    index: usize,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if is_http_url(value) {
        Ok(())
    } else {
        Err(ValidationError::format(
            item,
            index,
            field,
            "must be a valid http(s) URL",
        ))
    }
}

/// Require an international phone number: `+<1-3 digit country code>`
/// followed by 6 to 14 digits.
pub fn check_intl_phone(
    item: &'static str,
    index: usize,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if is_intl_phone(value) {
        Ok(())
    } else {
        Err(ValidationError::format(
            item,
            index,
            field,
            "must use the international format +<country code><number>",
        ))
    }
}

/// Require a numeric value inside an inclusive range.
pub fn check_range(
    item: &'static str,
    index: usize,
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::format(
            item,
            index,
            field,
            format!("must be between {min} and {max}"),
        ))
    }
}

/// Normalize a value used for uniqueness comparison: trimmed and lowercased.
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Trimmed value of an optional text field, with `None` and blank strings
/// treated alike (a blank field behaves as absent throughout the API).
pub fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn http_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^https?://.+").expect("static pattern"))
}

fn intl_phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+\d{1,3}\d{6,14}$").expect("static pattern"))
}

fn loose_phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Accepts "+598 99 123 456", "+59899123456", "099123456" and similar.
    RE.get_or_init(|| {
        Regex::new(r"^[+]?[(]?[0-9]{1,4}[)]?[-\s.]?[(]?[0-9]{1,4}[)]?[-\s.]?[0-9]{1,9}$")
            .expect("static pattern")
    })
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("static pattern"))
}

pub fn is_http_url(value: &str) -> bool {
    http_url_re().is_match(value)
}

pub fn is_intl_phone(value: &str) -> bool {
    intl_phone_re().is_match(value)
}

pub fn is_loose_phone(value: &str) -> bool {
    loose_phone_re().is_match(value)
}

pub fn is_email(value: &str) -> bool {
    email_re().is_match(value)
}
