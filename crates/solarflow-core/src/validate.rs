//! Field-level validation helpers shared by the stage forms.
//!
//! All helpers fail with [`TrackerError::Validation`] naming the offending
//! field, so the caller can report errors inline per field. Validation runs
//! before any database write is attempted.

use jiff::civil::Date;
use rust_decimal::Decimal;

use crate::error::{Result, TrackerError};

/// Requires a text field to be present and non-blank.
pub(crate) fn require_text<'a>(field: &str, value: &'a Option<String>) -> Result<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(TrackerError::validation(field, "required")),
    }
}

/// Requires a date field to be present.
pub(crate) fn require_date(field: &str, value: &Option<Date>) -> Result<Date> {
    value
        .ok_or_else(|| TrackerError::validation(field, "required"))
}

/// Requires an amount to be present and strictly positive.
pub(crate) fn positive_amount(field: &str, value: &Option<Decimal>) -> Result<Decimal> {
    let amount = value.ok_or_else(|| TrackerError::validation(field, "required"))?;
    if amount <= Decimal::ZERO {
        return Err(TrackerError::validation(
            field,
            "must be a positive amount",
        ));
    }
    Ok(amount)
}

/// Requires a quantity to be present and a positive whole number.
///
/// Quantities arrive as free-form text from the stage forms, so this parses
/// rather than assuming a numeric type.
pub(crate) fn positive_qty(field: &str, value: &Option<String>) -> Result<u32> {
    let text = require_text(field, value)?;
    match text.parse::<u32>() {
        Ok(qty) if qty > 0 => Ok(qty),
        _ => Err(TrackerError::validation(
            field,
            "must be a positive whole number",
        )),
    }
}

/// Requires a positive row identifier.
pub(crate) fn positive_id(field: &str, value: &Option<i64>) -> Result<i64> {
    match value {
        Some(id) if *id > 0 => Ok(*id),
        Some(_) => Err(TrackerError::validation(field, "must be a positive ID")),
        None => Err(TrackerError::validation(field, "required")),
    }
}

/// Validates a delivery priority against the fixed set used by the planner.
pub(crate) fn check_priority(field: &str, value: &Option<String>) -> Result<()> {
    let text = require_text(field, value)?;
    match text {
        "Low" | "Medium" | "High" => Ok(()),
        _ => Err(TrackerError::validation(
            field,
            "must be one of Low, Medium, High",
        )),
    }
}

/// Validates an optional phone number: 10 digits, optional leading `+`
/// country code.
pub(crate) fn check_phone(field: &str, value: &Option<String>) -> Result<()> {
    let Some(raw) = value.as_deref().map(str::trim) else {
        return Ok(());
    };
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    if digits.len() >= 10 && digits.len() <= 13 && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(TrackerError::validation(field, "malformed phone number"))
    }
}

/// Validates an optional email address: one `@` with non-empty local and
/// domain parts, and a dot in the domain.
pub(crate) fn check_email(field: &str, value: &Option<String>) -> Result<()> {
    let Some(raw) = value.as_deref().map(str::trim) else {
        return Ok(());
    };
    let valid = match raw.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(TrackerError::validation(field, "malformed email address"))
    }
}

/// Validates an optional GSTIN: exactly 15 alphanumeric characters.
pub(crate) fn check_gstin(field: &str, value: &Option<String>) -> Result<()> {
    let Some(raw) = value.as_deref().map(str::trim) else {
        return Ok(());
    };
    if raw.len() == 15 && raw.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(TrackerError::validation(field, "malformed GSTIN"))
    }
}
