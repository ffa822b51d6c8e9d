use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::models::ValidationError;

/// Naive date-time layouts accepted in request bodies; interpreted as UTC
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 timestamp from a request body and normalize it to UTC.
///
/// Offsets (`Z`, `+02:00`, `+0200`) are honoured rather than discarded.
/// Values without an offset, including plain dates, are taken as UTC.
pub fn parse_timestamp(field: &str, raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    let value = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    if let Some(naive) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(Utc.from_utc_datetime(&naive));
    }

    Err(ValidationError::new(format!(
        "{} is not a valid ISO-8601 timestamp: {:?}",
        field, raw
    )))
}

/// Validate a required text field: present and non-blank. Returns the trimmed value.
pub fn require_text(field: &str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(v) => check_text(field, v),
        None => Err(ValidationError::required(field)),
    }
}

/// Validate a text value that, when given, must not be blank
pub fn check_text(field: &str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Validate a rack-unit count or span (must be > 0)
pub fn check_positive(field: &str, value: i64) -> Result<i64, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::new(format!(
            "{} must be a positive integer",
            field
        )));
    }
    Ok(value)
}
