//! Presence checks for write requests.
//!
//! Request bodies are deserialized with every field optional so that a
//! missing field surfaces as a [`CoreError`] (HTTP 400) instead of an
//! extractor rejection. These helpers run before any store access.

use crate::error::CoreError;

/// Unwrap a required field, failing with [`CoreError::MissingField`].
pub fn require<T>(value: Option<T>, field: &'static str) -> Result<T, CoreError> {
    value.ok_or(CoreError::MissingField(field))
}

/// Unwrap a required string field and reject blank values.
///
/// The returned string is trimmed.
pub fn require_non_blank(value: Option<String>, field: &'static str) -> Result<String, CoreError> {
    let value = require(value, field)?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be blank")));
    }
    Ok(trimmed.to_string())
}

/// Reject a path or query key that is blank.
pub fn validate_key(value: &str, field: &'static str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be blank")));
    }
    Ok(())
}

/// Require that at least one of two optional fields is present.
pub fn require_any<A, B>(
    a: &Option<A>,
    b: &Option<B>,
    fields: (&'static str, &'static str),
) -> Result<(), CoreError> {
    if a.is_none() && b.is_none() {
        return Err(CoreError::Validation(format!(
            "at least one of {} or {} is required",
            fields.0, fields.1
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn require_passes_value_through() {
        assert_eq!(require(Some(3), "n").unwrap(), 3);
    }

    #[test]
    fn require_names_missing_field() {
        let err = require::<u8>(None, "date").unwrap_err();
        assert_matches!(err, CoreError::MissingField("date"));
        assert_eq!(err.to_string(), "Missing required field: date");
    }

    #[test]
    fn non_blank_trims() {
        let value = require_non_blank(Some("  2024-01-01 ".into()), "date").unwrap();
        assert_eq!(value, "2024-01-01");
    }

    #[test]
    fn non_blank_rejects_whitespace() {
        let err = require_non_blank(Some("   ".into()), "client_name").unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "client_name must not be blank");
    }

    #[test]
    fn non_blank_rejects_missing() {
        assert_matches!(
            require_non_blank(None, "date"),
            Err(CoreError::MissingField("date"))
        );
    }

    #[test]
    fn key_validation() {
        assert!(validate_key("u1", "userId").is_ok());
        assert!(validate_key(" ", "userId").is_err());
    }

    #[test]
    fn any_of_two() {
        let none: Option<u8> = None;
        assert!(require_any(&Some(1), &none, ("a", "b")).is_ok());
        assert!(require_any(&none, &Some(1), ("a", "b")).is_ok());
        assert_matches!(
            require_any(&none, &none, ("a", "b")),
            Err(CoreError::Validation(msg)) if msg == "at least one of a or b is required"
        );
    }
}
