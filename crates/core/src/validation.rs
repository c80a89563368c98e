//! Input validation for operator-entered fields.
//!
//! The store itself does not validate; handlers run these checks before
//! any write so a rejected request leaves nothing behind.

use std::sync::LazyLock;

use regex::Regex;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;

/// Brazilian phone numbers: area code plus 8 or 9 digits.
static PHONE_DIGITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{10,11}$").unwrap_or_else(|e| panic!("invalid phone regex: {e}"))
});

/// Characters tolerated as phone formatting and stripped before checking.
const PHONE_FORMATTING: &[char] = &[' ', '(', ')', '-', '.'];

/// Client contact details typed at booking time.
#[derive(Debug, Clone, Validate)]
pub struct ClientContact {
    #[validate(length(min = 1, message = "Client name is required"))]
    pub name: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
}

impl ClientContact {
    /// Trim, strip phone formatting and validate.
    pub fn parse(name: &str, phone: &str) -> Result<Self, CoreError> {
        let contact = Self {
            name: name.trim().to_string(),
            phone: normalize_phone(phone),
        };
        contact.validate().map_err(into_core_error)?;
        Ok(contact)
    }
}

/// Remove formatting characters from a phone number.
pub fn normalize_phone(phone: &str) -> String {
    phone
        .trim()
        .chars()
        .filter(|c| !PHONE_FORMATTING.contains(c))
        .collect()
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_DIGITS.is_match(phone) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some("Phone must have 10 or 11 digits".into());
        Err(err)
    }
}

/// Require a non-blank value, returning it trimmed.
pub fn require_text(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CoreError::Validation(format!("{field} is required")))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Trim optional free text, collapsing blanks to `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn into_core_error(errors: ValidationErrors) -> CoreError {
    CoreError::Validation(errors.to_string())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn valid_contact_is_normalized() {
        let contact = ClientContact::parse("  Ana ", "(11) 99999-0000").unwrap();
        assert_eq!(contact.name, "Ana");
        assert_eq!(contact.phone, "11999990000");
    }

    #[test]
    fn ten_digit_landline_accepted() {
        assert!(ClientContact::parse("Ana", "1133334444").is_ok());
    }

    #[test]
    fn blank_name_rejected() {
        assert_matches!(
            ClientContact::parse("   ", "11999990000"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn malformed_phone_rejected() {
        assert_matches!(
            ClientContact::parse("Ana", "12345"),
            Err(CoreError::Validation(msg)) if msg.contains("10 or 11 digits")
        );
        assert_matches!(
            ClientContact::parse("Ana", "11-9999-abcd"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn require_text_trims() {
        assert_eq!(require_text("Name", " Tosa ").unwrap(), "Tosa");
        assert_matches!(require_text("Name", ""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn optional_text_collapses_blank() {
        assert_eq!(optional_text(Some("  ")), None);
        assert_eq!(optional_text(Some(" x ")), Some("x".to_string()));
        assert_eq!(optional_text(None), None);
    }
}
