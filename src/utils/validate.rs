use validator::ValidateEmail;

use crate::utils::error::AppError;

/// Reject malformed email addresses before they hit the unique index.
pub fn require_valid_email(email: &str) -> Result<(), AppError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(AppError::ValidationError(
            "A valid email address is required".to_string(),
        ))
    }
}

/// Presence check shared by the create handlers: a missing or blank field
/// is reported as a single 400, matching the API contract.
pub fn require_field<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::ValidationError(message.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email_passes() {
        assert!(require_valid_email("fan@example.com").is_ok());
    }

    #[test]
    fn test_malformed_emails_fail() {
        for bad in ["", "plain", "@example.com", "a b@example.com"] {
            assert!(require_valid_email(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_require_field() {
        assert_eq!(require_field(Some("x"), "missing").unwrap(), "x");
        assert!(require_field(Some("   "), "missing").is_err());
        assert!(require_field(None, "missing").is_err());
    }
}
