use lazy_static::lazy_static;
use regex::Regex;

use crate::error::KitchenError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Trims and lowercases a guardian email, rejecting malformed ones.
pub fn normalize_email(raw: &str) -> Result<String, KitchenError> {
    let email = raw.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(KitchenError::Validation(format!("invalid email {raw:?}")));
    }
    Ok(email)
}

pub fn require_text(field: &str, raw: &str) -> Result<String, KitchenError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(KitchenError::Validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_normalized() {
        assert_eq!(
            normalize_email("  Mum@Example.COM ").unwrap(),
            "mum@example.com"
        );
        assert!(normalize_email("not-an-email").is_err());
        assert!(normalize_email("a b@c.d").is_err());
    }

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(require_text("child name", " Ivan ").unwrap(), "Ivan");
        let err = require_text("child name", "   ").unwrap_err();
        assert!(err.to_string().contains("child name is required"));
    }
}
