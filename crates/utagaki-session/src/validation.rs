//! Input checks shared by the ledgers.

use crate::error::{Result, SessionError};

/// Trim `value` and reject it if nothing is left.
pub fn require_text(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SessionError::Validation {
            field,
            reason: "must not be empty".into(),
        });
    }
    Ok(trimmed.to_string())
}

/// Reject `value` if it is blank after trimming, otherwise keep it as written.
pub fn require_content(field: &'static str, value: &str) -> Result<String> {
    require_text(field, value)?;
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(require_text("content", "  haru  ").unwrap(), "haru");
    }

    #[test]
    fn rejects_blank_input() {
        for blank in ["", "   ", "\n\t"] {
            let err = require_text("display name", blank).unwrap_err();
            assert!(err.is_validation());
            assert_eq!(err.to_string(), "invalid display name: must not be empty");
        }
    }

    #[test]
    fn content_keeps_surrounding_whitespace() {
        assert_eq!(require_content("content", " haru \n").unwrap(), " haru \n");
        assert!(require_content("content", " \n ").unwrap_err().is_validation());
    }

    #[test]
    fn keeps_inner_whitespace() {
        assert_eq!(
            require_text("content", " haru sugite natsu kinikerashi ").unwrap(),
            "haru sugite natsu kinikerashi"
        );
    }
}
