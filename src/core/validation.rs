//! Identifier handling for table and column names.
//!
//! The store itself only needs [`normalize_name`]: submitted names are
//! trimmed and empty results make the command a no-op. The stricter
//! [`validate_identifier`] is for edit forms that want to reject a name
//! before submitting it.

use thiserror::Error;

/// Maximum identifier length (MySQL limit).
pub const MAX_IDENTIFIER_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name cannot be empty")]
    Empty,
    #[error("name is too long ({actual} chars, max {max})")]
    TooLong { max: usize, actual: usize },
    #[error("name contains invalid characters: '{invalid}'")]
    InvalidCharacters { invalid: String },
    #[error("name cannot start with a digit")]
    StartsWithDigit,
}

/// Trims a submitted name; `None` when nothing is left.
pub fn normalize_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Validates a database identifier: non-empty, within length limits, ASCII
/// alphanumeric/underscore only, not starting with a digit.
pub fn validate_identifier(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    if trimmed.len() > MAX_IDENTIFIER_LENGTH {
        return Err(ValidationError::TooLong {
            max: MAX_IDENTIFIER_LENGTH,
            actual: trimmed.len(),
        });
    }
    let invalid: String = trimmed
        .chars()
        .filter(|c| !c.is_ascii_alphanumeric() && *c != '_')
        .collect();
    if !invalid.is_empty() {
        return Err(ValidationError::InvalidCharacters { invalid });
    }
    if let Some(first) = trimmed.chars().next()
        && first.is_ascii_digit()
    {
        return Err(ValidationError::StartsWithDigit);
    }
    Ok(())
}
