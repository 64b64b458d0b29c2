//! Shared field validators.

use std::borrow::Cow;
use validator::ValidationError;

/// Rejects strings that are empty once surrounding whitespace is removed.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}

/// Error returned when a stored or submitted string names no variant of a
/// closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {kind}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Ada").is_ok());
        assert!(not_blank("  Ada  ").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("   ").is_err());
    }
}
