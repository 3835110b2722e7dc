//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Field name does not match any observation field
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Date text could not be parsed
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_field_error_message() {
        let err = DomainError::UnknownField("temp".to_string());
        assert_eq!(err.to_string(), "Unknown field: temp");
    }

    #[test]
    fn invalid_date_error_message() {
        let err = DomainError::InvalidDate("2023-13-01".to_string());
        assert_eq!(err.to_string(), "Invalid date: 2023-13-01");
    }
}
