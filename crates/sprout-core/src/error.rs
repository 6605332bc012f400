//! Error types for Sprout Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Type error: {0}")]
    TypeError(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::TypeError("expected number".to_string());
        assert_eq!(err.to_string(), "Type error: expected number");

        let err = CoreError::InvalidOperation("cannot add".to_string());
        assert!(err.to_string().contains("Invalid operation"));
    }
}
