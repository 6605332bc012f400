//! Parser error types

use thiserror::Error;

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid expression syntax
    #[error("Invalid expression syntax: {0}")]
    InvalidExpression(String),

    /// Unexpected token while parsing an expression
    #[error("Unexpected token '{found}' at position {position}")]
    UnexpectedToken { found: String, position: usize },

    /// Expression ended before it was complete
    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    /// Malformed literal
    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),

    /// Names are not resolvable inside template expressions
    #[error("Unsupported identifier '{0}': template expressions only accept literals")]
    UnsupportedIdentifier(String),

    /// Malformed line in a properties document
    #[error("Invalid property at line {line}: {message}")]
    InvalidProperty { line: usize, message: String },
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
