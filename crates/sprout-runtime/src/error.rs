//! Runtime error types
//!
//! Every variant is a programming or configuration error. They abort the
//! current evaluation; a `false` match result never stands in for one.

use sprout_core::CoreError;
use sprout_parser::ParseError;
use thiserror::Error;

/// Runtime error
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// A chain ends with `or()`/`and()` and no condition after it
    #[error("Malformed condition chain: operator is not followed by a condition")]
    MalformedChain,

    /// A condition group was built without members
    #[error("Condition group has no conditions")]
    EmptyGroup,

    /// Operator text outside the known set
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    /// Reserved feature with no behavior yet
    #[error("Unimplemented feature: {0}")]
    Unimplemented(String),

    /// A substituted property template could not be evaluated
    #[error("Failed to evaluate expression '{expression}': {source}")]
    ExpressionEvaluation {
        expression: String,
        #[source]
        source: Box<RuntimeError>,
    },

    /// Type error
    #[error("Type error: {0}")]
    TypeError(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Division by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Expression parse error
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Value conversion error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An optional argument factory failed
    #[error("Option argument '{label}' failed: {source}")]
    OptionArg {
        label: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
