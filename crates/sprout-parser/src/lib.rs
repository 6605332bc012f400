//! Sprout Parser - text front-ends for the Sprout conditional activation engine
//!
//! This crate turns text into the structures the runtime evaluates:
//! - template expressions produced by property-value conditions
//! - configuration documents flattened into dotted property keys

pub mod error;
pub mod expression_parser;
pub mod property_source;

// Re-export main parser types
pub use error::{ParseError, Result};
pub use expression_parser::{ExpressionParser, MAX_NESTING};
pub use property_source::{parse_scalar, PropertySource};
