//! Sprout Core - Core types for the Sprout conditional activation engine
//!
//! This crate provides the fundamental types shared by the parser and runtime:
//! - Value types for configuration properties
//! - Expression AST used by templated property conditions
//! - Error types

pub mod ast;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use types::Value;
