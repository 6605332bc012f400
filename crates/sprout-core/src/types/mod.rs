//! Type system for Sprout
//!
//! Property values and their conversions.

pub mod value;

pub use value::Value;
