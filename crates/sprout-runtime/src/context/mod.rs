//! Evaluation context module
//!
//! The read-only view of the environment that conditions are evaluated
//! against: configuration properties, registered beans and the active
//! profile.

mod application;
mod beans;
mod properties;

// Re-export public types
pub use application::{ApplicationContext, ApplicationContextBuilder, ACTIVE_PROFILE_PROPERTY};
pub use beans::{BeanDefinition, BeanHandle, BeanRegistry, BeanSelector};
pub use properties::PropertyStore;

use sprout_core::Value;

/// Capabilities a condition may query
///
/// Every method is read-only and must give the same answer when called twice
/// against the same context.
pub trait ConditionContext {
    /// Keys equal to `prefix` or nested under it, in key order
    fn properties_with_prefix(&self, prefix: &str) -> Vec<String>;

    /// Value of a single property, `None` when it is not set
    fn property_value(&self, name: &str) -> Option<Value>;

    /// Resolve a bean for the selector
    fn find_bean(&self, selector: &BeanSelector) -> Option<BeanHandle>;

    /// Active deployment profile; empty when none is set
    fn active_profile(&self) -> &str;

    /// Value of a property or `default`, plus whether it was found
    fn property_or(&self, name: &str, default: Value) -> (Value, bool) {
        match self.property_value(name) {
            Some(value) => (value, true),
            None => (default, false),
        }
    }
}
