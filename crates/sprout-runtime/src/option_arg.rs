//! Conditional optional arguments
//!
//! An [`OptionArg`] pairs a factory with its own [`Conditional`]. The factory
//! only runs when the condition matches the context, which lets a component
//! constructor receive a variable set of options:
//!
//! ```text
//! OptionArgs::new()
//!     .with(OptionArg::new(|_| Ok(Tls::default())).condition_on_property("web.tls"))
//!     .with(OptionArg::new(|_| Ok(Gzip)).condition_on_profile("prod"))
//!     .resolve(&ctx)?
//! ```

use crate::condition::{Condition, Conditional};
use crate::context::{BeanSelector, ConditionContext};
use crate::error::{Result, RuntimeError};
use sprout_core::Value;
use std::fmt;
use std::panic::Location;

type Factory<T> = Box<dyn Fn(&dyn ConditionContext) -> anyhow::Result<T> + Send + Sync>;

/// A factory activated by a condition chain
pub struct OptionArg<T> {
    label: String,
    condition: Conditional,
    factory: Factory<T>,
}

impl<T> OptionArg<T> {
    /// Create an unconditional option; the label records the caller's location
    #[track_caller]
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(&dyn ConditionContext) -> anyhow::Result<T> + Send + Sync + 'static,
    {
        let location = Location::caller();
        Self {
            label: format!("option arg {}:{}", location.file(), location.line()),
            condition: Conditional::new(),
            factory: Box::new(factory),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn condition(&self) -> &Conditional {
        &self.condition
    }

    pub fn or(mut self) -> Self {
        self.condition.or();
        self
    }

    pub fn and(mut self) -> Self {
        self.condition.and();
        self
    }

    pub fn condition_on(mut self, condition: impl Condition + 'static) -> Self {
        self.condition.on_condition(condition);
        self
    }

    pub fn condition_not(mut self, condition: impl Condition + 'static) -> Self {
        self.condition.on_condition_not(condition);
        self
    }

    pub fn condition_on_property(mut self, name: impl Into<String>) -> Self {
        self.condition.on_property(name);
        self
    }

    pub fn condition_on_missing_property(mut self, name: impl Into<String>) -> Self {
        self.condition.on_missing_property(name);
        self
    }

    pub fn condition_on_property_value(mut self, name: impl Into<String>, expected: impl Into<Value>) -> Self {
        self.condition.on_property_value(name, expected);
        self
    }

    pub fn condition_on_bean(mut self, selector: impl Into<BeanSelector>) -> Self {
        self.condition.on_bean(selector);
        self
    }

    pub fn condition_on_missing_bean(mut self, selector: impl Into<BeanSelector>) -> Self {
        self.condition.on_missing_bean(selector);
        self
    }

    pub fn condition_on_expression(mut self, expression: impl Into<String>) -> Self {
        self.condition.on_expression(expression);
        self
    }

    pub fn condition_on_matches<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&dyn ConditionContext) -> bool + Send + Sync + 'static,
    {
        self.condition.on_matches(predicate);
        self
    }

    pub fn condition_on_profile(mut self, profile: impl Into<String>) -> Self {
        self.condition.on_profile(profile);
        self
    }

    /// Build the value if the condition matches
    ///
    /// Returns `Ok(None)` when the option is not activated. Factory failures
    /// are reported as [`RuntimeError::OptionArg`].
    pub fn call(&self, ctx: &dyn ConditionContext) -> Result<Option<T>> {
        if !self.condition.matches(ctx)? {
            tracing::debug!("{} skipped: {}", self.label, self.condition);
            return Ok(None);
        }

        let value = (self.factory)(ctx).map_err(|source| RuntimeError::OptionArg {
            label: self.label.clone(),
            source,
        })?;
        tracing::debug!("{} activated", self.label);
        Ok(Some(value))
    }
}

impl<T> fmt::Debug for OptionArg<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionArg")
            .field("label", &self.label)
            .field("condition", &self.condition)
            .finish_non_exhaustive()
    }
}

/// Ordered set of optional arguments
pub struct OptionArgs<T> {
    options: Vec<OptionArg<T>>,
}

impl<T> Default for OptionArgs<T> {
    fn default() -> Self {
        Self { options: Vec::new() }
    }
}

impl<T> OptionArgs<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, option: OptionArg<T>) -> Self {
        self.options.push(option);
        self
    }

    pub fn push(&mut self, option: OptionArg<T>) {
        self.options.push(option);
    }

    /// Values of every activated option, in declaration order
    pub fn resolve(&self, ctx: &dyn ConditionContext) -> Result<Vec<T>> {
        let mut values = Vec::with_capacity(self.options.len());
        for option in &self.options {
            if let Some(value) = option.call(ctx)? {
                values.push(value);
            }
        }
        Ok(values)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl<T> FromIterator<OptionArg<T>> for OptionArgs<T> {
    fn from_iter<I: IntoIterator<Item = OptionArg<T>>>(iter: I) -> Self {
        Self {
            options: iter.into_iter().collect(),
        }
    }
}

impl<T> fmt::Debug for OptionArgs<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.options).finish()
    }
}
