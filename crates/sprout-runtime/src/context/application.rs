//! Application context
//!
//! The default [`ConditionContext`] implementation. It bundles a
//! [`PropertyStore`], a [`BeanRegistry`] and the active profile.

use super::{BeanHandle, BeanRegistry, BeanSelector, ConditionContext, PropertyStore};
use sprout_core::Value;
use sprout_parser::PropertySource;
use std::any::Any;

/// Property consulted for the active profile when none is set explicitly
pub const ACTIVE_PROFILE_PROPERTY: &str = "profiles.active";

/// Properties, beans and profile of a running application
#[derive(Debug, Clone, Default)]
pub struct ApplicationContext {
    properties: PropertyStore,
    beans: BeanRegistry,
    profile: String,
}

impl ApplicationContext {
    pub fn new(properties: PropertyStore, beans: BeanRegistry, profile: impl Into<String>) -> Self {
        Self {
            properties,
            beans,
            profile: profile.into(),
        }
    }

    pub fn builder() -> ApplicationContextBuilder {
        ApplicationContextBuilder::default()
    }

    pub fn properties(&self) -> &PropertyStore {
        &self.properties
    }

    pub fn beans(&self) -> &BeanRegistry {
        &self.beans
    }
}

impl ConditionContext for ApplicationContext {
    fn properties_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.properties.keys_with_prefix(prefix)
    }

    fn property_value(&self, name: &str) -> Option<Value> {
        self.properties.get(name).cloned()
    }

    fn find_bean(&self, selector: &BeanSelector) -> Option<BeanHandle> {
        self.beans.find(selector)
    }

    fn active_profile(&self) -> &str {
        &self.profile
    }
}

/// Builder for [`ApplicationContext`]
#[derive(Debug, Default)]
pub struct ApplicationContextBuilder {
    properties: PropertyStore,
    beans: BeanRegistry,
    profile: Option<String>,
}

impl ApplicationContextBuilder {
    /// Merge a property source; later sources win
    pub fn with_source(mut self, source: PropertySource) -> Self {
        self.properties.add_source(source);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.set(key, value);
        self
    }

    pub fn with_bean<T: Any + Send + Sync>(mut self, name: impl Into<String>, bean: T) -> Self {
        self.beans.register(name, bean);
        self
    }

    /// Set the active profile, overriding `profiles.active`
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn build(self) -> ApplicationContext {
        let profile = match self.profile {
            Some(profile) => profile,
            None => self
                .properties
                .get(ACTIVE_PROFILE_PROPERTY)
                .map(|value| value.to_string().trim().to_string())
                .unwrap_or_default(),
        };

        tracing::debug!(
            "built application context: {} properties, {} beans, profile '{}'",
            self.properties.len(),
            self.beans.len(),
            profile
        );

        ApplicationContext {
            properties: self.properties,
            beans: self.beans,
            profile,
        }
    }
}
