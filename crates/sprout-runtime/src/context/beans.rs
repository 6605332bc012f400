//! Bean registry
//!
//! Holds already-registered components as type-erased handles. Beans are
//! looked up by a [`BeanSelector`]: a name, a type token, or both.

use std::any::{type_name, Any};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Shared, type-erased bean instance
pub type BeanHandle = Arc<dyn Any + Send + Sync>;

/// Identifies a bean by name and/or type token
///
/// The string form is `name`, `type:name` or `type:`. Type tokens may contain
/// `::` path separators; only a single `:` separates the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BeanSelector {
    type_name: Option<String>,
    name: Option<String>,
}

impl BeanSelector {
    /// Select by bean name
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            type_name: None,
            name: Some(name.into()),
        }
    }

    /// Select by Rust type
    pub fn of_type<T: ?Sized + 'static>() -> Self {
        Self {
            type_name: Some(type_name::<T>().to_string()),
            name: None,
        }
    }

    /// Select by an explicit type token
    pub fn type_token(token: impl Into<String>) -> Self {
        Self {
            type_name: Some(token.into()),
            name: None,
        }
    }

    /// Narrow the selector to a bean name as well
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Parse the `type:name` string form
    pub fn parse(selector: &str) -> Self {
        // ':' is ASCII, so byte neighbours are char neighbours
        let bytes = selector.as_bytes();
        let split = (0..bytes.len()).rev().find(|&i| {
            bytes[i] == b':'
                && (i == 0 || bytes[i - 1] != b':')
                && bytes.get(i + 1) != Some(&b':')
        });

        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        match split {
            Some(byte) => Self {
                type_name: non_empty(&selector[..byte]),
                name: non_empty(&selector[byte + 1..]),
            },
            None => Self {
                type_name: None,
                name: non_empty(selector),
            },
        }
    }

    pub fn bean_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// A selector with neither part selects nothing
    pub fn is_empty(&self) -> bool {
        self.type_name.is_none() && self.name.is_none()
    }

    fn matches(&self, bean: &BeanDefinition) -> bool {
        if self.is_empty() {
            return false;
        }
        let name_ok = self.name.as_deref().map_or(true, |n| n == bean.name);
        let type_ok = self.type_name.as_deref().map_or(true, |t| t == bean.type_name);
        name_ok && type_ok
    }
}

impl fmt::Display for BeanSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.type_name, &self.name) {
            (Some(t), Some(n)) => write!(f, "{}:{}", t, n),
            (Some(t), None) => write!(f, "{}:", t),
            (None, Some(n)) => write!(f, "{}", n),
            (None, None) => Ok(()),
        }
    }
}

impl FromStr for BeanSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for BeanSelector {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for BeanSelector {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

/// A registered bean
#[derive(Clone)]
pub struct BeanDefinition {
    name: String,
    type_name: &'static str,
    instance: BeanHandle,
}

impl BeanDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn instance(&self) -> &BeanHandle {
        &self.instance
    }
}

impl fmt::Debug for BeanDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanDefinition")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Registered beans in registration order
#[derive(Debug, Clone, Default)]
pub struct BeanRegistry {
    beans: Vec<BeanDefinition>,
}

impl BeanRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bean under `name`; an existing bean with the same name is replaced
    pub fn register<T: Any + Send + Sync>(&mut self, name: impl Into<String>, bean: T) -> &mut Self {
        self.register_shared(name, Arc::new(bean))
    }

    /// Register an already shared bean
    pub fn register_shared<T: Any + Send + Sync>(
        &mut self,
        name: impl Into<String>,
        bean: Arc<T>,
    ) -> &mut Self {
        let definition = BeanDefinition {
            name: name.into(),
            type_name: type_name::<T>(),
            instance: bean,
        };

        if let Some(existing) = self.beans.iter_mut().find(|b| b.name == definition.name) {
            tracing::debug!(
                "replacing bean '{}' ({} -> {})",
                existing.name,
                existing.type_name,
                definition.type_name
            );
            *existing = definition;
        } else {
            tracing::debug!("registered bean '{}' ({})", definition.name, definition.type_name);
            self.beans.push(definition);
        }
        self
    }

    /// Resolve the single bean matching `selector`
    ///
    /// No match and several matches both resolve to `None`.
    pub fn find(&self, selector: &BeanSelector) -> Option<BeanHandle> {
        let mut candidates = self.beans.iter().filter(|b| selector.matches(b));
        let first = candidates.next()?;

        if candidates.next().is_some() {
            tracing::warn!("bean selector '{}' is ambiguous", selector);
            return None;
        }
        Some(Arc::clone(&first.instance))
    }

    /// Resolve and downcast
    pub fn get<T: Any + Send + Sync>(&self, selector: &BeanSelector) -> Option<Arc<T>> {
        self.find(selector)?.downcast::<T>().ok()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.beans.iter().map(|b| b.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.beans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beans.is_empty()
    }
}
