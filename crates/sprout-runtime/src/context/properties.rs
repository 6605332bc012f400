//! Flattened property store
//!
//! Properties are kept under dotted keys (`web.server.port`, `hosts[0]`) in
//! key order so prefix queries are a range scan.

use sprout_core::Value;
use sprout_parser::PropertySource;
use std::collections::BTreeMap;
use std::ops::Bound;

/// Merged view over one or more property sources; later sources win
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyStore {
    properties: BTreeMap<String, Value>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge sources in order
    pub fn from_sources(sources: impl IntoIterator<Item = PropertySource>) -> Self {
        let mut store = Self::new();
        for source in sources {
            store.add_source(source);
        }
        store
    }

    /// Merge a source over the existing properties
    pub fn add_source(&mut self, source: PropertySource) -> &mut Self {
        tracing::debug!(
            "merging {} properties from source '{}'",
            source.len(),
            source.name()
        );
        self.properties.extend(source.into_properties());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Keys equal to `prefix` or nested under it (`prefix.x`, `prefix[0]`)
    ///
    /// An empty prefix selects every key.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        if prefix.is_empty() {
            return self.properties.keys().cloned().collect();
        }

        self.properties
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(prefix))
            .filter(|(key, _)| {
                let rest = &key[prefix.len()..];
                rest.is_empty() || rest.starts_with('.') || rest.starts_with('[')
            })
            .map(|(key, _)| key.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> PropertyStore {
        let mut store = PropertyStore::new();
        store
            .set("feature.enabled", true)
            .set("feature.limit", 10)
            .set("features", "x")
            .set("hosts[0]", "a")
            .set("web.port", 8080);
        store
    }

    #[test]
    fn test_prefix_matches_key_boundaries() {
        let store = create_test_store();
        assert_eq!(
            store.keys_with_prefix("feature"),
            vec!["feature.enabled".to_string(), "feature.limit".to_string()]
        );
        assert_eq!(store.keys_with_prefix("feature.enabled"), vec!["feature.enabled".to_string()]);
        assert_eq!(store.keys_with_prefix("hosts"), vec!["hosts[0]".to_string()]);
        assert!(store.keys_with_prefix("feat").is_empty());
        assert!(store.keys_with_prefix("missing").is_empty());
        assert_eq!(store.keys_with_prefix("").len(), 5);
    }

    #[test]
    fn test_later_sources_win() {
        let base = PropertySource::from_entries("base", [("threads", 4), ("queue", 16)]);
        let over = PropertySource::from_entries("override", [("threads", 8)]);
        let store = PropertyStore::from_sources([base, over]);

        assert_eq!(store.get("threads"), Some(&Value::Int(8)));
        assert_eq!(store.get("queue"), Some(&Value::Int(16)));
        assert!(store.contains("queue"));
        assert_eq!(store.len(), 2);
    }
}
