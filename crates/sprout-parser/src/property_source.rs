//! Property source parsing
//!
//! Turns configuration documents into flat, dotted property keys:
//! - YAML and JSON documents (nested maps flatten to `a.b.c`, sequences to `a[0]`)
//! - `.properties` text (`key=value` or `key: value`)
//! - Environment variables (`SPROUT_WEB_PORT` -> `web.port`)

use crate::error::{ParseError, Result};
use sprout_core::Value;
use std::collections::BTreeMap;

/// A named set of flattened properties
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySource {
    name: String,
    properties: BTreeMap<String, Value>,
}

impl PropertySource {
    /// Create an empty property source
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Create a property source from already flattened entries
    pub fn from_entries<K, V>(name: impl Into<String>, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let mut source = Self::new(name);
        for (key, value) in entries {
            source.insert(key, value);
        }
        source
    }

    /// Parse a YAML document
    pub fn from_yaml_str(name: impl Into<String>, content: &str) -> Result<Self> {
        let mut source = Self::new(name);
        let doc: serde_yaml::Value = serde_yaml::from_str(content)?;
        flatten_yaml("", &doc, &mut source.properties);
        log::info!("loaded {} properties from yaml source '{}'", source.len(), source.name);
        Ok(source)
    }

    /// Parse a JSON document
    pub fn from_json_str(name: impl Into<String>, content: &str) -> Result<Self> {
        let mut source = Self::new(name);
        let doc: serde_json::Value = serde_json::from_str(content)?;
        flatten_json("", &doc, &mut source.properties);
        log::info!("loaded {} properties from json source '{}'", source.len(), source.name);
        Ok(source)
    }

    /// Parse `.properties` text
    ///
    /// Blank lines and lines starting with `#` or `!` are skipped. The key ends
    /// at the first `=` or `:`.
    pub fn from_properties_str(name: impl Into<String>, content: &str) -> Result<Self> {
        let mut source = Self::new(name);

        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let split = line.find(['=', ':']).ok_or_else(|| ParseError::InvalidProperty {
                line: index + 1,
                message: format!("missing '=' or ':' in '{}'", line),
            })?;

            let key = line[..split].trim();
            if key.is_empty() {
                return Err(ParseError::InvalidProperty {
                    line: index + 1,
                    message: "empty key".to_string(),
                });
            }

            source.insert(key, parse_scalar(line[split + 1..].trim()));
        }

        log::info!(
            "loaded {} properties from properties source '{}'",
            source.len(),
            source.name
        );
        Ok(source)
    }

    /// Collect environment variables starting with `prefix`
    pub fn from_env(prefix: &str) -> Self {
        Self::from_vars(prefix, std::env::vars())
    }

    /// Collect `prefix`ed variables from an arbitrary iterator
    ///
    /// The prefix is stripped, the remainder lower-cased and `_` turned into `.`.
    pub fn from_vars(prefix: &str, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut source = Self::new(format!("env:{}", prefix));

        for (key, value) in vars {
            let Some(rest) = key.strip_prefix(prefix) else {
                continue;
            };
            let property = rest.trim_matches('_').to_lowercase().replace('_', ".");
            if property.is_empty() {
                log::warn!("ignoring environment variable '{}': nothing after prefix", key);
                continue;
            }
            source.insert(property, parse_scalar(&value));
        }

        source
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterate properties in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.properties.iter()
    }

    pub fn into_properties(self) -> BTreeMap<String, Value> {
        self.properties
    }
}

/// Type a scalar written as text
///
/// Integers, floats and `true`/`false` become typed values, `[..]`/`{..}` is
/// tried as JSON, a double-quoted string loses its quotes; anything else stays
/// a string.
pub fn parse_scalar(text: &str) -> Value {
    if let Ok(n) = text.parse::<i64>() {
        return Value::Int(n);
    }

    let numeric_start = text
        .trim_start_matches(['-', '+'])
        .starts_with(|c: char| c.is_ascii_digit() || c == '.');
    if numeric_start {
        if let Ok(f) = text.parse::<f64>() {
            return Value::Float(f);
        }
    }

    match text.to_lowercase().as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if text.starts_with('[') || text.starts_with('{') {
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(text) {
            return json_to_value(&json);
        }
    }

    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        return Value::String(text[1..text.len() - 1].to_string());
    }

    Value::String(text.to_string())
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn flatten_yaml(prefix: &str, value: &serde_yaml::Value, out: &mut BTreeMap<String, Value>) {
    match value {
        serde_yaml::Value::Mapping(map) if !map.is_empty() => {
            for (key, child) in map {
                let key = match key {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => format!("{:?}", other),
                };
                flatten_yaml(&join_key(prefix, &key), child, out);
            }
        }
        serde_yaml::Value::Sequence(items) if !items.is_empty() => {
            for (i, child) in items.iter().enumerate() {
                flatten_yaml(&format!("{}[{}]", prefix, i), child, out);
            }
        }
        serde_yaml::Value::Tagged(tagged) => flatten_yaml(prefix, &tagged.value, out),
        leaf if !prefix.is_empty() => {
            out.insert(prefix.to_string(), yaml_to_value(leaf));
        }
        _ => {}
    }
}

fn yaml_to_value(value: &serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(*b),
        serde_yaml::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_yaml::Value::String(s) => Value::String(s.clone()),
        serde_yaml::Value::Sequence(items) => Value::Array(items.iter().map(yaml_to_value).collect()),
        serde_yaml::Value::Mapping(map) => Value::Object(
            map.iter()
                .filter_map(|(k, v)| k.as_str().map(|k| (k.to_string(), yaml_to_value(v))))
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => yaml_to_value(&tagged.value),
    }
}

fn flatten_json(prefix: &str, value: &serde_json::Value, out: &mut BTreeMap<String, Value>) {
    match value {
        serde_json::Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                flatten_json(&join_key(prefix, key), child, out);
            }
        }
        serde_json::Value::Array(items) if !items.is_empty() => {
            for (i, child) in items.iter().enumerate() {
                flatten_json(&format!("{}[{}]", prefix, i), child, out);
            }
        }
        leaf if !prefix.is_empty() => {
            out.insert(prefix.to_string(), json_to_value(leaf));
        }
        _ => {}
    }
}

fn json_to_value(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(items) => Value::Array(items.iter().map(json_to_value).collect()),
        serde_json::Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_value(v)))
                .collect(),
        ),
    }
}
