//! Context and Configuration Maps
//!
//! Both are plain string-keyed JSON maps. The ledger never looks inside a
//! [`Context`]; a [`ConfigMap`] is only read by the component it configures.

use std::collections::BTreeMap;

use serde_json::Value;

/// Opaque caller-supplied metadata, passed through to plugins untouched.
pub type Context = BTreeMap<String, Value>;

/// Loosely typed configuration for the engine and plugins.
pub type ConfigMap = BTreeMap<String, Value>;

/// Merge `overrides` over `defaults`.
///
/// Shallow: a key present in both takes the override's value wholesale.
/// Keys present in only one side are kept.
pub fn merge_config(defaults: &ConfigMap, overrides: &ConfigMap) -> ConfigMap {
    let mut merged = defaults.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Build a map from `(key, value)` pairs.
///
/// Handy for contexts and configs in call sites and tests.
pub fn map_of<K, V, I>(pairs: I) -> BTreeMap<String, Value>
where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
