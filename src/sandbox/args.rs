//! Rule Arguments
//!
//! Keyword arguments handed to rules and to by-name plugin execution.
//! The registry never validates them; rules pull what they need through
//! the typed accessors, which fail with a named error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::SandboxError;
use crate::core::score::Score;

/// Keyword arguments for a rule invocation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleArgs(BTreeMap<String, Value>);

impl RuleArgs {
    /// Empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert or replace an argument.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Raw argument, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Raw argument, failing if absent.
    pub fn require(&self, key: &str) -> Result<&Value, SandboxError> {
        self.0
            .get(key)
            .ok_or_else(|| SandboxError::MissingArgument(key.to_owned()))
    }

    /// Integer argument.
    pub fn i64(&self, key: &str) -> Result<Score, SandboxError> {
        self.require(key)?
            .as_i64()
            .ok_or_else(|| invalid(key, "an integer"))
    }

    /// Numeric argument (integers are widened).
    pub fn f64(&self, key: &str) -> Result<f64, SandboxError> {
        self.require(key)?
            .as_f64()
            .ok_or_else(|| invalid(key, "a number"))
    }

    /// String argument.
    pub fn str(&self, key: &str) -> Result<&str, SandboxError> {
        self.require(key)?
            .as_str()
            .ok_or_else(|| invalid(key, "a string"))
    }

    /// Boolean argument.
    pub fn bool(&self, key: &str) -> Result<bool, SandboxError> {
        self.require(key)?
            .as_bool()
            .ok_or_else(|| invalid(key, "a boolean"))
    }

    /// Optional string argument. Absent and `null` both give `None`.
    pub fn opt_str(&self, key: &str) -> Result<Option<&str>, SandboxError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| invalid(key, "a string")),
        }
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no arguments were given.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate arguments in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

fn invalid(key: &str, expected: &'static str) -> SandboxError {
    SandboxError::InvalidArgument {
        argument: key.to_owned(),
        expected,
    }
}

impl From<BTreeMap<String, Value>> for RuleArgs {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RuleArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
