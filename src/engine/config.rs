//! Engine Configuration
//!
//! Built three ways: `Default`, environment variables, or a loose
//! [`ConfigMap`] merged over the defaults.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::EngineError;
use crate::core::context::{merge_config, ConfigMap};

/// Environment variable selecting the update policy.
pub const UPDATE_POLICY_ENV: &str = "SCORED_UPDATE_POLICY";

/// What `update_score` does for a player with no ledger entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdatePolicy {
    /// Treat the missing score as zero and create the entry.
    #[default]
    AutoInitialize,
    /// Reject the update until `initialize_score` has been called.
    RequireInitialized,
}

impl FromStr for UpdatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "auto_initialize" => Ok(Self::AutoInitialize),
            "strict" | "require_initialized" => Ok(Self::RequireInitialized),
            other => Err(format!("unknown update policy: {}", other)),
        }
    }
}

impl fmt::Display for UpdatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AutoInitialize => f.write_str("auto_initialize"),
            Self::RequireInitialized => f.write_str("require_initialized"),
        }
    }
}

/// Scoring engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Policy for updates on unseen players.
    pub update_policy: UpdatePolicy,
}

impl EngineConfig {
    /// Strict configuration: updates require a prior `initialize_score`.
    pub fn strict() -> Self {
        Self {
            update_policy: UpdatePolicy::RequireInitialized,
        }
    }

    /// Create config from environment variables.
    ///
    /// An unparseable value is logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(UPDATE_POLICY_ENV) {
            match raw.parse() {
                Ok(policy) => config.update_policy = policy,
                Err(e) => warn!("Ignoring {}: {}", UPDATE_POLICY_ENV, e),
            }
        }
        config
    }

    /// Merge `overrides` over the defaults and deserialize.
    ///
    /// Unknown keys are rejected.
    pub fn from_map(overrides: &ConfigMap) -> Result<Self, EngineError> {
        let defaults = match serde_json::to_value(Self::default())? {
            Value::Object(map) => map.into_iter().collect(),
            _ => ConfigMap::new(),
        };
        let merged = merge_config(&defaults, overrides);
        Ok(serde_json::from_value(Value::Object(merged.into_iter().collect()))?)
    }
}
