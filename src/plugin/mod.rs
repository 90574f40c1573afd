//! Plugin Module
//!
//! Point transforms applied to every ledger update, in registration order.
//!
//! ## Module Structure
//!
//! - `builtin`: Multiplier, flat bonus and clamp plugins
//! - `closure`: Plugin backed by an ad-hoc function
//!
//! ## Pipeline
//!
//! ```text
//! points ──► P1.process_score ──► P2.process_score ──► ... ──► ledger += result
//! ```
//!
//! Each plugin sees the previous plugin's output. Plugins never write to the
//! ledger themselves.

pub mod builtin;
pub mod closure;

use serde_json::Value;
use thiserror::Error;

use crate::core::context::{ConfigMap, Context};
use crate::core::score::{points_from_value, Score};
use crate::sandbox::{RuleArgs, SandboxError};

pub use builtin::{ClampPlugin, FlatBonusPlugin, MultiplierPlugin};
pub use closure::FnPlugin;

/// A composable point transform.
pub trait Plugin: Send + Sync {
    /// Name used to address this plugin in `execute_plugin`.
    fn name(&self) -> &str;

    /// Transform a point delta before it is committed.
    fn process_score(&self, player_id: &str, points: Score, context: Option<&Context>) -> Score;

    /// Invoke this plugin directly with keyword arguments.
    ///
    /// The default reads `points` (required, cast like a web request's
    /// points so floats round and numeric strings parse) and `player_id`
    /// (optional, empty when absent), runs [`Plugin::process_score`]
    /// without context and returns the transformed points.
    fn execute(&self, args: &RuleArgs) -> Result<Value, SandboxError> {
        let points = points_from_value(args.require("points")?).ok_or_else(|| {
            SandboxError::InvalidArgument {
                argument: "points".to_owned(),
                expected: "a number",
            }
        })?;
        let player_id = args.opt_str("player_id")?.unwrap_or_default();
        Ok(Value::from(self.process_score(player_id, points, None)))
    }
}

/// Invalid plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PluginConfigError {
    /// A config key held a value of the wrong type.
    #[error("config key `{key}` must be an integer")]
    NotAnInteger {
        /// Offending key.
        key: String,
    },
    /// Lower bound above upper bound.
    #[error("invalid bounds: min {min} > max {max}")]
    InvalidBounds {
        /// Configured minimum.
        min: Score,
        /// Configured maximum.
        max: Score,
    },
}

/// Read an integer config value, falling back to `default` when absent.
pub(crate) fn config_score(
    config: &ConfigMap,
    key: &str,
    default: Score,
) -> Result<Score, PluginConfigError> {
    match config.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => value.as_i64().ok_or_else(|| PluginConfigError::NotAnInteger {
            key: key.to_owned(),
        }),
    }
}

/// Run `points` through `plugins` in order.
pub fn apply_plugins(
    plugins: &[Box<dyn Plugin>],
    player_id: &str,
    points: Score,
    context: Option<&Context>,
) -> Score {
    plugins
        .iter()
        .fold(points, |acc, plugin| plugin.process_score(player_id, acc, context))
}
