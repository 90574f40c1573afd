//! Built-in Plugins
//!
//! Each plugin holds only its own configuration. Arithmetic saturates so a
//! runaway factor can't wrap a score negative.

use serde::{Deserialize, Serialize};

use super::{config_score, Plugin, PluginConfigError};
use crate::core::context::{ConfigMap, Context};
use crate::core::score::{clamp_score, Score};

// =============================================================================
// MULTIPLIER
// =============================================================================

/// Scales every delta by a fixed factor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiplierPlugin {
    /// Plugin name.
    pub name: String,
    /// Scale factor.
    pub factor: Score,
}

impl MultiplierPlugin {
    /// Default plugin name.
    pub const NAME: &'static str = "multiplier";

    /// Create with the default name.
    pub fn new(factor: Score) -> Self {
        Self {
            name: Self::NAME.to_owned(),
            factor,
        }
    }

    /// Build from config key `factor` (default 1).
    pub fn from_config(config: &ConfigMap) -> Result<Self, PluginConfigError> {
        Ok(Self::new(config_score(config, "factor", 1)?))
    }

    /// Rename, so several multipliers can be told apart.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Plugin for MultiplierPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn process_score(&self, _player_id: &str, points: Score, _context: Option<&Context>) -> Score {
        points.saturating_mul(self.factor)
    }
}

// =============================================================================
// FLAT BONUS
// =============================================================================

/// Adds a fixed bonus to every delta.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatBonusPlugin {
    /// Plugin name.
    pub name: String,
    /// Points added per update.
    pub bonus: Score,
}

impl FlatBonusPlugin {
    /// Default plugin name.
    pub const NAME: &'static str = "flat_bonus";

    /// Create with the default name.
    pub fn new(bonus: Score) -> Self {
        Self {
            name: Self::NAME.to_owned(),
            bonus,
        }
    }

    /// Build from config key `bonus` (default 0).
    pub fn from_config(config: &ConfigMap) -> Result<Self, PluginConfigError> {
        Ok(Self::new(config_score(config, "bonus", 0)?))
    }

    /// Rename.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Plugin for FlatBonusPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn process_score(&self, _player_id: &str, points: Score, _context: Option<&Context>) -> Score {
        points.saturating_add(self.bonus)
    }
}

// =============================================================================
// CLAMP
// =============================================================================

/// Caps every delta into `[min, max]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClampPlugin {
    /// Plugin name.
    pub name: String,
    /// Smallest delta let through.
    pub min: Score,
    /// Largest delta let through.
    pub max: Score,
}

impl ClampPlugin {
    /// Default plugin name.
    pub const NAME: &'static str = "clamp";

    /// Create with the default name. Fails if `min > max`.
    pub fn new(min: Score, max: Score) -> Result<Self, PluginConfigError> {
        if min > max {
            return Err(PluginConfigError::InvalidBounds { min, max });
        }
        Ok(Self {
            name: Self::NAME.to_owned(),
            min,
            max,
        })
    }

    /// Build from config keys `min` / `max` (defaults: the full score range).
    pub fn from_config(config: &ConfigMap) -> Result<Self, PluginConfigError> {
        let min = config_score(config, "min", Score::MIN)?;
        let max = config_score(config, "max", Score::MAX)?;
        Self::new(min, max)
    }

    /// Rename.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Plugin for ClampPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn process_score(&self, _player_id: &str, points: Score, _context: Option<&Context>) -> Score {
        clamp_score(points, self.min, self.max)
    }
}

// =============================================================================
// TESTS
// =============================================================================
