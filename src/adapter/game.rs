//! Game Loop Adapter
//!
//! Turns "award points" events from a game loop into ledger updates.
//! Optional debouncing collapses bursts of awards to the same player.
//! Each player gets its own window, so one player's award never swallows
//! another's.

use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::core::context::{ConfigMap, Context};
use crate::core::debounce::Debouncer;
use crate::core::score::{PlayerId, Score};
use crate::engine::{EngineError, ScoringEngine};

/// Config key holding the debounce window in milliseconds.
pub const DEBOUNCE_MS_KEY: &str = "debounce_ms";

/// Invalid adapter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterConfigError {
    /// `debounce_ms` was not a non-negative integer.
    #[error("config key `debounce_ms` must be a non-negative integer, got {value}")]
    InvalidDebounce {
        /// Offending value, as JSON.
        value: String,
    },
}

/// Pass-through adapter for game frameworks.
pub struct GameAdapter<'a> {
    engine: &'a mut ScoringEngine,
    config: ConfigMap,
    debounce_wait: Option<Duration>,
    debouncers: BTreeMap<PlayerId, Debouncer>,
}

impl<'a> GameAdapter<'a> {
    /// Wrap an engine.
    pub fn new(engine: &'a mut ScoringEngine) -> Self {
        Self {
            engine,
            config: ConfigMap::new(),
            debounce_wait: None,
            debouncers: BTreeMap::new(),
        }
    }

    /// Wrap an engine with adapter config.
    ///
    /// Recognized key: `debounce_ms` (non-negative integer, `null` means
    /// off). Anything else is kept for the host to read back through
    /// [`GameAdapter::config`].
    pub fn with_config(
        engine: &'a mut ScoringEngine,
        config: ConfigMap,
    ) -> Result<Self, AdapterConfigError> {
        let debounce_wait = match config.get(DEBOUNCE_MS_KEY) {
            None | Some(Value::Null) => None,
            Some(value) => {
                let ms = value.as_u64().ok_or_else(|| AdapterConfigError::InvalidDebounce {
                    value: value.to_string(),
                })?;
                Some(Duration::from_millis(ms))
            }
        };

        let mut adapter = Self::new(engine);
        adapter.config = config;
        adapter.debounce_wait = debounce_wait;
        Ok(adapter)
    }

    /// Drop awards to a player arriving within `wait` of that player's
    /// last accepted award.
    pub fn with_debounce(mut self, wait: Duration) -> Self {
        self.debounce_wait = Some(wait);
        self.debouncers.clear();
        self
    }

    /// Adapter config.
    pub fn config(&self) -> &ConfigMap {
        &self.config
    }

    /// Configured debounce window, if any.
    pub fn debounce_wait(&self) -> Option<Duration> {
        self.debounce_wait
    }

    /// Award points to a player. Returns the player's total.
    ///
    /// A debounced award is dropped and the unchanged total returned.
    pub fn award_points(
        &mut self,
        player_id: &str,
        points: Score,
        context: Option<&Context>,
    ) -> Result<Score, EngineError> {
        let engine = &mut *self.engine;
        let Some(wait) = self.debounce_wait else {
            return engine.update_score(player_id, points, context);
        };

        let debouncer = self
            .debouncers
            .entry(PlayerId::from(player_id))
            .or_insert_with(|| Debouncer::new(wait));

        match debouncer.call(|| engine.update_score(player_id, points, context)) {
            Some(result) => result,
            None => {
                debug!("Debounced award of {} to {}", points, player_id);
                Ok(engine.get_score(player_id))
            }
        }
    }

    /// Player's current score.
    pub fn get_score(&self, player_id: &str) -> Score {
        self.engine.get_player_score(player_id)
    }
}
