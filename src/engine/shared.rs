//! Shared Scoring Engine
//!
//! The engine itself assumes a single caller. Hosts that touch it from
//! several tasks go through this handle instead: one RwLock guards the
//! ledger, the plugin pipeline and the rule table together.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{EngineError, ScoringEngine};
use crate::core::context::Context;
use crate::core::score::{PlayerId, Score};
use crate::plugin::Plugin;
use crate::sandbox::{RuleArgs, SandboxError};

/// Cloneable, lock-guarded engine handle. Clones share state.
#[derive(Clone, Debug, Default)]
pub struct SharedScoringEngine {
    inner: Arc<RwLock<ScoringEngine>>,
}

impl SharedScoringEngine {
    /// Wrap an engine.
    pub fn new(engine: ScoringEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    /// Read access for several calls under one lock.
    pub async fn read(&self) -> RwLockReadGuard<'_, ScoringEngine> {
        self.inner.read().await
    }

    /// Write access for several calls under one lock.
    pub async fn write(&self) -> RwLockWriteGuard<'_, ScoringEngine> {
        self.inner.write().await
    }

    /// See [`ScoringEngine::update_score`].
    pub async fn update_score(
        &self,
        player_id: &str,
        points: Score,
        context: Option<&Context>,
    ) -> Result<Score, EngineError> {
        self.inner.write().await.update_score(player_id, points, context)
    }

    /// See [`ScoringEngine::initialize_score`].
    pub async fn initialize_score(&self, player_id: &str, value: Score) {
        self.inner.write().await.initialize_score(player_id, value)
    }

    /// See [`ScoringEngine::get_score`].
    pub async fn get_score(&self, player_id: &str) -> Score {
        self.inner.read().await.get_score(player_id)
    }

    /// See [`ScoringEngine::get_scores`].
    pub async fn get_scores(&self) -> BTreeMap<PlayerId, Score> {
        self.inner.read().await.get_scores()
    }

    /// See [`ScoringEngine::reset_score`].
    pub async fn reset_score(&self, player_id: &str) {
        self.inner.write().await.reset_score(player_id)
    }

    /// See [`ScoringEngine::reset_scores`].
    pub async fn reset_scores(&self) {
        self.inner.write().await.reset_scores()
    }

    /// See [`ScoringEngine::register_plugin`].
    pub async fn register_plugin<P: Plugin + 'static>(&self, plugin: P) {
        self.inner.write().await.register_plugin(plugin)
    }

    /// See [`ScoringEngine::execute_plugin`].
    pub async fn execute_plugin(&self, name: &str, args: &RuleArgs) -> Result<Value, EngineError> {
        self.inner.read().await.execute_plugin(name, args)
    }

    /// See [`ScoringEngine::configure_rule`].
    pub async fn configure_rule<F>(&self, name: impl Into<String>, rule: F) -> Result<(), EngineError>
    where
        F: Fn(&RuleArgs) -> Result<Value, SandboxError> + Send + Sync + 'static,
    {
        self.inner.write().await.configure_rule(name, rule)
    }

    /// See [`ScoringEngine::apply_rule`].
    pub async fn apply_rule(&self, name: &str, args: &RuleArgs) -> Result<Value, EngineError> {
        self.inner.read().await.apply_rule(name, args)
    }
}

impl From<ScoringEngine> for SharedScoringEngine {
    fn from(engine: ScoringEngine) -> Self {
        Self::new(engine)
    }
}
