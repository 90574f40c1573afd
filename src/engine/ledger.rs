//! Scoring Ledger
//!
//! ## Update Path
//!
//! ```text
//! update_score(player, points, ctx)
//!   │
//!   ├─ policy check (unseen player: zero, or UninitializedPlayer)
//!   ├─ points → plugin 1 → plugin 2 → ... (registration order)
//!   └─ total = previous + processed (saturating), stored, returned
//! ```
//!
//! Rules and by-name plugin execution never write to the ledger, so a
//! failure on those paths leaves every score untouched.
//!
//! Uses BTreeMap so snapshots iterate in player order.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::{EngineConfig, EngineError, UpdatePolicy};
use crate::core::context::Context;
use crate::core::score::{PlayerId, Score, ZERO_SCORE};
use crate::plugin::{apply_plugins, Plugin};
use crate::sandbox::{Rule, RuleArgs, Sandbox, SandboxError};

/// Main engine for scoring operations.
pub struct ScoringEngine {
    /// Engine configuration.
    config: EngineConfig,
    /// Player → running total.
    scores: BTreeMap<PlayerId, Score>,
    /// Plugins, in registration order.
    plugins: Vec<Box<dyn Plugin>>,
    /// Named rules.
    sandbox: Sandbox,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_sandbox(config, Sandbox::new())
    }

    /// Create an engine around an existing rule registry.
    pub fn with_sandbox(config: EngineConfig, sandbox: Sandbox) -> Self {
        debug!("Creating scoring engine (update policy: {})", config.update_policy);
        Self {
            config,
            scores: BTreeMap::new(),
            plugins: Vec::new(),
            sandbox,
        }
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // =========================================================================
    // Ledger
    // =========================================================================

    /// Apply `points` through the plugin pipeline and add the result to the
    /// player's total.
    ///
    /// Returns the new total.
    pub fn update_score(
        &mut self,
        player_id: &str,
        points: Score,
        context: Option<&Context>,
    ) -> Result<Score, EngineError> {
        let known = self.scores.contains_key(player_id);
        if !known && self.config.update_policy == UpdatePolicy::RequireInitialized {
            warn!("Rejected update for uninitialized player {}", player_id);
            return Err(EngineError::UninitializedPlayer(player_id.to_owned()));
        }

        let processed = apply_plugins(&self.plugins, player_id, points, context);

        let total = match self.scores.get_mut(player_id) {
            Some(score) => {
                *score = score.saturating_add(processed);
                *score
            }
            None => {
                let total = ZERO_SCORE.saturating_add(processed);
                self.scores.insert(PlayerId::from(player_id), total);
                total
            }
        };

        debug!(
            "Player {} scored {} ({} after plugins), total {}",
            player_id, points, processed, total
        );
        Ok(total)
    }

    /// Set a player's score, creating or overwriting the entry.
    pub fn initialize_score(&mut self, player_id: &str, value: Score) {
        debug!("Initializing player {} at {}", player_id, value);
        self.scores.insert(PlayerId::from(player_id), value);
    }

    /// Current score, or zero for an unknown player.
    pub fn get_score(&self, player_id: &str) -> Score {
        self.scores.get(player_id).copied().unwrap_or(ZERO_SCORE)
    }

    /// Alias of [`ScoringEngine::get_score`].
    pub fn get_player_score(&self, player_id: &str) -> Score {
        self.get_score(player_id)
    }

    /// Snapshot of every score. Changing it never affects the ledger.
    pub fn get_scores(&self) -> BTreeMap<PlayerId, Score> {
        self.scores.clone()
    }

    /// Zero one player's score. Unknown players are left alone.
    pub fn reset_score(&mut self, player_id: &str) {
        if let Some(score) = self.scores.get_mut(player_id) {
            *score = ZERO_SCORE;
            debug!("Reset score for player {}", player_id);
        }
    }

    /// Alias of [`ScoringEngine::reset_score`].
    pub fn reset_player_score(&mut self, player_id: &str) {
        self.reset_score(player_id)
    }

    /// Drop every ledger entry.
    pub fn reset_scores(&mut self) {
        info!("Resetting all scores ({} players)", self.scores.len());
        self.scores.clear();
    }

    /// Check if the player has a ledger entry.
    pub fn has_player(&self, player_id: &str) -> bool {
        self.scores.contains_key(player_id)
    }

    /// Number of ledger entries.
    pub fn player_count(&self) -> usize {
        self.scores.len()
    }

    // =========================================================================
    // Plugins
    // =========================================================================

    /// Append a plugin to the pipeline.
    pub fn register_plugin<P: Plugin + 'static>(&mut self, plugin: P) {
        self.register_boxed_plugin(Box::new(plugin));
    }

    /// Append an already boxed plugin to the pipeline.
    pub fn register_boxed_plugin(&mut self, plugin: Box<dyn Plugin>) {
        info!(
            "Registered plugin {} at position {}",
            plugin.name(),
            self.plugins.len()
        );
        self.plugins.push(plugin);
    }

    /// Plugin names in pipeline order.
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Invoke the first plugin named `name` directly.
    ///
    /// Runs the plugin's `execute`, not the update pipeline: the ledger is
    /// not touched.
    pub fn execute_plugin(&self, name: &str, args: &RuleArgs) -> Result<Value, EngineError> {
        let plugin = self
            .plugins
            .iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| {
                warn!("Cannot execute unknown plugin {}", name);
                EngineError::UnknownPlugin(name.to_owned())
            })?;

        debug!("Executing plugin {}", name);
        Ok(self.sandbox.execute(|| plugin.execute(args))?)
    }

    // =========================================================================
    // Rules
    // =========================================================================

    /// Register a named rule.
    pub fn configure_rule<F>(&mut self, name: impl Into<String>, rule: F) -> Result<(), EngineError>
    where
        F: Fn(&RuleArgs) -> Result<Value, SandboxError> + Send + Sync + 'static,
    {
        Ok(self.sandbox.add_rule(name, rule)?)
    }

    /// Invoke a named rule. The ledger is not touched.
    pub fn apply_rule(&self, name: &str, args: &RuleArgs) -> Result<Value, EngineError> {
        Ok(self.sandbox.execute_rule(name, args)?)
    }

    /// Remove a named rule.
    pub fn remove_rule(&mut self, name: &str) -> Result<(), EngineError> {
        Ok(self.sandbox.remove_rule(name)?)
    }

    /// Copy of the name → rule table.
    pub fn list_rules(&self) -> BTreeMap<String, Rule> {
        self.sandbox.list_rules()
    }

    /// Rule registry.
    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    /// Mutable rule registry.
    pub fn sandbox_mut(&mut self) -> &mut Sandbox {
        &mut self.sandbox
    }
}

impl std::fmt::Debug for ScoringEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringEngine")
            .field("config", &self.config)
            .field("scores", &self.scores)
            .field("plugins", &self.plugin_names())
            .field("sandbox", &self.sandbox)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::map_of;
    use crate::plugin::{FlatBonusPlugin, FnPlugin, MultiplierPlugin};
    use proptest::prelude::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    fn engine() -> ScoringEngine {
        ScoringEngine::new()
    }

    /// Records every `execute` call it receives.
    struct RecordingPlugin {
        name: String,
        calls: Arc<Mutex<Vec<RuleArgs>>>,
    }

    impl Plugin for RecordingPlugin {
        fn name(&self) -> &str {
            &self.name
        }

        fn process_score(&self, _player_id: &str, points: Score, _context: Option<&Context>) -> Score {
            points
        }

        fn execute(&self, args: &RuleArgs) -> Result<Value, SandboxError> {
            self.calls.lock().unwrap().push(args.clone());
            Ok(json!("executed"))
        }
    }

    #[test]
    fn test_init() {
        let engine = engine();
        assert!(engine.get_scores().is_empty());
        assert!(engine.plugin_names().is_empty());
        assert!(engine.sandbox().is_empty());
    }

    #[test]
    fn test_update_score() {
        let mut engine = engine();

        assert_eq!(engine.update_score("player1", 10, None).unwrap(), 10);
        assert_eq!(engine.get_player_score("player1"), 10);

        assert_eq!(engine.update_score("player1", 5, None).unwrap(), 15);
        assert_eq!(engine.update_score("player1", -20, None).unwrap(), -5);
    }

    #[test]
    fn test_get_scores() {
        let mut engine = engine();
        engine.update_score("player1", 10, None).unwrap();
        engine.update_score("player2", 20, None).unwrap();

        let scores = engine.get_scores();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores["player1"], 10);
        assert_eq!(scores["player2"], 20);
    }

    #[test]
    fn test_get_scores_is_snapshot() {
        let mut engine = engine();
        engine.update_score("player1", 10, None).unwrap();

        let mut scores = engine.get_scores();
        scores.insert(PlayerId::from("player1"), 999);
        scores.insert(PlayerId::from("intruder"), 1);

        assert_eq!(engine.get_score("player1"), 10);
        assert_eq!(engine.get_score("intruder"), 0);
        assert_eq!(engine.player_count(), 1);
    }

    #[test]
    fn test_get_player_score_unknown_is_zero() {
        let engine = engine();
        assert_eq!(engine.get_player_score("nobody"), 0);
        assert!(!engine.has_player("nobody"));
    }

    #[test]
    fn test_initialize_score() {
        let mut engine = engine();
        engine.initialize_score("player1", 10);
        assert_eq!(engine.get_score("player1"), 10);

        // Overwrites
        engine.initialize_score("player1", 3);
        assert_eq!(engine.get_score("player1"), 3);
    }

    #[test]
    fn test_reset_scores() {
        let mut engine = engine();
        engine.update_score("player1", 10, None).unwrap();
        engine.update_score("player2", 20, None).unwrap();

        engine.reset_scores();

        assert!(engine.get_scores().is_empty());
        assert_eq!(engine.get_player_score("player1"), 0);
        assert_eq!(engine.get_player_score("player2"), 0);
    }

    #[test]
    fn test_reset_player_score() {
        let mut engine = engine();
        engine.update_score("player1", 10, None).unwrap();
        engine.update_score("player2", 20, None).unwrap();

        engine.reset_player_score("player1");

        assert_eq!(engine.get_player_score("player1"), 0);
        assert_eq!(engine.get_player_score("player2"), 20);
        // Entry kept, just zeroed
        assert!(engine.has_player("player1"));
    }

    #[test]
    fn test_reset_unknown_player_is_noop() {
        let mut engine = engine();
        engine.update_score("player1", 10, None).unwrap();

        engine.reset_score("ghost");

        assert!(!engine.has_player("ghost"));
        assert_eq!(engine.player_count(), 1);
    }

    #[test]
    fn test_engine_with_multiplier_plugin() {
        let mut engine = engine();
        engine.register_plugin(MultiplierPlugin::new(2));

        assert_eq!(engine.update_score("p1", 50, None).unwrap(), 100);
        assert_eq!(engine.update_score("p1", 50, None).unwrap(), 200);
    }

    #[test]
    fn test_engine_with_multiple_plugins() {
        let mut engine = engine();
        engine.register_plugin(MultiplierPlugin::new(2).with_name("double"));
        engine.register_plugin(MultiplierPlugin::new(3).with_name("triple"));

        // 50 → 100 → 300
        assert_eq!(engine.update_score("p1", 50, None).unwrap(), 300);
        assert_eq!(engine.plugin_names(), vec!["double", "triple"]);
    }

    #[test]
    fn test_plugin_order_matters() {
        let mut bonus_first = engine();
        bonus_first.register_plugin(FlatBonusPlugin::new(1));
        bonus_first.register_plugin(MultiplierPlugin::new(10));

        let mut multiply_first = engine();
        multiply_first.register_plugin(MultiplierPlugin::new(10));
        multiply_first.register_plugin(FlatBonusPlugin::new(1));

        assert_eq!(bonus_first.update_score("p1", 5, None).unwrap(), 60);
        assert_eq!(multiply_first.update_score("p1", 5, None).unwrap(), 51);
    }

    #[test]
    fn test_context_reaches_plugins() {
        let mut engine = engine();
        engine.register_plugin(FnPlugin::new("combo", |_, points, ctx| {
            let combo = ctx
                .and_then(|c| c.get("combo"))
                .and_then(Value::as_i64)
                .unwrap_or(1);
            points * combo
        }));

        let ctx = map_of([("combo", 4)]);
        assert_eq!(engine.update_score("p1", 5, Some(&ctx)).unwrap(), 20);
        assert_eq!(engine.update_score("p1", 5, None).unwrap(), 25);
    }

    #[test]
    fn test_duplicate_plugins_allowed() {
        let mut engine = engine();
        engine.register_plugin(MultiplierPlugin::new(2));
        engine.register_plugin(MultiplierPlugin::new(2));

        assert_eq!(engine.update_score("p1", 1, None).unwrap(), 4);
    }

    #[test]
    fn test_update_saturates() {
        let mut engine = engine();
        engine.initialize_score("p1", Score::MAX - 1);
        assert_eq!(engine.update_score("p1", 10, None).unwrap(), Score::MAX);
    }

    #[test]
    fn test_config_reports_policy() {
        assert_eq!(engine().config().update_policy, UpdatePolicy::AutoInitialize);
        let strict = ScoringEngine::with_config(EngineConfig::strict());
        assert_eq!(strict.config().update_policy, UpdatePolicy::RequireInitialized);
    }

    #[test]
    fn test_strict_policy_rejects_uninitialized_player() {
        let mut engine = ScoringEngine::with_config(EngineConfig::strict());
        engine.register_plugin(MultiplierPlugin::new(2));

        let result = engine.update_score("player2", 5, None);
        assert!(matches!(result, Err(EngineError::UninitializedPlayer(ref id)) if id == "player2"));
        assert!(!engine.has_player("player2"));
    }

    #[test]
    fn test_strict_policy_after_initialize() {
        let mut engine = ScoringEngine::with_config(EngineConfig::strict());
        engine.initialize_score("player1", 5);

        assert_eq!(engine.update_score("player1", 15, None).unwrap(), 20);
        assert_eq!(engine.get_score("player1"), 20);
    }

    #[test]
    fn test_strict_policy_reset_scores_requires_reinit() {
        let mut engine = ScoringEngine::with_config(EngineConfig::strict());
        engine.initialize_score("player1", 20);
        engine.reset_score("player1");
        assert_eq!(engine.get_score("player1"), 0);
        // Zeroed entry still counts as initialized
        assert!(engine.update_score("player1", 1, None).is_ok());

        engine.reset_scores();
        assert!(engine.update_score("player1", 1, None).is_err());
    }

    #[test]
    fn test_configure_and_apply_rule() {
        let mut engine = engine();
        engine.update_score("p1", 7, None).unwrap();
        engine
            .configure_rule("double_points", |args| Ok(json!(args.i64("points")? * 2)))
            .unwrap();

        let result = engine
            .apply_rule("double_points", &RuleArgs::new().with("points", 5))
            .unwrap();

        assert_eq!(result, json!(10));
        assert_eq!(engine.get_scores(), BTreeMap::from([(PlayerId::from("p1"), 7)]));
    }

    #[test]
    fn test_rule_errors_surface_through_engine() {
        let mut engine = engine();
        engine.configure_rule("r", |_| Ok(Value::Null)).unwrap();

        assert!(matches!(
            engine.configure_rule("r", |_| Ok(Value::Null)),
            Err(EngineError::Sandbox(SandboxError::DuplicateRule(_)))
        ));
        assert!(matches!(
            engine.apply_rule("missing", &RuleArgs::new()),
            Err(EngineError::Sandbox(SandboxError::UnknownRule(_)))
        ));

        engine.remove_rule("r").unwrap();
        assert!(matches!(
            engine.remove_rule("r"),
            Err(EngineError::Sandbox(SandboxError::UnknownRule(_)))
        ));
        assert!(engine.list_rules().is_empty());
    }

    #[test]
    fn test_register_and_execute_plugin() {
        let mut engine = engine();
        let calls = Arc::new(Mutex::new(Vec::new()));
        engine.register_plugin(RecordingPlugin {
            name: "bonus_plugin".into(),
            calls: Arc::clone(&calls),
        });

        let args = RuleArgs::new().with("points", 5);
        let result = engine.execute_plugin("bonus_plugin", &args).unwrap();

        assert_eq!(result, json!("executed"));
        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], args);
        assert!(engine.get_scores().is_empty());
    }

    #[test]
    fn test_execute_builtin_plugin_by_name() {
        let mut engine = engine();
        engine.register_plugin(MultiplierPlugin::new(4));

        let result = engine
            .execute_plugin("multiplier", &RuleArgs::new().with("points", 5))
            .unwrap();
        assert_eq!(result, json!(20));
    }

    #[test]
    fn test_execute_unknown_plugin() {
        let mut engine = engine();
        engine.update_score("p1", 1, None).unwrap();

        let result = engine.execute_plugin("nope", &RuleArgs::new());
        assert!(matches!(result, Err(EngineError::UnknownPlugin(ref n)) if n == "nope"));
        assert_eq!(engine.get_score("p1"), 1);
    }

    #[test]
    fn test_rule_added_through_sandbox_mut() {
        let mut engine = engine();
        engine
            .sandbox_mut()
            .add_rule("triple", |args| Ok(json!(args.i64("points")? * 3)))
            .unwrap();

        assert_eq!(engine.list_rules().len(), 1);
        let result = engine.apply_rule("triple", &RuleArgs::new().with("points", 4)).unwrap();
        assert_eq!(result, json!(12));
    }

    #[test]
    fn test_execute_plugin_rounds_float_points() {
        let mut engine = engine();
        engine.register_plugin(MultiplierPlugin::new(2));

        let result = engine.execute_plugin("multiplier", &RuleArgs::new().with("points", 5.0));
        assert_eq!(result.unwrap(), json!(10));
        assert!(engine.get_scores().is_empty());
    }

    #[test]
    fn test_failed_plugin_execute_leaves_ledger() {
        let mut engine = engine();
        engine.register_plugin(MultiplierPlugin::new(2));
        engine.update_score("p1", 3, None).unwrap();

        let result = engine.execute_plugin("multiplier", &RuleArgs::new().with("points", "x"));
        assert!(matches!(
            result,
            Err(EngineError::Sandbox(SandboxError::InvalidArgument { .. }))
        ));
        assert_eq!(engine.get_scores(), BTreeMap::from([(PlayerId::from("p1"), 6)]));
    }

    proptest! {
        #[test]
        fn prop_score_is_running_sum(deltas in prop::collection::vec(-1_000_000i64..1_000_000, 0..64)) {
            let mut engine = ScoringEngine::new();
            let mut expected = 0i64;
            for delta in &deltas {
                expected += delta;
                prop_assert_eq!(engine.update_score("p", *delta, None).unwrap(), expected);
            }
            prop_assert_eq!(engine.get_player_score("p"), expected);
        }

        #[test]
        fn prop_reset_player_isolated(a in -1_000i64..1_000, b in -1_000i64..1_000) {
            let mut engine = ScoringEngine::new();
            engine.update_score("a", a, None).unwrap();
            engine.update_score("b", b, None).unwrap();

            engine.reset_player_score("a");

            prop_assert_eq!(engine.get_score("a"), 0);
            prop_assert_eq!(engine.get_score("b"), b);
        }
    }
}
