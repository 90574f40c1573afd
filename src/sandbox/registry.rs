//! Rule Table
//!
//! Maps unique rule names to shared callables.
//! Uses BTreeMap so listings come back sorted by name.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, debug_span, info, warn};

use super::{RuleArgs, SandboxError};

/// A registered rule: keyword arguments in, JSON value out.
///
/// Shared so that [`Sandbox::list_rules`] can hand out invocable copies.
pub type Rule = Arc<dyn Fn(&RuleArgs) -> Result<Value, SandboxError> + Send + Sync>;

/// Registry of named rules.
#[derive(Default, Clone)]
pub struct Sandbox {
    rules: BTreeMap<String, Rule>,
}

impl Sandbox {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule under a new name.
    pub fn add_rule<F>(&mut self, name: impl Into<String>, rule: F) -> Result<(), SandboxError>
    where
        F: Fn(&RuleArgs) -> Result<Value, SandboxError> + Send + Sync + 'static,
    {
        self.insert_rule(name.into(), Arc::new(rule))
    }

    /// Register an already shared rule handle.
    pub fn add_shared_rule(&mut self, name: impl Into<String>, rule: Rule) -> Result<(), SandboxError> {
        self.insert_rule(name.into(), rule)
    }

    fn insert_rule(&mut self, name: String, rule: Rule) -> Result<(), SandboxError> {
        if self.rules.contains_key(&name) {
            warn!("Rejected duplicate rule registration: {}", name);
            return Err(SandboxError::DuplicateRule(name));
        }

        info!("Registered rule {}", name);
        self.rules.insert(name, rule);
        Ok(())
    }

    /// Remove a registered rule.
    pub fn remove_rule(&mut self, name: &str) -> Result<(), SandboxError> {
        match self.rules.remove(name) {
            Some(_) => {
                info!("Removed rule {}", name);
                Ok(())
            }
            None => {
                warn!("Cannot remove unknown rule {}", name);
                Err(SandboxError::UnknownRule(name.to_owned()))
            }
        }
    }

    /// Invoke a rule by name and return its result unchanged.
    pub fn execute_rule(&self, name: &str, args: &RuleArgs) -> Result<Value, SandboxError> {
        let rule = self.rules.get(name).ok_or_else(|| {
            warn!("Cannot execute unknown rule {}", name);
            SandboxError::UnknownRule(name.to_owned())
        })?;

        let _span = debug_span!("rule", rule = %name).entered();
        debug!("Executing rule {} with {} args", name, args.len());
        self.execute(|| rule(args))
    }

    /// Copy of the name → rule table.
    pub fn list_rules(&self) -> BTreeMap<String, Rule> {
        self.rules.clone()
    }

    /// Registered rule names, sorted.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.keys().map(String::as_str).collect()
    }

    /// Check if a rule is registered.
    pub fn contains_rule(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run `f` and return its result.
    ///
    /// Nothing is enforced here: no capability restriction, no quotas.
    /// Rule execution funnels through this call so a real isolation
    /// boundary has one place to live.
    pub fn execute<T>(&self, f: impl FnOnce() -> T) -> T {
        let _span = debug_span!("sandbox.execute").entered();
        f()
    }
}

impl fmt::Debug for Sandbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sandbox")
            .field("rules", &self.rule_names())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
