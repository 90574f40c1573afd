//! Function-backed Plugin

use std::fmt;

use super::Plugin;
use crate::core::context::Context;
use crate::core::score::Score;

type TransformFn = dyn Fn(&str, Score, Option<&Context>) -> Score + Send + Sync;

/// Plugin whose transform is a named closure.
pub struct FnPlugin {
    name: String,
    transform: Box<TransformFn>,
}

impl FnPlugin {
    /// Wrap `transform` under `name`.
    pub fn new<F>(name: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&str, Score, Option<&Context>) -> Score + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            transform: Box::new(transform),
        }
    }
}

impl Plugin for FnPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn process_score(&self, player_id: &str, points: Score, context: Option<&Context>) -> Score {
        (self.transform)(player_id, points, context)
    }
}

impl fmt::Debug for FnPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPlugin").field("name", &self.name).finish()
    }
}
