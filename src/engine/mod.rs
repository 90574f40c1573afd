//! Scoring Engine Module
//!
//! Owns the player → score ledger and the plugin pipeline, and delegates
//! named rules to an embedded [`Sandbox`](crate::sandbox::Sandbox).
//!
//! ## Module Structure
//!
//! - `config`: Engine configuration and update policy
//! - `ledger`: The [`ScoringEngine`] itself
//! - `shared`: Lock-guarded handle for concurrent hosts

pub mod config;
pub mod ledger;
pub mod shared;

use thiserror::Error;

use crate::sandbox::SandboxError;

pub use config::{EngineConfig, UpdatePolicy};
pub use ledger::ScoringEngine;
pub use shared::SharedScoringEngine;

/// Scoring engine errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Strict policy: the player was never initialized.
    #[error("player {0} has no score; call initialize_score first")]
    UninitializedPlayer(String),
    /// No registered plugin has this name.
    #[error("unknown plugin: {0}")]
    UnknownPlugin(String),
    /// Rule registry error.
    #[error(transparent)]
    Sandbox(#[from] SandboxError),
    /// Configuration could not be deserialized.
    #[error("invalid engine config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}
