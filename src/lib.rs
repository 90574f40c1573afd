//! # scored
//!
//! In-memory scoring ledger driven by a plugin pipeline, with a registry of
//! named rules for ad-hoc score computations.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          SCORED                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Score primitives                         │
//! │  ├── score.rs    - Score type, player id, score helpers     │
//! │  ├── context.rs  - Opaque context and config maps           │
//! │  └── debounce.rs - Call debouncing                          │
//! │                                                             │
//! │  plugin/         - Point transforms                         │
//! │  ├── mod.rs      - Plugin trait, pipeline                   │
//! │  ├── builtin.rs  - Multiplier, flat bonus, clamp            │
//! │  └── closure.rs  - Function-backed plugin                   │
//! │                                                             │
//! │  sandbox/        - Named rules                              │
//! │  ├── args.rs     - Keyword arguments                        │
//! │  └── registry.rs - Rule table                               │
//! │                                                             │
//! │  engine/         - The ledger                               │
//! │  ├── config.rs   - Engine config, update policy             │
//! │  ├── ledger.rs   - ScoringEngine                            │
//! │  └── shared.rs   - Lock-guarded handle                      │
//! │                                                             │
//! │  adapter/        - Host pass-throughs (game loop, web)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use scored::{ScoringEngine, MultiplierPlugin, RuleArgs};
//! use serde_json::json;
//!
//! let mut engine = ScoringEngine::new();
//! engine.register_plugin(MultiplierPlugin::new(2));
//!
//! assert_eq!(engine.update_score("p1", 50, None).unwrap(), 100);
//! assert_eq!(engine.update_score("p1", 50, None).unwrap(), 200);
//!
//! engine
//!     .configure_rule("double_points", |args| Ok(json!(args.i64("points")? * 2)))
//!     .unwrap();
//! let doubled = engine
//!     .apply_rule("double_points", &RuleArgs::new().with("points", 5))
//!     .unwrap();
//! assert_eq!(doubled, json!(10));
//! assert_eq!(engine.get_score("p1"), 200);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapter;
pub mod core;
pub mod engine;
pub mod plugin;
pub mod sandbox;

// Re-export commonly used types
pub use crate::core::{Context, ConfigMap, PlayerId, Score};
pub use engine::{EngineConfig, EngineError, ScoringEngine, SharedScoringEngine, UpdatePolicy};
pub use plugin::{ClampPlugin, FlatBonusPlugin, FnPlugin, MultiplierPlugin, Plugin, PluginConfigError};
pub use sandbox::{Rule, RuleArgs, Sandbox, SandboxError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
