//! Core scoring primitives.
//!
//! Score type and player id, the opaque context/config maps, and the small
//! helpers shared by the engine, plugins and adapters.

pub mod score;
pub mod context;
pub mod debounce;

// Re-export core types
pub use score::{
    Score, PlayerId, ZERO_SCORE,
    validate_score, clamp_score, format_score, points_from_f64, points_from_value,
};
pub use context::{Context, ConfigMap, merge_config, map_of};
pub use debounce::Debouncer;
