//! Host Adapters
//!
//! Thin callers that translate a host's event model into ledger calls.
//! They add no scoring behavior of their own.
//!
//! - `game`: award-points calls from a game loop, optionally debounced
//! - `web`: tagged JSON requests from a web host

pub mod game;
pub mod web;

pub use game::{AdapterConfigError, GameAdapter};
pub use web::{ErrorCode, ErrorInfo, ScoreRequest, ScoreResponse, WebAdapter};
