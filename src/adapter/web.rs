//! Web Request Adapter
//!
//! Request/response messages for a web host, mirroring the route set
//! `GET /scores`, `GET /scores/{id}` and `POST /scores/{id}`.
//! All messages are JSON with a `type` tag. No HTTP server lives here;
//! the host routes its requests into [`WebAdapter::handle`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::context::Context;
use crate::core::score::{points_from_value, PlayerId, Score};
use crate::engine::{EngineError, SharedScoringEngine};

// =============================================================================
// REQUESTS
// =============================================================================

/// Requests a web host forwards to the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScoreRequest {
    /// Every score.
    GetScores,

    /// One player's score.
    GetPlayerScore {
        /// Player to look up.
        player_id: String,
    },

    /// Apply a delta to a player.
    UpdateScore {
        /// Player to update.
        player_id: String,
        /// Delta. Integers, floats (rounded) and numeric strings accepted.
        points: Value,
        /// Context forwarded to plugins.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<Context>,
    },
}

impl ScoreRequest {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

// =============================================================================
// RESPONSES
// =============================================================================

/// Responses sent back to the web host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScoreResponse {
    /// Snapshot of every score.
    Scores {
        /// Player → score.
        scores: BTreeMap<PlayerId, Score>,
    },

    /// One player's score.
    PlayerScore {
        /// Player.
        player_id: String,
        /// Current (or new) total.
        score: Score,
    },

    /// Request failed.
    Error(ErrorInfo),
}

impl ScoreResponse {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Error(ErrorInfo {
            code,
            message: message.into(),
        })
    }
}

/// Error details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
}

/// Error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Request could not be parsed.
    InvalidRequest,
    /// Points were not a number.
    InvalidPoints,
    /// Strict policy rejected an unseen player.
    UninitializedPlayer,
    /// Any other engine failure.
    Internal,
}

// =============================================================================
// ADAPTER
// =============================================================================

/// Pass-through adapter for web frameworks.
#[derive(Clone, Debug)]
pub struct WebAdapter {
    engine: SharedScoringEngine,
}

impl WebAdapter {
    /// Wrap a shared engine.
    pub fn new(engine: SharedScoringEngine) -> Self {
        Self { engine }
    }

    /// Underlying engine handle.
    pub fn engine(&self) -> &SharedScoringEngine {
        &self.engine
    }

    /// See [`ScoringEngine::update_score`](crate::engine::ScoringEngine::update_score).
    pub async fn update_score(
        &self,
        player_id: &str,
        points: Score,
        context: Option<&Context>,
    ) -> Result<Score, EngineError> {
        self.engine.update_score(player_id, points, context).await
    }

    /// See [`ScoringEngine::get_scores`](crate::engine::ScoringEngine::get_scores).
    pub async fn get_scores(&self) -> BTreeMap<PlayerId, Score> {
        self.engine.get_scores().await
    }

    /// See [`ScoringEngine::get_player_score`](crate::engine::ScoringEngine::get_player_score).
    pub async fn get_player_score(&self, player_id: &str) -> Score {
        self.engine.get_score(player_id).await
    }

    /// Route one request.
    pub async fn handle(&self, request: ScoreRequest) -> ScoreResponse {
        match request {
            ScoreRequest::GetScores => ScoreResponse::Scores {
                scores: self.get_scores().await,
            },
            ScoreRequest::GetPlayerScore { player_id } => {
                let score = self.get_player_score(&player_id).await;
                ScoreResponse::PlayerScore { player_id, score }
            }
            ScoreRequest::UpdateScore {
                player_id,
                points,
                context,
            } => {
                let Some(points) = points_from_value(&points) else {
                    debug!("Invalid points for {}: {}", player_id, points);
                    return ScoreResponse::error(
                        ErrorCode::InvalidPoints,
                        format!("points must be numeric, got {}", points),
                    );
                };

                match self.update_score(&player_id, points, context.as_ref()).await {
                    Ok(score) => ScoreResponse::PlayerScore { player_id, score },
                    Err(e @ EngineError::UninitializedPlayer(_)) => {
                        ScoreResponse::error(ErrorCode::UninitializedPlayer, e.to_string())
                    }
                    Err(e) => {
                        warn!("Update for {} failed: {}", player_id, e);
                        ScoreResponse::error(ErrorCode::Internal, e.to_string())
                    }
                }
            }
        }
    }

    /// Route one JSON request and return the JSON response.
    ///
    /// Malformed requests become `invalid_request` responses; only response
    /// serialization errors are returned as `Err`.
    pub async fn handle_json(&self, raw: &str) -> Result<String, serde_json::Error> {
        let response = match ScoreRequest::from_json(raw) {
            Ok(request) => self.handle(request).await,
            Err(e) => {
                debug!("Invalid request: {}", e);
                ScoreResponse::error(ErrorCode::InvalidRequest, e.to_string())
            }
        };
        response.to_json()
    }
}

// =============================================================================
// TESTS
// =============================================================================
