//! Score Primitives
//!
//! The ledger stores whole-number scores only. Callers holding fractional
//! or loosely typed values convert them here, at the boundary, before
//! anything reaches the engine.
//!
//! ## Numeric Representation
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Score = i64 (signed)                                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Negative deltas subtract from the running total.           │
//! │  Accumulation saturates at i64::MIN / i64::MAX.             │
//! │  Floats are rounded half away from zero on the way in.      │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A score or a point delta.
pub type Score = i64;

/// Score every absent player reads as.
pub const ZERO_SCORE: Score = 0;

/// Default number of decimals used by [`format_score`].
pub const DEFAULT_SCORE_DECIMALS: usize = 2;

// =============================================================================
// PLAYER ID
// =============================================================================

/// Unique player identifier.
///
/// Opaque to the ledger. Implements Ord so ledger snapshots iterate in a
/// stable, sorted order.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the raw identifier.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PlayerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Check that a score is usable as a displayed total (non-negative).
#[inline]
pub fn validate_score(score: Score) -> bool {
    score >= 0
}

/// Clamp a score into `[min, max]`.
///
/// Unlike [`Ord::clamp`] this never panics: when `min > max` the upper
/// bound wins.
#[inline]
pub fn clamp_score(score: Score, min: Score, max: Score) -> Score {
    score.max(min).min(max)
}

/// Format a score with a fixed number of decimals.
///
/// `format_score(12.34567, 2)` gives `"12.35"`.
pub fn format_score(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Convert a float to a score, rounding to the nearest integer.
///
/// Returns `None` for NaN and infinities. Out-of-range values saturate.
pub fn points_from_f64(value: f64) -> Option<Score> {
    if !value.is_finite() {
        return None;
    }
    Some(value.round() as Score)
}

/// Leniently cast a JSON value to a score.
///
/// Integers pass through, floats are rounded, numeric strings are parsed.
/// Everything else yields `None`.
pub fn points_from_value(value: &Value) -> Option<Score> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(i),
            None => n.as_f64().and_then(points_from_f64),
        },
        Value::String(s) => {
            let s = s.trim();
            s.parse::<Score>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(points_from_f64))
        }
        _ => None,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_player_id_ordering() {
        let a = PlayerId::from("alice");
        let b = PlayerId::from("bob");
        assert!(a < b);
        assert_eq!(a.to_string(), "alice");
    }

    #[test]
    fn test_player_id_serializes_as_string() {
        let id = PlayerId::new("p1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"p1\"");
    }

    #[test]
    fn test_player_id_accessors() {
        let id = PlayerId::new(String::from("carol"));
        assert_eq!(id.as_str(), "carol");
        assert_eq!(id.into_inner(), "carol".to_string());
    }

    #[test]
    fn test_validate_score() {
        assert!(validate_score(10));
        assert!(validate_score(0));
        assert!(!validate_score(-5));
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(10, 0, 5), 5);
        assert_eq!(clamp_score(-1, 0, 5), 0);
        assert_eq!(clamp_score(3, 0, 5), 3);
        // Inverted bounds don't panic
        assert_eq!(clamp_score(3, 5, 0), 0);
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(12.34567, DEFAULT_SCORE_DECIMALS), "12.35");
        assert_eq!(format_score(123.456789, 4), "123.4568");
        assert_eq!(format_score(7.0, 0), "7");
    }

    #[test]
    fn test_points_from_f64() {
        assert_eq!(points_from_f64(2.4), Some(2));
        assert_eq!(points_from_f64(2.5), Some(3));
        assert_eq!(points_from_f64(-2.5), Some(-3));
        assert_eq!(points_from_f64(f64::NAN), None);
        assert_eq!(points_from_f64(f64::INFINITY), None);
        assert_eq!(points_from_f64(1e30), Some(Score::MAX));
    }

    #[test]
    fn test_points_from_value() {
        assert_eq!(points_from_value(&json!(5)), Some(5));
        assert_eq!(points_from_value(&json!(-5)), Some(-5));
        assert_eq!(points_from_value(&json!(10.6)), Some(11));
        assert_eq!(points_from_value(&json!(" 42 ")), Some(42));
        assert_eq!(points_from_value(&json!("1.5")), Some(2));
        assert_eq!(points_from_value(&json!("abc")), None);
        assert_eq!(points_from_value(&json!(true)), None);
        assert_eq!(points_from_value(&Value::Null), None);
    }
}
