//! Call Debouncing
//!
//! Drops calls that arrive sooner than a configured wait after the last
//! accepted call. Useful for hosts that fire the same award many times per
//! frame.

use std::time::{Duration, Instant};

/// Rate limiter that accepts at most one call per `wait` window.
#[derive(Debug, Clone)]
pub struct Debouncer {
    wait: Duration,
    last_called: Option<Instant>,
}

impl Debouncer {
    /// Create a debouncer with the given wait window.
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            last_called: None,
        }
    }

    /// Wait window.
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Run `f` if the window has elapsed, using the current time.
    pub fn call<T>(&mut self, f: impl FnOnce() -> T) -> Option<T> {
        self.call_at(Instant::now(), f)
    }

    /// Run `f` if the window has elapsed as of `now`.
    ///
    /// The first call always runs. A dropped call does not restart the
    /// window.
    pub fn call_at<T>(&mut self, now: Instant, f: impl FnOnce() -> T) -> Option<T> {
        let ready = match self.last_called {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.wait,
        };

        if !ready {
            return None;
        }

        self.last_called = Some(now);
        Some(f())
    }

    /// Forget the last accepted call.
    pub fn reset(&mut self) {
        self.last_called = None;
    }
}
