//! Rule Registry Module
//!
//! Name-addressable storage and invocation of rule callbacks.
//!
//! ## Module Structure
//!
//! - `args`: Keyword arguments with typed accessors
//! - `registry`: The [`Sandbox`] rule table
//!
//! The sandbox does not restrict what a rule can do. `Sandbox::execute`
//! is a plain pass-through that only scopes a tracing span.

pub mod args;
pub mod registry;

use thiserror::Error;

pub use args::RuleArgs;
pub use registry::{Rule, Sandbox};

/// Rule registry and rule argument errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SandboxError {
    /// A rule with this name is already registered.
    #[error("rule already registered: {0}")]
    DuplicateRule(String),
    /// No rule with this name is registered.
    #[error("unknown rule: {0}")]
    UnknownRule(String),
    /// A required keyword argument was not supplied.
    #[error("missing argument: {0}")]
    MissingArgument(String),
    /// A keyword argument had the wrong shape.
    #[error("invalid argument `{argument}`: expected {expected}")]
    InvalidArgument {
        /// Argument name.
        argument: String,
        /// What the rule expected.
        expected: &'static str,
    },
    /// The rule itself reported a failure.
    #[error("rule failed: {0}")]
    RuleFailed(String),
}
