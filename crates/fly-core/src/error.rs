//! Construction-time error type.
//!
//! `ConfigError` is the only error kind that crosses the core's boundary.  It
//! is raised while a graph or scenario is being built and never during
//! ticking; per-tick contention is reported as drone state instead.

use thiserror::Error;

/// Malformed graph or scenario input.  Construction aborts on the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("zone `{0}` is defined more than once")]
    DuplicateZone(String),

    #[error("connection `{a}-{b}` references a zone that does not exist")]
    MissingEndpoint { a: String, b: String },

    #[error("zone `{0}` does not exist")]
    UnknownZone(String),

    #[error("zone `{zone}` has invalid capacity {capacity} (must be at least 1)")]
    InvalidCapacity { zone: String, capacity: u32 },

    #[error("invalid drone count {0} (must be at least 1)")]
    InvalidAgentCount(usize),

    #[error("{role} zone `{zone}` is blocked")]
    BlockedEndpoint { role: &'static str, zone: String },

    #[error("goal `{goal}` is not reachable from start `{start}`")]
    Unreachable { start: String, goal: String },
}

/// Shorthand result type for construction.
pub type ConfigResult<T> = Result<T, ConfigError>;
