//! `fly-core` — foundational types for the fly-in drone routing core.
//!
//! This crate is a dependency of every other `fly-*` crate.  It has no
//! `fly-*` dependencies and only `thiserror` (plus optional `serde`) as
//! external ones.
//!
//! # What lives here
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`ids`]      | `AgentId`, `ZoneId`                                   |
//! | [`time`]     | `Tick`                                                |
//! | [`config`]   | `SimConfig`, `Planner`                                |
//! | [`error`]    | `ConfigError`, `ConfigResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{Planner, SimConfig};
pub use error::{ConfigError, ConfigResult};
pub use ids::{AgentId, ZoneId};
pub use time::Tick;
