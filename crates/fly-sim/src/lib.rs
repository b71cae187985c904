//! `fly-sim` — turn scheduler and run loop for the fly-in drone routing core.
//!
//! # One tick
//!
//! ```text
//! for drone in drones (ascending AgentId):
//!   Arrived    → skip
//!   InTransit  → count the dwell down; land on the Restricted zone at zero
//!   needs plan → route current → goal (live occupancy, full zones excluded)
//!                  none  → Waiting
//!                  found → install, then fall through
//!   Moving     → occupy next zone
//!                  refused → Waiting (denied)
//!                  ok      → vacate held zone, advance or start transit
//! ```
//!
//! Every occupancy change of one drone is committed before the next drone is
//! processed, so lower ids win contested slots.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`scheduler`] | `tick`, `TickResult`                                    |
//! | [`sim`]       | `Sim` — owns graph and drones; `step`, `run`, `run_ticks` |
//! | [`builder`]   | `SimBuilder` — scenario validation                      |
//! | [`observer`]  | `SimObserver`, `NoopObserver`, `TracingObserver`        |
//! | [`error`]     | `SimError`, `SimResult<T>`, `TickError`                 |
//!
//! # Logging
//!
//! The crate emits `tracing` events and never installs a subscriber.
//! Per-run events are `info`, per-tick and per-plan events `debug`, per-move
//! events `trace`, structural errors `warn`.

pub mod builder;
pub mod error;
pub mod observer;
pub mod scheduler;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult, TickError};
pub use observer::{NoopObserver, SimObserver, TracingObserver};
pub use scheduler::{tick, TickResult};
pub use sim::{RunOutcome, Sim};
