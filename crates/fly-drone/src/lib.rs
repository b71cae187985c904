//! `fly-drone` — per-drone movement state and the transitions that drive it.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                         |
//! |------------|------------------------------------------------------------------|
//! | [`state`]  | `DroneState`, `Location`, `Transit`                              |
//! | [`drone`]  | `Drone` — path, cursor, held slot, and the transition primitives |
//! | [`motion`] | `Advance`, `Move`, `MoveKind` — what a transition committed      |
//! | [`error`]  | `DroneError`, `DroneResult<T>`                                   |
//!
//! # Movement model (one hop per tick)
//!
//! A drone follows a planned zone path one hop per tick:
//!
//! 1. `fly-sim` asks [`Drone::needs_plan`]; if so it routes from
//!    [`Drone::current_zone`] to the goal and calls [`Drone::install_route`]
//!    or [`Drone::wait`].
//! 2. [`Drone::try_advance`] reserves the next zone through
//!    [`Graph::occupy`][fly_spatial::Graph::occupy].  A refusal parks the
//!    drone in `Waiting`; success releases the zone it held.
//! 3. Entering a Restricted zone starts a transit instead of a plain step.
//!    [`Drone::advance_transit`] counts the dwell down and lands the drone on
//!    the zone when it reaches zero.
//!
//! Drones start *staged* at their start zone without holding a slot there,
//! and give their goal slot back when they arrive.
//!
//! Occupancy is only ever changed through the graph; a drone stores zone ids,
//! never zone references.

pub mod drone;
pub mod error;
pub mod motion;
pub mod state;


pub use drone::Drone;
pub use error::{DroneError, DroneResult};
pub use motion::{Advance, Move, MoveKind};
pub use state::{DroneState, Location, Transit};
