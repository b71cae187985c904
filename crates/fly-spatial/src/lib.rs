//! `fly-spatial` — zone graph, occupancy, and route finding.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                       |
//! |------------|----------------------------------------------------------------|
//! | [`zone`]   | `ZoneKind`, `ZoneDef`, `Zone`                                  |
//! | [`graph`]  | `Graph` (zones + undirected adjacency + occupancy), `build_graph` |
//! | [`router`] | `Router` trait, `Route`, `DijkstraRouter`, `BfsRouter`        |
//! | [`error`]  | `CapacityError`                                                |
//!
//! # Occupancy ownership
//!
//! The `Graph` is the only owner of zone occupancy.  Occupant sets are
//! readable through [`Zone::occupants`] and mutable exclusively through
//! [`Graph::occupy`] / [`Graph::vacate`], so holding `&Graph` never grants a
//! way to change who is where.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on definition types.       |

pub mod error;
pub mod graph;
pub mod router;
pub mod zone;


pub use error::CapacityError;
pub use graph::{build_graph, ConnectionDef, Graph};
pub use router::{is_reachable, BfsRouter, DijkstraRouter, Route, Router, ZoneSet};
pub use zone::{Zone, ZoneDef, ZoneKind};
