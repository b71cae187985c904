use fly_core::{AgentId, ZoneId};
use thiserror::Error;

/// Structural problems a transition refuses to act on.
///
/// None of these occur when the graph is only mutated through drones and
/// routes come from the built-in finders.  They signal that occupancy and
/// drone bookkeeping disagree, or that a router handed back a path the drone
/// cannot follow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DroneError {
    #[error("drone {agent} believes it holds a slot in zone {zone} but is not an occupant")]
    OccupancyDesync { agent: AgentId, zone: ZoneId },

    #[error("route for drone {agent} starts at {found}, expected its current zone {expected}")]
    RouteMismatch { agent: AgentId, expected: ZoneId, found: ZoneId },

    #[error("route for drone {agent} ends at {found}, expected its goal {expected}")]
    RouteGoalMismatch { agent: AgentId, expected: ZoneId, found: ZoneId },

    #[error("route for drone {0} is empty")]
    EmptyRoute(AgentId),
}

pub type DroneResult<T> = Result<T, DroneError>;
