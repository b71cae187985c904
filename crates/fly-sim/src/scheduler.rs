//! One tick of the turn scheduler.
//!
//! [`tick`] is a free function over borrowed state so it can be driven by
//! [`Sim`][crate::Sim] or called directly on a graph and a drone slice.

use std::collections::BTreeSet;

use tracing::{debug, trace, warn};

use fly_core::{AgentId, SimConfig, Tick};
use fly_drone::{Advance, Drone, DroneState, Move};
use fly_spatial::{Graph, Router, ZoneSet};

use crate::TickError;

/// Everything that happened during one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickResult {
    /// The tick that was processed.
    pub tick:    Tick,
    /// Drones that became Arrived this tick.
    pub arrived: BTreeSet<AgentId>,
    /// Drones in Waiting at the end of the tick, whenever they started.
    pub waiting: BTreeSet<AgentId>,
    /// Drones whose next zone refused entry this tick.
    pub denied:  BTreeSet<AgentId>,
    /// Committed movements in processing order.
    pub moves:   Vec<Move>,
    /// Structural problems.  Empty in normal operation.
    pub errors:  Vec<TickError>,
}

impl TickResult {
    pub fn new(tick: Tick) -> Self {
        Self { tick, ..Self::default() }
    }

    /// `true` if no drone moved, arrived, or was refused.
    pub fn is_idle(&self) -> bool {
        self.moves.is_empty() && self.arrived.is_empty() && self.denied.is_empty()
    }
}

/// Run one tick over `drones`.
///
/// Drones are processed in ascending id order, whatever their order in the
/// slice.  Each drone's occupancy changes are committed before the next drone
/// is looked at, so an earlier drone wins any contested slot and a later one
/// plans against the occupancy it leaves behind.
///
/// Per drone:
///
/// 1. Arrived: skipped.
/// 2. InTransit: the dwell counts down; no hop this tick.
/// 3. Idle, Waiting, or without a path: a route is requested from `router`.
///    No route leaves the drone Waiting; otherwise it carries on to step 4.
/// 4. The drone tries its next hop.
///
/// Never loops beyond a single pass.
pub fn tick<R>(
    graph:  &mut Graph,
    drones: &mut [Drone],
    router: &R,
    config: &SimConfig,
    now:    Tick,
) -> TickResult
where
    R: Router + ?Sized,
{
    let mut result = TickResult::new(now);

    let mut order: Vec<usize> = (0..drones.len()).collect();
    order.sort_by_key(|&i| drones[i].id());

    let mut previous: Option<AgentId> = None;
    for i in order {
        let drone = &mut drones[i];
        if previous == Some(drone.id()) {
            warn!(tick = now.0, agent = %drone.id(), "Duplicate drone id skipped");
            result.errors.push(TickError::DuplicateAgent(drone.id()));
            continue;
        }
        previous = Some(drone.id());
        step_drone(graph, drone, router, config, &mut result);
    }

    result.waiting = drones
        .iter()
        .filter(|d| d.state() == DroneState::Waiting)
        .map(Drone::id)
        .collect();

    debug!(
        tick    = now.0,
        moves   = result.moves.len(),
        arrived = result.arrived.len(),
        waiting = result.waiting.len(),
        denied  = result.denied.len(),
        "Tick processed"
    );
    result
}

fn step_drone<R>(
    graph:  &mut Graph,
    drone:  &mut Drone,
    router: &R,
    config: &SimConfig,
    result: &mut TickResult,
) where
    R: Router + ?Sized,
{
    match drone.state() {
        DroneState::Arrived => return,
        DroneState::InTransit => {
            let advance = drone.advance_transit(graph);
            record(result, drone.id(), advance);
            return;
        }
        DroneState::Idle | DroneState::Moving | DroneState::Waiting => {}
    }

    if drone.needs_plan() && !replan(graph, drone, router, config, result) {
        return;
    }

    match drone.try_advance(graph, config.restricted_dwell_ticks) {
        Ok(advance) => record(result, drone.id(), advance),
        Err(err) => {
            warn!(tick = result.tick.0, agent = %drone.id(), %err, "Drone step refused");
            result.errors.push(err.into());
        }
    }
}

/// Give `drone` a fresh route from where it is.  Returns `false` if it has
/// to wait instead.
fn replan<R>(
    graph:  &Graph,
    drone:  &mut Drone,
    router: &R,
    config: &SimConfig,
    result: &mut TickResult,
) -> bool
where
    R: Router + ?Sized,
{
    let from = drone.current_zone();
    let excluded = if config.avoid_full_zones {
        graph.full_zones(from)
    } else {
        ZoneSet::default()
    };

    let Some(route) = router.route(graph, from, drone.goal(), &excluded) else {
        debug!(tick = result.tick.0, agent = %drone.id(), from = %from, "No route; waiting");
        drone.wait();
        return false;
    };

    match drone.install_route(&route) {
        Ok(()) => {
            debug!(
                tick  = result.tick.0,
                agent = %drone.id(),
                hops  = route.hops(),
                cost  = route.cost,
                "Route planned"
            );
            true
        }
        Err(err) => {
            warn!(tick = result.tick.0, agent = %drone.id(), %err, "Route rejected");
            result.errors.push(err.into());
            drone.wait();
            false
        }
    }
}

fn record(result: &mut TickResult, agent: AgentId, advance: Advance) {
    match advance {
        Advance::Hold => {}
        Advance::Moved { step, arrived } => {
            trace!(
                tick  = result.tick.0,
                agent = %step.agent,
                from  = %step.from,
                to    = %step.to,
                kind  = ?step.kind,
                "Move committed"
            );
            result.moves.push(step);
            if arrived {
                result.arrived.insert(agent);
            }
        }
        Advance::Landed(zone) => {
            trace!(tick = result.tick.0, agent = %agent, zone = %zone, "Landed in place");
            result.arrived.insert(agent);
        }
        Advance::Denied(refusal) => {
            debug!(tick = result.tick.0, agent = %agent, zone = %refusal.zone(), "Entry refused");
            result.denied.insert(agent);
        }
    }
}
