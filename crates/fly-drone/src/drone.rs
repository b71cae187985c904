//! The drone record and its transition primitives.

use fly_core::{AgentId, ZoneId};
use fly_spatial::{Graph, Route, ZoneKind};

use crate::{Advance, DroneError, DroneResult, DroneState, Location, Move, MoveKind, Transit};

/// One drone: identity, plan, progress along the plan, and the slot it holds.
///
/// Fields are private; read them through the accessors.  Only the transition
/// methods below change a drone, and only they touch the graph on its behalf.
///
/// # Invariants
///
/// - Once a route is installed `path[0]` is the start zone and `cursor`
///   indexes the zone the drone is in (or departing from, while in transit).
/// - `cursor` never decreases; re-planning keeps the travelled prefix.
/// - `holding` is the one zone whose occupant set contains this drone, if
///   any.  A staged or arrived drone holds nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Drone {
    id:      AgentId,
    state:   DroneState,
    start:   ZoneId,
    goal:    ZoneId,
    path:    Vec<ZoneId>,
    cursor:  usize,
    transit: Option<Transit>,
    holding: Option<ZoneId>,
}

impl Drone {
    /// A new Idle drone staged at `start`.
    pub fn new(id: AgentId, start: ZoneId, goal: ZoneId) -> Self {
        Self {
            id,
            state:   DroneState::Idle,
            start,
            goal,
            path:    Vec::new(),
            cursor:  0,
            transit: None,
            holding: None,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn state(&self) -> DroneState {
        self.state
    }

    pub fn start(&self) -> ZoneId {
        self.start
    }

    pub fn goal(&self) -> ZoneId {
        self.goal
    }

    /// The full planned path, travelled prefix included.
    pub fn path(&self) -> &[ZoneId] {
        &self.path
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The part of the path not yet travelled, current zone first.
    pub fn remaining_path(&self) -> &[ZoneId] {
        self.path.get(self.cursor..).unwrap_or(&[])
    }

    pub fn transit(&self) -> Option<Transit> {
        self.transit
    }

    /// The zone whose slot this drone occupies.
    pub fn holding(&self) -> Option<ZoneId> {
        self.holding
    }

    /// The zone under the cursor, or the start zone before any route exists.
    pub fn current_zone(&self) -> ZoneId {
        self.path.get(self.cursor).copied().unwrap_or(self.start)
    }

    /// The next zone on the path, if any.
    pub fn next_zone(&self) -> Option<ZoneId> {
        self.path.get(self.cursor + 1).copied()
    }

    pub fn location(&self) -> Location {
        let here = self.current_zone();
        if self.state == DroneState::Arrived {
            return Location::Landed(here);
        }
        match (self.transit, self.holding) {
            (Some(t), _) => Location::Transit { from: here, to: t.target },
            (None, Some(_)) => Location::At(here),
            (None, None) => Location::Staged(here),
        }
    }

    /// `true` once the drone has reached its goal.
    #[inline]
    pub fn is_at_destination(&self) -> bool {
        self.state == DroneState::Arrived
    }

    // ── Planning ──────────────────────────────────────────────────────────

    /// `true` if the drone should be given a fresh route this tick.
    pub fn needs_plan(&self) -> bool {
        match self.state {
            DroneState::Arrived | DroneState::InTransit => false,
            DroneState::Idle | DroneState::Waiting => true,
            DroneState::Moving => self.path.is_empty(),
        }
    }

    /// Adopt `route` from the current zone onward and become Moving.
    ///
    /// The travelled prefix is kept, so the cursor stays where it is and now
    /// points at the first zone of the new segment.
    ///
    /// # Errors
    ///
    /// [`DroneError::RouteMismatch`] if the route does not start at the
    /// current zone, [`DroneError::RouteGoalMismatch`] if it does not end at
    /// the goal, [`DroneError::EmptyRoute`] for a zero-length route.  The
    /// drone is left unchanged in every case.
    pub fn install_route(&mut self, route: &Route) -> DroneResult<()> {
        let (Some(first), Some(last)) = (route.start(), route.goal()) else {
            return Err(DroneError::EmptyRoute(self.id));
        };
        let here = self.current_zone();
        if first != here {
            return Err(DroneError::RouteMismatch { agent: self.id, expected: here, found: first });
        }
        if last != self.goal {
            return Err(DroneError::RouteGoalMismatch { agent: self.id, expected: self.goal, found: last });
        }
        if self.path.is_empty() {
            self.path.push(here);
        } else {
            self.path.truncate(self.cursor + 1);
        }
        self.path.extend_from_slice(&route.zones[1..]);
        self.state = DroneState::Moving;
        Ok(())
    }

    /// No route could be found; park until the next tick.
    pub fn wait(&mut self) {
        if !self.state.is_terminal() && self.transit.is_none() {
            self.state = DroneState::Waiting;
        }
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// Attempt the next hop.
    ///
    /// - No route installed, already Arrived, or in transit: nothing happens.
    /// - No next zone: the drone is Arrived if it stands on its goal, and
    ///   Waiting for a new route otherwise.
    /// - The next zone refuses entry: the drone becomes Waiting and nothing
    ///   else changes.
    /// - Otherwise the next zone's slot is taken and the held slot released.
    ///   A Restricted zone with `dwell_ticks > 0` starts a transit; any other
    ///   zone completes the hop at once, landing the drone if it is the goal.
    ///
    /// # Errors
    ///
    /// [`DroneError::OccupancyDesync`] if the graph does not list this drone
    /// in the zone it believes it holds.  Nothing is changed in that case.
    pub fn try_advance(&mut self, graph: &mut Graph, dwell_ticks: u32) -> DroneResult<Advance> {
        if self.state.is_terminal() || self.transit.is_some() || self.path.is_empty() {
            return Ok(Advance::Hold);
        }
        if let Some(held) = self.holding {
            let present = graph.get(held).is_some_and(|z| z.occupants().contains(&self.id));
            if !present {
                return Err(DroneError::OccupancyDesync { agent: self.id, zone: held });
            }
        }

        let here = self.current_zone();
        let Some(next) = self.next_zone() else {
            if here != self.goal {
                self.state = DroneState::Waiting;
                return Ok(Advance::Hold);
            }
            self.land(graph);
            return Ok(Advance::Landed(here));
        };

        if let Err(refusal) = graph.occupy(next, self.id) {
            self.state = DroneState::Waiting;
            return Ok(Advance::Denied(refusal));
        }
        if let Some(held) = self.holding.replace(next) {
            graph.vacate(held, self.id);
        }

        if graph.zone(next).kind() == ZoneKind::Restricted && dwell_ticks > 0 {
            self.transit = Some(Transit { target: next, remaining: dwell_ticks });
            self.state = DroneState::InTransit;
            let step = Move { agent: self.id, from: here, to: next, kind: MoveKind::TransitStart };
            return Ok(Advance::Moved { step, arrived: false });
        }

        self.cursor += 1;
        self.state = DroneState::Moving;
        let arrived = self.settle(graph);
        let step = Move { agent: self.id, from: here, to: next, kind: MoveKind::Step };
        Ok(Advance::Moved { step, arrived })
    }

    /// Count down an ongoing transit.
    ///
    /// When the dwell runs out the cursor moves onto the target zone and the
    /// drone is Moving again, or Arrived if the target was its goal.  It does
    /// not take another hop in the same call.
    pub fn advance_transit(&mut self, graph: &mut Graph) -> Advance {
        let Some(mut transit) = self.transit else {
            return Advance::Hold;
        };
        transit.remaining = transit.remaining.saturating_sub(1);
        if transit.remaining > 0 {
            self.transit = Some(transit);
            return Advance::Hold;
        }

        let from = self.current_zone();
        self.transit = None;
        self.cursor += 1;
        self.state = DroneState::Moving;
        let arrived = self.settle(graph);
        let step = Move { agent: self.id, from, to: transit.target, kind: MoveKind::TransitEnd };
        Advance::Moved { step, arrived }
    }

    /// After a completed hop: land if the cursor is on the last path entry
    /// and that entry is the goal.
    fn settle(&mut self, graph: &mut Graph) -> bool {
        let at_end = self.cursor + 1 == self.path.len();
        if at_end && self.current_zone() == self.goal {
            self.land(graph);
            true
        } else {
            false
        }
    }

    fn land(&mut self, graph: &mut Graph) {
        if let Some(held) = self.holding.take() {
            graph.vacate(held, self.id);
        }
        self.state = DroneState::Arrived;
    }
}
