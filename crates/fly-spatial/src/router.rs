//! Routing trait and the two route finders.
//!
//! # Pluggability
//!
//! `fly-sim` plans through the [`Router`] trait, so the scheduler is generic
//! over the search algorithm.  Two implementations ship here:
//!
//! | Router            | Optimises            | Honours occupancy         |
//! |-------------------|----------------------|---------------------------|
//! | [`DijkstraRouter`]| total movement cost  | only via the exclusion set|
//! | [`BfsRouter`]     | hop count            | yes, skips full zones     |
//!
//! [`Planner`] (from `fly-core`) also implements `Router` and dispatches to
//! one of the two at runtime, which is what `SimConfig::planner` selects.
//!
//! # What a route may contain
//!
//! Neither finder ever returns a Blocked zone, a zone with zero movement
//! cost, or a zone from the caller's exclusion set.  Excluding the start or
//! goal zone therefore means there is no route.  The start zone's type and
//! occupancy are not checked: it is where the drone already is.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use rustc_hash::FxHashSet;

use fly_core::{Planner, ZoneId};

use crate::graph::Graph;

/// A set of zones the caller forbids for one routing query.
pub type ZoneSet = FxHashSet<ZoneId>;

/// Tentative distance of a zone not reached yet.
const UNREACHED: u32 = u32::MAX;

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: zones to visit in order, start and goal
/// included, and the summed movement cost of every zone after the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub zones: Vec<ZoneId>,
    pub cost:  u32,
}

impl Route {
    /// The one-zone route for `start == goal`.
    pub fn trivial(zone: ZoneId) -> Self {
        Self { zones: vec![zone], cost: 0 }
    }

    /// Build a route from an explicit zone sequence, pricing it against
    /// `graph`.
    pub fn from_zones(graph: &Graph, zones: Vec<ZoneId>) -> Self {
        let cost = zones
            .iter()
            .skip(1)
            .map(|&z| graph.zone(z).movement_cost())
            .sum();
        Self { zones, cost }
    }

    /// Number of moves needed to follow the route.
    pub fn hops(&self) -> usize {
        self.zones.len().saturating_sub(1)
    }

    /// `true` if the start and goal are the same zone.
    pub fn is_trivial(&self) -> bool {
        self.zones.len() <= 1
    }

    pub fn start(&self) -> Option<ZoneId> {
        self.zones.first().copied()
    }

    pub fn goal(&self) -> Option<ZoneId> {
        self.zones.last().copied()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable route finder.
///
/// Implementations read the graph exactly as it is at call time, including
/// occupancy changes committed earlier in the same tick.
pub trait Router: Send + Sync {
    /// Find a route from `from` to `to` that avoids every zone in `excluded`.
    ///
    /// Returns `None` when no such route exists, including when `from`
    /// itself is excluded.  Unreachability is an ordinary answer, not an
    /// error.  `from == to` yields [`Route::trivial`].
    fn route(&self, graph: &Graph, from: ZoneId, to: ZoneId, excluded: &ZoneSet) -> Option<Route>;
}

impl<R: Router + ?Sized> Router for &R {
    fn route(&self, graph: &Graph, from: ZoneId, to: ZoneId, excluded: &ZoneSet) -> Option<Route> {
        (**self).route(graph, from, to, excluded)
    }
}

impl Router for Planner {
    fn route(&self, graph: &Graph, from: ZoneId, to: ZoneId, excluded: &ZoneSet) -> Option<Route> {
        match self {
            Planner::Weighted     => DijkstraRouter.route(graph, from, to, excluded),
            Planner::Reachability => BfsRouter.route(graph, from, to, excluded),
        }
    }
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Cost-optimal label-setting search.
///
/// Entering a zone costs its [`movement_cost`][crate::ZoneKind::movement_cost].
/// Occupancy is not consulted; callers that want to route around full zones
/// pass them in the exclusion set (see [`Graph::full_zones`]).
///
/// The queue is ordered by `(distance, push sequence, zone)`, so among
/// equal-cost alternatives the one discovered first wins.  Discovery order
/// follows neighbour insertion order, which makes results reproducible for
/// identical graphs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, graph: &Graph, from: ZoneId, to: ZoneId, excluded: &ZoneSet) -> Option<Route> {
        dijkstra(graph, from, to, excluded)
    }
}

fn dijkstra(graph: &Graph, from: ZoneId, to: ZoneId, excluded: &ZoneSet) -> Option<Route> {
    graph.get(from)?;
    graph.get(to)?;
    if excluded.contains(&from) {
        return None;
    }
    if from == to {
        return Some(Route::trivial(from));
    }

    let n = graph.zone_count();
    let mut dist      = vec![UNREACHED; n];
    let mut prev      = vec![ZoneId::INVALID; n];
    let mut finalized = vec![false; n];

    dist[from.index()] = 0;

    // Min-heap via Reverse.  The sequence number makes every key unique, so
    // the zone component never decides an ordering on its own.
    let mut seq: u64 = 0;
    let mut heap: BinaryHeap<Reverse<(u32, u64, ZoneId)>> = BinaryHeap::new();
    heap.push(Reverse((0, seq, from)));

    while let Some(Reverse((cost, _, zone))) = heap.pop() {
        if finalized[zone.index()] {
            continue;
        }
        finalized[zone.index()] = true;

        if zone == to {
            return Some(Route { zones: reconstruct(&prev, to), cost });
        }

        for &next in graph.neighbors(zone) {
            if finalized[next.index()] || excluded.contains(&next) {
                continue;
            }
            let step = graph.zone(next).movement_cost();
            if step == 0 {
                continue;
            }
            let new_cost = cost.saturating_add(step);
            if new_cost < dist[next.index()] {
                dist[next.index()] = new_cost;
                prev[next.index()] = zone;
                seq += 1;
                heap.push(Reverse((new_cost, seq, next)));
            }
        }
    }

    None
}

// ── BfsRouter ─────────────────────────────────────────────────────────────────

/// Fewest-hops search over zones that can take a drone right now.
///
/// A neighbour is only expanded if it is not excluded, not Blocked, and has
/// a free slot at call time.  Cheaper to run than [`DijkstraRouter`] and
/// naturally capacity-aware, at the price of ignoring movement cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct BfsRouter;

impl Router for BfsRouter {
    fn route(&self, graph: &Graph, from: ZoneId, to: ZoneId, excluded: &ZoneSet) -> Option<Route> {
        if excluded.contains(&from) {
            return None;
        }
        let zones = bfs(graph, from, to, |z| !excluded.contains(&z) && graph.can_enter(z))?;
        Some(Route::from_zones(graph, zones))
    }
}

/// `true` if `to` can be reached from `from` through non-Blocked zones,
/// ignoring occupancy entirely.
///
/// Used for up-front scenario validation, where the question is whether the
/// map is connected at all rather than whether a drone can move now.
pub fn is_reachable(graph: &Graph, from: ZoneId, to: ZoneId) -> bool {
    bfs(graph, from, to, |z| !graph.zone(z).kind().is_blocked()).is_some()
}

fn bfs<F>(graph: &Graph, from: ZoneId, to: ZoneId, admit: F) -> Option<Vec<ZoneId>>
where
    F: Fn(ZoneId) -> bool,
{
    graph.get(from)?;
    graph.get(to)?;
    if from == to {
        return Some(vec![from]);
    }

    let n = graph.zone_count();
    let mut visited = vec![false; n];
    let mut prev    = vec![ZoneId::INVALID; n];
    let mut queue   = VecDeque::new();

    visited[from.index()] = true;
    queue.push_back(from);

    while let Some(zone) = queue.pop_front() {
        if zone == to {
            return Some(reconstruct(&prev, to));
        }
        for &next in graph.neighbors(zone) {
            if visited[next.index()] || !admit(next) {
                continue;
            }
            visited[next.index()] = true;
            prev[next.index()] = zone;
            queue.push_back(next);
        }
    }

    None
}

/// Walk predecessors back from `to` and reverse.  The start zone is the one
/// whose predecessor is still `INVALID`.
fn reconstruct(prev: &[ZoneId], to: ZoneId) -> Vec<ZoneId> {
    let mut zones = vec![to];
    let mut cur = to;
    while prev[cur.index()] != ZoneId::INVALID {
        cur = prev[cur.index()];
        zones.push(cur);
    }
    zones.reverse();
    zones
}
