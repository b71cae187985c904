//! Zone graph and its builder function.
//!
//! # Data layout
//!
//! Zones are interned into a dense `Vec<Zone>` indexed by `ZoneId` (assigned
//! in insertion order).  Adjacency is a parallel `Vec<Vec<ZoneId>>` that keeps
//! each zone's neighbours in the order the connections were added, so every
//! search that iterates neighbours breaks ties the same way on every run.
//!
//! Name lookups go through an `FxHashMap<String, ZoneId>`.
//!
//! Topology is fixed once the graph is handed to a simulation; only the
//! occupant sets change afterwards.

use rustc_hash::FxHashMap;

use fly_core::{AgentId, ConfigError, ConfigResult, ZoneId};

use crate::zone::{Zone, ZoneDef};
use crate::CapacityError;

/// An undirected connection between two named zones.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionDef {
    pub a: String,
    pub b: String,
}

impl ConnectionDef {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self { a: a.into(), b: b.into() }
    }
}

impl<A: Into<String>, B: Into<String>> From<(A, B)> for ConnectionDef {
    fn from((a, b): (A, B)) -> Self {
        Self::new(a, b)
    }
}

/// Build a [`Graph`] from validated definitions.
///
/// Zones are registered in iteration order (which fixes their `ZoneId`s),
/// then connections in iteration order (which fixes neighbour order).
///
/// # Errors
///
/// The first [`ConfigError`] encountered: a duplicate name, a capacity of 0,
/// or a connection naming an unknown zone.
///
/// ```
/// use fly_spatial::{build_graph, ZoneDef};
///
/// let graph = build_graph(
///     [ZoneDef::new("A", 0, 0), ZoneDef::new("B", 1, 0)],
///     [("A", "B")],
/// ).unwrap();
/// assert_eq!(graph.zone_count(), 2);
/// assert_eq!(graph.connection_count(), 1);
/// ```
pub fn build_graph<Z, C>(zones: Z, connections: C) -> ConfigResult<Graph>
where
    Z: IntoIterator<Item = ZoneDef>,
    C: IntoIterator,
    C::Item: Into<ConnectionDef>,
{
    let mut graph = Graph::new();
    for def in zones {
        graph.add_zone(def)?;
    }
    for conn in connections {
        let conn = conn.into();
        graph.add_connection(&conn.a, &conn.b)?;
    }
    Ok(graph)
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Zones, their undirected adjacency, and their occupancy.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    zones:     Vec<Zone>,
    adjacency: Vec<Vec<ZoneId>>,
    by_name:   FxHashMap<String, ZoneId>,
    /// Number of distinct undirected connections.
    edges:     usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for the expected number of zones.
    pub fn with_capacity(zones: usize) -> Self {
        Self {
            zones:     Vec::with_capacity(zones),
            adjacency: Vec::with_capacity(zones),
            by_name:   FxHashMap::with_capacity_and_hasher(zones, Default::default()),
            edges:     0,
        }
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Register a zone and return its id.
    ///
    /// # Errors
    ///
    /// [`ConfigError::DuplicateZone`] if the name is taken,
    /// [`ConfigError::InvalidCapacity`] if `capacity == 0`.
    pub fn add_zone(&mut self, def: ZoneDef) -> ConfigResult<ZoneId> {
        if self.by_name.contains_key(&def.name) {
            return Err(ConfigError::DuplicateZone(def.name));
        }
        if def.capacity == 0 {
            return Err(ConfigError::InvalidCapacity { zone: def.name, capacity: def.capacity });
        }
        let id = ZoneId(self.zones.len() as u32);
        self.by_name.insert(def.name.clone(), id);
        self.zones.push(Zone::from_def(id, def));
        self.adjacency.push(Vec::new());
        Ok(id)
    }

    /// Connect two zones by name, in both directions.
    ///
    /// Connecting an already-connected pair is a no-op.  A self-loop is
    /// recorded once.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingEndpoint`] if either name is unknown.
    pub fn add_connection(&mut self, a: &str, b: &str) -> ConfigResult<()> {
        let (Some(ia), Some(ib)) = (self.zone_id(a), self.zone_id(b)) else {
            return Err(ConfigError::MissingEndpoint { a: a.to_owned(), b: b.to_owned() });
        };
        self.connect(ia, ib);
        Ok(())
    }

    fn connect(&mut self, a: ZoneId, b: ZoneId) {
        if self.adjacency[a.index()].contains(&b) {
            return;
        }
        self.adjacency[a.index()].push(b);
        if a != b {
            self.adjacency[b.index()].push(a);
        }
        self.edges += 1;
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn connection_count(&self) -> usize {
        self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Resolve a zone name to its id.
    #[inline]
    pub fn zone_id(&self, name: &str) -> Option<ZoneId> {
        self.by_name.get(name).copied()
    }

    /// The zone with id `id`.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this graph.  Use [`get`](Self::get)
    /// for untrusted ids.
    #[inline]
    pub fn zone(&self, id: ZoneId) -> &Zone {
        &self.zones[id.index()]
    }

    #[inline]
    pub fn get(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.get(id.index())
    }

    pub fn zone_by_name(&self, name: &str) -> Option<&Zone> {
        self.zone_id(name).map(|id| self.zone(id))
    }

    /// Human-readable name of `id`, or `"?"` for a foreign id.
    pub fn name_of(&self, id: ZoneId) -> &str {
        self.get(id).map_or("?", Zone::name)
    }

    /// All zones in id order.
    pub fn zones(&self) -> impl ExactSizeIterator<Item = &Zone> + '_ {
        self.zones.iter()
    }

    /// Neighbours of `id` in connection-insertion order.
    #[inline]
    pub fn neighbors(&self, id: ZoneId) -> &[ZoneId] {
        self.adjacency.get(id.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `true` if `a` and `b` are directly connected.
    pub fn are_connected(&self, a: ZoneId, b: ZoneId) -> bool {
        self.neighbors(a).contains(&b)
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    /// `false` if the zone is Blocked, full, or unknown.
    #[inline]
    pub fn can_enter(&self, id: ZoneId) -> bool {
        self.get(id).is_some_and(Zone::can_enter)
    }

    /// Add `agent` to the occupants of `id`.
    ///
    /// Re-occupying a zone the agent is already in succeeds without taking a
    /// second slot.
    ///
    /// # Errors
    ///
    /// [`CapacityError::Blocked`] for a Blocked (or unknown) zone,
    /// [`CapacityError::Full`] if every slot is taken.
    pub fn occupy(&mut self, id: ZoneId, agent: AgentId) -> Result<(), CapacityError> {
        let Some(zone) = self.zones.get_mut(id.index()) else {
            return Err(CapacityError::Blocked(id));
        };
        if zone.kind().is_blocked() {
            return Err(CapacityError::Blocked(id));
        }
        if zone.occupants().contains(&agent) {
            return Ok(());
        }
        if !zone.can_enter() {
            return Err(CapacityError::Full { zone: id, capacity: zone.capacity() });
        }
        zone.insert(agent);
        Ok(())
    }

    /// Remove `agent` from the occupants of `id`.
    ///
    /// Returns `true` if the agent was present; absent agents are a no-op.
    pub fn vacate(&mut self, id: ZoneId, agent: AgentId) -> bool {
        self.zones
            .get_mut(id.index())
            .is_some_and(|zone| zone.remove(agent))
    }

    /// Every zone other than `except` that currently refuses entry because it
    /// is full.  Blocked zones are not listed; routers skip them anyway.
    pub fn full_zones(&self, except: ZoneId) -> crate::ZoneSet {
        self.zones
            .iter()
            .filter(|z| z.id() != except && !z.kind().is_blocked() && !z.can_enter())
            .map(Zone::id)
            .collect()
    }

    /// Total number of drones inside zones.
    pub fn total_occupancy(&self) -> usize {
        self.zones.iter().map(Zone::occupancy).sum()
    }
}
