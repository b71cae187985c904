//! Zone definitions and the per-zone record held by a [`Graph`][crate::Graph].

use std::collections::BTreeSet;

use fly_core::{AgentId, ZoneId};

// ── ZoneKind ──────────────────────────────────────────────────────────────────

/// Access class of a zone.  Determines its movement cost.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ZoneKind {
    #[default]
    Normal,
    Priority,
    Restricted,
    Blocked,
}

impl ZoneKind {
    /// Cost of entering a zone of this kind.
    ///
    /// | Kind       | Cost |
    /// |------------|------|
    /// | Normal     | 1    |
    /// | Priority   | 1    |
    /// | Restricted | 2    |
    /// | Blocked    | 0 (never entered) |
    #[inline]
    pub const fn movement_cost(self) -> u32 {
        match self {
            ZoneKind::Normal | ZoneKind::Priority => 1,
            ZoneKind::Restricted => 2,
            ZoneKind::Blocked => 0,
        }
    }

    /// `true` for the one kind no drone may ever enter.
    #[inline]
    pub const fn is_blocked(self) -> bool {
        matches!(self, ZoneKind::Blocked)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ZoneKind::Normal     => "normal",
            ZoneKind::Priority   => "priority",
            ZoneKind::Restricted => "restricted",
            ZoneKind::Blocked    => "blocked",
        }
    }
}

impl std::fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ZoneDef ───────────────────────────────────────────────────────────────────

/// Validated zone description handed over by the ingestion layer.
///
/// ```
/// use fly_spatial::{ZoneDef, ZoneKind};
///
/// let hub = ZoneDef::new("hub", 3, 4).capacity(2).kind(ZoneKind::Priority);
/// assert_eq!(hub.capacity, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneDef {
    pub name:     String,
    pub x:        i32,
    pub y:        i32,
    pub capacity: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind:     ZoneKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub color:    Option<String>,
}

impl ZoneDef {
    /// A Normal zone with capacity 1 and no colour.
    pub fn new(name: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            capacity: 1,
            kind: ZoneKind::Normal,
            color: None,
        }
    }

    pub fn capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn kind(mut self, kind: ZoneKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

// ── Zone ──────────────────────────────────────────────────────────────────────

/// A zone as stored in the graph: static attributes plus its occupant set.
///
/// Everything is read-only from outside the crate.  Occupancy changes go
/// through [`Graph::occupy`][crate::Graph::occupy] and
/// [`Graph::vacate`][crate::Graph::vacate].
#[derive(Debug, Clone)]
pub struct Zone {
    id:        ZoneId,
    name:      String,
    x:         i32,
    y:         i32,
    capacity:  u32,
    kind:      ZoneKind,
    color:     Option<String>,
    occupants: BTreeSet<AgentId>,
}

impl Zone {
    pub(crate) fn from_def(id: ZoneId, def: ZoneDef) -> Self {
        Self {
            id,
            name:      def.name,
            x:         def.x,
            y:         def.y,
            capacity:  def.capacity,
            kind:      def.kind,
            color:     def.color,
            occupants: BTreeSet::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> ZoneId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display coordinates.  Never consulted by routing.
    #[inline]
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    #[inline]
    pub fn kind(&self) -> ZoneKind {
        self.kind
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    #[inline]
    pub fn movement_cost(&self) -> u32 {
        self.kind.movement_cost()
    }

    /// Drones currently inside, in ascending id order.
    #[inline]
    pub fn occupants(&self) -> &BTreeSet<AgentId> {
        &self.occupants
    }

    #[inline]
    pub fn occupancy(&self) -> usize {
        self.occupants.len()
    }

    /// `true` if the zone can take one more drone right now.
    #[inline]
    pub fn can_enter(&self) -> bool {
        !self.kind.is_blocked() && self.occupants.len() < self.capacity as usize
    }

    pub(crate) fn insert(&mut self, agent: AgentId) {
        self.occupants.insert(agent);
    }

    pub(crate) fn remove(&mut self, agent: AgentId) -> bool {
        self.occupants.remove(&agent)
    }
}
