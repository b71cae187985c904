//! Drone state tags and position views.

use std::fmt;

use fly_core::ZoneId;

/// Lifecycle state of a drone.
///
/// ```text
///   Idle ──plan──▶ Moving ──step──▶ Moving ── … ──▶ Arrived
///    │               │  ▲
///    │          full │  │ plan
///    ▼               ▼  │
///   Waiting ◀────────┘──┘
///                    │ restricted
///                    ▼
///                InTransit ──dwell done──▶ Moving / Arrived
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DroneState {
    /// Created, no route yet.
    #[default]
    Idle,
    /// Following its path; tries to take the next hop each tick.
    Moving,
    /// Entering a Restricted zone; the slot is reserved but the hop is not
    /// finished.
    InTransit,
    /// Last plan or hop was refused.  Re-plans next tick.
    Waiting,
    /// Terminal.
    Arrived,
}

impl DroneState {
    pub fn as_str(self) -> &'static str {
        match self {
            DroneState::Idle      => "idle",
            DroneState::Moving    => "moving",
            DroneState::InTransit => "in_transit",
            DroneState::Waiting   => "waiting",
            DroneState::Arrived   => "arrived",
        }
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, DroneState::Arrived)
    }
}

impl fmt::Display for DroneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An in-progress entry into a Restricted zone.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transit {
    /// Zone being entered.  Its slot is already held.
    pub target:    ZoneId,
    /// Ticks left before the drone counts as inside `target`.
    pub remaining: u32,
}

/// Where a drone is, for display and inspection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Location {
    /// Inside a zone, holding one of its slots.
    At(ZoneId),
    /// Waiting at its start zone without having taken a slot there.
    Staged(ZoneId),
    /// Between two adjacent zones; the slot of `to` is held.
    Transit { from: ZoneId, to: ZoneId },
    /// Arrived at its goal and released the slot.
    Landed(ZoneId),
}

impl Location {
    /// The zone a visualiser should draw the drone at.  In transit this is
    /// the departure zone.
    pub fn zone(self) -> ZoneId {
        match self {
            Location::At(z) | Location::Staged(z) | Location::Landed(z) => z,
            Location::Transit { from, .. } => from,
        }
    }
}
