//! Records of what a transition did.

use fly_core::{AgentId, ZoneId};
use fly_spatial::CapacityError;

/// Kind of a committed movement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveKind {
    /// A completed one-tick hop into a Normal or Priority zone (or any zone
    /// when dwelling is disabled).
    Step,
    /// Departure towards a Restricted zone.  `from` was vacated, `to` is
    /// reserved.
    TransitStart,
    /// End of the dwell: the drone is now inside `to`.
    TransitEnd,
}

/// A single committed movement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub agent: AgentId,
    pub from:  ZoneId,
    pub to:    ZoneId,
    pub kind:  MoveKind,
}

/// Result of one transition attempt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Nothing changed: already Arrived, or still dwelling.
    Hold,
    /// A movement was committed.  `arrived` is set when it landed the drone
    /// on its goal.
    Moved { step: Move, arrived: bool },
    /// No hop left on the path; the drone is now Arrived where it stands.
    Landed(ZoneId),
    /// The next zone refused entry; the drone is now Waiting.
    Denied(CapacityError),
}

impl Advance {
    /// The committed movement, if any.
    pub fn step(&self) -> Option<Move> {
        match *self {
            Advance::Moved { step, .. } => Some(step),
            _ => None,
        }
    }

    /// `true` if this transition made the drone Arrived.
    pub fn arrived(&self) -> bool {
        matches!(self, Advance::Moved { arrived: true, .. } | Advance::Landed(_))
    }
}
