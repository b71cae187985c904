//! Occupancy refusal.

use thiserror::Error;

use fly_core::ZoneId;

/// Returned by [`Graph::occupy`][crate::Graph::occupy] when a zone cannot
/// accept another drone.
///
/// This is an expected outcome of contention, not a failure: the scheduler
/// consumes it and parks the drone in `Waiting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CapacityError {
    #[error("zone {zone} is full ({capacity} of {capacity} slots taken)")]
    Full { zone: ZoneId, capacity: u32 },

    #[error("zone {0} is blocked")]
    Blocked(ZoneId),
}

impl CapacityError {
    /// The zone that refused entry.
    pub fn zone(&self) -> ZoneId {
        match *self {
            CapacityError::Full { zone, .. } => zone,
            CapacityError::Blocked(zone) => zone,
        }
    }
}
