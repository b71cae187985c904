//! Run configuration.
//!
//! Typically deserialized by the embedding application (with the `serde`
//! feature) and handed to `fly_sim::SimBuilder`.

use crate::Tick;

/// Which route finder the scheduler uses when a drone needs a new path.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Planner {
    /// Cost-aware label-setting search (cheapest total movement cost).
    #[default]
    Weighted,
    /// Breadth-first search over zones with spare capacity (fewest hops).
    Reachability,
}

impl Planner {
    pub fn as_str(self) -> &'static str {
        match self {
            Planner::Weighted     => "weighted",
            Planner::Reachability => "reachability",
        }
    }
}

impl std::fmt::Display for Planner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Tick budget for `Sim::run`.  A run that has not finished by then
    /// stops with `RunOutcome::completed == false`.
    pub max_ticks: u64,

    /// Route finder used for re-planning.
    pub planner: Planner,

    /// Extra ticks a drone spends in transit when entering a Restricted
    /// zone.  `0` makes Restricted zones behave like Normal ones for timing
    /// (their routing cost is still 2).
    pub restricted_dwell_ticks: u32,

    /// When re-planning, forbid every zone that is currently full so the
    /// drone routes around congestion instead of queueing behind it.
    pub avoid_full_zones: bool,

    /// Report a snapshot to observers every N ticks.  `0` disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl SimConfig {
    /// The tick at which `Sim::run` gives up (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.max_ticks)
    }

    /// `true` if observers should receive a snapshot at `tick`.
    #[inline]
    pub fn is_snapshot_tick(&self, tick: Tick) -> bool {
        self.snapshot_interval_ticks > 0 && tick.0.is_multiple_of(self.snapshot_interval_ticks)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_ticks:               10_000,
            planner:                 Planner::Weighted,
            restricted_dwell_ticks:  1,
            avoid_full_zones:        true,
            snapshot_interval_ticks: 1,
        }
    }
}
