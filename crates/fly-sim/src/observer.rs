//! Simulation observer trait for progress reporting and visualisation.

use tracing::{debug, info};

use fly_core::Tick;
use fly_drone::Drone;
use fly_spatial::Graph;

use crate::{RunOutcome, TickResult};

/// Callbacks invoked by [`Sim`][crate::Sim] at key points in the run loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: arrival counter
///
/// ```rust
/// use fly_sim::{SimObserver, TickResult};
///
/// #[derive(Default)]
/// struct ArrivalCounter { arrived: usize }
///
/// impl SimObserver for ArrivalCounter {
///     fn on_tick_end(&mut self, result: &TickResult) {
///         self.arrived += result.arrived.len();
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any drone is processed.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after every drone has been processed.
    fn on_tick_end(&mut self, _result: &TickResult) {}

    /// Called after `on_tick_end` on snapshot ticks (every
    /// `config.snapshot_interval_ticks` ticks).
    ///
    /// Read-only views of the whole graph and every drone, for renderers
    /// and recorders.
    fn on_snapshot(&mut self, _tick: Tick, _graph: &Graph, _drones: &[Drone]) {}

    /// Called once when [`Sim::run`][crate::Sim::run] stops.
    fn on_run_end(&mut self, _outcome: &RunOutcome) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// A [`SimObserver`] that reports progress as `tracing` events.
///
/// One `info` event per tick, a `debug` event per snapshot, and a final
/// `info` summary.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SimObserver for TracingObserver {
    fn on_tick_end(&mut self, result: &TickResult) {
        info!(
            tick    = result.tick.0,
            moves   = result.moves.len(),
            arrived = result.arrived.len(),
            waiting = result.waiting.len(),
            denied  = result.denied.len(),
            errors  = result.errors.len(),
            "Tick"
        );
    }

    fn on_snapshot(&mut self, tick: Tick, graph: &Graph, drones: &[Drone]) {
        let landed = drones.iter().filter(|d| d.is_at_destination()).count();
        debug!(
            tick     = tick.0,
            occupied = graph.total_occupancy(),
            landed,
            drones   = drones.len(),
            "Snapshot"
        );
    }

    fn on_run_end(&mut self, outcome: &RunOutcome) {
        info!(
            ticks     = outcome.ticks,
            arrived   = outcome.arrived,
            drones    = outcome.drones,
            completed = outcome.completed,
            "Run summary"
        );
    }
}
