//! The `Sim` struct and its run loop.

use tracing::info;

use fly_core::{AgentId, Planner, SimConfig, Tick};
use fly_drone::Drone;
use fly_spatial::{Graph, Router};

use crate::{scheduler, SimObserver, TickResult};

/// Summary of a [`Sim::run`] or [`Sim::run_ticks`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// First tick processed by the call.
    pub start_tick: Tick,
    /// The tick the simulation will process next.
    pub end_tick:   Tick,
    /// Ticks processed by the call.
    pub ticks:      u64,
    /// Drones Arrived when the call returned.
    pub arrived:    usize,
    /// Total drones.
    pub drones:     usize,
    /// `true` if every drone is Arrived.
    pub completed:  bool,
    /// Structural tick errors seen during the call.
    pub errors:     usize,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation runner.
///
/// `Sim<R>` owns the graph and the drones and advances them one tick at a
/// time with [`scheduler::tick`].  Only shared references to either ever leave
/// the struct, so occupancy can only change through ticking.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<R: Router = Planner> {
    pub(crate) config: SimConfig,
    pub(crate) graph:  Graph,
    /// Sorted by ascending id.
    pub(crate) drones: Vec<Drone>,
    pub(crate) router: R,
    pub(crate) now:    Tick,
}

impl<R: Router> Sim<R> {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// All drones in id order.
    pub fn drones(&self) -> &[Drone] {
        &self.drones
    }

    pub fn drone(&self, id: AgentId) -> Option<&Drone> {
        self.drones.get(id.index()).filter(|d| d.id() == id)
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    /// The tick the next call to [`step`](Self::step) will process.
    pub fn current_tick(&self) -> Tick {
        self.now
    }

    pub fn arrived_count(&self) -> usize {
        self.drones.iter().filter(|d| d.is_at_destination()).count()
    }

    pub fn all_arrived(&self) -> bool {
        self.drones.iter().all(Drone::is_at_destination)
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Process a single tick with no observer.
    pub fn step(&mut self) -> TickResult {
        let now = self.now;
        let result = scheduler::tick(&mut self.graph, &mut self.drones, &self.router, &self.config, now);
        self.now = now.next();
        result
    }

    /// Run until every drone has arrived or `config.end_tick()` is reached.
    ///
    /// A run that stalls (drones Waiting on a route that never frees up)
    /// simply burns ticks until the budget is spent; `completed` is then
    /// `false`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> RunOutcome {
        let start = self.now;
        info!(
            tick    = start.0,
            drones  = self.drones.len(),
            zones   = self.graph.zone_count(),
            budget  = self.config.max_ticks,
            "Run started"
        );

        let mut errors = 0;
        while !self.all_arrived() && self.now < self.config.end_tick() {
            errors += self.observed_step(observer).errors.len();
        }

        let outcome = self.outcome(start, errors);
        if outcome.completed {
            info!(tick = self.now.0, ticks = outcome.ticks, "All drones arrived");
        } else {
            info!(
                tick    = self.now.0,
                arrived = outcome.arrived,
                drones  = outcome.drones,
                "Tick budget exhausted"
            );
        }
        observer.on_run_end(&outcome);
        outcome
    }

    /// Run exactly `n` ticks from the current position, ignoring both the
    /// tick budget and completion.
    ///
    /// Useful for tests and incremental stepping.  Does not call
    /// `on_run_end`.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> RunOutcome {
        let start = self.now;
        let mut errors = 0;
        for _ in 0..n {
            errors += self.observed_step(observer).errors.len();
        }
        self.outcome(start, errors)
    }

    fn observed_step<O: SimObserver>(&mut self, observer: &mut O) -> TickResult {
        let now = self.now;
        observer.on_tick_start(now);
        let result = self.step();
        observer.on_tick_end(&result);
        if self.config.is_snapshot_tick(now) {
            observer.on_snapshot(now, &self.graph, &self.drones);
        }
        result
    }

    fn outcome(&self, start: Tick, errors: usize) -> RunOutcome {
        let arrived = self.arrived_count();
        RunOutcome {
            start_tick: start,
            end_tick:   self.now,
            ticks:      self.now.since(start),
            arrived,
            drones:     self.drones.len(),
            completed:  arrived == self.drones.len(),
            errors,
        }
    }
}
