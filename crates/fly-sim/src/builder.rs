//! Fluent builder for constructing a [`Sim`].

use tracing::debug;

use fly_core::{AgentId, ConfigError, Planner, SimConfig, Tick, ZoneId};
use fly_drone::Drone;
use fly_spatial::{is_reachable, Graph, Router};

use crate::{Sim, SimResult};

/// Fluent builder for [`Sim<R>`].
///
/// # Required inputs
///
/// - [`SimConfig`]
/// - a [`Graph`], e.g. from [`fly_spatial::build_graph`]
/// - start and goal zone names
///
/// # Optional inputs (have defaults)
///
/// | Method                     | Default                            |
/// |----------------------------|------------------------------------|
/// | `.drones(n)`               | 1                                  |
/// | `.require_reachable(b)`    | `false`                            |
/// | `.router(r)`               | `config.planner`                   |
///
/// # Example
///
/// ```rust
/// use fly_core::SimConfig;
/// use fly_sim::{NoopObserver, SimBuilder};
/// use fly_spatial::{build_graph, ZoneDef};
///
/// let graph = build_graph(
///     [ZoneDef::new("A", 0, 0), ZoneDef::new("B", 1, 0), ZoneDef::new("C", 2, 0)],
///     [("A", "B"), ("B", "C")],
/// ).unwrap();
/// let mut sim = SimBuilder::new(SimConfig::default(), graph, "A", "C")
///     .drones(2)
///     .build()
///     .unwrap();
/// let outcome = sim.run(&mut NoopObserver);
/// assert!(outcome.completed);
/// ```
pub struct SimBuilder<R: Router = Planner> {
    config:            SimConfig,
    graph:             Graph,
    start:             String,
    goal:              String,
    drones:            usize,
    require_reachable: bool,
    router:            R,
}

impl SimBuilder<Planner> {
    /// Create a builder with all required inputs.  Re-planning uses
    /// `config.planner` unless [`router`](Self::router) is called.
    pub fn new(
        config: SimConfig,
        graph:  Graph,
        start:  impl Into<String>,
        goal:   impl Into<String>,
    ) -> Self {
        let router = config.planner;
        Self {
            config,
            graph,
            start:             start.into(),
            goal:              goal.into(),
            drones:            1,
            require_reachable: false,
            router,
        }
    }
}

impl<R: Router> SimBuilder<R> {
    /// Number of drones, all launched from the start zone.
    pub fn drones(mut self, n: usize) -> Self {
        self.drones = n;
        self
    }

    /// Reject scenarios whose goal cannot be reached from the start even on
    /// an empty map.  Off by default; an unreachable goal then just leaves
    /// every drone Waiting.
    pub fn require_reachable(mut self, yes: bool) -> Self {
        self.require_reachable = yes;
        self
    }

    /// Replace the route finder.
    pub fn router<R2: Router>(self, router: R2) -> SimBuilder<R2> {
        SimBuilder {
            config:            self.config,
            graph:             self.graph,
            start:             self.start,
            goal:              self.goal,
            drones:            self.drones,
            require_reachable: self.require_reachable,
            router,
        }
    }

    /// Validate the scenario and return a ready-to-run [`Sim`] at tick 0.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`][crate::SimError::Config] wrapping
    /// - [`ConfigError::InvalidAgentCount`] for zero drones (or more than
    ///   ids can number),
    /// - [`ConfigError::UnknownZone`] for a start or goal not in the graph,
    /// - [`ConfigError::BlockedEndpoint`] for a Blocked start or goal,
    /// - [`ConfigError::Unreachable`] when `require_reachable` is set and
    ///   the goal is topologically cut off.
    pub fn build(self) -> SimResult<Sim<R>> {
        let count = self.drones;
        if count == 0 || AgentId::try_from(count).is_err() {
            return Err(ConfigError::InvalidAgentCount(count).into());
        }

        let start = endpoint(&self.graph, &self.start, "start")?;
        let goal  = endpoint(&self.graph, &self.goal, "goal")?;

        if self.require_reachable && !is_reachable(&self.graph, start, goal) {
            return Err(ConfigError::Unreachable { start: self.start, goal: self.goal }.into());
        }

        let drones: Vec<Drone> = (0..count as u32)
            .map(|i| Drone::new(AgentId(i), start, goal))
            .collect();

        debug!(
            drones = count,
            start  = %self.start,
            goal   = %self.goal,
            zones  = self.graph.zone_count(),
            "Scenario validated"
        );

        Ok(Sim {
            config: self.config,
            graph:  self.graph,
            drones,
            router: self.router,
            now:    Tick::ZERO,
        })
    }
}

/// Resolve a start or goal name and check it can hold a drone.
fn endpoint(graph: &Graph, name: &str, role: &'static str) -> Result<ZoneId, ConfigError> {
    let id = graph
        .zone_id(name)
        .ok_or_else(|| ConfigError::UnknownZone(name.to_owned()))?;
    if graph.zone(id).kind().is_blocked() {
        return Err(ConfigError::BlockedEndpoint { role, zone: name.to_owned() });
    }
    Ok(id)
}
