//! Integration tests for fly-sim.

use fly_core::{AgentId, Planner, SimConfig, Tick, ZoneId};
use fly_drone::{Drone, DroneState, Location, MoveKind};
use fly_spatial::{build_graph, Graph, ZoneDef, ZoneKind};

use crate::{NoopObserver, RunOutcome, Sim, SimBuilder, SimObserver, TickResult};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(max_ticks: u64, avoid_full_zones: bool) -> SimConfig {
    SimConfig {
        max_ticks,
        planner:                 Planner::Weighted,
        restricted_dwell_ticks:  1,
        avoid_full_zones,
        snapshot_interval_ticks: 1,
    }
}

/// A — B — C, capacity 1 each.
fn line() -> Graph {
    build_graph(
        [ZoneDef::new("A", 0, 0), ZoneDef::new("B", 1, 0), ZoneDef::new("C", 2, 0)],
        [("A", "B"), ("B", "C")],
    )
    .unwrap()
}

/// A — R — C with R Restricted.
fn restricted_line() -> Graph {
    build_graph(
        [
            ZoneDef::new("A", 0, 0),
            ZoneDef::new("R", 1, 0).kind(ZoneKind::Restricted),
            ZoneDef::new("C", 2, 0),
        ],
        [("A", "R"), ("R", "C")],
    )
    .unwrap()
}

/// Short Restricted route (cost 5) against a longer Normal one (cost 4).
fn detour() -> Graph {
    build_graph(
        [
            ZoneDef::new("S", 0, 0),
            ZoneDef::new("R1", 1, 1).kind(ZoneKind::Restricted),
            ZoneDef::new("R2", 2, 1).kind(ZoneKind::Restricted),
            ZoneDef::new("N1", 1, -1),
            ZoneDef::new("N2", 2, -1),
            ZoneDef::new("N3", 3, -1),
            ZoneDef::new("G", 4, 0),
        ],
        [
            ("S", "R1"), ("R1", "R2"), ("R2", "G"),
            ("S", "N1"), ("N1", "N2"), ("N2", "N3"), ("N3", "G"),
        ],
    )
    .unwrap()
}

fn z(graph: &Graph, name: &str) -> ZoneId {
    graph.zone_id(name).unwrap()
}

fn sim(graph: Graph, config: SimConfig, drones: usize) -> Sim {
    SimBuilder::new(config, graph, "A", "C").drones(drones).build().unwrap()
}

/// Records every callback.
#[derive(Default)]
struct Recorder {
    starts:    Vec<Tick>,
    results:   Vec<TickResult>,
    snapshots: Vec<Tick>,
    run_ends:  Vec<RunOutcome>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.starts.push(tick);
    }
    fn on_tick_end(&mut self, result: &TickResult) {
        self.results.push(result.clone());
    }
    fn on_snapshot(&mut self, tick: Tick, _graph: &Graph, _drones: &[Drone]) {
        self.snapshots.push(tick);
    }
    fn on_run_end(&mut self, outcome: &RunOutcome) {
        self.run_ends.push(*outcome);
    }
}

/// Checks occupancy and cursor invariants at every snapshot.
#[derive(Default)]
struct InvariantChecker {
    cursors:    Vec<usize>,
    violations: Vec<String>,
    snapshots:  usize,
}

impl SimObserver for InvariantChecker {
    fn on_snapshot(&mut self, tick: Tick, graph: &Graph, drones: &[Drone]) {
        self.snapshots += 1;
        for zone in graph.zones() {
            if zone.occupancy() > zone.capacity() as usize {
                self.violations.push(format!("{tick}: {} over capacity", zone.name()));
            }
            if zone.kind().is_blocked() && zone.occupancy() > 0 {
                self.violations.push(format!("{tick}: blocked {} occupied", zone.name()));
            }
        }
        let holders = drones.iter().filter(|d| d.holding().is_some()).count();
        if holders != graph.total_occupancy() {
            self.violations.push(format!("{tick}: {holders} holders vs {} occupants", graph.total_occupancy()));
        }
        for d in drones {
            if let Some(held) = d.holding() {
                if !graph.zone(held).occupants().contains(&d.id()) {
                    self.violations.push(format!("{tick}: {} not in {held}", d.id()));
                }
            }
            if d.path().iter().any(|&p| graph.zone(p).kind().is_blocked()) {
                self.violations.push(format!("{tick}: {} routed through a blocked zone", d.id()));
            }
        }
        if self.cursors.is_empty() {
            self.cursors = drones.iter().map(Drone::cursor).collect();
        }
        for (i, d) in drones.iter().enumerate() {
            if d.cursor() < self.cursors[i] {
                self.violations.push(format!("{tick}: {} cursor went back", d.id()));
            }
            self.cursors[i] = d.cursor();
        }
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use fly_core::ConfigError;

    use crate::SimError;

    use super::*;

    #[test]
    fn builds_with_defaults() {
        let g = line();
        let a = z(&g, "A");
        let s = SimBuilder::new(SimConfig::default(), g, "A", "C").build().unwrap();
        assert_eq!(s.drones().len(), 1);
        assert_eq!(s.current_tick(), Tick::ZERO);
        assert_eq!(*s.router(), Planner::Weighted);
        let d = &s.drones()[0];
        assert_eq!(d.state(), DroneState::Idle);
        assert_eq!(d.location(), Location::Staged(a));
        assert_eq!(s.graph().total_occupancy(), 0);
    }

    #[test]
    fn router_follows_config_planner() {
        let config = SimConfig { planner: Planner::Reachability, ..SimConfig::default() };
        let s = SimBuilder::new(config, line(), "A", "C").build().unwrap();
        assert_eq!(*s.router(), Planner::Reachability);
    }

    #[test]
    fn drone_ids_are_dense() {
        let s = sim(line(), SimConfig::default(), 4);
        for (i, d) in s.drones().iter().enumerate() {
            assert_eq!(d.id(), AgentId(i as u32));
        }
        assert!(s.drone(AgentId(3)).is_some());
        assert!(s.drone(AgentId(4)).is_none());
    }

    #[test]
    fn zero_drones_rejected() {
        let err = SimBuilder::new(SimConfig::default(), line(), "A", "C").drones(0).build().err();
        assert_eq!(err, Some(SimError::Config(ConfigError::InvalidAgentCount(0))));
    }

    #[test]
    fn unknown_endpoints_rejected() {
        let err = SimBuilder::new(SimConfig::default(), line(), "X", "C").build().err();
        assert_eq!(err, Some(SimError::Config(ConfigError::UnknownZone("X".into()))));
        let err = SimBuilder::new(SimConfig::default(), line(), "A", "Y").build().err();
        assert_eq!(err, Some(SimError::Config(ConfigError::UnknownZone("Y".into()))));
    }

    #[test]
    fn blocked_endpoint_rejected() {
        let g = build_graph(
            [ZoneDef::new("A", 0, 0), ZoneDef::new("X", 1, 0).kind(ZoneKind::Blocked)],
            [("A", "X")],
        )
        .unwrap();
        let err = SimBuilder::new(SimConfig::default(), g, "A", "X").build().err();
        assert_eq!(
            err,
            Some(SimError::Config(ConfigError::BlockedEndpoint { role: "goal", zone: "X".into() }))
        );
    }

    #[test]
    fn reachability_checked_only_on_request() {
        let disconnected = || {
            build_graph([ZoneDef::new("A", 0, 0), ZoneDef::new("C", 5, 5)], Vec::<(&str, &str)>::new())
                .unwrap()
        };
        assert!(SimBuilder::new(SimConfig::default(), disconnected(), "A", "C").build().is_ok());

        let err = SimBuilder::new(SimConfig::default(), disconnected(), "A", "C")
            .require_reachable(true)
            .build()
            .err();
        assert_eq!(
            err,
            Some(SimError::Config(ConfigError::Unreachable { start: "A".into(), goal: "C".into() }))
        );
    }

    #[test]
    fn explicit_router_replaces_planner() {
        let mut s = SimBuilder::new(SimConfig::default(), detour(), "S", "G")
            .router(fly_spatial::BfsRouter)
            .build()
            .unwrap();
        s.step();
        // Fewest hops goes through the Restricted side.
        let r1 = z(s.graph(), "R1");
        assert_eq!(s.drones()[0].next_zone(), Some(r1));
        assert_eq!(s.drones()[0].transit().map(|t| t.target), Some(r1));
    }

    #[test]
    fn error_message_names_zone() {
        let err = SimBuilder::new(SimConfig::default(), line(), "nowhere", "C").build().err().unwrap();
        assert!(err.to_string().contains("nowhere"));
    }
}

// ── Reference scenarios ───────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use fly_spatial::{BfsRouter, DijkstraRouter, Router, ZoneSet};

    use super::*;

    #[test]
    fn single_drone_on_a_line() {
        let g = line();
        let [a, b, c] = [z(&g, "A"), z(&g, "B"), z(&g, "C")];
        let mut s = sim(g, SimConfig::default(), 1);

        let r1 = s.step();
        assert_eq!(s.drones()[0].path(), &[a, b, c]);
        assert_eq!(s.drones()[0].location(), Location::At(b));
        assert_eq!(r1.moves.len(), 1);
        assert_eq!((r1.moves[0].from, r1.moves[0].to), (a, b));
        assert!(r1.arrived.is_empty());

        let r2 = s.step();
        assert!(r2.arrived.contains(&AgentId(0)));
        assert!(s.drones()[0].is_at_destination());
        assert_eq!(s.drones()[0].location(), Location::Landed(c));
        assert!(s.all_arrived());
        assert_eq!(s.graph().total_occupancy(), 0);
    }

    #[test]
    fn contention_defers_higher_id_with_blind_planning() {
        let g = line();
        let b = z(&g, "B");
        let mut s = sim(g, test_config(50, false), 2);

        let r1 = s.step();
        assert_eq!(s.drones()[0].location(), Location::At(b));
        assert!(r1.denied.contains(&AgentId(1)));
        assert!(r1.waiting.contains(&AgentId(1)));
        assert_eq!(s.drones()[1].state(), DroneState::Waiting);
        assert_eq!(s.graph().zone(b).occupancy(), 1);

        let r2 = s.step();
        assert!(r2.arrived.contains(&AgentId(0)));
        assert_eq!(s.drones()[1].location(), Location::At(b));
        assert!(r2.denied.is_empty());

        let r3 = s.step();
        assert!(r3.arrived.contains(&AgentId(1)));
        assert!(s.all_arrived());
    }

    #[test]
    fn contention_with_congestion_avoidance() {
        let mut s = sim(line(), test_config(50, true), 2);

        let r1 = s.step();
        // Drone 1 routes around the full zone, finds nothing, and waits
        // without attempting entry.
        assert!(r1.denied.is_empty());
        assert!(r1.waiting.contains(&AgentId(1)));

        let mut checker = InvariantChecker::default();
        let outcome = s.run(&mut checker);
        assert!(outcome.completed);
        assert_eq!(outcome.end_tick, Tick(3));
        assert!(checker.violations.is_empty(), "{:?}", checker.violations);
    }

    #[test]
    fn disconnected_goal_waits_forever() {
        let g = build_graph(
            [ZoneDef::new("A", 0, 0), ZoneDef::new("M", 1, 0), ZoneDef::new("C", 9, 9)],
            [("A", "M")],
        )
        .unwrap();
        let [a, c] = [z(&g, "A"), z(&g, "C")];
        assert!(DijkstraRouter.route(&g, a, c, &ZoneSet::default()).is_none());
        assert!(BfsRouter.route(&g, a, c, &ZoneSet::default()).is_none());

        let mut s = sim(g, test_config(20, true), 1);
        let mut recorder = Recorder::default();
        let outcome = s.run(&mut recorder);

        assert!(!outcome.completed);
        assert_eq!(outcome.ticks, 20);
        assert_eq!(outcome.errors, 0);
        assert_eq!(s.drones()[0].state(), DroneState::Waiting);
        assert_eq!(s.drones()[0].location(), Location::Staged(a));
        assert!(recorder.results.iter().all(|r| r.waiting.contains(&AgentId(0)) && r.moves.is_empty()));
    }

    #[test]
    fn weighted_planner_prefers_cheaper_longer_route() {
        let g = detour();
        let expected: Vec<ZoneId> = ["S", "N1", "N2", "N3", "G"].iter().map(|n| z(&g, n)).collect();
        let mut s = SimBuilder::new(SimConfig::default(), g, "S", "G").build().unwrap();

        let outcome = s.run(&mut NoopObserver);
        assert!(outcome.completed);
        assert_eq!(s.drones()[0].path(), expected.as_slice());
        assert_eq!(outcome.ticks, 4);
    }

    #[test]
    fn reachability_planner_takes_fewest_hops() {
        let g = detour();
        let expected: Vec<ZoneId> = ["S", "R1", "R2", "G"].iter().map(|n| z(&g, n)).collect();
        let config = SimConfig { planner: Planner::Reachability, ..SimConfig::default() };
        let mut s = SimBuilder::new(config, g, "S", "G").build().unwrap();

        let outcome = s.run(&mut NoopObserver);
        assert!(outcome.completed);
        assert_eq!(s.drones()[0].path(), expected.as_slice());
        // Two Restricted hops of two ticks each, then one plain hop.
        assert_eq!(outcome.ticks, 5);
    }

    #[test]
    fn start_equals_goal_lands_immediately() {
        let mut s = SimBuilder::new(SimConfig::default(), line(), "B", "B").drones(3).build().unwrap();
        let r = s.step();
        assert_eq!(r.arrived.len(), 3);
        assert!(r.moves.is_empty());
        assert!(s.all_arrived());
    }
}

// ── Restricted dwell timing ───────────────────────────────────────────────────

#[cfg(test)]
mod restricted {
    use super::*;

    #[test]
    fn restricted_hop_takes_two_ticks() {
        let g = restricted_line();
        let [a, r, c] = [z(&g, "A"), z(&g, "R"), z(&g, "C")];
        let mut s = sim(g, SimConfig::default(), 1);

        let t0 = s.step();
        assert_eq!(t0.moves[0].kind, MoveKind::TransitStart);
        assert_eq!(s.drones()[0].location(), Location::Transit { from: a, to: r });
        assert_eq!(s.graph().zone(r).occupancy(), 1);

        let t1 = s.step();
        assert_eq!(t1.moves[0].kind, MoveKind::TransitEnd);
        assert_eq!(t1.moves.len(), 1);
        assert_eq!(s.drones()[0].location(), Location::At(r));

        let t2 = s.step();
        assert_eq!(t2.moves[0].kind, MoveKind::Step);
        assert!(t2.arrived.contains(&AgentId(0)));
        assert_eq!(s.drones()[0].location(), Location::Landed(c));
    }

    #[test]
    fn zero_dwell_disables_transit() {
        let config = SimConfig { restricted_dwell_ticks: 0, ..SimConfig::default() };
        let mut s = sim(restricted_line(), config, 1);
        let outcome = s.run(&mut NoopObserver);
        assert!(outcome.completed);
        assert_eq!(outcome.ticks, 2);
    }

    #[test]
    fn longer_dwell_delays_arrival() {
        let config = SimConfig { restricted_dwell_ticks: 3, ..SimConfig::default() };
        let mut s = sim(restricted_line(), config, 1);
        let outcome = s.run(&mut NoopObserver);
        assert_eq!(outcome.ticks, 5);
    }

    #[test]
    fn transit_reserves_restricted_slot() {
        let g = restricted_line();
        let r = z(&g, "R");
        let mut s = sim(g, test_config(50, false), 2);

        let t0 = s.step();
        assert!(t0.denied.contains(&AgentId(1)));
        assert_eq!(s.graph().zone(r).occupants().iter().copied().collect::<Vec<_>>(), vec![AgentId(0)]);

        let outcome = s.run(&mut NoopObserver);
        assert!(outcome.completed);
    }
}

// ── Scheduler ordering and invariants ─────────────────────────────────────────

#[cfg(test)]
mod scheduling {
    use crate::{tick, TickError};

    use super::*;

    #[test]
    fn ascending_id_wins_regardless_of_slice_order() {
        let mut g = line();
        let [a, c] = [z(&g, "A"), z(&g, "C")];
        let mut drones = vec![Drone::new(AgentId(1), a, c), Drone::new(AgentId(0), a, c)];
        let config = test_config(10, false);

        let result = tick(&mut g, &mut drones, &Planner::Weighted, &config, Tick(0));
        assert_eq!(result.moves.len(), 1);
        assert_eq!(result.moves[0].agent, AgentId(0));
        assert!(result.denied.contains(&AgentId(1)));
        assert_eq!(drones[0].state(), DroneState::Waiting);
        assert_eq!(drones[1].state(), DroneState::Moving);
    }

    #[test]
    fn duplicate_ids_reported() {
        let mut g = line();
        let [a, c] = [z(&g, "A"), z(&g, "C")];
        let mut drones = vec![Drone::new(AgentId(0), a, c), Drone::new(AgentId(0), a, c)];
        let result = tick(&mut g, &mut drones, &Planner::Weighted, &SimConfig::default(), Tick(0));
        assert_eq!(result.errors, vec![TickError::DuplicateAgent(AgentId(0))]);
        assert_eq!(result.moves.len(), 1);
        assert_eq!(g.total_occupancy(), 1);
    }

    /// Always answers with a one-hop route to `B`, whatever the goal.
    struct StopsShort;

    impl fly_spatial::Router for StopsShort {
        fn route(
            &self,
            graph:     &Graph,
            from:      ZoneId,
            _to:       ZoneId,
            _excluded: &fly_spatial::ZoneSet,
        ) -> Option<fly_spatial::Route> {
            let b = graph.zone_id("B")?;
            Some(fly_spatial::Route::from_zones(graph, vec![from, b]))
        }
    }

    #[test]
    fn route_ending_off_goal_never_lands() {
        let g = line();
        let [a, c] = [z(&g, "A"), z(&g, "C")];
        let mut s = SimBuilder::new(SimConfig::default(), g, "A", "C")
            .router(StopsShort)
            .build()
            .unwrap();

        let first = s.step();
        let second = s.step();
        for result in [&first, &second] {
            assert!(result.arrived.is_empty());
            assert!(result.moves.is_empty());
            assert!(result.waiting.contains(&AgentId(0)));
            assert!(matches!(
                result.errors.as_slice(),
                [TickError::Drone(fly_drone::DroneError::RouteGoalMismatch { found, .. })] if *found != c
            ));
        }
        let d = &s.drones()[0];
        assert_eq!(d.state(), DroneState::Waiting);
        assert!(!d.is_at_destination());
        assert_eq!(d.location(), Location::Staged(a));
        assert_eq!(s.graph().total_occupancy(), 0);
    }

    #[test]
    fn desync_surfaces_as_tick_error() {
        let mut g = line();
        let [a, b, c] = [z(&g, "A"), z(&g, "B"), z(&g, "C")];
        let mut drones = vec![Drone::new(AgentId(0), a, c)];
        let config = SimConfig::default();
        tick(&mut g, &mut drones, &Planner::Weighted, &config, Tick(0));
        g.vacate(b, AgentId(0));

        let result = tick(&mut g, &mut drones, &Planner::Weighted, &config, Tick(1));
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(result.errors[0], TickError::Drone(_)));
        assert!(result.moves.is_empty());
    }

    #[test]
    fn arrived_drones_are_skipped() {
        let mut s = sim(line(), SimConfig::default(), 1);
        s.run(&mut NoopObserver);
        let r = s.step();
        assert!(r.is_idle());
        assert!(r.waiting.is_empty());
    }

    #[test]
    fn runs_are_deterministic() {
        let record = || {
            let mut s = SimBuilder::new(SimConfig::default(), detour(), "S", "G").drones(5).build().unwrap();
            let mut recorder = Recorder::default();
            let outcome = s.run(&mut recorder);
            (outcome, recorder.results, s.drones().to_vec())
        };
        assert_eq!(record(), record());
    }

    #[test]
    fn many_drones_through_bottleneck_respect_capacity() {
        let g = build_graph(
            [
                ZoneDef::new("A", 0, 0),
                ZoneDef::new("B", 1, 0).capacity(2),
                ZoneDef::new("C", 2, 0),
                ZoneDef::new("D", 3, 0),
            ],
            [("A", "B"), ("B", "C"), ("C", "D")],
        )
        .unwrap();
        for avoid in [true, false] {
            let mut s = SimBuilder::new(test_config(100, avoid), g.clone(), "A", "D")
                .drones(6)
                .build()
                .unwrap();
            let mut checker = InvariantChecker::default();
            let outcome = s.run(&mut checker);
            assert!(outcome.completed, "avoid_full_zones = {avoid}");
            assert!(checker.violations.is_empty(), "{:?}", checker.violations);
        }
    }
}

// ── Observers and run loop ────────────────────────────────────────────────────

#[cfg(test)]
mod run_loop {
    use crate::TracingObserver;

    use super::*;

    #[test]
    fn callbacks_fire_in_order() {
        let mut s = sim(line(), SimConfig::default(), 1);
        let mut recorder = Recorder::default();
        let outcome = s.run(&mut recorder);

        assert_eq!(recorder.starts, vec![Tick(0), Tick(1)]);
        assert_eq!(recorder.results.iter().map(|r| r.tick).collect::<Vec<_>>(), vec![Tick(0), Tick(1)]);
        assert_eq!(recorder.snapshots, vec![Tick(0), Tick(1)]);
        assert_eq!(recorder.run_ends, vec![outcome]);
        assert_eq!(outcome.start_tick, Tick(0));
        assert_eq!(outcome.end_tick, Tick(2));
        assert_eq!(outcome.arrived, 1);
    }

    #[test]
    fn snapshot_interval_respected() {
        let config = SimConfig { snapshot_interval_ticks: 3, ..test_config(10, true) };
        let g = build_graph([ZoneDef::new("A", 0, 0), ZoneDef::new("C", 1, 1)], Vec::<(&str, &str)>::new())
            .unwrap();
        let mut s = sim(g, config, 1);
        let mut recorder = Recorder::default();
        s.run(&mut recorder);
        assert_eq!(recorder.snapshots, vec![Tick(0), Tick(3), Tick(6), Tick(9)]);
    }

    #[test]
    fn zero_interval_disables_snapshots() {
        let config = SimConfig { snapshot_interval_ticks: 0, ..SimConfig::default() };
        let mut s = sim(line(), config, 1);
        let mut recorder = Recorder::default();
        s.run(&mut recorder);
        assert!(recorder.snapshots.is_empty());
    }

    #[test]
    fn run_ticks_ignores_completion_and_budget() {
        let mut s = sim(line(), test_config(1, true), 1);
        let mut recorder = Recorder::default();
        let outcome = s.run_ticks(4, &mut recorder);
        assert_eq!(outcome.ticks, 4);
        assert!(outcome.completed);
        assert_eq!(s.current_tick(), Tick(4));
        assert!(recorder.run_ends.is_empty());
    }

    #[test]
    fn budget_stops_unfinished_run() {
        let mut s = sim(line(), test_config(1, true), 1);
        let outcome = s.run(&mut NoopObserver);
        assert!(!outcome.completed);
        assert_eq!(outcome.ticks, 1);
        assert_eq!(outcome.arrived, 0);

        // Resuming past the budget is a no-op.
        let again = s.run(&mut NoopObserver);
        assert_eq!(again.ticks, 0);
    }

    #[test]
    fn tracing_observer_runs_without_subscriber() {
        let mut s = sim(line(), SimConfig::default(), 2);
        assert!(s.run(&mut TracingObserver).completed);
    }
}

// ── Seeded stress ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod stress {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    /// A random connected-ish map: a chain 0..n with extra random chords and
    /// a sprinkle of non-Normal zones.  The first and last zones are Normal
    /// with room for every drone.
    fn random_graph(rng: &mut SmallRng, drones: u32) -> Graph {
        let n = rng.gen_range(5..14);
        let zones: Vec<ZoneDef> = (0..n)
            .map(|i| {
                let name = format!("z{i}");
                if i == 0 || i == n - 1 {
                    return ZoneDef::new(name, i, 0).capacity(drones);
                }
                let kind = match rng.gen_range(0..10) {
                    0 => ZoneKind::Blocked,
                    1 | 2 => ZoneKind::Restricted,
                    3 => ZoneKind::Priority,
                    _ => ZoneKind::Normal,
                };
                ZoneDef::new(name, i, rng.gen_range(-3..=3))
                    .capacity(rng.gen_range(1..=3))
                    .kind(kind)
            })
            .collect();

        let mut connections: Vec<(String, String)> =
            (1..n).map(|i| (format!("z{}", i - 1), format!("z{i}"))).collect();
        for _ in 0..rng.gen_range(0..n) {
            let a = rng.gen_range(0..n);
            let b = rng.gen_range(0..n);
            connections.push((format!("z{a}"), format!("z{b}")));
        }
        build_graph(zones, connections).unwrap()
    }

    #[test]
    fn occupancy_invariants_hold_on_random_maps() {
        for seed in 0..40_u64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let drones = rng.gen_range(1..=8);
            let graph = random_graph(&mut rng, drones);
            let goal = format!("z{}", graph.zone_count() - 1);

            let config = SimConfig {
                max_ticks:               300,
                planner:                 if rng.gen_bool(0.5) { Planner::Weighted } else { Planner::Reachability },
                restricted_dwell_ticks:  rng.gen_range(0..=2),
                avoid_full_zones:        rng.gen_bool(0.5),
                snapshot_interval_ticks: 1,
            };
            let mut s = SimBuilder::new(config.clone(), graph, "z0", goal)
                .drones(drones as usize)
                .build()
                .unwrap();

            let mut checker = InvariantChecker::default();
            let outcome = s.run(&mut checker);

            assert!(checker.violations.is_empty(), "seed {seed} {config:?}: {:?}", checker.violations);
            assert_eq!(outcome.errors, 0, "seed {seed}");
            assert_eq!(checker.snapshots as u64, outcome.ticks, "seed {seed}");
            if outcome.completed {
                assert_eq!(s.graph().total_occupancy(), 0, "seed {seed}");
            }
        }
    }
}
