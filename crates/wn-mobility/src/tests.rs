//! Unit tests for wn-mobility.

use wn_core::{NodeId, NodeRng, SimTime, Vec3};

use crate::{Boundary, MobilityEngine, MobilityError, Phase, RandomWaypointConfig};

// ── Helpers ───────────────────────────────────────────────────────────────────

const SEED: u64 = 42;

fn square(side: f64) -> Boundary {
    Boundary::Rectangle { center_x: 0.0, center_y: 0.0, width: side, height: side }
}

fn config(speed_min: f64, speed_max: f64, pause: f64, boundary: Boundary) -> RandomWaypointConfig {
    RandomWaypointConfig { speed_min, speed_max, pause_duration: pause, boundary }
}

fn engine_with(cfg: RandomWaypointConfig) -> MobilityEngine {
    MobilityEngine::new(NodeId(0), cfg, Vec3::ZERO, 0.0, NodeRng::new(SEED, NodeId(0))).unwrap()
}

/// 1 km square, 1–5 m/s, 2 s pause.
fn default_engine() -> MobilityEngine {
    engine_with(config(1.0, 5.0, 2.0, square(1_000.0)))
}

// ── Config validation ─────────────────────────────────────────────────────────

#[cfg(test)]
mod validation {
    use super::*;

    fn rejects(cfg: RandomWaypointConfig) {
        let result = MobilityEngine::new(
            NodeId(0), cfg, Vec3::ZERO, 0.0, NodeRng::new(SEED, NodeId(0)),
        );
        assert!(matches!(result, Err(MobilityError::Config(_))));
    }

    #[test]
    fn accepts_valid_config() {
        assert!(config(1.0, 5.0, 0.0, square(10.0)).validate().is_ok());
    }

    #[test]
    fn equal_speed_bounds_allowed() {
        assert!(config(1.0, 1.0, 0.0, square(10.0)).validate().is_ok());
    }

    #[test]
    fn non_positive_min_speed_rejected() {
        rejects(config(0.0, 5.0, 1.0, square(10.0)));
        rejects(config(-1.0, 5.0, 1.0, square(10.0)));
    }

    #[test]
    fn inverted_speed_range_rejected() {
        rejects(config(5.0, 1.0, 1.0, square(10.0)));
    }

    #[test]
    fn non_finite_speed_rejected() {
        rejects(config(1.0, f64::INFINITY, 1.0, square(10.0)));
        rejects(config(f64::NAN, 2.0, 1.0, square(10.0)));
    }

    #[test]
    fn negative_pause_rejected() {
        rejects(config(1.0, 2.0, -0.1, square(10.0)));
    }

    #[test]
    fn degenerate_boundaries_rejected() {
        rejects(config(1.0, 2.0, 1.0, square(0.0)));
        rejects(config(1.0, 2.0, 1.0, Boundary::Rectangle {
            center_x: 0.0, center_y: 0.0, width: 10.0, height: -1.0,
        }));
        rejects(config(1.0, 2.0, 1.0, Boundary::Circle {
            center_x: 0.0, center_y: 0.0, radius: 0.0,
        }));
    }

    #[test]
    fn non_finite_start_rejected() {
        let result = MobilityEngine::new(
            NodeId(0),
            config(1.0, 2.0, 1.0, square(10.0)),
            Vec3::new(f64::NAN, 0.0, 0.0),
            0.0,
            NodeRng::new(SEED, NodeId(0)),
        );
        assert!(result.is_err());
    }
}

// ── Boundary sampling ─────────────────────────────────────────────────────────

#[cfg(test)]
mod boundary {
    use super::*;

    #[test]
    fn rectangle_corners() {
        let b = Boundary::Rectangle { center_x: 10.0, center_y: -5.0, width: 4.0, height: 2.0 };
        assert_eq!(b.sample([0.0, 0.0], 3.0), Vec3::new(8.0, -6.0, 3.0));
        assert_eq!(b.sample([0.5, 0.5], 3.0), Vec3::new(10.0, -5.0, 3.0));
    }

    #[test]
    fn circle_samples_stay_inside() {
        let b = Boundary::Circle { center_x: 1.0, center_y: 2.0, radius: 50.0 };
        let mut rng = NodeRng::new(SEED, NodeId(3));
        for _ in 0..10_000 {
            let p = b.sample(rng.random(), 0.0);
            assert!(b.contains(p), "{p} escaped the circle");
        }
    }

    #[test]
    fn circle_sampling_uniform_in_area() {
        // Half the area of a disc lies within R / sqrt(2) of its center.
        let b = Boundary::Circle { center_x: 0.0, center_y: 0.0, radius: 1.0 };
        let mut rng = NodeRng::new(SEED, NodeId(4));
        let n = 40_000;
        let inner = (0..n)
            .filter(|_| b.sample(rng.random(), 0.0).norm() < std::f64::consts::FRAC_1_SQRT_2)
            .count();
        let frac = inner as f64 / n as f64;
        assert!((frac - 0.5).abs() < 0.02, "inner fraction {frac}");
    }
}

// ── Engine state machine ──────────────────────────────────────────────────────

#[cfg(test)]
mod engine {
    use super::*;

    #[test]
    fn starts_paused_at_initial_position() {
        let mut eng = default_engine();
        assert!(eng.is_paused());
        assert_eq!(eng.position(0.0).unwrap(), Vec3::ZERO);
        assert_eq!(eng.velocity(0.0).unwrap(), Vec3::ZERO);
    }

    #[test]
    fn first_query_after_start_begins_moving() {
        let mut eng = default_engine();
        eng.position(0.001).unwrap();
        assert!(matches!(eng.phase(), Phase::Moving { .. }));
        assert!(eng.waypoint_speed() >= 1.0 && eng.waypoint_speed() <= 5.0);
        assert!(square(1_000.0).contains(eng.waypoint()));
    }

    #[test]
    fn repeated_query_is_idempotent() {
        let mut eng = default_engine();
        let a = eng.kinematics(12.5).unwrap();
        let waypoint = eng.waypoint();
        let b = eng.kinematics(12.5).unwrap();
        assert_eq!(a, b);
        assert_eq!(eng.waypoint(), waypoint);
    }

    #[test]
    fn backwards_query_rejected() {
        let mut eng = default_engine();
        eng.position(10.0).unwrap();
        let err = eng.position(9.0).unwrap_err();
        assert!(matches!(err, MobilityError::TimeReversal { requested, last_update, .. }
            if requested == 9.0 && last_update == 10.0));
        // State is untouched by the rejected call.
        assert_eq!(eng.last_update(), 10.0);
    }

    #[test]
    fn nan_query_rejected() {
        let mut eng = default_engine();
        assert!(eng.position(f64::NAN).is_err());
    }

    #[test]
    fn altitude_never_changes() {
        let cfg = config(1.0, 5.0, 0.5, square(200.0));
        let mut eng = MobilityEngine::new(
            NodeId(1), cfg, Vec3::new(0.0, 0.0, 25.0), 0.0, NodeRng::new(SEED, NodeId(1)),
        )
        .unwrap();
        for i in 1..500 {
            let k = eng.kinematics(i as f64 * 3.7).unwrap();
            assert_eq!(k.position.z, 25.0);
            assert_eq!(k.velocity.z, 0.0);
        }
    }

    #[test]
    fn velocity_zero_while_paused() {
        let mut eng = engine_with(config(1.0, 5.0, 30.0, square(100.0)));
        eng.position(0.001).unwrap();
        let Phase::Moving { arrive_at } = eng.phase() else { panic!("expected moving") };
        // Midway through the following pause.
        let v = eng.velocity(arrive_at + 15.0).unwrap();
        assert!(eng.is_paused());
        assert_eq!(v, Vec3::ZERO);
        assert_eq!(eng.position(arrive_at + 15.0).unwrap(), eng.waypoint());
    }

    #[test]
    fn pause_then_move_again() {
        let mut eng = engine_with(config(1.0, 5.0, 10.0, square(100.0)));
        eng.position(0.001).unwrap();
        let Phase::Moving { arrive_at } = eng.phase() else { panic!("expected moving") };
        let first = eng.waypoint();

        eng.position(arrive_at + 10.0).unwrap();
        assert_eq!(eng.phase(), Phase::Paused { until: arrive_at + 10.0 });

        eng.position(arrive_at + 10.5).unwrap();
        assert!(matches!(eng.phase(), Phase::Moving { .. }));
        assert_ne!(eng.waypoint(), first);
        assert_eq!(eng.stats().waypoints_reached, 1);
    }

    #[test]
    fn zero_distance_leg_is_instant_reach() {
        let mut eng = default_engine();
        eng.start_leg(Vec3::ZERO, 3.0, 0.0);

        assert_eq!(eng.phase(), Phase::Moving { arrive_at: 0.0 });
        assert_eq!(eng.total_distance(), 0.0);
        assert_eq!(eng.velocity(0.0).unwrap(), Vec3::ZERO);

        // The next query snaps straight into the pause at the waypoint.
        assert_eq!(eng.position(0.5).unwrap(), Vec3::ZERO);
        assert_eq!(eng.phase(), Phase::Paused { until: 2.0 });
        assert_eq!(eng.stats().waypoints_reached, 1);
        assert_eq!(eng.stats().distance_covered, 0.0);
        assert_eq!(eng.stats().time_moving, 0.0);
    }

    #[test]
    fn zero_pause_reports_paused_at_arrival() {
        let mut eng = engine_with(config(1.0, 5.0, 0.0, square(100.0)));
        let target = Vec3::new(10.0, 0.0, 0.0);
        eng.start_leg(target, 1.0, 0.0);

        assert_eq!(eng.position(10.0).unwrap(), target);
        assert_eq!(eng.phase(), Phase::Paused { until: 10.0 });
        assert_eq!(eng.velocity(10.0).unwrap(), Vec3::ZERO);

        eng.position(10.5).unwrap();
        assert!(matches!(eng.phase(), Phase::Moving { .. }));
        assert_eq!(eng.stats().waypoints_reached, 1);
    }

    #[test]
    fn many_phases_in_one_query() {
        let mut eng = engine_with(config(10.0, 20.0, 1.0, square(50.0)));
        eng.position(10_000.0).unwrap();
        assert!(eng.stats().waypoints_reached > 100);
        assert_eq!(eng.last_update(), 10_000.0);
    }

    #[test]
    fn simtime_queries_match_seconds() {
        let mut a = default_engine();
        let mut b = default_engine();
        let t = SimTime::from_millis(123_456);
        assert_eq!(a.position_at(t).unwrap(), b.position(123.456).unwrap());
        assert_eq!(a.velocity_at(t).unwrap(), b.velocity(123.456).unwrap());
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use super::*;

    #[test]
    fn replay_is_independent_of_intermediate_queries() {
        let mut sparse = default_engine();
        let mut dense = default_engine();

        for i in 1..2_000 {
            let t = i as f64 * 1.37;
            let a = dense.kinematics(t).unwrap();
            // `sparse` only sees every seventh query.
            if i % 7 == 0 {
                let b = sparse.kinematics(t).unwrap();
                assert_eq!(a, b, "diverged at t={t}");
            }
        }
    }

    #[test]
    fn single_jump_equals_fine_stepping() {
        let mut jump = default_engine();
        let mut fine = default_engine();
        for i in 1..=10_000 {
            fine.position(i as f64 * 0.05).unwrap();
        }
        assert_eq!(jump.position(500.0).unwrap(), fine.position(500.0).unwrap());
        assert_eq!(jump.waypoint(), fine.waypoint());
    }

    #[test]
    fn traveled_never_exceeds_total() {
        let mut eng = engine_with(config(0.5, 8.0, 0.0, square(300.0)));
        for i in 1..50_000 {
            eng.position(i as f64 * 0.1).unwrap();
            assert!(
                eng.distance_traveled() <= eng.total_distance(),
                "{} > {}",
                eng.distance_traveled(),
                eng.total_distance()
            );
        }
    }

    #[test]
    fn position_stays_inside_boundary() {
        let b = Boundary::Circle { center_x: 0.0, center_y: 0.0, radius: 100.0 };
        let mut eng = engine_with(config(1.0, 10.0, 1.0, b));
        for i in 1..20_000 {
            let p = eng.position(i as f64 * 0.25).unwrap();
            assert!(b.contains(p), "{p} outside at step {i}");
        }
    }

    #[test]
    fn constant_unit_speed_reaches_waypoint_at_distance() {
        let mut eng = engine_with(config(1.0, 1.0, 0.0, square(1_000.0)));

        eng.position(1e-6).unwrap();
        let d = eng.total_distance();
        assert!(d > 1.0);
        assert_eq!(eng.phase(), Phase::Moving { arrive_at: d });

        for frac in [0.1, 0.25, 0.5, 0.9, 0.999] {
            let v = eng.velocity(d * frac).unwrap();
            assert!((v.norm() - 1.0).abs() < 1e-12, "speed {} at {frac}", v.norm());
        }

        let waypoint = eng.waypoint();
        assert_eq!(eng.position(d).unwrap(), waypoint);
        assert!(eng.is_paused());
        assert_eq!(eng.stats().waypoints_reached, 1);

        // Zero pause: any later instant is already on the next leg.
        eng.position(d + 1e-3).unwrap();
        assert!(matches!(eng.phase(), Phase::Moving { .. }));
    }

    #[test]
    fn paused_fraction_matches_renewal_ratio() {
        // Mean distance between two uniform points in a square of side L is
        // 0.521405·L; at 1 m/s that is also the mean travel time.
        let side = 100.0;
        let pause = 50.0;
        let mean_travel = 0.521_405 * side;
        let expected = pause / (pause + mean_travel);

        let mut eng = engine_with(config(1.0, 1.0, pause, square(side)));
        let mut t = 0.0;
        while t < 2_000_000.0 {
            t += 1_000.0;
            eng.position(t).unwrap();
        }

        let got = eng.stats().paused_fraction();
        assert!((got - expected).abs() < 0.01, "paused fraction {got}, expected {expected}");
        let total = eng.stats().time_paused + eng.stats().time_moving;
        assert!((total - t).abs() < 1e-3 * t);
    }

    #[test]
    fn same_seed_same_trajectory_different_seed_differs() {
        let cfg = config(1.0, 5.0, 2.0, square(1_000.0));
        let mk = |seed| {
            MobilityEngine::new(NodeId(0), cfg.clone(), Vec3::ZERO, 0.0, NodeRng::new(seed, NodeId(0)))
                .unwrap()
        };
        let (mut a, mut b, mut c) = (mk(1), mk(1), mk(2));
        let pa = a.position(300.0).unwrap();
        assert_eq!(pa, b.position(300.0).unwrap());
        assert_ne!(pa, c.position(300.0).unwrap());
    }
}
