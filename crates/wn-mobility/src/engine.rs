//! Random-waypoint engine: answers position/velocity queries at arbitrary
//! non-decreasing times by replaying the waypoint state machine.

use tracing::{debug, trace};
use wn_core::{NodeId, NodeRng, SimTime, Vec3};

use crate::{Kinematics, MobilityError, MobilityResult, MobilityStats, Phase, RandomWaypointConfig};

/// Random-waypoint mobility for one node.
///
/// The engine owns the node's [`NodeRng`].  Every waypoint selection makes
/// exactly two draws, in this order: one position draw (a pair of unit
/// uniforms mapped through [`Boundary::sample`][crate::Boundary::sample]) and
/// one speed draw.  Given the same seed and the same non-decreasing sequence
/// of queries, the trajectory is bit-for-bit reproducible.
///
/// Within a leg the position is computed from the leg's origin and start time
/// rather than accumulated query by query, so the answer at `t` does not
/// depend on which earlier times were queried.
pub struct MobilityEngine {
    node:   NodeId,
    config: RandomWaypointConfig,
    rng:    NodeRng,

    position: Vec3,
    velocity: Vec3,

    waypoint:          Vec3,
    waypoint_speed:    f64,
    total_distance:    f64,
    distance_traveled: f64,

    /// Position and time at which the current leg started.
    leg_origin: Vec3,
    leg_start:  f64,

    phase:       Phase,
    last_update: f64,
    stats:       MobilityStats,
}

impl MobilityEngine {
    /// Create an engine for `node` standing still at `position` at
    /// `start_time` (s).
    ///
    /// The node starts paused with `pause_end_time = start_time`, so the
    /// first waypoint is chosen as soon as time moves past the start.
    pub fn new(
        node:       NodeId,
        config:     RandomWaypointConfig,
        position:   Vec3,
        start_time: f64,
        rng:        NodeRng,
    ) -> MobilityResult<Self> {
        config.validate()?;
        if !position.is_finite() {
            return Err(MobilityError::Config(format!("initial position {position} is not finite")));
        }
        if !start_time.is_finite() {
            return Err(MobilityError::Config(format!("start time {start_time} is not finite")));
        }

        Ok(Self {
            node,
            config,
            rng,
            position,
            velocity:          Vec3::ZERO,
            waypoint:          position,
            waypoint_speed:    0.0,
            total_distance:    0.0,
            distance_traveled: 0.0,
            leg_origin:        position,
            leg_start:         start_time,
            phase:             Phase::Paused { until: start_time },
            last_update:       start_time,
            stats:             MobilityStats::default(),
        })
    }

    // ── Time queries ──────────────────────────────────────────────────────

    /// Position (m) at time `t` (s).
    pub fn position(&mut self, t: f64) -> MobilityResult<Vec3> {
        self.advance_to(t)?;
        Ok(self.position)
    }

    /// Velocity (m/s) at time `t` (s).
    pub fn velocity(&mut self, t: f64) -> MobilityResult<Vec3> {
        self.advance_to(t)?;
        Ok(self.velocity)
    }

    /// Position and velocity at time `t` (s).
    pub fn kinematics(&mut self, t: f64) -> MobilityResult<Kinematics> {
        self.advance_to(t)?;
        Ok(Kinematics {
            time:     self.last_update,
            position: self.position,
            velocity: self.velocity,
        })
    }

    /// [`position`][Self::position] at a discrete-event clock reading.
    pub fn position_at(&mut self, now: SimTime) -> MobilityResult<Vec3> {
        self.position(now.as_secs_f64())
    }

    /// [`velocity`][Self::velocity] at a discrete-event clock reading.
    pub fn velocity_at(&mut self, now: SimTime) -> MobilityResult<Vec3> {
        self.velocity(now.as_secs_f64())
    }

    /// [`kinematics`][Self::kinematics] at a discrete-event clock reading.
    pub fn kinematics_at(&mut self, now: SimTime) -> MobilityResult<Kinematics> {
        self.kinematics(now.as_secs_f64())
    }

    // ── Accessors (state as of `last_update`) ─────────────────────────────

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn config(&self) -> &RandomWaypointConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.phase.is_paused()
    }

    pub fn last_update(&self) -> f64 {
        self.last_update
    }

    pub fn waypoint(&self) -> Vec3 {
        self.waypoint
    }

    pub fn waypoint_speed(&self) -> f64 {
        self.waypoint_speed
    }

    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    pub fn distance_traveled(&self) -> f64 {
        self.distance_traveled
    }

    pub fn stats(&self) -> &MobilityStats {
        &self.stats
    }

    // ── State machine ─────────────────────────────────────────────────────

    /// Replay phase transitions from `last_update` up to `t`.
    ///
    /// A call at `t == last_update` changes nothing.  Paused → Moving fires
    /// only when `t` strictly exceeds `pause_end_time`; Moving → Paused fires
    /// when `t` reaches `next_waypoint_reach_time`.  Together these make the
    /// loop terminate even with a zero pause and a zero-length leg.  With a
    /// zero pause, a query at exactly the arrival time reports `Paused` at
    /// the waypoint; the next leg begins on the first query after it.
    fn advance_to(&mut self, t: f64) -> MobilityResult<()> {
        if !(t >= self.last_update) {
            return Err(MobilityError::TimeReversal {
                node:        self.node,
                requested:   t,
                last_update: self.last_update,
            });
        }
        if t == self.last_update {
            return Ok(());
        }

        loop {
            let ends_at = self.phase.ends_at();
            match self.phase {
                Phase::Paused { .. } => {
                    if t <= ends_at {
                        self.stats.time_paused += t - self.last_update;
                        self.last_update = t;
                        return Ok(());
                    }
                    self.stats.time_paused += ends_at - self.last_update;
                    self.last_update = ends_at;
                    self.begin_leg(ends_at);
                }
                Phase::Moving { .. } => {
                    if t < ends_at {
                        let elapsed = t - self.leg_start;
                        self.position = self.leg_origin + self.velocity * elapsed;
                        self.distance_traveled =
                            (self.waypoint_speed * elapsed).min(self.total_distance);
                        self.stats.time_moving += t - self.last_update;
                        self.last_update = t;
                        trace!(node = %self.node, t, position = %self.position, "leg progress");
                        return Ok(());
                    }
                    self.finish_leg(ends_at);
                }
            }
        }
    }

    /// Draw a waypoint and a speed and start moving at `start`.
    fn begin_leg(&mut self, start: f64) {
        let draw: [f64; 2] = self.rng.random();
        let waypoint = self.config.boundary.sample(draw, self.position.z);
        let speed = self.rng.gen_range(self.config.speed_min..=self.config.speed_max);
        self.start_leg(waypoint, speed, start);
    }

    /// Head for `waypoint` at `speed` from the current position at `start`.
    ///
    /// A zero-length leg has zero velocity and arrives at `start`.
    pub(crate) fn start_leg(&mut self, waypoint: Vec3, speed: f64, start: f64) {
        let delta = waypoint - self.position;
        let distance = delta.norm();

        self.waypoint = waypoint;
        self.waypoint_speed = speed;
        self.total_distance = distance;
        self.distance_traveled = 0.0;
        self.leg_origin = self.position;
        self.leg_start = start;
        self.velocity = if distance > 0.0 { delta * (speed / distance) } else { Vec3::ZERO };

        let arrive_at = start + distance / speed;
        self.phase = Phase::Moving { arrive_at };

        debug!(
            node = %self.node,
            t = start,
            waypoint = %waypoint,
            speed,
            distance,
            arrive_at,
            "waypoint chosen"
        );
    }

    /// Snap onto the waypoint at `arrive_at` and start the pause.
    fn finish_leg(&mut self, arrive_at: f64) {
        self.stats.time_moving += arrive_at - self.last_update;
        self.stats.waypoints_reached += 1;
        self.stats.distance_covered += self.total_distance;

        self.position = self.waypoint;
        self.velocity = Vec3::ZERO;
        self.distance_traveled = self.total_distance;
        self.last_update = arrive_at;
        self.phase = Phase::Paused { until: arrive_at + self.config.pause_duration };

        debug!(node = %self.node, t = arrive_at, position = %self.position, "waypoint reached");
    }
}
