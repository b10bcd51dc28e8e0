//! Per-node movement state.

use wn_core::Vec3;

/// The phase a node is in.  Exactly one holds at any queried time.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Dwelling at the last waypoint; velocity is zero.
    Paused {
        /// `pause_end_time` (s).  The next leg starts once time passes it.
        until: f64,
    },
    /// Travelling toward the current waypoint.
    Moving {
        /// `next_waypoint_reach_time` (s).
        arrive_at: f64,
    },
}

impl Phase {
    #[inline]
    pub fn is_paused(&self) -> bool {
        matches!(self, Phase::Paused { .. })
    }

    /// Time of the next scheduled transition.
    #[inline]
    pub fn ends_at(&self) -> f64 {
        match *self {
            Phase::Paused { until } => until,
            Phase::Moving { arrive_at } => arrive_at,
        }
    }
}

/// Position and velocity at one instant.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kinematics {
    pub time:     f64,
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Running totals accumulated while the engine replays phases.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MobilityStats {
    /// Seconds spent in [`Phase::Paused`].
    pub time_paused:       f64,
    /// Seconds spent in [`Phase::Moving`].
    pub time_moving:       f64,
    pub waypoints_reached: u64,
    /// Sum of completed leg lengths (m).
    pub distance_covered:  f64,
}

impl MobilityStats {
    /// Share of elapsed time spent paused, in `[0, 1]`.  `0` before any time
    /// has elapsed.
    pub fn paused_fraction(&self) -> f64 {
        let total = self.time_paused + self.time_moving;
        if total > 0.0 { self.time_paused / total } else { 0.0 }
    }
}
