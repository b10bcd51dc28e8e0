//! `wn-mobility` — random-waypoint movement for simulated wireless nodes.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`config`]  | `RandomWaypointConfig`, `Boundary` — validated model parameters   |
//! | [`state`]   | `Phase`, `Kinematics`, `MobilityStats`                            |
//! | [`engine`]  | `MobilityEngine` — replayable waypoint state machine              |
//! | [`error`]   | `MobilityError`, `MobilityResult<T>`                              |
//!
//! # Movement model (random waypoint)
//!
//! A node alternates between two phases:
//!
//! 1. **Paused** at its current position until `pause_end_time`.
//! 2. **Moving** in a straight line toward a waypoint drawn uniformly inside
//!    the [`Boundary`], at a speed drawn uniformly from the configured range,
//!    until `next_waypoint_reach_time`.
//!
//! The host scheduler never steps the engine explicitly.  It simply asks for
//! the position (or velocity) at some time `t`; the engine replays every
//! phase transition between its last update and `t` and caches the result.
//! Queries must be non-decreasing in time.

pub mod config;
pub mod engine;
pub mod error;
pub mod state;

#[cfg(test)]
mod tests;

pub use config::{Boundary, RandomWaypointConfig};
pub use engine::MobilityEngine;
pub use error::{MobilityError, MobilityResult};
pub use state::{Kinematics, MobilityStats, Phase};
