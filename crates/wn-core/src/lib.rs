//! `wn-core` — foundational types for the `rust_wn` wireless network framework.
//!
//! This crate is a dependency of every other `wn-*` crate.  It has no `wn-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `SourceId`, `PacketId`                      |
//! | [`geo`]         | `Vec3` — Cartesian position / velocity in metres      |
//! | [`time`]        | `SimTime` (integer nanoseconds), gap conversion       |
//! | [`rng`]         | `NodeRng` (per-node), `SimRng` (global)               |
//! | [`error`]       | `WnError`, `WnResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{WnError, WnResult};
pub use geo::Vec3;
pub use ids::{NodeId, PacketId, SourceId};
pub use rng::{NodeRng, SimRng};
pub use time::SimTime;
