//! `wn-traffic` — per-node application traffic manager.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`context`]  | `PacketContext`, `ContextValue` — protocol fields per source    |
//! | [`packet`]   | `PacketRecord`, `GeneratedPacket`                               |
//! | [`pattern`]  | `TrafficPattern` trait, `ConstantRate` reference generator      |
//! | [`forward`]  | `PacketForwarder` trait (closures implement it)                 |
//! | [`observer`] | `TrafficObserver`, `TrafficEvent`, `NoopObserver`, `LatencyTracker` |
//! | [`schedule`] | `InvokeQueue` — next-invoke times keyed by `SimTime`            |
//! | [`source`]   | `TrafficSource`, `SourceCounters`                               |
//! | [`manager`]  | `TrafficManager`, `TrafficConfig`                               |
//! | [`stats`]    | `TrafficStatistics`, `SourceStatistics` snapshots               |
//! | [`error`]    | `TrafficError`, `TrafficResult<T>`                              |
//!
//! # Design notes
//!
//! The manager is stepped by an external scheduler:
//!
//! 1. The host calls [`TrafficManager::run`] with the current clock reading.
//! 2. Every source due at exactly that time (or never run yet) generates
//!    packets until its generator asks for a positive gap, so zero-gap bursts
//!    are drained inside one tick.
//! 3. Each packet goes to the source's own forwarder if it has one, otherwise
//!    to the manager's shared forwarder.  A `false` return counts as a queue
//!    overflow for that source.
//! 4. `run` returns the earliest pending invoke time (`SimTime::NEVER` when
//!    nothing is pending) and the host schedules the next call for then.

pub mod context;
pub mod error;
pub mod forward;
pub mod manager;
pub mod observer;
pub mod packet;
pub mod pattern;
pub mod schedule;
pub mod source;
pub mod stats;


pub use context::{ContextValue, PacketContext};
pub use error::{TrafficError, TrafficResult};
pub use forward::PacketForwarder;
pub use manager::{TrafficConfig, TrafficManager};
pub use observer::{LatencyTracker, NoopObserver, TrafficEvent, TrafficObserver};
pub use packet::{GeneratedPacket, PacketRecord};
pub use pattern::{ConstantRate, TrafficPattern};
pub use schedule::InvokeQueue;
pub use source::{SourceCounters, TrafficSource};
pub use stats::{SourceStatistics, TrafficStatistics};
