//! Plain data row types written by output backends.

use wn_core::{NodeId, SimTime};
use wn_mobility::Kinematics;
use wn_traffic::TrafficStatistics;

/// One mobility sample of one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MobilityTraceRow {
    pub node:   u32,
    /// Seconds.
    pub time:   f64,
    pub x:      f64,
    pub y:      f64,
    pub z:      f64,
    pub vx:     f64,
    pub vy:     f64,
    pub vz:     f64,
    pub paused: bool,
}

impl MobilityTraceRow {
    pub fn from_kinematics(node: NodeId, k: &Kinematics, paused: bool) -> Self {
        Self {
            node: node.0,
            time: k.time,
            x:    k.position.x,
            y:    k.position.y,
            z:    k.position.z,
            vx:   k.velocity.x,
            vy:   k.velocity.y,
            vz:   k.velocity.z,
            paused,
        }
    }
}

/// Counters of one traffic source at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceStatsRow {
    pub node:                u32,
    pub source:              u32,
    pub transmitted_packets: u64,
    pub transmitted_bytes:   u64,
    pub queue_overflow:      u64,
    /// Nanoseconds; `None` once the source is retired.
    pub next_invoke_ns:      Option<u64>,
}

impl SourceStatsRow {
    /// One row per source, in source-id order.
    pub fn from_statistics(stats: &TrafficStatistics) -> Vec<Self> {
        stats
            .sources
            .values()
            .map(|s| Self {
                node:                stats.node.0,
                source:              s.source.0,
                transmitted_packets: s.transmitted_packets,
                transmitted_bytes:   s.transmitted_bytes,
                queue_overflow:      s.queue_overflow,
                next_invoke_ns:      (s.next_invoke != SimTime::NEVER).then_some(s.next_invoke.0),
            })
            .collect()
    }
}
