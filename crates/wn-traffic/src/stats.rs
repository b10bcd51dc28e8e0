//! Immutable statistics snapshots.

use std::collections::BTreeMap;

use wn_core::{NodeId, SimTime, SourceId};

use crate::{PacketContext, SourceCounters};

/// Counters and context of one source at snapshot time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceStatistics {
    pub source:              SourceId,
    pub transmitted_packets: u64,
    pub transmitted_bytes:   u64,
    pub queue_overflow:      u64,
    /// `SimTime::NEVER` once the source is retired.
    pub next_invoke:         SimTime,
    pub context:             PacketContext,
}

impl SourceStatistics {
    pub(crate) fn new(
        source:      SourceId,
        counters:    &SourceCounters,
        next_invoke: SimTime,
        context:     &PacketContext,
    ) -> Self {
        Self {
            source,
            transmitted_packets: counters.transmitted_packets,
            transmitted_bytes:   counters.transmitted_bytes,
            queue_overflow:      counters.queue_overflow,
            next_invoke,
            context:             context.clone(),
        }
    }
}

/// Node-level traffic statistics returned by
/// [`TrafficManager::statistics`][crate::TrafficManager::statistics].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficStatistics {
    pub node:                NodeId,
    /// Sums over every source.
    pub transmitted_packets: u64,
    pub transmitted_bytes:   u64,
    pub queue_overflow:      u64,
    pub received_packets:    u64,
    pub received_bytes:      u64,
    /// One entry per registered source, keyed by registration id.
    pub sources:             BTreeMap<SourceId, SourceStatistics>,
}
