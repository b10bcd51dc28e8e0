//! One registered traffic source and its counters.

use wn_core::{NodeId, PacketId, SimTime, SourceId};

use crate::{GeneratedPacket, PacketContext, PacketForwarder, PacketRecord, TrafficPattern};

/// Per-source transmit counters.  Only ever increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceCounters {
    /// Packets the forwarder accepted.
    pub transmitted_packets: u64,
    /// Sum of accepted packet lengths.
    pub transmitted_bytes:   u64,
    /// Packets the forwarder refused.
    pub queue_overflow:      u64,
}

impl SourceCounters {
    #[inline]
    pub fn record(&mut self, accepted: bool, length: u32) {
        if accepted {
            self.transmitted_packets += 1;
            self.transmitted_bytes += length as u64;
        } else {
            self.queue_overflow += 1;
        }
    }
}

/// A traffic generator plus everything the manager keeps for it.
pub struct TrafficSource {
    pub(crate) id:          SourceId,
    pub(crate) pattern:     Box<dyn TrafficPattern>,
    /// Overrides the manager's shared forwarder when set.
    pub(crate) forwarder:   Option<Box<dyn PacketForwarder>>,
    /// Context stamped onto every packet (manager base fields + source fields).
    pub(crate) template:    PacketContext,
    pub(crate) next_packet: PacketId,
    pub(crate) next_invoke: SimTime,
    /// Set once the pattern has returned `None`.
    pub(crate) retired:     bool,
    pub(crate) counters:    SourceCounters,
}

impl TrafficSource {
    pub(crate) fn new(
        id:        SourceId,
        pattern:   Box<dyn TrafficPattern>,
        template:  PacketContext,
        forwarder: Option<Box<dyn PacketForwarder>>,
    ) -> Self {
        Self {
            id,
            pattern,
            forwarder,
            template,
            next_packet: PacketId::FIRST,
            next_invoke: SimTime::ZERO,
            retired:     false,
            counters:    SourceCounters::default(),
        }
    }

    pub fn id(&self) -> SourceId {
        self.id
    }

    pub fn context(&self) -> &PacketContext {
        &self.template
    }

    pub fn next_invoke(&self) -> SimTime {
        self.next_invoke
    }

    pub fn counters(&self) -> &SourceCounters {
        &self.counters
    }

    pub fn is_retired(&self) -> bool {
        self.retired
    }

    pub fn has_custom_forwarder(&self) -> bool {
        self.forwarder.is_some()
    }

    /// Stamp a generated packet with this source's next id and the template.
    pub(crate) fn build_record(
        &mut self,
        generated:        GeneratedPacket,
        node:             NodeId,
        now:              SimTime,
        data_abstraction: bool,
    ) -> PacketRecord {
        let id = self.next_packet;
        self.next_packet = id.next();
        PacketRecord {
            id,
            source:          self.id,
            source_node:     node,
            length:          generated.length,
            payload:         if data_abstraction { None } else { generated.payload },
            generation_time: now.as_secs_f64(),
            context:         self.template.clone(),
        }
    }
}
