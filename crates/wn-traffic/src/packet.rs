//! Packet types exchanged with generators, forwarders and observers.

use wn_core::{NodeId, PacketId, SimTime, SourceId};

use crate::PacketContext;

/// What a [`TrafficPattern`][crate::TrafficPattern] hands back for one packet.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPacket {
    /// Time until the same source should generate again, in (fractional)
    /// microseconds.  `0` asks for another packet in the same tick.
    pub gap_us:  f64,
    /// Application packet length in bytes.
    pub length:  u32,
    /// Payload bytes, or `None` under data abstraction.
    pub payload: Option<Vec<u8>>,
}

impl GeneratedPacket {
    /// Build from a gap given in seconds.
    pub fn from_secs(gap_secs: f64, length: u32, payload: Option<Vec<u8>>) -> Self {
        Self { gap_us: gap_secs * 1e6, length, payload }
    }
}

/// One application packet as emitted by the traffic manager.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PacketRecord {
    /// Per-source sequence number, starting at 1.
    pub id:              PacketId,
    pub source:          SourceId,
    /// Node whose traffic manager generated the packet.
    pub source_node:     NodeId,
    /// Length in bytes.  Always set, payload or not.
    pub length:          u32,
    /// `None` when the manager runs with data abstraction.
    pub payload:         Option<Vec<u8>>,
    /// Generation timestamp in seconds.
    pub generation_time: f64,
    pub context:         PacketContext,
}

impl PacketRecord {
    /// Seconds between generation and `now`.
    #[inline]
    pub fn latency(&self, now: SimTime) -> f64 {
        now.as_secs_f64() - self.generation_time
    }
}
