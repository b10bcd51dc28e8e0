//! Upward notifications from the traffic manager.

use wn_core::SimTime;

use crate::PacketRecord;

/// Events the manager reports to its observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficEvent {
    /// An application packet reached this node.
    AppDataReceived,
}

impl TrafficEvent {
    pub fn name(self) -> &'static str {
        match self {
            TrafficEvent::AppDataReceived => "AppDataReceived",
        }
    }
}

/// Receives [`TrafficEvent`]s together with the packet they concern.
///
/// The default implementation ignores everything.
pub trait TrafficObserver {
    fn notify(&mut self, _event: TrafficEvent, _now: SimTime, _record: &PacketRecord) {}
}

/// A [`TrafficObserver`] that does nothing.
pub struct NoopObserver;

impl TrafficObserver for NoopObserver {}

/// Tracks end-to-end latency (`now − generation_time`) of received packets.
#[derive(Debug, Clone, Default)]
pub struct LatencyTracker {
    count: u64,
    sum:   f64,
    min:   Option<f64>,
    max:   Option<f64>,
}

impl LatencyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean latency in seconds, `None` before the first packet.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    fn record(&mut self, latency: f64) {
        self.count += 1;
        self.sum += latency;
        self.min = Some(self.min.map_or(latency, |m| m.min(latency)));
        self.max = Some(self.max.map_or(latency, |m| m.max(latency)));
    }
}

impl TrafficObserver for LatencyTracker {
    fn notify(&mut self, event: TrafficEvent, now: SimTime, record: &PacketRecord) {
        if event == TrafficEvent::AppDataReceived {
            self.record(record.latency(now));
        }
    }
}
