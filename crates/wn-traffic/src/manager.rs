//! The `TrafficManager` and its configuration.

use tracing::{debug, trace, warn};
use wn_core::time::gap_nanos_from_micros;
use wn_core::{NodeId, SimTime, SourceId};

use crate::{
    InvokeQueue, NoopObserver, PacketContext, PacketForwarder, PacketRecord, SourceStatistics,
    TrafficError, TrafficEvent, TrafficObserver, TrafficPattern, TrafficResult, TrafficSource,
    TrafficStatistics,
};

/// Fixed per-manager settings.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficConfig {
    /// Node the manager belongs to; stamped on every packet as `source_node`.
    pub node: NodeId,

    /// Emit length-only packets (no payload bytes).  Pushed to every
    /// attached pattern at registration.
    pub data_abstraction: bool,

    /// Fields common to every source on this node.  A source's own context
    /// overrides fields of the same name.
    pub base_context: PacketContext,
}

/// Schedules, generates and accounts for application packets of one node.
///
/// `F` is the shared forwarder used by sources without an override; `O`
/// receives reception notifications.
///
/// # Example
///
/// ```rust,ignore
/// let cfg = TrafficConfig { node: NodeId(0), ..Default::default() };
/// let mut mgr = TrafficManager::new(cfg, |p: PacketRecord| mac.enqueue(p), NoopObserver);
/// mgr.add_source(ConstantRate::new(10_000.0, 1_000), PacketContext::new(), None);
///
/// let mut now = SimTime::ZERO;
/// while now < end {
///     now = mgr.run(now);
/// }
/// ```
pub struct TrafficManager<F: PacketForwarder, O: TrafficObserver = NoopObserver> {
    config:    TrafficConfig,
    sources:   Vec<TrafficSource>,
    queue:     InvokeQueue,
    /// Sources registered since the last `run`; they fire at the next call.
    unstarted: Vec<SourceId>,
    forwarder: F,
    observer:  O,

    received_packets: u64,
    received_bytes:   u64,
}

impl<F: PacketForwarder, O: TrafficObserver> TrafficManager<F, O> {
    pub fn new(config: TrafficConfig, forwarder: F, observer: O) -> Self {
        Self {
            config,
            sources:          Vec::new(),
            queue:            InvokeQueue::new(),
            unstarted:        Vec::new(),
            forwarder,
            observer,
            received_packets: 0,
            received_bytes:   0,
        }
    }

    // ── Registration ──────────────────────────────────────────────────────

    /// Attach a traffic source.
    ///
    /// `context` is merged over the manager's base context to form the
    /// source's packet template.  `forwarder`, when given, receives this
    /// source's packets instead of the shared forwarder.  The new source
    /// generates its first packet at the next [`run`][Self::run] call.
    pub fn add_source<P>(
        &mut self,
        mut pattern: P,
        context:     PacketContext,
        forwarder:   Option<Box<dyn PacketForwarder>>,
    ) -> SourceId
    where
        P: TrafficPattern + 'static,
    {
        let id = SourceId::try_from(self.sources.len())
            .expect("a manager holds at most u32::MAX sources");
        pattern.set_data_abstraction(self.config.data_abstraction);
        let template = self.config.base_context.merged_with(&context);

        debug!(
            node = %self.config.node,
            source = %id,
            fields = template.len(),
            custom_forwarder = forwarder.is_some(),
            "traffic source added"
        );

        self.sources.push(TrafficSource::new(id, Box::new(pattern), template, forwarder));
        self.unstarted.push(id);
        id
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Generate every packet due at `now` and return the next time the
    /// manager must run (`SimTime::NEVER` if no source is pending).
    ///
    /// Due sources are those scheduled for exactly `now` plus any registered
    /// since the last call; they are served in registration order.  A source
    /// keeps generating while its gap rounds to zero nanoseconds, so the
    /// returned time is never `now` itself.
    ///
    /// A source whose invoke time the host skipped is not served late: it
    /// stays queued, and the returned time can then be earlier than `now`
    /// on every later call.  Hosts must call `run` at exactly the returned
    /// time.
    pub fn run(&mut self, now: SimTime) -> SimTime {
        let mut due = std::mem::take(&mut self.unstarted);
        if let Some(scheduled) = self.queue.drain_at(now) {
            due.extend(scheduled);
        }
        due.sort_unstable();
        due.dedup();

        let overdue = self.queue.overdue(now);
        if overdue > 0 {
            warn!(node = %self.config.node, now = %now, overdue, "sources skipped past their invoke time");
        }

        for id in due {
            self.invoke(id, now);
        }

        self.next_invoke_time()
    }

    /// Drain one source at `now`.
    fn invoke(&mut self, id: SourceId, now: SimTime) {
        let node = self.config.node;
        let data_abstraction = self.config.data_abstraction;
        let source = &mut self.sources[id.index()];

        loop {
            let Some(generated) = source.pattern.generate() else {
                source.retired = true;
                source.next_invoke = SimTime::NEVER;
                debug!(node = %node, source = %id, now = %now, "traffic source exhausted");
                return;
            };

            let gap_ns = match gap_nanos_from_micros(generated.gap_us) {
                Ok(ns) => ns,
                Err(e) => {
                    source.retired = true;
                    source.next_invoke = SimTime::NEVER;
                    warn!(node = %node, source = %id, error = %e, "retiring source");
                    return;
                }
            };

            let record = source.build_record(generated, node, now, data_abstraction);
            let (packet_id, length) = (record.id, record.length);
            let accepted = match source.forwarder.as_mut() {
                Some(custom) => custom.forward(record),
                None => self.forwarder.forward(record),
            };
            source.counters.record(accepted, length);

            if accepted {
                trace!(node = %node, source = %id, packet = packet_id.0, length, "packet forwarded");
            } else {
                debug!(node = %node, source = %id, packet = packet_id.0, length, "forwarder refused packet");
            }

            let next = now.offset(gap_ns);
            source.next_invoke = next;
            if next > now {
                self.queue.push(next, id);
                return;
            }
        }
    }

    // ── Reception ─────────────────────────────────────────────────────────

    /// Account for a packet delivered to this node and notify the observer
    /// with [`TrafficEvent::AppDataReceived`].
    pub fn receive_packet(&mut self, record: &PacketRecord, now: SimTime) {
        self.received_packets += 1;
        self.received_bytes += record.length as u64;
        trace!(
            node = %self.config.node,
            from = %record.source_node,
            packet = record.id.0,
            latency = record.latency(now),
            "packet received"
        );
        self.observer.notify(TrafficEvent::AppDataReceived, now, record);
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Earliest pending invoke time.  `SimTime::ZERO` while a registered
    /// source has not run yet; `SimTime::NEVER` when nothing is pending.
    pub fn next_invoke_time(&self) -> SimTime {
        if !self.unstarted.is_empty() {
            return SimTime::ZERO;
        }
        self.queue.next_time().unwrap_or(SimTime::NEVER)
    }

    /// Snapshot of all counters.  Valid at any time, including before the
    /// first `run`.
    pub fn statistics(&self) -> TrafficStatistics {
        let mut stats = TrafficStatistics {
            node:             self.config.node,
            received_packets: self.received_packets,
            received_bytes:   self.received_bytes,
            ..Default::default()
        };
        for source in &self.sources {
            let c = source.counters();
            stats.transmitted_packets += c.transmitted_packets;
            stats.transmitted_bytes += c.transmitted_bytes;
            stats.queue_overflow += c.queue_overflow;
            stats.sources.insert(
                source.id,
                SourceStatistics::new(source.id, c, source.next_invoke, &source.template),
            );
        }
        stats
    }

    pub fn source(&self, id: SourceId) -> TrafficResult<&TrafficSource> {
        self.sources.get(id.index()).ok_or(TrafficError::UnknownSource(id))
    }

    pub fn source_statistics(&self, id: SourceId) -> TrafficResult<SourceStatistics> {
        let s = self.source(id)?;
        Ok(SourceStatistics::new(id, s.counters(), s.next_invoke, &s.template))
    }

    pub fn sources(&self) -> &[TrafficSource] {
        &self.sources
    }

    pub fn config(&self) -> &TrafficConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn forwarder_mut(&mut self) -> &mut F {
        &mut self.forwarder
    }
}
