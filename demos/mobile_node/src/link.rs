//! A single bounded radio link from the mobile node to its peers.
//!
//! One packet is on the air at a time.  Its delay is the serialization time
//! at the link rate plus free-space propagation over the current distance.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::trace;
use wn_core::{SimTime, WnResult};
use wn_traffic::PacketRecord;

const SPEED_OF_LIGHT: f64 = 299_792_458.0;

pub struct RadioLink {
    capacity:  usize,
    rate_bps:  f64,
    queue:     VecDeque<PacketRecord>,
    in_flight: Option<(SimTime, PacketRecord)>,
}

pub type SharedLink = Rc<RefCell<RadioLink>>;

impl RadioLink {
    pub fn new(capacity: usize, rate_bps: f64) -> Self {
        Self { capacity, rate_bps, queue: VecDeque::with_capacity(capacity), in_flight: None }
    }

    /// Queue `packet` for transmission; `false` when the queue is full.
    pub fn enqueue(&mut self, packet: PacketRecord) -> bool {
        if self.queue.len() >= self.capacity {
            return false;
        }
        self.queue.push_back(packet);
        true
    }

    /// Packet that goes on the air next.
    pub fn head(&self) -> Option<&PacketRecord> {
        self.queue.front()
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none()
    }

    /// Put the head of the queue on the air at `now`, `distance_m` away.
    pub fn start_next(&mut self, now: SimTime, distance_m: f64) -> WnResult<()> {
        let Some(packet) = self.queue.pop_front() else {
            return Ok(());
        };
        let airtime = packet.length as f64 * 8.0 / self.rate_bps + distance_m / SPEED_OF_LIGHT;
        let arrive = now.offset(SimTime::try_from_secs_f64(airtime)?.as_nanos());
        trace!(packet = packet.id.0, source = %packet.source, distance_m, arrive = %arrive, "on air");
        self.in_flight = Some((arrive, packet));
        Ok(())
    }

    /// Arrival time of the packet on the air, `SimTime::NEVER` if none.
    pub fn next_delivery(&self) -> SimTime {
        self.in_flight.as_ref().map_or(SimTime::NEVER, |(t, _)| *t)
    }

    /// Take the packet on the air if it has arrived by `now`.
    pub fn deliver(&mut self, now: SimTime) -> Option<PacketRecord> {
        match self.in_flight {
            Some((arrive, _)) if arrive <= now => self.in_flight.take().map(|(_, p)| p),
            _ => None,
        }
    }
}

/// Forwarder handing packets to the shared link.
pub fn link_forwarder(link: SharedLink) -> impl FnMut(PacketRecord) -> bool {
    move |packet: PacketRecord| link.borrow_mut().enqueue(packet)
}
