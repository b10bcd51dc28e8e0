//! Forwarding seam between the traffic manager and the node's lower layers.

use crate::PacketRecord;

/// Accepts generated packets on behalf of the lower layers.
///
/// Returns `true` if the packet was taken, `false` if it was refused (for
/// example because a transmit queue is full).  Refused packets are counted as
/// queue overflow and never retried.
///
/// Any `FnMut(PacketRecord) -> bool` closure is a forwarder.
pub trait PacketForwarder {
    fn forward(&mut self, packet: PacketRecord) -> bool;
}

impl<F> PacketForwarder for F
where
    F: FnMut(PacketRecord) -> bool,
{
    #[inline]
    fn forward(&mut self, packet: PacketRecord) -> bool {
        self(packet)
    }
}
