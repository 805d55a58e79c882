use super::{Link, PendingBuffer, PendingDatagram, Resolution, Resolver};
use crate::layer::ip::{Interface, Router};
use crate::wire::{EthernetAddress, Icmpv4Report, Ipv4Address, Ipv4Packet};

/// The result of handing a datagram to the sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sent {
    /// Given to the link for transmission.
    Transmitted,
    /// Parked until the next hop resolves.
    Buffered,
    /// The next hop is unreachable, the datagram was discarded.
    Unreachable,
}

impl<L, R, B> Router<L, R, B>
where
    L: Link,
    R: Resolver,
    B: PendingBuffer,
{
    /// Send a finished datagram to `next_hop` on `interface`, once its link address is known.
    ///
    /// On a permanent resolution failure every datagram already buffered for the same next hop is
    /// abandoned and reported to its own source. The datagram passed here is not reported, that
    /// is left to the caller, who may know better.
    pub fn send(&self, next_hop: Ipv4Address, interface: &Interface, packet: Ipv4Packet<Vec<u8>>)
        -> Sent
    {
        match self.resolver().resolve(next_hop, interface) {
            Resolution::Resolved(link_addr) => {
                self.link().transmit(link_addr, packet.into_inner(), interface);
                Sent::Transmitted
            },
            Resolution::Pending => {
                net_trace!("waiting for resolution of {} on {}", next_hop, interface.id);
                let source = packet.repr().src_addr;
                self.pending().buffer(PendingDatagram {
                    datagram: packet.into_inner(),
                    source,
                    next_hop,
                    interface: interface.id.clone(),
                });
                Sent::Buffered
            },
            Resolution::Failed => {
                net_debug!("next hop {} on {} unreachable", next_hop, interface.id);
                self.resolution_failed(next_hop);
                Sent::Unreachable
            },
        }
    }

    /// Transmit everything buffered for a next hop whose link address is now known.
    ///
    /// Called by the resolver. Each datagram leaves on the interface it was buffered for. Returns
    /// the number of datagrams transmitted.
    pub fn resolved(&self, next_hop: Ipv4Address, link_addr: EthernetAddress) -> usize {
        let mut transmitted = 0;
        for pending in self.pending().flush(next_hop) {
            match self.interface(&pending.interface) {
                Some(interface) => {
                    self.link().transmit(link_addr, pending.datagram, interface);
                    transmitted += 1;
                },
                None => net_warn!("dropped datagram for {} on unknown interface {}",
                    next_hop, pending.interface),
            }
        }

        net_trace!("flushed {} datagrams to {} at {}", transmitted, next_hop, link_addr);
        transmitted
    }

    /// Give up on a next hop.
    ///
    /// Called by the resolver, and by the sender itself on a failed resolution. Every datagram
    /// buffered for the next hop is discarded, and its original source receives a destination
    /// unreachable message quoting it. Returns the number of abandoned datagrams.
    pub fn resolution_failed(&self, next_hop: Ipv4Address) -> usize {
        let abandoned = self.pending().abandon_all(next_hop);
        for pending in &abandoned {
            net_trace!("abandoned datagram from {} to next hop {}", pending.source, next_hop);
            self.send_error(&pending.datagram, Icmpv4Report::HOST_UNREACHABLE, None);
        }
        abandoned.len()
    }
}
