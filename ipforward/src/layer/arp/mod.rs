//! Address resolution as seen from the network layer.
//!
//! The router never speaks ARP itself. It asks a [`Resolver`] for the link address of a next hop
//! and reacts to one of three answers: the address is known, a request is underway, or the next
//! hop is unreachable. Datagrams waiting for an answer are kept by a [`PendingBuffer`], and
//! finished datagrams go out through a [`Link`].
//!
//! The resolver owns the timing. Once a request completes it calls [`Router::resolved`], and once
//! it gives up it calls [`Router::resolution_failed`]. Neither happens from within a call into
//! the router, all the router ever does is return [`Sent::Buffered`].
//!
//! [`Resolver`]: trait.Resolver.html
//! [`PendingBuffer`]: trait.PendingBuffer.html
//! [`Link`]: trait.Link.html
//! [`Router::resolved`]: ../ip/struct.Router.html#method.resolved
//! [`Router::resolution_failed`]: ../ip/struct.Router.html#method.resolution_failed
//! [`Sent::Buffered`]: enum.Sent.html#variant.Buffered
use crate::layer::ip::Interface;
use crate::wire::{EthernetAddress, Ipv4Address};

mod pending;
mod sender;

pub use pending::{PendingDatagram, PendingQueue};
pub use sender::Sent;

/// The answer of a resolver about a next hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// The link address of the next hop is known.
    Resolved(EthernetAddress),
    /// A request has been issued, the datagram must wait.
    Pending,
    /// The next hop is considered unreachable.
    Failed,
}

/// Transmits finished datagrams on a link.
pub trait Link {
    /// Hand a datagram to the link layer, addressed to `link_addr`.
    ///
    /// The router relinquishes the datagram and does not learn whether it reached the wire.
    fn transmit(&self, link_addr: EthernetAddress, datagram: Vec<u8>, interface: &Interface);
}

/// Maps next hop addresses to link addresses.
pub trait Resolver {
    /// Look up, or start looking up, the link address of `next_hop` on `interface`.
    ///
    /// On `Pending` the resolver later calls either the flush or the abandonment path of the
    /// router for this next hop.
    fn resolve(&self, next_hop: Ipv4Address, interface: &Interface) -> Resolution;
}

/// Holds datagrams waiting for a next hop to resolve.
///
/// Must be safe to use from several forwarding calls at once. Both [`flush`] and
/// [`abandon_all`] remove everything buffered for the key up to that call, so no datagram is
/// returned twice.
///
/// [`flush`]: #tymethod.flush
/// [`abandon_all`]: #tymethod.abandon_all
pub trait PendingBuffer {
    /// Keep a datagram until its next hop is resolved or abandoned.
    fn buffer(&self, pending: PendingDatagram);

    /// Remove all datagrams waiting for `next_hop`, to be transmitted.
    fn flush(&self, next_hop: Ipv4Address) -> Vec<PendingDatagram>;

    /// Remove all datagrams waiting for `next_hop`, which will never resolve.
    fn abandon_all(&self, next_hop: Ipv4Address) -> Vec<PendingDatagram>;
}

impl<T: Link + ?Sized> Link for &'_ T {
    fn transmit(&self, link_addr: EthernetAddress, datagram: Vec<u8>, interface: &Interface) {
        (**self).transmit(link_addr, datagram, interface)
    }
}

impl<T: Resolver + ?Sized> Resolver for &'_ T {
    fn resolve(&self, next_hop: Ipv4Address, interface: &Interface) -> Resolution {
        (**self).resolve(next_hop, interface)
    }
}

impl<T: PendingBuffer + ?Sized> PendingBuffer for &'_ T {
    fn buffer(&self, pending: PendingDatagram) {
        (**self).buffer(pending)
    }

    fn flush(&self, next_hop: Ipv4Address) -> Vec<PendingDatagram> {
        (**self).flush(next_hop)
    }

    fn abandon_all(&self, next_hop: Ipv4Address) -> Vec<PendingDatagram> {
        (**self).abandon_all(next_hop)
    }
}
