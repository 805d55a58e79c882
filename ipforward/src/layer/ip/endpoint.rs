use crate::config::Config;
use crate::layer::arp::{Link, PendingBuffer, Resolver, Sent};
use crate::layer::icmp::Local;
use crate::layer::{Error, Result};
use crate::wire::{self, Icmpv4Report, Ipv4Address, Ipv4Packet};

use super::{Interface, InterfaceId, Routes};

/// The forwarding core of a router.
///
/// Owns the interface list and the routing table, both fixed at construction, together with the
/// collaborators for transmission, resolution and buffering. Every operation takes `&self`, the
/// only shared mutable state lives in the pending buffer.
///
/// Collaborators are generic so that a router may own them or, through the implementations for
/// shared references, borrow them.
pub struct Router<L, R, B> {
    config: Config,

    /// Our own addresses, in a fixed order. The first one sources messages by default.
    interfaces: Vec<Interface>,

    /// Routing information.
    routes: Routes,

    link: L,
    resolver: R,
    pending: B,
}

/// What became of a received datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The datagram failed validation and was discarded without a report.
    Dropped(wire::Error),
    /// The datagram was addressed to the router.
    Local(Local),
    /// The datagram was forwarded, or forwarding failed as described.
    Forwarded(Forward),
}

/// The result of forwarding a datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Forward {
    /// Transmitted to the next hop.
    Sent,
    /// Waiting for the next hop to resolve.
    Buffered,
    /// The next hop could not be resolved.
    Unreachable,
    /// No route matches the destination.
    NoRoute,
    /// The time to live was already exhausted on arrival.
    TimeExceeded,
}

impl From<Sent> for Forward {
    fn from(sent: Sent) -> Self {
        match sent {
            Sent::Transmitted => Forward::Sent,
            Sent::Buffered => Forward::Buffered,
            Sent::Unreachable => Forward::Unreachable,
        }
    }
}

impl Forward {
    /// The error message a source should receive about this result, if any.
    pub fn report(self) -> Option<Icmpv4Report> {
        match self {
            Forward::Sent | Forward::Buffered => None,
            Forward::Unreachable => Some(Icmpv4Report::HOST_UNREACHABLE),
            Forward::NoRoute => Some(Icmpv4Report::NET_UNREACHABLE),
            Forward::TimeExceeded => Some(Icmpv4Report::TTL_EXPIRED),
        }
    }
}

impl<L, R, B> Router<L, R, B>
where
    L: Link,
    R: Resolver,
    B: PendingBuffer,
{
    /// Construct a router from its interfaces and routes.
    ///
    /// Fails when no interface is given, when an interface address is not a unicast address, or
    /// when a route names an interface that is not in the list.
    pub fn new(
        config: Config,
        interfaces: Vec<Interface>,
        routes: Routes,
        link: L,
        resolver: R,
        pending: B,
    ) -> Result<Self> {
        if interfaces.is_empty() {
            return Err(Error::NoInterfaces);
        }

        if let Some(iface) = interfaces.iter().find(|iface| !iface.addr.is_unicast()) {
            net_debug!("interface {} has non-unicast address {}", iface.id, iface.addr);
            return Err(Error::Illegal);
        }

        if let Some(route) = routes.iter().find(|route| {
            !interfaces.iter().any(|iface| iface.id == route.interface)
        }) {
            net_debug!("route {} names unknown interface", route);
            return Err(Error::UnknownInterface);
        }

        Ok(Router {
            config,
            interfaces,
            routes,
            link,
            resolver,
            pending,
        })
    }

    /// Process one datagram arriving from a link.
    ///
    /// This is the entry point of the forwarding core. The datagram is validated, then either
    /// delivered locally or forwarded. Forwarding failures are reported to the datagram's source.
    pub fn receive(&self, datagram: Vec<u8>) -> Outcome {
        let packet = match Ipv4Packet::new_trimmed(datagram) {
            Ok(packet) => packet,
            Err(err) => {
                net_debug!("dropped invalid datagram: {}", err);
                return Outcome::Dropped(err);
            },
        };

        let repr = packet.repr();
        if self.is_for_me(repr.dst_addr) {
            net_trace!("local delivery of {}", repr);
            return Outcome::Local(self.dispatch(packet));
        }

        // The report quotes the datagram as it arrived, before the hop limit changes.
        let quote = packet.quoted_slice().to_vec();
        let forward = self.forward(packet);
        if let Some(report) = forward.report() {
            self.send_error(&quote, report, None);
        }

        Outcome::Forwarded(forward)
    }

    /// Forward a validated datagram that is not addressed to the router.
    ///
    /// This checks the time to live, finds a route, decrements the time to live and hands the
    /// datagram to the sender. No error message is generated here, see [`receive`].
    ///
    /// [`receive`]: #method.receive
    pub fn forward(&self, mut packet: Ipv4Packet<Vec<u8>>) -> Forward {
        let repr = packet.repr();
        if repr.hop_limit == 0 {
            net_trace!("time exceeded for {}", repr);
            return Forward::TimeExceeded;
        }

        let route = match self.routes.lookup(repr.dst_addr) {
            Some(route) => route,
            None => {
                net_trace!("no route for {}", repr);
                return Forward::NoRoute;
            },
        };

        let interface = match self.interface(&route.interface) {
            Some(interface) => interface,
            None => {
                net_warn!("route {} has no interface", route);
                return Forward::NoRoute;
            },
        };

        // Checked to be non-zero before.
        packet.decrement_hop_limit();
        let next_hop = route.next_hop.resolve_for(repr.dst_addr);
        net_trace!("forward {} to {} on {}", repr, next_hop, interface.id);
        self.send(next_hop, interface, packet).into()
    }

    /// Whether `addr` is assigned to one of the router's interfaces.
    pub fn is_for_me(&self, addr: Ipv4Address) -> bool {
        self.interfaces.iter().any(|iface| iface.addr == addr)
    }

    /// Find an interface by its identifier.
    pub fn interface(&self, id: &InterfaceId) -> Option<&Interface> {
        self.interfaces.iter().find(|iface| iface.id == *id)
    }
}

impl<L, R, B> Router<L, R, B> {
    /// The configuration the router was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// All interfaces, in their configured order.
    pub fn interfaces(&self) -> &[Interface] {
        &self.interfaces
    }

    /// The routing table.
    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    /// The link collaborator.
    pub fn link(&self) -> &L {
        &self.link
    }

    /// The resolver collaborator.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// The pending buffer collaborator.
    pub fn pending(&self) -> &B {
        &self.pending
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::layer::arp::PendingQueue;
    use crate::layer::ip::{NextHop, Route};
    use crate::layer::mock::{Arp, Wire};
    use crate::wire::EthernetAddress;

    fn eth0() -> Interface {
        Interface::new("eth0", Ipv4Address::new(10, 0, 0, 1), EthernetAddress([2, 0, 0, 0, 0, 1]))
    }

    fn build(interfaces: Vec<Interface>, routes: Vec<Route>) -> Result<()> {
        let (wire, arp, pending) = (Wire::default(), Arp::default(), PendingQueue::default());
        let router = Router::new(
            Config::default(), interfaces, Routes::new(routes), &wire, &arp, &pending);
        let result = router.map(|_| ());
        result
    }

    #[test]
    fn construct() {
        let route = Route::new(Ipv4Address::new(10, 0, 0, 0), 8, NextHop::Direct, "eth0");
        assert_eq!(build(vec![eth0()], vec![route.clone()]), Ok(()));
        assert_eq!(build(vec![], vec![]), Err(Error::NoInterfaces));

        let mut broadcast = eth0();
        broadcast.addr = Ipv4Address::BROADCAST;
        assert_eq!(build(vec![broadcast], vec![]), Err(Error::Illegal));

        let stray = Route::new(Ipv4Address::new(10, 0, 0, 0), 8, NextHop::Direct, "eth9");
        assert_eq!(build(vec![eth0()], vec![route, stray]), Err(Error::UnknownInterface));
    }

    #[test]
    fn reports() {
        assert_eq!(Forward::Sent.report(), None);
        assert_eq!(Forward::Buffered.report(), None);
        assert_eq!(Forward::NoRoute.report(), Some(Icmpv4Report::NET_UNREACHABLE));
        assert_eq!(Forward::Unreachable.report(), Some(Icmpv4Report::HOST_UNREACHABLE));
        assert_eq!(Forward::TimeExceeded.report(), Some(Icmpv4Report::TTL_EXPIRED));
    }
}
