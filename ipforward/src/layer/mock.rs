//! Recording collaborators for tests.
use std::cell::RefCell;
use std::collections::HashMap;

use crate::config::Config;
use crate::layer::arp::{Link, PendingQueue, Resolution, Resolver};
use crate::layer::ip::{Interface, InterfaceId, NextHop, Route, Router, Routes};
use crate::wire::{icmpv4_packet, ipv4_packet};
use crate::wire::{EthernetAddress, IpProtocol, Icmpv4Repr, Ipv4Address, Ipv4Repr};

/// A link remembering every transmitted datagram.
#[derive(Default)]
pub(crate) struct Wire {
    pub(crate) sent: RefCell<Vec<(EthernetAddress, Vec<u8>, InterfaceId)>>,
}

/// A resolver answering from a script, `Pending` for unscripted next hops.
#[derive(Default)]
pub(crate) struct Arp {
    answers: RefCell<HashMap<Ipv4Address, Resolution>>,
    pub(crate) asked: RefCell<Vec<(Ipv4Address, InterfaceId)>>,
}

impl Wire {
    pub(crate) fn take(&self) -> Vec<(EthernetAddress, Vec<u8>, InterfaceId)> {
        self.sent.borrow_mut().drain(..).collect()
    }
}

impl Arp {
    pub(crate) fn answer(&self, next_hop: Ipv4Address, resolution: Resolution) {
        self.answers.borrow_mut().insert(next_hop, resolution);
    }
}

impl Link for Wire {
    fn transmit(&self, link_addr: EthernetAddress, datagram: Vec<u8>, interface: &Interface) {
        self.sent.borrow_mut().push((link_addr, datagram, interface.id.clone()));
    }
}

impl Resolver for Arp {
    fn resolve(&self, next_hop: Ipv4Address, interface: &Interface) -> Resolution {
        self.asked.borrow_mut().push((next_hop, interface.id.clone()));
        self.answers.borrow()
            .get(&next_hop)
            .cloned()
            .unwrap_or(Resolution::Pending)
    }
}

pub(crate) const MAC_ETH0: EthernetAddress = EthernetAddress([0x02, 0, 0, 0, 0, 0x01]);
pub(crate) const MAC_ETH1: EthernetAddress = EthernetAddress([0x02, 0, 0, 0, 0, 0x02]);
pub(crate) const MAC_NEIGHBOR: EthernetAddress = EthernetAddress([0x02, 0, 0, 0, 0, 0x99]);

/// Address of `eth0`, the first interface.
pub(crate) const ADDR_ETH0: Ipv4Address = Ipv4Address::new(10, 0, 0, 1);
/// Address of `eth1`.
pub(crate) const ADDR_ETH1: Ipv4Address = Ipv4Address::new(192, 168, 1, 1);
/// A host on the link of `eth0`.
pub(crate) const HOST: Ipv4Address = Ipv4Address::new(10, 0, 0, 7);
/// Gateway towards `172.16.0.0/16`, on `eth0`.
pub(crate) const GW_WIDE: Ipv4Address = Ipv4Address::new(10, 0, 0, 254);
/// Gateway towards `172.16.5.0/24`, on `eth1`.
pub(crate) const GW_NARROW: Ipv4Address = Ipv4Address::new(192, 168, 1, 254);

/// Collaborators of a router under test.
#[derive(Default)]
pub(crate) struct Net {
    pub(crate) wire: Wire,
    pub(crate) arp: Arp,
    pub(crate) pending: PendingQueue,
}

impl Net {
    /// Two interfaces and two directly connected networks, plus two gateway routes.
    ///
    /// The first is `eth0`, `10.0.0.1/24`, the second `eth1`, `192.168.1.1/24`. The network
    /// `172.16.0.0/16` is reached via `10.0.0.254` except `172.16.5.0/24`, which is reached via
    /// `192.168.1.254`. There is no default route.
    pub(crate) fn router(&self, config: Config) -> Router<&Wire, &Arp, &PendingQueue> {
        let interfaces = vec![
            Interface::new("eth0", ADDR_ETH0, MAC_ETH0),
            Interface::new("eth1", ADDR_ETH1, MAC_ETH1),
        ];

        let routes = Routes::new(vec![
            Route::new(Ipv4Address::new(10, 0, 0, 0), 24, NextHop::Direct, "eth0"),
            Route::new(Ipv4Address::new(192, 168, 1, 0), 24, NextHop::Direct, "eth1"),
            Route::new(Ipv4Address::new(172, 16, 0, 0), 16, NextHop::Gateway(GW_WIDE), "eth0"),
            Route::new(Ipv4Address::new(172, 16, 5, 0), 24, NextHop::Gateway(GW_NARROW), "eth1"),
        ]);

        Router::new(config, interfaces, routes, &self.wire, &self.arp, &self.pending)
            .expect("valid test topology")
    }

    /// Let every neighbor resolve.
    pub(crate) fn resolve_all(&self, neighbors: &[Ipv4Address]) {
        for &neighbor in neighbors {
            self.arp.answer(neighbor, Resolution::Resolved(MAC_NEIGHBOR));
        }
    }

    /// The next hops the resolver was asked about, in order.
    pub(crate) fn asked(&self) -> Vec<Ipv4Address> {
        self.arp.asked.borrow().iter().map(|(next_hop, _)| *next_hop).collect()
    }
}

/// Build a valid datagram.
pub(crate) fn datagram(
    src_addr: Ipv4Address,
    dst_addr: Ipv4Address,
    hop_limit: u8,
    protocol: IpProtocol,
    payload: &[u8],
) -> Vec<u8> {
    let repr = Ipv4Repr {
        src_addr,
        dst_addr,
        protocol,
        payload_len: payload.len(),
        hop_limit,
    };
    let mut bytes = vec![0; repr.total_len()];
    let packet = ipv4_packet::new_unchecked_mut(&mut bytes);
    repr.emit(packet);
    packet.payload_mut_slice().copy_from_slice(payload);
    bytes
}

/// Build a valid ICMP echo request message.
pub(crate) fn echo_request(ident: u16, seq_no: u16, data: &[u8]) -> Vec<u8> {
    let repr = Icmpv4Repr::EchoRequest {
        ident,
        seq_no,
        payload_len: data.len(),
    };
    let mut bytes = vec![0; repr.buffer_len()];
    repr.emit(icmpv4_packet::new_unchecked_mut(&mut bytes), data);
    bytes
}
