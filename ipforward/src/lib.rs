//! The network-layer forwarding core of a software IPv4 router.
//!
//! ## Table of contents
//!
//! This is also a recommended reading order but feel free to skip ahead, each chapter tries to be
//! somewhat self-contained.
//!
//! 1. [Design](#design-and-relevant-core-concepts)
//! 2. [The wire module](wire/index.html)
//!    1. [Overview of packet representations](wire/index.html#an-overview-over-packet-representations)
//!    1. [Ipv4](wire/ipv4/index.html)
//!    1. [Icmpv4](wire/icmpv4/index.html)
//! 3. [The layers](layer/index.html)
//!    1. [Receiving](layer/index.html#receiving)
//!    1. [Sending](layer/index.html#sending)
//!    1. [Answering](layer/index.html#answering)
//!    1. [The ip layer](layer/ip/index.html)
//! 4. [Configuration](config/index.html)
//!
//! ## Design and relevant core concepts
//!
//! Given a datagram arriving on some link, the router decides whether to accept it for local
//! delivery, forward it towards a next hop, or discard it. When forwarding fails it reports back
//! to the source with an ICMP message.
//!
//! Everything around this decision is left to collaborators: link framing and transmission,
//! address resolution and its cache, and the loading of the routing table. They are plugged in
//! through the traits in [`layer::arp`]. The router keeps no mutable state of its own, all of its
//! operations take `&self`. Datagrams waiting for address resolution are the one shared mutable
//! resource and live in a [`PendingBuffer`], for which [`PendingQueue`] is a concurrent default.
//!
//! ```rust
//! use ipforward::Config;
//! use ipforward::layer::arp::{Link, PendingQueue, Resolution, Resolver};
//! use ipforward::layer::ip::{Forward, Interface, NextHop, Outcome, Route, Router, Routes};
//! use ipforward::wire::{EthernetAddress, Ipv4Address, Ipv4Repr, IpProtocol, ipv4_packet};
//!
//! struct Discard;
//!
//! impl Link for Discard {
//!     fn transmit(&self, _: EthernetAddress, _: Vec<u8>, _: &Interface) {}
//! }
//!
//! impl Resolver for Discard {
//!     fn resolve(&self, _: Ipv4Address, _: &Interface) -> Resolution {
//!         Resolution::Resolved(EthernetAddress([0x02, 0, 0, 0, 0, 0x01]))
//!     }
//! }
//!
//! let router = Router::new(
//!     Config::default(),
//!     vec![Interface::new("eth0", Ipv4Address::new(10, 0, 0, 1), EthernetAddress([0x02, 0, 0, 0, 0, 0x02]))],
//!     Routes::new(vec![Route::new(Ipv4Address::new(10, 0, 0, 0), 24, NextHop::Direct, "eth0")]),
//!     Discard,
//!     Discard,
//!     PendingQueue::default(),
//! ).unwrap();
//!
//! let repr = Ipv4Repr {
//!     src_addr: Ipv4Address::new(10, 0, 0, 2),
//!     dst_addr: Ipv4Address::new(10, 0, 0, 3),
//!     protocol: IpProtocol::Udp,
//!     payload_len: 0,
//!     hop_limit: 64,
//! };
//! let mut datagram = vec![0; repr.total_len()];
//! repr.emit(ipv4_packet::new_unchecked_mut(&mut datagram));
//!
//! assert_eq!(router.receive(datagram), Outcome::Forwarded(Forward::Sent));
//! ```
//!
//! Also, this crate is grateful for @whitequark's [`smoltcp`]. Large portions of the `wire`
//! module wouldn't have been possible without it.
//!
//! [`layer::arp`]: layer/arp/index.html
//! [`PendingBuffer`]: layer/arp/trait.PendingBuffer.html
//! [`PendingQueue`]: layer/arp/struct.PendingQueue.html
//! [`smoltcp`]: https://github.com/m-labs/smoltcp
#![warn(missing_docs)]
#![warn(unreachable_pub)]

#[macro_use] mod macros;
pub mod config;
pub mod layer;
pub mod wire;

pub use config::Config;
pub use layer::ip::Router;
