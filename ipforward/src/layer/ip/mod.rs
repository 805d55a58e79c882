//! The IP layer.
//!
//! Decides for every received datagram whether it is delivered locally, forwarded or dropped.
//!
//! It does **not** provide fragment reassembly or option processing. Fragments and datagrams
//! with options are dropped at validation.
//!
//! ## Structure
//!
//! The [`Router`] stores the interface list and the routing table. The interfaces recognize
//! datagrams addressed to the router, the routes select next hop and egress interface for all
//! others.
//!
//! ## Receiving packets
//!
//! A received datagram is validated first. A datagram failing validation is dropped without a
//! report, its header can not be trusted to address one. The destination is then checked against
//! the interface addresses. Datagrams for the router go to the local dispatch, all others are
//! forwarded.
//!
//! ## Forwarding packets
//!
//! A datagram whose time to live is exhausted, or for which no route exists, is not forwarded.
//! Otherwise its time to live is decremented, the only change made to a forwarded header, and it
//! is passed to the resolution-gated sender. Failures are answered with an ICMP error to the
//! source of the datagram.
//!
//! [`Router`]: struct.Router.html
mod endpoint;
mod interface;
mod route;

pub use endpoint::{
    Forward,
    Outcome,
    Router,
};

pub use interface::{
    Interface,
    InterfaceId,
};

pub use route::{
    netmask,
    NextHop,
    Route,
    Routes,
};
