//! The process logic of the forwarding core.
//!
//! ## Layering
//!
//! Each protocol is split into two parts; the packet logic contained in `wire` and the processing
//! part in this module. The [`Router`] holds the local state: interfaces and routes, which are
//! fixed at construction, and handles to the collaborators doing link transmission, address
//! resolution and buffering. All processing methods take the router by shared reference, so one
//! router may serve datagrams arriving concurrently on several links.
//!
//! ## Receiving
//!
//! A datagram enters through [`Router::receive`]. It is validated, then either dispatched to the
//! local handlers in [`icmp`] or forwarded towards the next hop found in the routing table. Every
//! call returns an [`Outcome`] describing what happened, so that the caller may count or log it.
//!
//! ## Sending
//!
//! All transmission, forwarded or originated, passes through the resolution-gated sender in
//! [`arp`]. It asks the resolver for the link address of the next hop and either transmits,
//! buffers the datagram until resolution completes, or gives up and reports back to the sources.
//!
//! ## Answering
//!
//! Failures that concern another host are answered with an ICMP message generated in [`icmp`].
//! Such a message is routed like any other datagram. When it can not be delivered, there is no
//! further report.
//!
//! [`Router`]: ip/struct.Router.html
//! [`Router::receive`]: ip/struct.Router.html#method.receive
//! [`Outcome`]: ip/enum.Outcome.html
//! [`icmp`]: icmp/index.html
//! [`arp`]: arp/index.html

pub mod arp;
pub mod icmp;
pub mod ip;

#[cfg(test)]
mod mock;

/// The result type of layer operations.
pub type Result<T> = core::result::Result<T, Error>;

/// An error of a layer operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Error {
    /// The operation was not permitted.
    ///
    /// Returned for configuration the router can not operate with, such as an interface whose
    /// address is not a unicast address.
    #[error("operation not permitted")]
    Illegal,

    /// Not enough space for the requested packet.
    ///
    /// Returned when an originated message would not fit the total length field of its datagram.
    #[error("packet size out of bounds")]
    BadSize,

    /// Unable to find a route towards the destination address.
    #[error("no route to destination")]
    Unreachable,

    /// A route or request names an interface the router does not have.
    #[error("unknown interface")]
    UnknownInterface,

    /// The router was configured without any interface.
    #[error("no interfaces configured")]
    NoInterfaces,

    /// Some layer tried to operate on a packet but failed.
    #[error("invalid packet: {0}")]
    Wire(#[from] crate::wire::Error),
}
