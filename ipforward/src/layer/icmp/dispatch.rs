use crate::layer::arp::{Link, PendingBuffer, Resolver};
use crate::layer::ip::Router;
use crate::wire::{self, icmpv4_packet, IpProtocol, Icmpv4Packet, Icmpv4Report, Icmpv4Repr, Ipv4Packet};

/// What became of a datagram addressed to the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Local {
    /// An echo request was answered.
    Answered,
    /// An ICMP message that needs no answer, or an echo request while echo is denied.
    Consumed,
    /// The ICMP message was invalid and discarded.
    Dropped(wire::Error),
    /// The protocol is not served here, a protocol unreachable error was sent.
    Unsupported(IpProtocol),
}

/// The protocols served for datagrams addressed to the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transport {
    /// Internet Control Message Protocol.
    Icmp,
    /// Anything else.
    Unsupported(IpProtocol),
}

impl From<IpProtocol> for Transport {
    fn from(protocol: IpProtocol) -> Self {
        match protocol {
            IpProtocol::Icmp => Transport::Icmp,
            other => Transport::Unsupported(other),
        }
    }
}

impl<L, R, B> Router<L, R, B>
where
    L: Link,
    R: Resolver,
    B: PendingBuffer,
{
    /// Deliver a datagram addressed to the router.
    ///
    /// Never forwards. Replies are sourced from the address the datagram was sent to.
    pub fn dispatch(&self, packet: Ipv4Packet<Vec<u8>>) -> Local {
        let repr = packet.repr();
        match Transport::from(repr.protocol) {
            Transport::Icmp => self.dispatch_icmp(&packet),
            Transport::Unsupported(protocol) => {
                net_debug!("protocol {} unreachable at {}", protocol, repr.dst_addr);
                self.send_error(packet.quoted_slice(), Icmpv4Report::PROTO_UNREACHABLE,
                    Some(repr.dst_addr));
                Local::Unsupported(protocol)
            },
        }
    }

    fn dispatch_icmp(&self, packet: &Ipv4Packet<Vec<u8>>) -> Local {
        let icmp = match Icmpv4Packet::new_checked(packet.payload_slice()) {
            Ok(icmp) => icmp,
            Err(err) => {
                net_debug!("dropped ICMP message from {}: {}", packet.src_addr(), err);
                return Local::Dropped(err);
            },
        };

        let reply = match icmp.repr().echo_reply() {
            Some(reply) => reply,
            None => {
                net_trace!("consumed {} from {}", icmp.msg_type(), packet.src_addr());
                return Local::Consumed;
            },
        };

        if !packet.src_addr().is_unicast() {
            net_debug!("ignored echo request from non-unicast {}", packet.src_addr());
            return Local::Consumed;
        }

        if self.config().deny_echo {
            net_trace!("ignored echo request from {}", packet.src_addr());
            return Local::Consumed;
        }

        let mut message = vec![0; reply.buffer_len()];
        reply.emit(icmpv4_packet::new_unchecked_mut(&mut message), icmp.payload_slice());

        if let Icmpv4Repr::EchoReply { ident, seq_no, .. } = reply {
            net_trace!("echo reply to {} ident={} seq={}", packet.src_addr(), ident, seq_no);
        }
        self.send_control_message(&message, packet.src_addr(), Some(packet.dst_addr()));
        Local::Answered
    }
}
