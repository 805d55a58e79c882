use crate::layer::arp::{Link, PendingBuffer, Resolver, Sent};
use crate::layer::ip::Router;
use crate::layer::{Error, Result};
use crate::wire::ipv4::QUOTED_PAYLOAD_LEN;
use crate::wire::{icmpv4_packet, ipv4_packet};
use crate::wire::{IpProtocol, Icmpv4Message, Icmpv4Report, Ipv4Address, Ipv4Packet, Ipv4Repr};

impl<L, R, B> Router<L, R, B>
where
    L: Link,
    R: Resolver,
    B: PendingBuffer,
{
    /// Send an ICMP message originated by the router.
    ///
    /// The message is wrapped into a new datagram towards `dst_addr` and routed. Without a source
    /// address, the address of the first interface is used. This is best effort, a message that
    /// can not be routed or resolved is dropped and never reported.
    pub fn send_control_message(
        &self,
        message: &[u8],
        dst_addr: Ipv4Address,
        src_addr: Option<Ipv4Address>,
    ) {
        match self.originate(message, dst_addr, src_addr) {
            Ok(Sent::Transmitted) => (),
            Ok(sent) => net_debug!("control message to {}: {:?}", dst_addr, sent),
            Err(err) => net_debug!("dropped control message to {}: {}", dst_addr, err),
        }
    }

    /// Report a failure to the source of a datagram.
    ///
    /// `original` starts with the header of the offending datagram. The message quotes that header
    /// and up to eight octets after it. Nothing is sent when errors are not reported, when the
    /// source is not a unicast address or one of our own, or when the datagram itself is an ICMP
    /// error.
    pub fn send_error(&self, original: &[u8], report: Icmpv4Report, src_addr: Option<Ipv4Address>) {
        if !self.config().report_errors {
            return;
        }

        let header = match ipv4_packet::new_checked(original) {
            Ok(header) => header,
            Err(err) => {
                net_warn!("can not report {} about invalid datagram: {}", report, err);
                return;
            },
        };

        let dst_addr = header.src_addr();
        if !dst_addr.is_unicast() {
            net_debug!("suppressed {} to non-unicast {}", report, dst_addr);
            return;
        }

        // Our own datagrams, control messages included, are never reported back to us.
        if self.is_for_me(dst_addr) {
            net_debug!("suppressed {} to own address {}", report, dst_addr);
            return;
        }

        let header_len = usize::from(header.header_len());
        if header.protocol() == IpProtocol::Icmp {
            let is_error = original.get(header_len)
                .map(|&msg_type| Icmpv4Message::from(msg_type).is_error())
                .unwrap_or(false);
            if is_error {
                net_debug!("suppressed {} about ICMP error from {}", report, dst_addr);
                return;
            }
        }

        let quoted_len = original.len().min(header_len + QUOTED_PAYLOAD_LEN);
        let repr = report.into_repr(quoted_len);
        let mut message = vec![0; repr.buffer_len()];
        repr.emit(icmpv4_packet::new_unchecked_mut(&mut message), &original[..quoted_len]);

        net_trace!("{} to {}", report, dst_addr);
        self.send_control_message(&message, dst_addr, src_addr);
    }

    fn originate(&self, message: &[u8], dst_addr: Ipv4Address, src_addr: Option<Ipv4Address>)
        -> Result<Sent>
    {
        let src_addr = match src_addr {
            Some(addr) => addr,
            None => self.interfaces().first().ok_or(Error::NoInterfaces)?.addr,
        };

        let route = self.routes().lookup(dst_addr).ok_or(Error::Unreachable)?;
        let interface = self.interface(&route.interface).ok_or(Error::UnknownInterface)?;

        let repr = Ipv4Repr {
            src_addr,
            dst_addr,
            protocol: IpProtocol::Icmp,
            payload_len: message.len(),
            hop_limit: self.config().originate_hop_limit,
        };
        if repr.total_len() > usize::from(u16::max_value()) {
            return Err(Error::BadSize);
        }

        let mut datagram = vec![0; repr.total_len()];
        {
            let packet = ipv4_packet::new_unchecked_mut(&mut datagram);
            repr.emit(packet);
            packet.payload_mut_slice().copy_from_slice(message);
        }

        let packet = Ipv4Packet::new_checked(datagram)?;
        let next_hop = route.next_hop.resolve_for(dst_addr);
        Ok(self.send(next_hop, interface, packet))
    }
}
