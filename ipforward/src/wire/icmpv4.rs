use core::{fmt, ops};
use byteorder::{ByteOrder, NetworkEndian};

use super::{Error, Result};
use super::ip::checksum;

enum_with_unknown! {
    /// Internet protocol control message type.
    pub doc enum Message(u8) {
        /// Echo reply
        EchoReply      =  0,
        /// Destination unreachable
        DstUnreachable =  3,
        /// Source quench
        SourceQuench   =  4,
        /// Message redirect
        Redirect       =  5,
        /// Echo request
        EchoRequest    =  8,
        /// Time exceeded
        TimeExceeded   = 11,
        /// Parameter problem
        ParamProblem   = 12,
        /// Timestamp
        Timestamp      = 13,
        /// Timestamp reply
        TimestampReply = 14,
    }
}

impl Message {
    /// Whether this type reports an error about another datagram.
    ///
    /// No error message is ever generated about a datagram carrying one of these. See [RFC 1122],
    /// section 3.2.2.
    ///
    /// [RFC 1122]: https://tools.ietf.org/html/rfc1122
    pub fn is_error(self) -> bool {
        match self {
            Message::DstUnreachable
            | Message::SourceQuench
            | Message::Redirect
            | Message::TimeExceeded
            | Message::ParamProblem => true,
            _ => false,
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Message::EchoReply      => write!(f, "echo reply"),
            Message::DstUnreachable => write!(f, "destination unreachable"),
            Message::SourceQuench   => write!(f, "source quench"),
            Message::Redirect       => write!(f, "message redirect"),
            Message::EchoRequest    => write!(f, "echo request"),
            Message::TimeExceeded   => write!(f, "time exceeded"),
            Message::ParamProblem   => write!(f, "parameter problem"),
            Message::Timestamp      => write!(f, "timestamp"),
            Message::TimestampReply => write!(f, "timestamp reply"),
            Message::Unknown(id)    => write!(f, "{}", id)
        }
    }
}

enum_with_unknown! {
    /// Subtype of "Destination Unreachable".
    pub doc enum DstUnreachable(u8) {
        /// Destination network unreachable
        NetUnreachable   =  0,
        /// Destination host unreachable
        HostUnreachable  =  1,
        /// Destination protocol unreachable
        ProtoUnreachable =  2,
        /// Destination port unreachable
        PortUnreachable  =  3,
        /// Fragmentation required, and DF flag set
        FragRequired     =  4,
        /// Source route failed
        SrcRouteFailed   =  5,
    }
}

impl fmt::Display for DstUnreachable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DstUnreachable::NetUnreachable =>
                write!(f, "destination network unreachable"),
            DstUnreachable::HostUnreachable =>
                write!(f, "destination host unreachable"),
            DstUnreachable::ProtoUnreachable =>
                write!(f, "destination protocol unreachable"),
            DstUnreachable::PortUnreachable =>
                write!(f, "destination port unreachable"),
            DstUnreachable::FragRequired =>
                write!(f, "fragmentation required, and DF flag set"),
            DstUnreachable::SrcRouteFailed =>
                write!(f, "source route failed"),
            DstUnreachable::Unknown(id) =>
                write!(f, "{}", id)
        }
    }
}

enum_with_unknown! {
    /// Subtype of "Time Exceeded".
    pub doc enum TimeExceeded(u8) {
        /// TTL expired in transit
        TtlExpired  = 0,
        /// Fragment reassembly time exceeded
        FragExpired = 1
    }
}

impl fmt::Display for TimeExceeded {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TimeExceeded::TtlExpired => write!(f, "ttl expired in transit"),
            TimeExceeded::FragExpired => write!(f, "fragment reassembly time exceeded"),
            TimeExceeded::Unknown(id) => write!(f, "{}", id),
        }
    }
}

/// The kind of an error message the router originates, as a type and code pair.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Report {
    /// Type 3 with the given code.
    DstUnreachable(DstUnreachable),
    /// Type 11 with the given code.
    TimeExceeded(TimeExceeded),
}

impl Report {
    /// The hop limit of a forwarded datagram ran out.
    pub const TTL_EXPIRED: Report = Report::TimeExceeded(TimeExceeded::TtlExpired);

    /// No route matches the destination.
    pub const NET_UNREACHABLE: Report = Report::DstUnreachable(DstUnreachable::NetUnreachable);

    /// The next hop can not be resolved to a link address.
    pub const HOST_UNREACHABLE: Report = Report::DstUnreachable(DstUnreachable::HostUnreachable);

    /// A datagram for this router carries an unsupported protocol.
    pub const PROTO_UNREACHABLE: Report = Report::DstUnreachable(DstUnreachable::ProtoUnreachable);

    /// The message type field.
    pub fn msg_type(self) -> Message {
        match self {
            Report::DstUnreachable(_) => Message::DstUnreachable,
            Report::TimeExceeded(_) => Message::TimeExceeded,
        }
    }

    /// The message code field.
    pub fn msg_code(self) -> u8 {
        match self {
            Report::DstUnreachable(code) => code.into(),
            Report::TimeExceeded(code) => code.into(),
        }
    }

    /// The message representation quoting `quoted_len` bytes of the offending datagram.
    pub fn into_repr(self, quoted_len: usize) -> Repr {
        match self {
            Report::DstUnreachable(reason) => Repr::DstUnreachable { reason, quoted_len },
            Report::TimeExceeded(reason) => Repr::TimeExceeded { reason, quoted_len },
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Report::DstUnreachable(code) => write!(f, "{}", code),
            Report::TimeExceeded(code) => write!(f, "{}", code),
        }
    }
}

byte_wrapper! {
    /// A byte sequence representing an ICMP message, header and payload.
    #[derive(Debug, PartialEq, Eq)]
    pub struct icmpv4([u8]);
}

mod field {
    use crate::wire::field::Field;

    pub(crate) const TYPE:       usize = 0;
    pub(crate) const CODE:       usize = 1;
    pub(crate) const CHECKSUM:   Field = 2..4;

    /// Rest of header of error messages, zero on emission.
    pub(crate) const UNUSED:     Field = 4..8;

    pub(crate) const ECHO_IDENT: Field = 4..6;
    pub(crate) const ECHO_SEQNO: Field = 6..8;

    pub(crate) const HEADER_END: usize = 8;
}

/// Length of the header common to all messages handled here.
pub const HEADER_LEN: usize = field::HEADER_END;

impl icmpv4 {
    /// Imbue a raw octet buffer with ICMP message structure.
    pub fn new_unchecked(buffer: &[u8]) -> &icmpv4 {
        Self::__from_macro_new_unchecked(buffer)
    }

    /// Imbue a mutable octet buffer with ICMP message structure.
    pub fn new_unchecked_mut(buffer: &mut [u8]) -> &mut icmpv4 {
        Self::__from_macro_new_unchecked_mut(buffer)
    }

    /// Shorthand for a combination of [new_unchecked] and [check_len].
    ///
    /// [new_unchecked]: #method.new_unchecked
    /// [check_len]: #method.check_len
    pub fn new_checked(data: &[u8]) -> Result<&icmpv4> {
        let packet = Self::new_unchecked(data);
        packet.check_len()?;
        Ok(packet)
    }

    /// Unwrap the packet as a raw byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Ensure that no accessor method will panic if called.
    /// Returns `Err(Error::Truncated)` if the buffer is too short.
    pub fn check_len(&self) -> Result<()> {
        if self.0.len() < field::HEADER_END {
            Err(Error::Truncated)
        } else {
            Ok(())
        }
    }

    /// Return the message type field.
    #[inline]
    pub fn msg_type(&self) -> Message {
        Message::from(self.0[field::TYPE])
    }

    /// Return the message code field.
    #[inline]
    pub fn msg_code(&self) -> u8 {
        self.0[field::CODE]
    }

    /// Return the checksum field.
    #[inline]
    pub fn checksum(&self) -> u16 {
        NetworkEndian::read_u16(&self.0[field::CHECKSUM])
    }

    /// Return the identifier field (for echo request and reply packets).
    #[inline]
    pub fn echo_ident(&self) -> u16 {
        NetworkEndian::read_u16(&self.0[field::ECHO_IDENT])
    }

    /// Return the sequence number field (for echo request and reply packets).
    #[inline]
    pub fn echo_seq_no(&self) -> u16 {
        NetworkEndian::read_u16(&self.0[field::ECHO_SEQNO])
    }

    /// Validate the checksum over the whole message.
    pub fn verify_checksum(&self) -> bool {
        checksum::data(self.as_bytes()) == !0
    }

    /// Set the message type field.
    #[inline]
    pub fn set_msg_type(&mut self, value: Message) {
        self.0[field::TYPE] = value.into();
    }

    /// Set the message code field.
    #[inline]
    pub fn set_msg_code(&mut self, value: u8) {
        self.0[field::CODE] = value;
    }

    /// Set the checksum field.
    #[inline]
    pub fn set_checksum(&mut self, value: u16) {
        NetworkEndian::write_u16(&mut self.0[field::CHECKSUM], value);
    }

    /// Set the identifier field (for echo request and reply packets).
    #[inline]
    pub fn set_echo_ident(&mut self, value: u16) {
        NetworkEndian::write_u16(&mut self.0[field::ECHO_IDENT], value);
    }

    /// Set the sequence number field (for echo request and reply packets).
    #[inline]
    pub fn set_echo_seq_no(&mut self, value: u16) {
        NetworkEndian::write_u16(&mut self.0[field::ECHO_SEQNO], value);
    }

    /// Zero the four octets following the checksum of an error message.
    #[inline]
    pub fn clear_unused(&mut self) {
        for byte in &mut self.0[field::UNUSED] {
            *byte = 0;
        }
    }

    /// Compute and fill in the checksum over the whole message.
    pub fn fill_checksum(&mut self) {
        self.set_checksum(0);
        let checksum = !checksum::data(&self.0);
        self.set_checksum(checksum);
    }

    /// Return the payload as a byte slice.
    pub fn payload_slice(&self) -> &[u8] {
        &self.0[field::HEADER_END..]
    }

    /// Return the payload as a mutable byte slice.
    pub fn payload_mut_slice(&mut self) -> &mut [u8] {
        &mut self.0[field::HEADER_END..]
    }
}

impl AsRef<[u8]> for icmpv4 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsMut<[u8]> for icmpv4 {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

/// An ICMP message whose checksum and structure have been checked.
#[derive(Debug, PartialEq, Clone)]
pub struct Packet<T> {
    buffer: T,
    repr: Repr,
}

impl<T: AsRef<[u8]>> Packet<T> {
    /// Check the message and memoize its parsed header.
    pub fn new_checked(buffer: T) -> Result<Packet<T>> {
        let repr = {
            let packet = icmpv4::new_checked(buffer.as_ref())?;
            Repr::parse(packet)?
        };
        Ok(Packet {
            buffer,
            repr,
        })
    }

    /// Get the repr of the packet header.
    pub fn repr(&self) -> Repr {
        self.repr
    }
}

impl<T> Packet<T> {
    /// Return the raw underlying buffer.
    pub fn into_inner(self) -> T {
        self.buffer
    }
}

impl<T: AsRef<[u8]>> ops::Deref for Packet<T> {
    type Target = icmpv4;

    fn deref(&self) -> &icmpv4 {
        // We checked the length at construction.
        icmpv4::new_unchecked(self.buffer.as_ref())
    }
}

/// A high-level representation of an ICMP message header.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Repr {
    EchoRequest {
        ident:  u16,
        seq_no: u16,
        payload_len: usize,
    },
    EchoReply {
        ident:  u16,
        seq_no: u16,
        payload_len: usize,
    },
    DstUnreachable {
        reason: DstUnreachable,
        quoted_len: usize,
    },
    TimeExceeded {
        reason: TimeExceeded,
        quoted_len: usize,
    },
}

impl Repr {
    /// Get the echo reply request if this is an echo request.
    pub fn echo_reply(self) -> Option<Repr> {
        match self {
            Repr::EchoRequest { ident, seq_no, payload_len, } =>
                Some(Repr::EchoReply { ident, seq_no, payload_len, }),
            _ => None,
        }
    }

    /// Parse an ICMP message and return a high-level representation.
    ///
    /// The checksum is always verified. Types other than echo and the two error types this router
    /// originates are rejected as `Unsupported`, unassigned types as `Unrecognized`.
    pub fn parse(packet: &icmpv4) -> Result<Repr> {
        packet.check_len()?;
        if !packet.verify_checksum() { return Err(Error::WrongChecksum) }

        match (packet.msg_type(), packet.msg_code()) {
            (Message::EchoRequest, 0) => Ok(Repr::EchoRequest {
                ident:  packet.echo_ident(),
                seq_no: packet.echo_seq_no(),
                payload_len: packet.payload_slice().len(),
            }),

            (Message::EchoReply, 0) => Ok(Repr::EchoReply {
                ident:  packet.echo_ident(),
                seq_no: packet.echo_seq_no(),
                payload_len: packet.payload_slice().len(),
            }),

            (Message::DstUnreachable, code) => Ok(Repr::DstUnreachable {
                reason: DstUnreachable::from(code),
                quoted_len: packet.payload_slice().len(),
            }),

            (Message::TimeExceeded, code) => Ok(Repr::TimeExceeded {
                reason: TimeExceeded::from(code),
                quoted_len: packet.payload_slice().len(),
            }),

            (Message::Unknown(_), _) => Err(Error::Unrecognized),
            _ => Err(Error::Unsupported),
        }
    }

    /// The message type of this representation.
    pub fn msg_type(&self) -> Message {
        match self {
            Repr::EchoRequest { .. } => Message::EchoRequest,
            Repr::EchoReply { .. } => Message::EchoReply,
            Repr::DstUnreachable { .. } => Message::DstUnreachable,
            Repr::TimeExceeded { .. } => Message::TimeExceeded,
        }
    }

    /// Return the length of a message that will be emitted from this high-level representation.
    pub fn buffer_len(&self) -> usize {
        match self {
            Repr::EchoRequest { payload_len, .. }
            | Repr::EchoReply { payload_len, .. } => field::HEADER_END + payload_len,
            Repr::DstUnreachable { quoted_len, .. }
            | Repr::TimeExceeded { quoted_len, .. } => field::HEADER_END + quoted_len,
        }
    }

    /// Emit the message with the given payload, including its checksum.
    ///
    /// For error messages the payload is the quoted part of the offending datagram.
    ///
    /// # Panics
    /// This function panics if the packet is not exactly `buffer_len` long or if the payload
    /// length differs from the one of the representation.
    pub fn emit(&self, packet: &mut icmpv4, payload: &[u8]) {
        match *self {
            Repr::EchoRequest { ident, seq_no, .. } => {
                packet.set_msg_type(Message::EchoRequest);
                packet.set_msg_code(0);
                packet.set_echo_ident(ident);
                packet.set_echo_seq_no(seq_no);
            },
            Repr::EchoReply { ident, seq_no, .. } => {
                packet.set_msg_type(Message::EchoReply);
                packet.set_msg_code(0);
                packet.set_echo_ident(ident);
                packet.set_echo_seq_no(seq_no);
            },
            Repr::DstUnreachable { reason, .. } => {
                packet.set_msg_type(Message::DstUnreachable);
                packet.set_msg_code(reason.into());
                packet.clear_unused();
            },
            Repr::TimeExceeded { reason, .. } => {
                packet.set_msg_type(Message::TimeExceeded);
                packet.set_msg_code(reason.into());
                packet.clear_unused();
            },
        }

        packet.payload_mut_slice().copy_from_slice(payload);
        packet.fill_checksum();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    static ECHO_REQUEST_BYTES: [u8; 12] =
        [0x08, 0x00, 0xc2, 0x64,
         0x12, 0x34, 0xab, 0xcd,
         0xaa, 0xbb, 0xcc, 0xdd];

    static ECHO_REPLY_BYTES: [u8; 12] =
        [0x00, 0x00, 0xca, 0x64,
         0x12, 0x34, 0xab, 0xcd,
         0xaa, 0xbb, 0xcc, 0xdd];

    static ECHO_DATA: [u8; 4] = [0xaa, 0xbb, 0xcc, 0xdd];

    fn echo_request_repr() -> Repr {
        Repr::EchoRequest {
            ident: 0x1234,
            seq_no: 0xabcd,
            payload_len: 4,
        }
    }

    #[test]
    fn echo_deconstruct() {
        let packet = icmpv4::new_checked(&ECHO_REQUEST_BYTES[..]).unwrap();
        assert_eq!(packet.msg_type(), Message::EchoRequest);
        assert_eq!(packet.msg_code(), 0);
        assert_eq!(packet.checksum(), 0xc264);
        assert_eq!(packet.echo_ident(), 0x1234);
        assert_eq!(packet.echo_seq_no(), 0xabcd);
        assert_eq!(packet.payload_slice(), &ECHO_DATA[..]);
        assert!(packet.verify_checksum());
    }

    #[test]
    fn echo_parse() {
        let packet = Packet::new_checked(&ECHO_REQUEST_BYTES[..]).unwrap();
        assert_eq!(packet.repr(), echo_request_repr());
    }

    #[test]
    fn echo_reply_emit() {
        let reply = echo_request_repr().echo_reply().unwrap();
        let mut bytes = vec![0xa5; reply.buffer_len()];
        reply.emit(icmpv4::new_unchecked_mut(&mut bytes), &ECHO_DATA);
        assert_eq!(bytes, &ECHO_REPLY_BYTES[..]);
    }

    #[test]
    fn reject_bad_checksum() {
        let mut bytes = ECHO_REQUEST_BYTES;
        bytes[9] ^= 0x01;
        assert_eq!(Packet::new_checked(&bytes[..]), Err(Error::WrongChecksum));
    }

    #[test]
    fn reject_short() {
        assert_eq!(Packet::new_checked(&ECHO_REQUEST_BYTES[..7]), Err(Error::Truncated));
    }

    #[test]
    fn reject_unknown() {
        let mut bytes = ECHO_REQUEST_BYTES.to_vec();
        let packet = icmpv4::new_unchecked_mut(&mut bytes);
        packet.set_msg_type(Message::Unknown(0x2a));
        packet.fill_checksum();
        assert_eq!(Packet::new_checked(&bytes[..]), Err(Error::Unrecognized));

        let packet = icmpv4::new_unchecked_mut(&mut bytes);
        packet.set_msg_type(Message::Timestamp);
        packet.fill_checksum();
        assert_eq!(Packet::new_checked(&bytes[..]), Err(Error::Unsupported));
    }

    #[test]
    fn error_emit() {
        let quote: Vec<u8> = (0u8..28).collect();
        let repr = Report::HOST_UNREACHABLE.into_repr(quote.len());
        let mut bytes = vec![0xa5; repr.buffer_len()];
        repr.emit(icmpv4::new_unchecked_mut(&mut bytes), &quote);

        assert_eq!(bytes.len(), 36);
        assert_eq!(&bytes[..2], &[3, 1]);
        assert_eq!(&bytes[4..8], &[0; 4]);
        assert_eq!(&bytes[8..], &quote[..]);

        let packet = Packet::new_checked(&bytes[..]).unwrap();
        assert_eq!(packet.repr(), repr);
    }

    #[test]
    fn report_codes() {
        assert_eq!(Report::TTL_EXPIRED.msg_type(), Message::TimeExceeded);
        assert_eq!(Report::TTL_EXPIRED.msg_code(), 0);
        assert_eq!(Report::NET_UNREACHABLE.msg_code(), 0);
        assert_eq!(Report::HOST_UNREACHABLE.msg_code(), 1);
        assert_eq!(Report::PROTO_UNREACHABLE.msg_code(), 2);
        assert_eq!(u8::from(Report::PROTO_UNREACHABLE.msg_type()), 3);
    }

    #[test]
    fn error_types() {
        assert!(Message::DstUnreachable.is_error());
        assert!(Message::TimeExceeded.is_error());
        assert!(Message::Redirect.is_error());
        assert!(!Message::EchoRequest.is_error());
        assert!(!Message::EchoReply.is_error());
        assert!(!Message::Unknown(42).is_error());
    }
}
