use core::{fmt, ops};
use byteorder::{ByteOrder, NetworkEndian};

use super::{Error, Result};
use super::ip::checksum;
use super::field::Field;

pub(crate) use super::IpProtocol as Protocol;

/// Length of a header without options, the only kind this router accepts or emits.
pub const MIN_HEADER_LEN: usize = field::DST_ADDR.end;

/// Number of payload octets quoted after the header in ICMP error messages. See [RFC 792].
///
/// [RFC 792]: https://tools.ietf.org/html/rfc792
pub const QUOTED_PAYLOAD_LEN: usize = 8;

/// A four-octet IPv4 address.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct Address(pub [u8; 4]);

impl Address {
    /// An unspecified address.
    pub const UNSPECIFIED: Address = Address([0x00; 4]);

    /// The broadcast address.
    pub const BROADCAST:   Address = Address([0xff; 4]);

    /// Construct an IPv4 address from parts.
    pub const fn new(a0: u8, a1: u8, a2: u8, a3: u8) -> Address {
        Address([a0, a1, a2, a3])
    }

    /// Construct an IPv4 address from a sequence of octets, in big-endian.
    ///
    /// # Panics
    /// The function panics if `data` is not four octets long.
    pub fn from_bytes(data: &[u8]) -> Address {
        let mut bytes = [0; 4];
        bytes.copy_from_slice(data);
        Address(bytes)
    }

    /// Return an IPv4 address as a sequence of octets, in big-endian.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Encode the address into a `u32` in network endian byte order.
    pub fn to_network_integer(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// Decode a network endian `u32` into an address.
    pub fn from_network_integer(num: u32) -> Self {
        Address(num.to_be_bytes())
    }

    /// Keep only the bits that are set in `netmask`.
    ///
    /// ```rust
    /// # use ipforward::wire::Ipv4Address as Address;
    /// let host = Address::new(192, 168, 178, 32);
    /// let net = host.mask(Address::new(255, 255, 255, 0));
    /// assert_eq!(net, Address::new(192, 168, 178, 0));
    /// ```
    pub fn mask(self, netmask: Address) -> Address {
        Address::from_network_integer(self.to_network_integer() & netmask.to_network_integer())
    }

    /// Query whether the address is an unicast address.
    pub fn is_unicast(&self) -> bool {
        !(self.is_broadcast() ||
          self.is_multicast() ||
          self.is_unspecified())
    }

    /// Query whether the address is the broadcast address.
    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }

    /// Query whether the address is a multicast address.
    pub fn is_multicast(&self) -> bool {
        self.0[0] & 0xf0 == 224
    }

    /// Query whether the address falls into the "unspecified" range.
    pub fn is_unspecified(&self) -> bool {
        self.0[0] == 0
    }
}

impl From<std::net::Ipv4Addr> for Address {
    fn from(x: std::net::Ipv4Addr) -> Address {
        Address(x.octets())
    }
}

impl From<Address> for std::net::Ipv4Addr {
    fn from(Address(x): Address) -> std::net::Ipv4Addr {
        x.into()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let bytes = self.0;
        write!(f, "{}.{}.{}.{}", bytes[0], bytes[1], bytes[2], bytes[3])
    }
}

byte_wrapper! {
    /// A byte sequence representing an IPv4 datagram.
    #[derive(Debug, PartialEq, Eq)]
    pub struct ipv4([u8]);
}

/// Offsets of the fixed header. All multi-octet fields are in network byte order.
mod field {
    use crate::wire::field::Field;

    /// Version (high nibble) and header length in 32-bit words (low nibble).
    pub(crate) const VER_IHL:  usize = 0;
    pub(crate) const TOS:      usize = 1;
    pub(crate) const LENGTH:   Field = 2..4;
    pub(crate) const IDENT:    Field = 4..6;
    /// Three flag bits followed by the fragment offset in units of 8 octets.
    pub(crate) const FLG_OFF:  Field = 6..8;
    pub(crate) const TTL:      usize = 8;
    pub(crate) const PROTOCOL: usize = 9;
    pub(crate) const CHECKSUM: Field = 10..12;
    pub(crate) const SRC_ADDR: Field = 12..16;
    pub(crate) const DST_ADDR: Field = 16..20;
}

impl ipv4 {
    /// Imbue a raw octet buffer with IPv4 packet structure.
    pub fn new_unchecked(buffer: &[u8]) -> &ipv4 {
        Self::__from_macro_new_unchecked(buffer)
    }

    /// Imbue a mutable octet buffer with IPv4 packet structure.
    pub fn new_unchecked_mut(buffer: &mut [u8]) -> &mut ipv4 {
        Self::__from_macro_new_unchecked_mut(buffer)
    }

    /// Shorthand for a combination of [new_unchecked] and [check_len].
    ///
    /// [new_unchecked]: #method.new_unchecked
    /// [check_len]: #method.check_len
    pub fn new_checked(data: &[u8]) -> Result<&ipv4> {
        let packet = Self::new_unchecked(data);
        packet.check_len()?;
        Ok(packet)
    }

    /// View the packet as a raw byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Ensure that no fixed header accessor will panic if called.
    ///
    /// Returns `Err(Error::Truncated)` if the buffer can not hold the fixed header. The lengths
    /// declared *within* the header are checked by [`Repr::parse`].
    ///
    /// [`Repr::parse`]: struct.Repr.html#method.parse
    pub fn check_len(&self) -> Result<()> {
        if self.0.len() < MIN_HEADER_LEN {
            Err(Error::Truncated)
        } else {
            Ok(())
        }
    }

    /// Return the version field.
    #[inline]
    pub fn version(&self) -> u8 {
        self.0[field::VER_IHL] >> 4
    }

    /// Return the header length, in octets.
    #[inline]
    pub fn header_len(&self) -> u8 {
        (self.0[field::VER_IHL] & 0x0f) * 4
    }

    /// Return the type of service field.
    #[inline]
    pub fn tos(&self) -> u8 {
        self.0[field::TOS]
    }

    /// Return the total length field.
    #[inline]
    pub fn total_len(&self) -> u16 {
        NetworkEndian::read_u16(&self.0[field::LENGTH])
    }

    /// Return the fragment identification field.
    #[inline]
    pub fn ident(&self) -> u16 {
        NetworkEndian::read_u16(&self.0[field::IDENT])
    }

    /// Return the "don't fragment" flag.
    #[inline]
    pub fn dont_frag(&self) -> bool {
        NetworkEndian::read_u16(&self.0[field::FLG_OFF]) & 0x4000 != 0
    }

    /// Return the "more fragments" flag.
    #[inline]
    pub fn more_frags(&self) -> bool {
        NetworkEndian::read_u16(&self.0[field::FLG_OFF]) & 0x2000 != 0
    }

    /// Return the fragment offset, in octets.
    #[inline]
    pub fn frag_offset(&self) -> u16 {
        NetworkEndian::read_u16(&self.0[field::FLG_OFF]) << 3
    }

    /// Return the time to live field.
    #[inline]
    pub fn hop_limit(&self) -> u8 {
        self.0[field::TTL]
    }

    /// Return the protocol field.
    #[inline]
    pub fn protocol(&self) -> Protocol {
        Protocol::from(self.0[field::PROTOCOL])
    }

    /// Return the header checksum field.
    #[inline]
    pub fn checksum(&self) -> u16 {
        NetworkEndian::read_u16(&self.0[field::CHECKSUM])
    }

    /// Return the source address field.
    #[inline]
    pub fn src_addr(&self) -> Address {
        Address::from_bytes(&self.0[field::SRC_ADDR])
    }

    /// Return the destination address field.
    #[inline]
    pub fn dst_addr(&self) -> Address {
        Address::from_bytes(&self.0[field::DST_ADDR])
    }

    /// Compute the checksum the header should carry.
    ///
    /// The sum covers the header as if its checksum field were zero. The stored field itself is
    /// skipped rather than overwritten, so this works on a shared reference.
    ///
    /// # Panics
    /// This function panics if the buffer is shorter than the header length field declares.
    pub fn header_checksum(&self) -> u16 {
        let header = &self.0[..usize::from(self.header_len())];
        !checksum::combine(&[
            checksum::data(&header[..field::CHECKSUM.start]),
            checksum::data(&header[field::CHECKSUM.end..]),
        ])
    }

    /// Validate the header checksum against the stored value.
    pub fn verify_checksum(&self) -> bool {
        self.checksum() == self.header_checksum()
    }

    /// Set the version field.
    #[inline]
    pub fn set_version(&mut self, value: u8) {
        self.0[field::VER_IHL] = (self.0[field::VER_IHL] & !0xf0) | (value << 4);
    }

    /// Set the header length, in octets.
    #[inline]
    pub fn set_header_len(&mut self, value: u8) {
        self.0[field::VER_IHL] = (self.0[field::VER_IHL] & !0x0f) | ((value / 4) & 0x0f);
    }

    /// Set the type of service field.
    #[inline]
    pub fn set_tos(&mut self, value: u8) {
        self.0[field::TOS] = value
    }

    /// Set the total length field.
    #[inline]
    pub fn set_total_len(&mut self, value: u16) {
        NetworkEndian::write_u16(&mut self.0[field::LENGTH], value)
    }

    /// Set the fragment identification field.
    #[inline]
    pub fn set_ident(&mut self, value: u16) {
        NetworkEndian::write_u16(&mut self.0[field::IDENT], value)
    }

    /// Set the flags and fragment offset field at once, from its raw value.
    #[inline]
    pub fn set_flags_and_offset(&mut self, raw: u16) {
        NetworkEndian::write_u16(&mut self.0[field::FLG_OFF], raw)
    }

    /// Set the time to live field.
    #[inline]
    pub fn set_hop_limit(&mut self, value: u8) {
        self.0[field::TTL] = value
    }

    /// Set the protocol field.
    #[inline]
    pub fn set_protocol(&mut self, value: Protocol) {
        self.0[field::PROTOCOL] = value.into()
    }

    /// Set the header checksum field.
    #[inline]
    pub fn set_checksum(&mut self, value: u16) {
        NetworkEndian::write_u16(&mut self.0[field::CHECKSUM], value)
    }

    /// Set the source address field.
    #[inline]
    pub fn set_src_addr(&mut self, value: Address) {
        self.0[field::SRC_ADDR].copy_from_slice(value.as_bytes())
    }

    /// Set the destination address field.
    #[inline]
    pub fn set_dst_addr(&mut self, value: Address) {
        self.0[field::DST_ADDR].copy_from_slice(value.as_bytes())
    }

    /// Compute and fill in the header checksum.
    pub fn fill_checksum(&mut self) {
        self.set_checksum(0);
        let checksum = self.header_checksum();
        self.set_checksum(checksum)
    }

    /// Decrement the time to live by one and refresh the checksum.
    ///
    /// Returns the new time to live. A datagram whose time to live is already zero is left
    /// untouched and `None` is returned.
    pub fn decrement_hop_limit(&mut self) -> Option<u8> {
        let hop_limit = self.hop_limit().checked_sub(1)?;
        self.set_hop_limit(hop_limit);
        self.fill_checksum();
        Some(hop_limit)
    }

    /// Compute the range of the payload without accessing it.
    pub fn payload_range(&self) -> Field {
        let header_end = usize::from(self.header_len());
        let total_len = usize::from(self.total_len());
        header_end..total_len
    }

    /// Return the payload as a byte slice.
    pub fn payload_slice(&self) -> &[u8] {
        let range = self.payload_range();
        &self.0[range]
    }

    /// Return the payload as a mutable byte slice.
    pub fn payload_mut_slice(&mut self) -> &mut [u8] {
        let range = self.payload_range();
        &mut self.0[range]
    }

    /// The part of this datagram that an ICMP error message about it carries.
    ///
    /// That is the complete header followed by up to eight octets of payload.
    pub fn quoted_slice(&self) -> &[u8] {
        let range = self.payload_range();
        let end = range.end.min(range.start + QUOTED_PAYLOAD_LEN);
        &self.0[..end]
    }
}

impl AsRef<[u8]> for ipv4 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsMut<[u8]> for ipv4 {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

/// A validated IPv4 datagram.
///
/// Only constructed through [`new_checked`], so every accessor of the dereferenced `ipv4` is in
/// bounds and the header passed all checks of [`Repr::parse`]. The header is not mutably
/// accessible except through [`decrement_hop_limit`], the only rewrite a forwarded datagram
/// receives.
///
/// [`new_checked`]: #method.new_checked
/// [`Repr::parse`]: struct.Repr.html#method.parse
/// [`decrement_hop_limit`]: #method.decrement_hop_limit
#[derive(Debug, PartialEq, Clone)]
pub struct Packet<T> {
    buffer: T,
    repr: Repr,
}

impl<T: AsRef<[u8]>> Packet<T> {
    /// Validate a buffer and memoize its parsed header.
    pub fn new_checked(buffer: T) -> Result<Packet<T>> {
        let repr = {
            let packet = ipv4::new_checked(buffer.as_ref())?;
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

    /// Get an immutable reference to the whole buffer.
    pub fn get_ref(&self) -> &T {
        &self.buffer
    }

    /// Return the raw underlying buffer.
    pub fn into_inner(self) -> T {
        self.buffer
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> Packet<T> {
    /// Decrement the time to live and recompute the checksum, in place.
    ///
    /// Returns `None` and leaves the datagram untouched if the time to live is already zero.
    pub fn decrement_hop_limit(&mut self) -> Option<u8> {
        let hop_limit = ipv4::new_unchecked_mut(self.buffer.as_mut())
            .decrement_hop_limit()?;
        self.repr.hop_limit = hop_limit;
        Some(hop_limit)
    }
}

impl Packet<Vec<u8>> {
    /// Validate an owned buffer and cut off anything past the declared total length.
    ///
    /// Link layers may pad short frames, the padding is no part of the datagram.
    pub fn new_trimmed(mut buffer: Vec<u8>) -> Result<Self> {
        let total_len = {
            let packet = ipv4::new_checked(&buffer)?;
            Repr::parse(packet)?;
            usize::from(packet.total_len())
        };
        buffer.truncate(total_len);
        Packet::new_checked(buffer)
    }
}

impl<T: AsRef<[u8]>> ops::Deref for Packet<T> {
    type Target = ipv4;

    fn deref(&self) -> &ipv4 {
        // We checked the length at construction.
        ipv4::new_unchecked(self.buffer.as_ref())
    }
}

/// A high-level representation of an IPv4 header.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Repr {
    /// The source of the packet.
    pub src_addr:    Address,
    /// The destination of the packet.
    pub dst_addr:    Address,
    /// The encapsulated protocol identifier.
    pub protocol:    Protocol,
    /// The length of the payload.
    pub payload_len: usize,
    /// The remaining hop limit of the packet.
    pub hop_limit:   u8,
}

impl Repr {
    /// Parse a received datagram header and return a high-level representation.
    ///
    /// Each of the following rejects the datagram, checked in this order:
    /// * The buffer can not hold a fixed header (`Truncated`).
    /// * The declared total length is below the fixed header size (`Malformed`).
    /// * The version is not 4 (`Malformed`).
    /// * The header carries options (`Unsupported`) or is shorter than the fixed header
    ///   (`Malformed`).
    /// * The stored checksum differs from the recomputed one (`WrongChecksum`).
    /// * The datagram is a fragment (`Unsupported`).
    /// * The buffer is shorter than the declared total length (`Truncated`).
    pub fn parse(packet: &ipv4) -> Result<Repr> {
        packet.check_len()?;
        if usize::from(packet.total_len()) < MIN_HEADER_LEN { return Err(Error::Malformed) }
        if packet.version() != 4 { return Err(Error::Malformed) }
        match usize::from(packet.header_len()) {
            MIN_HEADER_LEN => (),
            len if len > MIN_HEADER_LEN => return Err(Error::Unsupported),
            _ => return Err(Error::Malformed),
        }
        if !packet.verify_checksum() { return Err(Error::WrongChecksum) }
        // We do not support fragmentation.
        if packet.more_frags() || packet.frag_offset() != 0 { return Err(Error::Unsupported) }
        if packet.as_bytes().len() < usize::from(packet.total_len()) { return Err(Error::Truncated) }

        Ok(Repr {
            src_addr:    packet.src_addr(),
            dst_addr:    packet.dst_addr(),
            protocol:    packet.protocol(),
            payload_len: usize::from(packet.total_len()) - MIN_HEADER_LEN,
            hop_limit:   packet.hop_limit(),
        })
    }

    /// Return the length of a header that will be emitted from this high-level representation.
    pub fn buffer_len(&self) -> usize {
        // We never emit any options.
        MIN_HEADER_LEN
    }

    /// Return the total length of the datagram described by this representation.
    pub fn total_len(&self) -> usize {
        self.buffer_len() + self.payload_len
    }

    /// Emit a high-level representation into a header of an originated datagram.
    ///
    /// Type of service, identification, flags and fragment offset are all zero. The checksum is
    /// computed over the finished header.
    ///
    /// # Panics
    /// This function panics if the buffer is shorter than `buffer_len`. The total length must
    /// fit the 16-bit field, which callers check before.
    pub fn emit(&self, packet: &mut ipv4) {
        debug_assert!(self.total_len() <= usize::from(u16::max_value()));
        packet.set_version(4);
        packet.set_header_len(MIN_HEADER_LEN as u8);
        packet.set_tos(0);
        packet.set_total_len(self.total_len() as u16);
        packet.set_ident(0);
        packet.set_flags_and_offset(0);
        packet.set_hop_limit(self.hop_limit);
        packet.set_protocol(self.protocol);
        packet.set_src_addr(self.src_addr);
        packet.set_dst_addr(self.dst_addr);
        packet.fill_checksum();
    }
}

impl fmt::Display for Repr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IPv4 src={} dst={} proto={} ttl={} len={}",
               self.src_addr, self.dst_addr, self.protocol, self.hop_limit, self.payload_len)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    static PACKET_BYTES: [u8; 30] =
        [0x45, 0x00, 0x00, 0x1e,
         0x12, 0x34, 0x00, 0x00,
         0x40, 0x11, 0x9c, 0xec,
         0xc0, 0xa8, 0x01, 0x02,
         0x0a, 0x00, 0x00, 0x05,
         0xde, 0xad, 0xbe, 0xef,
         0x00, 0x01, 0x02, 0x03,
         0x04, 0x05];

    static PAYLOAD_BYTES: [u8; 10] =
        [0xde, 0xad, 0xbe, 0xef,
         0x00, 0x01, 0x02, 0x03,
         0x04, 0x05];

    fn packet_repr() -> Repr {
        Repr {
            src_addr:    Address::new(192, 168, 1, 2),
            dst_addr:    Address::new(10, 0, 0, 5),
            protocol:    Protocol::Udp,
            payload_len: 10,
            hop_limit:   64,
        }
    }

    /// Flip one bit of the header and repair nothing.
    fn corrupted(byte: usize, bit: u8) -> Vec<u8> {
        let mut bytes = PACKET_BYTES.to_vec();
        bytes[byte] ^= 1 << bit;
        bytes
    }

    #[test]
    fn deconstruct() {
        let packet = ipv4::new_unchecked(&PACKET_BYTES[..]);
        assert_eq!(packet.version(), 4);
        assert_eq!(packet.header_len(), 20);
        assert_eq!(packet.tos(), 0);
        assert_eq!(packet.total_len(), 30);
        assert_eq!(packet.ident(), 0x1234);
        assert_eq!(packet.more_frags(), false);
        assert_eq!(packet.dont_frag(), false);
        assert_eq!(packet.frag_offset(), 0);
        assert_eq!(packet.hop_limit(), 64);
        assert_eq!(packet.protocol(), Protocol::Udp);
        assert_eq!(packet.checksum(), 0x9cec);
        assert_eq!(packet.src_addr(), Address::new(192, 168, 1, 2));
        assert_eq!(packet.dst_addr(), Address::new(10, 0, 0, 5));
        assert_eq!(packet.header_checksum(), 0x9cec);
        assert!(packet.verify_checksum());
        assert_eq!(packet.payload_slice(), &PAYLOAD_BYTES[..]);
    }

    #[test]
    fn parse() {
        let packet = ipv4::new_checked(&PACKET_BYTES[..]).unwrap();
        assert_eq!(Repr::parse(packet), Ok(packet_repr()));
    }

    #[test]
    fn validation_is_stable() {
        let packet = Packet::new_checked(&PACKET_BYTES[..]).unwrap();
        for _ in 0..3 {
            assert_eq!(Repr::parse(&packet), Ok(packet.repr()));
        }
    }

    #[test]
    fn emit() {
        let repr = packet_repr();
        let mut bytes = vec![0xa5; repr.total_len()];
        let packet = ipv4::new_unchecked_mut(&mut bytes);
        repr.emit(packet);
        packet.set_ident(0x1234);
        packet.fill_checksum();
        packet.payload_mut_slice().copy_from_slice(&PAYLOAD_BYTES);
        assert_eq!(packet.as_bytes(), &PACKET_BYTES[..]);
    }

    #[test]
    fn reject_short_buffer() {
        assert_eq!(ipv4::new_checked(&PACKET_BYTES[..19]).map(|_| ()), Err(Error::Truncated));
        assert_eq!(Packet::new_checked(&PACKET_BYTES[..25]), Err(Error::Truncated));
    }

    #[test]
    fn reject_total_len_below_header() {
        let mut bytes = PACKET_BYTES.to_vec();
        let packet = ipv4::new_unchecked_mut(&mut bytes);
        packet.set_total_len(19);
        packet.fill_checksum();
        assert_eq!(Packet::new_checked(&bytes[..]), Err(Error::Malformed));
    }

    #[test]
    fn reject_bad_version() {
        let mut bytes = PACKET_BYTES.to_vec();
        let packet = ipv4::new_unchecked_mut(&mut bytes);
        packet.set_version(6);
        packet.fill_checksum();
        assert_eq!(Packet::new_checked(&bytes[..]), Err(Error::Malformed));
    }

    #[test]
    fn reject_options() {
        let mut bytes = vec![0; 34];
        bytes[..20].copy_from_slice(&PACKET_BYTES[..20]);
        let packet = ipv4::new_unchecked_mut(&mut bytes);
        packet.set_header_len(24);
        packet.set_total_len(34);
        packet.fill_checksum();
        assert_eq!(Packet::new_checked(&bytes[..]), Err(Error::Unsupported));
    }

    #[test]
    fn reject_short_header_len() {
        let mut bytes = PACKET_BYTES.to_vec();
        ipv4::new_unchecked_mut(&mut bytes).set_header_len(16);
        assert_eq!(Packet::new_checked(&bytes[..]), Err(Error::Malformed));
    }

    #[test]
    fn reject_flipped_bits() {
        // Every single-bit error in the checksum, ttl or address fields is caught.
        for &byte in &[8, 10, 11, 12, 19] {
            for bit in 0..8 {
                let bytes = corrupted(byte, bit);
                assert_eq!(Packet::new_checked(&bytes[..]), Err(Error::WrongChecksum),
                    "bit {} of byte {}", bit, byte);
            }
        }
    }

    #[test]
    fn reject_fragments() {
        let mut bytes = PACKET_BYTES.to_vec();
        let packet = ipv4::new_unchecked_mut(&mut bytes);
        packet.set_flags_and_offset(0x2000);
        packet.fill_checksum();
        assert_eq!(Packet::new_checked(&bytes[..]), Err(Error::Unsupported));

        let packet = ipv4::new_unchecked_mut(&mut bytes);
        packet.set_flags_and_offset(0x0003);
        packet.fill_checksum();
        assert_eq!(Packet::new_checked(&bytes[..]), Err(Error::Unsupported));

        // Don't fragment on its own is fine.
        let packet = ipv4::new_unchecked_mut(&mut bytes);
        packet.set_flags_and_offset(0x4000);
        packet.fill_checksum();
        assert!(Packet::new_checked(&bytes[..]).is_ok());
    }

    #[test]
    fn trim_link_padding() {
        let mut bytes = PACKET_BYTES.to_vec();
        bytes.extend_from_slice(&[0; 16]);
        let packet = Packet::new_trimmed(bytes).unwrap();
        assert_eq!(packet.into_inner(), &PACKET_BYTES[..]);
    }

    #[test]
    fn decrement() {
        let mut packet = Packet::new_checked(PACKET_BYTES.to_vec()).unwrap();
        assert_eq!(packet.decrement_hop_limit(), Some(63));
        assert_eq!(packet.repr().hop_limit, 63);
        assert_eq!(packet.checksum(), 0x9dec);
        assert!(packet.verify_checksum());
    }

    #[test]
    fn decrement_is_deterministic() {
        let mut first = PACKET_BYTES.to_vec();
        let mut second = PACKET_BYTES.to_vec();
        ipv4::new_unchecked_mut(&mut first).decrement_hop_limit();
        ipv4::new_unchecked_mut(&mut second).decrement_hop_limit();
        assert_eq!(first, second);
    }

    #[test]
    fn decrement_at_zero() {
        let mut bytes = PACKET_BYTES.to_vec();
        let packet = ipv4::new_unchecked_mut(&mut bytes);
        packet.set_hop_limit(0);
        packet.fill_checksum();
        let before = bytes.clone();
        assert_eq!(ipv4::new_unchecked_mut(&mut bytes).decrement_hop_limit(), None);
        assert_eq!(bytes, before);
    }

    #[test]
    fn quote() {
        let packet = ipv4::new_unchecked(&PACKET_BYTES[..]);
        assert_eq!(packet.quoted_slice(), &PACKET_BYTES[..28]);

        let mut short = PACKET_BYTES[..24].to_vec();
        let packet = ipv4::new_unchecked_mut(&mut short);
        packet.set_total_len(24);
        assert_eq!(packet.quoted_slice().len(), 24);
    }

    #[test]
    fn mask() {
        let addr = Address::new(172, 16, 33, 7);
        assert_eq!(addr.mask(Address::new(255, 255, 0, 0)), Address::new(172, 16, 0, 0));
        assert_eq!(addr.mask(Address::new(255, 240, 0, 0)), Address::new(172, 16, 0, 0));
        assert_eq!(addr.mask(Address::UNSPECIFIED), Address::UNSPECIFIED);
        assert_eq!(addr.mask(Address::BROADCAST), addr);
    }

    #[test]
    fn classify() {
        assert!(Address::new(10, 0, 0, 1).is_unicast());
        assert!(!Address::UNSPECIFIED.is_unicast());
        assert!(!Address::BROADCAST.is_unicast());
        assert!(Address::new(224, 0, 0, 1).is_multicast());
    }
}
