/*! Low-level packet access and construction.

# An overview over packet representations

The `wire` module deals with the packet *representation*. It provides three levels of
functionality.

 * First, it provides functions to extract fields from sequences of octets, and to insert fields
   into sequences of octets. This happens in the lowercase structures [`ipv4_packet`] and
   [`icmpv4_packet`].
 * Second, it provides a compact, high-level representation of header data that can be created from
   parsing and emitted into a sequence of octets. This happens through the `Repr` family of structs
   and enums, e.g. [`Ipv4Repr`] or [`Icmpv4Repr`].
 * Third, it provides a type wrapper around sequences of octets valid as a particular packet
   format which owns its data. It memoizes the parsed header, so it is not re-validated on every
   access. Header data is not mutably accessible through the wrapper except for the few rewrites a
   router performs, which keep the checksum valid.

[`ipv4_packet`]: struct.ipv4_packet.html
[`icmpv4_packet`]: struct.icmpv4_packet.html
[`Ipv4Repr`]: struct.Ipv4Repr.html
[`Icmpv4Repr`]: enum.Icmpv4Repr.html

The `packet` family of data structures guarantees that, if the `packet::check_len()` method
returned `Ok(())`, then no fixed header accessor or setter method will panic.

The `Packet::new_checked` method is a shorthand for a combination of `packet::new_checked` and
`Repr::parse`. When parsing untrusted input, it is *necessary* to use it; so long as the buffer is
not modified, no accessor will fail. When emitting output it is *incorrect* to use
`Packet::new_checked()`, the buffer for emission is sized by `Repr::buffer_len` instead.

In the `Repr` family of data structures, the `Repr::parse()` method never panics and the
`Repr::emit()` method never panics as long as the underlying buffer is exactly `Repr::buffer_len()`
octets long.

# Examples

To emit an IP packet header into an octet buffer, and then parse it back:

```rust
use ipforward::wire::*;
let repr = Ipv4Repr {
    src_addr:    Ipv4Address::new(10, 0, 0, 1),
    dst_addr:    Ipv4Address::new(10, 0, 0, 2),
    protocol:    IpProtocol::Udp,
    payload_len: 10,
    hop_limit:   64
};
let mut buffer = vec![0; repr.total_len()];
{ // emission
    let packet = ipv4_packet::new_unchecked_mut(&mut buffer);
    repr.emit(packet);
}
{ // parsing
    let packet = ipv4_packet::new_checked(&buffer)
        .expect("truncated packet");
    let parsed = Ipv4Repr::parse(packet)
        .expect("malformed packet");
    assert_eq!(repr, parsed);
}
```
*/
// Copyright (C) 2016 whitequark@whitequark.org
// Copyright (C) 2019 Andreas Molzer <andreas.molzer@tum.de>
//
// in large parts from `smoltcp` originally distributed under 0-clause BSD
//
// Applies to files in this folder unless otherwise noted. These are:
// * `error.rs`
// * `ethernet.rs`
// * `icmpv4.rs`
// * `ip.rs`
// * `ipv4.rs`

pub(crate) mod field {
    pub(crate) type Field = ::core::ops::Range<usize>;
}

mod error;
mod ethernet;
pub mod icmpv4;
pub mod ip;
pub mod ipv4;

pub use self::error::{Error, Result};

pub use self::ethernet::Address as EthernetAddress;

pub use self::ip::Protocol as IpProtocol;
pub use self::ip::checksum;

pub use self::ipv4::{
    Address as Ipv4Address,
    Packet as Ipv4Packet,
    Repr as Ipv4Repr,
    ipv4 as ipv4_packet};

pub use self::icmpv4::{
    Message as Icmpv4Message,
    DstUnreachable as Icmpv4DstUnreachable,
    TimeExceeded as Icmpv4TimeExceeded,
    Report as Icmpv4Report,
    Packet as Icmpv4Packet,
    Repr as Icmpv4Repr,
    icmpv4 as icmpv4_packet};
