use core::fmt;

use crate::wire::{EthernetAddress, Ipv4Address};

/// The name a link is known by, such as `eth0`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InterfaceId(String);

impl InterfaceId {
    /// Name an interface.
    pub fn new(name: impl Into<String>) -> Self {
        InterfaceId(name.into())
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'_ str> for InterfaceId {
    fn from(name: &str) -> Self {
        InterfaceId::new(name)
    }
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A local network interface.
///
/// The assigned address recognizes datagrams for this router and serves as the source of
/// messages it originates. The link address is passed along to collaborators only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interface {
    /// Identifies the link in routes and towards collaborators.
    pub id: InterfaceId,
    /// The address assigned to this router on the link.
    pub addr: Ipv4Address,
    /// Our own link address.
    pub link_addr: EthernetAddress,
}

impl Interface {
    /// Describe an interface.
    pub fn new(id: impl Into<InterfaceId>, addr: Ipv4Address, link_addr: EthernetAddress) -> Self {
        Interface {
            id: id.into(),
            addr,
            link_addr,
        }
    }
}
