//! The routing table, relevant rfc1519, rfc4632.
//!
use core::fmt;

use super::InterfaceId;
use crate::wire::Ipv4Address;

/// Where a datagram matching a route is handed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NextHop {
    /// The destination is on the link of the route's interface.
    Direct,
    /// A router on the link of the route's interface.
    Gateway(Ipv4Address),
}

impl NextHop {
    /// The address to resolve for a datagram towards `dst_addr`.
    pub fn resolve_for(self, dst_addr: Ipv4Address) -> Ipv4Address {
        match self {
            NextHop::Direct => dst_addr,
            NextHop::Gateway(gateway) => gateway,
        }
    }
}

impl fmt::Display for NextHop {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NextHop::Direct => write!(f, "direct"),
            NextHop::Gateway(gateway) => write!(f, "via {}", gateway),
        }
    }
}

/// A prefix of addresses that should be routed via a next hop.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    /// The network routed through this route.
    ///
    /// Better only set actual networks here. Host bits are masked away before comparison, so they
    /// don't change which datagrams match, but they still appear in diagnostics.
    pub destination: Ipv4Address,

    /// The subnet mask of the network.
    ///
    /// Expected to be contiguous. The table does not check this, a non-contiguous mask just
    /// leads to surprising routing decisions.
    pub mask: Ipv4Address,

    /// Next hop for this network.
    pub next_hop: NextHop,

    /// The interface the next hop is reached through.
    pub interface: InterfaceId,
}

impl Route {
    /// A route to `destination/prefix_len`.
    pub fn new(
        destination: Ipv4Address,
        prefix_len: u8,
        next_hop: NextHop,
        interface: impl Into<InterfaceId>,
    ) -> Self {
        Route {
            destination,
            mask: netmask(prefix_len),
            next_hop,
            interface: interface.into(),
        }
    }

    /// Returns a route match `0.0.0.0/0` via the `gateway`.
    ///
    /// This route is a worst match for all addresses so that it can be used as a sink, for
    /// example.
    pub fn default_gateway(gateway: Ipv4Address, interface: impl Into<InterfaceId>) -> Self {
        Route::new(Ipv4Address::UNSPECIFIED, 0, NextHop::Gateway(gateway), interface)
    }

    /// The masked target value if `addr` is within this route's network.
    fn matches(&self, addr: Ipv4Address) -> Option<u32> {
        let target = addr.mask(self.mask);
        if self.destination.mask(self.mask) == target {
            Some(target.to_network_integer())
        } else {
            None
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{} {} dev {}", self.destination, self.mask, self.next_hop, self.interface)
    }
}

/// Create the mask of a `prefix_len` bit network prefix.
///
/// Lengths above 32 are treated as 32.
pub fn netmask(prefix_len: u8) -> Ipv4Address {
    let host_bits = 32 - u32::from(prefix_len.min(32));
    let mask = (!0u32).checked_shl(host_bits).unwrap_or(0);
    Ipv4Address::from_network_integer(mask)
}

/// A routing table.
///
/// Filled once when the router is set up, then only read.
///
/// # Examples
///
/// ```rust
/// use ipforward::layer::ip::{NextHop, Route, Routes};
/// use ipforward::wire::Ipv4Address;
///
/// let routes: Routes = vec![
///     Route::new(Ipv4Address::new(10, 0, 1, 0), 24, NextHop::Direct, "eth1"),
///     Route::default_gateway(Ipv4Address::new(10, 0, 0, 254), "eth0"),
/// ].into_iter().collect();
///
/// let route = routes.lookup(Ipv4Address::new(10, 0, 1, 7)).unwrap();
/// assert_eq!(route.interface.as_str(), "eth1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Routes {
    storage: Vec<Route>,
}

impl Routes {
    /// Creates a routing table from a list of routes, kept in order.
    pub fn new(storage: Vec<Route>) -> Self {
        Routes { storage }
    }

    /// Append a route, with the lowest precedence among equal matches.
    pub fn add_route(&mut self, route: Route) {
        self.storage.push(route)
    }

    /// Iterate over all routes in table order.
    pub fn iter(&self) -> impl Iterator<Item=&Route> + '_ {
        self.storage.iter()
    }

    /// The number of routes in the table.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Find the route for a destination.
    ///
    /// Among all routes whose masked destination equals the masked `addr`, the one where this
    /// masked value is largest wins. For contiguous masks this prefers the longest prefix. When
    /// two routes mask `addr` to the same value the longer mask is preferred, and after that the
    /// route that comes first in the table.
    pub fn lookup(&self, addr: Ipv4Address) -> Option<&Route> {
        let mut best_match: Option<((u32, u32), &Route)> = None;
        for route in self.storage.iter() {
            // Ignore routes with mismatching net.
            let target = match route.matches(addr) {
                Some(target) => target,
                None => continue,
            };

            let rank = (target, route.mask.to_network_integer());
            match best_match {
                Some((best, _)) if best >= rank => (),
                _ => best_match = Some((rank, route)),
            }
        }
        best_match.map(|(_, route)| route)
    }
}

impl core::iter::FromIterator<Route> for Routes {
    fn from_iter<I: IntoIterator<Item=Route>>(iter: I) -> Self {
        Routes::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const NET_16: Ipv4Address = Ipv4Address::new(172, 16, 0, 0);
    const NET_24: Ipv4Address = Ipv4Address::new(172, 16, 5, 0);
    const GW_A: Ipv4Address = Ipv4Address::new(192, 168, 0, 1);
    const GW_B: Ipv4Address = Ipv4Address::new(192, 168, 0, 2);

    fn wide() -> Route {
        Route::new(NET_16, 16, NextHop::Gateway(GW_A), "eth0")
    }

    fn narrow() -> Route {
        Route::new(NET_24, 24, NextHop::Gateway(GW_B), "eth1")
    }

    #[test]
    fn masks() {
        assert_eq!(netmask(0), Ipv4Address::UNSPECIFIED);
        assert_eq!(netmask(16), Ipv4Address::new(255, 255, 0, 0));
        assert_eq!(netmask(20), Ipv4Address::new(255, 255, 240, 0));
        assert_eq!(netmask(32), Ipv4Address::BROADCAST);
        assert_eq!(netmask(40), Ipv4Address::BROADCAST);
    }

    #[test]
    fn empty() {
        let routes = Routes::default();
        assert_eq!(routes.lookup(Ipv4Address::new(10, 0, 0, 1)), None);
    }

    #[test]
    fn longest_prefix() {
        for order in &[[wide(), narrow()], [narrow(), wide()]] {
            let routes: Routes = order.iter().cloned().collect();
            assert_eq!(routes.lookup(Ipv4Address::new(172, 16, 5, 9)), Some(&narrow()));
            // Masked to the same value by both routes.
            assert_eq!(routes.lookup(Ipv4Address::new(172, 16, 5, 0)), Some(&narrow()));
            assert_eq!(routes.lookup(Ipv4Address::new(172, 16, 6, 9)), Some(&wide()));
            assert_eq!(routes.lookup(Ipv4Address::new(172, 17, 5, 9)), None);
        }
    }

    #[test]
    fn default_route() {
        let mut routes = Routes::new(vec![Route::default_gateway(GW_A, "eth0")]);
        assert_eq!(routes.lookup(Ipv4Address::new(8, 8, 8, 8)).map(|r| r.next_hop),
            Some(NextHop::Gateway(GW_A)));

        routes.add_route(narrow());
        assert_eq!(routes.lookup(Ipv4Address::new(172, 16, 5, 1)), Some(&narrow()));
        assert_eq!(routes.lookup(Ipv4Address::new(1, 2, 3, 4)).map(|r| r.next_hop),
            Some(NextHop::Gateway(GW_A)));
    }

    #[test]
    fn first_duplicate_wins() {
        let first = Route::new(NET_24, 24, NextHop::Direct, "eth0");
        let second = Route::new(NET_24, 24, NextHop::Gateway(GW_B), "eth1");
        let routes = Routes::new(vec![first.clone(), second]);
        assert_eq!(routes.lookup(Ipv4Address::new(172, 16, 5, 77)), Some(&first));
    }

    #[test]
    fn host_bits_ignored() {
        let sloppy = Route::new(Ipv4Address::new(172, 16, 5, 99), 24, NextHop::Direct, "eth0");
        let routes = Routes::new(vec![sloppy.clone()]);
        assert_eq!(routes.lookup(Ipv4Address::new(172, 16, 5, 1)), Some(&sloppy));
    }

    #[test]
    fn direct_next_hop() {
        let dst = Ipv4Address::new(172, 16, 5, 3);
        assert_eq!(NextHop::Direct.resolve_for(dst), dst);
        assert_eq!(NextHop::Gateway(GW_A).resolve_for(dst), GW_A);
    }
}
