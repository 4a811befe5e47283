//! Per-prefix derivations shared by the routing, DHCP and router
//! advertisement services.
//!
//! Each function returns `None` when the prefix does not apply (wrong address
//! family or too small), so callers can map over an interface's prefixes and
//! filter uniformly.

use ipnetwork::IpNetwork;
use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr};

use super::prefix;

/// Sample destination used for IPv4 static routes.
pub const STATIC_ROUTE_DST_V4: &str = "10.9.8.0/24";

/// Sample destination used for IPv6 static routes.
pub const STATIC_ROUTE_DST_V6: &str = "3ffe:4::/64";

/// A sample static route reachable through a prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteTarget {
    pub destination: &'static str,
    pub via: IpAddr,
}

/// Address pool carved out of an IPv4 prefix for dhcpd.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DhcpPool {
    /// Address written on the `subnet` line (the interface address)
    pub subnet: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub range_low: Ipv4Addr,
    pub range_high: Ipv4Addr,
    pub router: Ipv4Addr,
}

/// Pick the sample route destination and gateway for a prefix.
///
/// Returns `None` when the prefix has no room for distinct host routes, i.e.
/// its first and last usable members coincide or do not exist.
pub fn route_target(net: &IpNetwork) -> Option<RouteTarget> {
    let destination = match net {
        IpNetwork::V6(_) => STATIC_ROUTE_DST_V6,
        IpNetwork::V4(_) => STATIC_ROUTE_DST_V4,
    };
    let via = prefix::first_usable(net)?;
    let last = prefix::last_usable(net)?;
    if last == via {
        return None;
    }
    Some(RouteTarget { destination, via })
}

/// Split an IPv4 prefix in half for a DHCP pool.
///
/// The lower bound is member `(size - 2) / 2`, the upper bound the last usable
/// member and the router the interface address. IPv6 prefixes yield `None`.
pub fn dhcp_pool(net: &IpNetwork) -> Option<DhcpPool> {
    let IpNetwork::V4(v4) = net else {
        return None;
    };
    let size = prefix::ipv4_size(v4.prefix());
    if size < 2 {
        return None;
    }
    let index = (size - 2) / 2;
    let range_low = as_v4(prefix::member(net, u128::from(index)))?;
    let range_high = as_v4(prefix::last_usable(net))?;
    let netmask = as_v4(Some(prefix::netmask(net)))?;

    Some(DhcpPool {
        subnet: v4.ip(),
        netmask,
        range_low,
        range_high,
        router: v4.ip(),
    })
}

/// CIDR text of an IPv6 prefix for a radvd `prefix` block.
pub fn radvd_prefix(net: &IpNetwork) -> Option<String> {
    match net {
        IpNetwork::V6(v6) => Some(format!("{}/{}", v6.ip(), v6.prefix())),
        IpNetwork::V4(_) => None,
    }
}

fn as_v4(addr: Option<IpAddr>) -> Option<Ipv4Addr> {
    match addr? {
        IpAddr::V4(a) => Some(a),
        IpAddr::V6(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(s: &str) -> IpNetwork {
        s.parse().unwrap()
    }

    #[test]
    fn test_route_target_by_family() {
        let t = route_target(&net("10.0.0.1/24")).unwrap();
        assert_eq!(t.destination, "10.9.8.0/24");
        assert_eq!(t.via, "10.0.0.1".parse::<IpAddr>().unwrap());

        let t = route_target(&net("2001:db8::10/64")).unwrap();
        assert_eq!(t.destination, "3ffe:4::/64");
        assert_eq!(t.via, "2001:db8::1".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_route_target_degenerate_prefixes() {
        assert!(route_target(&net("10.0.0.1/32")).is_none());
        assert!(route_target(&net("2001:db8::1/128")).is_none());
        // A /30 still has two distinct usable members
        assert!(route_target(&net("10.0.0.0/30")).is_some());
    }

    #[test]
    fn test_dhcp_pool_split() {
        let pool = dhcp_pool(&net("10.0.0.0/24")).unwrap();
        assert_eq!(pool.subnet, Ipv4Addr::new(10, 0, 0, 0));
        assert_eq!(pool.netmask, Ipv4Addr::new(255, 255, 255, 0));
        assert_eq!(pool.range_low, Ipv4Addr::new(10, 0, 0, 127));
        assert_eq!(pool.range_high, Ipv4Addr::new(10, 0, 0, 254));
        assert_eq!(pool.router, Ipv4Addr::new(10, 0, 0, 0));

        let pool = dhcp_pool(&net("10.0.1.0/30")).unwrap();
        assert_eq!(pool.range_low, Ipv4Addr::new(10, 0, 1, 1));
        assert_eq!(pool.range_high, Ipv4Addr::new(10, 0, 1, 2));
    }

    #[test]
    fn test_dhcp_pool_router_is_interface_address() {
        let pool = dhcp_pool(&net("192.168.5.1/24")).unwrap();
        assert_eq!(pool.router, Ipv4Addr::new(192, 168, 5, 1));
        assert_eq!(pool.subnet, Ipv4Addr::new(192, 168, 5, 1));
        assert_eq!(pool.range_low, Ipv4Addr::new(192, 168, 5, 127));
    }

    #[test]
    fn test_dhcp_pool_bounds_stay_inside_prefix() {
        for prefix_len in 8u8..=30 {
            let p = net(&format!("172.16.0.0/{}", prefix_len));
            let pool = dhcp_pool(&p).unwrap();
            let (low, high) = (IpAddr::V4(pool.range_low), IpAddr::V4(pool.range_high));
            assert!(pool.range_low <= pool.range_high, "/{}", prefix_len);
            assert!(p.contains(low) && p.contains(high), "/{}", prefix_len);
            assert_ne!(Some(low), prefix::member(&p, 0));
            assert_ne!(Some(high), prefix::member_from_end(&p, 1));
        }
    }

    #[test]
    fn test_dhcp_pool_skips_ipv6_and_host_routes() {
        assert!(dhcp_pool(&net("2001:db8::/64")).is_none());
        assert!(dhcp_pool(&net("10.0.0.1/32")).is_none());
    }

    #[test]
    fn test_radvd_prefix() {
        assert_eq!(
            radvd_prefix(&net("2001:db8::1/64")),
            Some("2001:db8::1/64".to_string())
        );
        assert_eq!(radvd_prefix(&net("10.0.0.1/24")), None);
    }
}
