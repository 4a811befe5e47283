//! Prefix member arithmetic.
//!
//! Members are indexed relative to the network address: member 0 is the
//! network address and the last member is the broadcast (or final) address,
//! whatever host address the interface itself was assigned. "Usable" members
//! exclude those two ends.

use ipnetwork::IpNetwork;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Number of host bits in the prefix.
pub fn host_bits(net: &IpNetwork) -> u32 {
    match net {
        IpNetwork::V4(v4) => 32 - u32::from(v4.prefix()),
        IpNetwork::V6(v6) => 128 - u32::from(v6.prefix()),
    }
}

/// Whether the prefix covers more than a single address.
pub fn has_multiple_addresses(net: &IpNetwork) -> bool {
    host_bits(net) > 0
}

/// Number of addresses in an IPv4 prefix.
pub fn ipv4_size(prefix: u8) -> u64 {
    1u64 << (32 - u32::from(prefix.min(32)))
}

/// Netmask of the prefix, e.g. `255.255.255.0` for a /24.
pub fn netmask(net: &IpNetwork) -> IpAddr {
    match net {
        IpNetwork::V4(v4) => IpAddr::V4(Ipv4Addr::from(mask_v4(v4.prefix()))),
        IpNetwork::V6(v6) => IpAddr::V6(Ipv6Addr::from(mask_v6(v6.prefix()))),
    }
}

/// Member `index` counted from the network address.
pub fn member(net: &IpNetwork, index: u128) -> Option<IpAddr> {
    let (first, last) = span(net);
    let addr = first.checked_add(index)?;
    if addr > last {
        return None;
    }
    Some(to_addr(net, addr))
}

/// Member counted back from the end; `back == 1` is the last address.
pub fn member_from_end(net: &IpNetwork, back: u128) -> Option<IpAddr> {
    if back == 0 {
        return None;
    }
    let (first, last) = span(net);
    let addr = last.checked_sub(back - 1)?;
    if addr < first {
        return None;
    }
    Some(to_addr(net, addr))
}

/// First usable member (member 1). `None` for single-address prefixes.
pub fn first_usable(net: &IpNetwork) -> Option<IpAddr> {
    if !has_multiple_addresses(net) {
        return None;
    }
    member(net, 1)
}

/// Last usable member (second to last). `None` for single-address prefixes.
pub fn last_usable(net: &IpNetwork) -> Option<IpAddr> {
    if !has_multiple_addresses(net) {
        return None;
    }
    member_from_end(net, 2)
}

fn mask_v4(prefix: u8) -> u32 {
    u32::MAX
        .checked_shl(32 - u32::from(prefix.min(32)))
        .unwrap_or(0)
}

fn mask_v6(prefix: u8) -> u128 {
    u128::MAX
        .checked_shl(128 - u32::from(prefix.min(128)))
        .unwrap_or(0)
}

/// Numeric network address and last address of the prefix.
fn span(net: &IpNetwork) -> (u128, u128) {
    match net {
        IpNetwork::V4(v4) => {
            let mask = mask_v4(v4.prefix());
            let network = u32::from(v4.ip()) & mask;
            (u128::from(network), u128::from(network | !mask))
        }
        IpNetwork::V6(v6) => {
            let mask = mask_v6(v6.prefix());
            let network = u128::from(v6.ip()) & mask;
            (network, network | !mask)
        }
    }
}

fn to_addr(net: &IpNetwork, value: u128) -> IpAddr {
    match net {
        // span() keeps IPv4 values within u32 range
        IpNetwork::V4(_) => IpAddr::V4(Ipv4Addr::from(value as u32)),
        IpNetwork::V6(_) => IpAddr::V6(Ipv6Addr::from(value)),
    }
}
