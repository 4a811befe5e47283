//! ISC dhcpd server and dhclient.

use ipnetwork::IpNetwork;
use log::debug;

use crate::ip;
use crate::node::NodeView;

use super::types::{RenderContext, ServiceDescriptor};

pub const DHCP: ServiceDescriptor = ServiceDescriptor {
    name: "DHCP",
    configs: &["/etc/dhcp/dhcpd.conf"],
    dirs: &["/etc/dhcp", "/var/lib/dhcp"],
    startup: &["touch /var/lib/dhcp/dhcpd.leases", "dhcpd"],
    shutdown: &["killall dhcpd"],
    validate: &["pidof dhcpd"],
    ..ServiceDescriptor::UTILITY
};

pub const DHCP_CLIENT: ServiceDescriptor = ServiceDescriptor {
    name: "DHCPClient",
    configs: &["startdhcpclient.sh"],
    startup: &["bash startdhcpclient.sh"],
    shutdown: &["killall dhclient"],
    validate: &["pidof dhclient"],
    ..ServiceDescriptor::UTILITY
};

const DHCPD_PREAMBLE: &str = r#"# auto-generated by DHCP service (utility.py)
# NOTE: move these option lines into the desired pool { } block(s) below
#option domain-name "test.com";
#option domain-name-servers 10.0.0.1;
#option routers 10.0.0.1;

log-facility local6;

default-lease-time 600;
max-lease-time 7200;

ddns-update-style none;
"#;

/// dhcpd.conf with one subnet/pool block per IPv4 prefix.
pub fn render_dhcpd(node: &dyn NodeView, _filename: &str, _ctx: &RenderContext<'_>) -> String {
    let mut cfg = String::from(DHCPD_PREAMBLE);
    for iface in node.ifaces(false) {
        let entries: Vec<String> = iface.ips().iter().map(subnet_entry).collect();
        cfg.push_str(&entries.join("\n"));
        cfg.push('\n');
    }
    cfg
}

/// Subnet declaration for one prefix; empty for IPv6 and host prefixes.
pub fn subnet_entry(net: &IpNetwork) -> String {
    let Some(pool) = ip::dhcp_pool(net) else {
        debug!("No DHCPv4 pool for prefix {}", net);
        return String::new();
    };
    format!(
        r#"
subnet {subnet} netmask {netmask} {{
  pool {{
    range {low} {high};
    default-lease-time 600;
    option routers {router};
  }}
}}
"#,
        subnet = pool.subnet,
        netmask = pool.netmask,
        low = pool.range_low,
        high = pool.range_high,
        router = pool.router,
    )
}

/// dhclient on every data-plane interface.
pub fn render_dhcp_client(
    node: &dyn NodeView,
    _filename: &str,
    _ctx: &RenderContext<'_>,
) -> String {
    let mut cfg = String::from("#!/bin/sh\n");
    cfg.push_str("# auto-generated by DHCPClient service (utility.py)\n");
    cfg.push_str("# uncomment this mkdir line and symlink line to enable client-side DNS\n");
    cfg.push_str("# resolution based on the DHCP server response.\n");
    cfg.push_str("#mkdir -p /var/run/resolvconf/interface\n");
    for iface in node.ifaces(false) {
        let name = &iface.name;
        cfg.push_str(&format!(
            "#ln -s /var/run/resolvconf/interface/{}.dhclient /var/run/resolvconf/resolv.conf\n",
            name
        ));
        cfg.push_str(&format!(
            "/sbin/dhclient -nw -pf /var/run/dhclient-{0}.pid -lf /var/run/dhclient-{0}.lease {0}\n",
            name
        ));
    }
    cfg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Interface, Node};
    use crate::probe::{CommandOutput, ProbeError};

    fn no_probe(_: &str) -> Result<CommandOutput, ProbeError> {
        Ok(CommandOutput::new(1, "", ""))
    }

    #[test]
    fn test_dhcpd_two_subnets() {
        let ctx = RenderContext::new(&no_probe);
        let node = Node::new("n1")
            .with_interface(Interface::new("eth0").with_ip("10.0.0.0/24".parse().unwrap()))
            .with_interface(Interface::new("eth1").with_ip("10.0.1.0/30".parse().unwrap()));
        let cfg = render_dhcpd(&node, "/etc/dhcp/dhcpd.conf", &ctx);

        assert!(cfg.starts_with(DHCPD_PREAMBLE));
        assert_eq!(cfg.matches("subnet ").count(), 2);
        assert!(cfg.contains("subnet 10.0.0.0 netmask 255.255.255.0 {\n"));
        assert!(cfg.contains("    range 10.0.0.127 10.0.0.254;\n"));
        assert!(cfg.contains("subnet 10.0.1.0 netmask 255.255.255.252 {\n"));
        assert!(cfg.contains("    range 10.0.1.1 10.0.1.2;\n"));
        assert!(cfg.contains("    option routers 10.0.1.0;\n"));
    }

    #[test]
    fn test_dhcpd_exact_block() {
        let ctx = RenderContext::new(&no_probe);
        let node = Node::new("n1")
            .with_interface(Interface::new("eth0").with_ip("10.0.0.1/24".parse().unwrap()));
        let cfg = render_dhcpd(&node, "/etc/dhcp/dhcpd.conf", &ctx);
        let body = &cfg[DHCPD_PREAMBLE.len()..];
        assert_eq!(
            body,
            "\nsubnet 10.0.0.1 netmask 255.255.255.0 {\n  pool {\n    range 10.0.0.127 10.0.0.254;\n    default-lease-time 600;\n    option routers 10.0.0.1;\n  }\n}\n\n"
        );
    }

    #[test]
    fn test_dhcpd_skips_ipv6_and_control() {
        let ctx = RenderContext::new(&no_probe);
        let node = Node::new("n1")
            .with_interface(Interface::control("ctrl0").with_ip("172.16.0.1/24".parse().unwrap()))
            .with_interface(Interface::new("eth0").with_ip("2001:db8::1/64".parse().unwrap()));
        let cfg = render_dhcpd(&node, "/etc/dhcp/dhcpd.conf", &ctx);
        assert!(!cfg.contains("subnet "));
        assert!(!cfg.contains("2001:db8"));
        assert_eq!(cfg, format!("{}\n", DHCPD_PREAMBLE));
    }

    #[test]
    fn test_dhcp_client_script() {
        let ctx = RenderContext::new(&no_probe);
        let node = Node::new("n1")
            .with_interface(Interface::control("ctrl0"))
            .with_interface(Interface::new("eth0"));
        let cfg = render_dhcp_client(&node, "startdhcpclient.sh", &ctx);
        assert!(cfg.contains(
            "#ln -s /var/run/resolvconf/interface/eth0.dhclient /var/run/resolvconf/resolv.conf\n"
        ));
        assert!(cfg.ends_with(
            "/sbin/dhclient -nw -pf /var/run/dhclient-eth0.pid -lf /var/run/dhclient-eth0.lease eth0\n"
        ));
        assert!(!cfg.contains("ctrl0"));
    }
}
