//! Forwarding and routing scripts.
//!
//! IPForward applies to every interface, control interfaces included, since
//! forwarding and redirect settings are node-wide. The route services only
//! look at data-plane interfaces.

use crate::ip::{self, prefix};
use crate::node::NodeView;

use super::types::{RenderContext, ServiceDescriptor};

/// sysctl binary invoked by the forwarding script.
pub const SYSCTL: &str = "sysctl";

pub const IPFORWARD: ServiceDescriptor = ServiceDescriptor {
    name: "IPForward",
    configs: &["ipforward.sh"],
    startup: &["bash ipforward.sh"],
    ..ServiceDescriptor::UTILITY
};

pub const DEFAULT_ROUTE: ServiceDescriptor = ServiceDescriptor {
    name: "DefaultRoute",
    configs: &["defaultroute.sh"],
    startup: &["bash defaultroute.sh"],
    ..ServiceDescriptor::UTILITY
};

pub const DEFAULT_MULTICAST_ROUTE: ServiceDescriptor = ServiceDescriptor {
    name: "DefaultMulticastRoute",
    configs: &["defaultmroute.sh"],
    startup: &["bash defaultmroute.sh"],
    ..ServiceDescriptor::UTILITY
};

pub const STATIC_ROUTE: ServiceDescriptor = ServiceDescriptor {
    name: "StaticRoute",
    configs: &["staticroute.sh"],
    startup: &["bash staticroute.sh"],
    custom_needed: true,
    ..ServiceDescriptor::UTILITY
};

/// Device name as it appears under `net.ipv4.conf`; VLAN dots become slashes.
pub fn sysctl_devname(name: &str) -> String {
    name.replace('.', "/")
}

pub fn render_ipforward(node: &dyn NodeView, _filename: &str, _ctx: &RenderContext<'_>) -> String {
    let mut cfg = format!(
        r#"#!/bin/sh
# auto-generated by IPForward service (utility.py)
{sysctl} -w net.ipv4.conf.all.forwarding=1
{sysctl} -w net.ipv4.conf.default.forwarding=1
{sysctl} -w net.ipv6.conf.all.forwarding=1
{sysctl} -w net.ipv6.conf.default.forwarding=1
{sysctl} -w net.ipv4.conf.all.send_redirects=0
{sysctl} -w net.ipv4.conf.default.send_redirects=0
{sysctl} -w net.ipv4.conf.all.rp_filter=0
{sysctl} -w net.ipv4.conf.default.rp_filter=0
"#,
        sysctl = SYSCTL
    );

    for iface in node.ifaces(true) {
        let name = sysctl_devname(&iface.name);
        cfg.push_str(&format!("{} -w net.ipv4.conf.{}.forwarding=1\n", SYSCTL, name));
        cfg.push_str(&format!("{} -w net.ipv4.conf.{}.send_redirects=0\n", SYSCTL, name));
        cfg.push_str(&format!("{} -w net.ipv4.conf.{}.rp_filter=0\n", SYSCTL, name));
    }
    cfg
}

/// Default route through the first interface only.
pub fn render_default_route(
    node: &dyn NodeView,
    _filename: &str,
    _ctx: &RenderContext<'_>,
) -> String {
    let mut routes = Vec::new();
    if let Some(iface) = node.interfaces().first() {
        for net in iface.ips() {
            if !prefix::has_multiple_addresses(net) {
                continue;
            }
            if let Some(router) = prefix::member(net, 1) {
                routes.push(router);
            }
        }
    }

    let mut cfg = String::from("#!/bin/sh\n");
    cfg.push_str("# auto-generated by DefaultRoute service (utility.py)\n");
    for route in routes {
        cfg.push_str(&format!("ip route add default via {}\n", route));
    }
    cfg
}

/// Multicast route bound to the first data-plane interface, then stop.
pub fn render_default_multicast_route(
    node: &dyn NodeView,
    _filename: &str,
    _ctx: &RenderContext<'_>,
) -> String {
    let mut cfg = String::from("#!/bin/sh\n");
    cfg.push_str("# auto-generated by DefaultMulticastRoute service (utility.py)\n");
    cfg.push_str("# the first interface is chosen below; please change it as needed\n");
    if let Some(iface) = node.ifaces(false).first() {
        cfg.push_str(&format!("ip route add 224.0.0.0/4 dev {}\n", iface.name));
        cfg.push('\n');
    }
    cfg
}

pub fn render_static_route(
    node: &dyn NodeView,
    _filename: &str,
    _ctx: &RenderContext<'_>,
) -> String {
    let mut cfg = String::from("#!/bin/sh\n");
    cfg.push_str("# auto-generated by StaticRoute service (utility.py)\n#\n");
    cfg.push_str("# NOTE: this service must be customized to be of any use\n");
    cfg.push_str("#       Below are samples that you can uncomment and edit.\n#\n");
    for iface in node.ifaces(false) {
        let lines: Vec<String> = iface.ips().iter().map(route_line).collect();
        cfg.push_str(&lines.join("\n"));
        cfg.push('\n');
    }
    cfg
}

/// Commented-out sample route for one prefix; empty for degenerate prefixes.
pub fn route_line(net: &ipnetwork::IpNetwork) -> String {
    match ip::route_target(net) {
        Some(target) => format!(
            "#/sbin/ip route add {} via {}",
            target.destination, target.via
        ),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Interface, Node};
    use crate::probe::{CommandOutput, ProbeError};

    fn no_probe(_: &str) -> Result<CommandOutput, ProbeError> {
        Ok(CommandOutput::new(1, "", ""))
    }

    fn two_iface_node() -> Node {
        Node::new("r1")
            .with_interface(Interface::control("ctrl0").with_ip("172.16.0.1/24".parse().unwrap()))
            .with_interface(Interface::new("eth0").with_ip("10.0.0.1/24".parse().unwrap()))
            .with_interface(
                Interface::new("eth1.10")
                    .with_ip("10.0.1.1/24".parse().unwrap())
                    .with_ip("2001:db8::1/64".parse().unwrap()),
            )
    }

    #[test]
    fn test_ipforward_includes_control_interfaces() {
        let ctx = RenderContext::new(&no_probe);
        let cfg = render_ipforward(&two_iface_node(), "ipforward.sh", &ctx);
        assert!(cfg.starts_with("#!/bin/sh\n# auto-generated by IPForward service (utility.py)\n"));
        assert!(cfg.contains("sysctl -w net.ipv6.conf.default.forwarding=1\n"));
        assert!(cfg.contains("sysctl -w net.ipv4.conf.ctrl0.forwarding=1\n"));
        assert!(cfg.contains("sysctl -w net.ipv4.conf.eth0.send_redirects=0\n"));
        assert!(cfg.contains("sysctl -w net.ipv4.conf.eth1/10.rp_filter=0\n"));
        assert_eq!(cfg.lines().count(), 2 + 8 + 3 * 3);
    }

    #[test]
    fn test_default_route_uses_first_interface_only() {
        let ctx = RenderContext::new(&no_probe);
        let node = Node::new("n1")
            .with_interface(
                Interface::new("eth0")
                    .with_ip("10.0.0.20/24".parse().unwrap())
                    .with_ip("10.0.9.9/32".parse().unwrap())
                    .with_ip("2001:db8::20/64".parse().unwrap()),
            )
            .with_interface(Interface::new("eth1").with_ip("10.0.1.20/24".parse().unwrap()));
        let cfg = render_default_route(&node, "defaultroute.sh", &ctx);
        assert_eq!(
            cfg,
            "#!/bin/sh\n\
             # auto-generated by DefaultRoute service (utility.py)\n\
             ip route add default via 10.0.0.1\n\
             ip route add default via 2001:db8::1\n"
        );
    }

    #[test]
    fn test_default_route_without_interfaces() {
        let ctx = RenderContext::new(&no_probe);
        let cfg = render_default_route(&Node::new("empty"), "defaultroute.sh", &ctx);
        assert_eq!(cfg, "#!/bin/sh\n# auto-generated by DefaultRoute service (utility.py)\n");
    }

    #[test]
    fn test_multicast_route_emits_exactly_one_route() {
        let ctx = RenderContext::new(&no_probe);
        let cfg = render_default_multicast_route(&two_iface_node(), "defaultmroute.sh", &ctx);
        assert_eq!(cfg.matches("ip route add").count(), 1);
        assert!(cfg.ends_with("ip route add 224.0.0.0/4 dev eth0\n\n"));
    }

    #[test]
    fn test_static_route_samples() {
        let ctx = RenderContext::new(&no_probe);
        let node = Node::new("n1")
            .with_interface(Interface::control("ctrl0").with_ip("172.16.0.1/24".parse().unwrap()))
            .with_interface(
                Interface::new("eth0")
                    .with_ip("10.0.0.1/24".parse().unwrap())
                    .with_ip("10.0.5.5/32".parse().unwrap())
                    .with_ip("2001:db8::1/64".parse().unwrap()),
            );
        let cfg = render_static_route(&node, "staticroute.sh", &ctx);
        let expected = "#!/bin/sh\n\
             # auto-generated by StaticRoute service (utility.py)\n#\n\
             # NOTE: this service must be customized to be of any use\n\
             #       Below are samples that you can uncomment and edit.\n#\n\
             #/sbin/ip route add 10.9.8.0/24 via 10.0.0.1\n\
             \n\
             #/sbin/ip route add 3ffe:4::/64 via 2001:db8::1\n";
        assert_eq!(cfg, expected);
        assert!(!cfg.contains("172.16"));
    }

    #[test]
    fn test_route_line_degenerate() {
        assert_eq!(route_line(&"192.168.0.9/32".parse().unwrap()), "");
    }
}
