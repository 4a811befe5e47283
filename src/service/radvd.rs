//! radvd router advertisement daemon.

use crate::ip;
use crate::node::NodeView;

use super::types::{RenderContext, ServiceDescriptor};

pub const RADVD: ServiceDescriptor = ServiceDescriptor {
    name: "radvd",
    configs: &["/etc/radvd/radvd.conf"],
    dirs: &["/etc/radvd"],
    startup: &["radvd -C /etc/radvd/radvd.conf -m logfile -l /var/log/radvd.log"],
    shutdown: &["pkill radvd"],
    validate: &["pidof radvd"],
    ..ServiceDescriptor::UTILITY
};

/// One `interface` block per data-plane interface that has any prefix, with
/// a `prefix` block for each of its IPv6 prefixes.
pub fn render_radvd(node: &dyn NodeView, _filename: &str, _ctx: &RenderContext<'_>) -> String {
    let mut cfg = String::from("# auto-generated by RADVD service (utility.py)\n");
    for iface in node.ifaces(false) {
        if iface.ips().is_empty() {
            continue;
        }
        cfg.push_str(&format!(
            r#"interface {name}
{{
        AdvSendAdvert on;
        MinRtrAdvInterval 3;
        MaxRtrAdvInterval 10;
        AdvDefaultPreference low;
        AdvHomeAgentFlag off;
"#,
            name = iface.name
        ));
        for prefix in iface.ips().iter().filter_map(ip::radvd_prefix) {
            cfg.push_str(&format!(
                r#"        prefix {prefix}
        {{
                AdvOnLink on;
                AdvAutonomous on;
                AdvRouterAddr on;
        }};
"#,
                prefix = prefix
            ));
        }
        cfg.push_str("};\n");
    }
    cfg
}
