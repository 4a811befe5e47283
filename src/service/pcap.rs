//! tcpdump packet capture.
//!
//! Every interface gets a capture line; control interfaces are listed but
//! commented out.

use crate::node::NodeView;

use super::types::{RenderContext, ServiceDescriptor};

pub const PCAP: ServiceDescriptor = ServiceDescriptor {
    name: "pcap",
    configs: &["pcap.sh"],
    startup: &["bash pcap.sh start"],
    shutdown: &["bash pcap.sh stop"],
    validate: &["pidof tcpdump"],
    meta: Some("logs network traffic to pcap packet capture files"),
    ..ServiceDescriptor::UTILITY
};

const PCAP_HEADER: &str = r#"
#!/bin/sh
# set tcpdump options here (see 'man tcpdump' for help)
# (-s snap length, -C limit pcap file length, -n disable name resolution)
DUMPOPTS="-s 12288 -C 10 -n"

if [ "x$1" = "xstart" ]; then

"#;

const PCAP_FOOTER: &str = r#"

elif [ "x$1" = "xstop" ]; then
    mkdir -p ${SESSION_DIR}/pcap
    mv *.pcap ${SESSION_DIR}/pcap
fi;
"#;

pub fn render_pcap(node: &dyn NodeView, _filename: &str, _ctx: &RenderContext<'_>) -> String {
    let mut cfg = String::from(PCAP_HEADER);
    for iface in node.ifaces(true) {
        if iface.control {
            cfg.push_str("# ");
        }
        cfg.push_str(&format!(
            "tcpdump ${{DUMPOPTS}} -w {node}.{iface}.pcap -i {iface} < /dev/null &\n",
            node = node.name(),
            iface = iface.name,
        ));
    }
    cfg.push_str(PCAP_FOOTER);
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
    fn test_pcap_comments_out_control_interfaces() {
        let ctx = RenderContext::new(&no_probe);
        let node = Node::new("n4")
            .with_interface(Interface::control("ctrl0"))
            .with_interface(Interface::new("eth0"));
        let cfg = render_pcap(&node, "pcap.sh", &ctx);

        assert!(cfg.starts_with("\n#!/bin/sh\n"));
        assert!(cfg.contains(
            "then\n\n# tcpdump ${DUMPOPTS} -w n4.ctrl0.pcap -i ctrl0 < /dev/null &\n\
             tcpdump ${DUMPOPTS} -w n4.eth0.pcap -i eth0 < /dev/null &\n\n\nelif"
        ));
        assert!(cfg.ends_with("    mv *.pcap ${SESSION_DIR}/pcap\nfi;\n"));
    }

    #[test]
    fn test_pcap_descriptor_meta() {
        assert_eq!(PCAP.meta, Some("logs network traffic to pcap packet capture files"));
        assert_eq!(PCAP.startup, &["bash pcap.sh start"]);
    }
}
