//! at job scheduler daemon.

use crate::node::NodeView;

use super::types::{RenderContext, ServiceDescriptor};

pub const ATD: ServiceDescriptor = ServiceDescriptor {
    name: "atd",
    configs: &["startatd.sh"],
    dirs: &["/var/spool/cron/atjobs", "/var/spool/cron/atspool"],
    startup: &["bash startatd.sh"],
    shutdown: &["pkill atd"],
    ..ServiceDescriptor::UTILITY
};

const STARTATD_SH: &str = "
#!/bin/sh
echo 00001 > /var/spool/cron/atjobs/.SEQ
chown -R daemon /var/spool/cron/*
chmod -R 700 /var/spool/cron/*
atd
";

pub fn render_atd(_node: &dyn NodeView, _filename: &str, _ctx: &RenderContext<'_>) -> String {
    STARTATD_SH.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use crate::probe::{CommandOutput, ProbeError};

    fn no_probe(_: &str) -> Result<CommandOutput, ProbeError> {
        Ok(CommandOutput::new(1, "", ""))
    }

    #[test]
    fn test_startatd_script() {
        let ctx = RenderContext::new(&no_probe);
        let cfg = render_atd(&Node::new("n1"), "startatd.sh", &ctx);
        assert_eq!(
            cfg,
            "\n#!/bin/sh\necho 00001 > /var/spool/cron/atjobs/.SEQ\nchown -R daemon /var/spool/cron/*\nchmod -R 700 /var/spool/cron/*\natd\n"
        );
    }
}
