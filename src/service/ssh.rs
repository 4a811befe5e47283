//! OpenSSH daemon.
//!
//! sshd is launched from a wrapper script so it only starts once the RSA host
//! key exists, which is also why validation blocks.

use crate::node::NodeView;

use super::types::{RenderContext, ServiceDescriptor, ValidationMode};

const SSH_CONFIG_DIR: &str = "/etc/ssh";
const SSH_STATE_DIR: &str = "/var/run/sshd";
const SSH_LIB_DIR: &str = "/usr/lib/openssh";

pub const SSH: ServiceDescriptor = ServiceDescriptor {
    name: "SSH",
    configs: &["startsshd.sh", "/etc/ssh/sshd_config"],
    dirs: &[SSH_CONFIG_DIR, SSH_STATE_DIR],
    startup: &["bash startsshd.sh"],
    shutdown: &["killall sshd"],
    validation_mode: ValidationMode::Blocking,
    ..ServiceDescriptor::UTILITY
};

pub fn render_ssh(_node: &dyn NodeView, filename: &str, _ctx: &RenderContext<'_>) -> String {
    if filename == "startsshd.sh" {
        startup_script()
    } else {
        sshd_config()
    }
}

fn startup_script() -> String {
    format!(
        r#"#!/bin/sh
# auto-generated by SSH service (utility.py)
ssh-keygen -q -t rsa -N "" -f {cfgdir}/ssh_host_rsa_key
chmod 655 {statedir}
# wait until RSA host key has been generated to launch sshd
/usr/sbin/sshd -f {cfgdir}/sshd_config
"#,
        cfgdir = SSH_CONFIG_DIR,
        statedir = SSH_STATE_DIR,
    )
}

fn sshd_config() -> String {
    format!(
        r#"# auto-generated by SSH service (utility.py)
Port 22
Protocol 2
HostKey {cfgdir}/ssh_host_rsa_key
UsePrivilegeSeparation yes
PidFile {statedir}/sshd.pid

KeyRegenerationInterval 3600
ServerKeyBits 768

SyslogFacility AUTH
LogLevel INFO

LoginGraceTime 120
PermitRootLogin yes
StrictModes yes

RSAAuthentication yes
PubkeyAuthentication yes

IgnoreRhosts yes
RhostsRSAAuthentication no
HostbasedAuthentication no

PermitEmptyPasswords no
ChallengeResponseAuthentication no

X11Forwarding yes
X11DisplayOffset 10
PrintMotd no
PrintLastLog yes
TCPKeepAlive yes

AcceptEnv LANG LC_*
Subsystem sftp {libdir}/sftp-server
UsePAM yes
UseDNS no
"#,
        cfgdir = SSH_CONFIG_DIR,
        statedir = SSH_STATE_DIR,
        libdir = SSH_LIB_DIR,
    )
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
    fn test_descriptor_blocks_on_validation() {
        assert_eq!(SSH.validation_mode, ValidationMode::Blocking);
        assert_eq!(SSH.dirs, &["/etc/ssh", "/var/run/sshd"]);
    }

    #[test]
    fn test_startup_script() {
        let ctx = RenderContext::new(&no_probe);
        let cfg = render_ssh(&Node::new("n1"), "startsshd.sh", &ctx);
        assert_eq!(
            cfg,
            "#!/bin/sh\n\
             # auto-generated by SSH service (utility.py)\n\
             ssh-keygen -q -t rsa -N \"\" -f /etc/ssh/ssh_host_rsa_key\n\
             chmod 655 /var/run/sshd\n\
             # wait until RSA host key has been generated to launch sshd\n\
             /usr/sbin/sshd -f /etc/ssh/sshd_config\n"
        );
    }

    #[test]
    fn test_sshd_config() {
        let ctx = RenderContext::new(&no_probe);
        let cfg = render_ssh(&Node::new("n1"), "/etc/ssh/sshd_config", &ctx);
        assert!(cfg.starts_with("# auto-generated by SSH service (utility.py)\nPort 22\n"));
        assert!(cfg.contains("HostKey /etc/ssh/ssh_host_rsa_key\n"));
        assert!(cfg.contains("PidFile /var/run/sshd/sshd.pid\n"));
        assert!(cfg.contains("Subsystem sftp /usr/lib/openssh/sftp-server\n"));
        assert!(cfg.ends_with("UsePAM yes\nUseDNS no\n"));
    }
}
