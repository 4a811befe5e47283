//! vsftpd server.

use crate::node::NodeView;

use super::types::{RenderContext, ServiceDescriptor};

pub const FTP: ServiceDescriptor = ServiceDescriptor {
    name: "FTP",
    configs: &["vsftpd.conf"],
    dirs: &["/var/run/vsftpd/empty", "/var/ftp"],
    startup: &["vsftpd ./vsftpd.conf"],
    shutdown: &["killall vsftpd"],
    validate: &["pidof vsftpd"],
    ..ServiceDescriptor::UTILITY
};

const VSFTPD_CONF: &str = "\
# vsftpd.conf auto-generated by FTP service (utility.py)
listen=YES
anonymous_enable=YES
local_enable=YES
dirmessage_enable=YES
use_localtime=YES
xferlog_enable=YES
connect_from_port_20=YES
xferlog_file=/var/log/vsftpd.log
ftpd_banner=Welcome to the CORE FTP service
secure_chroot_dir=/var/run/vsftpd/empty
anon_root=/var/ftp
";

pub fn render_vsftpd(_node: &dyn NodeView, _filename: &str, _ctx: &RenderContext<'_>) -> String {
    VSFTPD_CONF.to_string()
}
