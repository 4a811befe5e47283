//! Apache web server.
//!
//! apache2.conf differs between 2.2 and 2.4 at five places; the installed
//! version is probed through the render context each time the file is
//! rendered.

use ipnetwork::IpNetwork;

use crate::node::NodeView;
use crate::probe::{detect_apache_version, ApacheVersion};

use super::types::{RenderContext, ServiceDescriptor};

pub const APACHE2_CONF: &str = "/etc/apache2/apache2.conf";
pub const APACHE2_ENVVARS: &str = "/etc/apache2/envvars";
pub const INDEX_HTML: &str = "/var/www/index.html";

pub const HTTP: ServiceDescriptor = ServiceDescriptor {
    name: "HTTP",
    configs: &[APACHE2_CONF, APACHE2_ENVVARS, INDEX_HTML],
    dirs: &[
        "/etc/apache2",
        "/var/run/apache2",
        "/var/log/apache2",
        "/run/lock",
        "/var/lock/apache2",
        "/var/www",
    ],
    startup: &["chown www-data /var/lock/apache2", "apache2ctl start"],
    shutdown: &["apache2ctl stop"],
    validate: &["pidof apache2"],
    ..ServiceDescriptor::UTILITY
};

const ENVVARS: &str = "\
# this file is used by apache2ctl - generated by utility.py:HttpService
# these settings come from a default Ubuntu apache2 installation
export APACHE_RUN_USER=www-data
export APACHE_RUN_GROUP=www-data
export APACHE_PID_FILE=/var/run/apache2.pid
export APACHE_RUN_DIR=/var/run/apache2
export APACHE_LOCK_DIR=/var/lock/apache2
export APACHE_LOG_DIR=/var/log/apache2
export LANG=C
export LANG
";

pub fn render_http(node: &dyn NodeView, filename: &str, ctx: &RenderContext<'_>) -> String {
    match filename {
        APACHE2_CONF => {
            let version = detect_apache_version(ctx.runner, ctx.apache_probe);
            apache2_conf(version)
        }
        APACHE2_ENVVARS => ENVVARS.to_string(),
        INDEX_HTML => index_html(node),
        _ => String::new(),
    }
}

/// Assemble apache2.conf for a given version.
pub fn apache2_conf(version: ApacheVersion) -> String {
    format!(
        r##"# apache2.conf generated by utility.py:HttpService
{lock}PidFile ${{APACHE_PID_FILE}}
Timeout 300
KeepAlive On
MaxKeepAliveRequests 100
KeepAliveTimeout 5
{mpm}
<IfModule mpm_prefork_module>
    StartServers          5
    MinSpareServers       5
    MaxSpareServers      10
    MaxClients          150
    MaxRequestsPerChild   0
</IfModule>

<IfModule mpm_worker_module>
    StartServers          2
    MinSpareThreads      25
    MaxSpareThreads      75
    ThreadLimit          64
    ThreadsPerChild      25
    MaxClients          150
    MaxRequestsPerChild   0
</IfModule>

<IfModule mpm_event_module>
    StartServers          2
    MinSpareThreads      25
    MaxSpareThreads      75
    ThreadLimit          64
    ThreadsPerChild      25
    MaxClients          150
    MaxRequestsPerChild   0
</IfModule>

User ${{APACHE_RUN_USER}}
Group ${{APACHE_RUN_GROUP}}

AccessFileName .htaccess

<Files ~ "^\.ht">
{deny}</Files>

DefaultType None

HostnameLookups Off

ErrorLog ${{APACHE_LOG_DIR}}/error.log
LogLevel warn

#Include mods-enabled/*.load
#Include mods-enabled/*.conf
LoadModule alias_module /usr/lib/apache2/modules/mod_alias.so
LoadModule auth_basic_module /usr/lib/apache2/modules/mod_auth_basic.so
{authz}LoadModule authz_host_module /usr/lib/apache2/modules/mod_authz_host.so
LoadModule authz_user_module /usr/lib/apache2/modules/mod_authz_user.so
LoadModule autoindex_module /usr/lib/apache2/modules/mod_autoindex.so
LoadModule dir_module /usr/lib/apache2/modules/mod_dir.so
LoadModule env_module /usr/lib/apache2/modules/mod_env.so

NameVirtualHost *:80
Listen 80

<IfModule mod_ssl.c>
    Listen 443
</IfModule>
<IfModule mod_gnutls.c>
    Listen 443
</IfModule>

LogFormat "%v:%p %h %l %u %t \"%r\" %>s %O \"%{{Referer}}i\" \"%{{User-Agent}}i\"" vhost_combined
LogFormat "%h %l %u %t \"%r\" %>s %O \"%{{Referer}}i\" \"%{{User-Agent}}i\"" combined
LogFormat "%h %l %u %t \"%r\" %>s %O" common
LogFormat "%{{Referer}}i -> %U" referer
LogFormat "%{{User-agent}}i" agent

ServerTokens OS
ServerSignature On
TraceEnable Off

<VirtualHost *:80>
    ServerAdmin webmaster@localhost
    DocumentRoot /var/www
    <Directory />
        Options FollowSymLinks
        AllowOverride None
    </Directory>
    <Directory /var/www/>
        Options Indexes FollowSymLinks MultiViews
        AllowOverride None
{grant}    </Directory>
    ErrorLog ${{APACHE_LOG_DIR}}/error.log
    LogLevel warn
    CustomLog ${{APACHE_LOG_DIR}}/access.log combined
</VirtualHost>

"##,
        lock = version.lock_directive(),
        mpm = version.mpm_module(),
        deny = version.htaccess_permission(),
        authz = version.authz_module(),
        grant = version.document_permission(),
    )
}

/// Default page naming the node and listing its data-plane addresses.
fn index_html(node: &dyn NodeView) -> String {
    let mut body = format!(
        "<!-- generated by utility.py:HttpService -->\n\
         <h1>{} web server</h1>\n\
         <p>This is the default web page for this server.</p>\n\
         <p>The web server software is running but no content has been added, yet.</p>\n",
        node.name()
    );
    for iface in node.ifaces(false) {
        body.push_str(&format!("<li>{} - {}</li>\n", iface.name, quoted_list(iface.ips())));
    }
    format!("<html><body>{}</body></html>", body)
}

/// `['10.0.0.1/24', '2001:db8::1/64']`
fn quoted_list(ips: &[IpNetwork]) -> String {
    let items: Vec<String> = ips.iter().map(|ip| format!("'{}'", ip)).collect();
    format!("[{}]", items.join(", "))
}
