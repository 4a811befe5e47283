//! Apache version detection and version-specific directives.

use log::{debug, warn};
use serde::Serialize;

use super::runner::CommandRunner;

/// Command used to ask the installed apache2 for its version.
pub const APACHE_VERSION_COMMAND: &str = "a2query -v";

/// Supported apache2 major versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ApacheVersion {
    /// 2.2 and anything not recognised as 2.4
    V22,
    V24,
}

impl ApacheVersion {
    /// Accept mutex directive.
    pub fn lock_directive(self) -> &'static str {
        match self {
            ApacheVersion::V22 => "LockFile ${APACHE_LOCK_DIR}/accept.lock\n",
            ApacheVersion::V24 => "Mutex file:${APACHE_LOCK_DIR} default\n",
        }
    }

    /// Process model module; 2.2 has it built in.
    pub fn mpm_module(self) -> &'static str {
        match self {
            ApacheVersion::V22 => "",
            ApacheVersion::V24 => {
                "LoadModule mpm_worker_module /usr/lib/apache2/modules/mod_mpm_worker.so\n"
            }
        }
    }

    /// Access rules for `.ht*` files.
    pub fn htaccess_permission(self) -> &'static str {
        match self {
            ApacheVersion::V22 => "    Order allow,deny\n    Deny from all\n    Satisfy all\n",
            ApacheVersion::V24 => "    Require all denied\n",
        }
    }

    /// Authorization module load line.
    pub fn authz_module(self) -> &'static str {
        match self {
            ApacheVersion::V22 => {
                "LoadModule authz_default_module /usr/lib/apache2/modules/mod_authz_default.so\n"
            }
            ApacheVersion::V24 => {
                "LoadModule authz_core_module /usr/lib/apache2/modules/mod_authz_core.so\n"
            }
        }
    }

    /// Access rules for the document root.
    pub fn document_permission(self) -> &'static str {
        match self {
            ApacheVersion::V22 => "\t\tOrder allow,deny\n\t\tallow from all\n",
            ApacheVersion::V24 => "\t\tRequire all granted\n",
        }
    }
}

/// Ask the host which apache2 is installed.
///
/// Only a successful run whose output starts with `2.4` selects
/// [`ApacheVersion::V24`]. A non-zero exit, other output, or a command that
/// could not be run at all falls back to [`ApacheVersion::V22`].
pub fn detect_apache_version(runner: &dyn CommandRunner, command: &str) -> ApacheVersion {
    match runner.run(command) {
        Ok(output) if output.success() && output.stdout.trim_start().starts_with("2.4") => {
            debug!("Detected apache 2.4 from '{}'", output.stdout.trim());
            ApacheVersion::V24
        }
        Ok(output) => {
            debug!(
                "'{}' returned status {} ({}), assuming apache 2.2",
                command,
                output.status,
                if output.success() { output.stdout.trim() } else { output.stderr.trim() }
            );
            ApacheVersion::V22
        }
        Err(e) => {
            warn!("Apache version probe failed: {}. Assuming apache 2.2", e);
            ApacheVersion::V22
        }
    }
}
