//! External capability probes.
//!
//! The HTTP service is the only renderer that looks at the host it runs on:
//! it asks the installed apache2 for its version through a [`CommandRunner`].

pub mod apache;
pub mod runner;

pub use apache::{detect_apache_version, ApacheVersion, APACHE_VERSION_COMMAND};
pub use runner::{CommandOutput, CommandRunner, ProbeError, SystemRunner, DEFAULT_PROBE_TIMEOUT};
