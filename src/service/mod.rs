//! Utility services and their config renderers.
//!
//! Each service pairs a static [`ServiceDescriptor`] with a render function.
//! Renderers are pure functions of the node snapshot and the requested file,
//! except HTTP which probes the installed apache version.

pub mod atd;
pub mod dhcp;
pub mod ftp;
pub mod http;
pub mod pcap;
pub mod radvd;
pub mod registry;
pub mod routing;
pub mod ssh;
pub mod types;

// Re-export commonly used types
pub use registry::{generate_config, render_service, ServiceKind, UnknownService};
pub use types::{RenderContext, ServiceDescriptor, ValidationMode};
