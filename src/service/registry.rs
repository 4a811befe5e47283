//! Service registry.
//!
//! A closed set of service kinds, each mapped to its static descriptor and
//! render function through a single table.

use log::debug;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::node::NodeView;

use super::types::{RenderContext, RenderFn, ServiceDescriptor};
use super::{atd, dhcp, ftp, http, pcap, radvd, routing, ssh};

/// Inert service left for operators to fill in.
pub const USER_DEFINED: ServiceDescriptor = ServiceDescriptor {
    name: "UserDefined",
    meta: Some("Customize this service to do anything upon startup."),
    ..ServiceDescriptor::UTILITY
};

/// Every service this crate can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ServiceKind {
    IpForward,
    DefaultRoute,
    DefaultMulticastRoute,
    StaticRoute,
    Ssh,
    Dhcp,
    DhcpClient,
    Ftp,
    Http,
    Pcap,
    Radvd,
    Atd,
    UserDefined,
}

struct ServiceEntry {
    kind: ServiceKind,
    descriptor: &'static ServiceDescriptor,
    /// `None` for services that render nothing
    render: Option<RenderFn>,
}

/// Indexed by `ServiceKind as usize`.
static SERVICES: [ServiceEntry; 13] = [
    ServiceEntry {
        kind: ServiceKind::IpForward,
        descriptor: &routing::IPFORWARD,
        render: Some(routing::render_ipforward),
    },
    ServiceEntry {
        kind: ServiceKind::DefaultRoute,
        descriptor: &routing::DEFAULT_ROUTE,
        render: Some(routing::render_default_route),
    },
    ServiceEntry {
        kind: ServiceKind::DefaultMulticastRoute,
        descriptor: &routing::DEFAULT_MULTICAST_ROUTE,
        render: Some(routing::render_default_multicast_route),
    },
    ServiceEntry {
        kind: ServiceKind::StaticRoute,
        descriptor: &routing::STATIC_ROUTE,
        render: Some(routing::render_static_route),
    },
    ServiceEntry {
        kind: ServiceKind::Ssh,
        descriptor: &ssh::SSH,
        render: Some(ssh::render_ssh),
    },
    ServiceEntry {
        kind: ServiceKind::Dhcp,
        descriptor: &dhcp::DHCP,
        render: Some(dhcp::render_dhcpd),
    },
    ServiceEntry {
        kind: ServiceKind::DhcpClient,
        descriptor: &dhcp::DHCP_CLIENT,
        render: Some(dhcp::render_dhcp_client),
    },
    ServiceEntry {
        kind: ServiceKind::Ftp,
        descriptor: &ftp::FTP,
        render: Some(ftp::render_vsftpd),
    },
    ServiceEntry {
        kind: ServiceKind::Http,
        descriptor: &http::HTTP,
        render: Some(http::render_http),
    },
    ServiceEntry {
        kind: ServiceKind::Pcap,
        descriptor: &pcap::PCAP,
        render: Some(pcap::render_pcap),
    },
    ServiceEntry {
        kind: ServiceKind::Radvd,
        descriptor: &radvd::RADVD,
        render: Some(radvd::render_radvd),
    },
    ServiceEntry {
        kind: ServiceKind::Atd,
        descriptor: &atd::ATD,
        render: Some(atd::render_atd),
    },
    ServiceEntry {
        kind: ServiceKind::UserDefined,
        descriptor: &USER_DEFINED,
        render: None,
    },
];

/// Returned when a service name does not match any descriptor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown service '{0}'")]
pub struct UnknownService(pub String);

impl ServiceKind {
    /// All services in registry order.
    pub fn all() -> impl Iterator<Item = ServiceKind> {
        SERVICES.iter().map(|entry| entry.kind)
    }

    /// Look a service up by its descriptor name (e.g. `"DHCP"`, `"pcap"`).
    pub fn from_name(name: &str) -> Option<ServiceKind> {
        SERVICES
            .iter()
            .find(|entry| entry.descriptor.name == name)
            .map(|entry| entry.kind)
    }

    pub fn descriptor(self) -> &'static ServiceDescriptor {
        self.entry().descriptor
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    fn entry(self) -> &'static ServiceEntry {
        &SERVICES[self as usize]
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ServiceKind {
    type Err = UnknownService;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceKind::from_name(s).ok_or_else(|| UnknownService(s.to_string()))
    }
}

/// Render one file owned by `service` for `node`.
///
/// Files the service does not declare render as an empty string.
pub fn generate_config(
    service: ServiceKind,
    node: &dyn NodeView,
    filename: &str,
    ctx: &RenderContext<'_>,
) -> String {
    let entry = service.entry();
    if !entry.descriptor.owns(filename) {
        debug!("{} does not declare {}, rendering nothing", service, filename);
        return String::new();
    }
    match entry.render {
        Some(render) => render(node, filename, ctx),
        None => String::new(),
    }
}

/// Render every file declared by `service`, in declaration order.
pub fn render_service(
    service: ServiceKind,
    node: &dyn NodeView,
    ctx: &RenderContext<'_>,
) -> Vec<(&'static str, String)> {
    service
        .descriptor()
        .configs
        .iter()
        .map(|filename| (*filename, generate_config(service, node, filename, ctx)))
        .collect()
}
