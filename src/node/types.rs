//! Node and interface snapshot types.
//!
//! Renderers only read nodes through [`NodeView`]; [`Node`] is the concrete
//! snapshot loaded from a scenario file.

use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};

/// Read-only view of a simulated host.
pub trait NodeView {
    /// Host name, used in generated file names and pages
    fn name(&self) -> &str;

    /// All interfaces, in declaration order.
    fn interfaces(&self) -> &[Interface];

    /// Interfaces in declaration order. Control interfaces are only
    /// included when `include_control` is set.
    fn ifaces(&self, include_control: bool) -> Vec<&Interface> {
        self.interfaces()
            .iter()
            .filter(|iface| include_control || !iface.control)
            .collect()
    }
}

/// A network interface and the prefixes assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    /// Management-plane interface excluded from most generated rules
    #[serde(default)]
    pub control: bool,
    #[serde(default)]
    pub ips: Vec<IpNetwork>,
}

impl Interface {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            control: false,
            ips: Vec::new(),
        }
    }

    /// Create a control-plane interface.
    pub fn control(name: &str) -> Self {
        Self {
            control: true,
            ..Self::new(name)
        }
    }

    pub fn with_ip(mut self, ip: IpNetwork) -> Self {
        self.ips.push(ip);
        self
    }

    /// Assigned prefixes, in order.
    pub fn ips(&self) -> &[IpNetwork] {
        &self.ips
    }
}

/// Snapshot of a simulated host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(default)]
    pub interfaces: Vec<Interface>,
}

impl Node {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            interfaces: Vec::new(),
        }
    }

    pub fn with_interface(mut self, iface: Interface) -> Self {
        self.interfaces.push(iface);
        self
    }
}

impl NodeView for Node {
    fn name(&self) -> &str {
        &self.name
    }

    fn interfaces(&self) -> &[Interface] {
        &self.interfaces
    }
}
