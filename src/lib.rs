//! # hostsvc - Utility service config rendering for simulated network hosts
//!
//! This library renders the per-node artifacts (shell scripts, daemon
//! configuration files, HTML) of the utility services a simulated host can
//! run: forwarding and routing scripts, SSH, DHCP server and client, FTP,
//! HTTP, packet capture, router advertisement and the at scheduler.
//!
//! ## Overview
//!
//! Each service is a static descriptor (files it owns, directories it needs,
//! startup/shutdown/validate commands) paired with a renderer that turns a
//! node snapshot and one declared filename into the file's text. Rendering is
//! deterministic for a given snapshot; the only outside input is the apache
//! version probe used by the HTTP service.
//!
//! ## Architecture
//!
//! - `ip`: prefix member arithmetic and the route, DHCP pool and router
//!   advertisement derivations
//! - `node`: the `NodeView` trait and the concrete node snapshot
//! - `probe`: command execution capability and apache version detection
//! - `service`: descriptors, renderers and the service registry
//! - `config` / `config_loader`: YAML scenario format and loading
//! - `orchestrator`: renders a scenario into an output directory
//! - `utils`: rendered file output
//!
//! ## Example Usage
//!
//! ```rust
//! use hostsvc::node::{Interface, Node};
//! use hostsvc::probe::SystemRunner;
//! use hostsvc::service::{generate_config, RenderContext, ServiceKind};
//!
//! let node = Node::new("n1")
//!     .with_interface(Interface::new("eth0").with_ip("10.0.0.1/24".parse().unwrap()));
//!
//! let runner = SystemRunner::default();
//! let ctx = RenderContext::new(&runner);
//! let dhcpd = generate_config(ServiceKind::Dhcp, &node, "/etc/dhcp/dhcpd.conf", &ctx);
//! assert!(dhcpd.contains("range 10.0.0.127 10.0.0.254;"));
//! ```
//!
//! ## Scenario Format
//!
//! ```yaml
//! general:
//!   log_level: info
//!   apache_probe: "a2query -v"
//!   probe_timeout: "10s"
//!
//! node:
//!   name: router1
//!   interfaces:
//!     - name: ctrl0
//!       control: true
//!       ips: ["172.16.0.1/24"]
//!     - name: eth0
//!       ips: ["10.0.0.1/24", "2001:db8::1/64"]
//!
//! services: [IPForward, DHCP, radvd]
//! ```
//!
//! ## Error Handling
//!
//! Renderers never fail: inapplicable prefixes render as empty entries, a
//! failed version probe selects apache 2.2 and undeclared filenames render as
//! empty text. Scenario loading and file output return
//! `color_eyre::eyre::Result`.

pub mod config;
pub mod config_loader;
pub mod ip;
pub mod node;
pub mod orchestrator;
pub mod probe;
pub mod service;
pub mod utils;
