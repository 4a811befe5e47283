use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

use crate::node::Node;
use crate::probe::{APACHE_VERSION_COMMAND, DEFAULT_PROBE_TIMEOUT};
use crate::service::ServiceKind;

/// Top-level scenario structure that mirrors the YAML file
#[derive(Debug, Serialize, Deserialize)]
pub struct Scenario {
    /// General rendering settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Node whose services are rendered
    pub node: Node,
    /// (Optional) Service names to render (default: all services)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
}

/// General settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeneralConfig {
    /// (Optional) Log filter used when RUST_LOG is not set (default: "info")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    /// Command line used to detect the installed apache version
    #[serde(default = "default_apache_probe")]
    pub apache_probe: String,
    /// Time allowed for the version probe (e.g. "10s", "500ms")
    #[serde(default = "default_probe_timeout", with = "humantime_serde")]
    pub probe_timeout: Duration,
}

fn default_apache_probe() -> String {
    APACHE_VERSION_COMMAND.to_string()
}

fn default_probe_timeout() -> Duration {
    DEFAULT_PROBE_TIMEOUT
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            apache_probe: default_apache_probe(),
            probe_timeout: default_probe_timeout(),
        }
    }
}

/// Scenario validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid general configuration: {0}")]
    InvalidGeneral(String),
    #[error("Invalid node configuration: {0}")]
    InvalidNode(String),
    #[error("Invalid service selection: {0}")]
    InvalidServices(String),
}

impl Scenario {
    /// Validate the scenario
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.general.apache_probe.trim().is_empty() {
            return Err(ValidationError::InvalidGeneral(
                "apache_probe cannot be empty".to_string(),
            ));
        }
        if self.general.probe_timeout.is_zero() {
            return Err(ValidationError::InvalidGeneral(
                "probe_timeout must be greater than zero".to_string(),
            ));
        }

        if self.node.name.trim().is_empty() {
            return Err(ValidationError::InvalidNode(
                "node name cannot be empty".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for iface in &self.node.interfaces {
            if iface.name.trim().is_empty() {
                return Err(ValidationError::InvalidNode(format!(
                    "interface without a name on node {}",
                    self.node.name
                )));
            }
            if !seen.insert(iface.name.as_str()) {
                return Err(ValidationError::InvalidNode(format!(
                    "duplicate interface {} on node {}",
                    iface.name, self.node.name
                )));
            }
        }

        self.selected_services().map(|_| ())
    }

    /// Services to render, in the order given (or registry order by default)
    pub fn selected_services(&self) -> Result<Vec<ServiceKind>, ValidationError> {
        let Some(names) = &self.services else {
            return Ok(ServiceKind::all().collect());
        };
        if names.is_empty() {
            return Err(ValidationError::InvalidServices(
                "services cannot be an empty list".to_string(),
            ));
        }
        let mut kinds: Vec<ServiceKind> = Vec::with_capacity(names.len());
        for name in names {
            let kind = name
                .parse::<ServiceKind>()
                .map_err(|e| ValidationError::InvalidServices(e.to_string()))?;
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        Ok(kinds)
    }
}
