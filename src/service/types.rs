//! Service descriptor definitions.
//!
//! A descriptor is the static part of a service: which files it owns, which
//! directories it needs and the commands the orchestrator runs to start,
//! stop and validate it. Descriptors are `const` data and never change at
//! runtime.

use serde::Serialize;

use crate::node::NodeView;
use crate::probe::{CommandRunner, APACHE_VERSION_COMMAND};

/// Group shared by every service in this crate.
pub const UTILITY_GROUP: &str = "Utility";

/// How the orchestrator waits on a service after startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationMode {
    /// Validate in the background
    #[default]
    NonBlocking,
    /// Block until the validate commands succeed
    Blocking,
}

/// Static declaration of a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDescriptor {
    pub name: &'static str,
    pub group: &'static str,
    /// Files rendered for this service, in order
    pub configs: &'static [&'static str],
    /// Directories that must exist on the node
    pub dirs: &'static [&'static str],
    pub startup: &'static [&'static str],
    pub shutdown: &'static [&'static str],
    pub validate: &'static [&'static str],
    pub validation_mode: ValidationMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<&'static str>,
    /// Output is a sample that must be edited before it is useful
    pub custom_needed: bool,
}

impl ServiceDescriptor {
    /// Empty utility descriptor; services override the fields they declare.
    pub const UTILITY: ServiceDescriptor = ServiceDescriptor {
        name: "",
        group: UTILITY_GROUP,
        configs: &[],
        dirs: &[],
        startup: &[],
        shutdown: &[],
        validate: &[],
        validation_mode: ValidationMode::NonBlocking,
        meta: None,
        custom_needed: false,
    };

    /// Whether `filename` is one of the files this service renders.
    pub fn owns(&self, filename: &str) -> bool {
        self.configs.iter().any(|c| *c == filename)
    }
}

/// Collaborators available to renderers.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub runner: &'a dyn CommandRunner,
    /// Command line used to detect the apache version
    pub apache_probe: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self {
            runner,
            apache_probe: APACHE_VERSION_COMMAND,
        }
    }

    pub fn with_apache_probe(mut self, command: &'a str) -> Self {
        self.apache_probe = command;
        self
    }
}

/// Signature shared by every config renderer.
pub type RenderFn = fn(&dyn NodeView, &str, &RenderContext<'_>) -> String;
