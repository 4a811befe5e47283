//! Render orchestrator.
//!
//! Drives a loaded scenario through the service registry and writes every
//! declared file of the selected services to an output directory.

use crate::config::Scenario;
use crate::probe::CommandRunner;
use crate::service::{render_service, RenderContext, ServiceKind};
use crate::utils::write_rendered_file;
use log::{debug, info};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One written file
#[derive(Debug, Clone, Serialize)]
pub struct RenderedFile {
    pub service: &'static str,
    pub filename: &'static str,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Render all selected services of a scenario into `output_dir`
pub fn render_scenario(
    scenario: &Scenario,
    output_dir: &Path,
    runner: &dyn CommandRunner,
) -> color_eyre::eyre::Result<Vec<RenderedFile>> {
    let services = scenario.selected_services()?;
    let ctx = RenderContext::new(runner).with_apache_probe(&scenario.general.apache_probe);

    info!(
        "Rendering {} services for node {}",
        services.len(),
        scenario.node.name
    );

    let mut written = Vec::new();
    for service in services {
        written.extend(render_one(scenario, service, output_dir, &ctx)?);
    }

    info!("Wrote {} files to {:?}", written.len(), output_dir);
    Ok(written)
}

fn render_one(
    scenario: &Scenario,
    service: ServiceKind,
    output_dir: &Path,
    ctx: &RenderContext<'_>,
) -> color_eyre::eyre::Result<Vec<RenderedFile>> {
    let descriptor = service.descriptor();
    if descriptor.configs.is_empty() {
        info!("{} declares no files, skipping", service);
        return Ok(Vec::new());
    }

    let mut written = Vec::new();
    for (filename, content) in render_service(service, &scenario.node, ctx) {
        let path = write_rendered_file(output_dir, descriptor.name, filename, &content)?;
        debug!("{}: wrote {} ({} bytes)", service, path.display(), content.len());
        written.push(RenderedFile {
            service: descriptor.name,
            filename,
            path,
            bytes: content.len(),
        });
    }
    Ok(written)
}
