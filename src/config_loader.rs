use crate::config::Scenario;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{info, warn};
use std::fs::File;
use std::path::Path;

/// Load and parse a scenario from a YAML file
pub fn load_scenario(scenario_path: &Path) -> Result<Scenario> {
    info!("Loading scenario from: {:?}", scenario_path);

    let file = File::open(scenario_path)
        .wrap_err_with(|| format!("Failed to open scenario '{}'", scenario_path.display()))?;

    let scenario: Scenario = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse scenario '{}'", scenario_path.display()))?;

    scenario.validate()?;

    let control = scenario.node.interfaces.iter().filter(|i| i.control).count();
    info!(
        "Node {} has {} interfaces ({} control)",
        scenario.node.name,
        scenario.node.interfaces.len(),
        control
    );
    if scenario.node.interfaces.len() == control {
        warn!(
            "Node {} has no data-plane interfaces; most services will render headers only",
            scenario.node.name
        );
    }

    Ok(scenario)
}
