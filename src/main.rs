use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::fs;
use std::path::PathBuf;

use hostsvc::config_loader;
use hostsvc::orchestrator::render_scenario;
use hostsvc::probe::SystemRunner;
use hostsvc::service::ServiceKind;

/// Utility service config rendering for simulated network hosts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the configured services of a node into an output directory
    Render {
        /// Path to the scenario YAML file
        #[arg(short, long)]
        config: PathBuf,

        /// Output directory for rendered files
        #[arg(short, long, default_value = "hostsvc_output")]
        output: PathBuf,

        /// Render only these services (overrides the scenario's list)
        #[arg(short, long = "service")]
        services: Vec<String>,
    },
    /// Print every service descriptor as JSON
    List,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    match args.command {
        Command::List => {
            env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
            let descriptors: Vec<_> = ServiceKind::all().map(|k| k.descriptor()).collect();
            println!("{}", serde_json::to_string_pretty(&descriptors)?);
            Ok(())
        }
        Command::Render {
            config,
            output,
            services,
        } => {
            let mut scenario = config_loader::load_scenario(&config)?;

            let level = scenario
                .general
                .log_level
                .clone()
                .unwrap_or_else(|| "info".to_string());
            env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

            if !services.is_empty() {
                scenario.services = Some(services);
                scenario.validate()?;
            }

            info!("Scenario file: {:?}", config);
            info!("Output directory: {:?}", output);

            fs::create_dir_all(&output).wrap_err_with(|| {
                format!("Failed to create output directory '{}'", output.display())
            })?;

            let runner = SystemRunner::new(scenario.general.probe_timeout);
            let written = render_scenario(&scenario, &output, &runner)?;

            info!(
                "Rendered {} files for node {}",
                written.len(),
                scenario.node.name
            );
            Ok(())
        }
    }
}
