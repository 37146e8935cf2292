//! Scenario runner for the glance overview panel engine

use anyhow::{anyhow, Result};
use clap::Parser;

use glance::cli::{CliArgs, OutputFormat};
use glance::config::GlanceConfig;
use glance::scenario::{self, Scenario};

fn main() -> Result<()> {
    glance::tracing::init();

    let run = CliArgs::parse().into_config().map_err(|e| anyhow!(e))?;

    let mut scenario = Scenario::load(&run.scenario)?;
    if let Some(path) = &run.config_override {
        scenario.config = Some(GlanceConfig::load_from(path)?);
    }

    let report = scenario::run(&scenario)?;
    tracing::info!(
        surfaces = report.surfaces.len(),
        redraws = report.redraws,
        "scenario replayed"
    );

    let output = match run.format {
        OutputFormat::Yaml => serde_yaml::to_string(&report)?,
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
    };
    println!("{}", output);

    Ok(())
}
