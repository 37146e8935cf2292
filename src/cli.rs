//! Command-line argument parsing for the scenario runner
//!
//! Supports:
//! - Replaying a scenario file against the in-memory host
//! - Overriding the scenario's settings with a config file
//! - YAML (default) or JSON output

use clap::Parser;
use std::path::PathBuf;

/// Replay editor sessions and report where overview panels end up
#[derive(Parser, Debug)]
#[command(name = "glance", version, about = "Replay overview panel scenarios")]
pub struct CliArgs {
    /// Scenario file to replay
    #[arg(value_name = "SCENARIO")]
    pub scenario: PathBuf,

    /// Settings file to use instead of the scenario's own settings
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
}

/// What the runner should do, derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub scenario: PathBuf,
    pub config_override: Option<PathBuf>,
    pub format: OutputFormat,
}

impl CliArgs {
    /// Convert parsed CLI args into a run configuration
    pub fn into_config(self) -> Result<RunConfig, String> {
        if self.scenario.is_dir() {
            return Err(format!(
                "{} is a directory, expected a scenario file",
                self.scenario.display()
            ));
        }

        Ok(RunConfig {
            scenario: self.scenario,
            config_override: self.config,
            format: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Yaml
            },
        })
    }
}
