use anyhow::Context;
use clap::Parser;
use env_logger::Builder;
use log::{LevelFilter, info};
use std::path::PathBuf;

use crate::config::PlotConfig;

mod analyzer;
mod chart;
mod config;

/// Plot the test-loss curves of several experiment runs into one chart.
///
/// Without arguments the built-in experiment layout is used.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML file overriding the built-in plot configuration.
    #[arg(short, long, value_name = "FILE", conflicts_with = "workspace")]
    config: Option<PathBuf>,

    /// Workspace root holding the experiment directories.
    #[arg(short, long, value_name = "DIR")]
    workspace: Option<PathBuf>,

    /// Image file to write instead of the configured output.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl Args {
    fn plot_config(&self) -> anyhow::Result<PlotConfig> {
        let mut config = match (&self.config, &self.workspace) {
            (Some(path), _) => PlotConfig::load(path)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("Invalid configuration: {}", path.display()))?,
            (None, Some(workspace)) => PlotConfig::with_workspace(workspace),
            (None, None) => PlotConfig::default(),
        };
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    // Logging setup
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some("loss_plotter"), LevelFilter::Debug)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let config = args.plot_config()?;
    info!("Plotting {} runs into {}", config.inputs.len(), config.output.display());

    chart::plot_loss_curves(&config)
}
