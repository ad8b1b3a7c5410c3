use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use std::process;

use structpath::job::{JobConfig, JobMetrics};

mod cli_bin;

use cli_bin::args::{Cli, Commands};
use cli_bin::commands::{get_command, join_command, validate_command};

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(cli) {
        error!("Unrecoverable error. Will exit. {:#}", e);
        process::exit(1);
    }
}

fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = JobConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let mut metrics = JobMetrics::new(config.metrics.job_name.clone());

    info!("Starting job {}", config.metrics.job_name);
    metrics.start_timer();

    let outcome = match cli.command {
        Commands::Get(args) => get_command(args),
        Commands::Join(args) => join_command(args),
        Commands::Validate(args) => validate_command(args),
    };
    metrics.record_outcome(&outcome);

    if config.metrics.enable {
        if let Err(e) = metrics.publish(&config.metrics) {
            warn!("Error when trying to publish metrics: {}", e);
        }
    }

    outcome.map(|_| ()).map_err(anyhow::Error::from)
}
