mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;
use colored::Colorize;

use depcheck_sonar_core::config::{DepcheckSonarConfig, GeneralConfig};

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

fn main() {
    let cli = Cli::parse();

    // --log-level beats env and file; validation happens in the command after its own overrides.
    let resolved = DepcheckSonarConfig::resolve(&cli.config).map(|mut config| {
        if let Some(level) = cli.log_level.clone() {
            config.general.log_level = level;
        }
        config
    });

    let general = match resolved {
        Ok(ref config) => config.general.clone(),
        Err(_) => GeneralConfig {
            log_level: cli.log_level.clone().unwrap_or_else(|| GeneralConfig::default().log_level),
            ..GeneralConfig::default()
        },
    };
    if let Err(e) = logging::init_tracing(&general) {
        eprintln!("{} {}", "warning:".yellow().bold(), e);
    }

    tracing::debug!(config = %cli.config.display(), "depcheck-sonar starting");

    let writer = OutputWriter::new(cli.output);
    let result = match cli.command {
        Commands::Convert(args) => resolved
            .map_err(CliError::from)
            .and_then(|config| commands::convert::execute(args, config, &writer)),
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}
