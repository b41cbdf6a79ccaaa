//! CLI argument parsing using clap derive API
//!
//! Purely declarative: no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// depcheck-sonar -- convert OWASP dependency-check reports into
/// Sonar generic issue reports.
///
/// Use `depcheck-sonar <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "depcheck-sonar", version, about, long_about = None)]
pub struct Cli {
    /// Path to the depcheck-sonar.toml configuration file.
    #[arg(short, long, default_value = "depcheck-sonar.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a dependency-check JSON report into a Sonar issue report.
    Convert(ConvertArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- convert ----

/// Convert a dependency-check report.
///
/// Paths given here take precedence over environment variables and the
/// configuration file.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// dependency-check JSON report to read.
    #[arg(long)]
    pub owasp_report_file: Option<PathBuf>,

    /// Sonar generic issue report to write.
    #[arg(long)]
    pub sonar_report_file: Option<PathBuf>,
}

// ---- config ----

/// Manage depcheck-sonar configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, report).
        #[arg(long)]
        section: Option<String>,
    },
}
