//! `depcheck-sonar convert` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use depcheck_sonar_converter::{ConversionSummary, ConverterConfig, ReportConverter};
use depcheck_sonar_core::config::DepcheckSonarConfig;

use crate::cli::ConvertArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `convert` command.
///
/// `config` is the effective configuration (file + env overrides + defaults);
/// paths from `args` take precedence over it.
pub fn execute(
    args: ConvertArgs,
    mut config: DepcheckSonarConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    apply_overrides(&mut config, &args);
    config.validate()?;

    let converter_config = ConverterConfig::from_core(&config.report);
    converter_config.validate()?;

    info!(
        input = %converter_config.owasp_report_file.display(),
        output = %converter_config.sonar_report_file.display(),
        "starting conversion"
    );

    let summary = ReportConverter::new(converter_config).run()?;

    writer.render(&ConvertReport::from(summary))?;

    Ok(())
}

fn apply_overrides(config: &mut DepcheckSonarConfig, args: &ConvertArgs) {
    if let Some(ref path) = args.owasp_report_file {
        config.report.owasp_report_file = path.display().to_string();
    }
    if let Some(ref path) = args.sonar_report_file {
        config.report.sonar_report_file = path.display().to_string();
    }
}

/// Conversion result rendered to stdout.
#[derive(Serialize)]
pub struct ConvertReport {
    #[serde(flatten)]
    pub summary: ConversionSummary,
}

impl From<ConversionSummary> for ConvertReport {
    fn from(summary: ConversionSummary) -> Self {
        Self { summary }
    }
}

impl Render for ConvertReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        let s = &self.summary;
        writeln!(w, "Input:  {}", s.input.bold())?;
        writeln!(w, "Output: {}", s.output.bold())?;
        writeln!(
            w,
            "Dependencies: {} ({} with vulnerabilities)",
            s.dependencies, s.vulnerable_dependencies
        )?;

        let counts = &s.severity_counts;
        let issue_str = format!(
            "{} total (C:{} MA:{} MI:{} I:{})",
            s.issues, counts.critical, counts.major, counts.minor, counts.info
        );
        if s.issues > 0 {
            writeln!(w, "Issues: {}", issue_str.red().bold())?;
        } else {
            writeln!(w, "Issues: {}", issue_str.green().bold())?;
        }

        if s.malformed_coordinates > 0 {
            writeln!(
                w,
                "{}",
                format!(
                    "Skipped {} malformed package coordinate(s)",
                    s.malformed_coordinates
                )
                .yellow()
            )?;
        }

        Ok(())
    }
}
