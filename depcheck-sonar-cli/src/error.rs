//! CLI-specific error types and exit code mapping

use depcheck_sonar_converter::ConverterError;
use depcheck_sonar_core::error::DepcheckSonarError;

/// CLI-specific error type.
///
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// Report conversion failed.
    #[error("conversion failed: {0}")]
    Convert(#[from] ConverterError),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from depcheck-sonar-core.
    #[error("{0}")]
    Core(#[from] DepcheckSonarError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                  |
    /// |------|------------------------------------------|
    /// | 0    | Success                                  |
    /// | 1    | General / command error                  |
    /// | 2    | Configuration error                      |
    /// | 3    | Input report missing, unreadable or malformed |
    /// | 4    | Output report could not be written       |
    /// | 10   | IO error                                 |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Core(DepcheckSonarError::Config(_)) => 2,
            Self::Convert(ConverterError::Config { .. }) => 2,
            Self::Convert(ConverterError::Serialize(_) | ConverterError::OutputUnwritable { .. }) => 4,
            Self::Convert(_) => 3,
            Self::Io(_) | Self::Core(DepcheckSonarError::Io(_)) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Core(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depcheck_sonar_core::error::ConfigError;

    #[test]
    fn test_exit_code_config_error() {
        let err = CliError::Config("test error".to_owned());
        assert_eq!(err.exit_code(), 2, "config error should return exit code 2");
    }

    #[test]
    fn test_exit_code_core_config_error() {
        let err = CliError::Core(DepcheckSonarError::Config(ConfigError::ParseFailed {
            reason: "expected '='".to_owned(),
        }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_input_errors() {
        let err = CliError::Convert(ConverterError::InputNotFound {
            path: "target/dependency-check-report.json".to_owned(),
        });
        assert_eq!(err.exit_code(), 3, "missing input should return exit code 3");

        let err = CliError::Convert(ConverterError::MissingField {
            dependency: 0,
            vulnerability: 0,
            field: "name",
        });
        assert_eq!(err.exit_code(), 3, "malformed input should return exit code 3");
    }

    #[test]
    fn test_exit_code_output_error() {
        let err = CliError::Convert(ConverterError::OutputUnwritable {
            path: "/readonly/sonar.json".to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        });
        assert_eq!(err.exit_code(), 4, "unwritable output should return exit code 4");
    }

    #[test]
    fn test_exit_code_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed");
        let err = CliError::Io(io_err);
        assert_eq!(err.exit_code(), 10, "io error should return exit code 10");
    }

    #[test]
    fn test_exit_code_command_error() {
        let err = CliError::Command("unknown section".to_owned());
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_error_display_convert() {
        let err = CliError::Convert(ConverterError::InputNotFound {
            path: "missing.json".to_owned(),
        });
        let display_str = err.to_string();
        assert!(display_str.contains("conversion failed"));
        assert!(display_str.contains("missing.json"));
    }

    #[test]
    fn test_from_core_error() {
        let core_err = DepcheckSonarError::Config(ConfigError::FileNotFound {
            path: "depcheck-sonar.toml".to_owned(),
        });
        let cli_err: CliError = core_err.into();
        assert!(matches!(cli_err, CliError::Core(_)));
    }
}
