//! 설정 관리 -- depcheck-sonar.toml 파싱 및 런타임 설정
//!
//! [`DepcheckSonarConfig`]는 CLI와 변환기가 공유하는 최상위 설정 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`DEPCHECK_SONAR_REPORT_OWASP_REPORT_FILE=...` 형식)
//! 3. 설정 파일 (`depcheck-sonar.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # fn example() -> Result<(), depcheck_sonar_core::error::DepcheckSonarError> {
//! use depcheck_sonar_core::config::DepcheckSonarConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = DepcheckSonarConfig::load("depcheck-sonar.toml")?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = DepcheckSonarConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, DepcheckSonarError};

/// 입력 리포트 기본 경로 (dependency-check-maven 기본 출력 위치)
pub const DEFAULT_OWASP_REPORT_FILE: &str = "target/dependency-check-report.json";

/// 출력 리포트 기본 경로
pub const DEFAULT_SONAR_REPORT_FILE: &str = "target/sonar-dependency-check-report.json";

/// 입력 리포트 기본 최대 크기 (100 MiB)
pub const DEFAULT_MAX_FILE_SIZE: usize = 100 * 1024 * 1024;

/// 입력 리포트 최대 크기 상한 (1 GiB)
const MAX_FILE_SIZE_LIMIT: usize = 1024 * 1024 * 1024;

/// depcheck-sonar 통합 설정
///
/// `depcheck-sonar.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepcheckSonarConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 리포트 경로 설정
    #[serde(default)]
    pub report: ReportConfig,
}

impl DepcheckSonarConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DepcheckSonarError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일이 없으면 기본값에 환경변수 오버라이드만 적용합니다.
    ///
    /// 빌드 단계에서 설정 파일 없이 실행하는 경우를 위한 진입점입니다.
    /// 파일이 존재하지만 파싱에 실패하면 에러를 반환합니다.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, DepcheckSonarError> {
        let config = Self::resolve(path)?;
        config.validate()?;
        Ok(config)
    }

    /// 파일(없으면 기본값)과 환경변수를 합친 설정을 반환합니다. 검증하지 않습니다.
    ///
    /// 호출자가 CLI 인자를 덮어쓴 뒤 [`validate`](Self::validate)를 직접 호출해야 합니다.
    pub fn resolve(path: impl AsRef<Path>) -> Result<Self, DepcheckSonarError> {
        let mut config = match Self::from_file(path) {
            Err(DepcheckSonarError::Config(ConfigError::FileNotFound { .. })) => Self::default(),
            other => other?,
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DepcheckSonarError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DepcheckSonarError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                DepcheckSonarError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, DepcheckSonarError> {
        toml::from_str(toml_str).map_err(|e| {
            DepcheckSonarError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `DEPCHECK_SONAR_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "DEPCHECK_SONAR_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "DEPCHECK_SONAR_GENERAL_LOG_FORMAT");

        // Report
        override_string(
            &mut self.report.owasp_report_file,
            "DEPCHECK_SONAR_REPORT_OWASP_REPORT_FILE",
        );
        override_string(
            &mut self.report.sonar_report_file,
            "DEPCHECK_SONAR_REPORT_SONAR_REPORT_FILE",
        );
        override_usize(
            &mut self.report.max_file_size,
            "DEPCHECK_SONAR_REPORT_MAX_FILE_SIZE",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), DepcheckSonarError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.report.owasp_report_file.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "report.owasp_report_file".to_owned(),
                reason: "path must not be empty".to_owned(),
            }
            .into());
        }

        if self.report.sonar_report_file.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "report.sonar_report_file".to_owned(),
                reason: "path must not be empty".to_owned(),
            }
            .into());
        }

        // 입력 파일을 덮어쓰지 않도록 경로가 같으면 거부
        if self.report.owasp_report_file == self.report.sonar_report_file {
            return Err(ConfigError::InvalidValue {
                field: "report.sonar_report_file".to_owned(),
                reason: "must differ from report.owasp_report_file".to_owned(),
            }
            .into());
        }

        if self.report.max_file_size == 0 || self.report.max_file_size > MAX_FILE_SIZE_LIMIT {
            return Err(ConfigError::InvalidValue {
                field: "report.max_file_size".to_owned(),
                reason: format!("must be 1-{MAX_FILE_SIZE_LIMIT}"),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 리포트 경로 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// OWASP dependency-check JSON 리포트 경로 (입력)
    pub owasp_report_file: String,
    /// Sonar generic issue 리포트 경로 (출력)
    pub sonar_report_file: String,
    /// 입력 리포트 최대 크기 (바이트)
    pub max_file_size: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            owasp_report_file: DEFAULT_OWASP_REPORT_FILE.to_owned(),
            sonar_report_file: DEFAULT_SONAR_REPORT_FILE.to_owned(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}
