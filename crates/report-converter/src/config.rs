//! 변환기 설정
//!
//! [`ConverterConfig`]는 core의 [`ReportConfig`](depcheck_sonar_core::config::ReportConfig)에서
//! 파생되며 입력/출력 경로와 입력 크기 제한을 담습니다.
//!
//! # 사용 예시
//!
//! ```
//! use depcheck_sonar_converter::ConverterConfigBuilder;
//!
//! let config = ConverterConfigBuilder::new()
//!     .owasp_report_file("build/dependency-check-report.json")
//!     .sonar_report_file("build/sonar-dependency-check-report.json")
//!     .build()
//!     .unwrap();
//! assert_eq!(config.max_file_size, 100 * 1024 * 1024);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use depcheck_sonar_core::config::{
    DEFAULT_MAX_FILE_SIZE, DEFAULT_OWASP_REPORT_FILE, DEFAULT_SONAR_REPORT_FILE, ReportConfig,
};

use crate::error::ConverterError;

/// 입력 리포트 최대 크기 상한 (1 GiB)
const MAX_FILE_SIZE_LIMIT: usize = 1024 * 1024 * 1024;

/// 변환기 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// dependency-check JSON 리포트 경로 (입력)
    pub owasp_report_file: PathBuf,
    /// Sonar generic issue 리포트 경로 (출력)
    pub sonar_report_file: PathBuf,
    /// 입력 리포트 최대 크기 (바이트)
    pub max_file_size: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            owasp_report_file: PathBuf::from(DEFAULT_OWASP_REPORT_FILE),
            sonar_report_file: PathBuf::from(DEFAULT_SONAR_REPORT_FILE),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl ConverterConfig {
    /// core의 `ReportConfig`에서 변환기 설정을 생성합니다.
    pub fn from_core(core: &ReportConfig) -> Self {
        Self {
            owasp_report_file: PathBuf::from(&core.owasp_report_file),
            sonar_report_file: PathBuf::from(&core.sonar_report_file),
            max_file_size: core.max_file_size,
        }
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - 두 경로 모두 비어 있으면 안 됨
    /// - 입력과 출력 경로가 같으면 안 됨
    /// - `max_file_size`: 1-1073741824 (1 GiB)
    pub fn validate(&self) -> Result<(), ConverterError> {
        if self.owasp_report_file.as_os_str().is_empty() {
            return Err(ConverterError::Config {
                field: "owasp_report_file".to_owned(),
                reason: "path must not be empty".to_owned(),
            });
        }

        if self.sonar_report_file.as_os_str().is_empty() {
            return Err(ConverterError::Config {
                field: "sonar_report_file".to_owned(),
                reason: "path must not be empty".to_owned(),
            });
        }

        if self.owasp_report_file == self.sonar_report_file {
            return Err(ConverterError::Config {
                field: "sonar_report_file".to_owned(),
                reason: "must differ from owasp_report_file".to_owned(),
            });
        }

        if self.max_file_size == 0 || self.max_file_size > MAX_FILE_SIZE_LIMIT {
            return Err(ConverterError::Config {
                field: "max_file_size".to_owned(),
                reason: format!("must be 1-{MAX_FILE_SIZE_LIMIT}"),
            });
        }

        Ok(())
    }
}

/// [`ConverterConfig`] 빌더
///
/// 빌드 시 유효성 검증을 수행합니다.
#[derive(Default)]
pub struct ConverterConfigBuilder {
    config: ConverterConfig,
}

impl ConverterConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 입력 리포트 경로를 설정합니다.
    pub fn owasp_report_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.owasp_report_file = path.into();
        self
    }

    /// 출력 리포트 경로를 설정합니다.
    pub fn sonar_report_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.sonar_report_file = path.into();
        self
    }

    /// 최대 입력 크기(바이트)를 설정합니다.
    pub fn max_file_size(mut self, size: usize) -> Self {
        self.config.max_file_size = size;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `ConverterError::Config` 반환
    pub fn build(self) -> Result<ConverterConfig, ConverterError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
