//! 심각도 매핑 -- dependency-check 심각도 → Sonar 심각도
//!
//! | dependency-check | Sonar      |
//! |------------------|------------|
//! | `CRITICAL`       | `CRITICAL` |
//! | `HIGH`           | `MAJOR`    |
//! | `MEDIUM`         | `MINOR`    |
//! | `Low`            | `MINOR`    |
//! | 그 외 (`LOW` 포함) | `INFO`     |
//!
//! 대소문자를 구분합니다. `Low`만 `MINOR`로, `LOW`는 `INFO`로 매핑되는 것은
//! 기존 Sonar 리포트 소비자와의 호환을 위해 유지합니다.

use std::fmt;

use serde::Serialize;

/// Sonar generic issue 심각도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SonarSeverity {
    /// 치명적
    Critical,
    /// 주요
    Major,
    /// 경미
    Minor,
    /// 정보
    Info,
}

impl SonarSeverity {
    /// dependency-check 심각도 문자열을 Sonar 심각도로 변환합니다.
    pub fn from_owasp(severity: &str) -> Self {
        match severity {
            "CRITICAL" => Self::Critical,
            "HIGH" => Self::Major,
            "MEDIUM" | "Low" => Self::Minor,
            _ => Self::Info,
        }
    }

    /// Sonar 리포트에 기록되는 문자열 표현을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Major => "MAJOR",
            Self::Minor => "MINOR",
            Self::Info => "INFO",
        }
    }
}

impl fmt::Display for SonarSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sonar 심각도별 이슈 수
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub major: usize,
    pub minor: usize,
    pub info: usize,
}

impl SeverityCounts {
    /// 심각도 하나를 집계에 더합니다.
    pub fn record(&mut self, severity: SonarSeverity) {
        match severity {
            SonarSeverity::Critical => self.critical += 1,
            SonarSeverity::Major => self.major += 1,
            SonarSeverity::Minor => self.minor += 1,
            SonarSeverity::Info => self.info += 1,
        }
    }

    /// 전체 이슈 수
    pub fn total(&self) -> usize {
        self.critical + self.major + self.minor + self.info
    }
}
