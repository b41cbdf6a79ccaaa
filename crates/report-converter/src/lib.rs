#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`error`]: 도메인 에러 타입 (`ConverterError`)
//! - [`config`]: 변환기 설정 (`ConverterConfig`, 빌더)
//! - [`coordinate`]: Maven 좌표 파싱 (`MavenCoordinate`)
//! - [`severity`]: 심각도 매핑 (`SonarSeverity`, `SeverityCounts`)
//! - [`types`]: 정규화된 취약점 레코드 (`Vulnerability`, `Cvss`)
//! - [`report`]: 입력 리포트 순회 및 취약점 추출
//! - [`sonar`]: Sonar generic issue 문서 (`SonarReport`, `Rule`, `Issue`)
//! - [`converter`]: 메인 변환기 (`ReportConverter`, `ConversionSummary`)
//!
//! # 아키텍처
//!
//! ```text
//! dependency-check-report.json
//!          |
//!    report::extract --> Vec<Vulnerability> --> Vec<Issue>
//!                                                  |
//!                         rule_catalog() --> SonarReport --> sonar report (atomic write)
//! ```

pub mod config;
pub mod converter;
pub mod coordinate;
pub mod error;
pub mod report;
pub mod severity;
pub mod sonar;
pub mod types;

// --- Public API Re-exports ---

// 변환기
pub use converter::{ConversionSummary, ReportConverter, convert};

// 설정
pub use config::{ConverterConfig, ConverterConfigBuilder};

// 에러
pub use error::ConverterError;

// 타입
pub use coordinate::MavenCoordinate;
pub use severity::{SeverityCounts, SonarSeverity};
pub use types::{Cvss, CvssVersion, MANIFEST_FILE_NAME, Vulnerability};

// Sonar 문서
pub use sonar::{Issue, Location, Rule, SonarReport, rule_catalog};
