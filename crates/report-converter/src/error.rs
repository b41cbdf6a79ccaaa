//! 리포트 변환기 에러 타입
//!
//! [`ConverterError`]는 변환 과정에서 발생할 수 있는 모든 에러를 나타냅니다.
//! `From<ConverterError> for DepcheckSonarError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 전파됩니다.
//!
//! # 에러 카테고리
//!
//! - **입력 읽기**: `InputNotFound`, `InputUnreadable`, `FileTooBig`
//! - **입력 구조**: `MalformedJson`, `InvalidRoot`, `MissingField`, `InvalidField`
//! - **좌표 파싱**: `MalformedCoordinate` (변환기 내부에서 경고로 강등됨)
//! - **출력 쓰기**: `Serialize`, `OutputUnwritable`
//! - **설정**: `Config`

use depcheck_sonar_core::error::{ConfigError, DepcheckSonarError, ReportError};

/// 리포트 변환기 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum ConverterError {
    /// 입력 리포트 파일이 존재하지 않음
    #[error("input report not found: {path}")]
    InputNotFound {
        /// 입력 파일 경로
        path: String,
    },

    /// 입력 리포트 파일 읽기 실패
    #[error("input report unreadable: {path}: {source}")]
    InputUnreadable {
        /// 입력 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 입력 파일 크기 초과
    #[error("file too large: {path}: {size} bytes (max: {max})")]
    FileTooBig {
        /// 파일 경로
        path: String,
        /// 실제 파일 크기 (바이트)
        size: usize,
        /// 최대 허용 크기 (바이트)
        max: usize,
    },

    /// 입력이 올바른 JSON이 아님
    #[error("malformed json: {path}: {reason}")]
    MalformedJson {
        /// 입력 파일 경로
        path: String,
        /// 파싱 실패 사유
        reason: String,
    },

    /// 최상위 값이 JSON 객체가 아님
    #[error("report root must be a JSON object, found {found}")]
    InvalidRoot {
        /// 실제 JSON 타입
        found: &'static str,
    },

    /// 취약점 항목의 필수 필드 누락
    #[error("missing required field '{field}' in dependencies[{dependency}].vulnerabilities[{vulnerability}]")]
    MissingField {
        /// `dependencies` 배열 인덱스
        dependency: usize,
        /// `vulnerabilities` 배열 인덱스
        vulnerability: usize,
        /// 누락된 필드명
        field: &'static str,
    },

    /// 필드가 존재하지만 JSON 타입이 맞지 않음
    ///
    /// `vulnerability`가 `None`이면 의존성 수준의 필드입니다.
    #[error("invalid field '{field}' in {}: expected {expected}", location(.dependency, .vulnerability))]
    InvalidField {
        /// `dependencies` 배열 인덱스
        dependency: usize,
        /// `vulnerabilities` 배열 인덱스
        vulnerability: Option<usize>,
        /// 필드명 (중첩 필드는 `cvssv3.baseScore` 형식)
        field: &'static str,
        /// 기대한 JSON 타입
        expected: &'static str,
    },

    /// Maven 좌표 참조 문자열 형식 오류
    #[error("malformed coordinate reference '{reference}': {reason}")]
    MalformedCoordinate {
        /// 원본 참조 문자열
        reference: String,
        /// 실패 사유
        reason: String,
    },

    /// 출력 리포트 직렬화 실패
    #[error("serialization error: {0}")]
    Serialize(String),

    /// 출력 리포트 쓰기 실패
    #[error("output report unwritable: {path}: {source}")]
    OutputUnwritable {
        /// 출력 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },
}

fn location(dependency: &usize, vulnerability: &Option<usize>) -> String {
    match vulnerability {
        Some(v) => format!("dependencies[{dependency}].vulnerabilities[{v}]"),
        None => format!("dependencies[{dependency}]"),
    }
}

impl From<ConverterError> for DepcheckSonarError {
    fn from(err: ConverterError) -> Self {
        let msg = err.to_string();
        match err {
            ConverterError::InputNotFound { .. }
            | ConverterError::InputUnreadable { .. }
            | ConverterError::FileTooBig { .. } => {
                DepcheckSonarError::Report(ReportError::ReadFailed(msg))
            }
            ConverterError::MalformedJson { .. }
            | ConverterError::InvalidRoot { .. }
            | ConverterError::MissingField { .. }
            | ConverterError::InvalidField { .. }
            | ConverterError::MalformedCoordinate { .. } => {
                DepcheckSonarError::Report(ReportError::Malformed(msg))
            }
            ConverterError::Serialize(_) | ConverterError::OutputUnwritable { .. } => {
                DepcheckSonarError::Report(ReportError::WriteFailed(msg))
            }
            ConverterError::Config { field, reason } => {
                DepcheckSonarError::Config(ConfigError::InvalidValue { field, reason })
            }
        }
    }
}
