//! 에러 타입 -- 도메인별 에러 정의

/// depcheck-sonar 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum DepcheckSonarError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 리포트 변환 에러
    #[error("report error: {0}")]
    Report(#[from] ReportError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 리포트 변환 에러
///
/// 변환기 크레이트의 상세 에러가 이 분류로 축약됩니다.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// 입력 리포트 읽기 실패 (없음, 권한, 크기 초과)
    #[error("failed to read report: {0}")]
    ReadFailed(String),

    /// 입력 리포트 구조 오류 (JSON 문법, 필수 필드 누락)
    #[error("malformed report: {0}")]
    Malformed(String),

    /// 출력 리포트 쓰기 실패
    #[error("failed to write report: {0}")]
    WriteFailed(String),
}
