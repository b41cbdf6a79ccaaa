//! 도메인 타입 -- 변환 중간 표현
//!
//! 입력 리포트의 취약점 하나가 [`Vulnerability`] 하나로 정규화되고,
//! 이후 [`crate::sonar::Issue`]로 직렬화됩니다.

use serde::Serialize;

use crate::coordinate::MavenCoordinate;
use crate::severity::SonarSeverity;

/// 모든 이슈에 기록되는 합성 파일 위치
///
/// dependency-check는 소스 파일 단위 위치를 보고하지 않으므로
/// 프로젝트 매니페스트를 대표 위치로 사용합니다.
pub const MANIFEST_FILE_NAME: &str = "pom.xml";

/// CVSS 버전 태그
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CvssVersion {
    /// CVSS v3 (`cvssv3.baseScore`)
    Cvssv3,
    /// CVSS v2 (`cvssv2.score`)
    Cvssv2,
}

/// CVSS 점수
///
/// 점수는 입력 JSON 숫자의 텍스트 표현을 그대로 보존합니다 (`7.5` → `"7.5"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cvss {
    pub version: CvssVersion,
    pub score: String,
}

/// 정규화된 취약점 레코드
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vulnerability {
    /// 취약점을 보고한 dependency-check 분석 엔진 (`source`)
    pub engine_id: String,
    /// 규칙/CVE 식별자 (`name`)
    pub rule_id: String,
    /// 설명
    pub description: String,
    /// dependency-check 원본 심각도 (`severity`)
    pub owasp_severity: String,
    /// 매핑된 Sonar 심각도
    pub sonar_severity: SonarSeverity,
    pub cvss: Option<Cvss>,
    /// CWE 식별자 (입력 순서 유지)
    pub cwes: Vec<String>,
    /// 합성 파일 위치
    pub file_name: String,
    /// 취약한 패키지 자체의 좌표
    pub package_coordinate: Option<MavenCoordinate>,
    /// 이 패키지를 전이적으로 포함시킨 의존성의 좌표
    pub included_by_coordinate: Option<MavenCoordinate>,
}
