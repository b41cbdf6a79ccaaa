//! Sonar generic issue 리포트 생성
//!
//! SonarQube/SonarCloud의 [generic issue import](https://docs.sonarsource.com/sonarcloud/enriching/generic-issue-data/)
//! 형식에 따른 JSON 문서를 생성합니다. 규칙 목록에는 dependency-check 취약점용
//! 고정 규칙 하나만 포함됩니다.

use serde::Serialize;

use crate::coordinate::MavenCoordinate;
use crate::error::ConverterError;
use crate::severity::SonarSeverity;
use crate::types::{Cvss, Vulnerability};

/// 고정 규칙 ID
pub const RULE_ID: &str = "owasp1";
/// 고정 규칙 이름
pub const RULE_NAME: &str = "OWASP dependency vulnerability";
/// 고정 규칙 설명
pub const RULE_DESCRIPTION: &str = "Vulnerabilities found by OWASP dependency check Maven plugin.";
/// 규칙을 정의한 엔진
pub const RULE_ENGINE_ID: &str = "dependency-check-maven";

/// Sonar generic issue 리포트 루트
#[derive(Debug, Clone, Serialize)]
pub struct SonarReport {
    pub rules: Vec<Rule>,
    pub issues: Vec<Issue>,
}

impl SonarReport {
    /// 고정 규칙 목록과 이슈 목록으로 리포트를 구성합니다.
    pub fn new(issues: Vec<Issue>) -> Self {
        Self {
            rules: rule_catalog(),
            issues,
        }
    }

    /// 컴팩트 JSON으로 직렬화합니다.
    ///
    /// 필드 순서는 구조체 선언 순서로 고정되므로 같은 입력은 항상 같은 바이트를 냅니다.
    pub fn to_json(&self) -> Result<String, ConverterError> {
        serde_json::to_string(self)
            .map_err(|e| ConverterError::Serialize(format!("sonar report serialization failed: {e}")))
    }
}

/// 규칙 정의
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub name: String,
    pub description: String,
    pub engine_id: String,
    pub clean_code_attribute: String,
    pub impacts: Vec<Impact>,
}

/// 규칙의 소프트웨어 품질 영향
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Impact {
    pub software_quality: String,
    pub severity: String,
}

/// dependency-check 취약점 규칙 목록을 반환합니다.
///
/// 호출할 때마다 새 값을 만들며 공유 상태를 갖지 않습니다.
pub fn rule_catalog() -> Vec<Rule> {
    vec![Rule {
        id: RULE_ID.to_owned(),
        name: RULE_NAME.to_owned(),
        description: RULE_DESCRIPTION.to_owned(),
        engine_id: RULE_ENGINE_ID.to_owned(),
        clean_code_attribute: "TRUSTWORTHY".to_owned(),
        impacts: vec![Impact {
            software_quality: "SECURITY".to_owned(),
            severity: "MEDIUM".to_owned(),
        }],
    }]
}

/// 이슈 하나
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub engine_id: String,
    pub rule_id: String,
    pub severity: SonarSeverity,
    pub owasp_severity: String,
    pub primary_location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvss: Option<Cvss>,
    pub cwes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_coordinate: Option<MavenCoordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included_by_coordinate: Option<MavenCoordinate>,
}

/// 이슈 위치
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// 이슈 메시지 (취약점 설명)
    pub message: String,
    pub file_path: String,
}

impl From<Vulnerability> for Issue {
    fn from(vuln: Vulnerability) -> Self {
        Self {
            engine_id: vuln.engine_id,
            rule_id: vuln.rule_id,
            severity: vuln.sonar_severity,
            owasp_severity: vuln.owasp_severity,
            primary_location: Location {
                message: vuln.description,
                file_path: vuln.file_name,
            },
            cvss: vuln.cvss,
            cwes: vuln.cwes,
            package_coordinate: vuln.package_coordinate,
            included_by_coordinate: vuln.included_by_coordinate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CvssVersion, MANIFEST_FILE_NAME};

    fn sample_vulnerability() -> Vulnerability {
        Vulnerability {
            engine_id: "ossindex".to_owned(),
            rule_id: "CVE-2021-0001".to_owned(),
            description: "desc".to_owned(),
            owasp_severity: "HIGH".to_owned(),
            sonar_severity: SonarSeverity::Major,
            cvss: Some(Cvss {
                version: CvssVersion::Cvssv3,
                score: "7.5".to_owned(),
            }),
            cwes: vec!["CWE-79".to_owned()],
            file_name: MANIFEST_FILE_NAME.to_owned(),
            package_coordinate: Some(MavenCoordinate::new("groupX", "artifactY", "1.0.0")),
            included_by_coordinate: None,
        }
    }

    #[test]
    fn rule_catalog_has_single_owasp_rule() {
        let rules = rule_catalog();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id, "owasp1");
        assert_eq!(rules[0].engine_id, "dependency-check-maven");
        assert_eq!(rules[0].impacts.len(), 1);
    }

    #[test]
    fn rule_catalog_is_stable_across_calls() {
        assert_eq!(rule_catalog(), rule_catalog());
    }

    #[test]
    fn rule_serializes_camel_case() {
        let json = serde_json::to_value(&rule_catalog()[0]).unwrap();
        assert_eq!(json["cleanCodeAttribute"], "TRUSTWORTHY");
        assert_eq!(json["engineId"], "dependency-check-maven");
        assert_eq!(json["impacts"][0]["softwareQuality"], "SECURITY");
        assert_eq!(json["impacts"][0]["severity"], "MEDIUM");
    }

    #[test]
    fn issue_from_vulnerability_maps_fields() {
        let issue = Issue::from(sample_vulnerability());
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["engineId"], "ossindex");
        assert_eq!(json["ruleId"], "CVE-2021-0001");
        assert_eq!(json["severity"], "MAJOR");
        assert_eq!(json["owaspSeverity"], "HIGH");
        assert_eq!(json["primaryLocation"]["message"], "desc");
        assert_eq!(json["primaryLocation"]["filePath"], "pom.xml");
        assert_eq!(json["cvss"]["version"], "cvssv3");
        assert_eq!(json["cvss"]["score"], "7.5");
        assert_eq!(json["cwes"][0], "CWE-79");
        assert_eq!(json["packageCoordinate"], "groupX:artifactY:1.0.0");
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let vuln = Vulnerability {
            cvss: None,
            cwes: vec![],
            package_coordinate: None,
            ..sample_vulnerability()
        };
        let json = serde_json::to_value(Issue::from(vuln)).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("cvss"));
        assert!(!obj.contains_key("packageCoordinate"));
        assert!(!obj.contains_key("includedByCoordinate"));
        assert!(!obj.contains_key("effortMinutes"));
        // cwes는 비어 있어도 항상 기록
        assert_eq!(json["cwes"], serde_json::json!([]));
    }

    #[test]
    fn empty_report_still_has_rule() {
        let report = SonarReport::new(vec![]);
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["rules"].as_array().unwrap().len(), 1);
        assert_eq!(json["issues"], serde_json::json!([]));
    }

    #[test]
    fn to_json_is_compact() {
        let report = SonarReport::new(vec![Issue::from(sample_vulnerability())]);
        let content = report.to_json().unwrap();
        assert!(!content.contains('\n'));
        assert!(content.starts_with(r#"{"rules":[{"id":"owasp1""#));
    }
}
