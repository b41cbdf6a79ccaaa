//! dependency-check JSON 리포트 탐색
//!
//! 입력 문서를 [`serde_json::Value`]로 읽은 뒤 `dependencies` 배열을 순회하며
//! 취약점마다 [`Vulnerability`]를 만듭니다. 타입 기반 역직렬화 대신 값 탐색을
//! 사용하는 이유는 필수 필드 누락 시 몇 번째 의존성/취약점인지 에러에 담기
//! 위해서입니다.
//!
//! # 입력 형식 예시
//!
//! ```json
//! {
//!   "dependencies": [
//!     {
//!       "fileName": "commons-text-1.9.jar",
//!       "packages": [ { "id": "pkg:maven/org.apache.commons/commons-text@1.9" } ],
//!       "includedBy": [ { "reference": "pkg:maven/com.example/app@1.0.0" } ],
//!       "vulnerabilities": [
//!         {
//!           "source": "NVD",
//!           "name": "CVE-2022-42889",
//!           "description": "...",
//!           "severity": "CRITICAL",
//!           "cvssv3": { "baseScore": 9.8 },
//!           "cwes": [ "CWE-94" ]
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::coordinate::MavenCoordinate;
use crate::error::ConverterError;
use crate::severity::SonarSeverity;
use crate::types::{Cvss, CvssVersion, MANIFEST_FILE_NAME, Vulnerability};

/// 리포트 탐색 결과
#[derive(Debug, Default)]
pub struct Extraction {
    /// 입력 순서대로 정규화된 취약점
    pub vulnerabilities: Vec<Vulnerability>,
    /// 순회한 의존성 수
    pub dependencies: usize,
    /// `vulnerabilities` 키를 가진 의존성 수
    pub vulnerable_dependencies: usize,
    /// 형식 오류로 버려진 좌표 수
    pub malformed_coordinates: usize,
}

/// 리포트 문서에서 모든 취약점을 추출합니다.
///
/// 최상위 값은 객체여야 합니다. `dependencies`가 없거나 배열이 아니면
/// 빈 결과를 반환합니다 (에러 아님).
pub fn extract(document: &Value) -> Result<Extraction, ConverterError> {
    let mut extraction = Extraction::default();

    let root = document.as_object().ok_or(ConverterError::InvalidRoot {
        found: json_type(document),
    })?;

    let Some(dependencies) = root.get("dependencies").and_then(Value::as_array) else {
        debug!("report has no dependencies array, nothing to convert");
        return Ok(extraction);
    };

    for (dep_index, dependency) in dependencies.iter().enumerate() {
        extraction.dependencies += 1;

        let dependency = dependency.as_object().ok_or(ConverterError::InvalidField {
            dependency: dep_index,
            vulnerability: None,
            field: "dependencies[]",
            expected: "object",
        })?;

        let Some(vulnerabilities) = dependency.get("vulnerabilities") else {
            continue;
        };
        let vulnerabilities = vulnerabilities
            .as_array()
            .ok_or(ConverterError::InvalidField {
                dependency: dep_index,
                vulnerability: None,
                field: "vulnerabilities",
                expected: "array",
            })?;

        extraction.vulnerable_dependencies += 1;

        let package_coordinate = coordinate_of(
            dependency,
            "packages",
            "id",
            &mut extraction.malformed_coordinates,
        );
        let included_by_coordinate = coordinate_of(
            dependency,
            "includedBy",
            "reference",
            &mut extraction.malformed_coordinates,
        );

        let file_name = dependency
            .get("fileName")
            .and_then(Value::as_str)
            .unwrap_or("-");
        debug!(
            dependency = dep_index,
            file_name,
            vulnerabilities = vulnerabilities.len(),
            "extracting vulnerabilities"
        );

        for (vuln_index, vulnerability) in vulnerabilities.iter().enumerate() {
            let ctx = Context {
                dependency: dep_index,
                vulnerability: vuln_index,
            };
            let vulnerability = vulnerability.as_object().ok_or(ConverterError::InvalidField {
                dependency: dep_index,
                vulnerability: Some(vuln_index),
                field: "vulnerabilities[]",
                expected: "object",
            })?;

            extraction.vulnerabilities.push(build_vulnerability(
                ctx,
                vulnerability,
                &package_coordinate,
                &included_by_coordinate,
            )?);
        }
    }

    Ok(extraction)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// 에러 위치 정보
#[derive(Clone, Copy)]
struct Context {
    dependency: usize,
    vulnerability: usize,
}

impl Context {
    fn missing(self, field: &'static str) -> ConverterError {
        ConverterError::MissingField {
            dependency: self.dependency,
            vulnerability: self.vulnerability,
            field,
        }
    }

    fn invalid(self, field: &'static str, expected: &'static str) -> ConverterError {
        ConverterError::InvalidField {
            dependency: self.dependency,
            vulnerability: Some(self.vulnerability),
            field,
            expected,
        }
    }
}

fn build_vulnerability(
    ctx: Context,
    vulnerability: &Map<String, Value>,
    package_coordinate: &Option<MavenCoordinate>,
    included_by_coordinate: &Option<MavenCoordinate>,
) -> Result<Vulnerability, ConverterError> {
    let engine_id = required_str(ctx, vulnerability, "source")?;
    let description = required_str(ctx, vulnerability, "description")?;
    let rule_id = required_str(ctx, vulnerability, "name")?;
    let owasp_severity = required_str(ctx, vulnerability, "severity")?;

    Ok(Vulnerability {
        engine_id: engine_id.to_owned(),
        rule_id: rule_id.to_owned(),
        description: description.to_owned(),
        owasp_severity: owasp_severity.to_owned(),
        sonar_severity: SonarSeverity::from_owasp(owasp_severity),
        cvss: cvss_of(ctx, vulnerability)?,
        cwes: cwes_of(ctx, vulnerability)?,
        file_name: MANIFEST_FILE_NAME.to_owned(),
        package_coordinate: package_coordinate.clone(),
        included_by_coordinate: included_by_coordinate.clone(),
    })
}

fn required_str<'a>(
    ctx: Context,
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, ConverterError> {
    object
        .get(field)
        .ok_or_else(|| ctx.missing(field))?
        .as_str()
        .ok_or_else(|| ctx.invalid(field, "string"))
}

/// `cvssv3`가 있으면 우선, 없으면 `cvssv2`, 둘 다 없으면 `None`
fn cvss_of(ctx: Context, vulnerability: &Map<String, Value>) -> Result<Option<Cvss>, ConverterError> {
    if let Some(v3) = vulnerability.get("cvssv3") {
        let score = v3
            .get("baseScore")
            .and_then(Value::as_number)
            .ok_or_else(|| ctx.invalid("cvssv3.baseScore", "number"))?;
        return Ok(Some(Cvss {
            version: CvssVersion::Cvssv3,
            score: score.to_string(),
        }));
    }

    if let Some(v2) = vulnerability.get("cvssv2") {
        let score = v2
            .get("score")
            .and_then(Value::as_number)
            .ok_or_else(|| ctx.invalid("cvssv2.score", "number"))?;
        return Ok(Some(Cvss {
            version: CvssVersion::Cvssv2,
            score: score.to_string(),
        }));
    }

    Ok(None)
}

/// 문자열 원소는 값 그대로, 그 외 원소는 컴팩트 JSON 텍스트로 변환
fn cwes_of(ctx: Context, vulnerability: &Map<String, Value>) -> Result<Vec<String>, ConverterError> {
    let Some(cwes) = vulnerability.get("cwes") else {
        return Ok(Vec::new());
    };

    let cwes = cwes.as_array().ok_or_else(|| ctx.invalid("cwes", "array"))?;
    Ok(cwes
        .iter()
        .map(|cwe| match cwe {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect())
}

/// `dependency[array_key][0][ref_key]`에서 좌표를 추출합니다.
///
/// 배열 키가 없으면 `None`. 배열이 비었거나 참조 문자열이 없거나 형식이
/// 잘못된 경우에도 변환 전체를 실패시키지 않고 경고 후 `None`을 반환합니다.
fn coordinate_of(
    dependency: &Map<String, Value>,
    array_key: &'static str,
    ref_key: &'static str,
    malformed: &mut usize,
) -> Option<MavenCoordinate> {
    let entries = dependency.get(array_key)?;

    let Some(reference) = entries
        .as_array()
        .and_then(|arr| arr.first())
        .and_then(|first| first.get(ref_key))
        .and_then(Value::as_str)
    else {
        *malformed += 1;
        warn!(
            field = array_key,
            "no usable '{ref_key}' in first entry, coordinate omitted"
        );
        return None;
    };

    match MavenCoordinate::parse_reference(reference) {
        Ok(coordinate) => Some(coordinate),
        Err(e) => {
            *malformed += 1;
            warn!(field = array_key, error = %e, "coordinate omitted");
            None
        }
    }
}
