#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serde_json::{Value, json};

use depcheck_sonar_converter::ReportConverter;

/// 퍼저용 구조적 dependency-check 리포트 입력
#[derive(Arbitrary, Debug)]
struct FuzzReport {
    dependencies: Vec<FuzzDependency>,
}

#[derive(Arbitrary, Debug)]
struct FuzzDependency {
    package_id: Option<String>,
    included_by: Option<String>,
    vulnerabilities: Option<Vec<FuzzVulnerability>>,
}

#[derive(Arbitrary, Debug)]
struct FuzzVulnerability {
    source: String,
    name: String,
    description: String,
    severity: String,
    cvssv3: Option<f32>,
    cvssv2: Option<f32>,
    cwes: Vec<String>,
}

impl FuzzDependency {
    fn to_json(&self) -> Value {
        let mut dep = json!({ "fileName": "fuzz.jar" });
        if let Some(ref id) = self.package_id {
            dep["packages"] = json!([{ "id": id }]);
        }
        if let Some(ref reference) = self.included_by {
            dep["includedBy"] = json!([{ "reference": reference }]);
        }
        if let Some(ref vulns) = self.vulnerabilities {
            dep["vulnerabilities"] = vulns.iter().take(32).map(FuzzVulnerability::to_json).collect();
        }
        dep
    }
}

impl FuzzVulnerability {
    fn to_json(&self) -> Value {
        let mut vuln = json!({
            "source": self.source,
            "name": self.name,
            "description": self.description,
            "severity": self.severity,
            "cwes": self.cwes,
        });
        // NaN/Inf 는 JSON 숫자로 표현할 수 없으므로 제외
        if let Some(score) = self.cvssv3.filter(|s| s.is_finite()) {
            vuln["cvssv3"] = json!({ "baseScore": score });
        }
        if let Some(score) = self.cvssv2.filter(|s| s.is_finite()) {
            vuln["cvssv2"] = json!({ "score": score });
        }
        vuln
    }
}

fuzz_target!(|input: FuzzReport| {
    let dependencies: Vec<&FuzzDependency> = input.dependencies.iter().take(64).collect();
    let document = json!({
        "dependencies": dependencies.iter().map(|d| d.to_json()).collect::<Vec<_>>()
    });

    let expected: usize = dependencies
        .iter()
        .filter_map(|d| d.vulnerabilities.as_ref())
        .map(|v| v.len().min(32))
        .sum();

    // 필수 필드가 모두 있는 입력이므로 변환은 항상 성공해야 한다
    let report = ReportConverter::default()
        .convert_str(&document.to_string())
        .expect("well-formed report must convert");

    assert_eq!(report.rules.len(), 1);
    assert_eq!(report.issues.len(), expected);
});
