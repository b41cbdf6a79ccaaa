//! 리포트 변환기 통합 테스트
//!
//! 실제 dependency-check 출력 형태의 픽스처를 파일 단위로 변환하고
//! 결과 문서를 검증합니다.

use std::path::{Path, PathBuf};

use depcheck_sonar_converter::{
    ConverterConfigBuilder, ConverterError, ReportConverter, SonarSeverity, convert,
};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn read_json(path: &Path) -> serde_json::Value {
    let content = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn test_fixture_report_matches_expected_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("sonar-dependency-check-report.json");

    let summary = convert(fixture_path("dependency-check-report.json"), &output).unwrap();

    assert_eq!(
        read_json(&output),
        read_json(&fixture_path("sonar-dependency-check-report.json"))
    );

    assert_eq!(summary.dependencies, 4);
    assert_eq!(summary.vulnerable_dependencies, 3);
    assert_eq!(summary.issues, 4);
    // pkg:npm/lodash@4.17.20 는 Maven 좌표 형식이 아님
    assert_eq!(summary.malformed_coordinates, 1);
    assert_eq!(summary.severity_counts.critical, 1);
    assert_eq!(summary.severity_counts.major, 1);
    assert_eq!(summary.severity_counts.minor, 1);
    assert_eq!(summary.severity_counts.info, 1);
}

#[test]
fn test_output_is_compact_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("sonar.json");

    convert(fixture_path("dependency-check-report.json"), &output).unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(!content.contains('\n'));
    assert!(!content.contains("effortMinutes"));
}

#[test]
fn test_conversion_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");
    let input = fixture_path("dependency-check-report.json");

    convert(&input, &first).unwrap();
    convert(&input, &second).unwrap();

    assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
}

#[test]
fn test_rerun_overwrites_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("sonar.json");
    std::fs::write(&output, "stale content from a previous build").unwrap();

    convert(fixture_path("no-vulnerabilities-report.json"), &output).unwrap();

    let json = read_json(&output);
    assert_eq!(json["issues"], serde_json::json!([]));
}

#[test]
fn test_no_vulnerabilities_yields_single_rule_and_no_issues() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("sonar.json");

    let summary = convert(fixture_path("no-vulnerabilities-report.json"), &output).unwrap();

    let json = read_json(&output);
    let rules = json["rules"].as_array().unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0]["id"], "owasp1");
    assert_eq!(json["issues"], serde_json::json!([]));
    assert_eq!(summary.dependencies, 2);
    assert_eq!(summary.vulnerable_dependencies, 0);
    assert_eq!(summary.issues, 0);
}

#[test]
fn test_issue_count_equals_sum_of_vulnerability_arrays() {
    let input = std::fs::read_to_string(fixture_path("dependency-check-report.json")).unwrap();
    let document: serde_json::Value = serde_json::from_str(&input).unwrap();
    let expected: usize = document["dependencies"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|dep| dep.get("vulnerabilities").and_then(|v| v.as_array()))
        .map(Vec::len)
        .sum();

    let report = ReportConverter::default().convert_str(&input).unwrap();
    assert_eq!(report.issues.len(), expected);
}

#[test]
fn test_issues_follow_input_order() {
    let input = std::fs::read_to_string(fixture_path("dependency-check-report.json")).unwrap();
    let report = ReportConverter::default().convert_str(&input).unwrap();

    let rule_ids: Vec<&str> = report.issues.iter().map(|i| i.rule_id.as_str()).collect();
    assert_eq!(
        rule_ids,
        vec![
            "CVE-2021-0001",
            "CVE-2022-42889",
            "CVE-2099-0002",
            "GHSA-35jh-r3h4-6jhm"
        ]
    );
    assert_eq!(report.issues[1].severity, SonarSeverity::Critical);
    assert_eq!(report.issues[3].severity, SonarSeverity::Info);
}

#[test]
fn test_rule_singleton_for_any_issue_count() {
    let converter = ReportConverter::default();
    let vuln = r#"{"source":"NVD","name":"CVE-1","description":"d","severity":"HIGH"}"#;

    for count in [0usize, 1, 25] {
        let vulns = vec![vuln; count].join(",");
        let input = format!(r#"{{"dependencies":[{{"vulnerabilities":[{vulns}]}}]}}"#);
        let report = converter.convert_str(&input).unwrap();
        assert_eq!(report.rules.len(), 1);
        assert_eq!(report.issues.len(), count);
    }
}

#[test]
fn test_missing_input_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("sonar.json");

    let err = convert(dir.path().join("dependency-check-report.json"), &output).unwrap_err();

    assert!(matches!(err, ConverterError::InputNotFound { .. }));
    assert!(!output.exists());
}

#[test]
fn test_malformed_json_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.json");
    let output = dir.path().join("sonar.json");
    std::fs::write(&input, r#"{"dependencies": [ {"fileName": "a.jar""#).unwrap();

    let err = convert(&input, &output).unwrap_err();

    assert!(matches!(err, ConverterError::MalformedJson { .. }));
    assert!(!output.exists());
}

#[test]
fn test_non_object_root_is_not_a_clean_scan() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.json");
    let output = dir.path().join("sonar.json");
    std::fs::write(&output, "previous").unwrap();

    for (content, found) in [("null", "null"), ("[1, 2, 3]", "array"), ("\"report\"", "string")] {
        std::fs::write(&input, content).unwrap();

        let err = convert(&input, &output).unwrap_err();

        assert!(
            matches!(err, ConverterError::InvalidRoot { found: f } if f == found),
            "{content}: {err:?}"
        );
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous");
    }
}

#[cfg(unix)]
#[test]
fn test_symlinked_output_keeps_link_and_target_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let real = dir.path().join("published.json");
    let link = dir.path().join("sonar.json");
    std::fs::write(&real, "{}").unwrap();
    std::fs::set_permissions(&real, std::fs::Permissions::from_mode(0o644)).unwrap();
    std::os::unix::fs::symlink(&real, &link).unwrap();

    convert(fixture_path("dependency-check-report.json"), &link).unwrap();

    assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(
        std::fs::metadata(&real).unwrap().permissions().mode() & 0o777,
        0o644
    );
    assert_eq!(
        read_json(&real),
        read_json(&fixture_path("sonar-dependency-check-report.json"))
    );
}

#[test]
fn test_missing_required_field_aborts_without_partial_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.json");
    let output = dir.path().join("sonar.json");
    // 두 번째 취약점에 severity 누락
    std::fs::write(
        &input,
        r#"{"dependencies":[{"vulnerabilities":[
            {"source":"NVD","name":"CVE-1","description":"d","severity":"HIGH"},
            {"source":"NVD","name":"CVE-2","description":"d"}
        ]}]}"#,
    )
    .unwrap();

    let err = convert(&input, &output).unwrap_err();

    match err {
        ConverterError::MissingField {
            dependency,
            vulnerability,
            field,
        } => {
            assert_eq!(dependency, 0);
            assert_eq!(vulnerability, 1);
            assert_eq!(field, "severity");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!output.exists());
}

#[test]
fn test_unwritable_output_leaves_no_files_behind() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("missing-dir").join("sonar.json");

    let err = convert(fixture_path("dependency-check-report.json"), &output).unwrap_err();

    assert!(matches!(err, ConverterError::OutputUnwritable { .. }));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_successful_write_leaves_only_destination() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("sonar.json");

    convert(fixture_path("dependency-check-report.json"), &output).unwrap();

    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("sonar.json")]);
}

#[test]
fn test_configured_converter_runs_with_size_limit() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("sonar.json");

    let config = ConverterConfigBuilder::new()
        .owasp_report_file(fixture_path("dependency-check-report.json"))
        .sonar_report_file(&output)
        .max_file_size(64)
        .build()
        .unwrap();

    let err = ReportConverter::new(config).run().unwrap_err();
    assert!(matches!(err, ConverterError::FileTooBig { max: 64, .. }));
    assert!(!output.exists());
}
