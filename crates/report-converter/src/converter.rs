//! 메인 변환기 -- 리포트 읽기, 변환, 원자적 쓰기
//!
//! [`ReportConverter`]는 불변 설정만 보유하므로 `Send + Sync`이며,
//! 서로 다른 경로에 대한 변환은 독립적으로 병렬 실행할 수 있습니다.
//!
//! # 처리 흐름
//!
//! ```text
//! owasp_report_file --read/size check--> serde_json::Value
//!        |
//!   report::extract --> Vec<Vulnerability> --> Vec<Issue>
//!        |
//!   SonarReport { rules: rule_catalog(), issues } --to_json--> String
//!        |
//!   NamedTempFile (same dir) --persist--> sonar_report_file
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ConverterConfig;
use crate::error::ConverterError;
use crate::report;
use crate::severity::SeverityCounts;
use crate::sonar::{Issue, SonarReport};

/// 변환 결과 요약
#[derive(Debug, Clone, Serialize)]
pub struct ConversionSummary {
    /// 입력 리포트 경로
    pub input: String,
    /// 출력 리포트 경로
    pub output: String,
    /// 순회한 의존성 수
    pub dependencies: usize,
    /// 취약점 목록을 가진 의존성 수
    pub vulnerable_dependencies: usize,
    /// 생성된 이슈 수
    pub issues: usize,
    /// 형식 오류로 생략된 좌표 수
    pub malformed_coordinates: usize,
    /// Sonar 심각도별 이슈 수
    pub severity_counts: SeverityCounts,
}

/// 메모리 내 변환 결과
struct Converted {
    report: SonarReport,
    dependencies: usize,
    vulnerable_dependencies: usize,
    malformed_coordinates: usize,
}

/// dependency-check → Sonar 리포트 변환기
#[derive(Debug, Clone, Default)]
pub struct ReportConverter {
    config: ConverterConfig,
}

impl ReportConverter {
    /// 설정으로 변환기를 생성합니다.
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// 설정된 입력/출력 경로로 변환합니다.
    pub fn run(&self) -> Result<ConversionSummary, ConverterError> {
        self.convert(&self.config.owasp_report_file, &self.config.sonar_report_file)
    }

    /// `input` 리포트를 읽어 `output`에 Sonar 리포트를 씁니다.
    ///
    /// 출력은 전체 문서가 직렬화된 뒤 같은 디렉토리의 임시 파일을 거쳐
    /// rename으로 교체되므로, 실패 시 기존 출력 파일은 변경되지 않습니다.
    ///
    /// # Errors
    ///
    /// 입력 읽기/파싱, 필수 필드 누락, 출력 쓰기 실패 시 에러를 반환합니다.
    /// 부분 결과는 쓰지 않습니다.
    pub fn convert(&self, input: &Path, output: &Path) -> Result<ConversionSummary, ConverterError> {
        info!(input = %input.display(), output = %output.display(), "converting dependency-check report");

        let content = self.read_input(input)?;
        let document: serde_json::Value =
            serde_json::from_slice(&content).map_err(|e| ConverterError::MalformedJson {
                path: input.display().to_string(),
                reason: e.to_string(),
            })?;

        let converted = convert_document(&document)?;
        let json = converted.report.to_json()?;
        write_atomic(output, json.as_bytes())?;

        let mut severity_counts = SeverityCounts::default();
        for issue in &converted.report.issues {
            severity_counts.record(issue.severity);
        }

        if converted.malformed_coordinates > 0 {
            warn!(
                count = converted.malformed_coordinates,
                "some package coordinates could not be parsed and were omitted"
            );
        }

        let summary = ConversionSummary {
            input: input.display().to_string(),
            output: output.display().to_string(),
            dependencies: converted.dependencies,
            vulnerable_dependencies: converted.vulnerable_dependencies,
            issues: converted.report.issues.len(),
            malformed_coordinates: converted.malformed_coordinates,
            severity_counts,
        };

        info!(
            dependencies = summary.dependencies,
            vulnerable_dependencies = summary.vulnerable_dependencies,
            issues = summary.issues,
            output = %output.display(),
            "sonar report written"
        );

        Ok(summary)
    }

    /// JSON 문자열을 메모리 안에서 변환합니다 (파일 I/O 없음).
    pub fn convert_str(&self, content: &str) -> Result<SonarReport, ConverterError> {
        let document: serde_json::Value =
            serde_json::from_str(content).map_err(|e| ConverterError::MalformedJson {
                path: "<memory>".to_owned(),
                reason: e.to_string(),
            })?;
        Ok(convert_document(&document)?.report)
    }

    fn read_input(&self, path: &Path) -> Result<Vec<u8>, ConverterError> {
        let metadata = std::fs::metadata(path).map_err(|e| input_error(path, e))?;

        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > self.config.max_file_size {
            return Err(ConverterError::FileTooBig {
                path: path.display().to_string(),
                size,
                max: self.config.max_file_size,
            });
        }

        let content = std::fs::read(path).map_err(|e| input_error(path, e))?;
        debug!(path = %path.display(), bytes = content.len(), "input report read");
        Ok(content)
    }
}

/// 기본 설정으로 `input`을 `output`으로 변환합니다.
pub fn convert(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<ConversionSummary, ConverterError> {
    ReportConverter::default().convert(input.as_ref(), output.as_ref())
}

fn convert_document(document: &serde_json::Value) -> Result<Converted, ConverterError> {
    let extraction = report::extract(document)?;
    let issues: Vec<Issue> = extraction
        .vulnerabilities
        .into_iter()
        .map(Issue::from)
        .collect();

    Ok(Converted {
        report: SonarReport::new(issues),
        dependencies: extraction.dependencies,
        vulnerable_dependencies: extraction.vulnerable_dependencies,
        malformed_coordinates: extraction.malformed_coordinates,
    })
}

fn input_error(path: &Path, e: std::io::Error) -> ConverterError {
    if e.kind() == std::io::ErrorKind::NotFound {
        ConverterError::InputNotFound {
            path: path.display().to_string(),
        }
    } else {
        ConverterError::InputUnreadable {
            path: path.display().to_string(),
            source: e,
        }
    }
}

/// 같은 디렉토리의 임시 파일에 쓴 뒤 rename으로 교체합니다.
///
/// 대상이 심볼릭 링크면 링크가 가리키는 파일을 교체하고, 기존 파일의
/// 권한은 그대로 유지합니다. 새 파일은 umask가 적용된 0666으로 생성됩니다.
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), ConverterError> {
    let unwritable = |source: std::io::Error| ConverterError::OutputUnwritable {
        path: path.display().to_string(),
        source,
    };

    let target = resolve_destination(path).map_err(unwritable)?;
    let existing_permissions = match std::fs::metadata(&target) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(unwritable(e)),
    };

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".sonar-report");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    let mut tmp = builder.tempfile_in(dir).map_err(unwritable)?;
    if let Some(permissions) = existing_permissions {
        tmp.as_file().set_permissions(permissions).map_err(unwritable)?;
    }
    tmp.write_all(content).map_err(unwritable)?;
    tmp.flush().map_err(unwritable)?;
    tmp.persist(&target).map_err(|e| unwritable(e.error))?;

    debug!(path = %target.display(), bytes = content.len(), "output report persisted");
    Ok(())
}

/// 기존 출력 경로의 심볼릭 링크를 따라간 실제 경로. 아직 없으면 그대로 반환합니다.
fn resolve_destination(path: &Path) -> std::io::Result<PathBuf> {
    match std::fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(e) => Err(e),
    }
}
