//! Maven 좌표 파싱
//!
//! dependency-check는 패키지를 Package URL 형태로 보고합니다.
//!
//! ```text
//! pkg:maven/org.apache.commons/commons-text@1.9
//! ^^^^^^^^^ ^^^^^^^^^^^^^^^^^^ ^^^^^^^^^^^^ ^^^
//! prefix    groupId            artifactId   version
//! ```
//!
//! `/`로 나눈 두 번째 구간이 groupId, 세 번째 구간을 첫 `@`에서 나눈 앞뒤가
//! artifactId와 version입니다. 네 번째 이후 구간은 무시합니다.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::ConverterError;

/// Maven 좌표 (`groupId:artifactId:version`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MavenCoordinate {
    /// 그룹 ID
    pub group_id: String,
    /// 아티팩트 ID
    pub artifact_id: String,
    /// 버전 (URL 디코딩 없이 원문 그대로)
    pub version: String,
}

impl MavenCoordinate {
    /// 세 구성 요소로 좌표를 생성합니다.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    /// `.../<groupId>/<artifactId>@<version>` 형식의 참조 문자열을 파싱합니다.
    ///
    /// # Errors
    ///
    /// 구간이 부족하거나 `@`가 없거나 구성 요소가 비어 있으면
    /// `ConverterError::MalformedCoordinate` 반환
    pub fn parse_reference(reference: &str) -> Result<Self, ConverterError> {
        let malformed = |reason: &str| ConverterError::MalformedCoordinate {
            reference: reference.to_owned(),
            reason: reason.to_owned(),
        };

        let mut segments = reference.split('/');
        let _prefix = segments.next();
        let group_id = segments
            .next()
            .ok_or_else(|| malformed("missing groupId segment"))?;
        let artifact_and_version = segments
            .next()
            .ok_or_else(|| malformed("missing artifactId@version segment"))?;

        let (artifact_id, version) = artifact_and_version
            .split_once('@')
            .ok_or_else(|| malformed("missing '@' between artifactId and version"))?;

        if group_id.is_empty() {
            return Err(malformed("empty groupId"));
        }
        if artifact_id.is_empty() {
            return Err(malformed("empty artifactId"));
        }
        if version.is_empty() {
            return Err(malformed("empty version"));
        }

        Ok(Self::new(group_id, artifact_id, version))
    }
}

impl FromStr for MavenCoordinate {
    type Err = ConverterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_reference(s)
    }
}

impl fmt::Display for MavenCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// 출력 리포트에는 `groupId:artifactId:version` 문자열로 기록됩니다.
impl Serialize for MavenCoordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
