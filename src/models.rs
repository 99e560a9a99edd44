//! ITE Core Data Models
//!
//! TypeScript 타입과 매핑되는 불변 엔티티 모델.
//! 동작 없이 형태(shape)와 구조 불변식만 정의합니다.

use serde::{Deserialize, Serialize};

/// 클라이언트 식별자
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub String);

/// 프로젝트 식별자
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

/// 원문 세그먼트 식별자
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(pub String);

/// 번역문 세그먼트 식별자
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetSegmentId(pub String);

impl TargetSegmentId {
    /// 호출자 측 id 발급. 코어(reducer/commit)는 id를 생성하지 않습니다.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// 스냅샷 식별자
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotId(pub String);

impl SnapshotId {
    /// 호출자 측 id 발급. 커밋에 쓸 새 스냅샷 id는 호출자가 만들어 넘깁니다.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// 언어 코드 (BCP 47 형태의 문자열, 예: "en", "ko", "fr")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(pub String);

/// 프로젝트 진행 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Draft,
    InProgress,
    Completed,
    Archived,
}

impl ProjectStatus {
    /// 상태 전이 허용 여부. archived는 종료 상태로, 어떤 활성 상태로도 돌아갈 수 없습니다.
    pub fn can_transition_to(self, next: ProjectStatus) -> bool {
        if self == ProjectStatus::Archived {
            return next == ProjectStatus::Archived;
        }
        true
    }
}

/// 번역문 세그먼트의 워크플로우 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetStatus {
    Draft,
    Translated,
    Approved,
}

/// 프로젝트
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub client_id: ClientId,
    /// 표시용 이름 (공백 제거 후 비어있지 않아야 함)
    pub name: String,
    pub source_language: LanguageCode,
    /// 중복 없는 비어있지 않은 목록, source_language와 겹치지 않음
    pub target_languages: Vec<LanguageCode>,
    pub status: ProjectStatus,
}

/// 원문 세그먼트
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: SegmentId,
    pub project_id: ProjectId,
    /// 프로젝트 내 0부터 시작하는 순서, 프로젝트별로 유일
    pub index_within_project: u32,
    pub source_text: String,
    /// 소속 프로젝트의 source_language와 동일해야 함
    pub source_language: LanguageCode,
    /// true면 일반 편집으로부터 동결됨
    pub is_locked: bool,
}

/// 번역문 세그먼트 (원문 세그먼트당 언어별 최대 1개)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSegment {
    pub id: TargetSegmentId,
    pub project_id: ProjectId,
    pub segment_id: SegmentId,
    pub target_language: LanguageCode,
    pub translated_text: String,
    pub status: TargetStatus,
}

/// 프로젝트 상태 집합체 - Reducer와 히스토리 그래프가 다루는 단위
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectState {
    pub project: Project,
    pub segments: Vec<Segment>,
    pub target_segments: Vec<TargetSegment>,
}

/// 해당 언어가 이 프로젝트의 유효한 번역 대상 언어인지 확인
pub fn is_valid_target_language(project: &Project, language: &LanguageCode) -> bool {
    language != &project.source_language && project.target_languages.contains(language)
}

/// 프로젝트 내 세그먼트 조회
pub fn find_segment<'a>(state: &'a ProjectState, segment_id: &SegmentId) -> Option<&'a Segment> {
    state.segments.iter().find(|s| &s.id == segment_id)
}

/// (segment, language) 쌍에 대한 기존 번역문 조회
pub fn find_target<'a>(
    state: &'a ProjectState,
    segment_id: &SegmentId,
    language: &LanguageCode,
) -> Option<&'a TargetSegment> {
    state
        .target_segments
        .iter()
        .find(|t| &t.segment_id == segment_id && &t.target_language == language)
}

/// TM 동등성 조회: 동일한 원문 텍스트에 대해 이미 존재하는 번역을 찾습니다.
/// 퍼지 매칭 없음 - 원문이 정확히 일치하는 세그먼트의 번역만 반환합니다.
pub fn exact_match<'a>(
    state: &'a ProjectState,
    source_text: &str,
    language: &LanguageCode,
) -> Option<&'a TargetSegment> {
    let segment = state.segments.iter().find(|s| s.source_text == source_text)?;
    find_target(state, &segment.id, language)
}

/// 엔티티 모델 불변식 전체 검사. 위반 사항을 사람이 읽을 수 있는 목록으로 반환합니다.
/// Integrity Engine의 domain_invariant_violation 판정과 테스트가 공유합니다.
pub fn validate_state(state: &ProjectState) -> Vec<String> {
    let mut violations = Vec::new();
    let project = &state.project;

    if project.name.trim().is_empty() {
        violations.push("project name is empty".to_string());
    }
    if project.target_languages.is_empty() {
        violations.push("project has no target languages".to_string());
    }
    for (i, lang) in project.target_languages.iter().enumerate() {
        if lang == &project.source_language {
            violations.push(format!("target language '{}' equals source language", lang.0));
        }
        if project.target_languages[..i].contains(lang) {
            violations.push(format!("duplicate target language '{}'", lang.0));
        }
    }

    let mut seen_indices = std::collections::HashSet::new();
    for segment in &state.segments {
        if segment.project_id != project.id {
            violations.push(format!(
                "segment '{}' belongs to foreign project '{}'",
                segment.id.0, segment.project_id.0
            ));
        }
        if !seen_indices.insert(segment.index_within_project) {
            violations.push(format!(
                "duplicate indexWithinProject {} (segment '{}')",
                segment.index_within_project, segment.id.0
            ));
        }
        if segment.source_text.is_empty() {
            violations.push(format!("segment '{}' has empty source text", segment.id.0));
        }
        if segment.source_language != project.source_language {
            violations.push(format!(
                "segment '{}' source language '{}' differs from project",
                segment.id.0, segment.source_language.0
            ));
        }
    }

    let mut seen_pairs = std::collections::HashSet::new();
    for target in &state.target_segments {
        if target.project_id != project.id {
            violations.push(format!(
                "target segment '{}' belongs to foreign project '{}'",
                target.id.0, target.project_id.0
            ));
        }
        match find_segment(state, &target.segment_id) {
            Some(segment) if segment.project_id == project.id => {}
            _ => violations.push(format!(
                "target segment '{}' references missing segment '{}'",
                target.id.0, target.segment_id.0
            )),
        }
        if !is_valid_target_language(project, &target.target_language) {
            violations.push(format!(
                "target segment '{}' uses invalid language '{}'",
                target.id.0, target.target_language.0
            ));
        }
        if !seen_pairs.insert((target.segment_id.clone(), target.target_language.clone())) {
            violations.push(format!(
                "duplicate target for segment '{}' / language '{}'",
                target.segment_id.0, target.target_language.0
            ));
        }
    }

    violations
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// 테스트 공용: en -> fr 프로젝트와 세그먼트 1개를 가진 상태
    pub fn basic_state() -> ProjectState {
        ProjectState {
            project: Project {
                id: ProjectId("p1".into()),
                client_id: ClientId("c1".into()),
                name: "Demo Project".into(),
                source_language: LanguageCode("en".into()),
                target_languages: vec![LanguageCode("fr".into())],
                status: ProjectStatus::InProgress,
            },
            segments: vec![Segment {
                id: SegmentId("s1".into()),
                project_id: ProjectId("p1".into()),
                index_within_project: 0,
                source_text: "Hello world".into(),
                source_language: LanguageCode("en".into()),
                is_locked: false,
            }],
            target_segments: Vec::new(),
        }
    }
}
