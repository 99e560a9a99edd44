//! State Transition Reducer
//!
//! 하나의 편집을 프로젝트 상태에 적용하는 순수 함수.
//! 같은 (previous, change) 입력은 항상 구조적으로 동일한 결과를 내고,
//! previous는 절대 변경하지 않으며 I/O도 수행하지 않습니다.

use serde::{Deserialize, Serialize};

use crate::models::{
    find_segment, is_valid_target_language, LanguageCode, ProjectId, ProjectState, ProjectStatus,
    SegmentId, TargetSegment, TargetSegmentId, TargetStatus,
};

/// 하나의 번역 편집
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationChange {
    pub project_id: ProjectId,
    pub segment_id: SegmentId,
    pub target_language: LanguageCode,
    /// 새 번역문을 생성해야 할 때 사용할 id (reducer는 id를 생성하지 않음)
    pub target_segment_id: TargetSegmentId,
    pub new_text: String,
    pub new_status: TargetStatus,
}

/// 편집 적용. 검증에 실패하면 previous의 구조적 복사본을 그대로 반환합니다.
///
/// 비동기 UI나 오래된 화면 상태에서 도착한 편집은 예외 없이 조용히
/// 거부됩니다. 호출자는 반환값을 이전 상태와 비교하여 no-op 여부를 판별합니다.
pub fn apply_change(previous: &ProjectState, change: &TranslationChange) -> ProjectState {
    // 1. 다른 프로젝트로 향한 편집 거부
    if change.project_id != previous.project.id {
        return previous.clone();
    }

    // 2. 보관된 프로젝트는 읽기 전용
    if previous.project.status == ProjectStatus::Archived {
        return previous.clone();
    }

    // 3. 대상 언어는 프로젝트의 target_languages에 속해야 하며 원문 언어가 아니어야 함
    if !is_valid_target_language(&previous.project, &change.target_language) {
        return previous.clone();
    }

    // 4. 세그먼트가 이 프로젝트에 실제로 존재해야 함
    let segment = match find_segment(previous, &change.segment_id) {
        Some(s) => s,
        None => return previous.clone(),
    };

    // 5. 잠긴 세그먼트는 일반 편집으로부터 동결됨
    if segment.is_locked {
        return previous.clone();
    }

    let mut next = previous.clone();

    let existing = next
        .target_segments
        .iter_mut()
        .find(|t| t.segment_id == change.segment_id && t.target_language == change.target_language);

    match existing {
        // 기존 번역문 교체: id는 유지하고 내용/상태만 갱신
        Some(target) => {
            target.translated_text = change.new_text.clone();
            target.status = change.new_status;
        }
        // 새 번역문 생성: 호출자가 제공한 id를 사용
        None => next.target_segments.push(TargetSegment {
            id: change.target_segment_id.clone(),
            project_id: previous.project.id.clone(),
            segment_id: change.segment_id.clone(),
            target_language: change.target_language.clone(),
            translated_text: change.new_text.clone(),
            status: change.new_status,
        }),
    }

    next
}
