//! Content Validation Hooks
//!
//! 규칙 기반 콘텐츠 검증기는 코어 밖의 플러그인입니다.
//! 코어는 호출 지점의 형태(trait)만 정의하고 알고리즘은 정의하지 않으며,
//! Reducer는 검증기를 절대 직접 호출하지 않습니다.

use serde::{Deserialize, Serialize};

use crate::models::{ProjectState, SegmentId};

/// 외부 검증기에 전달되는 규칙 집합 (내용은 검증기 구현의 소관)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSet {
    pub rules: Vec<String>,
}

/// 검증기가 보고하는 발견 사항
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFinding {
    pub code: String,
    pub message: String,
    pub segment_id: Option<SegmentId>,
}

/// 주입 가능한 콘텐츠 검증기
pub trait ContentValidator {
    fn validate(&self, state: &ProjectState, rules: &RuleSet) -> Vec<ValidationFinding>;
}

/// 아무것도 검사하지 않는 기본 구현
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopValidator;

impl ContentValidator for NoopValidator {
    fn validate(&self, _state: &ProjectState, _rules: &RuleSet) -> Vec<ValidationFinding> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::basic_state;

    #[test]
    fn test_noop_validator_finds_nothing() {
        let findings = NoopValidator.validate(&basic_state(), &RuleSet::default());
        assert!(findings.is_empty());
    }

    #[test]
    fn test_custom_validator_is_injectable() {
        // 호출자가 임의 규칙 엔진을 주입할 수 있는지 형태만 확인
        struct EmptyTargetRule;
        impl ContentValidator for EmptyTargetRule {
            fn validate(&self, state: &ProjectState, _rules: &RuleSet) -> Vec<ValidationFinding> {
                state
                    .target_segments
                    .iter()
                    .filter(|t| t.translated_text.is_empty())
                    .map(|t| ValidationFinding {
                        code: "EMPTY_TARGET".into(),
                        message: "translated text is empty".into(),
                        segment_id: Some(t.segment_id.clone()),
                    })
                    .collect()
            }
        }

        let findings = EmptyTargetRule.validate(&basic_state(), &RuleSet::default());
        assert!(findings.is_empty());
    }
}
