//! Version History Graph
//!
//! 프로젝트 상태의 스냅샷 히스토리. 그래프는 append-only로,
//! 커밋은 노드를 추가할 뿐이고 롤백은 current_state의 재지정일 뿐
//! 어떤 노드도 삭제하거나 고쳐 쓰지 않습니다.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{ProjectState, SnapshotId};
use crate::reducer::{apply_change, TranslationChange};

/// 특정 시점의 프로젝트 상태 전체 복사본. 생성 후 절대 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub id: SnapshotId,
    /// 프로젝트의 첫 스냅샷만 None
    pub parent_id: Option<SnapshotId>,
    /// diff가 아닌 전체 상태 복사본
    pub state: ProjectState,
    pub created_at_epoch_ms: i64,
    pub label: Option<String>,
}

/// 부모 링크로 연결된 스냅샷들의 append-only 저장소
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryGraph {
    snapshots: HashMap<SnapshotId, Snapshot>,
    parent_map: HashMap<SnapshotId, SnapshotId>,
    /// 가장 최근에 커밋된 스냅샷 (커밋 전이면 None)
    pub head_snapshot_id: Option<SnapshotId>,
}

impl HistoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &SnapshotId) -> bool {
        self.snapshots.contains_key(id)
    }

    pub fn get(&self, id: &SnapshotId) -> Option<&Snapshot> {
        self.snapshots.get(id)
    }

    pub fn parent_of(&self, id: &SnapshotId) -> Option<&SnapshotId> {
        self.parent_map.get(id)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshot_ids(&self) -> impl Iterator<Item = &SnapshotId> {
        self.snapshots.keys()
    }

    /// 주어진 스냅샷에서 부모 방향으로 거슬러 올라가는 계보 (히스토리 화면용)
    pub fn lineage(&self, from: &SnapshotId) -> Vec<&Snapshot> {
        let mut chain = Vec::new();
        let mut cursor = self.snapshots.get(from);
        while let Some(snapshot) = cursor {
            chain.push(snapshot);
            cursor = snapshot.parent_id.as_ref().and_then(|p| self.snapshots.get(p));
        }
        chain
    }
}

/// 작업 중인 현재 상태와 그 프로젝트의 히스토리 그래프.
/// current_state는 마지막 커밋 이후의 미커밋 편집 때문에
/// head 스냅샷의 상태와 다를 수 있습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionedState {
    pub current_state: ProjectState,
    pub history: HistoryGraph,
}

impl VersionedState {
    /// 커밋되지 않은 초기 상태로 시작
    pub fn new(initial: ProjectState) -> Self {
        Self {
            current_state: initial,
            history: HistoryGraph::new(),
        }
    }

    /// 편집을 적용하고 결과 상태를 새 스냅샷으로 기록합니다.
    ///
    /// new_snapshot_id가 이미 그래프에 있으면 전체가 no-op입니다.
    /// 스냅샷 id는 재사용될 수 없으며 생성은 호출자의 몫입니다.
    pub fn commit(
        &self,
        change: &TranslationChange,
        new_snapshot_id: SnapshotId,
        timestamp: i64,
        label: Option<String>,
    ) -> VersionedState {
        if self.history.contains(&new_snapshot_id) {
            return self.clone();
        }

        let next_state = apply_change(&self.current_state, change);

        let snapshot = Snapshot {
            id: new_snapshot_id.clone(),
            parent_id: self.history.head_snapshot_id.clone(),
            state: next_state.clone(),
            created_at_epoch_ms: timestamp,
            label,
        };

        let mut history = self.history.clone();
        if let Some(parent) = &snapshot.parent_id {
            history.parent_map.insert(new_snapshot_id.clone(), parent.clone());
        }
        history.snapshots.insert(new_snapshot_id.clone(), snapshot);
        history.head_snapshot_id = Some(new_snapshot_id);

        VersionedState {
            current_state: next_state,
            history,
        }
    }

    /// 과거 스냅샷의 상태를 current_state로 복원합니다.
    ///
    /// 그래프의 노드/부모 맵은 그대로 유지되고 head도 움직이지 않습니다.
    /// "내용은 과거 스냅샷의 것이지만 기록된 최신 스냅샷은 그 이후의 것"
    /// 이라는 상태를 표현합니다. 대상 스냅샷이 없으면 no-op입니다.
    pub fn rollback(&self, target_snapshot_id: &SnapshotId) -> VersionedState {
        let snapshot = match self.history.get(target_snapshot_id) {
            Some(s) => s,
            None => return self.clone(),
        };

        VersionedState {
            current_state: snapshot.state.clone(),
            history: self.history.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::basic_state;
    use crate::models::{LanguageCode, SegmentId, TargetSegmentId, TargetStatus};

    fn change(text: &str, status: TargetStatus) -> TranslationChange {
        TranslationChange {
            project_id: crate::models::ProjectId("p1".into()),
            segment_id: SegmentId("s1".into()),
            target_language: LanguageCode("fr".into()),
            target_segment_id: TargetSegmentId("t1".into()),
            new_text: text.into(),
            new_status: status,
        }
    }

    #[test]
    fn test_commit_appends_and_moves_head() {
        let v0 = VersionedState::new(basic_state());
        let v1 = v0.commit(
            &change("Bonjour", TargetStatus::Translated),
            SnapshotId("c1".into()),
            1_000,
            Some("first pass".into()),
        );

        assert_eq!(v1.history.len(), 1);
        assert_eq!(v1.history.head_snapshot_id, Some(SnapshotId("c1".into())));
        let snapshot = v1.history.get(&SnapshotId("c1".into())).unwrap();
        // 첫 스냅샷의 부모는 없음
        assert!(snapshot.parent_id.is_none());
        assert_eq!(snapshot.state, v1.current_state);
        assert_eq!(snapshot.created_at_epoch_ms, 1_000);
    }

    #[test]
    fn test_commit_links_parent_chain() {
        let v0 = VersionedState::new(basic_state());
        let v1 = v0.commit(
            &change("Bonjour", TargetStatus::Draft),
            SnapshotId("c1".into()),
            1_000,
            None,
        );
        let v2 = v1.commit(
            &change("Bonjour le monde", TargetStatus::Translated),
            SnapshotId("c2".into()),
            2_000,
            None,
        );

        assert_eq!(v2.history.parent_of(&SnapshotId("c2".into())), Some(&SnapshotId("c1".into())));
        let lineage = v2.history.lineage(&SnapshotId("c2".into()));
        assert_eq!(lineage.len(), 2);
        assert_eq!(lineage[0].id, SnapshotId("c2".into()));
        assert_eq!(lineage[1].id, SnapshotId("c1".into()));
    }

    #[test]
    fn test_duplicate_snapshot_id_is_noop() {
        let v0 = VersionedState::new(basic_state());
        let v1 = v0.commit(
            &change("Bonjour", TargetStatus::Draft),
            SnapshotId("c1".into()),
            1_000,
            None,
        );
        let v2 = v1.commit(
            &change("changed", TargetStatus::Approved),
            SnapshotId("c1".into()),
            2_000,
            None,
        );

        assert_eq!(v2, v1);
    }

    #[test]
    fn test_rollback_restores_committed_state() {
        let v0 = VersionedState::new(basic_state());
        let v1 = v0.commit(
            &change("Bonjour", TargetStatus::Translated),
            SnapshotId("c1".into()),
            1_000,
            None,
        );

        // 커밋 직후 해당 스냅샷으로 롤백하면 정확히 그 상태
        let rolled = v1.rollback(&SnapshotId("c1".into()));
        assert_eq!(rolled.current_state, v1.current_state);
    }

    #[test]
    fn test_rollback_keeps_history_and_head() {
        let v0 = VersionedState::new(basic_state());
        let v1 = v0.commit(
            &change("Bonjour", TargetStatus::Draft),
            SnapshotId("c1".into()),
            1_000,
            None,
        );
        let v2 = v1.commit(
            &change("Bonjour le monde", TargetStatus::Translated),
            SnapshotId("c2".into()),
            2_000,
            None,
        );

        let rolled = v2.rollback(&SnapshotId("c1".into()));

        // 히스토리는 그대로, head도 최신 커밋을 가리킨 채 유지
        assert_eq!(rolled.history, v2.history);
        assert_eq!(rolled.history.head_snapshot_id, Some(SnapshotId("c2".into())));
        assert_eq!(rolled.history.len(), 2);
        // 내용만 과거 스냅샷의 것
        assert_eq!(
            rolled.current_state,
            v2.history.get(&SnapshotId("c1".into())).unwrap().state
        );
    }

    #[test]
    fn test_rollback_unknown_target_is_noop() {
        let v0 = VersionedState::new(basic_state());
        let v1 = v0.commit(
            &change("Bonjour", TargetStatus::Draft),
            SnapshotId("c1".into()),
            1_000,
            None,
        );

        assert_eq!(v1.rollback(&SnapshotId("nope".into())), v1);
    }

    #[test]
    fn test_history_only_grows() {
        let mut versioned = VersionedState::new(basic_state());
        let mut last_len = 0usize;

        for i in 0..5 {
            versioned = versioned.commit(
                &change(&format!("rev {i}"), TargetStatus::Draft),
                SnapshotId(format!("c{i}")),
                i as i64,
                None,
            );
            assert!(versioned.history.len() > last_len);
            last_len = versioned.history.len();

            // 중간 롤백이 끼어도 노드 수는 줄지 않음
            versioned = versioned.rollback(&SnapshotId("c0".into()));
            assert_eq!(versioned.history.len(), last_len);
        }
    }

    /// 시나리오: "Bonjour" 커밋 후 미커밋 편집을 얹고 롤백하면 커밋 시점으로 복원
    #[test]
    fn test_uncommitted_edit_then_rollback_scenario() {
        let v0 = VersionedState::new(basic_state());
        let v1 = v0.commit(
            &change("Bonjour", TargetStatus::Translated),
            SnapshotId("c1".into()),
            1_000,
            None,
        );

        // 커밋 없이 reducer만 거친 편집
        let dirty = VersionedState {
            current_state: apply_change(
                &v1.current_state,
                &change("Bonjour le monde", TargetStatus::Approved),
            ),
            history: v1.history.clone(),
        };
        assert_eq!(dirty.current_state.target_segments[0].translated_text, "Bonjour le monde");

        let restored = dirty.rollback(&SnapshotId("c1".into()));
        let target = &restored.current_state.target_segments[0];
        assert_eq!(target.translated_text, "Bonjour");
        assert_eq!(target.status, TargetStatus::Translated);
    }
}
