//! Snapshot Store Contract
//!
//! 코어가 영속성 어댑터에 요구하는 최소한의 계약.
//! 코어는 이 계약 너머의 저장 방식(SQLite, 파일 등)을 알지 못하며,
//! 어댑터 에러를 해석하거나 재시도하지 않고 그대로 전파합니다.

use serde::{Deserialize, Serialize};

use crate::error::IteError;
use crate::models::{ProjectId, ProjectState, SnapshotId};

/// 내구 저장소의 스냅샷 한 행
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRow {
    pub snapshot_id: SnapshotId,
    /// 직렬화된 ProjectState. 체크섬은 정확히 이 바이트 위에서 계산됨
    pub payload: String,
    /// 소문자 hex 64자리 (SHA-256)
    pub checksum: String,
    pub created_at_epoch_ms: i64,
    pub label: Option<String>,
}

/// 영속성 어댑터 계약
pub trait SnapshotStore {
    /// 스냅샷 한 행을 내구 저장 (행 단위 원자성 필요)
    fn save(&self, project_id: &ProjectId, row: &SnapshotRow) -> Result<(), IteError>;

    /// 가장 최근 커밋된 상태의 payload (프로젝트 빠른 열기용)
    fn load_latest_state(&self, project_id: &ProjectId) -> Result<Option<String>, IteError>;

    /// 프로젝트의 모든 스냅샷 행 (무결성 검증 입력)
    fn load_all_snapshot_rows(&self, project_id: &ProjectId) -> Result<Vec<SnapshotRow>, IteError>;
}

/// ProjectState의 안정적인 payload 인코딩.
///
/// 한 번 직렬화한 바이트가 저장과 해시 양쪽에 그대로 쓰여야 하므로,
/// 저장 경로는 이 함수를 정확히 한 번 호출하고 그 결과를 재사용해야 합니다.
pub fn serialize_state(state: &ProjectState) -> Result<String, IteError> {
    Ok(serde_json::to_string(state)?)
}

/// 저장된 payload를 ProjectState로 되돌리기
pub fn deserialize_state(payload: &str) -> Result<ProjectState, IteError> {
    Ok(serde_json::from_str(payload)?)
}
