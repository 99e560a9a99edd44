//! Integrity Verification Engine
//!
//! 내구 저장소의 스냅샷 행들을 체크섬/참조 규칙에 대해 재검증합니다.
//! 손상은 보고만 하고 절대 자동 복구하지 않습니다. 안전하지 않은
//! 리포트를 받은 어댑터는 사용자의 명시적 복구 전까지 해당 프로젝트의
//! 일반 읽기/쓰기를 중단해야 합니다.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::history::HistoryGraph;
use crate::models::{validate_state, ProjectId, ProjectState, SnapshotId};
use crate::store::SnapshotRow;

/// 저장된 payload 바이트에 대한 SHA-256, 소문자 hex.
///
/// 쓰기 시점과 검증 시점에 정확히 동일한 바이트 위에서 계산되어야 하므로,
/// 재직렬화한 값이 아니라 저장된 payload 그대로를 해시합니다.
pub fn checksum_hex(payload: &[u8]) -> String {
    let digest = Sha256::digest(payload);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// 무결성 문제 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingPayload,
    InvalidJson,
    ChecksumMismatch,
    DomainInvariantViolation,
    OrphanedNoProject,
    OrphanedNotInHistory,
}

impl IssueKind {
    pub fn severity(self) -> Severity {
        match self {
            // 히스토리 그래프와의 어긋남은 양성 드리프트로, 안전성을 막지 않음
            IssueKind::OrphanedNotInHistory => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// 문제의 심각도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// 스냅샷 행 하나에서 발견된 문제
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityIssue {
    pub snapshot_id: SnapshotId,
    pub kind: IssueKind,
    pub severity: Severity,
    pub detail: String,
}

impl IntegrityIssue {
    fn new(snapshot_id: &SnapshotId, kind: IssueKind, detail: String) -> Self {
        Self {
            snapshot_id: snapshot_id.clone(),
            kind,
            severity: kind.severity(),
            detail,
        }
    }
}

/// 프로젝트 단위 검증 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityReport {
    pub project_id: ProjectId,
    pub verified_at_epoch_ms: i64,
    pub total_snapshots: usize,
    pub issues: Vec<IntegrityIssue>,
    /// error 심각도 문제가 하나도 없으면 true (warning은 무시)
    pub is_safe: bool,
}

/// 행별 검사. 행마다 최초로 걸린 문제 하나만 보고합니다.
fn check_row(
    row: &SnapshotRow,
    known_project_ids: &HashSet<ProjectId>,
    history: &HistoryGraph,
) -> Option<IntegrityIssue> {
    // 1. payload 유실
    if row.payload.is_empty() {
        return Some(IntegrityIssue::new(
            &row.snapshot_id,
            IssueKind::MissingPayload,
            "stored payload is empty".into(),
        ));
    }

    // 2. 구조적 문서로 파싱 불가
    let state: ProjectState = match serde_json::from_str(&row.payload) {
        Ok(s) => s,
        Err(e) => {
            return Some(IntegrityIssue::new(
                &row.snapshot_id,
                IssueKind::InvalidJson,
                format!("payload is not a valid state document: {e}"),
            ));
        }
    };

    // 3. 저장된 바이트에 대한 체크섬 재계산 비교
    let recomputed = checksum_hex(row.payload.as_bytes());
    if recomputed != row.checksum {
        return Some(IntegrityIssue::new(
            &row.snapshot_id,
            IssueKind::ChecksumMismatch,
            format!("stored {} != recomputed {}", row.checksum, recomputed),
        ));
    }

    // 4. 엔티티 모델 불변식 위반
    let violations = validate_state(&state);
    if let Some(first) = violations.first() {
        return Some(IntegrityIssue::new(
            &row.snapshot_id,
            IssueKind::DomainInvariantViolation,
            first.clone(),
        ));
    }

    // 5. 존재하지 않는 프로젝트를 참조
    if !known_project_ids.contains(&state.project.id) {
        return Some(IntegrityIssue::new(
            &row.snapshot_id,
            IssueKind::OrphanedNoProject,
            format!("no project record for '{}'", state.project.id.0),
        ));
    }

    // 6. 저장소에는 있으나 메모리 히스토리 그래프에는 없음 (양성 드리프트)
    if !history.contains(&row.snapshot_id) {
        return Some(IntegrityIssue::new(
            &row.snapshot_id,
            IssueKind::OrphanedNotInHistory,
            "row has no node in the in-memory history graph".into(),
        ));
    }

    None
}

/// 내구 저장소 내용에 대한 무결성 검증.
///
/// 메모리상의 VersionedState와 무관하게 저장된 행만을 근거로 판단합니다.
/// known_project_ids는 어댑터의 프로젝트 레코드 목록, history는
/// orphaned_not_in_history 판정에 쓰이는 해당 프로젝트의 그래프입니다.
pub fn verify(
    project_id: &ProjectId,
    rows: &[SnapshotRow],
    known_project_ids: &HashSet<ProjectId>,
    history: &HistoryGraph,
) -> IntegrityReport {
    let mut issues = Vec::new();

    for row in rows {
        if let Some(issue) = check_row(row, known_project_ids, history) {
            match issue.severity {
                Severity::Error => tracing::error!(
                    snapshot_id = %issue.snapshot_id.0,
                    kind = ?issue.kind,
                    detail = %issue.detail,
                    "integrity check failed"
                ),
                Severity::Warning => tracing::warn!(
                    snapshot_id = %issue.snapshot_id.0,
                    kind = ?issue.kind,
                    "integrity drift"
                ),
            }
            issues.push(issue);
        }
    }

    let is_safe = issues.iter().all(|i| i.severity != Severity::Error);

    IntegrityReport {
        project_id: project_id.clone(),
        verified_at_epoch_ms: chrono::Utc::now().timestamp_millis(),
        total_snapshots: rows.len(),
        issues,
        is_safe,
    }
}
