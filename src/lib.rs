//! ITE Core - Versioned State Core Library
//!
//! 번역 프로젝트 콘텐츠의 버전 상태 코어입니다. 불변 엔티티 모델,
//! 순수 상태 전이 reducer, append-only 스냅샷 히스토리(커밋/롤백),
//! 그리고 저장된 스냅샷의 손상을 탐지하는 무결성 검증 엔진으로
//! 구성됩니다.
//!
//! 동시성 계약: 프로젝트당 동시에 하나의 mutator만 가정하며 내부
//! 잠금은 없습니다. 모든 변이 연산은 제자리 수정 대신 새 값을
//! 반환하므로, 이전 참조를 쥔 독자는 찢긴 읽기를 보지 않습니다.

pub mod db;
pub mod error;
pub mod history;
pub mod integrity;
pub mod models;
pub mod reducer;
pub mod store;
pub mod validate;

pub use error::IteError;
pub use history::{HistoryGraph, Snapshot, VersionedState};
pub use integrity::{checksum_hex, verify, IntegrityIssue, IntegrityReport, IssueKind, Severity};
pub use models::{
    ClientId, LanguageCode, Project, ProjectId, ProjectState, ProjectStatus, Segment, SegmentId,
    SnapshotId, TargetSegment, TargetSegmentId, TargetStatus,
};
pub use reducer::{apply_change, TranslationChange};
pub use store::{deserialize_state, serialize_state, SnapshotRow, SnapshotStore};
