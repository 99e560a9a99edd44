//! Database Module
//!
//! SnapshotStore 계약의 SQLite 구현.
//! 코어와 달리 이 레이어는 I/O를 하며, 실패는 IteError로 그대로 전파합니다.
//! 재시도 정책이 필요하다면 이 어댑터를 감싸는 쪽의 몫입니다.

mod schema;

use std::collections::HashSet;
use std::path::Path;

use rusqlite::{Connection, OptionalExtension};

use crate::error::IteError;
use crate::history::{HistoryGraph, Snapshot};
use crate::integrity::{checksum_hex, verify, IntegrityReport};
use crate::models::{Project, ProjectId};
use crate::store::{serialize_state, SnapshotRow, SnapshotStore};

/// 데이터베이스 래퍼
pub struct Database {
    conn: Connection,
}

impl Database {
    /// 새 데이터베이스 연결 생성
    pub fn new(path: &Path) -> Result<Self, IteError> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// 인메모리 데이터베이스 (테스트 및 임시 세션용)
    pub fn open_in_memory() -> Result<Self, IteError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// 데이터베이스 스키마 초기화
    pub fn initialize(&self) -> Result<(), IteError> {
        self.conn.execute_batch(schema::CREATE_SCHEMA)?;
        Ok(())
    }

    /// 프로젝트 레코드 등록 (이미 있으면 덮어씀)
    pub fn register_project(&self, project: &Project) -> Result<(), IteError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO projects (id, project_json, registered_at)
             VALUES (?1, ?2, ?3)",
            (
                &project.id.0,
                serde_json::to_string(project)?,
                chrono::Utc::now().timestamp_millis(),
            ),
        )?;
        Ok(())
    }

    /// 저장된 프로젝트 ID 목록 조회
    pub fn list_project_ids(&self) -> Result<Vec<ProjectId>, IteError> {
        let mut stmt = self.conn.prepare("SELECT id FROM projects ORDER BY registered_at DESC")?;
        let iter = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut ids = Vec::new();
        for id in iter {
            ids.push(ProjectId(id?));
        }
        Ok(ids)
    }

    /// 커밋된 스냅샷을 직렬화-해시-저장까지 한 번에 수행합니다.
    ///
    /// payload는 정확히 한 번 직렬화되고, 체크섬은 저장되는 바로 그
    /// 바이트 위에서 계산됩니다. 검증 시점의 재계산과 일치해야 하므로
    /// 재직렬화를 끼워 넣으면 안 됩니다.
    pub fn persist_snapshot(
        &self,
        project_id: &ProjectId,
        snapshot: &Snapshot,
    ) -> Result<(), IteError> {
        let payload = serialize_state(&snapshot.state)?;
        let row = SnapshotRow {
            snapshot_id: snapshot.id.clone(),
            checksum: checksum_hex(payload.as_bytes()),
            payload,
            created_at_epoch_ms: snapshot.created_at_epoch_ms,
            label: snapshot.label.clone(),
        };
        self.save(project_id, &row)
    }

    /// 저장소 내용만을 근거로 프로젝트 무결성을 검증합니다.
    pub fn verify_project(
        &self,
        project_id: &ProjectId,
        history: &HistoryGraph,
    ) -> Result<IntegrityReport, IteError> {
        let rows = self.load_all_snapshot_rows(project_id)?;
        let known: HashSet<ProjectId> = self.list_project_ids()?.into_iter().collect();

        let report = verify(project_id, &rows, &known, history);
        tracing::info!(
            project_id = %project_id.0,
            total = report.total_snapshots,
            issues = report.issues.len(),
            is_safe = report.is_safe,
            "integrity verification finished"
        );
        Ok(report)
    }
}

impl SnapshotStore for Database {
    fn save(&self, project_id: &ProjectId, row: &SnapshotRow) -> Result<(), IteError> {
        // 단일 INSERT이므로 행 단위 원자성은 SQLite가 보장
        self.conn.execute(
            "INSERT INTO snapshots (snapshot_id, project_id, payload, checksum, created_at, label)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                &row.snapshot_id.0,
                &project_id.0,
                &row.payload,
                &row.checksum,
                row.created_at_epoch_ms,
                &row.label,
            ),
        )?;
        tracing::debug!(
            project_id = %project_id.0,
            snapshot_id = %row.snapshot_id.0,
            "snapshot row stored"
        );
        Ok(())
    }

    fn load_latest_state(&self, project_id: &ProjectId) -> Result<Option<String>, IteError> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM snapshots WHERE project_id = ?1
                 ORDER BY created_at DESC, rowid DESC LIMIT 1",
                [&project_id.0],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn load_all_snapshot_rows(&self, project_id: &ProjectId) -> Result<Vec<SnapshotRow>, IteError> {
        let mut stmt = self.conn.prepare(
            "SELECT snapshot_id, payload, checksum, created_at, label
             FROM snapshots WHERE project_id = ?1 ORDER BY created_at, rowid",
        )?;

        let iter = stmt.query_map([&project_id.0], |row| {
            Ok(SnapshotRow {
                snapshot_id: crate::models::SnapshotId(row.get(0)?),
                payload: row.get(1)?,
                checksum: row.get(2)?,
                created_at_epoch_ms: row.get(3)?,
                label: row.get(4)?,
            })
        })?;

        let mut rows = Vec::new();
        for row in iter {
            rows.push(row?);
        }
        Ok(rows)
    }
}
