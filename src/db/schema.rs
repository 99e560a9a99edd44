//! Database Schema
//!
//! SQLite 테이블 스키마 정의

/// 데이터베이스 스키마 생성 SQL
pub const CREATE_SCHEMA: &str = r#"
-- 프로젝트 레코드 테이블 (무결성 검증의 orphan 판정 기준)
CREATE TABLE IF NOT EXISTS projects (
    id TEXT PRIMARY KEY,
    project_json TEXT NOT NULL,
    registered_at INTEGER NOT NULL
);

-- 스냅샷 행 테이블 (payload는 직렬화된 ProjectState 그대로)
CREATE TABLE IF NOT EXISTS snapshots (
    snapshot_id TEXT PRIMARY KEY,
    project_id TEXT NOT NULL,
    payload TEXT NOT NULL,
    checksum TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    label TEXT,
    FOREIGN KEY (project_id) REFERENCES projects(id)
);

-- 스냅샷 인덱스
CREATE INDEX IF NOT EXISTS idx_snapshots_project ON snapshots(project_id);
CREATE INDEX IF NOT EXISTS idx_snapshots_created ON snapshots(created_at);
"#;
