//! ITE Core Error Types
//!
//! 어댑터/직렬화 표면의 에러 타입 정의.
//! 코어 상태 전이(reducer/commit/rollback)는 에러를 던지지 않고
//! 입력을 그대로 돌려주는 rejected-no-op 방식을 사용합니다.

use thiserror::Error;

/// ITE 코어 에러
#[derive(Error, Debug)]
pub enum IteError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Snapshot not found: {0}")]
    SnapshotNotFound(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}
