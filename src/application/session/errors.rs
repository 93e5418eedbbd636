use thiserror::Error;

use crate::domain::SessionId;

/// セッション管理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// セッションが存在しない（未作成または終了済み）
    #[error("Session {0} not found")]
    NotFound(SessionId),
}

pub type Result<T> = std::result::Result<T, SessionError>;
