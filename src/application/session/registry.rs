use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::application::catalog::CatalogStore;
use crate::domain::SessionId;

use super::errors::{Result, SessionError};

/// セッションのメタ情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub session_id: SessionId,
    pub opened_at: DateTime<Utc>,
    pub book_count: usize,
    pub member_count: usize,
}

/// 1セッション = 独立したカタログ1つ
#[derive(Debug)]
struct Session {
    opened_at: DateTime<Utc>,
    catalog: CatalogStore,
}

impl Session {
    fn info(&self, session_id: SessionId) -> SessionInfo {
        SessionInfo {
            session_id,
            opened_at: self.opened_at,
            book_count: self.catalog.book_count(),
            member_count: self.catalog.member_count(),
        }
    }
}

/// セッションレジストリ
///
/// セッションごとに独立した`CatalogStore`を所有する。セッション間で
/// コレクションを共有することはない。各操作はロックを保持したまま
/// 完了まで実行されるため、複数フィールドの更新が途中で観測されることはない。
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<SessionId, Session>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // カタログ操作はパニックしないため、ポイズンされても中身は整合している
    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 空のカタログを持つ新しいセッションを開始する
    pub fn open(&self) -> SessionInfo {
        let session_id = SessionId::new();
        let session = Session {
            opened_at: Utc::now(),
            catalog: CatalogStore::new(),
        };
        let info = session.info(session_id);

        self.lock().insert(session_id, session);

        tracing::info!(%session_id, "Session opened");
        info
    }

    /// セッションを終了し、そのカタログを破棄する
    pub fn close(&self, session_id: SessionId) -> Result<()> {
        match self.lock().remove(&session_id) {
            Some(_) => {
                tracing::info!(%session_id, "Session closed");
                Ok(())
            }
            None => Err(SessionError::NotFound(session_id)),
        }
    }

    pub fn get(&self, session_id: SessionId) -> Result<SessionInfo> {
        self.lock()
            .get(&session_id)
            .map(|session| session.info(session_id))
            .ok_or(SessionError::NotFound(session_id))
    }

    /// セッションのカタログに対して`f`を実行する
    pub fn with_catalog<R>(
        &self,
        session_id: SessionId,
        f: impl FnOnce(&mut CatalogStore) -> R,
    ) -> Result<R> {
        let mut sessions = self.lock();
        let session = sessions
            .get_mut(&session_id)
            .ok_or(SessionError::NotFound(session_id))?;

        Ok(f(&mut session.catalog))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
