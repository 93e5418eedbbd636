use crate::application::session::SessionRegistry;
use crate::domain::SessionId;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

use super::{
    error::ApiError,
    types::{
        AddBookRequest, BooksResponse, BorrowingRequest, MemberResponse, OutcomeResponse,
        RegisterMemberRequest, SessionResponse,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Debug, Default)]
pub struct AppState {
    pub sessions: SessionRegistry,
}

// ============================================================================
// Session handlers
// ============================================================================

/// POST /sessions - 空のカタログを持つセッションを開始
pub async fn open_session(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<SessionResponse>) {
    let info = state.sessions.open();
    (StatusCode::CREATED, Json(SessionResponse::from(info)))
}

/// GET /sessions/:session_id - セッション情報を取得
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, ApiError> {
    let info = state.sessions.get(SessionId::from_uuid(session_id))?;
    Ok(Json(SessionResponse::from(info)))
}

/// DELETE /sessions/:session_id - セッションとそのカタログを破棄
pub async fn close_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.sessions.close(SessionId::from_uuid(session_id))?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Command handlers (POST)
// ============================================================================

/// POST /sessions/:session_id/books - 書籍を登録
pub async fn add_book(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    payload: Result<Json<AddBookRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OutcomeResponse>), ApiError> {
    let Json(req) = payload?;
    let (book_id, title, author) = req.into_parts()?;

    let event = state
        .sessions
        .with_catalog(SessionId::from_uuid(session_id), |catalog| {
            catalog.add_book(book_id, title, author)
        })??;

    Ok((StatusCode::CREATED, Json(OutcomeResponse::new(event))))
}

/// POST /sessions/:session_id/members - 会員を登録
pub async fn register_member(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    payload: Result<Json<RegisterMemberRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OutcomeResponse>), ApiError> {
    let Json(req) = payload?;
    let (member_id, name) = req.into_parts()?;

    let event = state
        .sessions
        .with_catalog(SessionId::from_uuid(session_id), |catalog| {
            catalog.register_member(member_id, name)
        })??;

    Ok((StatusCode::CREATED, Json(OutcomeResponse::new(event))))
}

/// POST /sessions/:session_id/issues - 書籍を貸し出す
///
/// 検証順序：書籍の存在 → 貸出可能 → 会員の存在
pub async fn issue_book(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    payload: Result<Json<BorrowingRequest>, JsonRejection>,
) -> Result<Json<OutcomeResponse>, ApiError> {
    let Json(req) = payload?;
    let (book_id, member_id) = req.into_ids()?;

    let event = state
        .sessions
        .with_catalog(SessionId::from_uuid(session_id), |catalog| {
            catalog.issue_book(&book_id, &member_id)
        })??;

    Ok(Json(OutcomeResponse::new(event)))
}

/// POST /sessions/:session_id/returns - 書籍を返却
///
/// 検証順序：書籍の存在 → 借り手がこの会員であること
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    payload: Result<Json<BorrowingRequest>, JsonRejection>,
) -> Result<Json<OutcomeResponse>, ApiError> {
    let Json(req) = payload?;
    let (book_id, member_id) = req.into_ids()?;

    let event = state
        .sessions
        .with_catalog(SessionId::from_uuid(session_id), |catalog| {
            catalog.return_book(&book_id, &member_id)
        })??;

    Ok(Json(OutcomeResponse::new(event)))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /sessions/:session_id/books - 貸出可能／貸出中の書籍一覧
pub async fn view_books(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<BooksResponse>, ApiError> {
    let partition = state
        .sessions
        .with_catalog(SessionId::from_uuid(session_id), |catalog| {
            catalog.view_books()
        })?;

    Ok(Json(BooksResponse::from(partition)))
}

/// GET /sessions/:session_id/members - 会員一覧（貸出中の書籍IDを含む）
pub async fn view_members(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<BTreeMap<String, MemberResponse>>, ApiError> {
    let members: BTreeMap<String, MemberResponse> = state
        .sessions
        .with_catalog(SessionId::from_uuid(session_id), |catalog| {
            catalog
                .view_members()
                .iter()
                .map(|(id, member)| (id.value().to_string(), MemberResponse::from(member)))
                .collect()
        })?;

    Ok(Json(members))
}
