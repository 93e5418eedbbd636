use crate::application::catalog::CatalogError;
use crate::application::session::SessionError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーと入力チェックのエラーをまとめ、
/// HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub enum ApiError {
    /// カタログの業務ルール違反
    Catalog(CatalogError),
    /// セッションが見つからない
    Session(SessionError),
    /// 必須入力の欠落（ストアは呼ばれない）
    Validation(&'static str),
    /// JSONとして読めないリクエストボディ
    InvalidBody(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        ApiError::Session(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            // 400 Bad Request - 入力の欠落
            ApiError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.to_string())
            }

            ApiError::InvalidBody(msg) => (StatusCode::BAD_REQUEST, "INVALID_BODY", msg),

            // 404 Not Found - セッションが存在しない
            ApiError::Session(ref err @ SessionError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND", err.to_string())
            }

            // 409 Conflict - ID重複
            ApiError::Catalog(ref err @ CatalogError::DuplicateId(_)) => {
                (StatusCode::CONFLICT, "DUPLICATE_ID", err.to_string())
            }

            // 422 Unprocessable Entity - ビジネスルール違反
            ApiError::Catalog(ref err) => {
                let error_type = match err {
                    CatalogError::BookNotFound => "BOOK_NOT_FOUND",
                    CatalogError::AlreadyIssued => "ALREADY_ISSUED",
                    CatalogError::MemberNotFound => "MEMBER_NOT_FOUND",
                    CatalogError::NotBorrowedByMember => "NOT_BORROWED_BY_MEMBER",
                    CatalogError::DuplicateId(_) => "DUPLICATE_ID",
                };
                (StatusCode::UNPROCESSABLE_ENTITY, error_type, err.to_string())
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
