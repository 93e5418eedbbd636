use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::application::catalog::BookPartition;
use crate::application::session::SessionInfo;
use crate::domain::{Book, BookId, DomainEvent, Member, MemberId};

use super::error::ApiError;

/// 書籍登録・会員登録で入力が欠けている場合のメッセージ
pub const MISSING_DETAILS: &str = "Please provide all details.";

/// 貸出・返却で入力が欠けている場合のメッセージ
pub const MISSING_IDS: &str = "Please provide both Book ID and Member ID.";

// ============================================================================
// Requests
// ============================================================================

// 欠けたフィールド・nullは空文字列と同じく未入力として扱う

/// 空文字列を未入力とみなす
fn provided(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

/// 書籍登録リクエスト（POST /sessions/:id/books）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddBookRequest {
    #[serde(default)]
    pub book_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

impl AddBookRequest {
    /// 入力の有無を確認し、ストアに渡す値に変換する
    pub fn into_parts(self) -> Result<(BookId, String, String), ApiError> {
        match (
            provided(self.book_id),
            provided(self.title),
            provided(self.author),
        ) {
            (Some(book_id), Some(title), Some(author)) => {
                Ok((BookId::new(book_id), title, author))
            }
            _ => Err(ApiError::Validation(MISSING_DETAILS)),
        }
    }
}

/// 会員登録リクエスト（POST /sessions/:id/members）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterMemberRequest {
    #[serde(default)]
    pub member_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl RegisterMemberRequest {
    pub fn into_parts(self) -> Result<(MemberId, String), ApiError> {
        match (provided(self.member_id), provided(self.name)) {
            (Some(member_id), Some(name)) => Ok((MemberId::new(member_id), name)),
            _ => Err(ApiError::Validation(MISSING_DETAILS)),
        }
    }
}

/// 貸出・返却リクエスト（POST /sessions/:id/issues, /returns）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BorrowingRequest {
    #[serde(default)]
    pub book_id: Option<String>,
    #[serde(default)]
    pub member_id: Option<String>,
}

impl BorrowingRequest {
    pub fn into_ids(self) -> Result<(BookId, MemberId), ApiError> {
        match (provided(self.book_id), provided(self.member_id)) {
            (Some(book_id), Some(member_id)) => {
                Ok((BookId::new(book_id), MemberId::new(member_id)))
            }
            _ => Err(ApiError::Validation(MISSING_IDS)),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// セッションレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub opened_at: DateTime<Utc>,
    pub book_count: usize,
    pub member_count: usize,
}

impl From<SessionInfo> for SessionResponse {
    fn from(info: SessionInfo) -> Self {
        Self {
            session_id: info.session_id.value(),
            opened_at: info.opened_at,
            book_count: info.book_count,
            member_count: info.member_count,
        }
    }
}

/// 更新系操作の結果
#[derive(Debug, Serialize, Deserialize)]
pub struct OutcomeResponse {
    pub message: String,
    pub event: DomainEvent,
}

impl OutcomeResponse {
    pub fn new(event: impl Into<DomainEvent>) -> Self {
        let event = event.into();
        Self {
            message: event.to_string(),
            event,
        }
    }
}

/// 書籍レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookResponse {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub available: bool,
    pub borrower: Option<String>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            book_id: book.book_id.value().to_string(),
            title: book.title,
            author: book.author,
            available: book.available,
            borrower: book.borrower.map(|m| m.value().to_string()),
        }
    }
}

/// 書籍一覧レスポンス（GET /sessions/:id/books）
#[derive(Debug, Serialize, Deserialize)]
pub struct BooksResponse {
    pub available: BTreeMap<String, BookResponse>,
    pub issued: BTreeMap<String, BookResponse>,
}

impl From<BookPartition> for BooksResponse {
    fn from(partition: BookPartition) -> Self {
        fn keyed(books: BTreeMap<BookId, Book>) -> BTreeMap<String, BookResponse> {
            books
                .into_iter()
                .map(|(id, book)| (id.value().to_string(), BookResponse::from(book)))
                .collect()
        }

        Self {
            available: keyed(partition.available),
            issued: keyed(partition.issued),
        }
    }
}

/// 会員レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberResponse {
    pub member_id: String,
    pub name: String,
    pub borrowed_books: Vec<String>,
}

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            member_id: member.member_id.value().to_string(),
            name: member.name.clone(),
            borrowed_books: member
                .borrowed_books
                .iter()
                .map(|id| id.value().to_string())
                .collect(),
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
