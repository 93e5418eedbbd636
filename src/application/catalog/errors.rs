use std::fmt;
use thiserror::Error;

use crate::domain::{IssueBookError, ReturnBookError};

/// 重複したIDの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Book,
    Member,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Book => f.write_str("Book"),
            EntityKind::Member => f.write_str("Member"),
        }
    }
}

/// カタログ操作のエラー
///
/// いずれも業務ルール違反であり、障害ではない。
/// 表示形式はそのまま利用者向けのメッセージとして使われる。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// 同じIDの書籍または会員が既に存在する
    #[error("{0} already exists.")]
    DuplicateId(EntityKind),

    /// 書籍が存在しない
    #[error("Book not found.")]
    BookNotFound,

    /// 書籍が既に貸出中
    #[error("Book is already issued.")]
    AlreadyIssued,

    /// 会員が存在しない
    #[error("Member not found.")]
    MemberNotFound,

    /// この会員はこの書籍を借りていない
    #[error("This member did not borrow this book.")]
    NotBorrowedByMember,
}

impl From<IssueBookError> for CatalogError {
    fn from(err: IssueBookError) -> Self {
        match err {
            IssueBookError::AlreadyIssued => CatalogError::AlreadyIssued,
        }
    }
}

impl From<ReturnBookError> for CatalogError {
    fn from(err: ReturnBookError) -> Self {
        match err {
            ReturnBookError::NotBorrowedByMember => CatalogError::NotBorrowedByMember,
        }
    }
}

/// カタログ操作の Result型
pub type Result<T> = std::result::Result<T, CatalogError>;
