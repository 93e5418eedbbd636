use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{
    BookAdded, BookId, BookIssued, BookReturned, IssueBookError, MemberId, MemberRegistered,
    ReturnBookError,
};

// ============================================================================
// エンティティ
// ============================================================================

/// 書籍 - カタログの1エントリ
///
/// 不変条件：`available == false` ⇔ `borrower` が存在し、その会員の
/// `borrowed_books` にこの書籍IDが含まれる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    pub available: bool,
    pub borrower: Option<MemberId>,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// 指定された会員が現在この書籍を借りているか
    pub fn is_borrowed_by(&self, member_id: &MemberId) -> bool {
        self.borrower.as_ref() == Some(member_id)
    }
}

/// 会員 - 貸出中の書籍IDの集合を持つ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub member_id: MemberId,
    pub name: String,
    pub borrowed_books: BTreeSet<BookId>,
}

impl Member {
    pub fn has_borrowed(&self, book_id: &BookId) -> bool {
        self.borrowed_books.contains(book_id)
    }
}

// ============================================================================
// 純粋関数
// ============================================================================

/// 純粋関数：書籍を登録する
///
/// 新しい書籍は貸出可能、借り手なしで作成される。
/// ID重複の確認はストア側の責務。
pub fn add_book(
    book_id: BookId,
    title: impl Into<String>,
    author: impl Into<String>,
) -> (Book, BookAdded) {
    let book = Book {
        book_id,
        title: title.into(),
        author: author.into(),
        available: true,
        borrower: None,
    };

    let event = BookAdded {
        book_id: book.book_id.clone(),
        title: book.title.clone(),
        author: book.author.clone(),
    };

    (book, event)
}

/// 純粋関数：会員を登録する
pub fn register_member(member_id: MemberId, name: impl Into<String>) -> (Member, MemberRegistered) {
    let member = Member {
        member_id,
        name: name.into(),
        borrowed_books: BTreeSet::new(),
    };

    let event = MemberRegistered {
        member_id: member.member_id.clone(),
        name: member.name.clone(),
    };

    (member, event)
}

/// 純粋関数：書籍を会員に貸し出す
///
/// ビジネスルール：
/// - 貸出可能な書籍のみ貸し出せる
///
/// 副作用なし。更新後の書籍・会員とイベントを返す。
pub fn issue_book(
    book: &Book,
    member: &Member,
) -> Result<(Book, Member, BookIssued), IssueBookError> {
    if !book.is_available() {
        return Err(IssueBookError::AlreadyIssued);
    }

    let issued_book = Book {
        available: false,
        borrower: Some(member.member_id.clone()),
        ..book.clone()
    };

    let mut borrowing_member = member.clone();
    borrowing_member
        .borrowed_books
        .insert(book.book_id.clone());

    let event = BookIssued {
        book_id: book.book_id.clone(),
        member_id: member.member_id.clone(),
        title: book.title.clone(),
        member_name: member.name.clone(),
    };

    Ok((issued_book, borrowing_member, event))
}

/// 純粋関数：書籍を返却する
///
/// ビジネスルール：
/// - 書籍の現在の借り手がこの会員であること
///   （貸出可能な書籍は借り手がいないため、常に拒否される）
pub fn return_book(
    book: &Book,
    member: &Member,
) -> Result<(Book, Member, BookReturned), ReturnBookError> {
    if !book.is_borrowed_by(&member.member_id) {
        return Err(ReturnBookError::NotBorrowedByMember);
    }

    let returned_book = Book {
        available: true,
        borrower: None,
        ..book.clone()
    };

    let mut returning_member = member.clone();
    returning_member.borrowed_books.remove(&book.book_id);

    let event = BookReturned {
        book_id: book.book_id.clone(),
        member_id: member.member_id.clone(),
        title: book.title.clone(),
        member_name: member.name.clone(),
    };

    Ok((returned_book, returning_member, event))
}
