use std::collections::BTreeMap;

use crate::domain::{
    self, Book, BookAdded, BookId, BookIssued, BookReturned, Member, MemberId, MemberRegistered,
};

use super::errors::{CatalogError, EntityKind, Result};

/// 書籍一覧を貸出可能／貸出中に分けたスナップショット
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPartition {
    pub available: BTreeMap<BookId, Book>,
    pub issued: BTreeMap<BookId, Book>,
}

/// カタログストア - 1セッション分の書籍と会員を保持する
///
/// 両コレクションはこの構造体だけが所有し、変更は4つの操作
/// （add_book, register_member, issue_book, return_book）を通してのみ行う。
/// すべての操作は同期的で、途中で中断されることはない。
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    books: BTreeMap<BookId, Book>,
    members: BTreeMap<MemberId, Member>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 書籍を登録する
    ///
    /// # エラー
    /// 同じIDの書籍が既にある場合は`DuplicateId`。既存の書籍は変更されない。
    pub fn add_book(
        &mut self,
        book_id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Result<BookAdded> {
        if self.books.contains_key(&book_id) {
            tracing::debug!(%book_id, "Rejected duplicate book id");
            return Err(CatalogError::DuplicateId(EntityKind::Book));
        }

        let (book, event) = domain::catalog::add_book(book_id, title, author);
        self.books.insert(book.book_id.clone(), book);

        tracing::info!(book_id = %event.book_id, title = %event.title, "Book added");
        Ok(event)
    }

    /// 会員を登録する
    ///
    /// # エラー
    /// 同じIDの会員が既にある場合は`DuplicateId`。
    pub fn register_member(
        &mut self,
        member_id: MemberId,
        name: impl Into<String>,
    ) -> Result<MemberRegistered> {
        if self.members.contains_key(&member_id) {
            tracing::debug!(%member_id, "Rejected duplicate member id");
            return Err(CatalogError::DuplicateId(EntityKind::Member));
        }

        let (member, event) = domain::catalog::register_member(member_id, name);
        self.members.insert(member.member_id.clone(), member);

        tracing::info!(member_id = %event.member_id, name = %event.name, "Member registered");
        Ok(event)
    }

    /// 書籍を貸し出す
    ///
    /// 検証順序：
    /// 1. 書籍が存在すること（`BookNotFound`）
    /// 2. 書籍が貸出可能であること（`AlreadyIssued`）
    /// 3. 会員が存在すること（`MemberNotFound`）
    ///
    /// 貸出中の書籍は会員の有無に関わらず`AlreadyIssued`になる。
    pub fn issue_book(&mut self, book_id: &BookId, member_id: &MemberId) -> Result<BookIssued> {
        let Some(book) = self.books.get(book_id) else {
            tracing::debug!(%book_id, %member_id, "Book not found");
            return Err(CatalogError::BookNotFound);
        };

        if !book.is_available() {
            tracing::debug!(%book_id, %member_id, "Book is already issued");
            return Err(CatalogError::AlreadyIssued);
        }

        let Some(member) = self.members.get(member_id) else {
            tracing::debug!(%book_id, %member_id, "Member not found");
            return Err(CatalogError::MemberNotFound);
        };

        let (issued_book, borrowing_member, event) = domain::catalog::issue_book(book, member)?;

        self.books.insert(issued_book.book_id.clone(), issued_book);
        self.members
            .insert(borrowing_member.member_id.clone(), borrowing_member);

        tracing::info!(%book_id, %member_id, "Book issued");
        Ok(event)
    }

    /// 書籍を返却する
    ///
    /// 検証順序：
    /// 1. 書籍が存在すること（`BookNotFound`）
    /// 2. 書籍の借り手が指定の会員であること（`NotBorrowedByMember`）
    ///
    /// 借り手が登録済み会員でないケースは貸出の仕組み上起こらない。
    /// 起きた場合は何も変更せず`MemberNotFound`を返す。
    pub fn return_book(&mut self, book_id: &BookId, member_id: &MemberId) -> Result<BookReturned> {
        let Some(book) = self.books.get(book_id) else {
            tracing::debug!(%book_id, %member_id, "Book not found");
            return Err(CatalogError::BookNotFound);
        };

        if !book.is_borrowed_by(member_id) {
            tracing::debug!(%book_id, %member_id, "Book is not borrowed by this member");
            return Err(CatalogError::NotBorrowedByMember);
        }

        let Some(member) = self.members.get(member_id) else {
            tracing::warn!(%book_id, %member_id, "Borrower is not a registered member");
            return Err(CatalogError::MemberNotFound);
        };

        let (returned_book, returning_member, event) = domain::catalog::return_book(book, member)?;

        self.books
            .insert(returned_book.book_id.clone(), returned_book);
        self.members
            .insert(returning_member.member_id.clone(), returning_member);

        tracing::info!(%book_id, %member_id, "Book returned");
        Ok(event)
    }

    /// 書籍一覧を貸出可能／貸出中に分けて返す
    pub fn view_books(&self) -> BookPartition {
        let (available, issued) = self
            .books
            .iter()
            .map(|(id, book)| (id.clone(), book.clone()))
            .partition(|(_, book)| book.is_available());

        BookPartition { available, issued }
    }

    /// 会員一覧（読み取り専用）
    pub fn view_members(&self) -> &BTreeMap<MemberId, Member> {
        &self.members
    }

    pub fn book(&self, book_id: &BookId) -> Option<&Book> {
        self.books.get(book_id)
    }

    pub fn member(&self, member_id: &MemberId) -> Option<&Member> {
        self.members.get(member_id)
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(id: &str) -> BookId {
        BookId::new(id)
    }

    fn m(id: &str) -> MemberId {
        MemberId::new(id)
    }

    /// B1(Dune) と M1(Alice) を登録済みのストア
    fn seeded_store() -> CatalogStore {
        let mut store = CatalogStore::new();
        store.add_book(b("B1"), "Dune", "Herbert").unwrap();
        store.register_member(m("M1"), "Alice").unwrap();
        store
    }

    // ------------------------------------------------------------------------
    // add_book / register_member
    // ------------------------------------------------------------------------

    #[test]
    fn test_add_book_creates_available_book() {
        let mut store = CatalogStore::new();

        let event = store.add_book(b("B1"), "Dune", "Herbert").unwrap();

        assert_eq!(
            event.to_string(),
            "Book \"Dune\" added successfully with ID \"B1\"."
        );
        let book = store.book(&b("B1")).unwrap();
        assert!(book.available);
        assert_eq!(book.borrower, None);
    }

    #[test]
    fn test_add_book_twice_keeps_first_book() {
        let mut store = seeded_store();

        let result = store.add_book(b("B1"), "Emma", "Austen");

        assert_eq!(result.unwrap_err(), CatalogError::DuplicateId(EntityKind::Book));
        let book = store.book(&b("B1")).unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Herbert");
        assert_eq!(store.book_count(), 1);
    }

    #[test]
    fn test_register_member_twice_reports_duplicate() {
        let mut store = seeded_store();

        let result = store.register_member(m("M1"), "Someone Else");

        assert_eq!(
            result.unwrap_err(),
            CatalogError::DuplicateId(EntityKind::Member)
        );
        assert_eq!(store.member(&m("M1")).unwrap().name, "Alice");
    }

    #[test]
    fn test_book_and_member_ids_are_separate_namespaces() {
        let mut store = CatalogStore::new();
        store.add_book(b("X"), "Dune", "Herbert").unwrap();

        assert!(store.register_member(m("X"), "Alice").is_ok());
    }

    // ------------------------------------------------------------------------
    // issue_book
    // ------------------------------------------------------------------------

    #[test]
    fn test_issue_book_success() {
        let mut store = seeded_store();

        let event = store.issue_book(&b("B1"), &m("M1")).unwrap();

        assert_eq!(event.to_string(), "Book \"Dune\" issued to member \"Alice\".");
        let book = store.book(&b("B1")).unwrap();
        assert!(!book.available);
        assert_eq!(book.borrower, Some(m("M1")));
        assert!(store.member(&m("M1")).unwrap().has_borrowed(&b("B1")));
    }

    #[test]
    fn test_issue_book_not_found_mutates_nothing() {
        let mut store = seeded_store();

        let result = store.issue_book(&b("B9"), &m("M1"));

        assert_eq!(result.unwrap_err(), CatalogError::BookNotFound);
        assert!(store.member(&m("M1")).unwrap().borrowed_books.is_empty());
        assert_eq!(store.book_count(), 1);
    }

    #[test]
    fn test_issue_book_already_issued_takes_precedence_over_missing_member() {
        let mut store = seeded_store();
        store.issue_book(&b("B1"), &m("M1")).unwrap();

        let unknown = store.issue_book(&b("B1"), &m("M404"));
        assert_eq!(unknown.unwrap_err(), CatalogError::AlreadyIssued);

        let same = store.issue_book(&b("B1"), &m("M1"));
        assert_eq!(same.unwrap_err(), CatalogError::AlreadyIssued);
    }

    #[test]
    fn test_issue_book_member_not_found() {
        let mut store = seeded_store();

        let result = store.issue_book(&b("B1"), &m("M404"));

        assert_eq!(result.unwrap_err(), CatalogError::MemberNotFound);
        assert!(store.book(&b("B1")).unwrap().available);
    }

    // ------------------------------------------------------------------------
    // return_book
    // ------------------------------------------------------------------------

    #[test]
    fn test_issue_then_return_round_trip() {
        let mut store = seeded_store();
        store.issue_book(&b("B1"), &m("M1")).unwrap();

        let event = store.return_book(&b("B1"), &m("M1")).unwrap();

        assert_eq!(
            event.to_string(),
            "Book \"Dune\" returned by member \"Alice\"."
        );
        let book = store.book(&b("B1")).unwrap();
        assert!(book.available);
        assert_eq!(book.borrower, None);
        assert!(store.member(&m("M1")).unwrap().borrowed_books.is_empty());
    }

    #[test]
    fn test_return_book_not_found() {
        let mut store = seeded_store();

        let result = store.return_book(&b("B9"), &m("M1"));
        assert_eq!(result.unwrap_err(), CatalogError::BookNotFound);
    }

    #[test]
    fn test_return_available_book_is_rejected() {
        let mut store = seeded_store();

        let result = store.return_book(&b("B1"), &m("M1"));

        assert_eq!(result.unwrap_err(), CatalogError::NotBorrowedByMember);
        assert!(store.book(&b("B1")).unwrap().available);
    }

    #[test]
    fn test_return_by_other_member_mutates_nothing() {
        let mut store = seeded_store();
        store.register_member(m("M2"), "Bob").unwrap();
        store.issue_book(&b("B1"), &m("M1")).unwrap();

        let result = store.return_book(&b("B1"), &m("M2"));

        assert_eq!(result.unwrap_err(), CatalogError::NotBorrowedByMember);
        let book = store.book(&b("B1")).unwrap();
        assert_eq!(book.borrower, Some(m("M1")));
        assert!(store.member(&m("M1")).unwrap().has_borrowed(&b("B1")));
        assert!(store.member(&m("M2")).unwrap().borrowed_books.is_empty());
    }

    #[test]
    fn test_return_by_unregistered_non_borrower_is_not_borrowed() {
        let mut store = seeded_store();
        store.issue_book(&b("B1"), &m("M1")).unwrap();

        let result = store.return_book(&b("B1"), &m("M404"));
        assert_eq!(result.unwrap_err(), CatalogError::NotBorrowedByMember);
    }

    // ------------------------------------------------------------------------
    // view_books / view_members
    // ------------------------------------------------------------------------

    #[test]
    fn test_view_books_partitions_by_availability() {
        let mut store = seeded_store();
        store.add_book(b("B2"), "Emma", "Austen").unwrap();
        store.issue_book(&b("B1"), &m("M1")).unwrap();

        let partition = store.view_books();

        assert_eq!(partition.available.len(), 1);
        assert!(partition.available.contains_key(&b("B2")));
        assert_eq!(partition.issued.len(), 1);
        assert_eq!(partition.issued[&b("B1")].borrower, Some(m("M1")));
    }

    #[test]
    fn test_view_books_is_a_snapshot() {
        let mut store = seeded_store();
        let before = store.view_books();

        store.issue_book(&b("B1"), &m("M1")).unwrap();

        assert!(before.available.contains_key(&b("B1")));
        assert!(before.issued.is_empty());
    }

    #[test]
    fn test_view_members_includes_borrowed_set() {
        let mut store = seeded_store();
        store.add_book(b("B2"), "Emma", "Austen").unwrap();
        store.issue_book(&b("B1"), &m("M1")).unwrap();
        store.issue_book(&b("B2"), &m("M1")).unwrap();

        let members = store.view_members();

        let alice = &members[&m("M1")];
        assert_eq!(alice.name, "Alice");
        assert_eq!(
            alice.borrowed_books.iter().cloned().collect::<Vec<_>>(),
            vec![b("B1"), b("B2")]
        );
    }

    #[test]
    fn test_empty_store_views() {
        let store = CatalogStore::new();

        assert_eq!(store.view_books(), BookPartition::default());
        assert!(store.view_members().is_empty());
    }
}
