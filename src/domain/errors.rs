/// 貸出のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueBookError {
    /// 既に貸出中
    AlreadyIssued,
}

/// 返却のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnBookError {
    /// この会員はこの書籍を借りていない（貸出可能な書籍を含む）
    NotBorrowedByMember,
}
