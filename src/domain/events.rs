use serde::{Deserialize, Serialize};
use std::fmt;

use super::{BookId, MemberId};

/// イベント：書籍が登録された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookAdded {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
}

/// イベント：会員が登録された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRegistered {
    pub member_id: MemberId,
    pub name: String,
}

/// イベント：書籍が貸し出された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookIssued {
    pub book_id: BookId,
    pub member_id: MemberId,
    pub title: String,
    pub member_name: String,
}

/// イベント：書籍が返却された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookReturned {
    pub book_id: BookId,
    pub member_id: MemberId,
    pub title: String,
    pub member_name: String,
}

/// ドメインイベント統合型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DomainEvent {
    BookAdded(BookAdded),
    MemberRegistered(MemberRegistered),
    BookIssued(BookIssued),
    BookReturned(BookReturned),
}

// 表示形式はそのまま利用者向けの確認メッセージになる

impl fmt::Display for BookAdded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book \"{}\" added successfully with ID \"{}\".",
            self.title, self.book_id
        )
    }
}

impl fmt::Display for MemberRegistered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Member \"{}\" registered successfully with ID \"{}\".",
            self.name, self.member_id
        )
    }
}

impl fmt::Display for BookIssued {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book \"{}\" issued to member \"{}\".",
            self.title, self.member_name
        )
    }
}

impl fmt::Display for BookReturned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book \"{}\" returned by member \"{}\".",
            self.title, self.member_name
        )
    }
}

impl fmt::Display for DomainEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainEvent::BookAdded(e) => fmt::Display::fmt(e, f),
            DomainEvent::MemberRegistered(e) => fmt::Display::fmt(e, f),
            DomainEvent::BookIssued(e) => fmt::Display::fmt(e, f),
            DomainEvent::BookReturned(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl From<BookAdded> for DomainEvent {
    fn from(event: BookAdded) -> Self {
        DomainEvent::BookAdded(event)
    }
}

impl From<MemberRegistered> for DomainEvent {
    fn from(event: MemberRegistered) -> Self {
        DomainEvent::MemberRegistered(event)
    }
}

impl From<BookIssued> for DomainEvent {
    fn from(event: BookIssued) -> Self {
        DomainEvent::BookIssued(event)
    }
}

impl From<BookReturned> for DomainEvent {
    fn from(event: BookReturned) -> Self {
        DomainEvent::BookReturned(event)
    }
}
