//! In-memory library catalog: books, members, issuing and returning.
//!
//! Each session owns an independent [`application::catalog::CatalogStore`].
//! The HTTP API in [`api`] is a thin front-end over the session registry.

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
