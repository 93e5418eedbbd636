use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, add_book, close_session, get_session, issue_book, open_session, register_member,
    return_book, view_books, view_members,
};

/// Creates the API router with all catalog endpoints
///
/// Session endpoints:
/// - POST /sessions - Open a session with an empty catalog
/// - GET /sessions/:session_id - Session details
/// - DELETE /sessions/:session_id - Close a session
///
/// Command endpoints (Write operations):
/// - POST /sessions/:session_id/books - Add a book
/// - POST /sessions/:session_id/members - Register a member
/// - POST /sessions/:session_id/issues - Issue a book to a member
/// - POST /sessions/:session_id/returns - Return a book
///
/// Query endpoints (Read operations):
/// - GET /sessions/:session_id/books - Available and issued books
/// - GET /sessions/:session_id/members - Registered members
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Session lifecycle
        .route("/sessions", post(open_session))
        .route(
            "/sessions/:session_id",
            get(get_session).delete(close_session),
        )
        // Catalog endpoints
        .route(
            "/sessions/:session_id/books",
            post(add_book).get(view_books),
        )
        .route(
            "/sessions/:session_id/members",
            post(register_member).get(view_members),
        )
        .route("/sessions/:session_id/issues", post(issue_book))
        .route("/sessions/:session_id/returns", post(return_book))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
