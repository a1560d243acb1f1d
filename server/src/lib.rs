pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod store;
pub mod utils;

use sqlx::PgPool;

/// Shared application state handed to every request handler.
///
/// The pool is constructed once at startup and cloned into each handler
/// through axum's `State` extractor; nothing in the crate reaches for a
/// global connection.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}
