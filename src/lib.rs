pub mod catalog;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use axum::{routing::get, Router};
use sqlx::SqlitePool;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
}

async fn health() -> &'static str {
    "ok"
}

/// Build the full Axum application router.
///
/// Caller is responsible for running database migrations on `pool` beforehand.
/// Every catalog route is read-only.
pub fn build_app(pool: SqlitePool) -> Router {
    let state = AppState { db: pool };

    Router::new()
        .route("/health", get(health))
        .merge(routes::flowers::router())
        .layer(
            TraceLayer::new_for_http()
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
