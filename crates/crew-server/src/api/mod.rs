mod dto;
mod error;
mod handlers;
mod markdown;
mod state;
mod web;

pub use error::{ApiError, status_for};
pub use state::AppState;
pub use web::EMPTY_TICKER_MESSAGE;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(web::index))
        .route("/research", post(web::research))
        .route("/api/research", post(handlers::research))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
