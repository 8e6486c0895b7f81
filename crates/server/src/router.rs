use super::{handlers, state::AppState};
use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(app_state.config.max_body_bytes);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route(
            "/api/v1/blog/suggest-titles",
            post(handlers::suggest_titles_handler),
        )
        .route(
            "/api/v1/meeting/summarize",
            post(handlers::summarize_meeting_handler),
        )
        .layer(body_limit)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
