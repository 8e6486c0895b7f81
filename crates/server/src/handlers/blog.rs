//! # Blog Route Handlers

use super::{AppError, AppState};
use axum::{extract::State, Json};
use briefly::{BlogRequest, BlogTitles};
use tracing::info;

/// Handler for `POST /api/v1/blog/suggest-titles`.
///
/// Runs the title suggestion pipeline once on `blogContent`.
pub async fn suggest_titles_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<BlogRequest>,
) -> Result<Json<BlogTitles>, AppError> {
    info!(
        "Received title suggestion request ({} bytes of blog content).",
        payload.blog_content.len()
    );

    let titles = app_state.agents.suggest_titles(&payload).await?;

    info!("Result: {:?}", titles);
    Ok(Json(titles))
}
