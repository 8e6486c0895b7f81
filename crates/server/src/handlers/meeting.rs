//! # Meeting Route Handlers

use super::{AppError, AppState};
use axum::{extract::State, Json};
use briefly::{MeetingSummary, SummaryRequest};
use tracing::info;

/// Handler for `POST /api/v1/meeting/summarize`.
///
/// Runs the summary pipeline once: key points, action items, then the merge.
/// Any failed step fails the whole request.
pub async fn summarize_meeting_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<SummaryRequest>,
) -> Result<Json<MeetingSummary>, AppError> {
    info!(
        "Received meeting summary request ({} bytes of transcript).",
        payload.transcript.len()
    );

    let summary = app_state.agents.summarize_meeting(&payload).await?;

    info!("Result: {:?}", summary);
    Ok(Json(summary))
}
