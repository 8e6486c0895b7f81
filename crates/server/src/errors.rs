use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use briefly::PipelineError;
use serde_json::json;
use tracing::error;

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the server,
/// allowing them to be converted into appropriate HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Errors that aborted a pipeline run.
    Pipeline(PipelineError),
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        AppError::Pipeline(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, body) = match self {
            AppError::Pipeline(err) => {
                error!("PipelineError: {:?}", err);
                let status = match &err {
                    PipelineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                    PipelineError::ExtractionFailure { .. } => StatusCode::BAD_GATEWAY,
                    PipelineError::InvalidTemplate { .. } | PipelineError::Aggregation(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                let mut body = json!({
                    "error": err.to_string(),
                    "kind": err.kind(),
                });
                if let PipelineError::ExtractionFailure { step, .. } = &err {
                    body["step"] = json!(step);
                }
                (status, body)
            }
        };

        (status_code, Json(body)).into_response()
    }
}
