use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use yt_transcript::TranscriptSource;

use crate::{
    server::AppState,
    types::{YouTubeSummaryResponse, YouTubeUrlRequest},
    Summarizer,
};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
        }),
    )
}

/// `POST /youtube-summary`
///
/// Always answers `200 OK`; the outcome is carried in `response_status`.
/// The pipeline runs on its own task so that a panic inside it still yields a
/// well-formed `summary_error` response.
#[tracing::instrument(skip_all, fields(youtube_url = %request.youtube_url))]
pub async fn youtube_summary_handler<T, S>(
    State(state): State<AppState<T, S>>,
    Json(request): Json<YouTubeUrlRequest>,
) -> Json<YouTubeSummaryResponse>
where
    T: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let pipeline = Arc::clone(&state.pipeline);
    let url = request.youtube_url;

    let response = match tokio::spawn(async move { pipeline.run(&url).await }).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "Summary pipeline task failed");
            YouTubeSummaryResponse::summary_error(format!("error while running the API: {e}"))
        }
    };

    tracing::info!(status = ?response.response_status, "Responding to summary request");
    Json(response)
}
