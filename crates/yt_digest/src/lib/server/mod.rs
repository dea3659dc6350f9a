//! HTTP surface: a single summary endpoint plus a health probe.

mod handlers;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use yt_transcript::TranscriptSource;

use crate::{error::Error, Summarizer, SummaryPipeline};

pub use handlers::{health_handler, youtube_summary_handler, HealthResponse};

/// Origins allowed to call the API from a browser.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    "https://quizbot-yqez.onrender.com",
    "http://127.0.0.1:5500",
    "http://localhost:5500",
];

/// How long browsers may cache a preflight response.
pub const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

pub struct AppState<T, S>
where
    T: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    pub pipeline: Arc<SummaryPipeline<T, S>>,
}

impl<T, S> AppState<T, S>
where
    T: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    pub fn new(pipeline: SummaryPipeline<T, S>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

impl<T, S> Clone for AppState<T, S>
where
    T: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}

/// Cross-origin policy: `POST`/`OPTIONS` from the listed origins only,
/// without credentials.
pub fn cors_layer<I, O>(allowed_origins: I) -> Result<CorsLayer, Error>
where
    I: IntoIterator<Item = O>,
    O: AsRef<str>,
{
    let origins = allowed_origins
        .into_iter()
        .map(|origin| {
            let origin = origin.as_ref().trim();
            if origin == "*" {
                return Err(Error::InvalidOrigin {
                    origin: origin.to_string(),
                    reason: "wildcard is not allowed in an origin allow-list".into(),
                });
            }
            HeaderValue::from_str(origin).map_err(|e| Error::InvalidOrigin {
                origin: origin.to_string(),
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::any())
        .allow_credentials(false)
        .max_age(PREFLIGHT_MAX_AGE))
}

pub fn create_router<T, S>(state: AppState<T, S>, cors: CorsLayer) -> Router
where
    T: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/youtube-summary", post(youtube_summary_handler::<T, S>))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
