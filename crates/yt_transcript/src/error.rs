#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Unexpected status {status} from {url}")]
    Http { status: u16, url: String },
    #[error("Failed to decode player response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to configure proxy: {0}")]
    Proxy(String),
    #[error("YouTube is blocking requests from this IP")]
    IpBlocked,
    #[error("YouTube requires a bot check before serving this video")]
    RequestBlocked,
    #[error("Failed to automatically give consent to saving cookies")]
    ConsentCookieFailed,
    #[error("The page data of video {0} could not be parsed")]
    DataUnparsable(String),
    #[error("Expected a video id but got a URL: {0}")]
    InvalidVideoId(String),
    #[error("Video {0} is no longer available")]
    VideoUnavailable(String),
    #[error("Video {0} is age restricted")]
    AgeRestricted(String),
    #[error("Video is unplayable: {reason}{}", fmt_sub_reasons(.sub_reasons))]
    VideoUnplayable {
        reason: String,
        sub_reasons: Vec<String>,
    },
    #[error("Subtitles are disabled for video {0}")]
    TranscriptsDisabled(String),
    #[error("No transcript found for any of {requested:?} (available: {available:?})")]
    NoTranscriptFound {
        requested: Vec<String>,
        available: Vec<String>,
    },
    #[error("Caption track for video {0} requires a PO token")]
    PoTokenRequired(String),
}

fn fmt_sub_reasons(sub_reasons: &[String]) -> String {
    if sub_reasons.is_empty() {
        String::new()
    } else {
        format!(" ({})", sub_reasons.join("; "))
    }
}
