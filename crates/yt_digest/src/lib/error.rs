#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not a recognized video URL: {0}")]
    InvalidVideoUrl(String),
    #[error("invalid CORS origin {origin:?}: {reason}")]
    InvalidOrigin { origin: String, reason: String },
}
